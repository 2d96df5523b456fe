// File: crates/graphics-core/src/host.rs
// Summary: Interfaces to the host: data source (interpreter) and event bus, plus in-memory implementations.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RetrievalError;
use crate::tensor::Tensor;

/// Opaque expression handed back to the interpreter to obtain data.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataExpr(pub String);

impl DataExpr {
    pub fn new(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }
}

impl fmt::Display for DataExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The interpreter that turns expressions into numeric data.
///
/// Retrieval may suspend; failures propagate to the caller unmodified.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn retrieve(&self, expr: &DataExpr) -> Result<Tensor, RetrievalError>;
}

/// Value reported back to the data source through the event bus.
#[derive(Clone, Debug, PartialEq)]
pub enum EventPayload {
    /// Data-space coordinates, e.g. of a dragged marker.
    Point { x: f64, y: f64 },
    /// Single number, e.g. a zoom factor.
    Scalar(f64),
}

impl fmt::Display for EventPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventPayload::Point { x, y } => write!(f, "{{{}, {}}}", x, y),
            EventPayload::Scalar(k) => write!(f, "{}", k),
        }
    }
}

/// Fire-and-forget channel to the host. No acknowledgement, no ordering guarantee.
pub trait EventBus: Send + Sync {
    fn emit(&self, key: &str, payload: EventPayload);
}

/// Data source backed by a table of expressions; entries can be replaced between frames.
#[derive(Default)]
pub struct StaticSource {
    table: RwLock<HashMap<DataExpr, Tensor>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, expr: impl Into<String>, data: impl Into<Tensor>) -> Self {
        self.set(expr, data);
        self
    }

    pub fn set(&self, expr: impl Into<String>, data: impl Into<Tensor>) {
        if let Ok(mut table) = self.table.write() {
            table.insert(DataExpr::new(expr), data.into());
        }
    }
}

#[async_trait]
impl DataSource for StaticSource {
    async fn retrieve(&self, expr: &DataExpr) -> Result<Tensor, RetrievalError> {
        let table = self
            .table
            .read()
            .map_err(|e| RetrievalError::Interpretation { expr: expr.to_string(), message: e.to_string() })?;
        table.get(expr).cloned().ok_or_else(|| RetrievalError::UnknownExpression(expr.to_string()))
    }
}

/// Event bus that keeps every emission in order of arrival.
#[derive(Default)]
pub struct RecordingBus {
    events: Mutex<Vec<(String, EventPayload)>>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, EventPayload)> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl EventBus for RecordingBus {
    fn emit(&self, key: &str, payload: EventPayload) {
        tracing::trace!(key, %payload, "emit");
        if let Ok(mut events) = self.events.lock() {
            events.push((key.to_string(), payload));
        }
    }
}
