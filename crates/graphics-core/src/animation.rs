// File: crates/graphics-core/src/animation.rs
// Summary: Tick-driven animation loop for the chart widget, terminated through a stop token.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::{Stream, StreamExt};
use tracing::{debug, trace, warn};

use crate::chart::{series_from_shape, ChartBackend, FrameTransition};
use crate::error::Result;
use crate::host::{DataExpr, DataSource, EventBus, EventPayload};
use crate::tensor::{Rank, Shape};

/// Stop token for a running animation. Clones share the same flag.
#[derive(Clone, Debug)]
pub struct AnimationHandle {
    live: Arc<AtomicBool>,
}

impl AnimationHandle {
    fn new() -> Self {
        Self { live: Arc::new(AtomicBool::new(true)) }
    }

    pub fn stop(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Frame pushed (or skipped) and ready for the next tick.
    Rearmed,
    Stopped,
}

#[derive(Debug)]
pub struct AnimationDriver {
    event: String,
    symbol: String,
    expr: DataExpr,
    rank: Rank,
    handle: AnimationHandle,
    frames: u64,
}

impl AnimationDriver {
    /// `rank` is the rank of the data at creation; every frame is read under it.
    pub fn start(event: String, symbol: String, expr: DataExpr, rank: Rank) -> Self {
        debug!(%event, %symbol, %expr, ?rank, "animation armed");
        Self { event, symbol, expr, rank, handle: AnimationHandle::new(), frames: 0 }
    }

    pub fn handle(&self) -> AnimationHandle {
        self.handle.clone()
    }

    /// Host event fired before each frame.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Name the host knows the frame renderer by.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// One host tick: fire the event, re-read the data and push it as a frame.
    ///
    /// Data whose rank no longer matches is skipped without stopping the loop.
    pub async fn tick(
        &mut self,
        backend: &mut dyn ChartBackend,
        source: &dyn DataSource,
        bus: &dyn EventBus,
    ) -> Result<TickOutcome> {
        if !self.handle.is_live() {
            return Ok(TickOutcome::Stopped);
        }
        bus.emit(&self.event, EventPayload::Scalar(0.0));
        let data = source.retrieve(&self.expr).await?;
        match Shape::of(&data) {
            Some(shape) if shape.rank() == self.rank => {
                let frame = series_from_shape(&shape, None);
                backend.animate(&frame, &FrameTransition::TICK)?;
                self.frames += 1;
                trace!(frame = self.frames, traces = frame.len(), "animation frame");
            }
            Some(shape) => debug!(expected = ?self.rank, got = ?shape.rank(), "frame rank changed; skipped"),
            None => warn!(expr = %self.expr, "frame data unclassifiable; skipped"),
        }
        Ok(if self.handle.is_live() { TickOutcome::Rearmed } else { TickOutcome::Stopped })
    }

    /// Tick once per stream item until the stream ends or the handle is stopped.
    /// Returns the total number of frames pushed.
    pub async fn run<T>(
        &mut self,
        mut ticks: impl Stream<Item = T> + Unpin,
        backend: &mut dyn ChartBackend,
        source: &dyn DataSource,
        bus: &dyn EventBus,
    ) -> Result<u64> {
        while ticks.next().await.is_some() {
            if self.tick(backend, source, bus).await? == TickOutcome::Stopped {
                break;
            }
        }
        debug!(frames = self.frames, live = self.handle.is_live(), "animation loop ended");
        Ok(self.frames)
    }
}
