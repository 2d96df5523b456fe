// File: crates/graphics-core/src/expr.rs
// Summary: Declarative graphics expression tree evaluated by a scene.
// Notes:
// - JSON form is `{"head": "Line", "args": "data"}`; heads follow the notebook
//   language (`RGBColor`, `EventListener`, ...). Leaves reference data by
//   expression and are resolved through the host data source at draw time.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::host::DataExpr;
use crate::interaction::BehaviorKind;

/// Heads accepted for compatibility that draw nothing and change nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InertHead {
    Identity,
    Automatic,
    Scaled,
    GoldenRatio,
    None,
    GrayLevel,
    AbsolutePointSize,
    CopiedValueFunction,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawExpr")]
pub enum GraphicsExpr {
    /// Children evaluated in order, each under its own copy of the environment.
    List(Vec<GraphicsExpr>),
    /// Evaluated like a `List`.
    Annotation(Vec<GraphicsExpr>),
    /// Items evaluated in order against one shared environment.
    Directive(Vec<GraphicsExpr>),
    Line(DataExpr),
    Point(DataExpr),
    AbsoluteThickness(f64),
    PointSize(f64),
    Opacity(f64),
    RGBColor(Vec<f64>),
    Hue(Vec<f64>),
    /// Evaluate `body` with pointer behaviours attached, each reporting under its key.
    EventListener { body: Box<GraphicsExpr>, bindings: Vec<(BehaviorKind, String)> },
    Inert(InertHead),
}

impl GraphicsExpr {
    pub fn line(expr: impl Into<String>) -> Self {
        GraphicsExpr::Line(DataExpr::new(expr))
    }

    pub fn point(expr: impl Into<String>) -> Self {
        GraphicsExpr::Point(DataExpr::new(expr))
    }

    pub fn from_json_str(input: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

#[derive(Deserialize)]
struct RawExpr {
    head: String,
    #[serde(default)]
    args: serde_json::Value,
}

impl TryFrom<RawExpr> for GraphicsExpr {
    type Error = String;

    fn try_from(raw: RawExpr) -> Result<Self, Self::Error> {
        let head = raw.head;
        let args = raw.args;
        fn parse<T: serde::de::DeserializeOwned>(head: &str, v: serde_json::Value) -> Result<T, String> {
            serde_json::from_value(v).map_err(|e| format!("{head}: {e}"))
        }

        Ok(match head.as_str() {
            "List" => GraphicsExpr::List(parse(&head, args)?),
            "Annotation" => GraphicsExpr::Annotation(parse(&head, args)?),
            "Directive" => GraphicsExpr::Directive(parse(&head, args)?),
            "Line" => GraphicsExpr::Line(parse(&head, args)?),
            "Point" => GraphicsExpr::Point(parse(&head, args)?),
            "AbsoluteThickness" => GraphicsExpr::AbsoluteThickness(parse(&head, args)?),
            "PointSize" => GraphicsExpr::PointSize(parse(&head, args)?),
            "Opacity" => GraphicsExpr::Opacity(parse(&head, args)?),
            "RGBColor" => GraphicsExpr::RGBColor(parse(&head, args)?),
            "Hue" => GraphicsExpr::Hue(parse(&head, args)?),
            "EventListener" => {
                let (body, rules): (GraphicsExpr, IndexMap<BehaviorKind, String>) = parse(&head, args)?;
                GraphicsExpr::EventListener { body: Box::new(body), bindings: rules.into_iter().collect() }
            }
            "Identity" => GraphicsExpr::Inert(InertHead::Identity),
            "Automatic" => GraphicsExpr::Inert(InertHead::Automatic),
            "Scaled" => GraphicsExpr::Inert(InertHead::Scaled),
            "GoldenRatio" => GraphicsExpr::Inert(InertHead::GoldenRatio),
            "None" => GraphicsExpr::Inert(InertHead::None),
            "GrayLevel" => GraphicsExpr::Inert(InertHead::GrayLevel),
            "AbsolutePointSize" => GraphicsExpr::Inert(InertHead::AbsolutePointSize),
            "CopiedValueFunction" => GraphicsExpr::Inert(InertHead::CopiedValueFunction),
            other => return Err(format!("unknown graphics head: {other}")),
        })
    }
}
