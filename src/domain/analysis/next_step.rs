//! Next-step entries: plain text or a main point with sub-points.

use serde::{Deserialize, Serialize};

/// One recommended next step.
///
/// On the wire a step is either a bare string or `{ "main", "sub_points" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NextStep {
    Text(String),
    Points(PointStep),
}

/// Structured next step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointStep {
    pub main: String,
    #[serde(default)]
    pub sub_points: Vec<String>,
}

impl NextStep {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn points(main: impl Into<String>, sub_points: Vec<String>) -> Self {
        Self::Points(PointStep {
            main: main.into(),
            sub_points,
        })
    }

    /// Blank structured step with one empty sub-point, as added from the editor.
    pub fn blank_points() -> Self {
        Self::points("", vec![String::new()])
    }

    pub fn as_points(&self) -> Option<&PointStep> {
        match self {
            Self::Points(points) => Some(points),
            Self::Text(_) => None,
        }
    }

    pub fn as_points_mut(&mut self) -> Option<&mut PointStep> {
        match self {
            Self::Points(points) => Some(points),
            Self::Text(_) => None,
        }
    }
}
