//! The five extraction passes, described as data

use crate::config::{PassSettings, PassTable};
use crate::prompt;
use crate::selection::Selection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ranked chunks read by the highlights pass
pub const HIGHLIGHT_CHUNKS: usize = 5;

/// Leading chunks offered to the supporting-content pass
pub const SUPPORTING_CHUNKS: usize = 6;

/// One of the extraction passes, in run order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    /// Pass 1: two or three paragraph summary
    ExecutiveSummary,
    /// Pass 2: headline items
    KeyHighlights,
    /// Pass 3: deep-dive articles
    FeatureArticles,
    /// Pass 4: quick bites, action items, technologies, architectures,
    /// best practices and diagram suggestions
    SupportingContent,
    /// Pass 5: business impact, risks and opportunities
    StrategicInsights,
}

impl PassKind {
    /// Every pass in run order
    pub const ALL: [PassKind; 5] = [
        PassKind::ExecutiveSummary,
        PassKind::KeyHighlights,
        PassKind::FeatureArticles,
        PassKind::SupportingContent,
        PassKind::StrategicInsights,
    ];

    /// 1-based pass number
    pub fn number(&self) -> u8 {
        match self {
            PassKind::ExecutiveSummary => 1,
            PassKind::KeyHighlights => 2,
            PassKind::FeatureArticles => 3,
            PassKind::SupportingContent => 4,
            PassKind::StrategicInsights => 5,
        }
    }

    /// Human-readable pass title
    pub fn title(&self) -> &'static str {
        match self {
            PassKind::ExecutiveSummary => "Executive Summary",
            PassKind::KeyHighlights => "Key Highlights",
            PassKind::FeatureArticles => "Feature Articles",
            PassKind::SupportingContent => "Supporting Content",
            PassKind::StrategicInsights => "Strategic Insights",
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// What a pass expects back from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Free prose
    PlainText,
    /// A JSON array of records
    JsonArray,
    /// A single JSON object
    JsonObject,
}

/// Everything needed to run one pass
#[derive(Debug, Clone, PartialEq)]
pub struct PassDescriptor {
    /// Which pass this is
    pub kind: PassKind,

    /// Which chunks it reads
    pub selection: Selection,

    /// Budget and sampling parameters
    pub settings: PassSettings,

    /// Pass-specific system instructions
    pub instructions: &'static str,

    /// Expected response shape
    pub shape: ResponseShape,
}

impl PassDescriptor {
    /// Descriptor for one pass with the given settings
    pub fn new(kind: PassKind, settings: PassSettings) -> Self {
        let (selection, shape) = match kind {
            PassKind::ExecutiveSummary => (Selection::EarlyAndLate, ResponseShape::PlainText),
            PassKind::KeyHighlights => {
                (Selection::TopRanked(HIGHLIGHT_CHUNKS), ResponseShape::JsonArray)
            }
            PassKind::FeatureArticles => (Selection::Middle, ResponseShape::JsonArray),
            PassKind::SupportingContent => {
                (Selection::Leading(SUPPORTING_CHUNKS), ResponseShape::JsonObject)
            }
            PassKind::StrategicInsights => (Selection::FullText, ResponseShape::JsonObject),
        };

        Self {
            kind,
            selection,
            settings,
            instructions: prompt::instructions(kind),
            shape,
        }
    }
}

/// The ordered pass plan for a pass table
pub fn pass_plan(table: &PassTable) -> Vec<PassDescriptor> {
    PassKind::ALL
        .iter()
        .map(|&kind| PassDescriptor::new(kind, table.get(kind)))
        .collect()
}
