//! Knowledge records produced by the extraction passes
//!
//! These types are the contract with the renderers: field names and nesting
//! are what Markdown/HTML/JSON output is built from. Model output is messy, so
//! deserialization is lenient: missing fields default to empty, prose fields
//! accept a list of fragments, and list fields accept a bulleted string.

use crate::run::RunId;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A short headline with a one or two line explanation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Highlight {
    /// Short impactful title
    #[serde(deserialize_with = "text_or_list")]
    pub title: String,

    /// Why it matters
    #[serde(deserialize_with = "text_or_list")]
    pub description: String,
}

/// A deep-dive article outline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureArticle {
    /// Section title
    #[serde(deserialize_with = "text_or_list")]
    pub title: String,

    /// Problem statement or background
    #[serde(deserialize_with = "text_or_list")]
    pub context: String,

    /// Main architectural or technical concepts
    #[serde(deserialize_with = "text_or_list")]
    pub key_ideas: String,

    /// Business and technical benefits
    #[serde(deserialize_with = "text_or_list")]
    pub benefits: String,

    /// Recommended practices
    #[serde(deserialize_with = "text_or_list")]
    pub best_practices: String,

    /// Concrete next step
    #[serde(deserialize_with = "text_or_list")]
    pub call_to_action: String,
}

/// Next steps grouped by audience
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionItems {
    /// Actions for developers and engineers
    #[serde(deserialize_with = "list_or_text")]
    pub engineering_teams: Vec<String>,

    /// Actions for architects and strategy teams
    #[serde(deserialize_with = "list_or_text")]
    pub architecture_teams: Vec<String>,

    /// Actions for decision makers
    #[serde(deserialize_with = "list_or_text")]
    pub leadership: Vec<String>,
}

impl ActionItems {
    /// Whether no audience has any action
    pub fn is_empty(&self) -> bool {
        self.engineering_teams.is_empty()
            && self.architecture_teams.is_empty()
            && self.leadership.is_empty()
    }

    /// Total number of actions across audiences
    pub fn len(&self) -> usize {
        self.engineering_teams.len() + self.architecture_teams.len() + self.leadership.len()
    }

    /// Mutable access to every audience list
    pub fn lists_mut(&mut self) -> [&mut Vec<String>; 3] {
        [
            &mut self.engineering_teams,
            &mut self.architecture_teams,
            &mut self.leadership,
        ]
    }
}

/// An architecture or design pattern mentioned in the source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Architecture {
    /// Architecture or pattern name
    #[serde(deserialize_with = "text_or_list")]
    pub name: String,

    /// Brief description
    #[serde(deserialize_with = "text_or_list")]
    pub description: String,

    /// Key components or services
    #[serde(deserialize_with = "list_or_text")]
    pub components: Vec<String>,

    /// When to use it
    #[serde(deserialize_with = "text_or_list")]
    pub use_case: String,
}

/// A diagram that would help explain the content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramSuggestion {
    /// architecture, workflow, integration or security
    #[serde(rename = "type", alias = "kind", deserialize_with = "text_or_list")]
    pub kind: String,

    /// Diagram title
    #[serde(deserialize_with = "text_or_list")]
    pub title: String,

    /// What it explains and for whom
    #[serde(deserialize_with = "text_or_list")]
    pub purpose: String,

    /// Key components or nodes
    #[serde(deserialize_with = "list_or_text")]
    pub elements: Vec<String>,

    /// How to recreate it
    #[serde(deserialize_with = "text_or_list")]
    pub description: String,
}

/// Business framing of the whole document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategicInsights {
    /// The "so what" for leadership
    #[serde(deserialize_with = "text_or_list")]
    pub business_impact: String,

    /// Risks raised or implied
    #[serde(deserialize_with = "list_or_text")]
    pub risks: Vec<String>,

    /// Opportunities raised or implied
    #[serde(deserialize_with = "list_or_text")]
    pub opportunities: Vec<String>,
}

impl StrategicInsights {
    /// Whether nothing was extracted
    pub fn is_empty(&self) -> bool {
        self.business_impact.trim().is_empty()
            && self.risks.is_empty()
            && self.opportunities.is_empty()
    }
}

/// Pass-through facts about the source document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    /// Identifier of the extraction run
    pub run_id: Option<RunId>,

    /// Whitespace-delimited words in the source
    pub total_words: usize,

    /// Characters in the source
    pub total_chars: usize,

    /// Chunks the source was split into
    pub chunk_count: usize,

    /// Speakers in the source, sorted
    pub speakers: Vec<String>,

    /// Words spoken per speaker
    pub speaker_word_counts: BTreeMap<String, usize>,

    /// Inputs folded into the source
    pub sources: Vec<String>,
}

/// Everything extracted from one document
///
/// Built field by field during a run and handed to renderers once every pass
/// has been attempted. A field left at its default means the pass that owns it
/// failed or found nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateKnowledge {
    /// Two or three paragraph summary
    pub executive_summary: String,

    /// Headline items
    pub key_highlights: Vec<Highlight>,

    /// Deep dives
    pub feature_articles: Vec<FeatureArticle>,

    /// Short updates and tips
    pub quick_bites: Vec<String>,

    /// Next steps by audience
    pub action_items: ActionItems,

    /// Technologies, tools and services mentioned
    pub technologies: Vec<String>,

    /// Architectures and patterns mentioned
    pub architectures: Vec<Architecture>,

    /// Recommended practices
    pub best_practices: Vec<String>,

    /// Diagrams worth drawing
    pub diagram_suggestions: Vec<DiagramSuggestion>,

    /// Business impact, risks and opportunities
    pub strategic_insights: StrategicInsights,

    /// Source document facts
    pub metadata: DocumentMetadata,
}

impl AggregateKnowledge {
    /// Whether no extracted field holds anything
    pub fn is_empty(&self) -> bool {
        self.executive_summary.trim().is_empty()
            && self.key_highlights.is_empty()
            && self.feature_articles.is_empty()
            && self.quick_bites.is_empty()
            && self.action_items.is_empty()
            && self.technologies.is_empty()
            && self.architectures.is_empty()
            && self.best_practices.is_empty()
            && self.diagram_suggestions.is_empty()
            && self.strategic_insights.is_empty()
    }
}

/// Strip a leading bullet or enumeration marker from a list line.
///
/// # Examples
///
/// ```
/// use gazette_domain::knowledge::strip_list_marker;
///
/// assert_eq!(strip_list_marker("- Ship it"), "Ship it");
/// assert_eq!(strip_list_marker("2) Test it"), "Test it");
/// assert_eq!(strip_list_marker("• Watch it"), "Watch it");
/// assert_eq!(strip_list_marker("2025 roadmap"), "2025 roadmap");
/// ```
pub fn strip_list_marker(line: &str) -> &str {
    let trimmed = line.trim();

    if let Some(rest) = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('*'))
        .or_else(|| trimmed.strip_prefix('•'))
    {
        return rest.trim_start();
    }

    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &trimmed[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim_start();
        }
    }

    trimmed
}

/// Split a bulleted or numbered block into clean items
pub fn split_list(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_list_marker)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Any JSON scalar or list, as produced by a model that ignored the schema
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Loose>),
}

impl Loose {
    fn into_text(self) -> String {
        match self {
            Loose::Null => String::new(),
            Loose::Bool(b) => b.to_string(),
            Loose::Number(n) => n.to_string(),
            Loose::Text(s) => s.trim().to_string(),
            Loose::List(items) => items
                .into_iter()
                .map(Loose::into_text)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    fn into_items(self) -> Vec<String> {
        match self {
            Loose::Null => Vec::new(),
            Loose::Text(s) => split_list(&s),
            Loose::List(items) => items
                .into_iter()
                .map(Loose::into_text)
                .filter(|s| !s.is_empty())
                .collect(),
            scalar => vec![scalar.into_text()],
        }
    }
}

/// Deserialize prose that may arrive as a list of fragments
pub fn text_or_list<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Loose::deserialize(deserializer).map(Loose::into_text)
}

/// Deserialize a list that may arrive as a bulleted string
pub fn list_or_text<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Loose::deserialize(deserializer).map(Loose::into_items)
}
