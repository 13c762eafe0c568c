//! Per-pass results and how they merge into the aggregate record

use crate::passes::PassKind;
use gazette_domain::knowledge::list_or_text;
use gazette_domain::{
    ActionItems, AggregateKnowledge, Architecture, DiagramSuggestion, FeatureArticle, Highlight,
    StrategicInsights,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Payload of the supporting-content pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportingContent {
    /// Short updates and tips
    #[serde(deserialize_with = "list_or_text")]
    pub quick_bites: Vec<String>,

    /// Next steps by audience
    pub action_items: ActionItems,

    /// Technologies, tools and services mentioned
    #[serde(deserialize_with = "list_or_text")]
    pub technologies: Vec<String>,

    /// Architectures and patterns mentioned
    pub architectures: Vec<Architecture>,

    /// Recommended practices
    #[serde(deserialize_with = "list_or_text")]
    pub best_practices: Vec<String>,

    /// Diagrams worth drawing
    #[serde(alias = "diagrams")]
    pub diagram_suggestions: Vec<DiagramSuggestion>,
}

/// The parsed result of one pass
#[derive(Debug, Clone, PartialEq)]
pub enum PartialKnowledge {
    /// Pass 1
    Summary(String),
    /// Pass 2
    Highlights(Vec<Highlight>),
    /// Pass 3
    Articles(Vec<FeatureArticle>),
    /// Pass 4
    Supporting(SupportingContent),
    /// Pass 5
    Insights(StrategicInsights),
}

/// A top-level field of [`AggregateKnowledge`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeField {
    /// `executive_summary`
    ExecutiveSummary,
    /// `key_highlights`
    KeyHighlights,
    /// `feature_articles`
    FeatureArticles,
    /// `quick_bites`
    QuickBites,
    /// `action_items`
    ActionItems,
    /// `technologies`
    Technologies,
    /// `architectures`
    Architectures,
    /// `best_practices`
    BestPractices,
    /// `diagram_suggestions`
    DiagramSuggestions,
    /// `strategic_insights`
    StrategicInsights,
}

impl KnowledgeField {
    /// Fields a pass may overwrite even when already populated
    pub fn exclusive_to(kind: PassKind) -> &'static [KnowledgeField] {
        match kind {
            PassKind::SupportingContent => &[
                KnowledgeField::QuickBites,
                KnowledgeField::ActionItems,
                KnowledgeField::Technologies,
                KnowledgeField::Architectures,
                KnowledgeField::BestPractices,
                KnowledgeField::DiagramSuggestions,
            ],
            PassKind::StrategicInsights => &[KnowledgeField::StrategicInsights],
            _ => &[],
        }
    }
}

impl PartialKnowledge {
    /// The empty result standing in for a failed pass
    pub fn empty(kind: PassKind) -> Self {
        match kind {
            PassKind::ExecutiveSummary => PartialKnowledge::Summary(String::new()),
            PassKind::KeyHighlights => PartialKnowledge::Highlights(Vec::new()),
            PassKind::FeatureArticles => PartialKnowledge::Articles(Vec::new()),
            PassKind::SupportingContent => {
                PartialKnowledge::Supporting(SupportingContent::default())
            }
            PassKind::StrategicInsights => {
                PartialKnowledge::Insights(StrategicInsights::default())
            }
        }
    }

    /// The pass that produces this shape
    pub fn kind(&self) -> PassKind {
        match self {
            PartialKnowledge::Summary(_) => PassKind::ExecutiveSummary,
            PartialKnowledge::Highlights(_) => PassKind::KeyHighlights,
            PartialKnowledge::Articles(_) => PassKind::FeatureArticles,
            PartialKnowledge::Supporting(_) => PassKind::SupportingContent,
            PartialKnowledge::Insights(_) => PassKind::StrategicInsights,
        }
    }

    /// Whether the result carries nothing
    pub fn is_empty(&self) -> bool {
        match self {
            PartialKnowledge::Summary(text) => text.trim().is_empty(),
            PartialKnowledge::Highlights(items) => items.is_empty(),
            PartialKnowledge::Articles(items) => items.is_empty(),
            PartialKnowledge::Supporting(content) => *content == SupportingContent::default(),
            PartialKnowledge::Insights(insights) => insights.is_empty(),
        }
    }

    /// Merge into the record on behalf of the pass that produced it
    ///
    /// A populated field is only replaced when it is exclusive to that pass.
    /// Empty values never replace anything.
    pub fn merge_into(self, record: &mut AggregateKnowledge) {
        let exclusive = KnowledgeField::exclusive_to(self.kind());
        let merger = Merger { exclusive };

        match self {
            PartialKnowledge::Summary(text) => {
                merger.set(
                    KnowledgeField::ExecutiveSummary,
                    &mut record.executive_summary,
                    text,
                    |s: &String| s.trim().is_empty(),
                );
            }
            PartialKnowledge::Highlights(items) => {
                merger.set_list(KnowledgeField::KeyHighlights, &mut record.key_highlights, items);
            }
            PartialKnowledge::Articles(items) => {
                merger.set_list(
                    KnowledgeField::FeatureArticles,
                    &mut record.feature_articles,
                    items,
                );
            }
            PartialKnowledge::Supporting(content) => {
                merger.set_list(KnowledgeField::QuickBites, &mut record.quick_bites, content.quick_bites);
                merger.set(
                    KnowledgeField::ActionItems,
                    &mut record.action_items,
                    content.action_items,
                    ActionItems::is_empty,
                );
                merger.set_list(
                    KnowledgeField::Technologies,
                    &mut record.technologies,
                    content.technologies,
                );
                merger.set_list(
                    KnowledgeField::Architectures,
                    &mut record.architectures,
                    content.architectures,
                );
                merger.set_list(
                    KnowledgeField::BestPractices,
                    &mut record.best_practices,
                    content.best_practices,
                );
                merger.set_list(
                    KnowledgeField::DiagramSuggestions,
                    &mut record.diagram_suggestions,
                    content.diagram_suggestions,
                );
            }
            PartialKnowledge::Insights(insights) => {
                merger.set(
                    KnowledgeField::StrategicInsights,
                    &mut record.strategic_insights,
                    insights,
                    StrategicInsights::is_empty,
                );
            }
        }
    }
}

struct Merger {
    exclusive: &'static [KnowledgeField],
}

impl Merger {
    fn set<T>(&self, field: KnowledgeField, slot: &mut T, value: T, is_empty: fn(&T) -> bool) {
        if is_empty(&value) {
            return;
        }
        if is_empty(slot) || self.exclusive.contains(&field) {
            *slot = value;
        } else {
            debug!(?field, "Keeping value from an earlier pass");
        }
    }

    fn set_list<T>(&self, field: KnowledgeField, slot: &mut Vec<T>, value: Vec<T>) {
        self.set(field, slot, value, Vec::is_empty);
    }
}
