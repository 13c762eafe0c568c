//! Technical accuracy review against the source text

use crate::{EditorConfig, EditorError};
use gazette_domain::{AggregateKnowledge, CompletionProvider, CompletionRequest};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, warn};

const SPECULATIVE_WORDS: &str = r"(?i)\b(?:might|could|possibly|perhaps|probably|likely|may|seems|appears|suggests|apparently|supposedly|allegedly|rumor)\b";

/// System instructions for the model-backed fact check
pub const FACT_CHECK_SYSTEM: &str = "You are a technical accuracy reviewer. \
Verify that extracted newsletter content matches its source material exactly.";

const FACT_CHECK_MAX_TOKENS: u32 = 500;
const FACT_CHECK_TEMPERATURE: f32 = 0.3;

/// Characters of extracted content and of source sent to the fact check
const FACT_CHECK_EXCERPT_CHARS: usize = 1000;

/// Characters of the fact-check reply kept in the issue
const FACT_CHECK_DETAIL_CHARS: usize = 200;

/// Terms worth checking against the source, by area
const TECHNICAL_TERMS: &[(&str, &[&str])] = &[
    ("monitoring", &["metrics", "latency", "throughput", "uptime", "availability"]),
    (
        "architecture",
        &["microservices", "monolith", "distributed", "scalability", "resilience"],
    ),
    ("cloud", &["aws", "azure", "gcp", "kubernetes", "docker", "container"]),
    ("database", &["sql", "nosql", "relational", "document", "time-series"]),
];

/// How much an issue matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Cosmetic or easy to verify
    Low,
    /// Should be checked before publication
    Medium,
}

/// A problem found by the review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReviewIssue {
    /// Hedged or uncertain wording
    SpeculativeContent {
        /// Passages found
        count: usize,
        /// How much it matters
        severity: Severity,
    },

    /// Technical terms used in the record but never in the source
    TerminologyInconsistency {
        /// Terms found
        count: usize,
        /// How much it matters
        severity: Severity,
    },

    /// Claims the model could not match to the source
    FactualValidation {
        /// How much it matters
        severity: Severity,
        /// Start of the model's findings
        detail: String,
    },
}

impl ReviewIssue {
    /// Human-readable explanation
    pub fn description(&self) -> &'static str {
        match self {
            ReviewIssue::SpeculativeContent { .. } => {
                "Content contains speculative or uncertain language"
            }
            ReviewIssue::TerminologyInconsistency { .. } => {
                "Some technical terms may not match source exactly"
            }
            ReviewIssue::FactualValidation { .. } => {
                "Some claims may be missing from or contradict the source"
            }
        }
    }
}

/// Result of reviewing a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReview {
    /// No issue was found
    pub is_accurate: bool,

    /// Issues found
    pub issues: Vec<ReviewIssue>,

    /// Passages with speculative wording, with surrounding context
    pub speculative_content: Vec<String>,

    /// Technical terms absent from the source
    pub terminology_issues: Vec<String>,

    /// Confidence in the record (0.0-1.0)
    pub confidence_score: f64,

    /// What an editor should do next
    pub recommendations: Vec<String>,
}

/// Checks an extracted record against the text it came from
pub struct Reviewer {
    config: EditorConfig,
    speculative: Regex,
    accurate: Regex,
}

impl Reviewer {
    /// Create a reviewer with the given configuration
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        Ok(Self {
            config,
            speculative: Regex::new(SPECULATIVE_WORDS)?,
            accurate: Regex::new(r"\baccurate\b")?,
        })
    }

    /// Review the record against the source text
    pub fn review(&self, knowledge: &AggregateKnowledge, source: &str) -> AccuracyReview {
        self.conclude(&knowledge_text(knowledge), source, None)
    }

    /// Review the record, adding a model-backed fact check when enabled
    ///
    /// A fact check that fails or times out is logged and adds no issue.
    pub async fn review_with<P: CompletionProvider>(
        &self,
        knowledge: &AggregateKnowledge,
        source: &str,
        provider: &P,
    ) -> AccuracyReview {
        let content = knowledge_text(knowledge);
        let factual = if self.config.fact_check {
            self.check_facts(provider, &content, source).await
        } else {
            None
        };
        self.conclude(&content, source, factual)
    }

    /// Ask the model whether the content contradicts or adds to the source
    ///
    /// Returns `None` when the reply reports no issues, or when the call
    /// fails.
    pub async fn check_facts<P: CompletionProvider>(
        &self,
        provider: &P,
        content: &str,
        source: &str,
    ) -> Option<ReviewIssue> {
        let request = CompletionRequest::new(
            FACT_CHECK_SYSTEM,
            fact_check_prompt(content, source),
            FACT_CHECK_MAX_TOKENS,
            FACT_CHECK_TEMPERATURE,
        );

        let reply = match timeout(self.config.fact_check_timeout(), provider.complete(&request)).await
        {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                warn!("Factual validation failed: {}", e);
                return None;
            }
            Err(_) => {
                warn!(
                    "Factual validation timed out after {}s",
                    self.config.fact_check_timeout_secs
                );
                return None;
            }
        };

        let reply = reply.trim();
        if reply.is_empty() || self.reports_no_issues(reply) {
            debug!("Fact check found no issues");
            return None;
        }
        Some(ReviewIssue::FactualValidation {
            severity: Severity::Medium,
            detail: reply.chars().take(FACT_CHECK_DETAIL_CHARS).collect(),
        })
    }

    fn reports_no_issues(&self, reply: &str) -> bool {
        let reply = reply.to_lowercase();
        reply.contains("no issues")
            || (self.accurate.is_match(&reply) && !reply.contains("not accurate"))
    }

    fn conclude(&self, content: &str, source: &str, factual: Option<ReviewIssue>) -> AccuracyReview {
        let mut issues = Vec::new();

        // 1. Speculative language
        let speculative_content = self.find_speculative(content);
        if !speculative_content.is_empty() {
            issues.push(ReviewIssue::SpeculativeContent {
                count: speculative_content.len(),
                severity: Severity::Medium,
            });
        }

        // 2. Terms the source never mentions
        let terminology_issues = self.unsupported_terms(content, source);
        if !terminology_issues.is_empty() {
            issues.push(ReviewIssue::TerminologyInconsistency {
                count: terminology_issues.len(),
                severity: Severity::Low,
            });
        }

        // 3. Model-backed fact check
        issues.extend(factual);

        let confidence_score = (1.0 - issues.len() as f64 * self.config.confidence_penalty)
            .max(self.config.min_confidence);

        let mut review = AccuracyReview {
            is_accurate: issues.is_empty(),
            issues,
            speculative_content,
            terminology_issues,
            confidence_score,
            recommendations: Vec::new(),
        };
        review.recommendations = recommendations(&review);
        review
    }

    fn find_speculative(&self, content: &str) -> Vec<String> {
        self.speculative
            .find_iter(content)
            .take(self.config.max_speculative_examples)
            .map(|m| {
                let start = back_chars(content, m.start(), self.config.context_chars);
                let end = forward_chars(content, m.end(), self.config.context_chars);
                content[start..end].trim().to_string()
            })
            .collect()
    }

    fn unsupported_terms(&self, content: &str, source: &str) -> Vec<String> {
        let content = content.to_lowercase();
        let source = source.to_lowercase();

        TECHNICAL_TERMS
            .iter()
            .flat_map(|(_, terms)| terms.iter())
            .filter(|term| content.contains(*term) && !source.contains(*term))
            .take(self.config.max_terminology_issues)
            .map(|term| term.to_string())
            .collect()
    }
}

fn fact_check_prompt(content: &str, source: &str) -> String {
    format!(
        "Compare the extracted content with the source material.\n\n\
         Extracted content:\n{}\n\n\
         Source material:\n{}\n\n\
         List every claim in the extracted content that is absent from the source, \
         contradicts it, or takes it out of context. For each, give the claim, why it \
         is a problem and a severity (low, medium or high). Flag real problems only, \
         not rewording. If there are none, answer \"No issues found.\"",
        excerpt(content),
        excerpt(source)
    )
}

fn excerpt(text: &str) -> &str {
    let end = forward_chars(text, 0, FACT_CHECK_EXCERPT_CHARS);
    &text[..end]
}

fn recommendations(review: &AccuracyReview) -> Vec<String> {
    let mut out = Vec::new();

    if !review.speculative_content.is_empty() {
        out.push(
            "Remove or replace speculative language with definitive statements from source material"
                .to_string(),
        );
    }
    if !review.terminology_issues.is_empty() {
        out.push("Verify technical terminology matches source material exactly".to_string());
    }
    if review.confidence_score < 0.8 {
        out.push("Conduct manual review of extracted content against source".to_string());
    }
    if !review.is_accurate {
        out.push("Flag content for editorial review before publication".to_string());
    }
    out
}

/// Every piece of prose in the record, one entry per line
pub fn knowledge_text(knowledge: &AggregateKnowledge) -> String {
    let mut parts: Vec<&str> = vec![knowledge.executive_summary.as_str()];

    for highlight in &knowledge.key_highlights {
        parts.extend([highlight.title.as_str(), highlight.description.as_str()]);
    }
    for article in &knowledge.feature_articles {
        parts.extend([
            article.title.as_str(),
            article.context.as_str(),
            article.key_ideas.as_str(),
            article.benefits.as_str(),
            article.best_practices.as_str(),
            article.call_to_action.as_str(),
        ]);
    }
    for architecture in &knowledge.architectures {
        parts.extend([
            architecture.name.as_str(),
            architecture.description.as_str(),
            architecture.use_case.as_str(),
        ]);
    }
    parts.extend(knowledge.quick_bites.iter().map(String::as_str));
    parts.extend(knowledge.best_practices.iter().map(String::as_str));
    parts.extend(knowledge.technologies.iter().map(String::as_str));
    parts.extend(knowledge.action_items.engineering_teams.iter().map(String::as_str));
    parts.extend(knowledge.action_items.architecture_teams.iter().map(String::as_str));
    parts.extend(knowledge.action_items.leadership.iter().map(String::as_str));

    let insights = &knowledge.strategic_insights;
    parts.push(insights.business_impact.as_str());
    parts.extend(insights.risks.iter().map(String::as_str));
    parts.extend(insights.opportunities.iter().map(String::as_str));

    parts
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn back_chars(text: &str, from: usize, n: usize) -> usize {
    text[..from]
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map_or(from, |(idx, _)| idx)
}

fn forward_chars(text: &str, from: usize, n: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(idx, _)| from + idx)
}
