//! Configuration for the Extractor

use crate::error::ExtractorError;
use crate::passes::PassKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Keyword lists and weights used by the relevance scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTable {
    /// Business vocabulary
    pub business: Vec<String>,

    /// Technical vocabulary
    pub technical: Vec<String>,

    /// Points per business keyword occurrence
    pub business_weight: u32,

    /// Points per technical keyword occurrence
    pub technical_weight: u32,
}

impl Default for KeywordTable {
    fn default() -> Self {
        let words = |list: &[&str]| list.iter().map(|w| w.to_string()).collect();
        Self {
            business: words(&[
                "impact",
                "cost",
                "revenue",
                "efficiency",
                "risk",
                "strategic",
                "roi",
                "opportunity",
                "growth",
                "competitive",
                "advantage",
            ]),
            technical: words(&[
                "architecture",
                "scalability",
                "performance",
                "security",
                "reliability",
                "availability",
                "integration",
            ]),
            business_weight: 2,
            technical_weight: 1,
        }
    }
}

/// Context budget and sampling parameters for one pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassSettings {
    /// Maximum characters of chunk text in the context
    pub budget: usize,

    /// Upper bound on generated tokens
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f64,
}

impl PassSettings {
    /// Create pass settings
    pub const fn new(budget: usize, max_tokens: u32, temperature: f64) -> Self {
        Self {
            budget,
            max_tokens,
            temperature,
        }
    }

    fn scaled(self, factor: f64) -> Self {
        Self {
            budget: (self.budget as f64 * factor) as usize,
            max_tokens: (self.max_tokens as f64 * factor) as u32,
            temperature: self.temperature,
        }
    }
}

/// Settings for each of the five passes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassTable {
    /// Pass 1
    pub executive_summary: PassSettings,

    /// Pass 2
    pub key_highlights: PassSettings,

    /// Pass 3
    pub feature_articles: PassSettings,

    /// Pass 4
    pub supporting_content: PassSettings,

    /// Pass 5
    pub strategic_insights: PassSettings,
}

impl PassTable {
    /// Settings for a pass
    pub fn get(&self, kind: PassKind) -> PassSettings {
        match kind {
            PassKind::ExecutiveSummary => self.executive_summary,
            PassKind::KeyHighlights => self.key_highlights,
            PassKind::FeatureArticles => self.feature_articles,
            PassKind::SupportingContent => self.supporting_content,
            PassKind::StrategicInsights => self.strategic_insights,
        }
    }

    fn scaled(self, factor: f64) -> Self {
        Self {
            executive_summary: self.executive_summary.scaled(factor),
            key_highlights: self.key_highlights.scaled(factor),
            feature_articles: self.feature_articles.scaled(factor),
            supporting_content: self.supporting_content.scaled(factor),
            strategic_insights: self.strategic_insights.scaled(factor),
        }
    }
}

impl Default for PassTable {
    fn default() -> Self {
        Self {
            executive_summary: PassSettings::new(8000, 800, 0.4),
            key_highlights: PassSettings::new(8000, 1200, 0.3),
            feature_articles: PassSettings::new(10_000, 2500, 0.5),
            supporting_content: PassSettings::new(6000, 2000, 0.4),
            strategic_insights: PassSettings::new(8000, 1500, 0.4),
        }
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum chunk size (characters)
    pub chunk_size: usize,

    /// Characters shared by neighbouring chunks
    pub chunk_overlap: usize,

    /// Number of ranked chunks kept by the scorer
    pub top_k: usize,

    /// Maximum time for a single completion call (seconds)
    pub completion_timeout_secs: u64,

    /// Relevance scoring vocabulary
    pub keywords: KeywordTable,

    /// Per-pass budgets and sampling parameters
    pub passes: PassTable,
}

impl ExtractorConfig {
    /// Get the completion timeout as a Duration
    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        let invalid = |msg: String| Err(ExtractorError::InvalidConfiguration(msg));

        if self.chunk_size == 0 {
            return invalid("chunk_size must be greater than 0".to_string());
        }
        if self.chunk_overlap >= self.chunk_size {
            return invalid(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            ));
        }
        if self.top_k == 0 {
            return invalid("top_k must be greater than 0".to_string());
        }
        if self.completion_timeout_secs == 0 {
            return invalid("completion_timeout_secs must be greater than 0".to_string());
        }

        for kind in PassKind::ALL {
            let settings = self.passes.get(kind);
            if settings.budget == 0 {
                return invalid(format!("{} budget must be greater than 0", kind));
            }
            if settings.max_tokens == 0 {
                return invalid(format!("{} max_tokens must be greater than 0", kind));
            }
            if !(0.0..=2.0).contains(&settings.temperature) {
                return invalid(format!(
                    "{} temperature must be between 0.0 and 2.0, got {}",
                    kind, settings.temperature
                ));
            }
        }

        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            chunk_size: 1500,
            chunk_overlap: 200,
            top_k: 10,
            completion_timeout_secs: 60,
            keywords: KeywordTable::default(),
            passes: PassTable::default(),
        }
    }
}

impl ExtractorConfig {
    /// Compact preset: smaller chunks and contexts, shorter timeouts
    pub fn compact() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 150,
            top_k: 6,
            completion_timeout_secs: 30,
            keywords: KeywordTable::default(),
            passes: PassTable::default().scaled(0.5),
        }
    }

    /// Thorough preset: larger chunks and contexts, longer timeouts
    pub fn thorough() -> Self {
        Self {
            chunk_size: 2000,
            chunk_overlap: 300,
            top_k: 15,
            completion_timeout_secs: 120,
            keywords: KeywordTable::default(),
            passes: PassTable::default().scaled(1.5),
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self).map_err(|e| {
            ExtractorError::InvalidConfiguration(format!("Failed to serialize to TOML: {}", e))
        })
    }
}
