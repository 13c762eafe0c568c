//! Newsletter output and terminal formatting.

use crate::error::Result;
use chrono::{DateTime, Local, Utc};
use colored::*;
use gazette_domain::{AggregateKnowledge, RunId};
use gazette_editor::EditorialOutcome;
use gazette_extractor::PassFailure;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// The JSON document written for each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Newsletter {
    /// Newsletter title
    pub title: String,

    /// Newsletter subtitle
    pub subtitle: String,

    /// When the run finished
    pub generated_at: DateTime<Utc>,

    /// Extraction run identifier
    pub run_id: RunId,

    /// Model that produced the content
    pub model: String,

    /// The record itself
    pub knowledge: AggregateKnowledge,

    /// Refinement report and accuracy review
    pub editorial: EditorialOutcome,

    /// Passes that fell back to an empty result
    #[serde(default)]
    pub failed_passes: Vec<FailedPass>,

    /// The run was interrupted before every pass finished
    #[serde(default)]
    pub partial: bool,
}

/// A failed pass as recorded in the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedPass {
    /// Pass title
    pub pass: String,

    /// Error message
    pub error: String,
}

impl From<&PassFailure> for FailedPass {
    fn from(failure: &PassFailure) -> Self {
        Self {
            pass: failure.pass.to_string(),
            error: failure.error.to_string(),
        }
    }
}

/// Write the newsletter as `newsletter_<timestamp>.json` under `dir`.
pub fn write_newsletter(dir: &Path, newsletter: &Newsletter) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let timestamp = newsletter
        .generated_at
        .with_timezone(&Local)
        .format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("newsletter_{}.json", timestamp));

    fs::write(&path, serde_json::to_string_pretty(newsletter)?)?;
    Ok(path)
}

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Summarize what the run extracted as a table.
    pub fn summary_table(&self, newsletter: &Newsletter) -> String {
        let knowledge = &newsletter.knowledge;
        let insights = &knowledge.strategic_insights;

        let mut builder = Builder::default();
        builder.push_record(["Section", "Items"]);

        let rows = [
            ("Executive summary", usize::from(!knowledge.executive_summary.is_empty())),
            ("Key highlights", knowledge.key_highlights.len()),
            ("Feature articles", knowledge.feature_articles.len()),
            ("Quick bites", knowledge.quick_bites.len()),
            ("Action items", knowledge.action_items.len()),
            ("Technologies", knowledge.technologies.len()),
            ("Architectures", knowledge.architectures.len()),
            ("Best practices", knowledge.best_practices.len()),
            ("Diagram suggestions", knowledge.diagram_suggestions.len()),
            (
                "Strategic insights",
                insights.risks.len()
                    + insights.opportunities.len()
                    + usize::from(!insights.business_impact.is_empty()),
            ),
        ];
        for (section, count) in rows {
            builder.push_record([section.to_string(), count.to_string()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// One line on the accuracy review, if it ran.
    pub fn review_line(&self, editorial: &EditorialOutcome) -> Option<String> {
        let review = editorial.review.as_ref()?;
        let line = format!(
            "Accuracy review: confidence {:.2}, {} issue(s)",
            review.confidence_score,
            review.issues.len()
        );
        Some(if review.is_accurate {
            self.success(&line)
        } else {
            self.warning(&line)
        })
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_domain::Highlight;
    use gazette_editor::{AccuracyReview, ReviewIssue, Severity};
    use gazette_extractor::{ExtractorError, PassKind};
    use tempfile::TempDir;

    fn newsletter() -> Newsletter {
        Newsletter {
            title: "Cloud Weekly".to_string(),
            subtitle: "Platform team".to_string(),
            generated_at: Utc::now(),
            run_id: RunId::new(),
            model: "mock".to_string(),
            knowledge: AggregateKnowledge {
                executive_summary: "Costs fell.".to_string(),
                key_highlights: vec![Highlight {
                    title: "Costs Down".to_string(),
                    description: "Autoscaling.".to_string(),
                }],
                ..Default::default()
            },
            editorial: EditorialOutcome::default(),
            failed_passes: Vec::new(),
            partial: false,
        }
    }

    #[test]
    fn test_write_newsletter() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let newsletter = newsletter();

        let path = write_newsletter(&out, &newsletter).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("newsletter_") && name.ends_with(".json"));
        assert_eq!(name.len(), "newsletter_20260101_120000.json".len());

        let written: Newsletter =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, newsletter);
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(newsletter()).unwrap();
        assert_eq!(value["title"], "Cloud Weekly");
        assert_eq!(value["knowledge"]["key_highlights"][0]["title"], "Costs Down");
        assert!(value["generated_at"].is_string());
        assert!(value["editorial"]["review"].is_null());
    }

    #[test]
    fn test_failed_pass_record() {
        let failure = PassFailure {
            pass: PassKind::FeatureArticles,
            error: ExtractorError::Timeout(60),
        };
        let record = FailedPass::from(&failure);
        assert_eq!(record.pass, "Feature Articles");
        assert!(record.error.contains("60"));
    }

    #[test]
    fn test_summary_table() {
        let formatter = Formatter::new(false);
        let table = formatter.summary_table(&newsletter());
        assert!(table.contains("Key highlights"));
        assert!(table.contains("Section"));
    }

    #[test]
    fn test_review_line() {
        let formatter = Formatter::new(false);
        assert!(formatter.review_line(&EditorialOutcome::default()).is_none());

        let editorial = EditorialOutcome {
            refinement: None,
            enhancement: None,
            review: Some(AccuracyReview {
                is_accurate: false,
                issues: vec![ReviewIssue::SpeculativeContent {
                    count: 1,
                    severity: Severity::Medium,
                }],
                speculative_content: vec!["might".to_string()],
                terminology_issues: Vec::new(),
                confidence_score: 0.9,
                recommendations: Vec::new(),
            }),
        };
        let line = formatter.review_line(&editorial).unwrap();
        assert_eq!(line, "⚠ Accuracy review: confidence 0.90, 1 issue(s)");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("test"), "✗ test");
    }
}
