//! Gazette Editor
//!
//! Editorial polish, impact-first framing and a technical accuracy review
//! for extracted records.
//!
//! The editor provides:
//! - Casual phrasing and filler removal
//! - Sentence capitalization, title casing and terminal punctuation
//! - Action items that open with a concrete verb
//! - Weak summary openings and generic headlines reframed around impact
//! - Speculative-language detection
//! - Technical terms checked against the source text
//! - An optional fact check by the completion provider
//!
//! # Examples
//!
//! ```
//! use gazette_domain::AggregateKnowledge;
//! use gazette_editor::{Editor, EditorConfig};
//!
//! let editor = Editor::new(EditorConfig::default()).unwrap();
//! let mut knowledge = AggregateKnowledge {
//!     executive_summary: "basically, costs fell. teams shipped faster.".to_string(),
//!     ..Default::default()
//! };
//!
//! let outcome = editor.edit(&mut knowledge, "Costs fell and teams shipped faster.");
//! assert_eq!(knowledge.executive_summary, "Costs fell. Teams shipped faster.");
//! assert!(outcome.review.unwrap().is_accurate);
//! ```

#![warn(missing_docs)]

mod config;
mod editor;
mod enhancer;
mod error;
mod refiner;
mod reviewer;

#[cfg(test)]
mod tests;

pub use config::EditorConfig;
pub use editor::{Editor, EditorialOutcome};
pub use enhancer::{EnhancementReport, Enhancer};
pub use error::EditorError;
pub use refiner::{capitalize_sentences, title_case, RefinementReport, Refiner};
pub use reviewer::{
    knowledge_text, AccuracyReview, ReviewIssue, Reviewer, Severity, FACT_CHECK_SYSTEM,
};
