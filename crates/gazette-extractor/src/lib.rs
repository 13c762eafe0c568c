//! Gazette Extractor
//!
//! Turns one normalized document into an [`AggregateKnowledge`] record by
//! chunking, ranking and five sequential completion passes.
//!
//! # Architecture
//!
//! ```text
//! Text → Chunker → Scorer → Pass Selector → CompletionProvider → Parser → AggregateKnowledge
//! ```
//!
//! # Passes
//!
//! | Pass | Reads | Produces |
//! |------|-------|----------|
//! | 1 | early and late chunks | executive summary |
//! | 2 | top 5 ranked chunks | key highlights |
//! | 3 | middle chunks | feature articles |
//! | 4 | leading chunks | quick bites, action items, technologies, architectures, best practices, diagrams |
//! | 5 | full text | strategic insights |
//!
//! A pass that times out, errors or returns something unparseable falls back
//! to its empty result; the run always completes.
//!
//! # Example Usage
//!
//! ```no_run
//! use gazette_domain::SourceDocument;
//! use gazette_extractor::{Extractor, ExtractorConfig};
//! use gazette_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = Extractor::new(MockProvider::default(), ExtractorConfig::default());
//!
//! let document = SourceDocument::new("town-hall.txt", "Cloud costs fell 30% this quarter.");
//! let knowledge = extractor.generate(&document).await?;
//!
//! println!("Summary: {}", knowledge.executive_summary);
//! println!("Highlights: {}", knowledge.key_highlights.len());
//! # Ok(())
//! # }
//! ```
//!
//! [`AggregateKnowledge`]: gazette_domain::AggregateKnowledge

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod extractor;
mod knowledge;
mod parser;
mod passes;
mod prompt;
mod scoring;
mod selection;


pub use chunking::{chunk_text, TextChunker};
pub use config::{ExtractorConfig, KeywordTable, PassSettings, PassTable};
pub use error::ExtractorError;
pub use extractor::{ExtractionRun, Extractor, PassFailure, PipelineState};
pub use knowledge::{KnowledgeField, PartialKnowledge, SupportingContent};
pub use parser::parse_response;
pub use passes::{pass_plan, PassDescriptor, PassKind, ResponseShape};
pub use prompt::PromptBuilder;
pub use scoring::RelevanceScorer;
pub use selection::{PassContext, Selection, CONTEXT_SEPARATOR};
