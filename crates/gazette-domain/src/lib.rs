//! Gazette Domain Layer
//!
//! This crate contains the core data model shared by every other Gazette crate.
//! It defines the value objects that flow through the newsletter pipeline and
//! the trait boundary to the language-model completion service.
//!
//! ## Key Concepts
//!
//! - **Chunk**: A contiguous, possibly-overlapping slice of the source text
//!   tagged with its position in the document
//! - **ScoredChunk**: A chunk with its keyword relevance score
//! - **SourceDocument**: Normalized text handed over by the format parsers
//! - **AggregateKnowledge**: The record accumulated over one extraction run
//! - **CompletionProvider**: The opaque remote text-completion capability
//!
//! ## Architecture
//!
//! - Only serialization and identifier crates as dependencies
//! - Pure data and trait definitions
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod document;
pub mod knowledge;
pub mod run;
pub mod traits;

// Re-exports for convenience
pub use chunk::{Chunk, ChunkPosition, ScoredChunk};
pub use document::SourceDocument;
pub use knowledge::{
    ActionItems, AggregateKnowledge, Architecture, DiagramSuggestion, DocumentMetadata,
    FeatureArticle, Highlight, StrategicInsights,
};
pub use run::RunId;
pub use traits::{CompletionProvider, CompletionRequest};
