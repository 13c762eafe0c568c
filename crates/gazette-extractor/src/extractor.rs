//! Core Extractor implementation

use crate::chunking::TextChunker;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::knowledge::PartialKnowledge;
use crate::parser::parse_response;
use crate::passes::{pass_plan, PassDescriptor, PassKind};
use crate::prompt::PromptBuilder;
use crate::scoring::RelevanceScorer;
use crate::selection::PassContext;
use gazette_domain::{
    AggregateKnowledge, Chunk, CompletionProvider, DocumentMetadata, RunId, ScoredChunk,
    SourceDocument,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Progress of one extraction run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PipelineState {
    /// No pass attempted yet
    #[default]
    NotStarted,
    /// Executive summary attempted
    Pass1Done,
    /// Key highlights attempted
    Pass2Done,
    /// Feature articles attempted
    Pass3Done,
    /// Supporting content attempted
    Pass4Done,
    /// Strategic insights attempted; terminal
    Pass5Done,
}

impl PipelineState {
    /// The pass to run next, if any
    pub fn next_pass(&self) -> Option<PassKind> {
        match self {
            PipelineState::NotStarted => Some(PassKind::ExecutiveSummary),
            PipelineState::Pass1Done => Some(PassKind::KeyHighlights),
            PipelineState::Pass2Done => Some(PassKind::FeatureArticles),
            PipelineState::Pass3Done => Some(PassKind::SupportingContent),
            PipelineState::Pass4Done => Some(PassKind::StrategicInsights),
            PipelineState::Pass5Done => None,
        }
    }

    /// State after the next pass has been attempted
    pub fn advance(self) -> Self {
        match self {
            PipelineState::NotStarted => PipelineState::Pass1Done,
            PipelineState::Pass1Done => PipelineState::Pass2Done,
            PipelineState::Pass2Done => PipelineState::Pass3Done,
            PipelineState::Pass3Done => PipelineState::Pass4Done,
            PipelineState::Pass4Done | PipelineState::Pass5Done => PipelineState::Pass5Done,
        }
    }

    /// Whether every pass has been attempted
    pub fn is_terminal(&self) -> bool {
        *self == PipelineState::Pass5Done
    }

    /// Number of passes attempted
    pub fn completed_passes(&self) -> usize {
        match self.next_pass() {
            Some(kind) => kind.number() as usize - 1,
            None => PassKind::ALL.len(),
        }
    }
}

/// A pass that fell back to its empty default
#[derive(Debug, Clone, PartialEq)]
pub struct PassFailure {
    /// The failed pass
    pub pass: PassKind,

    /// Why it failed
    pub error: ExtractorError,
}

/// One extraction run: its state, the record under construction and the
/// failure log
///
/// Passes commit into the run as they finish, so a run whose future was
/// dropped still holds every pass completed before that point.
#[derive(Debug, Clone)]
pub struct ExtractionRun {
    id: RunId,
    state: PipelineState,
    knowledge: AggregateKnowledge,
    failures: Vec<PassFailure>,
}

impl ExtractionRun {
    /// Start a new run
    pub fn new() -> Self {
        let id = RunId::new();
        let knowledge = AggregateKnowledge {
            metadata: DocumentMetadata {
                run_id: Some(id),
                ..Default::default()
            },
            ..Default::default()
        };
        Self {
            id,
            state: PipelineState::NotStarted,
            knowledge,
            failures: Vec::new(),
        }
    }

    /// Run identifier
    pub fn id(&self) -> RunId {
        self.id
    }

    /// Current state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// The record so far
    pub fn knowledge(&self) -> &AggregateKnowledge {
        &self.knowledge
    }

    /// Passes that fell back to their empty default
    pub fn failures(&self) -> &[PassFailure] {
        &self.failures
    }

    /// Whether every pass has been attempted
    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }

    /// Hand the record over
    pub fn into_knowledge(self) -> AggregateKnowledge {
        self.knowledge
    }
}

impl Default for ExtractionRun {
    fn default() -> Self {
        Self::new()
    }
}

/// The Extractor turns a document into an aggregate knowledge record
pub struct Extractor<P>
where
    P: CompletionProvider,
{
    provider: P,
    config: ExtractorConfig,
    scorer: RelevanceScorer,
    passes: Vec<PassDescriptor>,
}

impl<P> Extractor<P>
where
    P: CompletionProvider,
{
    /// Create a new Extractor
    ///
    /// The configuration is validated when a document is processed.
    pub fn new(provider: P, config: ExtractorConfig) -> Self {
        let scorer = RelevanceScorer::new(&config.keywords);
        let passes = pass_plan(&config.passes);
        Self {
            provider,
            config,
            scorer,
            passes,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The completion provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The ordered pass plan
    pub fn passes(&self) -> &[PassDescriptor] {
        &self.passes
    }

    /// Chunk text with the configured size and overlap
    pub fn chunk(&self, text: &str) -> Result<Vec<Chunk>, ExtractorError> {
        Ok(TextChunker::new(self.config.chunk_size, self.config.chunk_overlap)?.chunk(text))
    }

    /// Keep the configured number of best-scoring chunks
    pub fn rerank(&self, chunks: &[Chunk]) -> Vec<ScoredChunk> {
        self.scorer.rerank(chunks, self.config.top_k)
    }

    /// Generate the aggregate knowledge record for a document
    ///
    /// # Errors
    ///
    /// Only `InvalidConfiguration`; pass failures are recovered.
    pub async fn generate(
        &self,
        document: &SourceDocument,
    ) -> Result<AggregateKnowledge, ExtractorError> {
        let mut run = ExtractionRun::new();
        self.generate_into(&mut run, document).await?;
        Ok(run.into_knowledge())
    }

    /// Like [`Extractor::generate`], committing into a caller-owned run
    pub async fn generate_into(
        &self,
        run: &mut ExtractionRun,
        document: &SourceDocument,
    ) -> Result<(), ExtractorError> {
        self.config.validate()?;

        let chunks = self.chunk(&document.text)?;
        let ranked = self.rerank(&chunks);

        info!(
            run_id = %run.id,
            source = %document.name,
            chars = document.char_count(),
            chunks = chunks.len(),
            "Starting extraction run"
        );

        let metadata = &mut run.knowledge.metadata;
        metadata.total_words = document.word_count();
        metadata.total_chars = document.char_count();
        metadata.chunk_count = chunks.len();
        metadata.speakers = document.speakers.clone();
        metadata.speaker_word_counts = document.speaker_word_counts.clone();
        metadata.sources = document.sources.clone();

        self.run_into(run, &chunks, &ranked, &document.text).await;
        Ok(())
    }

    /// Run every pass and return the merged record
    pub async fn run_all_passes(
        &self,
        chunks: &[Chunk],
        ranked: &[ScoredChunk],
        full_text: &str,
    ) -> AggregateKnowledge {
        let mut run = ExtractionRun::new();
        self.run_into(&mut run, chunks, ranked, full_text).await;
        run.into_knowledge()
    }

    /// Run the remaining passes of `run`, committing each as it finishes
    pub async fn run_into(
        &self,
        run: &mut ExtractionRun,
        chunks: &[Chunk],
        ranked: &[ScoredChunk],
        full_text: &str,
    ) {
        let started = Instant::now();

        while let Some(kind) = run.state.next_pass() {
            if let Some(descriptor) = self.passes.iter().find(|d| d.kind == kind) {
                let context = descriptor.selection.context(
                    chunks,
                    ranked,
                    full_text,
                    descriptor.settings.budget,
                );

                if context.is_empty() {
                    debug!(pass = %kind, "No content for pass, skipping");
                } else {
                    match self.run_pass(descriptor, &context).await {
                        Ok(partial) => partial.merge_into(&mut run.knowledge),
                        Err(error) => {
                            warn!(pass = %kind, "Pass failed, using empty result: {}", error);
                            PartialKnowledge::empty(kind).merge_into(&mut run.knowledge);
                            run.failures.push(PassFailure { pass: kind, error });
                        }
                    }
                }
            }

            run.state = run.state.advance();
            debug!(state = ?run.state, "Pipeline advanced");
        }

        info!(
            run_id = %run.id,
            failed = run.failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Extraction run complete"
        );
    }

    async fn run_pass(
        &self,
        descriptor: &PassDescriptor,
        context: &PassContext,
    ) -> Result<PartialKnowledge, ExtractorError> {
        let request = PromptBuilder::new(descriptor, context).build();

        debug!(
            pass = %descriptor.kind,
            chunks = context.chunk_count,
            chars = context.char_len(),
            truncated = context.truncated,
            "Sending pass request"
        );

        let response = self.complete(&request).await?;

        debug!(pass = %descriptor.kind, "Response length: {} chars", response.len());

        let partial = parse_response(descriptor, &response)?;

        info!(pass = %descriptor.kind, model = self.provider.model_name(), "Pass complete");
        Ok(partial)
    }

    /// Call the provider under the configured timeout
    async fn complete(
        &self,
        request: &gazette_domain::CompletionRequest,
    ) -> Result<String, ExtractorError> {
        timeout(self.config.completion_timeout(), self.provider.complete(request))
            .await
            .map_err(|_| ExtractorError::Timeout(self.config.completion_timeout_secs))?
            .map_err(|e| ExtractorError::Completion(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_llm::{LlmError, MockProvider};

    #[test]
    fn test_state_machine() {
        let mut state = PipelineState::default();
        let mut seen = Vec::new();
        while let Some(kind) = state.next_pass() {
            seen.push(kind);
            state = state.advance();
        }

        assert_eq!(seen, PassKind::ALL.to_vec());
        assert!(state.is_terminal());
        assert_eq!(state.advance(), PipelineState::Pass5Done);
        assert_eq!(PipelineState::Pass2Done.completed_passes(), 2);
        assert_eq!(PipelineState::Pass5Done.completed_passes(), 5);
    }

    #[test]
    fn test_new_run_carries_id() {
        let run = ExtractionRun::new();
        assert_eq!(run.state(), PipelineState::NotStarted);
        assert_eq!(run.knowledge().metadata.run_id, Some(run.id()));
        assert!(run.failures().is_empty());
    }

    #[tokio::test]
    async fn test_generate_rejects_bad_config() {
        let provider = MockProvider::new("unused");
        let config = ExtractorConfig {
            chunk_overlap: 5000,
            ..Default::default()
        };
        let extractor = Extractor::new(provider.clone(), config);

        let result = extractor
            .generate(&SourceDocument::new("doc", "Some text"))
            .await;
        assert!(matches!(result, Err(ExtractorError::InvalidConfiguration(_))));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_completion_error_is_mapped() {
        let provider = MockProvider::default();
        provider.add_error("Executive Summary", LlmError::RateLimitExceeded);
        let extractor = Extractor::new(provider, ExtractorConfig::default());

        let chunks = extractor.chunk("Short note about cost.").unwrap();
        let ranked = extractor.rerank(&chunks);

        let mut run = ExtractionRun::new();
        extractor
            .run_into(&mut run, &chunks, &ranked, "Short note about cost.")
            .await;

        let failure = &run.failures()[0];
        assert_eq!(failure.pass, PassKind::ExecutiveSummary);
        assert_eq!(
            failure.error,
            ExtractorError::Completion("Rate limit exceeded".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_document_skips_passes() {
        let provider = MockProvider::new("unused");
        let extractor = Extractor::new(provider.clone(), ExtractorConfig::default());

        let knowledge = extractor.generate(&SourceDocument::new("empty", "")).await.unwrap();
        assert!(knowledge.is_empty());
        assert_eq!(knowledge.metadata.chunk_count, 0);
        assert_eq!(provider.call_count(), 0);
    }
}
