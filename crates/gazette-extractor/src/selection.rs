//! Per-pass chunk selection and context assembly

use gazette_domain::{Chunk, ChunkPosition, ScoredChunk};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Visible separator placed between chunks in a pass context
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Which chunks a pass reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// All early and late chunks, in source order
    EarlyAndLate,

    /// The best `n` ranked chunks, put back into source order
    TopRanked(usize),

    /// All middle chunks
    Middle,

    /// The first `n` chunks
    Leading(usize),

    /// The whole source text rather than chunks
    FullText,
}

impl Selection {
    /// Pick the chunks this selection reads, in source order
    ///
    /// When a positional selection finds nothing (a one-chunk document has no
    /// middle), every chunk is used instead. `FullText` picks no chunks.
    pub fn select<'a>(&self, chunks: &'a [Chunk], ranked: &'a [ScoredChunk]) -> Vec<&'a Chunk> {
        let picked: Vec<&Chunk> = match *self {
            Selection::EarlyAndLate => chunks
                .iter()
                .filter(|c| c.position != ChunkPosition::Middle)
                .collect(),
            Selection::TopRanked(n) => {
                let mut best: Vec<&Chunk> = ranked.iter().take(n).map(|s| &s.chunk).collect();
                best.sort_by_key(|c| c.index);
                best
            }
            Selection::Middle => chunks
                .iter()
                .filter(|c| c.position == ChunkPosition::Middle)
                .collect(),
            Selection::Leading(n) => chunks.iter().take(n).collect(),
            Selection::FullText => return Vec::new(),
        };

        if picked.is_empty() {
            chunks.iter().collect()
        } else {
            picked
        }
    }

    /// Build the budgeted context for this selection
    pub fn context(
        &self,
        chunks: &[Chunk],
        ranked: &[ScoredChunk],
        full_text: &str,
        budget: usize,
    ) -> PassContext {
        match self {
            Selection::FullText => PassContext::from_text(full_text, budget),
            _ => PassContext::assemble(&self.select(chunks, ranked), budget),
        }
    }
}

/// The text handed to one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassContext {
    /// Chunk texts joined by [`CONTEXT_SEPARATOR`]
    pub text: String,

    /// Chunks (or pieces of text) included
    pub chunk_count: usize,

    /// Whether anything was left out to fit the budget
    pub truncated: bool,
}

impl PassContext {
    /// Join chunks in order until the next one would exceed `budget`
    /// characters
    ///
    /// Only chunk characters count against the budget. Trailing chunks are
    /// dropped whole; a first chunk that alone exceeds the budget is cut at
    /// the budget instead.
    pub fn assemble(chunks: &[&Chunk], budget: usize) -> Self {
        let mut parts: Vec<&str> = Vec::new();
        let mut used = 0;
        let mut truncated = false;

        for chunk in chunks {
            let len = chunk.char_len();
            if used + len <= budget {
                parts.push(&chunk.text);
                used += len;
                continue;
            }

            if parts.is_empty() {
                parts.push(truncate_chars(&chunk.text, budget));
            }
            truncated = true;
            break;
        }

        let context = Self {
            text: parts.join(CONTEXT_SEPARATOR),
            chunk_count: parts.len(),
            truncated,
        };
        debug!(
            chunks = context.chunk_count,
            offered = chunks.len(),
            truncated = context.truncated,
            "Assembled pass context"
        );
        context
    }

    /// Hard-cut a whole text at `budget` characters
    pub fn from_text(text: &str, budget: usize) -> Self {
        let cut = truncate_chars(text, budget);
        Self {
            text: cut.to_string(),
            chunk_count: usize::from(!text.is_empty()),
            truncated: cut.len() < text.len(),
        }
    }

    /// Whether there is nothing to send
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of characters in the context
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// The first `max` characters of `text`
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(index: usize, text: String, position: ChunkPosition) -> Chunk {
        Chunk {
            index,
            start: 0,
            end: text.len(),
            text,
            position,
        }
    }

    fn nine_chunks() -> Vec<Chunk> {
        (0..9)
            .map(|i| chunk(i, format!("chunk {}", i), ChunkPosition::for_index(i, 9)))
            .collect()
    }

    fn indices(picked: &[&Chunk]) -> Vec<usize> {
        picked.iter().map(|c| c.index).collect()
    }

    #[test]
    fn test_early_and_late() {
        let chunks = nine_chunks();
        let picked = Selection::EarlyAndLate.select(&chunks, &[]);
        assert_eq!(indices(&picked), vec![0, 1, 2, 6, 7, 8]);
    }

    #[test]
    fn test_middle_and_leading() {
        let chunks = nine_chunks();
        assert_eq!(indices(&Selection::Middle.select(&chunks, &[])), vec![3, 4, 5]);
        assert_eq!(
            indices(&Selection::Leading(6).select(&chunks, &[])),
            vec![0, 1, 2, 3, 4, 5]
        );
        assert!(Selection::FullText.select(&chunks, &[]).is_empty());
    }

    #[test]
    fn test_top_ranked_restores_source_order() {
        let chunks = nine_chunks();
        let ranked: Vec<ScoredChunk> = [7, 2, 5, 0, 8, 1]
            .iter()
            .map(|&i| ScoredChunk {
                chunk: chunks[i].clone(),
                score: 10 - i as u32,
            })
            .collect();

        let picked = Selection::TopRanked(5).select(&chunks, &ranked);
        assert_eq!(indices(&picked), vec![0, 2, 5, 7, 8]);
    }

    #[test]
    fn test_single_chunk_has_no_middle() {
        let chunks = vec![chunk(0, "only".to_string(), ChunkPosition::Early)];
        assert_eq!(indices(&Selection::Middle.select(&chunks, &[])), vec![0]);
    }

    #[test]
    fn test_budget_drops_trailing_chunks() {
        let chunks: Vec<Chunk> = (0..5)
            .map(|i| chunk(i, "x".repeat(2000), ChunkPosition::Middle))
            .collect();
        let refs: Vec<&Chunk> = chunks.iter().collect();

        let context = PassContext::assemble(&refs, 8000);
        assert_eq!(context.chunk_count, 4);
        assert!(context.truncated);
        assert_eq!(context.text.matches(CONTEXT_SEPARATOR).count(), 3);
        assert_eq!(context.char_len(), 8000 + 3 * CONTEXT_SEPARATOR.len());
    }

    #[test]
    fn test_top_ranked_context_within_budget() {
        let chunks: Vec<Chunk> = (0..5)
            .map(|i| chunk(i, "y".repeat(2000), ChunkPosition::for_index(i, 5)))
            .collect();
        let ranked: Vec<ScoredChunk> = chunks
            .iter()
            .rev()
            .map(|c| ScoredChunk {
                chunk: c.clone(),
                score: c.index as u32,
            })
            .collect();

        let context = Selection::TopRanked(5).context(&chunks, &ranked, "", 8000);
        assert_eq!(context.chunk_count, 4);
    }

    #[test]
    fn test_oversized_first_chunk_is_cut() {
        let big = chunk(0, "é".repeat(50), ChunkPosition::Early);
        let small = chunk(1, "tail".to_string(), ChunkPosition::Late);

        let context = PassContext::assemble(&[&big, &small], 20);
        assert_eq!(context.chunk_count, 1);
        assert_eq!(context.char_len(), 20);
        assert!(context.truncated);
    }

    #[test]
    fn test_everything_fits() {
        let a = chunk(0, "alpha".to_string(), ChunkPosition::Early);
        let b = chunk(1, "beta".to_string(), ChunkPosition::Late);

        let context = PassContext::assemble(&[&a, &b], 100);
        assert_eq!(context.text, "alpha\n\n---\n\nbeta");
        assert!(!context.truncated);
    }

    #[test]
    fn test_full_text_context() {
        let context = Selection::FullText.context(&[], &[], "abcdefghij", 4);
        assert_eq!(context.text, "abcd");
        assert!(context.truncated);

        let whole = PassContext::from_text("short", 100);
        assert_eq!(whole.text, "short");
        assert!(!whole.truncated);

        assert!(PassContext::from_text("", 10).is_empty());
    }
}
