//! Recursive, overlapping text chunking

use crate::error::ExtractorError;
use gazette_domain::{Chunk, ChunkPosition};
use std::ops::Range;

/// Separators tried in order; the empty separator is a hard character cut
const SEPARATORS: [&str; 5] = ["\n\n", "\n", ". ", " ", ""];

/// Splits text into overlapping chunks along the coarsest available boundary
///
/// Sizes are counted in characters. Each chunk is at most `size` characters
/// and starts `overlap` characters before the end of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunker {
    size: usize,
    overlap: usize,
}

impl TextChunker {
    /// Create a new text chunker
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` unless `size > 0` and `overlap < size`.
    pub fn new(size: usize, overlap: usize) -> Result<Self, ExtractorError> {
        if size == 0 {
            return Err(ExtractorError::InvalidConfiguration(
                "chunk size must be greater than 0".to_string(),
            ));
        }
        if overlap >= size {
            return Err(ExtractorError::InvalidConfiguration(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                overlap, size
            )));
        }
        Ok(Self { size, overlap })
    }

    /// Maximum chunk length in characters
    pub fn size(&self) -> usize {
        self.size
    }

    /// Characters shared by neighbouring chunks
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Chunk the given text
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }
        if char_len(text) <= self.size {
            return vec![Chunk {
                index: 0,
                text: text.to_string(),
                start: 0,
                end: text.len(),
                position: ChunkPosition::Early,
            }];
        }

        let limit = self.size - self.overlap;
        let mut segments = Vec::new();
        split_segments(text, 0..text.len(), limit, &SEPARATORS, &mut segments);

        let cores = merge_segments(text, segments, limit);
        let total = cores.len();

        cores
            .into_iter()
            .enumerate()
            .map(|(index, core)| {
                let start = if index == 0 {
                    core.start
                } else {
                    back_chars(text, core.start, self.overlap)
                };
                Chunk {
                    index,
                    text: text[start..core.end].to_string(),
                    start,
                    end: core.end,
                    position: ChunkPosition::for_index(index, total),
                }
            })
            .collect()
    }
}

/// Chunk `text` into pieces of at most `size` characters sharing `overlap`
/// characters with their neighbours.
///
/// # Examples
///
/// ```
/// use gazette_extractor::chunk_text;
///
/// let chunks = chunk_text("alpha beta gamma delta", 12, 4).unwrap();
/// assert!(chunks.len() > 1);
/// assert!(chunks.iter().all(|c| c.char_len() <= 12));
/// ```
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Result<Vec<Chunk>, ExtractorError> {
    Ok(TextChunker::new(size, overlap)?.chunk(text))
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split `range` into pieces of at most `limit` characters that tile it exactly
fn split_segments(
    text: &str,
    range: Range<usize>,
    limit: usize,
    separators: &[&str],
    out: &mut Vec<Range<usize>>,
) {
    let piece = &text[range.clone()];
    if char_len(piece) <= limit {
        out.push(range);
        return;
    }

    for (i, &separator) in separators.iter().enumerate() {
        if separator.is_empty() {
            break;
        }
        if !piece.contains(separator) {
            continue;
        }

        // Separators stay attached to the piece they end
        let rest = &separators[i + 1..];
        let mut start = range.start;
        for part in piece.split_inclusive(separator) {
            let end = start + part.len();
            split_segments(text, start..end, limit, rest, out);
            start = end;
        }
        return;
    }

    hard_cut(piece, range.start, limit, out);
}

fn hard_cut(piece: &str, offset: usize, limit: usize, out: &mut Vec<Range<usize>>) {
    let mut start = offset;
    let mut count = 0;
    for (i, _) in piece.char_indices() {
        if count == limit {
            out.push(start..offset + i);
            start = offset + i;
            count = 0;
        }
        count += 1;
    }
    if start < offset + piece.len() {
        out.push(start..offset + piece.len());
    }
}

/// Greedily join adjacent segments into cores of at most `limit` characters
fn merge_segments(text: &str, segments: Vec<Range<usize>>, limit: usize) -> Vec<Range<usize>> {
    let mut cores: Vec<Range<usize>> = Vec::new();
    let mut current_len = 0;

    for segment in segments {
        let len = char_len(&text[segment.clone()]);
        match cores.last_mut() {
            Some(core) if current_len + len <= limit => {
                core.end = segment.end;
                current_len += len;
            }
            _ => {
                cores.push(segment);
                current_len = len;
            }
        }
    }

    cores
}

/// Byte offset `n` characters before `from`, clamped at the start of the text
fn back_chars(text: &str, from: usize, n: usize) -> usize {
    if n == 0 {
        return from;
    }
    text[..from]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reconstruct(chunks: &[Chunk]) -> String {
        let mut out = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                out.push_str(&chunk.text);
            } else {
                let shared = chunks[i - 1].end - chunk.start;
                out.push_str(&chunk.text[shared..]);
            }
        }
        out
    }

    #[test]
    fn test_empty_text() {
        let chunker = TextChunker::new(100, 10).unwrap();
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn test_no_chunking_needed_for_small_text() {
        let chunker = TextChunker::new(100, 20).unwrap();
        let text = "Short text here.";
        let chunks = chunker.chunk(text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
        assert_eq!(chunks[0].position, ChunkPosition::Early);
        assert_eq!((chunks[0].start, chunks[0].end), (0, text.len()));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            TextChunker::new(0, 0),
            Err(ExtractorError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            chunk_text("text", 10, 10),
            Err(ExtractorError::InvalidConfiguration(_))
        ));
        assert!(chunk_text("text", 10, 9).is_ok());
    }

    #[test]
    fn test_two_paragraphs_overlap() {
        let text = "The first paragraph talks about cloud cost savings.\n\n\
                    The second paragraph covers platform security work.";
        let chunks = chunk_text(text, 50, 10).unwrap();

        assert!(chunks.len() >= 2);
        assert_eq!(chunks[1].start, chunks[0].end - 10);
        assert_eq!(&text[chunks[1].start..chunks[0].end], &chunks[0].text[chunks[0].text.len() - 10..]);
        for chunk in &chunks {
            assert!(chunk.char_len() <= 50);
            assert_eq!(&text[chunk.start..chunk.end], chunk.text);
        }
        assert_eq!(reconstruct(&chunks), text);
    }

    #[test]
    fn test_prefers_paragraph_boundaries() {
        let text = "aaaa aaaa aaaa.\n\nbbbb bbbb bbbb.\n\ncccc cccc cccc.";
        let chunks = chunk_text(text, 20, 0).unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text, "aaaa aaaa aaaa.\n\n");
        assert_eq!(chunks[1].text, "bbbb bbbb bbbb.\n\n");
        assert_eq!(chunks[2].text, "cccc cccc cccc.");
    }

    #[test]
    fn test_hard_cut_without_separators() {
        let text = "x".repeat(25);
        let chunks = chunk_text(&text, 10, 0).unwrap();

        let lens: Vec<_> = chunks.iter().map(Chunk::char_len).collect();
        assert_eq!(lens, vec![10, 10, 5]);
        assert_eq!(reconstruct(&chunks), text);
    }

    #[test]
    fn test_multibyte_characters() {
        let text = "héllo wörld ünïcode ✓✓✓ ".repeat(6);
        let chunks = chunk_text(&text, 16, 4).unwrap();

        for window in chunks.windows(2) {
            let shared = &text[window[1].start..window[0].end];
            assert_eq!(shared.chars().count(), 4);
        }
        assert!(chunks.iter().all(|c| c.char_len() <= 16));
        assert_eq!(reconstruct(&chunks), text);
    }

    #[test]
    fn test_positions_by_thirds() {
        let text = "word ".repeat(60);
        let chunks = chunk_text(&text, 30, 5).unwrap();
        let n = chunks.len();
        let third = n / 3;

        assert!(n >= 9);
        assert!(chunks[..third].iter().all(|c| c.position == ChunkPosition::Early));
        assert!(chunks[n - third..].iter().all(|c| c.position == ChunkPosition::Late));
        assert!(chunks[third..n - third]
            .iter()
            .all(|c| c.position == ChunkPosition::Middle));
        assert!(chunks.iter().enumerate().all(|(i, c)| c.index == i));
    }

    proptest! {
        #[test]
        fn prop_chunks_reconstruct_text(
            text in "[a-zé .\n✓]{0,300}",
            (size, overlap) in (1usize..60).prop_flat_map(|size| (Just(size), 0..size)),
        ) {
            let chunks = chunk_text(&text, size, overlap).unwrap();

            prop_assert_eq!(reconstruct(&chunks), text.clone());
            prop_assert_eq!(chunks.is_empty(), text.is_empty());

            for chunk in &chunks {
                prop_assert!(chunk.char_len() <= size);
                prop_assert!(!chunk.is_empty());
                prop_assert_eq!(&text[chunk.start..chunk.end], chunk.text.as_str());
            }

            for window in chunks.windows(2) {
                let shared = text[window[1].start..window[0].end].chars().count();
                let available = text[..window[0].end].chars().count();
                prop_assert_eq!(shared, overlap.min(available));
                prop_assert!(window[1].end > window[0].end);
            }
        }
    }
}
