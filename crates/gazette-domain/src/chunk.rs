//! Chunk module - slices of the source text fed to the extraction passes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a chunk sits in the document, by index thirds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkPosition {
    /// First third of the chunks
    Early,

    /// Everything between the first and last third
    Middle,

    /// Last third of the chunks
    Late,
}

impl ChunkPosition {
    /// Get the position name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkPosition::Early => "early",
            ChunkPosition::Middle => "middle",
            ChunkPosition::Late => "late",
        }
    }

    /// Tag the chunk at `index` out of `total` chunks.
    ///
    /// With `third = total / 3`, the first `max(third, 1)` chunks are early and
    /// the last `third` chunks are late. A lone chunk is therefore early.
    ///
    /// # Examples
    ///
    /// ```
    /// use gazette_domain::ChunkPosition;
    ///
    /// assert_eq!(ChunkPosition::for_index(0, 1), ChunkPosition::Early);
    /// assert_eq!(ChunkPosition::for_index(4, 9), ChunkPosition::Middle);
    /// assert_eq!(ChunkPosition::for_index(8, 9), ChunkPosition::Late);
    /// ```
    pub fn for_index(index: usize, total: usize) -> Self {
        let third = total / 3;
        if index < third.max(1) {
            ChunkPosition::Early
        } else if index >= total - third {
            ChunkPosition::Late
        } else {
            ChunkPosition::Middle
        }
    }
}

impl fmt::Display for ChunkPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous slice of the source text
///
/// `start` and `end` are byte offsets into the source and always fall on
/// character boundaries, so `&source[chunk.start..chunk.end] == chunk.text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Index of the chunk in source order
    pub index: usize,

    /// Chunk contents
    pub text: String,

    /// Byte offset of the first character
    pub start: usize,

    /// Byte offset one past the last character
    pub end: usize,

    /// Position label
    pub position: ChunkPosition,
}

impl Chunk {
    /// Number of characters in the chunk
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the chunk holds no text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A chunk paired with its relevance score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The scored chunk
    pub chunk: Chunk,

    /// Keyword-weighted relevance score
    pub score: u32,
}

impl ScoredChunk {
    /// Original index of the chunk in source order
    pub fn index(&self) -> usize {
        self.chunk.index
    }
}
