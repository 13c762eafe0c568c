//! Source documents handed to the pipeline by the format parsers

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A normalized document ready for chunking
///
/// Parsers for transcripts, slide decks and the like live outside this
/// workspace; they reduce their input to a single text blob plus optional
/// speaker metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Display name of the source (usually the file name)
    pub name: String,

    /// Normalized document text
    pub text: String,

    /// Speakers appearing in the document, sorted
    #[serde(default)]
    pub speakers: Vec<String>,

    /// Words spoken per speaker
    #[serde(default)]
    pub speaker_word_counts: BTreeMap<String, usize>,

    /// Names of the inputs folded into this document
    #[serde(default)]
    pub sources: Vec<String>,
}

impl SourceDocument {
    /// Create a document from plain text
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            sources: vec![name.clone()],
            name,
            text: text.into(),
            speakers: Vec::new(),
            speaker_word_counts: BTreeMap::new(),
        }
    }

    /// Attach speaker metadata
    pub fn with_speakers(mut self, word_counts: BTreeMap<String, usize>) -> Self {
        self.speakers = word_counts.keys().cloned().collect();
        self.speaker_word_counts = word_counts;
        self
    }

    /// Whitespace-delimited word count
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Character count
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Combine several documents into one.
    ///
    /// Each input is introduced by a `=== Source: <name> ===` banner. Speakers
    /// are unioned and their word counts summed.
    ///
    /// # Examples
    ///
    /// ```
    /// use gazette_domain::SourceDocument;
    ///
    /// let combined = SourceDocument::combine(vec![
    ///     SourceDocument::new("a.txt", "First."),
    ///     SourceDocument::new("b.txt", "Second."),
    /// ]);
    /// assert!(combined.text.contains("=== Source: a.txt ==="));
    /// assert_eq!(combined.sources, vec!["a.txt", "b.txt"]);
    /// ```
    pub fn combine(docs: Vec<SourceDocument>) -> Self {
        if docs.len() == 1 {
            return docs.into_iter().next().unwrap_or_default();
        }

        let mut text = String::new();
        let mut speakers = BTreeSet::new();
        let mut speaker_word_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut sources = Vec::new();

        for doc in docs {
            if !text.is_empty() {
                text.push_str("\n\n");
            }
            text.push_str(&format!("=== Source: {} ===\n\n", doc.name));
            text.push_str(&doc.text);

            speakers.extend(doc.speakers);
            for (speaker, words) in doc.speaker_word_counts {
                *speaker_word_counts.entry(speaker).or_insert(0) += words;
            }
            sources.extend(doc.sources);
        }

        Self {
            name: "combined".to_string(),
            text,
            speakers: speakers.into_iter().collect(),
            speaker_word_counts,
            sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let doc = SourceDocument::new("notes.txt", "Three little words");
        assert_eq!(doc.word_count(), 3);
        assert_eq!(doc.char_count(), 18);
        assert_eq!(doc.sources, vec!["notes.txt"]);
    }

    #[test]
    fn test_with_speakers() {
        let mut counts = BTreeMap::new();
        counts.insert("Bob".to_string(), 10);
        counts.insert("Alice".to_string(), 4);

        let doc = SourceDocument::new("call.vtt", "...").with_speakers(counts);
        assert_eq!(doc.speakers, vec!["Alice", "Bob"]);
        assert_eq!(doc.speaker_word_counts["Bob"], 10);
    }

    #[test]
    fn test_combine_single_is_identity() {
        let doc = SourceDocument::new("only.txt", "Alone");
        let combined = SourceDocument::combine(vec![doc.clone()]);
        assert_eq!(combined, doc);
    }

    #[test]
    fn test_combine_merges_speakers() {
        let mut a = BTreeMap::new();
        a.insert("Alice".to_string(), 5);
        let mut b = BTreeMap::new();
        b.insert("Alice".to_string(), 2);
        b.insert("Carol".to_string(), 7);

        let combined = SourceDocument::combine(vec![
            SourceDocument::new("one.vtt", "Alice: hi").with_speakers(a),
            SourceDocument::new("two.vtt", "Carol: hello").with_speakers(b),
        ]);

        assert_eq!(combined.name, "combined");
        assert_eq!(combined.speakers, vec!["Alice", "Carol"]);
        assert_eq!(combined.speaker_word_counts["Alice"], 7);
        assert!(combined.text.starts_with("=== Source: one.vtt ==="));
        assert!(combined.text.contains("\n\n=== Source: two.vtt ===\n\nCarol: hello"));
    }

    #[test]
    fn test_combine_empty() {
        let combined = SourceDocument::combine(Vec::new());
        assert!(combined.text.is_empty());
        assert!(combined.sources.is_empty());
    }
}
