//! Keyword-weighted relevance scoring

use crate::config::KeywordTable;
use gazette_domain::{Chunk, ScoredChunk};

/// Scores chunks by weighted keyword occurrences
///
/// Matching is case-insensitive and only counts occurrences that begin at a
/// word boundary, so "risks" counts for "risk" but "heroic" does not count
/// for "roi".
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    business: Vec<String>,
    technical: Vec<String>,
    business_weight: u32,
    technical_weight: u32,
}

impl RelevanceScorer {
    /// Create a scorer from a keyword table
    pub fn new(table: &KeywordTable) -> Self {
        let normalize = |words: &[String]| {
            words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        };
        Self {
            business: normalize(&table.business),
            technical: normalize(&table.technical),
            business_weight: table.business_weight,
            technical_weight: table.technical_weight,
        }
    }

    /// Score a piece of text
    ///
    /// # Examples
    ///
    /// ```
    /// use gazette_extractor::RelevanceScorer;
    ///
    /// let scorer = RelevanceScorer::default();
    /// assert_eq!(scorer.score("Lower cost, better security"), 3);
    /// assert_eq!(scorer.score("nothing relevant"), 0);
    /// ```
    pub fn score(&self, text: &str) -> u32 {
        let haystack = text.to_lowercase();
        let business = count_all(&haystack, &self.business);
        let technical = count_all(&haystack, &self.technical);

        self.business_weight
            .saturating_mul(business)
            .saturating_add(self.technical_weight.saturating_mul(technical))
    }

    /// Score every chunk and keep the `top_k` best, highest first
    ///
    /// Ties keep source order.
    pub fn rerank(&self, chunks: &[Chunk], top_k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = chunks
            .iter()
            .map(|chunk| ScoredChunk {
                chunk: chunk.clone(),
                score: self.score(&chunk.text),
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(top_k);
        scored
    }
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(&KeywordTable::default())
    }
}

fn count_all(haystack: &str, keywords: &[String]) -> u32 {
    keywords
        .iter()
        .map(|keyword| count_hits(haystack, keyword))
        .fold(0u32, u32::saturating_add)
}

fn count_hits(haystack: &str, keyword: &str) -> u32 {
    haystack
        .match_indices(keyword)
        .filter(|(i, _)| {
            haystack[..*i]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphanumeric())
        })
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_domain::ChunkPosition;

    fn chunks(texts: &[&str]) -> Vec<Chunk> {
        let mut offset = 0;
        texts
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let start = offset;
                offset += text.len();
                Chunk {
                    index,
                    text: text.to_string(),
                    start,
                    end: offset,
                    position: ChunkPosition::for_index(index, texts.len()),
                }
            })
            .collect()
    }

    #[test]
    fn test_weights() {
        let scorer = RelevanceScorer::default();
        assert_eq!(scorer.score("cost"), 2);
        assert_eq!(scorer.score("security"), 1);
        assert_eq!(scorer.score("Strategic SECURITY and ROI"), 5);
    }

    #[test]
    fn test_business_keyword_adds_two() {
        let scorer = RelevanceScorer::default();
        let base = "Platform architecture review with cost notes.";
        let more = format!("{} Another cost line.", base);
        assert_eq!(scorer.score(&more), scorer.score(base) + 2);
    }

    #[test]
    fn test_word_boundary_matching() {
        let scorer = RelevanceScorer::default();
        assert_eq!(scorer.score("heroic efforts"), 0);
        assert_eq!(scorer.score("several risks"), 2);
        assert_eq!(scorer.score("risk-based"), 2);
        assert_eq!(scorer.score("cyberrisk"), 0);
    }

    #[test]
    fn test_custom_table() {
        let table = KeywordTable {
            business: vec!["Margin".to_string(), "  ".to_string()],
            technical: vec![],
            business_weight: 5,
            technical_weight: 1,
        };
        let scorer = RelevanceScorer::new(&table);
        assert_eq!(scorer.score("margin margins"), 10);
        assert_eq!(scorer.score("cost"), 0);
    }

    #[test]
    fn test_rerank_top_k_with_ties() {
        // Scores: 1, 5, 2, 5, 0, 3, 4, 5, 1
        let texts = [
            "security",
            "cost cost security",
            "cost",
            "cost cost security",
            "nothing",
            "cost security",
            "cost cost",
            "cost cost security",
            "security",
        ];
        let scorer = RelevanceScorer::default();
        let scores: Vec<u32> = texts.iter().map(|t| scorer.score(t)).collect();
        assert_eq!(scores, vec![1, 5, 2, 5, 0, 3, 4, 5, 1]);

        let ranked = scorer.rerank(&chunks(&texts), 3);
        let indices: Vec<usize> = ranked.iter().map(ScoredChunk::index).collect();
        assert_eq!(indices, vec![1, 3, 7]);
    }

    #[test]
    fn test_rerank_bounds_and_order() {
        let scorer = RelevanceScorer::default();
        let input = chunks(&["cost", "nothing", "risk growth"]);

        let ranked = scorer.rerank(&input, 10);
        assert_eq!(ranked.len(), 3);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(ranked[0].index(), 2);

        assert!(scorer.rerank(&input, 0).is_empty());
        assert!(scorer.rerank(&[], 5).is_empty());
    }
}
