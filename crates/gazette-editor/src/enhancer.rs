//! Impact-first framing for summaries, headlines and action items

use crate::refiner::{capitalize_first, STRONG_VERBS};
use crate::EditorError;
use gazette_domain::AggregateKnowledge;
use regex::Regex;
use serde::{Deserialize, Serialize};

const WEAK_OPENING: &str =
    r"(?i)^(?:the content covers|this newsletter discusses|this document presents)\s+";

/// Generic headline shapes and their impact-first rewrite, applied in order
const WEAK_HEADLINES: &[(&str, &str)] = &[
    (r"^Introduction [Oo]f (.+)", "${1} Drives Performance Optimization"),
    (r"^Use [Oo]f (.+)", "${1} Enables Strategic Decision-Making"),
    (r"^(.+) Implementation$", "How ${1} Transforms Operations"),
];

const REVIEW_AND: &str = r"(?i)^review\s+and\s+";

/// What an enhancement pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementReport {
    /// Paths of the fields that were rewritten
    pub changes: Vec<String>,

    /// Highlight and article titles given an impact-first headline
    pub headlines_rewritten: usize,

    /// Action items that lost a leading "Review and"
    pub prefixes_removed: usize,
}

/// Leads with business value instead of describing the source
pub struct Enhancer {
    weak_opening: Regex,
    headlines: Vec<(Regex, &'static str)>,
    review_and: Regex,
    strong_verb: Regex,
}

impl Enhancer {
    /// Compile the rewrite rules
    pub fn new() -> Result<Self, EditorError> {
        let headlines = WEAK_HEADLINES
            .iter()
            .map(|(pattern, replacement)| Ok((Regex::new(pattern)?, *replacement)))
            .collect::<Result<Vec<_>, EditorError>>()?;

        Ok(Self {
            weak_opening: Regex::new(WEAK_OPENING)?,
            headlines,
            review_and: Regex::new(REVIEW_AND)?,
            strong_verb: Regex::new(STRONG_VERBS)?,
        })
    }

    /// Enhance the record in place
    pub fn enhance(&self, knowledge: &mut AggregateKnowledge) -> EnhancementReport {
        let mut report = EnhancementReport::default();

        let summary = self.enhance_summary(
            &knowledge.executive_summary,
            &knowledge.strategic_insights.business_impact,
        );
        if summary != knowledge.executive_summary {
            knowledge.executive_summary = summary;
            report.changes.push("executive_summary".to_string());
        }

        let titles = knowledge
            .key_highlights
            .iter_mut()
            .enumerate()
            .map(|(idx, h)| (format!("key_highlights[{idx}].title"), &mut h.title))
            .chain(
                knowledge
                    .feature_articles
                    .iter_mut()
                    .enumerate()
                    .map(|(idx, a)| (format!("feature_articles[{idx}].title"), &mut a.title)),
            );
        for (path, title) in titles {
            let headline = self.enhance_headline(title);
            if headline != *title {
                *title = headline;
                report.headlines_rewritten += 1;
                report.changes.push(path);
            }
        }

        let actions = &mut knowledge.action_items;
        for (name, items) in [
            ("action_items.engineering_teams", &mut actions.engineering_teams),
            ("action_items.architecture_teams", &mut actions.architecture_teams),
            ("action_items.leadership", &mut actions.leadership),
        ] {
            for (idx, item) in items.iter_mut().enumerate() {
                if let Some(trimmed) = self.remove_review_prefix(item) {
                    *item = trimmed;
                    report.prefixes_removed += 1;
                    report.changes.push(format!("{name}[{idx}]"));
                }
            }
        }

        report
    }

    /// Drop a generic opening and close with the business impact
    ///
    /// # Examples
    ///
    /// ```
    /// use gazette_editor::Enhancer;
    ///
    /// let enhancer = Enhancer::new().unwrap();
    /// assert_eq!(
    ///     enhancer.enhance_summary("The content covers cost savings.", "Budget freed."),
    ///     "Cost savings.\n\nBudget freed."
    /// );
    /// ```
    pub fn enhance_summary(&self, summary: &str, business_impact: &str) -> String {
        let mut out = capitalize_first(&self.weak_opening.replace(summary, ""));

        let impact = business_impact.trim();
        if !out.is_empty() && !impact.is_empty() && !out.contains(impact) {
            out.push_str("\n\n");
            out.push_str(impact);
        }
        out
    }

    /// Rewrite generic headline shapes into impact-first ones
    pub fn enhance_headline(&self, title: &str) -> String {
        self.headlines
            .iter()
            .fold(title.to_string(), |title, (pattern, replacement)| {
                pattern.replace(&title, *replacement).into_owned()
            })
    }

    /// Strip a leading "Review and" when a concrete verb follows it
    fn remove_review_prefix(&self, item: &str) -> Option<String> {
        let rest = self.review_and.find(item).map(|m| &item[m.end()..])?;
        self.strong_verb
            .is_match(rest)
            .then(|| capitalize_first(rest))
    }
}
