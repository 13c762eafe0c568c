//! Professional tone and formatting fixes

use crate::EditorError;
use gazette_domain::{AggregateKnowledge, Architecture, FeatureArticle, Highlight};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Casual phrasing and its replacement, applied in order
const CASUAL_PHRASES: &[(&str, &str)] = &[
    (r"(?i)\bwanna\b", "want to"),
    (r"(?i)\bgotta\b", "have to"),
    (r"(?i)\bkinda\b", "somewhat"),
    (r"(?i)\bsorta\b", "somewhat"),
    (r"(?i)\bstuff\b", "items"),
    (r"(?i)\ba\s+lot\s+of\b", "many"),
    (r"(?i)\blots?\s+of\b", "many"),
    (r"(?i)\ba\s+lot\b", "significantly"),
];

const FILLER: &str = r"(?i)\b(?:you\s+know|I\s+mean|basically|actually)\b,?";

pub(crate) const STRONG_VERBS: &str = r"(?i)^(?:review|implement|evaluate|plan|schedule|document|analyze|monitor|test|update|develop|establish|define|create|deploy|optimize|enable|adopt|automate|migrate|audit|assess|prioritize|configure|build|train|fund|add|set)\b";

/// Words kept lower-case inside a title
const MINOR_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of",
];

/// What a refinement pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementReport {
    /// Paths of the fields that were rewritten
    pub changes: Vec<String>,

    /// Action items that gained a leading verb
    pub actions_prefixed: usize,

    /// List entries that were empty after cleanup
    pub items_dropped: usize,
}

impl RefinementReport {
    /// Whether the record was left untouched
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.items_dropped == 0
    }
}

/// Rewrites extracted text into a consistent newsletter register
pub struct Refiner {
    replacements: Vec<(Regex, &'static str)>,
    filler: Regex,
    spacing: Regex,
    space_before_punct: Regex,
    blank_lines: Regex,
    strong_verb: Regex,
}

impl Refiner {
    /// Compile the rewrite rules
    pub fn new() -> Result<Self, EditorError> {
        let replacements = CASUAL_PHRASES
            .iter()
            .map(|(pattern, replacement)| Ok((Regex::new(pattern)?, *replacement)))
            .collect::<Result<Vec<_>, EditorError>>()?;

        Ok(Self {
            replacements,
            filler: Regex::new(FILLER)?,
            spacing: Regex::new(r"[ \t]{2,}")?,
            space_before_punct: Regex::new(r"[ \t]+([,.;:!?])")?,
            blank_lines: Regex::new(r"\n{3,}")?,
            strong_verb: Regex::new(STRONG_VERBS)?,
        })
    }

    /// Refine every text field of the record in place
    pub fn refine(&self, knowledge: &mut AggregateKnowledge) -> RefinementReport {
        let mut report = RefinementReport::default();

        let summary = capitalize_sentences(&self.clean(&knowledge.executive_summary));
        update(&mut report, "executive_summary", &mut knowledge.executive_summary, summary);

        for (idx, highlight) in knowledge.key_highlights.iter_mut().enumerate() {
            self.refine_highlight(&mut report, idx, highlight);
        }
        for (idx, article) in knowledge.feature_articles.iter_mut().enumerate() {
            self.refine_article(&mut report, idx, article);
        }
        for (idx, architecture) in knowledge.architectures.iter_mut().enumerate() {
            self.refine_architecture(&mut report, idx, architecture);
        }

        self.refine_list(&mut report, "quick_bites", &mut knowledge.quick_bites);
        self.refine_list(&mut report, "best_practices", &mut knowledge.best_practices);

        let actions = &mut knowledge.action_items;
        for (name, items) in [
            ("action_items.engineering_teams", &mut actions.engineering_teams),
            ("action_items.architecture_teams", &mut actions.architecture_teams),
            ("action_items.leadership", &mut actions.leadership),
        ] {
            self.refine_actions(&mut report, name, items);
        }

        let insights = &mut knowledge.strategic_insights;
        let impact = self.refine_description(&insights.business_impact);
        update(
            &mut report,
            "strategic_insights.business_impact",
            &mut insights.business_impact,
            impact,
        );
        self.refine_list(&mut report, "strategic_insights.risks", &mut insights.risks);
        self.refine_list(
            &mut report,
            "strategic_insights.opportunities",
            &mut insights.opportunities,
        );

        report
    }

    /// Replace casual phrasing, drop filler and tidy whitespace
    pub fn clean(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (pattern, replacement) in &self.replacements {
            out = pattern.replace_all(&out, *replacement).into_owned();
        }
        out = self.filler.replace_all(&out, "").into_owned();
        out = self.spacing.replace_all(&out, " ").into_owned();
        out = self.space_before_punct.replace_all(&out, "$1").into_owned();

        let out = out
            .lines()
            .map(|line| line.trim().trim_start_matches(','))
            .map(str::trim_start)
            .collect::<Vec<_>>()
            .join("\n");
        self.blank_lines
            .replace_all(out.trim(), "\n\n")
            .into_owned()
    }

    /// Clean, capitalize and end with terminal punctuation
    pub fn refine_description(&self, text: &str) -> String {
        ensure_terminal(capitalize_first(&self.clean(text)))
    }

    /// Clean and title-case
    pub fn refine_title(&self, title: &str) -> String {
        title_case(&self.clean(title))
    }

    /// Make an action item open with a concrete verb
    ///
    /// Returns `None` when nothing is left after cleanup.
    pub fn refine_action(&self, item: &str) -> Option<(String, bool)> {
        let cleaned = self.clean(item);
        if cleaned.is_empty() {
            return None;
        }
        if self.strong_verb.is_match(&cleaned) {
            return Some((ensure_terminal(capitalize_first(&cleaned)), false));
        }

        let lower = cleaned.to_lowercase();
        let verb = if lower.contains("tool") || lower.contains("solution") {
            "Evaluate"
        } else if lower.contains("process") {
            "Establish"
        } else {
            "Implement"
        };
        Some((
            ensure_terminal(format!("{} {}", verb, lowercase_first(&cleaned))),
            true,
        ))
    }

    fn refine_highlight(&self, report: &mut RefinementReport, idx: usize, highlight: &mut Highlight) {
        let title = self.refine_title(&highlight.title);
        update(report, format!("key_highlights[{idx}].title"), &mut highlight.title, title);
        let description = self.refine_description(&highlight.description);
        update(
            report,
            format!("key_highlights[{idx}].description"),
            &mut highlight.description,
            description,
        );
    }

    fn refine_article(&self, report: &mut RefinementReport, idx: usize, article: &mut FeatureArticle) {
        let title = self.refine_title(&article.title);
        update(report, format!("feature_articles[{idx}].title"), &mut article.title, title);

        for (name, slot) in [
            ("context", &mut article.context),
            ("key_ideas", &mut article.key_ideas),
            ("benefits", &mut article.benefits),
            ("best_practices", &mut article.best_practices),
            ("call_to_action", &mut article.call_to_action),
        ] {
            let refined = self.refine_description(slot);
            update(report, format!("feature_articles[{idx}].{name}"), slot, refined);
        }
    }

    fn refine_architecture(
        &self,
        report: &mut RefinementReport,
        idx: usize,
        architecture: &mut Architecture,
    ) {
        for (name, slot) in [
            ("description", &mut architecture.description),
            ("use_case", &mut architecture.use_case),
        ] {
            let refined = self.refine_description(slot);
            update(report, format!("architectures[{idx}].{name}"), slot, refined);
        }
    }

    fn refine_list(&self, report: &mut RefinementReport, name: &str, items: &mut Vec<String>) {
        let before = items.len();
        let refined: Vec<String> = items
            .iter()
            .map(|item| capitalize_first(&self.clean(item)))
            .filter(|item| !item.is_empty())
            .collect();
        report.items_dropped += before - refined.len();
        update(report, name, items, refined);
    }

    fn refine_actions(&self, report: &mut RefinementReport, name: &str, items: &mut Vec<String>) {
        let before = items.len();
        let mut refined = Vec::with_capacity(before);
        for item in items.iter() {
            if let Some((action, prefixed)) = self.refine_action(item) {
                if prefixed {
                    report.actions_prefixed += 1;
                }
                refined.push(action);
            }
        }
        report.items_dropped += before - refined.len();
        update(report, name, items, refined);
    }
}

fn update<T: PartialEq>(
    report: &mut RefinementReport,
    name: impl Into<String>,
    slot: &mut T,
    refined: T,
) {
    if *slot != refined {
        *slot = refined;
        report.changes.push(name.into());
    }
}

/// Upper-case the first letter of every sentence
pub fn capitalize_sentences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut capitalize_next = true;
    let mut after_terminal = false;

    for c in text.chars() {
        if capitalize_next && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
            capitalize_next = false;
            after_terminal = false;
            continue;
        }

        if matches!(c, '.' | '!' | '?') {
            after_terminal = true;
        } else if c.is_whitespace() {
            if after_terminal {
                capitalize_next = true;
            }
        } else if !capitalize_next {
            after_terminal = false;
        }
        out.push(c);
    }
    out
}

/// Capitalize words, keeping minor words lower-case unless they lead
///
/// # Examples
///
/// ```
/// use gazette_editor::title_case;
///
/// assert_eq!(title_case("scaling the AKS fleet"), "Scaling the AKS Fleet");
/// assert_eq!(title_case("the end of VPNs"), "The End of VPNs");
/// ```
pub fn title_case(title: &str) -> String {
    title
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i > 0 && MINOR_WORDS.contains(&lower.as_str()) {
                lower
            } else {
                capitalize_first(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first letter unless the word is an acronym
fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.clone().next()) {
        (Some(first), Some(second)) if second.is_uppercase() => {
            std::iter::once(first).chain(chars).collect()
        }
        (Some(first), _) => first.to_lowercase().chain(chars).collect(),
        (None, _) => String::new(),
    }
}

fn ensure_terminal(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_domain::{ActionItems, StrategicInsights};
    use proptest::prelude::*;

    fn refiner() -> Refiner {
        Refiner::new().unwrap()
    }

    #[test]
    fn test_casual_phrases_replaced() {
        let cleaned = refiner().clean("We wanna cut a lot of stuff and we gotta move");
        assert_eq!(cleaned, "We want to cut many items and we have to move");
    }

    #[test]
    fn test_filler_removed() {
        let cleaned = refiner().clean("Basically, the rollout is, you know, done.");
        assert_eq!(cleaned, "the rollout is, done.");
    }

    #[test]
    fn test_paragraphs_survive_cleanup() {
        let cleaned = refiner().clean("First  paragraph.\n\n\n\nSecond   one.");
        assert_eq!(cleaned, "First paragraph.\n\nSecond one.");
    }

    #[test]
    fn test_capitalize_sentences() {
        assert_eq!(
            capitalize_sentences("costs fell. teams shipped! why? because.\n\nnext paragraph"),
            "Costs fell. Teams shipped! Why? Because.\n\nNext paragraph"
        );
        assert_eq!(capitalize_sentences("version 3.5 shipped"), "Version 3.5 shipped");
    }

    #[test]
    fn test_title_case_keeps_acronyms() {
        assert_eq!(title_case("cost savings for the AKS fleet"), "Cost Savings for the AKS Fleet");
        assert_eq!(title_case("a   new   start"), "A New Start");
    }

    #[test]
    fn test_title_case_of_stays_lower() {
        assert_eq!(title_case("the end of VPNs"), "The End of VPNs");
        assert_eq!(title_case("of mice and clusters"), "Of Mice and Clusters");
    }

    #[test]
    fn test_description_gets_terminal_punctuation() {
        let refiner = refiner();
        assert_eq!(refiner.refine_description("autoscaling paid off"), "Autoscaling paid off.");
        assert_eq!(refiner.refine_description("Really?"), "Really?");
        assert_eq!(refiner.refine_description("   "), "");
    }

    #[test]
    fn test_action_prefixes() {
        let refiner = refiner();
        let cases = [
            ("a cost dashboard tool", "Evaluate a cost dashboard tool.", true),
            ("change review process", "Establish change review process.", true),
            ("Tracing on every service", "Implement tracing on every service.", true),
            ("AKS node pools per team", "Implement AKS node pools per team.", true),
            ("deploy the new gateway", "Deploy the new gateway.", false),
            ("Review spend weekly.", "Review spend weekly.", false),
        ];

        for (input, expected, prefixed) in cases {
            assert_eq!(
                refiner.refine_action(input),
                Some((expected.to_string(), prefixed)),
                "input: {input}"
            );
        }
        assert_eq!(refiner.refine_action("basically"), None);
    }

    #[test]
    fn test_refine_record() {
        let mut knowledge = AggregateKnowledge {
            executive_summary: "basically, cloud costs fell. the team kinda nailed it.".to_string(),
            key_highlights: vec![Highlight {
                title: "costs down in the first quarter".to_string(),
                description: "autoscaling paid off".to_string(),
            }],
            quick_bites: vec!["  ".to_string(), "enable budgets".to_string()],
            action_items: ActionItems {
                engineering_teams: vec!["tracing everywhere".to_string()],
                ..Default::default()
            },
            strategic_insights: StrategicInsights {
                business_impact: "faster releases".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let report = refiner().refine(&mut knowledge);

        assert_eq!(
            knowledge.executive_summary,
            "Cloud costs fell. The team somewhat nailed it."
        );
        assert_eq!(knowledge.key_highlights[0].title, "Costs Down in the First Quarter");
        assert_eq!(knowledge.key_highlights[0].description, "Autoscaling paid off.");
        assert_eq!(knowledge.quick_bites, vec!["Enable budgets"]);
        assert_eq!(
            knowledge.action_items.engineering_teams,
            vec!["Implement tracing everywhere."]
        );
        assert_eq!(knowledge.strategic_insights.business_impact, "Faster releases.");

        assert_eq!(report.actions_prefixed, 1);
        assert_eq!(report.items_dropped, 1);
        assert!(report.changes.contains(&"executive_summary".to_string()));
        assert!(report.changes.contains(&"key_highlights[0].title".to_string()));
    }

    #[test]
    fn test_refine_is_idempotent() {
        let refiner = refiner();
        let mut knowledge = AggregateKnowledge {
            executive_summary: "stuff happened. we wanna fix it".to_string(),
            best_practices: vec!["automate a lot".to_string()],
            ..Default::default()
        };

        let first = refiner.refine(&mut knowledge);
        assert!(!first.is_empty());

        let second = refiner.refine(&mut knowledge);
        assert!(second.is_empty(), "second pass changed {:?}", second.changes);
    }

    #[test]
    fn test_empty_record_untouched() {
        let mut knowledge = AggregateKnowledge::default();
        let report = refiner().refine(&mut knowledge);
        assert!(report.is_empty());
        assert_eq!(knowledge, AggregateKnowledge::default());
    }

    proptest! {
        #[test]
        fn prop_capitalization_only_changes_case(text in "[a-z .!?\n]{0,80}") {
            let out = capitalize_sentences(&text);
            prop_assert_eq!(out.to_lowercase(), text);
        }
    }
}
