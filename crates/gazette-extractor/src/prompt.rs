//! Prompt engineering for the extraction passes

use crate::passes::{PassDescriptor, PassKind};
use crate::selection::PassContext;
use gazette_domain::CompletionRequest;

/// Shared preamble of every system message
const ANALYST_PREAMBLE: &str = "You are an expert enterprise technology analyst and technical writer. \
Extract only factual information from the content provided. Never invent names, numbers or claims \
that the content does not support.";

/// Builds the completion request for one pass
pub struct PromptBuilder<'a> {
    descriptor: &'a PassDescriptor,
    context: &'a PassContext,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(descriptor: &'a PassDescriptor, context: &'a PassContext) -> Self {
        Self {
            descriptor,
            context,
        }
    }

    /// System message: analyst preamble plus the pass instructions
    pub fn system(&self) -> String {
        format!("{}\n\n{}", ANALYST_PREAMBLE, self.descriptor.instructions)
    }

    /// User message: the selected content
    pub fn user(&self) -> String {
        let mut user = String::with_capacity(self.context.text.len() + 64);
        user.push_str("Content:\n---\n");
        user.push_str(&self.context.text);
        user.push_str("\n---\n\n");
        user.push_str(self.descriptor.kind.title());
        user.push(':');
        user
    }

    /// Build the complete request
    pub fn build(&self) -> CompletionRequest {
        CompletionRequest::new(
            self.system(),
            self.user(),
            self.descriptor.settings.max_tokens,
            self.descriptor.settings.temperature as f32,
        )
    }
}

/// Pass-specific instructions
pub fn instructions(kind: PassKind) -> &'static str {
    match kind {
        PassKind::ExecutiveSummary => EXECUTIVE_SUMMARY,
        PassKind::KeyHighlights => KEY_HIGHLIGHTS,
        PassKind::FeatureArticles => FEATURE_ARTICLES,
        PassKind::SupportingContent => SUPPORTING_CONTENT,
        PassKind::StrategicInsights => STRATEGIC_INSIGHTS,
    }
}

const EXECUTIVE_SUMMARY: &str = r#"Task: Executive Summary

Write a 2-3 paragraph summary of the content focusing on:
- What this content covers
- Why it matters for enterprise IT decision makers
- Key business and technical value

Return plain prose only, without headings or bullet points."#;

const KEY_HIGHLIGHTS: &str = r#"Task: Key Highlights

List 5-7 of the most important points in the content. For each, provide:
- title: Short impactful title (5-8 words)
- description: 1-2 line explanation of impact and relevance

Output format (JSON array only, no additional text):
[
  {"title": "...", "description": "..."}
]"#;

const FEATURE_ARTICLES: &str = r#"Task: Feature Articles

Identify 2-4 major topics that deserve a deep dive. For each, provide:
- title: Section title
- context: Problem statement or background
- key_ideas: Main architectural or technical concepts
- benefits: Business and technical benefits
- best_practices: Recommended practices
- call_to_action: Concrete next step

Output format (JSON array only, no additional text):
[
  {"title": "...", "context": "...", "key_ideas": "...", "benefits": "...",
   "best_practices": "...", "call_to_action": "..."}
]"#;

const SUPPORTING_CONTENT: &str = r#"Task: Supporting Content

From the content, collect:
- quick_bites: 3-5 short updates, tips or minor announcements (1-2 sentences each)
- action_items: concrete next steps, as an object with three arrays:
  engineering_teams (developers and engineers), architecture_teams (architects
  and strategy teams) and leadership (decision makers)
- technologies: every technology, tool, platform and service mentioned
- architectures: key architectures or design patterns, each with name,
  description, components (array) and use_case
- best_practices: 4-6 recommendations made in the content
- diagram_suggestions: 3-4 technical diagrams that would help explain the
  content, each with type ("architecture" | "workflow" | "integration" |
  "security"), title, purpose, elements (array) and description

Output format (one JSON object only, no additional text):
{
  "quick_bites": [], "action_items": {"engineering_teams": [],
  "architecture_teams": [], "leadership": []}, "technologies": [],
  "architectures": [], "best_practices": [], "diagram_suggestions": []
}"#;

const STRATEGIC_INSIGHTS: &str = r#"Task: Strategic Insights

Assess the content from a leadership perspective:
- business_impact: the "so what" for the business, in 2-3 sentences
- risks: risks raised or implied
- opportunities: opportunities raised or implied

Output format (one JSON object only, no additional text):
{"business_impact": "...", "risks": ["..."], "opportunities": ["..."]}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PassTable;
    use crate::passes::pass_plan;

    fn context(text: &str) -> PassContext {
        PassContext {
            text: text.to_string(),
            chunk_count: 1,
            truncated: false,
        }
    }

    #[test]
    fn test_request_carries_pass_settings() {
        let plan = pass_plan(&PassTable::default());
        let ctx = context("Kubernetes migration notes");
        let request = PromptBuilder::new(&plan[2], &ctx).build();

        assert_eq!(request.max_tokens, 2500);
        assert_eq!(request.temperature, 0.5);
        assert!(request.system.starts_with(ANALYST_PREAMBLE));
        assert!(request.system.contains("Task: Feature Articles"));
        assert!(request.user.contains("Kubernetes migration notes"));
        assert!(request.user.ends_with("Feature Articles:"));
    }

    #[test]
    fn test_each_title_names_exactly_one_pass() {
        for kind in PassKind::ALL {
            let owners: Vec<PassKind> = PassKind::ALL
                .into_iter()
                .filter(|other| {
                    let system = format!("{}\n\n{}", ANALYST_PREAMBLE, instructions(*other));
                    system.to_lowercase().contains(&kind.title().to_lowercase())
                })
                .collect();
            assert_eq!(owners, vec![kind], "title {:?} is ambiguous", kind.title());
        }
    }

    #[test]
    fn test_json_passes_ask_for_json() {
        for kind in [
            PassKind::KeyHighlights,
            PassKind::FeatureArticles,
            PassKind::SupportingContent,
            PassKind::StrategicInsights,
        ] {
            assert!(instructions(kind).contains("JSON"));
        }
        assert!(!instructions(PassKind::ExecutiveSummary).contains("JSON"));
    }
}
