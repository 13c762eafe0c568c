//! Editorial pass over a realistic record

use crate::*;
use gazette_domain::{ActionItems, AggregateKnowledge, FeatureArticle, Highlight, StrategicInsights};
use gazette_llm::MockProvider;

const SOURCE: &str = "\
Alice: We moved the billing monolith onto Kubernetes last quarter.
Bob: Latency dropped by a third and cloud costs fell 30%.
Alice: Next we want a cost dashboard and a change review process.";

fn extracted() -> AggregateKnowledge {
    AggregateKnowledge {
        executive_summary: "basically, the billing monolith moved onto kubernetes. latency dropped and costs fell 30%."
            .to_string(),
        key_highlights: vec![Highlight {
            title: "costs down 30% on kubernetes".to_string(),
            description: "the move kinda paid for itself".to_string(),
        }],
        feature_articles: vec![FeatureArticle {
            title: "moving the monolith".to_string(),
            context: "billing ran on VMs".to_string(),
            call_to_action: "plan the next service".to_string(),
            ..Default::default()
        }],
        action_items: ActionItems {
            engineering_teams: vec!["a cost dashboard tool".to_string()],
            architecture_teams: vec!["change review process".to_string()],
            leadership: vec!["Fund the next migration".to_string()],
        },
        strategic_insights: StrategicInsights {
            business_impact: "lower run costs".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_full_edit() {
    let editor = Editor::new(EditorConfig::default()).unwrap();
    let mut knowledge = extracted();

    let outcome = editor.edit(&mut knowledge, SOURCE);

    assert_eq!(
        knowledge.executive_summary,
        "The billing monolith moved onto kubernetes. Latency dropped and costs fell 30%.\n\nLower run costs."
    );
    assert_eq!(knowledge.key_highlights[0].title, "Costs Down 30% on Kubernetes");
    assert_eq!(
        knowledge.key_highlights[0].description,
        "The move somewhat paid for itself."
    );
    assert_eq!(knowledge.feature_articles[0].title, "Moving the Monolith");
    assert_eq!(knowledge.feature_articles[0].context, "Billing ran on VMs.");
    assert_eq!(
        knowledge.action_items.engineering_teams,
        vec!["Evaluate a cost dashboard tool."]
    );
    assert_eq!(
        knowledge.action_items.architecture_teams,
        vec!["Establish change review process."]
    );
    assert_eq!(knowledge.action_items.leadership, vec!["Fund the next migration."]);

    let refinement = outcome.refinement.unwrap();
    assert_eq!(refinement.actions_prefixed, 2);

    let enhancement = outcome.enhancement.unwrap();
    assert_eq!(enhancement.changes, vec!["executive_summary"]);

    let review = outcome.review.unwrap();
    assert!(review.is_accurate, "unexpected issues: {:?}", review.issues);
    assert_eq!(review.confidence_score, 1.0);
}

#[test]
fn test_review_sees_refined_text() {
    let editor = Editor::new(EditorConfig::default()).unwrap();
    let mut knowledge = extracted();
    knowledge.quick_bites = vec!["Docker images might shrink".to_string()];

    let outcome = editor.edit(&mut knowledge, SOURCE);
    let review = outcome.review.unwrap();

    assert!(!review.is_accurate);
    assert_eq!(review.terminology_issues, vec!["docker"]);
    assert_eq!(review.speculative_content.len(), 1);
    assert_eq!(review.issues.len(), 2);
    assert_eq!(review.recommendations.len(), 3);
}

#[test]
fn test_toggles() {
    let mut knowledge = extracted();
    let original = knowledge.clone();

    let editor = Editor::new(EditorConfig::disabled()).unwrap();
    let outcome = editor.edit(&mut knowledge, SOURCE);
    assert_eq!(outcome, EditorialOutcome::default());
    assert_eq!(knowledge, original);

    let editor = Editor::new(EditorConfig::permissive()).unwrap();
    let outcome = editor.edit(&mut knowledge, SOURCE);
    assert!(outcome.refinement.is_some());
    assert!(outcome.enhancement.is_some());
    assert!(outcome.review.is_none());
}

#[test]
fn test_headlines_enhanced_after_refinement() {
    let editor = Editor::new(EditorConfig::default()).unwrap();
    let mut knowledge = extracted();
    knowledge.key_highlights[0].title = "use of kubernetes".to_string();
    knowledge.feature_articles[0].title = "cost dashboard implementation".to_string();
    knowledge.action_items.engineering_teams = vec!["review and update the runbook".to_string()];

    let outcome = editor.edit(&mut knowledge, SOURCE);

    assert_eq!(
        knowledge.key_highlights[0].title,
        "Kubernetes Enables Strategic Decision-Making"
    );
    assert_eq!(
        knowledge.feature_articles[0].title,
        "How Cost Dashboard Transforms Operations"
    );
    assert_eq!(
        knowledge.action_items.engineering_teams,
        vec!["Update the runbook."]
    );

    let enhancement = outcome.enhancement.unwrap();
    assert_eq!(enhancement.headlines_rewritten, 2);
    assert_eq!(enhancement.prefixes_removed, 1);
}

#[tokio::test]
async fn test_edit_with_fact_check() {
    let editor = Editor::new(EditorConfig::default()).unwrap();
    let provider = MockProvider::new("");
    provider.add_response(
        FACT_CHECK_SYSTEM,
        "Claim: costs fell 30% on Kubernetes alone. The source credits the whole migration.",
    );
    let mut knowledge = extracted();

    let outcome = editor.edit_with(&mut knowledge, SOURCE, &provider).await;

    let review = outcome.review.unwrap();
    assert!(!review.is_accurate);
    assert!(matches!(
        review.issues.as_slice(),
        [ReviewIssue::FactualValidation { .. }]
    ));
    assert!(provider.requests()[0].user.contains("Lower run costs."));
    assert!(outcome.refinement.is_some());
}

#[tokio::test]
async fn test_edit_with_skips_call_when_review_is_off() {
    let editor = Editor::new(EditorConfig::permissive()).unwrap();
    let provider = MockProvider::new("Claim 1 is made up.");
    let mut knowledge = extracted();

    let outcome = editor.edit_with(&mut knowledge, SOURCE, &provider).await;

    assert!(outcome.review.is_none());
    assert_eq!(provider.call_count(), 0);
}

#[test]
fn test_outcome_serializes() {
    let editor = Editor::new(EditorConfig::default()).unwrap();
    let mut knowledge = extracted();
    let outcome = editor.edit(&mut knowledge, SOURCE);

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["review"]["is_accurate"], true);
    assert_eq!(json["enhancement"]["headlines_rewritten"], 0);
    assert!(json["refinement"]["changes"].as_array().unwrap().len() > 5);
}
