//! Runs refinement, enhancement and review over a finished record

use crate::{
    AccuracyReview, EditorConfig, EditorError, EnhancementReport, Enhancer, RefinementReport,
    Refiner, Reviewer,
};
use gazette_domain::{AggregateKnowledge, CompletionProvider};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What the editorial pass did
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorialOutcome {
    /// Present when refinement ran
    pub refinement: Option<RefinementReport>,

    /// Present when enhancement ran
    #[serde(default)]
    pub enhancement: Option<EnhancementReport>,

    /// Present when review ran
    pub review: Option<AccuracyReview>,
}

/// Applies the configured editorial steps
///
/// Refinement runs first, then enhancement, then the review, so the review
/// sees the text that will be published.
pub struct Editor {
    config: EditorConfig,
    refiner: Refiner,
    enhancer: Enhancer,
    reviewer: Reviewer,
}

impl Editor {
    /// Create an editor with the given configuration
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        Ok(Self {
            refiner: Refiner::new()?,
            enhancer: Enhancer::new()?,
            reviewer: Reviewer::new(config.clone())?,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Edit the record in place and review it against the source
    pub fn edit(&self, knowledge: &mut AggregateKnowledge, source: &str) -> EditorialOutcome {
        let mut outcome = self.polish(knowledge);
        outcome.review = self
            .config
            .review
            .then(|| logged(self.reviewer.review(knowledge, source)));
        outcome
    }

    /// Like [`Editor::edit`], with the model-backed fact check in the review
    pub async fn edit_with<P: CompletionProvider>(
        &self,
        knowledge: &mut AggregateKnowledge,
        source: &str,
        provider: &P,
    ) -> EditorialOutcome {
        let mut outcome = self.polish(knowledge);
        if self.config.review {
            let review = self.reviewer.review_with(knowledge, source, provider).await;
            outcome.review = Some(logged(review));
        }
        outcome
    }

    fn polish(&self, knowledge: &mut AggregateKnowledge) -> EditorialOutcome {
        let refinement = self.config.refine.then(|| {
            let report = self.refiner.refine(knowledge);
            debug!(changes = ?report.changes, "Refinement details");
            info!(
                "Refined {} fields, prefixed {} action items",
                report.changes.len(),
                report.actions_prefixed
            );
            report
        });

        let enhancement = self.config.enhance.then(|| {
            let report = self.enhancer.enhance(knowledge);
            debug!(changes = ?report.changes, "Enhancement details");
            info!(
                "Enhanced {} fields, rewrote {} headlines",
                report.changes.len(),
                report.headlines_rewritten
            );
            report
        });

        EditorialOutcome {
            refinement,
            enhancement,
            review: None,
        }
    }
}

fn logged(review: AccuracyReview) -> AccuracyReview {
    info!(
        "Review: accurate={}, confidence={:.2}, issues={}",
        review.is_accurate,
        review.confidence_score,
        review.issues.len()
    );
    review
}
