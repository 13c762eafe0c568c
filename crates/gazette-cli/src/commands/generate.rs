//! Generate command implementation.

use crate::cli::GenerateArgs;
use crate::config::{Config, ProviderKind};
use crate::error::Result;
use crate::input::read_documents;
use crate::output::{write_newsletter, FailedPass, Formatter, Newsletter};
use chrono::Utc;
use gazette_domain::{AggregateKnowledge, CompletionProvider, RunId, SourceDocument};
use gazette_editor::{Editor, EditorialOutcome, FACT_CHECK_SYSTEM};
use gazette_extractor::{ExtractionRun, Extractor, ExtractorConfig, PassKind};
use gazette_llm::{MockProvider, OllamaProvider, OpenAiProvider};
use std::path::PathBuf;
use tracing::{info, warn};

/// What one extraction produced.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Run identifier
    pub run_id: RunId,

    /// Model that served the passes
    pub model: String,

    /// The merged record
    pub knowledge: AggregateKnowledge,

    /// Passes that fell back to an empty result
    pub failed_passes: Vec<FailedPass>,

    /// Interrupted before every pass ran
    pub partial: bool,
}

/// Execute the generate command.
///
/// Returns the path of the written newsletter.
pub async fn execute_generate(
    args: GenerateArgs,
    mut config: Config,
    formatter: &Formatter,
) -> Result<PathBuf> {
    config.apply_args(&args);
    config.validate()?;

    let document = read_documents(&args.files)?;
    info!(
        sources = document.sources.len(),
        words = document.word_count(),
        provider = ?config.provider.kind,
        model = %config.provider.model,
        "Generating newsletter"
    );

    let editor = Editor::new(config.editor.clone())?;

    let provider = &config.provider;
    let (extraction, editorial) = match provider.kind {
        ProviderKind::Openai => {
            let mut client = OpenAiProvider::from_env_var(&provider.api_key_env, &provider.model)?;
            if let Some(base_url) = &provider.base_url {
                client = client.with_base_url(base_url);
            }
            produce(client, &config.extractor, &editor, &document).await?
        }
        ProviderKind::Ollama => {
            let endpoint = provider
                .base_url
                .as_deref()
                .unwrap_or(gazette_llm::ollama::DEFAULT_ENDPOINT);
            let client = OllamaProvider::new(endpoint, &provider.model)?;
            produce(client, &config.extractor, &editor, &document).await?
        }
        ProviderKind::Mock => {
            produce(demo_provider(), &config.extractor, &editor, &document).await?
        }
    };

    let Extraction {
        run_id,
        model,
        knowledge,
        failed_passes,
        partial,
    } = extraction;

    let newsletter = Newsletter {
        title: args.title,
        subtitle: args.subtitle,
        generated_at: Utc::now(),
        run_id,
        model,
        knowledge,
        editorial,
        failed_passes,
        partial,
    };
    let path = write_newsletter(&config.output.directory, &newsletter)?;

    println!("{}", formatter.summary_table(&newsletter));
    for failure in &newsletter.failed_passes {
        println!(
            "{}",
            formatter.warning(&format!("{} fell back to empty: {}", failure.pass, failure.error))
        );
    }
    if let Some(line) = formatter.review_line(&newsletter.editorial) {
        println!("{}", line);
    }
    if newsletter.partial {
        println!("{}", formatter.warning("Run interrupted; output is partial"));
    }
    println!("{}", formatter.success(&format!("Wrote {}", path.display())));

    Ok(path)
}

/// Extract the record, then edit it with the same provider behind the
/// fact check.
///
/// An interrupted run is edited without the fact check.
pub async fn produce<P: CompletionProvider>(
    provider: P,
    config: &ExtractorConfig,
    editor: &Editor,
    document: &SourceDocument,
) -> Result<(Extraction, EditorialOutcome)> {
    let extractor = Extractor::new(provider, config.clone());
    let mut extraction = extract(&extractor, document).await?;

    let editorial = if extraction.partial {
        editor.edit(&mut extraction.knowledge, &document.text)
    } else {
        editor
            .edit_with(&mut extraction.knowledge, &document.text, extractor.provider())
            .await
    };
    Ok((extraction, editorial))
}

/// Run the extractor over a document.
///
/// Ctrl-C stops the run; passes that already finished are kept.
pub async fn extract<P: CompletionProvider>(
    extractor: &Extractor<P>,
    document: &SourceDocument,
) -> Result<Extraction> {
    let model = extractor.provider().model_name().to_string();
    let mut run = ExtractionRun::new();

    let interrupted = tokio::select! {
        result = extractor.generate_into(&mut run, document) => {
            result?;
            false
        }
        _ = tokio::signal::ctrl_c() => true,
    };

    if interrupted {
        warn!(
            completed = run.state().completed_passes(),
            "Interrupted, keeping completed passes"
        );
    }

    let failed_passes = run.failures().iter().map(FailedPass::from).collect();
    Ok(Extraction {
        run_id: run.id(),
        model,
        partial: !run.is_complete(),
        failed_passes,
        knowledge: run.into_knowledge(),
    })
}

/// Canned answers for every pass, for trying the pipeline offline
pub fn demo_provider() -> MockProvider {
    let provider = MockProvider::new("");
    for kind in PassKind::ALL {
        provider.add_response(format!("Task: {}", kind.title()), demo_response(kind));
    }
    provider.add_response(FACT_CHECK_SYSTEM, "No issues found.");
    provider
}

fn demo_response(kind: PassKind) -> &'static str {
    match kind {
        PassKind::ExecutiveSummary => {
            "The platform team moved the billing service onto managed infrastructure. \
             Costs fell and releases sped up."
        }
        PassKind::KeyHighlights => {
            r#"[{"title": "Billing service migrated", "description": "The move finished ahead of plan."}]"#
        }
        PassKind::FeatureArticles => {
            r#"[{"title": "Inside the billing migration", "context": "Billing ran on aging VMs.", "key_ideas": "Move in slices behind a router.", "benefits": "Lower run costs.", "best_practices": "Migrate one service at a time.", "call_to_action": "Plan the next service."}]"#
        }
        PassKind::SupportingContent => {
            r#"{"quick_bites": ["Release notes now ship with every deploy"], "action_items": {"engineering_teams": ["Review the migration runbook"], "architecture_teams": [], "leadership": ["Fund the next migration"]}, "technologies": [], "architectures": [], "best_practices": ["Migrate in small slices"], "diagram_suggestions": []}"#
        }
        PassKind::StrategicInsights => {
            r#"{"business_impact": "Lower run costs free budget for new work.", "risks": ["Skills gap on the new platform"], "opportunities": ["Repeat the approach for other services"]}"#
        }
    }
}
