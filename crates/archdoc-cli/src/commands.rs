use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use archdoc_export::ExportStrategy;
use archdoc_model::AnalysisResult;
use archdoc_render::to_svg;
use archdoc_session::{DeploymentConfig, ExportCoordinator, SessionState, View};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use archdoc_cli::settings::load_config;
use archdoc_cli::summary::print_document_summary;

use crate::cli::{ExportArgs, GenerateArgs, RenderArgs, StrategyArg};

pub async fn run_generate(args: &GenerateArgs, config_path: Option<&Path>) -> Result<()> {
    let config = deployment(config_path, &args.export)?;
    let mut coordinator =
        ExportCoordinator::from_config(&config).context("invalid deployment config")?;

    let spinner = spinner(format!("Analyzing {}", args.source_path));
    let submitted = coordinator.submit(&args.source_path).await;
    spinner.finish_and_clear();
    show(submitted?, &args.export)?;

    export(&mut coordinator, &args.export).await
}

pub async fn run_render(args: &RenderArgs, config_path: Option<&Path>) -> Result<()> {
    let config = deployment(config_path, &args.export)?;
    let bytes = fs::read(&args.payload)
        .with_context(|| format!("failed to read {}", args.payload.display()))?;
    let result = AnalysisResult::from_slice(&bytes)
        .with_context(|| format!("invalid payload in {}", args.payload.display()))?;

    let mut coordinator =
        ExportCoordinator::from_config(&config).context("invalid deployment config")?;
    let label = args.payload.display().to_string();
    show(coordinator.open(&label, result)?, &args.export)?;

    export(&mut coordinator, &args.export).await
}

fn deployment(config_path: Option<&Path>, args: &ExportArgs) -> Result<DeploymentConfig> {
    let mut config = load_config(config_path)?;
    if let Some(strategy) = args.strategy {
        config.strategy = match strategy {
            StrategyArg::Client => ExportStrategy::Client,
            StrategyArg::Server => ExportStrategy::Server,
        };
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = Some(dir.clone());
    }
    info!(
        analyzer = %config.analyzer_base_url,
        strategy = %config.strategy,
        "deployment configured"
    );
    Ok(config)
}

/// Print the viewing state, or fail with the banner message.
fn show(state: &SessionState, args: &ExportArgs) -> Result<()> {
    let view: &View = match state {
        SessionState::Viewing(view) => view,
        SessionState::Error { message } => bail!("{message}"),
        other => bail!("unexpected session state: {}", other.name()),
    };
    print_document_summary(view.document());
    if let Some(path) = &args.svg {
        write_svg(view, path)?;
        println!("Document view: {}", path.display());
    }
    Ok(())
}

fn write_svg(view: &View, path: &Path) -> Result<()> {
    let svg = to_svg(view.rendered())?;
    fs::write(path, svg).with_context(|| format!("failed to write {}", path.display()))
}

async fn export(coordinator: &mut ExportCoordinator, args: &ExportArgs) -> Result<()> {
    if args.no_export {
        return Ok(());
    }
    let strategy = coordinator.session().strategy();
    let spinner = spinner(format!("Generating PDF ({strategy} export)"));
    let outcome = coordinator.export().await;
    spinner.finish_and_clear();
    match outcome {
        Some(Ok(delivery)) => {
            match delivery.page_count {
                Some(pages) => println!(
                    "PDF saved: {} ({pages} page{}, {} bytes)",
                    delivery.path.display(),
                    if pages == 1 { "" } else { "s" },
                    delivery.bytes
                ),
                None => println!(
                    "PDF saved: {} ({} bytes)",
                    delivery.path.display(),
                    delivery.bytes
                ),
            }
            Ok(())
        }
        Some(Err(message)) => bail!("{message}"),
        None => bail!("nothing to export"),
    }
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
