//! # pifgen: PIF drafting pipeline CLI
//!
//! Drafts, verifies, persists, and renders the sections of a GEF Project
//! Identification Form for one country. `--save-only` stops after
//! persisting the run output; `--render-only` reuses a persisted run
//! output to iterate on rendering alone.

use anyhow::Result;
use clap::Parser;
use pifgen::context::country_key;
use pifgen::providers::ai::openai::OpenAiProvider;
use pifgen::sections::SECTIONS;
use pifgen::{AppConfig, DraftPipeline, PlaceholderMode, RunOutput};
use pifgen_render::markdown::assemble_markdown;
use pifgen_render::pdf::PdfRenderer;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Country to draft the PIF for
    #[arg(default_value = "Cuba")]
    country: String,

    /// Persist the run output and skip rendering
    #[arg(long, conflicts_with = "render_only")]
    save_only: bool,

    /// Skip generation and render a previously persisted run output
    #[arg(long)]
    render_only: bool,

    /// Override the model name from the environment
    #[arg(long)]
    model: Option<String>,

    /// Override the output directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Send {Country} placeholders in instruction text to the model
    /// verbatim instead of substituting the country name
    #[arg(long)]
    verbatim_placeholders: bool,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    // Resolve configuration before any network call; a missing credential
    // exits here with a descriptive message.
    let mut config = AppConfig::from_env()?;
    if let Some(model) = cli.model.clone() {
        config.model = model;
    }
    if let Some(out_dir) = cli.out_dir.clone() {
        config.out_dir = out_dir;
    }
    if cli.verbatim_placeholders {
        config.placeholder_mode = PlaceholderMode::Verbatim;
    }

    let provider = OpenAiProvider::new(&config)?;
    let pipeline = DraftPipeline::new(&provider, &config);

    let run = if cli.render_only {
        let path = RunOutput::path_for(&config.out_dir, &cli.country);
        let run = RunOutput::load(&path)?;
        println!(
            "Loaded persisted run output for {} from {} ({} sections).",
            run.country,
            path.display(),
            run.sections.len()
        );
        run
    } else {
        println!(
            "Drafting and verifying {} sections for {} with model '{}'...",
            SECTIONS.len(),
            cli.country,
            config.model
        );
        let started = Instant::now();
        let verified = pipeline.generate(&cli.country).await?;
        println!(
            "Generation finished in {:.1}s.",
            started.elapsed().as_secs_f32()
        );

        let (run, path) = pipeline.persist(&cli.country, verified)?;
        println!("Persisted run output to {}.", path.display());
        run
    };

    if cli.save_only {
        println!("--save-only set; skipping rendering.");
        return Ok(());
    }

    let started = Instant::now();
    let stem = config
        .out_dir
        .join(format!("{}_PIF", country_key(&cli.country)));
    let pdf_path = stem.with_extension("pdf");
    let md_path = stem.with_extension("md");

    let mut renderer = PdfRenderer::new(&format!("GEF-8 PIF — {}", run.country))?;
    renderer.render_run(&run);
    renderer.save(&pdf_path)?;
    std::fs::write(&md_path, assemble_markdown(&run))?;
    pipeline.mark_rendered();

    println!(
        "Rendered {} and {} in {:.1}s.",
        pdf_path.display(),
        md_path.display(),
        started.elapsed().as_secs_f32()
    );
    Ok(())
}
