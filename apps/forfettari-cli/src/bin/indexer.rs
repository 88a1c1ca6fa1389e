use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use forfettari_core::config::{resolve_with_base, ChunkingConfig, Config};
use forfettari_text::{store, TfIdfIndexer};

/// Build the TF-IDF index from a directory of extracted .txt documents.
#[derive(Parser, Debug)]
#[command(name = "forfettari-indexer", version)]
struct Args {
    /// Directory of plain-text documents (defaults to data.corpus_dir)
    #[arg(long)]
    corpus_dir: Option<String>,
    /// Destination index file (defaults to data.index_file)
    #[arg(long)]
    index_file: Option<String>,
    #[arg(long)]
    chunk_size: Option<usize>,
    #[arg(long)]
    overlap: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load().context("loading configuration")?;
    let data = config.data()?;
    let defaults = config.chunking()?;
    let chunking = ChunkingConfig::new(
        args.chunk_size.unwrap_or(defaults.chunk_size),
        args.overlap.unwrap_or(defaults.overlap),
    );
    let base = std::env::current_dir().context("resolving working directory")?;
    let corpus_dir = match args.corpus_dir.as_deref() {
        Some(dir) => resolve_with_base(&base, dir),
        None => data.corpus_path(&base),
    };
    let index_file = match args.index_file.as_deref() {
        Some(file) => resolve_with_base(&base, file),
        None => data.index_path(&base),
    };

    println!("Forfettari TF-IDF Indexer\n=========================");
    println!("Corpus directory: {}", corpus_dir.display());
    println!("Chunking: size={} overlap={}", chunking.chunk_size, chunking.overlap);

    let indexer = TfIdfIndexer::new(chunking)?;
    info!(corpus = %corpus_dir.display(), index = %index_file.display(), "building index");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Building index...");
    let built = indexer.build_from_directory(&corpus_dir, &data.aggregate_file);
    spinner.finish_and_clear();
    let index = built.with_context(|| format!("building index from {}", corpus_dir.display()))?;

    store::save(&index, &index_file).with_context(|| format!("saving index to {}", index_file.display()))?;

    println!("\n✅ Indice creato: {} (chunk: {})", index_file.display(), index.len());
    println!("📊 Sources: {}  Terms: {}", index.sources().len(), index.idf.len());
    println!("\n💡 To query it, use: cargo run --bin forfettari -- ask '<domanda>'");
    Ok(())
}
