use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use forfettari_core::config::{resolve_with_base, Config};
use forfettari_core::{Error, Index, RetrievedChunk, Retriever};
use forfettari_intent::context::build_prompt;
use forfettari_intent::{Answer, MergePolicy, QueryEngine};
use forfettari_text::{store, TfIdfSearchEngine};

#[derive(Parser, Debug)]
#[command(name = "forfettari", version, about = "Query the forfettario regulation index")]
struct Cli {
    /// Index file to load (defaults to data.index_file)
    #[arg(long, global = true)]
    index_file: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Raw TF-IDF search, no intent handling
    Search {
        query: String,
        #[arg(long)]
        top_k: Option<usize>,
        #[arg(long)]
        min_score: Option<f64>,
    },
    /// Canned answer, or the grounded prompt for the completion layer
    Ask {
        question: String,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// `None` when the index has not been built yet.
fn load_index(path: &Path) -> anyhow::Result<Option<Index>> {
    match store::load(path) {
        Ok(index) => Ok(Some(index)),
        Err(Error::IndexNotFound(_)) => Ok(None),
        Err(e) => Err(e).context("loading index"),
    }
}

fn print_hits(hits: &[RetrievedChunk]) {
    for (i, hit) in hits.iter().enumerate() {
        println!("\n  {}. score={:.4}  source={}  chunk={}", i + 1, hit.score, hit.source, hit.chunk_id);
        println!("     📝 {}", hit.text);
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;
    let data = config.data()?;
    let retrieval = config.retrieval()?;
    let base = std::env::current_dir().context("resolving working directory")?;
    let index_file = match cli.index_file.as_deref() {
        Some(path) => resolve_with_base(&base, path),
        None => data.index_path(&base),
    };

    let Some(index) = load_index(&index_file)? else {
        eprintln!("Index not built yet: {} is missing.", index_file.display());
        eprintln!("💡 Build it first with: cargo run --bin forfettari-indexer");
        return Ok(ExitCode::from(2));
    };
    info!(path = %index_file.display(), chunks = index.len(), "index ready");

    // Loaded once; every query below reads the same immutable index.
    let engine = TfIdfSearchEngine::new(index);

    match cli.command {
        Command::Search { query, top_k, min_score } => {
            debug!(%query, ?top_k, ?min_score, "raw search");
            let hits = engine.search(
                &query,
                top_k.unwrap_or(retrieval.search_top_k),
                min_score.unwrap_or(retrieval.search_min_score),
            );
            println!("🔍 Found {} results for: \"{}\"", hits.len(), query);
            print_hits(&hits);
        }
        Command::Ask { question, json } => {
            let query_engine = QueryEngine::new(engine, MergePolicy::from(&retrieval));
            let answer = query_engine.answer(&question);
            debug!(canned = matches!(answer, Answer::Canned(_)), "answered");
            if json {
                let payload = match &answer {
                    Answer::Canned(_) => serde_json::to_value(&answer)?,
                    Answer::Retrieved { chunks } => serde_json::json!({
                        "answer": &answer,
                        "prompt": build_prompt(&question, chunks),
                    }),
                };
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(ExitCode::SUCCESS);
            }
            match answer {
                Answer::Canned(canned) => {
                    println!("{}", canned.text);
                    println!("\nFonti:");
                    for citation in &canned.citations {
                        println!("  - {citation}");
                    }
                }
                Answer::Retrieved { chunks } => {
                    if chunks.is_empty() {
                        println!("Nessun passaggio pertinente trovato per: \"{question}\"");
                    }
                    let prompt = build_prompt(&question, &chunks);
                    println!("[system]\n{}\n\n[user]\n{}", prompt.system, prompt.user);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_index_is_reported_not_raised() {
        let tmp = TempDir::new().unwrap();
        assert!(load_index(&tmp.path().join("index.json")).unwrap().is_none());
    }

    #[test]
    fn corrupt_index_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_index(&path).is_err());
    }

    #[test]
    fn saved_index_loads() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.json");
        store::save(&Index::default(), &path).unwrap();
        assert_eq!(load_index(&path).unwrap(), Some(Index::default()));
    }
}
