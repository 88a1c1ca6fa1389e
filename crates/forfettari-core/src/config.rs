//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `FORFETTARI_*`
//! env vars (`__` separates nested keys, e.g. `FORFETTARI_CHUNKING__OVERLAP`).
//! Every section has defaults, so a missing file or section is not an error.
//! `expand_path` expands `~` and `${VAR}` in configured paths, and
//! `resolve_with_base` anchors relative ones to a known directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

/// Where the corpus lives and where the index is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub corpus_dir: String,
    pub index_file: String,
    /// Concatenation of every document produced by text extraction; never indexed.
    pub aggregate_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            corpus_dir: "testi_estratti_2026".to_string(),
            index_file: "rag_index/index.json".to_string(),
            aggregate_file: "tutti_i_documenti.txt".to_string(),
        }
    }
}

impl DataConfig {
    /// Corpus directory, relative entries resolved against `base`.
    pub fn corpus_path(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.corpus_dir)
    }

    /// Index file, relative entries resolved against `base`.
    pub fn index_path(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.index_file)
    }
}

/// Character-window chunking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { chunk_size: 1200, overlap: 200 }
    }
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self { chunk_size, overlap }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfiguration("chunk_size must be greater than zero".to_string()));
        }
        if self.overlap >= self.chunk_size {
            return Err(Error::InvalidConfiguration(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Fan-out and merge constants of the query layer.
///
/// Defaults are empirically tuned against the bundled corpus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub primary_top_k: usize,
    pub primary_min_score: f64,
    pub expansion_top_k: usize,
    pub expansion_min_score: f64,
    pub diverse_slots: usize,
    pub final_top_k: usize,
    /// Defaults of a bare `search` call outside the query layer.
    pub search_top_k: usize,
    pub search_min_score: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            primary_top_k: 8,
            primary_min_score: 0.06,
            expansion_top_k: 4,
            expansion_min_score: 0.05,
            diverse_slots: 4,
            final_top_k: 8,
            search_top_k: 4,
            search_min_score: 0.08,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("FORFETTARI_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    /// Build from an in-memory TOML document, without env or file layers.
    pub fn from_toml_str(toml: &str) -> anyhow::Result<Self> {
        let config = Self { figment: Figment::new().merge(Toml::string(toml)) };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn data(&self) -> anyhow::Result<DataConfig> {
        self.section("data")
    }

    pub fn chunking(&self) -> anyhow::Result<ChunkingConfig> {
        self.section("chunking")
    }

    pub fn retrieval(&self) -> anyhow::Result<RetrievalConfig> {
        self.section("retrieval")
    }

    fn section<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: DeserializeOwned + Default,
    {
        if self.figment.contains(key) { self.get(key) } else { Ok(T::default()) }
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.chunking()?.validate()?;
        let retrieval = self.retrieval()?;
        if retrieval.diverse_slots > retrieval.final_top_k {
            return Err(Error::InvalidConfiguration(format!(
                "diverse_slots ({}) cannot exceed final_top_k ({})",
                retrieval.diverse_slots, retrieval.final_top_k
            ))
            .into());
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
