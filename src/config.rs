use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::{
    Error, Result, BASE_URL, DEFAULT_FROM, DEFAULT_TIMER_SECS, DEFAULT_USER_AGENT, DISCLAIMER,
    RESULTS_PATTERN,
};

/// Settings shared by every component. Built once and handed out by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub cache_dir: PathBuf,
    pub index_file: PathBuf,
    pub db_file: PathBuf,

    pub base_url: String,
    /// Paid before every request.
    pub timer: Duration,
    pub from: String,
    pub user_agent: String,

    /// Size of the worker pool used by the index and database builders.
    pub workers: usize,
    /// Drop reviews with an ISBN that fails its checksum while indexing.
    pub strict_isbn: bool,
    /// Known-bad review IDs and the IDs they should be replaced with.
    pub redirects: HashMap<String, String>,

    pub disclaimer: String,
    pub results_pattern: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(".db"),
            index_file: PathBuf::from("index.json"),
            db_file: PathBuf::from("database.json"),
            base_url: BASE_URL.to_string(),
            timer: Duration::from_secs_f64(DEFAULT_TIMER_SECS),
            from: DEFAULT_FROM.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            workers: default_workers(),
            strict_isbn: false,
            redirects: HashMap::new(),
            disclaimer: DISCLAIMER.to_string(),
            results_pattern: RESULTS_PATTERN.to_string(),
        }
    }
}

impl Config {
    /// Reads a JSON object of `bad id -> canonical id` pairs.
    pub fn load_redirects(path: &Path) -> Result<HashMap<String, String>> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
