use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use crate::{Error, QueryParams, Result, ReviewId};

/// Flat, append-only cache directory.
///
/// Review pages live in `<id>.html`, result pages in `<hash>.json` where `<hash>`
/// is [`QueryParams::hash`] of the exact params that produced the page.
/// Entries are never overwritten by readers and never expire.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn review_path(&self, review: &ReviewId) -> PathBuf {
        self.dir.join(format!("{review}.html"))
    }

    pub fn results_path(&self, params: &QueryParams) -> PathBuf {
        self.dir.join(format!("{}.json", params.hash()))
    }

    pub async fn has_review(&self, review: &ReviewId) -> Result<bool> {
        Ok(fs::try_exists(self.review_path(review)).await?)
    }

    pub async fn read_review(&self, review: &ReviewId) -> Result<Option<String>> {
        read_optional(&self.review_path(review)).await
    }

    pub async fn write_review(&self, review: &ReviewId, html: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.review_path(review), html).await?;
        debug!(%review, "cached review page");
        Ok(())
    }

    /// Review IDs of a cached results page. A file that isn't a JSON list of
    /// IDs is an error, never an empty page.
    pub async fn read_results(&self, params: &QueryParams) -> Result<Option<Vec<ReviewId>>> {
        let path = self.results_path(params);
        let Some(content) = read_optional(&path).await? else {
            return Ok(None);
        };
        let reviews =
            serde_json::from_str(&content).map_err(|source| Error::Decode { path, source })?;
        Ok(Some(reviews))
    }

    pub async fn write_results(&self, params: &QueryParams, reviews: &[ReviewId]) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(reviews)?;
        fs::write(self.results_path(params), json).await?;
        Ok(())
    }

    /// Every review with a cached page, in numeric order.
    pub async fn reviews(&self) -> Result<Vec<ReviewId>> {
        let mut reviews = Vec::new();
        for path in self.files_with_extension("html").await? {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match ReviewId::parse(stem) {
                Ok(review) => reviews.push(review),
                Err(e) => warn!("Skipping {}: {e}", path.display()),
            }
        }
        reviews.sort();
        Ok(reviews)
    }

    /// Removes every cached results page. Review pages are kept.
    pub async fn clear_results(&self) -> Result<usize> {
        let files = self.files_with_extension("json").await?;
        for file in &files {
            fs::remove_file(file).await?;
        }
        Ok(files.len())
    }

    async fn files_with_extension(&self, extension: &str) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(files),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(extension) {
                files.push(path);
            }
        }
        Ok(files)
    }
}

async fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(id: &str) -> ReviewId {
        ReviewId::parse(id).unwrap()
    }

    #[tokio::test]
    async fn missing_entries_read_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path().join("db"));

        assert_eq!(cache.read_review(&id("1")).await.unwrap(), None);
        assert_eq!(cache.read_results(&QueryParams::new()).await.unwrap(), None);
        assert!(cache.reviews().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn results_are_keyed_by_params() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path());
        let page0: QueryParams = [("do", "suchen")].into_iter().collect();
        let page1 = page0.with("start", "50");

        cache.write_results(&page1, &[id("7"), id("8")]).await.unwrap();

        assert_eq!(cache.read_results(&page0).await.unwrap(), None);
        assert_eq!(
            cache.read_results(&page1).await.unwrap(),
            Some(vec![id("7"), id("8")])
        );
    }

    #[tokio::test]
    async fn malformed_results_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path());
        let params = QueryParams::new();
        std::fs::write(cache.results_path(&params), "{not json").unwrap();

        let res = cache.read_results(&params).await;
        assert!(matches!(res, Err(Error::Decode { .. })));
    }

    #[tokio::test]
    async fn clear_results_keeps_review_pages() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path());
        let params: QueryParams = [("do", "suchen")].into_iter().collect();

        cache.write_review(&id("12"), "<html></html>").await.unwrap();
        cache.write_review(&id("3"), "<html></html>").await.unwrap();
        cache.write_results(&params, &[id("12")]).await.unwrap();
        cache
            .write_results(&params.with("start", "50"), &[id("3")])
            .await
            .unwrap();

        assert_eq!(cache.clear_results().await.unwrap(), 2);
        assert_eq!(cache.read_results(&params).await.unwrap(), None);
        assert_eq!(cache.reviews().await.unwrap(), vec![id("3"), id("12")]);
    }
}
