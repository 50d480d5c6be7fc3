use std::collections::{BTreeMap, HashSet};

use chrono::Local;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::parse::extract_review;
use crate::results::{count_results, extract_results, results_pattern};
use crate::{
    info_time, Cache, Client, Config, Fetch, Headers, Query, QueryParams, Result, Review, ReviewId,
    RESULTS_PER_PAGE,
};

/// Ties the remote client to the cache: every page is fetched at most once.
#[derive(Debug)]
pub struct Crawler<F = Client> {
    config: Config,
    cache: Cache,
    client: F,
    results_pattern: Regex,
}

/// Outcome of a full backup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackupReport {
    pub discovered: usize,
    pub cached: usize,
    pub rejected: usize,
}

impl Crawler<Client> {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::new(&config);
        Self::with_client(config, client)
    }
}

impl<F: Fetch> Crawler<F> {
    pub fn with_client(config: Config, client: F) -> Result<Self> {
        let results_pattern = results_pattern(&config.results_pattern)?;
        Ok(Self {
            cache: Cache::new(&config.cache_dir),
            config,
            client,
            results_pattern,
        })
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    async fn call(&self, params: &QueryParams) -> Result<String> {
        self.client.fetch(params, &Headers::new()).await
    }

    /// Review IDs of one results page, from the cache or fetched and then cached.
    pub async fn fetch_results(&self, params: &QueryParams) -> Result<Vec<ReviewId>> {
        if let Some(reviews) = self.cache.read_results(params).await? {
            return Ok(reviews);
        }
        let html = self.call(params).await?;
        let reviews = extract_results(&html, &self.config.redirects)?;
        self.cache.write_results(params, &reviews).await?;
        Ok(reviews)
    }

    /// Review IDs across all results pages of a query.
    ///
    /// The first page is always requested since it carries the match count.
    /// Follow-up pages go through [`Crawler::fetch_results`]. Order is unspecified.
    pub async fn get_results(&self, params: &QueryParams) -> Result<Vec<ReviewId>> {
        let start_time = Local::now();
        let html = self.call(params).await?;

        let Some(total) = count_results(&html, &self.results_pattern) else {
            info!("Query matched no reviews");
            return Ok(Vec::new());
        };

        let first_page = extract_results(&html, &self.config.redirects)?;
        if self.cache.read_results(params).await?.is_none() {
            self.cache.write_results(params, &first_page).await?;
        }

        let mut reviews: HashSet<ReviewId> = first_page.into_iter().collect();
        let pages = total / RESULTS_PER_PAGE;
        for page in 1..=pages {
            let page_params = params.with("start", (page * RESULTS_PER_PAGE).to_string());
            debug!(page, pages, "collecting results page");
            reviews.extend(self.fetch_results(&page_params).await?);
        }

        info_time!(
            start_time,
            "Collected {} reviews from {} pages ({total} announced)",
            reviews.len(),
            pages + 1
        );
        Ok(reviews.into_iter().collect())
    }

    /// Makes sure the page of `review` is cached.
    ///
    /// Returns `false` if the remote page isn't a genuine review; such pages are never cached.
    pub async fn fetch_review(&self, review: &ReviewId) -> Result<bool> {
        if self.cache.has_review(review).await? {
            return Ok(true);
        }

        let params: QueryParams = [("id", review.as_str())].into_iter().collect();
        let html = self.call(&params).await?;
        if !html.contains(&self.config.disclaimer) {
            warn!(%review, "Not a review page, skipping");
            return Ok(false);
        }

        self.cache.write_review(review, &html).await?;
        Ok(true)
    }

    /// Parsed review, empty if it doesn't exist.
    pub async fn get_review(&self, review: &ReviewId) -> Result<Review> {
        if !self.fetch_review(review).await? {
            return Ok(Review::default());
        }
        match self.cache.read_review(review).await? {
            Some(html) => Ok(extract_review(&html, &self.config.disclaimer)),
            None => Ok(Review::default()),
        }
    }

    /// Like [`Crawler::get_review`] for user input. IDs that can't exist read as empty.
    pub async fn find_review(&self, review: &str) -> Result<Review> {
        match ReviewId::parse(review.trim()) {
            Ok(review) => self.get_review(&review).await,
            Err(e) => {
                debug!("{e}");
                Ok(Review::default())
            }
        }
    }

    pub async fn get_reviews(&self, reviews: &[ReviewId]) -> Result<BTreeMap<ReviewId, Review>> {
        let mut data = BTreeMap::new();
        for review in reviews {
            data.insert(review.clone(), self.get_review(review).await?);
        }
        Ok(data)
    }

    /// IDs of all reviews matching `query`.
    pub async fn search(&self, query: &Query) -> Result<Vec<ReviewId>> {
        self.get_results(&query.to_params()).await
    }

    /// Runs `query` and resolves every match to its review.
    pub async fn query(&self, query: &Query) -> Result<BTreeMap<ReviewId, Review>> {
        let reviews = self.search(query).await?;
        self.get_reviews(&reviews).await
    }

    /// Caches the page of every review in the remote database.
    ///
    /// `force` drops cached results pages first so the listing is crawled again,
    /// `all` includes archived reviews.
    pub async fn backup(&self, force: bool, all: bool) -> Result<BackupReport> {
        let start_time = Local::now();
        if force {
            self.clear_cache().await?;
        }

        let query = Query {
            archive: all,
            ..Default::default()
        };
        let mut reviews = self.search(&query).await?;
        reviews.sort();

        let mut report = BackupReport {
            discovered: reviews.len(),
            ..Default::default()
        };
        for (i, review) in reviews.iter().enumerate() {
            if self.fetch_review(review).await? {
                report.cached += 1;
            } else {
                report.rejected += 1;
            }
            debug!("{}/{} {review}", i + 1, reviews.len());
        }

        info_time!(
            start_time,
            "Backup done: {} discovered, {} cached, {} rejected",
            report.discovered,
            report.cached,
            report.rejected
        );
        Ok(report)
    }

    /// Removes cached results pages. Review pages are the backup and stay.
    pub async fn clear_cache(&self) -> Result<usize> {
        let removed = self.cache.clear_results().await?;
        info!("Removed {removed} cached results pages");
        Ok(removed)
    }
}
