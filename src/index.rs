//! Derived artifacts: the ISBN index and the review database.
//!
//! Both are rebuilt from cached review pages only, so they can be thrown away
//! at any time. Work is spread over a bounded pool of tasks; parsing runs on the
//! blocking pool since it's CPU-bound.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use tokio::fs;
use tokio::sync::{mpsc, Mutex, Semaphore};
use tokio::task::{spawn_blocking, JoinSet};
use tracing::{debug, warn};

use crate::parse::extract_review;
use crate::{info_time, isbn, Cache, Config, Error, Result, Review, ReviewId};

/// ISBN -> reviews of that book, sorted and without duplicates.
pub type Index = BTreeMap<String, Vec<ReviewId>>;
/// Parsed reviews of a single ISBN.
pub type Reviews = BTreeMap<ReviewId, Review>;
/// ISBN -> review -> fields.
pub type Database = BTreeMap<String, Reviews>;

/// Groups every cached review by ISBN and writes the index file.
///
/// Reviews without ISBN, or with an invalid one in strict mode, are skipped.
pub async fn build_index(config: &Config) -> Result<Index> {
    let start_time = Local::now();
    let cache = Cache::new(&config.cache_dir);
    let reviews = cache.reviews().await?;
    info_time!("Indexing {} cached reviews", reviews.len());

    let index = Arc::new(Mutex::new(Index::new()));
    let permits = Arc::new(Semaphore::new(config.workers.max(1)));
    let mut tasks = JoinSet::new();

    for review in reviews {
        let permit = permits.clone().acquire_owned().await?;
        let cache = cache.clone();
        let index = index.clone();
        let disclaimer = config.disclaimer.clone();
        let strict = config.strict_isbn;

        tasks.spawn(async move {
            let _permit = permit;
            let Some(html) = cache.read_review(&review).await? else {
                return Ok(());
            };
            let parsed = spawn_blocking(move || extract_review(&html, &disclaimer)).await?;

            let Some(isbn) = parsed.isbn() else {
                debug!(%review, "no ISBN, skipping");
                return Ok(());
            };
            if strict && !isbn::is_valid(isbn) {
                warn!(%review, isbn, "invalid ISBN, skipping");
                return Ok(());
            }

            let mut index = index.lock().await;
            let bucket = index.entry(isbn.to_string()).or_default();
            if !bucket.contains(&review) {
                bucket.push(review);
            }
            Ok::<(), Error>(())
        });
    }

    while let Some(task) = tasks.join_next().await {
        task??;
    }

    let mut index = std::mem::take(&mut *index.lock().await);
    for bucket in index.values_mut() {
        bucket.sort();
    }

    write_json(&config.index_file, &index).await?;
    info_time!(
        start_time,
        "Indexed {} ISBNs into {}",
        index.len(),
        config.index_file.display()
    );
    Ok(index)
}

/// Re-parses the cached pages of every indexed review and writes the database file.
///
/// Requires the index file. Reviews whose page is no longer cached are skipped.
pub async fn build_db(config: &Config) -> Result<Database> {
    let start_time = Local::now();
    let index = load_index(&config.index_file).await?;
    let cache = Cache::new(&config.cache_dir);
    info_time!("Building database for {} ISBNs", index.len());

    let (db_tx, db_rx) = mpsc::channel(256);
    let collect_handle = tokio::spawn(async move { collect_entries(db_rx).await });

    let permits = Arc::new(Semaphore::new(config.workers.max(1)));
    let mut tasks = JoinSet::new();
    for (isbn, reviews) in index {
        let permit = permits.clone().acquire_owned().await?;
        let cache = cache.clone();
        let disclaimer = config.disclaimer.clone();
        let db_tx = db_tx.clone();

        tasks.spawn(async move {
            let _permit = permit;
            let entries = parse_bucket(&cache, reviews, disclaimer).await?;
            if !entries.is_empty() {
                db_tx.send((isbn, entries)).await?;
            }
            Ok::<(), Error>(())
        });
    }
    drop(db_tx);

    while let Some(task) = tasks.join_next().await {
        task??;
    }
    let database = collect_handle.await?;

    write_json(&config.db_file, &database).await?;
    info_time!(
        start_time,
        "Stored {} ISBNs in {}",
        database.len(),
        config.db_file.display()
    );
    Ok(database)
}

/// Reviews of one ISBN, parsed from the cache.
async fn parse_bucket(
    cache: &Cache,
    reviews: Vec<ReviewId>,
    disclaimer: String,
) -> Result<Reviews> {
    let mut pages = Vec::with_capacity(reviews.len());
    for review in reviews {
        match cache.read_review(&review).await? {
            Some(html) => pages.push((review, html)),
            None => warn!(%review, "page no longer cached, skipping"),
        }
    }

    let entries = spawn_blocking(move || {
        pages
            .into_iter()
            .map(|(review, html)| (review, extract_review(&html, &disclaimer)))
            .collect::<Reviews>()
    })
    .await?;
    Ok(entries)
}

/// Merges the per-ISBN results sent by the workers.
async fn collect_entries(mut db_rx: mpsc::Receiver<(String, Reviews)>) -> Database {
    let mut database = Database::new();
    while let Some((isbn, entries)) = db_rx.recv().await {
        database.entry(isbn).or_default().extend(entries);
    }
    database
}

pub async fn load_index(path: &Path) -> Result<Index> {
    if !fs::try_exists(path).await? {
        return Err(Error::MissingIndex(path.to_path_buf()));
    }
    read_json(path).await
}

pub async fn load_database(path: &Path) -> Result<Database> {
    read_json(path).await
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).await?;
    serde_json::from_str(&content).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })
}

async fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, serde_json::to_string_pretty(data)?).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::tests::review_page;
    use crate::FieldValue;

    struct Fixture {
        _dir: tempfile::TempDir,
        config: Config,
        cache: Cache,
    }

    fn fixture(workers: usize) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let config = Config {
            cache_dir: root.join(".db"),
            index_file: root.join("index.json"),
            db_file: root.join("out").join("database.json"),
            workers,
            ..Default::default()
        };
        let cache = Cache::new(&config.cache_dir);
        Fixture {
            _dir: dir,
            config,
            cache,
        }
    }

    fn id(id: &str) -> ReviewId {
        ReviewId::parse(id).unwrap()
    }

    async fn seed(cache: &Cache) {
        for (review, isbn) in [
            ("30", "978-3-7915-0454-4"),
            ("4", "9783791504544"),
            ("17", "3 7915 0454 1"),
            ("200", "1234567890"),
        ] {
            let html = review_page(isbn);
            cache.write_review(&id(review), &html).await.unwrap();
        }
        let no_isbn = review_page("").replace("<td>ISBN:</td><td></td>", "");
        cache.write_review(&id("5"), &no_isbn).await.unwrap();
    }

    #[tokio::test]
    async fn groups_reviews_by_isbn() {
        let fx = fixture(4);
        seed(&fx.cache).await;

        let index = build_index(&fx.config).await.unwrap();

        let expected = Index::from([
            ("1234567890".to_string(), vec![id("200")]),
            ("3791504541".to_string(), vec![id("17")]),
            ("978-3-7915-0454-4".to_string(), vec![id("30")]),
            ("9783791504544".to_string(), vec![id("4")]),
        ]);
        assert_eq!(index, expected);
        assert_eq!(load_index(&fx.config.index_file).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn strict_mode_drops_invalid_isbns() {
        let mut fx = fixture(2);
        fx.config.strict_isbn = true;
        seed(&fx.cache).await;

        let index = build_index(&fx.config).await.unwrap();
        assert!(!index.contains_key("1234567890"));
        assert_eq!(index.len(), 3);
    }

    #[tokio::test]
    async fn shared_isbn_collects_all_reviews() {
        let fx = fixture(8);
        for review in ["9", "100", "25", "7"] {
            let html = review_page("9783791504544");
            fx.cache.write_review(&id(review), &html).await.unwrap();
        }

        let index = build_index(&fx.config).await.unwrap();
        assert_eq!(
            index["9783791504544"],
            vec![id("7"), id("9"), id("25"), id("100")]
        );
    }

    #[tokio::test]
    async fn rebuilding_index_is_byte_identical() {
        let fx = fixture(3);
        seed(&fx.cache).await;

        build_index(&fx.config).await.unwrap();
        let first = std::fs::read(&fx.config.index_file).unwrap();
        build_index(&fx.config).await.unwrap();
        let second = std::fs::read(&fx.config.index_file).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn database_requires_index() {
        let fx = fixture(1);
        seed(&fx.cache).await;

        let res = build_db(&fx.config).await;
        assert!(matches!(res, Err(Error::MissingIndex(path)) if path == fx.config.index_file));
        assert!(!fx.config.db_file.exists());
    }

    #[tokio::test]
    async fn database_round_trips() {
        let fx = fixture(2);
        seed(&fx.cache).await;
        build_index(&fx.config).await.unwrap();

        let database = build_db(&fx.config).await.unwrap();
        let loaded = load_database(&fx.config.db_file).await.unwrap();

        assert_eq!(loaded, database);
        let review = &loaded["9783791504544"][&id("4")];
        assert_eq!(
            review.get("Autor"),
            Some(&FieldValue::Text("Funke, Cornelia".into()))
        );
        assert!(matches!(review.get("Inhalt"), Some(FieldValue::Paragraphs(p)) if p.len() == 3));
    }

    #[tokio::test]
    async fn database_skips_uncached_reviews() {
        let fx = fixture(2);
        seed(&fx.cache).await;
        build_index(&fx.config).await.unwrap();
        std::fs::remove_file(fx.cache.review_path(&id("200"))).unwrap();

        let database = build_db(&fx.config).await.unwrap();

        assert!(!database.contains_key("1234567890"));
        assert_eq!(database.len(), 3);
    }

    #[tokio::test]
    async fn malformed_index_is_a_decode_error() {
        let fx = fixture(1);
        std::fs::write(&fx.config.index_file, "{\"123\": [\"abc\"]}").unwrap();

        let res = build_db(&fx.config).await;
        assert!(matches!(res, Err(Error::Decode { path, .. }) if path == fx.config.index_file));
    }
}
