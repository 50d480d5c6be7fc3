//! Crawler for the AJuM review database.
//!
//! Results listings and review pages are cached in a flat directory, review pages
//! are parsed into [`Review`] records and the cache can be turned into an
//! ISBN-keyed index and database at any time.

mod error;
mod macros;

pub mod cache;
pub mod config;
pub mod crawler;
pub mod index;
pub mod isbn;
pub mod params;
pub mod parse;
pub mod query;
pub mod request;
pub mod results;
pub mod review;
pub mod vocab;

pub use cache::Cache;
pub use config::Config;
pub use crawler::{BackupReport, Crawler};
pub use error::{Error, Result};
pub use index::{build_db, build_index, Database, Index};
pub use params::QueryParams;
pub use query::Query;
pub use request::{Client, Fetch, Headers};
pub use review::{FieldValue, Review, ReviewId};

const BASE_URL: &str = "https://www.ajum.de/index.php";
/// Selects the review database on the shared `index.php` endpoint.
const BASE_PARAM: (&str, &str) = ("s", "datenbank");
const RESULTS_PER_PAGE: usize = 50;
/// Only genuine review pages carry this disclaimer.
const DISCLAIMER: &str = "presserechtliche Verantwortung";
const RESULTS_PATTERN: &str = r"wurden\s(\d+)\sRezensionen";
const DEFAULT_TIMER_SECS: f64 = 3.0;
const DEFAULT_FROM: &str = "maschinenraum@fundevogel.de";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; WOW64; rv:45.0) Gecko/20100101 Firefox/45.0";
