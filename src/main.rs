use std::path::PathBuf;
use std::time::Duration;

use ajum::{build_db, build_index, info_time, Config, Crawler, Query, Result, Review};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tokio::io::{stdin, stdout, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

/// Tools for interacting with the AJuM database.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Index file.
    #[arg(short, long, default_value = "index.json", global = true)]
    index_file: PathBuf,
    /// Database file.
    #[arg(short, long, default_value = "database.json", global = true)]
    db_file: PathBuf,
    /// Cache directory.
    #[arg(short, long, default_value = ".db", global = true)]
    cache_dir: PathBuf,
    /// Waiting time in seconds before each request.
    #[arg(short, long, default_value_t = 3.0, global = true)]
    timer: f64,
    /// "From" header.
    #[arg(long, global = true)]
    from: Option<String>,
    /// User agent.
    #[arg(short, long, global = true)]
    user_agent: Option<String>,
    /// Number of parallel workers when building the index and database.
    #[arg(short, long, global = true)]
    workers: Option<usize>,
    /// Skip ISBNs with invalid checksums when indexing.
    #[arg(long, global = true)]
    strict: bool,
    /// JSON file mapping invalid review IDs to valid ones.
    #[arg(long, global = true)]
    redirects: Option<PathBuf>,
    /// Enable verbose mode, repeat for more output.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Backs up remote database
    Backup {
        /// Force cache reload.
        #[arg(short, long)]
        force: bool,
        /// Include all reviews.
        #[arg(short, long)]
        all: bool,
    },
    /// Indexes reviews per ISBN
    Index,
    /// Builds local database
    Build,
    /// Removes cached results pages
    Clear,
    /// Shows data of given REVIEW
    Show { review: String },
    /// Queries remote database
    Query(QueryArgs),
}

#[derive(Debug, Args)]
struct QueryArgs {
    #[arg(short, long, default_value = "")]
    search_term: String,
    #[arg(long, default_value = "")]
    title: String,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    illustrator: String,
    #[arg(long, default_value = "")]
    tag: String,
    #[arg(long, default_value = "")]
    rating: String,
    #[arg(long, default_value = "")]
    application: String,
    #[arg(long, default_value = "")]
    media_type: String,
    #[arg(long, default_value = "")]
    age: String,
    #[arg(long, default_value = "")]
    genre: String,
    /// Include archived reviews.
    #[arg(long)]
    archive: bool,
    /// Only Wolgast laureates.
    #[arg(long)]
    wolgast: bool,
}

impl From<QueryArgs> for Query {
    fn from(args: QueryArgs) -> Self {
        Query {
            search_term: args.search_term,
            title: args.title,
            first_name: args.first_name,
            last_name: args.last_name,
            illustrator: args.illustrator,
            tag: args.tag,
            rating: args.rating,
            application: args.application,
            media_type: args.media_type,
            age: args.age,
            genre: args.genre,
            archive: args.archive,
            wolgast: args.wolgast,
        }
    }
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let mut config = Config {
            cache_dir: self.cache_dir.clone(),
            index_file: self.index_file.clone(),
            db_file: self.db_file.clone(),
            timer: Duration::from_secs_f64(self.timer.max(0.0)),
            strict_isbn: self.strict,
            ..Default::default()
        };
        if let Some(from) = &self.from {
            config.from = from.clone();
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        if let Some(workers) = self.workers {
            config.workers = workers.max(1);
        }
        if let Some(path) = &self.redirects {
            config.redirects = Config::load_redirects(path)?;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();

    let config = cli.config()?;
    match cli.command {
        Command::Backup { force, all } => {
            let report = Crawler::new(config)?.backup(force, all).await?;
            println!(
                "Found {} reviews, {} cached, {} rejected.",
                report.discovered, report.cached, report.rejected
            );
        }
        Command::Index => {
            let index = build_index(&config).await?;
            println!("Indexed {} ISBNs.", index.len());
        }
        Command::Build => {
            let database = build_db(&config).await?;
            println!("Stored {} ISBNs.", database.len());
        }
        Command::Clear => {
            let removed = Crawler::new(config)?.clear_cache().await?;
            println!("Removed {removed} cached files.");
        }
        Command::Show { review } => {
            let data = Crawler::new(config)?.find_review(&review).await?;
            if data.is_empty() {
                println!("No review found for given ID, please try again.");
            } else {
                print_review(&data);
            }
        }
        Command::Query(args) => run_query(Crawler::new(config)?, args.into()).await?,
    }

    info_time!(start_time, "Done.");
    Ok(())
}

/// Runs a query and pages through its results on demand.
async fn run_query(crawler: Crawler, query: Query) -> Result<()> {
    let mut reviews = crawler.search(&query).await?;
    if reviews.is_empty() {
        println!("Your query did not match any review, please try again.");
        return Ok(());
    }
    reviews.sort();

    let count = reviews.len();
    println!("We found {count} reviews.");

    let mut input = BufReader::new(stdin()).lines();
    if !confirm(&mut input, "Show results?").await? {
        return Ok(());
    }

    for (i, review) in reviews.iter().enumerate() {
        println!("Review {} of {count}:", i + 1);
        print_review(&crawler.get_review(review).await?);
        println!();

        if i + 1 == count {
            println!("No more entries, exiting ..");
            break;
        }
        if !confirm(&mut input, "Continue?").await? {
            break;
        }
    }
    Ok(())
}

async fn confirm(input: &mut Lines<BufReader<Stdin>>, prompt: &str) -> Result<bool> {
    let mut out = stdout();
    out.write_all(format!("{prompt} [y/N]: ").as_bytes()).await?;
    out.flush().await?;

    let answer = input.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_review(review: &Review) {
    for (label, value) in review.iter() {
        println!("{label}: {value}");
    }
}
