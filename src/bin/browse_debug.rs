//! Page through a directory with the browse engine and print each page.
//! Useful for checking sort order and paging on real directories.
//!
//! Usage:
//!   cargo run --features dev-bins --bin browse_debug -- /some/dir --sort SIZE --per-page 50

use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use pagedir::model::filesystem::StdFileSystem;
use pagedir::services::tracing_setup;
use pagedir::{BrowseConfig, BrowseEngine, BrowseRequest, SortDirection, SortKey};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Browse a directory page by page
#[derive(Parser, Debug)]
#[command(name = "browse_debug")]
struct Args {
    /// Directory to browse
    #[arg(value_name = "DIR")]
    dir: PathBuf,

    /// Sort key: PATH, SIZE or MODIFIED_AT
    #[arg(long, default_value = "PATH")]
    sort: String,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Entries per page
    #[arg(long, default_value_t = 100)]
    per_page: usize,

    /// Stop after this many pages
    #[arg(long)]
    max_pages: Option<usize>,

    /// Path to a JSON browse configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();
    anyhow::ensure!(args.per_page > 0, "--per-page must be at least 1");

    tracing_setup::init_global(args.log_file.as_deref()).context("Failed to set up logging")?;

    let config = match &args.config {
        Some(path) => BrowseConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => BrowseConfig::default(),
    };

    let dir = args
        .dir
        .canonicalize()
        .with_context(|| format!("Cannot resolve {}", args.dir.display()))?;

    let engine = BrowseEngine::new(Arc::new(StdFileSystem), &config);
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let mut request = BrowseRequest::new(dir.to_string_lossy(), args.per_page)
        .with_sort(SortKey::parse(&args.sort), direction);

    let mut page = 0;
    loop {
        let started = Instant::now();
        let result = engine.browse(&request);
        tracing::info!(
            "page {} ({} items) in {:?}",
            page,
            result.items.len(),
            started.elapsed()
        );

        println!("{}", serde_json::to_string_pretty(&result)?);

        page += 1;
        if result.is_last_page() || args.max_pages.is_some_and(|max| page >= max) {
            break;
        }
        request = request.continue_from(&result);
    }

    Ok(())
}
