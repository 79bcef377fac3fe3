use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use kashi_fetch::{format, resolve, FetchRequest, FetchResult, Lyrics};

#[derive(Parser)]
#[command(name = "kashi-fetch")]
#[command(about = "Fetch song lyrics from Japanese lyric-listing sites", long_about = None)]
struct Cli {
    /// File listing one page URL or song code per line
    #[arg(short, long)]
    input: PathBuf,

    /// Site token, or "*" to detect the site from full URLs
    #[arg(short, long, default_value = "*")]
    site: String,

    /// Directory the lyric files are written to
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Extra attempts for transient (network/parse) failures
    #[arg(long, default_value = "2")]
    retries: u32,

    /// Number of worker threads
    #[arg(long, default_value = "4")]
    threads: usize,

    /// Also save the reading-annotated lyrics where the site has them
    #[arg(long)]
    ruby: bool,

    /// Fixed User-Agent instead of the per-fetch random one
    #[arg(long, env = "KASHI_FETCH_USER_AGENT")]
    user_agent: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let pages: Vec<String> = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read input list {}", cli.input.display()))?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect();
    if pages.is_empty() {
        anyhow::bail!("No pages listed in {}", cli.input.display());
    }

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("Failed to create output directory {}", cli.output.display()))?;

    info!("Fetching {} songs on {} threads", pages.len(), cli.threads.max(1));

    let queue: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(pages.into_iter().collect()));
    let failures = Arc::new(AtomicUsize::new(0));
    let cli = Arc::new(cli);

    let mut workers = Vec::new();
    for _ in 0..cli.threads.max(1) {
        let queue = Arc::clone(&queue);
        let failures = Arc::clone(&failures);
        let cli = Arc::clone(&cli);

        workers.push(thread::spawn(move || {
            loop {
                let page = queue.lock().expect("page queue lock").pop_front();
                let Some(page) = page else { break };

                if let Err(err) = fetch_one(&cli, &page) {
                    error!("{}: {:#}", page, err);
                    failures.fetch_add(1, Ordering::SeqCst);
                }
            }
        }));
    }
    for worker in workers {
        worker
            .join()
            .map_err(|_| anyhow::anyhow!("worker thread panicked"))?;
    }

    let failures = failures.load(Ordering::SeqCst);
    if failures > 0 {
        anyhow::bail!("{} song(s) failed", failures);
    }
    Ok(())
}

/// Fetches everything for one page, retrying transient failures, then
/// writes the output file(s).
fn fetch_one(cli: &Cli, page: &str) -> Result<()> {
    let mut request = FetchRequest::new().site(cli.site.as_str()).page(page);
    if let Some(user_agent) = &cli.user_agent {
        request = request.user_agent(user_agent.as_str());
    }

    let mut attempt = 0;
    let (result, ruby) = loop {
        match try_fetch(&request, cli.ruby) {
            Ok(fetched) => break fetched,
            Err(err) if err.is_retryable() && attempt < cli.retries => {
                attempt += 1;
                warn!("{}: {} (retry {}/{})", page, err, attempt, cli.retries);
            }
            Err(err) => return Err(err.into()),
        }
    };

    let stem = format::filename(&result.header, format::DEFAULT_FILENAME_TEMPLATE);

    let path = cli.output.join(format!("{}.txt", stem));
    fs::write(&path, format::document(&result))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved {}", path.display());

    if let Some(ruby) = ruby {
        let ruby_result = FetchResult { lyrics: ruby, ..result };
        let path = cli.output.join(format!("{} (ruby).txt", stem));
        fs::write(&path, format::document(&ruby_result))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved {}", path.display());
    }

    Ok(())
}

fn try_fetch(
    request: &FetchRequest,
    want_ruby: bool,
) -> kashi_fetch::Result<(FetchResult, Option<Lyrics>)> {
    let mut pipeline = resolve(request)?;

    let header = pipeline.header()?;
    let lyrics = pipeline.lyrics()?;
    let ruby = if want_ruby { pipeline.ruby_lyrics()? } else { None };

    Ok((
        FetchResult {
            header,
            lyrics,
            source_url: pipeline.source_url().to_string(),
        },
        ruby,
    ))
}
