//! Command-line front end for `giphy-core`.
//!
//! Prints one line per GIF: the page URL for `random`, the media source for
//! `search` and the embed URL for `trending`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use giphy_core::{ClientConfig, Gif, GiphyClient, SearchOptions, TrendingOptions, DEFAULT_BASE_URL};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "giphy", about = "Query the Giphy GIF API", long_about = None)]
struct Args {
    /// Giphy API key.
    #[arg(long, env = "GIPHY_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Scheme and host to send requests to.
    #[arg(long, env = "GIPHY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Give up on a request after this many seconds.
    #[arg(long, env = "GIPHY_TIMEOUT_SECS")]
    timeout: Option<u64>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One random GIF for a tag.
    Random {
        tag: String,
    },
    /// GIFs matching a search term.
    Search {
        query: String,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        #[arg(long = "lang")]
        language: Option<String>,
    },
    /// What is trending right now.
    Trending {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
}

impl Args {
    fn config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = GiphyClient::from_config(&args.config()).context("invalid client configuration")?;
    debug!(?client, "client ready");

    for line in run(&client, &args.cmd)? {
        println!("{line}");
    }
    Ok(())
}

fn run(client: &GiphyClient, cmd: &Command) -> anyhow::Result<Vec<String>> {
    let lines = match cmd {
        Command::Random { tag } => {
            let gifs = client
                .random(tag)
                .with_context(|| format!("failed to retrieve a random GIF for {tag:?}"))?;
            render(&gifs, |g| g.url().to_string())
        }
        Command::Search {
            query,
            limit,
            offset,
            language,
        } => {
            let options = SearchOptions {
                limit: *limit,
                offset: *offset,
                language: language.clone(),
            };
            let gifs = client
                .search(query, &options)
                .with_context(|| format!("failed to search GIFs for {query:?}"))?;
            render(&gifs, Gif::media_source)
        }
        Command::Trending { limit, offset } => {
            let options = TrendingOptions {
                limit: *limit,
                offset: *offset,
            };
            let gifs = client
                .trending(&options)
                .context("failed to retrieve trending GIFs")?;
            render(&gifs, |g| g.embed_url().to_string())
        }
    };
    Ok(lines)
}

fn render(gifs: &[Gif], line: impl Fn(&Gif) -> String) -> Vec<String> {
    gifs.iter().map(line).collect()
}
