use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use marketnews::app::App;
use marketnews::cache::ArticleCache;
use marketnews::config::Config;
use marketnews::desk::{NewsDesk, View};
use marketnews::feeds::mock::MockNewsFetcher;
use marketnews::logging::{self, LogTarget};
use marketnews::market::{Segment, Timeframe};
use marketnews::report;
use marketnews::session::Selection;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "marketnews",
    version,
    about = "Indian market news by segment and timeframe, in your terminal"
)]
struct Cli {
    /// Path to config file (defaults to <config dir>/marketnews/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Market segment, e.g. "Mid Cap FNO"
    #[arg(short, long)]
    segment: Option<Segment>,

    /// Timeframe, e.g. "Last One Week"
    #[arg(short, long)]
    timeframe: Option<Timeframe>,

    /// Treat this date as today
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,

    /// Print the news list to stdout instead of starting the dashboard
    #[arg(long)]
    print: bool,

    /// With --print, emit the articles as JSON
    #[arg(long, requires = "print")]
    json: bool,

    /// Start without fetching; press f to fetch
    #[arg(long)]
    no_fetch: bool,

    /// Wrap width for --print output
    #[arg(long, default_value_t = 100)]
    width: usize,
}

fn build_desk(cli: &Cli, config: &Config) -> NewsDesk {
    let selection = Selection::new(
        cli.segment.unwrap_or(config.defaults.segment),
        cli.timeframe.unwrap_or(config.defaults.timeframe),
        config.defaults.fetch_on_load && !cli.no_fetch,
    );
    let fetcher = MockNewsFetcher::new(cli.date.or(config.defaults.reference_date));
    NewsDesk::new(
        selection,
        Box::new(fetcher),
        ArticleCache::new(config.cache.ttl()),
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let target = if cli.print {
        LogTarget::Stderr
    } else {
        LogTarget::File(
            config
                .logging
                .file
                .clone()
                .unwrap_or_else(logging::default_log_file),
        )
    };
    logging::init(&config.logging, target)?;

    let mut desk = build_desk(&cli, &config);

    if cli.print {
        let view = desk.refresh(Utc::now()).await;
        if let View::Failed(e) = view {
            anyhow::bail!("{}", e);
        }
        let output = if cli.json {
            report::render_json(view)?
        } else {
            report::render_text(view, cli.width)?
        };
        print!("{}", output);
        return Ok(());
    }

    App::new(&config, desk).run().await
}
