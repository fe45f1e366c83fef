use clap::Parser;
use log::{LevelFilter, info, warn};
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config as LogConfig, Logger, Root},
    encode::pattern::PatternEncoder,
};
use prettytable::{Cell, Row, Table};
use std::time::{Duration, Instant};
use veto_common::listing::{MatchListClient, MatchSummary};

// log target of this binary, as the logging framework sees it
const LOG_TARGET: &str = "match_list";

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the match backend
    #[clap(long, default_value = "http://127.0.0.1:8000")]
    server_url: String,

    /// Seconds between list refreshes
    #[clap(long, default_value = "2")]
    interval: u64,

    #[clap(long, short, action(clap::ArgAction::Count))]
    /// Increase the log verbosity
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let client = MatchListClient::new(&args.server_url, Duration::from_secs(10))?;
    info!("Polling {} every {}s", args.server_url, args.interval);

    // Last table successfully fetched, kept on screen through outages with
    // an explicit staleness note instead of being cleared.
    let mut last_good: Option<(Vec<MatchSummary>, Instant)> = None;

    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval.max(1)));
    loop {
        ticker.tick().await;
        match client.fetch_matches().await {
            Ok(matches) => {
                redraw(&matches, None);
                last_good = Some((matches, Instant::now()));
            }
            Err(e) => {
                warn!("Match list request failed: {e}");
                match &last_good {
                    Some((matches, fetched_at)) => redraw(matches, Some(fetched_at.elapsed())),
                    None => println!("No match data yet ({e})"),
                }
            }
        }
    }
}

/// Replace the table wholesale; partial updates are never attempted.
fn redraw(matches: &[MatchSummary], stale_for: Option<Duration>) {
    // move the cursor home and clear, so the refresh reads as one table
    print!("\x1B[2J\x1B[H");

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("TEAMS"),
        Cell::new("MODE"),
        Cell::new("STATUS"),
        Cell::new("RESULTS"),
    ]));
    for summary in matches {
        table.add_row(Row::new(vec![
            Cell::new(&summary.teams),
            Cell::new(summary.mode.as_deref().unwrap_or("—")),
            Cell::new(&summary.status),
            Cell::new(&summary.results_lines()),
        ]));
    }
    table.printstd();

    if let Some(age) = stale_for {
        println!("STALE DATA — last successful refresh {}s ago", age.as_secs());
    }
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    #[cfg(not(target_os = "windows"))]
    let console_target = Target::Stderr;
    #[cfg(target_os = "windows")]
    let console_target = Target::Stdout; // Windows apps don't get a stderr handle
    let console = ConsoleAppender::builder()
        .target(console_target)
        .encoder(Box::new(PatternEncoder::new("[{d} {h({l:5})} {M}] {m}{n}")))
        .build();

    let root = Root::builder().appender("console").build(LevelFilter::Error);

    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("console", Box::new(console)))
        .logger(Logger::builder().build(LOG_TARGET, log_level))
        .logger(Logger::builder().build("veto_common", log_level))
        .build(root)
        .unwrap();

    log4rs::init_config(log_config).unwrap();
    if verbose > 0 {
        log_panics::init();
    }
}
