use clap::Parser;
use crossbeam_channel::bounded;
use log::{LevelFilter, warn};
#[cfg(debug_assertions)]
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::{
    append::rolling_file::{
        RollingFileAppender,
        policy::compound::{
            CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
        },
    },
    config::{Appender, Config as LogConfig, Logger, Root},
    encode::pattern::PatternEncoder,
};
use macroquad::prelude::*;
use std::path::PathBuf;
use veto_common::snapshot::MatchSnapshot;

mod clock;
mod load_images;
mod network;
mod pages;

use network::StatePacket;
use pages::PageRenderer;

const APP_NAME: &str = "veto-overlay";

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    server_url: String,
    request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: String::from("http://127.0.0.1:8000"),
            request_timeout_secs: 20,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Identifier of the match to display, as given by the match backend
    match_id: Option<String>,

    #[clap(long, short, action(clap::ArgAction::Count))]
    /// Increase the log verbosity
    verbose: u8,

    #[clap(long)]
    /// Directory within which log files will be placed, default is platform dependent
    log_location: Option<PathBuf>,

    #[clap(long, default_value = "5000000")]
    /// Max size in bytes that a log file is allowed to reach before being rolled over
    log_max_file_size: u64,

    #[clap(long, default_value = "3")]
    /// Number of archived logs to keep
    num_old_logs: u32,
}

/// A usable identifier is non-empty and URL-safe without escaping. Anything
/// else is a fatal configuration error for this view.
fn valid_match_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[macroquad::main(window_conf())]
async fn main() {
    let args = Cli::parse();
    let match_id = args.match_id.clone();
    init_logging(args);

    let config: AppConfig = match confy::load(APP_NAME, None) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to read config file, overwriting with default. Error: {e}");
            let config = AppConfig::default();
            if let Err(e) = confy::store(APP_NAME, None, &config) {
                warn!("Failed to store default config: {e}");
            }
            config
        }
    };

    let mut renderer = PageRenderer::new();

    let match_id = match_id.unwrap_or_default();
    if !valid_match_id(&match_id) {
        warn!("Missing or malformed match identifier {match_id:?}, not connecting");
        loop {
            clear_background(BLACK);
            renderer.config_error("Start the overlay as: overlay <MATCH-ID>");
            next_frame().await;
        }
    }

    let (tx, rx) = bounded::<StatePacket>(3);
    std::thread::spawn(move || {
        network::networking_thread(tx, config, match_id);
    });

    // Last applied snapshot; a fresh default renders the waiting state until
    // the first push arrives.
    let mut local_state = MatchSnapshot::default();

    loop {
        clear_background(BLACK);

        if let Ok(packet) = rx.try_recv() {
            for art in packet.new_art {
                renderer.assets.insert(art);
            }
            local_state = packet.snapshot;
            renderer.clock.observe(&local_state);
        }

        if local_state.series_finished {
            renderer.final_scores(&local_state);
        } else {
            renderer.draft_display(&local_state);
        }
        next_frame().await;
    }
}

fn init_logging(args: Cli) {
    let log_level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let log_base_path = args.log_location.unwrap_or_else(|| {
        let mut path = directories::BaseDirs::new()
            .expect("Could not find a directory to store logs")
            .data_local_dir()
            .to_path_buf();
        path.push("veto-overlay-logs");
        path
    });
    let mut log_path = log_base_path.clone();
    let mut archived_log_path = log_base_path.clone();
    log_path.push(format!("{APP_NAME}-log.txt"));
    archived_log_path.push(format!("{APP_NAME}-log-{{}}.txt.gz"));

    #[cfg(debug_assertions)]
    println!("Log path: {}", log_path.display());

    // Only log to the console in debug mode
    #[cfg(all(debug_assertions, not(target_os = "windows")))]
    let console_target = Target::Stderr;
    #[cfg(all(debug_assertions, target_os = "windows"))]
    let console_target = Target::Stdout; // Windows apps don't get a stderr handle
    #[cfg(debug_assertions)]
    let console = ConsoleAppender::builder()
        .target(console_target)
        .encoder(Box::new(PatternEncoder::new("[{d} {h({l:5})} {M}] {m}{n}")))
        .build();

    let roller = FixedWindowRoller::builder()
        .build(
            archived_log_path.as_os_str().to_str().unwrap(),
            args.num_old_logs,
        )
        .unwrap();
    let file_policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(args.log_max_file_size)),
        Box::new(roller),
    );
    let file_appender = RollingFileAppender::builder()
        .append(true)
        .encoder(Box::new(PatternEncoder::new("[{d} {l:5} {M}] {m}{n}")))
        .build(log_path, Box::new(file_policy))
        .unwrap();

    let root = Root::builder().appender("file_appender");
    #[cfg(debug_assertions)]
    let root = root.appender("console");
    let root = root.build(LevelFilter::Error);

    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("file_appender", Box::new(file_appender)));

    #[cfg(debug_assertions)]
    let log_config = log_config.appender(Appender::builder().build("console", Box::new(console)));

    let log_config = log_config
        .logger(Logger::builder().build("overlay", log_level))
        .logger(Logger::builder().build("veto_common", log_level))
        .build(root)
        .unwrap();

    log4rs::init_config(log_config).unwrap();
    log_panics::init();
}

fn window_conf() -> Conf {
    Conf {
        window_title: String::from("Veto Overlay"),
        window_width: 1920,
        window_height: 1080,
        window_resizable: false,
        ..Default::default()
    }
}

#[cfg(test)]
mod test {
    use super::valid_match_id;

    #[test]
    fn test_match_id_validation() {
        assert!(valid_match_id("123456789"));
        assert!(valid_match_id("finals_week-2"));
        assert!(!valid_match_id(""));
        assert!(!valid_match_id("has space"));
        assert!(!valid_match_id("query?injection=1"));
        assert!(!valid_match_id("slash/route"));
    }
}
