use chrono::Utc;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "availability.log";

/// Initializes the global logger.
///
/// Level is taken from the `RUST_LOG` environment variable and defaults to
/// `info`. Records go to stderr and to `logs/availability.log`. Calling this
/// more than once is harmless; only the first call installs a logger.
pub fn init() {
    let level = std::env::var("RUST_LOG").ok().and_then(|value| value.parse::<LevelFilter>().ok()).unwrap_or(LevelFilter::Info);

    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    let console = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut dispatch = Dispatch::new().level(level).chain(console);

    match file_sink() {
        Ok(file) => dispatch = dispatch.chain(file),
        Err(e) => eprintln!("Failed to open log file '{}/{}', logging to stderr only: {}", LOG_DIR, LOG_FILE, e),
    }

    // A second facade in the same process (common in tests) hits the
    // already-installed logger; that is fine.
    let _ = dispatch.apply();
}

fn file_sink() -> std::io::Result<Dispatch> {
    fs::create_dir_all(LOG_DIR)?;
    let log_file = fern::log_file(format!("{}/{}", LOG_DIR, LOG_FILE))?;
    Ok(Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{} {} {}] {}", Utc::now().format("%Y-%m-%d %H:%M:%S"), record.level(), record.target(), message))
        })
        .chain(log_file))
}
