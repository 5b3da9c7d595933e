use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

/// Maps a textual log level to a `LevelFilter`. "off" and "none" disable
/// logging entirely.
pub fn parse_loglevel(level: &str) -> Option<LevelFilter> {
    match level {
        "off" | "none" => None,
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        _ => Some(LevelFilter::Info),
    }
}

/// Initializes a terminal logger at the given level. Safe to call more than
/// once: a second initialization attempt is simply ignored, so library tests
/// and an embedding caller can both request logging.
pub fn init_console_logger(level: &str) {
    let Some(filter) = parse_loglevel(level) else {
        return;
    };
    let _ = CombinedLogger::init(vec![TermLogger::new(
        filter,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
