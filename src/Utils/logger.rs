use crate::Utils::config_parser::SessionConfig;
use log::info;
use simplelog::*;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the logger from the session settings: terminal and/or log file.
/// Returns false when nothing was installed (logging off, or a logger already set).
pub fn init_logger(config: &SessionConfig) -> bool {
    let level = config.log_level;
    if level == LevelFilter::Off {
        return false;
    }

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if config.log_to_console {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if let Some(ref path) = config.log_file {
        match open_append(path) {
            Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Err(e) => eprintln!("cannot open log file {}: {}", path.display(), e),
        }
    }
    if loggers.is_empty() {
        return false;
    }

    match CombinedLogger::init(loggers) {
        Ok(()) => {
            info!("logging started with level {}", level);
            true
        }
        Err(_) => false,
    }
}

/// appends one line to the file, creating the file when needed
pub fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = open_append(path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}
