//! parse a session document with structure like
//! ```text
//! logging
//! level: info
//! console: true
//! file: PolynomialApp.log
//! results
//! file: PolynomialResults.txt
//! ```
//! into `SessionConfig`. Lines starting with //, # or % are comments.
//! Missing keys keep their defaults, unknown sections or keys are an error.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, not_line_ending, space0},
    combinator::{all_consuming, map, recognize},
    multi::many0,
    sequence::{delimited, pair, separated_pair},
};
use simplelog::LevelFilter;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

type DocumentMap = HashMap<String, HashMap<String, String>>;

pub const DEFAULT_LOG_FILE: &str = "PolynomialApp.log";
pub const DEFAULT_RESULTS_FILE: &str = "PolynomialResults.txt";

/// Parses a title or key (word characters without spaces)
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

/// Parses `key: value`, the value is the rest of the line without surrounding spaces
fn parse_key_value_pair(input: &str) -> IResult<&str, (&str, &str)> {
    let colon_separator = delimited(space0, char(':'), space0);
    separated_pair(
        parse_identifier,
        colon_separator,
        map(not_line_ending, str::trim),
    )
    .parse(input)
}

fn is_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with("//") || line.starts_with('#') || line.starts_with('%')
}

/// Parses the entire document into section -> key -> value
pub fn parse_config_document(input: &str) -> Result<DocumentMap, String> {
    let mut document: DocumentMap = HashMap::new();
    let mut current: Option<String> = None;

    for (number, line) in input.lines().enumerate() {
        let line = line.trim();
        if is_comment(line) {
            continue;
        }
        if let Ok((_, (key, value))) = all_consuming(parse_key_value_pair).parse(line) {
            let Some(section) = current.as_ref() else {
                return Err(format!(
                    "line {}: key '{}' outside of a section",
                    number + 1,
                    key
                ));
            };
            document
                .entry(section.clone())
                .or_default()
                .insert(key.to_string(), value.to_string());
        } else if let Ok((_, title)) = all_consuming(parse_identifier).parse(line) {
            document.entry(title.to_string()).or_default();
            current = Some(title.to_string());
        } else {
            return Err(format!("line {}: cannot parse '{}'", number + 1, line));
        }
    }
    Ok(document)
}

/// maps "debug", "info", "warn", "error", "off"/"none" to a level filter
pub fn level_filter(level: &str) -> Result<LevelFilter, String> {
    match level.to_lowercase().as_str() {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" | "none" => Ok(LevelFilter::Off),
        _ => Err(format!(
            "loglevel must be debug, info, warn, error or off, got '{}'",
            level
        )),
    }
}

/// Settings of a calculator session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub log_level: LevelFilter,
    pub log_to_console: bool,
    /// log file appended to, `None` disables file logging
    pub log_file: Option<PathBuf>,
    /// file the saved result lines are appended to
    pub results_file: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            log_to_console: false,
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            results_file: PathBuf::from(DEFAULT_RESULTS_FILE),
        }
    }
}

impl SessionConfig {
    pub fn from_document(input: &str) -> Result<Self, String> {
        let document = parse_config_document(input)?;
        let mut config = Self::default();

        for (section, entries) in &document {
            if !matches!(section.as_str(), "logging" | "results") {
                return Err(format!("unknown section '{}'", section));
            }
            for (key, value) in entries {
                match (section.as_str(), key.as_str()) {
                    ("logging", "level") => config.log_level = level_filter(value)?,
                    ("logging", "console") => {
                        config.log_to_console = value.parse::<bool>().map_err(|_| {
                            format!("logging console must be true or false, got '{}'", value)
                        })?
                    }
                    ("logging", "file") => {
                        config.log_file = match value.to_lowercase().as_str() {
                            "" | "none" | "off" => None,
                            _ => Some(PathBuf::from(value)),
                        }
                    }
                    ("results", "file") => {
                        if value.is_empty() {
                            return Err("results file must not be empty".to_string());
                        }
                        config.results_file = PathBuf::from(value)
                    }
                    _ => {
                        return Err(format!("unknown key '{}' in section '{}'", key, section));
                    }
                }
            }
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
        Self::from_document(&content)
    }
}
