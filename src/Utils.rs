//! different utility modules used throughout the project
/// parse session settings document with structure like "title key: value" into SessionConfig
pub mod config_parser;
/// tiny module to set up logging and to save results into file
pub mod logger;
