/// Database configuration and connection management
pub mod database;

/// Directory configuration loading from directory.toml
pub mod directory;

/// Application settings from environment variables
pub mod settings;
