use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid track list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate track id {0}")]
    DuplicateTrackId(u64),

    #[error("Failed to parse TOML: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Player rejected command: {message}")]
    Player { message: String },

    #[error("Localization error: {0}")]
    Localization(String),
}
