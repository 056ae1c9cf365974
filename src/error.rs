// Crate-level error type.
// Only setup can fail: loading configuration and assembling the rig.
// Per-tick code never returns errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Missing collaborator: {0}")]
    MissingCollaborator(&'static str),
}
