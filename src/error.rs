use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZoneGenError {
    #[error("Invalid address format: {0}")]
    InvalidAddressFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ZoneGenError {
    fn from(err: toml::de::Error) -> Self {
        ZoneGenError::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ZoneGenError>;
