//! Errors for AIS decoding and the receiver service
use thiserror::Error;

/// Failure to decode a single NMEA sentence.
///
/// Every variant is recoverable: the sentence is skipped and the next one is
/// decoded as usual.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed sentence: {0}")]
    MalformedSentence(String),

    #[error("Invalid armor character {ch:?} at payload position {position}")]
    InvalidArmorChar { ch: char, position: usize },

    #[error("Truncated message: {bits} bits, at least 168 required")]
    TruncatedMessage { bits: usize },
}

#[derive(Error, Debug)]
pub enum AisSyncError {
    #[error("Configuration error")]
    ConfigError(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Serialization error")]
    SerdeError(#[from] serde_json::Error),

    #[error("IO error")]
    IoError(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Receiver channel closed")]
    ReceiverClosed,

    #[error("Failed to run {program}: {origin}")]
    ProcessError { program: String, origin: String },
}
