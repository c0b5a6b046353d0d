use std::io;

use regex::Error as RegexError;
use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

#[cfg(feature = "service")]
use notify::{Error as NotifyError, ErrorKind as NotifyErrorKind};

/// Errors raised by the adapters around the outline core.
///
/// Scanning and forest building never fail; these variants only come from reading
/// documents, loading configuration, watching files and exporting outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum OutlineError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("You do not have permission to access this resource")]
    PermissionDenied,
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
    #[error("File watch error: {0}")]
    Watch(String),
}

impl From<toml::de::Error> for OutlineError {
    fn from(src: toml::de::Error) -> OutlineError {
        OutlineError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for OutlineError {
    fn from(src: toml::ser::Error) -> OutlineError {
        OutlineError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<JsonError> for OutlineError {
    fn from(src: JsonError) -> OutlineError {
        OutlineError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<io::Error> for OutlineError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => OutlineError::NotFound(format!("{x}")),
            io::ErrorKind::PermissionDenied => OutlineError::PermissionDenied,
            _ => OutlineError::Io(format!("IOError: {}", x.kind())),
        }
    }
}

impl From<RegexError> for OutlineError {
    fn from(x: RegexError) -> Self {
        OutlineError::Config(format!("Annotation pattern failed to compile: {x}"))
    }
}

#[cfg(feature = "service")]
impl From<NotifyError> for OutlineError {
    fn from(notify_error: NotifyError) -> Self {
        match notify_error.kind {
            NotifyErrorKind::Generic(msg) => OutlineError::Watch(format!(
                "notify-debouncer: {}, paths: {:?}",
                msg, notify_error.paths
            )),
            NotifyErrorKind::Io(io_error) => OutlineError::Watch(format!(
                "notify-debouncer: io error {}, paths: {:?}",
                io_error.kind(),
                notify_error.paths
            )),
            NotifyErrorKind::PathNotFound => OutlineError::NotFound(format!(
                "notify-debouncer: path(s) not found: {:?}",
                notify_error.paths
            )),
            NotifyErrorKind::WatchNotFound => OutlineError::NotFound(format!(
                "notify-debouncer: watch not found, paths: {:?}",
                notify_error.paths
            )),
            NotifyErrorKind::InvalidConfig(_) => {
                OutlineError::Watch("notify-debouncer invalid config".to_string())
            }
            NotifyErrorKind::MaxFilesWatch => {
                OutlineError::Watch("notify-debouncer max file watch limit reached".to_string())
            }
        }
    }
}
