use thiserror::Error;

/// Rejection reason carried by a Task's future, plus the failures of the
/// config and log layers.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Rejected: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Producer panicked: {0}")]
    Panicked(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("No config directory")]
    NoConfigDir,

    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Reject with a plain reason.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Error::Rejected(reason.into())
    }

    /// Reject with an arbitrary error value.
    pub fn from_source<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Source(Box::new(source))
    }

    /// Build a `Panicked` error from a `catch_unwind` payload.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let msg = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Error::Panicked(msg)
    }
}

impl From<String> for Error {
    fn from(reason: String) -> Self {
        Error::Rejected(reason)
    }
}

impl From<&str> for Error {
    fn from(reason: &str) -> Self {
        Error::Rejected(reason.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
