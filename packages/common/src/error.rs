use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Setup-time configuration errors.
///
/// This is the only fatal error class: it is returned synchronously from the
/// configuration builder and never deferred. Per-field conditions during
/// reconciliation are logged and contained instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown built-in decorator requested: {name}")]
    UnknownDecorator { name: String },

    #[error("Unknown built-in error list renderer requested: {name}")]
    UnknownRenderer { name: String },
}

impl ConfigError {
    pub fn unknown_decorator(name: impl Into<String>) -> Self {
        Self::UnknownDecorator { name: name.into() }
    }

    pub fn unknown_renderer(name: impl Into<String>) -> Self {
        Self::UnknownRenderer { name: name.into() }
    }
}

/// Common error type that can hold any formdeco error
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Generic(s)
    }
}

impl From<&str> for CommonError {
    fn from(s: &str) -> Self {
        CommonError::Generic(s.to_string())
    }
}
