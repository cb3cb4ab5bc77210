use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    /// A facade call happened before any navigator was bound to the process.
    #[error("navigator is not bound")]
    NotBound,

    #[error("failed to encode result for key `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode result for key `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = NavigationError> = std::result::Result<T, E>;
