use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

/// Terminal failures of one search attempt, as shown to the user.
///
/// None of these are retried; the user recovers by submitting again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// No active network when the search was submitted. No request was sent.
    #[error("No hay conexión a internet.")]
    NoConnection,

    /// The provider answered with a non-success status or without results.
    #[error("Error al obtener noticias (status={status})")]
    Application { status: String },

    /// The request or the decoding of its body failed.
    #[error("Error al obtener noticias: {0}")]
    Transport(String),

    /// The request never completed (panicked or dropped while loading).
    #[error("Error al obtener noticias: solicitud interrumpida")]
    Interrupted,
}

impl SearchError {
    pub fn transport(error: &Error) -> Self {
        SearchError::Transport(match error {
            Error::Http(e) => e.to_string(),
            Error::Serialization(e) => e.to_string(),
            Error::External(e) => e.to_string(),
            other => other.to_string(),
        })
    }
}
