use std::error::Error as StdError;
use thiserror::Error;

/// Failures of a single generate call that are not a plain non-200 status.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (refused, reset, DNS, timeout...).
    /// Carries the full error chain so it can be shown to the user verbatim.
    #[error("{0}")]
    Transport(String),

    /// The server answered 200 but the body was not the expected JSON.
    #[error("invalid reply body: {0}")]
    Decode(String),

    /// The worker task died before reporting an outcome.
    #[error("request aborted: {0}")]
    Aborted(String),

    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

impl ClientError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self::Transport(error_chain(&err))
    }

    pub(crate) fn decode(err: reqwest::Error) -> Self {
        Self::Decode(error_chain(&err))
    }
}

/// Joins an error and all of its sources into one line.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Reasons a send action is rejected before any request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("a request is already in flight")]
    Busy,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Figment(#[from] figment::Error),
    #[error("failed to write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid settings: {0}")]
    Invalid(&'static str),
    #[error("could not determine a configuration directory")]
    NoConfigDir,
}
