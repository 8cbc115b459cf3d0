use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimewolfError {
    #[error("Malformed input on stdin")]
    MalformedInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("netrc parse error: {message} (line {line})")]
    NetrcParse { line: usize, message: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl TimewolfError {
    pub(crate) fn netrc(line: usize, message: impl Into<String>) -> Self {
        TimewolfError::NetrcParse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TimewolfError>;
