use thiserror::Error;

#[derive(Error, Debug)]
pub enum TexttvError {
    #[error("Parse error: {0}")]
    Parse(#[from] teletext::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl TexttvError {
    /// The error kind shown to the reader, if the error came from parsing.
    pub fn kind(&self) -> Option<teletext::ErrorKind> {
        match self {
            TexttvError::Parse(err) => Some(err.kind()),
            _ => None,
        }
    }
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, TexttvError>;
