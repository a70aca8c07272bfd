/// Errors that can occur in Tally operations.
#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("table error: {0}")]
    Table(String),

    #[error("progress error: {0}")]
    Progress(String),

    #[error("suggestion error: {0}")]
    Suggest(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
