use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file not found - {0}")]
    InputNotFound(String),

    #[error("could not read PDF file - no text extracted from {0}")]
    EmptyDocument(String),
}
