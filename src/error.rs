// File: ./src/error.rs
/// Fatal outcomes of an extraction call. Unrecognized columns are never an error.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}
