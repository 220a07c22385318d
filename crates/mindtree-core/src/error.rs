pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate node id in mind map tree: {id}")]
    DuplicateId { id: String },

    #[error("mind map tree nests deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("invalid layout config: {message}")]
    InvalidConfig { message: String },

    #[error("mind map JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
