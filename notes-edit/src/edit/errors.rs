use crate::notes::NoteId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is needed to update note")]
    EmptyTitle,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested note is not in the supplied collection. No draft is produced.
    #[error("note {0} not found")]
    NotFound(NoteId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("edit session is closed")]
    SessionClosed,
}
