use medfolder_types::ComponentId;

#[derive(Debug, thiserror::Error)]
pub enum FolderError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("duplicate component id {id} in folder {folder}")]
    DuplicateId {
        id: ComponentId,
        folder: ComponentId,
    },
}

pub type FolderResult<T> = std::result::Result<T, FolderError>;
