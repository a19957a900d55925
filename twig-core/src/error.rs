use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    #[error("Branches '{source_branch}' and '{destination}' both touch {path}")]
    NotJoinable {
        source_branch: String,
        destination: String,
        path: String,
    },
}
