use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown resource: {0}")]
    UnknownResource(String),
    #[error("{0} id is required")]
    MissingSubjectId(&'static str),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
