use thiserror::Error;

/// Errors returned by the nested-set query APIs.
#[derive(Debug, Error)]
pub enum NestedSetError {
    #[error("invalid nested set configuration: {0}")]
    Config(String),

    #[error("nested set node `{id}` does not exist")]
    NodeNotFound { id: i64 },

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl NestedSetError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }
}
