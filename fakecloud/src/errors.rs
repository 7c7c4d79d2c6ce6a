use validator::ValidationErrors;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Sqlx(sqlx::Error),

    #[error("{0}")]
    MalformedBody(String),

    #[error("invalid request body: {0}")]
    InvalidEntity(#[from] ValidationErrors),

    #[error("not found")]
    NotFound,
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound,
            _ => Error::Sqlx(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedBody(err.to_string())
    }
}
