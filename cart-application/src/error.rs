use cart_domain::error::CartError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] CartError),

    #[error("load failed after {attempts} attempt(s): {source}")]
    LoadFailed {
        attempts: u32,
        #[source]
        source: CartError,
    },

    #[error("validation: {0}")]
    Validation(String),
}

pub type AppResult<T> = Result<T, AppError>;
