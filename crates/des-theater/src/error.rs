use des_core::DesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TheaterError {
    #[error("theater configuration error: {0}")]
    Config(String),

    #[error("simulation error: {0}")]
    Sim(#[from] DesError),
}

pub type TheaterResult<T> = Result<T, TheaterError>;
