use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid symbol distribution: {reason}")]
    InvalidDistribution { reason: String },

    #[error("Invalid machine configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
