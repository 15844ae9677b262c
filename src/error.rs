use crate::config::ConfigError;
use crate::games::GameError;
use crate::progress::ProgressError;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AppError
{
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Progress file: {0}")]
    Progress(#[from] ProgressError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("{0}")]
    Usage(String),
}

pub type AppResult<T> = Result<T, AppError>;
