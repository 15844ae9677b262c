use crate::error::{AppError, AppResult};
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Routes `log` output to `path`; the terminal itself is owned by the game screen.
pub fn init(path: &Path) -> AppResult<()>
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
