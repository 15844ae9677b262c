use crate::games::word_jump::SpawnPolicy;
use crate::speech::DEFAULT_SPEECH_COMMAND;
use crate::words::Grade;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const SAVE_ENV: &str = "EGG_HUNT_SAVE";
pub const LOG_ENV: &str = "EGG_HUNT_LOG";
pub const SPEECH_ENV: &str = "EGG_HUNT_SPEECH";

const SAVE_FILE: &str = "progress.json";
const LOG_FILE: &str = "egg-hunt.log";
const DATA_DIR: &str = ".egg-hunt-words";
const MIN_SPAWN_MS: u64 = 200;
const MAX_SPAWN_MS: u64 = 10_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError
{
    #[error("Expected value after {0}")]
    MissingValue(&'static str),

    #[error("Invalid value '{value}' for {flag}: {reason}")]
    InvalidValue
    {
        flag: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown option '{0}'")]
    UnknownOption(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpeechConfig
{
    Off,
    Command(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig
{
    pub grade: Option<Grade>,
    pub save_path: PathBuf,
    pub log_path: PathBuf,
    pub spawn: SpawnPolicy,
    pub speech: SpeechConfig,
}

impl AppConfig
{
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError>
    {
        Self::from_args_with_env(args, |key| env::var(key).ok())
    }

    /// Flags win over the environment, the environment over defaults.
    pub fn from_args_with_env(
        args: &[String],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError>
    {
        let mut grade = None;
        let mut save_path = lookup(SAVE_ENV).map(PathBuf::from);
        let mut log_path = lookup(LOG_ENV).map(PathBuf::from);
        let mut spawn = SpawnPolicy::Single;
        let mut speech = SpeechConfig::Command(
            lookup(SPEECH_ENV).unwrap_or_else(|| DEFAULT_SPEECH_COMMAND.to_string()),
        );

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag, Some(value.to_string())),
                None => (arg.as_str(), None),
            };
            match flag {
                "--no-speech" => speech = SpeechConfig::Off,
                "--grade" => {
                    let value = take_value("--grade", inline, &mut iter)?;
                    grade = Some(value.parse::<Grade>().map_err(|reason| {
                        ConfigError::InvalidValue {
                            flag: "--grade",
                            value: value.clone(),
                            reason,
                        }
                    })?);
                }
                "--save" => save_path = Some(PathBuf::from(take_value("--save", inline, &mut iter)?)),
                "--log" => log_path = Some(PathBuf::from(take_value("--log", inline, &mut iter)?)),
                "--spawn-every" => {
                    let value = take_value("--spawn-every", inline, &mut iter)?;
                    spawn = SpawnPolicy::Every(parse_spawn_interval(&value)?);
                }
                "--speech-command" => {
                    speech = SpeechConfig::Command(take_value("--speech-command", inline, &mut iter)?);
                }
                _ => return Err(ConfigError::UnknownOption(arg.clone())),
            }
        }

        let data_dir = lookup("HOME")
            .map(|home| PathBuf::from(home).join(DATA_DIR))
            .unwrap_or_else(|| PathBuf::from(DATA_DIR));
        let save_path = save_path.unwrap_or_else(|| data_dir.join(SAVE_FILE));
        let log_path = log_path.unwrap_or_else(|| {
            save_path
                .parent()
                .map(|dir| dir.join(LOG_FILE))
                .unwrap_or_else(|| PathBuf::from(LOG_FILE))
        });

        Ok(Self {
            grade,
            save_path,
            log_path,
            spawn,
            speech,
        })
    }
}

fn take_value<'a>(
    flag: &'static str,
    inline: Option<String>,
    iter: &mut impl Iterator<Item = &'a String>,
) -> Result<String, ConfigError>
{
    match inline {
        Some(value) => Ok(value),
        None => iter.next().cloned().ok_or(ConfigError::MissingValue(flag)),
    }
}

fn parse_spawn_interval(value: &str) -> Result<Duration, ConfigError>
{
    let invalid = |reason: String| ConfigError::InvalidValue {
        flag: "--spawn-every",
        value: value.to_string(),
        reason,
    };
    let millis = value
        .parse::<u64>()
        .map_err(|_| invalid("milliseconds must be a whole number".to_string()))?;
    if !(MIN_SPAWN_MS..=MAX_SPAWN_MS).contains(&millis) {
        return Err(invalid(format!("must be between {MIN_SPAWN_MS} and {MAX_SPAWN_MS}")));
    }
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn args(list: &[&str]) -> Vec<String>
    {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String>
    {
        None
    }

    #[test]
    fn defaults_keep_single_spawn_and_speech()
    {
        let config = AppConfig::from_args_with_env(&[], no_env).expect("config");
        assert_eq!(config.grade, None);
        assert_eq!(config.spawn, SpawnPolicy::Single);
        assert_eq!(config.speech, SpeechConfig::Command(DEFAULT_SPEECH_COMMAND.to_string()));
        assert_eq!(config.save_path, PathBuf::from(DATA_DIR).join(SAVE_FILE));
        assert_eq!(config.log_path, PathBuf::from(DATA_DIR).join(LOG_FILE));
    }

    #[test]
    fn flags_accept_both_forms()
    {
        let config = AppConfig::from_args_with_env(
            &args(&["--grade", "3-4", "--spawn-every=800", "--save", "/tmp/p.json", "--no-speech"]),
            no_env,
        )
        .expect("config");
        assert_eq!(config.grade, Some(Grade::Middle));
        assert_eq!(config.spawn, SpawnPolicy::Every(Duration::from_millis(800)));
        assert_eq!(config.save_path, PathBuf::from("/tmp/p.json"));
        assert_eq!(config.log_path, PathBuf::from("/tmp/egg-hunt.log"));
        assert_eq!(config.speech, SpeechConfig::Off);
    }

    #[test]
    fn environment_fills_in_when_flags_are_absent()
    {
        let env = |key: &str| match key {
            SAVE_ENV => Some("/data/save.json".to_string()),
            SPEECH_ENV => Some("say".to_string()),
            "HOME" => Some("/home/kid".to_string()),
            _ => None,
        };
        let config = AppConfig::from_args_with_env(&[], env).expect("config");
        assert_eq!(config.save_path, PathBuf::from("/data/save.json"));
        assert_eq!(config.speech, SpeechConfig::Command("say".to_string()));

        let flagged = AppConfig::from_args_with_env(&args(&["--save=/x/y.json"]), env).expect("config");
        assert_eq!(flagged.save_path, PathBuf::from("/x/y.json"));
    }

    #[test]
    fn bad_values_are_reported()
    {
        assert_eq!(
            AppConfig::from_args_with_env(&args(&["--grade"]), no_env),
            Err(ConfigError::MissingValue("--grade"))
        );
        assert!(matches!(
            AppConfig::from_args_with_env(&args(&["--spawn-every", "fast"]), no_env),
            Err(ConfigError::InvalidValue { flag: "--spawn-every", .. })
        ));
        assert!(matches!(
            AppConfig::from_args_with_env(&args(&["--spawn-every", "50"]), no_env),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(
            AppConfig::from_args_with_env(&args(&["--turbo"]), no_env),
            Err(ConfigError::UnknownOption("--turbo".to_string()))
        );
    }
}
