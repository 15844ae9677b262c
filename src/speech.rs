use std::process::{Child, Command, Stdio};

pub const DEFAULT_SPEECH_COMMAND: &str = "espeak -v en-us";

pub trait Speaker
{
    fn speak(&mut self, text: &str);
}

pub struct SilentSpeaker;

impl Speaker for SilentSpeaker
{
    fn speak(&mut self, text: &str)
    {
        log::debug!("speech disabled, not pronouncing '{text}'");
    }
}

/// Pronounces words through an external text-to-speech program.
pub struct CommandSpeaker
{
    program: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl CommandSpeaker
{
    /// Splits `command_line` on whitespace; the word is appended as the last argument.
    pub fn from_command_line(command_line: &str) -> Option<Self>
    {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
            child: None,
        })
    }

    pub fn program(&self) -> &str
    {
        &self.program
    }

    pub fn args(&self) -> &[String]
    {
        &self.args
    }

    fn reap(&mut self)
    {
        if let Some(child) = self.child.as_mut() {
            match child.try_wait() {
                Ok(Some(_)) | Err(_) => self.child = None,
                Ok(None) => {}
            }
        }
    }
}

impl Speaker for CommandSpeaker
{
    fn speak(&mut self, text: &str)
    {
        self.reap();
        if self.child.is_some() {
            log::debug!("still speaking, skipping '{text}'");
            return;
        }
        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => self.child = Some(child),
            Err(err) => log::warn!("speech command '{}' failed: {err}", self.program),
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn command_line_is_split_into_program_and_args()
    {
        let speaker = CommandSpeaker::from_command_line(DEFAULT_SPEECH_COMMAND).expect("command");
        assert_eq!(speaker.program(), "espeak");
        assert_eq!(speaker.args(), ["-v", "en-us"]);
        assert!(CommandSpeaker::from_command_line("   ").is_none());
    }

    #[test]
    fn missing_program_is_not_fatal()
    {
        let mut speaker =
            CommandSpeaker::from_command_line("egg-hunt-no-such-tts-program").expect("command");
        speaker.speak("balloon");
        assert!(speaker.child.is_none());
    }
}
