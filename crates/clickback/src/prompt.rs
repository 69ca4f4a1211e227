//! Interactive collection of playback settings

use std::io::{BufRead, Write};

use clickback_core::{Error, ErrorCode, Result};
use clickback_recorder::config::{DEFAULT_CLICK_DELAY_MS, DEFAULT_KEY_DELAY_MS};
use clickback_recorder::PlaybackConfig;

pub const REPEAT_QUESTION: &str = "Before starting, how many times would you like to play back your movements?\n\
     Please enter an integer: ";
const CLICK_QUESTION: &str = "Please enter time between clicks in ms (example `1000`): ";
const KEY_QUESTION: &str = "Please enter time between keystrokes in ms (example `500`): ";

/// Ask `question` until an integer >= 1 is entered, at most `max_attempts` times
pub fn prompt_positive<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    max_attempts: u32,
) -> Result<u32> {
    for attempt in 1..=max_attempts {
        write!(output, "{}", question)?;
        output.flush()?;

        let mut line = Vec::new();
        if input.read_until(b'\n', &mut line)? == 0 {
            writeln!(output)?;
            return Err(Error::invalid_configuration("input", "no more input to read"));
        }

        let answer = std::str::from_utf8(&line).map(str::trim);
        match answer.map(str::parse::<u32>) {
            Ok(Ok(value)) if value >= 1 => return Ok(value),
            _ => {
                tracing::debug!(attempt, input = %String::from_utf8_lossy(&line).trim(), "rejected");
                writeln!(output, "Invalid input. Please enter a positive integer.")?;
                writeln!(output, "Attempt {} of {}.\n", attempt, max_attempts)?;
            }
        }
    }

    writeln!(output, "Too many invalid attempts. Exiting program.")?;
    Err(Error::new(ErrorCode::InvalidConfiguration, "Too many invalid attempts")
        .with_suggestions(vec!["Pass --repeat, --click-delay and --key-delay on the command line".to_string()]))
}

/// Prompts on one reader/writer pair with a shared retry budget per question
pub struct Prompter<R, W> {
    input: R,
    output: W,
    max_attempts: u32,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, max_attempts: u32) -> Self {
        Self {
            input,
            output,
            max_attempts,
        }
    }

    /// `given` if it was supplied up front, otherwise ask
    pub fn value_or_prompt(&mut self, given: Option<u32>, question: &str) -> Result<u32> {
        match given {
            Some(value) => Ok(value),
            None => prompt_positive(&mut self.input, &mut self.output, question, self.max_attempts),
        }
    }

    /// Delay tuning after recording. Only asks for what was not supplied.
    pub fn playback(
        &mut self,
        repeat: u32,
        click_delay: Option<u32>,
        key_delay: Option<u32>,
    ) -> Result<PlaybackConfig> {
        if click_delay.is_none() || key_delay.is_none() {
            write!(
                self.output,
                "Great! Now that we have that recorded you should fine-tune the time between each keystroke and mouse click.\n\
                 You should keep in mind there can be loading time between each click. \
                 If you don't have to worry about loading time then keep the time short.\n\n\
                 Defaults:\n\
                 Time between clicks = {}ms\n\
                 Time between keystrokes = {}ms\n\n",
                DEFAULT_CLICK_DELAY_MS, DEFAULT_KEY_DELAY_MS,
            )?;
        }

        let click = self.value_or_prompt(click_delay, CLICK_QUESTION)?;
        let key = self.value_or_prompt(key_delay, KEY_QUESTION)?;
        PlaybackConfig::new(repeat, click, key)
    }
}
