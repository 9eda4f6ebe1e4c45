//! Capacities and runtime options for the shell.
//!
//! The table sizes are fixed at compile time: the shell never resizes a
//! buffer at runtime. Behavioural switches live in [`Options`], which can be
//! round-tripped through JSON so a device can keep them next to its other
//! persisted settings.
//!
//! ```rust
//! use ushell::config::Options;
//!
//! let options = Options::from_json(r#"{"echo":false,"prompt":"> "}"#).unwrap();
//! assert!(!options.echo);
//! assert_eq!(options.prompt.as_str(), "> ");
//! assert!(options.history);
//! ```

use heapless::String;
use serde::{Deserialize, Serialize};

/// Maximum number of commands that can be registered.
pub const MAX_COMMANDS: usize = 5;

/// Size of the input buffer.
///
/// One slot is reserved for the terminator, so the longest line that can be
/// typed is `MAX_INPUT - 1` characters.
pub const MAX_INPUT: usize = 100;

/// Maximum number of arguments passed to a command, including its name.
pub const MAX_COMMAND_ARGS: usize = 10;

/// Maximum length of the prompt string.
pub const MAX_PROMPT_LEN: usize = 16;

/// Prompt printed when no other prompt is configured.
pub const DEFAULT_PROMPT: &str = "device>";

/// Errors raised while loading or storing [`Options`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    Parse,
    /// The output buffer was too small for the serialized options.
    Overflow,
    /// The prompt does not fit in [`MAX_PROMPT_LEN`] bytes.
    PromptTooLong,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ConfigError::Parse => defmt::write!(f, "Parse"),
            ConfigError::Overflow => defmt::write!(f, "Overflow"),
            ConfigError::PromptTooLong => defmt::write!(f, "PromptTooLong"),
        }
    }
}

/// Runtime options of a shell instance.
///
/// Missing fields take their default value when loading from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Echo typed characters and editing sequences back to the terminal.
    pub echo: bool,
    /// Prompt printed after start-up and after every completed line.
    pub prompt: String<MAX_PROMPT_LEN>,
    /// Provide the built-in `list` command.
    pub list_command: bool,
    /// Keep the last executed line for arrow-up recall.
    pub history: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            echo: true,
            prompt: String::try_from(DEFAULT_PROMPT).unwrap_or_default(),
            list_command: true,
            history: true,
        }
    }
}

impl Options {
    /// Parse options from a JSON object.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Parse`] - Malformed JSON or a prompt longer than
    ///   [`MAX_PROMPT_LEN`]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json_core::from_str::<Options>(json)
            .map(|(options, _)| options)
            .map_err(|_| ConfigError::Parse)
    }

    /// Serialize the options into a JSON string of at most `N` bytes.
    pub fn to_json<const N: usize>(&self) -> Result<String<N>, ConfigError> {
        serde_json_core::to_string(self).map_err(|_| ConfigError::Overflow)
    }

    /// Replace the prompt.
    pub fn set_prompt(&mut self, prompt: &str) -> Result<(), ConfigError> {
        self.prompt = String::try_from(prompt).map_err(|_| ConfigError::PromptTooLong)?;
        Ok(())
    }
}
