//! Command shell for embedded systems.
//!
//! The [`Shell`] context ties the pieces together:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   ByteSource    │───▶│   Line Editor   │───▶│    Tokenizer    │
//! │  (one byte per  │    │  (buffer, ESC   │    │  (whitespace    │
//! │   poll() call)  │    │   sequences)    │    │    split)       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                 │                       │
//!                                 ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    ByteSink     │◀───│    Terminal     │◀───│   Dispatcher    │
//! │                 │    │  (print/printf) │    │   + Registry    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Each call to [`Shell::poll`] reads at most one byte. When that byte ends a
//! line, the line is tokenized and dispatched before `poll` returns, so a
//! command always runs to completion inside a single step.
//!
//! # Usage Examples
//!
//! ## Superloop
//!
//! ```rust
//! use ushell::io::{ByteSink, ByteSource};
//! use ushell::shell::{Dispatch, Shell, Step, Terminal};
//!
//! struct Rx(&'static [u8]);
//!
//! impl ByteSource for Rx {
//!     type Error = ();
//!     fn read(&mut self) -> Result<Option<u8>, Self::Error> {
//!         let Some((&byte, rest)) = self.0.split_first() else {
//!             return Ok(None);
//!         };
//!         self.0 = rest;
//!         Ok(Some(byte))
//!     }
//! }
//!
//! type Tx = heapless::Vec<u8, 256>;
//!
//! fn version(term: &mut Terminal<Tx>, _argc: usize, _argv: &[&str]) -> i32 {
//!     let _ = term.println("v1.0");
//!     0
//! }
//!
//! let mut shell = Shell::init(Rx(b"version\r"), Tx::new(), None).unwrap();
//! shell.register(&version, "version").unwrap();
//!
//! let mut last = None;
//! loop {
//!     match shell.poll().unwrap() {
//!         Step::Pending => break,
//!         Step::Line(outcome) => last = Some(outcome),
//!         Step::Consumed => {}
//!     }
//! }
//! assert_eq!(last, Some(Dispatch::Executed(0)));
//! ```
//!
//! ## Interrupt-fed input
//!
//! ```rust
//! use ushell::io::Detached;
//! use ushell::shell::{Dispatch, Shell};
//!
//! let mut shell = Shell::init(Detached, heapless::Vec::<u8, 128>::new(), None).unwrap();
//! // Bytes drained from a UART receive queue
//! let outcome = shell.input(b"missing\r").unwrap();
//! assert_eq!(outcome, Some(Dispatch::NotFound));
//! ```

use heapless::String;

use crate::config::{ConfigError, MAX_PROMPT_LEN, Options};
use crate::format::Arg;
use crate::io::{ByteSink, ByteSource};

pub mod dispatcher;
pub mod editor;
pub mod error;
pub mod registry;
pub mod terminal;
pub mod tokenizer;

pub use dispatcher::{Dispatch, dispatch};
pub use editor::{Edit, Editor, EscapeState};
pub use error::{Error, ErrorKind};
pub use registry::{Entry, Handler, Registry};
pub use terminal::Terminal;
pub use tokenizer::{Args, tokenize};


/// Result of one processing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No input byte was available.
    Pending,
    /// A byte was consumed without completing a line.
    Consumed,
    /// A byte completed a line, which was dispatched.
    Line(Dispatch),
}

/// Interactive shell instance.
///
/// Owns the byte source and sink, the line editor and the command table.
/// Every instance is independent; nothing is stored globally.
pub struct Shell<'a, R, W> {
    reader: R,
    terminal: Terminal<W>,
    editor: Editor,
    registry: Registry<'a, W>,
    prompt: String<MAX_PROMPT_LEN>,
    list_command: bool,
}

impl<R, W> core::fmt::Debug for Shell<'_, R, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Shell")
            .field("editor", &self.editor)
            .field("registry", &self.registry)
            .field("prompt", &self.prompt.as_str())
            .field("list_command", &self.list_command)
            .finish()
    }
}

impl<'a, R: ByteSource, W: ByteSink> Shell<'a, R, W> {
    /// Create a shell with default [`Options`].
    ///
    /// Prints `banner` on its own line, if given, followed by the prompt.
    ///
    /// # Errors
    ///
    /// * [`Error::WriteError`] - The banner or prompt could not be written
    pub fn init(reader: R, writer: W, banner: Option<&str>) -> Result<Self, Error> {
        Self::init_with(reader, writer, banner, Options::default())
    }

    /// Create a shell with explicit options.
    pub fn init_with(reader: R, writer: W, banner: Option<&str>, options: Options) -> Result<Self, Error> {
        let mut editor = Editor::new();
        editor.set_echo(options.echo);
        editor.set_history(options.history);

        let mut shell = Self {
            reader,
            terminal: Terminal::new(writer),
            editor,
            registry: Registry::new(),
            prompt: options.prompt,
            list_command: options.list_command,
        };

        if let Some(banner) = banner {
            shell.terminal.println(banner)?;
        }
        shell.show_prompt()?;
        Ok(shell)
    }

    /// Register a command.
    ///
    /// # Errors
    ///
    /// * [`Error::RegistryFull`] - [`MAX_COMMANDS`](crate::config::MAX_COMMANDS)
    ///   commands are already registered
    pub fn register(&mut self, handler: &'a dyn Handler<W>, name: &'a str) -> Result<(), Error> {
        self.registry.register(handler, name)
    }

    /// Remove every registered command.
    pub fn unregister_all(&mut self) {
        self.registry.unregister_all();
    }

    /// The command table.
    pub fn registry(&self) -> &Registry<'a, W> {
        &self.registry
    }

    /// Names of the registered commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.registry.list()
    }

    /// The line editor, e.g. to inspect the line being typed.
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// The output terminal.
    pub fn terminal(&mut self) -> &mut Terminal<W> {
        &mut self.terminal
    }

    /// Borrow the byte sink.
    pub fn writer(&self) -> &W {
        self.terminal.sink()
    }

    /// Mutably borrow the byte sink.
    pub fn writer_mut(&mut self) -> &mut W {
        self.terminal.sink_mut()
    }

    /// Mutably borrow the byte source.
    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Enable or disable echo of typed input.
    pub fn set_echo(&mut self, enabled: bool) {
        self.editor.set_echo(enabled);
    }

    /// Enable or disable arrow-up recall of the last line.
    pub fn set_history(&mut self, enabled: bool) {
        self.editor.set_history(enabled);
    }

    /// Enable or disable the built-in `list` command.
    pub fn set_list_command(&mut self, enabled: bool) {
        self.list_command = enabled;
    }

    /// Replace the prompt.
    pub fn set_prompt(&mut self, prompt: &str) -> Result<(), ConfigError> {
        self.prompt = String::try_from(prompt).map_err(|_| ConfigError::PromptTooLong)?;
        Ok(())
    }

    /// Run one processing step.
    ///
    /// Reads at most one byte from the source without waiting. If it
    /// completes a line, the line is dispatched before returning.
    ///
    /// # Returns
    ///
    /// * [`Step::Pending`] - No byte was available
    /// * [`Step::Consumed`] - The byte was applied to the line
    /// * [`Step::Line`] - The byte completed a line, with the dispatch outcome
    pub fn poll(&mut self) -> Result<Step, Error> {
        match self.reader.read().map_err(|_| Error::ReadError)? {
            Some(byte) => self.process_byte(byte),
            None => Ok(Step::Pending),
        }
    }

    /// Apply a byte obtained outside of the byte source.
    ///
    /// A completed line is always dispatched and cleared. Once it has been
    /// dispatched, failures to write the newline echo or the prompt are only
    /// logged, so the outcome still reaches the caller.
    pub fn process_byte(&mut self, byte: u8) -> Result<Step, Error> {
        match self.editor.feed(byte, &mut self.terminal)? {
            Edit::Consumed => Ok(Step::Consumed),
            Edit::LineReady => {
                if self.terminal.print("\r\n").is_err() {
                    warn!("newline echo failed");
                }
                let outcome = self.run_line();
                self.editor.clear();
                let outcome = outcome?;
                if self.show_prompt().is_err() {
                    warn!("prompt write failed");
                }
                Ok(Step::Line(outcome))
            }
        }
    }

    /// Apply every byte of `data` in order.
    ///
    /// Returns the outcome of the last line completed by `data`, if any.
    pub fn input(&mut self, data: &[u8]) -> Result<Option<Dispatch>, Error> {
        let mut last = None;
        for &byte in data {
            if let Step::Line(outcome) = self.process_byte(byte)? {
                last = Some(outcome);
            }
        }
        Ok(last)
    }

    fn run_line(&mut self) -> Result<Dispatch, Error> {
        let outcome = {
            let args = tokenize(self.editor.line());
            if args.is_empty() {
                return Ok(Dispatch::Empty);
            }
            dispatch(&self.registry, &mut self.terminal, &args, self.list_command)
        };
        self.editor.remember();
        outcome
    }

    fn show_prompt(&mut self) -> Result<(), Error> {
        self.terminal.print(&self.prompt)
    }

    /// Print the list of registered commands.
    pub fn print_commands(&mut self) -> Result<(), Error> {
        dispatcher::print_commands(&self.registry, &mut self.terminal)
    }

    /// Print a string.
    pub fn print(&mut self, text: &str) -> Result<(), Error> {
        self.terminal.print(text)
    }

    /// Print a string followed by a line break.
    pub fn println(&mut self, text: &str) -> Result<(), Error> {
        self.terminal.println(text)
    }

    /// Print formatted text.
    pub fn printf(&mut self, fmt: &str, args: &[Arg<'_>]) -> Result<(), Error> {
        self.terminal.printf(fmt, args)
    }

    /// Print a standardized error diagnostic.
    pub fn print_error(&mut self, kind: ErrorKind, field: Option<&str>) -> Result<(), Error> {
        self.terminal.print_error(kind, field)
    }
}
