//! Fixed-capacity command table.
//!
//! Commands are kept in registration order. Names are compared exactly and
//! case-sensitively; registration does not check for duplicates, so when two
//! entries share a name the one registered first is the one that runs.

use super::error::Error;
use super::terminal::Terminal;
use crate::config::MAX_COMMANDS;
use heapless::Vec;

/// A command implementation.
///
/// Handlers receive the terminal for output, the argument count and the
/// argument vector, whose first element is the command name. The returned
/// status is passed back to the caller of the processing step untouched;
/// `0` conventionally means success.
///
/// Any function or closure with the matching signature is a handler:
///
/// ```rust
/// use ushell::shell::{ErrorKind, Terminal};
///
/// fn led<W: ushell::io::ByteSink>(term: &mut Terminal<W>, argc: usize, argv: &[&str]) -> i32 {
///     if argc < 2 {
///         let _ = term.print_error(ErrorKind::ArgCount, None);
///         return 1;
///     }
///     match argv[1] {
///         "on" | "off" => 0,
///         _ => {
///             let _ = term.print_error(ErrorKind::Value, Some("state"));
///             1
///         }
///     }
/// }
/// ```
pub trait Handler<W> {
    /// Run the command.
    fn call(&self, term: &mut Terminal<W>, argc: usize, argv: &[&str]) -> i32;
}

impl<W, F> Handler<W> for F
where
    F: Fn(&mut Terminal<W>, usize, &[&str]) -> i32,
{
    fn call(&self, term: &mut Terminal<W>, argc: usize, argv: &[&str]) -> i32 {
        self(term, argc, argv)
    }
}

/// One registered command.
pub struct Entry<'a, W> {
    /// The command implementation.
    pub handler: &'a dyn Handler<W>,
    /// Name typed by the user.
    pub name: &'a str,
}

impl<W> Clone for Entry<'_, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for Entry<'_, W> {}

impl<W> core::fmt::Debug for Entry<'_, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Entry").field("name", &self.name).finish()
    }
}

/// Command table holding up to `N` entries.
pub struct Registry<'a, W, const N: usize = MAX_COMMANDS> {
    entries: Vec<Entry<'a, W>, N>,
}

impl<W, const N: usize> Default for Registry<'_, W, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W, const N: usize> core::fmt::Debug for Registry<'_, W, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<'a, W, const N: usize> Registry<'a, W, N> {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a command.
    ///
    /// # Errors
    ///
    /// * [`Error::RegistryFull`] - All `N` slots are taken; the table is unchanged
    pub fn register(&mut self, handler: &'a dyn Handler<W>, name: &'a str) -> Result<(), Error> {
        match self.entries.push(Entry { handler, name }) {
            Ok(()) => {
                debug!("registered command {=str}", name);
                Ok(())
            }
            Err(_) => {
                warn!("command table full, rejecting {=str}", name);
                Err(Error::RegistryFull)
            }
        }
    }

    /// Forget every registered command.
    pub fn unregister_all(&mut self) {
        self.entries.clear();
        debug!("command table cleared");
    }

    /// Find the first command named exactly `name`.
    pub fn lookup(&self, name: &str) -> Option<&Entry<'a, W>> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Names of the registered commands in registration order.
    pub fn list(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of commands.
    pub const fn capacity(&self) -> usize {
        N
    }
}
