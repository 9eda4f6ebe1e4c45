//! Runs the command named by the first argument.

use super::error::Error;
use super::registry::Registry;
use super::terminal::Terminal;
use crate::format::Arg;
use crate::io::ByteSink;

/// Name of the built-in command listing the registered commands.
pub const LIST_COMMAND: &str = "list";

/// Outcome of dispatching one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The line held no arguments; nothing ran and nothing was printed.
    Empty,
    /// A registered handler ran and returned this status.
    Executed(i32),
    /// The built-in `list` command ran.
    Listed,
    /// No command matched the first argument.
    NotFound,
}

/// Look up `args[0]` and run the matching command.
///
/// Registered commands take precedence over the built-in `list` command,
/// which only answers when `list_command` is set. An unmatched name prints a
/// single `Command NOT found` line.
pub fn dispatch<W: ByteSink, const N: usize>(
    registry: &Registry<'_, W, N>,
    term: &mut Terminal<W>,
    args: &[&str],
    list_command: bool,
) -> Result<Dispatch, Error> {
    let Some(&name) = args.first() else {
        return Ok(Dispatch::Empty);
    };

    if let Some(entry) = registry.lookup(name) {
        let status = entry.handler.call(term, args.len(), args);
        debug!("{=str} argc={=usize} returned {=i32}", name, args.len(), status);
        return Ok(Dispatch::Executed(status));
    }

    if list_command && name == LIST_COMMAND {
        print_commands(registry, term)?;
        return Ok(Dispatch::Listed);
    }

    warn!("command not found: {=str}", name);
    term.printf("Command NOT found: %s\r\n", &[Arg::Str(name)])?;
    Ok(Dispatch::NotFound)
}

/// Print the registered command names, one per line.
pub fn print_commands<W: ByteSink, const N: usize>(
    registry: &Registry<'_, W, N>,
    term: &mut Terminal<W>,
) -> Result<(), Error> {
    term.println("Available Commands:")?;
    for name in registry.list() {
        term.printf("%s\r\n", &[Arg::Str(name)])?;
    }
    Ok(())
}
