//! Output side of the shell.
//!
//! [`Terminal`] wraps the byte sink and provides the display operations used by
//! the shell and handed to command handlers: plain prints, formatted prints
//! and standardized error lines. Everything is rendered through
//! [`write_formatted`] or written byte by byte.

use super::error::{Error, ErrorKind};
use crate::format::{write_formatted, Arg};
use crate::io::ByteSink;

/// Display handle over a byte sink.
///
/// # Examples
///
/// ```rust
/// use ushell::shell::{ErrorKind, Terminal};
///
/// let mut term = Terminal::new(heapless::Vec::<u8, 64>::new());
/// term.print_error(ErrorKind::OutOfRange, Some("freq")).unwrap();
/// assert_eq!(&term.sink()[..], b"#ERROR-FIELD:freq\r\n#ERROR-TYPE:OUT_OF_RANGE\r\n");
/// ```
#[derive(Debug)]
pub struct Terminal<W> {
    sink: W,
}

impl<W: ByteSink> Terminal<W> {
    /// Wrap a byte sink.
    pub const fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Borrow the underlying sink.
    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Mutably borrow the underlying sink.
    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Write a single raw byte.
    pub fn put(&mut self, byte: u8) -> Result<(), Error> {
        self.sink.write(byte).map_err(|_| Error::WriteError)
    }

    /// Write raw bytes.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.sink.write_all(bytes).map_err(|_| Error::WriteError)
    }

    /// Write `byte` `count` times.
    pub(crate) fn repeat(&mut self, byte: u8, count: usize) -> Result<(), Error> {
        for _ in 0..count {
            self.put(byte)?;
        }
        Ok(())
    }

    /// Print a string.
    pub fn print(&mut self, text: &str) -> Result<(), Error> {
        self.put_bytes(text.as_bytes())
    }

    /// Print a string and move to the start of the next line.
    pub fn println(&mut self, text: &str) -> Result<(), Error> {
        self.print(text)?;
        self.print("\r\n")
    }

    /// Print formatted text, see [`format`](crate::format) for the template syntax.
    pub fn printf(&mut self, fmt: &str, args: &[Arg<'_>]) -> Result<(), Error> {
        write_formatted(&mut self.sink, fmt, args).map_err(|_| Error::WriteError)
    }

    /// Print a standardized diagnostic for a failed command.
    ///
    /// When `field` is given, a `#ERROR-FIELD:` line naming the offending
    /// parameter precedes the `#ERROR-TYPE:` line.
    pub fn print_error(&mut self, kind: ErrorKind, field: Option<&str>) -> Result<(), Error> {
        if let Some(field) = field {
            self.printf("#ERROR-FIELD:%s\r\n", &[Arg::Str(field)])?;
        }
        self.printf("#ERROR-TYPE:%s\r\n", &[Arg::Str(kind.label())])
    }
}
