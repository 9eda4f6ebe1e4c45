//! Error types for the shell

/// Failures raised by the shell machinery itself.
///
/// None of these leave the shell in a broken state: after any error the line
/// editor and dispatcher are ready for the next byte.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The byte source reported an error.
    ReadError,
    /// The byte sink reported an error.
    WriteError,
    /// The command table has no free slot left.
    RegistryFull,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::RegistryFull => defmt::write!(f, "RegistryFull"),
        }
    }
}

/// Kinds of errors reported by command handlers through
/// [`Terminal::print_error`](super::Terminal::print_error).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum ErrorKind {
    /// Missing arguments for the command
    ArgCount = 0,
    /// An argument is outside the accepted range
    OutOfRange,
    /// An argument has a value different from what was expected
    Value,
    /// The requested action is invalid in the current state
    Action,
    /// The input could not be parsed
    Parse,
    /// The storage or memory device could not be accessed
    Storage,
    /// An I/O device error interrupted the command
    Io,
}

impl ErrorKind {
    /// Label printed after `#ERROR-TYPE:`.
    pub const fn label(self) -> &'static str {
        match self {
            ErrorKind::ArgCount => "ARG_COUNT",
            ErrorKind::OutOfRange => "OUT_OF_RANGE",
            ErrorKind::Value => "INVALID_VALUE",
            ErrorKind::Action => "INVALID_ACTION",
            ErrorKind::Parse => "PARSING",
            ErrorKind::Storage => "STORAGE",
            ErrorKind::Io => "IO",
        }
    }

    /// Numeric code of the kind.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a kind by its numeric code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ErrorKind::ArgCount),
            1 => Some(ErrorKind::OutOfRange),
            2 => Some(ErrorKind::Value),
            3 => Some(ErrorKind::Action),
            4 => Some(ErrorKind::Parse),
            5 => Some(ErrorKind::Storage),
            6 => Some(ErrorKind::Io),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ErrorKind {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.label())
    }
}
