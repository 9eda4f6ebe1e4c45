//! Byte-level I/O traits.
//!
//! The shell talks to the outside world through exactly two capabilities: a
//! non-blocking single-byte read and a single-byte write. Both are supplied by
//! the embedding application, typically as thin wrappers around a UART driver.
//!
//! ```rust
//! use ushell::io::{ByteSink, ByteSource};
//!
//! struct Loopback {
//!     pending: Option<u8>,
//! }
//!
//! impl ByteSource for Loopback {
//!     type Error = ();
//!     fn read(&mut self) -> Result<Option<u8>, Self::Error> {
//!         Ok(self.pending.take())
//!     }
//! }
//!
//! impl ByteSink for Loopback {
//!     type Error = ();
//!     fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
//!         self.pending = Some(byte);
//!         Ok(())
//!     }
//! }
//! ```

/// A non-blocking source of input bytes.
pub trait ByteSource {
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Read one byte if one is available.
    ///
    /// Must return `Ok(None)` immediately when no byte is pending instead of
    /// waiting for one.
    fn read(&mut self) -> Result<Option<u8>, Self::Error>;
}

/// A sink accepting output bytes one at a time.
pub trait ByteSink {
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Write a single byte.
    fn write(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Write every byte of `bytes` in order.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.write(byte)?;
        }
        Ok(())
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    type Error = T::Error;

    fn read(&mut self) -> Result<Option<u8>, Self::Error> {
        (**self).read()
    }
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    type Error = T::Error;

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).write(byte)
    }
}

/// Error returned by the in-memory sink when its buffer is full.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct BufferFull;

#[cfg(feature = "defmt")]
impl defmt::Format for BufferFull {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "BufferFull")
    }
}

/// Collects output in a fixed-capacity buffer, e.g. for rendering into a
/// display line or for capturing output in tests.
impl<const N: usize> ByteSink for heapless::Vec<u8, N> {
    type Error = BufferFull;

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.push(byte).map_err(|_| BufferFull)
    }
}

/// A source that never yields a byte.
///
/// Use it when input is pushed into the shell with
/// [`Shell::process_byte`](crate::shell::Shell::process_byte) from an
/// interrupt queue or DMA buffer instead of being polled.
#[derive(Debug, Default, Clone, Copy)]
pub struct Detached;

impl ByteSource for Detached {
    type Error = core::convert::Infallible;

    fn read(&mut self) -> Result<Option<u8>, Self::Error> {
        Ok(None)
    }
}

#[cfg(feature = "std")]
impl ByteSink for std::io::Stdout {
    type Error = std::io::ErrorKind;

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        std::io::Write::write_all(self, &[byte]).map_err(|e| e.kind())
    }
}
