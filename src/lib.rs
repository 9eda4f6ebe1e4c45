//! # ushell - command shell for microcontrollers
//!
//! A small interactive command line interpreter for devices that talk to a
//! terminal over a serial line. The shell pulls one byte at a time from a
//! non-blocking source, edits it into a line, splits the line into arguments
//! and runs the command registered under the first argument. It never
//! allocates and never blocks, so it can be driven from a superloop or a
//! cooperative scheduler tick.
//!
//! ## Features
//!
//! - **Line editing**: insert anywhere, backspace, left/right arrows
//! - **Single-slot history**: arrow-up recalls the last executed line
//! - **Fixed command table**: registration into a bounded table, first match wins
//! - **Formatted output**: a self-contained `printf` style renderer that writes
//!   byte by byte, with no intermediate buffer
//! - **Uniform diagnostics**: standard error lines for handler failures
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ushell = "0.1.0"
//! ```
//!
//! ### Basic Shell Example
//!
//! ```rust
//! use ushell::io::{ByteSink, ByteSource};
//! use ushell::shell::{Shell, Step, Terminal};
//!
//! # struct Uart { rx: &'static [u8] }
//! # impl ByteSource for Uart {
//! #     type Error = ();
//! #     fn read(&mut self) -> Result<Option<u8>, Self::Error> {
//! #         match self.rx.split_first() {
//! #             Some((&b, rest)) => { self.rx = rest; Ok(Some(b)) }
//! #             None => Ok(None),
//! #         }
//! #     }
//! # }
//! # struct Tx;
//! # impl ByteSink for Tx {
//! #     type Error = ();
//! #     fn write(&mut self, _byte: u8) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! fn add(term: &mut Terminal<Tx>, argc: usize, argv: &[&str]) -> i32 {
//!     if argc != 3 {
//!         return 1;
//!     }
//!     let a: i32 = argv[1].parse().unwrap_or(0);
//!     let b: i32 = argv[2].parse().unwrap_or(0);
//!     let _ = ushell::printf!(term, "%d\r\n", a + b);
//!     0
//! }
//!
//! let uart = Uart { rx: b"add 3 4\r" };
//! let mut shell = Shell::init(uart, Tx, Some("demo shell")).unwrap();
//! shell.register(&add, "add").unwrap();
//!
//! // Call once per scheduler tick
//! loop {
//!     match shell.poll().unwrap() {
//!         Step::Pending => break,
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging and formatting for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod log;

/// Compile-time capacities and runtime options.
///
/// Holds the fixed table sizes used by the shell and the [`Options`](config::Options)
/// record that can be stored as JSON alongside other device settings.
pub mod config;

/// Byte source and sink abstractions supplied by the embedding application.
pub mod io;

/// Minimal `printf` style formatter writing straight to a byte sink.
pub mod format;

/// Interactive command shell.
///
/// Contains the line editor, tokenizer, command registry and dispatcher, and
/// the [`Shell`](shell::Shell) context object tying them together.
pub mod shell;
