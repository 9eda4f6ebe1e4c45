//! Minimal `printf` style formatter.
//!
//! Renders a template plus a slice of [`Arg`] values straight into a
//! [`ByteSink`], one byte at a time. Nothing is buffered beyond the digits of
//! the number currently being converted, so memory use does not depend on the
//! length of the output. The shell renders all of its own text through this
//! module.
//!
//! # Conversions
//!
//! | Specifier   | Output                                  |
//! |-------------|-----------------------------------------|
//! | `%d` `%i`   | signed decimal                          |
//! | `%u`        | unsigned decimal                        |
//! | `%x` `%X`   | hexadecimal, lower / upper case         |
//! | `%s`        | string                                  |
//! | `%c`        | character                               |
//! | `%%`        | a literal `%`                           |
//!
//! A minimum field width may precede the conversion (`%5d`); a leading `0`
//! pads numbers with zeros instead of spaces (`%04x`). The `l` length modifier
//! is accepted and ignored. An unknown conversion is copied to the output as
//! is, and a conversion without a matching argument produces no output.
//!
//! ```rust
//! use ushell::format::{write_formatted, Arg};
//!
//! let mut out: heapless::Vec<u8, 32> = heapless::Vec::new();
//! write_formatted(&mut out, "%s=%04x", &[Arg::Str("reg"), Arg::from(0xbeef_u32 >> 8)]).unwrap();
//! assert_eq!(&out[..], b"reg=00be");
//! ```

use crate::io::ByteSink;

/// Widest field width honoured by the formatter.
pub const MAX_WIDTH: usize = 32;

/// A single formatting argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    Uint(u64),
    /// String slice
    Str(&'a str),
    /// Character
    Char(char),
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($source:ty),+) => {
        $(
            impl From<$source> for Arg<'_> {
                fn from(value: $source) -> Self {
                    Arg::$variant(value as $target)
                }
            }
        )+
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64, isize);
impl_from_int!(Uint, u64, u8, u16, u32, u64, usize);

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Str(value)
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Arg::Char(value)
    }
}

impl From<bool> for Arg<'_> {
    fn from(value: bool) -> Self {
        Arg::Uint(value as u64)
    }
}

/// Field layout parsed from a conversion specifier.
#[derive(Debug, Clone, Copy, Default)]
struct Spec {
    zero_pad: bool,
    width: usize,
}

/// Render `fmt` with `args` into `sink`.
///
/// Arguments are consumed left to right by the conversions in `fmt`. Extra
/// arguments are ignored.
pub fn write_formatted<S>(sink: &mut S, fmt: &str, args: &[Arg<'_>]) -> Result<(), S::Error>
where
    S: ByteSink + ?Sized,
{
    let mut args = args.iter();
    let mut bytes = fmt.bytes().peekable();

    while let Some(byte) = bytes.next() {
        if byte != b'%' {
            sink.write(byte)?;
            continue;
        }

        let mut spec = Spec::default();
        if bytes.peek() == Some(&b'0') {
            spec.zero_pad = true;
            bytes.next();
        }
        while let Some(digit) = bytes.peek().filter(|b| b.is_ascii_digit()).copied() {
            spec.width = (spec.width * 10 + usize::from(digit - b'0')).min(MAX_WIDTH);
            bytes.next();
        }
        while bytes.peek() == Some(&b'l') {
            bytes.next();
        }

        let Some(conversion) = bytes.next() else {
            // Dangling '%' at the end of the template
            sink.write(b'%')?;
            break;
        };

        match conversion {
            b'%' => sink.write(b'%')?,
            b'd' | b'i' | b'u' | b'x' | b'X' | b's' | b'c' => {
                if let Some(arg) = args.next() {
                    write_arg(sink, conversion, *arg, spec)?;
                }
            }
            other => {
                sink.write(b'%')?;
                sink.write(other)?;
            }
        }
    }

    Ok(())
}

fn write_arg<S>(sink: &mut S, conversion: u8, arg: Arg<'_>, spec: Spec) -> Result<(), S::Error>
where
    S: ByteSink + ?Sized,
{
    match (conversion, arg) {
        (_, Arg::Str(text)) => write_padded(sink, text.as_bytes(), spec.width),
        (b'c', Arg::Char(c)) | (b's', Arg::Char(c)) => {
            let mut utf8 = [0u8; 4];
            write_padded(sink, c.encode_utf8(&mut utf8).as_bytes(), spec.width)
        }
        (b'c', Arg::Int(value)) => write_padded(sink, &[value as u8], spec.width),
        (b'c', Arg::Uint(value)) => write_padded(sink, &[value as u8], spec.width),
        (b'x', arg) => write_number(sink, unsigned(arg), 16, false, false, spec),
        (b'X', arg) => write_number(sink, unsigned(arg), 16, true, false, spec),
        (b'u', arg) => write_number(sink, unsigned(arg), 10, false, false, spec),
        (_, Arg::Int(value)) => write_number(sink, value.unsigned_abs(), 10, false, value < 0, spec),
        (_, arg) => write_number(sink, unsigned(arg), 10, false, false, spec),
    }
}

/// Reinterpret an argument as an unsigned value for `%u` and `%x`.
fn unsigned(arg: Arg<'_>) -> u64 {
    match arg {
        Arg::Int(value) => value as u64,
        Arg::Uint(value) => value,
        Arg::Char(c) => u64::from(u32::from(c)),
        Arg::Str(_) => 0,
    }
}

fn write_padded<S>(sink: &mut S, bytes: &[u8], width: usize) -> Result<(), S::Error>
where
    S: ByteSink + ?Sized,
{
    for _ in bytes.len()..width {
        sink.write(b' ')?;
    }
    sink.write_all(bytes)
}

fn write_number<S>(
    sink: &mut S,
    mut value: u64,
    base: u64,
    upper: bool,
    negative: bool,
    spec: Spec,
) -> Result<(), S::Error>
where
    S: ByteSink + ?Sized,
{
    // u64::MAX has 20 decimal digits
    let mut digits = [0u8; 20];
    let mut count = 0;
    loop {
        let digit = (value % base) as u8;
        digits[count] = match digit {
            0..=9 => b'0' + digit,
            _ if upper => b'A' + digit - 10,
            _ => b'a' + digit - 10,
        };
        count += 1;
        value /= base;
        if value == 0 {
            break;
        }
    }

    let len = count + usize::from(negative);
    let fill = spec.width.saturating_sub(len);

    if !spec.zero_pad {
        for _ in 0..fill {
            sink.write(b' ')?;
        }
    }
    if negative {
        sink.write(b'-')?;
    }
    if spec.zero_pad {
        for _ in 0..fill {
            sink.write(b'0')?;
        }
    }
    for &digit in digits[..count].iter().rev() {
        sink.write(digit)?;
    }
    Ok(())
}

/// Render a formatted string through anything with a `printf` method, such
/// as [`Terminal`](crate::shell::Terminal) or [`Shell`](crate::shell::Shell).
///
/// Each argument is converted with [`Arg::from`].
///
/// ```rust
/// use ushell::shell::Terminal;
///
/// let mut term = Terminal::new(heapless::Vec::<u8, 32>::new());
/// ushell::printf!(term, "%s %d%c", "temp", -4, 'C').unwrap();
/// assert_eq!(&term.sink()[..], b"temp -4C");
/// ```
#[macro_export]
macro_rules! printf {
    ($out:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $out.printf($fmt, &[$($crate::format::Arg::from($arg)),*])
    };
}
