//! Line editor and input state machine.
//!
//! The editor turns a raw byte stream into lines. It keeps a bounded line
//! buffer with an insertion cursor, understands backspace and the arrow-key
//! escape sequences, and echoes whatever is needed to keep the remote
//! terminal's display in step with the buffer.
//!
//! ```text
//!            ESC               '['
//!  Normal ────────▶ Escape ────────▶ Bracket
//!    ▲                │                │ 'A' 'B' 'C' 'D' or any other byte
//!    └────────────────┴────────────────┘
//!         any other byte
//! ```
//!
//! Escape sequences never time out: a lone `ESC` waits for the next byte.

use super::error::Error;
use super::terminal::Terminal;
use crate::config::MAX_INPUT;
use crate::io::ByteSink;
use heapless::Vec;

/// Longest line the editor accepts; one slot of [`MAX_INPUT`] is reserved.
pub const LINE_CAPACITY: usize = MAX_INPUT - 1;

/// ASCII bell character (0x07).
pub const ASCII_BEL: u8 = 0x07;
/// ASCII backspace character (0x08).
pub const ASCII_BACKSPACE: u8 = 0x08;
/// ASCII line feed character (0x0A).
pub const ASCII_LF: u8 = 0x0A;
/// ASCII carriage return character (0x0D).
pub const ASCII_CR: u8 = 0x0D;
/// ASCII escape character (0x1B).
pub const ASCII_ESC: u8 = 0x1B;
/// ASCII space character (0x20).
pub const ASCII_SPACE: u8 = 0x20;
/// ASCII delete character (0x7F).
pub const ASCII_DEL: u8 = 0x7F;

/// VT100 final byte for arrow up.
pub const VT100_ARROW_UP: u8 = b'A';
/// VT100 final byte for arrow down.
pub const VT100_ARROW_DOWN: u8 = b'B';
/// VT100 final byte for arrow right.
pub const VT100_ARROW_RIGHT: u8 = b'C';
/// VT100 final byte for arrow left.
pub const VT100_ARROW_LEFT: u8 = b'D';

const CURSOR_RIGHT: &[u8] = b"\x1b[C";
const CURSOR_LEFT: &[u8] = b"\x1b[D";

/// Escape sequence progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeState {
    /// Plain input
    Normal,
    /// Received `ESC`
    Escape,
    /// Received `ESC [`
    Bracket,
}

/// What a fed byte did to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// The byte was applied (or ignored); the line is still open.
    Consumed,
    /// A line terminator arrived; [`Editor::line`] holds the complete line.
    /// Nothing has been echoed for the terminator yet.
    LineReady,
}

/// Editable line buffer with a single recall slot.
#[derive(Debug)]
pub struct Editor {
    line: Vec<u8, LINE_CAPACITY>,
    cursor: usize,
    state: EscapeState,
    recall: Vec<u8, LINE_CAPACITY>,
    echo: bool,
    history: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an empty editor with echo and history enabled.
    pub const fn new() -> Self {
        Self {
            line: Vec::new(),
            cursor: 0,
            state: EscapeState::Normal,
            recall: Vec::new(),
            echo: true,
            history: true,
        }
    }

    /// Enable or disable echoing of input and editing sequences.
    pub fn set_echo(&mut self, enabled: bool) {
        self.echo = enabled;
    }

    /// Enable or disable the recall slot. Disabling it also forgets the
    /// stored line.
    pub fn set_history(&mut self, enabled: bool) {
        self.history = enabled;
        if !enabled {
            self.recall.clear();
        }
    }

    /// Current line contents.
    pub fn line(&self) -> &str {
        // Only printable ASCII is ever inserted
        core::str::from_utf8(&self.line).unwrap_or("")
    }

    /// Current line length.
    pub fn len(&self) -> usize {
        self.line.len()
    }

    /// Whether the line is empty.
    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Insertion point, always within `0..=len()`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Escape sequence progress.
    pub fn state(&self) -> EscapeState {
        self.state
    }

    /// Line held in the recall slot.
    pub fn recalled(&self) -> &str {
        core::str::from_utf8(&self.recall).unwrap_or("")
    }

    /// Empty the line after it has been consumed.
    pub fn clear(&mut self) {
        self.line.clear();
        self.cursor = 0;
    }

    /// Store the current line in the recall slot.
    pub fn remember(&mut self) {
        if self.history {
            self.recall = self.line.clone();
        }
    }

    /// Apply one input byte.
    pub fn feed<W: ByteSink>(&mut self, byte: u8, term: &mut Terminal<W>) -> Result<Edit, Error> {
        match self.state {
            EscapeState::Normal => return self.feed_normal(byte, term),
            EscapeState::Escape => {
                self.state = if byte == b'[' {
                    EscapeState::Bracket
                } else {
                    EscapeState::Normal
                };
            }
            EscapeState::Bracket => {
                self.state = EscapeState::Normal;
                match byte {
                    VT100_ARROW_UP => self.recall_previous(term)?,
                    VT100_ARROW_DOWN => self.recall_next(term)?,
                    VT100_ARROW_RIGHT => self.move_right(term)?,
                    VT100_ARROW_LEFT => self.move_left(term)?,
                    _ => {}
                }
            }
        }
        Ok(Edit::Consumed)
    }

    fn feed_normal<W: ByteSink>(&mut self, byte: u8, term: &mut Terminal<W>) -> Result<Edit, Error> {
        match byte {
            // Terminator echo is left to the caller
            ASCII_CR | ASCII_LF => return Ok(Edit::LineReady),
            ASCII_BACKSPACE | ASCII_DEL => self.erase(term)?,
            ASCII_ESC => self.state = EscapeState::Escape,
            0x20..=0x7E => self.insert(byte, term)?,
            _ => {}
        }
        Ok(Edit::Consumed)
    }

    fn insert<W: ByteSink>(&mut self, byte: u8, term: &mut Terminal<W>) -> Result<(), Error> {
        if self.line.insert(self.cursor, byte).is_err() {
            debug!("line full, dropping byte");
            if self.echo {
                term.put(ASCII_BEL)?;
            }
            return Ok(());
        }
        self.cursor += 1;

        if self.echo {
            // Redraw from the new byte to the end, then walk back to the cursor
            term.put_bytes(&self.line[self.cursor - 1..])?;
            term.repeat(ASCII_BACKSPACE, self.line.len() - self.cursor)?;
        }
        Ok(())
    }

    fn erase<W: ByteSink>(&mut self, term: &mut Terminal<W>) -> Result<(), Error> {
        if self.cursor == 0 {
            return Ok(());
        }
        self.cursor -= 1;
        self.line.remove(self.cursor);

        if self.echo {
            let tail = self.line.len() - self.cursor;
            term.put(ASCII_BACKSPACE)?;
            term.put_bytes(&self.line[self.cursor..])?;
            term.put(ASCII_SPACE)?;
            term.repeat(ASCII_BACKSPACE, tail + 1)?;
        }
        Ok(())
    }

    fn move_left<W: ByteSink>(&mut self, term: &mut Terminal<W>) -> Result<(), Error> {
        if self.cursor > 0 {
            self.cursor -= 1;
            if self.echo {
                term.put_bytes(CURSOR_LEFT)?;
            }
        }
        Ok(())
    }

    fn move_right<W: ByteSink>(&mut self, term: &mut Terminal<W>) -> Result<(), Error> {
        if self.cursor < self.line.len() {
            self.cursor += 1;
            if self.echo {
                term.put_bytes(CURSOR_RIGHT)?;
            }
        }
        Ok(())
    }

    fn recall_previous<W: ByteSink>(&mut self, term: &mut Terminal<W>) -> Result<(), Error> {
        if !self.history || self.recall.is_empty() {
            return Ok(());
        }
        debug!("recalling previous line");
        let previous = self.recall.clone();
        self.replace_line(previous, term)
    }

    fn recall_next<W: ByteSink>(&mut self, term: &mut Terminal<W>) -> Result<(), Error> {
        if !self.history {
            return Ok(());
        }
        self.replace_line(Vec::new(), term)
    }

    fn replace_line<W: ByteSink>(
        &mut self,
        content: Vec<u8, LINE_CAPACITY>,
        term: &mut Terminal<W>,
    ) -> Result<(), Error> {
        let stale = self.line.len().saturating_sub(content.len());
        let cursor = self.cursor;
        self.line = content;
        self.cursor = self.line.len();

        if self.echo {
            term.repeat(ASCII_BACKSPACE, cursor)?;
            term.put_bytes(&self.line)?;
            term.repeat(ASCII_SPACE, stale)?;
            term.repeat(ASCII_BACKSPACE, stale)?;
        }
        Ok(())
    }
}
