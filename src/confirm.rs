// Single-key confirmation input used by `clear`

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;
use crossterm::tty::IsTty;
use std::io::{self, Read};

/// Source of the one character answering a yes/no prompt.
pub trait KeyReader {
    /// Block until one key arrives. `None` means end of input or a non-character key.
    fn read_key(&mut self) -> Result<Option<char>>;
}

/// Reads one byte from any reader (piped stdin, test buffers).
pub struct ReaderKeys<R: Read> {
    inner: R,
}

impl<R: Read> ReaderKeys<R> {
    pub fn new(inner: R) -> Self {
        ReaderKeys { inner }
    }
}

impl<R: Read> KeyReader for ReaderKeys<R> {
    fn read_key(&mut self) -> Result<Option<char>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0] as char)),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Reads a single keypress from the terminal in raw mode, without waiting for Enter.
pub struct TerminalKeys;

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl KeyReader for TerminalKeys {
    fn read_key(&mut self) -> Result<Option<char>> {
        let _raw = RawModeGuard::enable()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                return Ok(match key.code {
                    KeyCode::Char(c) => Some(c),
                    _ => None,
                });
            }
        }
    }
}

/// Raw-mode terminal reader when stdin is a TTY, plain byte reader otherwise.
pub fn stdin_keys() -> Box<dyn KeyReader> {
    if io::stdin().is_tty() {
        Box::new(TerminalKeys)
    } else {
        Box::new(ReaderKeys::new(io::stdin()))
    }
}
