//! Tuning-table interpreter
//!
//! A tuning table is a plain-text resource containing the same register
//! programs the crate compiles in as binary tables, as named C-like array
//! blocks of `0xAABB` tokens closed by `};`. Field engineers drop an edited
//! table onto the device and the interpreter re-derives the (address, value)
//! stream from text at dispatch time, so register programs can be changed
//! without rebuilding.
//!
//! Token extraction is bounds-checked throughout: a truncated token or an
//! unterminated block fails cleanly with [`Error::MalformedEntry`] instead
//! of scanning out of bounds.

use alloc::vec::Vec;

use crate::bus::{write_register, RegisterBus};
use crate::error::{Error, Result};
use crate::program::RegisterWrite;

/// Hex token width in the table text: `0xAABB`
const TOKEN_LEN: usize = 6;

/// Block terminator marker
const BLOCK_END: &[u8] = b"};";

/// An in-memory tuning table, loaded once and treated as read-only
///
/// The buffer is NUL-terminated at construction; that is the only write it
/// ever sees.
pub struct TuningTable {
    data: Vec<u8>,
}

impl TuningTable {
    /// Take ownership of raw table bytes, enforcing NUL termination
    pub fn from_bytes(mut data: Vec<u8>) -> Self {
        match data.last_mut() {
            Some(last) => *last = 0,
            None => data.push(0),
        }
        Self { data }
    }

    /// Load a table from a file
    #[cfg(feature = "std")]
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        log::info!("loaded tuning table {} ({} bytes)", path.display(), data.len());
        Ok(Self::from_bytes(data))
    }

    /// Raw table contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Table size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Find `needle` in `haystack` starting at `from`
fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

/// Interpret the named block of the table, issuing each entry on the bus
///
/// Locates the first occurrence of `name`, bounds the scan at the `};`
/// terminator that closes the block and feeds every `0xAABB` token through
/// the bus writer one at a time. A `0xFF` address byte is a delay directive
/// and sleeps for the value in milliseconds instead of writing. On a write
/// failure the remaining tokens are abandoned and the error reports the
/// number of entries already executed.
pub fn interpret_block<B: RegisterBus + ?Sized>(
    bus: &mut B,
    table: &TuningTable,
    name: &str,
) -> Result<()> {
    let data = table.as_bytes();
    let start = find(data, name.as_bytes(), 0).ok_or_else(|| {
        log::warn!("tuning block {} not found", name);
        Error::BlockNotFound
    })?;
    let end = find(data, BLOCK_END, start).ok_or_else(|| {
        log::warn!("tuning block {} is unterminated", name);
        Error::MalformedEntry
    })?;

    let mut pos = start;
    let mut completed = 0usize;
    while let Some(token) = find(&data[..end], b"0x", pos) {
        if token + TOKEN_LEN > end {
            log::warn!("tuning block {}: truncated token at offset {}", name, token);
            return Err(Error::MalformedEntry);
        }
        let text =
            core::str::from_utf8(&data[token + 2..token + TOKEN_LEN]).map_err(|_| Error::MalformedEntry)?;
        let word = u16::from_str_radix(text, 16).map_err(|_| Error::MalformedEntry)?;
        let entry = RegisterWrite::from_word(word);
        if entry.is_delay() {
            log::trace!("{}: delay {} ms", name, entry.value);
            bus.delay_ms(entry.value as u32);
        } else {
            write_register(bus, entry.addr, entry.value)
                .map_err(|_| Error::PartiallyApplied { completed })?;
        }
        completed += 1;
        pos = token + TOKEN_LEN;
    }

    log::debug!("tuning block {}: {} entries applied", name, completed);
    Ok(())
}
