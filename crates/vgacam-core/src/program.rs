//! Register write units and register programs
//!
//! A register program is an ordered sequence of (address, value) pairs
//! expressing one configuration intent ("30 fps", "effect sepia", "init").
//! Programs are authored as static 16-bit word tables where the high byte is
//! the register sub-address and the low byte the value, matching the wire
//! encoding of the two-byte bus transaction.

/// Address byte that marks a delay directive instead of a register write.
/// The paired value byte is a delay in milliseconds.
pub const DELAY_MARKER: u8 = 0xFF;

/// A single two-byte register transaction, immutable once constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    /// Register sub-address
    pub addr: u8,
    /// Value to write (or milliseconds when `addr` is the delay marker)
    pub value: u8,
}

impl RegisterWrite {
    /// Create a register write from address and value bytes
    pub const fn new(addr: u8, value: u8) -> Self {
        Self { addr, value }
    }

    /// Decode the 16-bit table word `0xAAVV` (address high, value low)
    pub const fn from_word(word: u16) -> Self {
        Self {
            addr: (word >> 8) as u8,
            value: word as u8,
        }
    }

    /// Whether this entry is a delay directive rather than a bus write
    pub const fn is_delay(&self) -> bool {
        self.addr == DELAY_MARKER
    }
}

/// An ordered, named sequence of register writes
///
/// The name doubles as the block name looked up in the tuning table when the
/// dispatcher runs in tuning mode, so the binary words and the text block
/// stay interchangeable.
#[derive(Debug, Clone, Copy)]
pub struct RegisterProgram {
    /// Symbolic name, also the tuning-table block name
    pub name: &'static str,
    /// Encoded entries in execution order
    pub words: &'static [u16],
}

impl RegisterProgram {
    /// Create a program over a static word table
    pub const fn new(name: &'static str, words: &'static [u16]) -> Self {
        Self { name, words }
    }

    /// Number of entries (including delay directives)
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the program has no entries
    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate decoded entries in order
    pub fn entries(&self) -> impl Iterator<Item = RegisterWrite> + '_ {
        self.words.iter().map(|&w| RegisterWrite::from_word(w))
    }
}
