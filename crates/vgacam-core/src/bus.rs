//! Register bus protocol
//!
//! The `RegisterBus` trait is the seam between the core and the transport
//! backends (Linux i2c-dev, the in-memory dummy). Trait methods are single
//! attempts; the retry policy and the register-program write loop live here
//! so every backend gets the same behavior.

use crate::error::{Error, Result};
use crate::program::RegisterProgram;

/// Delay between the two attempts of a failed transaction, in milliseconds
pub const POLL_TIME_MS: u32 = 10;

/// Register bus transport (blocking)
///
/// Implementations perform one raw attempt per call; retrying is handled by
/// the free functions in this module. Every method blocks the calling thread
/// for the full duration of the transaction.
pub trait RegisterBus {
    /// Perform a single two-byte write transaction (sub-address, value)
    fn write(&mut self, addr: u8, value: u8) -> Result<()>;

    /// Perform a single write-then-read transaction, returning one byte
    fn read(&mut self, addr: u8) -> Result<u8>;

    /// Block the calling thread for the given number of milliseconds
    fn delay_ms(&mut self, ms: u32);
}

#[cfg(feature = "alloc")]
impl RegisterBus for alloc::boxed::Box<dyn RegisterBus> {
    fn write(&mut self, addr: u8, value: u8) -> Result<()> {
        (**self).write(addr, value)
    }

    fn read(&mut self, addr: u8) -> Result<u8> {
        (**self).read(addr)
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

/// Write one register with the one-retry policy
///
/// A failed attempt is retried once after [`POLL_TIME_MS`]; if both attempts
/// fail the error surfaces as [`Error::Transport`].
pub fn write_register<B: RegisterBus + ?Sized>(bus: &mut B, addr: u8, value: u8) -> Result<()> {
    if bus.write(addr, value).is_ok() {
        return Ok(());
    }
    bus.delay_ms(POLL_TIME_MS);
    bus.write(addr, value).map_err(|_| {
        log::warn!("register write 0x{:02x} <- 0x{:02x} failed twice", addr, value);
        Error::Transport
    })
}

/// Read one register with the one-retry policy
pub fn read_register<B: RegisterBus + ?Sized>(bus: &mut B, addr: u8) -> Result<u8> {
    if let Ok(value) = bus.read(addr) {
        return Ok(value);
    }
    bus.delay_ms(POLL_TIME_MS);
    bus.read(addr).map_err(|_| {
        log::warn!("register read 0x{:02x} failed twice", addr);
        Error::Transport
    })
}

/// Execute a register program entry by entry
///
/// Delay directives block the caller for the directive's millisecond count.
/// On the first write failure the remaining entries are abandoned and the
/// error reports how many entries were applied; nothing is rolled back.
pub fn write_program<B: RegisterBus + ?Sized>(bus: &mut B, program: &RegisterProgram) -> Result<()> {
    log::debug!("writing program {} ({} entries)", program.name, program.len());
    for (completed, entry) in program.entries().enumerate() {
        if entry.is_delay() {
            log::trace!("{}: delay {} ms", program.name, entry.value);
            bus.delay_ms(entry.value as u32);
            continue;
        }
        write_register(bus, entry.addr, entry.value)
            .map_err(|_| Error::PartiallyApplied { completed })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ScriptedBus;

    #[test]
    fn write_register_retries_once_after_poll_delay() {
        // first attempt fails, second succeeds
        let mut bus = ScriptedBus::new();
        bus.fail_next_writes(1);
        assert_eq!(write_register(&mut bus, 0x03, 0x10), Ok(()));
        assert_eq!(bus.write_attempts.len(), 2);
        assert_eq!(bus.delays_ms, alloc::vec![POLL_TIME_MS]);
    }

    #[test]
    fn write_register_gives_up_after_two_attempts() {
        let mut bus = ScriptedBus::new();
        bus.fail_next_writes(2);
        assert_eq!(write_register(&mut bus, 0x03, 0x10), Err(Error::Transport));
        assert_eq!(bus.write_attempts.len(), 2);
    }

    #[test]
    fn read_register_retries_once() {
        let mut bus = ScriptedBus::new();
        bus.regs[0x04] = 0x8C;
        bus.fail_next_reads(1);
        assert_eq!(read_register(&mut bus, 0x04), Ok(0x8C));
    }

    #[test]
    fn program_without_delays_issues_every_write_in_order() {
        static WORDS: [u16; 4] = [0x0300, 0x1021, 0x1103, 0x4080];
        let program = RegisterProgram::new("plain", &WORDS);
        let mut bus = ScriptedBus::new();
        write_program(&mut bus, &program).unwrap();
        assert_eq!(
            bus.applied,
            alloc::vec![(0x03, 0x00), (0x10, 0x21), (0x11, 0x03), (0x40, 0x80)]
        );
    }

    #[test]
    fn delay_directive_sleeps_instead_of_writing() {
        static WORDS: [u16; 3] = [0x0300, 0xFF14, 0x1103];
        let program = RegisterProgram::new("delayed", &WORDS);
        let mut bus = ScriptedBus::new();
        write_program(&mut bus, &program).unwrap();
        assert_eq!(bus.applied, alloc::vec![(0x03, 0x00), (0x11, 0x03)]);
        assert_eq!(bus.delays_ms, alloc::vec![20]);
    }

    #[test]
    fn mid_program_failure_reports_completed_count() {
        static WORDS: [u16; 3] = [0x0300, 0x1021, 0x1103];
        let program = RegisterProgram::new("aborted", &WORDS);
        let mut bus = ScriptedBus::new();
        // second entry fails on both attempts
        bus.fail_writes_from(1, usize::MAX);
        let err = write_program(&mut bus, &program).unwrap_err();
        assert_eq!(err, Error::PartiallyApplied { completed: 1 });
        assert_eq!(bus.applied, alloc::vec![(0x03, 0x00)]);
    }
}
