//! Dispatch session
//!
//! The session carries the mode flag, the loaded tuning table, the sticky
//! bus-fault flag and the sensor state that the original firmware kept in
//! process-wide statics. Passing it explicitly keeps the coupling between
//! the dispatcher and init visible at every call site.

use crate::bus::{write_program, RegisterBus};
use crate::error::Result;
use crate::program::RegisterProgram;
use crate::state::SensorState;
use crate::tuning::{interpret_block, TuningTable};

/// Dispatch mode, decided once per init
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningMode {
    /// Execute the compiled-in binary word tables
    Binary,
    /// Re-derive programs from the loaded tuning table text
    Tuning,
}

/// Where register programs are sourced from
///
/// Holding the table inside the variant makes "tuning mode without a table"
/// unrepresentable.
pub enum ProgramSource {
    /// Compiled-in binary tables
    Binary,
    /// Loaded tuning table
    Table(TuningTable),
}

impl ProgramSource {
    /// The mode this source implies
    pub fn mode(&self) -> TuningMode {
        match self {
            Self::Binary => TuningMode::Binary,
            Self::Table(_) => TuningMode::Tuning,
        }
    }
}

/// Per-subsystem session state
pub struct Session {
    source: ProgramSource,
    bus_fault: bool,
    /// Sensor runtime state
    pub state: SensorState,
}

impl Session {
    /// Create a session in binary mode with default sensor state
    pub fn new() -> Self {
        Self {
            source: ProgramSource::Binary,
            bus_fault: false,
            state: SensorState::default(),
        }
    }

    /// Current dispatch mode
    pub fn mode(&self) -> TuningMode {
        self.source.mode()
    }

    /// Replace the program source (done once per init)
    pub fn set_source(&mut self, source: ProgramSource) {
        log::debug!("dispatch mode: {:?}", source.mode());
        self.source = source;
    }

    /// Whether the sticky bus fault is set
    pub fn bus_fault(&self) -> bool {
        self.bus_fault
    }

    /// Latch the sticky bus fault
    pub fn set_bus_fault(&mut self) {
        self.bus_fault = true;
    }

    /// Clear the sticky bus fault (init entry)
    pub fn clear_bus_fault(&mut self) {
        self.bus_fault = false;
    }

    /// Dispatch a register program according to the session mode
    ///
    /// Binary mode executes the program's word table; tuning mode interprets
    /// the block of the same name from the loaded table and ignores the
    /// binary words, which are retained only as the binary-mode payload.
    pub fn apply_program<B: RegisterBus + ?Sized>(
        &self,
        bus: &mut B,
        program: &RegisterProgram,
    ) -> Result<()> {
        match &self.source {
            ProgramSource::Binary => write_program(bus, program),
            ProgramSource::Table(table) => interpret_block(bus, table, program.name),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testutil::ScriptedBus;
    use alloc::vec;

    static PROGRAM: RegisterProgram = RegisterProgram::new("foo", &[0x0102, 0x0304]);

    #[test]
    fn binary_mode_never_touches_the_table() {
        let mut session = Session::new();
        session.set_source(ProgramSource::Binary);
        let mut bus = ScriptedBus::new();
        session.apply_program(&mut bus, &PROGRAM).unwrap();
        assert_eq!(bus.applied, vec![(0x01, 0x02), (0x03, 0x04)]);
    }

    #[test]
    fn tuning_mode_ignores_the_binary_words() {
        let table = TuningTable::from_bytes(b"foo[] = {\n0x0506,\n};\n\n".to_vec());
        let mut session = Session::new();
        session.set_source(ProgramSource::Table(table));
        assert_eq!(session.mode(), TuningMode::Tuning);
        let mut bus = ScriptedBus::new();
        session.apply_program(&mut bus, &PROGRAM).unwrap();
        // only the table's entry, not the binary 0x0102/0x0304 pair
        assert_eq!(bus.applied, vec![(0x05, 0x06)]);
    }

    #[test]
    fn tuning_mode_surfaces_missing_blocks() {
        let table = TuningTable::from_bytes(b"bar[] = {\n0x0506,\n};\n\n".to_vec());
        let mut session = Session::new();
        session.set_source(ProgramSource::Table(table));
        let mut bus = ScriptedBus::new();
        assert_eq!(
            session.apply_program(&mut bus, &PROGRAM),
            Err(Error::BlockNotFound)
        );
        assert!(bus.write_attempts.is_empty());
    }
}
