//! vgacam-dummy - In-memory emulated backends for testing
//!
//! This crate provides a dummy register bus and a dummy power backend that
//! record every transaction and transition. They are useful for testing and
//! development without real hardware, and back the CLI's `dummy` backend.
//! Failures are scriptable so error paths can be exercised deterministically.

use vgacam_core::bus::RegisterBus;
use vgacam_core::error::{Error, Result};
use vgacam_core::power::{PowerBackend, PowerLine, Regulator};
use vgacam_core::programs;

/// Emulated register bus
///
/// Registers live in a flat 256-byte map; the device-ID register is
/// pre-loaded so a default-constructed bus passes init. Writes and reads can
/// be scripted to fail for a number of attempts.
pub struct DummyBus {
    /// Register file
    pub regs: [u8; 256],
    /// Successful writes, in order
    pub applied: Vec<(u8, u8)>,
    /// Every write attempt, including failed ones
    pub write_attempts: Vec<(u8, u8)>,
    /// Every read attempt
    pub read_attempts: Vec<u8>,
    /// Recorded delays
    pub delays_ms: Vec<u32>,
    fail_writes: usize,
    fail_reads: usize,
}

impl DummyBus {
    /// Create a bus whose device-ID register answers with the expected ID
    pub fn new() -> Self {
        let mut regs = [0u8; 256];
        regs[programs::DEVICE_ID_REG as usize] = programs::DEVICE_ID;
        Self {
            regs,
            applied: Vec::new(),
            write_attempts: Vec::new(),
            read_attempts: Vec::new(),
            delays_ms: Vec::new(),
            fail_writes: 0,
            fail_reads: 0,
        }
    }

    /// Fail the next `n` write attempts
    pub fn fail_next_writes(&mut self, n: usize) {
        self.fail_writes = n;
    }

    /// Fail the next `n` read attempts
    pub fn fail_next_reads(&mut self, n: usize) {
        self.fail_reads = n;
    }

    /// Drop recorded history, keeping the register file
    pub fn clear_history(&mut self) {
        self.applied.clear();
        self.write_attempts.clear();
        self.read_attempts.clear();
        self.delays_ms.clear();
    }
}

impl Default for DummyBus {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterBus for DummyBus {
    fn write(&mut self, addr: u8, value: u8) -> Result<()> {
        self.write_attempts.push((addr, value));
        if self.fail_writes > 0 {
            self.fail_writes -= 1;
            return Err(Error::Transport);
        }
        log::trace!("dummy write 0x{:02x} = 0x{:02x}", addr, value);
        self.regs[addr as usize] = value;
        self.applied.push((addr, value));
        Ok(())
    }

    fn read(&mut self, addr: u8) -> Result<u8> {
        self.read_attempts.push(addr);
        if self.fail_reads > 0 {
            self.fail_reads -= 1;
            return Err(Error::Transport);
        }
        Ok(self.regs[addr as usize])
    }

    fn delay_ms(&mut self, ms: u32) {
        // No real sleeping for in-memory operation
        self.delays_ms.push(ms);
    }
}

/// One recorded power transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerEvent {
    /// Lines acquired
    Acquire,
    /// Lines released
    Release,
    /// GPIO line driven
    Line(PowerLine, bool),
    /// Regulator switched
    Regulator(Regulator, bool),
    /// Clock output gated
    Clock(bool),
    /// Delay executed
    DelayUs(u32),
    /// Bus controller recovery
    BusRecover,
}

/// Emulated power backend recording every transition
pub struct DummyPower {
    /// Recorded transitions, in order
    pub events: Vec<PowerEvent>,
    /// Fail the next acquire calls
    pub fail_acquire: bool,
}

impl DummyPower {
    /// Create an idle backend
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            fail_acquire: false,
        }
    }
}

impl Default for DummyPower {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerBackend for DummyPower {
    fn acquire(&mut self) -> Result<()> {
        if self.fail_acquire {
            return Err(Error::GpioUnavailable);
        }
        self.events.push(PowerEvent::Acquire);
        Ok(())
    }

    fn release(&mut self) {
        self.events.push(PowerEvent::Release);
    }

    fn set_line(&mut self, line: PowerLine, high: bool) -> Result<()> {
        self.events.push(PowerEvent::Line(line, high));
        Ok(())
    }

    fn set_regulator(&mut self, regulator: Regulator, on: bool) -> Result<()> {
        self.events.push(PowerEvent::Regulator(regulator, on));
        Ok(())
    }

    fn set_clock(&mut self, enabled: bool) -> Result<()> {
        self.events.push(PowerEvent::Clock(enabled));
        Ok(())
    }

    fn recover_bus(&mut self) -> Result<()> {
        self.events.push(PowerEvent::BusRecover);
        Ok(())
    }

    fn delay_us(&mut self, us: u32) {
        self.events.push(PowerEvent::DelayUs(us));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgacam_core::camera::Camera;
    use vgacam_core::controls::{Control, ControlKind, ExposureBias};
    use vgacam_core::power::PowerState;
    use vgacam_core::session::TuningMode;
    use vgacam_core::tuning::TuningTable;

    fn camera() -> Camera<DummyBus, DummyPower> {
        Camera::new(DummyBus::new(), DummyPower::new())
    }

    /// Non-delay entry count of a program
    fn writes_in(program: &vgacam_core::program::RegisterProgram) -> usize {
        program.entries().filter(|e| !e.is_delay()).count()
    }

    #[test]
    fn init_reads_device_id_then_dispatches_init_program() {
        let mut cam = camera();
        cam.init().unwrap();
        assert!(!cam.bus_fault());
        let bus = cam.bus_mut();
        assert_eq!(bus.read_attempts, vec![programs::DEVICE_ID_REG]);
        assert_eq!(bus.applied.len(), writes_in(&programs::INIT));
        assert_eq!(bus.applied[0], (0x03, 0x00));
    }

    #[test]
    fn vt_mode_selects_the_vt_init_table() {
        let mut cam = camera();
        cam.set_control(Control::VtMode(true)).unwrap();
        cam.init().unwrap();
        assert_eq!(cam.bus_mut().applied.len(), writes_in(&programs::INIT_VT));
    }

    #[test]
    fn transport_failure_after_init_does_not_latch_the_bus_fault() {
        let mut cam = camera();
        cam.init().unwrap();
        cam.bus_mut().clear_history();
        cam.bus_mut().fail_next_writes(usize::MAX);
        let err = cam
            .set_control(Control::Exposure(ExposureBias::Minus2))
            .unwrap_err();
        assert_eq!(err, Error::PartiallyApplied { completed: 0 });
        // only device-ID read failures at init latch the fault
        assert!(!cam.bus_fault());
    }

    #[test]
    fn device_id_failure_latches_the_fault_until_a_successful_init() {
        let mut cam = camera();
        cam.bus_mut().fail_next_reads(2); // both attempts of the retry
        assert_eq!(cam.init(), Err(Error::InitFailed));
        assert!(cam.bus_fault());

        // control writes short-circuit without touching the bus
        cam.bus_mut().clear_history();
        assert_eq!(
            cam.set_control(Control::Exposure(ExposureBias::Plus1)),
            Err(Error::InitFailed)
        );
        assert!(cam.bus_mut().write_attempts.is_empty());
        assert!(cam.bus_mut().read_attempts.is_empty());

        // a successful init clears the fault and restores dispatch
        cam.init().unwrap();
        assert!(!cam.bus_fault());
        cam.bus_mut().clear_history();
        cam.set_control(Control::Exposure(ExposureBias::Plus1)).unwrap();
        assert!(!cam.bus_mut().applied.is_empty());
    }

    #[test]
    fn preview_is_refused_while_the_fault_is_latched() {
        let mut cam = camera();
        cam.init().unwrap();
        cam.set_control(Control::DatalineTest(true)).unwrap();

        // a later init fails its device-ID read and latches the fault
        cam.bus_mut().fail_next_reads(2);
        assert_eq!(cam.init(), Err(Error::InitFailed));
        assert!(cam.bus_fault());

        // preview refuses without writing the test pattern
        cam.bus_mut().clear_history();
        assert_eq!(cam.start_preview(), Err(Error::InitFailed));
        assert!(cam.bus_mut().write_attempts.is_empty());
    }

    #[test]
    fn raw_controls_are_refused_while_the_fault_is_latched() {
        let mut cam = camera();
        cam.bus_mut().fail_next_reads(2);
        assert_eq!(cam.init(), Err(Error::InitFailed));

        cam.bus_mut().clear_history();
        // the refusal comes before value mapping, so an unsupported value
        // is refused rather than ignored
        assert_eq!(
            cam.set_control_raw(ControlKind::FrameRate, 30),
            Err(Error::InitFailed)
        );
        assert_eq!(
            cam.set_control_raw(ControlKind::FrameRate, 15),
            Err(Error::InitFailed)
        );
        assert!(cam.bus_mut().write_attempts.is_empty());
    }

    #[test]
    fn reset_is_power_off_then_on_with_settle_delays_then_init() {
        let mut cam = camera();
        cam.power_on().unwrap();
        cam.init().unwrap();
        cam.power_mut().events.clear();
        cam.bus_mut().clear_history();

        cam.reset().unwrap();

        let events = &cam.power_mut().events;
        // off-sequence first, bounded by its bus recovery
        let recover = events
            .iter()
            .position(|e| *e == PowerEvent::BusRecover)
            .unwrap();
        assert_eq!(events[0], PowerEvent::Acquire);
        assert_eq!(events[recover + 1], PowerEvent::DelayUs(5_000));
        // on-sequence follows and ends with the trailing settle delay
        assert_eq!(events[recover + 2], PowerEvent::Acquire);
        assert_eq!(*events.last().unwrap(), PowerEvent::DelayUs(5_000));
        assert_eq!(cam.power_state(), PowerState::On);

        // init ran again
        assert_eq!(cam.bus_mut().read_attempts, vec![programs::DEVICE_ID_REG]);
        assert!(!cam.bus_mut().applied.is_empty());
    }

    #[test]
    fn table_loader_switches_the_session_into_tuning_mode() {
        let text = b"init_reg[] = {\n0x0300, 0x0155,\n};\n\n".to_vec();
        let mut cam = camera().with_table_loader(Box::new(move || {
            Some(TuningTable::from_bytes(text.clone()))
        }));
        cam.init().unwrap();
        assert_eq!(cam.mode(), TuningMode::Tuning);
        // the table's two entries, not the binary init program
        assert_eq!(cam.bus_mut().applied, vec![(0x03, 0x00), (0x01, 0x55)]);
        // table load success adds the 100 ms settle before the ID read
        assert!(cam.bus_mut().delays_ms.contains(&100));
    }

    #[test]
    fn failed_table_load_falls_back_to_binary_mode() {
        let mut cam = camera().with_table_loader(Box::new(|| None));
        cam.init().unwrap();
        assert_eq!(cam.mode(), TuningMode::Binary);
        assert_eq!(cam.bus_mut().applied.len(), writes_in(&programs::INIT));
    }

    #[test]
    fn unsupported_raw_value_is_a_no_op() {
        let mut cam = camera();
        cam.init().unwrap();
        cam.bus_mut().clear_history();
        cam.set_control_raw(ControlKind::FrameRate, 30).unwrap();
        assert!(cam.bus_mut().write_attempts.is_empty());
    }

    #[test]
    fn dataline_stop_applies_stop_program_then_resets() {
        let mut cam = camera();
        cam.power_on().unwrap();
        cam.init().unwrap();
        cam.set_control(Control::DatalineTest(true)).unwrap();
        cam.bus_mut().clear_history();
        cam.power_mut().events.clear();

        cam.set_control(Control::DatalineStop).unwrap();

        assert!(!cam.state().dataline_test);
        // stop program written before the power cycle
        assert_eq!(cam.bus_mut().applied[..2], [(0x03, 0x00), (0x50, 0x00)]);
        assert!(cam
            .power_mut()
            .events
            .contains(&PowerEvent::BusRecover));
    }

    #[test]
    fn preview_writes_the_test_pattern_when_requested() {
        let mut cam = camera();
        cam.init().unwrap();
        cam.set_control(Control::DatalineTest(true)).unwrap();
        cam.bus_mut().clear_history();
        cam.start_preview().unwrap();
        assert_eq!(cam.bus_mut().applied, vec![(0x03, 0x00), (0x50, 0x05)]);
    }
}
