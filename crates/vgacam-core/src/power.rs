//! Power and reset sequencing
//!
//! The sequencer turns logical power requests into ordered GPIO/regulator
//! transitions with fixed settling delays. The delay values and the step
//! order are a contract with the sensor datasheet and the board wiring;
//! do not reorder or merge steps.
//!
//! A transition that fails partway does not unwind supplies that are already
//! enabled; the caller recovers with a full power-off.

use crate::error::{Error, Result};

/// Power-control GPIO lines of the sensor module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerLine {
    /// GPIO-switched 2.8 V analog sensor supply
    AnalogPower,
    /// Standby line, high while the sensor runs
    Standby,
    /// Companion-chip enable, pulsed during power-on
    Enable,
    /// Companion-chip reset
    CompanionReset,
    /// Sensor reset
    Reset,
}

/// PMIC regulators feeding the sensor module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regulator {
    /// 1.8 V RAM supply
    Ram1v8,
    /// 1.2 V core digital supply
    Core1v2,
    /// 2.8 V I/O supply
    Io2v8,
    /// 2.8 V autofocus supply
    Af2v8,
}

/// Hardware backend for power transitions (blocking)
///
/// Line ownership is acquired and released per transition; the sequencer
/// never holds lines across calls.
pub trait PowerBackend {
    /// Acquire exclusive use of all power-control lines
    fn acquire(&mut self) -> Result<()>;

    /// Release the lines acquired by [`PowerBackend::acquire`]
    fn release(&mut self);

    /// Drive a GPIO line high or low
    fn set_line(&mut self, line: PowerLine, high: bool) -> Result<()>;

    /// Enable or disable a regulator
    fn set_regulator(&mut self, regulator: Regulator, on: bool) -> Result<()>;

    /// Gate the sensor master clock output
    fn set_clock(&mut self, enabled: bool) -> Result<()>;

    /// Force-stop and reinitialize the bus controller
    ///
    /// Power-off leaves the bus controller needing explicit recovery; the
    /// sequencer invokes this as the final power-off step.
    fn recover_bus(&mut self) -> Result<()>;

    /// Block the calling thread for the given number of microseconds
    fn delay_us(&mut self, us: u32);

    /// Block the calling thread for the given number of milliseconds
    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }
}

#[cfg(feature = "alloc")]
impl PowerBackend for alloc::boxed::Box<dyn PowerBackend> {
    fn acquire(&mut self) -> Result<()> {
        (**self).acquire()
    }

    fn release(&mut self) {
        (**self).release()
    }

    fn set_line(&mut self, line: PowerLine, high: bool) -> Result<()> {
        (**self).set_line(line, high)
    }

    fn set_regulator(&mut self, regulator: Regulator, on: bool) -> Result<()> {
        (**self).set_regulator(regulator, on)
    }

    fn set_clock(&mut self, enabled: bool) -> Result<()> {
        (**self).set_clock(enabled)
    }

    fn recover_bus(&mut self) -> Result<()> {
        (**self).recover_bus()
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}

/// Power state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    /// All supplies off
    Off,
    /// Power-on sequence in progress
    PoweringOn,
    /// Sensor powered and out of reset
    On,
    /// Power-off sequence in progress
    PoweringOff,
    /// Power-cycle in progress; re-enters `On` through re-initialization
    Resetting,
}

/// Drives the power state machine over a [`PowerBackend`]
pub struct PowerSequencer {
    state: PowerState,
}

impl PowerSequencer {
    /// New sequencer in the `Off` state
    pub fn new() -> Self {
        Self {
            state: PowerState::Off,
        }
    }

    /// Current state
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Run the power-on sequence
    pub fn power_on<P: PowerBackend + ?Sized>(&mut self, backend: &mut P) -> Result<()> {
        log::debug!("power on");
        self.state = PowerState::PoweringOn;
        let result = Self::run_power_on(backend);
        self.state = if result.is_ok() {
            PowerState::On
        } else {
            PowerState::Off
        };
        result
    }

    /// Run the power-off sequence, including bus-controller recovery
    pub fn power_off<P: PowerBackend + ?Sized>(&mut self, backend: &mut P) -> Result<()> {
        log::debug!("power off");
        self.state = PowerState::PoweringOff;
        let result = Self::run_power_off(backend);
        self.state = PowerState::Off;
        result
    }

    /// Power-cycle the sensor: off, 5 ms, on, 5 ms
    ///
    /// The caller must re-run sensor init afterwards; this is the only
    /// transition that re-enters `On` through re-initialization.
    pub fn reset<P: PowerBackend + ?Sized>(&mut self, backend: &mut P) -> Result<()> {
        if self.state != PowerState::On {
            // ESD recovery resets from unknown states; run the cycle anyway
            log::warn!("reset requested in state {:?}", self.state);
        }
        self.state = PowerState::Resetting;
        let result = (|| {
            Self::run_power_off(backend)?;
            backend.delay_ms(5);
            Self::run_power_on(backend)?;
            backend.delay_ms(5);
            Ok(())
        })();
        self.state = if result.is_ok() {
            PowerState::On
        } else {
            PowerState::Off
        };
        result
    }

    /// Enable supplies in order: analog, RAM, core, I/O, AF
    fn supplies_on<P: PowerBackend + ?Sized>(backend: &mut P) -> Result<()> {
        backend.set_line(PowerLine::AnalogPower, true)?;
        backend.set_regulator(Regulator::Ram1v8, true)?;
        backend.delay_us(20);
        backend.set_regulator(Regulator::Core1v2, true)?;
        backend.delay_us(15);
        backend.set_regulator(Regulator::Io2v8, true)?;
        backend.set_regulator(Regulator::Af2v8, true)?;
        Ok(())
    }

    /// Disable supplies in reverse order
    fn supplies_off<P: PowerBackend + ?Sized>(backend: &mut P) -> Result<()> {
        backend.set_regulator(Regulator::Io2v8, false)?;
        backend.set_regulator(Regulator::Af2v8, false)?;
        backend.set_regulator(Regulator::Core1v2, false)?;
        backend.set_regulator(Regulator::Ram1v8, false)?;
        backend.set_line(PowerLine::AnalogPower, false)?;
        Ok(())
    }

    fn run_power_on<P: PowerBackend + ?Sized>(backend: &mut P) -> Result<()> {
        backend.acquire().map_err(|_| Error::GpioUnavailable)?;
        Self::supplies_on(backend)?;
        backend.delay_us(20);
        backend.set_line(PowerLine::Standby, true)?;
        backend.set_clock(true)?;
        backend.delay_us(10);
        backend.set_line(PowerLine::Enable, true)?;
        backend.delay_ms(6);
        backend.set_line(PowerLine::CompanionReset, true)?;
        backend.delay_ms(7);
        backend.set_line(PowerLine::Enable, false)?;
        backend.delay_us(10);
        backend.set_line(PowerLine::Reset, true)?;
        backend.delay_ms(50);
        backend.release();
        Ok(())
    }

    fn run_power_off<P: PowerBackend + ?Sized>(backend: &mut P) -> Result<()> {
        backend.acquire().map_err(|_| Error::GpioUnavailable)?;
        let result = (|| -> Result<()> {
            backend.set_line(PowerLine::Reset, false)?;
            backend.set_line(PowerLine::CompanionReset, false)?;
            backend.delay_us(50);
            backend.set_clock(false)?;
            backend.set_line(PowerLine::Standby, false)?;
            backend.set_line(PowerLine::Enable, false)?;
            Self::supplies_off(backend)?;
            Ok(())
        })();
        backend.release();
        // the bus controller needs recovery even after a partial power-off
        let recovered = backend.recover_bus();
        result.and(recovered)
    }
}

impl Default for PowerSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{RecordingPower, Step};

    fn power_on_steps() -> alloc::vec::Vec<Step> {
        alloc::vec![
            Step::Acquire,
            Step::Line(PowerLine::AnalogPower, true),
            Step::Reg(Regulator::Ram1v8, true),
            Step::DelayUs(20),
            Step::Reg(Regulator::Core1v2, true),
            Step::DelayUs(15),
            Step::Reg(Regulator::Io2v8, true),
            Step::Reg(Regulator::Af2v8, true),
            Step::DelayUs(20),
            Step::Line(PowerLine::Standby, true),
            Step::Clock(true),
            Step::DelayUs(10),
            Step::Line(PowerLine::Enable, true),
            Step::DelayUs(6_000),
            Step::Line(PowerLine::CompanionReset, true),
            Step::DelayUs(7_000),
            Step::Line(PowerLine::Enable, false),
            Step::DelayUs(10),
            Step::Line(PowerLine::Reset, true),
            Step::DelayUs(50_000),
            Step::Release,
        ]
    }

    fn power_off_steps() -> alloc::vec::Vec<Step> {
        alloc::vec![
            Step::Acquire,
            Step::Line(PowerLine::Reset, false),
            Step::Line(PowerLine::CompanionReset, false),
            Step::DelayUs(50),
            Step::Clock(false),
            Step::Line(PowerLine::Standby, false),
            Step::Line(PowerLine::Enable, false),
            Step::Reg(Regulator::Io2v8, false),
            Step::Reg(Regulator::Af2v8, false),
            Step::Reg(Regulator::Core1v2, false),
            Step::Reg(Regulator::Ram1v8, false),
            Step::Line(PowerLine::AnalogPower, false),
            Step::Release,
            Step::Recover,
        ]
    }

    #[test]
    fn power_on_follows_the_mandated_order() {
        let mut seq = PowerSequencer::new();
        let mut backend = RecordingPower::new();
        seq.power_on(&mut backend).unwrap();
        assert_eq!(backend.steps, power_on_steps());
        assert_eq!(seq.state(), PowerState::On);
    }

    #[test]
    fn power_off_ends_with_bus_recovery() {
        let mut seq = PowerSequencer::new();
        let mut backend = RecordingPower::new();
        seq.power_on(&mut backend).unwrap();
        backend.steps.clear();
        seq.power_off(&mut backend).unwrap();
        assert_eq!(backend.steps, power_off_steps());
        assert_eq!(seq.state(), PowerState::Off);
    }

    #[test]
    fn acquire_failure_is_gpio_unavailable_and_touches_nothing() {
        let mut seq = PowerSequencer::new();
        let mut backend = RecordingPower::new();
        backend.fail_acquire = true;
        assert_eq!(seq.power_on(&mut backend), Err(Error::GpioUnavailable));
        assert!(backend.steps.is_empty());
        assert_eq!(seq.state(), PowerState::Off);
    }

    #[test]
    fn failed_power_off_still_releases_and_recovers_the_bus() {
        let mut seq = PowerSequencer::new();
        let mut backend = RecordingPower::new();
        seq.power_on(&mut backend).unwrap();
        backend.steps.clear();

        // first line transition (sensor reset low) fails
        backend.fail_next_lines(1);
        assert_eq!(seq.power_off(&mut backend), Err(Error::GpioUnavailable));
        assert_eq!(
            backend.steps,
            alloc::vec![Step::Acquire, Step::Release, Step::Recover]
        );
        assert_eq!(seq.state(), PowerState::Off);
    }

    #[test]
    fn reset_is_off_then_on_with_settle_delays() {
        let mut seq = PowerSequencer::new();
        let mut backend = RecordingPower::new();
        seq.power_on(&mut backend).unwrap();
        backend.steps.clear();

        seq.reset(&mut backend).unwrap();

        let mut expected = power_off_steps();
        expected.push(Step::DelayUs(5_000));
        expected.extend(power_on_steps());
        expected.push(Step::DelayUs(5_000));
        assert_eq!(backend.steps, expected);
        assert_eq!(seq.state(), PowerState::On);
    }
}
