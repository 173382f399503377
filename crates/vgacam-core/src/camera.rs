//! Camera orchestration: init, reset and the control surface entry points
//!
//! `Camera` owns the bus, the power backend, the power sequencer and the
//! dispatch session, and serializes every operation on the calling thread.
//! There is no internal locking; callers must not overlap operations.

use alloc::boxed::Box;

use crate::bus::{read_register, write_program, RegisterBus};
use crate::controls::{Control, ControlKind};
use crate::error::{Error, Result};
use crate::power::{PowerBackend, PowerSequencer, PowerState};
use crate::programs;
use crate::session::{ProgramSource, Session, TuningMode};
use crate::state::{FrameSize, PreviewStatus, SensorState};
use crate::tuning::TuningTable;

/// Callback re-invoked on every init to (re)load the tuning table
///
/// Returning `None` leaves the session in binary mode; this is not an init
/// failure.
pub type TableLoader = Box<dyn FnMut() -> Option<TuningTable>>;

/// The camera subsystem facade
pub struct Camera<B: RegisterBus, P: PowerBackend> {
    bus: B,
    power: P,
    sequencer: PowerSequencer,
    session: Session,
    table_loader: Option<TableLoader>,
}

impl<B: RegisterBus, P: PowerBackend> Camera<B, P> {
    /// Create a camera over the given backends, in binary mode
    pub fn new(bus: B, power: P) -> Self {
        Self {
            bus,
            power,
            sequencer: PowerSequencer::new(),
            session: Session::new(),
            table_loader: None,
        }
    }

    /// Install a tuning-table loader, re-invoked on every init
    pub fn with_table_loader(mut self, loader: TableLoader) -> Self {
        self.table_loader = Some(loader);
        self
    }

    /// Sensor state snapshot
    pub fn state(&self) -> &SensorState {
        &self.session.state
    }

    /// Current dispatch mode
    pub fn mode(&self) -> TuningMode {
        self.session.mode()
    }

    /// Whether the sticky bus fault is latched
    pub fn bus_fault(&self) -> bool {
        self.session.bus_fault()
    }

    /// Power state machine state
    pub fn power_state(&self) -> PowerState {
        self.sequencer.state()
    }

    /// Current frame-size descriptor (fixed single VGA entry)
    pub fn frame_size(&self) -> FrameSize {
        self.session.state.frame_size()
    }

    /// Access the bus backend (test instrumentation)
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Access the power backend (test instrumentation)
    pub fn power_mut(&mut self) -> &mut P {
        &mut self.power
    }

    /// Run the power-on sequence
    pub fn power_on(&mut self) -> Result<()> {
        self.sequencer.power_on(&mut self.power)
    }

    /// Run the power-off sequence
    pub fn power_off(&mut self) -> Result<()> {
        self.sequencer.power_off(&mut self.power)
    }

    /// Initialize the sensor
    ///
    /// Clears the sticky bus fault, re-attempts the tuning-table load (its
    /// failure only selects binary mode), verifies the device responds on
    /// the bus and dispatches the init program for the active profile. A
    /// device-ID read failure latches the sticky fault and refuses further
    /// control writes until the next successful init.
    pub fn init(&mut self) -> Result<()> {
        log::debug!(
            "camera initialization start, vt_mode: {}",
            self.session.state.vt_mode
        );
        self.session.clear_bus_fault();

        let table = self.table_loader.as_mut().and_then(|load| load());
        let loaded = table.is_some();
        self.session.set_source(match table {
            Some(table) => ProgramSource::Table(table),
            None => ProgramSource::Binary,
        });
        if loaded {
            self.bus.delay_ms(100);
        }

        let id = match read_register(&mut self.bus, programs::DEVICE_ID_REG) {
            Ok(id) => id,
            Err(e) => {
                log::error!("camera initialization failed: device ID read: {}", e);
                self.session.set_bus_fault();
                return Err(Error::InitFailed);
            }
        };
        log::debug!(
            "device ID 0x{:02x} = 0x{:02x}",
            programs::DEVICE_ID_REG,
            id
        );
        if id != programs::DEVICE_ID {
            log::warn!("unexpected device ID 0x{:02x}", id);
        }
        self.bus.delay_ms(3);

        let program = if self.session.state.vt_mode {
            &programs::INIT_VT
        } else {
            &programs::INIT
        };
        if let Err(e) = self.session.apply_program(&mut self.bus, program) {
            log::error!("camera initialization failed: {}: {}", program.name, e);
            self.session.state.last_preview_init = PreviewStatus::Failed;
            return Err(Error::InitFailed);
        }

        self.session.state.last_preview_init = PreviewStatus::Ok;
        Ok(())
    }

    /// Power-cycle the sensor and re-initialize it
    pub fn reset(&mut self) -> Result<()> {
        self.sequencer.reset(&mut self.power)?;
        self.init()
    }

    /// Apply a typed control request
    ///
    /// Refused with [`Error::InitFailed`] while the sticky bus fault is
    /// latched, without touching the bus. The user snapshot is updated only
    /// after a successful dispatch.
    pub fn set_control(&mut self, control: Control) -> Result<()> {
        if self.session.bus_fault() {
            log::warn!("control refused: sticky bus fault");
            return Err(Error::InitFailed);
        }
        match control {
            Control::VtMode(on) => {
                self.session.state.vt_mode = on;
                Ok(())
            }
            Control::DatalineTest(on) => {
                self.session.state.dataline_test = on;
                Ok(())
            }
            Control::DatalineStop => self.stop_dataline_test(),
            _ => {
                let vt = self.session.state.vt_mode;
                // the remaining kinds always carry a program
                let program = control.program(vt).ok_or(Error::InitFailed)?;
                self.session.apply_program(&mut self.bus, program)?;
                self.record_user_setting(control);
                Ok(())
            }
        }
    }

    /// Apply a raw (kind, value) control request
    ///
    /// The sticky-fault refusal applies before the value is mapped, so even
    /// an unsupported value is refused rather than ignored. A discrete value
    /// with no corresponding program is otherwise a logged no-op, leaving
    /// sensor state unchanged.
    pub fn set_control_raw(&mut self, kind: ControlKind, value: i32) -> Result<()> {
        if self.session.bus_fault() {
            log::warn!("control refused: sticky bus fault");
            return Err(Error::InitFailed);
        }
        match Control::from_raw(kind, value) {
            Some(control) => self.set_control(control),
            None => {
                log::debug!("unsupported value {} for {:?}, ignored", value, kind);
                Ok(())
            }
        }
    }

    /// Start preview output
    ///
    /// Refused while the sticky bus fault is latched or if the last init
    /// failed. When the data-line test flag is set, the test pattern program
    /// is written in binary form before preview starts.
    pub fn start_preview(&mut self) -> Result<()> {
        if self.session.bus_fault() {
            log::warn!("preview refused: sticky bus fault");
            return Err(Error::InitFailed);
        }
        if self.session.state.last_preview_init == PreviewStatus::Failed {
            return Err(Error::InitFailed);
        }
        if self.session.state.dataline_test {
            write_program(&mut self.bus, &programs::DATALINE)?;
        }
        Ok(())
    }

    /// Stop the data-line test: apply the stop program, clear the flag and
    /// power-cycle back to a known-good baseline
    fn stop_dataline_test(&mut self) -> Result<()> {
        self.session
            .apply_program(&mut self.bus, &programs::DATALINE_STOP)?;
        self.session.state.dataline_test = false;
        self.reset()
    }

    fn record_user_setting(&mut self, control: Control) {
        let user = &mut self.session.state.user;
        match control {
            Control::Exposure(bias) => user.exposure = bias,
            Control::WhiteBalance(wb) => user.white_balance = wb,
            Control::Effect(fx) => user.effect = fx,
            Control::FrameRate(fps) => {
                user.frame_rate = fps;
            }
            Control::Blur(level) => user.blur = level,
            Control::VtMode(_) | Control::DatalineTest(_) | Control::DatalineStop => {}
        }
    }
}
