//! Shared in-memory backends for unit tests

use alloc::vec::Vec;

use crate::bus::RegisterBus;
use crate::error::{Error, Result};
use crate::power::{PowerBackend, PowerLine, Regulator};

/// In-memory register bus with scriptable failures
pub struct ScriptedBus {
    pub regs: [u8; 256],
    /// Successful writes, in order
    pub applied: Vec<(u8, u8)>,
    /// Every write attempt, including failed ones
    pub write_attempts: Vec<(u8, u8)>,
    /// Every read attempt
    pub read_attempts: Vec<u8>,
    /// Recorded delay calls
    pub delays_ms: Vec<u32>,
    fail_writes: usize,
    arm_after: Option<usize>,
    armed_count: usize,
    fail_reads: usize,
}

impl ScriptedBus {
    pub fn new() -> Self {
        Self {
            regs: [0; 256],
            applied: Vec::new(),
            write_attempts: Vec::new(),
            read_attempts: Vec::new(),
            delays_ms: Vec::new(),
            fail_writes: 0,
            arm_after: None,
            armed_count: 0,
            fail_reads: 0,
        }
    }

    /// Fail the next `n` write attempts
    pub fn fail_next_writes(&mut self, n: usize) {
        self.fail_writes = n;
    }

    /// Start failing write attempts once `successes` writes have landed,
    /// for `count` attempts
    pub fn fail_writes_from(&mut self, successes: usize, count: usize) {
        self.arm_after = Some(successes);
        self.armed_count = count;
    }

    /// Fail the next `n` read attempts
    pub fn fail_next_reads(&mut self, n: usize) {
        self.fail_reads = n;
    }
}

impl RegisterBus for ScriptedBus {
    fn write(&mut self, addr: u8, value: u8) -> Result<()> {
        self.write_attempts.push((addr, value));
        if let Some(n) = self.arm_after {
            if self.applied.len() >= n {
                self.fail_writes = self.fail_writes.max(self.armed_count);
                self.arm_after = None;
            }
        }
        if self.fail_writes > 0 {
            self.fail_writes = self.fail_writes.saturating_sub(1);
            return Err(Error::Transport);
        }
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
        self.delays_ms.push(ms);
    }
}

/// One recorded power-backend call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Acquire,
    Release,
    Line(PowerLine, bool),
    Reg(Regulator, bool),
    Clock(bool),
    DelayUs(u32),
    Recover,
}

/// Power backend that records every transition without touching hardware
pub struct RecordingPower {
    pub steps: Vec<Step>,
    pub fail_acquire: bool,
    fail_lines: usize,
}

impl RecordingPower {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            fail_acquire: false,
            fail_lines: 0,
        }
    }

    /// Fail the next `n` set_line calls
    pub fn fail_next_lines(&mut self, n: usize) {
        self.fail_lines = n;
    }
}

impl PowerBackend for RecordingPower {
    fn acquire(&mut self) -> Result<()> {
        if self.fail_acquire {
            return Err(Error::GpioUnavailable);
        }
        self.steps.push(Step::Acquire);
        Ok(())
    }

    fn release(&mut self) {
        self.steps.push(Step::Release);
    }

    fn set_line(&mut self, line: PowerLine, high: bool) -> Result<()> {
        if self.fail_lines > 0 {
            self.fail_lines -= 1;
            return Err(Error::GpioUnavailable);
        }
        self.steps.push(Step::Line(line, high));
        Ok(())
    }

    fn set_regulator(&mut self, regulator: Regulator, on: bool) -> Result<()> {
        self.steps.push(Step::Reg(regulator, on));
        Ok(())
    }

    fn set_clock(&mut self, enabled: bool) -> Result<()> {
        self.steps.push(Step::Clock(enabled));
        Ok(())
    }

    fn recover_bus(&mut self) -> Result<()> {
        self.steps.push(Step::Recover);
        Ok(())
    }

    fn delay_us(&mut self, us: u32) {
        self.steps.push(Step::DelayUs(us));
    }
}
