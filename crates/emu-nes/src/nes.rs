//! Top-level NES system.
//!
//! The machine owns the CPU and the bus side by side; the bus in turn owns
//! RAM, the program ROM and the PPU. Each step lends the bus to the CPU for
//! exactly one instruction. There is no clock: instructions run back to
//! back and cycle counts are metadata only.

use emu_core::{Cpu, Observable, Value};
use log::{debug, warn};
use mos_6502::{CpuError, Mos6502, Opcode, Registers};

use crate::bus::{NesBus, ROM_START, rom_offset};
use crate::config::NesConfig;
use crate::error::ConfigError;

const RESET_VECTOR: u16 = 0xFFFC;

/// Reset vector as the bus would see it, read straight from the mirrored
/// image. `program` must not be empty.
fn reset_vector(program: &[u8]) -> u16 {
    let low = program[rom_offset(RESET_VECTOR, program.len())];
    let high = program[rom_offset(RESET_VECTOR + 1, program.len())];
    u16::from_le_bytes([low, high])
}

/// NES system.
pub struct Nes {
    cpu: Mos6502,
    bus: NesBus,
    /// Instructions executed since construction.
    instructions: u64,
}

impl Nes {
    /// Create a new NES from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the program is empty.
    pub fn new(config: &NesConfig) -> Result<Self, ConfigError> {
        if config.program.is_empty() {
            return Err(ConfigError::EmptyProgram);
        }

        let mut bus = NesBus::new();
        bus.load_program(&config.program);

        let pc = config
            .entry_point
            .unwrap_or_else(|| reset_vector(&config.program));

        let mut regs = Registers::new();
        regs.pc = pc;
        regs.s = config.stack_pointer;
        debug!(
            "NES: {} byte program, PC=${pc:04X}, S=${:02X}",
            config.program.len(),
            regs.s
        );

        Ok(Self {
            cpu: Mos6502::with_registers(regs),
            bus,
            instructions: 0,
        })
    }

    /// Execute one instruction.
    ///
    /// # Errors
    ///
    /// Propagates the CPU error. The register file is left as it was
    /// before the failing instruction.
    pub fn step(&mut self) -> Result<Opcode, CpuError> {
        let opcode = self.cpu.step(&mut self.bus)?;
        self.instructions += 1;
        Ok(opcode)
    }

    /// Execute at most `count` instructions. Returns the number executed.
    ///
    /// # Errors
    ///
    /// Stops at the first failing instruction and returns its error.
    pub fn run_for(&mut self, count: usize) -> Result<usize, CpuError> {
        for executed in 0..count {
            if let Err(e) = self.step() {
                warn!(
                    "stopped after {executed} instructions at ${:04X}: {e}",
                    self.cpu.pc()
                );
                return Err(e);
            }
        }
        Ok(count)
    }

    /// Execute while PC lies inside the loaded program image
    /// (`$8000 .. $8000 + program length`). Returns the number executed.
    ///
    /// A program that loops inside its own image never returns.
    ///
    /// # Errors
    ///
    /// Stops at the first failing instruction and returns its error.
    pub fn run_while_in_program(&mut self) -> Result<usize, CpuError> {
        let end = usize::from(ROM_START) + self.bus.program_len();
        let mut executed = 0;
        while (usize::from(ROM_START)..end).contains(&usize::from(self.cpu.pc())) {
            if let Err(e) = self.step() {
                warn!(
                    "stopped after {executed} instructions at ${:04X}: {e}",
                    self.cpu.pc()
                );
                return Err(e);
            }
            executed += 1;
        }
        Ok(executed)
    }

    /// Reference to the CPU.
    #[must_use]
    pub fn cpu(&self) -> &Mos6502 {
        &self.cpu
    }

    /// Mutable reference to the CPU.
    pub fn cpu_mut(&mut self) -> &mut Mos6502 {
        &mut self.cpu
    }

    /// Snapshot of the CPU registers.
    #[must_use]
    pub fn registers(&self) -> Registers {
        self.cpu.registers()
    }

    /// Reference to the bus.
    #[must_use]
    pub fn bus(&self) -> &NesBus {
        &self.bus
    }

    /// Mutable reference to the bus.
    pub fn bus_mut(&mut self) -> &mut NesBus {
        &mut self.bus
    }

    /// Instructions executed since construction.
    #[must_use]
    pub fn instruction_count(&self) -> u64 {
        self.instructions
    }
}

impl Observable for Nes {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("cpu.") {
            self.cpu.query(rest)
        } else if let Some(rest) = path.strip_prefix("ppu.") {
            let ppu = &self.bus.ppu;
            match rest {
                "ctrl" => Some(ppu.ctrl().into()),
                "mask" => Some(ppu.mask().into()),
                "status" => Some(ppu.status().into()),
                _ => None,
            }
        } else if let Some(rest) = path.strip_prefix("memory.") {
            let addr =
                if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
                    u16::from_str_radix(hex, 16).ok()
                } else if let Some(hex) = rest.strip_prefix('$') {
                    u16::from_str_radix(hex, 16).ok()
                } else {
                    rest.parse().ok()
                };
            addr.filter(|a| *a < 0x2000)
                .map(|a| Value::U8(self.bus.peek_ram(a)))
        } else {
            self.cpu.query(path)
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "cpu.<6502_paths>",
            "ppu.ctrl",
            "ppu.mask",
            "ppu.status",
            "memory.<address>",
        ]
    }
}
