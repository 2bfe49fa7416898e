//! 6502 CPU and instruction dispatcher.
//!
//! `execute_current` is one atomic step from the caller's point of view:
//! fetch, decode, resolve the operand, run the handler, write back. If any
//! stage fails the register file is restored to its pre-instruction value.

use emu_core::{Bus, Cpu, Observable, Value};
use log::{debug, trace};

use crate::opcode::{self, Instruction};
use crate::{AddressingMode, CpuError, Opcode, Registers};

/// The MOS 6502 CPU.
///
/// Holds only the register file. The bus is passed to every call so the
/// machine can own the CPU and its devices side by side.
#[derive(Debug, Clone, Default)]
pub struct Mos6502 {
    /// CPU registers.
    pub regs: Registers,
}

impl Mos6502 {
    /// Create a 6502 with power-on registers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
        }
    }

    /// Create a 6502 with an explicit register file.
    #[must_use]
    pub fn with_registers(regs: Registers) -> Self {
        Self { regs }
    }

    /// Execute the instruction at PC and return its table entry.
    pub fn execute_current<B: Bus>(&mut self, bus: &mut B) -> Result<Opcode, CpuError> {
        let saved = self.regs;
        let result = self.dispatch(bus);
        if let Err(err) = &result {
            debug!("${:04X}: {err}; registers restored", saved.pc);
            self.regs = saved;
        }
        result
    }

    fn dispatch<B: Bus>(&mut self, bus: &mut B) -> Result<Opcode, CpuError> {
        let address = self.regs.pc;
        let byte = bus.read(address)?;
        self.regs.pc = self.regs.pc.wrapping_add(1);

        let opcode = opcode::lookup(byte).ok_or(CpuError::UnknownOpcode {
            opcode: byte,
            address,
        })?;
        trace!(
            "${address:04X}: {byte:02X} {} {:?}",
            opcode.instruction, opcode.mode
        );

        match opcode.instruction {
            Instruction::Modify(op) if opcode.mode == AddressingMode::Accumulator => {
                self.regs.a = self.modify(op, self.regs.a);
            }
            Instruction::Modify(op) => {
                let target = self.operand_address(bus, opcode.mode)?;
                self.skip_operand(opcode.mode);
                let operand = if op.reads_operand() {
                    bus.read(target)?
                } else {
                    0
                };
                let result = self.modify(op, operand);
                bus.write(target, result)?;
            }
            Instruction::Implied(op) => self.implied(bus, op)?,
            Instruction::Jump(op) => {
                let target = self.operand_address(bus, opcode.mode)?;
                self.skip_operand(opcode.mode);
                self.jump(bus, op, target)?;
            }
            Instruction::Read(op) => {
                let operand = self.operand(bus, opcode.mode)?;
                self.read(op, operand);
            }
        }

        Ok(opcode)
    }

    /// Push a byte onto the stack.
    pub(crate) fn push<B: Bus>(&mut self, bus: &mut B, value: u8) -> Result<(), CpuError> {
        let addr = self.regs.push();
        Ok(bus.write(addr, value)?)
    }

    /// Pull a byte from the stack.
    pub(crate) fn pull<B: Bus>(&mut self, bus: &mut B) -> Result<u8, CpuError> {
        let addr = self.regs.pop();
        Ok(bus.read(addr)?)
    }

    /// Push a 16-bit word onto the stack (high byte first).
    pub(crate) fn push_word<B: Bus>(&mut self, bus: &mut B, value: u16) -> Result<(), CpuError> {
        let [low, high] = value.to_le_bytes();
        self.push(bus, high)?;
        self.push(bus, low)
    }

    /// Pull a 16-bit word from the stack (low byte first).
    pub(crate) fn pull_word<B: Bus>(&mut self, bus: &mut B) -> Result<u16, CpuError> {
        let low = self.pull(bus)?;
        let high = self.pull(bus)?;
        Ok(u16::from_le_bytes([low, high]))
    }
}

impl Cpu for Mos6502 {
    type Registers = Registers;
    type Error = CpuError;
    type Step = Opcode;

    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<Opcode, CpuError> {
        self.execute_current(bus)
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }
}

impl Observable for Mos6502 {
    fn query(&self, path: &str) -> Option<Value> {
        let p = self.regs.p;
        let value = match path {
            "pc" => self.regs.pc.into(),
            "a" => self.regs.a.into(),
            "x" => self.regs.x.into(),
            "y" => self.regs.y.into(),
            "s" => self.regs.s.into(),
            "p" => p.to_byte().into(),
            "flags.c" => p.c.into(),
            "flags.z" => p.z.into(),
            "flags.i" => p.i.into(),
            "flags.d" => p.d.into(),
            "flags.b_low" => p.b_low.into(),
            "flags.b_high" => p.b_high.into(),
            "flags.v" => p.v.into(),
            "flags.n" => p.n.into(),
            _ => return None,
        };
        Some(value)
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "pc",
            "a",
            "x",
            "y",
            "s",
            "p",
            "flags.c",
            "flags.z",
            "flags.i",
            "flags.d",
            "flags.b_low",
            "flags.b_high",
            "flags.v",
            "flags.n",
        ]
    }
}
