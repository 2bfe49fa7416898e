//! 6502 addressing modes.
//!
//! - Immediate: #$nn (operand is the byte at PC)
//! - Zero Page: $nn (8-bit address in page zero)
//! - Zero Page,X / Zero Page,Y: $nn,X (wraps in page zero)
//! - Absolute: $nnnn (16-bit address)
//! - Absolute,X / Absolute,Y: $nnnn,X (16-bit add, may cross a page)
//! - Indirect: ($nnnn) (JMP only, buggy page boundary behavior)
//! - Indexed Indirect: ($nn,X) (pointer in zero page indexed by X)
//! - Indirect Indexed: ($nn),Y (zero page pointer, then + Y)
//! - Accumulator / No addressing: no memory operand

use emu_core::Bus;

use crate::{CpuError, Mos6502};

/// Rule for locating an instruction's operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    NoAddressing,
    /// Read-modify-write instructions operating on A.
    Accumulator,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    #[must_use]
    pub const fn operand_bytes(self) -> u16 {
        match self {
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::IndirectX
            | Self::IndirectY => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
            Self::NoAddressing | Self::Accumulator => 0,
        }
    }
}

impl Mos6502 {
    /// Compute the effective address for `mode` without moving PC.
    ///
    /// PC must point at the first operand byte (just past the opcode).
    pub fn operand_address<B: Bus>(
        &self,
        bus: &mut B,
        mode: AddressingMode,
    ) -> Result<u16, CpuError> {
        let pc = self.regs.pc;
        let address = match mode {
            AddressingMode::Immediate => pc,
            AddressingMode::ZeroPage => u16::from(bus.read(pc)?),
            AddressingMode::ZeroPageX => u16::from(bus.read(pc)?.wrapping_add(self.regs.x)),
            AddressingMode::ZeroPageY => u16::from(bus.read(pc)?.wrapping_add(self.regs.y)),
            AddressingMode::Absolute => bus.read_word(pc)?,
            AddressingMode::AbsoluteX => bus.read_word(pc)?.wrapping_add(u16::from(self.regs.x)),
            AddressingMode::AbsoluteY => bus.read_word(pc)?.wrapping_add(u16::from(self.regs.y)),
            AddressingMode::Indirect => {
                let pointer = bus.read_word(pc)?;
                read_word_page_bug(bus, pointer)?
            }
            AddressingMode::IndirectX => {
                let pointer = bus.read(pc)?.wrapping_add(self.regs.x);
                read_zero_page_word(bus, pointer)?
            }
            AddressingMode::IndirectY => {
                let pointer = bus.read(pc)?;
                read_zero_page_word(bus, pointer)?.wrapping_add(u16::from(self.regs.y))
            }
            AddressingMode::NoAddressing | AddressingMode::Accumulator => {
                return Err(CpuError::InvalidAddressingMode { mode });
            }
        };
        Ok(address)
    }

    /// Resolve the operand address, step PC past the operand bytes, then
    /// read the operand through the bus.
    pub fn operand<B: Bus>(&mut self, bus: &mut B, mode: AddressingMode) -> Result<u8, CpuError> {
        let address = self.operand_address(bus, mode)?;
        self.skip_operand(mode);
        Ok(bus.read(address)?)
    }

    /// Advance PC past the operand bytes of `mode`.
    pub(crate) fn skip_operand(&mut self, mode: AddressingMode) {
        self.regs.pc = self.regs.pc.wrapping_add(mode.operand_bytes());
    }
}

/// Read a pointer from page zero. The high byte wraps within the page:
/// a pointer at $FF takes its high byte from $00.
fn read_zero_page_word<B: Bus>(bus: &mut B, pointer: u8) -> Result<u16, CpuError> {
    let low = bus.read(u16::from(pointer))?;
    let high = bus.read(u16::from(pointer.wrapping_add(1)))?;
    Ok(u16::from_le_bytes([low, high]))
}

/// Read a 16-bit word with 6502 page boundary bug (for indirect JMP).
/// If addr is $xxFF, high byte comes from $xx00 instead of $xx00+$100.
fn read_word_page_bug<B: Bus>(bus: &mut B, addr: u16) -> Result<u16, CpuError> {
    let low = bus.read(addr)?;
    let high_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
    let high = bus.read(high_addr)?;
    Ok(u16::from_le_bytes([low, high]))
}
