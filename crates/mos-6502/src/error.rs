//! CPU execution errors.

use std::fmt;

use emu_core::BusError;

use crate::AddressingMode;

/// Why an instruction could not complete.
///
/// The CPU restores its registers before returning any of these, so the
/// caller sees the state from just before the failing instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// A bus access made by the instruction failed.
    Bus(BusError),
    /// The byte at `address` is not a supported opcode.
    UnknownOpcode { opcode: u8, address: u16 },
    /// An address was requested for a mode that has none.
    InvalidAddressingMode { mode: AddressingMode },
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(err) => write!(f, "bus error: {err}"),
            Self::UnknownOpcode { opcode, address } => {
                write!(f, "unknown opcode ${opcode:02X} at ${address:04X}")
            }
            Self::InvalidAddressingMode { mode } => {
                write!(f, "addressing mode {mode:?} has no operand address")
            }
        }
    }
}

impl std::error::Error for CpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bus(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BusError> for CpuError {
    fn from(err: BusError) -> Self {
        Self::Bus(err)
    }
}
