//! Table-driven MOS 6502 CPU core.
//!
//! Each call to [`Mos6502::execute_current`] runs one whole instruction:
//! fetch the opcode byte, look it up in the opcode table, resolve the
//! operand through the addressing mode, run the handler, and write the
//! result back for read-modify-write instructions. Handlers only touch the
//! bus for stack traffic and the vector fetch in BRK; every other access is
//! made by the dispatcher.
//!
//! Cycle counts are carried as table metadata only. Decimal mode and the
//! undocumented opcodes are not implemented.

mod addressing;
mod cpu;
mod error;
pub mod flags;
mod instructions;
pub mod opcode;
mod registers;

pub use addressing::AddressingMode;
pub use cpu::Mos6502;
pub use error::CpuError;
pub use flags::Status;
pub use opcode::{Instruction, Opcode};
pub use registers::{RegisterMismatch, Registers};
