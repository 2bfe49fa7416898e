//! 6502 CPU registers.

use std::fmt;

use emu_core::Value;

use crate::Status;
use crate::flags;

/// 6502 CPU register set.
///
/// The 6502 has minimal registers:
/// - A: 8-bit accumulator
/// - X, Y: 8-bit index registers
/// - S: 8-bit stack pointer (stack is at $0100-$01FF)
/// - PC: 16-bit program counter
/// - P: processor status
///
/// Equality is structural over all six fields; bus contents are not part
/// of the register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer (points to next free location, stack at $0100-$01FF).
    pub s: u8,
    /// Program counter.
    pub pc: u16,
    /// Processor status flags.
    pub p: Status,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Power-on register file: everything zero, empty stack at $01FF.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            s: 0xFF,
            pc: 0,
            p: Status::from_byte(0),
        }
    }

    /// Build a register file from explicit values and a packed flag byte.
    #[must_use]
    pub const fn with(pc: u16, a: u8, x: u8, y: u8, s: u8, p: u8) -> Self {
        Self {
            a,
            x,
            y,
            s,
            pc,
            p: Status::from_byte(p),
        }
    }

    /// Push a value onto the stack, return the address written.
    pub fn push(&mut self) -> u16 {
        let addr = self.stack_addr();
        self.s = self.s.wrapping_sub(1);
        addr
    }

    /// Pop a value from the stack, return the address to read.
    pub fn pop(&mut self) -> u16 {
        self.s = self.s.wrapping_add(1);
        self.stack_addr()
    }

    /// Get the current stack address without modifying S.
    #[must_use]
    pub const fn stack_addr(&self) -> u16 {
        0x0100 | (self.s as u16)
    }

    /// Every field where `self` differs from `expected`.
    ///
    /// Flags are compared one by one so a wrong carry is reported as
    /// `flags.c` rather than as a differing status byte.
    #[must_use]
    pub fn diff(&self, expected: &Self) -> Vec<RegisterMismatch> {
        let mut mismatches = Vec::new();
        let mut check = |field: &'static str, actual: Value, want: Value| {
            if actual != want {
                mismatches.push(RegisterMismatch {
                    field,
                    expected: want,
                    actual,
                });
            }
        };

        check("pc", self.pc.into(), expected.pc.into());
        check("a", self.a.into(), expected.a.into());
        check("x", self.x.into(), expected.x.into());
        check("y", self.y.into(), expected.y.into());
        check("s", self.s.into(), expected.s.into());

        for (field, mask) in FLAG_FIELDS {
            check(
                field,
                self.p.is_set(mask).into(),
                expected.p.is_set(mask).into(),
            );
        }

        mismatches
    }
}

const FLAG_FIELDS: [(&str, u8); 8] = [
    ("flags.n", flags::N),
    ("flags.v", flags::V),
    ("flags.b_high", flags::B_HIGH),
    ("flags.b_low", flags::B_LOW),
    ("flags.d", flags::D),
    ("flags.i", flags::I),
    ("flags.z", flags::Z),
    ("flags.c", flags::C),
];

/// One register field that did not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterMismatch {
    pub field: &'static str,
    pub expected: Value,
    pub actual: Value,
}

impl fmt::Display for RegisterMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: got {}, want {}",
            self.field, self.actual, self.expected
        )
    }
}
