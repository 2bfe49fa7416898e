//! Opcode table.
//!
//! One entry per documented NMOS 6502 opcode. The table is built at compile
//! time; bytes with no entry decode to [`crate::CpuError::UnknownOpcode`].
//!
//! Handlers are grouped by how the dispatcher feeds them:
//! - [`Read`]: consume an operand byte, update registers and flags.
//! - [`Modify`]: consume an operand, return a byte written back to the
//!   operand's location (memory or A).
//! - [`Implied`]: no operand; may touch the stack.
//! - [`Jump`]: consume the effective address itself.

use std::fmt;

use crate::AddressingMode;
use crate::AddressingMode::{
    Absolute, AbsoluteX, AbsoluteY, Accumulator, Immediate, Indirect, IndirectX, IndirectY,
    NoAddressing, ZeroPage, ZeroPageX, ZeroPageY,
};

/// Instructions that read an operand and produce no memory result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    Adc,
    And,
    Bit,
    Cmp,
    Cpx,
    Cpy,
    Eor,
    Lda,
    Ldx,
    Ldy,
    Ora,
    Sbc,
    Bcc,
    Bcs,
    Beq,
    Bmi,
    Bne,
    Bpl,
    Bvc,
    Bvs,
}

/// Write-back instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modify {
    Asl,
    Lsr,
    Rol,
    Ror,
    Inc,
    Dec,
    Sta,
    Stx,
    Sty,
}

impl Modify {
    /// Stores overwrite their target without looking at it.
    #[must_use]
    pub const fn reads_operand(self) -> bool {
        !matches!(self, Self::Sta | Self::Stx | Self::Sty)
    }
}

/// Instructions without a memory operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Implied {
    Brk,
    Clc,
    Cld,
    Cli,
    Clv,
    Dex,
    Dey,
    Inx,
    Iny,
    Nop,
    Pha,
    Php,
    Pla,
    Plp,
    Rti,
    Rts,
    Sec,
    Sed,
    Sei,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

/// Instructions whose operand is the effective address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jump {
    Jmp,
    Jsr,
}

/// The handler an opcode dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Read(Read),
    Modify(Modify),
    Implied(Implied),
    Jump(Jump),
}

impl Instruction {
    /// Assembler mnemonic, e.g. `"ADC"`.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Read(op) => match op {
                Read::Adc => "ADC",
                Read::And => "AND",
                Read::Bit => "BIT",
                Read::Cmp => "CMP",
                Read::Cpx => "CPX",
                Read::Cpy => "CPY",
                Read::Eor => "EOR",
                Read::Lda => "LDA",
                Read::Ldx => "LDX",
                Read::Ldy => "LDY",
                Read::Ora => "ORA",
                Read::Sbc => "SBC",
                Read::Bcc => "BCC",
                Read::Bcs => "BCS",
                Read::Beq => "BEQ",
                Read::Bmi => "BMI",
                Read::Bne => "BNE",
                Read::Bpl => "BPL",
                Read::Bvc => "BVC",
                Read::Bvs => "BVS",
            },
            Self::Modify(op) => match op {
                Modify::Asl => "ASL",
                Modify::Lsr => "LSR",
                Modify::Rol => "ROL",
                Modify::Ror => "ROR",
                Modify::Inc => "INC",
                Modify::Dec => "DEC",
                Modify::Sta => "STA",
                Modify::Stx => "STX",
                Modify::Sty => "STY",
            },
            Self::Implied(op) => match op {
                Implied::Brk => "BRK",
                Implied::Clc => "CLC",
                Implied::Cld => "CLD",
                Implied::Cli => "CLI",
                Implied::Clv => "CLV",
                Implied::Dex => "DEX",
                Implied::Dey => "DEY",
                Implied::Inx => "INX",
                Implied::Iny => "INY",
                Implied::Nop => "NOP",
                Implied::Pha => "PHA",
                Implied::Php => "PHP",
                Implied::Pla => "PLA",
                Implied::Plp => "PLP",
                Implied::Rti => "RTI",
                Implied::Rts => "RTS",
                Implied::Sec => "SEC",
                Implied::Sed => "SED",
                Implied::Sei => "SEI",
                Implied::Tax => "TAX",
                Implied::Tay => "TAY",
                Implied::Tsx => "TSX",
                Implied::Txa => "TXA",
                Implied::Txs => "TXS",
                Implied::Tya => "TYA",
            },
            Self::Jump(op) => match op {
                Jump::Jmp => "JMP",
                Jump::Jsr => "JSR",
            },
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Static metadata for one opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub instruction: Instruction,
    /// Instruction length including the opcode byte.
    pub bytes: u8,
    /// Base cycle count.
    pub cycles: u8,
    /// Real hardware adds a cycle when indexing crosses a page.
    /// Recorded only; nothing consumes it.
    pub page_cross_penalty: bool,
    pub mode: AddressingMode,
}

impl Opcode {
    /// True when the handler's result is stored back to the operand.
    #[must_use]
    pub const fn write_back(&self) -> bool {
        matches!(self.instruction, Instruction::Modify(_))
    }
}

/// Look up the table entry for an opcode byte.
#[must_use]
pub fn lookup(opcode: u8) -> Option<Opcode> {
    TABLE[opcode as usize]
}

/// Number of opcodes with a table entry.
#[must_use]
pub fn supported_count() -> usize {
    TABLE.iter().flatten().count()
}

static TABLE: [Option<Opcode>; 256] = build_table();

const fn op(
    instruction: Instruction,
    bytes: u8,
    cycles: u8,
    page_cross_penalty: bool,
    mode: AddressingMode,
) -> Opcode {
    Opcode {
        instruction,
        bytes,
        cycles,
        page_cross_penalty,
        mode,
    }
}

const fn read(
    r: Read,
    bytes: u8,
    cycles: u8,
    penalty: bool,
    mode: AddressingMode,
) -> Option<Opcode> {
    Some(op(Instruction::Read(r), bytes, cycles, penalty, mode))
}

const fn modify(m: Modify, bytes: u8, cycles: u8, mode: AddressingMode) -> Option<Opcode> {
    Some(op(Instruction::Modify(m), bytes, cycles, false, mode))
}

const fn implied(i: Implied, cycles: u8) -> Option<Opcode> {
    Some(op(Instruction::Implied(i), 1, cycles, false, NoAddressing))
}

const fn jump(j: Jump, cycles: u8, mode: AddressingMode) -> Option<Opcode> {
    Some(op(Instruction::Jump(j), 3, cycles, false, mode))
}

/// The eight-mode group shared by ADC, AND, CMP, EOR, LDA, ORA and SBC.
const fn alu_group(t: &mut [Option<Opcode>; 256], r: Read, base: usize) {
    t[base + 0x09] = read(r, 2, 2, false, Immediate);
    t[base + 0x05] = read(r, 2, 3, false, ZeroPage);
    t[base + 0x15] = read(r, 2, 4, false, ZeroPageX);
    t[base + 0x0D] = read(r, 3, 4, false, Absolute);
    t[base + 0x1D] = read(r, 3, 4, true, AbsoluteX);
    t[base + 0x19] = read(r, 3, 4, true, AbsoluteY);
    t[base + 0x01] = read(r, 2, 6, false, IndirectX);
    t[base + 0x11] = read(r, 2, 5, true, IndirectY);
}

/// The shift/rotate group: accumulator plus four memory modes.
const fn shift_group(t: &mut [Option<Opcode>; 256], m: Modify, base: usize) {
    t[base + 0x0A] = modify(m, 1, 2, Accumulator);
    t[base + 0x06] = modify(m, 2, 5, ZeroPage);
    t[base + 0x16] = modify(m, 2, 6, ZeroPageX);
    t[base + 0x0E] = modify(m, 3, 6, Absolute);
    t[base + 0x1E] = modify(m, 3, 7, AbsoluteX);
}

const fn build_table() -> [Option<Opcode>; 256] {
    let mut t = [None; 256];

    alu_group(&mut t, Read::Ora, 0x00);
    alu_group(&mut t, Read::And, 0x20);
    alu_group(&mut t, Read::Eor, 0x40);
    alu_group(&mut t, Read::Adc, 0x60);
    alu_group(&mut t, Read::Lda, 0xA0);
    alu_group(&mut t, Read::Cmp, 0xC0);
    alu_group(&mut t, Read::Sbc, 0xE0);

    shift_group(&mut t, Modify::Asl, 0x00);
    shift_group(&mut t, Modify::Rol, 0x20);
    shift_group(&mut t, Modify::Lsr, 0x40);
    shift_group(&mut t, Modify::Ror, 0x60);

    // STA has no immediate form and always pays the indexing cycle.
    t[0x85] = modify(Modify::Sta, 2, 3, ZeroPage);
    t[0x95] = modify(Modify::Sta, 2, 4, ZeroPageX);
    t[0x8D] = modify(Modify::Sta, 3, 4, Absolute);
    t[0x9D] = modify(Modify::Sta, 3, 5, AbsoluteX);
    t[0x99] = modify(Modify::Sta, 3, 5, AbsoluteY);
    t[0x81] = modify(Modify::Sta, 2, 6, IndirectX);
    t[0x91] = modify(Modify::Sta, 2, 6, IndirectY);

    t[0x86] = modify(Modify::Stx, 2, 3, ZeroPage);
    t[0x96] = modify(Modify::Stx, 2, 4, ZeroPageY);
    t[0x8E] = modify(Modify::Stx, 3, 4, Absolute);

    t[0x84] = modify(Modify::Sty, 2, 3, ZeroPage);
    t[0x94] = modify(Modify::Sty, 2, 4, ZeroPageX);
    t[0x8C] = modify(Modify::Sty, 3, 4, Absolute);

    t[0xE6] = modify(Modify::Inc, 2, 5, ZeroPage);
    t[0xF6] = modify(Modify::Inc, 2, 6, ZeroPageX);
    t[0xEE] = modify(Modify::Inc, 3, 6, Absolute);
    t[0xFE] = modify(Modify::Inc, 3, 7, AbsoluteX);

    t[0xC6] = modify(Modify::Dec, 2, 5, ZeroPage);
    t[0xD6] = modify(Modify::Dec, 2, 6, ZeroPageX);
    t[0xCE] = modify(Modify::Dec, 3, 6, Absolute);
    t[0xDE] = modify(Modify::Dec, 3, 7, AbsoluteX);

    t[0xA2] = read(Read::Ldx, 2, 2, false, Immediate);
    t[0xA6] = read(Read::Ldx, 2, 3, false, ZeroPage);
    t[0xB6] = read(Read::Ldx, 2, 4, false, ZeroPageY);
    t[0xAE] = read(Read::Ldx, 3, 4, false, Absolute);
    t[0xBE] = read(Read::Ldx, 3, 4, true, AbsoluteY);

    t[0xA0] = read(Read::Ldy, 2, 2, false, Immediate);
    t[0xA4] = read(Read::Ldy, 2, 3, false, ZeroPage);
    t[0xB4] = read(Read::Ldy, 2, 4, false, ZeroPageX);
    t[0xAC] = read(Read::Ldy, 3, 4, false, Absolute);
    t[0xBC] = read(Read::Ldy, 3, 4, true, AbsoluteX);

    t[0xE0] = read(Read::Cpx, 2, 2, false, Immediate);
    t[0xE4] = read(Read::Cpx, 2, 3, false, ZeroPage);
    t[0xEC] = read(Read::Cpx, 3, 4, false, Absolute);

    t[0xC0] = read(Read::Cpy, 2, 2, false, Immediate);
    t[0xC4] = read(Read::Cpy, 2, 3, false, ZeroPage);
    t[0xCC] = read(Read::Cpy, 3, 4, false, Absolute);

    t[0x24] = read(Read::Bit, 2, 3, false, ZeroPage);
    t[0x2C] = read(Read::Bit, 3, 4, false, Absolute);

    // Branches: the offset byte is an immediate operand.
    t[0x10] = read(Read::Bpl, 2, 2, true, Immediate);
    t[0x30] = read(Read::Bmi, 2, 2, true, Immediate);
    t[0x50] = read(Read::Bvc, 2, 2, true, Immediate);
    t[0x70] = read(Read::Bvs, 2, 2, true, Immediate);
    t[0x90] = read(Read::Bcc, 2, 2, true, Immediate);
    t[0xB0] = read(Read::Bcs, 2, 2, true, Immediate);
    t[0xD0] = read(Read::Bne, 2, 2, true, Immediate);
    t[0xF0] = read(Read::Beq, 2, 2, true, Immediate);

    t[0x4C] = jump(Jump::Jmp, 3, Absolute);
    t[0x6C] = jump(Jump::Jmp, 5, Indirect);
    t[0x20] = jump(Jump::Jsr, 6, Absolute);

    t[0x00] = implied(Implied::Brk, 7);
    t[0x40] = implied(Implied::Rti, 6);
    t[0x60] = implied(Implied::Rts, 6);
    t[0xEA] = implied(Implied::Nop, 2);

    t[0x48] = implied(Implied::Pha, 3);
    t[0x08] = implied(Implied::Php, 3);
    t[0x68] = implied(Implied::Pla, 4);
    t[0x28] = implied(Implied::Plp, 4);

    t[0x18] = implied(Implied::Clc, 2);
    t[0x38] = implied(Implied::Sec, 2);
    t[0x58] = implied(Implied::Cli, 2);
    t[0x78] = implied(Implied::Sei, 2);
    t[0xB8] = implied(Implied::Clv, 2);
    t[0xD8] = implied(Implied::Cld, 2);
    t[0xF8] = implied(Implied::Sed, 2);

    t[0xCA] = implied(Implied::Dex, 2);
    t[0x88] = implied(Implied::Dey, 2);
    t[0xE8] = implied(Implied::Inx, 2);
    t[0xC8] = implied(Implied::Iny, 2);

    t[0xAA] = implied(Implied::Tax, 2);
    t[0xA8] = implied(Implied::Tay, 2);
    t[0xBA] = implied(Implied::Tsx, 2);
    t[0x8A] = implied(Implied::Txa, 2);
    t[0x9A] = implied(Implied::Txs, 2);
    t[0x98] = implied(Implied::Tya, 2);

    t
}
