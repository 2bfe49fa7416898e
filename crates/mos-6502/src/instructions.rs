//! Instruction handlers.
//!
//! Read and modify handlers are pure over (registers, operand): they never
//! see the bus. Implied and jump handlers get the bus for stack traffic and
//! the BRK vector only.

use emu_core::Bus;

use crate::flags::{B_HIGH, B_LOW};
use crate::opcode::{Implied, Jump, Modify, Read};
use crate::{CpuError, Mos6502, Status};

/// IRQ/BRK vector.
const IRQ_VECTOR: u16 = 0xFFFE;

impl Mos6502 {
    pub(crate) fn read(&mut self, op: Read, operand: u8) {
        match op {
            Read::Adc => self.add_with_carry(operand),
            // A - M - (1 - C) == A + !M + C
            Read::Sbc => self.add_with_carry(!operand),
            Read::And => self.load_a(self.regs.a & operand),
            Read::Ora => self.load_a(self.regs.a | operand),
            Read::Eor => self.load_a(self.regs.a ^ operand),
            Read::Bit => {
                let p = &mut self.regs.p;
                p.z = self.regs.a & operand == 0;
                p.n = operand & 0x80 != 0;
                p.v = operand & 0x40 != 0;
            }
            Read::Cmp => self.compare(self.regs.a, operand),
            Read::Cpx => self.compare(self.regs.x, operand),
            Read::Cpy => self.compare(self.regs.y, operand),
            Read::Lda => self.load_a(operand),
            Read::Ldx => {
                self.regs.x = operand;
                self.regs.p.update_nz(operand);
            }
            Read::Ldy => {
                self.regs.y = operand;
                self.regs.p.update_nz(operand);
            }
            Read::Bcc => self.branch_if(!self.regs.p.c, operand),
            Read::Bcs => self.branch_if(self.regs.p.c, operand),
            Read::Bne => self.branch_if(!self.regs.p.z, operand),
            Read::Beq => self.branch_if(self.regs.p.z, operand),
            Read::Bpl => self.branch_if(!self.regs.p.n, operand),
            Read::Bmi => self.branch_if(self.regs.p.n, operand),
            Read::Bvc => self.branch_if(!self.regs.p.v, operand),
            Read::Bvs => self.branch_if(self.regs.p.v, operand),
        }
    }

    pub(crate) fn modify(&mut self, op: Modify, operand: u8) -> u8 {
        let p = &mut self.regs.p;
        let result = match op {
            Modify::Asl => {
                p.c = operand & 0x80 != 0;
                operand << 1
            }
            Modify::Lsr => {
                p.c = operand & 0x01 != 0;
                operand >> 1
            }
            Modify::Rol => {
                let carry_in = u8::from(p.c);
                p.c = operand & 0x80 != 0;
                (operand << 1) | carry_in
            }
            Modify::Ror => {
                let carry_in = u8::from(p.c) << 7;
                p.c = operand & 0x01 != 0;
                (operand >> 1) | carry_in
            }
            Modify::Inc => operand.wrapping_add(1),
            Modify::Dec => operand.wrapping_sub(1),
            Modify::Sta => return self.regs.a,
            Modify::Stx => return self.regs.x,
            Modify::Sty => return self.regs.y,
        };
        p.update_nz(result);
        result
    }

    pub(crate) fn implied<B: Bus>(&mut self, bus: &mut B, op: Implied) -> Result<(), CpuError> {
        match op {
            Implied::Brk => self.brk(bus)?,
            Implied::Rti => {
                let status = self.pull(bus)?;
                let high = self.pull(bus)?;
                let low = self.pull(bus)?;
                self.regs.p = Status::from_byte(status);
                self.regs.pc = u16::from_le_bytes([low, high]);
            }
            Implied::Rts => self.regs.pc = self.pull_word(bus)?.wrapping_add(1),
            Implied::Nop => {}

            Implied::Pha => self.push(bus, self.regs.a)?,
            Implied::Php => self.push(bus, self.regs.p.to_byte() | B_LOW | B_HIGH)?,
            Implied::Pla => {
                let value = self.pull(bus)?;
                self.load_a(value);
            }
            Implied::Plp => self.regs.p = Status::from_byte(self.pull(bus)?),

            Implied::Clc => self.regs.p.c = false,
            Implied::Sec => self.regs.p.c = true,
            Implied::Cli => self.regs.p.i = false,
            Implied::Sei => self.regs.p.i = true,
            Implied::Cld => self.regs.p.d = false,
            Implied::Sed => self.regs.p.d = true,
            Implied::Clv => self.regs.p.v = false,

            Implied::Inx => self.load_x(self.regs.x.wrapping_add(1)),
            Implied::Dex => self.load_x(self.regs.x.wrapping_sub(1)),
            Implied::Iny => self.load_y(self.regs.y.wrapping_add(1)),
            Implied::Dey => self.load_y(self.regs.y.wrapping_sub(1)),

            Implied::Tax => self.load_x(self.regs.a),
            Implied::Tay => self.load_y(self.regs.a),
            Implied::Tsx => self.load_x(self.regs.s),
            Implied::Txa => self.load_a(self.regs.x),
            Implied::Tya => self.load_a(self.regs.y),
            // The only transfer that leaves the flags alone.
            Implied::Txs => self.regs.s = self.regs.x,
        }
        Ok(())
    }

    pub(crate) fn jump<B: Bus>(
        &mut self,
        bus: &mut B,
        op: Jump,
        target: u16,
    ) -> Result<(), CpuError> {
        if op == Jump::Jsr {
            // PC is past the operand; the pushed address is its last byte.
            self.push_word(bus, self.regs.pc.wrapping_sub(1))?;
        }
        self.regs.pc = target;
        Ok(())
    }

    /// BRK: skip the padding byte, set both break bits, push PC low then
    /// high, push status, and continue at the IRQ vector.
    fn brk<B: Bus>(&mut self, bus: &mut B) -> Result<(), CpuError> {
        let vector = bus.read_word(IRQ_VECTOR)?;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        self.regs.p.b_low = true;
        self.regs.p.b_high = true;

        let [low, high] = self.regs.pc.to_le_bytes();
        self.push(bus, low)?;
        self.push(bus, high)?;
        self.push(bus, self.regs.p.to_byte())?;

        self.regs.pc = vector;
        Ok(())
    }

    /// ADC core. Carry comes from the 9-bit sum; overflow is set when both
    /// inputs share a sign that the truncated result does not.
    fn add_with_carry(&mut self, operand: u8) {
        let a = self.regs.a;
        let sum = u16::from(a) + u16::from(operand) + u16::from(self.regs.p.c);
        let result = sum as u8;

        self.regs.p.v = (a ^ operand) & 0x80 == 0 && (a ^ result) & 0x80 != 0;
        self.regs.p.c = sum > 0xFF;
        self.load_a(result);
    }

    /// CMP/CPX/CPY. Flags come from the untruncated difference.
    fn compare(&mut self, register: u8, operand: u8) {
        let difference = i16::from(register) - i16::from(operand);
        let p = &mut self.regs.p;
        p.c = difference >= 0;
        p.z = difference == 0;
        p.n = difference < 0;
    }

    /// Relative branch. The offset is taken from the end of the instruction.
    fn branch_if(&mut self, condition: bool, offset: u8) {
        if condition {
            self.regs.pc = self.regs.pc.wrapping_add_signed(i16::from(offset as i8));
        }
    }

    fn load_a(&mut self, value: u8) {
        self.regs.a = value;
        self.regs.p.update_nz(value);
    }

    fn load_x(&mut self, value: u8) {
        self.regs.x = value;
        self.regs.p.update_nz(value);
    }

    fn load_y(&mut self, value: u8) {
        self.regs.y = value;
        self.regs.p.update_nz(value);
    }
}
