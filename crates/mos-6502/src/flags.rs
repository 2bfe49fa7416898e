//! 6502 processor status register (P).
//!
//! The status register is held as eight independent booleans and packed
//! into a byte only when it crosses the stack or a test fixture. Bit order,
//! MSB to LSB: `N V Bh Bl D I Z C`.

/// Carry flag - set if operation resulted in carry/borrow.
pub const C: u8 = 0x01;

/// Zero flag - set if result is zero.
pub const Z: u8 = 0x02;

/// Interrupt disable - when set, IRQ interrupts are ignored.
pub const I: u8 = 0x04;

/// Decimal mode - stored but never affects arithmetic on the NES.
pub const D: u8 = 0x08;

/// Low break bit.
pub const B_LOW: u8 = 0x10;

/// High break bit.
pub const B_HIGH: u8 = 0x20;

/// Overflow flag - set if signed arithmetic overflowed.
pub const V: u8 = 0x40;

/// Negative flag - set if result has bit 7 set.
pub const N: u8 = 0x80;

/// Processor status register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status {
    pub c: bool,
    pub z: bool,
    pub i: bool,
    pub d: bool,
    pub b_low: bool,
    pub b_high: bool,
    pub v: bool,
    pub n: bool,
}

impl Status {
    /// Unpack a status byte. Every bit maps to its flag independently.
    #[must_use]
    pub const fn from_byte(value: u8) -> Self {
        Self {
            c: value & C != 0,
            z: value & Z != 0,
            i: value & I != 0,
            d: value & D != 0,
            b_low: value & B_LOW != 0,
            b_high: value & B_HIGH != 0,
            v: value & V != 0,
            n: value & N != 0,
        }
    }

    /// Pack the flags into a byte.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        let mut value = 0;
        if self.c {
            value |= C;
        }
        if self.z {
            value |= Z;
        }
        if self.i {
            value |= I;
        }
        if self.d {
            value |= D;
        }
        if self.b_low {
            value |= B_LOW;
        }
        if self.b_high {
            value |= B_HIGH;
        }
        if self.v {
            value |= V;
        }
        if self.n {
            value |= N;
        }
        value
    }

    /// Check a flag by its bit mask.
    #[must_use]
    pub const fn is_set(self, flag: u8) -> bool {
        self.to_byte() & flag != 0
    }

    /// Update N and Z flags based on a value.
    pub fn update_nz(&mut self, value: u8) {
        self.n = value & 0x80 != 0;
        self.z = value == 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_round_trip_covers_every_combination() {
        for value in 0..=0xFF_u8 {
            let status = Status::from_byte(value);
            assert_eq!(status.to_byte(), value, "byte {value:#04X}");
            assert_eq!(Status::from_byte(status.to_byte()), status);
        }
    }

    #[test]
    fn bit_positions() {
        let status = Status {
            n: true,
            b_low: true,
            c: true,
            ..Status::default()
        };
        assert_eq!(status.to_byte(), 0b1001_0001);
        assert!(status.is_set(N));
        assert!(!status.is_set(B_HIGH));
    }

    #[test]
    fn update_nz() {
        let mut status = Status::default();
        status.update_nz(0);
        assert!(status.z && !status.n);
        status.update_nz(0x80);
        assert!(!status.z && status.n);
    }
}
