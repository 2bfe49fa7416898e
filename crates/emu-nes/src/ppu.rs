//! NES PPU (2C02) register stub.
//!
//! No rendering. The CPU-visible registers at $2000-$2007 are modelled just
//! far enough for programs to move bytes in and out of video memory:
//!
//! - $2000 PPUCTRL, $2001 PPUMASK, $2005 PPUSCROLL: write-only, stored
//! - $2002 PPUSTATUS: read-only
//! - $2006 PPUADDR: write-only, two writes (high then low) latch an address
//! - $2007 PPUDATA: read/write at the latched address
//!
//! Every other address handed to the PPU is unimplemented.

use emu_core::BusError;

pub const PPUCTRL: u16 = 0x2000;
pub const PPUMASK: u16 = 0x2001;
pub const PPUSTATUS: u16 = 0x2002;
pub const PPUSCROLL: u16 = 0x2005;
pub const PPUADDR: u16 = 0x2006;
pub const PPUDATA: u16 = 0x2007;

/// 16K PPU address space; latched addresses are masked to 14 bits.
const VRAM_SIZE: usize = 0x4000;
const VRAM_MASK: u16 = 0x3FFF;

/// State of the two-write $2006 address latch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AddressLatch {
    /// No address byte written yet.
    #[default]
    Empty,
    /// High byte written, waiting for the low byte.
    High(u8),
    /// Both bytes written. The next $2006 write starts a new address.
    Complete(u16),
}

impl AddressLatch {
    #[must_use]
    fn push(self, byte: u8) -> Self {
        match self {
            Self::High(high) => Self::Complete(u16::from_be_bytes([high, byte])),
            Self::Empty | Self::Complete(_) => Self::High(byte),
        }
    }
}

/// PPU 2C02 (register stub).
pub struct Ppu {
    vram: Box<[u8; VRAM_SIZE]>,
    latch: AddressLatch,
    ctrl: u8,
    mask: u8,
    status: u8,
    scroll: [u8; 2],
    /// Next $2005 write is the second (Y) byte.
    scroll_w: bool,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    #[must_use]
    pub fn new() -> Self {
        Self {
            vram: Box::new([0; VRAM_SIZE]),
            latch: AddressLatch::Empty,
            ctrl: 0,
            mask: 0,
            status: 0,
            scroll: [0; 2],
            scroll_w: false,
        }
    }

    /// CPU read from a PPU register.
    ///
    /// # Errors
    ///
    /// `IllegalRead` for write-only registers, `PpuAddressIncomplete` for
    /// $2007 before a full address is latched, `UnimplementedRegister` for
    /// anything else.
    pub fn cpu_read(&mut self, address: u16) -> Result<u8, BusError> {
        match address {
            PPUSTATUS => Ok(self.status),
            PPUDATA => {
                let index = self.vram_index()?;
                Ok(self.vram[index])
            }
            PPUCTRL | PPUMASK | PPUSCROLL | PPUADDR => Err(BusError::IllegalRead { address }),
            _ => Err(BusError::UnimplementedRegister { address }),
        }
    }

    /// CPU write to a PPU register.
    ///
    /// # Errors
    ///
    /// `IllegalWrite` for $2002, `PpuAddressIncomplete` for $2007 before a
    /// full address is latched, `UnimplementedRegister` for anything else.
    pub fn cpu_write(&mut self, address: u16, value: u8) -> Result<(), BusError> {
        match address {
            PPUCTRL => self.ctrl = value,
            PPUMASK => self.mask = value,
            PPUSCROLL => {
                self.scroll[usize::from(self.scroll_w)] = value;
                self.scroll_w = !self.scroll_w;
            }
            PPUADDR => self.latch = self.latch.push(value),
            PPUDATA => {
                let index = self.vram_index()?;
                self.vram[index] = value;
            }
            PPUSTATUS => return Err(BusError::IllegalWrite { address }),
            _ => return Err(BusError::UnimplementedRegister { address }),
        }
        Ok(())
    }

    fn vram_index(&self) -> Result<usize, BusError> {
        match self.latch {
            AddressLatch::Complete(address) => Ok(usize::from(address & VRAM_MASK)),
            AddressLatch::Empty | AddressLatch::High(_) => Err(BusError::PpuAddressIncomplete),
        }
    }

    #[must_use]
    pub fn latch(&self) -> AddressLatch {
        self.latch
    }

    #[must_use]
    pub fn ctrl(&self) -> u8 {
        self.ctrl
    }

    #[must_use]
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Last written (X, Y) scroll pair.
    #[must_use]
    pub fn scroll(&self) -> (u8, u8) {
        (self.scroll[0], self.scroll[1])
    }

    #[must_use]
    pub fn status(&self) -> u8 {
        self.status
    }

    /// Set the status byte returned by $2002 (e.g. to fake `VBlank`).
    pub fn set_status(&mut self, status: u8) {
        self.status = status;
    }

    /// Read video memory without touching the latch.
    #[must_use]
    pub fn peek_vram(&self, address: u16) -> u8 {
        self.vram[usize::from(address & VRAM_MASK)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latch(ppu: &mut Ppu, address: u16) {
        let [high, low] = address.to_be_bytes();
        ppu.cpu_write(PPUADDR, high).expect("high");
        ppu.cpu_write(PPUADDR, low).expect("low");
    }

    #[test]
    fn address_latch_takes_high_byte_first() {
        let mut ppu = Ppu::new();
        ppu.cpu_write(PPUADDR, 0x21).expect("high");
        assert_eq!(ppu.latch(), AddressLatch::High(0x21));
        ppu.cpu_write(PPUADDR, 0x08).expect("low");
        assert_eq!(ppu.latch(), AddressLatch::Complete(0x2108));
        ppu.cpu_write(PPUADDR, 0x3F).expect("restart");
        assert_eq!(ppu.latch(), AddressLatch::High(0x3F));
    }

    #[test]
    fn data_port_round_trip() {
        let mut ppu = Ppu::new();
        latch(&mut ppu, 0x2108);
        ppu.cpu_write(PPUDATA, 0x5A).expect("write");
        assert_eq!(ppu.cpu_read(PPUDATA), Ok(0x5A));
        // No auto-increment: the second read sees the same cell.
        assert_eq!(ppu.cpu_read(PPUDATA), Ok(0x5A));
        assert_eq!(ppu.peek_vram(0x2108), 0x5A);
    }

    #[test]
    fn latched_address_is_masked_to_14_bits() {
        let mut ppu = Ppu::new();
        latch(&mut ppu, 0xC123);
        ppu.cpu_write(PPUDATA, 0x77).expect("write");
        assert_eq!(ppu.peek_vram(0x0123), 0x77);
    }

    #[test]
    fn data_port_needs_complete_address() {
        let mut ppu = Ppu::new();
        assert_eq!(ppu.cpu_read(PPUDATA), Err(BusError::PpuAddressIncomplete));
        ppu.cpu_write(PPUADDR, 0x20).expect("high");
        assert_eq!(
            ppu.cpu_write(PPUDATA, 1),
            Err(BusError::PpuAddressIncomplete)
        );
    }

    #[test]
    fn status_is_read_only() {
        let mut ppu = Ppu::new();
        ppu.set_status(0x80);
        assert_eq!(ppu.cpu_read(PPUSTATUS), Ok(0x80));
        assert_eq!(
            ppu.cpu_write(PPUSTATUS, 0),
            Err(BusError::IllegalWrite { address: PPUSTATUS })
        );
    }

    #[test]
    fn status_read_leaves_address_latch_alone() {
        let mut ppu = Ppu::new();
        ppu.cpu_write(PPUADDR, 0x21).expect("high");
        assert_eq!(ppu.cpu_read(PPUSTATUS), Ok(0));
        assert_eq!(ppu.latch(), AddressLatch::High(0x21));
        ppu.cpu_write(PPUADDR, 0x08).expect("low");
        assert_eq!(ppu.latch(), AddressLatch::Complete(0x2108));
    }

    #[test]
    fn write_only_registers_reject_reads() {
        let mut ppu = Ppu::new();
        for address in [PPUCTRL, PPUMASK, PPUSCROLL, PPUADDR] {
            assert_eq!(
                ppu.cpu_read(address),
                Err(BusError::IllegalRead { address })
            );
        }
    }

    #[test]
    fn control_mask_and_scroll_are_stored() {
        let mut ppu = Ppu::new();
        ppu.cpu_write(PPUCTRL, 0x90).expect("ctrl");
        ppu.cpu_write(PPUMASK, 0x1E).expect("mask");
        ppu.cpu_write(PPUSCROLL, 0x10).expect("x");
        ppu.cpu_write(PPUSCROLL, 0x20).expect("y");
        assert_eq!(ppu.ctrl(), 0x90);
        assert_eq!(ppu.mask(), 0x1E);
        assert_eq!(ppu.scroll(), (0x10, 0x20));
        // Scroll writes do not disturb the address latch.
        assert_eq!(ppu.latch(), AddressLatch::Empty);
    }

    #[test]
    fn other_registers_are_unimplemented() {
        let mut ppu = Ppu::new();
        for address in [0x2003, 0x2004, 0x2008, 0x4000, 0x4016, 0x401F] {
            assert_eq!(
                ppu.cpu_read(address),
                Err(BusError::UnimplementedRegister { address })
            );
            assert_eq!(
                ppu.cpu_write(address, 0),
                Err(BusError::UnimplementedRegister { address })
            );
        }
    }
}
