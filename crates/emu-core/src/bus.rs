//! Memory and I/O bus interface.

use crate::BusError;

/// Memory and I/O bus interface.
///
/// Components access memory and peripherals through this trait. The bus
/// handles address decoding and routing to the appropriate device, and is
/// the only place that knows which device owns an address.
pub trait Bus {
    /// Read a byte from the given address.
    ///
    /// Takes `&mut self`: memory-mapped device registers may change state
    /// when read.
    fn read(&mut self, address: u16) -> Result<u8, BusError>;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8) -> Result<(), BusError>;

    /// Read a little-endian word.
    ///
    /// The two bytes are routed independently: a word that straddles two
    /// devices takes its high byte from whichever device owns `address + 1`.
    fn read_word(&mut self, address: u16) -> Result<u16, BusError> {
        let low = self.read(address)?;
        let high = self.read(address.wrapping_add(1))?;
        Ok(u16::from_le_bytes([low, high]))
    }

    /// Write a little-endian word, low byte first.
    fn write_word(&mut self, address: u16, value: u16) -> Result<(), BusError> {
        let [low, high] = value.to_le_bytes();
        self.write(address, low)?;
        self.write(address.wrapping_add(1), high)
    }
}

/// Flat 64K RAM bus with no devices.
///
/// Every address is readable and writable. Used to exercise CPU cores in
/// isolation from a real memory map.
pub struct SimpleBus {
    ram: Box<[u8; 0x10000]>,
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: Box::new([0; 0x10000]),
        }
    }

    /// Copy `data` into memory starting at `address`, wrapping at $FFFF.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        let mut addr = address;
        for &byte in data {
            self.ram[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Read a byte without going through the `Bus` trait.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.ram[address as usize]
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> Result<u8, BusError> {
        Ok(self.ram[address as usize])
    }

    fn write(&mut self, address: u16, value: u8) -> Result<(), BusError> {
        self.ram[address as usize] = value;
        Ok(())
    }
}
