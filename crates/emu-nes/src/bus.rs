//! NES bus: CPU address routing.
//!
//! Implements `emu_core::Bus` for the NES. Every CPU address belongs to
//! exactly one region:
//!
//! | Range         | Device                                    |
//! |---------------|-------------------------------------------|
//! | $0000-$1FFF   | 2K internal RAM, mirrored every $0800     |
//! | $2000-$401F   | PPU and I/O registers                     |
//! | $4020-$7FFF   | unmapped                                  |
//! | $8000-$FFFF   | program ROM, mirrored over its length     |

use emu_core::{Bus, BusError};
use log::debug;

use crate::ppu::Ppu;

const RAM_SIZE: usize = 0x0800;
pub(crate) const ROM_START: u16 = 0x8000;

/// Index into a `len`-byte program image for a ROM address.
pub(crate) fn rom_offset(address: u16, len: usize) -> usize {
    usize::from(address - ROM_START) % len
}

/// The NES bus, implementing `emu_core::Bus`.
///
/// Owns every device it routes to; the CPU borrows it per instruction.
pub struct NesBus {
    /// 2K internal RAM ($0000-$07FF, mirrored to $1FFF).
    pub ram: [u8; RAM_SIZE],
    /// PPU (2C02) register stub.
    pub ppu: Ppu,
    /// Program image mapped at $8000. Never empty when present.
    rom: Option<Vec<u8>>,
}

impl Default for NesBus {
    fn default() -> Self {
        Self::new()
    }
}

impl NesBus {
    /// Create a bus with cleared RAM and no program.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: [0; RAM_SIZE],
            ppu: Ppu::new(),
            rom: None,
        }
    }

    /// Install a program image at $8000, replacing any previous one.
    ///
    /// An empty image unloads the ROM.
    pub fn load_program(&mut self, program: &[u8]) {
        debug!("loading {} byte program at ${ROM_START:04X}", program.len());
        self.rom = (!program.is_empty()).then(|| program.to_vec());
    }

    /// Length of the loaded program, or 0 when none is loaded.
    #[must_use]
    pub fn program_len(&self) -> usize {
        self.rom.as_ref().map_or(0, Vec::len)
    }

    /// Peek a byte from RAM without side effects (for observation).
    #[must_use]
    pub fn peek_ram(&self, addr: u16) -> u8 {
        self.ram[usize::from(addr) % RAM_SIZE]
    }

    fn read_rom(&self, address: u16) -> Result<u8, BusError> {
        let rom = self
            .rom
            .as_deref()
            .ok_or(BusError::UnloadedDevice { address })?;
        Ok(rom[rom_offset(address, rom.len())])
    }
}

impl Bus for NesBus {
    fn read(&mut self, address: u16) -> Result<u8, BusError> {
        match address {
            0x0000..=0x1FFF => Ok(self.ram[usize::from(address) % RAM_SIZE]),
            0x2000..=0x401F => self.ppu.cpu_read(address),
            0x4020..=0x7FFF => Err(BusError::AddressOutOfRange { address }),
            0x8000..=0xFFFF => self.read_rom(address),
        }
    }

    fn write(&mut self, address: u16, value: u8) -> Result<(), BusError> {
        match address {
            0x0000..=0x1FFF => {
                self.ram[usize::from(address) % RAM_SIZE] = value;
                Ok(())
            }
            0x2000..=0x401F => self.ppu.cpu_write(address, value),
            0x4020..=0x7FFF => Err(BusError::AddressOutOfRange { address }),
            // No mapper support: ROM is never writable.
            0x8000..=0xFFFF => Err(BusError::IllegalWrite { address }),
        }
    }
}
