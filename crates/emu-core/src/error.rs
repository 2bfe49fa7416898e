//! Bus access errors.

use std::fmt;

/// Why a bus access could not be serviced.
///
/// Every variant is fatal to the operation that raised it. The bus never
/// retries or substitutes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// No device is mapped at this address.
    AddressOutOfRange { address: u16 },
    /// The device mapped here has nothing loaded (e.g. ROM before a program).
    UnloadedDevice { address: u16 },
    /// The target is read-only (ROM, PPU status).
    IllegalWrite { address: u16 },
    /// The target is write-only (PPU control, mask, scroll, address).
    IllegalRead { address: u16 },
    /// A memory-mapped register this machine does not implement.
    UnimplementedRegister { address: u16 },
    /// PPU data port accessed before both address bytes were latched.
    PpuAddressIncomplete,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddressOutOfRange { address } => {
                write!(f, "address ${address:04X} is not mapped to any device")
            }
            Self::UnloadedDevice { address } => {
                write!(f, "cannot access ${address:04X}: no program is loaded")
            }
            Self::IllegalWrite { address } => {
                write!(f, "cannot write to read-only address ${address:04X}")
            }
            Self::IllegalRead { address } => {
                write!(f, "cannot read from write-only register ${address:04X}")
            }
            Self::UnimplementedRegister { address } => {
                write!(f, "register ${address:04X} is not implemented")
            }
            Self::PpuAddressIncomplete => {
                write!(f, "PPU data accessed before a full address was latched")
            }
        }
    }
}

impl std::error::Error for BusError {}
