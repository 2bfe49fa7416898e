//! NES machine around the 6502 core.
//!
//! The CPU sees a 64K address space routed by [`NesBus`]: 2K of mirrored
//! RAM, a register-level PPU stub, and the program ROM mirrored across
//! $8000-$FFFF. [`Nes`] ties the CPU and bus together and runs programs
//! one instruction at a time.

mod bus;
mod config;
mod error;
mod nes;
pub mod ppu;

pub use bus::NesBus;
pub use config::NesConfig;
pub use error::ConfigError;
pub use nes::Nes;
