//! Core traits and types shared by the CPU core and the machine.
//!
//! Every memory access goes through a [`Bus`]. Accesses are fallible: the
//! bus decides which device owns an address and reports a [`BusError`]
//! when no device can service the request.

mod bus;
mod cpu;
mod error;
mod observable;

pub use bus::{Bus, SimpleBus};
pub use cpu::Cpu;
pub use error::BusError;
pub use observable::{Observable, Value};
