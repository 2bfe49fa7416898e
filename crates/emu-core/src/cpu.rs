//! CPU core trait.

use crate::Bus;

/// A CPU core.
///
/// CPUs execute whole instructions and access memory through a bus. The
/// bus is passed in, not owned, so the machine can keep the CPU and its
/// devices as siblings.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// The error raised when an instruction cannot complete.
    type Error;

    /// The record describing an executed instruction.
    type Step;

    /// Fetch, decode and execute one instruction.
    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<Self::Step, Self::Error>;

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;
}
