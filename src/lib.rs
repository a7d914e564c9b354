#![doc = r#"
vm6502 library crate.

Cycle-stepped MOS 6502 core for a small virtual machine: a 64 KiB bus
with pluggable devices and a ROM window, a table-driven CPU with
tick-granular stepping, serde register snapshots, an instruction
history ring, and a one-line disassembler.

Modules:
- bus: 64 KiB memory map, ROM write guard, page-indexed device dispatch,
  video-touched latch
- cpu: 6502 core (facade + state + addressing + dispatch + execute),
  opcode table, history, disassembler

In tests, shared program builders are available under `crate::test_utils`.
"#]

pub mod bus;
pub mod cpu;

// Re-export commonly used types at the crate root for convenience.
pub use bus::{Bus, Device};
pub use cpu::core::Cpu;
pub use cpu::regs::{Registers, ShadowRegisters};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
