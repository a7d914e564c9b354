/*!
test_utils/mod.rs - Shared builders for unit tests.

Every execution test wants the same scaffold: a bus with a program
loaded somewhere, the reset vector pointing at it, and a CPU that has
been reset. These helpers keep the tests down to the bytes under test.
*/

use crate::bus::{Bus, RESET_VECTOR};
use crate::cpu::Cpu;

/// Bus with `prg` loaded at `origin` and the reset vector aimed there.
pub fn bus_with_program(origin: u16, prg: &[u8]) -> Bus {
    let mut bus = Bus::new();
    bus.load(origin, prg);
    bus.set_word_raw(RESET_VECTOR, origin);
    bus
}

/// `bus_with_program` plus a freshly reset CPU.
pub fn cpu_with_program(origin: u16, prg: &[u8]) -> (Cpu, Bus) {
    let bus = bus_with_program(origin, prg);
    let mut cpu = Cpu::new();
    cpu.reset(&bus);
    (cpu, bus)
}
