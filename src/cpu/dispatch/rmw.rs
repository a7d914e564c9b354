/*!
rmw.rs - Read-modify-write family (ASL/LSR/ROL/ROR/INC/DEC).

Accumulator-mode shifts mutate A directly; memory forms ride the canonical
read / dummy-write / write choreography in `execute::rmw_memory`. Indexed
forms carry their worst-case cost in the base cycle figure, so no handler
here reports extra cycles.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{self, AddrMode};
use crate::cpu::execute;
use crate::cpu::state::CpuState;

pub(crate) fn op_asl(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    if mode == AddrMode::Acc {
        execute::asl_acc(st);
    } else if let Some(addr) = addressing::resolve(st, bus, mode).addr {
        execute::asl_mem(st, bus, addr);
    }
    0
}

pub(crate) fn op_lsr(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    if mode == AddrMode::Acc {
        execute::lsr_acc(st);
    } else if let Some(addr) = addressing::resolve(st, bus, mode).addr {
        execute::lsr_mem(st, bus, addr);
    }
    0
}

pub(crate) fn op_rol(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    if mode == AddrMode::Acc {
        execute::rol_acc(st);
    } else if let Some(addr) = addressing::resolve(st, bus, mode).addr {
        execute::rol_mem(st, bus, addr);
    }
    0
}

pub(crate) fn op_ror(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    if mode == AddrMode::Acc {
        execute::ror_acc(st);
    } else if let Some(addr) = addressing::resolve(st, bus, mode).addr {
        execute::ror_mem(st, bus, addr);
    }
    0
}

pub(crate) fn op_inc(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    if let Some(addr) = addressing::resolve(st, bus, mode).addr {
        execute::inc_mem(st, bus, addr);
    }
    0
}

pub(crate) fn op_dec(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    if let Some(addr) = addressing::resolve(st, bus, mode).addr {
        execute::dec_mem(st, bus, addr);
    }
    0
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::{CARRY, ZERO};
    use crate::test_utils::cpu_with_program;

    #[test]
    fn asl_accumulator_shifts_into_carry() {
        // LDA #$81; ASL A
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xA9, 0x81, 0x0A]);
        cpu.step_instruction(&mut bus);
        let cycles = cpu.step_instruction(&mut bus);
        assert_eq!(cycles, 2);
        let regs = cpu.get_registers();
        assert_eq!(regs.a, 0x02);
        assert_ne!(regs.status & CARRY, 0);
    }

    #[test]
    fn lsr_memory_updates_cell_and_flags() {
        // LSR $40
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0x46, 0x40]);
        bus.poke8_raw(0x0040, 0x01);
        let cycles = cpu.step_instruction(&mut bus);
        assert_eq!(cycles, 5);
        let regs = cpu.get_registers();
        assert_eq!(bus.peek8_raw(0x0040), 0x00);
        assert_ne!(regs.status & CARRY, 0);
        assert_ne!(regs.status & ZERO, 0);
    }

    #[test]
    fn inc_dec_round_trip_memory() {
        // INC $40; DEC $40
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xE6, 0x40, 0xC6, 0x40]);
        bus.poke8_raw(0x0040, 0x7F);
        cpu.step_instruction(&mut bus);
        assert_eq!(bus.peek8_raw(0x0040), 0x80);
        cpu.step_instruction(&mut bus);
        assert_eq!(bus.peek8_raw(0x0040), 0x7F);
    }

    #[test]
    fn inc_absolute_x_fixed_cost_without_penalty() {
        // LDX #$01; INC $12FF,X -> $1300; abs,X RMW is always 7 cycles.
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xA2, 0x01, 0xFE, 0xFF, 0x12]);
        bus.poke8_raw(0x1300, 0x41);
        cpu.step_instruction(&mut bus);
        let cycles = cpu.step_instruction(&mut bus);
        assert_eq!(cycles, 7);
        assert_eq!(bus.peek8_raw(0x1300), 0x42);
    }

    #[test]
    fn rol_memory_inserts_carry() {
        // SEC; ROL $40
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0x38, 0x26, 0x40]);
        bus.poke8_raw(0x0040, 0x40);
        cpu.step_instruction(&mut bus);
        cpu.step_instruction(&mut bus);
        assert_eq!(bus.peek8_raw(0x0040), 0x81);
        assert_eq!(cpu.get_registers().status & CARRY, 0);
    }
}
