/*!
load_store.rs - Load / store opcode family (LDA/LDX/LDY, STA/STX/STY).

Loads route through `read_operand` and report the page-cross penalty for
the indexed modes that charge one. Stores resolve the address and write
through the dispatching bus path; their base cycle cost already covers
indexing, so they never report extra cycles.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{self, AddrMode};
use crate::cpu::execute;
use crate::cpu::state::CpuState;

pub(crate) fn op_lda(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    let (v, crossed) = addressing::read_operand(st, bus, mode);
    execute::lda(st, v);
    crossed as u32
}

pub(crate) fn op_ldx(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    let (v, crossed) = addressing::read_operand(st, bus, mode);
    execute::ldx(st, v);
    crossed as u32
}

pub(crate) fn op_ldy(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    let (v, crossed) = addressing::read_operand(st, bus, mode);
    execute::ldy(st, v);
    crossed as u32
}

pub(crate) fn op_sta(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    if let Some(addr) = addressing::resolve(st, bus, mode).addr {
        bus.poke8(addr, st.a);
    }
    0
}

pub(crate) fn op_stx(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    if let Some(addr) = addressing::resolve(st, bus, mode).addr {
        bus.poke8(addr, st.x);
    }
    0
}

pub(crate) fn op_sty(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    if let Some(addr) = addressing::resolve(st, bus, mode).addr {
        bus.poke8(addr, st.y);
    }
    0
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::{NEGATIVE, ZERO};
    use crate::test_utils::cpu_with_program;

    #[test]
    fn lda_immediate_loads_and_flags() {
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xA9, 0x42]);
        let cycles = cpu.step_instruction(&mut bus);
        assert_eq!(cycles, 2);
        let regs = cpu.get_registers();
        assert_eq!(regs.a, 0x42);
        assert_eq!(regs.pc, 0x0302);
        assert_eq!(regs.status & (ZERO | NEGATIVE), 0);
    }

    #[test]
    fn lda_zero_sets_zero_flag() {
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xA9, 0x00]);
        cpu.step_instruction(&mut bus);
        let regs = cpu.get_registers();
        assert_eq!(regs.a, 0x00);
        assert_ne!(regs.status & ZERO, 0);
        assert_eq!(regs.status & NEGATIVE, 0);
    }

    #[test]
    fn lda_absolute_x_page_cross_costs_extra_cycle() {
        // LDX #$01; LDA $12FF,X -> $1300, crossing a page.
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xA2, 0x01, 0xBD, 0xFF, 0x12]);
        bus.poke8_raw(0x1300, 0x77);
        cpu.step_instruction(&mut bus);
        let cycles = cpu.step_instruction(&mut bus);
        assert_eq!(cycles, 5); // 4 base + 1 cross
        assert_eq!(cpu.get_registers().a, 0x77);
    }

    #[test]
    fn lda_absolute_x_same_page_no_penalty() {
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xA2, 0x01, 0xBD, 0x00, 0x12]);
        bus.poke8_raw(0x1201, 0x55);
        cpu.step_instruction(&mut bus);
        let cycles = cpu.step_instruction(&mut bus);
        assert_eq!(cycles, 4);
        assert_eq!(cpu.get_registers().a, 0x55);
    }

    #[test]
    fn sta_writes_through_dispatching_path() {
        // LDA #$99; STA $0040
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xA9, 0x99, 0x85, 0x40]);
        cpu.step_instruction(&mut bus);
        let cycles = cpu.step_instruction(&mut bus);
        assert_eq!(cycles, 3);
        assert_eq!(bus.peek8_raw(0x0040), 0x99);
    }

    #[test]
    fn stx_sty_zero_page_indexed() {
        // LDX #$05; LDY #$07; STX $10,Y? (no such mode) -> use STX $10 / STY $20,X
        let (mut cpu, mut bus) = cpu_with_program(
            0x0300,
            &[0xA2, 0x05, 0xA0, 0x07, 0x86, 0x10, 0x94, 0x20],
        );
        for _ in 0..4 {
            cpu.step_instruction(&mut bus);
        }
        assert_eq!(bus.peek8_raw(0x0010), 0x05);
        assert_eq!(bus.peek8_raw(0x0025), 0x07); // $20 + X
    }

    #[test]
    fn ldx_zero_page_y_indexed() {
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xA0, 0x03, 0xB6, 0x40]);
        bus.poke8_raw(0x0043, 0x81);
        cpu.step_instruction(&mut bus);
        cpu.step_instruction(&mut bus);
        let regs = cpu.get_registers();
        assert_eq!(regs.x, 0x81);
        assert_ne!(regs.status & NEGATIVE, 0);
    }
}
