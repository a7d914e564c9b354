/*!
control_flow.rs - Control-flow / system opcode family.

  JMP abs        (0x4C)
  JMP (ind)      (0x6C)  (hardware indirect wrap quirk preserved)
  JSR abs        (0x20)
  RTS            (0x60)
  RTI            (0x40)
  BRK            (0x00)

Behavior Details
================
- JSR pushes (PC - 1) after the operand fetch (return address high, then
  low) per 6502 convention; RTS pulls and adds 1.
- RTS with exit-at-last-RTS enabled and SP at its reset value signals
  `last_rts` instead of popping: the stack is empty, the subroutine tree
  has returned to its caller.
- BRK consumes a padding byte, then pushes PC+1 and status with Break set,
  sets IRQ-disable, loads the vector at $FFFE/$FFFF, and raises `soft_irq`.
  RTI therefore resumes 3 bytes past the BRK opcode.
- The same `brk_sequence` serves the illegal-opcode trap (the dispatcher
  calls it directly) and, with Break clear and no padding byte, is
  mirrored by the hardware IRQ entry in `dispatch::mod`.
- RTI pulls status then PC (the exact pushed address), and clears
  IRQ-disable so a handler returns with interrupts re-enabled.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{self, AddrMode};
use crate::cpu::execute::{plp, pop_word, push_status_with_break, push_word};
use crate::cpu::state::{CpuState, IRQ_DISABLE, SP_RESET};

/// Cycle cost of the BRK / trap / hardware-IRQ sequence.
pub(crate) const INTERRUPT_CYCLES: u32 = 7;

/// Full BRK entry: padding byte, stack frame with Break set, vector load.
/// Returns the total cycle cost. Shared by the explicit opcode and the
/// illegal-opcode trap.
pub(crate) fn brk_sequence(st: &mut CpuState, bus: &mut Bus) -> u32 {
    st.advance_pc_one(); // BRK carries a padding byte
    let ret = st.pc.wrapping_add(1);
    push_word(st, bus, ret);
    push_status_with_break(st, bus, true);
    st.set_flag_bit(IRQ_DISABLE);
    st.set_pc(bus.peek16_raw(crate::bus::IRQ_VECTOR));
    st.soft_irq = true;
    INTERRUPT_CYCLES
}

pub(crate) fn op_jmp(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    if let Some(target) = addressing::resolve(st, bus, mode).addr {
        st.set_pc(target);
    }
    0
}

pub(crate) fn op_jsr(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    let target = addressing::resolve(st, bus, mode).addr.unwrap_or(st.pc);
    // After operand fetch PC points to the next instruction; push (PC - 1).
    let ret = st.pc.wrapping_sub(1);
    push_word(st, bus, ret);
    st.set_pc(target);
    0
}

pub(crate) fn op_rts(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    if st.exit_at_last_rts && st.sp == SP_RESET {
        st.last_rts = true;
        return 0;
    }
    let ret = pop_word(st, bus);
    st.set_pc(ret.wrapping_add(1));
    0
}

pub(crate) fn op_rti(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    plp(st, bus);
    let return_pc = pop_word(st, bus);
    st.set_pc(return_pc);
    st.clear_flag_bit(IRQ_DISABLE);
    0
}

pub(crate) fn op_brk(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    brk_sequence(st, bus);
    0 // base cycles already carry the full cost
}

#[cfg(test)]
mod tests {
    use crate::bus::IRQ_VECTOR;
    use crate::cpu::state::{BREAK, IRQ_DISABLE, SP_RESET, STACK_BASE};
    use crate::test_utils::cpu_with_program;

    #[test]
    fn jmp_absolute_sets_pc() {
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0x4C, 0x05, 0x80]);
        let cycles = cpu.step_instruction(&mut bus);
        assert_eq!(cycles, 3);
        assert_eq!(cpu.get_registers().pc, 0x8005);
    }

    #[test]
    fn jmp_indirect_honors_page_wrap_quirk() {
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0x6C, 0xFF, 0x21]);
        bus.poke8_raw(0x21FF, 0x34);
        bus.poke8_raw(0x2100, 0x12);
        bus.poke8_raw(0x2200, 0x99);
        let cycles = cpu.step_instruction(&mut bus);
        assert_eq!(cycles, 5);
        assert_eq!(cpu.get_registers().pc, 0x1234);
    }

    #[test]
    fn jsr_rts_round_trip_restores_following_address() {
        // JSR $0310 ... at $0310: RTS
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0x20, 0x10, 0x03]);
        bus.poke8_raw(0x0310, 0x60);
        let jsr_cycles = cpu.step_instruction(&mut bus);
        assert_eq!(jsr_cycles, 6);
        let regs = cpu.get_registers();
        assert_eq!(regs.pc, 0x0310);
        assert_eq!(regs.sp, SP_RESET.wrapping_sub(2));
        let rts_cycles = cpu.step_instruction(&mut bus);
        assert_eq!(rts_cycles, 6);
        let regs = cpu.get_registers();
        assert_eq!(regs.pc, 0x0303); // JSR address + 3
        assert_eq!(regs.sp, SP_RESET);
    }

    #[test]
    fn jsr_rts_round_trip_from_mid_page_stack_pointer() {
        // Same round trip, but starting with SP deep in the stack page.
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0x20, 0x10, 0x03]);
        bus.poke8_raw(0x0310, 0x60);
        let mut regs = cpu.get_registers();
        regs.sp = 0x40;
        cpu.set_registers(regs);
        cpu.step_instruction(&mut bus);
        assert_eq!(cpu.get_registers().sp, 0x3E);
        cpu.step_instruction(&mut bus);
        let regs = cpu.get_registers();
        assert_eq!(regs.pc, 0x0303);
        assert_eq!(regs.sp, 0x40); // unchanged from its pre-JSR value
    }

    #[test]
    fn rts_on_empty_stack_signals_last_rts_when_enabled() {
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0x60]);
        cpu.set_exit_at_last_rts(true);
        let pc_before = cpu.get_registers().pc;
        cpu.step_instruction(&mut bus);
        let regs = cpu.get_registers();
        assert!(regs.last_rts);
        assert_eq!(regs.sp, SP_RESET); // nothing popped
        assert_eq!(regs.pc, pc_before.wrapping_add(1));
    }

    #[test]
    fn brk_rti_round_trip_restores_brk_address_plus_three() {
        // BRK at $0300; handler at $0400 is just RTI.
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0x00]);
        bus.poke8_raw(IRQ_VECTOR, 0x00);
        bus.poke8_raw(IRQ_VECTOR.wrapping_add(1), 0x04);
        bus.poke8_raw(0x0400, 0x40); // RTI
        cpu.set_registers({
            let mut r = cpu.get_registers();
            r.status &= !IRQ_DISABLE;
            r
        });

        let brk_cycles = cpu.step_instruction(&mut bus);
        assert_eq!(brk_cycles, 7);
        let regs = cpu.get_registers();
        assert_eq!(regs.pc, 0x0400);
        assert_eq!(regs.sp, SP_RESET.wrapping_sub(3)); // 3 bytes pushed
        assert_ne!(regs.status & IRQ_DISABLE, 0);
        assert!(regs.soft_irq);
        // Pushed status has Break set.
        let pushed_status = bus.peek8_raw(STACK_BASE | (SP_RESET.wrapping_sub(2)) as u16);
        assert_ne!(pushed_status & BREAK, 0);

        let rti_cycles = cpu.step_instruction(&mut bus);
        assert_eq!(rti_cycles, 6);
        let regs = cpu.get_registers();
        assert_eq!(regs.pc, 0x0303); // BRK address + 3, exactly
        assert_eq!(regs.status & IRQ_DISABLE, 0);
        assert_eq!(regs.sp, SP_RESET);
    }

    #[test]
    fn default_vectors_make_brk_a_no_op() {
        // Fresh bus: BRK vectors to the seeded RTI stub and comes back.
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0x00, 0xEA, 0xEA, 0xEA]);
        cpu.step_instruction(&mut bus); // BRK
        cpu.step_instruction(&mut bus); // RTI stub
        let regs = cpu.get_registers();
        assert_eq!(regs.pc, 0x0303);
        assert_eq!(regs.sp, SP_RESET);
    }
}
