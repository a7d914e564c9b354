/*!
dispatch/mod.rs - Instruction execution orchestrator.

Overview
========
`execute_one` runs exactly one instruction (or one interrupt entry) to
completion and returns its total cycle cost. The tick-granular countdown
lives above this layer, in the `Cpu` facade.

Order of business per call:
1. A latched hardware IRQ with the I flag clear preempts fetching: the
   entry mirrors BRK with Break clear and no PC byte consumed. A masked
   request stays latched until the I flag clears.
2. Otherwise fetch the opcode (raw path), advance PC, and record the
   decode trace (`last_opcode`, `last_mode`).
3. Trap entries in the table (base cycle count of zero) never reach a
   handler: they run the BRK machinery with `soft_irq` raised.
4. Everything else: total = table base cost + handler-reported extras
   (page-cross and branch penalties).

The per-instruction signal flags (`soft_irq`, `last_rts`, `page_crossed`)
are cleared on entry so each completed instruction reports its own.
*/

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;

use crate::bus::{Bus, IRQ_VECTOR};
use crate::cpu::dispatch::control_flow::{INTERRUPT_CYCLES, brk_sequence};
use crate::cpu::execute::push_status_with_break;
use crate::cpu::state::{CpuState, IRQ_DISABLE};
use crate::cpu::table::OPCODES;

/// Execute one full instruction (or interrupt entry); return total cycles.
pub(crate) fn execute_one(st: &mut CpuState, bus: &mut Bus) -> u32 {
    st.soft_irq = false;
    st.last_rts = false;
    st.page_crossed = false;

    if st.irq_pending && !st.is_flag_set(IRQ_DISABLE) {
        st.irq_pending = false;
        return service_irq(st, bus);
    }

    let opcode = st.fetch_u8(bus);
    st.last_opcode = opcode;
    let entry = &OPCODES[opcode as usize];
    st.last_mode = entry.mode;

    if entry.cycles == 0 {
        // Undocumented byte: software-interrupt trap, no handler runs.
        return brk_sequence(st, bus);
    }

    entry.cycles as u32 + (entry.exec)(st, bus, entry.mode)
}

/// Hardware IRQ entry: like BRK, but the current PC is pushed verbatim
/// (no byte consumed), Break is pushed clear, and `soft_irq` stays false.
fn service_irq(st: &mut CpuState, bus: &mut Bus) -> u32 {
    // Decode trace shows the synthetic BRK the entry substitutes.
    st.last_opcode = 0x00;
    st.last_mode = crate::cpu::addressing::AddrMode::Imp;
    st.last_arg = 0;
    let pc = st.pc;
    st.push_u16(bus, pc);
    push_status_with_break(st, bus, false);
    st.set_flag_bit(IRQ_DISABLE);
    st.set_pc(bus.peek16_raw(IRQ_VECTOR));
    INTERRUPT_CYCLES
}

#[cfg(test)]
mod tests {
    use crate::bus::IRQ_VECTOR;
    use crate::cpu::state::{BREAK, IRQ_DISABLE, SP_RESET, STACK_BASE};
    use crate::test_utils::cpu_with_program;

    #[test]
    fn illegal_opcode_traps_through_brk_machinery() {
        // $02 is undocumented: expect a 7-cycle trap with soft_irq raised.
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0x02]);
        let cycles = cpu.step_instruction(&mut bus);
        assert_eq!(cycles, 7);
        let regs = cpu.get_registers();
        assert!(regs.soft_irq);
        assert_eq!(regs.sp, SP_RESET.wrapping_sub(3));
        assert_ne!(regs.status & IRQ_DISABLE, 0);
    }

    #[test]
    fn irq_respects_interrupt_disable_mask() {
        // SEI; NOP; NOP — I stays set, so the request must wait.
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0x78, 0xEA, 0xEA]);
        cpu.request_interrupt();
        cpu.step_instruction(&mut bus); // SEI
        let cycles = cpu.step_instruction(&mut bus);
        assert_eq!(cycles, 2); // NOP, not the interrupt
        assert_eq!(cpu.get_registers().pc, 0x0302);
    }

    #[test]
    fn irq_pushes_exact_pc_with_break_clear() {
        // CLI, then an IRQ fires before the next instruction.
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0x58, 0xEA]);
        bus.poke8_raw(IRQ_VECTOR, 0x00);
        bus.poke8_raw(IRQ_VECTOR.wrapping_add(1), 0x05);
        cpu.step_instruction(&mut bus); // CLI
        cpu.request_interrupt();
        let cycles = cpu.step_instruction(&mut bus);
        assert_eq!(cycles, 7);
        let regs = cpu.get_registers();
        assert_eq!(regs.pc, 0x0500);
        assert!(!regs.soft_irq); // hardware, not software
        assert_ne!(regs.status & IRQ_DISABLE, 0);
        // Pushed frame: PC $0301 verbatim, status with Break clear.
        let sp = SP_RESET;
        assert_eq!(bus.peek8_raw(STACK_BASE | sp as u16), 0x03);
        assert_eq!(bus.peek8_raw(STACK_BASE | sp.wrapping_sub(1) as u16), 0x01);
        let pushed_status = bus.peek8_raw(STACK_BASE | sp.wrapping_sub(2) as u16);
        assert_eq!(pushed_status & BREAK, 0);
    }

    #[test]
    fn irq_consumed_once() {
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0x58, 0xEA, 0xEA]);
        cpu.step_instruction(&mut bus); // CLI
        cpu.request_interrupt();
        cpu.step_instruction(&mut bus); // IRQ entry (handler is the RTI stub)
        cpu.step_instruction(&mut bus); // RTI back
        let cycles = cpu.step_instruction(&mut bus); // plain NOP again
        assert_eq!(cycles, 2);
    }
}
