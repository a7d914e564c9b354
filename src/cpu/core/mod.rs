/*!
core/mod.rs - `Cpu` facade: tick-granular stepping over the dispatch
engine, snapshots, interrupt latching, history, and the shadow-register
observer.

Stepping model
==============
`step` is one clock tick. While an instruction is in flight
(`cycles_left > 0`) a tick only decrements the countdown; at a boundary it
executes one full instruction through `dispatch::execute_one` and arms the
countdown with `total - 1`. Every tick returns a register snapshot, so a
driving loop can pace itself purely on `step` calls. `step_instruction`
is the test/debugger convenience that drains a whole instruction and
reports its cycle cost.

The driving loop owns cancellation: nothing here checks an abort flag, so
an in-flight instruction always completes (`run` re-checks once per tick).
*/

use crate::bus::Bus;
use crate::cpu::dispatch;
use crate::cpu::history::{History, HistoryEntry};
use crate::cpu::regs::{Registers, ShadowRegisters};
use crate::cpu::state::CpuState;
use crate::cpu::table::OPCODES;

/// The CPU: architectural state plus stepping, history, and observer glue.
pub struct Cpu {
    state: CpuState,
    history: History,
    shadow: Option<Box<dyn ShadowRegisters>>,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Classical CPU with power-up register defaults.
    pub fn new() -> Self {
        Self {
            state: CpuState::new(),
            history: History::new(),
            shadow: None,
        }
    }

    /// CPU with a shadow register backend attached; `observe` fires after
    /// every completed instruction.
    pub fn with_shadow(shadow: Box<dyn ShadowRegisters>) -> Self {
        Self {
            state: CpuState::new(),
            history: History::new(),
            shadow: Some(shadow),
        }
    }

    /// Reset: registers to power-up defaults, PC from $FFFC, IRQ disabled,
    /// exit-at-last-RTS cleared.
    pub fn reset(&mut self, bus: &Bus) {
        self.state.reset(bus);
    }

    // ---------------------------------------------------------------------
    // Stepping
    // ---------------------------------------------------------------------

    /// Execute one clock tick and return the post-tick snapshot.
    pub fn step(&mut self, bus: &mut Bus) -> Registers {
        if self.state.cycles_left > 0 {
            self.state.cycles_left -= 1;
            return Registers::capture(&self.state);
        }

        let pc = self.state.pc;
        let total = dispatch::execute_one(&mut self.state, bus);
        self.state.cycles_left = total.saturating_sub(1);

        if self.history.enabled() {
            self.history.record(HistoryEntry {
                pc,
                opcode: self.state.last_opcode,
                mnemonic: OPCODES[self.state.last_opcode as usize].mnemonic,
                mode: self.state.last_mode,
                arg: self.state.last_arg,
            });
        }

        let snap = Registers::capture(&self.state);
        if let Some(shadow) = &mut self.shadow {
            shadow.observe(&snap);
        }
        snap
    }

    /// Like `step`, but force PC to `pc` first (instruction-boundary jump).
    pub fn step_at(&mut self, bus: &mut Bus, pc: u16) -> Registers {
        self.state.cycles_left = 0;
        self.state.set_pc(pc);
        self.step(bus)
    }

    /// Drain one whole instruction and return its total cycle cost.
    /// Any in-flight countdown is discarded first.
    pub fn step_instruction(&mut self, bus: &mut Bus) -> u32 {
        self.state.cycles_left = 0;
        self.step(bus);
        let total = 1 + self.state.cycles_left;
        while self.state.cycles_left > 0 {
            self.step(bus);
        }
        total
    }

    /// `step_instruction` from a forced PC.
    pub fn step_instruction_at(&mut self, bus: &mut Bus, pc: u16) -> u32 {
        self.state.cycles_left = 0;
        self.state.set_pc(pc);
        self.step_instruction(bus)
    }

    /// Tick up to `max_ticks` times, stopping early when a software
    /// interrupt or the last-RTS signal lands. Returns the final snapshot.
    pub fn run(&mut self, bus: &mut Bus, max_ticks: u64) -> Registers {
        let mut snap = self.get_registers();
        for _ in 0..max_ticks {
            snap = self.step(bus);
            if snap.soft_irq || snap.last_rts {
                break;
            }
        }
        snap
    }

    // ---------------------------------------------------------------------
    // Snapshots / control
    // ---------------------------------------------------------------------

    pub fn get_registers(&self) -> Registers {
        Registers::capture(&self.state)
    }

    pub fn set_registers(&mut self, regs: Registers) {
        regs.restore(&mut self.state);
    }

    /// Latch a hardware IRQ; consumed at the next instruction boundary if
    /// the I flag is clear, held otherwise.
    pub fn request_interrupt(&mut self) {
        self.state.irq_pending = true;
    }

    /// Treat an RTS with an empty stack as program termination.
    pub fn set_exit_at_last_rts(&mut self, enabled: bool) {
        self.state.exit_at_last_rts = enabled;
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn set_history_enabled(&mut self, enabled: bool) {
        self.history.set_enabled(enabled);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ---------------------------------------------------------------------
    // Direct state access (tests, debuggers)
    // ---------------------------------------------------------------------

    pub fn state(&self) -> &CpuState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::cpu_with_program;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn tick_granularity_models_instruction_latency() {
        // LDA #$42 costs 2 cycles: executes on the first tick, the second
        // tick only burns the countdown.
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xA9, 0x42, 0xA9, 0x01]);
        let snap = cpu.step(&mut bus);
        assert_eq!(snap.a, 0x42);
        assert_eq!(snap.pc, 0x0302);
        assert_eq!(snap.cycles_left, 1);
        let snap = cpu.step(&mut bus);
        assert_eq!(snap.a, 0x42); // nothing new executed
        assert_eq!(snap.cycles_left, 0);
        let snap = cpu.step(&mut bus);
        assert_eq!(snap.a, 0x01); // next instruction
    }

    #[test]
    fn step_at_overrides_pc() {
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xEA]);
        bus.load(0x0500, &[0xA9, 0x33]);
        let snap = cpu.step_at(&mut bus, 0x0500);
        assert_eq!(snap.a, 0x33);
        assert_eq!(snap.pc, 0x0502);
    }

    #[test]
    fn snapshot_set_get_round_trip() {
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xEA]);
        let mut regs = cpu.get_registers();
        regs.a = 0xAB;
        regs.pc = 0x1234;
        regs.cycles_left = 2;
        cpu.set_registers(regs);
        assert_eq!(cpu.get_registers(), regs);
        // Armed countdown: next two ticks execute nothing.
        let snap = cpu.step(&mut bus);
        assert_eq!(snap.pc, 0x1234);
        assert_eq!(snap.cycles_left, 1);
    }

    #[test]
    fn run_stops_on_soft_irq() {
        // NOP; NOP; BRK
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xEA, 0xEA, 0x00]);
        let snap = cpu.run(&mut bus, 1_000);
        assert!(snap.soft_irq);
    }

    #[test]
    fn run_stops_on_last_rts() {
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xEA, 0x60]);
        cpu.set_exit_at_last_rts(true);
        let snap = cpu.run(&mut bus, 1_000);
        assert!(snap.last_rts);
        assert!(!snap.soft_irq);
    }

    #[test]
    fn run_respects_tick_limit() {
        // Infinite loop: JMP $0300.
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0x4C, 0x00, 0x03]);
        let snap = cpu.run(&mut bus, 10);
        assert!(!snap.soft_irq);
        assert_eq!(snap.pc, 0x0300);
    }

    #[test]
    fn history_records_completed_instructions() {
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xA9, 0x42, 0x8D, 0x40, 0x00]);
        cpu.set_history_enabled(true);
        cpu.step_instruction(&mut bus);
        cpu.step_instruction(&mut bus);
        let entries: Vec<_> = cpu.history().iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].pc, 0x0300);
        assert_eq!(entries[0].mnemonic, "LDA");
        assert_eq!(entries[1].mnemonic, "STA");
        assert_eq!(entries[1].arg, 0x0040);
    }

    #[test]
    fn countdown_ticks_do_not_duplicate_history() {
        let (mut cpu, mut bus) = cpu_with_program(0x0300, &[0xAD, 0x40, 0x00]); // LDA abs, 4 cycles
        cpu.set_history_enabled(true);
        for _ in 0..4 {
            cpu.step(&mut bus);
        }
        assert_eq!(cpu.history().len(), 1);
    }

    struct Recorder {
        log: Rc<RefCell<Vec<Registers>>>,
    }
    impl ShadowRegisters for Recorder {
        fn observe(&mut self, regs: &Registers) {
            self.log.borrow_mut().push(*regs);
        }
    }

    #[test]
    fn shadow_observer_fires_once_per_instruction() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut cpu = Cpu::with_shadow(Box::new(Recorder { log: Rc::clone(&log) }));
        let mut bus = Bus::new();
        bus.load(0x0200, &[0xA9, 0x7F, 0xEA]); // default entry point
        cpu.reset(&bus);
        cpu.step_instruction(&mut bus);
        cpu.step_instruction(&mut bus);
        let seen = log.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].a, 0x7F);
    }
}
