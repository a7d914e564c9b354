/*!
state.rs - Canonical 6502 architectural state (registers + flags) plus the
per-step bookkeeping the execution engine maintains.

Overview
========
`CpuState` is the single authoritative owner of everything one CPU instance
carries between steps:
  - Architectural registers: A, X, Y, SP, PC, status.
  - Step bookkeeping: the cycle countdown, decode trace fields (last opcode,
    mode, argument, page-cross), interrupt latches (`irq_pending`,
    `soft_irq`), and the subroutine-exit signal (`last_rts`).

It intentionally excludes:
  - Bus / memory ownership
  - Instruction decode and dispatch
  - The opcode table
Those live in the sibling modules (`addressing`, `table`, `dispatch`).

Design Choices
==============
- Methods are small, inlinable, and side-effect isolated.
- Public setters do not mask bits; higher layers enforce invariants.
- Stack helpers go through the dispatching bus path (the stack page is
  ordinary memory and may be device-mapped); fetch helpers use the raw
  path (instruction stream reads never hit devices).

6502 Status Register Bit Layout
===============================
Bit: 7 6 5 4 3 2 1 0
     N V Q B D I Z C
Where:
  N = NEGATIVE
  V = OVERFLOW
  Q = QUANTUM (the 6502's always-set bit 5, reserved here for shadow
      register backends; classical execution only round-trips it)
  B = BREAK (PHP/BRK only; hardware IRQ pushes with B clear)
  D = DECIMAL (selects BCD arithmetic for ADC/SBC)
  I = IRQ_DISABLE
  Z = ZERO
  C = CARRY
*/

use crate::bus::{Bus, RESET_VECTOR};
use crate::cpu::addressing::AddrMode;

/// Processor status flag bit masks (canonical definitions).
pub const CARRY: u8 = 0b0000_0001;
pub const ZERO: u8 = 0b0000_0010;
pub const IRQ_DISABLE: u8 = 0b0000_0100;
pub const DECIMAL: u8 = 0b0000_1000;
pub const BREAK: u8 = 0b0001_0000;
pub const QUANTUM: u8 = 0b0010_0000; // Bit 5; always reads as 1.
pub const OVERFLOW: u8 = 0b0100_0000;
pub const NEGATIVE: u8 = 0b1000_0000;

/// Stack page base address.
pub const STACK_BASE: u16 = 0x0100;
/// SP power-on / reset value (empty descending stack).
pub const SP_RESET: u8 = 0xFF;

/// Register and bookkeeping container for one CPU instance.
#[derive(Debug, Clone, Copy)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,

    // Step bookkeeping, maintained by the dispatch layer.
    pub cycles_left: u32,
    pub last_opcode: u8,
    pub last_mode: AddrMode,
    pub last_arg: u16,
    pub page_crossed: bool,
    pub soft_irq: bool,
    pub last_rts: bool,
    pub irq_pending: bool,
    pub exit_at_last_rts: bool,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: SP_RESET,
            pc: 0x0000,
            status: IRQ_DISABLE | QUANTUM,
            cycles_left: 0,
            last_opcode: 0,
            last_mode: AddrMode::Imp,
            last_arg: 0,
            page_crossed: false,
            soft_irq: false,
            last_rts: false,
            irq_pending: false,
            exit_at_last_rts: false,
        }
    }
}

impl CpuState {
    // ---------------------------------------------------------------------
    // Construction / Reset
    // ---------------------------------------------------------------------

    /// Create a new CPU state using power-up defaults.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset registers and bookkeeping, loading PC from the reset vector at
    /// $FFFC/$FFFD. Clears the exit-at-last-RTS request along with the rest.
    pub fn reset(&mut self, bus: &Bus) {
        *self = Self::default();
        self.pc = bus.peek16_raw(RESET_VECTOR);
    }

    // ---------------------------------------------------------------------
    // Basic Accessors (Read)
    // ---------------------------------------------------------------------
    #[inline]
    pub fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    pub fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    pub fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    pub fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    pub fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    pub fn status(&self) -> u8 {
        self.status
    }

    // ---------------------------------------------------------------------
    // Mutators (Write)
    // ---------------------------------------------------------------------
    #[inline]
    pub fn set_a(&mut self, v: u8) {
        self.a = v;
    }
    #[inline]
    pub fn set_x(&mut self, v: u8) {
        self.x = v;
    }
    #[inline]
    pub fn set_y(&mut self, v: u8) {
        self.y = v;
    }
    #[inline]
    pub fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    pub fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }
    #[inline]
    pub fn set_status(&mut self, v: u8) {
        self.status = v;
    }

    // ---------------------------------------------------------------------
    // Program Counter Helpers
    // ---------------------------------------------------------------------

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    pub fn advance_pc(&mut self, delta: u16) {
        self.pc = self.pc.wrapping_add(delta);
    }

    /// Advance PC by 1 (common path).
    #[inline]
    pub fn advance_pc_one(&mut self) {
        self.advance_pc(1);
    }

    /// Fetch a byte from the instruction stream at PC and advance PC by 1.
    /// Raw path: instruction fetches never dispatch to devices.
    #[inline]
    pub fn fetch_u8(&mut self, bus: &Bus) -> u8 {
        let b = bus.peek8_raw(self.pc);
        self.advance_pc_one();
        b
    }

    /// Fetch a little-endian 16-bit word (low then high) from the
    /// instruction stream and advance PC by 2.
    #[inline]
    pub fn fetch_u16(&mut self, bus: &Bus) -> u16 {
        let lo = self.fetch_u8(bus) as u16;
        let hi = self.fetch_u8(bus) as u16;
        (hi << 8) | lo
    }

    // ---------------------------------------------------------------------
    // Flag Operations
    // ---------------------------------------------------------------------

    /// Return true if a status flag (bit mask) is set.
    #[inline]
    pub fn is_flag_set(&self, mask: u8) -> bool {
        (self.status & mask) != 0
    }

    /// Set a flag bit (OR).
    #[inline]
    pub fn set_flag_bit(&mut self, mask: u8) {
        self.status |= mask;
    }

    /// Clear a flag bit (AND NOT).
    #[inline]
    pub fn clear_flag_bit(&mut self, mask: u8) {
        self.status &= !mask;
    }

    /// Assign a flag bit based on boolean `value`.
    #[inline]
    pub fn assign_flag(&mut self, mask: u8, value: bool) {
        if value {
            self.set_flag_bit(mask);
        } else {
            self.clear_flag_bit(mask);
        }
    }

    /// Composite helper to update ZERO + NEGATIVE according to 6502 rules.
    #[inline]
    pub fn update_zn(&mut self, result: u8) {
        self.assign_flag(ZERO, result == 0);
        self.assign_flag(NEGATIVE, (result & 0x80) != 0);
    }

    /// Compose the status byte for pushing to stack (BRK/PHP vs. IRQ).
    ///
    /// - Bit 5 (QUANTUM) always forced to 1.
    /// - BREAK bit included only if `set_break_on_push` = true.
    pub fn compose_status_for_push(&self, set_break_on_push: bool) -> u8 {
        let mut v = self.status | QUANTUM;
        if set_break_on_push {
            v |= BREAK;
        } else {
            v &= !BREAK;
        }
        v
    }

    // ---------------------------------------------------------------------
    // Stack Helpers
    // ---------------------------------------------------------------------
    //
    // 6502 stack lives on page $0100, SP post-decrement on push and
    // pre-increment on pull:
    //   Push: write at $0100 | SP, then SP = SP - 1
    //   Pull: SP = SP + 1, then read at $0100 | SP

    /// Push a byte onto the stack.
    #[inline]
    pub fn push_u8(&mut self, bus: &mut Bus, value: u8) {
        let addr = STACK_BASE | (self.sp as u16);
        bus.poke8(addr, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pull (pop) a byte from the stack.
    #[inline]
    pub fn pop_u8(&mut self, bus: &mut Bus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        let addr = STACK_BASE | (self.sp as u16);
        bus.peek8(addr)
    }

    /// Push a 16-bit word in return-address order (high byte first, so the
    /// low byte sits at the lower stack address).
    #[inline]
    pub fn push_u16(&mut self, bus: &mut Bus, value: u16) {
        let hi = (value >> 8) as u8;
        let lo = value as u8;
        self.push_u8(bus, hi);
        self.push_u8(bus, lo);
    }

    /// Pull a 16-bit word pushed by `push_u16`.
    #[inline]
    pub fn pop_u16(&mut self, bus: &mut Bus) -> u16 {
        let lo = self.pop_u8(bus) as u16;
        let hi = self.pop_u8(bus) as u16;
        (hi << 8) | lo
    }
}
