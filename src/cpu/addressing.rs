/*!
addressing.rs - Addressing-mode enumeration and the effective-address
resolver shared by execution and disassembly.

Overview
========
All 13 documented 6502 addressing modes funnel through `resolve`, which
consumes the operand bytes at PC, computes the effective address (if the
mode has one), and reports whether the access crosses a page boundary.
Handlers never re-implement indexing: `AbsX`/`AbsY`/`IzY` apply the index
here, uniformly.

Fetch policy
============
Everything the resolver reads — operand bytes and indirect pointers — goes
through the raw, non-dispatching bus path. Only the final data access at
the resolved address (done by the caller) dispatches to devices. This keeps
pointer tables safe to place over device-mapped pages.

Quirks preserved
================
- Zero-page indexed modes wrap inside page zero ($FF + 1 -> $00).
- `Ind` (JMP only) reads the pointer high byte without carrying into the
  next page ($xxFF wraps to $xx00).
- `IzX` wraps the pointer sum at 8 bits; the pointer word itself is read
  with zero-page wrap.

Page-cross accounting
=====================
`AbsX`, `AbsY`, `IzY`: crossed when indexing changes the high byte of the
base address. `Rel`: crossed when the branch target leaves the page the
branch instruction occupies (judged against the operand byte's address) —
this is what the cycle penalties charge against.

The resolver also records its outcome into the state's decode trace fields
(`last_arg`, `page_crossed`).
*/

use crate::bus::Bus;
use crate::cpu::state::CpuState;

/// The 13 documented addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    /// Implied: no operand.
    Imp,
    /// Accumulator: operand is A.
    Acc,
    /// Immediate: operand is the next instruction byte.
    Imm,
    /// Zero page.
    Zpg,
    /// Zero page indexed by X (wraps in page zero).
    ZpgX,
    /// Zero page indexed by Y (wraps in page zero).
    ZpgY,
    /// Absolute.
    Abs,
    /// Absolute indexed by X.
    AbsX,
    /// Absolute indexed by Y.
    AbsY,
    /// Indirect (JMP only, with the page-wrap quirk).
    Ind,
    /// Indexed indirect: ($zp,X).
    IzX,
    /// Indirect indexed: ($zp),Y.
    IzY,
    /// Relative (branches).
    Rel,
}

impl AddrMode {
    /// Operand bytes following the opcode.
    #[inline]
    pub fn operand_len(self) -> u16 {
        match self {
            AddrMode::Imp | AddrMode::Acc => 0,
            AddrMode::Imm
            | AddrMode::Zpg
            | AddrMode::ZpgX
            | AddrMode::ZpgY
            | AddrMode::IzX
            | AddrMode::IzY
            | AddrMode::Rel => 1,
            AddrMode::Abs | AddrMode::AbsX | AddrMode::AbsY | AddrMode::Ind => 2,
        }
    }
}

/// Outcome of resolving one operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// Effective address; `None` for `Imp`/`Acc`.
    pub addr: Option<u16>,
    /// True when the documented page-cross penalty applies.
    pub crossed: bool,
}

#[inline]
fn same_page(a: u16, b: u16) -> bool {
    (a & 0xFF00) == (b & 0xFF00)
}

/// Read a little-endian word from page zero, wrapping the pointer at $FF.
#[inline]
fn read_word_zp(bus: &Bus, zp: u8) -> u16 {
    let lo = bus.peek8_raw(zp as u16) as u16;
    let hi = bus.peek8_raw(zp.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

/// Read the JMP indirect pointer, reproducing the NMOS wrap quirk: the
/// high byte comes from the same page as the low byte.
#[inline]
fn read_word_indirect_bug(bus: &Bus, ptr: u16) -> u16 {
    let lo = bus.peek8_raw(ptr) as u16;
    let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
    let hi = bus.peek8_raw(hi_addr) as u16;
    (hi << 8) | lo
}

/// Resolve one operand: consume its bytes at PC, compute the effective
/// address, report page crossing, and record the decode trace.
pub fn resolve(st: &mut CpuState, bus: &Bus, mode: AddrMode) -> Resolved {
    let resolved = match mode {
        AddrMode::Imp | AddrMode::Acc => Resolved { addr: None, crossed: false },
        AddrMode::Imm => {
            let addr = st.pc;
            st.advance_pc_one();
            Resolved { addr: Some(addr), crossed: false }
        }
        AddrMode::Zpg => {
            let addr = st.fetch_u8(bus) as u16;
            Resolved { addr: Some(addr), crossed: false }
        }
        AddrMode::ZpgX => {
            let addr = st.fetch_u8(bus).wrapping_add(st.x) as u16;
            Resolved { addr: Some(addr), crossed: false }
        }
        AddrMode::ZpgY => {
            let addr = st.fetch_u8(bus).wrapping_add(st.y) as u16;
            Resolved { addr: Some(addr), crossed: false }
        }
        AddrMode::Abs => {
            let addr = st.fetch_u16(bus);
            Resolved { addr: Some(addr), crossed: false }
        }
        AddrMode::AbsX => {
            let base = st.fetch_u16(bus);
            let addr = base.wrapping_add(st.x as u16);
            Resolved { addr: Some(addr), crossed: !same_page(base, addr) }
        }
        AddrMode::AbsY => {
            let base = st.fetch_u16(bus);
            let addr = base.wrapping_add(st.y as u16);
            Resolved { addr: Some(addr), crossed: !same_page(base, addr) }
        }
        AddrMode::Ind => {
            let ptr = st.fetch_u16(bus);
            Resolved { addr: Some(read_word_indirect_bug(bus, ptr)), crossed: false }
        }
        AddrMode::IzX => {
            let zp = st.fetch_u8(bus).wrapping_add(st.x);
            Resolved { addr: Some(read_word_zp(bus, zp)), crossed: false }
        }
        AddrMode::IzY => {
            let zp = st.fetch_u8(bus);
            let base = read_word_zp(bus, zp);
            let addr = base.wrapping_add(st.y as u16);
            Resolved { addr: Some(addr), crossed: !same_page(base, addr) }
        }
        AddrMode::Rel => {
            let operand_at = st.pc;
            let offset = st.fetch_u8(bus) as i8;
            let target = st.pc.wrapping_add(offset as i16 as u16);
            Resolved { addr: Some(target), crossed: !same_page(operand_at, target) }
        }
    };
    st.last_arg = resolved.addr.unwrap_or(0);
    st.page_crossed = resolved.crossed;
    resolved
}

/// Resolve and read the data operand for a value-consuming instruction.
/// Returns the value and whether the page-cross penalty applies.
/// `Imm` reads from the instruction stream (raw); everything else
/// dispatches through the bus at the resolved address.
#[inline]
pub fn read_operand(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> (u8, bool) {
    match mode {
        AddrMode::Acc => (st.a, false),
        AddrMode::Imm => {
            let r = resolve(st, bus, mode);
            (bus.peek8_raw(r.addr.unwrap_or(0)), false)
        }
        _ => {
            let r = resolve(st, bus, mode);
            match r.addr {
                Some(addr) => (bus.peek8(addr), r.crossed),
                None => (0, false),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(pc: u16) -> CpuState {
        let mut st = CpuState::new();
        st.pc = pc;
        st
    }

    #[test]
    fn operand_lengths() {
        assert_eq!(AddrMode::Imp.operand_len(), 0);
        assert_eq!(AddrMode::Acc.operand_len(), 0);
        assert_eq!(AddrMode::Imm.operand_len(), 1);
        assert_eq!(AddrMode::Rel.operand_len(), 1);
        assert_eq!(AddrMode::Abs.operand_len(), 2);
        assert_eq!(AddrMode::Ind.operand_len(), 2);
    }

    #[test]
    fn zero_page_indexed_wraps_in_page_zero() {
        let mut bus = Bus::new();
        bus.poke8_raw(0x0300, 0xFF);
        let mut st = state_at(0x0300);
        st.x = 0x01;
        let r = resolve(&mut st, &bus, AddrMode::ZpgX);
        assert_eq!(r.addr, Some(0x0000));
        assert!(!r.crossed);
    }

    #[test]
    fn absolute_indexed_reports_page_cross() {
        let mut bus = Bus::new();
        bus.load(0x0300, &[0xFF, 0x12]);
        let mut st = state_at(0x0300);
        st.x = 0x01;
        let r = resolve(&mut st, &bus, AddrMode::AbsX);
        assert_eq!(r.addr, Some(0x1300));
        assert!(r.crossed);
        assert!(st.page_crossed);

        bus.load(0x0300, &[0x00, 0x12]);
        let mut st = state_at(0x0300);
        st.x = 0x10;
        let r = resolve(&mut st, &bus, AddrMode::AbsX);
        assert_eq!(r.addr, Some(0x1210));
        assert!(!r.crossed);
    }

    #[test]
    fn indirect_pointer_wraps_within_page() {
        let mut bus = Bus::new();
        bus.load(0x0300, &[0xFF, 0x21]);
        bus.poke8_raw(0x21FF, 0x34);
        bus.poke8_raw(0x2100, 0x12); // quirk: high byte from $2100, not $2200
        bus.poke8_raw(0x2200, 0x99);
        let mut st = state_at(0x0300);
        let r = resolve(&mut st, &bus, AddrMode::Ind);
        assert_eq!(r.addr, Some(0x1234));
    }

    #[test]
    fn indexed_indirect_wraps_pointer_sum() {
        let mut bus = Bus::new();
        bus.poke8_raw(0x0300, 0xFE);
        bus.poke8_raw(0x00FF, 0x78); // ($FE + 1) = $FF
        bus.poke8_raw(0x0000, 0x56); // high byte wraps to $00
        let mut st = state_at(0x0300);
        st.x = 0x01;
        let r = resolve(&mut st, &bus, AddrMode::IzX);
        assert_eq!(r.addr, Some(0x5678));
        assert!(!r.crossed);
    }

    #[test]
    fn indirect_indexed_reports_page_cross() {
        let mut bus = Bus::new();
        bus.poke8_raw(0x0300, 0x40);
        bus.poke8_raw(0x0040, 0xFF);
        bus.poke8_raw(0x0041, 0x20);
        let mut st = state_at(0x0300);
        st.y = 0x01;
        let r = resolve(&mut st, &bus, AddrMode::IzY);
        assert_eq!(r.addr, Some(0x2100));
        assert!(r.crossed);
    }

    #[test]
    fn relative_negative_offset() {
        let mut bus = Bus::new();
        bus.poke8_raw(0x0300, 0xFB); // -5
        let mut st = state_at(0x0300);
        let r = resolve(&mut st, &bus, AddrMode::Rel);
        assert_eq!(r.addr, Some(0x02FC));
        assert!(r.crossed);
    }

    #[test]
    fn relative_cross_judged_from_operand_byte() {
        // Branch operand at $12FF targeting $1305: leaves page $12xx.
        let mut bus = Bus::new();
        bus.poke8_raw(0x12FF, 0x05);
        let mut st = state_at(0x12FF);
        let r = resolve(&mut st, &bus, AddrMode::Rel);
        assert_eq!(r.addr, Some(0x1305));
        assert!(r.crossed);

        // Same-page branch: no penalty.
        bus.poke8_raw(0x1210, 0x10);
        let mut st = state_at(0x1210);
        let r = resolve(&mut st, &bus, AddrMode::Rel);
        assert_eq!(r.addr, Some(0x1221));
        assert!(!r.crossed);
    }

    #[test]
    fn resolution_is_repeatable_from_identical_state() {
        let mut bus = Bus::new();
        bus.poke8_raw(0x0300, 0x40);
        bus.poke8_raw(0x0040, 0x00);
        bus.poke8_raw(0x0041, 0x44);
        let mut st = state_at(0x0300);
        st.y = 0x20;
        let snapshot = st;
        let first = resolve(&mut st, &bus, AddrMode::IzY);
        let mut st2 = snapshot;
        let second = resolve(&mut st2, &bus, AddrMode::IzY);
        assert_eq!(first, second);
        assert_eq!(st.pc, st2.pc);
    }

    #[test]
    fn immediate_reads_instruction_stream() {
        let mut bus = Bus::new();
        bus.poke8_raw(0x0300, 0x7F);
        let mut st = state_at(0x0300);
        let (value, crossed) = read_operand(&mut st, &mut bus, AddrMode::Imm);
        assert_eq!(value, 0x7F);
        assert!(!crossed);
        assert_eq!(st.pc, 0x0301);
    }
}
