/*!
execute.rs - 6502 instruction semantic helpers (flags, ALU, stack, RMW).

Purpose
=======
Centralize the side-effect logic of instructions so every dispatch-family
handler shares one implementation. Helpers are generic over `RegFile`, so
the same semantics run against the canonical `CpuState` or any alternate
register backend.

Scope (crate-visible)
---------------------
Flag & status helpers:
    set_flag, get_flag, update_zn

Stack helpers:
    push, pop, push_word, pop_word, push_status_with_break
    php, plp, pha, pla

Loads / transfers / logic:
    lda/ldx/ldy, tax/tay/txa/tya/tsx/txs
    and/ora/eor/bit
    inx/iny/dex/dey

Arithmetic:
    adc/sbc — both honor the DECIMAL flag; decimal mode implements the
    classic nibble-wise BCD correction. ADC derives Z from the binary sum
    and N/V from the intermediate result before the high-nibble fixup;
    SBC derives all four flags from the binary difference.

Shifts / rotates:
    Accumulator and memory variants; memory variants ride `rmw_memory`.

RMW choreography:
    rmw_memory — read, dummy write-back of the old value, write of the new
    value. All three accesses dispatch, so a mapped device observes the
    authentic sequence.

Design Notes
============
- Helpers rely only on the `RegFile` API plus an explicit `&mut Bus` where
  memory is involved; no helper fetches instruction bytes.
- `?Sized` bounds keep the helpers callable through trait objects.
*/

use crate::bus::Bus;
use crate::cpu::regs::RegFile;
use crate::cpu::state::{BREAK, CARRY, DECIMAL, NEGATIVE, QUANTUM, STACK_BASE, ZERO};

// ---------------------------------------------------------------------------
// Flag helpers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn set_flag<C: RegFile + ?Sized>(cpu: &mut C, mask: u8, on: bool) {
    cpu.assign_flag(mask, on);
}

#[inline]
pub(crate) fn get_flag<C: RegFile + ?Sized>(cpu: &C, mask: u8) -> bool {
    cpu.is_flag_set(mask)
}

#[inline]
pub(crate) fn update_zn<C: RegFile + ?Sized>(cpu: &mut C, v: u8) {
    cpu.update_zn(v);
}

// ---------------------------------------------------------------------------
// Stack helpers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn push<C: RegFile + ?Sized>(cpu: &mut C, bus: &mut Bus, v: u8) {
    let sp = cpu.sp();
    bus.poke8(STACK_BASE | sp as u16, v);
    cpu.set_sp(sp.wrapping_sub(1));
}

#[inline]
pub(crate) fn pop<C: RegFile + ?Sized>(cpu: &mut C, bus: &mut Bus) -> u8 {
    let sp = cpu.sp().wrapping_add(1);
    cpu.set_sp(sp);
    bus.peek8(STACK_BASE | sp as u16)
}

#[inline]
pub(crate) fn push_word<C: RegFile + ?Sized>(cpu: &mut C, bus: &mut Bus, v: u16) {
    push(cpu, bus, (v >> 8) as u8);
    push(cpu, bus, (v & 0xFF) as u8);
}

#[inline]
pub(crate) fn pop_word<C: RegFile + ?Sized>(cpu: &mut C, bus: &mut Bus) -> u16 {
    let lo = pop(cpu, bus) as u16;
    let hi = pop(cpu, bus) as u16;
    (hi << 8) | lo
}

/// Push P with control over Break flag semantics (BRK/PHP vs hardware IRQ).
pub(crate) fn push_status_with_break<C: RegFile + ?Sized>(
    cpu: &mut C,
    bus: &mut Bus,
    set_break: bool,
) {
    let v = cpu.compose_status_for_push(set_break);
    push(cpu, bus, v);
}

#[inline]
pub(crate) fn php<C: RegFile + ?Sized>(cpu: &mut C, bus: &mut Bus) {
    push_status_with_break(cpu, bus, true);
}

#[inline]
pub(crate) fn plp<C: RegFile + ?Sized>(cpu: &mut C, bus: &mut Bus) {
    let v = pop(cpu, bus);
    cpu.set_status((v | QUANTUM) & !BREAK);
}

#[inline]
pub(crate) fn pha<C: RegFile + ?Sized>(cpu: &mut C, bus: &mut Bus) {
    let a = cpu.a();
    push(cpu, bus, a);
}

#[inline]
pub(crate) fn pla<C: RegFile + ?Sized>(cpu: &mut C, bus: &mut Bus) {
    let val = pop(cpu, bus);
    cpu.set_a(val);
    update_zn(cpu, val);
}

// ---------------------------------------------------------------------------
// Loads / Transfers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn lda<C: RegFile + ?Sized>(cpu: &mut C, v: u8) {
    cpu.set_a(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn ldx<C: RegFile + ?Sized>(cpu: &mut C, v: u8) {
    cpu.set_x(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn ldy<C: RegFile + ?Sized>(cpu: &mut C, v: u8) {
    cpu.set_y(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn tax<C: RegFile + ?Sized>(cpu: &mut C) {
    cpu.set_x(cpu.a());
    update_zn(cpu, cpu.x());
}

#[inline]
pub(crate) fn tay<C: RegFile + ?Sized>(cpu: &mut C) {
    cpu.set_y(cpu.a());
    update_zn(cpu, cpu.y());
}

#[inline]
pub(crate) fn txa<C: RegFile + ?Sized>(cpu: &mut C) {
    cpu.set_a(cpu.x());
    update_zn(cpu, cpu.a());
}

#[inline]
pub(crate) fn tya<C: RegFile + ?Sized>(cpu: &mut C) {
    cpu.set_a(cpu.y());
    update_zn(cpu, cpu.a());
}

#[inline]
pub(crate) fn tsx<C: RegFile + ?Sized>(cpu: &mut C) {
    cpu.set_x(cpu.sp());
    update_zn(cpu, cpu.x());
}

/// TXS updates no flags.
#[inline]
pub(crate) fn txs<C: RegFile + ?Sized>(cpu: &mut C) {
    cpu.set_sp(cpu.x());
}

// ---------------------------------------------------------------------------
// Logical / Bit
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn and<C: RegFile + ?Sized>(cpu: &mut C, v: u8) {
    cpu.set_a(cpu.a() & v);
    update_zn(cpu, cpu.a());
}

#[inline]
pub(crate) fn ora<C: RegFile + ?Sized>(cpu: &mut C, v: u8) {
    cpu.set_a(cpu.a() | v);
    update_zn(cpu, cpu.a());
}

#[inline]
pub(crate) fn eor<C: RegFile + ?Sized>(cpu: &mut C, v: u8) {
    cpu.set_a(cpu.a() ^ v);
    update_zn(cpu, cpu.a());
}

/// BIT: Z from A & M, N and V copied from bits 7 and 6 of the operand.
#[inline]
pub(crate) fn bit<C: RegFile + ?Sized>(cpu: &mut C, v: u8) {
    set_flag(cpu, ZERO, (cpu.a() & v) == 0);
    set_flag(cpu, NEGATIVE, (v & 0x80) != 0);
    cpu.update_overflow((v & 0x40) != 0);
}

// ---------------------------------------------------------------------------
// Increment / Decrement (register)
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn inx<C: RegFile + ?Sized>(cpu: &mut C) {
    cpu.set_x(cpu.x().wrapping_add(1));
    update_zn(cpu, cpu.x());
}

#[inline]
pub(crate) fn iny<C: RegFile + ?Sized>(cpu: &mut C) {
    cpu.set_y(cpu.y().wrapping_add(1));
    update_zn(cpu, cpu.y());
}

#[inline]
pub(crate) fn dex<C: RegFile + ?Sized>(cpu: &mut C) {
    cpu.set_x(cpu.x().wrapping_sub(1));
    update_zn(cpu, cpu.x());
}

#[inline]
pub(crate) fn dey<C: RegFile + ?Sized>(cpu: &mut C) {
    cpu.set_y(cpu.y().wrapping_sub(1));
    update_zn(cpu, cpu.y());
}

// ---------------------------------------------------------------------------
// Shifts / Rotates - Accumulator
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn asl_acc<C: RegFile + ?Sized>(cpu: &mut C) {
    let v = cpu.a();
    cpu.update_carry((v & 0x80) != 0);
    cpu.set_a(v << 1);
    update_zn(cpu, cpu.a());
}

#[inline]
pub(crate) fn lsr_acc<C: RegFile + ?Sized>(cpu: &mut C) {
    let v = cpu.a();
    cpu.update_carry((v & 0x01) != 0);
    cpu.set_a(v >> 1);
    update_zn(cpu, cpu.a());
}

#[inline]
pub(crate) fn rol_acc<C: RegFile + ?Sized>(cpu: &mut C) {
    let v = cpu.a();
    let carry_in = if get_flag(cpu, CARRY) { 1 } else { 0 };
    cpu.update_carry((v & 0x80) != 0);
    cpu.set_a((v << 1) | carry_in);
    update_zn(cpu, cpu.a());
}

#[inline]
pub(crate) fn ror_acc<C: RegFile + ?Sized>(cpu: &mut C) {
    let v = cpu.a();
    let carry_in = if get_flag(cpu, CARRY) { 0x80 } else { 0 };
    cpu.update_carry((v & 0x01) != 0);
    cpu.set_a((v >> 1) | carry_in);
    update_zn(cpu, cpu.a());
}

// ---------------------------------------------------------------------------
// ADC / SBC
// ---------------------------------------------------------------------------

/// Add with carry, honoring the DECIMAL flag.
pub(crate) fn adc<C: RegFile + ?Sized>(cpu: &mut C, v: u8) {
    if get_flag(cpu, DECIMAL) {
        adc_decimal(cpu, v);
    } else {
        adc_binary(cpu, v);
    }
}

#[inline]
pub(crate) fn adc_binary<C: RegFile + ?Sized>(cpu: &mut C, v: u8) {
    let a = cpu.a();
    let carry_in = if get_flag(cpu, CARRY) { 1u16 } else { 0 };
    let sum16 = a as u16 + v as u16 + carry_in;
    let result = sum16 as u8;

    cpu.update_carry(sum16 > 0xFF);
    // Overflow: ( !(A ^ M) & (A ^ R) & 0x80 ) != 0
    cpu.update_overflow(((!(a ^ v)) & (a ^ result) & 0x80) != 0);

    cpu.set_a(result);
    update_zn(cpu, result);
}

/// BCD addition: nibble-wise +6 correction. Z reflects the binary sum;
/// N and V reflect the intermediate result before the high-nibble fixup;
/// carry is the decimal carry (sum >= 100).
fn adc_decimal<C: RegFile + ?Sized>(cpu: &mut C, v: u8) {
    let a = cpu.a();
    let carry_in = if get_flag(cpu, CARRY) { 1u16 } else { 0 };

    let binary = a as u16 + v as u16 + carry_in;
    set_flag(cpu, ZERO, (binary as u8) == 0);

    let mut lo = (a & 0x0F) as u16 + (v & 0x0F) as u16 + carry_in;
    if lo > 0x09 {
        lo += 0x06;
    }
    let mut hi = (a >> 4) as u16 + (v >> 4) as u16 + u16::from(lo > 0x0F);

    let interim = ((hi << 4) as u8) | ((lo as u8) & 0x0F);
    set_flag(cpu, NEGATIVE, (interim & 0x80) != 0);
    cpu.update_overflow(((!(a ^ v)) & (a ^ interim) & 0x80) != 0);

    if hi > 0x09 {
        hi += 0x06;
    }
    cpu.update_carry(hi > 0x0F);

    let result = (((hi as u8) & 0x0F) << 4) | ((lo as u8) & 0x0F);
    cpu.set_a(result);
}

/// Subtract with borrow, honoring the DECIMAL flag.
pub(crate) fn sbc<C: RegFile + ?Sized>(cpu: &mut C, v: u8) {
    if get_flag(cpu, DECIMAL) {
        sbc_decimal(cpu, v);
    } else {
        adc_binary(cpu, v ^ 0xFF);
    }
}

/// BCD subtraction: nibble-wise -6 correction. All four flags come from
/// the binary difference; carry set means "no borrow".
fn sbc_decimal<C: RegFile + ?Sized>(cpu: &mut C, v: u8) {
    let a = cpu.a();
    let borrow_in = if get_flag(cpu, CARRY) { 0i16 } else { 1 };

    let binary = a as i16 - v as i16 - borrow_in;
    let binary_result = binary as u8;
    cpu.update_carry(binary >= 0);
    cpu.update_overflow(((a ^ v) & (a ^ binary_result) & 0x80) != 0);
    update_zn(cpu, binary_result);

    let mut lo = (a & 0x0F) as i16 - (v & 0x0F) as i16 - borrow_in;
    let mut lo_borrow = 0i16;
    if lo < 0 {
        lo -= 0x06;
        lo_borrow = 1;
    }
    let mut hi = (a >> 4) as i16 - (v >> 4) as i16 - lo_borrow;
    if hi < 0 {
        hi -= 0x06;
    }

    let result = ((((hi as u8) & 0x0F) << 4) | ((lo as u8) & 0x0F)) as u8;
    cpu.set_a(result);
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

/// CMP/CPX/CPY: carry = reg >= operand, Z/N from the difference.
/// Overflow is untouched.
#[inline]
pub(crate) fn compare<C: RegFile + ?Sized>(cpu: &mut C, reg: u8, v: u8) {
    cpu.update_carry(reg >= v);
    update_zn(cpu, reg.wrapping_sub(v));
}

// ---------------------------------------------------------------------------
// Read-Modify-Write (memory) choreography
// ---------------------------------------------------------------------------

/// Canonical 6502 RMW sequence: read -> dummy write of the old value ->
/// write of the new value. All accesses dispatch, so a mapped device sees
/// the authentic traffic. Returns the final value.
pub(crate) fn rmw_memory<C: RegFile + ?Sized, F>(
    cpu: &mut C,
    bus: &mut Bus,
    addr: u16,
    transform: F,
) -> u8
where
    F: FnOnce(&mut C, u8) -> u8,
{
    let old = bus.peek8(addr);
    bus.poke8(addr, old);
    let newv = transform(cpu, old);
    bus.poke8(addr, newv);
    newv
}

// ---------------------------------------------------------------------------
// Shifts / Rotates - Memory
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn asl_mem<C: RegFile + ?Sized>(cpu: &mut C, bus: &mut Bus, addr: u16) {
    let r = rmw_memory(cpu, bus, addr, |c, old| {
        c.update_carry((old & 0x80) != 0);
        old << 1
    });
    update_zn(cpu, r);
}

#[inline]
pub(crate) fn lsr_mem<C: RegFile + ?Sized>(cpu: &mut C, bus: &mut Bus, addr: u16) {
    let r = rmw_memory(cpu, bus, addr, |c, old| {
        c.update_carry((old & 0x01) != 0);
        old >> 1
    });
    update_zn(cpu, r);
}

#[inline]
pub(crate) fn rol_mem<C: RegFile + ?Sized>(cpu: &mut C, bus: &mut Bus, addr: u16) {
    let r = rmw_memory(cpu, bus, addr, |c, old| {
        let carry_in = if get_flag(c, CARRY) { 1 } else { 0 };
        c.update_carry((old & 0x80) != 0);
        (old << 1) | carry_in
    });
    update_zn(cpu, r);
}

#[inline]
pub(crate) fn ror_mem<C: RegFile + ?Sized>(cpu: &mut C, bus: &mut Bus, addr: u16) {
    let r = rmw_memory(cpu, bus, addr, |c, old| {
        let carry_in = if get_flag(c, CARRY) { 0x80 } else { 0 };
        c.update_carry((old & 0x01) != 0);
        (old >> 1) | carry_in
    });
    update_zn(cpu, r);
}

// ---------------------------------------------------------------------------
// INC / DEC memory
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn inc_mem<C: RegFile + ?Sized>(cpu: &mut C, bus: &mut Bus, addr: u16) {
    let r = rmw_memory(cpu, bus, addr, |_, old| old.wrapping_add(1));
    update_zn(cpu, r);
}

#[inline]
pub(crate) fn dec_mem<C: RegFile + ?Sized>(cpu: &mut C, bus: &mut Bus, addr: u16) {
    let r = rmw_memory(cpu, bus, addr, |_, old| old.wrapping_sub(1));
    update_zn(cpu, r);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
