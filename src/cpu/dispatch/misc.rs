/*!
misc.rs - Implied-mode odds and ends: NOP, flag set/clear, register
transfers, register increment/decrement, and the stack push/pull quartet.

Everything here is fixed-cost; no handler reports extra cycles.
*/

use crate::bus::Bus;
use crate::cpu::addressing::AddrMode;
use crate::cpu::execute;
use crate::cpu::state::{CARRY, CpuState, DECIMAL, IRQ_DISABLE, OVERFLOW};

pub(crate) fn op_nop(_st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    0
}

// ---------------------------------------------------------------------------
// Flag set / clear
// ---------------------------------------------------------------------------

pub(crate) fn op_clc(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    st.clear_flag_bit(CARRY);
    0
}

pub(crate) fn op_sec(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    st.set_flag_bit(CARRY);
    0
}

pub(crate) fn op_cli(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    st.clear_flag_bit(IRQ_DISABLE);
    0
}

pub(crate) fn op_sei(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    st.set_flag_bit(IRQ_DISABLE);
    0
}

pub(crate) fn op_clv(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    st.clear_flag_bit(OVERFLOW);
    0
}

pub(crate) fn op_cld(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    st.clear_flag_bit(DECIMAL);
    0
}

pub(crate) fn op_sed(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    st.set_flag_bit(DECIMAL);
    0
}

// ---------------------------------------------------------------------------
// Register transfers
// ---------------------------------------------------------------------------

pub(crate) fn op_tax(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    execute::tax(st);
    0
}

pub(crate) fn op_tay(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    execute::tay(st);
    0
}

pub(crate) fn op_txa(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    execute::txa(st);
    0
}

pub(crate) fn op_tya(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    execute::tya(st);
    0
}

pub(crate) fn op_tsx(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    execute::tsx(st);
    0
}

pub(crate) fn op_txs(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    execute::txs(st);
    0
}

// ---------------------------------------------------------------------------
// Register increment / decrement
// ---------------------------------------------------------------------------

pub(crate) fn op_inx(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    execute::inx(st);
    0
}

pub(crate) fn op_iny(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    execute::iny(st);
    0
}

pub(crate) fn op_dex(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    execute::dex(st);
    0
}

pub(crate) fn op_dey(st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    execute::dey(st);
    0
}

// ---------------------------------------------------------------------------
// Stack quartet
// ---------------------------------------------------------------------------

pub(crate) fn op_pha(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    execute::pha(st, bus);
    0
}

pub(crate) fn op_pla(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    execute::pla(st, bus);
    0
}

pub(crate) fn op_php(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    execute::php(st, bus);
    0
}

pub(crate) fn op_plp(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    execute::plp(st, bus);
    0
}
