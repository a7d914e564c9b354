/*!
compare.rs - Compare opcode family (CMP/CPX/CPY).

Subtract-without-store semantics: Carry = register >= operand, Z/N from the
difference, Overflow untouched. Only CMP has indexed modes that can charge
the page-cross penalty.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{self, AddrMode};
use crate::cpu::execute;
use crate::cpu::state::CpuState;

pub(crate) fn op_cmp(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    let (v, crossed) = addressing::read_operand(st, bus, mode);
    let a = st.a;
    execute::compare(st, a, v);
    crossed as u32
}

pub(crate) fn op_cpx(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    let (v, _) = addressing::read_operand(st, bus, mode);
    let x = st.x;
    execute::compare(st, x, v);
    0
}

pub(crate) fn op_cpy(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    let (v, _) = addressing::read_operand(st, bus, mode);
    let y = st.y;
    execute::compare(st, y, v);
    0
}
