/*!
branches.rs - Conditional branch family (BPL/BMI/BVC/BVS/BCC/BCS/BNE/BEQ).

A branch always resolves its relative target (consuming the offset byte);
only a taken branch moves PC. Extra cycles: +1 taken, +1 more when the
target leaves the branch instruction's page (the resolver judges this).
*/

use crate::bus::Bus;
use crate::cpu::addressing::{self, AddrMode};
use crate::cpu::state::{CARRY, CpuState, NEGATIVE, OVERFLOW, ZERO};

#[inline]
fn branch_on(st: &mut CpuState, bus: &mut Bus, mask: u8, taken_when_set: bool) -> u32 {
    let r = addressing::resolve(st, bus, AddrMode::Rel);
    if st.is_flag_set(mask) != taken_when_set {
        return 0;
    }
    if let Some(target) = r.addr {
        st.set_pc(target);
    }
    1 + r.crossed as u32
}

pub(crate) fn op_bpl(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    branch_on(st, bus, NEGATIVE, false)
}

pub(crate) fn op_bmi(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    branch_on(st, bus, NEGATIVE, true)
}

pub(crate) fn op_bvc(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    branch_on(st, bus, OVERFLOW, false)
}

pub(crate) fn op_bvs(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    branch_on(st, bus, OVERFLOW, true)
}

pub(crate) fn op_bcc(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    branch_on(st, bus, CARRY, false)
}

pub(crate) fn op_bcs(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    branch_on(st, bus, CARRY, true)
}

pub(crate) fn op_bne(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    branch_on(st, bus, ZERO, false)
}

pub(crate) fn op_beq(st: &mut CpuState, bus: &mut Bus, _mode: AddrMode) -> u32 {
    branch_on(st, bus, ZERO, true)
}
