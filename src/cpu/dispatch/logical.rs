/*!
logical.rs - Bitwise opcode family (AND/ORA/EOR/BIT).

AND/ORA/EOR report the page-cross penalty through `read_operand`; BIT only
exists in zero-page and absolute forms, so it never charges one.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{self, AddrMode};
use crate::cpu::execute;
use crate::cpu::state::CpuState;

pub(crate) fn op_and(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    let (v, crossed) = addressing::read_operand(st, bus, mode);
    execute::and(st, v);
    crossed as u32
}

pub(crate) fn op_ora(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    let (v, crossed) = addressing::read_operand(st, bus, mode);
    execute::ora(st, v);
    crossed as u32
}

pub(crate) fn op_eor(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    let (v, crossed) = addressing::read_operand(st, bus, mode);
    execute::eor(st, v);
    crossed as u32
}

pub(crate) fn op_bit(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    let (v, _) = addressing::read_operand(st, bus, mode);
    execute::bit(st, v);
    0
}
