/*!
arithmetic.rs - Add / subtract opcode family (ADC/SBC).

Both honor the DECIMAL flag; the mode split lives in `execute::adc` /
`execute::sbc`. Handlers only fetch the operand and report the page-cross
penalty.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{self, AddrMode};
use crate::cpu::execute;
use crate::cpu::state::CpuState;

pub(crate) fn op_adc(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    let (v, crossed) = addressing::read_operand(st, bus, mode);
    execute::adc(st, v);
    crossed as u32
}

pub(crate) fn op_sbc(st: &mut CpuState, bus: &mut Bus, mode: AddrMode) -> u32 {
    let (v, crossed) = addressing::read_operand(st, bus, mode);
    execute::sbc(st, v);
    crossed as u32
}
