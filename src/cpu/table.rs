/*!
table.rs - The 256-entry opcode table: one record per byte value carrying
mnemonic, addressing mode, base cycle cost, and handler.

Overview
========
`OPCODES` is the single source of truth shared by the dispatcher (mode,
cycles, handler) and the disassembler (mnemonic, mode, operand length).
All 151 documented opcodes are populated; every other byte value holds the
trap entry (`"???"`, zero base cycles), which the dispatcher routes into
the BRK machinery without calling a handler.

Base cycle figures are the documented NMOS 6502 costs. Handlers return
only the data-dependent extras (page-cross and branch penalties); indexed
read-modify-write and store forms carry their worst case in the base cost.
*/

use crate::bus::Bus;
use crate::cpu::addressing::AddrMode;
use crate::cpu::dispatch::{
    arithmetic, branches, compare, control_flow, load_store, logical, misc, rmw,
};
use crate::cpu::state::CpuState;

/// Opcode handler: executes the instruction body after the opcode fetch,
/// returning extra cycles beyond the table's base cost.
pub(crate) type Handler = fn(&mut CpuState, &mut Bus, AddrMode) -> u32;

/// One decoded table entry.
#[derive(Clone, Copy)]
pub struct Opcode {
    pub mnemonic: &'static str,
    pub mode: AddrMode,
    pub cycles: u8,
    pub(crate) exec: Handler,
}

impl Opcode {
    /// Trap entries mark undocumented byte values.
    #[inline]
    pub fn is_trap(&self) -> bool {
        self.cycles == 0
    }
}

const fn op(mnemonic: &'static str, mode: AddrMode, cycles: u8, exec: Handler) -> Opcode {
    Opcode { mnemonic, mode, cycles, exec }
}

fn trap_exec(_st: &mut CpuState, _bus: &mut Bus, _mode: AddrMode) -> u32 {
    0 // never invoked: the dispatcher intercepts trap entries
}

const TRAP: Opcode = op("???", AddrMode::Imp, 0, trap_exec);

pub static OPCODES: [Opcode; 256] = {
    use AddrMode::*;
    let mut t = [TRAP; 256];

    // Control flow / system
    t[0x00] = op("BRK", Imp, 7, control_flow::op_brk);
    t[0x20] = op("JSR", Abs, 6, control_flow::op_jsr);
    t[0x40] = op("RTI", Imp, 6, control_flow::op_rti);
    t[0x60] = op("RTS", Imp, 6, control_flow::op_rts);
    t[0x4C] = op("JMP", Abs, 3, control_flow::op_jmp);
    t[0x6C] = op("JMP", Ind, 5, control_flow::op_jmp);

    // Branches
    t[0x10] = op("BPL", Rel, 2, branches::op_bpl);
    t[0x30] = op("BMI", Rel, 2, branches::op_bmi);
    t[0x50] = op("BVC", Rel, 2, branches::op_bvc);
    t[0x70] = op("BVS", Rel, 2, branches::op_bvs);
    t[0x90] = op("BCC", Rel, 2, branches::op_bcc);
    t[0xB0] = op("BCS", Rel, 2, branches::op_bcs);
    t[0xD0] = op("BNE", Rel, 2, branches::op_bne);
    t[0xF0] = op("BEQ", Rel, 2, branches::op_beq);

    // Loads
    t[0xA9] = op("LDA", Imm, 2, load_store::op_lda);
    t[0xA5] = op("LDA", Zpg, 3, load_store::op_lda);
    t[0xB5] = op("LDA", ZpgX, 4, load_store::op_lda);
    t[0xAD] = op("LDA", Abs, 4, load_store::op_lda);
    t[0xBD] = op("LDA", AbsX, 4, load_store::op_lda);
    t[0xB9] = op("LDA", AbsY, 4, load_store::op_lda);
    t[0xA1] = op("LDA", IzX, 6, load_store::op_lda);
    t[0xB1] = op("LDA", IzY, 5, load_store::op_lda);
    t[0xA2] = op("LDX", Imm, 2, load_store::op_ldx);
    t[0xA6] = op("LDX", Zpg, 3, load_store::op_ldx);
    t[0xB6] = op("LDX", ZpgY, 4, load_store::op_ldx);
    t[0xAE] = op("LDX", Abs, 4, load_store::op_ldx);
    t[0xBE] = op("LDX", AbsY, 4, load_store::op_ldx);
    t[0xA0] = op("LDY", Imm, 2, load_store::op_ldy);
    t[0xA4] = op("LDY", Zpg, 3, load_store::op_ldy);
    t[0xB4] = op("LDY", ZpgX, 4, load_store::op_ldy);
    t[0xAC] = op("LDY", Abs, 4, load_store::op_ldy);
    t[0xBC] = op("LDY", AbsX, 4, load_store::op_ldy);

    // Stores
    t[0x85] = op("STA", Zpg, 3, load_store::op_sta);
    t[0x95] = op("STA", ZpgX, 4, load_store::op_sta);
    t[0x8D] = op("STA", Abs, 4, load_store::op_sta);
    t[0x9D] = op("STA", AbsX, 5, load_store::op_sta);
    t[0x99] = op("STA", AbsY, 5, load_store::op_sta);
    t[0x81] = op("STA", IzX, 6, load_store::op_sta);
    t[0x91] = op("STA", IzY, 6, load_store::op_sta);
    t[0x86] = op("STX", Zpg, 3, load_store::op_stx);
    t[0x96] = op("STX", ZpgY, 4, load_store::op_stx);
    t[0x8E] = op("STX", Abs, 4, load_store::op_stx);
    t[0x84] = op("STY", Zpg, 3, load_store::op_sty);
    t[0x94] = op("STY", ZpgX, 4, load_store::op_sty);
    t[0x8C] = op("STY", Abs, 4, load_store::op_sty);

    // Logic
    t[0x29] = op("AND", Imm, 2, logical::op_and);
    t[0x25] = op("AND", Zpg, 3, logical::op_and);
    t[0x35] = op("AND", ZpgX, 4, logical::op_and);
    t[0x2D] = op("AND", Abs, 4, logical::op_and);
    t[0x3D] = op("AND", AbsX, 4, logical::op_and);
    t[0x39] = op("AND", AbsY, 4, logical::op_and);
    t[0x21] = op("AND", IzX, 6, logical::op_and);
    t[0x31] = op("AND", IzY, 5, logical::op_and);
    t[0x09] = op("ORA", Imm, 2, logical::op_ora);
    t[0x05] = op("ORA", Zpg, 3, logical::op_ora);
    t[0x15] = op("ORA", ZpgX, 4, logical::op_ora);
    t[0x0D] = op("ORA", Abs, 4, logical::op_ora);
    t[0x1D] = op("ORA", AbsX, 4, logical::op_ora);
    t[0x19] = op("ORA", AbsY, 4, logical::op_ora);
    t[0x01] = op("ORA", IzX, 6, logical::op_ora);
    t[0x11] = op("ORA", IzY, 5, logical::op_ora);
    t[0x49] = op("EOR", Imm, 2, logical::op_eor);
    t[0x45] = op("EOR", Zpg, 3, logical::op_eor);
    t[0x55] = op("EOR", ZpgX, 4, logical::op_eor);
    t[0x4D] = op("EOR", Abs, 4, logical::op_eor);
    t[0x5D] = op("EOR", AbsX, 4, logical::op_eor);
    t[0x59] = op("EOR", AbsY, 4, logical::op_eor);
    t[0x41] = op("EOR", IzX, 6, logical::op_eor);
    t[0x51] = op("EOR", IzY, 5, logical::op_eor);
    t[0x24] = op("BIT", Zpg, 3, logical::op_bit);
    t[0x2C] = op("BIT", Abs, 4, logical::op_bit);

    // Arithmetic
    t[0x69] = op("ADC", Imm, 2, arithmetic::op_adc);
    t[0x65] = op("ADC", Zpg, 3, arithmetic::op_adc);
    t[0x75] = op("ADC", ZpgX, 4, arithmetic::op_adc);
    t[0x6D] = op("ADC", Abs, 4, arithmetic::op_adc);
    t[0x7D] = op("ADC", AbsX, 4, arithmetic::op_adc);
    t[0x79] = op("ADC", AbsY, 4, arithmetic::op_adc);
    t[0x61] = op("ADC", IzX, 6, arithmetic::op_adc);
    t[0x71] = op("ADC", IzY, 5, arithmetic::op_adc);
    t[0xE9] = op("SBC", Imm, 2, arithmetic::op_sbc);
    t[0xE5] = op("SBC", Zpg, 3, arithmetic::op_sbc);
    t[0xF5] = op("SBC", ZpgX, 4, arithmetic::op_sbc);
    t[0xED] = op("SBC", Abs, 4, arithmetic::op_sbc);
    t[0xFD] = op("SBC", AbsX, 4, arithmetic::op_sbc);
    t[0xF9] = op("SBC", AbsY, 4, arithmetic::op_sbc);
    t[0xE1] = op("SBC", IzX, 6, arithmetic::op_sbc);
    t[0xF1] = op("SBC", IzY, 5, arithmetic::op_sbc);

    // Compares
    t[0xC9] = op("CMP", Imm, 2, compare::op_cmp);
    t[0xC5] = op("CMP", Zpg, 3, compare::op_cmp);
    t[0xD5] = op("CMP", ZpgX, 4, compare::op_cmp);
    t[0xCD] = op("CMP", Abs, 4, compare::op_cmp);
    t[0xDD] = op("CMP", AbsX, 4, compare::op_cmp);
    t[0xD9] = op("CMP", AbsY, 4, compare::op_cmp);
    t[0xC1] = op("CMP", IzX, 6, compare::op_cmp);
    t[0xD1] = op("CMP", IzY, 5, compare::op_cmp);
    t[0xE0] = op("CPX", Imm, 2, compare::op_cpx);
    t[0xE4] = op("CPX", Zpg, 3, compare::op_cpx);
    t[0xEC] = op("CPX", Abs, 4, compare::op_cpx);
    t[0xC0] = op("CPY", Imm, 2, compare::op_cpy);
    t[0xC4] = op("CPY", Zpg, 3, compare::op_cpy);
    t[0xCC] = op("CPY", Abs, 4, compare::op_cpy);

    // Shifts / rotates
    t[0x0A] = op("ASL", Acc, 2, rmw::op_asl);
    t[0x06] = op("ASL", Zpg, 5, rmw::op_asl);
    t[0x16] = op("ASL", ZpgX, 6, rmw::op_asl);
    t[0x0E] = op("ASL", Abs, 6, rmw::op_asl);
    t[0x1E] = op("ASL", AbsX, 7, rmw::op_asl);
    t[0x4A] = op("LSR", Acc, 2, rmw::op_lsr);
    t[0x46] = op("LSR", Zpg, 5, rmw::op_lsr);
    t[0x56] = op("LSR", ZpgX, 6, rmw::op_lsr);
    t[0x4E] = op("LSR", Abs, 6, rmw::op_lsr);
    t[0x5E] = op("LSR", AbsX, 7, rmw::op_lsr);
    t[0x2A] = op("ROL", Acc, 2, rmw::op_rol);
    t[0x26] = op("ROL", Zpg, 5, rmw::op_rol);
    t[0x36] = op("ROL", ZpgX, 6, rmw::op_rol);
    t[0x2E] = op("ROL", Abs, 6, rmw::op_rol);
    t[0x3E] = op("ROL", AbsX, 7, rmw::op_rol);
    t[0x6A] = op("ROR", Acc, 2, rmw::op_ror);
    t[0x66] = op("ROR", Zpg, 5, rmw::op_ror);
    t[0x76] = op("ROR", ZpgX, 6, rmw::op_ror);
    t[0x6E] = op("ROR", Abs, 6, rmw::op_ror);
    t[0x7E] = op("ROR", AbsX, 7, rmw::op_ror);

    // Memory increment / decrement
    t[0xE6] = op("INC", Zpg, 5, rmw::op_inc);
    t[0xF6] = op("INC", ZpgX, 6, rmw::op_inc);
    t[0xEE] = op("INC", Abs, 6, rmw::op_inc);
    t[0xFE] = op("INC", AbsX, 7, rmw::op_inc);
    t[0xC6] = op("DEC", Zpg, 5, rmw::op_dec);
    t[0xD6] = op("DEC", ZpgX, 6, rmw::op_dec);
    t[0xCE] = op("DEC", Abs, 6, rmw::op_dec);
    t[0xDE] = op("DEC", AbsX, 7, rmw::op_dec);

    // Register increment / decrement
    t[0xE8] = op("INX", Imp, 2, misc::op_inx);
    t[0xC8] = op("INY", Imp, 2, misc::op_iny);
    t[0xCA] = op("DEX", Imp, 2, misc::op_dex);
    t[0x88] = op("DEY", Imp, 2, misc::op_dey);

    // Transfers
    t[0xAA] = op("TAX", Imp, 2, misc::op_tax);
    t[0xA8] = op("TAY", Imp, 2, misc::op_tay);
    t[0x8A] = op("TXA", Imp, 2, misc::op_txa);
    t[0x98] = op("TYA", Imp, 2, misc::op_tya);
    t[0xBA] = op("TSX", Imp, 2, misc::op_tsx);
    t[0x9A] = op("TXS", Imp, 2, misc::op_txs);

    // Stack
    t[0x48] = op("PHA", Imp, 3, misc::op_pha);
    t[0x68] = op("PLA", Imp, 4, misc::op_pla);
    t[0x08] = op("PHP", Imp, 3, misc::op_php);
    t[0x28] = op("PLP", Imp, 4, misc::op_plp);

    // Flags
    t[0x18] = op("CLC", Imp, 2, misc::op_clc);
    t[0x38] = op("SEC", Imp, 2, misc::op_sec);
    t[0x58] = op("CLI", Imp, 2, misc::op_cli);
    t[0x78] = op("SEI", Imp, 2, misc::op_sei);
    t[0xB8] = op("CLV", Imp, 2, misc::op_clv);
    t[0xD8] = op("CLD", Imp, 2, misc::op_cld);
    t[0xF8] = op("SED", Imp, 2, misc::op_sed);

    // No operation
    t[0xEA] = op("NOP", Imp, 2, misc::op_nop);

    t
};
