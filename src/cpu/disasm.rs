/*!
disasm.rs - One-instruction disassembler driven by the opcode table.

Decodes without executing, reading through the raw bus path only, and
returns the formatted line plus the address of the following instruction.
Operand lengths and mnemonics come straight from `OPCODES`, so display can
never drift from execution.
*/

use crate::bus::Bus;
use crate::cpu::addressing::AddrMode;
use crate::cpu::table::OPCODES;

/// Decode the instruction at `addr`. Returns `(text, next_addr)`.
pub fn disassemble(bus: &Bus, addr: u16) -> (String, u16) {
    let opcode = bus.peek8_raw(addr);
    let entry = &OPCODES[opcode as usize];
    let next = addr.wrapping_add(1).wrapping_add(entry.mode.operand_len());

    let b = bus.peek8_raw(addr.wrapping_add(1));
    let w = bus.peek16_raw(addr.wrapping_add(1));

    let text = match entry.mode {
        AddrMode::Imp => entry.mnemonic.to_string(),
        AddrMode::Acc => format!("{} A", entry.mnemonic),
        AddrMode::Imm => format!("{} #${b:02X}", entry.mnemonic),
        AddrMode::Zpg => format!("{} ${b:02X}", entry.mnemonic),
        AddrMode::ZpgX => format!("{} ${b:02X},X", entry.mnemonic),
        AddrMode::ZpgY => format!("{} ${b:02X},Y", entry.mnemonic),
        AddrMode::Abs => format!("{} ${w:04X}", entry.mnemonic),
        AddrMode::AbsX => format!("{} ${w:04X},X", entry.mnemonic),
        AddrMode::AbsY => format!("{} ${w:04X},Y", entry.mnemonic),
        AddrMode::Ind => format!("{} (${w:04X})", entry.mnemonic),
        AddrMode::IzX => format!("{} (${b:02X},X)", entry.mnemonic),
        AddrMode::IzY => format!("{} (${b:02X}),Y", entry.mnemonic),
        AddrMode::Rel => {
            let target = next.wrapping_add(b as i8 as i16 as u16);
            format!("{} ${target:04X}", entry.mnemonic)
        }
    };
    (text, next)
}
