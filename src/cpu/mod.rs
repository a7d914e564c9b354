/*!
cpu/mod.rs - Processor module facade.

Layering, bottom to top:
- `state`: architectural registers, flag bits, stack and fetch helpers.
- `regs`: the `RegFile` trait, serde snapshots, `ShadowRegisters` seam.
- `addressing`: the 13 operand modes and the page-cross resolver.
- `execute`: flag/ALU semantics shared by every handler.
- `table`: the 256-entry opcode table.
- `dispatch`: per-family handlers and the single-instruction engine.
- `core`: the `Cpu` facade with the cycle countdown and history.
- `history`, `disasm`: diagnostics that read, never execute.
*/

pub mod addressing;
pub mod core;
pub mod disasm;
pub mod history;
pub mod regs;
pub mod state;
pub mod table;

pub(crate) mod dispatch;
pub(crate) mod execute;

pub use addressing::AddrMode;
pub use self::core::Cpu;
pub use disasm::disassemble;
pub use history::{History, HistoryEntry, HISTORY_CAP};
pub use regs::{RegFile, Registers, ShadowRegisters};
pub use state::CpuState;
pub use table::{Opcode, OPCODES};
