/*!
bus.rs - Flat 64K memory image with ROM write protection and device-mapped
access dispatch.

Overview
========
`Bus` owns the machine's entire 16-bit address space as one backing array.
Every CPU-visible access goes through `peek8` / `peek16` / `poke8`, which:
  - route the access through the device registry (see `bus::devices`) when
    the address falls inside a registered range, and
  - silently drop writes that land inside an enabled ROM window.

The `_raw` variants (`peek8_raw`, `peek16_raw`, `poke8_raw`) bypass both the
device registry and the ROM guard. The CPU core uses them for instruction
and pointer fetches; loaders and tests use them to seed memory.

Device hooks run in addition to the backing-array access, not instead of it:
`on_read` fires before the array read (so a device may refresh the cell the
CPU is about to see), `on_write` fires after the array write (so the device
observes the stored value). A registration flagged with a redraw hint sets
the `video_touched` latch on any hit; the driving loop polls and clears it
with `take_video_touched` to pace display refreshes.

Responsibilities
================
- Own the 64K backing array and all access paths into it.
- Enforce the ROM window on dispatching writes only.
- Seed the power-on vector table: RESET -> $0200 and BRK/IRQ -> an RTI stub
  at $FFF0, so an unconfigured machine survives a stray BRK.

Non-responsibilities
====================
- No instruction semantics, timing, or register state (CPU layers).
- No file-format loading; `load` takes raw bytes.
*/

pub mod devices;

pub use crate::bus::devices::Device;

use crate::bus::devices::{DeviceTable, Registration};

/// Size of the full 6502 address space.
pub const MEM_SIZE: usize = 0x1_0000;

/// Power-on reset vector location ($FFFC/$FFFD, little-endian).
pub const RESET_VECTOR: u16 = 0xFFFC;
/// BRK / IRQ vector location ($FFFE/$FFFF, little-endian).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Default reset target for a freshly constructed bus.
pub const DEFAULT_ENTRY: u16 = 0x0200;
/// Address of the seeded RTI stub the default IRQ vector points at.
pub const DEFAULT_IRQ_STUB: u16 = 0xFFF0;

const OP_RTI: u8 = 0x40;

/// Memory bus: backing array, ROM window, device registry.
pub struct Bus {
    ram: Box<[u8; MEM_SIZE]>,
    rom_begin: u16,
    rom_end: u16,
    rom_enabled: bool,
    devices: DeviceTable,
    video_touched: bool,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    /// Construct a bus with zeroed memory and the default vector table:
    /// RESET -> `DEFAULT_ENTRY`, BRK/IRQ -> an RTI stub at `DEFAULT_IRQ_STUB`.
    pub fn new() -> Self {
        let mut bus = Self {
            ram: Box::new([0u8; MEM_SIZE]),
            rom_begin: 0,
            rom_end: 0,
            rom_enabled: false,
            devices: DeviceTable::new(),
            video_touched: false,
        };
        bus.poke8_raw(DEFAULT_IRQ_STUB, OP_RTI);
        bus.set_word_raw(RESET_VECTOR, DEFAULT_ENTRY);
        bus.set_word_raw(IRQ_VECTOR, DEFAULT_IRQ_STUB);
        bus
    }

    // ---------------------------------------------------------------------
    // Dispatching access path (device hooks + ROM guard)
    // ---------------------------------------------------------------------

    /// Read a byte, letting a mapped device refresh the cell first.
    #[inline]
    pub fn peek8(&mut self, addr: u16) -> u8 {
        if let Some(reg) = self.devices.lookup_mut(addr) {
            reg.device.on_read(addr, &mut self.ram);
            if reg.redraw_hint {
                self.video_touched = true;
            }
        }
        self.ram[addr as usize]
    }

    /// Read a little-endian word via two dispatching byte reads.
    /// The high byte wraps at the top of the address space.
    #[inline]
    pub fn peek16(&mut self, addr: u16) -> u16 {
        let lo = self.peek8(addr) as u16;
        let hi = self.peek8(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Write a byte. Dropped silently inside an enabled ROM window;
    /// otherwise stored, then offered to a mapped device.
    #[inline]
    pub fn poke8(&mut self, addr: u16, value: u8) {
        if self.rom_enabled && addr >= self.rom_begin && addr <= self.rom_end {
            return;
        }
        self.ram[addr as usize] = value;
        if let Some(reg) = self.devices.lookup_mut(addr) {
            reg.device.on_write(addr, value, &mut self.ram);
            if reg.redraw_hint {
                self.video_touched = true;
            }
        }
    }

    // ---------------------------------------------------------------------
    // Raw access path (no devices, no ROM guard)
    // ---------------------------------------------------------------------

    #[inline]
    pub fn peek8_raw(&self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    #[inline]
    pub fn peek16_raw(&self, addr: u16) -> u16 {
        let lo = self.peek8_raw(addr) as u16;
        let hi = self.peek8_raw(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    #[inline]
    pub fn poke8_raw(&mut self, addr: u16, value: u8) {
        self.ram[addr as usize] = value;
    }

    /// Write a little-endian word through the raw path (vector seeding).
    #[inline]
    pub fn set_word_raw(&mut self, addr: u16, value: u16) {
        self.poke8_raw(addr, value as u8);
        self.poke8_raw(addr.wrapping_add(1), (value >> 8) as u8);
    }

    /// Bulk raw load starting at `addr`, wrapping at the top of memory.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let mut at = addr;
        for &b in bytes {
            self.poke8_raw(at, b);
            at = at.wrapping_add(1);
        }
    }

    // ---------------------------------------------------------------------
    // ROM window
    // ---------------------------------------------------------------------

    /// Define (and enable) the inclusive ROM window `[begin, end]`.
    pub fn set_rom_window(&mut self, begin: u16, end: u16) {
        self.rom_begin = begin.min(end);
        self.rom_end = begin.max(end);
        self.rom_enabled = true;
    }

    /// Toggle the ROM guard without changing the window bounds.
    #[inline]
    pub fn set_rom_enabled(&mut self, enabled: bool) {
        self.rom_enabled = enabled;
    }

    #[inline]
    pub fn rom_enabled(&self) -> bool {
        self.rom_enabled
    }

    // ---------------------------------------------------------------------
    // Device registry
    // ---------------------------------------------------------------------

    /// Register a device over one or more inclusive address ranges.
    /// Returns the id used for later removal.
    pub fn register_device(
        &mut self,
        name: &str,
        ranges: &[(u16, u16)],
        redraw_hint: bool,
        device: Box<dyn Device>,
    ) -> u8 {
        self.devices.register(name, ranges, redraw_hint, device)
    }

    /// Remove a registration by id. Returns false if the id is unknown.
    pub fn remove_device(&mut self, id: u8) -> bool {
        self.devices.remove(id)
    }

    /// Registration metadata for a given address, if any device claims it.
    pub fn device_at(&self, addr: u16) -> Option<&Registration> {
        self.devices.lookup(addr)
    }

    /// Return and clear the redraw latch.
    #[inline]
    pub fn take_video_touched(&mut self) -> bool {
        std::mem::take(&mut self.video_touched)
    }
}
