/*!
devices.rs - Device registry: named registrations over inclusive address
ranges, accelerated by a coarse page index.

Overview
========
A device claims one or more inclusive `(begin, end)` ranges of the address
space and supplies hooks that run alongside ordinary memory accesses. The
registry answers "which device, if any, owns address A" on every dispatching
bus access, so the lookup is two-tier:

  1. A 64-entry page index (1 KiB pages). An untagged page answers `None`
     without touching the registration list; this is the common case.
  2. A linear scan of registrations in registration order. The first range
     containing the address wins; overlapping claims are legal and resolved
     by that ordering.

The page tag stores the id of the first registration claiming the page, but
the scan is authoritative: a tag only proves the page is worth scanning. If
the list has no match for a tagged address (stale tag cannot happen since
the index is rebuilt on every mutation, but an empty list can), the access
falls through to plain memory.
*/

use crate::bus::MEM_SIZE;

/// log2 of the page size used by the index (1 KiB pages).
pub const PAGE_SHIFT: u32 = 10;
/// Number of pages covering the 64K address space.
pub const PAGE_COUNT: usize = MEM_SIZE >> PAGE_SHIFT;

/// Hooks a mapped device runs alongside backing-array accesses.
///
/// Both hooks receive the whole backing array: a read hook may refresh the
/// cell about to be read (or any other cell it mirrors), a write hook sees
/// the value already stored. Default implementations do nothing, so a
/// device only overrides the direction it cares about.
pub trait Device {
    fn on_read(&mut self, _addr: u16, _ram: &mut [u8; MEM_SIZE]) {}
    fn on_write(&mut self, _addr: u16, _value: u8, _ram: &mut [u8; MEM_SIZE]) {}
}

/// One registered device: identity, claimed ranges, redraw hint, hooks.
pub struct Registration {
    pub id: u8,
    pub name: String,
    pub ranges: Vec<(u16, u16)>,
    pub redraw_hint: bool,
    pub device: Box<dyn Device>,
}

impl Registration {
    #[inline]
    fn contains(&self, addr: u16) -> bool {
        self.ranges.iter().any(|&(b, e)| addr >= b && addr <= e)
    }
}

/// Registration list plus the page index derived from it.
pub struct DeviceTable {
    entries: Vec<Registration>,
    pages: [Option<u8>; PAGE_COUNT],
    next_id: u8,
}

impl Default for DeviceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            pages: [None; PAGE_COUNT],
            next_id: 0,
        }
    }

    /// Add a registration and rebuild the page index. Ranges are stored
    /// normalized (begin <= end). Returns the assigned id.
    pub fn register(
        &mut self,
        name: &str,
        ranges: &[(u16, u16)],
        redraw_hint: bool,
        device: Box<dyn Device>,
    ) -> u8 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        let ranges = ranges
            .iter()
            .map(|&(b, e)| (b.min(e), b.max(e)))
            .collect();
        self.entries.push(Registration {
            id,
            name: name.to_string(),
            ranges,
            redraw_hint,
            device,
        });
        self.rebuild_pages();
        id
    }

    /// Remove by id and rebuild the page index.
    pub fn remove(&mut self, id: u8) -> bool {
        let before = self.entries.len();
        self.entries.retain(|r| r.id != id);
        if self.entries.len() == before {
            return false;
        }
        self.rebuild_pages();
        true
    }

    /// First registration (in registration order) claiming `addr`.
    #[inline]
    pub fn lookup(&self, addr: u16) -> Option<&Registration> {
        self.pages[(addr >> PAGE_SHIFT) as usize]?;
        self.entries.iter().find(|r| r.contains(addr))
    }

    /// Mutable variant of `lookup`, used on the hot access path.
    #[inline]
    pub fn lookup_mut(&mut self, addr: u16) -> Option<&mut Registration> {
        self.pages[(addr >> PAGE_SHIFT) as usize]?;
        self.entries.iter_mut().find(|r| r.contains(addr))
    }

    /// Retag every page touched by any range of any registration with the
    /// id of the first registration claiming it.
    fn rebuild_pages(&mut self) {
        self.pages = [None; PAGE_COUNT];
        for reg in &self.entries {
            for &(begin, end) in &reg.ranges {
                let first = (begin >> PAGE_SHIFT) as usize;
                let last = (end >> PAGE_SHIFT) as usize;
                for page in first..=last {
                    if self.pages[page].is_none() {
                        self.pages[page] = Some(reg.id);
                    }
                }
            }
        }
    }
}
