//! Stable content-hash ids for controls and windows.
//!
//! Ids are derived from strings (window titles) and salts, never from object
//! identity, so a control recreated every frame resolves to the same
//! interaction state.

use quay_core::alloc::Handle;
use std::fmt;

/// A stable identifier for a control that persists across frames.
///
/// # Example
/// ```
/// # use quay_ui::WidgetId;
/// let window = WidgetId::new("Inspector");
/// let vscroll = window.derive("vscroll");
/// assert_eq!(vscroll, WidgetId::new("Inspector").derive("vscroll"));
/// assert_ne!(vscroll, window);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

/// Windows are identified by the hash of their title.
pub type WindowId = WidgetId;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

impl WidgetId {
    /// Create a new widget ID from a string key.
    ///
    /// Uses FNV-1a hash for fast, consistent hashing.
    pub fn new(key: &str) -> Self {
        Self(fnv1a(FNV_OFFSET_BASIS, key.as_bytes()))
    }

    /// Create a widget ID from raw u64 (for generated IDs).
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Id of a sub-control of this one (tab, scrollbar, handle).
    pub fn derive(&self, salt: &str) -> Self {
        Self(fnv1a(self.0 ^ FNV_PRIME, salt.as_bytes()))
    }

    /// Id of the `index`-th sub-control of this one (splitter handles, gizmos).
    pub fn derive_index(&self, salt: &str, index: usize) -> Self {
        let base = self.derive(salt);
        Self(fnv1a(base.0, &(index as u64).to_le_bytes()))
    }

    /// Id for controls owned by a pool-allocated group.
    ///
    /// Stable for as long as the group lives; a freed and reused slot gets a
    /// different generation and therefore a different id.
    pub fn for_handle(salt: &str, handle: Handle) -> Self {
        Self::new(salt).derive_index("handle", handle.to_bits() as usize)
    }
}

fn fnv1a(seed: u64, bytes: &[u8]) -> u64 {
    let mut hash = seed;
    for byte in bytes {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WidgetId(0x{:016x})", self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for WidgetId {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}
