use crate::profiling::profile_function;
use std::fmt;
use std::num::NonZeroU32;

/// Generational handle into a [`Pool`].
///
/// The index is stored off-by-one so `Option<Handle>` costs nothing extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle {
    index: NonZeroU32,
    generation: u32,
}

impl Handle {
    pub fn new(generation: u32, idx: u32) -> Self {
        let index = NonZeroU32::new(idx.wrapping_add(1)).unwrap_or(NonZeroU32::MIN);
        Self { index, generation }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn index(&self) -> u32 {
        self.index.get() - 1
    }

    /// Packs the handle into a single `u64`, useful as a hashing key.
    pub fn to_bits(&self) -> u64 {
        ((self.generation as u64) << 32) | self.index.get() as u64
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index(), self.generation)
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Fixed-capacity generational arena.
///
/// Slots are reused after removal with a bumped generation, so a stale
/// [`Handle`] resolves to `None` instead of aliasing the new occupant.
/// Growing past the capacity is a configuration error and aborts.
pub struct Pool<T> {
    label: &'static str,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    capacity: usize,
    len: usize,
}

impl<T> Pool<T> {
    pub fn with_capacity(label: &'static str, capacity: usize) -> Self {
        Self {
            label,
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            capacity,
            len: 0,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, value: T) -> Handle {
        self.insert_with(|_| value)
    }

    /// Inserts a value that needs to know its own handle.
    ///
    /// # Panics
    ///
    /// Panics when the pool is full.
    pub fn insert_with(&mut self, make: impl FnOnce(Handle) -> T) -> Handle {
        profile_function!();
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            let handle = Handle::new(slot.generation, idx);
            slot.value = Some(make(handle));
            self.len += 1;
            return handle;
        }

        if self.slots.len() >= self.capacity {
            capacity_exceeded(self.label, self.capacity);
        }

        let idx = self.slots.len() as u32;
        let handle = Handle::new(0, idx);
        self.slots.push(Slot {
            generation: 0,
            value: Some(make(handle)),
        });
        self.len += 1;
        handle
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        let slot = self.slots.get(handle.index() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.value.as_mut()
    }

    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        profile_function!();
        let index = handle.index();
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.value
                .as_ref()
                .map(|value| (Handle::new(slot.generation, idx as u32), value))
        })
    }

    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.iter().map(|(handle, _)| handle)
    }
}

/// Reports an exhausted fixed-capacity arena and aborts.
#[cold]
#[track_caller]
pub fn capacity_exceeded(label: &str, capacity: usize) -> ! {
    tracing::error!("{label} exhausted (capacity {capacity})");
    panic!("{label} exhausted (capacity {capacity}); raise the configured limit");
}

static_assertions::assert_eq_size!(Handle, Option<Handle>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_insert() {
        let mut pool = Pool::<u8>::with_capacity("test pool", 4);
        let idx = pool.insert(15);
        assert_eq!(idx.generation(), 0);
        assert_eq!(idx.index(), 0);
        assert_eq!(pool.get(idx), Some(&15));
    }

    #[test]
    fn test_pool_stale_handle() {
        let mut pool = Pool::<u8>::with_capacity("test pool", 4);
        let _ = pool.insert(15);
        let idx = Handle::new(1, 0);
        assert_eq!(pool.get(idx), None);
    }

    #[test]
    fn test_pool_remove_reuses_slot() {
        let mut pool = Pool::<u8>::with_capacity("test pool", 4);
        let idx = pool.insert(15);
        assert_eq!(pool.remove(idx), Some(15));
        let new_idx = pool.insert(45);
        assert_eq!(idx.index(), new_idx.index());
        assert_ne!(idx.generation(), new_idx.generation());
        assert_eq!(pool.get(idx), None);
        assert_eq!(pool.remove(idx), None);
    }

    #[test]
    fn test_pool_insert_with_sees_handle() {
        let mut pool = Pool::<Handle>::with_capacity("test pool", 4);
        let idx = pool.insert_with(|handle| handle);
        assert_eq!(pool.get(idx), Some(&idx));
    }

    #[test]
    fn test_pool_iter_skips_free() {
        let mut pool = Pool::with_capacity("test pool", 100);
        let handles: Vec<_> = (0..100u8).map(|i| pool.insert(i)).collect();
        pool.remove(handles[0]);
        pool.remove(handles[1]);
        let collected: Vec<_> = pool.iter().map(|(_, v)| *v).collect();
        assert_eq!(collected.len(), 98);
        assert_eq!(collected[0], 2);
        assert_eq!(pool.len(), 98);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn test_pool_capacity_is_fatal() {
        let mut pool = Pool::with_capacity("tiny pool", 2);
        pool.insert(1);
        pool.insert(2);
        pool.insert(3);
    }
}
