//! Bump arena for window content buffers.
//!
//! A fixed static pool sized so every window slot can hold a maximum-size
//! buffer at once. Allocation hands out increasing offsets and never
//! reclaims; destroyed windows simply leave their range behind. That is
//! acceptable because the registry caps the number of simultaneously
//! existing windows, and [`reset`] reclaims everything when the whole
//! desktop is torn down.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicUsize, Ordering};

use vesper_abi::window::WINDOW_ARENA_PIXELS;

struct ArenaPool(UnsafeCell<[u32; WINDOW_ARENA_PIXELS]>);

// SAFETY: `alloc` hands out disjoint ranges of the pool exactly once, and
// all access to those ranges goes through the window manager's lock.
unsafe impl Sync for ArenaPool {}

static POOL: ArenaPool = ArenaPool(UnsafeCell::new([0; WINDOW_ARENA_PIXELS]));
static NEXT: AtomicUsize = AtomicUsize::new(0);

/// Claim `len` pixels. Returns a pointer to the start of the range, or
/// `None` when the pool is exhausted.
pub(crate) fn alloc(len: usize) -> Option<*mut u32> {
    if len == 0 || len > WINDOW_ARENA_PIXELS {
        return None;
    }
    let start = NEXT
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| {
            let end = next.checked_add(len)?;
            if end <= WINDOW_ARENA_PIXELS { Some(end) } else { None }
        })
        .ok()?;
    // SAFETY: `start..start + len` lies inside the pool and was claimed by
    // the fetch_update above, so no other allocation overlaps it.
    Some(unsafe { (POOL.0.get() as *mut u32).add(start) })
}

/// Reclaim the whole pool.
///
/// Only sound when every window holding a range has been dropped first;
/// the registry's `reset` does exactly that under its lock.
pub(crate) fn reset() {
    NEXT.store(0, Ordering::Relaxed);
}
