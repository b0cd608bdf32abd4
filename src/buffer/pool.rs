//! Thread-local pool of read scratch buffers.

use std::cell::RefCell;

/// Size of one read slot.
pub const READ_SIZE: usize = 64 * 1024;

/// Buffers kept per thread.
pub const MAX_POOLED: usize = 4;

thread_local! {
    static POOL: RefCell<Vec<Box<[u8]>>> = const { RefCell::new(Vec::new()) };
}

/// A fixed-size read slot borrowed from the thread-local pool.
#[derive(Debug)]
pub struct ScratchBuffer {
    slot: Box<[u8]>,
}

impl ScratchBuffer {
    /// Takes a slot from the pool, allocating one if the pool is empty.
    pub fn take() -> Self {
        let slot = POOL
            .with(|pool| pool.borrow_mut().pop())
            .unwrap_or_else(|| vec![0u8; READ_SIZE].into_boxed_slice());
        Self { slot }
    }

    /// Returns the whole slot for a read call. Contents are unspecified.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.slot
    }

    /// Returns the first `n` bytes, as filled by the last read.
    pub fn filled(&self, n: usize) -> &[u8] {
        &self.slot[..n]
    }
}

impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        let slot = std::mem::take(&mut self.slot);
        // Thread-locals may already be gone during thread teardown.
        let _ = POOL.try_with(|pool| {
            let mut pool = pool.borrow_mut();
            if pool.len() < MAX_POOLED {
                pool.push(slot);
            }
        });
    }
}

impl Default for ScratchBuffer {
    fn default() -> Self {
        Self::take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_has_full_slot() {
        let mut buf = ScratchBuffer::take();
        assert_eq!(buf.as_mut_slice().len(), READ_SIZE);
    }

    #[test]
    fn test_filled_prefix() {
        let mut buf = ScratchBuffer::take();
        buf.as_mut_slice()[..3].copy_from_slice(b"abc");
        assert_eq!(buf.filled(3), b"abc");
        assert!(buf.filled(0).is_empty());
    }

    #[test]
    fn test_slot_is_reused() {
        let ptr = {
            let mut buf = ScratchBuffer::take();
            buf.as_mut_slice().as_ptr()
        };
        let mut again = ScratchBuffer::take();
        assert_eq!(again.as_mut_slice().as_ptr(), ptr);
    }

    #[test]
    fn test_pool_is_bounded() {
        let bufs: Vec<_> = (0..MAX_POOLED + 2).map(|_| ScratchBuffer::take()).collect();
        drop(bufs);
        POOL.with(|pool| assert!(pool.borrow().len() <= MAX_POOLED));
    }
}
