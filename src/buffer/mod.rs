//! Read scratch buffers, pooled per thread.
//!
//! Reader adapters read into a [`ScratchBuffer`] before the bytes are
//! scanned. Buffers return to a thread-local pool when dropped, so chunking
//! many small readers does not allocate a fresh read slot each time.

mod pool;

pub(crate) use pool::ScratchBuffer;
#[cfg(test)]
pub(crate) use pool::READ_SIZE;
