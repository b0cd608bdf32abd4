//! Fixed-capacity byte ring used as the rolling hash window.

/// A fixed-capacity circular byte buffer.
///
/// Pushing into a full ring evicts and returns the oldest byte. `clone_from`
/// copies in place, so cross-lane state copies never reallocate.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RingBuffer {
    buf: Box<[u8]>,
    /// Next write position.
    head: usize,
    /// Number of valid bytes, saturating at the capacity.
    len: usize,
}

impl RingBuffer {
    /// Creates an empty ring holding up to `capacity` bytes.
    ///
    /// Callers validate the window size first; a zero capacity is a bug.
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring capacity must be non-zero");
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    /// Writes `byte` at the head and returns the byte it evicted, if the ring
    /// was already full.
    #[inline]
    pub(crate) fn push(&mut self, byte: u8) -> Option<u8> {
        let evicted = if self.len == self.buf.len() {
            Some(self.buf[self.head])
        } else {
            self.len += 1;
            None
        };

        self.buf[self.head] = byte;
        self.head += 1;
        if self.head == self.buf.len() {
            self.head = 0;
        }

        evicted
    }

    /// Empties the ring.
    pub(crate) fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Returns the capacity.
    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of valid bytes (the fill level).
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns true once the ring holds `capacity` bytes.
    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    /// Iterates the valid bytes from oldest to newest.
    pub(crate) fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        let cap = self.buf.len();
        let start = (self.head + cap - self.len) % cap;
        (0..self.len).map(move |i| self.buf[(start + i) % cap])
    }
}

impl Clone for RingBuffer {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf.clone(),
            head: self.head,
            len: self.len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if self.buf.len() == source.buf.len() {
            self.buf.copy_from_slice(&source.buf);
        } else {
            self.buf = source.buf.clone();
        }
        self.head = source.head;
        self.len = source.len;
    }
}
