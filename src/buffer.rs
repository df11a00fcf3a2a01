//! Contiguous growable character store. No formatting knowledge lives here.

use std::ffi::CStr;

use crate::constants::START_BUF_SIZE;

/// Owned, contiguous byte storage for one renderer.
///
/// Invariants: capacity is at least 1 once constructed; after a successful
/// render the first `len` bytes hold the rendered text followed by exactly
/// one terminating NUL, with `len < capacity`. The store grows on demand and
/// never shrinks.
#[derive(Debug, Clone)]
pub struct CharBuf {
    data: Vec<u8>,
    len: usize,
}

impl CharBuf {
    pub fn new() -> Self {
        Self::with_capacity(START_BUF_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut buf = Self {
            data: vec![0; capacity.max(1)],
            len: 0,
        };
        buf.terminate(0);
        buf
    }

    /// Ensure capacity is at least `minimum` bytes. Content present before a
    /// grow is not guaranteed to survive it; callers re-render after growth.
    pub fn reserve(&mut self, minimum: usize) {
        if minimum > self.data.len() {
            self.data.resize(minimum, 0);
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Length of the currently terminated text.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw storage for a formatting primitive to render into.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Record `n` rendered bytes and write the terminator after them.
    pub(crate) fn terminate(&mut self, n: usize) {
        debug_assert!(n < self.data.len());
        self.data[n] = 0;
        self.len = n;
    }

    /// The rendered text, without its terminator.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.data[..self.len]).expect("rendered text must be valid UTF-8")
    }

    /// The rendered text with its terminator, for callers that hand the
    /// result to C-string consumers.
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_with_nul(&self.data[..=self.len]).expect("buffer must be NUL-terminated")
    }
}

impl Default for CharBuf {
    fn default() -> Self {
        Self::new()
    }
}
