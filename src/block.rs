use std::{mem, ptr};

use crate::align::ALIGNMENT;

/// Metadata stored in front of every payload.
///
/// ```text
///   ┌──────────────┬─────────┬───────────────────────────┐
///   │ Header       │ padding │ payload (size bytes)      │
///   │ size: usize  │         │                           │
///   └──────────────┴─────────┴───────────────────────────┘
///   ▲                        ▲
///   block start              returned pointer
///   └──── HEADER_OFFSET ─────┘
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
  /// Usable size of the payload, already rounded to [`ALIGNMENT`].
  pub size: usize,
}

/// Bytes of padding between the header and the payload.
pub const HEADER_PADDING: usize = ALIGNMENT - mem::size_of::<Header>() % ALIGNMENT;

/// Distance from the start of a block to its payload.
pub const HEADER_OFFSET: usize = mem::size_of::<Header>() + HEADER_PADDING;

const _: () = assert!(HEADER_OFFSET % ALIGNMENT == 0);

impl Header {
  pub fn new(size: usize) -> Self {
    Self { size }
  }

  /// Writes a header at `block` and returns the payload address.
  ///
  /// # Safety
  ///
  /// `block` must be aligned to [`ALIGNMENT`] and valid for writes of
  /// `HEADER_OFFSET + size` bytes.
  pub unsafe fn write(
    block: *mut u8,
    size: usize,
  ) -> *mut u8 {
    unsafe {
      ptr::write(block as *mut Header, Header::new(size));
      block.add(HEADER_OFFSET)
    }
  }

  /// Recovers the header of a payload previously returned by [`Header::write`].
  ///
  /// # Safety
  ///
  /// `payload` must have been produced by [`Header::write`] and the block must
  /// still be mapped.
  pub unsafe fn from_payload(payload: *mut u8) -> *mut Header {
    unsafe { payload.sub(HEADER_OFFSET) as *mut Header }
  }

  /// Reads the recorded payload size.
  ///
  /// # Safety
  ///
  /// Same contract as [`Header::from_payload`].
  pub unsafe fn size_of_payload(payload: *mut u8) -> usize {
    unsafe { (*Header::from_payload(payload)).size }
  }
}

/// Total bytes a block with the given rounded payload occupies, or `None` on overflow.
pub const fn block_size(payload: usize) -> Option<usize> {
  payload.checked_add(HEADER_OFFSET)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[repr(C, align(16))]
  struct Backing([u8; 128]);

  #[test]
  fn test_header_offset() {
    assert_eq!(HEADER_OFFSET % ALIGNMENT, 0);
    assert!(HEADER_OFFSET >= mem::size_of::<Header>());
    assert_eq!(HEADER_OFFSET, 16);
  }

  #[test]
  fn test_header_round_trip() {
    let mut backing = Backing([0; 128]);
    let block = backing.0.as_mut_ptr();

    unsafe {
      let payload = Header::write(block, 96);

      assert_eq!(payload, block.add(HEADER_OFFSET));
      assert_eq!(payload as usize % ALIGNMENT, 0);
      assert_eq!(Header::from_payload(payload) as *mut u8, block);
      assert_eq!(Header::size_of_payload(payload), 96);
    }
  }

  #[test]
  fn test_block_size() {
    assert_eq!(block_size(0), Some(HEADER_OFFSET));
    assert_eq!(block_size(112), Some(112 + HEADER_OFFSET));
    assert_eq!(block_size(usize::MAX), None);
  }
}
