use std::io;

use thiserror::Error;

/// Why an allocation request produced no block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
  #[error("zero-sized request")]
  ZeroSize,

  #[error("size overflow computing {count} x {size} bytes")]
  Overflow { count: usize, size: usize },

  #[error("heap exhausted: {requested} bytes requested, {remaining} remaining")]
  Exhausted { requested: usize, remaining: usize },

  #[error(transparent)]
  Region(#[from] RegionErrorKind),
}

/// Copyable summary of a [`RegionError`], kept inside [`AllocError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegionErrorKind {
  #[error("could not map heap region")]
  Map,

  #[error("heap region must not be empty")]
  Empty,
}

/// Failure to reserve the heap's address range.
#[derive(Debug, Error)]
pub enum RegionError {
  #[error("could not mmap() {size} bytes for the heap region")]
  Map {
    size: usize,
    #[source]
    source: io::Error,
  },

  #[error("heap region must not be empty")]
  Empty,
}

impl RegionError {
  pub fn kind(&self) -> RegionErrorKind {
    match self {
      RegionError::Map { .. } => RegionErrorKind::Map,
      RegionError::Empty => RegionErrorKind::Empty,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_messages() {
    let err = AllocError::Exhausted {
      requested: 64,
      remaining: 32,
    };
    assert_eq!(err.to_string(), "heap exhausted: 64 bytes requested, 32 remaining");

    let err = RegionError::Map {
      size: 4096,
      source: io::Error::from_raw_os_error(libc::ENOMEM),
    };
    assert!(err.to_string().contains("4096"));
    assert_eq!(AllocError::from(err.kind()), AllocError::Region(RegionErrorKind::Map));
  }
}
