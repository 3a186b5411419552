/// Size helpers for larger scales.
pub const fn kib(size: usize) -> usize {
  size * 1024
}

pub const fn mib(size: usize) -> usize {
  kib(size) * 1024
}

pub const fn gib(size: usize) -> usize {
  mib(size) * 1024
}

/// Virtual address space reserved for the process-wide heap.
#[cfg(target_pointer_width = "64")]
pub const HEAP_SIZE: usize = gib(2);

#[cfg(not(target_pointer_width = "64"))]
pub const HEAP_SIZE: usize = mib(512);

/// Parameters fixed at the moment the heap region is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapConfig {
  /// Bytes of address space to reserve. Rounded up to the page size.
  pub capacity: usize,
  /// Emit `log` records. Must be off when the allocator backs the logger itself.
  pub logging: bool,
}

impl HeapConfig {
  pub const fn new() -> Self {
    Self::with_capacity(HEAP_SIZE)
  }

  pub const fn with_capacity(capacity: usize) -> Self {
    Self {
      capacity,
      logging: true,
    }
  }

  pub const fn without_logging(self) -> Self {
    Self {
      logging: false,
      ..self
    }
  }
}

impl Default for HeapConfig {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_scales() {
    assert_eq!(kib(1), 1024);
    assert_eq!(mib(3), 3 * 1024 * 1024);
    assert_eq!(gib(1), 1024 * 1024 * 1024);
  }

  #[test]
  fn test_default_capacity() {
    assert_eq!(HeapConfig::default().capacity, HEAP_SIZE);
    assert_eq!(HeapConfig::with_capacity(kib(8)).capacity, 8192);
    assert!(HeapConfig::default().logging);
  }

  #[test]
  fn test_without_logging() {
    let config = HeapConfig::with_capacity(kib(8)).without_logging();

    assert_eq!(config.capacity, 8192);
    assert!(!config.logging);
  }
}
