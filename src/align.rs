/// Every payload handed out by the allocator starts on this boundary.
pub const ALIGNMENT: usize = 16;

/// Rounds the given size up to the next multiple of [`ALIGNMENT`].
///
/// Wraps on overflow; use [`checked_align`] when the input comes from a caller.
///
/// # Examples
///
/// ```rust
/// use pballoc::align;
///
/// assert_eq!(align!(1), 16);
/// assert_eq!(align!(16), 16);
/// assert_eq!(align!(100), 112);
/// ```
#[macro_export]
macro_rules! align {
  ($value:expr) => {
    ($value + $crate::align::ALIGNMENT - 1) & !($crate::align::ALIGNMENT - 1)
  };
}

/// Same as [`align!`] but returns `None` when rounding would overflow `usize`.
pub const fn checked_align(size: usize) -> Option<usize> {
  match size.checked_add(ALIGNMENT - 1) {
    Some(value) => Some(value & !(ALIGNMENT - 1)),
    None => None,
  }
}

/// Rounds `size` up to a multiple of `page`, which must be a power of two.
pub const fn checked_align_to(
  size: usize,
  page: usize,
) -> Option<usize> {
  match size.checked_add(page - 1) {
    Some(value) => Some(value & !(page - 1)),
    None => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_align() {
    let mut alignments = Vec::new();

    for i in 0..10 {
      let sizes = (ALIGNMENT * i + 1)..=(ALIGNMENT * (i + 1));

      let expected_alignment = ALIGNMENT * (i + 1);

      alignments.push((sizes, expected_alignment));
    }

    for (sizes, expected) in alignments {
      for size in sizes {
        assert_eq!(expected, align!(size));
        assert_eq!(Some(expected), checked_align(size));
      }
    }
  }

  #[test]
  fn test_checked_align_overflow() {
    assert_eq!(checked_align(0), Some(0));
    assert_eq!(checked_align(usize::MAX - ALIGNMENT + 1), Some(usize::MAX - ALIGNMENT + 1));
    assert_eq!(checked_align(usize::MAX - ALIGNMENT + 2), None);
    assert_eq!(checked_align(usize::MAX), None);
  }

  #[test]
  fn test_align_to_page() {
    assert_eq!(checked_align_to(1, 4096), Some(4096));
    assert_eq!(checked_align_to(4096, 4096), Some(4096));
    assert_eq!(checked_align_to(4097, 4096), Some(8192));
    assert_eq!(checked_align_to(usize::MAX, 4096), None);
  }
}
