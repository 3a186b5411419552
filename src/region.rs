use std::{io, ptr};

use libc::{MAP_ANONYMOUS, MAP_FAILED, MAP_PRIVATE, PROT_READ, PROT_WRITE, _SC_PAGESIZE, c_void};

use crate::{align::checked_align_to, error::RegionError};

/// The system's page size, falling back to 4 KiB if `sysconf` refuses.
pub fn page_size() -> usize {
  let size = unsafe { libc::sysconf(_SC_PAGESIZE) };
  if size <= 0 { 4096 } else { size as usize }
}

/// A contiguous, private, anonymous read/write mapping.
///
/// The mapping is released when the `Region` is dropped. Nothing here logs
/// on the reserve path, so it is safe to call from inside a global allocator.
#[derive(Debug)]
pub struct Region {
  start: *mut u8,
  len: usize,
}

impl Region {
  /// Reserves at least `size` bytes of address space, rounded up to whole pages.
  pub fn reserve(size: usize) -> Result<Self, RegionError> {
    if size == 0 {
      return Err(RegionError::Empty);
    }

    let page = page_size();
    let len = checked_align_to(size, page).ok_or_else(|| RegionError::Map {
      size,
      source: io::Error::from_raw_os_error(libc::ENOMEM),
    })?;

    let address = unsafe {
      libc::mmap(
        ptr::null_mut(),
        len,
        PROT_READ | PROT_WRITE,
        MAP_PRIVATE | MAP_ANONYMOUS,
        -1,
        0,
      )
    };

    if address == MAP_FAILED {
      return Err(RegionError::Map {
        size: len,
        source: io::Error::last_os_error(),
      });
    }

    Ok(Self {
      start: address as *mut u8,
      len,
    })
  }

  pub fn start(&self) -> *mut u8 {
    self.start
  }

  /// One past the last usable byte.
  pub fn end(&self) -> *mut u8 {
    self.start.wrapping_add(self.len)
  }

  #[allow(clippy::len_without_is_empty)]
  pub fn len(&self) -> usize {
    self.len
  }
}

impl Drop for Region {
  fn drop(&mut self) {
    let result = unsafe { libc::munmap(self.start as *mut c_void, self.len) };
    if result != 0 {
      log::warn!("munmap({:?}, {}) failed: {}", self.start, self.len, io::Error::last_os_error());
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_reserve_rounds_to_page() {
    let page = page_size();
    let region = Region::reserve(1).unwrap();

    assert_eq!(region.len(), page);
    assert_eq!(region.start() as usize % page, 0);
    assert_eq!(region.end() as usize - region.start() as usize, page);
  }

  #[test]
  fn test_region_is_writable() {
    let region = Region::reserve(3 * page_size()).unwrap();

    unsafe {
      ptr::write_bytes(region.start(), 0xAB, region.len());
      assert_eq!(*region.start(), 0xAB);
      assert_eq!(*region.end().sub(1), 0xAB);
    }
  }

  #[test]
  fn test_reserve_empty() {
    assert!(matches!(Region::reserve(0), Err(RegionError::Empty)));
  }

  #[test]
  fn test_reserve_too_large() {
    assert!(matches!(Region::reserve(usize::MAX), Err(RegionError::Map { .. })));
  }
}
