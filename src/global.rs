//! The process-wide heap.
//!
//! A single [`BumpAllocator`] with the default [`HeapConfig`] lives in a
//! `static` and is mapped on the first non-empty request. Nothing here
//! synchronizes: callers must use it from one thread at a time. It emits no
//! `log` records, so it can back the process's own logger.

use std::{
  alloc::{GlobalAlloc, Layout},
  cell::UnsafeCell,
};

use crate::{align::ALIGNMENT, bump::BumpAllocator, config::HeapConfig};

/// Handle to the process-wide heap.
///
/// ```rust,ignore
/// #[global_allocator]
/// static HEAP: pballoc::PbAlloc = pballoc::PbAlloc;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PbAlloc;

struct GlobalHeap(UnsafeCell<BumpAllocator>);

// Single-threaded by contract; see the module docs.
unsafe impl Sync for GlobalHeap {}

// Never logs: the installed logger would allocate from this same heap.
static HEAP: GlobalHeap = GlobalHeap(UnsafeCell::new(BumpAllocator::with_config(
  HeapConfig::new().without_logging(),
)));

impl PbAlloc {
  #[allow(clippy::mut_from_ref)]
  unsafe fn heap(&self) -> &mut BumpAllocator {
    unsafe { &mut *HEAP.0.get() }
  }

  /// # Safety
  ///
  /// No other call into the process-wide heap may run concurrently.
  pub unsafe fn malloc(
    &self,
    size: usize,
  ) -> *mut u8 {
    unsafe { self.heap().allocate(size) }
  }

  /// # Safety
  ///
  /// Same as [`PbAlloc::malloc`].
  pub unsafe fn calloc(
    &self,
    count: usize,
    size: usize,
  ) -> *mut u8 {
    unsafe { self.heap().zero_allocate(count, size) }
  }

  /// # Safety
  ///
  /// Same as [`PbAlloc::malloc`]; `ptr` must be null or come from this heap.
  pub unsafe fn realloc(
    &self,
    ptr: *mut u8,
    size: usize,
  ) -> *mut u8 {
    unsafe { self.heap().reallocate(ptr, size) }
  }

  /// # Safety
  ///
  /// Same as [`PbAlloc::realloc`].
  pub unsafe fn free(
    &self,
    ptr: *mut u8,
  ) {
    unsafe { self.heap().deallocate(ptr) }
  }

  /// Bytes carved from the process-wide heap so far.
  ///
  /// # Safety
  ///
  /// Same as [`PbAlloc::malloc`].
  pub unsafe fn used(&self) -> usize {
    unsafe { self.heap().used() }
  }
}

unsafe impl GlobalAlloc for PbAlloc {
  unsafe fn alloc(
    &self,
    layout: Layout,
  ) -> *mut u8 {
    if layout.align() > ALIGNMENT {
      return std::ptr::null_mut();
    }
    unsafe { self.malloc(layout.size()) }
  }

  unsafe fn alloc_zeroed(
    &self,
    layout: Layout,
  ) -> *mut u8 {
    if layout.align() > ALIGNMENT {
      return std::ptr::null_mut();
    }
    unsafe { self.calloc(1, layout.size()) }
  }

  unsafe fn dealloc(
    &self,
    ptr: *mut u8,
    _layout: Layout,
  ) {
    unsafe { self.free(ptr) }
  }

  unsafe fn realloc(
    &self,
    ptr: *mut u8,
    layout: Layout,
    new_size: usize,
  ) -> *mut u8 {
    if layout.align() > ALIGNMENT {
      return std::ptr::null_mut();
    }
    unsafe { PbAlloc::realloc(self, ptr, new_size) }
  }
}

/// C entry points, for building the `cdylib` as an `LD_PRELOAD` replacement
/// of the system allocator.
#[cfg(feature = "c-abi")]
pub mod c_abi {
  use libc::{c_void, size_t};

  use super::PbAlloc;

  #[unsafe(no_mangle)]
  pub unsafe extern "C" fn malloc(size: size_t) -> *mut c_void {
    unsafe { PbAlloc.malloc(size) as *mut c_void }
  }

  #[unsafe(no_mangle)]
  pub unsafe extern "C" fn calloc(
    nmemb: size_t,
    size: size_t,
  ) -> *mut c_void {
    unsafe { PbAlloc.calloc(nmemb, size) as *mut c_void }
  }

  #[unsafe(no_mangle)]
  pub unsafe extern "C" fn realloc(
    ptr: *mut c_void,
    size: size_t,
  ) -> *mut c_void {
    unsafe { PbAlloc.realloc(ptr as *mut u8, size) as *mut c_void }
  }

  #[unsafe(no_mangle)]
  pub unsafe extern "C" fn free(ptr: *mut c_void) {
    unsafe { PbAlloc.free(ptr as *mut u8) }
  }
}
