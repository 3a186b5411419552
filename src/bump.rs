use std::ptr::{self, NonNull};

use crate::{
  align::checked_align,
  block::{Header, block_size},
  config::HeapConfig,
  error::AllocError,
  region::{Region, page_size},
};

/// Emits a `log` record only when the allocator was configured to log.
macro_rules! diag {
  ($logging:expr, $level:ident, $($arg:tt)+) => {
    if $logging {
      log::$level!($($arg)+);
    }
  };
}

/// Prints an allocation together with the allocator's current high-water mark.
pub fn print_alloc(
  allocator: &BumpAllocator,
  size: usize,
  addr: *mut u8,
) {
  println!(
    "Allocated {} bytes, address = {:?}, high-water mark = {:?} ({} of {} bytes used)",
    size,
    addr,
    allocator.high_water_mark(),
    allocator.used(),
    allocator.capacity(),
  );
}

/// Pointer-bumping allocator over a single reserved region.
///
/// The region is mapped on the first non-empty allocation. Every block is
/// carved at the high-water mark, which only ever moves forward: freed and
/// outgrown blocks stay where they are for the lifetime of the allocator.
///
/// Diagnostics go through `log` unless [`HeapConfig::logging`] is off. The
/// process-wide heap turns it off, since a logger allocating from the heap it
/// is logging about would re-enter it.
pub struct BumpAllocator {
  config: HeapConfig,
  region: Option<Region>,
  next: *mut u8,
}

impl BumpAllocator {
  pub const fn new() -> Self {
    Self::with_config(HeapConfig::new())
  }

  pub const fn with_config(config: HeapConfig) -> Self {
    Self {
      config,
      region: None,
      next: ptr::null_mut(),
    }
  }

  pub fn is_initialized(&self) -> bool {
    self.region.is_some()
  }

  /// Size of the reserved region, or the configured size if nothing is mapped yet.
  pub fn capacity(&self) -> usize {
    match &self.region {
      Some(region) => region.len(),
      None => self.config.capacity,
    }
  }

  pub fn base(&self) -> *mut u8 {
    match &self.region {
      Some(region) => region.start(),
      None => ptr::null_mut(),
    }
  }

  /// Address of the next byte a block would be carved from.
  pub fn high_water_mark(&self) -> *mut u8 {
    self.next
  }

  pub fn used(&self) -> usize {
    self.next as usize - self.base() as usize
  }

  pub fn remaining(&self) -> usize {
    self.capacity() - self.used()
  }

  /// Maps the heap region if this is the first use.
  pub fn try_init(&mut self) -> Result<(), AllocError> {
    if self.region.is_some() {
      return Ok(());
    }

    let logging = self.config.logging;
    diag!(logging, debug, "initializing heap region of {} bytes", self.config.capacity);

    let region = Region::reserve(self.config.capacity).map_err(|err| {
      diag!(logging, error, "{}", err);
      AllocError::from(err.kind())
    })?;

    self.next = region.start();
    self.region = Some(region);

    diag!(
      logging,
      debug,
      "pb-alloc initialized at {:?}, {} bytes, page size {}",
      self.next,
      self.capacity(),
      page_size()
    );

    Ok(())
  }

  /// Like [`BumpAllocator::try_init`], but a failed reservation aborts the process.
  pub fn init(&mut self) {
    if self.try_init().is_err() {
      diag!(self.config.logging, error, "could not map heap region, aborting");
      std::process::abort();
    }
  }

  /// Carves a block of at least `size` bytes.
  pub fn try_allocate(
    &mut self,
    size: usize,
  ) -> Result<NonNull<u8>, AllocError> {
    if size == 0 {
      return Err(AllocError::ZeroSize);
    }

    self.try_init()?;

    let overflow = AllocError::Overflow { count: 1, size };
    let rounded = checked_align(size).ok_or(overflow)?;
    let total = block_size(rounded).ok_or(overflow)?;

    let remaining = self.remaining();
    if total > remaining {
      diag!(
        self.config.logging,
        warn,
        "heap exhausted: {} bytes requested, {} remaining",
        total,
        remaining
      );
      return Err(AllocError::Exhausted {
        requested: total,
        remaining,
      });
    }

    let block = self.next;

    // The block lies inside the region and starts on an ALIGNMENT boundary
    // because the region is page aligned and every total is a multiple of it.
    let payload = unsafe {
      self.next = block.add(total);
      Header::write(block, rounded)
    };

    diag!(
      self.config.logging,
      trace,
      "allocate({}) -> {:?}, block size {}, high-water mark {:?}",
      size,
      payload,
      total,
      self.next
    );

    // Offset from a non-null mapping.
    Ok(unsafe { NonNull::new_unchecked(payload) })
  }

  /// `malloc`: returns null for a zero size or when the region is exhausted.
  pub fn allocate(
    &mut self,
    size: usize,
  ) -> *mut u8 {
    if size == 0 {
      return ptr::null_mut();
    }

    self.init();

    match self.try_allocate(size) {
      Ok(payload) => payload.as_ptr(),
      Err(_) => ptr::null_mut(),
    }
  }

  /// Allocates `count * size` bytes and zeroes the whole payload.
  pub fn try_zero_allocate(
    &mut self,
    count: usize,
    size: usize,
  ) -> Result<NonNull<u8>, AllocError> {
    let logging = self.config.logging;
    let total = count.checked_mul(size).ok_or_else(|| {
      diag!(logging, warn, "calloc({}, {}) overflows", count, size);
      AllocError::Overflow { count, size }
    })?;

    let payload = self.try_allocate(total)?;

    unsafe {
      let usable = Header::size_of_payload(payload.as_ptr());
      ptr::write_bytes(payload.as_ptr(), 0, usable);
    }

    Ok(payload)
  }

  /// `calloc`: returns null for a zero total, on overflow, or when exhausted.
  pub fn zero_allocate(
    &mut self,
    count: usize,
    size: usize,
  ) -> *mut u8 {
    if count == 0 || size == 0 {
      return ptr::null_mut();
    }

    self.init();

    match self.try_zero_allocate(count, size) {
      Ok(payload) => payload.as_ptr(),
      Err(_) => ptr::null_mut(),
    }
  }

  /// `free`: the block is stranded, never reused.
  ///
  /// # Safety
  ///
  /// `address` must be null or a pointer returned by this allocator.
  pub unsafe fn deallocate(
    &mut self,
    address: *mut u8,
  ) {
    diag!(self.config.logging, debug, "free(): {:?}", address);
  }

  /// Resizes the block at `address`.
  ///
  /// Returns `Ok(None)` when `size` is zero, which frees the block. A block is
  /// never shrunk: any size up to the recorded one yields `address` itself.
  /// Growing copies the old payload into a fresh block; on failure the old
  /// block is left untouched.
  ///
  /// # Safety
  ///
  /// `address` must be null or a live pointer returned by this allocator.
  pub unsafe fn try_reallocate(
    &mut self,
    address: *mut u8,
    size: usize,
  ) -> Result<Option<NonNull<u8>>, AllocError> {
    let Some(old) = NonNull::new(address) else {
      return match self.try_allocate(size) {
        Ok(payload) => Ok(Some(payload)),
        Err(AllocError::ZeroSize) => Ok(None),
        Err(err) => Err(err),
      };
    };

    unsafe {
      if size == 0 {
        self.deallocate(old.as_ptr());
        return Ok(None);
      }

      let old_size = Header::size_of_payload(old.as_ptr());
      if size <= old_size {
        diag!(
          self.config.logging,
          trace,
          "realloc({:?}, {}) fits in {} bytes",
          address,
          size,
          old_size
        );
        return Ok(Some(old));
      }

      let new = self.try_allocate(size)?;
      ptr::copy_nonoverlapping(old.as_ptr(), new.as_ptr(), old_size);
      self.deallocate(old.as_ptr());

      diag!(self.config.logging, trace, "realloc({:?}, {}) moved to {:?}", address, size, new);

      Ok(Some(new))
    }
  }

  /// `realloc`: null in, `allocate`; zero size, `deallocate` and null.
  ///
  /// # Safety
  ///
  /// `address` must be null or a live pointer returned by this allocator.
  pub unsafe fn reallocate(
    &mut self,
    address: *mut u8,
    size: usize,
  ) -> *mut u8 {
    if size != 0 {
      self.init();
    }

    match unsafe { self.try_reallocate(address, size) } {
      Ok(Some(payload)) => payload.as_ptr(),
      Ok(None) | Err(_) => ptr::null_mut(),
    }
  }
}

impl Default for BumpAllocator {
  fn default() -> Self {
    Self::new()
  }
}
