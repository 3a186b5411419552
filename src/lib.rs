//! # pballoc - A Pointer-Bumping Heap Allocator
//!
//! This crate provides `malloc`, `calloc`, `realloc` and `free` over a single
//! large address range reserved once with `mmap(2)`.
//!
//! ## Overview
//!
//! ```text
//!   Heap Region:
//!
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │ ┌───┬──────┬───┬──────────┬───┬────┬──────────────────────────────┐  │
//!   │ │ H │  A1  │ H │    A2    │ H │ A3 │          Unused              │  │
//!   │ └───┴──────┴───┴──────────┴───┴────┴──────────────────────────────┘  │
//!   │ ▲                                  ▲                             ▲   │
//!   │ │                                  │                             │   │
//!   │ base                        high-water mark                   end    │
//!   └──────────────────────────────────────────────────────────────────────┘
//!
//!   Each allocation writes a header (H) and bumps the mark forward.
//!   Freed blocks are never reused; the mark never moves back.
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   pballoc
//!   ├── align   - 16-byte alignment constant and rounding helpers
//!   ├── block   - Header layout and recovery from a payload pointer
//!   ├── config  - Heap size configuration
//!   ├── error   - AllocError / RegionError
//!   ├── region  - mmap-backed address range
//!   ├── bump    - BumpAllocator implementation
//!   └── global  - Process-wide heap, GlobalAlloc and optional C ABI
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pballoc::{BumpAllocator, HeapConfig, config::mib};
//!
//! let mut allocator = BumpAllocator::with_config(HeapConfig::with_capacity(mib(1)));
//!
//! unsafe {
//!     let ptr = allocator.allocate(100);
//!     assert!(!ptr.is_null());
//!
//!     // Shrinking keeps the block, growing moves it.
//!     assert_eq!(allocator.reallocate(ptr, 50), ptr);
//!     let grown = allocator.reallocate(ptr, 500);
//!     assert_ne!(grown, ptr);
//!
//!     allocator.deallocate(grown);
//! }
//! ```
//!
//! ## Block Layout
//!
//! ```text
//!   ┌──────────────┬─────────┬────────────────────────────────┐
//!   │    Header    │ padding │         User Data              │
//!   │  size: N     │         │      N bytes usable            │
//!   └──────────────┴─────────┴────────────────────────────────┘
//!   ◄──────── 16 bytes ──────►
//!                            ▲
//!                            └── Pointer returned to user (16-byte aligned)
//! ```
//!
//! ## Limitations
//!
//! - **Single-threaded only**: No synchronization primitives
//! - **No reuse**: `free` only logs; `realloc` strands the old block when growing
//! - **Unix-only**: Requires `libc` and `mmap`
//!
//! ## Safety
//!
//! Recovering a header from a pointer is inherently unsafe, so `deallocate`
//! and `reallocate` are `unsafe fn`s; passing a pointer that did not come
//! from the same allocator is undefined behavior.

pub mod align;
pub mod block;
pub mod bump;
pub mod config;
pub mod error;
pub mod global;
pub mod region;

pub use bump::{BumpAllocator, print_alloc};
pub use config::{HEAP_SIZE, HeapConfig};
pub use error::{AllocError, RegionError};
pub use global::PbAlloc;
