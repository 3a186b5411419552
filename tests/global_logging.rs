//! Runs with `harness = false`: the process-wide heap is single-threaded, so
//! this binary keeps everything on the main thread.

use std::collections::BTreeMap;

use log::LevelFilter;
use pballoc::PbAlloc;

#[global_allocator]
static HEAP: PbAlloc = PbAlloc;

fn logger_allocating_from_heap() {
  env_logger::Builder::new().filter_level(LevelFilter::Trace).init();

  let before = unsafe { HEAP.used() };

  let mut numbers = Vec::with_capacity(100);
  numbers.extend(0u32..1000);
  log::trace!("vector of {} numbers at {:p}", numbers.len(), numbers.as_ptr());

  let mut names = BTreeMap::new();
  for i in 0..64 {
    names.insert(i, format!("block-{}", i));
  }
  log::debug!("{} names, last = {:?}", names.len(), names.get(&63));

  assert_eq!(numbers.iter().sum::<u32>(), 499_500);
  assert_eq!(names[&7], "block-7");
  assert!(unsafe { HEAP.used() } > before);
}

fn shrinking_vec_keeps_address() {
  let mut bytes: Vec<u8> = Vec::with_capacity(256);
  bytes.extend_from_slice(&[7; 200]);
  let address = bytes.as_ptr();

  bytes.shrink_to_fit();
  log::info!("shrunk to {} bytes at {:p}", bytes.capacity(), bytes.as_ptr());

  assert_eq!(bytes.as_ptr(), address);
  assert!(bytes.iter().all(|&b| b == 7));
}

fn main() {
  logger_allocating_from_heap();
  shrinking_vec_keeps_address();
  println!("global_logging: ok");
}
