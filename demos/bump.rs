use std::{io::Read, ptr};

use pballoc::{BumpAllocator, HeapConfig, block::Header, config::mib, print_alloc};

/// Waits until the user presses ENTER.
/// Useful when you want to inspect the mapping with `pmap` or `/proc/<pid>/maps`.
fn block_until_enter_pressed() {
  if std::env::var_os("PBALLOC_DEMO_NONINTERACTIVE").is_some() {
    return;
  }
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

fn main() {
  env_logger::init();

  // Small enough to exhaust at the end of the demo.
  let mut allocator = BumpAllocator::with_config(HeapConfig::with_capacity(mib(1)));

  println!("[start] PID = {}, mapped = {}", std::process::id(), allocator.is_initialized());

  unsafe {
    // --------------------------------------------------------------------
    // 1) Three blocks of 100, 200 and 300 bytes.
    //    The region is mapped on the first request.
    // --------------------------------------------------------------------
    let first = allocator.allocate(100);
    print_alloc(&allocator, 100, first);
    let second = allocator.allocate(200);
    print_alloc(&allocator, 200, second);
    let third = allocator.allocate(300);
    print_alloc(&allocator, 300, third);

    println!("[1] base = {:?}", allocator.base());
    for (name, block) in [("first", first), ("second", second), ("third", third)] {
      println!(
        "[1] {} = {:?}, recorded size = {}, addr % 16 = {}",
        name,
        block,
        Header::size_of_payload(block),
        block as usize % 16
      );
    }

    ptr::write_bytes(third, 0xAB, 300);

    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 2) Resizing down or to the same size keeps the block.
    // --------------------------------------------------------------------
    let shrunk = allocator.reallocate(first, 30);
    println!("\n[2] realloc(first, 30)   = {:?} (same? {})", shrunk, shrunk == first);
    let same = allocator.reallocate(second, 200);
    println!("[2] realloc(second, 200) = {:?} (same? {})", same, same == second);

    // --------------------------------------------------------------------
    // 3) Growing moves the data to a new block and strands the old one.
    // --------------------------------------------------------------------
    let grown = allocator.reallocate(third, 330);
    println!(
      "\n[3] realloc(third, 330)  = {:?} (moved? {}, first byte = 0x{:X})",
      grown,
      grown != third,
      *grown
    );

    let fresh = allocator.reallocate(ptr::null_mut(), 99);
    print_alloc(&allocator, 99, fresh);

    let gone = allocator.reallocate(first, 0);
    println!("[3] realloc(first, 0)    = {:?}", gone);

    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 4) calloc hands out zeroed memory.
    // --------------------------------------------------------------------
    let zeroed = allocator.zero_allocate(8, 8) as *mut u64;
    println!("\n[4] calloc(8, 8) = {:?}, first word = {}", zeroed, *zeroed);

    // --------------------------------------------------------------------
    // 5) free() never gives anything back.
    // --------------------------------------------------------------------
    let before = allocator.high_water_mark();
    allocator.deallocate(second);
    allocator.deallocate(grown);
    println!(
      "\n[5] high-water mark before free = {:?}, after = {:?}",
      before,
      allocator.high_water_mark()
    );

    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 6) Keep allocating until the region runs out.
    // --------------------------------------------------------------------
    let mut count = 0;
    while !allocator.allocate(4096).is_null() {
      count += 1;
    }
    println!(
      "\n[6] {} more 4 KiB blocks fit; {} bytes left unused",
      count,
      allocator.remaining()
    );

    println!("\n[7] End of example. The region is unmapped when the allocator is dropped.");
  }
}
