//! unoio firmware for the Arduino Uno
//!
//! Polls the buttons from board.toml and shows a pattern on the LEDs
//! chosen by how many buttons are held down.
//!
//! Build for the `avr-unknown-gnu-atmega328` target; the avr-gcc startup
//! code calls `main` after setting up the stack.

#![no_std]
#![no_main]

use embedded_alloc::LlffHeap as Heap;
use panic_halt as _;

use unoio_core::BoardConfig;
use unoio_drivers::Board;
use unoio_hal_atmega328p::{Atmega328p, BusyDelay};

/// Board constants validated and generated by build.rs
mod board {
    include!(concat!(env!("OUT_DIR"), "/board.rs"));
}

#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 256 bytes (of 2KB SRAM)
const HEAP_SIZE: usize = 256;

#[no_mangle]
pub extern "C" fn main() -> ! {
    init_heap();

    // SAFETY: this binary only runs on the ATmega328P
    let regs = unsafe { Atmega328p::steal() };
    let mut delay = BusyDelay::new(board::CPU_HZ);

    let config = match BoardConfig::new(board::LED_PINS, board::BUTTON_PINS, board::BLINK_SPEED_MS)
    {
        Ok(config) => config,
        Err(_) => halt(),
    };

    let mut board = match Board::new(regs, &config) {
        Ok(board) => board,
        Err(_) => halt(),
    };

    loop {
        board.step(&mut delay);
    }
}

/// Stop here with every LED dark
fn halt() -> ! {
    #[allow(clippy::empty_loop)]
    loop {}
}

fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
