//! Holiday animations for WS2811 LED matrices, bit-banged from Pico 1 and 2 GPIO lines.
//!
//! The crate has two halves:
//!
//! - [`ws2811`]: the protocol encoder. It turns a [`Frame2d`](led2d::Frame2d) into
//!   cycle-timed high/low pulses on one or more output lines, inside a single critical section.
//! - [`pattern`] and [`sequencer`]: the animation engine. Each pattern owns its particle state
//!   and advances one tick per frame; the sequencer rotates through them.
//!
//! # Glossary
//!
//! - **Symbol:** one timed high/low pulse pair encoding a single protocol bit.
//! - **Tick:** one call to a pattern's advance step, which is one rendered frame.
//! - **Cycle:** the fixed number of ticks a pattern runs before yielding to the next one.
//! - **Sub-pixel:** 1/16 of a pixel, the resolution of particle positions (see [`particle`]).
#![cfg_attr(not(feature = "host"), no_std)]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time checks: exactly one architecture must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "arm", feature = "riscv")), not(feature = "host")))]
compile_error!("Must enable exactly one architecture feature: 'arm' or 'riscv'");

#[cfg(all(feature = "arm", feature = "riscv"))]
compile_error!("Cannot enable both 'arm' and 'riscv' features simultaneously");

// Compile-time check: pico1 only supports ARM
#[cfg(all(feature = "pico1", feature = "riscv"))]
compile_error!("Pico 1 (RP2040) only supports ARM architecture, not RISC-V");

#[cfg(all(feature = "host", any(feature = "arm", feature = "riscv")))]
compile_error!("The 'host' feature cannot be combined with a target architecture; use --no-default-features");

mod error;
pub mod gradient;
pub mod led2d;
pub mod particle;
pub mod pattern;
pub mod rng;
pub mod sequencer;
// Needs embassy-time, which only the target architectures pull in
#[cfg(any(feature = "arm", feature = "riscv"))]
pub mod show;
#[cfg(feature = "host")]
pub mod to_png;
pub mod voltage;
pub mod ws2811;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
