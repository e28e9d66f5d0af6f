//! The composable circuit library: latches and flops, address decoding and
//! multiplexing, ripple-carry addition, and RAM/ROM, all built out of
//! [`crate::facade::Gate`] and wrapped in [`crate::facade::block`] so every
//! gate they create picks up a construction-path cookie.

mod adder;
mod latches;
mod memory;
mod mux;

pub use adder::{full_adder, half_adder, ripple_add};
pub use latches::{gated_d_latch, ms_d_flop, register};
pub use memory::{ram, rom};
pub use mux::{address_decode, address_matches, bit_mux, bit_switch, word_mux, word_switch};
