//! A discrete-event simulator for combinational and sequential logic built
//! exclusively from NOR primitives (plus two input sources: a constant `Tie`
//! and an externally writable `Switch`). [`network`] is the single mutable
//! gate-and-value store and fixed-point propagator; [`facade`] is the
//! value-typed composition layer (`Nor`/`Not`/`And`/`Or`/`Xor`/`Placeholder`)
//! that builds circuits on top of it; [`cookie`] gives every gate a
//! hierarchical construction-path name for `find`/`list` navigation; and
//! [`blocks`] is the library of latches, flops, registers, muxes, adders, and
//! memories whose correctness depends on the propagator's exact timing
//! semantics.

pub mod blocks;
pub mod cookie;
pub mod facade;
pub mod network;
pub mod testutil;

pub use blocks::*;
pub use facade::*;
pub use network::{GateIndex, GateKind, Network, Stats};
