//! Pointer and scroll input tracking.
//!
//! # Invariants
//! - Velocity is derived from the delta between current and immediately
//!   previous pointer position, scaled by a fixed factor and clamped to
//!   [0, 1] per axis.
//! - The smoothing step runs once per render tick, never per event.

pub mod pointer;
pub mod scroll;

pub use pointer::PointerTracker;
pub use scroll::{ScrollMonitor, VirtualPage};
