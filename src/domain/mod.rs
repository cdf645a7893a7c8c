//! Domain models for slodash
//!
//! SLO parameters are plain data; validation is opt-in and happens at the
//! catalog boundary rather than on construction.

pub mod slo;

pub use slo::{parse_time_window, unix_now, SloKind, SloParameters};
