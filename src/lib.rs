//! Point-in-time inspection of a single process, merged with a few host facts.
//!
//! [`system::Collector::collect`] produces one [`system::Snapshot`]; the
//! `procwatch` binary repeats it on an interval and prints each snapshot as a
//! JSON line.

pub mod config;
pub mod format;
pub mod system;
