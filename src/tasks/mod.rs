//! Background Tasks Module
//!
//! Optional periodic maintenance for the cache store.

mod cleanup;

pub use cleanup::spawn_sweep_task;
