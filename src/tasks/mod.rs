//! Background Tasks Module
//!
//! Drivers that run cache maintenance on behalf of an embedding application.
//!
//! # Tasks
//! - Janitor: Sweeps expired cache entries at a configured interval

mod janitor;

pub use janitor::{spawn_janitor, Janitor};
