//! Adapter implementations of the port traits.

pub mod live;
pub mod memory;
pub mod recording;
