//! Concrete implementations of the transport ports.

pub mod memory;
