//! Abstract trait interfaces for the message facade's collaborators.

pub mod foreign;
pub mod transport;
