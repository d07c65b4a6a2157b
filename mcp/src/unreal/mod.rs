//! Remote Control client: wire types, transport, and the connection manager

mod connection;
mod manager;
mod remote_call;
#[cfg(test)]
pub mod testing;
mod transport;

pub use manager::{ConnectionManager, Session};
