//! Plaza Catalog - schema discovery over the RPC client
//!
//! Enumerates the remote database's tables, columns, indexes, and stored
//! functions. Every navigation re-fetches; there is no cache and no retry.
//! Also home to row-identity resolution (which column keys edit/delete) and
//! the function inspector view model.

mod client;
mod identity;
mod inspector;

pub use client::*;
pub use identity::*;
pub use inspector::*;

#[cfg(test)]
mod tests;
