//! Plaza RPC - the generic remote-procedure client
//!
//! Everything the console does goes through one seam: `RpcClient::invoke`
//! with a procedure name and a JSON argument object, returning either the
//! success payload or an error carrying nothing but a message string. The
//! HTTP implementation talks to the hosted provider; `test_support` holds an
//! in-memory implementation the other crates test against.

mod client;
mod config;
mod http;
pub mod procedures;
pub mod test_support;

pub use client::*;
pub use config::*;
pub use http::*;
