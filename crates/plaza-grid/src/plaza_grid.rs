//! Plaza Grid - paginated, sortable, editable table views
//!
//! The grid controller owns pagination, sort, and search state for one
//! selected table and re-issues a server-side paginated fetch on every
//! state change. Responses are sequence-stamped so a slow, stale response
//! can never clobber the state a newer request produced. The record editor
//! issues insert/update/delete keyed by the discovered row identity and
//! communicates with the grid only through a re-fetch signal.

mod controller;
mod display;
mod editor;
mod signal;
mod state;

pub use controller::*;
pub use display::*;
pub use editor::*;
pub use signal::*;
pub use state::*;

#[cfg(test)]
mod tests;
