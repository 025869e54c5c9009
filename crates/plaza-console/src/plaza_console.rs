//! Plaza Console - ad-hoc SQL execution against the remote database
//!
//! Forwards free-form statements verbatim to the provider's generic
//! `exec_sql` procedure, decodes whatever polymorphic payload comes back
//! into a tagged outcome, and synthesizes a human-readable summary. Errors
//! are classified by message substring into advisory remediation text;
//! classification never changes behavior. Destructive statements are
//! flagged before execution but never blocked.

mod classify;
mod executor;
mod history;
mod outcome;
mod safety;

pub use classify::*;
pub use executor::*;
pub use history::*;
pub use outcome::*;
pub use safety::*;

#[cfg(test)]
mod tests;
