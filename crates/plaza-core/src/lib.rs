//! Plaza Core - shared types for the admin database console
//!
//! This crate provides the types every other Plaza crate depends on:
//!
//! - `CellValue` / `Record` - tagged values and open row maps, since the
//!   column set of a remote table is only known after a structure fetch
//! - Catalog descriptors (`TableDescriptor`, `ColumnDescriptor`,
//!   `IndexDescriptor`, `FunctionDescriptor`)
//! - `PageResult` - one server-side page of rows plus the totals needed to
//!   paginate
//! - `PlazaError` and the crate-wide `Result` alias

mod catalog;
mod error;
mod page;
mod value;

pub use catalog::*;
pub use error::*;
pub use page::*;
pub use value::*;
