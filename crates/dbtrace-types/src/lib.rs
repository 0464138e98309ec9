//! Core data model shared by the dbtrace crates: parsed log records and the
//! query events reconstructed from them, including the sentinel values the
//! log layout uses for absent fields.

pub mod level;
pub mod query;
pub mod record;

pub use level::*;
pub use query::*;
pub use record::*;
