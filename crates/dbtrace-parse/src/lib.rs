//! Turns raw log text into typed values: the anchored line layout into
//! [`dbtrace_types::LogRecord`]s, and record messages into
//! [`dbtrace_types::QueryEvent`]s.
//!
//! Parsing is line-oriented and stateful only where the format demands it:
//! [`LineParser`] buffers exactly one record so continuation lines (stack
//! traces, pretty-printed SQL) can be folded into the entry they belong to.

pub mod extract;
pub mod line;
pub mod normalize;

pub use extract::{extract_query, record_signals_error};
pub use line::{ContinuationPolicy, LineParser, parse_line};
pub use normalize::normalize_statement;
