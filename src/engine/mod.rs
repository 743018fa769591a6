//! Context package assembly and formatting engine.
//!
//! Everything in this module is a pure, synchronous function over in-memory
//! values: no I/O, no logging, no shared mutable state. Callers inject `now`
//! wherever wall-clock time matters so output is reproducible.
//!
//! - `summarize` - character budgets for free text
//! - `labels` - code to label tables and quality bands
//! - `time` - timestamp parsing and relative times
//! - `rank` - grouping, filtering and capping
//! - `sections` - one formatter per document section
//! - `assembler` - fixed-order assembly of the whole document
//! - `queries` - search query derivation
//! - `search_results` - rendering of retrieved external results

pub mod assembler;
pub mod labels;
pub mod queries;
pub mod rank;
pub mod search_results;
pub mod sections;
pub mod summarize;
pub mod time;

pub use assembler::{assemble, render_section, Section};
pub use labels::{translate, QualityBand};
pub use queries::{code_query, derive_queries, library_search_terms, web_query};
pub use rank::{cap_list, filter_and_cap_history, group_by};
pub use search_results::format_search_results;
pub use summarize::summarize;
pub use time::{parse_timestamp, relative_time};
