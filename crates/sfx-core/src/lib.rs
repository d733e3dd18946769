//! Suffix Frequency Core Library
//!
//! Counts how often every domain suffix occurs in a list of domains and
//! reports the suffixes that reach a threshold.
//!
//! # Architecture
//!
//! Each input line is trimmed, lower-cased and split on `.`. Its labels are
//! inserted top-level label first into a suffix trie, incrementing every node
//! on the way, so a node's count is the number of lines ending in that
//! suffix. Once input is exhausted the trie is walked and every node at or
//! above the threshold is emitted in conventional domain order.
//!
//! # Modules
//!
//! - `labels`: line trimming, case folding and label splitting
//! - `trie`: label-reversed suffix trie with occurrence counts
//! - `aggregator`: line ingestion, owns the trie
//! - `report`: threshold traversal and report output
//! - `error`: shared error type
//!
//! # Example
//!
//! ```
//! use sfx_core::{Aggregator, SortOrder};
//!
//! let mut agg = Aggregator::new();
//! for line in ["a.b.c", "x.b.c", "y.b.c"] {
//!     agg.ingest_line(line.as_bytes());
//! }
//!
//! let names: Vec<String> = agg
//!     .report(2, SortOrder::Lexical)
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! assert_eq!(names, ["b.c", "c"]);
//! ```

pub mod aggregator;
pub mod error;
pub mod labels;
pub mod report;
pub mod trie;

// Re-export commonly used types
pub use aggregator::{Aggregator, IngestStats};
pub use error::{Result, SfxError};
pub use labels::{normalize_line, reversed_labels, split_labels};
pub use report::{
    collect_suffixes, qualifying, write_report, OutputFormat, ReportOptions, SortOrder, Suffix,
    DEFAULT_THRESHOLD,
};
pub use trie::{SuffixTrie, TrieNode};
