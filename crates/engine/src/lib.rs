//! Incremental filtered/sorted result-set engine for the place catalogue.
//!
//! This crate provides:
//! - Tag and TagState for boolean attribute filtering
//! - Query, the immutable input bundle for one filtering pass
//! - OrderingStrategy, the total orders applied to results
//! - The composite predicate (text, tags, distance)
//! - SortedResultSet, which maintains the ordered view and emits minimal
//!   insert/remove/move/change batches between successive snapshots
//!
//! ## Architecture
//! Each user interaction produces a new Query; the caller hands the engine a
//! fresh candidate snapshot together with that Query:
//! 1. The predicate filters the candidates
//! 2. The ordering strategy sorts the survivors
//! 3. The result set diffs the new view against the previous one
//! 4. The diff batch, ordered view, and count go back to the caller
//!
//! The engine is synchronous and single-threaded: `apply` runs to completion,
//! holds no locks, and never mutates caller-owned data. Debouncing rapid
//! successive calls is the caller's responsibility.
//!
//! ## Example Usage
//! ```ignore
//! use engine::{OrderingStrategy, Query, SortedResultSet, Tag, TagState};
//!
//! let mut results = SortedResultSet::new();
//!
//! let query = Query::new(OrderingStrategy::Alphabetic)
//!     .with_text("abbey")
//!     .with_max_distance(5_000.0)
//!     .with_tags(TagState::new().with_tag(Tag::FreeEntry, true));
//!
//! let batch = results.apply(&places, &query);
//! println!("{} results, {} ops", results.size(), batch.len());
//! ```

pub mod ordering;
pub mod predicate;
pub mod query;
pub mod result_set;
pub mod tags;

// Re-export main types
pub use ordering::OrderingStrategy;
pub use query::Query;
pub use result_set::{DiffBatch, DiffOp, SortedResultSet};
pub use tags::{Tag, TagState};
