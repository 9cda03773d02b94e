//! # Quad Map
//!
//! A fixed-capacity hash table mapping string keys to `i32` values, using
//! open addressing with quadratic probing.
//!
//! The probe sequence for attempt `i` is `(base + c*i + d*i*i) mod capacity`,
//! where `c` and `d` are table-wide parameters that can be swapped at runtime
//! (triggering a rehash). Capacity is fixed at construction and only changes
//! through an explicit [`QuadMap::resize`] call; there is no automatic
//! load-factor-driven growth, and a full probe sequence reports
//! [`QuadMapError::CapacityExhausted`] instead of looping.
//!
//! ## Basic Usage
//!
//! ```rust
//! use quadmap::QuadMap;
//!
//! // Create a table with the default 100 slots
//! let mut table = QuadMap::new();
//!
//! // Insert values
//! table.insert("apple".to_string(), 5).unwrap();
//! table.insert("banana".to_string(), 10).unwrap();
//!
//! // Look values up
//! assert!(table.contains("apple"));
//! assert_eq!(table.get("banana"), Some(&10));
//!
//! // Update in place through the get-or-create handle
//! *table.get_or_insert("apple") = 7;
//! assert_eq!(table.get("apple"), Some(&7));
//!
//! // Remove values
//! table.remove("banana");
//! assert!(!table.contains("banana"));
//! ```
//!
//! ## Probe parameters and capacity
//!
//! ```rust
//! use quadmap::QuadMap;
//!
//! let mut table = QuadMap::with_capacity(50).unwrap();
//! table.insert("alpha".to_string(), 1).unwrap();
//! table.insert("beta".to_string(), 2).unwrap();
//!
//! // Swapping the probe parameters rebuilds the table in place
//! table.change_hash_function(2, 3);
//! assert_eq!(table.probe_params(), (2, 3));
//! assert!(table.contains("alpha"));
//!
//! // Capacity only moves when asked; zero is rejected
//! table.resize(80).unwrap();
//! assert_eq!(table.capacity(), 80);
//! assert!(table.resize(0).is_err());
//! ```
//!
//! ## Caveats carried over from the original table
//!
//! This is a faithful rework of a classic teaching implementation, and three
//! of its sharp edges are kept on purpose (each is documented on the method
//! and pinned by a regression test):
//!
//! - [`QuadMap::insert`] probes for an empty slot, never for the key, so
//!   re-inserting a live key stores a shadow duplicate.
//! - [`QuadMap::remove`] leaves no tombstone; a key whose probe sequence
//!   passed through the vacated slot can become unreachable.
//! - [`QuadMap::get_or_insert`] places absent keys at their attempt-0 slot
//!   without probing, chaining onto any entry already there.

/// Module implementing the error types for table operations
mod error;
/// Module implementing the fixed-capacity quadratic probing table
mod quad_map;
/// Utility functions and traits for the table
mod utils;

pub use error::QuadMapError;
pub use quad_map::{Entry, QuadMap, SlotIter};
pub use utils::{QuadMapExtensions, from_pairs};
