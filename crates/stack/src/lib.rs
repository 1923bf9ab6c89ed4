// Chunk: docs/chunks/mru_stack - MRU stack and sheet grouping

//! compass-stack: most-recently-used ordering of editor sheets.
//!
//! This crate tracks open sheets as an ordered stack of [`SheetGroup`]s, one
//! stack per window. A group is the unit the navigator switches between: a
//! single tab, or several sheets that were selected together (split views of
//! one logical document). The front of a stack is the most recently used group.
//!
//! # Overview
//!
//! - [`MruStack`] owns the groups of one window and keeps the invariant that a
//!   sheet appears in at most one group.
//! - [`StackRegistry`] owns one stack per window and materializes snapshots
//!   against live host state through [`SheetSource`].
//! - [`normalize`] turns what the host reports about a sheet into a
//!   [`SheetDescriptor`], failing with [`StaleSheet`] when the sheet is gone.
//!
//! # Example
//!
//! ```
//! use compass_stack::{MruStack, SheetGroup};
//!
//! let mut stack = MruStack::new();
//! stack.promote_to_front(SheetGroup::single(1));
//! stack.promote_to_front(SheetGroup::new([2, 3]).with_focus(3));
//! assert_eq!(stack.groups()[0].sheets(), &[2, 3]);
//!
//! // Promoting a sheet pulls it out of the group that held it.
//! stack.promote_to_front(SheetGroup::single(3));
//! assert_eq!(stack.groups()[0].sheets(), &[3]);
//! assert_eq!(stack.groups()[1].sheets(), &[2]);
//! ```

mod group;
mod registry;
mod sheet;
mod source;
mod stack;
mod types;

pub use group::SheetGroup;
pub use registry::StackRegistry;
pub use sheet::{normalize, resolve, RawSheet, SheetDescriptor, StaleSheet};
pub use source::SheetSource;
pub use stack::MruStack;
pub use types::{ItemKind, PaneId, SheetId, WindowId};
