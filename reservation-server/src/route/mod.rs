//! Route resolution and segment overlap.
//!
//! This module answers two questions for a train run:
//! - which stations it calls at, in travel order ([`resolve_route`])
//! - whether a requested segment collides with an existing reservation
//!   ([`segments_overlap`])
//!
//! Everything here is pure and synchronous; callers supply the data.

mod overlap;
mod resolve;

pub use overlap::{is_occupied, segments_overlap};
pub use resolve::{RouteError, resolve_route, serves_segment};
