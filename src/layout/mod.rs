//! Area-driven truncation: how many report rows get a legible treemap node.
//!
//! No geometry is computed here; the client lays the kept rows out.

pub mod truncate;

pub use truncate::{
    truncate_after, AvailableSpace, RowAreaTruncator, Truncated,
    DEFAULT_MAX_ELEMENTS, MIN_NODE_AREA,
};
