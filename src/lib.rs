// Public library interface for report-treemap.
// The binaries in src/main.rs and src/bin/ drive the same pipeline.

pub mod config;
pub mod error;
pub mod generator;
pub mod layout;
pub mod report;
pub mod request;
pub mod tree;

pub use config::{GeneratorConfig, TreemapConfig};
pub use error::{Error, Result};
pub use generator::{Generator, GeneratorPhase};
pub use report::types::{ReportRow, RowKind};
pub use report::{ReportInput, ReportTable};
pub use request::TreemapRequest;
pub use tree::label::LabelFormatter;
pub use tree::node::{NodeData, TreeNode};
