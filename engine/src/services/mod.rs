// Run orchestration and document output
pub mod pipeline;
pub mod render;

pub use pipeline::{run, RunOptions, RunSummary};
pub use render::{DocumentKind, DocumentRenderer, JsonContextRenderer};
