pub mod reader;
pub mod schema;

pub use reader::ReportReader;
pub use schema::{DependencyReport, UpdateCandidate};
