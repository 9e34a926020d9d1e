pub mod cli;
pub mod display;

pub use cli::{Config, read_source_file};
pub use display::{format_allocation, format_graph, format_liveness};
