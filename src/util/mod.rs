pub mod graph;
pub mod stats;
