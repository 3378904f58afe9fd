pub mod builder;
pub mod loader;

pub use builder::{build, build_edges, build_nodes, GraphStats};
pub use loader::{load_videos, parse_videos, LoadError};
