mod search;
mod state;

pub use search::{Predecessor, ShortestPathTree, shortest_path_tree};
