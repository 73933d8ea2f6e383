mod command;
mod error;
mod segment_tree;

pub use command::{Command, IntTransform, TextTransform, Transform};
pub use error::{Result, SegtreeError};
pub use segment_tree::{Node, SegmentTree};
