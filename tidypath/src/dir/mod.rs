//! Directories: listing, walking, creating and removing trees.

pub mod iterator;
mod tree;

pub use iterator::DirIterator;
