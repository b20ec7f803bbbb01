//! General helper utilities shared by the decomposition kernel.

#![forbid(unsafe_code)]

pub mod hashing;
pub mod sequences;

pub use hashing::stable_hash_sequence;
pub use sequences::{reversed_min_first, rotate_min_first, rotated_min_first, unique_sorted};
