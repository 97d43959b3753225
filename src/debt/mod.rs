//! Smell detection rules applied to collected function records.

pub mod smells;

pub use smells::analyze_function_smells;
