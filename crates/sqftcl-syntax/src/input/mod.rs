//! Input readers - classify source code into statement records.

pub mod sqf;

pub use sqf::{SQF_READER, SqfReader, classify, read_sqf, split_statements};
