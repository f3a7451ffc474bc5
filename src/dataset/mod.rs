//! In-memory tabular data loaded from delimited text files

pub mod frame;
pub mod label;

pub use frame::Frame;
pub use label::ClassLabel;
