pub mod catalog;
pub mod error;
pub mod source;
pub mod static_source;
