//! Serialized catalog records and their conversion into domain types.

pub mod blog_post;
pub mod catalog;
pub mod category;
pub mod product;
