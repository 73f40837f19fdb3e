//! Catalog source implementations for fetching Go releases

pub mod dom;
pub mod html_index;
pub mod json_feed;

pub use html_index::HtmlIndexSource;
pub use json_feed::JsonFeedSource;
