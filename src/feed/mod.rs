pub mod source;

pub use source::{FeedError, FeedSource, FileSource, HttpSource, open_source, resolve_url};
