// Adapters layer: concrete implementations of the domain ports.

pub mod files;
pub mod http;
pub mod page;
pub mod store;

pub use files::FileSource;
pub use http::HttpSource;
pub use page::InMemoryPage;
pub use store::{FileStore, MemoryStore};
