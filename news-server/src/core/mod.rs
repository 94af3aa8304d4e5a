pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use error::NewsError;
pub use service::NewsService;
pub use store::NewsStore;
pub use types::{News, NewsCreate, NewsUpdate, Page, PageParams};
