//! Task management HTTP service library.

pub mod config;
pub mod http;
pub mod routing;
pub mod store;
pub mod tasks;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use store::Store;
