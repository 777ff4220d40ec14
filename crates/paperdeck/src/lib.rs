//! Paperdeck backend
//!
//! HTTP backend for a thesis-driven research-paper collection manager.
//! Decomposes a thesis into concepts via an external semantic-parsing
//! service, fans literature searches out per concept, batch-uploads selected
//! PDFs to a document-analysis backend, and serves collection CRUD.
//!
//! # Example
//!
//! ```no_run
//! use paperdeck::{config::Config, server::AppServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     AppServer::new(&config)?.run(8080).await
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod store;

pub use client::{AnalysisClient, PdfProxyClient, SearchClient};
pub use config::Config;
pub use error::{ClientError, ServiceError};
