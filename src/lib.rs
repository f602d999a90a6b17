//! Storefront Relay
//!
//! Realtime plumbing and client state for a multi-vendor storefront.
//!
//! # Features
//!
//! - **Broadcast relay**: WebSocket endpoint that re-broadcasts every
//!   `message` event to all connected clients, sender included
//! - **Origin allow-list**: CORS and upgrade checks against a fixed list
//! - **Client store**: user, seller, products, events, favorites and cart
//!   slices with pure reducers and tagged actions
//! - **Durable lists**: favorites and cart written through to storage
//!
//! # Modules
//!
//! - `api`: HTTP router and WebSocket relay
//! - `config`: Environment-driven relay configuration
//! - `error`: Error types
//! - `storage`: Durable key-value storage backends
//! - `store`: Client state slices and the dispatching store
//! - `types`: Storefront records (products, users, ...)
//!
//! # Example
//!
//! ```no_run
//! use storefront_relay::{api, RelayConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = RelayConfig::from_env().unwrap();
//!     api::serve(config).await.unwrap();
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod storage;
pub mod store;
pub mod types;

// Re-export commonly used items at crate root
pub use api::websocket::{ClientEvent, ConnectionRegistry, RelayState, ServerFrame};
pub use config::RelayConfig;
pub use error::{RelayError, RelayResult, StorageError, StorageResult};
pub use storage::{DurableStorage, FileStorage, MemoryStorage};
pub use store::{Action, AppState, Store};
pub use types::{CartItem, Product, Seller, ShopEvent, User};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
