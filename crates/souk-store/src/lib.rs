//! Persistence contracts and the in-process reference backend for Souk.
//!
//! The checkout engine never talks to a concrete database; it is handed
//! `Arc<dyn ProductCatalog>` / `Arc<dyn OrderStore>` handles at
//! construction time. That keeps the engine testable with substitute
//! stores and keeps connection ownership explicit: a backend handle is
//! opened once per process and cloned per request, never re-acquired
//! behind the engine's back.
//!
//! # Example
//!
//! ```rust
//! use souk_store::memory::MemoryOrderStore;
//!
//! // one handle per process, cheap clones per request
//! let orders = MemoryOrderStore::open();
//! let per_request = orders.clone();
//! ```

pub mod error;
pub mod memory;
pub mod traits;

pub use error::StoreError;
pub use traits::{OrderQuery, OrderStore, ProductCatalog, SellerDirectory};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::StoreError;
    pub use crate::memory::{MemoryCatalog, MemoryOrderStore, MemorySellerDirectory};
    pub use crate::traits::{OrderQuery, OrderStore, ProductCatalog, SellerDirectory};
}
