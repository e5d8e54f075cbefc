//! Megaverse transport client
//!
//! HTTP access to the megaverse service with rate-limit aware retries.
//!
//! # Core Concepts
//!
//! - [`MegaverseApi`]: the client; one instance per candidate identity
//! - [`RetryPolicy`]: exponential backoff schedule applied to 429 responses
//! - [`GoalMap`]: the fetched 2D goal layout
//! - [`ApiError`]: transport error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use megaverse_api::MegaverseApi;
//!
//! let api = MegaverseApi::new("https://challenge.crossmint.io/api", candidate_id)?;
//! let goal = api.fetch_goal_map().await?;
//! api.create_polyanet(2, 2).await?;
//! ```

// Core modules
mod client;
mod error;
mod retry;
mod types;

// Re-exports
pub use client::MegaverseApi;
pub use error::ApiError;
pub use retry::RetryPolicy;
pub use types::{ComethRequest, GoalMap, GoalMapResponse, PolyanetRequest, SoloonRequest};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
