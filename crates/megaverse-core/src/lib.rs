//! Megaverse goal-map translation and orchestration
//!
//! Turns a fetched [`GoalMap`](megaverse_api::GoalMap) into an ordered list
//! of creation commands and replays them sequentially through the transport
//! client.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use megaverse_api::MegaverseApi;
//! use megaverse_core::{parse_goal_map, Megaverse};
//!
//! let api = MegaverseApi::new(base_url, candidate_id)?;
//! let goal = api.fetch_goal_map().await?;
//! let commands = parse_goal_map(&goal);
//! Megaverse::new(api).create(&commands).await?;
//! ```

// Core modules
pub mod builder;
pub mod map;

// Re-exports
pub use builder::{Megaverse, ObjectCreator};
pub use map::{parse_goal_map, AstralObject, Command};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
