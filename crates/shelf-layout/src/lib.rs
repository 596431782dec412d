#![forbid(unsafe_code)]

//! Card-grid layout planning for the brickshelf collection tracker.
//!
//! # Role in brickshelf
//! The catalog page shows every theme as a card in a responsive two-column
//! grid. `shelf-layout` decides which cards span the full row and which
//! share it, then turns those decisions into card rectangles.
//!
//! # Primary responsibilities
//! - **LayoutPlanner**: pure full/half width planning over an ordered theme
//!   list ([`planner`]).
//! - **PlanCache**: optional memo keyed on item counts and threshold
//!   ([`cache`]).
//! - **CardGrid**: viewport-aware placement with an opaque per-card render
//!   callback ([`grid`], [`responsive`]).
//! - **PlannerConfig**: TOML/JSON configuration ([`config`]).

pub mod cache;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod planner;
pub mod responsive;

pub use cache::{PlanCache, PlanCacheStats, PlanKey};
pub use config::{ConfigError, PlannerConfig};
pub use error::{PlanError, Result};
pub use geometry::{Rect, Sides};
pub use grid::{CardGrid, GridArrangement, GridConfig};
pub use planner::{
    FULL_WIDTH_THRESHOLD, LayoutDecision, LayoutPlanner, PlacementRule, PlannedTheme,
    ThemeDescriptor, classify_intrinsic, plan, resolve_at, resolve_positions,
};
pub use responsive::{DEFAULT_WIDE_MIN_WIDTH, Viewport};
