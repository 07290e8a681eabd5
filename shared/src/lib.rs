//! Freehand lasso selection over a set of host items.
//!
//! The host delivers drag samples, the lasso classifies every item against the
//! traced loop and reports which ones are possible and which end up selected.

pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod hooks;
pub mod registry;
pub mod render;

pub use config::{LassoConfig, DEFAULT_CLOSE_PATH_DISTANCE};
pub use error::{LassoError, Result};
pub use geometry::{classify, enclosing, Classification, Point, ScreenRect, ViewTransform};
pub use gesture::{GesturePhase, Lasso, PointerKind, PointerSample};
pub use hooks::{Hook, Hooks, LassoEvent};
pub use registry::{ItemGeometry, ItemId, ItemRegistry, ItemState};
pub use render::{LassoSurface, NullSurface, PathData, RecordingSurface, ORIGIN_RADIUS};
