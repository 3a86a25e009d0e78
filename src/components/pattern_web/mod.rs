//! Circular node-link view of a pattern graph, drawn on a canvas.

mod component;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod path;
mod render;
pub mod state;
pub mod types;

pub use component::PatternWeb;
pub use error::CanvasError;
pub use interaction::{InteractionState, NodeClicked};
pub use layout::compute_layout;
pub use path::{ArrowPlacement, EdgePath, build_edge_path};
pub use state::{EdgeRenderSpec, HitTarget, PatternWebState};
pub use types::{EdgeKey, EdgeStyle, Pattern, PatternWebOptions, Point};
