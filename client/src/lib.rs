mod app;
mod dom;
mod logging;
mod render;
mod state;

pub use app::{run, Lasso};
pub use dom::ElementItem;
pub use render::SvgSurface;
