//! Terminal UI for llama.
//!
//! - [render]: the per-frame entry point and screen layout
//! - [panes]: the entry grid and the preview pane
//! - [widgets]: location bar and warning boxes

pub mod panes;
pub mod render;
pub mod widgets;

pub use render::render;
