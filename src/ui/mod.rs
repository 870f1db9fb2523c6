//! User interface layer: scene computation targets and terminal rendering.
//!
//! The store is turned into a [`MapScene`] (the description a mapping
//! library would be handed) and, for the terminal host, into ANSI-styled
//! text through composable components.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → MapScene → render_to_string → ANSI text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Scene types representing renderable map state
//! - [`cluster`]: Grid clustering of point features
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, layout)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod cluster;
pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{MapContent, MapScene, OverlayView, RouteView, SearchBoxView};
