//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the host loop (main.rs and
//! [`MapSession`](crate::session::MapSession)) and the domain, data and
//! worker layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → Dispatches → Store → Actions → Side Effects
//!                           ↑                                            ↓
//!                           └──────────── Worker Responses ──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`route`]: Route patterns and path matching
//! - [`search`]: Search box input semantics
//! - [`state`]: Central application state container and view model computation
//! - [`store`]: Named dispatches and the reducer applying them
//!
//! # Example
//!
//! ```rust
//! use aemap::app::{handle_event, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (_render, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), aemap::domain::MapError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod route;
pub mod search;
pub mod state;
pub mod store;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use route::{MapMode, RouteMatch, RouteTable};
pub use state::AppState;
pub use store::{reduce, Dispatch};
