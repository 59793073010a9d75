//! Model-View-Intent primitives for the storefront's dialogs.
//!
//! ```text
//! key press ──→ Intent ──→ Reducer ──→ State ──→ render
//!                  ↑                               │
//!                  └───────────────────────────────┘
//! ```
//!
//! The store itself is not an MVI state; dialogs that sit on top of it are.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
