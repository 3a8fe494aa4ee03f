//! Clipboard for copying and pasting map objects.
//!
//! Copies keep every record field of an object (category, name, texture,
//! label, parameters and transform) but none of its selection state. Pasted
//! copies land at the positions of their originals.
//!
//! ## Module Structure
//!
//! - [`types`] - the [`Clipboard`] resource
//! - [`copy`] - Copy system (Ctrl+C)
//! - [`paste`] - Paste system (Ctrl+V)

mod copy;
mod paste;
mod types;

// Re-exports - Types
pub use types::Clipboard;

// Re-exports - Systems
pub use copy::handle_copy;
pub use paste::handle_paste;
