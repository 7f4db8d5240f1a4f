//! Space Invaders for the terminal.
//!
//! Core modules:
//! - `entities`: projectiles, the shared `Shooter` capability, player/enemy
//! - `compute`: per-frame game-loop logic (RNG injected)
//! - `collision`: pixel-mask overlap between sprites
//! - `sprite`: glyph sprites and masks
//! - `assets`: loading the named sprite files at startup
//! - `input`: held-key snapshots from terminal key events
//! - `display`: crossterm renderer
//! - `config`: settings

pub mod assets;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod input;
pub mod sprite;

pub use assets::{AssetError, Assets};
pub use config::{ConfigError, Settings};
