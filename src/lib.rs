//! Earth Defense library
//!
//! An arcade game in which the player orbits the Earth and shoots down the
//! asteroids and alien ships converging on it from the edges of the screen.
//! The binary wires these modules into a windowed Bevy app; tests drive them
//! headlessly.

pub mod audio;
pub mod config;
pub mod constants;
pub mod earth;
pub mod enemy;
pub mod error;
pub mod graphics;
pub mod menu;
pub mod player;
pub mod rendering;
pub mod session;
pub mod viewport;
