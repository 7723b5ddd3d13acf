//! WASM bindings for cadence-playback
//!
//! Exposes the session manager to browsers, persisting to
//! `window.localStorage`.

pub mod manager;

pub use manager::WasmSessionManager;
