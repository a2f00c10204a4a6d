//! Browser client for placing named points on a set of images.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It shows one
//! image at a time scaled to fit the canvas, draws every measured point of that
//! image as a labelled pin, and lets the user place the currently selected
//! point with a click. The server pushes full snapshots over an event stream;
//! each one replaces the local store wholesale.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`app`] | Browser entry point and DOM event wiring |
//! | [`store`] | In-memory measurements keyed by image and point |
//! | [`transform`] | Normalized, image and display coordinate conversions |
//! | [`image`] | Background image load lifecycle |
//! | [`input`] | Selection state and pointer events |
//! | [`sync`] | Decoding server snapshots and choosing what to display |
//! | [`render`] | Scene rendering against the [`render::Surface`] trait |
//! | [`surface`] | 2D canvas implementation of [`render::Surface`] |
//! | [`viewport`] | Fitting the canvas to the window |
//! | [`consts`] | Shared drawing constants and element ids |

pub mod app;
pub mod consts;
pub mod engine;
pub mod image;
pub mod input;
pub mod render;
pub mod store;
pub mod surface;
pub mod sync;
pub mod transform;
pub mod viewport;
