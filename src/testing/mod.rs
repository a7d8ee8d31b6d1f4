//! Test doubles for exercising the engine without a real renderer.

pub mod canvas;

pub use canvas::{DrawOp, RecordingCanvas};
