//! Speech recognition infrastructure module

mod noop;

pub use noop::InertRecognizer;
