pub mod fixtures;

pub use fixtures::{capture, emit, registry};
