//! Trace and fixture rendering

mod dot;
mod fixture;

pub use dot::{render_dot, try_render_png};
pub use fixture::render_fixture_dot;
