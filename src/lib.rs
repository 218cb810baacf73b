#[macro_use]
extern crate log;

pub mod color;
pub mod film;
pub mod geometry;
pub mod math;
pub mod parallel;
pub mod parsing;
pub mod pipeline;
pub mod prelude;
pub mod renderer;
pub mod scene;
