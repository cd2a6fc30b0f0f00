//! Chart side of the time log: projection of fetched records into a bar
//! chart model, the HTTP loader that feeds it, and a PNG renderer.

pub mod loader;
pub mod model;
pub mod render;
