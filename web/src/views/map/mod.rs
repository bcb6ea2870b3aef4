pub mod map_renderer;
pub mod map_wrapper;
pub mod projection;
pub mod svg_renderer;

pub use map_wrapper::MapWrapper;
