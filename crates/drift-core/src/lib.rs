pub mod color;
pub mod config;
pub mod connections;
pub mod constants;
pub mod effects;
pub mod engine;
pub mod error;
pub mod node;
pub mod surface;
pub mod transition;
pub mod viewport;

pub use color::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use node::*;
pub use surface::*;
pub use transition::*;
pub use viewport::*;
