mod keyboard;
pub mod keys;
mod pointer;

pub use keyboard::wire_keydown;
pub use pointer::{wire_pointer, wire_resize};
