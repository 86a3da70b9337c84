mod callbacks;
mod component;

pub use callbacks::Callbacks;
pub use component::Component;
