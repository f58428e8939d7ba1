pub mod animation;
pub mod transition;

pub use animation::FrameAnimation;
pub use transition::Transition;
