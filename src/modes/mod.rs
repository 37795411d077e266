pub mod human;
pub mod lifecycle;

pub use human::HumanMode;
pub use lifecycle::{GameEvent, Lifecycle, Phase};
