// extensions/mod.rs
//
// Optional animation helpers. Decoupled from the staging core; games opt in
// by owning a TweenState.

pub mod easing;
pub mod tween;

pub use easing::{Easing, ease};
pub use tween::{TweenState, Tween, TweenId, TweenTarget};
