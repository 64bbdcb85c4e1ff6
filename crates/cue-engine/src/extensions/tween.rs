// extensions/tween.rs
//
// Tweens entity scale and opacity by EntityId.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.add(entity_id, Tween::fade_out(0.8, Easing::QuadOut).with_on_complete(FRAME_GONE));
//   tweens.tick(dt, &mut scene);

use std::collections::HashMap;
use glam::Vec2;
use crate::api::types::EntityId;
use crate::core::scene::Scene;
use super::easing::{Easing, ease};

/// What property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    /// Uniform Entity.scale
    Scale { from: f32, to: f32 },
    /// Entity.opacity
    Opacity { from: f32, to: f32 },
}

/// A single one-shot tween.
#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    /// Duration in seconds.
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
    /// Id reported by `drain_completed` when the tween finishes.
    pub on_complete: Option<u32>,
}

impl Tween {
    fn new(target: TweenTarget, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            duration,
            elapsed: 0.0,
            easing,
            on_complete: None,
        }
    }

    pub fn scale(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Scale { from, to }, duration, easing)
    }

    pub fn opacity(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Opacity { from, to }, duration, easing)
    }

    pub fn fade_out(duration: f32, easing: Easing) -> Self {
        Self::opacity(1.0, 0.0, duration, easing)
    }

    pub fn with_on_complete(mut self, event_id: u32) -> Self {
        self.on_complete = Some(event_id);
        self
    }

    /// Normalized progress in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Unique tween handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(u32);

/// Running tweens keyed by handle.
#[derive(Default)]
pub struct TweenState {
    tweens: HashMap<TweenId, (EntityId, Tween)>,
    next_id: u32,
    completed_events: Vec<u32>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: EntityId, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, (entity, tween));
        id
    }

    /// Drop every tween that targets `entity`.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.tweens.retain(|_, (e, _)| *e != entity);
    }

    /// Advance all tweens and write the values into the scene.
    /// Returns the number of tweens that completed this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let mut completed = Vec::new();

        for (&id, (entity_id, tween)) in self.tweens.iter_mut() {
            tween.elapsed += dt;
            let t = tween.progress();

            if let Some(entity) = scene.get_mut(*entity_id) {
                match tween.target {
                    TweenTarget::Scale { from, to } => {
                        entity.scale = Vec2::splat(ease(from, to, t, tween.easing));
                    }
                    TweenTarget::Opacity { from, to } => {
                        entity.opacity = ease(from, to, t, tween.easing);
                    }
                }
            }

            if tween.is_complete() {
                if let Some(event_id) = tween.on_complete {
                    self.completed_events.push(event_id);
                }
                completed.push(id);
            }
        }

        let count = completed.len();
        for id in completed {
            self.tweens.remove(&id);
        }
        count
    }

    /// Drain the `on_complete` ids of finished tweens.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
        self.completed_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    #[test]
    fn scale_reaches_target() {
        let mut tweens = TweenState::new();
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_scale(Vec2::ZERO));
        tweens.add(id, Tween::scale(0.0, 1.0, 1.0, Easing::Linear));

        tweens.tick(0.5, &mut scene);
        assert!((scene.get(id).unwrap().scale.x - 0.5).abs() < 1e-5);
        assert_eq!(tweens.tick(0.5, &mut scene), 1);
        assert_eq!(scene.get(id).unwrap().scale, Vec2::ONE);
        assert!(tweens.is_empty());
    }

    #[test]
    fn fade_reports_completion_once() {
        let mut tweens = TweenState::new();
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id));
        tweens.add(id, Tween::fade_out(0.25, Easing::QuadOut).with_on_complete(9));

        for _ in 0..4 {
            tweens.tick(0.125, &mut scene);
        }
        assert_eq!(scene.get(id).unwrap().opacity, 0.0);
        assert_eq!(tweens.drain_completed().collect::<Vec<_>>(), vec![9]);
        assert_eq!(tweens.drain_completed().count(), 0);
    }

    #[test]
    fn remove_entity_tweens() {
        let mut tweens = TweenState::new();
        tweens.add(EntityId(1), Tween::fade_out(1.0, Easing::Linear));
        tweens.add(EntityId(1), Tween::scale(1.0, 0.6, 1.0, Easing::Linear));
        tweens.add(EntityId(2), Tween::fade_out(1.0, Easing::Linear));
        tweens.remove_entity(EntityId(1));
        assert_eq!(tweens.len(), 1);
    }

    #[test]
    fn missing_entity_still_completes() {
        let mut tweens = TweenState::new();
        let mut scene = Scene::new();
        tweens.add(EntityId(5), Tween::fade_out(0.1, Easing::Linear).with_on_complete(1));
        assert_eq!(tweens.tick(0.2, &mut scene), 1);
    }
}
