use crate::core::time::Delay;
use crate::input::queue::{InputEvent, InputQueue};

/// Observable phase of a scene instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Title,
    /// Clicked; waiting out the transition delay.
    Transitioning,
    Play,
}

impl Phase {
    /// Stable index reported to the host.
    pub fn index(self) -> u32 {
        match self {
            Phase::Title => 0,
            Phase::Transitioning => 1,
            Phase::Play => 2,
        }
    }
}

/// Which of the heavy sub-scenes should be mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountedScene {
    Title,
    Table,
}

/// One-shot lifecycle: Title → (click) → Transitioning → (delay) → Play.
/// There is no way back; a new scene instance starts a new lifecycle.
pub struct SceneDirector {
    phase: Phase,
    transition_delay: f32,
    transition: Option<Delay>,
}

impl SceneDirector {
    pub fn new(transition_delay: f32) -> Self {
        Self {
            phase: Phase::Title,
            transition_delay,
            transition: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mounted(&self) -> MountedScene {
        match self.phase {
            Phase::Title | Phase::Transitioning => MountedScene::Title,
            Phase::Play => MountedScene::Table,
        }
    }

    /// Register a user click. Only the first click in Title does anything;
    /// returns whether this click started the transition.
    pub fn on_click(&mut self) -> bool {
        if self.phase != Phase::Title {
            return false;
        }
        self.phase = Phase::Transitioning;
        self.transition = Some(Delay::new(self.transition_delay));
        log::info!("Title clicked, entering play in {:.1}s", self.transition_delay);
        true
    }

    /// Treat every pointer press in the queue as a click.
    pub fn handle_input(&mut self, input: &InputQueue) -> bool {
        let mut started = false;
        for event in input.iter() {
            if let InputEvent::PointerDown { .. } = event {
                started |= self.on_click();
            }
        }
        started
    }

    /// Advance the transition delay. Returns the new phase on the tick the
    /// director enters Play, `None` otherwise.
    pub fn tick(&mut self, dt: f32) -> Option<Phase> {
        let delay = self.transition.as_mut()?;
        if delay.tick(dt) {
            self.transition = None;
            self.phase = Phase::Play;
            log::info!("Scene director: play");
            return Some(Phase::Play);
        }
        None
    }

    /// Cancel a pending transition. The director stays where it is.
    pub fn teardown(&mut self) {
        if let Some(delay) = self.transition.as_mut() {
            delay.cancel();
        }
        self.transition = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_title() {
        let director = SceneDirector::new(1.3);
        assert_eq!(director.phase(), Phase::Title);
        assert_eq!(director.mounted(), MountedScene::Title);
    }

    #[test]
    fn no_transition_without_click() {
        let mut director = SceneDirector::new(0.5);
        for _ in 0..100 {
            assert_eq!(director.tick(0.1), None);
        }
        assert_eq!(director.phase(), Phase::Title);
    }

    #[test]
    fn click_then_delay_reaches_play_once() {
        let mut director = SceneDirector::new(1.25);
        assert!(director.on_click());
        assert_eq!(director.phase(), Phase::Transitioning);
        assert_eq!(director.mounted(), MountedScene::Title);

        let mut entered_play = 0;
        for step in 0..80 {
            // Keep clicking through the transition.
            if step % 3 == 0 {
                assert!(!director.on_click());
            }
            if director.tick(0.0625) == Some(Phase::Play) {
                entered_play += 1;
                assert_eq!(step, 19, "1.25s at 1/16s steps");
            }
        }
        assert_eq!(entered_play, 1);
        assert_eq!(director.phase(), Phase::Play);
        assert_eq!(director.mounted(), MountedScene::Table);
        assert!(!director.on_click());
    }

    #[test]
    fn pointer_presses_count_as_clicks() {
        let mut director = SceneDirector::new(1.3);
        let input: InputQueue = [
            InputEvent::PointerMove { x: 0.0, y: 0.0 },
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerDown { x: 0.1, y: 0.0 },
        ]
        .into_iter()
        .collect();
        assert!(director.handle_input(&input));
        assert_eq!(director.phase(), Phase::Transitioning);
        assert!(!director.handle_input(&input));
    }

    #[test]
    fn teardown_cancels_pending_transition() {
        let mut director = SceneDirector::new(0.5);
        director.on_click();
        director.teardown();
        for _ in 0..20 {
            assert_eq!(director.tick(0.1), None);
        }
        assert_eq!(director.phase(), Phase::Transitioning);
    }

    #[test]
    fn phase_indices_are_stable() {
        assert_eq!(Phase::Title.index(), 0);
        assert_eq!(Phase::Transitioning.index(), 1);
        assert_eq!(Phase::Play.index(), 2);
    }
}
