use glam::Vec2;

use crate::assets::SpriteKey;
use crate::config::SceneConfig;
use crate::ecs::systems::drag::{self, DragState, PressOutcome};
use crate::hunger::Hunger;
use crate::sprite::{FrameAnimation, Transition};
use crate::util::Ticker;

/// One textured quad to draw, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub key: SpriteKey,
    pub origin: Vec2,
    pub size: Vec2,
    /// Mirror horizontally in place.
    pub flip: bool,
}

/// The whole toy: animated bear, apple icon, dragged apples, hunger meter.
pub struct Scene {
    config: SceneConfig,
    world: hecs::World,
    drag: DragState,

    animation: FrameAnimation,
    transition: Transition,
    hunger: Hunger,

    frame_timer: Ticker,
    transition_timer: Ticker,
    hunger_timer: Ticker,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let hunger = Hunger::new(config.hunger_max);
        let mut hunger_timer = Ticker::stopped(config.hunger_interval);
        if hunger.is_running() {
            hunger_timer.start();
        }

        Self {
            world: hecs::World::new(),
            drag: DragState::new(),
            animation: FrameAnimation::new(config.frame_count),
            transition: Transition::new(config.transition_step),
            hunger,
            frame_timer: Ticker::new(config.frame_interval),
            transition_timer: Ticker::stopped(config.frame_interval),
            hunger_timer,
            config,
        }
    }

    /// Advance every running timer by `dt` seconds and apply their ticks.
    pub fn update(&mut self, dt: f64) {
        for _ in 0..self.frame_timer.advance(dt) {
            self.animation.advance();
        }

        for _ in 0..self.transition_timer.advance(dt) {
            if !self.transition.step() {
                self.transition_timer.stop();
                log::debug!("Transition reached x={}", self.transition.offset());
                break;
            }
        }

        for _ in 0..self.hunger_timer.advance(dt) {
            if !self.hunger.tick() {
                self.hunger_timer.stop();
                log::info!("Hunger bar empty");
                break;
            }
        }
    }

    /// Left-button press. A double click additionally starts a transition.
    pub fn press(&mut self, point: Vec2, double: bool) -> PressOutcome {
        let outcome = drag::press(&mut self.world, &mut self.drag, &self.config, point);
        if double {
            self.start_transition(point.x);
        }
        outcome
    }

    /// Cursor moved with the button held.
    pub fn drag_to(&mut self, point: Vec2) -> bool {
        drag::drag_to(&mut self.world, &self.drag, point)
    }

    pub fn release(&mut self) {
        drag::release(&mut self.drag);
    }

    /// Slide the bear so it centres (by icon width) under `cursor_x`.
    /// Replaces any slide in progress.
    pub fn start_transition(&mut self, cursor_x: f32) {
        let half_icon = (self.config.icon_size.x as i32) / 2;
        let target = cursor_x as i32 - half_icon;

        if self.transition.start(target) {
            self.transition_timer.start();
            log::debug!(
                "Transition {} -> {} (mirrored={})",
                self.transition.offset(),
                target,
                self.transition.is_mirrored()
            );
        } else {
            self.transition_timer.stop();
        }
    }

    /// Draw list in paint order: background, bear, icon, dragged copies.
    ///
    /// `size_of` reports the natural size of a loaded image; keys it returns
    /// `None` for are skipped.
    pub fn sprite_draws(
        &self,
        window_h: f32,
        size_of: impl Fn(SpriteKey) -> Option<(u32, u32)>,
    ) -> Vec<SpriteDraw> {
        let mut draws = Vec::with_capacity(3 + self.world.len() as usize);

        if size_of(SpriteKey::Background).is_some() {
            draws.push(SpriteDraw {
                key: SpriteKey::Background,
                origin: Vec2::ZERO,
                size: self.config.canvas_size,
                flip: false,
            });
        }

        let frame_key = SpriteKey::Frame(self.animation.current());
        if let Some((w, h)) = size_of(frame_key) {
            let size = Vec2::new(w as f32, h as f32) * self.config.frame_scale;
            draws.push(SpriteDraw {
                key: frame_key,
                origin: Vec2::new(self.transition.offset() as f32, window_h - size.y),
                size,
                flip: self.transition.is_mirrored(),
            });
        }

        if size_of(SpriteKey::Icon).is_some() {
            draws.push(SpriteDraw {
                key: SpriteKey::Icon,
                origin: self.config.icon_origin,
                size: self.config.icon_size,
                flip: false,
            });
        }

        for copy in drag::draggables(&self.world) {
            if size_of(copy.sprite).is_none() {
                continue;
            }
            draws.push(SpriteDraw {
                key: copy.sprite,
                origin: copy.position,
                size: self.config.draggable_size,
                flip: false,
            });
        }

        draws
    }

    pub fn frame_index(&self) -> usize {
        self.animation.current()
    }

    pub fn frame_count(&self) -> usize {
        self.animation.frame_count()
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    pub fn hunger(&self) -> &Hunger {
        &self.hunger
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.dragged().is_some()
    }

    pub fn draggable_count(&self) -> usize {
        self.world.len() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_loaded(key: SpriteKey) -> Option<(u32, u32)> {
        match key {
            SpriteKey::Background => Some((640, 360)),
            SpriteKey::Frame(_) => Some((16, 12)),
            SpriteKey::Icon => Some((32, 32)),
        }
    }

    #[test]
    fn animation_ticks_every_100ms() {
        let mut scene = Scene::new(SceneConfig::default());
        assert_eq!(scene.frame_index(), 0);

        scene.update(0.25);
        assert_eq!(scene.frame_index(), 2);

        for _ in 0..9 {
            scene.update(0.1);
        }
        assert_eq!(scene.frame_index(), 0);
    }

    #[test]
    fn hunger_drains_every_50ms_and_stops() {
        let mut scene = Scene::new(SceneConfig {
            hunger_max: 4,
            ..SceneConfig::default()
        });
        scene.update(0.1);
        assert_eq!(scene.hunger().value(), 2);
        assert!(scene.hunger().is_running());

        scene.update(0.25);
        assert_eq!(scene.hunger().value(), 0);
        assert!(!scene.hunger().is_running());

        scene.update(1.0);
        assert_eq!(scene.hunger().value(), 0);
    }

    #[test]
    fn double_click_slides_bear_to_cursor() {
        let mut scene = Scene::new(SceneConfig::default());
        // Target = 70 - 50 = 20, five steps of 4.
        scene.press(Vec2::new(70.0, 100.0), true);
        assert!(scene.transition().is_active());
        assert!(!scene.transition().is_mirrored());

        let mut last = scene.transition().offset();
        for _ in 0..5 {
            scene.update(0.1);
            let now = scene.transition().offset();
            assert!(now > last);
            last = now;
        }
        assert_eq!(scene.transition().offset(), 20);
        assert!(!scene.transition().is_active());

        // Back toward the left edge mirrors the bear.
        scene.press(Vec2::new(50.0, 100.0), true);
        assert!(scene.transition().is_mirrored());
        scene.update(0.25);
        assert_eq!(scene.transition().offset(), 12);
        // Half an interval carried over from the first update.
        scene.update(0.25);
        assert_eq!(scene.transition().offset(), 0);
        assert!(scene.transition().is_mirrored());
    }

    #[test]
    fn single_press_does_not_start_transition() {
        let mut scene = Scene::new(SceneConfig::default());
        scene.press(Vec2::new(700.0, 100.0), false);
        scene.update(1.0);
        assert_eq!(scene.transition().offset(), 0);
    }

    #[test]
    fn double_click_on_icon_also_spawns() {
        let mut scene = Scene::new(SceneConfig::default());
        let outcome = scene.press(Vec2::new(100.0, 650.0), true);
        assert!(matches!(outcome, PressOutcome::Spawned(_)));
        assert!(scene.is_dragging());
        assert_eq!(scene.transition().target(), 50);
        scene.release();
        assert!(!scene.is_dragging());
    }

    #[test]
    fn draws_in_fixed_order() {
        let mut scene = Scene::new(SceneConfig::default());
        scene.press(Vec2::new(60.0, 610.0), false);
        scene.drag_to(Vec2::new(310.0, 410.0));
        scene.release();

        let draws = scene.sprite_draws(1080.0, all_loaded);
        let keys: Vec<_> = draws.iter().map(|d| d.key).collect();
        assert_eq!(
            keys,
            vec![
                SpriteKey::Background,
                SpriteKey::Frame(0),
                SpriteKey::Icon,
                SpriteKey::Icon
            ]
        );

        assert_eq!(draws[0].size, Vec2::new(1920.0, 1080.0));
        // Frame scaled x10 and sitting on the bottom edge.
        assert_eq!(draws[1].size, Vec2::new(160.0, 120.0));
        assert_eq!(draws[1].origin, Vec2::new(0.0, 960.0));
        assert_eq!(draws[2].origin, Vec2::new(50.0, 600.0));
        assert_eq!(draws[3].origin, Vec2::new(300.0, 400.0));
        assert_eq!(draws[3].size, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn missing_images_are_skipped() {
        let mut scene = Scene::new(SceneConfig::default());
        scene.press(Vec2::new(60.0, 610.0), false);

        let only_background = |key: SpriteKey| match key {
            SpriteKey::Background => Some((1, 1)),
            _ => None,
        };
        let draws = scene.sprite_draws(720.0, only_background);
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].key, SpriteKey::Background);
    }

    #[test]
    fn mirrored_frame_is_flagged() {
        let mut scene = Scene::new(SceneConfig::default());
        scene.start_transition(0.0);
        scene.update(0.1);

        let draws = scene.sprite_draws(1080.0, all_loaded);
        let frame = draws
            .iter()
            .find(|d| matches!(d.key, SpriteKey::Frame(_)))
            .unwrap();
        assert!(frame.flip);
        assert_eq!(frame.origin.x, -4.0);
    }
}
