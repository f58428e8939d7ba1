use std::path::PathBuf;

use glam::Vec2;

/// Environment variable that overrides the asset directory.
pub const ASSETS_ENV: &str = "CAVEPET_ASSETS";
/// Asset directory used when the override is unset.
const DEFAULT_ASSET_DIR: &str = "assets";

/// Window title.
pub const WINDOW_TITLE: &str = "Cave";
/// Initial inner window size (pixels).
pub const WINDOW_SIZE: (u32, u32) = (1920, 1080);

/// Animation tick (seconds). Also drives the transition stepper.
pub const FRAME_INTERVAL: f64 = 0.100;
/// Hunger decrement tick (seconds).
pub const HUNGER_INTERVAL: f64 = 0.050;

/// Number of frames in the bear animation.
pub const FRAME_COUNT: usize = 11;
/// Integer scale applied to animation frames when drawn.
pub const FRAME_SCALE: f32 = 10.0;
/// Pixels moved per transition tick.
pub const TRANSITION_STEP: i32 = 4;
/// Starting (and maximum) hunger value.
pub const HUNGER_MAX: u32 = 100;

/// Static apple icon bounds.
pub const ICON_ORIGIN: Vec2 = Vec2::new(50.0, 600.0);
pub const ICON_SIZE: Vec2 = Vec2::new(100.0, 100.0);
/// Every dragged copy is drawn (and hit-tested) at this footprint.
pub const DRAGGABLE_SIZE: Vec2 = Vec2::new(100.0, 100.0);
/// Background is stretched to this canvas regardless of window size.
pub const CANVAS_SIZE: Vec2 = Vec2::new(1920.0, 1080.0);

/// Hunger bar bounds (egui points).
pub const HUNGER_BAR_POS: [f32; 2] = [10.0, 10.0];
pub const HUNGER_BAR_SIZE: [f32; 2] = [200.0, 30.0];

/// Tunables for a scene. Defaults match the shipped toy.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub frame_count: usize,
    pub frame_interval: f64,
    pub hunger_interval: f64,
    pub hunger_max: u32,
    pub transition_step: i32,
    pub frame_scale: f32,
    pub canvas_size: Vec2,
    pub icon_origin: Vec2,
    pub icon_size: Vec2,
    pub draggable_size: Vec2,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            frame_count: FRAME_COUNT,
            frame_interval: FRAME_INTERVAL,
            hunger_interval: HUNGER_INTERVAL,
            hunger_max: HUNGER_MAX,
            transition_step: TRANSITION_STEP,
            frame_scale: FRAME_SCALE,
            canvas_size: CANVAS_SIZE,
            icon_origin: ICON_ORIGIN,
            icon_size: ICON_SIZE,
            draggable_size: DRAGGABLE_SIZE,
        }
    }
}

/// Resolve the asset directory from `CAVEPET_ASSETS`, falling back to `assets/`.
pub fn asset_dir() -> PathBuf {
    resolve_asset_dir(std::env::var_os(ASSETS_ENV).map(PathBuf::from))
}

fn resolve_asset_dir(from_env: Option<PathBuf>) -> PathBuf {
    match from_env {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => PathBuf::from(DEFAULT_ASSET_DIR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_dir_prefers_override() {
        let dir = resolve_asset_dir(Some(PathBuf::from("/tmp/cave")));
        assert_eq!(dir, PathBuf::from("/tmp/cave"));
    }

    #[test]
    fn empty_override_falls_back_to_default() {
        assert_eq!(resolve_asset_dir(Some(PathBuf::new())), PathBuf::from("assets"));
        assert_eq!(resolve_asset_dir(None), PathBuf::from("assets"));
    }
}
