use glam::Vec2;

use crate::assets::SpriteKey;
use crate::config::SceneConfig;
use crate::ecs::components::{GrabOffset, Position, SpawnOrder, Sprite};

/// Result of a press on the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Press hit the icon; a fresh copy was spawned and grabbed.
    Spawned(hecs::Entity),
    /// Press hit an existing copy, which is now grabbed.
    Picked(hecs::Entity),
    Missed,
}

/// A draggable copy as seen by the renderer.
#[derive(Debug, Clone, Copy)]
pub struct DraggableView {
    pub position: Vec2,
    pub sprite: SpriteKey,
}

/// Tracks which entity (if any) follows the cursor.
pub struct DragState {
    dragged: Option<hecs::Entity>,
    next_order: u64,
}

impl DragState {
    pub fn new() -> Self {
        Self {
            dragged: None,
            next_order: 0,
        }
    }

    pub fn dragged(&self) -> Option<hecs::Entity> {
        self.dragged
    }
}

/// Inclusive rectangle test, matching edge-inclusive hit boxes.
pub fn rect_contains(origin: Vec2, size: Vec2, p: Vec2) -> bool {
    p.x >= origin.x && p.x <= origin.x + size.x && p.y >= origin.y && p.y <= origin.y + size.y
}

/// Handle a button press at `point`.
///
/// The icon takes priority. Otherwise copies are scanned in creation order and
/// the first whose footprint contains the point is grabbed.
pub fn press(
    world: &mut hecs::World,
    drag: &mut DragState,
    config: &SceneConfig,
    point: Vec2,
) -> PressOutcome {
    if rect_contains(config.icon_origin, config.icon_size, point) {
        let order = SpawnOrder(drag.next_order);
        drag.next_order += 1;

        let entity = world.spawn((
            Position(config.icon_origin),
            GrabOffset(point - config.icon_origin),
            order,
            Sprite(SpriteKey::Icon),
        ));
        drag.dragged = Some(entity);
        log::debug!("Spawned draggable #{} at {:?}", order.0, config.icon_origin);
        return PressOutcome::Spawned(entity);
    }

    let hit = world
        .query::<(&Position, &SpawnOrder)>()
        .iter()
        .filter(|(_, (pos, _))| rect_contains(pos.0, config.draggable_size, point))
        .min_by_key(|(_, (_, order))| **order)
        .map(|(entity, (pos, _))| (entity, pos.0));

    match hit {
        Some((entity, pos)) => {
            if let Ok(offset) = world.query_one_mut::<&mut GrabOffset>(entity) {
                offset.0 = point - pos;
            }
            drag.dragged = Some(entity);
            PressOutcome::Picked(entity)
        }
        None => PressOutcome::Missed,
    }
}

/// Move the grabbed entity so the grab offset is preserved under the cursor.
/// Returns true if anything moved.
pub fn drag_to(world: &mut hecs::World, drag: &DragState, point: Vec2) -> bool {
    let Some(entity) = drag.dragged else {
        return false;
    };
    match world.query_one_mut::<(&mut Position, &GrabOffset)>(entity) {
        Ok((pos, offset)) => {
            pos.0 = point - offset.0;
            true
        }
        Err(_) => false,
    }
}

pub fn release(drag: &mut DragState) {
    drag.dragged = None;
}

/// All copies in creation order.
pub fn draggables(world: &hecs::World) -> Vec<DraggableView> {
    let mut views: Vec<(SpawnOrder, DraggableView)> = world
        .query::<(&Position, &SpawnOrder, &Sprite)>()
        .iter()
        .map(|(_, (pos, order, sprite))| {
            (
                *order,
                DraggableView {
                    position: pos.0,
                    sprite: sprite.0,
                },
            )
        })
        .collect();
    views.sort_by_key(|(order, _)| *order);
    views.into_iter().map(|(_, v)| v).collect()
}
