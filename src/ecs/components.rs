use glam::Vec2;

use crate::assets::SpriteKey;

/// Top-left corner in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Cursor minus position at the moment the entity was grabbed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabOffset(pub Vec2);

/// Monotonic creation stamp. Hit tests and drawing walk entities in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpawnOrder(pub u64);

/// Which image the entity draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite(pub SpriteKey);
