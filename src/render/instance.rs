use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::assets::SpriteKey;
use crate::scene::SpriteDraw;

/// Per-instance data uploaded to GPU each frame.
/// Stride = 20 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left corner in window pixels.
    pub origin: [f32; 2],
    /// Drawn size in pixels.
    pub size: [f32; 2],
    /// Non-zero mirrors the texture horizontally.
    pub flip: u32,
}

impl From<&SpriteDraw> for SpriteInstance {
    fn from(d: &SpriteDraw) -> Self {
        Self {
            origin: d.origin.into(),
            size: d.size.into(),
            flip: d.flip as u32,
        }
    }
}

/// A run of consecutive instances sharing one texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawBatch {
    pub key: SpriteKey,
    pub instances: Range<u32>,
}

/// Flatten a draw list into instances plus per-texture batches.
///
/// Paint order is preserved: only *adjacent* draws with the same texture
/// are merged.
pub fn build_batches(
    draws: &[SpriteDraw],
    instances: &mut Vec<SpriteInstance>,
    batches: &mut Vec<DrawBatch>,
) {
    instances.clear();
    batches.clear();

    for draw in draws {
        let idx = instances.len() as u32;
        instances.push(SpriteInstance::from(draw));

        match batches.last_mut() {
            Some(last) if last.key == draw.key => last.instances.end = idx + 1,
            _ => batches.push(DrawBatch {
                key: draw.key,
                instances: idx..idx + 1,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn draw(key: SpriteKey, x: f32) -> SpriteDraw {
        SpriteDraw {
            key,
            origin: Vec2::new(x, 0.0),
            size: Vec2::splat(100.0),
            flip: false,
        }
    }

    #[test]
    fn instance_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 20);
    }

    #[test]
    fn adjacent_same_texture_draws_share_a_batch() {
        let draws = [
            draw(SpriteKey::Background, 0.0),
            draw(SpriteKey::Frame(3), 0.0),
            draw(SpriteKey::Icon, 50.0),
            draw(SpriteKey::Icon, 200.0),
            draw(SpriteKey::Icon, 300.0),
        ];
        let mut instances = Vec::new();
        let mut batches = Vec::new();
        build_batches(&draws, &mut instances, &mut batches);

        assert_eq!(instances.len(), 5);
        assert_eq!(
            batches,
            vec![
                DrawBatch { key: SpriteKey::Background, instances: 0..1 },
                DrawBatch { key: SpriteKey::Frame(3), instances: 1..2 },
                DrawBatch { key: SpriteKey::Icon, instances: 2..5 },
            ]
        );
        assert_eq!(instances[4].origin, [300.0, 0.0]);
    }

    #[test]
    fn non_adjacent_draws_keep_paint_order() {
        let draws = [
            draw(SpriteKey::Icon, 0.0),
            draw(SpriteKey::Background, 0.0),
            draw(SpriteKey::Icon, 0.0),
        ];
        let mut instances = Vec::new();
        let mut batches = Vec::new();
        build_batches(&draws, &mut instances, &mut batches);
        assert_eq!(batches.len(), 3);
    }

    #[test]
    fn flip_flag_is_encoded() {
        let mut d = draw(SpriteKey::Frame(0), 0.0);
        d.flip = true;
        assert_eq!(SpriteInstance::from(&d).flip, 1);
    }
}
