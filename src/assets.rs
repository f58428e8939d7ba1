use std::path::{Path, PathBuf};

use thiserror::Error;

const BACKGROUND_FILE: &str = "cave.png";
const ICON_FILE: &str = "PixelApple.png";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Identifies one loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Background,
    /// Animation frame by zero-based index.
    Frame(usize),
    Icon,
}

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Read and decode one PNG (or any format `image` understands).
pub fn load_image(path: &Path) -> Result<ImageData, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let img = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();
    Ok(ImageData {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

/// File name of animation frame `index` (frames are numbered from 1 on disk).
pub fn frame_file_name(index: usize) -> String {
    format!("BEar{}.png", index + 1)
}

/// Every image the scene draws. Anything that failed to load is `None` and
/// is skipped at draw time.
pub struct SceneAssets {
    pub background: Option<ImageData>,
    pub frames: Vec<Option<ImageData>>,
    pub icon: Option<ImageData>,
}

impl SceneAssets {
    /// Load everything from `dir`. Failures are logged, never fatal.
    pub fn load(dir: &Path, frame_count: usize) -> Self {
        let background = load_or_warn(&dir.join(BACKGROUND_FILE));
        let frames: Vec<_> = (0..frame_count)
            .map(|i| load_or_warn(&dir.join(frame_file_name(i))))
            .collect();
        let icon = load_or_warn(&dir.join(ICON_FILE));

        let loaded_frames = frames.iter().filter(|f| f.is_some()).count();
        log::info!(
            "Assets from {}: {}/{} frames, background={}, icon={}",
            dir.display(),
            loaded_frames,
            frame_count,
            background.is_some(),
            icon.is_some(),
        );

        Self {
            background,
            frames,
            icon,
        }
    }

    pub fn get(&self, key: SpriteKey) -> Option<&ImageData> {
        match key {
            SpriteKey::Background => self.background.as_ref(),
            SpriteKey::Frame(i) => self.frames.get(i)?.as_ref(),
            SpriteKey::Icon => self.icon.as_ref(),
        }
    }

    /// All keys that hold an image, in upload order.
    pub fn loaded(&self) -> impl Iterator<Item = (SpriteKey, &ImageData)> {
        std::iter::once(SpriteKey::Background)
            .chain((0..self.frames.len()).map(SpriteKey::Frame))
            .chain(std::iter::once(SpriteKey::Icon))
            .filter_map(|key| self.get(key).map(|img| (key, img)))
    }
}

fn load_or_warn(path: &Path) -> Option<ImageData> {
    match load_image(path) {
        Ok(img) => Some(img),
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cavepet-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn frame_files_are_one_based() {
        assert_eq!(frame_file_name(0), "BEar1.png");
        assert_eq!(frame_file_name(10), "BEar11.png");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = scratch_dir("missing");
        let err = load_image(&dir.join("nope.png")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }

    #[test]
    fn garbage_file_is_decode_error() {
        let dir = scratch_dir("garbage");
        let path = dir.join("bad.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn partial_asset_set_keeps_going() {
        let dir = scratch_dir("partial");
        image::RgbaImage::new(4, 3)
            .save(dir.join(frame_file_name(1)))
            .unwrap();
        image::RgbaImage::new(2, 2).save(dir.join(ICON_FILE)).unwrap();

        let assets = SceneAssets::load(&dir, 3);
        assert!(assets.background.is_none());
        assert!(assets.get(SpriteKey::Frame(0)).is_none());
        assert!(assets.get(SpriteKey::Frame(5)).is_none());

        let frame = assets.get(SpriteKey::Frame(1)).unwrap();
        assert_eq!((frame.width, frame.height), (4, 3));
        assert_eq!(frame.rgba.len(), 4 * 3 * 4);

        let keys: Vec<_> = assets.loaded().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![SpriteKey::Frame(1), SpriteKey::Icon]);
    }
}
