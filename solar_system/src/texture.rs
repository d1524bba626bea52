//! Texture handles and the loader seam used while building the system

/// Opaque reference to a texture owned by whoever implements [`TextureSource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// Returned when a texture could not be produced; drawn with a plain fallback
    pub const MISSING: TextureHandle = TextureHandle(u32::MAX);

    pub fn is_missing(&self) -> bool {
        *self == Self::MISSING
    }
}

/// Resolves texture keys to handles.
///
/// Implementations never panic on a bad key: they log and return
/// [`TextureHandle::MISSING`].
pub trait TextureSource {
    fn load(&mut self, key: &str) -> TextureHandle;
}

/// Hands out sequential handles without touching the GPU.
///
/// Keys listed in `missing` resolve to [`TextureHandle::MISSING`].
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CountingTextures {
    pub loaded: Vec<String>,
    pub missing: Vec<String>,
}

#[cfg(test)]
impl TextureSource for CountingTextures {
    fn load(&mut self, key: &str) -> TextureHandle {
        if self.missing.iter().any(|k| k == key) {
            log::warn!("no texture for '{}'", key);
            return TextureHandle::MISSING;
        }
        self.loaded.push(key.to_string());
        TextureHandle(self.loaded.len() as u32 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_source_hands_out_sequential_handles() {
        let mut source = CountingTextures::default();
        assert_eq!(source.load("earth"), TextureHandle(0));
        assert_eq!(source.load("earth_clouds"), TextureHandle(1));
        assert_eq!(source.loaded, vec!["earth", "earth_clouds"]);
    }

    #[test]
    fn missing_key_yields_sentinel() {
        let mut source = CountingTextures {
            missing: vec!["nowhere".into()],
            ..Default::default()
        };
        let handle = source.load("nowhere");
        assert!(handle.is_missing());
        assert!(source.loaded.is_empty());
    }
}
