//! Reference-counted pixel buffers.
//!
//! Pixel content is produced and consumed outside the toolkit; here a
//! texture is an opaque handle with a size. Every clone is one held
//! reference, every drop releases it.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

struct TextureInner {
    id: u64,
    width: u32,
    height: u32,
}

#[derive(Clone)]
pub struct Texture(Rc<TextureInner>);

impl Texture {
    pub fn new(width: u32, height: u32) -> Self {
        Self(Rc::new(TextureInner {
            id: NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
        }))
    }

    pub fn width(&self) -> u32 {
        self.0.width
    }

    pub fn height(&self) -> u32 {
        self.0.height
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    /// Number of live references, including this one.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    pub fn ptr_eq(&self, other: &Texture) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Texture#{}({}x{}, refs={})",
            self.0.id,
            self.0.width,
            self.0.height,
            self.ref_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_texture_has_one_reference() {
        let t = Texture::new(32, 16);
        assert_eq!(t.width(), 32);
        assert_eq!(t.height(), 16);
        assert_eq!(t.ref_count(), 1);
    }

    #[test]
    fn clone_and_drop_track_references() {
        let t = Texture::new(8, 8);
        let held = t.clone();
        assert_eq!(t.ref_count(), 2);
        assert!(held.ptr_eq(&t));
        drop(held);
        assert_eq!(t.ref_count(), 1);
    }

    #[test]
    fn distinct_textures_differ() {
        let a = Texture::new(8, 8);
        let b = Texture::new(8, 8);
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }
}
