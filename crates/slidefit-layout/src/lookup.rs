//! Image lookup by slide index

use std::collections::{BTreeMap, HashMap};

use slidefit_ast::ImageHandle;

/// Source of generated images, keyed by slide index.
///
/// Implemented for closures, for maps from index to handle, and for
/// [`NoImages`].
pub trait ImageLookup {
    /// Image for the slide at `index`, if one was generated
    fn image_for(&self, index: u32) -> Option<ImageHandle>;
}

impl<F> ImageLookup for F
where
    F: Fn(u32) -> Option<ImageHandle>,
{
    fn image_for(&self, index: u32) -> Option<ImageHandle> {
        self(index)
    }
}

impl<S: std::hash::BuildHasher> ImageLookup for HashMap<u32, ImageHandle, S> {
    fn image_for(&self, index: u32) -> Option<ImageHandle> {
        self.get(&index).cloned()
    }
}

impl ImageLookup for BTreeMap<u32, ImageHandle> {
    fn image_for(&self, index: u32) -> Option<ImageHandle> {
        self.get(&index).cloned()
    }
}

/// A lookup that never has an image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoImages;

impl ImageLookup for NoImages {
    fn image_for(&self, _index: u32) -> Option<ImageHandle> {
        None
    }
}
