//! Rendering backends
//!
//! The assembler hands every resolved slide to a [`DocumentSink`]. It does
//! not know which backend it is talking to.

use std::convert::Infallible;

use crate::resolved::ResolvedSlide;

/// Receives resolved slides in index order
pub trait DocumentSink {
    type Error;

    /// Place one slide
    fn place(&mut self, slide: &ResolvedSlide) -> Result<(), Self::Error>;
}

impl<T: DocumentSink + ?Sized> DocumentSink for &mut T {
    type Error = T::Error;

    fn place(&mut self, slide: &ResolvedSlide) -> Result<(), Self::Error> {
        (**self).place(slide)
    }
}

/// Keeps every slide it receives
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    slides: Vec<ResolvedSlide>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slides(&self) -> &[ResolvedSlide] {
        &self.slides
    }

    pub fn into_slides(self) -> Vec<ResolvedSlide> {
        self.slides
    }
}

impl DocumentSink for CollectingSink {
    type Error = Infallible;

    fn place(&mut self, slide: &ResolvedSlide) -> Result<(), Self::Error> {
        self.slides.push(slide.clone());
        Ok(())
    }
}
