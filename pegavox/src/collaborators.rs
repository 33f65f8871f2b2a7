//! Narrow interfaces to the upstream services that feed the rasterizer.
//!
//! Speech-to-text, moderation and image generation live outside this crate;
//! a session only sees these traits, so tests and the CLI can plug in local
//! implementations.

use std::path::PathBuf;

use image::DynamicImage;

use crate::error::BoxError;

/// Turns recorded audio into text.
pub trait Transcriber {
    fn transcribe(&self, audio: &[u8]) -> Result<String, BoxError>;
}

/// Decides whether text must be rejected before prompting.
pub trait ContentModerator {
    fn is_flagged(&self, text: &str) -> Result<bool, BoxError>;
}

/// Produces a decoded raster image for a prompt.
pub trait ImageGenerator {
    fn generate(&self, prompt: &str) -> Result<DynamicImage, BoxError>;
}

impl<T: Transcriber + ?Sized> Transcriber for &T {
    fn transcribe(&self, audio: &[u8]) -> Result<String, BoxError> {
        (**self).transcribe(audio)
    }
}

impl<M: ContentModerator + ?Sized> ContentModerator for &M {
    fn is_flagged(&self, text: &str) -> Result<bool, BoxError> {
        (**self).is_flagged(text)
    }
}

impl<G: ImageGenerator + ?Sized> ImageGenerator for &G {
    fn generate(&self, prompt: &str) -> Result<DynamicImage, BoxError> {
        (**self).generate(prompt)
    }
}

/// Transcriber that ignores the audio and returns fixed text.
#[derive(Debug, Clone)]
pub struct StaticTranscript(pub String);

impl Transcriber for StaticTranscript {
    fn transcribe(&self, _audio: &[u8]) -> Result<String, BoxError> {
        Ok(self.0.clone())
    }
}

/// Moderator that never flags anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl ContentModerator for AllowAll {
    fn is_flagged(&self, _text: &str) -> Result<bool, BoxError> {
        Ok(false)
    }
}

/// Image generator backed by an image file on disk.
#[derive(Debug, Clone)]
pub struct FileImageSource {
    path: PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageGenerator for FileImageSource {
    fn generate(&self, prompt: &str) -> Result<DynamicImage, BoxError> {
        tracing::debug!(
            path = %self.path.display(),
            prompt_len = prompt.len(),
            "Loading image in place of generation"
        );
        Ok(crate::services::render::load_image(&self.path)?)
    }
}
