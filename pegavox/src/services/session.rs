//! End-to-end session: transcript → moderation gate → prompt → image → printer artifacts.

use image_processor::RenderConfig;

use super::artifacts::{ArtifactPaths, save_png, write_bytes};
use super::render::{RenderOutput, render_image};
use crate::collaborators::{ContentModerator, ImageGenerator, Transcriber};
use crate::error::{PipelineError, Result};
use crate::prompt::build_pixel_art_prompt;

/// Result of a successful session.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub transcription: String,
    pub prompt: String,
    pub render: RenderOutput,
}

/// One run of the voice-to-print flow over injected collaborators.
pub struct Session<T, M, G> {
    transcriber: T,
    moderator: M,
    generator: G,
    render_config: RenderConfig,
    paths: ArtifactPaths,
    debug_output: bool,
}

impl<T, M, G> Session<T, M, G>
where
    T: Transcriber,
    M: ContentModerator,
    G: ImageGenerator,
{
    pub fn new(
        transcriber: T,
        moderator: M,
        generator: G,
        render_config: RenderConfig,
        paths: ArtifactPaths,
    ) -> Self {
        Self {
            transcriber,
            moderator,
            generator,
            render_config,
            paths,
            debug_output: false,
        }
    }

    /// Builder: also write transcription, prompt and generated image.
    pub fn with_debug_output(mut self, val: bool) -> Self {
        self.debug_output = val;
        self
    }

    /// Run every step in order; the first failure aborts the session.
    pub fn run(&self, audio: &[u8]) -> Result<SessionOutcome> {
        tracing::info!(audio_bytes = audio.len(), "Transcribing");
        let transcription = self
            .transcriber
            .transcribe(audio)
            .map_err(|e| PipelineError::collaborator("transcription", e))?
            .trim()
            .to_string();
        if transcription.is_empty() {
            return Err(PipelineError::collaborator(
                "transcription",
                "transcription returned empty text".into(),
            ));
        }
        tracing::info!(%transcription, "Transcription complete");
        if self.debug_output {
            write_bytes(&self.paths.transcription, transcription.as_bytes())?;
        }

        tracing::info!("Moderating transcription");
        let flagged = self
            .moderator
            .is_flagged(&transcription)
            .map_err(|e| PipelineError::collaborator("moderation", e))?;
        if flagged {
            tracing::warn!("Transcription flagged by moderation");
            return Err(PipelineError::Flagged);
        }

        let prompt = build_pixel_art_prompt(&transcription);
        if self.debug_output {
            write_bytes(&self.paths.prompt, prompt.as_bytes())?;
        }

        tracing::info!("Generating image");
        let image = self
            .generator
            .generate(&prompt)
            .map_err(|e| PipelineError::collaborator("image generation", e))?;
        if self.debug_output {
            save_png(&self.paths.generated, &image)?;
        }

        let render = render_image(image, &self.render_config, &self.paths)?;

        Ok(SessionOutcome {
            transcription,
            prompt,
            render,
        })
    }
}
