//! Prompt construction for the image-generation collaborator.

/// Build the child-safe greyscale pixel-art prompt for a transcribed subject.
///
/// Runs of whitespace in the subject collapse to single spaces.
pub fn build_pixel_art_prompt(subject: &str) -> String {
    let subject = subject.split_whitespace().collect::<Vec<_>>().join(" ");

    format!(
        "Create a child-safe greyscale pixel art image.

STYLE (must follow):
- Pixel art with clearly visible square pixels (low-resolution look)
- 1-bit or 4-bit grayscale only (black/white or black/white + 2 greys)
- Cartoonish, not realistic
- Simple shapes, soft rounded edges
- Cheerful, harmless, friendly mood
- Sticker-like centered composition
- Plain light background

CONSTRAINTS:
- No text, letters, numbers, logos, watermarks
- No realism, no photographic details, no complex shading or gradients
- No violence, weapons, blood, fear, drugs, or adult themes

SUBJECT (Spanish transcription; interpret literally but keep it kid-safe):
{subject}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_collapses_whitespace() {
        let prompt = build_pixel_art_prompt("  un   gato\n con\tsombrero  ");
        assert!(prompt.ends_with("\nun gato con sombrero"));
    }

    #[test]
    fn test_prompt_has_sections() {
        let prompt = build_pixel_art_prompt("un perro");
        assert!(prompt.starts_with("Create a child-safe greyscale pixel art image."));
        assert!(prompt.contains("STYLE (must follow):"));
        assert!(prompt.contains("CONSTRAINTS:"));
        assert!(prompt.contains("SUBJECT (Spanish transcription"));
    }

    #[test]
    fn test_prompt_is_trimmed() {
        let prompt = build_pixel_art_prompt("sol");
        assert_eq!(prompt, prompt.trim());
    }
}
