use crate::session::PoemStyle;

/// Returned when the model answers the inspiration request with nothing.
pub const FALLBACK_INSPIRATION: &str = "A silent moment captured in light.";

pub const INSPIRATION_PROMPT: &str = "Analyze this photo. Provide a short, evocative summary (2-3 sentences) \
of the salient visual details, colors, textures, and the overall mood you perceive.
Speak as a poetic observer. Do not mention \"the image\" or \"the photo\" directly if possible, \
focus on the essence of the scene.";

/// Instruction for a poem constrained to `style`'s structure.
pub fn poem_prompt(style: PoemStyle) -> String {
    format!(
        "Based on the visual elements of this photograph, compose a beautiful and unique poem.
Strictly follow the structure of a \"{}\".
Ensure the poem captures the colors, textures, and mood of the scene.
Return only the poem text with appropriate line breaks.",
        style.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poem_prompt_names_the_style() {
        for style in PoemStyle::ALL {
            let prompt = poem_prompt(style);
            assert!(prompt.contains(&format!("\"{}\"", style.label())));
        }
    }
}
