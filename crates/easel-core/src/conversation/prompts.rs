//! Instruction preamble placed at the head of every conversation.

/// Default system preamble: persona, reply style and the `[DRAW: ...]`
/// protocol the assistant must follow when a visual is requested.
pub const DEFAULT_SYSTEM_PREAMBLE: &str = r#"You are a world-class interior designer. Be creative, professional, and helpful. Keep responses concise but informative.

IMPORTANT:
- When the user requests a visual representation (e.g., "draw", "sketch", "show me", "visualize"),
  you MUST generate an image by starting your response with [DRAW: <detailed_prompt>]
- The prompt must be highly detailed (50+ words) including style, colors, perspective, and key elements
- After the image token, provide your regular text response
- Example: [DRAW: A modern minimalist living room with floor-to-ceiling windows overlooking a city skyline at sunset...] Here's a visualization of your space..."#;

/// Prefix put in front of a reply whose image could not be generated.
pub const IMAGE_FAILURE_WARNING: &str = "⚠️ Could not generate image";

/// Build the reply text shown when image generation failed.
pub fn image_failure_text(detail: &str, display_text: &str) -> String {
    format!("{IMAGE_FAILURE_WARNING}: {detail}\n\n{display_text}")
}
