use crate::artifact::Color;
use crate::tessellation::TessellationParams;

/// Settings for a [`SceneManager`](crate::scene::SceneManager).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Color used when a slot has no color override.
    pub default_color: Color,
    /// Tessellation quality for the built-in artifact factory.
    pub tessellation: TessellationParams,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            default_color: Color::BLUE,
            tessellation: TessellationParams::default(),
        }
    }
}
