use std::sync::Arc;

use crate::tessellation::Tessellation;

use super::Color;

/// Renderer-facing wrapper around a tessellation.
///
/// Carries the presentation state of one slot. New paintables are visible
/// and unselected.
#[derive(Debug, Clone, PartialEq)]
pub struct Paintable {
    index: usize,
    color: Color,
    mesh: Option<Arc<Tessellation>>,
    selected: bool,
    visible: bool,
}

impl Paintable {
    /// Wraps a tessellation for slot `index`.
    #[must_use]
    pub fn new(mesh: Arc<Tessellation>, color: Color, index: usize) -> Self {
        Self {
            index,
            color,
            mesh: Some(mesh),
            selected: false,
            visible: true,
        }
    }

    /// A paintable with color and index but nothing to draw.
    #[must_use]
    pub fn placeholder(color: Color, index: usize) -> Self {
        Self {
            index,
            color,
            mesh: None,
            selected: false,
            visible: true,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the tessellation to draw, if any.
    #[must_use]
    pub fn mesh(&self) -> Option<&Tessellation> {
        self.mesh.as_deref()
    }

    /// Returns whether there is something to draw.
    #[must_use]
    pub fn has_mesh(&self) -> bool {
        self.mesh.as_deref().is_some_and(|m| !m.is_noop())
    }

    #[must_use]
    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
