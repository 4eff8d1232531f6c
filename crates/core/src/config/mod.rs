use serde::{Deserialize, Serialize};

use crate::frame::GridSpec;

/// Top-level configuration structure for the application.
///
/// The defaults describe the reference deployment: a 14x14 panel driven
/// at 60 frames per second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub width: usize,
    pub height: usize,
    pub fps: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 14,
            height: 14,
            fps: 60,
        }
    }
}

impl PanelConfig {
    /// Derives the grid description used by generators and the mapper.
    /// The fixed timestep is the reciprocal of the frame rate.
    pub fn grid(&self) -> GridSpec {
        let fps = self.fps.max(1);
        GridSpec::new(self.width, self.height, 1.0 / fps as f32)
    }
}
