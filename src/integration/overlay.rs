//! Mapping model-space boxes onto a letterboxed display surface.

use crate::postprocess::FrameSize;
use crate::tracker::Rect;

/// Affine per-axis transform from model input space to view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayTransform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl OverlayTransform {
    /// Transform for a view showing `image` scaled to fit and centered.
    ///
    /// The image fills the view along its limiting axis and is centered on
    /// the other one. Returns `None` when either surface has no area.
    pub fn fit_center(
        view_width: f32,
        view_height: f32,
        image: FrameSize,
        input_size: u32,
    ) -> Option<Self> {
        if image.is_empty() || input_size == 0 || !(view_width > 0.0 && view_height > 0.0) {
            return None;
        }

        let input = input_size as f32;
        let image_aspect = image.width as f32 / image.height as f32;
        let view_aspect = view_width / view_height;

        Some(if image_aspect > view_aspect {
            let scale_y = view_width / image_aspect / input;
            Self {
                scale_x: view_width / input,
                scale_y,
                offset_x: 0.0,
                offset_y: (view_height - scale_y * input) / 2.0,
            }
        } else {
            let scale_x = view_height * image_aspect / input;
            Self {
                scale_x,
                scale_y: view_height / input,
                offset_x: (view_width - scale_x * input) / 2.0,
                offset_y: 0.0,
            }
        })
    }

    pub fn apply(&self, rect: &Rect) -> Rect {
        Rect::new(
            rect.x * self.scale_x + self.offset_x,
            rect.y * self.scale_y + self.offset_y,
            rect.width * self.scale_x,
            rect.height * self.scale_y,
        )
    }
}
