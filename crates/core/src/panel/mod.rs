//! Panel mapping: turns a logical frame into the physically ordered,
//! intensity-corrected pixel sequence the strip expects.

use crate::error::Result;
use crate::frame::{FrameBuffer, LightValue};
use crate::math::clip_intensity;

/// One physical pixel in the strip's native channel order (GRB).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub g: u8,
    pub r: u8,
    pub b: u8,
}

impl Pixel {
    pub const OFF: Self = Self { g: 0, r: 0, b: 0 };

    pub fn channels(self) -> [u8; 3] {
        [self.g, self.r, self.b]
    }
}

/// An all-dark strip of the given length, used for the "lights off"
/// transmission on stop.
pub fn blank_pixels(count: usize) -> Vec<Pixel> {
    vec![Pixel::OFF; count]
}

/// Stateless, deterministic frame-to-strip conversion.
///
/// Pipeline per frame: serpentine column reorder (the wiring runs
/// boustrophedon, so odd columns are emitted bottom-up), then per pixel:
/// GRB channel reorder, peak normalization, intensity application.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelMapper;

impl PanelMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map(&self, frame: &FrameBuffer) -> Vec<Pixel> {
        let mut pixels = Vec::with_capacity(frame.len());
        for x in 0..frame.width() {
            let column = frame.column(x);
            if x % 2 == 0 {
                pixels.extend(column.iter().map(|cell| map_cell(*cell)));
            } else {
                pixels.extend(column.iter().rev().map(|cell| map_cell(*cell)));
            }
        }
        pixels
    }
}

/// Scales a channel triple so its maximum component hits 255, preserving
/// hue. Pure black stays black rather than dividing by zero.
fn peak_normalize(channels: [u8; 3]) -> [u8; 3] {
    let max = channels.into_iter().max().unwrap_or(0);
    if max == 0 {
        return [0, 0, 0];
    }
    let factor = 255.0 / max as f32;
    channels.map(|c| (factor * c as f32) as u8)
}

fn map_cell(cell: LightValue) -> Pixel {
    let normalized = peak_normalize([cell.color.g, cell.color.r, cell.color.b]);
    let intensity = clip_intensity(cell.intensity);
    let [g, r, b] = normalized.map(|c| (intensity * c as f32) as u8);
    Pixel { g, r, b }
}

/// Transmission boundary toward the physical strip (or a preview).
///
/// Assumed synchronous; one `set_pixels` + `flush` pair is attempted per
/// tick and failures are the deployment's concern.
pub trait PixelSink: Send {
    fn set_pixels(&mut self, pixels: &[Pixel]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

/// Sink that discards everything, for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullSink;

impl PixelSink for NullSink {
    fn set_pixels(&mut self, _pixels: &[Pixel]) -> Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
