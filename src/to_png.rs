//! Host-side PNG and APNG previews of frames, for eyeballing patterns without hardware.
//!
//! Every LED is drawn as a round dot in a dark cell. Channel values go through an inverse
//! gamma so dim trails look on screen roughly as they do on the strings.

use std::error::Error;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder};

use crate::led2d::Frame2d;
use crate::pattern::Pattern;
use crate::rng::Rng;

/// Inverse gamma applied to channel values in previews.
pub const PREVIEW_INVERSE_GAMMA: f32 = 2.2;

/// Result type for preview writers.
pub type PreviewResult<T = ()> = Result<T, Box<dyn Error>>;

/// Write `frame` as a PNG no larger than `max_dimension` pixels on its long side.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the PNG cannot be encoded.
pub fn write_frame_png<const W: usize, const H: usize>(
    frame: &Frame2d<W, H>,
    output_path: impl AsRef<Path>,
    max_dimension: u32,
) -> PreviewResult {
    let output_path = output_path.as_ref();
    let layout = PreviewLayout::fit::<W, H>(max_dimension);
    let mut encoder = create_encoder(output_path, &layout)?;
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&layout.render(frame))?;
    writer.finish()?;
    Ok(())
}

/// Write `frames` as a looping APNG, `frame_delay_ms` per frame.
///
/// # Errors
///
/// Returns an error if `frames` is empty, the delay does not fit the APNG header, or the
/// file cannot be written.
pub fn write_frames_apng<const W: usize, const H: usize>(
    frames: &[Frame2d<W, H>],
    output_path: impl AsRef<Path>,
    max_dimension: u32,
    frame_delay_ms: u16,
) -> PreviewResult {
    if frames.is_empty() {
        return Err("no frames to write".into());
    }
    let output_path = output_path.as_ref();
    let layout = PreviewLayout::fit::<W, H>(max_dimension);
    let mut encoder = create_encoder(output_path, &layout)?;
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_animated(u32::try_from(frames.len())?, 0)?;
    let mut writer = encoder.write_header()?;
    for frame in frames {
        writer.set_frame_delay(frame_delay_ms, 1000)?;
        writer.write_image_data(&layout.render(frame))?;
    }
    writer.finish()?;
    Ok(())
}

/// Tick `pattern` `ticks` times from a fresh frame, keeping a copy of every frame.
pub fn capture<const W: usize, const H: usize, P: Pattern<W, H>>(
    pattern: &mut P,
    rng: &mut Rng,
    ticks: usize,
) -> Vec<Frame2d<W, H>> {
    let mut frame = Frame2d::new();
    (0..ticks)
        .map(|_| {
            pattern.tick(&mut frame, rng);
            frame
        })
        .collect()
}

fn create_encoder(
    output_path: &Path,
    layout: &PreviewLayout,
) -> PreviewResult<Encoder<'static, BufWriter<File>>> {
    if let Some(parent) = output_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(output_path)?;
    Ok(Encoder::new(BufWriter::new(file), layout.width, layout.height))
}

/// Pixel geometry of a preview image.
#[derive(Clone, Copy, Debug)]
struct PreviewLayout {
    cell: u32,
    radius: u32,
    width: u32,
    height: u32,
}

impl PreviewLayout {
    /// Largest cell size whose image fits in `max_dimension`, but never below 3 pixels.
    #[allow(clippy::cast_possible_truncation, reason = "preview grids are small")]
    fn fit<const W: usize, const H: usize>(max_dimension: u32) -> Self {
        let long_side = W.max(H).max(1) as u32;
        let cell = (max_dimension / long_side).max(3);
        Self {
            cell,
            radius: (cell - 1) / 2,
            width: W as u32 * cell,
            height: H as u32 * cell,
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "preview arithmetic on small, positive values"
    )]
    fn render<const W: usize, const H: usize>(&self, frame: &Frame2d<W, H>) -> Vec<u8> {
        let stride = self.width as usize * 3;
        let mut bytes = vec![0u8; stride * self.height as usize];
        let center = (self.cell / 2) as i32;
        let radius = self.radius as f32;

        for (row_index, row) in frame.iter().enumerate() {
            for (column_index, pixel) in row.iter().enumerate() {
                let channels = [pixel.r, pixel.g, pixel.b].map(to_preview);
                for local_y in 0..self.cell {
                    for local_x in 0..self.cell {
                        let dx = local_x as i32 - center;
                        let dy = local_y as i32 - center;
                        let distance = ((dx * dx + dy * dy) as f32).sqrt();
                        // Soft edge over the outer pixel of the dot.
                        let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                        if coverage <= 0.0 {
                            continue;
                        }
                        let y = row_index * self.cell as usize + local_y as usize;
                        let x = column_index * self.cell as usize + local_x as usize;
                        let start = y * stride + x * 3;
                        for (byte, channel) in bytes[start..start + 3].iter_mut().zip(channels) {
                            *byte = (channel * coverage * 255.0).round() as u8;
                        }
                    }
                }
            }
        }
        bytes
    }
}

fn to_preview(channel: u8) -> f32 {
    (f32::from(channel) / 255.0).powf(1.0 / PREVIEW_INVERSE_GAMMA)
}
