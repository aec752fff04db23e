//! PNG snapshots of a preset frame.
//!
//! Feature-gated behind `png` (default on) so that consumers which only
//! need [`crate::pixel`] avoid the `image` crate.

use shaderdeck_core::error::DeckError;
use std::path::Path;

use crate::Still;

/// Shades `still` and writes it as a PNG image.
///
/// Returns `DeckError::InvalidDimensions` for an empty canvas, or
/// `DeckError::Io` on write failure.
pub fn write_png(still: &Still, path: &Path) -> Result<(), DeckError> {
    let rgba = still.to_rgba()?;
    let img = image::RgbaImage::from_raw(still.width, still.height, rgba)
        .ok_or_else(|| DeckError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| DeckError::Io(e.to_string()))?;
    log::info!(
        "wrote {}x{} {} preview to {}",
        still.width,
        still.height,
        still.preset.key,
        path.display()
    );
    Ok(())
}
