use crate::dom::Size;

/// Read the pixel dimensions of an image file without decoding pixels.
/// Logs a warning and returns None when the file is missing or unreadable.
pub fn probe_image_size(path: &str) -> Option<Size> {
    match image::image_dimensions(path) {
        Ok((w, h)) => Some(Size::new(w as f32, h as f32)),
        Err(e) => {
            log::warn!("failed to read image {}: {}", path, e);
            None
        }
    }
}
