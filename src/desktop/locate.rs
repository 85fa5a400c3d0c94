//! On-screen image search via template matching.

use image::RgbaImage;
use imageproc::template_matching::{find_extremes, match_template, MatchTemplateMethod};

/// Find the template inside the screen image.
///
/// Returns the screen coordinates of the template center when the best match
/// scores at least `confidence` (normalized cross-correlation, 1.0 = exact).
/// Confidence values outside [0, 1] are passed through unvalidated.
pub fn locate(screen: &RgbaImage, template: &RgbaImage, confidence: f32) -> Option<(i32, i32)> {
    if template.width() == 0
        || template.height() == 0
        || template.width() > screen.width()
        || template.height() > screen.height()
    {
        return None;
    }

    let screen_gray = image::DynamicImage::ImageRgba8(screen.clone()).to_luma8();
    let template_gray = image::DynamicImage::ImageRgba8(template.clone()).to_luma8();

    let scores = match_template(
        &screen_gray,
        &template_gray,
        MatchTemplateMethod::CrossCorrelationNormalized,
    );
    let extremes = find_extremes(&scores);
    if extremes.max_value < confidence {
        return None;
    }

    let (x, y) = extremes.max_value_location;
    Some((
        x as i32 + (template.width() / 2) as i32,
        y as i32 + (template.height() / 2) as i32,
    ))
}
