use crate::error::MosaicError;

/// Source and destination rectangles for a center-crop-then-stretch draw.
///
/// The source rectangle is centered on the image along whichever axis is
/// cropped; the destination always covers the full target raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub sx: f64,
    pub sy: f64,
    pub sw: f64,
    pub sh: f64,
    pub dx: f64,
    pub dy: f64,
    pub dw: f64,
    pub dh: f64,
}

/// Compute the crop that makes a `source_w x source_h` image fill a
/// `dest_w x dest_h` raster whose pixels have the given aspect ratio.
///
/// The desired ratio is `dest_w * aspect_ratio / dest_h`. A source that is
/// relatively wider loses width, otherwise it loses height. Nothing is ever
/// letterboxed.
///
/// # Errors
///
/// [`MosaicError::InvalidDimensions`] when any size is zero or the aspect
/// ratio is not a positive finite number.
///
/// # Example
///
/// ```
/// use mosaic_core::compute_crop_rect;
///
/// let crop = compute_crop_rect(200, 100, 50, 50, 1.0).unwrap();
/// assert_eq!((crop.sx, crop.sy, crop.sw, crop.sh), (50.0, 0.0, 100.0, 100.0));
/// ```
pub fn compute_crop_rect(
    source_w: u32,
    source_h: u32,
    dest_w: u32,
    dest_h: u32,
    aspect_ratio: f64,
) -> Result<CropRect, MosaicError> {
    if source_w == 0 || source_h == 0 {
        return Err(MosaicError::dimensions(format!(
            "source image is {source_w}x{source_h}"
        )));
    }
    if dest_w == 0 || dest_h == 0 {
        return Err(MosaicError::dimensions(format!(
            "destination raster is {dest_w}x{dest_h}"
        )));
    }
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return Err(MosaicError::dimensions(format!(
            "aspect ratio {aspect_ratio} is not positive"
        )));
    }

    let (image_w, image_h) = (source_w as f64, source_h as f64);
    let source_ratio = image_w / image_h;
    let dest_ratio = dest_w as f64 * aspect_ratio / dest_h as f64;

    let (mut sx, mut sy, mut sw, mut sh) = (0.0, 0.0, image_w, image_h);
    if source_ratio > dest_ratio {
        sw = sh * dest_ratio;
        sx = image_w * 0.5 - sw * 0.5;
    } else {
        sh = sw / dest_ratio;
        sy = image_h * 0.5 - sh * 0.5;
    }

    Ok(CropRect {
        sx,
        sy,
        sw,
        sh,
        dx: 0.0,
        dy: 0.0,
        dw: dest_w as f64,
        dh: dest_h as f64,
    })
}
