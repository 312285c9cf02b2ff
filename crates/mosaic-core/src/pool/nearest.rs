use crate::color::Color;

/// Nearest color to `query` among `colors`, by Euclidean RGB distance.
///
/// The scan runs in slice order. The first strictly closer candidate wins,
/// so ties go to the earlier color, and an exact match ends the scan.
/// Returns `None` for an empty slice.
///
/// ```
/// use mosaic_core::{closest_color, Color};
///
/// let pool = [Color::BLACK, Color::WHITE];
/// assert_eq!(closest_color(&pool, Color::from_rgb(127, 127, 127)), Some(Color::BLACK));
/// assert_eq!(closest_color(&pool, Color::from_rgb(128, 128, 128)), Some(Color::WHITE));
/// ```
pub fn closest_color(colors: &[Color], query: Color) -> Option<Color> {
    closest_index(colors, query).map(|i| colors[i])
}

/// Position of the [`closest_color`] in `colors`.
pub(crate) fn closest_index(colors: &[Color], query: Color) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, &candidate) in colors.iter().enumerate() {
        // squared distance orders the same as the distance itself
        let distance = candidate.distance_squared(query);
        if distance == 0 {
            return Some(i);
        }
        match best {
            Some((_, current)) if current <= distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}
