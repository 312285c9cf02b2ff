use super::nearest::{closest_color, closest_index};
use crate::color::{Color, Rgba};
use crate::error::MosaicError;
use crate::raster::{RasterSurface, Rect};
use crate::tile::TilePicture;

const DEFAULT_COLOR_BLENDING: f64 = 0.2;

/// The set of tiles a mosaic is built from, plus the surface it is drawn on.
///
/// Tiles are keyed by their average color and kept in scan order, the order
/// they were first added. Adding a tile whose color is already pooled
/// replaces that tile in place. Resizing refreshes every key but never drops
/// a tile, so two tiles may end up sharing a color; lookups and replacement
/// then go to the earlier one.
///
/// The target is a [`TilePicture`] rendered at one pixel per grid cell.
/// Composition reads it pixel by pixel, draws the closest tile into the
/// matching cell and overlays the pixel's color at `color_blending` opacity.
pub struct TilePool<S> {
    surface: S,
    color_blending: f64,
    width: u32,
    height: u32,
    columns: u32,
    rows: u32,
    target: Option<TilePicture>,
    tiles: Vec<TilePicture>,
    colors: Vec<Color>,
}

impl<S: RasterSurface> TilePool<S> {
    /// An empty 1x1 grid covering the surface at its current size.
    pub fn new(surface: S) -> Self {
        let (width, height) = surface.size();
        Self {
            surface,
            color_blending: DEFAULT_COLOR_BLENDING,
            width,
            height,
            columns: 1,
            rows: 1,
            target: None,
            tiles: Vec::new(),
            colors: Vec::new(),
        }
    }

    /// Add a rendered tile, keyed by its average color.
    ///
    /// Returns the tile it replaced, if one had the same color.
    ///
    /// # Errors
    ///
    /// [`MosaicError::UnrenderedTile`] when the tile has no average color yet.
    pub fn add_picture(&mut self, tile: TilePicture) -> Result<Option<TilePicture>, MosaicError> {
        let color = tile.average_color().ok_or(MosaicError::UnrenderedTile)?;
        let replaced = self.insert(color, tile);
        tracing::debug!(
            color = %color,
            replaced = replaced.is_some(),
            pool_size = self.colors.len(),
            "Added tile"
        );
        Ok(replaced)
    }

    fn insert(&mut self, color: Color, tile: TilePicture) -> Option<TilePicture> {
        match self.position(color) {
            Some(index) => Some(std::mem::replace(&mut self.tiles[index], tile)),
            None => {
                self.colors.push(color);
                self.tiles.push(tile);
                None
            }
        }
    }

    fn position(&self, color: Color) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }

    /// Set the output size and grid resolution.
    ///
    /// Resizes the surface, re-renders every tile at cell size and refreshes
    /// each tile's key to its new average color. No tile leaves the pool. A
    /// target is re-rendered at `columns x rows` so it keeps one pixel per
    /// cell.
    pub fn set_size(
        &mut self,
        width: u32,
        height: u32,
        columns: u32,
        rows: u32,
    ) -> Result<(), MosaicError> {
        if width == 0 || height == 0 || columns == 0 || rows == 0 {
            return Err(MosaicError::dimensions(format!(
                "{width}x{height} pixels in {columns}x{rows} cells"
            )));
        }
        self.surface.resize(width, height)?;
        self.width = width;
        self.height = height;
        self.columns = columns;
        self.rows = rows;

        let (cell_w, cell_h) = self.tile_size();
        for (tile, key) in self.tiles.iter_mut().zip(self.colors.iter_mut()) {
            if let Err(err) = tile.set_size(cell_w, cell_h, 1.0) {
                tracing::warn!(color = %key, error = %err, "Failed to resize tile");
            }
            // a tile resized to nothing keeps its previous key
            if let Some(color) = tile.average_color() {
                *key = color;
            }
        }

        let aspect_ratio = self.pixel_aspect_ratio();
        if let Some(target) = self.target.as_mut() {
            target.set_size(columns, rows, aspect_ratio)?;
        }

        tracing::debug!(
            width,
            height,
            columns,
            rows,
            cell_width = cell_w,
            cell_height = cell_h,
            pool_size = self.colors.len(),
            "Resized grid"
        );
        Ok(())
    }

    /// Store the target and compose.
    ///
    /// # Errors
    ///
    /// [`MosaicError::GridMismatch`] when the target does not hold one pixel
    /// per cell; the target is not stored. Errors from the composition pass
    /// are returned with the target kept.
    pub fn set_target(&mut self, target: TilePicture) -> Result<(), MosaicError> {
        self.check_grid(&target)?;
        self.target = Some(target);
        self.draw_grid()
    }

    /// Nearest pooled color to `color`, first inserted wins ties.
    pub fn get_closest_color(&self, color: Color) -> Result<Color, MosaicError> {
        closest_color(&self.colors, color).ok_or(MosaicError::EmptyPool)
    }

    /// Compose the whole grid onto the surface.
    ///
    /// Every precondition is checked before the first draw, so a failed
    /// pass leaves the surface untouched.
    pub fn draw_grid(&mut self) -> Result<(), MosaicError> {
        let target = self.target.as_ref().ok_or(MosaicError::MissingTarget)?;
        self.check_grid(target)?;
        let blending = self.color_blending;
        if blending < 1.0 && self.colors.is_empty() {
            return Err(MosaicError::EmptyPool);
        }

        let cell_w = self.width as f64 / self.columns as f64;
        let cell_h = self.height as f64 / self.rows as f64;
        let columns = self.columns as usize;

        for (i, pixel) in target.pixels().chunks_exact(4).enumerate() {
            let color = Color::from_rgb(pixel[0], pixel[1], pixel[2]);
            let cell = Rect::new(
                (i % columns) as f64 * cell_w,
                (i / columns) as f64 * cell_h,
                cell_w,
                cell_h,
            );

            if blending < 1.0 {
                let nearest = closest_index(&self.colors, color).ok_or(MosaicError::EmptyPool)?;
                self.surface.draw_scaled(self.tiles[nearest].raster(), cell);
            }
            if blending > 0.0 {
                self.surface.fill_rect(cell, Rgba::new(color, blending));
            }
        }

        tracing::debug!(
            cells = target.pixels().len() / 4,
            pool_size = self.colors.len(),
            blending,
            "Composed grid"
        );
        Ok(())
    }

    fn check_grid(&self, target: &TilePicture) -> Result<(), MosaicError> {
        let expected = self.size();
        let actual = target.raster().pixel_count();
        if actual != expected {
            return Err(MosaicError::GridMismatch { expected, actual });
        }
        Ok(())
    }

    pub fn color_blending(&self) -> f64 {
        self.color_blending
    }

    /// Set the overlay opacity.
    ///
    /// # Errors
    ///
    /// [`MosaicError::InvalidBlending`] outside `0.0..=1.0` (NaN included).
    pub fn set_color_blending(&mut self, value: f64) -> Result<(), MosaicError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(MosaicError::InvalidBlending(value));
        }
        self.color_blending = value;
        Ok(())
    }

    /// Number of pooled tiles.
    pub fn pool_size(&self) -> usize {
        self.colors.len()
    }

    /// Number of grid cells.
    pub fn size(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Pooled colors in scan order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// The first tile in scan order keyed by `color`.
    pub fn tile(&self, color: Color) -> Option<&TilePicture> {
        self.position(color).map(|index| &self.tiles[index])
    }

    pub fn target(&self) -> Option<&TilePicture> {
        self.target.as_ref()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Tile raster size: the cell size rounded down.
    pub fn tile_size(&self) -> (u32, u32) {
        (self.width / self.columns, self.height / self.rows)
    }

    /// Width over height of one cell.
    pub fn pixel_aspect_ratio(&self) -> f64 {
        (self.width as f64 / self.columns as f64) / (self.height as f64 / self.rows as f64)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Raster;
    use pretty_assertions::assert_eq;

    const RED: Color = Color::from_rgb(255, 0, 0);
    const BLUE: Color = Color::from_rgb(0, 0, 255);

    fn tile(color: Color, size: u32) -> TilePicture {
        TilePicture::with_image(Raster::solid(4, 4, color).into_shared(), size, size, 1.0).unwrap()
    }

    fn target(pixels: &[Color], columns: u32, rows: u32) -> TilePicture {
        let mut raster = Raster::new(columns, rows);
        for (i, color) in pixels.iter().enumerate() {
            let [r, g, b] = color.to_bytes();
            raster.put_pixel(i as u32 % columns, i as u32 / columns, [r, g, b, 255]);
        }
        TilePicture::with_image(raster.into_shared(), columns, rows, 1.0).unwrap()
    }

    fn pool(width: u32, height: u32, columns: u32, rows: u32) -> TilePool<Raster> {
        let mut pool = TilePool::new(Raster::default());
        pool.set_size(width, height, columns, rows).unwrap();
        pool
    }

    #[test]
    fn test_defaults() {
        let pool = TilePool::new(Raster::new(30, 20));
        assert_eq!(pool.color_blending(), 0.2);
        assert_eq!((pool.width(), pool.height()), (30, 20));
        assert_eq!(pool.size(), 1);
        assert_eq!(pool.pool_size(), 0);
    }

    #[test]
    fn test_add_picture_replaces_on_collision() {
        let mut pool = pool(10, 10, 2, 2);
        assert!(pool.add_picture(tile(RED, 5)).unwrap().is_none());
        assert!(pool.add_picture(tile(BLUE, 5)).unwrap().is_none());

        let replaced = pool.add_picture(tile(RED, 5)).unwrap();
        assert!(replaced.is_some());
        assert_eq!(pool.pool_size(), 2);
        assert_eq!(pool.colors(), &[RED, BLUE]);
    }

    #[test]
    fn test_add_unrendered_tile() {
        let mut pool = pool(10, 10, 2, 2);
        let empty = TilePicture::new(5, 5, 1.0).unwrap();
        assert!(matches!(
            pool.add_picture(empty),
            Err(MosaicError::UnrenderedTile)
        ));
        assert_eq!(pool.pool_size(), 0);
    }

    #[test]
    fn test_closest_color_on_empty_pool() {
        let pool = pool(10, 10, 2, 2);
        assert_eq!(pool.get_closest_color(RED), Err(MosaicError::EmptyPool));
    }

    #[test]
    fn test_set_size_rejects_zero() {
        let mut pool = pool(10, 10, 2, 2);
        assert!(matches!(
            pool.set_size(10, 10, 0, 2),
            Err(MosaicError::InvalidDimensions(_))
        ));
        assert_eq!(pool.columns(), 2);
    }

    #[test]
    fn test_set_size_resizes_tiles_and_surface() {
        let mut pool = pool(10, 10, 2, 2);
        pool.add_picture(tile(RED, 5)).unwrap();
        pool.set_size(30, 12, 3, 4).unwrap();

        assert_eq!(pool.surface().size(), (30, 12));
        assert_eq!(pool.tile_size(), (10, 3));
        let resized = pool.tile(RED).unwrap();
        assert_eq!((resized.width(), resized.height()), (10, 3));
    }

    #[test]
    fn test_set_size_rekeys_changed_colors() {
        // a tile whose color depends on the crop: red left, blue right
        let mut image = Raster::new(20, 10);
        for y in 0..10 {
            for x in 0..20 {
                image.put_pixel(x, y, if x < 5 { [255, 0, 0, 255] } else { [0, 0, 255, 255] });
            }
        }
        let mut pool = pool(20, 10, 1, 1);
        let split = TilePicture::with_image(image.into_shared(), 20, 10, 1.0).unwrap();
        let before = split.average_color().unwrap();
        pool.add_picture(split).unwrap();
        pool.add_picture(tile(RED, 20)).unwrap();

        // a square cell drops the red edge
        pool.set_size(10, 10, 1, 1).unwrap();
        let after = pool.colors()[0];
        assert_ne!(after, before);
        assert_eq!(pool.colors(), &[after, RED]);
        assert_eq!(pool.tile(after).unwrap().average_color(), Some(after));
        assert!(pool.tile(before).is_none());
    }

    #[test]
    fn test_set_size_keeps_tiles_whose_colors_collide() {
        // red, green and blue thirds average to #555555 in a 3:1 cell
        let mut striped = Raster::new(30, 10);
        for y in 0..10 {
            for x in 0..30 {
                let px = match x / 10 {
                    0 => [255, 0, 0, 255],
                    1 => [0, 255, 0, 255],
                    _ => [0, 0, 255, 255],
                };
                striped.put_pixel(x, y, px);
            }
        }
        let gray = Color::from_rgb(85, 85, 85);
        let green = Color::from_rgb(0, 255, 0);

        let mut pool = pool(30, 10, 1, 1);
        let stripes = TilePicture::with_image(striped.into_shared(), 30, 10, 1.0).unwrap();
        assert_eq!(stripes.average_color(), Some(gray));
        pool.add_picture(stripes).unwrap();
        pool.add_picture(tile(green, 30)).unwrap();

        // a square cell keeps only the green middle stripe
        pool.set_size(10, 10, 1, 1).unwrap();
        assert_eq!(pool.pool_size(), 2);
        assert_eq!(pool.colors(), &[green, green]);

        // the earlier tile answers lookups and takes replacements
        assert_eq!(pool.get_closest_color(green).unwrap(), green);
        let replaced = pool.add_picture(tile(green, 10)).unwrap().unwrap();
        assert_eq!(replaced.image().map(|image| image.natural_width()), Some(30));
        assert_eq!(pool.pool_size(), 2);
    }

    #[test]
    fn test_set_target_checks_grid() {
        let mut pool = pool(10, 10, 2, 2);
        pool.add_picture(tile(RED, 5)).unwrap();

        let wrong = target(&[RED], 1, 1);
        assert_eq!(
            pool.set_target(wrong),
            Err(MosaicError::GridMismatch {
                expected: 4,
                actual: 1
            })
        );
        assert!(pool.target().is_none());
    }

    #[test]
    fn test_draw_grid_requires_target() {
        let mut pool = pool(10, 10, 2, 2);
        pool.add_picture(tile(RED, 5)).unwrap();
        assert_eq!(pool.draw_grid(), Err(MosaicError::MissingTarget));
    }

    #[test]
    fn test_empty_pool_keeps_target() {
        let mut pool = pool(10, 10, 1, 1);
        assert_eq!(
            pool.set_target(target(&[RED], 1, 1)),
            Err(MosaicError::EmptyPool)
        );
        assert!(pool.target().is_some());
        assert!(pool.surface().data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_full_blending_needs_no_tiles() {
        let mut pool = pool(4, 2, 2, 1);
        pool.set_color_blending(1.0).unwrap();
        pool.set_target(target(&[RED, BLUE], 2, 1)).unwrap();

        let surface = pool.surface();
        assert_eq!(surface.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(surface.pixel(1, 1), [255, 0, 0, 255]);
        assert_eq!(surface.pixel(2, 0), [0, 0, 255, 255]);
        assert_eq!(surface.pixel(3, 1), [0, 0, 255, 255]);
    }

    #[test]
    fn test_draws_nearest_tile_per_cell() {
        let mut pool = pool(4, 4, 2, 2);
        pool.set_color_blending(0.0).unwrap();
        pool.add_picture(tile(RED, 2)).unwrap();
        pool.add_picture(tile(BLUE, 2)).unwrap();

        let dark_red = Color::from_rgb(200, 10, 10);
        let dark_blue = Color::from_rgb(10, 10, 200);
        pool.set_target(target(&[dark_red, dark_blue, dark_blue, dark_red], 2, 2))
            .unwrap();

        let surface = pool.surface();
        assert_eq!(surface.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(surface.pixel(3, 0), [0, 0, 255, 255]);
        assert_eq!(surface.pixel(1, 3), [0, 0, 255, 255]);
        assert_eq!(surface.pixel(3, 3), [255, 0, 0, 255]);
    }

    #[test]
    fn test_set_size_resizes_target() {
        let mut pool = pool(10, 10, 1, 1);
        pool.add_picture(tile(RED, 10)).unwrap();
        pool.set_target(target(&[RED], 1, 1)).unwrap();

        pool.set_size(20, 10, 4, 2).unwrap();
        let target = pool.target().unwrap();
        assert_eq!(target.raster().pixel_count(), 8);
        assert_eq!(target.aspect_ratio(), 1.0);
        pool.draw_grid().unwrap();
    }

    #[test]
    fn test_color_blending_range() {
        let mut pool = pool(10, 10, 1, 1);
        assert_eq!(
            pool.set_color_blending(1.5),
            Err(MosaicError::InvalidBlending(1.5))
        );
        assert!(pool.set_color_blending(f64::NAN).is_err());
        pool.set_color_blending(0.0).unwrap();
        assert_eq!(pool.color_blending(), 0.0);
    }
}
