//! Tile Map - sparse layered tiles with a scrolling viewport
//!
//! The tilesheet is cut into square tile textures indexed from the top-left,
//! row-major. Tiles are image elements addressed by map cell and layer, so
//! several layers can stack on one cell. Only tiles that intersect the
//! viewport are drawn, each shifted by the viewport's location.

use std::any::Any;
use std::collections::HashMap;

use crate::core::config::TileMapConfig;
use crate::events::InputEvent;
use crate::foundation::math::{snap, Point, Rect, Vec2};
use crate::foundation::time::FrameTime;
use crate::ui::component::{Component, PanelRule};
use crate::ui::element::Element;
use crate::ui::error::{UiError, UiResult};
use crate::ui::panel::Panel;
use crate::ui::surface::DrawSurface;
use crate::ui::texture::{frame_grid, Texture};

/// Address of one tile: map cell plus layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    /// Column in tiles
    pub x: i32,
    /// Row in tiles
    pub y: i32,
    /// Layer, also the tile's draw order
    pub layer: usize,
}

impl TileKey {
    /// Create a tile key
    pub const fn new(x: i32, y: i32, layer: usize) -> Self {
        Self { x, y, layer }
    }

    /// Element id of the tile
    pub fn id(&self) -> String {
        format!("image@[{}, {}, {}]", self.x, self.y, self.layer)
    }
}

/// Row-major texture indices for each layer of a map
///
/// `None` cells are left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerGrid {
    width: usize,
    height: usize,
    layers: Vec<Vec<Option<usize>>>,
}

impl LayerGrid {
    /// Create a grid, checking every layer has `width * height` cells
    pub fn new(width: usize, height: usize, layers: Vec<Vec<Option<usize>>>) -> UiResult<Self> {
        let expected = width * height;
        let mismatch = layers.iter().enumerate().find(|(_, cells)| cells.len() != expected);
        if let Some((layer, cells)) = mismatch {
            return Err(UiError::GridSizeMismatch {
                layer,
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self { width, height, layers })
    }

    /// Create a square grid whose side is inferred from the cell count
    pub fn square(layers: Vec<Vec<Option<usize>>>) -> UiResult<Self> {
        let cells = layers.first().map_or(0, Vec::len);
        let side = (cells as f64).sqrt() as usize;
        if side * side != cells {
            return Err(UiError::NonSquareGrid(cells));
        }
        Self::new(side, side, layers)
    }

    /// Create a grid where every cell holds a tile
    pub fn from_dense(width: usize, height: usize, layers: Vec<Vec<usize>>) -> UiResult<Self> {
        let layers = layers
            .into_iter()
            .map(|cells| cells.into_iter().map(Some).collect())
            .collect();
        Self::new(width, height, layers)
    }

    /// Width in tiles
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of layers
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Every occupied cell with its texture index, layer by layer
    pub fn tiles(&self) -> impl Iterator<Item = (TileKey, usize)> + '_ {
        let width = self.width.max(1);
        self.layers.iter().enumerate().flat_map(move |(layer, cells)| {
            cells.iter().enumerate().filter_map(move |(i, cell)| {
                let key = TileKey::new((i % width) as i32, (i / width) as i32, layer);
                cell.map(|texture| (key, texture))
            })
        })
    }
}

/// Panel drawing a layered tile map through a viewport
#[derive(Debug)]
pub struct TileMap {
    component: Component,
    tile_size: i32,
    layers: usize,
    map_size: Point,
    tile_textures: HashMap<usize, Texture>,
    map_rectangle: Rect,
    viewport: Rect,
    viewport_center: Vec2,
}

impl TileMap {
    /// Build a tile map and slice its tilesheet
    ///
    /// `map_size` is in tiles; `viewport` is in map pixels. Fails if the sheet
    /// does not divide into whole tiles or the viewport is larger than the map.
    pub fn new(
        parent_rectangle: Rect,
        draw_order: i32,
        tile_sheet: &Texture,
        map_size: Point,
        viewport: Rect,
        layers: usize,
        tile_size: u32,
    ) -> UiResult<Self> {
        if layers == 0 {
            return Err(UiError::InvalidConfig("Tile map needs at least one layer".to_string()));
        }
        if map_size.x <= 0 || map_size.y <= 0 {
            return Err(UiError::InvalidConfig(format!(
                "Map size {}x{} must be positive",
                map_size.x, map_size.y
            )));
        }

        let tile_size = i32::try_from(tile_size)
            .map_err(|_| UiError::InvalidConfig(format!("Tile size {} is too large", tile_size)))?;
        let cells = frame_grid(tile_sheet.bounds(), Point::new(tile_size, tile_size))?;
        let extent = |tiles: i32| {
            tiles.checked_mul(tile_size).ok_or_else(|| {
                UiError::InvalidConfig(format!(
                    "Map of {} tiles at {} px does not fit in pixel coordinates",
                    tiles, tile_size
                ))
            })
        };
        let map_rectangle = Rect::new(0, 0, extent(map_size.x)?, extent(map_size.y)?);
        if viewport.width > map_rectangle.width || viewport.height > map_rectangle.height {
            return Err(UiError::ViewportTooLarge {
                viewport: viewport.size(),
                map: map_rectangle.size(),
            });
        }

        let tile_textures: HashMap<usize, Texture> = cells
            .into_iter()
            .enumerate()
            .map(|(index, cell)| {
                let texture = tile_sheet.region(
                    cell.x as u32,
                    cell.y as u32,
                    cell.width as u32,
                    cell.height as u32,
                );
                (index, texture)
            })
            .collect();

        log::info!(
            "Tile map {}x{} tiles, {} layers, {} tile textures",
            map_size.x,
            map_size.y,
            layers,
            tile_textures.len()
        );

        let panel = Rect::new(0, 0, viewport.width, viewport.height);
        Ok(Self {
            component: Component::new(
                "tile_map",
                draw_order,
                PanelRule::Fixed(panel),
                parent_rectangle,
            ),
            tile_size,
            layers,
            map_size,
            tile_textures,
            map_rectangle,
            viewport,
            viewport_center: viewport.center().to_vec2(),
        })
    }

    /// Build a tile map from configuration
    pub fn from_config(
        config: &TileMapConfig,
        parent_rectangle: Rect,
        draw_order: i32,
        tile_sheet: &Texture,
    ) -> UiResult<Self> {
        config.validate()?;
        let tiles = |count: u32| {
            i32::try_from(count).map_err(|_| {
                UiError::InvalidConfig(format!("Map side of {count} tiles is too large"))
            })
        };
        Self::new(
            parent_rectangle,
            draw_order,
            tile_sheet,
            Point::new(tiles(config.map_width)?, tiles(config.map_height)?),
            config.viewport(),
            config.layers,
            config.tile_size,
        )
    }

    /// Edge length of a tile in pixels
    pub const fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Number of layers
    pub const fn layers(&self) -> usize {
        self.layers
    }

    /// Map size in tiles
    pub const fn map_size(&self) -> Point {
        self.map_size
    }

    /// Map size in pixels, anchored at the origin
    pub const fn map_rectangle(&self) -> Rect {
        self.map_rectangle
    }

    /// Window of the map currently drawn
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Point the viewport follows
    pub const fn viewport_center(&self) -> Vec2 {
        self.viewport_center
    }

    /// Tile textures by index
    pub const fn tile_textures(&self) -> &HashMap<usize, Texture> {
        &self.tile_textures
    }

    /// Tile at a cell and layer
    pub fn tile_at(&self, x: i32, y: i32, layer: usize) -> Option<&Element> {
        self.component.element(&TileKey::new(x, y, layer).id())
    }

    /// Move the point the viewport follows; applied on the next update
    pub fn set_viewport_center(&mut self, center: Vec2) {
        self.viewport_center = center;
    }

    /// Place a tile, replacing whatever was on the same cell and layer
    pub fn add_image(&mut self, x: i32, y: i32, texture_id: usize, layer: usize) -> UiResult<()> {
        self.check_tile(TileKey::new(x, y, layer), texture_id)?;
        self.place(TileKey::new(x, y, layer), texture_id)
    }

    fn check_tile(&self, key: TileKey, texture_id: usize) -> UiResult<()> {
        if key.layer >= self.layers {
            return Err(UiError::LayerOutOfRange {
                layer: key.layer,
                layers: self.layers,
            });
        }
        if key.x < 0 || key.y < 0 || key.x >= self.map_size.x || key.y >= self.map_size.y {
            return Err(UiError::TileOutOfBounds(Point::new(key.x, key.y)));
        }
        if !self.tile_textures.contains_key(&texture_id) {
            return Err(UiError::TextureNotFound(texture_id));
        }
        Ok(())
    }

    fn place(&mut self, key: TileKey, texture_id: usize) -> UiResult<()> {
        let texture = self
            .tile_textures
            .get(&texture_id)
            .cloned()
            .ok_or(UiError::TextureNotFound(texture_id))?;

        let id = key.id();
        let position = Vec2::new((key.x * self.tile_size) as f32, (key.y * self.tile_size) as f32);
        self.component
            .add_element(Element::image(id.as_str(), position, texture, key.layer as i32));
        self.component.show_element(&id)
    }

    /// Remove every layer's tile at a cell
    ///
    /// The removed tiles are hidden and returned, bottom layer first.
    pub fn remove_image(&mut self, x: i32, y: i32) -> UiResult<Vec<Element>> {
        let removed: Vec<Element> = (0..self.layers)
            .filter_map(|layer| self.component.remove_element(&TileKey::new(x, y, layer).id()))
            .collect();

        if removed.is_empty() {
            return Err(UiError::ElementNotFound(format!("image@[{x}, {y}]")));
        }
        Ok(removed)
    }

    /// Remove the tile on one layer of a cell
    pub fn remove_layer_image(&mut self, x: i32, y: i32, layer: usize) -> UiResult<Element> {
        let id = TileKey::new(x, y, layer).id();
        self.component
            .remove_element(&id)
            .ok_or(UiError::ElementNotFound(id))
    }

    /// Load every layer of a grid
    ///
    /// Every tile is checked before any is placed, so a bad grid leaves the
    /// map untouched. Returns the number of tiles placed.
    pub fn load_layers(&mut self, grid: &LayerGrid) -> UiResult<usize> {
        for (key, texture_id) in grid.tiles() {
            self.check_tile(key, texture_id)?;
        }

        let mut placed = 0;
        for (key, texture_id) in grid.tiles() {
            self.place(key, texture_id)?;
            placed += 1;
        }

        log::debug!("Loaded {} tiles over {} layers", placed, grid.layer_count());
        Ok(placed)
    }

    /// Clamp a viewport location so the viewport stays on the map
    pub fn clamp_location(&self, location: Point) -> Point {
        Point::new(
            location
                .x
                .clamp(0, self.map_rectangle.width - self.viewport.width),
            location
                .y
                .clamp(0, self.map_rectangle.height - self.viewport.height),
        )
    }

    fn follow_center(&mut self) {
        let half_tile = (self.tile_size / 2) as f32;
        let half_viewport = Point::new(self.viewport.width / 2, self.viewport.height / 2);
        let location = snap(self.viewport_center + Vec2::new(half_tile, half_tile)) - half_viewport;
        self.viewport = self.viewport.with_location(self.clamp_location(location));
    }
}

impl Panel for TileMap {
    fn component(&self) -> &Component {
        &self.component
    }

    fn component_mut(&mut self) -> &mut Component {
        &mut self.component
    }

    /// Cursor positions are moved into map coordinates before delivery
    fn publish(&mut self, event: &InputEvent) {
        let event = event.translated(self.viewport.location());
        self.component.publish(&event);
    }

    /// Recenter the viewport, keeping it inside the map
    fn update(&mut self, time: &FrameTime) {
        self.follow_center();
        self.component.update(time);
    }

    /// Draw tiles that intersect the viewport, relative to its location
    fn draw(&self, time: &FrameTime, surface: &mut dyn DrawSurface) -> UiResult<()> {
        let origin = self.viewport.location().to_vec2();

        surface.begin()?;
        let result = self
            .component
            .visible_elements()
            .iter()
            .filter_map(|key| self.component.get(*key))
            .filter(|tile| self.viewport.intersects(&tile.rectangle()))
            .try_for_each(|tile| tile.draw_at(time, surface, tile.position() - origin));
        surface.end()?;
        result
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ElementEventKind;
    use crate::ui::surface::{Placement, RecordingSurface};

    /// Two 32 px tiles side by side
    fn sheet() -> Texture {
        Texture::solid_color(64, 32, [200, 200, 200, 255])
    }

    fn map(size: Point, viewport: Rect, layers: usize) -> TileMap {
        TileMap::new(Rect::new(0, 0, 800, 600), 0, &sheet(), size, viewport, layers, 32).unwrap()
    }

    fn update(map: &mut TileMap, center: Vec2) {
        map.set_viewport_center(center);
        map.update(&FrameTime::default());
    }

    #[test]
    fn test_tilesheet_sliced_row_major() {
        let map = map(Point::new(3, 3), Rect::new(0, 0, 96, 96), 1);

        assert_eq!(map.tile_textures().len(), 2);
        assert_eq!(map.map_rectangle(), Rect::new(0, 0, 96, 96));
        assert_eq!(map.tile_textures()[&1].bounds(), Rect::new(0, 0, 32, 32));
    }

    #[test]
    fn test_uneven_tilesheet_fails() {
        let result = TileMap::new(
            Rect::empty(),
            0,
            &Texture::solid_color(70, 32, [0; 4]),
            Point::new(3, 3),
            Rect::new(0, 0, 96, 96),
            1,
            32,
        );
        assert!(matches!(result, Err(UiError::SheetSizeMismatch { .. })));
    }

    #[test]
    fn test_viewport_larger_than_map_fails() {
        let viewport = Rect::new(0, 0, 97, 96);
        let result = TileMap::new(Rect::empty(), 0, &sheet(), Point::new(3, 3), viewport, 1, 32);
        assert!(matches!(result, Err(UiError::ViewportTooLarge { .. })));
    }

    #[test]
    fn test_map_too_large_for_pixel_coordinates_fails() {
        let viewport = Rect::new(0, 0, 32, 32);
        let size = Point::new(i32::MAX / 16, 3);
        let result = TileMap::new(Rect::empty(), 0, &sheet(), size, viewport, 1, 32);
        assert!(matches!(result, Err(UiError::InvalidConfig(_))));

        let huge = TileMapConfig::new(200_000_000, 2);
        assert!(matches!(
            TileMap::from_config(&huge, Rect::empty(), 0, &sheet()),
            Err(UiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_three_by_three() {
        let mut map = map(Point::new(3, 3), Rect::new(0, 0, 96, 96), 1);
        let grid = LayerGrid::square(vec![(0..9).map(|i| Some(i % 2)).collect()]).unwrap();

        assert_eq!(map.load_layers(&grid).unwrap(), 9);

        for i in 0..9_i32 {
            let tile = map.tile_at(i % 3, i / 3, 0).unwrap();
            assert_eq!(tile.position(), Vec2::new((i % 3 * 32) as f32, (i / 3 * 32) as f32));
            assert_eq!(tile.draw_order(), 0);
            assert!(tile.is_visible());
            let texture = &map.tile_textures()[&((i % 2) as usize)];
            assert_eq!(tile.kind().texture().handle(), texture.handle());
        }
    }

    #[test]
    fn test_bad_grid_leaves_map_untouched() {
        let mut map = map(Point::new(2, 2), Rect::new(0, 0, 64, 64), 1);
        let grid = LayerGrid::from_dense(2, 2, vec![vec![0, 1, 1, 7]]).unwrap();

        assert!(matches!(map.load_layers(&grid), Err(UiError::TextureNotFound(7))));
        assert!(map.component().is_empty());
    }

    #[test]
    fn test_layer_grid_shape_checks() {
        let result = LayerGrid::square(vec![vec![Some(0); 8]]);
        assert!(matches!(result, Err(UiError::NonSquareGrid(8))));
        assert!(matches!(
            LayerGrid::new(3, 2, vec![vec![None; 6], vec![None; 5]]),
            Err(UiError::GridSizeMismatch { layer: 1, expected: 6, actual: 5 })
        ));

        let grid = LayerGrid::new(3, 2, vec![vec![None, None, None, None, Some(1), None]]).unwrap();
        assert_eq!(grid.tiles().collect::<Vec<_>>(), vec![(TileKey::new(1, 1, 0), 1)]);
    }

    #[test]
    fn test_viewport_clamped_on_both_axes() {
        let mut map = map(Point::new(10, 10), Rect::new(0, 0, 100, 100), 1);

        update(&mut map, Vec2::new(1000.0, 1000.0));
        assert_eq!(map.viewport().location(), Point::new(220, 220));

        update(&mut map, Vec2::new(-500.0, -500.0));
        assert_eq!(map.viewport().location(), Point::zero());

        update(&mut map, Vec2::new(160.0, 100.0));
        assert_eq!(map.viewport().location(), Point::new(126, 66));
        assert_eq!(map.viewport().size(), Point::new(100, 100));
    }

    #[test]
    fn test_vertical_clamp_uses_map_height() {
        let mut map = map(Point::new(20, 5), Rect::new(0, 0, 100, 100), 1);

        update(&mut map, Vec2::new(5000.0, 5000.0));

        assert_eq!(map.viewport().location(), Point::new(540, 60));
    }

    #[test]
    fn test_add_remove_round_trip() {
        let mut map = map(Point::new(3, 3), Rect::new(0, 0, 96, 96), 1);

        map.add_image(1, 2, 0, 0).unwrap();
        assert_eq!(map.component().len(), 1);
        assert_eq!(map.component().broadcast().len(), 1);

        let removed = map.remove_image(1, 2).unwrap();
        assert_eq!(removed.len(), 1);
        assert!(!removed[0].is_visible());
        assert!(!removed[0].is_enabled());
        assert!(map.component().is_empty());
        assert!(map.component().broadcast().is_empty());

        assert!(matches!(map.remove_image(1, 2), Err(UiError::ElementNotFound(_))));
    }

    #[test]
    fn test_layers_stack_on_one_cell() {
        let mut map = map(Point::new(3, 3), Rect::new(0, 0, 96, 96), 2);

        map.add_image(0, 0, 1, 1).unwrap();
        map.add_image(0, 0, 0, 0).unwrap();
        map.add_image(0, 0, 1, 0).unwrap();

        assert_eq!(map.component().len(), 2);
        let order: Vec<i32> = map
            .component()
            .visible_elements()
            .iter()
            .map(|key| map.component().get(*key).unwrap().draw_order())
            .collect();
        assert_eq!(order, vec![0, 1]);

        let top = map.remove_layer_image(0, 0, 1).unwrap();
        assert_eq!(top.id(), "image@[0, 0, 1]");
        assert!(map.tile_at(0, 0, 0).is_some());
    }

    #[test]
    fn test_add_image_validation() {
        let mut map = map(Point::new(3, 3), Rect::new(0, 0, 96, 96), 1);

        assert!(matches!(
            map.add_image(0, 0, 0, 1),
            Err(UiError::LayerOutOfRange { layer: 1, layers: 1 })
        ));
        assert!(matches!(map.add_image(3, 0, 0, 0), Err(UiError::TileOutOfBounds(_))));
        assert!(matches!(map.add_image(0, -1, 0, 0), Err(UiError::TileOutOfBounds(_))));
        assert!(matches!(map.add_image(0, 0, 2, 0), Err(UiError::TextureNotFound(2))));
        assert!(map.component().is_empty());
    }

    #[test]
    fn test_draw_culls_and_shifts_by_viewport() {
        let mut map = map(Point::new(10, 10), Rect::new(0, 0, 64, 64), 1);
        map.add_image(0, 0, 0, 0).unwrap();
        map.add_image(5, 5, 1, 0).unwrap();
        update(&mut map, Vec2::new(176.0, 176.0));
        assert_eq!(map.viewport(), Rect::new(160, 160, 64, 64));

        let mut surface = RecordingSurface::new();
        map.draw(&FrameTime::default(), &mut surface).unwrap();

        assert_eq!(surface.batches(), 1);
        assert_eq!(surface.calls().len(), 1);
        assert_eq!(
            surface.calls()[0].placement,
            Placement::At { position: Vec2::zeros(), scale: 1.0 }
        );
        assert_eq!(map.tile_at(5, 5, 0).unwrap().position(), Vec2::new(160.0, 160.0));
    }

    #[test]
    fn test_publish_uses_map_coordinates() {
        let mut map = map(Point::new(10, 10), Rect::new(0, 0, 64, 64), 1);
        map.add_image(5, 5, 0, 0).unwrap();
        update(&mut map, Vec2::new(176.0, 176.0));
        map.component_mut().drain_events();

        map.publish(&InputEvent::MouseMoved(Point::new(5, 5)));

        let events = map.component_mut().drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "image@[5, 5, 0]");
        assert_eq!(events[0].kind, ElementEventKind::MouseOver);
    }

    #[test]
    fn test_from_config() {
        let config = TileMapConfig::new(4, 4).with_viewport(64, 64).with_layers(2);
        let map = TileMap::from_config(&config, Rect::new(0, 0, 800, 600), 3, &sheet()).unwrap();

        assert_eq!(map.layers(), 2);
        assert_eq!(map.draw_order(), 3);
        assert_eq!(map.component().rectangle(), Rect::new(0, 0, 64, 64));

        let bad = TileMapConfig::new(1, 1);
        assert!(matches!(
            TileMap::from_config(&bad, Rect::empty(), 0, &sheet()),
            Err(UiError::InvalidConfig(_))
        ));
    }
}
