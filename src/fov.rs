//! Fog of war: what the player sees now versus what they have ever seen.

use glam::Vec2;

use crate::config::VisionTuning;
use crate::grid::{world_to_tile, Grid};
use crate::line::BresenhamLine;

/// Vision radius multiplier for a wisdom stat (1.0 at the baseline, never negative)
pub fn vision_multiplier(tuning: &VisionTuning, wisdom: i32) -> f32 {
    (1.0 + tuning.per_wisdom * (wisdom - tuning.wisdom_baseline) as f32).max(0.0)
}

/// Base radius in tiles scaled by the wisdom multiplier
pub fn effective_radius(tuning: &VisionTuning, wisdom: i32) -> f32 {
    tuning.base_radius.max(0.0) * vision_multiplier(tuning, wisdom)
}

/// Check whether `to` can be seen from `from`.
///
/// Every intermediate tile must be walkable. The destination itself counts
/// only when it is walkable, so a wall stops the ray one step short.
pub fn has_line_of_sight(grid: &Grid, from: (i32, i32), to: (i32, i32)) -> bool {
    for step in BresenhamLine::new(from.0, from.1, to.0, to.1) {
        if step == to {
            return grid.is_walkable(to.0, to.1);
        }
        if step != from && !grid.is_walkable(step.0, step.1) {
            return false;
        }
    }
    // from == to
    true
}

/// Explored and visible tile sets for one map.
///
/// `visible` is rebuilt on every update; `explored` only ever grows until
/// [`Visibility::reset`] is called for a new map. Anything visible is explored.
#[derive(Debug, Clone)]
pub struct Visibility {
    width: usize,
    height: usize,
    explored: Vec<bool>,
    visible: Vec<bool>,
}

impl Visibility {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            explored: vec![false; width * height],
            visible: vec![false; width * height],
        }
    }

    /// Rebuild both grids for new map dimensions, forgetting everything explored
    pub fn reset(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    fn mark(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.visible[i] = true;
            self.explored[i] = true;
        }
    }

    /// Recompute the visible set from a viewer tile and a radius in tiles.
    pub fn update(&mut self, grid: &Grid, viewer: (i32, i32), radius: f32) {
        puffin::profile_function!();

        if grid.dimensions() != self.dimensions() {
            tracing::warn!(
                "visibility grid {:?} does not match map {:?}, resetting",
                self.dimensions(),
                grid.dimensions()
            );
            self.reset(grid.width, grid.height);
        }

        self.visible.fill(false);

        // Viewer's own tile is always seen, even at radius 0
        self.mark(viewer.0, viewer.1);

        let radius = radius.max(0.0);
        let reach = radius.ceil() as i32;
        let radius_sq = f64::from(radius) * f64::from(radius);

        // Scan only the part of the bounding box that lies on the map
        let min_x = viewer.0.saturating_sub(reach).max(0);
        let max_x = viewer.0.saturating_add(reach).min(grid.width as i32 - 1);
        let min_y = viewer.1.saturating_sub(reach).max(0);
        let max_y = viewer.1.saturating_add(reach).min(grid.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if (x, y) == viewer {
                    continue;
                }
                let dx = i64::from(x) - i64::from(viewer.0);
                let dy = i64::from(y) - i64::from(viewer.1);
                if (dx * dx + dy * dy) as f64 > radius_sq {
                    continue;
                }
                if has_line_of_sight(grid, viewer, (x, y)) {
                    self.mark(x, y);
                }
            }
        }
    }

    /// Update from a world-space viewer position with a wisdom-scaled radius
    pub fn update_for_viewer(&mut self, grid: &Grid, viewer: Vec2, tuning: &VisionTuning, wisdom: i32) {
        let radius = effective_radius(tuning, wisdom);
        self.update(grid, world_to_tile(viewer), radius);
    }

    /// Mark every tile explored and visible
    pub fn reveal_all(&mut self) {
        self.explored.fill(true);
        self.visible.fill(true);
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|i| self.visible[i]).unwrap_or(false)
    }

    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|i| self.explored[i]).unwrap_or(false)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    pub fn explored_count(&self) -> usize {
        self.explored.iter().filter(|e| **e).count()
    }

    /// All currently visible tiles, row by row
    pub fn visible_tiles(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.visible
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(move |(i, _)| ((i % self.width) as i32, (i / self.width) as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::CellKind;

    fn make_grid(width: usize, height: usize, walls: &[(i32, i32)]) -> Grid {
        let mut cells = vec![CellKind::Floor; width * height];
        for &(x, y) in walls {
            cells[y as usize * width + x as usize] = CellKind::Wall;
        }
        Grid::from_cells(width, height, cells).unwrap()
    }

    fn assert_visible_implies_explored(vis: &Visibility) {
        let (w, h) = vis.dimensions();
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                if vis.is_visible(x, y) {
                    assert!(vis.is_explored(x, y), "({x}, {y}) visible but not explored");
                }
            }
        }
    }

    #[test]
    fn test_radius_zero_marks_viewer() {
        let grid = make_grid(5, 5, &[]);
        let mut vis = Visibility::new(5, 5);
        vis.update(&grid, (2, 2), 0.0);
        assert!(vis.is_visible(2, 2));
        assert!(vis.is_explored(2, 2));
        assert_eq!(vis.visible_count(), 1);
    }

    #[test]
    fn test_open_grid_radius_two_is_a_disc() {
        let grid = make_grid(5, 5, &[]);
        let mut vis = Visibility::new(5, 5);
        vis.update(&grid, (2, 2), 2.0);
        // Center, 4 orthogonal at 1, 4 diagonal at sqrt(2), 4 orthogonal at 2
        assert_eq!(vis.visible_count(), 13);
        assert_eq!(vis.explored_count(), 13);
        assert!(!vis.is_visible(0, 0));
        assert!(!vis.is_visible(0, 1));
        assert!(vis.is_visible(0, 2));
        assert!(vis.is_visible(1, 1));
    }

    #[test]
    fn test_five_by_five_radius_two_with_wall_on_ray() {
        let mut vis = Visibility::new(5, 5);
        vis.update(&make_grid(5, 5, &[]), (2, 2), 2.0);
        let open: Vec<(i32, i32)> = vis.visible_tiles().collect();
        assert_eq!(open.len(), 13);

        // A wall between the viewer and (4, 2) hides itself and that tile only
        vis.update(&make_grid(5, 5, &[(3, 2)]), (2, 2), 2.0);
        for tile in open {
            let hidden = tile == (3, 2) || tile == (4, 2);
            assert_eq!(vis.is_visible(tile.0, tile.1), !hidden, "{tile:?}");
        }
        assert_eq!(vis.visible_count(), 11);
    }

    #[test]
    fn test_huge_radius_is_clipped_to_the_map() {
        let grid = make_grid(10, 10, &[]);
        let mut vis = Visibility::new(10, 10);
        vis.update(&grid, (4, 4), 50_000.0);
        assert_eq!(vis.visible_count(), 100);

        vis.update(&grid, (0, 0), f32::MAX);
        assert_eq!(vis.visible_count(), 100);

        let tuning = VisionTuning {
            base_radius: 50_000.0,
            ..VisionTuning::default()
        };
        vis.update_for_viewer(&grid, crate::grid::tile_center(9, 9), &tuning, tuning.wisdom_baseline + 100);
        assert_eq!(vis.visible_count(), 100);
    }

    #[test]
    fn test_open_grid_fully_visible_when_radius_covers_it() {
        let grid = make_grid(5, 5, &[]);
        let mut vis = Visibility::new(5, 5);
        vis.update(&grid, (2, 2), 3.0);
        assert_eq!(vis.visible_count(), 25);
        assert_eq!(vis.explored_count(), 25);
    }

    #[test]
    fn test_wall_blocks_tile_behind_it() {
        let grid = make_grid(5, 5, &[(3, 2)]);
        let mut vis = Visibility::new(5, 5);
        vis.update(&grid, (2, 2), 3.0);

        // Wall tiles are never a visible destination, and nothing behind them is seen
        assert!(!vis.is_visible(3, 2));
        assert!(!vis.is_visible(4, 2));
        // The shallow rays to (4, 1) and (4, 3) also step through the wall first
        assert!(!vis.is_visible(4, 1));
        assert!(!vis.is_visible(4, 3));
        assert!(vis.is_visible(4, 0));
        assert!(vis.is_visible(4, 4));
        assert!(vis.is_visible(3, 1));
        assert!(vis.is_visible(1, 2));
        assert_eq!(vis.visible_count(), 21);
    }

    #[test]
    fn test_wall_blocks_everything_beyond_on_the_ray() {
        let grid = make_grid(9, 3, &[(5, 1)]);
        let mut vis = Visibility::new(9, 3);
        vis.update(&grid, (3, 1), 6.0);
        assert!(vis.is_visible(4, 1));
        assert!(!vis.is_visible(5, 1));
        assert!(!vis.is_visible(6, 1));
        assert!(!vis.is_visible(7, 1));
        assert!(!vis.is_visible(8, 1));
    }

    #[test]
    fn test_explored_persists_and_visible_clears() {
        let grid = make_grid(20, 3, &[]);
        let mut vis = Visibility::new(20, 3);
        vis.update(&grid, (2, 1), 2.0);
        assert!(vis.is_visible(0, 1));

        vis.update(&grid, (17, 1), 2.0);
        assert!(!vis.is_visible(0, 1));
        assert!(vis.is_explored(0, 1));
        assert!(vis.is_visible(19, 1));
        assert_visible_implies_explored(&vis);
    }

    #[test]
    fn test_visible_implies_explored_over_many_updates() {
        let grid = make_grid(12, 12, &[(5, 5), (5, 6), (6, 5), (2, 8), (9, 3)]);
        let mut vis = Visibility::new(12, 12);
        let path = [(1, 1), (3, 4), (7, 7), (10, 2), (0, 11), (11, 11), (6, 6)];
        let mut previously_explored = 0;
        for (i, viewer) in path.iter().enumerate() {
            vis.update(&grid, *viewer, 1.5 + i as f32);
            assert_visible_implies_explored(&vis);
            assert!(vis.explored_count() >= previously_explored);
            previously_explored = vis.explored_count();
        }
    }

    #[test]
    fn test_out_of_bounds_viewer_and_edges() {
        let grid = make_grid(4, 4, &[]);
        let mut vis = Visibility::new(4, 4);
        vis.update(&grid, (0, 0), 2.0);
        assert!(vis.is_visible(2, 0));
        assert!(!vis.is_visible(-1, 0));
        assert_visible_implies_explored(&vis);
    }

    #[test]
    fn test_reveal_all_and_reset() {
        let mut vis = Visibility::new(3, 2);
        vis.reveal_all();
        assert_eq!(vis.visible_count(), 6);
        assert_eq!(vis.explored_count(), 6);

        vis.reset(4, 4);
        assert_eq!(vis.dimensions(), (4, 4));
        assert_eq!(vis.explored_count(), 0);
        assert_eq!(vis.visible_count(), 0);
    }

    #[test]
    fn test_mismatched_grid_resets() {
        let grid = make_grid(6, 6, &[]);
        let mut vis = Visibility::new(2, 2);
        vis.update(&grid, (3, 3), 1.0);
        assert_eq!(vis.dimensions(), (6, 6));
        assert!(vis.is_visible(3, 4));
    }

    #[test]
    fn test_vision_multiplier() {
        let tuning = VisionTuning::default();
        let base = tuning.wisdom_baseline;
        assert!((vision_multiplier(&tuning, base) - 1.0).abs() < 1e-6);
        assert!((vision_multiplier(&tuning, base + 2) - 1.3).abs() < 1e-6);
        assert!((vision_multiplier(&tuning, base - 2) - 0.7).abs() < 1e-6);
        assert_eq!(vision_multiplier(&tuning, -100), 0.0);
        assert!((effective_radius(&tuning, base + 4) - 12.8).abs() < 1e-4);
    }

    #[test]
    fn test_update_for_viewer_uses_wisdom() {
        let grid = make_grid(11, 1, &[]);
        let mut vis = Visibility::new(11, 1);
        let viewer = crate::grid::tile_center(0, 0);
        let tuning = VisionTuning {
            base_radius: 4.0,
            ..VisionTuning::default()
        };

        vis.update_for_viewer(&grid, viewer, &tuning, tuning.wisdom_baseline);
        assert!(vis.is_visible(4, 0));
        assert!(!vis.is_visible(5, 0));

        vis.update_for_viewer(&grid, viewer, &tuning, tuning.wisdom_baseline + 4);
        assert!(vis.is_visible(6, 0));
        assert!(!vis.is_visible(7, 0));
    }
}
