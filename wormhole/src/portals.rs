// portals.rs - Portal maps and the color-map parser that builds them
//
// Every non-black color in a tunnel bitmap marks portal pixels. Same-colored
// 8-connected regions are paired in order of their first pixel, and the
// i-th pixel of one region links to the i-th pixel of its partner.

use std::collections::{BTreeMap, HashMap, VecDeque};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::grid::{ColorMap, Coord, Rgb};

pub const BACKGROUND: Rgb = [0, 0, 0];

#[rustfmt::skip]
const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Symmetric coordinate pairing: `p -> q` is present exactly when `q -> p` is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalMap {
    links: HashMap<Coord, Coord>,
}

impl PortalMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_color_map(colors: &ColorMap) -> Self {
        build_portals(colors).map
    }

    /// Links `a` and `b` in both directions. Each coordinate joins at most one pair.
    pub fn link(&mut self, a: Coord, b: Coord) -> Result<()> {
        if a == b {
            return Err(Error::SelfLink(a));
        }
        for coord in [a, b] {
            if self.links.contains_key(&coord) {
                return Err(Error::AlreadyLinked(coord));
            }
        }
        self.insert_pair(a, b);
        Ok(())
    }

    fn insert_pair(&mut self, a: Coord, b: Coord) {
        self.links.insert(a, b);
        self.links.insert(b, a);
    }

    pub fn get(&self, coord: Coord) -> Option<Coord> {
        self.links.get(&coord).copied()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.links.contains_key(&coord)
    }

    // Portal cells, i.e. twice the number of pairs.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.links.iter().map(|(&from, &to)| (from, to))
    }
}

/// Why every portal of one color was discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColoringError {
    #[error("color {color:?} has {count} connected components (odd)")]
    OddComponentCount { color: Rgb, count: usize },

    #[error("color {color:?} pairs components of different sizes {first} and {second}")]
    SizeMismatch { color: Rgb, first: usize, second: usize },
}

#[derive(Debug, Clone, Default)]
pub struct PortalBuild {
    pub map: PortalMap,
    pub rejected: Vec<ColoringError>,
}

// Maximal 8-connected same-colored region, sorted row-major.
type Component = Vec<Coord>;

/// Builds a portal map from a tunnel bitmap.
///
/// Colors are handled independently: an odd number of components, or a pair
/// of components with different pixel counts, drops every portal of that
/// color and is reported in [`PortalBuild::rejected`].
pub fn build_portals(colors: &ColorMap) -> PortalBuild {
    let mut build = PortalBuild::default();

    for (color, mut components) in components_by_color(colors) {
        match pair_components(color, &mut components) {
            Ok(pairs) => {
                for (a, b) in pairs {
                    for (&from, &to) in a.iter().zip(b) {
                        build.map.insert_pair(from, to);
                    }
                }
            }
            Err(rejection) => {
                warn!("{rejection}; skipping this color");
                build.rejected.push(rejection);
            }
        }
    }

    debug!(
        portal_cells = build.map.len(),
        rejected = build.rejected.len(),
        "built portal map"
    );
    build
}

fn pair_components(
    color: Rgb,
    components: &mut [Component],
) -> std::result::Result<Vec<(&Component, &Component)>, ColoringError> {
    if components.len() % 2 != 0 {
        return Err(ColoringError::OddComponentCount { color, count: components.len() });
    }

    // Components are non-empty and internally sorted, so the first cell is the minimum.
    components.sort_by_key(|component| component[0]);

    let pairs: Vec<_> = components
        .chunks_exact(2)
        .map(|pair| (&pair[0], &pair[1]))
        .collect();

    if let Some((a, b)) = pairs.iter().find(|(a, b)| a.len() != b.len()) {
        return Err(ColoringError::SizeMismatch { color, first: a.len(), second: b.len() });
    }
    Ok(pairs)
}

fn components_by_color(colors: &ColorMap) -> BTreeMap<Rgb, Vec<Component>> {
    let (rows, cols) = (colors.rows(), colors.cols());
    let mut visited = vec![false; rows * cols];
    let mut by_color: BTreeMap<Rgb, Vec<Component>> = BTreeMap::new();
    let mut queue = VecDeque::new();

    for row in 0..rows {
        for col in 0..cols {
            let color = colors.get(row, col);
            if visited[row * cols + col] || color == BACKGROUND {
                continue;
            }

            visited[row * cols + col] = true;
            queue.push_back((row, col));
            let mut component = vec![(row as isize, col as isize)];

            while let Some((r, c)) = queue.pop_front() {
                for (dr, dc) in NEIGHBORS_8 {
                    let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc)) else {
                        continue;
                    };
                    if nr >= rows || nc >= cols || visited[nr * cols + nc] {
                        continue;
                    }
                    if colors.get(nr, nc) == color {
                        visited[nr * cols + nc] = true;
                        queue.push_back((nr, nc));
                        component.push((nr as isize, nc as isize));
                    }
                }
            }

            component.sort_unstable();
            by_color.entry(color).or_default().push(component);
        }
    }

    by_color
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RED: Rgb = [255, 0, 0];
    const GREEN: Rgb = [0, 255, 0];
    const BLUE: Rgb = [0, 0, 255];

    fn paint(rows: usize, cols: usize, cells: &[(usize, usize, Rgb)]) -> ColorMap {
        let mut colors = ColorMap::new(rows, cols);
        for &(row, col, color) in cells {
            colors.set(row, col, color);
        }
        colors
    }

    fn assert_symmetric(map: &PortalMap) {
        for (from, to) in map.iter() {
            assert_eq!(map.get(to), Some(from), "{from:?} -> {to:?} has no reverse link");
        }
    }

    #[test]
    fn test_black_image_has_no_portals() {
        let build = build_portals(&ColorMap::new(5, 5));
        assert!(build.map.is_empty());
        assert!(build.rejected.is_empty());
    }

    #[test]
    fn test_single_pixel_pair() {
        let colors = paint(3, 3, &[(0, 0, RED), (2, 2, RED)]);
        let map = PortalMap::from_color_map(&colors);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get((0, 0)), Some((2, 2)));
        assert_eq!(map.get((2, 2)), Some((0, 0)));
    }

    #[test]
    fn test_pixels_pair_positionally_in_row_major_order() {
        // Two vertical bars of height 2.
        let colors = paint(2, 5, &[(0, 0, RED), (1, 0, RED), (0, 4, RED), (1, 4, RED)]);
        let map = PortalMap::from_color_map(&colors);
        assert_eq!(map.get((0, 0)), Some((0, 4)));
        assert_eq!(map.get((1, 0)), Some((1, 4)));
        assert_symmetric(&map);
    }

    #[test]
    fn test_diagonal_pixels_form_one_component() {
        // (0,0)-(1,1) touch diagonally, so only two components: odd count is avoided.
        let colors = paint(4, 4, &[(0, 0, RED), (1, 1, RED), (3, 2, RED), (3, 3, RED)]);
        let build = build_portals(&colors);
        assert!(build.rejected.is_empty());
        assert_eq!(build.map.get((0, 0)), Some((3, 2)));
        assert_eq!(build.map.get((1, 1)), Some((3, 3)));
    }

    #[test]
    fn test_components_pair_by_first_coordinate() {
        // Four single pixels: pairs are (0,0)<->(0,2) and (2,0)<->(2,2).
        let colors = paint(3, 3, &[(2, 2, RED), (0, 2, RED), (2, 0, RED), (0, 0, RED)]);
        let map = PortalMap::from_color_map(&colors);
        assert_eq!(map.get((0, 0)), Some((0, 2)));
        assert_eq!(map.get((2, 0)), Some((2, 2)));
    }

    #[test]
    fn test_odd_component_count_discards_color() {
        for count in [1, 3, 5] {
            let mut colors = ColorMap::new(1, 10);
            for i in 0..count {
                colors.set(0, i * 2, RED);
            }
            colors.set(0, 1, BLUE);
            colors.set(0, 9, BLUE);

            let build = build_portals(&colors);
            assert!(build.map.iter().all(|(from, _)| colors.get(0, from.1 as usize) == BLUE));
            assert_eq!(build.map.len(), 2);
            assert_eq!(build.rejected, vec![ColoringError::OddComponentCount { color: RED, count }]);
        }
    }

    #[test]
    fn test_size_mismatch_discards_whole_color() {
        let mut colors = ColorMap::new(6, 12);
        // A valid single-pixel pair followed by a 4-pixel / 5-pixel pair.
        colors.set(0, 0, GREEN);
        colors.set(0, 11, GREEN);
        for col in 0..4 {
            colors.set(3, col, GREEN);
        }
        for col in 6..11 {
            colors.set(5, col, GREEN);
        }
        colors.set(2, 6, RED);
        colors.set(4, 0, RED);

        let build = build_portals(&colors);
        assert_eq!(build.rejected, vec![ColoringError::SizeMismatch { color: GREEN, first: 4, second: 5 }]);
        assert_eq!(build.map.len(), 2);
        assert_eq!(build.map.get((2, 6)), Some((4, 0)));
        assert!(!build.map.contains((0, 0)));
    }

    #[test]
    fn test_link_rejects_conflicts() {
        let mut map = PortalMap::new();
        map.link((0, 0), (1, 1)).unwrap();
        assert!(matches!(map.link((1, 1), (2, 2)), Err(Error::AlreadyLinked((1, 1)))));
        assert!(matches!(map.link((3, 3), (3, 3)), Err(Error::SelfLink((3, 3)))));
        assert_eq!(map.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_built_maps_are_symmetric(
            pixels in prop::collection::vec(0u8..4, 64),
        ) {
            let palette = [BACKGROUND, RED, GREEN, BLUE];
            let mut colors = ColorMap::new(8, 8);
            for (i, &index) in pixels.iter().enumerate() {
                colors.set(i / 8, i % 8, palette[index as usize]);
            }
            let map = PortalMap::from_color_map(&colors);
            for (from, to) in map.iter() {
                prop_assert_eq!(map.get(to), Some(from));
                prop_assert_ne!(from, to);
                prop_assert_eq!(colors.get(from.0 as usize, from.1 as usize), colors.get(to.0 as usize, to.1 as usize));
            }
        }
    }
}
