use std::collections::HashMap;

/// Spatial hash over marker positions for click hit-testing.
/// Cells are keyed by degree-sized buckets and hold record indices, so a
/// click resolves against one neighbourhood of cells rather than every
/// record. No domain data lives here, only (index, position).
pub struct MarkerIndex {
    cells: HashMap<(i32, i32), Vec<usize>>,
    positions: Vec<(f64, f64)>, // (lon, lat) per record index
    cell_size: f64,
}

impl MarkerIndex {
    /// Build from record positions. `cell_size` is in degrees.
    pub fn build(positions: impl Iterator<Item = (f64, f64)>, cell_size: f64) -> Self {
        let mut index = Self {
            cells: HashMap::new(),
            positions: Vec::new(),
            cell_size,
        };
        for (lon, lat) in positions {
            let idx = index.positions.len();
            index.positions.push((lon, lat));
            let cell = index.to_cell(lon, lat);
            index.cells.entry(cell).or_default().push(idx);
        }
        index
    }

    #[inline]
    fn to_cell(&self, lon: f64, lat: f64) -> (i32, i32) {
        (
            (lon / self.cell_size).floor() as i32,
            (lat / self.cell_size).floor() as i32,
        )
    }

    /// Record indices within `radius_degrees` of a point (bounding-box
    /// coarse pass; may include a few just outside the radius)
    pub fn query_radius(&self, lon: f64, lat: f64, radius_degrees: f64) -> Vec<usize> {
        let center = self.to_cell(lon, lat);
        let cell_radius = (radius_degrees / self.cell_size).ceil() as i32;

        let mut results = Vec::new();
        for dy in -cell_radius..=cell_radius {
            for dx in -cell_radius..=cell_radius {
                if let Some(indices) = self.cells.get(&(center.0 + dx, center.1 + dy)) {
                    results.extend_from_slice(indices);
                }
            }
        }
        results
    }

    /// Nearest record to a point within `radius_degrees`, considering only
    /// indices accepted by `eligible` (used to skip filtered-out markers)
    pub fn nearest<F>(&self, lon: f64, lat: f64, radius_degrees: f64, eligible: F) -> Option<usize>
    where
        F: Fn(usize) -> bool,
    {
        self.query_radius(lon, lat, radius_degrees)
            .into_iter()
            .filter(|&idx| eligible(idx))
            .map(|idx| {
                let (mlon, mlat) = self.positions[idx];
                let d2 = (mlon - lon).powi(2) + (mlat - lat).powi(2);
                (idx, d2)
            })
            .filter(|&(_, d2)| d2 <= radius_degrees * radius_degrees)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(idx, _)| idx)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> MarkerIndex {
        // Emirates, Ashton Gate, Maiden Castle
        let positions = vec![(-0.1084, 51.5549), (-2.5833, 51.4861), (-1.5763, 54.7753)];
        MarkerIndex::build(positions.into_iter(), 1.0)
    }

    #[test]
    fn test_nearest_picks_closest_marker() {
        let idx = index();
        assert_eq!(idx.nearest(-0.1, 51.55, 0.5, |_| true), Some(0));
        assert_eq!(idx.nearest(-1.6, 54.8, 0.5, |_| true), Some(2));
    }

    #[test]
    fn test_nearest_skips_ineligible() {
        let idx = index();
        // Hidden marker 0 should never be picked, even when closest
        assert_eq!(idx.nearest(-0.1, 51.55, 0.5, |i| i != 0), None);
    }

    #[test]
    fn test_nearest_respects_radius() {
        let idx = index();
        assert_eq!(idx.nearest(10.0, 45.0, 0.5, |_| true), None);
    }

    #[test]
    fn test_len() {
        assert_eq!(index().len(), 3);
        assert!(!index().is_empty());
    }
}
