use std::f64::consts::PI;

const MIN_ZOOM: f64 = 0.5;
const MAX_ZOOM: f64 = 200.0;

/// Web Mercator y for a latitude, normalized to [0, 1]
#[inline]
fn mercator_y(lat: f64) -> f64 {
    let lat_rad = lat * PI / 180.0;
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0
}

/// The visible map area: a center, a zoom factor, and a pixel size.
/// Pixel coordinates are Braille pixels (2 per character column, 4 per row).
#[derive(Clone)]
pub struct Viewport {
    /// Center longitude (-180 to 180)
    pub center_lon: f64,
    /// Center latitude (-90 to 90)
    pub center_lat: f64,
    /// Zoom factor (higher = closer)
    pub zoom: f64,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(center_lon: f64, center_lat: f64, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            center_lon,
            center_lat,
            zoom,
            width,
            height,
        }
    }

    /// Start roughly centred on the UK, the area the club data covers
    pub fn uk(width: usize, height: usize) -> Self {
        Self::new(-3.0, 54.5, 6.0, width, height)
    }

    /// Project lon/lat to canvas pixel coordinates
    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let scale = self.zoom * self.width as f64;
        let x = (lon + 180.0) / 360.0;
        let center_x = (self.center_lon + 180.0) / 360.0;

        let px = ((x - center_x) * scale + self.width as f64 / 2.0) as i32;
        let py = ((mercator_y(lat) - mercator_y(self.center_lat)) * scale
            + self.height as f64 / 2.0) as i32;

        (px, py)
    }

    /// Inverse of `project`: canvas pixel back to lon/lat
    pub fn unproject(&self, px: i32, py: i32) -> (f64, f64) {
        let scale = self.zoom * self.width as f64;
        let center_x = (self.center_lon + 180.0) / 360.0;

        let x = (px as f64 - self.width as f64 / 2.0) / scale + center_x;
        let y = (py as f64 - self.height as f64 / 2.0) / scale + mercator_y(self.center_lat);

        let lon = x * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * y)).sinh().atan() * 180.0 / PI;

        (lon, lat)
    }

    /// Pan by a pixel delta
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let scale = 360.0 / (self.zoom * self.width as f64);
        self.center_lon += dx as f64 * scale;
        self.center_lat -= dy as f64 * scale * 0.5; // Mercator distortion

        if self.center_lon > 180.0 {
            self.center_lon -= 360.0;
        } else if self.center_lon < -180.0 {
            self.center_lon += 360.0;
        }
        self.center_lat = self.center_lat.clamp(-85.0, 85.0);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.5).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.5).max(MIN_ZOOM);
    }

    /// Zoom in keeping the point under the given pixel fixed
    pub fn zoom_in_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.5);
    }

    /// Zoom out keeping the point under the given pixel fixed
    pub fn zoom_out_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.0 / 1.5);
    }

    fn zoom_at(&mut self, px: i32, py: i32, factor: f64) {
        let (lon, lat) = self.unproject(px, py);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);

        // Pan so the anchor point stays under the cursor
        let (new_px, new_py) = self.project(lon, lat);
        self.pan(new_px - px, new_py - py);
    }

    /// Whether a projected point falls inside the canvas (with a small margin)
    pub fn is_visible(&self, px: i32, py: i32) -> bool {
        px >= -10 && px < self.width as i32 + 10 && py >= -10 && py < self.height as i32 + 10
    }

    /// Rough bounding-box check for a line segment
    pub fn segment_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        p1.0.max(p2.0) >= 0
            && p1.0.min(p2.0) < self.width as i32
            && p1.1.max(p2.1) >= 0
            && p1.1.min(p2.1) < self.height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_center() {
        let vp = Viewport::new(0.0, 0.0, 1.0, 100, 100);
        assert_eq!(vp.project(0.0, 0.0), (50, 50));
    }

    #[test]
    fn test_unproject_inverts_project() {
        // Large canvas keeps the integer-pixel rounding well inside tolerance
        let vp = Viewport::uk(2000, 1200);
        let (px, py) = vp.project(-1.5763, 54.7753); // Maiden Castle, Durham
        let (lon, lat) = vp.unproject(px, py);
        assert!((lon - -1.5763).abs() < 0.1);
        assert!((lat - 54.7753).abs() < 0.1);
    }

    #[test]
    fn test_pan_moves_center() {
        let mut vp = Viewport::new(0.0, 0.0, 1.0, 100, 100);
        vp.pan(10, 0);
        assert!(vp.center_lon > 0.0);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut vp = Viewport::uk(100, 100);
        for _ in 0..100 {
            vp.zoom_out();
        }
        assert!(vp.zoom >= MIN_ZOOM);
        for _ in 0..100 {
            vp.zoom_in();
        }
        assert!(vp.zoom <= MAX_ZOOM);
    }
}
