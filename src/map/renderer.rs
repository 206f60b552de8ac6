use crate::braille::BrailleCanvas;
use crate::club::{ClubRecord, Sport};
use crate::map::geometry::{draw_circle, draw_diamond, draw_line};
use crate::map::projection::Viewport;

/// A geographic line (sequence of lon/lat coordinates)
pub type LineString = Vec<(f64, f64)>;

/// Marker glyph shown next to a club label, per sport
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MarkerGlyph {
    Football, // ●
    Rugby,    // ◆
}

impl MarkerGlyph {
    pub fn for_sport(sport: Option<Sport>) -> Self {
        match sport {
            Some(Sport::Rugby) => MarkerGlyph::Rugby,
            _ => MarkerGlyph::Football,
        }
    }
}

/// One frame's rendered output: a Braille canvas per colour layer plus
/// text labels in character coordinates
pub struct MapLayers {
    pub basemap: BrailleCanvas,
    pub football: BrailleCanvas,
    pub rugby: BrailleCanvas,
    pub labels: Vec<(u16, u16, String)>,
}

/// Draws the coastline basemap and one marker per visible club record.
/// Visibility verdicts arrive precomputed; this layer never inspects the
/// filter state.
pub struct MapRenderer {
    coastlines: Vec<LineString>,
    pub show_labels: bool,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self {
            coastlines: Vec::new(),
            show_labels: true,
        }
    }

    pub fn add_coastline(&mut self, line: LineString) {
        self.coastlines.push(line);
    }

    /// Whether any basemap data has been loaded
    pub fn has_basemap(&self) -> bool {
        !self.coastlines.is_empty()
    }

    pub fn toggle_labels(&mut self) {
        self.show_labels = !self.show_labels;
    }

    /// Render the basemap and the markers for records flagged visible.
    /// `visible` runs parallel to `clubs`; canvas size is in characters.
    pub fn render(
        &self,
        char_width: usize,
        char_height: usize,
        viewport: &Viewport,
        clubs: &[ClubRecord],
        visible: &[bool],
    ) -> MapLayers {
        let mut layers = MapLayers {
            basemap: BrailleCanvas::new(char_width, char_height),
            football: BrailleCanvas::new(char_width, char_height),
            rugby: BrailleCanvas::new(char_width, char_height),
            labels: Vec::new(),
        };

        for line in &self.coastlines {
            draw_linestring(&mut layers.basemap, line, viewport);
        }

        let radius = marker_radius(viewport.zoom);
        for (record, &shown) in clubs.iter().zip(visible) {
            if !shown {
                continue;
            }
            let (px, py) = viewport.project(record.lng, record.lat);
            if !viewport.is_visible(px, py) {
                continue;
            }

            match MarkerGlyph::for_sport(record.sport) {
                MarkerGlyph::Football => draw_circle(&mut layers.football, px, py, radius),
                MarkerGlyph::Rugby => draw_diamond(&mut layers.rugby, px, py, radius),
            }

            if self.show_labels && viewport.zoom >= 12.0 && px >= 0 && py >= 0 {
                let char_x = (px / 2) as u16;
                let char_y = (py / 4) as u16;
                if let Some(label_x) = char_x.checked_add(2) {
                    layers
                        .labels
                        .push((label_x, char_y, record.display_name().to_string()));
                }
            }
        }

        layers
    }
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Marker size grows as the map zooms in
fn marker_radius(zoom: f64) -> i32 {
    if zoom >= 40.0 {
        3
    } else if zoom >= 12.0 {
        2
    } else {
        1
    }
}

/// Draw a linestring with viewport culling
fn draw_linestring(canvas: &mut BrailleCanvas, line: &LineString, viewport: &Viewport) {
    if line.len() < 2 {
        return;
    }

    let mut prev: Option<(i32, i32)> = None;
    for &(lon, lat) in line {
        let (px, py) = viewport.project(lon, lat);
        if let Some(p) = prev {
            let span = ((px - p.0).abs() + (py - p.1).abs()) as usize;
            if span < viewport.width && viewport.segment_might_be_visible(p, (px, py)) {
                draw_line(canvas, p.0, p.1, px, py);
            }
        }
        prev = Some((px, py));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club_at(lon: f64, lat: f64, sport: Sport) -> ClubRecord {
        ClubRecord {
            team_name: Some("Test".into()),
            sport: Some(sport),
            lat,
            lng: lon,
            ..Default::default()
        }
    }

    #[test]
    fn test_hidden_records_draw_nothing() {
        let renderer = MapRenderer::new();
        let viewport = Viewport::uk(200, 120);
        let clubs = vec![club_at(-3.0, 54.5, Sport::Football)];

        let shown = renderer.render(100, 30, &viewport, &clubs, &[true]);
        let hidden = renderer.render(100, 30, &viewport, &clubs, &[false]);

        let blank = BrailleCanvas::new(100, 30).to_string();
        assert_ne!(shown.football.to_string(), blank);
        assert_eq!(hidden.football.to_string(), blank);
    }

    #[test]
    fn test_sports_land_on_their_own_layers() {
        let renderer = MapRenderer::new();
        let viewport = Viewport::uk(200, 120);
        let clubs = vec![club_at(-3.0, 54.5, Sport::Rugby)];

        let layers = renderer.render(100, 30, &viewport, &clubs, &[true]);
        let blank = BrailleCanvas::new(100, 30).to_string();
        assert_eq!(layers.football.to_string(), blank);
        assert_ne!(layers.rugby.to_string(), blank);
    }

    #[test]
    fn test_has_basemap() {
        let mut renderer = MapRenderer::new();
        assert!(!renderer.has_basemap());
        renderer.add_coastline(vec![(-5.0, 50.0), (-3.0, 53.0)]);
        assert!(renderer.has_basemap());
    }
}
