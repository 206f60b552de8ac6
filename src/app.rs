use crate::club::{ClubRecord, RugbyCode, Sport};
use crate::filter::{is_visible, FilterState};
use crate::map::{MapRenderer, MarkerIndex, Viewport};
use crate::stats::{compute_stats, StatsSummary};

/// Whether key presses edit the search box or drive the map
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Application state: the record store, the single owned FilterState, and
/// the derived visible set and stats. Every filter mutation funnels through
/// one of the control methods below, each of which updates exactly one
/// field and then runs a full re-evaluation pass.
pub struct App {
    pub viewport: Viewport,
    pub renderer: MapRenderer,
    clubs: Vec<ClubRecord>,
    marker_index: MarkerIndex,
    filter: FilterState,
    visible: Vec<bool>,
    stats: StatsSummary,
    /// Distinct tier labels present in the data, cycle order
    tiers: Vec<String>,
    /// Distinct region keys present in the data (code preferred), cycle order
    regions: Vec<String>,
    pub selected: Option<usize>,
    pub input_mode: InputMode,
    pub should_quit: bool,
    /// Last mouse position while dragging
    pub last_mouse: Option<(u16, u16)>,
    /// Current mouse position for the cursor marker
    pub mouse_pos: Option<(u16, u16)>,
}

impl App {
    pub fn new(clubs: Vec<ClubRecord>, width: usize, height: usize) -> Self {
        // Braille gives 2x4 pixels per character; leave room for the border
        // and status bar
        let inner_width = width.saturating_sub(2);
        let inner_height = height.saturating_sub(3);

        let mut tiers: Vec<String> = clubs.iter().filter_map(|c| c.tier.clone()).collect();
        tiers.sort();
        tiers.dedup();

        let mut regions: Vec<String> = clubs
            .iter()
            .filter_map(|c| c.region_code.clone().or_else(|| c.region_name.clone()))
            .collect();
        regions.sort();
        regions.dedup();

        let marker_index = MarkerIndex::build(clubs.iter().map(|c| (c.lng, c.lat)), 0.5);

        let mut app = Self {
            viewport: Viewport::uk(inner_width * 2, inner_height * 4),
            renderer: MapRenderer::new(),
            clubs,
            marker_index,
            filter: FilterState::default(),
            visible: Vec::new(),
            stats: StatsSummary::default(),
            tiers,
            regions,
            selected: None,
            input_mode: InputMode::Normal,
            should_quit: false,
            last_mouse: None,
            mouse_pos: None,
        };
        app.refresh();
        app
    }

    /// Full synchronous re-evaluation: classify every record, then
    /// recompute the stats from the resulting visible set. Runs after
    /// every filter mutation; no incremental diffing at this data scale.
    fn refresh(&mut self) {
        self.visible = self
            .clubs
            .iter()
            .map(|record| is_visible(record, &self.filter))
            .collect();
        self.stats = compute_stats(&self.clubs, is_visible, &self.filter);

        // Drop a selection the filters just hid
        if let Some(idx) = self.selected {
            if !self.visible.get(idx).copied().unwrap_or(false) {
                self.selected = None;
            }
        }
    }

    // --- Filter controls (one FilterState field each) ---

    /// all -> football -> rugby -> all
    pub fn cycle_sport(&mut self) {
        self.filter.sport = match self.filter.sport {
            None => Some(Sport::Football),
            Some(Sport::Football) => Some(Sport::Rugby),
            Some(Sport::Rugby) => None,
        };
        self.refresh();
    }

    /// all -> union -> league -> all
    pub fn cycle_code(&mut self) {
        self.filter.code = match self.filter.code {
            None => Some(RugbyCode::Union),
            Some(RugbyCode::Union) => Some(RugbyCode::League),
            Some(RugbyCode::League) => None,
        };
        self.refresh();
    }

    pub fn cycle_tier(&mut self) {
        self.filter.tier = next_in_cycle(&self.tiers, self.filter.tier.as_deref());
        self.refresh();
    }

    pub fn cycle_region(&mut self) {
        self.filter.region = next_in_cycle(&self.regions, self.filter.region.as_deref());
        self.refresh();
    }

    pub fn toggle_primary_only(&mut self) {
        self.filter.primary_only = !self.filter.primary_only;
        self.refresh();
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset();
        self.refresh();
    }

    // --- Search box ---

    pub fn begin_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn end_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Live search: every keystroke re-evaluates
    pub fn push_search_char(&mut self, ch: char) {
        self.filter.search.push(ch);
        self.refresh();
    }

    pub fn pop_search_char(&mut self) {
        self.filter.search.pop();
        self.refresh();
    }

    pub fn clear_search(&mut self) {
        self.filter.search.clear();
        self.input_mode = InputMode::Normal;
        self.refresh();
    }

    // --- Read-only views for rendering ---

    pub fn clubs(&self) -> &[ClubRecord] {
        &self.clubs
    }

    pub fn visible(&self) -> &[bool] {
        &self.visible
    }

    pub fn stats(&self) -> StatsSummary {
        self.stats
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn selected_club(&self) -> Option<&ClubRecord> {
        self.selected.and_then(|idx| self.clubs.get(idx))
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|&&v| v).count()
    }

    // --- Viewport controls (never touch FilterState) ---

    pub fn resize(&mut self, width: usize, height: usize) {
        let inner_width = width.saturating_sub(2);
        let inner_height = height.saturating_sub(3);
        self.viewport.width = inner_width * 2;
        self.viewport.height = inner_height * 4;
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        let (px, py) = char_to_pixel(col, row);
        self.viewport.zoom_in_at(px, py);
    }

    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        let (px, py) = char_to_pixel(col, row);
        self.viewport.zoom_out_at(px, py);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // --- Mouse ---

    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
    }

    /// Mouse position in Braille pixel coordinates (for the cursor marker)
    pub fn mouse_pixel_pos(&self) -> Option<(i32, i32)> {
        self.mouse_pos.map(|(col, row)| char_to_pixel(col, row))
    }

    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
            // Less sensitive when zoomed out
            let scale = if self.viewport.zoom < 2.0 {
                2
            } else if self.viewport.zoom < 4.0 {
                3
            } else {
                4
            };
            self.pan(dx * scale, dy * scale);
        }
        self.last_mouse = Some((x, y));
    }

    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    /// Select the visible marker nearest to a click, if any is close enough
    pub fn select_at(&mut self, col: u16, row: u16) {
        let (px, py) = char_to_pixel(col, row);
        let (lon, lat) = self.viewport.unproject(px, py);

        // Click tolerance of about 8 pixels, expressed in degrees at the
        // current zoom
        let (lon_edge, _) = self.viewport.unproject(px + 8, py);
        let radius = (lon_edge - lon).abs().max(1e-6);

        self.selected = self.marker_index.nearest(lon, lat, radius, |idx| {
            self.visible.get(idx).copied().unwrap_or(false)
        });
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // --- Status line helpers ---

    pub fn sport_label(&self) -> &'static str {
        match self.filter.sport {
            None => "all",
            Some(s) => s.label(),
        }
    }

    pub fn code_label(&self) -> &'static str {
        match self.filter.code {
            None => "all",
            Some(c) => c.label(),
        }
    }

    pub fn tier_label(&self) -> &str {
        self.filter.tier.as_deref().unwrap_or("all")
    }

    pub fn region_label(&self) -> &str {
        self.filter.region.as_deref().unwrap_or("all")
    }

    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }
}

/// Advance through `options`: none -> first -> ... -> last -> none.
/// A current value no longer present in the data restarts the cycle.
fn next_in_cycle(options: &[String], current: Option<&str>) -> Option<String> {
    match current {
        None => options.first().cloned(),
        Some(cur) => match options.iter().position(|o| o == cur) {
            Some(pos) => options.get(pos + 1).cloned(),
            None => options.first().cloned(),
        },
    }
}

/// Terminal cell to Braille pixel, accounting for the one-cell border
fn char_to_pixel(col: u16, row: u16) -> (i32, i32) {
    (
        (col.saturating_sub(1) as i32) * 2,
        (row.saturating_sub(1) as i32) * 4,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_clubs;

    fn app() -> App {
        App::new(sample_clubs(), 120, 40)
    }

    #[test]
    fn test_default_state_everything_visible() {
        let app = app();
        assert!(app.visible().iter().all(|&v| v));
        assert_eq!(app.stats().total, app.clubs().len() - 1); // Arsenal venues collapse
    }

    #[test]
    fn test_sport_cycle_narrows_and_returns() {
        let mut app = app();
        let initial = app.stats();

        app.cycle_sport(); // football
        assert!(app
            .clubs()
            .iter()
            .zip(app.visible())
            .filter(|(_, &v)| v)
            .all(|(c, _)| c.sport == Some(Sport::Football)));
        assert_eq!(app.stats().rugby, 0);

        app.cycle_sport(); // rugby
        assert_eq!(app.stats().football, 0);

        app.cycle_sport(); // back to all
        assert_eq!(app.stats(), initial);
    }

    #[test]
    fn test_each_control_touches_one_field() {
        let mut app = app();
        app.cycle_sport();
        let after_sport = app.filter().clone();
        app.toggle_primary_only();
        let after_primary = app.filter().clone();

        assert_eq!(after_sport.sport, after_primary.sport);
        assert_eq!(after_sport.tier, after_primary.tier);
        assert_eq!(after_sport.region, after_primary.region);
        assert_eq!(after_sport.search, after_primary.search);
        assert!(after_primary.primary_only);
    }

    #[test]
    fn test_tier_cycle_walks_data_tiers_and_wraps() {
        let mut app = app();
        let mut seen = Vec::new();
        loop {
            app.cycle_tier();
            match app.filter().tier.clone() {
                Some(t) => seen.push(t),
                None => break,
            }
        }
        assert_eq!(seen, vec!["tier1".to_string(), "tier2".to_string()]);
    }

    #[test]
    fn test_primary_only_hides_secondary_venues() {
        let mut app = app();
        app.toggle_primary_only();
        for (club, &vis) in app.clubs().iter().zip(app.visible()) {
            if vis {
                assert_eq!(club.ground_role, crate::club::GroundRole::Primary);
            }
        }
        // The dedup means the distinct-club total is unchanged
        assert_eq!(app.stats().total, app.clubs().len() - 1);
    }

    #[test]
    fn test_search_narrows_then_reset_round_trips() {
        let mut app = app();
        let initial = app.stats();

        app.begin_search();
        for ch in "durham".chars() {
            app.push_search_char(ch);
        }
        assert_eq!(app.visible_count(), 1);
        assert_eq!(
            app.stats(),
            StatsSummary {
                total: 1,
                football: 1,
                rugby: 0
            }
        );

        app.end_search();
        app.cycle_sport();
        app.toggle_primary_only();
        app.reset_filters();

        assert!(app.visible().iter().all(|&v| v));
        assert_eq!(app.stats(), initial);
        assert!(app.filter().is_default());
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut app = app();
        app.cycle_sport();
        let visible = app.visible().to_vec();
        let stats = app.stats();
        // A no-op state transition re-runs evaluation with the same result
        app.refresh();
        assert_eq!(app.visible(), &visible[..]);
        assert_eq!(app.stats(), stats);
    }

    #[test]
    fn test_selection_cleared_when_filtered_out() {
        let mut app = app();
        // Select the rugby club at Ashton Gate by index
        let idx = app
            .clubs()
            .iter()
            .position(|c| c.team_name.as_deref() == Some("Bristol Bears Women"))
            .unwrap();
        app.selected = Some(idx);

        app.cycle_sport(); // football only
        assert_eq!(app.selected, None);
    }

    #[test]
    fn test_pan_and_zoom_do_not_touch_filters() {
        let mut app = app();
        app.cycle_sport();
        let filter = app.filter().clone();
        let visible = app.visible().to_vec();

        app.pan(25, -10);
        app.zoom_in();
        app.zoom_out_at(10, 10);

        assert_eq!(app.filter(), &filter);
        assert_eq!(app.visible(), &visible[..]);
    }
}
