use crate::app::{App, InputMode};
use crate::club::Sport;
use crate::map::MapLayers;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 34;

/// Render the UI: map on the left, stats/filter sidebar on the right,
/// status bar along the bottom
pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(SIDEBAR_WIDTH)])
        .split(rows[0]);

    render_map(frame, app, cols[0]);
    render_sidebar(frame, app, cols[1]);
    render_status_bar(frame, app, rows[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Club Map ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Size the viewport to the drawable area (2x4 Braille pixels per cell)
    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let layers = app.renderer.render(
        inner.width as usize,
        inner.height as usize,
        &viewport,
        app.clubs(),
        app.visible(),
    );

    let cursor_pos = app.mouse_pixel_pos().and_then(|(px, py)| {
        let cx = (px / 2) as u16;
        let cy = (py / 4) as u16;
        (cx < inner.width && cy < inner.height).then_some((cx, cy))
    });

    // Selected marker gets a highlight ring drawn over everything else
    let selected_pos = app.selected_club().and_then(|club| {
        let (px, py) = viewport.project(club.lng, club.lat);
        if px >= 0 && py >= 0 {
            let cx = (px / 2) as u16;
            let cy = (py / 4) as u16;
            (cx < inner.width && cy < inner.height).then_some((cx, cy))
        } else {
            None
        }
    });

    frame.render_widget(
        MapWidget {
            layers,
            cursor_pos,
            selected_pos,
            inner_width: inner.width,
            inner_height: inner.height,
        },
        inner,
    );
}

/// Braille map with marker layers and text labels overlaid
struct MapWidget {
    layers: MapLayers,
    cursor_pos: Option<(u16, u16)>,
    selected_pos: Option<(u16, u16)>,
    inner_width: u16,
    inner_height: u16,
}

impl MapWidget {
    fn render_layer(
        &self,
        canvas: &crate::braille::BrailleCanvas,
        color: Color,
        area: Rect,
        buf: &mut Buffer,
    ) {
        for (row_idx, row_str) in canvas.rows().enumerate() {
            if row_idx >= area.height as usize {
                break;
            }
            let y = area.y + row_idx as u16;

            for (col_idx, ch) in row_str.chars().enumerate() {
                if col_idx >= area.width as usize {
                    break;
                }
                // Skip empty braille characters (U+2800)
                if ch == '\u{2800}' {
                    continue;
                }
                let x = area.x + col_idx as u16;
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Back to front: coastlines, then the two marker layers
        self.render_layer(&self.layers.basemap, Color::Cyan, area, buf);
        self.render_layer(&self.layers.football, Color::Green, area, buf);
        self.render_layer(&self.layers.rugby, Color::Magenta, area, buf);

        let label_style = Style::default().fg(Color::White);
        for (lx, ly, text) in &self.layers.labels {
            if *ly >= self.inner_height || *lx >= self.inner_width {
                continue;
            }
            let y = area.y + *ly;
            let max_len = (self.inner_width.saturating_sub(*lx)) as usize;
            let display_text: String = text.chars().take(max_len.min(24)).collect();

            for (i, ch) in display_text.chars().enumerate() {
                let px = area.x + *lx + i as u16;
                if px < area.x + area.width {
                    buf[(px, y)].set_char(ch).set_style(label_style);
                }
            }
        }

        if let Some((sx, sy)) = self.selected_pos {
            let x = area.x + sx;
            let y = area.y + sy;
            if x < area.x + area.width && y < area.y + area.height {
                buf[(x, y)]
                    .set_char('◎')
                    .set_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            }
        }

        if let Some((cx, cy)) = self.cursor_pos {
            let x = area.x + cx;
            let y = area.y + cy;
            if x < area.x + area.width && y < area.y + area.height {
                buf[(x, y)].set_char('╋').set_fg(Color::Red);
            }
        }
    }
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" Clubs ", Style::default().fg(Color::Cyan)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let stats = app.stats();
    let dim = Style::default().fg(Color::DarkGray);
    let val = Style::default().fg(Color::Yellow);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Clubs shown: ", dim),
            Span::styled(stats.total.to_string(), val),
        ]),
        Line::from(vec![
            Span::styled("  Football ● ", Style::default().fg(Color::Green)),
            Span::styled(stats.football.to_string(), val),
        ]),
        Line::from(vec![
            Span::styled("  Rugby    ◆ ", Style::default().fg(Color::Magenta)),
            Span::styled(stats.rugby.to_string(), val),
        ]),
        Line::from(vec![
            Span::styled("Markers:     ", dim),
            Span::styled(app.visible_count().to_string(), val),
        ]),
        Line::default(),
        Line::from(Span::styled("Filters", Style::default().fg(Color::Cyan))),
        filter_line("[s]port  ", app.sport_label(), app.filter().sport.is_some()),
        filter_line("[c]ode   ", app.code_label(), app.filter().code.is_some()),
        filter_line("[t]ier   ", app.tier_label(), app.filter().tier.is_some()),
        filter_line("re[g]ion ", app.region_label(), app.filter().region.is_some()),
        filter_line(
            "[p]rimary",
            if app.filter().primary_only { "only" } else { "all grounds" },
            app.filter().primary_only,
        ),
        search_line(app),
    ];

    if let Some(club) = app.selected_club() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            club.display_name(),
            Style::default()
                .fg(match club.sport {
                    Some(Sport::Rugby) => Color::Magenta,
                    _ => Color::Green,
                })
                .add_modifier(Modifier::BOLD),
        )));
        if let Some(division) = &club.division {
            lines.push(Line::from(Span::styled(
                division.clone(),
                Style::default().fg(Color::White),
            )));
        }
        lines.push(detail_line("Ground", club.ground_name.as_deref()));
        lines.push(detail_line("Region", club.region_name.as_deref()));
        if club.country.is_some() {
            lines.push(detail_line("Country", club.country.as_deref()));
        }
        if club.founded.is_some() {
            lines.push(detail_line("Founded", club.founded.as_deref()));
        }
        for (label, field) in [
            ("Website", &club.website),
            ("Twitter", &club.twitter),
            ("Instagram", &club.instagram),
            ("Streaming", &club.streaming),
            ("Socials", &club.other_socials),
            ("Notes", &club.notes),
        ] {
            if field.is_some() {
                lines.push(detail_line(label, field.as_deref()));
            }
        }
    } else {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("click a marker for details", dim)));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn filter_line(label: &'static str, value: &str, active: bool) -> Line<'static> {
    let value_style = if active {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::White)),
        Span::raw(" "),
        Span::styled(value.to_string(), value_style),
    ])
}

fn search_line(app: &App) -> Line<'static> {
    let editing = app.input_mode == InputMode::Search;
    let text = if app.filter().search.is_empty() && !editing {
        "-".to_string()
    } else if editing {
        format!("{}_", app.filter().search)
    } else {
        app.filter().search.clone()
    };
    Line::from(vec![
        Span::styled("[/]search", Style::default().fg(Color::White)),
        Span::raw(" "),
        Span::styled(
            text,
            if editing {
                Style::default().fg(Color::Yellow)
            } else if app.filter().search.is_empty() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Green)
            },
        ),
    ])
}

fn detail_line(label: &'static str, value: Option<&str>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        // Placeholder text when the data is missing, never an error
        Span::styled(
            value.unwrap_or("TBC").to_string(),
            Style::default().fg(Color::White),
        ),
    ])
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = match app.input_mode {
        InputMode::Search => Line::from(vec![
            Span::styled(" search: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                app.filter().search.clone(),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                "  (Enter/Esc to finish, Backspace to delete)",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        InputMode::Normal => Line::from(vec![
            Span::styled(" Zoom: ", Style::default().fg(Color::DarkGray)),
            Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
            Span::styled(
                " | s/c/t/g/p filters  /:search  r:reset  L:labels  hjkl:pan  +/-:zoom  q:quit",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    };

    frame.render_widget(Paragraph::new(status), area);
}
