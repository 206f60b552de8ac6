use anyhow::Result;
use club_map::app::{App, InputMode};
use club_map::data;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::path::Path;
use std::time::Duration;

fn main() -> Result<()> {
    let mut terminal = ratatui::init();
    terminal.clear()?;

    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal);

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

fn run(terminal: &mut DefaultTerminal) -> Result<()> {
    let data_dir = Path::new("data");

    // Club records load once at startup and never change afterwards
    let clubs_path = data_dir.join("clubs.json");
    let clubs = if clubs_path.exists() {
        match data::load_clubs(&clubs_path) {
            Ok(clubs) if !clubs.is_empty() => clubs,
            Ok(_) => data::sample_clubs(),
            Err(e) => {
                eprintln!("Warning: Failed to load {}: {}", clubs_path.display(), e);
                data::sample_clubs()
            }
        }
    } else {
        data::sample_clubs()
    };

    let size = terminal.size()?;
    let mut app = App::new(clubs, size.width as usize, size.height as usize);

    data::load_basemap(&mut app.renderer, data_dir);
    if !app.renderer.has_basemap() {
        data::generate_fallback_basemap(&mut app.renderer);
    }

    // Tracks whether a mouse press turned into a drag (pan) or stayed a click
    // (marker selection)
    let mut dragged = false;

    loop {
        terminal.draw(|frame| club_map::ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match app.input_mode {
                        InputMode::Search => match key.code {
                            KeyCode::Enter | KeyCode::Esc => app.end_search(),
                            KeyCode::Backspace => app.pop_search_char(),
                            KeyCode::Char(ch) => app.push_search_char(ch),
                            _ => {}
                        },
                        InputMode::Normal => match key.code {
                            KeyCode::Char('q') => app.quit(),
                            KeyCode::Esc => app.clear_selection(),

                            // Filter controls: one FilterState field each
                            KeyCode::Char('s') => app.cycle_sport(),
                            KeyCode::Char('c') => app.cycle_code(),
                            KeyCode::Char('t') => app.cycle_tier(),
                            KeyCode::Char('g') => app.cycle_region(),
                            KeyCode::Char('p') => app.toggle_primary_only(),
                            KeyCode::Char('/') => app.begin_search(),
                            KeyCode::Char('r') => app.reset_filters(),

                            KeyCode::Char('L') => app.renderer.toggle_labels(),

                            // Pan with hjkl or arrow keys
                            KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                            KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                            KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
                            KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

                            KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                            KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                            _ => {}
                        },
                    }
                }
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse, &mut dragged),
                Event::Resize(width, height) => {
                    app.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Mouse: wheel zooms at the cursor, drag pans, a plain click selects the
/// nearest visible marker
fn handle_mouse(app: &mut App, mouse: MouseEvent, dragged: &mut bool) {
    app.set_mouse_pos(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        MouseEventKind::Down(MouseButton::Left) => {
            app.last_mouse = Some((mouse.column, mouse.row));
            *dragged = false;
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.handle_drag(mouse.column, mouse.row);
            *dragged = true;
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.end_drag();
            if !*dragged {
                app.select_at(mouse.column, mouse.row);
            }
        }
        _ => {}
    }
}
