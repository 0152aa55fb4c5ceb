mod view;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span},
    widgets::{Block, Borders, Paragraph},
};
use relative_path::RelativePathBuf;
use scriptline_config::{Config, Layout as PageLayout};
use scriptline_engine::editing::{
    CaretRequest, Classification, Cmd, DEFAULT_PAGE_HEIGHT, Editor, EditorKey, EditorSettings,
    KeyOutcome, Line, PageBreakSet, RenderSurface,
};
use scriptline_engine::{IoError, ScreenplayFile, export, io};
use std::{
    env, fs,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};
use view::Row;

/// What the editor engine has told the terminal since the last frame
#[derive(Default)]
struct TerminalSurface {
    placed_caret: Option<CaretRequest>,
    indicator: Option<Classification>,
    breaks: PageBreakSet,
}

impl RenderSurface for TerminalSurface {
    fn place_caret(&mut self, request: CaretRequest) {
        self.placed_caret = Some(request);
    }

    fn active_classification_changed(&mut self, classification: Classification) {
        self.indicator = Some(classification);
    }

    fn page_breaks_changed(&mut self, breaks: &PageBreakSet) {
        self.breaks = breaks.clone();
    }
}

struct App {
    editor: Editor<TerminalSurface>,
    root: PathBuf,
    file: ScreenplayFile,
    row_height: f64,
    /// Caret offset in chars within the active line
    cursor: usize,
    content_width: u16,
    painted_width: u16,
    scroll: usize,
    saved_version: u64,
    status: Option<String>,
    quit_armed: bool,
}

impl App {
    fn new(root: PathBuf, file: ScreenplayFile, layout: &PageLayout) -> Result<Self> {
        let lines = open_lines(&root, &file)?;
        let editor = Editor::new(lines, &editor_settings(layout), TerminalSurface::default())?;
        let saved_version = editor.version();

        Ok(Self {
            editor,
            root,
            file,
            row_height: layout.row_height,
            cursor: 0,
            content_width: 0,
            painted_width: 0,
            scroll: 0,
            saved_version,
            status: None,
            quit_armed: false,
        })
    }

    /// Run after each frame: repaginate from what was drawn and settle the
    /// caret. Returns whether another frame is needed.
    fn after_paint(&mut self) -> bool {
        if self.content_width != self.painted_width {
            self.painted_width = self.content_width;
            self.editor.invalidate_layout();
        }

        let geometry = view::measure(
            self.editor.document().lines(),
            self.content_width as usize,
            self.row_height,
        );
        let breaks_changed = self.editor.paint(&geometry);

        let placed = self.editor.surface_mut().placed_caret.take();
        if let Some(request) = placed {
            self.cursor = if request.at_end {
                self.editor
                    .document()
                    .get(request.line)
                    .map_or(0, |line| line.content.chars().count())
            } else {
                0
            };
        }

        breaks_changed || placed.is_some()
    }

    fn is_dirty(&self) -> bool {
        self.editor.version() != self.saved_version
    }

    /// Returns `false` when the app should quit
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code != KeyCode::Esc {
            self.quit_armed = false;
        }

        match key.code {
            KeyCode::Esc => {
                if !self.is_dirty() || self.quit_armed {
                    return Ok(false);
                }
                self.quit_armed = true;
                self.status = Some("Unsaved changes, press Esc again to quit".to_string());
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => self.save()?,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c)?
            }
            KeyCode::Enter => {
                self.editor.handle_key(EditorKey::NewLine)?;
            }
            KeyCode::Tab => {
                self.editor.handle_key(EditorKey::CycleClass)?;
            }
            KeyCode::Backspace => self.delete_backward()?,
            KeyCode::F(n @ 1..=7) => {
                let class = Classification::ALL[usize::from(n) - 1];
                self.editor.select_class(class)?;
            }
            KeyCode::Up => self.focus_relative(-1)?,
            KeyCode::Down => self.focus_relative(1)?,
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                let len = self.editor.active_line().content.chars().count();
                self.cursor = (self.cursor + 1).min(len);
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.editor.active_line().content.chars().count(),
            _ => {}
        }
        Ok(true)
    }

    fn insert_char(&mut self, c: char) -> Result<()> {
        let index = self.editor.active_index();
        let mut text = self.editor.active_line().content.clone();
        text.insert(byte_offset(&text, self.cursor), c);
        self.editor.apply(Cmd::MutateContent { index, text })?;
        self.cursor += 1;
        Ok(())
    }

    fn delete_backward(&mut self) -> Result<()> {
        if self.cursor == 0 {
            // Only an empty line merges back; otherwise there is nothing before the caret
            if let KeyOutcome::Handled(patch) = self.editor.handle_key(EditorKey::DeleteBackward)? {
                log::debug!("Merged back, now at version {}", patch.version);
            }
            return Ok(());
        }

        let index = self.editor.active_index();
        let mut text = self.editor.active_line().content.clone();
        text.remove(byte_offset(&text, self.cursor - 1));
        self.editor.apply(Cmd::MutateContent { index, text })?;
        self.cursor -= 1;
        Ok(())
    }

    fn focus_relative(&mut self, delta: isize) -> Result<()> {
        let Some(index) = self.editor.active_index().checked_add_signed(delta) else {
            return Ok(());
        };
        if index >= self.editor.document().len() {
            return Ok(());
        }
        self.editor.apply(Cmd::Focus {
            index,
            caret_at_end: true,
        })?;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let snapshot = self.editor.snapshot();
        io::write_screenplay(self.file.relative_path(), &self.root, &snapshot)?;
        self.saved_version = snapshot.version;
        self.status = Some(format!("Saved {}", self.file.display_path()));
        Ok(())
    }

    /// Keep the caret row inside a viewport of `height` rows
    fn scroll_to(&mut self, row: usize, height: usize) {
        if row < self.scroll {
            self.scroll = row;
        } else if height > 0 && row >= self.scroll + height {
            self.scroll = row + 1 - height;
        }
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Split a screenplay path into the folder it lives in and its file.
/// A bare title such as `drafts/Pilot` gets the screenplay extension.
fn locate(path: &Path) -> Result<(PathBuf, ScreenplayFile)> {
    let root = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Not a screenplay file: {}", path.display()))?;
    let file = if path.extension().is_some() {
        ScreenplayFile::new(RelativePathBuf::from(name))
    } else {
        ScreenplayFile::for_title(name)
    };
    Ok((root, file))
}

fn open_lines(root: &Path, file: &ScreenplayFile) -> Result<Vec<Line>> {
    match io::read_screenplay(file.relative_path(), root) {
        Ok(lines) => Ok(lines),
        Err(IoError::NotFound(path)) => {
            log::info!("Starting new screenplay at {}", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Editor settings for a layout; an unset page height keeps the editor default
fn editor_settings(layout: &PageLayout) -> EditorSettings {
    let mut settings = EditorSettings::default();
    if let Some(page_height) = layout.page_height {
        settings.page_height = page_height;
    }
    settings
}

/// Page layout from the config file, falling back to defaults
fn load_layout() -> PageLayout {
    match Config::load() {
        Ok(Some(config)) => config.layout,
        Ok(None) => PageLayout::default(),
        Err(e) => {
            log::warn!("Ignoring config file: {e}");
            PageLayout::default()
        }
    }
}

fn init_logging(to_file: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Info)
        .parse_default_env();

    // The TUI owns the terminal, so send records to a file instead
    if to_file {
        let log_path = env::temp_dir().join("scriptline.log");
        match fs::File::create(&log_path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }
    builder.init();
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.as_slice() {
        [_] => {
            init_logging(false);
            list_screenplays(&args[0])
        }
        [_, path] => {
            init_logging(true);
            edit(Path::new(path))
        }
        [_, path, flag, output] if flag == "--export" => {
            init_logging(false);
            export_html(Path::new(path), Path::new(output))
        }
        _ => {
            eprintln!("Usage: {} [screenplay.lss [--export out.html]]", args[0]);
            process::exit(1);
        }
    }
}

fn list_screenplays(program: &str) -> Result<()> {
    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => {
            eprintln!("Error: No screenplay provided and no config file found");
            eprintln!("Usage: {program} <screenplay.lss>");
            eprintln!("Or create a config file at {}", config_path.display());
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = io::validate_screenplay_dir(&config.screenplays_path) {
        eprintln!(
            "Error: Screenplays path '{}' from config file '{}' is invalid: {e}",
            config.screenplays_path.display(),
            config_path.display()
        );
        process::exit(1);
    }

    let files = io::scan_screenplays(&config.screenplays_path)?;
    if files.is_empty() {
        println!(
            "No screenplays in {}",
            config.screenplays_path.display()
        );
    }
    for file in &files {
        println!("{}", file.display_path());
    }
    Ok(())
}

fn export_html(path: &Path, output: &Path) -> Result<()> {
    let (root, file) = locate(path)?;
    let lines = io::read_screenplay(file.relative_path(), &root)?;
    let layout = load_layout();

    let mut editor = Editor::new(lines, &editor_settings(&layout), ())?;
    editor.paint(&view::measure(
        editor.document().lines(),
        view::EXPORT_COLUMNS,
        layout.row_height,
    ));

    let html = export::render_html(file.title(), &editor.snapshot(), editor.page_breaks());
    fs::write(output, html).with_context(|| format!("Writing {}", output.display()))?;
    log::info!(
        "Exported {} pages of {} px to {}",
        editor.page_breaks().page_count(),
        editor.page_height(),
        output.display()
    );
    Ok(())
}

fn edit(path: &Path) -> Result<()> {
    let (root, file) = locate(path)?;
    let layout = load_layout();
    let mut app = App::new(root, file, &layout)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;
        if app.after_paint() {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.status = None;
                match app.handle_key(key) {
                    Ok(true) => {}
                    Ok(false) => return Ok(()),
                    Err(e) => app.status = Some(format!("Error: {e}")),
                }
            }
            Event::Resize(_, _) => app.editor.invalidate_layout(),
            _ => {}
        }
    }
}

fn class_style(classification: Classification) -> Style {
    match classification {
        Classification::SceneHeading => Style::default().add_modifier(Modifier::BOLD),
        Classification::Character => Style::default().fg(Color::Cyan),
        Classification::Transition | Classification::Shot => Style::default().fg(Color::Magenta),
        Classification::Setting => Style::default().add_modifier(Modifier::ITALIC),
        Classification::Action | Classification::Dialogue => Style::default(),
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title = if app.is_dirty() {
        format!("{} *", app.file.title())
    } else {
        app.file.title().to_string()
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(chunks[0]);
    app.content_width = inner.width;

    let width = inner.width as usize;
    let active = app.editor.active_index();
    let lines = app.editor.document().lines();
    let breaks = &app.editor.surface().breaks;
    let rows = view::layout_rows(lines, breaks, width);
    let caret = view::caret_position(lines, breaks, width, active, app.cursor);
    let page_count = breaks.page_count();
    let page = breaks.page_of(active);

    if let Some((row, _)) = caret {
        app.scroll_to(row, inner.height as usize);
    }

    let text: Vec<TextLine> = rows
        .into_iter()
        .skip(app.scroll)
        .take(inner.height as usize)
        .map(|row| match row {
            Row::Text {
                line,
                classification,
                text,
            } => {
                let mut style = class_style(classification);
                if line == active {
                    style = style.bg(Color::DarkGray);
                }
                TextLine::from(Span::styled(text, style))
            }
            Row::PageBreak { page } => TextLine::from(Span::styled(
                format!("{:-^width$}", format!(" Page {page} ")),
                Style::default().fg(Color::DarkGray),
            )),
        })
        .collect();

    f.render_widget(Paragraph::new(text).block(block), chunks[0]);

    if let Some((row, column)) = caret
        && row >= app.scroll
    {
        f.set_cursor_position((
            inner.x + column as u16,
            inner.y + (row - app.scroll) as u16,
        ));
    }

    // Class indicator and position
    let indicator = app
        .editor
        .surface()
        .indicator
        .map_or("", Classification::label);
    let mut status = vec![
        Span::styled(
            format!(" {indicator} "),
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        Span::raw(format!(
            " line {}/{} | page {page}/{page_count}",
            active + 1,
            app.editor.document().len()
        )),
    ];
    if let Some(message) = &app.status {
        status.push(Span::raw(format!(" | {message}")));
    }
    f.render_widget(Paragraph::new(TextLine::from(status)), chunks[1]);

    let help_text = TextLine::from(vec![
        Span::raw("Esc: Quit | "),
        Span::raw("Ctrl-S: Save | "),
        Span::raw("Enter: New line | "),
        Span::raw("Tab: Cycle class | "),
        Span::raw("F1-F7: Set class | "),
        Span::raw("↑/↓: Move"),
    ]);
    f.render_widget(Paragraph::new(help_text), chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_byte_offset_handles_multibyte_text() {
        let text = "café au lait";
        assert_eq!(byte_offset(text, 0), 0);
        assert_eq!(byte_offset(text, 4), 5);
        assert_eq!(byte_offset(text, 99), text.len());
    }

    #[test]
    fn test_locate_splits_folder_and_file() {
        let (root, file) = locate(Path::new("drafts/Pilot.lss")).unwrap();
        assert_eq!(root, PathBuf::from("drafts"));
        assert_eq!(file.title(), "Pilot");

        let (root, _) = locate(Path::new("Pilot.lss")).unwrap();
        assert_eq!(root, PathBuf::from("."));
    }

    #[test]
    fn test_locate_adds_extension_to_bare_title() {
        let (root, file) = locate(Path::new("drafts/Pilot")).unwrap();
        assert_eq!(root, PathBuf::from("drafts"));
        assert_eq!(file.relative_path().as_str(), "Pilot.lss");
    }

    #[test]
    fn test_editor_settings_default_to_engine_page_height() {
        assert_eq!(
            editor_settings(&PageLayout::default()).page_height,
            DEFAULT_PAGE_HEIGHT
        );

        let layout = PageLayout {
            page_height: Some(900.0),
            ..PageLayout::default()
        };
        assert_eq!(editor_settings(&layout).page_height, 900.0);
    }

    fn app_with(lines: Vec<Line>) -> App {
        let editor = Editor::new(
            lines,
            &EditorSettings::default(),
            TerminalSurface::default(),
        )
        .unwrap();
        App {
            saved_version: editor.version(),
            editor,
            root: PathBuf::from("."),
            file: ScreenplayFile::from_relative_str("Test.lss"),
            row_height: 20.0,
            cursor: 0,
            content_width: 40,
            painted_width: 0,
            scroll: 0,
            status: None,
            quit_armed: false,
        }
    }

    #[test]
    fn test_control_chords_are_not_typed() {
        let mut app = app_with(vec![Line::new(Classification::Action, "Hi")]);
        app.cursor = 2;

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(app.editor.active_line().content, "Hi");
        assert_eq!(app.editor.version(), 0);

        app.handle_key(KeyEvent::new(KeyCode::Char('!'), KeyModifiers::NONE))
            .unwrap();
        assert_eq!(app.editor.active_line().content, "Hi!");
        assert_eq!(app.cursor, 3);
    }

    #[test]
    fn test_surface_keeps_latest_notifications() {
        let mut editor = Editor::new(
            vec![Line::new(Classification::Character, "ANNA")],
            &EditorSettings::default(),
            TerminalSurface::default(),
        )
        .unwrap();

        editor.handle_key(EditorKey::NewLine).unwrap();
        editor.paint(&view::measure(editor.document().lines(), 40, 20.0));

        let surface = editor.surface();
        assert_eq!(surface.indicator, Some(Classification::Dialogue));
        assert_eq!(
            surface.placed_caret,
            Some(CaretRequest {
                line: 1,
                at_end: false
            })
        );
        assert!(surface.breaks.is_empty());
    }
}
