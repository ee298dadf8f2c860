use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use employee_desk::schema::{MAX_DURATION_MONTHS, MIN_DURATION_MONTHS, SALARY_STEP};
use employee_desk::{
    write_export, Category, Language, RecordForm, RecordStore, StoreError, ValidationError,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::num::IntErrorKind;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Category,
    Name,
    Salary,
    Extra,
    List,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Category => Focus::Name,
            Focus::Name => Focus::Salary,
            Focus::Salary => Focus::Extra,
            Focus::Extra => Focus::List,
            Focus::List => Focus::Category,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Focus::Category => Focus::List,
            Focus::Name => Focus::Category,
            Focus::Salary => Focus::Name,
            Focus::Extra => Focus::Salary,
            Focus::List => Focus::Extra,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusKind {
    fn color(&self) -> Color {
        match self {
            StatusKind::Info => Color::Cyan,
            StatusKind::Success => Color::Green,
            StatusKind::Warning => Color::Yellow,
            StatusKind::Error => Color::Red,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

pub struct App {
    pub store: RecordStore,
    pub category: Category,
    pub name: String,
    pub salary: String,
    pub team_size: String,
    pub language: Language,
    pub duration: i64,
    pub focus: Focus,
    pub list_state: ListState,
    pub status: Status,
    pub field_errors: Vec<ValidationError>,
    pub export_path: PathBuf,
}

impl App {
    pub fn new(store: RecordStore, export_path: PathBuf) -> Self {
        let mut list_state = ListState::default();
        if !store.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            store,
            category: Category::Manager,
            name: String::new(),
            salary: "0".to_string(),
            team_size: "1".to_string(),
            language: Language::Python,
            duration: MIN_DURATION_MONTHS,
            focus: Focus::Category,
            list_state,
            status: Status {
                kind: StatusKind::Info,
                text: "Fill the form and press Enter to add".to_string(),
            },
            field_errors: Vec::new(),
            export_path,
        }
    }

    /// Handle one key press. Returns false when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if ctrl => return false,
            KeyCode::Char('s') if ctrl => self.export(),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Enter if self.focus == Focus::List => self.remove_selected(),
            KeyCode::Enter => self.submit(),
            KeyCode::Delete if self.focus == Focus::List => self.remove_selected(),
            KeyCode::Down if self.focus == Focus::List => self.next(),
            KeyCode::Up if self.focus == Focus::List => self.previous(),
            KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Right => self.step(1),
            KeyCode::Left => self.step(-1),
            KeyCode::Backspace => {
                if let Some(input) = self.text_input() {
                    input.pop();
                }
            }
            KeyCode::Char(c) if !ctrl => self.type_char(c),
            _ => {}
        }

        true
    }

    fn text_input(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Name => Some(&mut self.name),
            Focus::Salary => Some(&mut self.salary),
            Focus::Extra if self.category == Category::Manager => Some(&mut self.team_size),
            _ => None,
        }
    }

    fn type_char(&mut self, c: char) {
        let numeric = self.focus != Focus::Name;
        if let Some(input) = self.text_input() {
            if !numeric || c.is_ascii_digit() {
                input.push(c);
            }
        }
    }

    /// Left/Right: cycle selectors, step numeric controls
    fn step(&mut self, delta: i64) {
        match self.focus {
            Focus::Category => {
                self.category = if delta > 0 { self.category.next() } else { self.category.previous() };
                self.field_errors.clear();
            }
            Focus::Salary => {
                // Unparseable text (e.g. too many digits) is left for submit to report
                if let Ok(current) = self.salary.trim().parse::<i64>() {
                    self.salary = current.saturating_add(delta * SALARY_STEP).max(0).to_string();
                }
            }
            Focus::Extra => match self.category {
                Category::Manager => {
                    if let Ok(current) = self.team_size.trim().parse::<i64>() {
                        self.team_size = current.saturating_add(delta).max(1).to_string();
                    }
                }
                Category::Developer => {
                    self.language = if delta > 0 { self.language.next() } else { self.language.previous() };
                }
                Category::Intern => {
                    self.duration = (self.duration + delta).clamp(MIN_DURATION_MONTHS, MAX_DURATION_MONTHS);
                }
            },
            Focus::Name | Focus::List => {}
        }
    }

    fn parse_number(value: &str, field: &str, errors: &mut Vec<ValidationError>) -> i64 {
        match value.trim().parse::<i64>() {
            Ok(n) => n,
            Err(e) => {
                let message = match e.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => "Number is too large",
                    _ => "Enter a whole number",
                };
                errors.push(ValidationError {
                    field: field.to_string(),
                    message: message.to_string(),
                });
                0
            }
        }
    }

    /// Current form contents as raw input
    pub fn form(&self) -> Result<RecordForm, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let salary = Self::parse_number(&self.salary, "salary", &mut errors);

        let form = match self.category {
            Category::Manager => {
                let team_size = Self::parse_number(&self.team_size, "team_size", &mut errors);
                RecordForm::manager(&self.name, salary, team_size)
            }
            Category::Developer => RecordForm::developer(&self.name, salary, self.language.as_str()),
            Category::Intern => RecordForm::intern(&self.name, salary, self.duration),
        };

        if errors.is_empty() {
            Ok(form)
        } else {
            Err(errors)
        }
    }

    pub fn submit(&mut self) {
        let record = match self.form().and_then(|form| form.build()) {
            Ok(record) => record,
            Err(errors) => {
                warn!(count = errors.len(), "form rejected");
                self.set_status(StatusKind::Error, "Fix the highlighted fields");
                self.field_errors = errors;
                return;
            }
        };

        self.field_errors.clear();
        let profile = record.to_string();

        match self.store.add(record) {
            Ok(()) => {
                info!("Employee added: {}", profile);
                self.list_state.select(Some(self.store.len() - 1));
                self.name.clear();
                self.set_status(StatusKind::Success, &format!("✅ Employee added: {}", profile));
            }
            Err(e @ StoreError::Duplicate { .. }) => {
                self.set_status(StatusKind::Warning, &format!("⚠️  {}, not added", e));
            }
            Err(e) => self.set_status(StatusKind::Error, &e.to_string()),
        }
    }

    pub fn remove_selected(&mut self) {
        let Some(index) = self.list_state.selected() else {
            self.set_status(StatusKind::Warning, "Nothing selected");
            return;
        };

        match self.store.remove_at(index) {
            Ok(removed) => {
                let len = self.store.len();
                self.list_state
                    .select(if len == 0 { None } else { Some(index.min(len - 1)) });
                self.set_status(StatusKind::Info, &format!("Removed: {}", removed.describe()));
            }
            Err(e) => {
                self.list_state.select(None);
                self.set_status(StatusKind::Warning, &format!("⚠️  {}", e));
            }
        }
    }

    pub fn export(&mut self) {
        match write_export(&self.store, &self.export_path) {
            Ok(count) => {
                info!(count, path = %self.export_path.display(), "export written");
                self.set_status(
                    StatusKind::Success,
                    &format!("💾 Exported {} record(s) to {}", count, self.export_path.display()),
                );
            }
            Err(e) => {
                warn!("export failed: {:#}", e);
                self.set_status(StatusKind::Error, &format!("{:#}", e));
            }
        }
    }

    fn set_status(&mut self, kind: StatusKind, text: &str) {
        self.status = Status {
            kind,
            text: text.to_string(),
        };
    }

    pub fn next(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if !app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form + list
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_form(f, content[0], app);
    render_list(f, content[1], app);
    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "🏢 Employee Management System",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Records: {}", app.store.len()),
            Style::default().fg(Color::White),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let marker = if focused { "→ " } else { "  " };

    Line::from(vec![
        Span::styled(format!("{}{}: ", marker, label), label_style),
        Span::raw(value),
    ])
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let extra = match app.category {
        Category::Manager => ("Team Size", app.team_size.clone(), "team_size"),
        Category::Developer => ("Programming Language", format!("◀ {} ▶", app.language), "language"),
        Category::Intern => (
            "Duration (months)",
            format!("◀ {:>2} ▶  {}", app.duration, "█".repeat(app.duration.max(0) as usize)),
            "duration_months",
        ),
    };

    let rows = [
        (Focus::Category, "Employee Type", format!("◀ {} ▶", app.category), "category"),
        (Focus::Name, "Name", app.name.clone(), "name"),
        (Focus::Salary, "Salary", app.salary.clone(), "salary"),
        (Focus::Extra, extra.0, extra.1, extra.2),
    ];

    let mut lines = vec![Line::from("")];
    for (focus, label, value, field) in rows {
        lines.push(field_line(label, value, app.focus == focus));
        if let Some(message) = app.field_error(field) {
            lines.push(Line::from(Span::styled(
                format!("    {}", message),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "  Enter: Add Employee",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if app.focus == Focus::List {
                Color::White
            } else {
                Color::Yellow
            }))
            .title(" New Employee "),
    );

    f.render_widget(form, area);
}

fn render_list(f: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app
        .store
        .all()
        .iter()
        .map(|record| ListItem::new(record.to_string()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if app.focus == Focus::List {
                    Color::Yellow
                } else {
                    Color::White
                }))
                .title(" Employees "),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let status_spans = vec![
        Span::styled(
            format!(" {} ", app.status.text),
            Style::default().fg(app.status.kind.color()),
        ),
        Span::raw(" | "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Field | "),
        Span::styled("←/→", Style::default().fg(Color::Yellow)),
        Span::raw(" Change | "),
        Span::styled("Del", Style::default().fg(Color::Yellow)),
        Span::raw(" Remove | "),
        Span::styled("Ctrl-S", Style::default().fg(Color::Yellow)),
        Span::raw(" Export | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(RecordStore::new(), std::env::temp_dir().join("employee-desk-ui-test.csv"))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn replace(app: &mut App, text: &str) {
        for _ in 0..16 {
            press(app, KeyCode::Backspace);
        }
        type_str(app, text);
    }

    /// Fill a Manager form through the keyboard and submit it
    fn add_manager(app: &mut App, name: &str, salary: &str, team: &str) {
        app.focus = Focus::Name;
        type_str(app, name);
        press(app, KeyCode::Tab);
        replace(app, salary);
        press(app, KeyCode::Tab);
        replace(app, team);
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::List.next(), Focus::Category);
        assert_eq!(Focus::Category.previous(), Focus::List);
    }

    #[test]
    fn test_add_manager_through_keys() {
        let mut app = app();
        add_manager(&mut app, "Ann", "5000", "4");

        assert_eq!(app.store.len(), 1);
        assert_eq!(
            app.store.all()[0].describe(),
            "Manager Ann manages 4 people and earns $5000"
        );
        assert_eq!(app.status.kind, StatusKind::Success);
        assert!(app.status.text.contains("Manager Ann manages 4 people"));
        assert_eq!(app.list_state.selected(), Some(0));
        assert!(app.name.is_empty());
    }

    #[test]
    fn test_duplicate_warns() {
        let mut app = app();
        add_manager(&mut app, "Ann", "5000", "4");
        add_manager(&mut app, "Ann", "5000", "4");

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.status.kind, StatusKind::Warning);
    }

    #[test]
    fn test_validation_errors_shown_per_field() {
        let mut app = app();
        app.focus = Focus::Name;
        press(&mut app, KeyCode::Enter);

        assert!(app.store.is_empty());
        assert_eq!(app.status.kind, StatusKind::Error);
        assert!(app.field_error("name").is_some());
    }

    #[test]
    fn test_numeric_fields_ignore_letters() {
        let mut app = app();
        app.focus = Focus::Salary;
        type_str(&mut app, "5x0");
        assert_eq!(app.salary, "050");
    }

    #[test]
    fn test_step_saturates_at_numeric_limits() {
        let mut app = app();

        app.focus = Focus::Salary;
        app.salary = i64::MAX.to_string();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.salary, i64::MAX.to_string());
        press(&mut app, KeyCode::Left);
        assert_eq!(app.salary, (i64::MAX - SALARY_STEP).to_string());

        app.focus = Focus::Extra;
        app.team_size = i64::MAX.to_string();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.team_size, i64::MAX.to_string());
    }

    #[test]
    fn test_step_leaves_overlong_digits_untouched() {
        let mut app = app();
        let digits = "9".repeat(40);

        app.focus = Focus::Salary;
        app.salary = digits.clone();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.salary, digits);

        app.focus = Focus::Extra;
        app.team_size = digits.clone();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.team_size, digits);
    }

    #[test]
    fn test_submit_overlong_digits_reports_fields() {
        let mut app = app();
        app.name = "Ann".to_string();
        app.focus = Focus::Salary;
        type_str(&mut app, &"9".repeat(40));
        app.focus = Focus::Extra;
        type_str(&mut app, &"9".repeat(40));
        press(&mut app, KeyCode::Enter);

        assert!(app.store.is_empty());
        assert_eq!(app.status.kind, StatusKind::Error);
        assert_eq!(app.field_error("salary"), Some("Number is too large"));
        assert_eq!(app.field_error("team_size"), Some("Number is too large"));
    }

    #[test]
    fn test_submit_team_size_above_limit() {
        let mut app = app();
        app.name = "Ann".to_string();
        app.team_size = i64::MAX.to_string();
        app.submit();

        assert!(app.store.is_empty());
        assert!(app.field_error("team_size").unwrap().contains("at most"));
    }

    #[test]
    fn test_selectors_and_steps() {
        let mut app = app();

        press(&mut app, KeyCode::Right);
        assert_eq!(app.category, Category::Developer);

        app.focus = Focus::Extra;
        press(&mut app, KeyCode::Left);
        assert_eq!(app.language, Language::Cpp);

        app.focus = Focus::Salary;
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.salary, "1000");
        for _ in 0..5 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.salary, "0");

        app.focus = Focus::Category;
        press(&mut app, KeyCode::Right);
        assert_eq!(app.category, Category::Intern);
        app.focus = Focus::Extra;
        for _ in 0..20 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.duration, MAX_DURATION_MONTHS);
    }

    #[test]
    fn test_add_developer_and_intern() {
        let mut app = app();

        app.category = Category::Developer;
        app.language = Language::Java;
        app.name = "Bo".to_string();
        app.salary = "6000".to_string();
        app.submit();

        app.category = Category::Intern;
        app.duration = 6;
        app.name = "Cy".to_string();
        app.salary = "1000".to_string();
        app.submit();

        assert_eq!(
            app.store.describe_all(),
            vec![
                "Developer Bo codes in Java and earns $6000".to_string(),
                "Intern Cy is here for 6 months and earns $1000".to_string(),
            ]
        );
    }

    #[test]
    fn test_remove_selected_keeps_selection_in_range() {
        let mut app = app();
        add_manager(&mut app, "Ann", "1000", "1");
        add_manager(&mut app, "Bo", "1000", "1");

        app.focus = Focus::List;
        assert_eq!(app.list_state.selected(), Some(1));
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.list_state.selected(), Some(0));

        press(&mut app, KeyCode::Enter);
        assert!(app.store.is_empty());
        assert_eq!(app.list_state.selected(), None);

        press(&mut app, KeyCode::Delete);
        assert_eq!(app.status.kind, StatusKind::Warning);
    }

    #[test]
    fn test_list_navigation_wraps() {
        let mut app = app();
        add_manager(&mut app, "Ann", "1000", "1");
        add_manager(&mut app, "Bo", "1000", "1");
        app.focus = Focus::List;

        press(&mut app, KeyCode::Down);
        assert_eq!(app.list_state.selected(), Some(0));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.list_state.selected(), Some(1));
    }

    #[test]
    fn test_ctrl_s_exports() {
        let path = std::env::temp_dir().join(format!("employee-desk-ui-{}.csv", std::process::id()));
        let mut app = App::new(RecordStore::new(), path.clone());
        add_manager(&mut app, "Ann", "5000", "4");

        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(app.status.kind, StatusKind::Success);

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Type,Name,Salary,Team Size\nManager,Ann,5000,4\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Esc));
        assert!(!app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_render_shows_records() {
        let mut app = app();
        add_manager(&mut app, "Ann", "5000", "4");

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| ui(f, &mut app)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Employees"));
        assert!(screen.contains("Manager Ann manages 4"));
    }
}
