//! Calculator UI
//!
//! Input handling and rendering for the before/potions/after panels.

use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::calc::{Action, CalcState, Direction as CalcDirection, Field, Snapshot};
use crate::config::Settings;
use crate::potions::PotionId;
use crate::save;

/// Focusable input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Potion(PotionId),
}

/// Tab order, top to bottom
const FOCUS_ORDER: [Focus; 12] = [
    Focus::Field(Field::LevelBefore),
    Focus::Field(Field::ExperienceBefore),
    Focus::Field(Field::PercentageBefore),
    Focus::Potion(PotionId::Potion0),
    Focus::Potion(PotionId::Potion1),
    Focus::Potion(PotionId::Potion2),
    Focus::Potion(PotionId::Potion3),
    Focus::Potion(PotionId::Potion4),
    Focus::Potion(PotionId::Potion5),
    Focus::Field(Field::LevelAfter),
    Focus::Field(Field::ExperienceAfter),
    Focus::Field(Field::PercentageAfter),
];

/// Main UI application
pub struct App {
    /// Current calculator state (last accepted edit)
    state: CalcState,
    settings: Settings,
    /// Currently focused input
    focus: Focus,
    /// Raw text of the focused input, may not parse yet
    buffer: String,
    /// Last rejected edit, shown in the status line
    last_error: Option<String>,
    /// Where to autosave; None disables saving
    save_path: Option<PathBuf>,
}

impl App {
    pub fn new(state: CalcState, settings: Settings, save_path: Option<PathBuf>) -> Self {
        let mut app = Self {
            state,
            settings,
            focus: FOCUS_ORDER[0],
            buffer: String::new(),
            last_error: None,
            save_path,
        };
        app.buffer = app.formatted(app.focus);
        app
    }

    pub fn state(&self) -> &CalcState {
        &self.state
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Handle a key press; returns true when the app should quit
    pub fn handle_input(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Ok(true),
            KeyCode::Tab | KeyCode::Down => self.move_focus(1),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(FOCUS_ORDER.len() - 1),
            KeyCode::Char('+') => self.step_potion(1),
            KeyCode::Char('-') => self.step_potion(-1),
            KeyCode::Backspace => {
                self.buffer.pop();
                self.buffer_changed();
            }
            KeyCode::Char(c) if self.accepts(c) => {
                self.buffer.push(c);
                self.buffer_changed();
            }
            _ => {}
        }
        Ok(false)
    }

    fn move_focus(&mut self, step: usize) {
        let index = FOCUS_ORDER.iter().position(|&f| f == self.focus).unwrap_or(0);
        self.focus = FOCUS_ORDER[(index + step) % FOCUS_ORDER.len()];
        self.buffer = self.formatted(self.focus);
    }

    fn accepts(&self, c: char) -> bool {
        match self.focus {
            Focus::Field(Field::PercentageBefore | Field::PercentageAfter) => {
                c.is_ascii_digit() || (c == '.' && !self.buffer.contains('.'))
            }
            _ => c.is_ascii_digit(),
        }
    }

    fn step_potion(&mut self, delta: i64) {
        let Focus::Potion(id) = self.focus else {
            return;
        };
        let max = id.descriptor().max_count as i64;
        let count = (self.state.potions[id] as i64 + delta).clamp(0, max) as u32;
        self.buffer = count.to_string();
        self.dispatch(Action::Potion(id, count));
    }

    /// Parse the buffer and dispatch when it holds a usable value
    fn buffer_changed(&mut self) {
        let text = self.buffer.trim();
        let action = match self.focus {
            Focus::Field(field) => parse_field(field, text),
            Focus::Potion(id) => {
                // An emptied potion input means none
                let count = if text.is_empty() { Some(0) } else { text.parse().ok() };
                match count {
                    Some(count) if count > id.descriptor().max_count => {
                        self.last_error = Some(format!(
                            "{} is limited to {}",
                            id.descriptor().label,
                            id.descriptor().max_count
                        ));
                        None
                    }
                    Some(count) => Some(Action::Potion(id, count)),
                    None => None,
                }
            }
        };
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    fn dispatch(&mut self, action: Action) {
        match self.state.reduce(action) {
            Ok(next) => {
                log::debug!("{:?}: {:?} -> {:?}", action, self.state.change, next.change);
                self.state = next;
                self.last_error = None;
                if self.settings.autosave {
                    self.save();
                }
            }
            Err(e) => {
                log::warn!("Rejected {:?}: {}", action, e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn save(&self) {
        if let Some(path) = &self.save_path {
            if let Err(e) = save::save_state_to(path, &self.state) {
                log::warn!("Failed to save state: {}", e);
            }
        }
    }

    /// Display text for an input that does not have focus
    fn formatted(&self, focus: Focus) -> String {
        match focus {
            Focus::Potion(id) => self.state.potions[id].to_string(),
            Focus::Field(field @ (Field::LevelBefore | Field::LevelAfter)) => {
                self.side(field).level.to_string()
            }
            Focus::Field(field @ (Field::ExperienceBefore | Field::ExperienceAfter)) => {
                self.side(field).experience.to_string()
            }
            Focus::Field(field) => self.format_percentage(self.side(field)),
        }
    }

    fn side(&self, field: Field) -> &Snapshot {
        match field.direction() {
            CalcDirection::Forward => &self.state.before,
            CalcDirection::Reverse => &self.state.after,
        }
    }

    fn format_percentage(&self, snapshot: &Snapshot) -> String {
        let decimals = self.settings.percentage_decimals;
        match snapshot.typed_percentage {
            Some(typed) => format!("{:.*}", decimals as usize, typed),
            None => snapshot
                .percentage()
                .map(|p| p.format(decimals))
                .unwrap_or_else(|_| "-".to_string()),
        }
    }

    /// Text shown for an input: the live buffer when focused
    fn display(&self, focus: Focus) -> String {
        if focus == self.focus {
            format!("{}_", self.buffer)
        } else {
            self.formatted(focus)
        }
    }

    fn input_style(&self, focus: Focus) -> Style {
        if focus == self.focus {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        frame.render_widget(Clear, frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(PotionId::COUNT as u16 + 2),
                Constraint::Length(4),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(frame.area());

        self.render_side(
            frame,
            chunks[0],
            " Before potions ",
            [Field::LevelBefore, Field::ExperienceBefore, Field::PercentageBefore],
        );
        self.render_potions(frame, chunks[1]);
        self.render_side(
            frame,
            chunks[2],
            " After potions ",
            [Field::LevelAfter, Field::ExperienceAfter, Field::PercentageAfter],
        );
        self.render_status(frame, chunks[3]);
    }

    fn render_side(&self, frame: &mut Frame, area: Rect, title: &str, fields: [Field; 3]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let labels = ["Lv ", "  Exp ", "  % "];
        let spans: Vec<Span> = labels
            .iter()
            .zip(fields)
            .flat_map(|(label, field)| {
                let focus = Focus::Field(field);
                [
                    Span::styled(*label, Style::default().fg(Color::DarkGray)),
                    Span::styled(self.display(focus), self.input_style(focus)),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

        // Progress through the current level, floored so a bar is only full at 100%
        let percent = self.side(fields[0]).percentage().map(|p| p.as_f64()).unwrap_or(0.0);
        let bar_width = rows[1].width as usize;
        let filled = ((bar_width as f64 * percent / 100.0) as usize).min(bar_width);
        let bar = Line::from(vec![
            Span::styled("█".repeat(filled), Style::default().fg(Color::Cyan)),
            Span::styled("░".repeat(bar_width - filled), Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(bar), rows[1]);
    }

    fn render_potions(&self, frame: &mut Frame, area: Rect) {
        let potions = &self.state.potions;
        let title = if potions.is_empty() {
            " Potions ".to_string()
        } else {
            format!(" Potions ({}) ", potions.total())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = PotionId::ALL
            .iter()
            .map(|&id| {
                let focus = Focus::Potion(id);
                let descriptor = id.descriptor();
                Line::from(vec![
                    Span::styled(format!("{:>5} ", self.display(focus)), self.input_style(focus)),
                    Span::raw(descriptor.label),
                    Span::styled(
                        format!("  (max Lv {})", descriptor.max_level),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let status = match &self.last_error {
            Some(e) => Line::from(Span::styled(e.clone(), Style::default().fg(Color::Red))),
            None => Line::from(Span::styled(
                format!("{:?}", self.state.direction()),
                Style::default().fg(Color::DarkGray),
            )),
        };
        let help = Line::from(Span::styled(
            "[Tab] Next  [+/-] Potions  [Esc] Quit",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(vec![status, help]), area);
    }
}

/// Parse text typed into a level/experience/percentage input
fn parse_field(field: Field, text: &str) -> Option<Action> {
    match field {
        Field::LevelBefore => text.parse().ok().map(Action::LevelBefore),
        Field::ExperienceBefore => text.parse().ok().map(Action::ExperienceBefore),
        Field::PercentageBefore => text.parse().ok().map(Action::PercentageBefore),
        Field::LevelAfter => text.parse().ok().map(Action::LevelAfter),
        Field::ExperienceAfter => text.parse().ok().map(Action::ExperienceAfter),
        Field::PercentageAfter => text.parse().ok().map(Action::PercentageAfter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_input(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn clear(app: &mut App) {
        for _ in 0..32 {
            app.handle_input(key(KeyCode::Backspace)).unwrap();
        }
    }

    fn new_app() -> App {
        App::new(CalcState::default(), Settings::default(), None)
    }

    #[test]
    fn test_typing_level_dispatches() {
        let mut app = new_app();
        clear(&mut app);
        type_text(&mut app, "210");
        assert_eq!(app.state().before.level, 210);
        assert_eq!(app.state().after.level, 210);
        assert_eq!(app.last_error(), None);
    }

    #[test]
    fn test_partial_input_reports_error_and_keeps_state() {
        let mut app = new_app();
        clear(&mut app);
        // Level 0 is rejected and level 2 stays
        type_text(&mut app, "2");
        assert_eq!(app.state().before.level, 2);
        clear(&mut app);
        type_text(&mut app, "0");
        assert_eq!(app.state().before.level, 2);
        assert!(app.last_error().is_some());
    }

    #[test]
    fn test_potion_plus_minus() {
        let mut app = new_app();
        for _ in 0..3 {
            app.handle_input(key(KeyCode::Tab)).unwrap();
        }
        assert_eq!(app.focus(), Focus::Potion(PotionId::Potion0));

        app.handle_input(key(KeyCode::Char('+'))).unwrap();
        app.handle_input(key(KeyCode::Char('+'))).unwrap();
        assert_eq!(app.state().potions[PotionId::Potion0], 2);
        assert_eq!(app.state().after.level, 202);

        app.handle_input(key(KeyCode::Char('-'))).unwrap();
        assert_eq!(app.state().after.level, 201);
    }

    #[test]
    fn test_potion_limit() {
        let mut app = new_app();
        for _ in 0..3 {
            app.handle_input(key(KeyCode::Tab)).unwrap();
        }
        clear(&mut app);
        assert_eq!(app.state().potions[PotionId::Potion0], 0);
        type_text(&mut app, "99");
        assert_eq!(app.state().potions[PotionId::Potion0], 9);
        assert!(app.last_error().is_some());
    }

    #[test]
    fn test_reverse_edit_from_after_side() {
        let mut app = new_app();
        app.handle_input(key(KeyCode::Tab)).unwrap();
        app.handle_input(key(KeyCode::Tab)).unwrap();
        app.handle_input(key(KeyCode::Tab)).unwrap();
        app.handle_input(key(KeyCode::Char('+'))).unwrap();
        // Back-tab wraps from the first input to the after-side percentage
        for _ in 0..4 {
            app.handle_input(key(KeyCode::BackTab)).unwrap();
        }
        assert_eq!(app.focus(), Focus::Field(Field::PercentageAfter));
        app.handle_input(key(KeyCode::BackTab)).unwrap();
        app.handle_input(key(KeyCode::BackTab)).unwrap();
        assert_eq!(app.focus(), Focus::Field(Field::LevelAfter));

        clear(&mut app);
        type_text(&mut app, "205");
        assert_eq!(app.state().after.level, 205);
        assert_eq!(app.state().before.level, 204);
    }

    #[test]
    fn test_percentage_input() {
        let mut app = new_app();
        app.handle_input(key(KeyCode::Tab)).unwrap();
        app.handle_input(key(KeyCode::Tab)).unwrap();
        clear(&mut app);
        type_text(&mut app, "50.5.");
        assert_eq!(app.state().before.typed_percentage, Some(50.5));
        app.handle_input(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.formatted(Focus::Field(Field::PercentageBefore)), "50.500");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = new_app();
        assert!(app.handle_input(key(KeyCode::Esc)).unwrap());
        assert!(app.handle_input(key(KeyCode::Char('q'))).unwrap());
        assert!(!app.handle_input(key(KeyCode::Char('7'))).unwrap());
    }

    #[test]
    fn test_autosave_writes_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut app = App::new(CalcState::default(), Settings::default(), Some(path.clone()));
        clear(&mut app);
        type_text(&mut app, "230");
        assert_eq!(save::load_state_from(&path).unwrap().before.level, 230);
    }

    #[test]
    fn test_render_panels() {
        let app = new_app();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Before potions"));
        assert!(text.contains("After potions"));
        assert!(text.contains("0.000"));
        assert!(text.contains(" Potions "));
        assert!(!text.contains("Potions ("));
    }

    #[test]
    fn test_render_potion_total_and_progress_bar() {
        let state = CalcState::default()
            .reduce(Action::PercentageBefore(50.0))
            .and_then(|s| s.reduce(Action::Potion(PotionId::Potion0, 2)))
            .and_then(|s| s.reduce(Action::Potion(PotionId::Potion3, 1)))
            .unwrap();
        let app = App::new(state, Settings::default(), None);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Potions (3)"));

        // Before side sits at 50%: half of its 58-cell bar is filled
        let bar: String = (1..59).map(|x| buffer[(x, 2)].symbol()).collect();
        assert_eq!(bar, format!("{}{}", "█".repeat(29), "░".repeat(29)));
    }
}
