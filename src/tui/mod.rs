//! Ratatui-based terminal UI.
//!
//! One screen, laid out as a prediction page: a sidebar with the
//! input form, model notes and instructions, and a result panel that shows a
//! verdict after Predict is pressed.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::pipeline::{self, Session};
use crate::domain::Field;
use crate::error::{AppError, EXIT_TERMINAL};
use crate::report::{ABOUT_MODEL, APP_SUBTITLE, APP_TITLE, INSTRUCTIONS, Tone, Verdict};

mod form;

use form::{COARSE_STEPS, Form, ROWS, Row};

/// Width of the slider bar, in cells.
const SLIDER_WIDTH: usize = 16;

/// Start the TUI with an already-loaded model.
pub fn run(session: Session) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(session);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                EXIT_TERMINAL,
                format!("Failed to enter alternate screen: {e}"),
            ));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    session: Session,
    form: Form,
    verdict: Option<Verdict>,
    status: String,
}

impl App {
    fn new(session: Session) -> Self {
        let status = format!(
            "Loaded {} from {}",
            session.predictor.describe(),
            session.summary.path.display()
        );
        Self {
            session,
            form: Form::default(),
            verdict: None,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read()
                .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event read error: {e}")))?
            {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let coarse = key.modifiers.contains(KeyModifiers::SHIFT);
        let steps = if coarse { COARSE_STEPS } else { 1 };

        let changed = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.form.select_prev();
                false
            }
            KeyCode::Down => {
                self.form.select_next();
                false
            }
            KeyCode::Left => self.form.adjust(-steps),
            KeyCode::Right => self.form.adjust(steps),
            KeyCode::PageDown => self.form.adjust(-COARSE_STEPS),
            KeyCode::PageUp => self.form.adjust(COARSE_STEPS),
            KeyCode::Home => self.form.jump_to_min(),
            KeyCode::End => self.form.jump_to_max(),
            KeyCode::Enter | KeyCode::Char('p') => {
                self.predict();
                false
            }
            _ => false,
        };

        if changed {
            // A verdict only describes the inputs it was computed from.
            self.verdict = None;
            if let Row::Input(field) = self.form.selected_row() {
                self.status = format!("{}: {}", field.display_name(), self.form.display_value(field));
            }
        }
        false
    }

    fn predict(&mut self) {
        let verdict = pipeline::predict(&self.session.predictor, &self.form.features);
        tracing::info!(label = verdict.label.code(), "form prediction");
        self.status = "Prediction updated.".to_string();
        self.verdict = Some(verdict);
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                APP_TITLE,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(APP_SUBTITLE, Style::default().fg(Color::Gray))),
        ];
        let p = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(52), Constraint::Min(0)])
            .split(area);

        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(ROWS.len() as u16 + 2),
                Constraint::Min(0),
                Constraint::Length(INSTRUCTIONS.len() as u16 + 2),
            ])
            .split(columns[0]);

        self.draw_inputs(frame, sidebar[0]);
        self.draw_about(frame, sidebar[1]);
        self.draw_instructions(frame, sidebar[2]);
        self.draw_result(frame, columns[1]);
    }

    fn draw_inputs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = ROWS
            .iter()
            .map(|row| match row {
                Row::Input(field) => ListItem::new(self.input_line(*field)),
                Row::Predict => ListItem::new(Line::from(Span::styled(
                    "[ Predict ]",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))),
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Input Parameters").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.form.selected_index()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn input_line(&self, field: Field) -> Line<'static> {
        let name = format!("{:<18}", field.display_name());
        let value = self.form.display_value(field);
        let control = match field {
            Field::Job => format!("◀ {value:<15} ▶"),
            _ => {
                let bounds = field.bounds();
                let bar = slider_bar(self.form.features.get(field), bounds.min, bounds.max, SLIDER_WIDTH);
                format!("{value:>7} {bar}")
            }
        };
        Line::from(vec![
            Span::raw(name),
            Span::styled(control, Style::default().fg(Color::Gray)),
        ])
    }

    fn draw_about(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = vec![Line::from(Span::styled(
            "Random Forest Classifier",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        for paragraph in ABOUT_MODEL {
            lines.push(Line::from(format!("- {paragraph}")));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Loaded: {} trees, max depth {}, from {} ({})",
                self.session.summary.n_trees,
                self.session.summary.max_depth,
                self.session.summary.path.display(),
                self.session.config.source.display_name(),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("About the Model").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_instructions(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines: Vec<Line> = INSTRUCTIONS
            .iter()
            .enumerate()
            .map(|(idx, text)| Line::from(format!("{}. {text}", idx + 1)))
            .collect();
        let p = Paragraph::new(Text::from(lines))
            .style(Style::default().fg(Color::Cyan))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Instructions").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Prediction").borders(Borders::ALL);

        let Some(verdict) = &self.verdict else {
            let msg = Paragraph::new("Fill in the details, then select Predict and press Enter.")
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(msg, area);
            return;
        };

        let color = match verdict.tone {
            Tone::Success => Color::Green,
            Tone::Warning => Color::Yellow,
        };
        let lines = vec![
            Line::from(Span::styled(
                verdict.headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(verdict.explanation, Style::default().fg(Color::Gray))),
        ];
        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(block.border_style(Style::default().fg(color)));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust (Shift ×10)  Home/End min/max  Enter/p predict  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Text slider, e.g. `[██████··········]`.
fn slider_bar(value: u32, min: u32, max: u32, width: usize) -> String {
    let span = max.saturating_sub(min).max(1) as f64;
    let u = (value.saturating_sub(min) as f64 / span).clamp(0.0, 1.0);
    let filled = (u * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "·".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    use ratatui::backend::TestBackend;

    use crate::config::{ModelConfig, ModelSource};
    use crate::domain::{JobCategory, Label};
    use crate::io::ModelSummary;
    use crate::models::Predictor;
    use crate::models::predictor::tests::ConstantClassifier;

    fn session(label: Label) -> Session {
        Session {
            predictor: Predictor::new(Arc::new(ConstantClassifier(label))),
            summary: ModelSummary {
                path: PathBuf::from("random_forest_model.json"),
                n_trees: 100,
                n_nodes: 2000,
                max_depth: 10,
                n_features: 5,
                classes: vec![0, 1],
            },
            config: ModelConfig {
                path: PathBuf::from("random_forest_model.json"),
                source: ModelSource::Default,
            },
        }
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_page_sections_before_any_prediction() {
        let app = App::new(session(Label::NoDefault));
        let screen = render(&app);
        assert!(screen.contains(APP_TITLE));
        assert!(screen.contains("Input Parameters"));
        assert!(screen.contains("About the Model"));
        assert!(screen.contains("Instructions"));
        assert!(screen.contains("[ Predict ]"));
        assert!(!screen.contains("Likely to Default"));
    }

    #[test]
    fn stub_zero_shows_not_likely_after_enter() {
        let mut app = App::new(session(Label::NoDefault));
        assert!(!press(&mut app, KeyCode::Enter));
        let screen = render(&app);
        assert!(screen.contains("The customer is Not Likely to Default."));
    }

    #[test]
    fn stub_one_shows_likely_after_p() {
        let mut app = App::new(session(Label::Default));
        press(&mut app, KeyCode::Char('p'));
        let screen = render(&app);
        assert!(screen.contains("The customer is Likely to Default."));
        assert!(!screen.contains("Not Likely"));
    }

    #[test]
    fn editing_an_input_clears_the_verdict() {
        let mut app = App::new(session(Label::Default));
        press(&mut app, KeyCode::Enter);
        assert!(app.verdict.is_some());

        press(&mut app, KeyCode::Right);
        assert!(app.verdict.is_none());
        assert_eq!(app.form.features.credit_score, 605);
        assert_eq!(app.status, "Credit Score: 605");
    }

    #[test]
    fn shift_and_page_keys_take_coarse_steps() {
        let mut app = App::new(session(Label::Default));
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT));
        assert_eq!(app.form.features.credit_score, 650);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.form.features.credit_score, 600);
        press(&mut app, KeyCode::End);
        assert_eq!(app.form.features.credit_score, 850);
    }

    #[test]
    fn job_selector_is_driven_by_arrows() {
        let mut app = App::new(session(Label::Default));
        for _ in 0..3 {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.features.job, JobCategory::ItProfessional);
        assert_eq!(app.status, "Job: IT Professional");
        assert!(render(&app).contains("IT Professional"));
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new(session(Label::Default));
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn slider_bar_fills_proportionally() {
        assert_eq!(slider_bar(300, 300, 850, 4), "[····]");
        assert_eq!(slider_bar(850, 300, 850, 4), "[████]");
        assert_eq!(slider_bar(50, 0, 100, 4), "[██··]");
    }
}
