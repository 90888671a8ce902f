//! Ratatui-based terminal UI.
//!
//! Two tabs: the risk assessment form with its results, and notes about the
//! model. The form is grouped in sections; the loan-to-income card updates as
//! amounts change, and a calculation makes one synchronous predictor call.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Terminal,
};
use tracing::{error, info};

use crate::app::pipeline::{assess, Assessment};
use crate::cli::TuiArgs;
use crate::domain::ApplicantInput;
use crate::error::AppError;
use crate::form::{Field, Form, Section};
use crate::model::Predictor;
use crate::presenter::{classify_affordability, ColorToken};

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let form = match &args.from {
        Some(path) => Form::new(crate::io::read_applicant_json(path)?),
        None => Form::default(),
    };
    let predictor = crate::app::predictor_from_args(&args.model)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(predictor, form);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Assessment,
    About,
}

struct App {
    predictor: Box<dyn Predictor>,
    form: Form,
    tab: Tab,
    selected_field: usize,
    /// Text typed into the selected numeric field, while editing.
    edit_buffer: Option<String>,
    /// A calculation was requested; it runs after the loading status is drawn.
    pending: bool,
    status: String,
    status_is_error: bool,
    assessment: Option<Assessment>,
}

impl App {
    fn new(predictor: Box<dyn Predictor>, form: Form) -> Self {
        let status = format!("model: {}", predictor.name());
        Self {
            predictor,
            form,
            tab: Tab::Assessment,
            selected_field: 0,
            edit_buffer: None,
            pending: false,
            status,
            status_is_error: false,
            assessment: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            // The loading status is on screen now; make the blocking call.
            if self.pending {
                self.calculate();
                needs_redraw = true;
                continue;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
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

    fn selected(&self) -> Field {
        Field::ALL[self.selected_field]
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
        self.status_is_error = false;
    }

    fn set_error(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
        self.status_is_error = true;
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.edit_buffer.is_some() {
            self.handle_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.tab = match self.tab {
                    Tab::Assessment => Tab::About,
                    Tab::About => Tab::Assessment,
                };
            }
            _ if self.tab == Tab::About => {}
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field + 1 < Field::ALL.len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::Char('[') => self.adjust(-10),
            KeyCode::Char(']') => self.adjust(10),
            KeyCode::Enter => {
                let field = self.selected();
                if field.is_choice() {
                    self.adjust(1);
                } else {
                    self.edit_buffer = Some(String::new());
                    self.set_status(format!("Editing {}. Enter to apply, Esc to cancel.", field.label()));
                }
            }
            KeyCode::Char('c') | KeyCode::Char(' ') => {
                self.pending = true;
                self.set_status("Analyzing credit risk...");
            }
            _ => {}
        }
        false
    }

    fn handle_edit(&mut self, code: KeyCode) {
        let field = self.selected();
        match code {
            KeyCode::Esc => {
                self.edit_buffer = None;
                self.set_status("Edit canceled.");
            }
            KeyCode::Enter => {
                let text = self.edit_buffer.take().unwrap_or_default();
                let before = self.form.to_input();
                match self.form.set_from_text(field, &text) {
                    Ok(()) => {
                        self.set_status(format!("{}: {}", field.label(), self.form.value_text(field)));
                        self.discard_stale_assessment(&before);
                    }
                    Err(err) => self.set_error(err.to_string()),
                }
            }
            KeyCode::Backspace => {
                if let Some(buf) = self.edit_buffer.as_mut() {
                    buf.pop();
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == ',' => {
                if let Some(buf) = self.edit_buffer.as_mut() {
                    buf.push(c);
                }
            }
            _ => {}
        }
    }

    fn adjust(&mut self, steps: i64) {
        let before = self.form.to_input();
        self.form.adjust(self.selected(), steps);
        self.discard_stale_assessment(&before);
    }

    /// Results only describe the inputs they were calculated from.
    fn discard_stale_assessment(&mut self, before: &ApplicantInput) {
        if self.assessment.is_some() && self.form.input() != before {
            self.assessment = None;
            self.set_status("Inputs changed. Press c to recalculate.");
        }
    }

    fn calculate(&mut self) {
        self.pending = false;
        match assess(self.predictor.as_ref(), self.form.to_input()) {
            Ok(a) => {
                info!(credit_score = a.result.credit_score, rating = %a.result.rating, "tui assessment");
                self.set_status(format!("Assessed with {}.", a.model));
                self.assessment = Some(a);
            }
            Err(err) => {
                error!(error = %err, "assessment failed");
                self.set_error(format!("Assessment failed: {err}"));
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        match self.tab {
            Tab::Assessment => self.draw_assessment(frame, chunks[1]),
            Tab::About => self.draw_about(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(Span::styled(
            " CreditVision: Credit Risk Assessment ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let selected = match self.tab {
            Tab::Assessment => 0,
            Tab::About => 1,
        };
        let tabs = Tabs::new(vec!["Risk Assessment", "About the Model"])
            .select(selected)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White));
        frame.render_widget(tabs, rows[0]);
        frame.render_widget(
            Paragraph::new(format!("model: {}", self.predictor.name())).style(Style::default().fg(Color::Gray)),
            rows[1],
        );
    }

    fn draw_assessment(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        self.draw_form(frame, cols[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Length(7), Constraint::Min(0)])
            .split(cols[1]);

        self.draw_ratio_card(frame, right[0]);
        self.draw_results(frame, right[1]);
        frame.render_widget(
            Paragraph::new(crate::report::format_guide())
                .block(Block::default().title("Interpretation Guide").borders(Borders::ALL))
                .wrap(Wrap { trim: false }),
            right[2],
        );
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let (items, selected_row) = self.form_items();
        let list = List::new(items)
            .block(Block::default().title("Applicant").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = ListState::default();
        state.select(Some(selected_row));
        frame.render_stateful_widget(list, rows[0], &mut state);

        let help = Paragraph::new(self.selected().help())
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, rows[1]);
    }

    /// Form rows with section headings, plus the list row of the selected field.
    fn form_items(&self) -> (Vec<ListItem<'static>>, usize) {
        let mut items = Vec::new();
        let mut selected_row = 0;
        for section in Section::ALL {
            items.push(ListItem::new(Line::from(Span::styled(
                section.title(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))));
            for (idx, field) in Field::ALL.iter().enumerate().filter(|(_, f)| f.section() == section) {
                let value = match (&self.edit_buffer, idx == self.selected_field) {
                    (Some(buf), true) => format!("{buf}_"),
                    _ => self.form.value_text(*field),
                };
                let marker = if field.is_choice() { "◂ ▸" } else { "" };
                if idx == self.selected_field {
                    selected_row = items.len();
                }
                items.push(ListItem::new(format!("  {:<30} {value} {marker}", field.label())));
            }
        }
        (items, selected_row)
    }

    fn draw_ratio_card(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let input = self.form.input();
        let affordability = classify_affordability(input.loan_amount, input.income);
        let text = Text::from(vec![
            Line::from(Span::styled(
                format!("{:.2}", affordability.ratio),
                Style::default().fg(token_color(ColorToken::Red)).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("{} {}", affordability.tier.symbol(), affordability.label)),
        ]);
        let card = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().title("Loan to Income Ratio").borders(Borders::ALL));
        frame.render_widget(card, area);
    }

    fn draw_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(a) = &self.assessment else {
            let msg = if self.pending {
                "Analyzing credit risk..."
            } else {
                "Press c to calculate credit risk."
            };
            let p = Paragraph::new(msg)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().title("Risk Assessment Results").borders(Borders::ALL));
            frame.render_widget(p, area);
            return;
        };

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        let p = &a.presentation;
        result_card(
            frame,
            cols[0],
            "Default Probability",
            format!("{:.1}%", a.result.probability * 100.0),
            p.probability.label,
            p.probability.color,
        );
        result_card(
            frame,
            cols[1],
            "Credit Score",
            a.result.credit_score.to_string(),
            p.score.label,
            p.score.color,
        );
        result_card(frame, cols[2], "Credit Rating", a.result.rating.clone(), "Grade", p.rating_color);
    }

    fn draw_about(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let text = format!("{}\n{}", crate::report::format_about(), crate::report::format_guide());
        let p = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::default().title("About the Model").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  [/] ×10  Enter edit  c calculate  Tab switch  q quit";
        let status_color = if self.status_is_error { Color::Red } else { Color::Yellow };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(self.status.as_str(), Style::default().fg(status_color)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn result_card(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    value: String,
    label: &str,
    color: ColorToken,
) {
    let text = Text::from(vec![
        Line::from(Span::styled(value, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(label.to_string()),
    ]);
    let card = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(token_color(color)))
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(card, area);
}

fn token_color(token: ColorToken) -> Color {
    let (r, g, b) = token.rgb();
    Color::Rgb(r, g, b)
}
