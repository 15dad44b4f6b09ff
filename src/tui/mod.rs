// SPDX-FileCopyrightText: 2026 Undine Contributors
// SPDX-License-Identifier: MIT

//! Terminal UI.
//!
//! The interactive shell (ratatui + crossterm): a process-description input panel on the
//! left, the diagram viewport and explanation panel on the right, a footer with key hints,
//! and a blocking alert modal for failed generation requests.
//!
//! The event loop is single-threaded. Generation requests are spawned onto the tokio runtime
//! and their settled outcomes come back over an mpsc channel drained once per tick, so all
//! state mutation happens on the UI thread.

use std::error::Error;
use std::io;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::client::GenerationClient;
use crate::controller::{Controller, GenerationReply, SubmitTicket};
use crate::engine::BpmnEngine;
use crate::widget::{DiagramWidget, RenderFailureMode};


const FOCUS_COLOR: Color = Color::LightGreen;
const LOADING_COLOR: Color = Color::Yellow;
const VALID_COLOR: Color = Color::Green;
const INVALID_COLOR: Color = Color::Red;
const ALERT_COLOR: Color = Color::LightRed;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const INPUT_PLACEHOLDER: &str =
    "Example: When a customer submits a request, first validate it, then approve or reject \
     based on criteria...";
const DIAGRAM_PLACEHOLDER: &str = "Describe a process and press Ctrl+S to generate a diagram.";
const EXPLANATION_PLACEHOLDER: &str = "The explanation will appear here after generation.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Input,
    Diagram,
    Explanation,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Input => Self::Diagram,
            Self::Diagram => Self::Explanation,
            Self::Explanation => Self::Input,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Input => Self::Explanation,
            Self::Diagram => Self::Input,
            Self::Explanation => Self::Diagram,
        }
    }
}

/// Runs the interactive terminal UI until the user quits.
pub fn run(
    client: GenerationClient,
    runtime: tokio::runtime::Handle,
    demo: bool,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let (reply_tx, reply_rx) = mpsc::channel::<GenerationReply>();
    let mut app = App::new();
    if demo {
        app.controller.preload_sample();
    }

    while !app.should_quit {
        while let Ok(reply) = reply_rx.try_recv() {
            app.controller.apply_reply(reply);
        }
        app.sync_widget();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                    if let Some(ticket) = app.take_pending_submit() {
                        spawn_generate(&runtime, &client, &reply_tx, ticket);
                    }
                }
                _ => {}
            }
        }
    }

    app.widget.unmount();
    Ok(())
}

fn spawn_generate(
    runtime: &tokio::runtime::Handle,
    client: &GenerationClient,
    reply_tx: &mpsc::Sender<GenerationReply>,
    ticket: SubmitTicket,
) {
    let client = client.clone();
    let reply_tx = reply_tx.clone();
    runtime.spawn(async move {
        let outcome = client.generate(&ticket.text).await;
        // The receiver is gone only when the UI already shut down.
        let _ = reply_tx.send(GenerationReply::new(ticket.seq, outcome));
    });
}

pub(crate) struct App {
    controller: Controller,
    widget: DiagramWidget<BpmnEngine>,
    focus: Focus,
    should_quit: bool,
    pending_submit: Option<SubmitTicket>,
    explanation_scroll: u16,
}

impl App {
    fn new() -> Self {
        Self {
            controller: Controller::new(),
            widget: DiagramWidget::mount(BpmnEngine::new(), RenderFailureMode::LogOnly),
            focus: Focus::Input,
            should_quit: false,
            pending_submit: None,
            explanation_scroll: 0,
        }
    }

    fn take_pending_submit(&mut self) -> Option<SubmitTicket> {
        self.pending_submit.take()
    }

    /// Feeds the newest result's markup to the widget. The widget ignores revisions it has
    /// already imported, so calling this every tick is cheap.
    fn sync_widget(&mut self) {
        if let Some(result) = self.controller.result() {
            let rev = self.controller.result_rev();
            let markup = result.bpmn_xml.clone();
            self.widget.sync(&markup, rev);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // The alert modal is blocking: nothing else reacts until it is dismissed.
        if self.controller.alert().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.controller.dismiss_alert();
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.request_submit(),
                KeyCode::Char('e') => self.controller.load_example(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            _ => match self.focus {
                Focus::Input => self.handle_input_key(key.code),
                Focus::Diagram => self.handle_diagram_key(key.code),
                Focus::Explanation => self.handle_explanation_key(key.code),
            },
        }
    }

    fn request_submit(&mut self) {
        if let Some(ticket) = self.controller.begin_submit() {
            self.pending_submit = Some(ticket);
        }
    }

    fn handle_input_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(ch) => self.controller.push_input(ch),
            KeyCode::Enter => self.controller.push_input('\n'),
            KeyCode::Backspace => self.controller.pop_input(),
            KeyCode::Esc => self.focus = Focus::Diagram,
            _ => {}
        }
    }

    fn handle_diagram_key(&mut self, code: KeyCode) {
        let step = 2isize;
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_diagram(0, -step),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_diagram(0, step),
            KeyCode::Left | KeyCode::Char('h') => self.scroll_diagram(-step, 0),
            KeyCode::Right | KeyCode::Char('l') => self.scroll_diagram(step, 0),
            KeyCode::Char('f') => self.widget.refit(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_explanation_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.explanation_scroll = self.explanation_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.explanation_scroll = self.explanation_scroll.saturating_add(1);
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn scroll_diagram(&mut self, dx: isize, dy: isize) {
        if let Some(engine) = self.widget.engine_mut() {
            engine.scroll_by(dx, dy);
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = rows[0];
    let footer_area = rows[1];

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_area);
    let input_area = panes[0];

    let output = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(panes[1]);
    let diagram_area = output[0];
    let explanation_area = output[1];

    draw_input(frame, app, input_area);
    draw_diagram(frame, app, diagram_area);
    draw_explanation(frame, app, explanation_area);

    let footer = Paragraph::new(footer_line(app));
    frame.render_widget(footer, footer_area);

    if let Some(message) = app.controller.alert() {
        draw_alert(frame, area, message);
    }
}

fn panel_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    }
}

fn draw_input(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = if app.controller.loading() {
        "Process Description — generating…"
    } else {
        "Process Description"
    };
    let border_style = if app.controller.loading() {
        Style::default().fg(LOADING_COLOR)
    } else {
        panel_border_style(app.focus == Focus::Input)
    };

    let mut text = app.controller.input().to_owned();
    if app.focus == Focus::Input {
        text.push('▌');
    }
    let body = if text.is_empty() {
        Text::from(Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray)))
    } else {
        Text::from(text)
    };

    let input = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(title).border_style(border_style))
        .wrap(Wrap { trim: false });
    frame.render_widget(input, area);
}

fn draw_diagram(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let border_style = panel_border_style(app.focus == Focus::Diagram);
    let block =
        Block::default().borders(Borders::ALL).title("BPMN Diagram").border_style(border_style);

    let viewport_width = area.width.saturating_sub(2) as usize;
    let viewport_height = area.height.saturating_sub(2) as usize;

    let body = match app.widget.engine_mut() {
        Some(engine) if engine.has_content() => {
            let lines = engine.visible_lines(viewport_width, viewport_height);
            Text::from(lines.into_iter().map(Line::from).collect::<Vec<_>>())
        }
        _ => Text::from(Span::styled(
            DIAGRAM_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(body).block(block), area);

    if let Some(notice) = app.widget.failure_notice() {
        let notice_line = Line::from(Span::styled(
            format!(" {notice} "),
            Style::default().fg(INVALID_COLOR).add_modifier(Modifier::REVERSED),
        ));
        let notice_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(2),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(notice_line), notice_area);
    }
}

fn draw_explanation(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let border_style = panel_border_style(app.focus == Focus::Explanation);
    let block =
        Block::default().borders(Borders::ALL).title("Explanation").border_style(border_style);

    let mut lines = Vec::new();
    match app.controller.result() {
        Some(result) => {
            let (color, verdict) =
                if result.validation.valid { (VALID_COLOR, "valid") } else { (INVALID_COLOR, "invalid") };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("Validation ({verdict}): "),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(result.validation.message.clone(), Style::default().fg(color)),
            ]));
            lines.push(Line::from(""));
            if result.explanation.is_empty() {
                lines.push(Line::from(Span::styled(
                    EXPLANATION_PLACEHOLDER,
                    Style::default().fg(Color::DarkGray),
                )));
            } else {
                for text_line in result.explanation.lines() {
                    lines.push(Line::from(text_line.to_owned()));
                }
            }
        }
        None => lines.push(Line::from(Span::styled(
            EXPLANATION_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let explanation = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.explanation_scroll, 0));
    frame.render_widget(explanation, area);
}

fn footer_line(app: &App) -> Line<'static> {
    let key = Style::default().fg(FOOTER_KEY_COLOR);
    let label = Style::default().fg(FOOTER_LABEL_COLOR);

    let mut spans = vec![
        Span::styled(" Tab", key),
        Span::styled(" focus  ", label),
        Span::styled("Ctrl+S", key),
        Span::styled(" generate  ", label),
        Span::styled("Ctrl+E", key),
        Span::styled(" example  ", label),
        Span::styled("↑↓←→", key),
        Span::styled(" scroll  ", label),
        Span::styled("f", key),
        Span::styled(" fit  ", label),
        Span::styled("q", key),
        Span::styled(" quit", label),
    ];
    if app.controller.loading() {
        spans.push(Span::styled("  Generating…", Style::default().fg(LOADING_COLOR)));
    }
    Line::from(spans)
}

fn draw_alert(frame: &mut Frame<'_>, area: Rect, message: &str) {
    let popup = centered_rect(area, 60, 20);
    frame.render_widget(Clear, popup);

    let body = Text::from(vec![
        Line::from(message.to_owned()),
        Line::from(""),
        Line::from(Span::styled("Press Enter to dismiss", Style::default().fg(FOOTER_LABEL_COLOR))),
    ]);
    let alert = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error")
                .border_style(Style::default().fg(ALERT_COLOR)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(alert, popup);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}
