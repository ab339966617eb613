//! Wikiquiz TUI - Actor-based terminal client for the quiz backend
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

mod app;
mod config;
mod constants;
mod messages;
mod models;
mod network;
mod ui;

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use app::state::{GeneratePhase, HistoryPhase, QuizOrigin, TakeState};
use app::AppActor;
use config::ApiConfig;
use messages::ui_events::{key_to_ui_event, AppTab, DisplayMode, InputMode, Panel};
use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use models::Quiz;
use network::{NetworkActor, QuizClient};
use ui::{difficulty_color, option_letter, render_tabs};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", "wikiquiz.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Backend address is resolved once and handed to the client explicitly
    let config = ApiConfig::from_env();
    tracing::info!(base_url = config.base_url(), "starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(QuizClient::new(config), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_tab,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.generate.display_mode(),
                    current_state.show_help,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    // Main layout with tab bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Tab bar
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    // Draw tab bar
    draw_tab_bar(f, state, main_chunks[0]);

    // Draw content based on active tab
    match state.active_tab {
        AppTab::Generate => draw_generate_tab(f, state, main_chunks[1]),
        AppTab::History => draw_history_tab(f, state, main_chunks[1]),
    }

    // Status bar
    draw_status_bar(f, state, main_chunks[2]);

    // Popups
    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let tabs = vec![
        Span::styled(
            " 1:Generate ",
            if state.active_tab == AppTab::Generate {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            }
        ),
        Span::raw(" "),
        Span::styled(
            " 2:History ",
            if state.active_tab == AppTab::History {
                Style::default().fg(Color::Black).bg(Color::Magenta).bold()
            } else {
                Style::default().fg(Color::Gray)
            }
        ),
        Span::styled(
            if state.generate.is_loading() { " [...]" } else { "" },
            Style::default().fg(Color::Yellow)
        ),
    ];

    let tab_line = Line::from(tabs);
    f.render_widget(Paragraph::new(tab_line), area);
}

fn draw_generate_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // URL + question count
            Constraint::Length(1),  // Validation error line
            Constraint::Min(5),     // Quiz area
        ])
        .split(area);

    draw_form(f, state, chunks[0]);
    draw_error_line(f, state, chunks[1]);
    draw_quiz_area(f, state, chunks[2]);
}

fn draw_form(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(30),     // Wikipedia URL
            Constraint::Length(16),  // Question count
        ])
        .split(area);

    let border_style = |panel: Panel| {
        let is_focused = state.active_panel == panel;
        if is_focused && state.input_mode == InputMode::Editing {
            Style::default().fg(Color::Yellow)
        } else if is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    };

    let loading = if state.generate.is_loading() { " [...]" } else { "" };
    let url_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(Panel::Url))
        .title(format!(" Wikipedia URL{} ", loading));
    f.render_widget(Paragraph::new(state.url.as_str()).block(url_block), chunks[0]);

    let count_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(Panel::Count))
        .title(" Questions ");
    f.render_widget(Paragraph::new(state.count.as_str()).block(count_block), chunks[1]);

    // Cursor
    if state.input_mode == InputMode::Editing {
        let chunk = match state.active_panel {
            Panel::Url => Some(chunks[0]),
            Panel::Count => Some(chunks[1]),
            Panel::Quiz => None,
        };
        if let Some(chunk) = chunk {
            let max_x = chunk.x + chunk.width.saturating_sub(2);
            let cursor_x = (chunk.x + state.cursor_position as u16 + 1).min(max_x);
            f.set_cursor_position(Position::new(cursor_x, chunk.y + 1));
        }
    }
}

fn draw_error_line(f: &mut Frame, state: &RenderState, area: Rect) {
    let text = state.form_error.as_deref().unwrap_or("");
    let error = Paragraph::new(format!(" {}", text))
        .style(Style::default().fg(Color::Red).bold());
    f.render_widget(error, area);
}

fn draw_quiz_area(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Quiz;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    match &state.generate {
        GeneratePhase::Idle => {
            let content = "Quick Reference:\n\
                ────────────────────────────\n\
                  e     Edit the URL\n\
                  g     Generate quiz\n\
                  v     View answers\n\
                  t     Take quiz\n\
                  2     History tab\n\
                  ?     Full help\n\
                  q     Quit\n\
                ────────────────────────────\n\
                Enter a Wikipedia URL and press 'g' to generate your first quiz!";
            let paragraph = Paragraph::new(content)
                .block(Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(" Quiz "))
                .wrap(Wrap { trim: false });
            f.render_widget(paragraph, area);
        }
        GeneratePhase::Loading { origin, .. } => {
            let content = match origin {
                QuizOrigin::Generate => "Generating quiz...",
                QuizOrigin::History => "Loading quiz...",
            };
            let paragraph = Paragraph::new(content)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(" Quiz "));
            f.render_widget(paragraph, area);
        }
        GeneratePhase::Failed { message } => {
            let paragraph = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .block(Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(" Quiz "));
            f.render_widget(paragraph, area);
        }
        GeneratePhase::Loaded { quiz, mode, take, scroll } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(area);

            // Mode bar
            let selected = match mode {
                DisplayMode::View => 0,
                DisplayMode::Take => 1,
            };
            let tabs = render_tabs(&["v:View Answers", "t:Take Quiz"], selected);
            f.render_widget(tabs, chunks[0]);

            match mode {
                DisplayMode::View => draw_answer_cards(f, quiz, *scroll, border_style, chunks[1]),
                DisplayMode::Take => draw_take(f, quiz, take, border_style, chunks[1]),
            }
        }
    }
}

/// Render every question as an answer-revealing card, in server order
fn draw_answer_cards(f: &mut Frame, quiz: &Quiz, scroll: u16, border_style: Style, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    for (i, question) in quiz.questions.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("Q{}. {}", i + 1, question.question),
            Style::default().bold(),
        )));

        let correct = question.correct_index();
        for (j, option) in question.options.iter().enumerate() {
            let (marker, style) = if correct == Some(j) {
                ("[x]", Style::default().fg(Color::Green).bold())
            } else {
                ("[ ]", Style::default())
            };
            lines.push(Line::from(Span::styled(
                format!("  {} {}. {}", marker, option_letter(j), option),
                style,
            )));
        }

        let mut meta = vec![Span::styled(
            question.difficulty.clone(),
            Style::default().fg(difficulty_color(&question.difficulty)),
        )];
        if !question.related_topics.is_empty() {
            meta.push(Span::styled(
                format!("  ({})", question.related_topics.join(", ")),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(meta));

        if !question.explanation.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", question.explanation),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} (answers) ", quiz.quiz_title));

    let cards = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(cards, area);
}

/// Render the interactive runner: one question at a time, then the score
fn draw_take(f: &mut Frame, quiz: &Quiz, take: &TakeState, border_style: Style, area: Rect) {
    if quiz.is_empty() {
        let empty = Paragraph::new("The backend returned a quiz with no questions.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", quiz.quiz_title)));
        f.render_widget(empty, area);
        return;
    }

    if take.finished {
        draw_take_results(f, quiz, take, border_style, area);
        return;
    }

    let question = &quiz.questions[take.current];
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        question.question.clone(),
        Style::default().bold(),
    )));
    lines.push(Line::from(Span::styled(
        question.difficulty.clone(),
        Style::default().fg(difficulty_color(&question.difficulty)),
    )));
    lines.push(Line::from(""));

    let chosen = take.answers[take.current];
    for (j, option) in question.options.iter().enumerate() {
        let prefix = if take.highlighted == j { "> " } else { "  " };
        let suffix = if chosen == Some(j) { "  [chosen]" } else { "" };
        let style = if take.highlighted == j {
            Style::default().fg(Color::Yellow).bold()
        } else if chosen == Some(j) {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}. {}{}", prefix, option_letter(j), option, suffix),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Answered {}/{}", take.answered(), quiz.len()),
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(
            " {} ({}/{}) ",
            quiz.quiz_title,
            take.current + 1,
            quiz.len()
        ));

    let runner = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(runner, area);
}

fn draw_take_results(f: &mut Frame, quiz: &Quiz, take: &TakeState, border_style: Style, area: Rect) {
    let score = take.score(quiz);
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        format!("You scored {}/{}", score, quiz.len()),
        Style::default().bold(),
    )));
    lines.push(Line::from(""));

    for (i, question) in quiz.questions.iter().enumerate() {
        let answered = take.answers[i].and_then(|j| question.options.get(j));
        let correct = answered.map(|o| o == &question.correct_answer).unwrap_or(false);
        let (marker, style) = if correct {
            ("+", Style::default().fg(Color::Green))
        } else {
            ("x", Style::default().fg(Color::Red))
        };
        lines.push(Line::from(Span::styled(
            format!("{} Q{}. {}", marker, i + 1, question.question),
            style,
        )));
        if !correct {
            lines.push(Line::from(Span::styled(
                format!("    correct: {}", question.correct_answer),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "r:retake  v:view answers  g:new quiz",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} (results) ", quiz.quiz_title));

    let results = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(results, area);
}

fn draw_history_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" History (r:refresh, Enter:open) ");

    match &state.history {
        HistoryPhase::Idle => {
            let paragraph = Paragraph::new("Press 'r' to load history.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(paragraph, area);
        }
        HistoryPhase::Loading { .. } => {
            let paragraph = Paragraph::new("Loading history...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(paragraph, area);
        }
        HistoryPhase::Failed(message) => {
            let paragraph = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .block(block);
            f.render_widget(paragraph, area);
        }
        HistoryPhase::Loaded(entries) => {
            if entries.is_empty() {
                let paragraph = Paragraph::new("No quizzes yet. Generate one on tab 1!")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block);
                f.render_widget(paragraph, area);
                return;
            }

            let items: Vec<ListItem> = entries
                .iter()
                .map(|entry| {
                    let date = entry
                        .created_at
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default();
                    let id_span = Span::styled(
                        format!("#{:<5}", entry.quiz_id),
                        Style::default().fg(Color::Cyan),
                    );
                    let title_span = Span::raw(format!(" {}", entry.quiz_title));
                    let date_span = Span::styled(
                        format!("  {}", date),
                        Style::default().fg(Color::DarkGray),
                    );
                    ListItem::new(Line::from(vec![id_span, title_span, date_span]))
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().fg(Color::Yellow).bold());

            let mut list_state = ListState::default();
            list_state.select(Some(state.history_selected));

            f.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.generate.is_loading() {
        " Working... "
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Enter:done "
    } else if state.active_tab == AppTab::History {
        " r:refresh | Enter:open | 1:generate tab | ?:help | q:quit "
    } else if state.generate.quiz().is_some() {
        " Tab:panel | g:regenerate | v:answers | t:take | r:restart | ?:help | q:quit "
    } else {
        " Tab:panel | e:edit | g:generate | ?:help | q:quit "
    };

    let bar = Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 WIKIQUIZ TUI - Keyboard Shortcuts

 NAVIGATION
   1 / 2              Generate / History tab
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Scroll answers / pick option / select entry

 GENERATE
   e / Enter          Edit URL or question count
   g                  Generate quiz
   v                  View answers
   t                  Take quiz

 TAKE QUIZ
   ↑ / ↓              Highlight option
   Enter              Answer and advance
   ← / →              Revisit questions
   r                  Restart quiz

 HISTORY
   r                  Refresh listing
   Enter              Reopen selected quiz

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
