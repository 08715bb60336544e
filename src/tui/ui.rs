//! UI rendering using ratatui
//!
//! One screen: turn indicator and countdown at the top, scoreboard,
//! the input row with the letter-chain prompt, feedback from the last
//! turn, and the word history. A game-over banner replaces the input
//! prompt once the game ends.

use crate::game::{Engine, PLAYER_NAMES, TURN_SECONDS};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};

/// Render the whole game screen from engine state
pub fn render(frame: &mut Frame, engine: &Engine) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + turn indicator
            Constraint::Length(3), // Countdown gauge
            Constraint::Length(4), // Scoreboard
            Constraint::Length(3), // Input row
            Constraint::Length(2), // Feedback
            Constraint::Min(5),    // Word history
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(area);

    render_header(frame, layout[0], engine);
    render_timer(frame, layout[1], engine);
    render_scoreboard(frame, layout[2], engine);
    render_input(frame, layout[3], engine);
    render_feedback(frame, layout[4], engine);
    render_history(frame, layout[5], engine);
    render_footer(frame, layout[6]);
}

fn render_header(frame: &mut Frame, area: Rect, engine: &Engine) {
    let header = Paragraph::new(format!(
        "SHIRITORI   Turn: {}",
        engine.current_player_name()
    ))
    .style(Style::default().fg(Color::Yellow).bold())
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_timer(frame: &mut Frame, area: Rect, engine: &Engine) {
    let ratio = f64::from(engine.remaining) / f64::from(TURN_SECONDS);
    let color = if engine.remaining <= 5 {
        Color::Red
    } else {
        Color::Green
    };
    let label = if engine.lookup_pending() {
        "checking...".to_string()
    } else {
        format!("{}s", engine.remaining)
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Time"))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_scoreboard(frame: &mut Frame, area: Rect, engine: &Engine) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (i, name) in PLAYER_NAMES.iter().enumerate() {
        let style = if i == engine.current_player && !engine.game_over {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::White)
        };
        let score = Paragraph::new(format!("{}\n{}", name, engine.scores[i]))
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(score, columns[i]);
    }
}

fn render_input(frame: &mut Frame, area: Rect, engine: &Engine) {
    let prompt = match engine.last_letter {
        Some(letter) => format!("Start with '{}'", letter),
        None => "Type a word (4+ letters)".to_string(),
    };
    let text = if engine.input.is_empty() {
        Line::from(prompt).style(Style::default().fg(Color::DarkGray))
    } else {
        Line::from(format!("{}_", engine.input)).style(Style::default().fg(Color::White))
    };
    let input = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Word"));
    frame.render_widget(input, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, engine: &Engine) {
    let (text, color) = if engine.game_over {
        (
            format!(
                "GAME OVER - Final scores: {}: {}, {}: {}  (Ctrl+R for a new game)",
                PLAYER_NAMES[0], engine.scores[0], PLAYER_NAMES[1], engine.scores[1]
            ),
            Color::Red,
        )
    } else {
        (engine.feedback.clone(), Color::Magenta)
    };
    let feedback = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(feedback, area);
}

fn render_history(frame: &mut Frame, area: Rect, engine: &Engine) {
    let items: Vec<ListItem> = if engine.used_words().is_empty() {
        vec![ListItem::new("  No words yet.").style(Style::default().fg(Color::DarkGray))]
    } else {
        engine
            .used_words()
            .iter()
            .map(|entry| {
                ListItem::new(format!("  {}: {}", entry.by, entry.word))
                    .style(Style::default().fg(Color::White))
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Word History"));
    frame.render_widget(list, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new("Enter Submit  Ctrl+R Reset  Esc Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
