//! Shiritori - two-player hot-seat word-chaining game
//!
//! Chain words, beat the clock, keep your score above water.

mod dictionary;
mod game;
mod storage;
mod tui;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use dictionary::DictionaryChecker;
use game::{Engine, SubmitAction};
use std::io;
use std::time::{Duration, Instant};
use storage::Storage;
use tui::Tui;

fn main() -> io::Result<()> {
    // Initialize terminal
    let mut terminal = Tui::new()?;
    terminal.enter()?;

    // Persistence is best-effort: run without it if the database
    // cannot be opened
    let storage = Storage::open().ok();

    // Resume the saved game if there is one
    let mut engine = match storage.as_ref().and_then(|s| s.load()) {
        Some(snapshot) => Engine::from_snapshot(snapshot),
        None => Engine::new(),
    };

    let checker = DictionaryChecker::spawn();

    // Main event loop
    let tick_rate = Duration::from_secs(1);
    let mut last_tick = Instant::now();
    let mut should_quit = false;

    while !should_quit {
        // Render
        terminal.draw(|frame| tui::render(frame, &engine))?;

        let mut mutated = false;

        // Calculate timeout for next tick
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        // Poll for events with timeout
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc => {
                            should_quit = true;
                        }
                        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            engine.reset();
                            mutated = true;
                        }
                        KeyCode::Enter => {
                            if let SubmitAction::Lookup { attempt, word } = engine.on_submit() {
                                checker.request(attempt, word);
                            }
                            mutated = true;
                        }
                        KeyCode::Backspace => {
                            engine.on_backspace();
                        }
                        KeyCode::Char(c) => {
                            engine.on_char(c);
                        }
                        _ => {}
                    }
                }
            }
        }

        // Apply any dictionary verdicts that came back
        while let Some((attempt, valid)) = checker.try_recv() {
            engine.on_dictionary_result(attempt, valid);
            mutated = true;
        }

        // Handle timer tick
        if last_tick.elapsed() >= tick_rate {
            engine.tick();
            last_tick = Instant::now();
            mutated = true;
        }

        // Write-through save after every state change; failures are
        // ignored, the game never depends on storage
        if mutated {
            if let Some(storage) = &storage {
                let _ = storage.save(&engine.snapshot());
            }
        }
    }

    // Terminal cleanup happens automatically via Tui::drop
    Ok(())
}
