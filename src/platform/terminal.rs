//! Terminal session and crossterm event polling

use std::io::{self, Write, stdout};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::{cursor, execute, terminal};

use super::InputSource;
use super::input::{InputEvent, Key, MouseButton};
use crate::error::Result;

/// Raw-mode alternate screen, restored when dropped
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )?;
        Ok(Self { _private: () })
    }

    /// Terminal size in logical pixels (cells are split in two vertically)
    pub fn pixel_size() -> Result<(u32, u32)> {
        let (cols, rows) = terminal::size()?;
        Ok((cols as u32, rows as u32 * 2))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut out = stdout();
        let _ = execute!(
            out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
        let _ = out.flush();
    }
}

/// Drains pending crossterm events without blocking
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Some(mapped) = map_event(event::read()?) {
                events.push(mapped);
            }
        }
        Ok(events)
    }
}

fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    // Raw mode swallows the interrupt signal
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Quit);
    }
    let key = match key.code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        _ => return None,
    };
    Some(InputEvent::KeyDown(key))
}

fn map_mouse(mouse: MouseEvent) -> Option<InputEvent> {
    let button = match mouse.kind {
        MouseEventKind::Down(event::MouseButton::Left) => MouseButton::Left,
        MouseEventKind::Down(event::MouseButton::Right) => MouseButton::Right,
        MouseEventKind::Down(event::MouseButton::Middle) => MouseButton::Middle,
        _ => return None,
    };
    Some(InputEvent::MouseDown(button))
}

fn map_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(cols, rows) => {
            log::debug!("Terminal resized to {}x{}", cols, rows);
            None
        }
        _ => None,
    }
}

/// Write a line below the game after the session has ended
pub fn farewell(message: &str) -> io::Result<()> {
    let mut out = stdout();
    writeln!(out, "{}", message)?;
    out.flush()
}
