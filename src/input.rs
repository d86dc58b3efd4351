//! Terminal input mapping: crossterm events to session actions.

use crate::session::Action;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

/// What the host loop should do with an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Act(Action),
    Quit,
    Ignore,
}

/// Map an event. `play_field` is where the field was last drawn; clicks
/// outside it are ignored.
pub fn map_event(event: &Event, play_field: Rect) -> Command {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse, play_field),
        _ => Command::Ignore,
    }
}

pub fn map_key(key: &KeyEvent) -> Command {
    // Only presses; releases and repeats would double-jump or double-restart.
    if key.kind != KeyEventKind::Press {
        return Command::Ignore;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Char(' ') | KeyCode::Up => Command::Act(Action::JumpOrRestart),
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Act(Action::Restart),
        KeyCode::Char('m') | KeyCode::Char('M') => Command::Act(Action::ToggleMute),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
        _ => Command::Ignore,
    }
}

fn map_mouse(mouse: &MouseEvent, play_field: Rect) -> Command {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Command::Ignore;
    }
    let inside = mouse.column >= play_field.x
        && mouse.column < play_field.x + play_field.width
        && mouse.row >= play_field.y
        && mouse.row < play_field.y + play_field.height;
    if inside {
        Command::Act(Action::JumpOrRestart)
    } else {
        Command::Ignore
    }
}
