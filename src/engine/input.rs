use serde::{Deserialize, Serialize};

use super::gesture::{Direction, GestureEvent};

/// Discrete commands; swipes are equivalent to a drag past the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    SwipeLeft,
    SwipeRight,
    Close,
}

impl Command {
    /// Keyboard mapping of the web client
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(Command::SwipeRight),
            "ArrowLeft" => Some(Command::SwipeLeft),
            "Escape" => Some(Command::Close),
            _ => None,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Command::SwipeLeft => Some(Direction::Left),
            Command::SwipeRight => Some(Direction::Right),
            Command::Close => None,
        }
    }
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => Command::SwipeLeft,
            Direction::Right => Command::SwipeRight,
        }
    }
}

/// Everything a presentation layer can feed into a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionInput {
    Gesture(GestureEvent),
    Command(Command),
    Resize(f64),
}

impl From<GestureEvent> for SessionInput {
    fn from(event: GestureEvent) -> Self {
        SessionInput::Gesture(event)
    }
}

impl From<Command> for SessionInput {
    fn from(command: Command) -> Self {
        SessionInput::Command(command)
    }
}

/// Parses one line typed into the terminal client.
///
/// Accepts key names (`ArrowLeft`), shorthands (`l`, `r`, `q`), a full drag
/// (`drag <dx> [dy]`, expanded to start/move/end) and `resize <width>`.
pub fn parse_line(line: &str) -> Option<Vec<SessionInput>> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;

    if let Some(command) = Command::from_key(head) {
        return Some(vec![command.into()]);
    }

    match head.to_lowercase().as_str() {
        "l" | "left" | "n" => Some(vec![Command::SwipeLeft.into()]),
        "r" | "right" | "y" => Some(vec![Command::SwipeRight.into()]),
        "q" | "quit" | "close" => Some(vec![Command::Close.into()]),
        "drag" => {
            let dx: f64 = parts.next()?.parse().ok()?;
            let dy: f64 = match parts.next() {
                Some(raw) => raw.parse().ok()?,
                None => 0.0,
            };
            Some(vec![
                GestureEvent::Start.into(),
                GestureEvent::Move { dx, dy }.into(),
                GestureEvent::End { dx, dy }.into(),
            ])
        }
        "resize" => {
            let width: f64 = parts.next()?.parse().ok()?;
            Some(vec![SessionInput::Resize(width)])
        }
        _ => None,
    }
}
