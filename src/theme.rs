use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub(crate) fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub(crate) fn palette(self) -> Palette {
        match self {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }
}

/// Styles used for drawing the game screen
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Palette {
    /// Border & background of the board
    pub(crate) board: Style,
    pub(crate) empty: Style,
    pub(crate) snake: Style,
    pub(crate) head: Style,
    pub(crate) food: Style,
    /// Style for the snake's head once it has crashed
    pub(crate) collision: Style,
    pub(crate) score_bar: Style,
    pub(crate) status: Style,
    /// Style for the "New High Score!" notice
    pub(crate) notice: Style,
}

const LIGHT: Palette = Palette {
    board: Style::new().fg(Color::Black).bg(Color::White),
    empty: Style::new().fg(Color::Gray).bg(Color::White),
    snake: Style::new()
        .fg(Color::Green)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD),
    head: Style::new()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD),
    food: Style::new().fg(Color::Blue).bg(Color::White),
    collision: Style::new()
        .fg(Color::Red)
        .bg(Color::White)
        .add_modifier(Modifier::REVERSED),
    score_bar: Style::new().fg(Color::Blue).add_modifier(Modifier::REVERSED),
    status: Style::new(),
    notice: Style::new()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD),
};

const DARK: Palette = Palette {
    board: Style::new().fg(Color::Gray),
    empty: Style::new().fg(Color::DarkGray),
    snake: Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
    head: Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    food: Style::new().fg(Color::LightBlue),
    collision: Style::new()
        .fg(Color::LightRed)
        .add_modifier(Modifier::REVERSED),
    score_bar: Style::new().add_modifier(Modifier::REVERSED),
    status: Style::new(),
    notice: Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
};
