//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 26,
};

/// Default number of cells along each edge of the (square) board
pub(crate) const DEFAULT_CELL_NUMBER: u16 = 20;

/// Snake length at the start of a run
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// Obstacles present at the start of a run
pub(crate) const INITIAL_OBSTACLES: usize = 5;

/// Hard cap on the number of obstacles on the board
pub(crate) const MAX_OBSTACLES: usize = 10;

/// Points awarded for a regular fruit
pub(crate) const FRUIT_SCORE: u32 = 1;

/// Points awarded for a big fruit
pub(crate) const BIG_FRUIT_SCORE: u32 = 3;

/// Extra cells gained from a big fruit (the bonus is score-only)
pub(crate) const BIG_FRUIT_GROWTH: usize = 0;

/// A big fruit appears whenever the count of regular fruits eaten is a
/// positive multiple of this
pub(crate) const BIG_FRUIT_INTERVAL: u32 = 5;

/// How long a big fruit stays on the board
pub(crate) const BIG_FRUIT_LIFETIME: Duration = Duration::from_secs(5);

/// Seconds between boom appearances, measured on the run clock
pub(crate) const BOOM_SCHEDULE_SECS: u64 = 10;

/// Seconds a boom stays armed before it fizzles out
pub(crate) const BOOM_LIFETIME_SECS: u64 = 3;

/// How long power-up invincibility lasts
pub(crate) const POWER_UP_DURATION: Duration = Duration::from_secs(10);

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the snake's head before the first input, when it has no heading
pub(crate) const SNAKE_HEAD_RESTING_SYMBOL: char = '@';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the fruit
pub(crate) const FRUIT_SYMBOL: char = '●';

/// Glyph for the big fruit
pub(crate) const BIG_FRUIT_SYMBOL: char = '◉';

/// Glyph for obstacles
pub(crate) const OBSTACLE_SYMBOL: char = '█';

/// Glyph for an armed boom
pub(crate) const BOOM_SYMBOL: char = '✸';

/// Glyph for the power-up
pub(crate) const POWER_UP_SYMBOL: char = '★';

/// Glyph for the snake's head when it's collided with a hazard or wall
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the snake while invincible
pub(crate) const INVINCIBLE_STYLE: Style =
    Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Style for the fruit
pub(crate) const FRUIT_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for the big fruit
pub(crate) const BIG_FRUIT_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// Style for obstacles
pub(crate) const OBSTACLE_STYLE: Style = Style::new().fg(Color::Gray);

/// Style for an armed boom
pub(crate) const BOOM_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Style for the power-up
pub(crate) const POWER_UP_STYLE: Style = Style::new().fg(Color::Cyan);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the pause overlay and menu warnings
pub(crate) const NOTICE_STYLE: Style = Style::new().fg(Color::LightRed);
