mod board;
mod clock;
mod direction;
mod level;
mod snake;
use self::board::{Board, Cell, HazardKind};
use self::clock::GameClock;
use self::direction::Direction;
use self::level::Level;
use self::snake::Snake;
use crate::app::{Globals, Screen};
use crate::command::Command;
use crate::consts;
use crate::menu::MainMenu;
use crate::save::{LoadError, SaveError, SaveState};
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::collections::VecDeque;
use std::io;
use std::time::Instant;

/// One running (or just-ended) game.
///
/// `Game` is the only mutator of the snake and of every hazard/collectible:
/// all state changes happen inside [`Game::advance`], exactly once per tick.
/// Input events captured between ticks are buffered and applied at the start
/// of the next tick.
#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    globals: Globals,
    board: Board,
    state: RunState,
    snake: Snake,
    /// Most recent steering input, applied at the start of the next tick
    pending_direction: Option<Direction>,
    fruit: Cell,
    obstacles: Vec<Cell>,
    boom: Cell,
    boom_active: bool,
    /// Run-clock second at which the boom last armed
    last_boom_secs: u64,
    big_fruit: Cell,
    big_fruit_active: bool,
    big_fruit_since: Option<Instant>,
    power_up: Cell,
    invincible_until: Option<Instant>,
    score: u32,
    high_score: u32,
    /// Regular fruits eaten this run; drives the big-fruit schedule
    big_fruit_score: u32,
    level: Level,
    /// Where the fatal collision happened, kept for the game-over screen
    crash_site: Option<Cell>,
    /// Score of the run that just ended
    last_run_score: u32,
    /// Sound notifications emitted by the latest tick
    sounds: Vec<Sound>,
    clock: GameClock,
    next_tick: Option<Instant>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        Game::new_with_rng(globals, rand::rng())
    }

    /// Rebuild a game from a save record.  Only the snake's geometry and the
    /// score are restored; everything else starts like a fresh run.
    pub(crate) fn from_save(globals: Globals, state: &SaveState) -> Result<Self, LoadError> {
        let mut game = Game::new(globals);
        let mut body = VecDeque::with_capacity(state.snake_body.len());
        for &pair in &state.snake_body {
            let cell = Cell::from(pair);
            if !game.board.contains(cell) {
                return Err(LoadError::OutOfBounds(pair[0], pair[1]));
            }
            body.push_back(cell);
        }
        if body.is_empty() {
            return Err(LoadError::EmptyBody);
        }
        game.snake.body = body;
        game.snake.direction = Direction::decode(state.snake_direction)
            .map_err(|[dx, dy]| LoadError::Direction(dx, dy))?;
        game.score = state.score;
        game.high_score = game.high_score.max(state.score);
        game.level = Level::for_snake_len(game.snake.len());
        Ok(game)
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(globals: Globals, rng: R) -> Game<R> {
        let board = Board::new(globals.config.cell_number);
        let high_score = globals.high_scores.best();
        let mut game = Game {
            rng,
            board,
            snake: Snake::new(board.cell_number()),
            pending_direction: None,
            state: RunState::Running,
            fruit: Cell::new(0, 0),
            obstacles: Vec::new(),
            boom: Cell::new(0, 0),
            boom_active: false,
            last_boom_secs: 0,
            big_fruit: Cell::new(0, 0),
            big_fruit_active: false,
            big_fruit_since: None,
            power_up: Cell::new(0, 0),
            invincible_until: None,
            score: 0,
            high_score,
            big_fruit_score: 0,
            level: Level::One,
            crash_site: None,
            last_run_score: 0,
            sounds: Vec::new(),
            clock: GameClock::start(),
            next_tick: None,
            globals,
        };
        game.reset_run();
        game
    }

    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        if self.running() {
            let when = match self.next_tick {
                Some(when) => when,
                None => {
                    let when = Instant::now() + self.level.tick_period();
                    self.next_tick = Some(when);
                    when
                }
            };
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.advance();
                self.next_tick = None;
                Ok(None)
            } else {
                self.handle_event(read()?)
            }
        } else {
            self.handle_event(read()?)
        }
    }

    /// Run one tick: apply buffered input, move the snake, resolve every
    /// collision in fixed precedence, check the terminal conditions, poll
    /// the timed spawns, and recompute the difficulty.
    fn advance(&mut self) {
        if !self.running() {
            return;
        }
        self.sounds.clear();
        let now = Instant::now();

        // Buffered input; a reversal of the current heading is dropped.
        if let Some(turn) = self.pending_direction.take() {
            let reversal = self.snake.len() > 1 && self.snake.direction == Some(turn.reverse());
            if !reversal {
                self.snake.direction = Some(turn);
            }
        }

        // Growth must be decided before the move so that eating a fruit
        // keeps the tail on this very tick.
        let eating = self
            .snake
            .direction
            .is_some_and(|d| self.snake.head().step(d.delta()) == self.fruit);
        if eating {
            self.snake.grow();
        }
        self.snake.advance();

        if eating {
            self.score += consts::FRUIT_SCORE;
            self.big_fruit_score += 1;
            self.sounds.push(Sound::Crunch);
            self.relocate_fruit();
        }
        if self.snake.hits(self.power_up) {
            self.sounds.push(Sound::Crunch);
            self.invincible_until = Some(now + consts::POWER_UP_DURATION);
            self.relocate_power_up();
        }
        let invincible = self.invincible(now);
        if self.boom_active && self.snake.hits(self.boom) && !invincible {
            self.sounds.push(Sound::Crash);
            self.game_over();
            return;
        }
        if !invincible && self.obstacles.iter().any(|&c| self.snake.hits(c)) {
            self.sounds.push(Sound::Crash);
            self.game_over();
            return;
        }
        if self.big_fruit_active && self.snake.hits(self.big_fruit) {
            self.big_fruit_active = false;
            self.score += consts::BIG_FRUIT_SCORE;
            self.snake.grow_by(consts::BIG_FRUIT_GROWTH);
            self.sounds.push(Sound::Crunch);
            self.relocate_big_fruit();
        }
        self.flush_entities_under_body();

        if !self.board.contains(self.snake.head()) {
            self.sounds.push(Sound::Crash);
            self.game_over();
            return;
        }
        if self.snake.self_collision() {
            self.game_over();
            return;
        }

        let elapsed = self.clock.elapsed_secs();
        if !self.boom_active
            && elapsed.saturating_sub(self.last_boom_secs) >= consts::BOOM_SCHEDULE_SECS
        {
            self.relocate_boom();
            self.boom_active = true;
            self.last_boom_secs = elapsed;
        }
        if self.boom_active
            && elapsed.saturating_sub(self.last_boom_secs) >= consts::BOOM_LIFETIME_SECS
        {
            self.boom_active = false;
        }
        if !self.big_fruit_active
            && self.big_fruit_score > 0
            && self.big_fruit_score % consts::BIG_FRUIT_INTERVAL == 0
        {
            self.relocate_big_fruit();
            self.big_fruit_active = true;
            self.big_fruit_since = Some(now);
        }
        if self.big_fruit_active
            && self
                .big_fruit_since
                .is_some_and(|t| now.duration_since(t) >= consts::BIG_FRUIT_LIFETIME)
        {
            self.big_fruit_active = false;
        }
        if self.invincible_until.is_some_and(|t| t <= now) {
            self.invincible_until = None;
        }

        self.level = Level::for_snake_len(self.snake.len());
        if self.level == Level::Three && self.obstacles.len() < consts::MAX_OBSTACLES {
            if let Some(cell) = self.place_obstacle() {
                self.obstacles.push(cell);
            }
        }
    }

    /// End the run: freeze the snake back at its start, record the high
    /// score, and wait (as a state, not a loop) for a restart signal.
    fn game_over(&mut self) {
        self.crash_site = Some(self.snake.head());
        self.last_run_score = self.score;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        self.boom_active = false;
        self.big_fruit_active = false;
        self.invincible_until = None;
        self.snake.reset(self.board.cell_number());
        self.pending_direction = None;
        self.clock.restart();
        self.score = 0;
        self.state = RunState::GameOver;
        self.next_tick = None;
    }

    /// Start a fresh run, keeping the session high score
    fn reset_run(&mut self) {
        self.snake.reset(self.board.cell_number());
        self.pending_direction = None;
        self.obstacles.clear();
        self.relocate_fruit();
        for _ in 0..consts::INITIAL_OBSTACLES {
            if let Some(cell) = self.place_obstacle() {
                self.obstacles.push(cell);
            }
        }
        self.relocate_boom();
        self.boom_active = false;
        self.last_boom_secs = 0;
        self.relocate_big_fruit();
        self.big_fruit_active = false;
        self.big_fruit_since = None;
        self.relocate_power_up();
        self.invincible_until = None;
        self.score = 0;
        self.big_fruit_score = 0;
        self.level = Level::One;
        self.crash_site = None;
        self.sounds.clear();
        self.clock.restart();
        self.next_tick = None;
        self.state = RunState::Running;
    }

    /// Relocate any entity lying under a non-head body cell, so that nothing
    /// ends up hidden beneath the snake
    fn flush_entities_under_body(&mut self) {
        let trailing = self
            .snake
            .body
            .iter()
            .skip(1)
            .copied()
            .collect::<Vec<Cell>>();
        if trailing.contains(&self.fruit) {
            self.relocate_fruit();
        }
        for i in 0..self.obstacles.len() {
            if trailing.contains(&self.obstacles[i]) {
                if let Some(cell) = self.place_obstacle() {
                    self.obstacles[i] = cell;
                }
            }
        }
        if self.boom_active && trailing.contains(&self.boom) {
            self.relocate_boom();
        }
        if self.big_fruit_active && trailing.contains(&self.big_fruit) {
            self.relocate_big_fruit();
        }
    }

    /// Fruit avoids the snake and every obstacle
    fn relocate_fruit(&mut self) {
        let body = &self.snake.body;
        let obstacles = &self.obstacles;
        if let Some(cell) = self
            .board
            .random_free_cell(&mut self.rng, |c| body.contains(&c) || obstacles.contains(&c))
        {
            self.fruit = cell;
        }
    }

    /// Obstacles and the boom avoid the snake and the fruit
    fn place_obstacle(&mut self) -> Option<Cell> {
        let body = &self.snake.body;
        let fruit = self.fruit;
        self.board
            .random_free_cell(&mut self.rng, |c| body.contains(&c) || c == fruit)
    }

    fn relocate_boom(&mut self) {
        if let Some(cell) = self.place_obstacle() {
            self.boom = cell;
        }
    }

    /// The big fruit avoids the snake and every obstacle
    fn relocate_big_fruit(&mut self) {
        let body = &self.snake.body;
        let obstacles = &self.obstacles;
        if let Some(cell) = self
            .board
            .random_free_cell(&mut self.rng, |c| body.contains(&c) || obstacles.contains(&c))
        {
            self.big_fruit = cell;
        }
    }

    /// The power-up only avoids the snake itself
    fn relocate_power_up(&mut self) {
        let body = &self.snake.body;
        if let Some(cell) = self.board.random_free_cell(&mut self.rng, |c| body.contains(&c)) {
            self.power_up = cell;
        }
    }

    fn invincible(&self, now: Instant) -> bool {
        self.invincible_until.is_some_and(|t| now < t)
    }

    /// Whole seconds of invincibility left, if any
    fn invincibility_secs(&self, now: Instant) -> Option<u64> {
        self.invincible_until
            .filter(|&t| now < t)
            .map(|t| t.saturating_duration_since(now).as_secs())
    }

    /// Write the game state and the updated top-5 list to disk
    fn save_and_record(&mut self) -> Result<(), SaveError> {
        let path = self.globals.config.save_file().ok_or(SaveError::NoPath)?;
        self.to_save_state().write(&path)?;
        let hs_path = self
            .globals
            .config
            .high_scores_file()
            .ok_or(SaveError::NoPath)?;
        self.globals.high_scores.record(self.score);
        self.globals.high_scores.save(&hs_path)
    }

    fn to_save_state(&self) -> SaveState {
        SaveState {
            snake_body: self.snake.body.iter().map(|&c| c.into()).collect(),
            snake_direction: Direction::encode(self.snake.direction),
            fruit_position: self.fruit.into(),
            big_fruit_position: Some(self.big_fruit.into()),
            boom_position: Some(self.boom.into()),
            power_position: Some(self.power_up.into()),
            score: self.score,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn handle_event(&mut self, event: Event) -> io::Result<Option<Screen>> {
        match self.state {
            RunState::Running => {
                if event == Event::FocusLost {
                    self.pause();
                    return Ok(None);
                }
                let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event)
                else {
                    return Ok(None);
                };
                match cmd {
                    Command::Quit => return Ok(Some(Screen::Quit)),
                    Command::Q => {
                        self.save_and_record().map_err(io::Error::other)?;
                        return Ok(Some(Screen::Quit));
                    }
                    Command::Pause | Command::Esc => self.pause(),
                    cmd => {
                        if let Some(d) = direction_for(cmd) {
                            self.pending_direction = Some(d);
                        }
                    }
                }
            }
            RunState::Paused => {
                let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event)
                else {
                    return Ok(None);
                };
                match cmd {
                    Command::Quit => return Ok(Some(Screen::Quit)),
                    Command::Pause | Command::Esc | Command::Enter => {
                        self.state = RunState::Running;
                    }
                    _ => (),
                }
            }
            RunState::GameOver => {
                let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event)
                else {
                    return Ok(None);
                };
                match cmd {
                    Command::Quit | Command::Q => return Ok(Some(Screen::Quit)),
                    Command::NewGame => self.reset_run(),
                    Command::Esc => {
                        return Ok(Some(Screen::Menu(MainMenu::new(self.globals.clone()))));
                    }
                    cmd if cmd.is_directional() => {
                        self.reset_run();
                        self.pending_direction = direction_for(cmd);
                    }
                    _ => (),
                }
            }
        }
        Ok(None)
    }

    fn running(&self) -> bool {
        self.state == RunState::Running
    }

    fn pause(&mut self) {
        self.state = RunState::Paused;
        self.next_tick = None;
    }
}

fn direction_for(cmd: Command) -> Option<Direction> {
    match cmd {
        Command::Up => Some(Direction::North),
        Command::Down => Some(Direction::South),
        Command::Left => Some(Direction::West),
        Command::Right => Some(Direction::East),
        _ => None,
    }
}

impl<R: Rng> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let now = Instant::now();
        let display = get_display_area(area);
        let [score_area, board_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);

        let mut status = format!(
            " Score: {}  High: {}  Level: {}  Time: {}s",
            self.score,
            self.high_score,
            self.level,
            self.clock.elapsed_secs()
        );
        if let Some(secs) = self.invincibility_secs(now) {
            status.push_str(&format!("  {}{secs}s", consts::POWER_UP_SYMBOL));
        }
        if self.sounds.contains(&Sound::Crunch) {
            status.push_str("  ♪");
        }
        if self.sounds.contains(&Sound::Crash) {
            status.push_str("  ✶");
        }
        Line::styled(status, consts::SCORE_BAR_STYLE).render(score_area, buf);

        let n = self.board.cell_number();
        let block_area = center_rect(
            board_area,
            Size {
                width: n.saturating_add(2),
                height: n.saturating_add(2),
            },
        );
        Block::bordered().render(block_area, buf);
        let level_area = block_area.inner(Margin::new(1, 1));
        let mut canvas = Canvas {
            area: level_area,
            buf,
        };
        canvas.draw_cell(self.fruit, consts::FRUIT_SYMBOL, consts::FRUIT_STYLE);
        if self.big_fruit_active {
            canvas.draw_cell(self.big_fruit, consts::BIG_FRUIT_SYMBOL, consts::BIG_FRUIT_STYLE);
        }
        for &pos in &self.obstacles {
            canvas.draw_cell(pos, HazardKind::Obstacle.symbol(), HazardKind::Obstacle.style());
        }
        if self.boom_active {
            canvas.draw_cell(self.boom, HazardKind::Boom.symbol(), HazardKind::Boom.style());
        }
        let invincible = self.invincible(now);
        if !invincible {
            canvas.draw_cell(self.power_up, consts::POWER_UP_SYMBOL, consts::POWER_UP_STYLE);
        }
        let snake_style = if invincible {
            consts::INVINCIBLE_STYLE
        } else {
            consts::SNAKE_STYLE
        };
        for &pos in self.snake.body.iter().skip(1) {
            canvas.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, snake_style);
        }
        // Head last, so it overwrites whatever it is sitting on
        canvas.draw_cell(self.snake.head(), self.snake.head_symbol(), snake_style);
        if let Some(pos) = self.crash_site {
            canvas.draw_cell(pos, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        }

        match self.state {
            RunState::Running => (),
            RunState::Paused => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: 24,
                        height: 1,
                    },
                );
                Line::styled(" PAUSED — p to resume ", consts::NOTICE_STYLE)
                    .render(pause_area, buf);
            }
            RunState::GameOver => {
                Span::from(format!(
                    " — GAME OVER —  Score: {}  High Score: {}",
                    self.last_run_score, self.high_score
                ))
                .render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" New Game ("),
                    Span::styled("c", consts::KEY_STYLE),
                    Span::raw(") — steer to retry — Menu ("),
                    Span::styled("Esc", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Cell, symbol: char, style: Style) {
        let Ok(cx) = u16::try_from(pos.x) else {
            return;
        };
        let Ok(cy) = u16::try_from(pos.y) else {
            return;
        };
        if cx >= self.area.width || cy >= self.area.height {
            return;
        }
        let Some(x) = self.area.x.checked_add(cx) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(cy) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

/// Per-tick sound notifications for the presentation layer
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Sound {
    Crunch,
    Crash,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum RunState {
    Running,
    Paused,
    GameOver,
}
