use super::board::Cell;
use super::direction::Direction;
use crate::consts;
use std::collections::VecDeque;

/// Snake state.
///
/// The body holds every occupied cell, head first.  A heading of `None`
/// means the snake has received no input yet and holds its position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// All cells of the snake, head at the front
    pub(super) body: VecDeque<Cell>,

    /// The direction the snake is travelling in, if any
    pub(super) direction: Option<Direction>,

    /// Whether the next advance keeps its tail (growth from a fruit)
    pub(super) pending_growth: bool,
}

impl Snake {
    /// Create a snake at its starting position for a board of the given
    /// size: head at `(n/4, n/2)`, body trailing off to the west, no
    /// heading.
    pub(super) fn new(cell_number: u16) -> Snake {
        let n = i16::try_from(cell_number).unwrap_or(i16::MAX);
        let (hx, hy) = (n / 4, n / 2);
        let body = (0..consts::INITIAL_SNAKE_LENGTH)
            .map(|i| {
                let i = i16::try_from(i).unwrap_or(i16::MAX);
                Cell::new(hx - i, hy)
            })
            .collect();
        Snake {
            body,
            direction: None,
            pending_growth: false,
        }
    }

    pub(super) fn head(&self) -> Cell {
        *self.body.front().expect("snake body is never empty")
    }

    pub(super) fn len(&self) -> usize {
        self.body.len()
    }

    /// Glyph to use for drawing the head
    pub(super) fn head_symbol(&self) -> char {
        self.direction
            .map_or(consts::SNAKE_HEAD_RESTING_SYMBOL, Direction::head_symbol)
    }

    /// Move one cell along the current heading.  With no heading the snake
    /// stays exactly where it is.  When growth is pending the tail is kept
    /// and the flag cleared, so the body gains one cell.
    pub(super) fn advance(&mut self) {
        let Some(direction) = self.direction else {
            return;
        };
        let new_head = self.head().step(direction.delta());
        self.body.push_front(new_head);
        if self.pending_growth {
            self.pending_growth = false;
        } else {
            let _ = self.body.pop_back();
        }
    }

    /// Schedule one cell of growth for the next advance
    pub(super) fn grow(&mut self) {
        self.pending_growth = true;
    }

    /// Grow by `n` cells at once by duplicating the tail; the duplicates
    /// unstack as the snake moves
    pub(super) fn grow_by(&mut self, n: usize) {
        let tail = *self.body.back().expect("snake body is never empty");
        for _ in 0..n {
            self.body.push_back(tail);
        }
    }

    /// True iff the head occupies the same cell as some later body segment
    pub(super) fn self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&c| c == head)
    }

    /// True iff the head is on `cell`
    pub(super) fn hits(&self, cell: Cell) -> bool {
        self.head() == cell
    }

    /// Restore the initial three-cell body and clear the heading
    pub(super) fn reset(&mut self, cell_number: u16) {
        *self = Snake::new(cell_number);
    }
}
