use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::style::Style;

/// A position on the board grid.
///
/// Coordinates are signed so that the snake's head can step one cell past an
/// edge; the out-of-bounds check runs after the move resolves.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) x: i16,
    pub(crate) y: i16,
}

impl Cell {
    pub(crate) const fn new(x: i16, y: i16) -> Cell {
        Cell { x, y }
    }

    /// The cell one step away in the direction given by `(dx, dy)`
    pub(crate) fn step(self, (dx, dy): (i16, i16)) -> Cell {
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<Cell> for [i16; 2] {
    fn from(cell: Cell) -> [i16; 2] {
        [cell.x, cell.y]
    }
}

impl From<[i16; 2]> for Cell {
    fn from([x, y]: [i16; 2]) -> Cell {
        Cell { x, y }
    }
}

/// The square playing field, `cell_number` cells along each edge
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Board {
    cell_number: u16,
}

impl Board {
    pub(crate) fn new(cell_number: u16) -> Board {
        Board { cell_number }
    }

    pub(crate) fn cell_number(self) -> u16 {
        self.cell_number
    }

    pub(crate) fn contains(self, cell: Cell) -> bool {
        let n = i16::try_from(self.cell_number).unwrap_or(i16::MAX);
        (0..n).contains(&cell.x) && (0..n).contains(&cell.y)
    }

    /// Iterate over every cell of the board in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        let n = i16::try_from(self.cell_number).unwrap_or(i16::MAX);
        (0..n).flat_map(move |y| (0..n).map(move |x| Cell { x, y }))
    }

    /// Choose a uniformly random cell for which `forbidden` is false.
    ///
    /// Returns `None` when every cell is forbidden, so a saturated board
    /// reports "no placement available" instead of spinning on rejection
    /// sampling.
    pub(crate) fn random_free_cell<R: Rng, F: Fn(Cell) -> bool>(
        self,
        rng: &mut R,
        forbidden: F,
    ) -> Option<Cell> {
        self.cells().filter(|&c| !forbidden(c)).choose(rng)
    }
}

/// Run-ending board occupants.  The two kinds share all their collision
/// logic and differ only in presentation and lifetime.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum HazardKind {
    /// Permanent block, present from the start of the run
    Obstacle,
    /// Timed explosive that arms and fizzles on the run clock
    Boom,
}

impl HazardKind {
    pub(crate) fn symbol(self) -> char {
        match self {
            HazardKind::Obstacle => consts::OBSTACLE_SYMBOL,
            HazardKind::Boom => consts::BOOM_SYMBOL,
        }
    }

    pub(crate) fn style(self) -> Style {
        match self {
            HazardKind::Obstacle => consts::OBSTACLE_STYLE,
            HazardKind::Boom => consts::BOOM_STYLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[rstest]
    #[case(Cell::new(5, 10), (1, 0), Cell::new(6, 10))]
    #[case(Cell::new(5, 10), (0, -1), Cell::new(5, 9))]
    #[case(Cell::new(0, 0), (-1, 0), Cell::new(-1, 0))]
    fn test_step(#[case] cell: Cell, #[case] delta: (i16, i16), #[case] stepped: Cell) {
        assert_eq!(cell.step(delta), stepped);
    }

    #[rstest]
    #[case(Cell::new(0, 0), true)]
    #[case(Cell::new(19, 19), true)]
    #[case(Cell::new(20, 7), false)]
    #[case(Cell::new(7, 20), false)]
    #[case(Cell::new(-1, 7), false)]
    fn test_contains(#[case] cell: Cell, #[case] contained: bool) {
        assert_eq!(Board::new(20).contains(cell), contained);
    }

    #[test]
    fn cells_cover_board() {
        let board = Board::new(4);
        let cells = board.cells().collect::<Vec<_>>();
        assert_eq!(cells.len(), 16);
        assert!(cells.iter().all(|&c| board.contains(c)));
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[15], Cell::new(3, 3));
    }

    #[test]
    fn random_free_cell_avoids_forbidden() {
        let board = Board::new(4);
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        for _ in 0..64 {
            let cell = board
                .random_free_cell(&mut rng, |c| c.x < 3)
                .expect("free cells remain");
            assert_eq!(cell.x, 3);
        }
    }

    #[test]
    fn random_free_cell_on_full_board() {
        let board = Board::new(4);
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        assert_eq!(board.random_free_cell(&mut rng, |_| true), None);
    }

    #[test]
    fn hazard_kind_lookup() {
        assert_eq!(HazardKind::Obstacle.symbol(), consts::OBSTACLE_SYMBOL);
        assert_eq!(HazardKind::Boom.symbol(), consts::BOOM_SYMBOL);
        assert_ne!(HazardKind::Obstacle.style(), HazardKind::Boom.style());
    }
}
