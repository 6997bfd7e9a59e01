use crate::consts;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// The unit step for this heading, in board coordinates (y grows
    /// downwards)
    pub(crate) fn delta(self) -> (i16, i16) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Glyph for a head facing this way
    pub(crate) fn head_symbol(self) -> char {
        match self {
            Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
            Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
            Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
            Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
        }
    }

    /// The `[dx, dy]` pair stored in save files.  `None` (no heading yet) is
    /// stored as `[0, 0]`.
    pub(crate) fn encode(heading: Option<Direction>) -> [i16; 2] {
        match heading {
            Some(d) => {
                let (dx, dy) = d.delta();
                [dx, dy]
            }
            None => [0, 0],
        }
    }

    /// Inverse of [`Direction::encode`].  Returns `Err` for a pair that is
    /// not a unit step or zero.
    pub(crate) fn decode(pair: [i16; 2]) -> Result<Option<Direction>, [i16; 2]> {
        match pair {
            [0, 0] => Ok(None),
            [0, -1] => Ok(Some(Direction::North)),
            [1, 0] => Ok(Some(Direction::East)),
            [0, 1] => Ok(Some(Direction::South)),
            [-1, 0] => Ok(Some(Direction::West)),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::North, (0, -1))]
    #[case(Direction::East, (1, 0))]
    #[case(Direction::South, (0, 1))]
    #[case(Direction::West, (-1, 0))]
    fn test_delta(#[case] d: Direction, #[case] delta: (i16, i16)) {
        assert_eq!(d.delta(), delta);
    }

    #[rstest]
    #[case(Direction::North, Direction::South)]
    #[case(Direction::East, Direction::West)]
    #[case(Direction::South, Direction::North)]
    #[case(Direction::West, Direction::East)]
    fn test_reverse(#[case] d: Direction, #[case] r: Direction) {
        assert_eq!(d.reverse(), r);
        assert_eq!(r.reverse(), d);
    }

    #[rstest]
    #[case(None, [0, 0])]
    #[case(Some(Direction::North), [0, -1])]
    #[case(Some(Direction::East), [1, 0])]
    #[case(Some(Direction::South), [0, 1])]
    #[case(Some(Direction::West), [-1, 0])]
    fn test_codec(#[case] heading: Option<Direction>, #[case] pair: [i16; 2]) {
        assert_eq!(Direction::encode(heading), pair);
        assert_eq!(Direction::decode(pair), Ok(heading));
    }

    #[test]
    fn test_decode_garbage() {
        assert_eq!(Direction::decode([2, 0]), Err([2, 0]));
        assert_eq!(Direction::decode([1, 1]), Err([1, 1]));
    }
}
