use crate::consts;
use std::fmt;
use std::time::Duration;

/// Difficulty tier, derived from nothing but the snake's body length.
///
/// Computed once per tick; the mapping is pure so repeated calls with the
/// same length can never drift.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Level {
    #[default]
    One,
    Two,
    Three,
}

impl Level {
    pub(crate) fn for_snake_len(len: usize) -> Level {
        let score = len.saturating_sub(consts::INITIAL_SNAKE_LENGTH);
        if score > 10 {
            Level::Three
        } else if score > 5 {
            Level::Two
        } else {
            Level::One
        }
    }

    /// Time between ticks at this level
    pub(crate) fn tick_period(self) -> Duration {
        match self {
            Level::One => Duration::from_millis(150),
            Level::Two => Duration::from_millis(100),
            Level::Three => Duration::from_millis(70),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = match self {
            Level::One => "1",
            Level::Two => "2",
            Level::Three => "3",
        };
        f.pad(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(3, Level::One, 150)]
    #[case(8, Level::One, 150)]
    #[case(9, Level::Two, 100)]
    #[case(11, Level::Two, 100)]
    #[case(13, Level::Two, 100)]
    #[case(14, Level::Three, 70)]
    #[case(30, Level::Three, 70)]
    fn test_for_snake_len(#[case] len: usize, #[case] level: Level, #[case] millis: u64) {
        assert_eq!(Level::for_snake_len(len), level);
        assert_eq!(level.tick_period(), Duration::from_millis(millis));
    }

    #[test]
    fn display() {
        assert_eq!(Level::Three.to_string(), "3");
    }
}
