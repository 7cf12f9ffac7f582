//! Numpad direction model.
//!
//! 방향키 상태를 텐키(1~9) 표기로 사상한다. 5가 중립.
//!
//! ```text
//! 7 8 9
//! 4 5 6
//! 1 2 3
//! ```
//!
//! `x` is +1 toward screen-right, `y` is +1 upward (world gravity pulls
//! toward -y in this space; the physics integrates screen-down as +y
//! separately). Directions are absolute, never facing-relative; facing is
//! applied by mirroring with [`Direction::flip`].

/// One of the 9 compass values, numbered numpad-style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Direction {
    DownLeft = 1,
    Down = 2,
    DownRight = 3,
    Left = 4,
    #[default]
    Neutral = 5,
    Right = 6,
    UpLeft = 7,
    Up = 8,
    UpRight = 9,
}

impl Direction {
    /// Signed-axis mapping `{-1,0,1} × {-1,0,1}` → numpad value.
    /// Out-of-range axes are clamped.
    pub fn from_axes(x: i8, y: i8) -> Direction {
        match (x.clamp(-1, 1), y.clamp(-1, 1)) {
            (-1, -1) => Direction::DownLeft,
            (0, -1) => Direction::Down,
            (1, -1) => Direction::DownRight,
            (-1, 0) => Direction::Left,
            (0, 0) => Direction::Neutral,
            (1, 0) => Direction::Right,
            (-1, 1) => Direction::UpLeft,
            (0, 1) => Direction::Up,
            (1, 1) => Direction::UpRight,
            _ => unreachable!(),
        }
    }

    /// Signed axis components `(x, y)` of this direction.
    pub fn axes(self) -> (i8, i8) {
        match self {
            Direction::DownLeft => (-1, -1),
            Direction::Down => (0, -1),
            Direction::DownRight => (1, -1),
            Direction::Left => (-1, 0),
            Direction::Neutral => (0, 0),
            Direction::Right => (1, 0),
            Direction::UpLeft => (-1, 1),
            Direction::Up => (0, 1),
            Direction::UpRight => (1, 1),
        }
    }

    /// Mirror across the vertical axis: 6↔4, 9↔7, 3↔1, verticals unchanged.
    pub fn flip(self) -> Direction {
        let (x, y) = self.axes();
        Direction::from_axes(-x, y)
    }

    /// Numpad digit of this direction.
    pub fn numpad(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Direction::numpad`]; `None` outside 1..=9.
    pub fn from_numpad(n: u8) -> Option<Direction> {
        Some(match n {
            1 => Direction::DownLeft,
            2 => Direction::Down,
            3 => Direction::DownRight,
            4 => Direction::Left,
            5 => Direction::Neutral,
            6 => Direction::Right,
            7 => Direction::UpLeft,
            8 => Direction::Up,
            9 => Direction::UpRight,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_axes_grid() {
        // 텐키 배치 그대로인지 확인
        assert_eq!(Direction::from_axes(-1, 1).numpad(), 7);
        assert_eq!(Direction::from_axes(0, 1).numpad(), 8);
        assert_eq!(Direction::from_axes(1, 1).numpad(), 9);
        assert_eq!(Direction::from_axes(-1, 0).numpad(), 4);
        assert_eq!(Direction::from_axes(0, 0).numpad(), 5);
        assert_eq!(Direction::from_axes(1, 0).numpad(), 6);
        assert_eq!(Direction::from_axes(-1, -1).numpad(), 1);
        assert_eq!(Direction::from_axes(0, -1).numpad(), 2);
        assert_eq!(Direction::from_axes(1, -1).numpad(), 3);
    }

    #[test]
    fn test_flip_pairs() {
        assert_eq!(Direction::Right.flip(), Direction::Left);
        assert_eq!(Direction::UpRight.flip(), Direction::UpLeft);
        assert_eq!(Direction::DownRight.flip(), Direction::DownLeft);
        assert_eq!(Direction::Up.flip(), Direction::Up);
        assert_eq!(Direction::Down.flip(), Direction::Down);
        assert_eq!(Direction::Neutral.flip(), Direction::Neutral);
    }

    #[test]
    fn test_flip_involution() {
        for n in 1..=9 {
            let d = Direction::from_numpad(n).unwrap();
            assert_eq!(d.flip().flip(), d);
        }
    }

    #[test]
    fn test_numpad_round_trip() {
        for n in 1..=9 {
            assert_eq!(Direction::from_numpad(n).unwrap().numpad(), n);
        }
        assert_eq!(Direction::from_numpad(0), None);
        assert_eq!(Direction::from_numpad(10), None);
    }
}
