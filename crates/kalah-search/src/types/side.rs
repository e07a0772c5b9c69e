//! 手番側（Side）

/// 盤の南北どちら側か
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum Side {
    South = 0,
    North = 1,
}

impl Side {
    /// 反対側を返す
    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::South => Side::North,
            Side::North => Side::South,
        }
    }
}

impl std::ops::Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.opposite()
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::South => f.write_str("SOUTH"),
            Side::North => f.write_str("NORTH"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::South.opposite(), Side::North);
        assert_eq!(Side::North.opposite(), Side::South);
        assert_eq!(Side::South.opposite().opposite(), Side::South);
    }

    #[test]
    fn test_side_not() {
        assert_eq!(!Side::South, Side::North);
        assert_eq!(!Side::North, Side::South);
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::South.to_string(), "SOUTH");
        assert_eq!(Side::North.to_string(), "NORTH");
    }
}
