use serde::{Deserialize, Serialize};

/// Kind of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellKind {
    /// Outside the map; also what out-of-bounds queries report
    #[default]
    Void,
    Floor,
    Wall,
    Water,
    Door,
}

impl CellKind {
    pub fn is_walkable(&self) -> bool {
        matches!(self, CellKind::Floor | CellKind::Water | CellKind::Door)
    }

    /// Parse the ASCII glyph used by map fixtures
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(CellKind::Floor),
            '#' => Some(CellKind::Wall),
            '~' => Some(CellKind::Water),
            '+' => Some(CellKind::Door),
            ' ' => Some(CellKind::Void),
            _ => None,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            CellKind::Void => ' ',
            CellKind::Floor => '.',
            CellKind::Wall => '#',
            CellKind::Water => '~',
            CellKind::Door => '+',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkability() {
        assert!(CellKind::Floor.is_walkable());
        assert!(CellKind::Water.is_walkable());
        assert!(CellKind::Door.is_walkable());
        assert!(!CellKind::Wall.is_walkable());
        assert!(!CellKind::Void.is_walkable());
    }

    #[test]
    fn test_glyphs() {
        for kind in [CellKind::Void, CellKind::Floor, CellKind::Wall, CellKind::Water, CellKind::Door] {
            assert_eq!(CellKind::from_glyph(kind.glyph()), Some(kind));
        }
        assert_eq!(CellKind::from_glyph('x'), None);
    }
}
