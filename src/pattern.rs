use bevy::{math::IVec2, prelude::*};

use crate::board::Board;

/// A named shape, as offsets relative to the cursor cell.
pub struct Pattern {
    pub name: &'static str,
    pub offsets: &'static [IVec2],
}

const fn off(x: i32, y: i32) -> IVec2 {
    IVec2::new(x, y)
}

/// Still lifes and oscillators from the standard catalog, plus the glider.
/// Order is the cycling order of the brush.
pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "cell",
        offsets: &[off(0, 0)],
    },
    Pattern {
        name: "block",
        offsets: &[off(0, 0), off(0, 1), off(1, 0), off(1, 1)],
    },
    Pattern {
        name: "beehive",
        offsets: &[
            off(-1, 0),
            off(0, -1),
            off(0, 1),
            off(1, -1),
            off(1, 1),
            off(2, 0),
        ],
    },
    Pattern {
        name: "loaf",
        offsets: &[
            off(-1, 0),
            off(0, -1),
            off(0, 1),
            off(1, -1),
            off(1, 2),
            off(2, 0),
            off(2, 1),
        ],
    },
    Pattern {
        name: "boat",
        offsets: &[off(-1, -1), off(-1, 0), off(0, -1), off(0, 1), off(1, 0)],
    },
    Pattern {
        name: "tub",
        offsets: &[off(-1, 0), off(0, -1), off(0, 1), off(1, 0)],
    },
    Pattern {
        name: "blinker",
        offsets: &[off(0, -1), off(0, 0), off(0, 1)],
    },
    Pattern {
        name: "toad",
        offsets: &[
            off(-1, 0),
            off(0, -1),
            off(0, 0),
            off(1, -1),
            off(1, 0),
            off(2, -1),
        ],
    },
    Pattern {
        name: "beacon",
        offsets: &[
            off(-1, -2),
            off(-1, -1),
            off(0, -2),
            off(1, 1),
            off(2, 0),
            off(2, 1),
        ],
    },
    Pattern {
        name: "glider",
        offsets: &[off(-1, 0), off(0, 0), off(0, -2), off(1, 0), off(1, -1)],
    },
];

/// The active brush: an index into [`PATTERNS`], cyclically navigable.
#[derive(Resource, Default)]
pub struct PatternCatalog {
    index: usize,
}

impl PatternCatalog {
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn current(&self) -> &'static Pattern {
        &PATTERNS[self.index]
    }

    /// Moves the active pattern by `delta`, wrapping over the catalog.
    pub fn cycle(&mut self, delta: i32) {
        let len = PATTERNS.len() as i32;
        self.index = (self.index as i32 + delta).rem_euclid(len) as usize;
    }

    /// Calls `draw` once per cell of the active pattern around `anchor`.
    /// Render-only; cells wrap like every other board coordinate.
    pub fn preview(&self, anchor: IVec2, board: &Board, mut draw: impl FnMut(IVec2)) {
        for &offset in self.current().offsets {
            draw(board.wrap(anchor + offset));
        }
    }

    /// Writes (or, with `alive = false`, erases) the active pattern's
    /// footprint around `anchor`.
    pub fn place(&self, anchor: IVec2, alive: bool, board: &mut Board) {
        for &offset in self.current().offsets {
            board.set(anchor + offset, alive);
        }
    }
}

#[cfg(test)]
mod test {
    use bevy::{math::ivec2, utils::HashSet};

    use super::*;

    #[test]
    fn cycling_wraps_in_both_directions() {
        let mut catalog = PatternCatalog::default();
        assert_eq!(0, catalog.index());

        catalog.cycle(-1);
        assert_eq!(PATTERNS.len() - 1, catalog.index());

        catalog.cycle(1);
        assert_eq!(0, catalog.index());

        catalog.cycle(PATTERNS.len() as i32 + 2);
        assert_eq!(2, catalog.index());
    }

    #[test]
    fn place_then_erase_leaves_board_empty() {
        let mut board = Board::new(16);
        let mut catalog = PatternCatalog::default();
        let anchor = ivec2(8, 8);

        for _ in 0..PATTERNS.len() {
            catalog.place(anchor, true, &mut board);
            assert_eq!(catalog.current().offsets.len(), board.population());

            catalog.place(anchor, false, &mut board);
            assert_eq!(0, board.population());

            catalog.cycle(1);
        }
    }

    #[test]
    fn preview_visits_the_placement_footprint() {
        let mut board = Board::new(16);
        let mut catalog = PatternCatalog::default();
        // glider
        while catalog.current().name != "glider" {
            catalog.cycle(1);
        }
        let anchor = ivec2(3, 3);

        let mut previewed = HashSet::new();
        catalog.preview(anchor, &board, |pos| {
            previewed.insert(pos);
        });

        catalog.place(anchor, true, &mut board);
        let placed: HashSet<_> = board.live_cells().collect();
        assert_eq!(placed, previewed);
    }

    #[test]
    fn preview_wraps_near_the_edge() {
        let board = Board::new(8);
        let catalog = PatternCatalog::default(); // single cell

        let mut previewed = Vec::new();
        catalog.preview(ivec2(-1, 9), &board, |pos| previewed.push(pos));
        assert_eq!(vec![ivec2(7, 1)], previewed);
    }
}
