use bevy::{
    math::{ivec2, IVec2},
    prelude::*,
    utils::HashSet,
};

use crate::prelude::*;

/// Simulation state of the toroidal grid.
///
/// The grid is a flat buffer indexed by `x + y * size`; every coordinate is
/// wrapped onto the grid, so any `IVec2` is a valid cell address. A set of
/// currently-alive coordinates is kept alongside the buffer so rendering can
/// walk the population instead of the whole board. [`Board::set`] is the only
/// place a cell changes state outside of [`Board::step`]; both keep the live
/// set in sync incrementally.
#[derive(Resource)]
pub struct Board {
    size: i32,
    cells: Vec<bool>,
    /// next-generation buffer, reused across `step` calls
    scratch: Vec<bool>,
    live: HashSet<IVec2>,
}

impl Board {
    pub fn new(size: u32) -> Self {
        let len = (size * size) as usize;
        Self {
            size: size as i32,
            cells: vec![false; len],
            scratch: vec![false; len],
            live: HashSet::default(),
        }
    }

    /// the amount of cells on each axis
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Maps any coordinate onto the grid (toroidal topology).
    #[inline]
    pub fn wrap(&self, pos: IVec2) -> IVec2 {
        ivec2(pos.x.rem_euclid(self.size), pos.y.rem_euclid(self.size))
    }

    #[inline]
    fn idx(&self, wrapped: IVec2) -> usize {
        (wrapped.x + wrapped.y * self.size) as usize
    }

    #[inline]
    pub fn get(&self, pos: IVec2) -> bool {
        self.cells[self.idx(self.wrap(pos))]
    }

    /// Writes a cell and keeps the live set in sync. No-op when the cell
    /// already holds `alive`, so repeated writes never churn the set.
    pub fn set(&mut self, pos: IVec2, alive: bool) {
        let pos = self.wrap(pos);
        let idx = self.idx(pos);
        if self.cells[idx] == alive {
            return;
        }
        self.cells[idx] = alive;
        if alive {
            self.live.insert(pos);
        } else {
            self.live.remove(&pos);
        }
    }

    /// Live cells in the Moore neighbourhood of `pos`, in `0..=8`.
    pub fn neighbour_count(&self, pos: IVec2) -> u8 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                count += self.get(pos + ivec2(dx, dy)) as u8;
            }
        }
        count
    }

    /// Advances one generation (B3/S23).
    ///
    /// The next generation is written into the scratch buffer while the
    /// current one is read, then the buffers are swapped. The live set is
    /// updated for exactly the cells that changed.
    pub fn step(&mut self) {
        for y in 0..self.size {
            for x in 0..self.size {
                let pos = ivec2(x, y);
                let idx = self.idx(pos);
                let alive = self.cells[idx];
                let next = match self.neighbour_count(pos) {
                    3 => true,
                    2 => alive,
                    _ => false,
                };
                self.scratch[idx] = next;
                if next != alive {
                    if next {
                        self.live.insert(pos);
                    } else {
                        self.live.remove(&pos);
                    }
                }
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
    }

    /// Kills every cell and empties the live set.
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.live.clear();
    }

    pub fn live_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.live.iter().copied()
    }

    pub fn population(&self) -> usize {
        self.live.len()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_SIZE)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// the live set must mirror the grid exactly
    fn assert_live_set_consistent(board: &Board) {
        let scanned: HashSet<IVec2> = (0..board.size())
            .flat_map(|y| (0..board.size()).map(move |x| ivec2(x, y)))
            .filter(|&pos| board.get(pos))
            .collect();
        let tracked: HashSet<IVec2> = board.live_cells().collect();
        assert_eq!(scanned, tracked);
    }

    #[test]
    fn coordinates_wrap_on_both_axes() {
        let mut board = Board::new(8);
        board.set(ivec2(2, 3), true);

        for k in [-3, -1, 1, 4] {
            assert!(board.get(ivec2(2 + k * 8, 3)));
            assert!(board.get(ivec2(2, 3 + k * 8)));
            assert!(board.get(ivec2(2 + k * 8, 3 - k * 8)));
        }
        // writes wrap the same way reads do
        board.set(ivec2(-6, 11), false);
        assert!(!board.get(ivec2(2, 3)));
    }

    #[test]
    fn set_is_idempotent() {
        let mut board = Board::new(8);
        board.set(ivec2(4, 4), true);
        board.set(ivec2(4, 4), true);
        // same cell through a wrapped alias
        board.set(ivec2(4 - 8, 4 + 8), true);

        assert!(board.get(ivec2(4, 4)));
        assert_eq!(1, board.population());
        assert_live_set_consistent(&board);
    }

    #[test]
    fn live_set_tracks_mixed_operations() {
        let mut board = Board::new(16);
        board.set(ivec2(1, 1), true);
        board.set(ivec2(2, 1), true);
        board.set(ivec2(3, 1), true);
        board.set(ivec2(2, 1), false);
        board.step();
        board.set(ivec2(0, 15), true);
        board.step();
        assert_live_set_consistent(&board);

        board.clear();
        assert_live_set_consistent(&board);
    }

    #[test]
    fn neighbour_count_wraps_around_corners() {
        let mut board = Board::new(8);
        board.set(ivec2(7, 7), true);
        board.set(ivec2(0, 7), true);
        board.set(ivec2(7, 0), true);

        assert_eq!(3, board.neighbour_count(ivec2(0, 0)));
        assert_eq!(2, board.neighbour_count(ivec2(7, 7)));
    }

    #[test]
    fn block_is_a_still_life() {
        let mut board = Board::new(16);
        for pos in [ivec2(5, 5), ivec2(6, 5), ivec2(5, 6), ivec2(6, 6)] {
            board.set(pos, true);
        }
        let before: HashSet<IVec2> = board.live_cells().collect();

        board.step();

        let after: HashSet<IVec2> = board.live_cells().collect();
        assert_eq!(before, after);
        assert_live_set_consistent(&board);
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let mut board = Board::new(16);
        let vertical = [ivec2(8, 7), ivec2(8, 8), ivec2(8, 9)];
        for pos in vertical {
            board.set(pos, true);
        }

        board.step();
        let horizontal: HashSet<IVec2> =
            [ivec2(7, 8), ivec2(8, 8), ivec2(9, 8)].into_iter().collect();
        assert_eq!(horizontal, board.live_cells().collect::<HashSet<_>>());

        board.step();
        assert_eq!(
            vertical.into_iter().collect::<HashSet<_>>(),
            board.live_cells().collect::<HashSet<_>>()
        );
        assert_live_set_consistent(&board);
    }

    #[test]
    fn glider_translates_diagonally_every_four_steps() {
        let mut board = Board::new(32);
        let anchor = ivec2(16, 16);
        let glider = [
            ivec2(0, -2),
            ivec2(1, -1),
            ivec2(-1, 0),
            ivec2(0, 0),
            ivec2(1, 0),
        ];
        for off in glider {
            board.set(anchor + off, true);
        }

        for _ in 0..4 {
            board.step();
        }

        let expected: HashSet<IVec2> = glider
            .into_iter()
            .map(|off| anchor + off + ivec2(1, 1))
            .collect();
        assert_eq!(expected, board.live_cells().collect::<HashSet<_>>());
        assert_live_set_consistent(&board);
    }

    #[test]
    fn clear_kills_everything() {
        let mut board = Board::new(8);
        for i in 0..8 {
            board.set(ivec2(i, i), true);
        }
        board.clear();

        assert_eq!(0, board.live_cells().count());
        for y in 0..8 {
            for x in 0..8 {
                assert!(!board.get(ivec2(x, y)));
            }
        }
    }
}
