//! 基本資料類型定義

use crate::component::Position;
use crate::constants::GRID_SIZE;
use serde::Serialize;
use std::ops::{Index, IndexMut};

/// 固定 8x8 的逐格資料（豐饒度、領土、征稅標記、屯田次數等）
///
/// 以 `Position` 索引，`iter()` 依列優先（row-major）順序走訪。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid<T>([[T; GRID_SIZE]; GRID_SIZE]);

impl<T: Copy> Grid<T> {
    /// 所有格子填入相同值
    pub fn filled(value: T) -> Self {
        Self([[value; GRID_SIZE]; GRID_SIZE])
    }

    pub fn fill(&mut self, value: T) {
        for row in self.0.iter_mut() {
            row.fill(value);
        }
    }
}

impl<T> Grid<T> {
    /// 依列優先順序走訪所有格子
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.0.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, value)| (Position { row, col }, value))
        })
    }

    pub fn rows(&self) -> &[[T; GRID_SIZE]; GRID_SIZE] {
        &self.0
    }

    /// 棋盤外的位置回傳 `None`
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.0.get(pos.row)?.get(pos.col)
    }
}

impl<T: Copy + Default> Default for Grid<T> {
    fn default() -> Self {
        Self::filled(T::default())
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Position) -> &T {
        &self.0[pos.row][pos.col]
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, pos: Position) -> &mut T {
        &mut self.0[pos.row][pos.col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_row_major_order() {
        let mut grid = Grid::filled(0);
        grid[Position::new(0, 1)] = 1;
        grid[Position::new(1, 0)] = 2;

        let visited: Vec<_> = grid.iter().filter(|(_, v)| **v > 0).collect();
        assert_eq!(
            visited,
            vec![(Position::new(0, 1), &1), (Position::new(1, 0), &2)]
        );
    }

    #[test]
    fn test_grid_fill() {
        let mut grid = Grid::filled(false);
        grid[Position::new(3, 4)] = true;
        grid.fill(false);
        assert!(grid.iter().all(|(_, v)| !*v));
        assert_eq!(grid.iter().count(), GRID_SIZE * GRID_SIZE);
    }

    #[test]
    fn test_grid_get_out_of_bounds() {
        let grid = Grid::filled(7);
        assert_eq!(grid.get(Position::new(7, 7)), Some(&7));
        assert_eq!(grid.get(Position::new(8, 0)), None);
        assert_eq!(grid.get(Position::new(0, 8)), None);
    }
}
