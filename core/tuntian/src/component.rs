//! 棋盤上的基本資料：位置、陣營、棋子、玩家

use crate::alias::{Coord, UnitId};
use crate::constants::GRID_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

// ============================================================================
// 位置
// ============================================================================

/// 棋盤位置（row 由上往下，col 由左往右）
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub row: Coord,
    pub col: Coord,
}

impl Position {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// 座標在棋盤內才回傳位置
    pub fn checked(row: Coord, col: Coord) -> Option<Self> {
        (row < GRID_SIZE && col < GRID_SIZE).then_some(Self { row, col })
    }

    /// 位移後的位置，超出棋盤回傳 `None`
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Self::checked(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ============================================================================
// 陣營與棋子
// ============================================================================

/// 陣營
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// 兵前進的列方向
    pub fn forward(self) -> isize {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// 兵的起始列（可前進兩格）
    pub fn pawn_home_row(self) -> Coord {
        match self {
            Color::White => GRID_SIZE - 2,
            Color::Black => 1,
        }
    }
}

/// 棋子種類
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

// ============================================================================
// 階段與管理視圖
// ============================================================================

/// 回合階段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// 行動階段：征稅、屯田規劃
    #[default]
    Action,
    /// 走子階段：移動與技能
    Move,
}

/// 管理視圖（只在行動階段有效）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ManagementView {
    #[default]
    None,
    Tax,
    Farm,
}

// ============================================================================
// 單位與玩家
// ============================================================================

/// 棋盤上的一個單位
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub id: UnitId,
    pub piece: PieceType,
    pub color: Color,
    pub pos: Position,
    pub moved_this_turn: u32,
}

/// 玩家：只持有自己單位的 ID，單位本體由棋盤持有
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub color: Color,
    pub roster: BTreeSet<UnitId>,
    pub moves_this_turn: u32,
    pub skills_used_this_turn: u32,
}

impl Player {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            roster: BTreeSet::new(),
            moves_this_turn: 0,
            skills_used_this_turn: 0,
        }
    }

    pub fn reset_turn_state(&mut self) {
        self.moves_this_turn = 0;
        self.skills_used_this_turn = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_position_offset_bounds() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Position::new(1, 1)));

        let far = Position::new(7, 7);
        assert_eq!(far.offset(1, 0), None);
        assert_eq!(far.offset(-2, -1), Some(Position::new(5, 6)));
    }

    #[test]
    fn test_position_checked() {
        assert_eq!(Position::checked(7, 0), Some(Position::new(7, 0)));
        assert_eq!(Position::checked(8, 0), None);
        assert_eq!(Position::checked(0, 8), None);
    }

    #[test]
    fn test_color_and_piece_names() {
        assert_eq!(Color::White.to_string(), "white");
        assert_eq!(Color::from_str("black").unwrap(), Color::Black);
        assert_eq!(PieceType::from_str("knight").unwrap(), PieceType::Knight);
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.pawn_home_row(), 1);
        assert_eq!(Color::White.pawn_home_row(), 6);
    }
}
