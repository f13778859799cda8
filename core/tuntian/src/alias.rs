//! 型別別名

/// 棋盤座標（列或行）
pub type Coord = usize;

/// 單位唯一 ID
pub type UnitId = u32;

/// 糧草數量（預覽可為負）
pub type Food = i32;

/// 豐饒度
pub type Fertility = i32;
