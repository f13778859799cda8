//! 核心業務邏輯（棋盤、障礙物、資源、技能、移動）

pub mod board;
pub mod movement;
pub mod obstacle;
pub mod resource;
pub mod skill;
