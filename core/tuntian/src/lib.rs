//! 屯田棋規則引擎
//!
//! 棋盤、障礙物、資源帳本、技能與回合狀態機。
//! 不含任何繪圖或輸入裝置邏輯，呈現層只透過 `game::Game` 的公開介面操作。

pub mod alias;
pub mod component;
pub mod config;
pub mod constants;
pub mod core_types;
pub mod error;
pub mod game;
pub mod loader;
pub mod logic;
