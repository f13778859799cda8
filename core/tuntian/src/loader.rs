//! 開局配置與設定檔載入器

use crate::component::{Color, PieceType, Position};
use crate::config::GameConfig;
use crate::constants::GRID_SIZE;
use crate::error::{LoadError, Result};
use serde::{Deserialize, Serialize};

/// 配置中的一個單位（ID 於開局時才分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMarker {
    pub piece: PieceType,
    pub color: Color,
    pub pos: Position,
}

/// 開局配置：單位與障礙物
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub units: Vec<UnitMarker>,
    pub antlers: Vec<(Position, Color)>,
    pub fortresses: Vec<(Position, Color)>,
}

const BACK_RANK: [PieceType; GRID_SIZE] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

impl Layout {
    /// 標準開局：黑方在上（第 0、1 列），白方在下（第 6、7 列），每方 16 個單位
    pub fn standard() -> Self {
        let mut units = Vec::with_capacity(GRID_SIZE * 4);
        for (color, back_row) in [(Color::White, GRID_SIZE - 1), (Color::Black, 0)] {
            for (col, piece) in BACK_RANK.iter().enumerate() {
                units.push(UnitMarker {
                    piece: *piece,
                    color,
                    pos: Position::new(back_row, col),
                });
            }
            for col in 0..GRID_SIZE {
                units.push(UnitMarker {
                    piece: PieceType::Pawn,
                    color,
                    pos: Position::new(color.pawn_home_row(), col),
                });
            }
        }
        Self {
            units,
            ..Default::default()
        }
    }
}

/// 從 ASCII 格式載入開局配置
///
/// 8 行、每行 8 個以空白分隔的符號：
/// - `.` = 空格子
/// - 兩字元代碼：第一字元為陣營（`w` 白、`b` 黑），第二字元為種類
///   - `P` 兵、`N` 馬、`B` 象、`R` 車、`Q` 后、`K` 王
///   - `A` 鹿角、`F` 堡壘
/// - 同一格可用 `+` 串接，例如 `wP+wA` 表示白兵站在白鹿角上
///
/// 例如：
/// ```text
/// bK . . . . . . .
/// . . . . . . . .
/// . . . bA . . . .
/// ```
pub fn load_from_ascii(ascii: &str) -> Result<Layout> {
    let lines: Vec<&str> = ascii
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() != GRID_SIZE {
        return Err(LoadError::ParseError(format!(
            "棋盤必須有 {GRID_SIZE} 列，實際 {}",
            lines.len()
        ))
        .into());
    }

    let mut layout = Layout::default();
    for (row, line) in lines.iter().enumerate() {
        let cells: Vec<&str> = line.split_whitespace().collect();
        if cells.len() != GRID_SIZE {
            return Err(LoadError::ParseError(format!(
                "第 {row} 列必須有 {GRID_SIZE} 格，實際 {}",
                cells.len()
            ))
            .into());
        }
        for (col, cell) in cells.into_iter().enumerate() {
            if cell == "." {
                continue;
            }
            let pos = Position::new(row, col);
            let mut has_unit = false;
            let mut has_obstacle = false;
            for code in cell.split('+') {
                match parse_code(code)? {
                    Token::Unit(piece, color) if !has_unit => {
                        has_unit = true;
                        layout.units.push(UnitMarker { piece, color, pos });
                    }
                    Token::Antler(color) if !has_obstacle => {
                        has_obstacle = true;
                        layout.antlers.push((pos, color));
                    }
                    Token::Fortress(color) if !has_obstacle => {
                        has_obstacle = true;
                        layout.fortresses.push((pos, color));
                    }
                    _ => {
                        return Err(LoadError::ParseError(format!(
                            "{pos} 的 `{cell}` 重複放置單位或障礙物"
                        ))
                        .into());
                    }
                }
            }
        }
    }
    Ok(layout)
}

enum Token {
    Unit(PieceType, Color),
    Antler(Color),
    Fortress(Color),
}

fn parse_code(code: &str) -> Result<Token> {
    let mut chars = code.chars();
    let (Some(color), Some(kind), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(LoadError::ParseError(format!("無法辨識的符號: `{code}`")).into());
    };
    let color = match color {
        'w' => Color::White,
        'b' => Color::Black,
        _ => return Err(LoadError::ParseError(format!("無法辨識的陣營: `{code}`")).into()),
    };
    let token = match kind {
        'P' => Token::Unit(PieceType::Pawn, color),
        'N' => Token::Unit(PieceType::Knight, color),
        'B' => Token::Unit(PieceType::Bishop, color),
        'R' => Token::Unit(PieceType::Rook, color),
        'Q' => Token::Unit(PieceType::Queen, color),
        'K' => Token::Unit(PieceType::King, color),
        'A' => Token::Antler(color),
        'F' => Token::Fortress(color),
        _ => return Err(LoadError::ParseError(format!("無法辨識的種類: `{code}`")).into()),
    };
    Ok(token)
}

/// 從 TOML 載入遊戲設定並檢查數值
pub fn load_config(toml_str: &str) -> Result<GameConfig> {
    let config: GameConfig =
        toml::from_str(toml_str).map_err(|e| LoadError::DeserializeError {
            format: "TOML".to_string(),
            reason: e.to_string(),
        })?;
    config.validate()?;
    Ok(config)
}
