//! 測試輔助：用 ASCII 開局建立遊戲並推進階段

#![allow(dead_code)]

use tuntian::alias::Food;
use tuntian::component::Position;
use tuntian::config::GameConfig;
use tuntian::game::{ButtonId, ButtonKind, ButtonOutcome, Game};
use tuntian::loader::load_from_ascii;

pub fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

/// 預設設定，從 ASCII 開局
pub fn game_from_ascii(ascii: &str) -> Game {
    game_with_config(ascii, GameConfig::default())
}

/// 指定雙方初始糧草
pub fn game_with_food(ascii: &str, food: Food) -> Game {
    let mut config = GameConfig::default();
    config.economy.init_food = food;
    game_with_config(ascii, config)
}

pub fn game_with_config(ascii: &str, config: GameConfig) -> Game {
    let layout = load_from_ascii(ascii).unwrap();
    Game::with_layout(config, &layout).unwrap()
}

/// 當前玩家按下結束鍵
pub fn press_end(game: &mut Game) -> ButtonOutcome {
    let color = game.current_color();
    game.handle_button_click(ButtonId::new(color, ButtonKind::End))
        .unwrap()
}

/// 當前玩家直接結束行動階段，進入走子階段
pub fn enter_move_phase(ascii: &str, food: Food) -> Game {
    let mut game = game_with_food(ascii, food);
    press_end(&mut game);
    game
}
