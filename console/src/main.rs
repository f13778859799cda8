//! 屯田棋 文字介面
//!
//! 用法: `console [config.toml]`，`RUST_LOG=tuntian=debug` 可看到結算細節。

use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Write};
use tuntian::component::{Color, ManagementView, PieceType};
use tuntian::config::GameConfig;
use tuntian::constants::GRID_SIZE;
use tuntian::game::{ButtonId, DrawableState, Game, MouseButton};
use tuntian::loader::load_config;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("讀取設定檔 {path}"))?;
            load_config(&text)?
        }
        None => GameConfig::default(),
    };
    let mut game = Game::new(config)?;
    tracing::info!("屯田棋開局");

    print_help();
    draw(&game.drawable_state());

    let stdin = io::stdin();
    loop {
        print!("{}> ", game.current_color());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["quit" | "q"] => break,
            ["help" | "h"] => print_help(),
            ["state"] => println!("{}", serde_json::to_string_pretty(&game.drawable_state())?),
            ["reset"] => {
                game.reset()?;
                draw(&game.drawable_state());
            }
            _ => match run_command(&mut game, &words) {
                Ok(message) => {
                    println!("{message}");
                    draw(&game.drawable_state());
                }
                Err(err) => println!("{err:#}"),
            },
        }
    }
    Ok(())
}

fn run_command(game: &mut Game, words: &[&str]) -> Result<String> {
    match words {
        ["click", row, col, rest @ ..] => {
            let button = match rest {
                [] | ["l"] => MouseButton::Primary,
                ["r"] => MouseButton::Secondary,
                _ => bail!("按鍵只能是 l 或 r"),
            };
            let outcome = game.handle_cell_click(row.parse()?, col.parse()?, button)?;
            Ok(format!("{outcome:?}"))
        }
        ["button", id] => {
            let id: ButtonId = id.parse()?;
            let outcome = game.handle_button_click(id)?;
            Ok(format!("{outcome:?}"))
        }
        ["taxall"] => {
            let count = game.mark_all_taxable()?;
            Ok(format!("標記 {count} 格"))
        }
        _ => bail!("未知指令: {}", words.join(" ")),
    }
}

fn print_help() {
    println!("指令:");
    println!("  click <row> <col> [l|r]  點擊格子（r 為副鍵：取消標記／施放技能）");
    println!("  button <id>              white_tax / white_farm / white_end / black_...");
    println!("  taxall                   標記所有己方領土征稅");
    println!("  state                    以 JSON 輸出完整狀態");
    println!("  reset                    重新開局");
    println!("  quit                     離開");
}

fn piece_char(piece: PieceType, color: Color) -> char {
    let c = match piece {
        PieceType::Pawn => 'p',
        PieceType::Knight => 'n',
        PieceType::Bishop => 'b',
        PieceType::Rook => 'r',
        PieceType::Queen => 'q',
        PieceType::King => 'k',
    };
    match color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

fn draw(state: &DrawableState) {
    let mut cells = [['.'; GRID_SIZE]; GRID_SIZE];
    for (pos, _) in &state.antlers {
        cells[pos.row][pos.col] = '^';
    }
    for (pos, _) in &state.fortresses {
        cells[pos.row][pos.col] = '#';
    }
    for pos in &state.valid_moves {
        if cells[pos.row][pos.col] == '.' {
            cells[pos.row][pos.col] = '*';
        }
    }
    for unit in &state.units {
        cells[unit.pos.row][unit.pos.col] = piece_char(unit.piece, unit.color);
    }

    println!("    0 1 2 3 4 5 6 7");
    for (row, line) in cells.iter().enumerate() {
        let mut text = format!(" {row}  ");
        for (col, ch) in line.iter().enumerate() {
            text.push(*ch);
            let overlay = match state.view {
                ManagementView::Tax if state.tax_marks.rows()[row][col] => '$',
                ManagementView::Farm => match state.farm_counts.rows()[row][col] {
                    0 => ' ',
                    n => char::from_digit(n, 10).unwrap_or('+'),
                },
                _ => ' ',
            };
            text.push(overlay);
        }
        println!("{text}");
    }

    for player in &state.players {
        println!(
            "{}: 糧草 {} 移動 {} 技能 {} 單位 {}",
            player.color,
            player.food,
            player.moves_this_turn,
            player.skills_used_this_turn,
            player.units_alive
        );
    }
    print!("第 {} 輪 {} {} 階段", state.round + 1, state.current_player, state.phase);
    if state.view != ManagementView::None {
        print!("（{} 視圖）", state.view);
    }
    println!();
    if let Some(cost) = state.selected_move_cost {
        println!("選中單位移動花費 {cost}");
    }
    if let Some(preview) = &state.preview {
        println!("結算後糧草 {}", preview.final_food);
    }
    if let Some(winner) = state.winner {
        println!("遊戲結束，{winner} 獲勝");
    }
}
