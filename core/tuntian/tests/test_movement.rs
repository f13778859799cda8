//! 合法目的地與走子執行測試

mod test_helpers;

use std::collections::BTreeSet;
use test_helpers::{enter_move_phase, pos};
use tuntian::component::{Color, PieceType, Position};
use tuntian::error::{BoardError, ErrorKind, RuleError};
use tuntian::game::MoveOutcome;

fn positions(cells: &[(usize, usize)]) -> BTreeSet<Position> {
    cells.iter().map(|&(r, c)| pos(r, c)).collect()
}

#[test]
fn test_legal_moves() {
    let test_data = [
        (
            // 車的射線包含敵方鹿角後停止
            r#"
wR . . bA . . . .
. . . . . . . .
. . . . . . . .
. . . . . bK . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . wK
            "#,
            (0, 0),
            vec![
                (0, 1),
                (0, 2),
                (0, 3),
                (1, 0),
                (2, 0),
                (3, 0),
                (4, 0),
                (5, 0),
                (6, 0),
                (7, 0),
            ],
        ),
        (
            // 己方鹿角可通過，敵方堡壘不可進入也不可穿越
            r#"
. . . . . . . bK
. . . . . . . .
. . . . . . . .
wR . wA . bF . bP .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . wK
            "#,
            (3, 0),
            vec![
                (3, 1),
                (3, 2),
                (3, 3),
                (0, 0),
                (1, 0),
                (2, 0),
                (4, 0),
                (5, 0),
                (6, 0),
                (7, 0),
            ],
        ),
        (
            // 馬跳過鹿角，但不能落在敵方堡壘
            r#"
. . . . . . . .
. . . . . . . .
. . . . . bF . .
. . . . bA . . .
. . . bA wN bA . .
. . . . bA . . .
. . . . . . . .
bK . . . . . . wK
            "#,
            (4, 4),
            vec![(6, 5), (6, 3), (2, 3), (5, 6), (5, 2), (3, 6), (3, 2)],
        ),
        (
            // 馬也可跳過己方鹿角，己方堡壘可以落腳
            r#"
. . . . . . . .
. . . . . . . .
. . . . . wF . .
. . . . wA . . .
. . . wA wN wA . .
. . . . wA . . .
. . . . . . . .
bK . . . . . . wK
            "#,
            (4, 4),
            vec![(6, 5), (6, 3), (2, 5), (2, 3), (5, 6), (5, 2), (3, 6), (3, 2)],
        ),
        (
            // 象被敵方鹿角擋住，鹿角本身可作為目標
            r#"
bK . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . bA . . .
. . . . . . . .
. . wB . . . . wK
            "#,
            (7, 2),
            vec![(6, 1), (5, 0), (6, 3), (5, 4)],
        ),
        (
            // 兵：起始列可走兩步，前方有子不能走，斜前方只能吃子
            r#"
bK . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. bP . . . . . .
wP . . . . . . .
. . . . . . . wK
            "#,
            (6, 0),
            vec![(5, 0), (4, 0), (5, 1)],
        ),
        (
            r#"
bK . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . bN . . . .
. . . . . . . .
. . . wP . . . .
. . . . . . . wK
            "#,
            (6, 3),
            vec![(5, 3)],
        ),
        (
            // 王：八方向一步，不能吃己方
            r#"
bK . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . wP wP
. . . . . . . wK
. . . . . . . .
            "#,
            (6, 7),
            vec![(6, 6), (7, 6), (7, 7)],
        ),
    ];

    for (idx, (ascii, from, expected)) in test_data.iter().enumerate() {
        let game = enter_move_phase(ascii, 20);
        let result = game.legal_moves(pos(from.0, from.1));
        assert_eq!(result, positions(expected), "Case {idx}");
    }
}

#[test]
fn test_insufficient_food_gives_no_moves() {
    let ascii = r#"
bK . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . wQ . . .
. . . . . . . .
. . . . . . . .
. . . . . . . wK
    "#;
    let mut game = enter_move_phase(ascii, 5);

    assert!(game.legal_moves(pos(4, 4)).is_empty());
    let err = game.execute_move(pos(4, 4), pos(4, 5)).unwrap_err();
    assert_eq!(
        err.rule(),
        Some(&RuleError::InsufficientFood {
            color: Color::White,
            required: 9,
            available: 5,
        })
    );
    assert_eq!(game.board().unit_at(pos(4, 4)).unwrap().piece, PieceType::Queen);
    assert_eq!(game.ledger().food(Color::White), 5);
}

#[test]
fn test_antler_capture_in_place() {
    let ascii = r#"
wR . . bA . . . .
. . . . . . . .
. . . . . . . .
. . . . . bK . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . wK
    "#;
    let mut game = enter_move_phase(ascii, 20);
    let rook_id = game.board().unit_id_at(pos(0, 0)).unwrap();

    let outcome = game.execute_move(pos(0, 0), pos(0, 3)).unwrap();
    assert_eq!(
        outcome,
        MoveOutcome::AntlerCaptured {
            unit_id: rook_id,
            pos: pos(0, 3),
            cost: 5,
        }
    );
    assert_eq!(game.board().unit_id_at(pos(0, 0)), Some(rook_id));
    assert!(game.board().is_empty(pos(0, 3)));
    assert_eq!(game.obstacles().antler_at(pos(0, 3)), None);
    assert_eq!(game.ledger().territory(pos(0, 3)), None);
    assert_eq!(game.ledger().food(Color::White), 15);
    assert_eq!(game.player(Color::White).unwrap().moves_this_turn, 1);
    assert_eq!(game.board().unit(rook_id).unwrap().moved_this_turn, 1);

    // 鹿角移除後射線延伸到邊界，且花費已遞增
    assert!(game.legal_moves(pos(0, 0)).contains(&pos(0, 7)));
    assert_eq!(game.move_cost_of(rook_id), Some(7));
}

#[test]
fn test_knight_cannot_enter_enemy_fortress() {
    let ascii = r#"
. . . . . . . .
. . . . . . . .
. . . . . bF . .
. . . . bA . . .
. . . bA wN bA . .
. . . . bA . . .
. . . . . . . .
bK . . . . . . wK
    "#;
    let mut game = enter_move_phase(ascii, 20);

    let err = game.execute_move(pos(4, 4), pos(2, 5)).unwrap_err();
    assert_eq!(err.rule(), Some(&RuleError::EnemyFortressBlocked { pos: pos(2, 5) }));
    assert_eq!(game.ledger().food(Color::White), 20);

    let outcome = game.execute_move(pos(4, 4), pos(2, 3)).unwrap();
    assert!(matches!(outcome, MoveOutcome::Moved { captured: None, cost: 3, .. }));
    assert_eq!(game.board().unit_at(pos(2, 3)).unwrap().piece, PieceType::Knight);
    assert_eq!(game.ledger().territory(pos(2, 3)), Some(Color::White));
}

#[test]
fn test_capture_removes_from_roster() {
    let ascii = r#"
bK . . . . . . .
. . . . . . . .
bP . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
wR . . . . . . wK
    "#;
    let mut game = enter_move_phase(ascii, 20);
    let pawn_id = game.board().unit_id_at(pos(2, 0)).unwrap();

    let outcome = game.execute_move(pos(7, 0), pos(2, 0)).unwrap();
    let MoveOutcome::Moved { captured, .. } = outcome else {
        panic!("應該是一般移動: {outcome:?}");
    };
    assert_eq!(captured.map(|u| u.id), Some(pawn_id));
    assert!(!game.player(Color::Black).unwrap().roster.contains(&pawn_id));
    assert_eq!(game.player(Color::Black).unwrap().roster.len(), 1);
    assert!(game.board().unit(pawn_id).is_none());
    assert_eq!(game.ledger().territory(pos(2, 0)), Some(Color::White));
    assert_eq!(game.ledger().territory(pos(7, 0)), Some(Color::White));
    assert!(!game.is_game_over());
}

#[test]
fn test_turn_limits() {
    // 王每回合一次（原地摧毀鹿角也算）
    let ascii = r#"
bK . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . bA . . .
. . . . wK . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
    "#;
    let mut game = enter_move_phase(ascii, 20);
    assert!(matches!(
        game.execute_move(pos(4, 4), pos(3, 4)).unwrap(),
        MoveOutcome::AntlerCaptured { .. }
    ));
    assert!(game.legal_moves(pos(4, 4)).is_empty());
    let err = game.execute_move(pos(4, 4), pos(4, 5)).unwrap_err();
    assert_eq!(err.rule(), Some(&RuleError::KingMoveLimitReached { limit: 1 }));
    assert_eq!(game.ledger().food(Color::White), 17);

    // 每回合最多移動三次
    let ascii = r#"
bK . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
wP wP wP wP . . . .
. . . . . . . wK
    "#;
    let mut game = enter_move_phase(ascii, 20);
    for col in 0..3 {
        game.execute_move(pos(6, col), pos(5, col)).unwrap();
    }
    let err = game.execute_move(pos(6, 3), pos(5, 3)).unwrap_err();
    assert_eq!(err.rule(), Some(&RuleError::MoveLimitReached { limit: 3 }));
    assert_eq!(game.ledger().food(Color::White), 17);
    assert!(game.board().is_empty(pos(5, 3)));
}

#[test]
fn test_repeated_moves_cost_more() {
    let ascii = r#"
bK . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
wR . . . . . . wK
    "#;
    let mut game = enter_move_phase(ascii, 20);

    game.execute_move(pos(7, 0), pos(6, 0)).unwrap();
    assert_eq!(game.ledger().food(Color::White), 15);
    game.execute_move(pos(6, 0), pos(5, 0)).unwrap();
    assert_eq!(game.ledger().food(Color::White), 8);

    // 第三次要 9，只剩 8
    assert!(game.legal_moves(pos(5, 0)).is_empty());
    let err = game.execute_move(pos(5, 0), pos(4, 0)).unwrap_err();
    assert!(matches!(err.rule(), Some(RuleError::InsufficientFood { required: 9, .. })));
}

#[test]
fn test_cannot_move_enemy_or_empty() {
    let ascii = r#"
bK . . . . . . .
bP . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . wK
    "#;
    let mut game = enter_move_phase(ascii, 20);
    for from in [pos(1, 0), pos(4, 4)] {
        let err = game.execute_move(from, pos(2, 0)).unwrap_err();
        assert_eq!(err.rule(), Some(&RuleError::NotYourUnit { pos: from }));
    }
}

#[test]
fn test_enemy_fortress_destination_is_reported() {
    let ascii = r#"
bK . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
bF . . . . . . .
wR . . . . . . wK
    "#;
    let mut game = enter_move_phase(ascii, 20);

    assert!(!game.legal_moves(pos(7, 0)).contains(&pos(6, 0)));
    let err = game.execute_move(pos(7, 0), pos(6, 0)).unwrap_err();
    assert_eq!(err.rule(), Some(&RuleError::EnemyFortressBlocked { pos: pos(6, 0) }));
    assert_eq!(game.ledger().food(Color::White), 20);
    assert_eq!(game.player(Color::White).unwrap().moves_this_turn, 0);

    // 不在合法目的地內的一般格子
    let err = game.execute_move(pos(7, 0), pos(6, 1)).unwrap_err();
    assert_eq!(err.rule(), Some(&RuleError::IllegalDestination { pos: pos(6, 1) }));
}

#[test]
fn test_off_board_positions_are_rejected() {
    let ascii = r#"
bK . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
wP . . . . . . .
. . . . . . . wK
    "#;
    let mut game = enter_move_phase(ascii, 20);

    for cell in [pos(8, 0), pos(0, 9), pos(usize::MAX, 3)] {
        assert!(game.legal_moves(cell).is_empty(), "{cell}");
        assert!(game.board().unit_at(cell).is_none(), "{cell}");
    }

    let test_data = [
        (pos(8, 0), pos(5, 0), pos(8, 0)),
        (pos(6, 0), pos(6, 8), pos(6, 8)),
    ];
    for (idx, (from, to, bad)) in test_data.into_iter().enumerate() {
        let err = game.execute_move(from, to).unwrap_err();
        assert!(
            matches!(err.kind(), ErrorKind::Board(BoardError::OutOfBounds { pos }) if *pos == bad),
            "Case {idx}: {err}"
        );
    }

    let err = game.cast_skill(pos(0, 9)).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::Board(BoardError::OutOfBounds { .. })
    ));
    assert_eq!(game.ledger().food(Color::White), 20);
    assert!(game.obstacles().is_empty());
}
