//! Whole-game scenarios played through the public API.

use variant_core::{Color, Move, Piece, PieceKind, Square};
use variant_engine::{
    BoardId, BughouseTable, DrawReason, Game, GameConfig, GameKind, GameResult, MoveError,
    RuleSet, Setup, WinReason,
};

/// Routes engine logs to the test harness output.
fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

/// Finds a move from UCI-like text: `e2e4`, `e7e8q`, or `N@f3` for drops.
fn lookup(game: &Game, text: &str) -> Option<Move> {
    if text.as_bytes()[1] == b'@' {
        let kind = PieceKind::from_letter(text.chars().next()?)?;
        let to = sq(&text[2..4]);
        return game.find_move(to, to, Some(kind));
    }
    let extra = text.chars().nth(4).and_then(PieceKind::from_letter);
    game.find_move(sq(&text[0..2]), sq(&text[2..4]), extra)
}

fn play(game: &mut Game, moves: &[&str]) {
    for text in moves {
        let mv = lookup(game, text).unwrap_or_else(|| panic!("{text} is not legal"));
        game.apply_move(mv).unwrap();
    }
}

#[test]
fn test_four_knights_opening() {
    init_logging();
    let mut game = Game::new(GameKind::Regular);
    play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6"]);

    assert_eq!(
        game.board().placement_text(false),
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R"
    );
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.move_number(), 3);
    assert_eq!(game.history().len(), 5);
    assert!(game.result().is_none());
}

#[test]
fn test_knight_shuffle_repeats_on_the_eighth_ply() {
    let mut game = Game::new(GameKind::Regular);
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    play(&mut game, &shuffle);
    play(&mut game, &shuffle[..3]);
    assert!(game.result().is_none(), "only the second visit after seven plies");

    play(&mut game, &shuffle[3..]);
    assert_eq!(
        game.result(),
        Some(GameResult::Draw(DrawReason::ThreefoldRepetition))
    );
    assert_eq!(game.ply_count(), 8);
}

#[test]
fn test_repetition_can_be_disabled() {
    let config = GameConfig::from_toml_str("[draw_rules]\nrepetition = false").unwrap();
    let mut game = Game::with_config(&config);
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    for _ in 0..3 {
        play(&mut game, &shuffle);
    }
    assert!(game.result().is_none());
}

#[test]
fn test_fifty_move_rule() {
    let setup = Setup::new(GameKind::Regular, "4k3/8/8/8/8/8/8/R3K1N1")
        .unwrap()
        .fifty_move_counter(99);
    let mut game = Game::from_setup(setup).unwrap();
    assert!(game.result().is_none());

    play(&mut game, &["g1f3"]);
    assert_eq!(game.result(), Some(GameResult::Draw(DrawReason::FiftyMoveRule)));

    game.takeback().unwrap();
    assert!(game.result().is_none());
    assert_eq!(game.current_info().fifty_move_counter(), 99);
}

#[test]
fn test_fischer_with_standard_geometry_castles_like_regular() {
    let placement = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";
    let opening = ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5"];

    let mut regular = Game::from_setup(Setup::new(GameKind::Regular, placement).unwrap()).unwrap();
    let mut fischer = Game::from_setup(Setup::new(GameKind::Fischer, placement).unwrap()).unwrap();
    play(&mut regular, &opening);
    play(&mut fischer, &opening);

    play(&mut regular, &["e1g1"]);
    let mut by_rook = fischer.clone();
    play(&mut fischer, &["e1g1"]);
    play(&mut by_rook, &["e1h1"]);

    for game in [&fischer, &by_rook] {
        assert_eq!(game.board().placement_text(false), regular.board().placement_text(false));
        assert!(game.piece_at(sq("g1")).is_some_and(|p| p.is(PieceKind::King)));
        assert!(game.piece_at(sq("f1")).is_some_and(|p| p.is(PieceKind::Rook)));
    }
}

#[test]
fn test_seeded_fischer_layouts_repeat() {
    let config = GameConfig::from_toml_str("kind = \"fischer\"\nfischer_seed = 960").unwrap();
    let first = Game::with_config(&config);
    let second = Game::with_config(&config);
    assert_eq!(first.board(), second.board());
    assert_eq!(first.valid_moves().len(), second.valid_moves().len());
}

#[test]
fn test_crazyhouse_drops_need_a_capture() {
    init_logging();
    let mut game = Game::new(GameKind::CrazyHouse);
    play(&mut game, &["e2e4", "d7d5"]);

    assert!(lookup(&game, "P@f3").is_none());
    let drop = Move::drop(Piece::new(PieceKind::Pawn, Color::White), sq("f3"));
    assert!(game.apply_move(drop).is_err());

    play(&mut game, &["e4d5", "g8f6"]);
    assert_eq!(game.droppable_kinds(Color::White), vec![PieceKind::Pawn]);
    assert!(lookup(&game, "N@f3").is_none());

    play(&mut game, &["P@f3"]);
    let dropped = game.piece_at(sq("f3")).unwrap();
    assert_eq!(dropped, Piece { moved: true, ..Piece::new(PieceKind::Pawn, Color::White) });
    assert!(game.droppable_kinds(Color::White).is_empty());

    game.takeback().unwrap();
    assert!(game.piece_at(sq("f3")).is_none());
    assert_eq!(game.droppable_kinds(Color::White), vec![PieceKind::Pawn]);
}

#[test]
fn test_crazyhouse_pool_appears_in_fingerprint() {
    let mut game = Game::new(GameKind::CrazyHouse);
    play(&mut game, &["e2e4", "d7d5", "e4d5"]);
    assert!(game.current_info().fingerprint().contains("[p]"));
}

#[test]
fn test_suicide_captures_are_forced() {
    let mut game = Game::new(GameKind::Suicide);
    play(&mut game, &["e2e4", "d7d5"]);
    let moves = game.valid_moves();
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].to_uci(), "e4d5");
}

#[test]
fn test_free_play_bare_side() {
    assert_eq!(RuleSet::FreePlay.bare_side_winner(Color::White), Color::White);
    assert_eq!(RuleSet::Suicide.bare_side_winner(Color::Black), Color::Black);
    assert_eq!(RuleSet::Regular.bare_side_winner(Color::White), Color::Black);
}

#[test]
fn test_checkmate_refuses_further_moves() {
    let mut game = Game::new(GameKind::Regular);
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(
        game.result(),
        Some(GameResult::Win {
            winner: Color::Black,
            reason: WinReason::Checkmate
        })
    );
    assert!(game.valid_moves().is_empty());
    let mv = Move::new(Piece::new(PieceKind::Pawn, Color::White), sq("a2"), sq("a3"));
    assert_eq!(game.apply_move(mv), Err(MoveError::GameOver));
}

#[test]
fn test_takeback_all_restores_the_start() {
    let start = Game::new(GameKind::Regular);
    let mut game = start.clone();
    play(&mut game, &["d2d4", "d7d5", "c2c4", "d5c4", "e2e4", "b7b5"]);
    assert_eq!(game.captured_pieces(Color::White).len(), 1);

    game.takeback_to(2).unwrap();
    assert_eq!(game.ply_count(), 2);
    assert!(game.captured_pieces(Color::White).is_empty());

    game.takeback_all().unwrap();
    assert_eq!(game.board(), start.board());
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.move_number(), 1);
}

#[test]
fn test_bughouse_table_plays_both_boards() {
    init_logging();
    let mut table = BughouseTable::new();
    let play_on = |table: &mut BughouseTable, id: BoardId, from: &str, to: &str| {
        let mv = table.find_move(id, sq(from), sq(to), None).unwrap();
        table.apply_move(id, mv).unwrap();
    };

    play_on(&mut table, BoardId::A, "e2", "e4");
    play_on(&mut table, BoardId::A, "d7", "d5");
    play_on(&mut table, BoardId::A, "e4", "d5");
    play_on(&mut table, BoardId::B, "d2", "d4");

    let pawn = table
        .find_move(BoardId::B, sq("e5"), sq("e5"), Some(PieceKind::Pawn))
        .unwrap();
    assert!(table
        .find_move(BoardId::B, sq("e5"), sq("e5"), Some(PieceKind::Queen))
        .is_none());
    table.apply_move(BoardId::B, pawn).unwrap();
    assert!(table.droppable(BoardId::B, Color::Black).is_empty());

    table.resign(BoardId::A, Color::Black).unwrap();
    assert_eq!(table.result().and_then(GameResult::winner), Some(Color::White));
    assert_eq!(
        table.board(BoardId::B).result().and_then(GameResult::winner),
        Some(Color::Black)
    );
}
