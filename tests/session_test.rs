//! Tests for the session state machine.

use ocean_tictactoe::{
    Board, GameResult, Mark, Mode, MoveRejection, Outcome, Position, Session, Square, Status,
    Theme, Transition, select_random_move_with,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn pvp() -> Session {
    Session::new(Mode::PlayerVsPlayer, Theme::Light)
}

fn pvc() -> Session {
    Session::new(Mode::PlayerVsComputer, Theme::Light)
}

fn play(session: &mut Session, moves: &[usize]) {
    for &index in moves {
        session
            .submit_move(index)
            .unwrap_or_else(|e| panic!("move {index} rejected: {e}"));
    }
}

/// Snapshot of everything a rejected move must leave alone.
fn game_state(session: &Session) -> (Board, u32, Mark, Outcome, bool, u64) {
    (
        session.board().clone(),
        session.move_count(),
        session.active_mark(),
        session.outcome(),
        session.game_active(),
        session.generation(),
    )
}

#[test]
fn test_new_session_is_empty() {
    let session = pvp();
    assert_eq!(session.board(), &Board::new());
    assert_eq!(session.active_mark(), Mark::X);
    assert_eq!(session.outcome(), Outcome::InProgress);
    assert_eq!(session.move_count(), 0);
    assert!(session.history().is_empty());
    assert!(!session.game_active());
    assert!(session.can_change_mode());
    assert_eq!(session.winning_line(), None);
}

#[test]
fn test_turn_alternation() {
    let mut session = pvp();
    let mut movers = Vec::new();
    for index in [0, 1, 2] {
        movers.push(session.active_mark());
        session.submit_move(index).expect("legal move");
    }
    assert_eq!(movers, [Mark::X, Mark::O, Mark::X]);
    assert_eq!(session.active_mark(), Mark::O);
    assert_eq!(session.outcome(), Outcome::InProgress);
    assert!(session.game_active());
    assert!(!session.can_change_mode());
}

#[test]
fn test_win_scenario() {
    let mut session = pvp();
    play(&mut session, &[0, 3, 1, 4]);
    let transition = session.submit_move(2).expect("winning move");

    let Transition::Won(win) = transition else {
        panic!("expected a win, got {transition:?}");
    };
    assert_eq!(win.mark(), Mark::X);
    assert_eq!(win.line().indices(), [0, 1, 2]);
    assert_eq!(session.outcome(), Outcome::Win(win));
    assert_eq!(session.winning_line().map(|l| l.indices()), Some([0, 1, 2]));
    assert!(!session.game_active());

    assert_eq!(session.history().len(), 1);
    let record = session.history().latest().unwrap();
    assert_eq!(*record.result(), GameResult::Winner(Mark::X));
    assert_eq!(record.result().to_string(), "X");
    assert_eq!(*record.moves(), 5);
    assert_eq!(record.mode(), "Player vs Player");
    // The winner stays the active mark; no switch after the game ends.
    assert_eq!(session.active_mark(), Mark::X);
}

#[test]
fn test_draw_scenario() {
    let mut session = pvp();
    play(&mut session, &[0, 1, 2, 4, 3, 5, 7, 6]);
    assert_eq!(session.outcome(), Outcome::InProgress);

    assert_eq!(session.submit_move(8), Ok(Transition::Drawn));
    assert_eq!(session.outcome(), Outcome::Draw);
    assert_eq!(session.status(), Status::Draw);
    assert_eq!(session.history().len(), 1);
    let record = session.history().latest().unwrap();
    assert_eq!(record.result().to_string(), "draw");
    assert_eq!(*record.moves(), 9);
}

#[test]
fn test_win_on_last_square_is_not_a_draw() {
    let mut session = pvp();
    // X completes the left column with the ninth move.
    play(&mut session, &[0, 1, 2, 4, 3, 5, 7, 8]);
    let transition = session.submit_move(6).expect("final move");
    assert!(matches!(transition, Transition::Won(win) if win.mark() == Mark::X));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_rejected_moves_change_nothing() {
    let mut session = pvp();
    play(&mut session, &[4]);
    let before = game_state(&session);

    assert_eq!(
        session.submit_move(4),
        Err(MoveRejection::Occupied(Position::Center))
    );
    assert_eq!(session.submit_move(9), Err(MoveRejection::OutOfRange(9)));
    assert_eq!(
        session.submit_move(usize::MAX),
        Err(MoveRejection::OutOfRange(usize::MAX))
    );
    assert_eq!(game_state(&session), before);
}

#[test]
fn test_moves_after_game_over_are_rejected() {
    let mut session = pvp();
    play(&mut session, &[0, 3, 1, 4, 2]);
    let before = game_state(&session);

    for index in [5, 8, 0, 42] {
        assert_eq!(session.submit_move(index), Err(MoveRejection::GameOver));
    }
    assert_eq!(game_state(&session), before);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_new_game_keeps_history() {
    let mut session = pvp();
    play(&mut session, &[0, 3, 1, 4, 2]);
    session.new_game();

    assert_eq!(session.board(), &Board::new());
    assert_eq!(session.active_mark(), Mark::X);
    assert_eq!(session.outcome(), Outcome::InProgress);
    assert_eq!(session.winning_line(), None);
    assert_eq!(session.move_count(), 0);
    assert!(!session.game_active());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_reset_history_clears_everything() {
    let mut session = pvp();
    play(&mut session, &[0, 3, 1, 4, 2]);
    session.new_game();
    play(&mut session, &[4, 0]);
    session.reset_history();

    assert!(session.history().is_empty());
    assert_eq!(session.board(), &Board::new());
    assert_eq!(session.outcome(), Outcome::InProgress);
    assert_eq!(session.move_count(), 0);
}

#[test]
fn test_history_is_most_recent_first() {
    let mut session = pvp();
    play(&mut session, &[0, 3, 1, 4, 2]);
    session.new_game();
    play(&mut session, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    let results: Vec<String> = session
        .history()
        .iter()
        .map(|r| r.result().to_string())
        .collect();
    assert_eq!(results, ["draw", "X"]);
}

#[test]
fn test_change_mode_restarts_mid_game() {
    let mut session = pvp();
    play(&mut session, &[0, 4]);
    session.change_mode(Mode::PlayerVsComputer);

    assert_eq!(session.mode(), Mode::PlayerVsComputer);
    assert_eq!(session.board(), &Board::new());
    assert_eq!(session.move_count(), 0);
    assert!(session.history().is_empty());
}

#[test]
fn test_status_projection() {
    let mut session = pvp();
    assert_eq!(session.status().to_string(), "Current player: X");
    play(&mut session, &[0]);
    assert_eq!(session.status().to_string(), "Current player: O");
    play(&mut session, &[3, 1, 4, 2]);
    assert_eq!(session.status().to_string(), "Winner: X");

    let mut session = pvc();
    play(&mut session, &[4]);
    assert_eq!(session.status(), Status::ComputerThinking);
    assert_eq!(session.status().to_string(), "Computer is thinking...");
}

#[test]
fn test_human_cannot_move_for_computer() {
    let mut session = pvc();
    play(&mut session, &[4]);
    let before = game_state(&session);

    assert_eq!(session.submit_move(0), Err(MoveRejection::ComputerTurn));
    assert_eq!(game_state(&session), before);
}

#[test]
fn test_computer_turn_only_when_due() {
    let mut session = pvp();
    play(&mut session, &[4]);
    assert_eq!(session.pending_computer_turn(), None);

    let mut session = pvc();
    assert_eq!(session.pending_computer_turn(), None);
    play(&mut session, &[4]);
    assert!(session.awaiting_computer());
    assert!(session.pending_computer_turn().is_some());
}

#[test]
fn test_computer_plays_a_legal_move() {
    let mut session = pvc();
    let mut rng = StdRng::seed_from_u64(5);
    play(&mut session, &[4]);

    let turn = session.pending_computer_turn().expect("computer is due");
    let transition = session
        .play_computer_turn(turn, &mut rng)
        .expect("computer move");

    assert_eq!(transition, Transition::Continued { next: Mark::X });
    assert_eq!(session.move_count(), 2);
    assert_eq!(session.board().occupied_count(), 2);
    assert_eq!(
        session.board().square(Position::Center),
        Square::Occupied(Mark::X)
    );
    assert_eq!(session.active_mark(), Mark::X);
    assert_eq!(session.pending_computer_turn(), None);
}

#[test]
fn test_stale_computer_turn_is_rejected() {
    let mut session = pvc();
    let mut rng = StdRng::seed_from_u64(5);
    play(&mut session, &[4]);
    let turn = session.pending_computer_turn().unwrap();

    session.new_game();
    assert_eq!(
        session.play_computer_turn(turn, &mut rng),
        Err(MoveRejection::StaleTurn)
    );
    assert_eq!(session.board(), &Board::new());
    assert_eq!(session.move_count(), 0);

    // Same board shape again, but a newer generation.
    play(&mut session, &[4]);
    assert_eq!(
        session.play_computer_turn(turn, &mut rng),
        Err(MoveRejection::StaleTurn)
    );
    assert_eq!(session.move_count(), 1);
}

#[test]
fn test_computer_turn_cannot_be_redeemed_twice() {
    let mut session = pvc();
    let mut rng = StdRng::seed_from_u64(1);
    play(&mut session, &[0]);
    let turn = session.pending_computer_turn().unwrap();

    assert!(session.play_computer_turn(turn, &mut rng).is_ok());
    assert_eq!(
        session.play_computer_turn(turn, &mut rng),
        Err(MoveRejection::StaleTurn)
    );
    assert_eq!(session.move_count(), 2);
}

#[test]
fn test_full_computer_game_records_mode_label() {
    let mut session = pvc();
    let mut rng = StdRng::seed_from_u64(99);

    while !session.outcome().is_over() {
        if let Some(turn) = session.pending_computer_turn() {
            session.play_computer_turn(turn, &mut rng).unwrap();
        } else {
            let index = select_random_move_with(session.board(), &mut rng)
                .expect("game not over");
            session.submit_move(index).unwrap();
        }
    }

    let record = session.history().latest().unwrap();
    assert_eq!(record.mode(), "Player vs Computer");
    assert_eq!(*record.moves(), session.move_count());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_theme_does_not_touch_game() {
    let mut session = pvc();
    play(&mut session, &[4]);
    let before = game_state(&session);

    assert_eq!(session.toggle_theme(), Theme::Dark);
    assert_eq!(session.theme(), Theme::Dark);
    session.set_theme(Theme::Light);
    assert_eq!(session.theme(), Theme::Light);
    assert_eq!(game_state(&session), before);
}

#[test]
fn test_history_json_matches_record_shape() {
    let mut session = pvp();
    play(&mut session, &[0, 3, 1, 4, 2]);
    session.new_game();
    play(&mut session, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    let json = serde_json::to_value(session.history()).unwrap();
    assert_eq!(json[0]["result"], "draw");
    assert_eq!(json[0]["moves"], 9);
    assert_eq!(json[1]["result"], "X");
    assert_eq!(json[1]["moves"], 5);
    assert_eq!(json[1]["mode"], "Player vs Player");
    assert!(json[1]["date"].is_string());
}

#[test]
fn test_game_number_out_of_range_is_none() {
    let mut session = pvp();
    assert_eq!(session.history().game_number(0), None);
    assert_eq!(session.history().game_number(1), None);

    play(&mut session, &[0, 3, 1, 4, 2]);
    assert_eq!(session.history().game_number(0), Some(1));
    assert_eq!(session.history().game_number(1), None);
}
