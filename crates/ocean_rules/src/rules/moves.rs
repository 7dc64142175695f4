//! Move validation and the computer's move choice.

use rand::Rng;
use tracing::{debug, instrument};

use crate::{Board, Position};

/// True iff `index` is on the board and that square is empty.
pub fn is_valid_move(board: &Board, index: usize) -> bool {
    board.get(index).is_some_and(|square| square.is_empty())
}

/// Indices of empty squares, in ascending order.
pub fn empty_indices(board: &Board) -> Vec<usize> {
    Position::open_positions(board)
        .into_iter()
        .map(Position::to_index)
        .collect()
}

/// Picks an empty square uniformly at random using the thread RNG.
///
/// Returns `None` only when the board is full.
pub fn select_random_move(board: &Board) -> Option<usize> {
    select_random_move_with(board, &mut rand::rng())
}

/// Picks an empty square uniformly at random from `rng`.
///
/// With `k` empty squares each is chosen with probability `1/k`.
#[instrument(skip(board, rng), fields(board = %board))]
pub fn select_random_move_with<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    let empty = empty_indices(board);
    if empty.is_empty() {
        debug!("No legal moves");
        return None;
    }
    let choice = empty[rng.random_range(0..empty.len())];
    debug!(choice, candidates = empty.len(), "Selected random move");
    Some(choice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_valid_move_bounds_and_occupancy() {
        let b = board("X../.O./...");
        assert!(is_valid_move(&b, 1));
        assert!(is_valid_move(&b, 8));
        assert!(!is_valid_move(&b, 0));
        assert!(!is_valid_move(&b, 4));
        assert!(!is_valid_move(&b, 9));
        assert!(!is_valid_move(&b, usize::MAX));
    }

    #[test]
    fn test_empty_indices_preserve_order() {
        assert_eq!(empty_indices(&board("X.O/.X./O.X")), vec![1, 3, 5, 7]);
        assert_eq!(empty_indices(&Board::new()), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_random_move_none_on_full_board() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(select_random_move_with(&board("XOX/OXX/OXO"), &mut rng), None);
        assert_eq!(select_random_move(&board("XOX/OXX/OXO")), None);
    }

    #[test]
    fn test_random_move_single_option() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(select_random_move_with(&board("XOX/OX./OXO"), &mut rng), Some(5));
        }
    }

    #[test]
    fn test_random_move_is_reproducible_with_seed() {
        let b = board("X../.O./...");
        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..16)
                .map(|_| select_random_move_with(&b, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(42), picks(42));
    }

    #[test]
    fn test_random_move_always_legal() {
        let b = board("X.O/.X./O..");
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let index = select_random_move_with(&b, &mut rng).unwrap();
            assert!(is_valid_move(&b, index));
        }
    }
}
