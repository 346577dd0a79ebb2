// Minimax with alpha-beta pruning over any game that can hand out child
// positions by value. Nothing here mutates the position it is given, so root
// moves are scored in parallel.

use std::fmt::Debug;

use game_core::Color;
use log::debug;
use rayon::prelude::*;

/// A position the search can explore.
pub trait SearchState: Send + Sync + Sized {
    type Move: Copy + Send + Sync + Debug;

    fn side_to_move(&self) -> Color;

    /// Legal moves of the side to move, in a stable order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// The position after `mv`, which comes from `legal_moves`.
    fn child(&self, mv: Self::Move) -> Self;

    /// Whether the game has already been decided in this position.
    fn is_over(&self) -> bool;

    /// Static evaluation; higher is better for `ai_side`.
    fn evaluate(&self, ai_side: Color) -> f64;

    /// Value of an interior node whose side to move has no moves at all.
    fn dead_end(&self, ai_side: Color) -> f64;
}

/// Plain minimax with alpha-beta cutoffs. Nodes where `ai_side` is to move
/// maximize, the others minimize. `nodes` counts visited positions.
pub fn minimax<S: SearchState>(
    state: &S,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    ai_side: Color,
    nodes: &mut u64,
) -> f64 {
    *nodes += 1;

    if depth == 0 || state.is_over() {
        return state.evaluate(ai_side);
    }

    let moves = state.legal_moves();
    if moves.is_empty() {
        return state.dead_end(ai_side);
    }

    if state.side_to_move() == ai_side {
        let mut best = f64::NEG_INFINITY;
        for mv in moves {
            let score = minimax(&state.child(mv), depth - 1, alpha, beta, ai_side, nodes);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = f64::INFINITY;
        for mv in moves {
            let score = minimax(&state.child(mv), depth - 1, alpha, beta, ai_side, nodes);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Scores each root move with a full-window search of `depth` plies below
/// it. Scores come back in the order of `moves`.
pub fn score_root_moves<S: SearchState>(state: &S, moves: &[S::Move], depth: u32, ai_side: Color) -> Vec<f64> {
    let scored: Vec<(f64, u64)> = moves
        .par_iter()
        .map(|&mv| {
            let mut nodes = 0;
            let score = minimax(
                &state.child(mv),
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                ai_side,
                &mut nodes,
            );
            (score, nodes)
        })
        .collect();

    let total_nodes: u64 = scored.iter().map(|&(_, nodes)| nodes).sum();
    for (mv, (score, _)) in moves.iter().zip(&scored) {
        debug!("root move {:?} scored {:.2}", mv, score);
    }
    debug!("searched {} nodes at depth {}", total_nodes, depth);

    scored.into_iter().map(|(score, _)| score).collect()
}

/// The first move with the strictly greatest score, so ties keep the
/// earlier move.
pub fn pick_best<M: Copy>(moves: &[M], scores: &[f64]) -> Option<(M, f64)> {
    let mut best: Option<(M, f64)> = None;
    for (&mv, &score) in moves.iter().zip(scores) {
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A toy take-away game: players alternately remove 1 or 2 stones and
    /// whoever takes the last stone wins.
    #[derive(Clone, Copy)]
    struct Stones {
        left: u32,
        to_move: Color,
    }

    impl SearchState for Stones {
        type Move = u32;

        fn side_to_move(&self) -> Color {
            self.to_move
        }

        fn legal_moves(&self) -> Vec<u32> {
            (1..=2).filter(|&n| n <= self.left).collect()
        }

        fn child(&self, take: u32) -> Self {
            Stones { left: self.left - take, to_move: self.to_move.opposite() }
        }

        fn is_over(&self) -> bool {
            false
        }

        fn evaluate(&self, _ai_side: Color) -> f64 {
            0.0
        }

        fn dead_end(&self, ai_side: Color) -> f64 {
            // The previous player took the last stone.
            if self.to_move == ai_side { -1.0 } else { 1.0 }
        }
    }

    #[test]
    fn finds_the_winning_take() {
        // With 4 stones, taking 1 leaves the opponent on a losing multiple of 3.
        let root = Stones { left: 4, to_move: Color::Black };
        let moves = root.legal_moves();
        let scores = score_root_moves(&root, &moves, 6, Color::Black);
        assert_eq!(pick_best(&moves, &scores), Some((1, 1.0)));
    }

    #[test]
    fn ties_keep_the_first_move() {
        assert_eq!(pick_best(&['a', 'b', 'c'], &[1.0, 2.0, 2.0]), Some(('b', 2.0)));
        assert_eq!(pick_best::<char>(&[], &[]), None);
    }

    fn plain_minimax(state: &Stones, depth: u32, ai_side: Color) -> f64 {
        let moves = state.legal_moves();
        if depth == 0 {
            return state.evaluate(ai_side);
        }
        if moves.is_empty() {
            return state.dead_end(ai_side);
        }
        let scores = moves.iter().map(|&mv| plain_minimax(&state.child(mv), depth - 1, ai_side));
        if state.side_to_move() == ai_side {
            scores.fold(f64::NEG_INFINITY, f64::max)
        } else {
            scores.fold(f64::INFINITY, f64::min)
        }
    }

    #[test]
    fn pruning_does_not_change_the_value() {
        for left in 1..=9 {
            let root = Stones { left, to_move: Color::White };
            let mut nodes = 0;
            let pruned = minimax(&root, 10, f64::NEG_INFINITY, f64::INFINITY, Color::White, &mut nodes);
            assert_eq!(pruned, plain_minimax(&root, 10, Color::White), "{left} stones");
            let expected = if left % 3 == 0 { -1.0 } else { 1.0 };
            assert_eq!(pruned, expected);
        }
    }
}
