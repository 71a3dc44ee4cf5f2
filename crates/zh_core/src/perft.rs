use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Pure perft node count, drops included.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(pos: &mut Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        legal_moves_into(pos, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            pos.make_move(mv);
            nodes += inner(pos, depth - 1, rest);
            pos.unmake_move(mv);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(128); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Per-move node counts at the root, sorted by move text.
pub fn perft_divide(pos: &mut Position, depth: u8) -> Vec<(String, u64)> {
    let mut out: Vec<(String, u64)> = crate::movegen::legal_moves(pos)
        .into_iter()
        .map(|mv| {
            pos.make_move(mv);
            let n = perft(pos, depth.saturating_sub(1));
            pos.unmake_move(mv);
            (crate::uci::move_to_uci(mv), n)
        })
        .collect();
    out.sort();
    out
}
