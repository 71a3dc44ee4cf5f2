use thiserror::Error;

/// Reasons a FEN string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 2 fields, found {0}")]
    MissingFields(usize),
    #[error("board must have 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} describes {files} files")]
    RankWidth { rank: usize, files: usize },
    #[error("invalid piece character '{0}'")]
    PieceChar(char),
    #[error("invalid pocket character '{0}'")]
    PocketChar(char),
    #[error("more than 62 pieces besides the kings on the board and in hand")]
    PocketOverflow,
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling character '{0}'")]
    CastlingChar(char),
    #[error("invalid en-passant square '{0}'")]
    EnPassant(String),
    #[error("invalid move counter '{0}'")]
    Counter(String),
    #[error("each side needs exactly one king")]
    KingCount,
    #[error("pawn on the first or last rank")]
    PawnOnBackRank,
}

/// Reasons a move in coordinate notation is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move text '{0}' has the wrong length")]
    Length(String),
    #[error("invalid square in '{0}'")]
    Square(String),
    #[error("invalid piece letter in '{0}'")]
    Piece(String),
    #[error("'{0}' is not legal in this position")]
    Illegal(String),
    #[error(transparent)]
    Fen(#[from] FenError),
}
