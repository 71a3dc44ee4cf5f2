#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds that can sit in a pocket and be dropped.
    pub const DROPPABLE: [PieceKind; 5] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    /// Promotion targets in encoding order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    #[inline(always)]
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn from_idx(i: usize) -> Option<PieceKind> {
        PieceKind::ALL.get(i).copied()
    }

    /// Lowercase letter used in FEN, UCI promotions and pockets.
    pub fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN letter: uppercase for White.
    pub fn to_char(self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { color, kind })
    }
}

/// How a piece on the board came to be there. A promoted piece returns to
/// the capturer's pocket as a pawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    #[default]
    Native,
    Promoted,
}

/// A board square's content: the piece plus its origin tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub piece: Piece,
    pub origin: Origin,
}

impl Occupant {
    pub fn native(piece: Piece) -> Self {
        Self {
            piece,
            origin: Origin::Native,
        }
    }

    /// The kind that goes into the capturer's pocket.
    pub fn pocket_kind(self) -> PieceKind {
        match self.origin {
            Origin::Promoted => PieceKind::Pawn,
            Origin::Native => self.piece.kind,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Quiet,
    DoublePush,
    CastleKing,
    CastleQueen,
    Capture,
    EnPassant,
    Promotion(PieceKind),
    PromotionCapture(PieceKind),
    Drop(PieceKind),
}

/// A move. Drops carry `from == to`. The null move is `Option::<Move>::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: u8, // 0..63
    pub to: u8,   // 0..63
    pub kind: MoveKind,
}

impl Move {
    pub fn new(from: u8, to: u8) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Quiet,
        }
    }

    pub fn with_kind(from: u8, to: u8, kind: MoveKind) -> Self {
        Self { from, to, kind }
    }

    pub fn drop(kind: PieceKind, to: u8) -> Self {
        Self {
            from: to,
            to,
            kind: MoveKind::Drop(kind),
        }
    }

    #[inline]
    pub fn is_capture(self) -> bool {
        matches!(
            self.kind,
            MoveKind::Capture | MoveKind::EnPassant | MoveKind::PromotionCapture(_)
        )
    }

    #[inline]
    pub fn is_drop(self) -> bool {
        matches!(self.kind, MoveKind::Drop(_))
    }

    pub fn promotion(self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion(k) | MoveKind::PromotionCapture(k) => Some(k),
            _ => None,
        }
    }

    pub fn dropped(self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Drop(k) => Some(k),
            _ => None,
        }
    }
}

// Helpers
pub const fn file_of(sq: u8) -> i8 {
    (sq % 8) as i8
}
pub const fn rank_of(sq: u8) -> i8 {
    (sq / 8) as i8
}
pub fn sq(file: i8, rank: i8) -> Option<u8> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some((rank as u8) * 8 + (file as u8))
    } else {
        None
    }
}

/// Rank counted from `c`'s own back rank (0..7).
pub fn relative_rank(c: Color, sq: u8) -> i8 {
    match c {
        Color::White => rank_of(sq),
        Color::Black => 7 - rank_of(sq),
    }
}

/// Flip a square vertically (a1 <-> a8).
#[inline(always)]
pub const fn mirror(sq: u8) -> u8 {
    sq ^ 56
}

pub fn sq_to_coord(sq: u8) -> String {
    let f = (b'a' + (sq % 8)) as char;
    let r = (b'1' + (sq / 8)) as char;
    format!("{f}{r}")
}

pub fn coord_to_sq(c: &str) -> Option<u8> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    let file = f - b'a';
    let rank = r - b'1';
    Some(rank * 8 + file)
}
