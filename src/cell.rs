/// The state of a single grid cell.
///
/// A cell never holds more than one character; letters are normalized to ASCII lowercase
/// at parse time.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Cell {
    /// A placed letter.
    Letter(char),
    /// Not part of any word.
    Blocked,
    /// Fillable, no letter yet.
    #[default]
    Empty,
}

impl Cell {
    /// Parse one textual cell marker: `'#'` is [`Blocked`](Self::Blocked), a space is
    /// [`Empty`](Self::Empty), an ASCII letter is [`Letter`](Self::Letter) (lowercased).
    /// Any other marker is treated as blocked.
    pub fn from_marker(marker: char) -> Self {
        match marker {
            ' ' => Self::Empty,
            c if c.is_ascii_alphabetic() => Self::Letter(c.to_ascii_lowercase()),
            _ => Self::Blocked,
        }
    }

    /// The textual marker for this cell, inverse of [`from_marker`](Self::from_marker).
    pub fn marker(&self) -> char {
        match self {
            Self::Letter(c) => *c,
            Self::Blocked => '#',
            Self::Empty => ' ',
        }
    }

    /// Whether this cell may belong to a slot, i.e. is not [`Blocked`](Self::Blocked).
    pub fn is_fillable(&self) -> bool {
        !matches!(self, Self::Blocked)
    }
}
