//! Greedy line filling

/// Tracks the output column while words are laid down, breaking before any
/// word that would run past the margin.
#[derive(Debug)]
pub struct Line {
    position: usize,
    margin: usize,
    continuation: usize,
    empty: bool,
}

impl Line {
    pub fn new(position: usize, margin: usize, continuation: usize) -> Line {
        Line {
            position,
            margin,
            continuation,
            empty: true,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether a word of this width, preceded by a separator of `gap`
    /// columns, still fits on the current line.
    pub fn fits(&self, gap: usize, width: usize) -> bool {
        self.position + gap + width <= self.margin
    }

    /// Lay down a word that is glued to the preceding content or that starts
    /// the line; it goes on the current line no matter how wide it is.
    pub fn add_atomic(&mut self, width: usize) {
        self.position += width;
        self.empty = false;
    }

    /// Lay down a word preceded by a single space, wrapping first if it will
    /// not fit. Returns true if a break was taken.
    pub fn add_word(&mut self, width: usize) -> bool {
        if !self.empty && !self.fits(1, width) {
            self.wrap_line();
            self.add_atomic(width);
            true
        } else {
            let gap = if self.empty { 0 } else { 1 };
            self.position += gap;
            self.add_atomic(width);
            false
        }
    }

    pub fn wrap_line(&mut self) {
        self.position = self.continuation;
        self.empty = true;
    }
}

/// Decide where a run of words must break. `units` holds the width of each
/// word; the first one is placed at column `start` unconditionally, as is any
/// word wider than the margin on a line of its own. Returns the indices of
/// the words that begin a new line, which is indented to `continuation`.
pub fn wrap(units: &[usize], start: usize, margin: usize, continuation: usize) -> Vec<usize> {
    let mut breaks = Vec::new();

    let mut line = Line::new(start, margin, continuation);
    for (i, width) in units
        .iter()
        .enumerate()
    {
        if i == 0 {
            line.add_atomic(*width);
        } else if line.add_word(*width) {
            breaks.push(i);
        }
    }

    breaks
}
