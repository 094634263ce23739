use strum::{Display, VariantArray};

/// Number of color units a tube holds.
pub const CAPACITY: usize = 4;

/// Identifier of a paint color. `0` is the background and never a legal paint color.
pub type ColorID = u8;

/// The state of a [`Tube`], derived from its contents on every query.
#[derive(Copy, Clone, Debug, Display, Eq, Hash, PartialEq, VariantArray)]
#[strum(serialize_all = "lowercase")]
pub enum TubeState {
    /// No units at all.
    Empty,
    /// Some room left.
    Regular,
    /// Full, but holding more than one color. Can still donate its top run.
    Filled,
    /// Full of a single color. Out of play.
    Closed,
}

/// A stack of up to [`CAPACITY`] color units, bottom first.
///
/// Unoccupied slots always hold `0`, so two tubes with the same contents compare and [pack](Self::packed) equal.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Tube {
    cells: [ColorID; CAPACITY],
    count: u8,
}

impl Tube {
    /// An empty tube.
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupied cells, bottom first.
    pub fn colors(&self) -> &[ColorID] {
        &self.cells[..self.len()]
    }

    /// Number of occupied cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Whether no cell is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Free cells left.
    #[inline]
    pub fn room(&self) -> usize {
        CAPACITY - self.len()
    }

    /// Color of the highest occupied cell.
    pub fn top_color(&self) -> Option<ColorID> {
        self.colors().last().copied()
    }

    /// # Examples
    /// ```
    /// use decant::tube::{Tube, TubeState};
    ///
    /// let mut tube = Tube::new();
    /// assert_eq!(tube.state(), TubeState::Empty);
    /// (0..4).for_each(|_| { tube.push(7); });
    /// assert_eq!(tube.state(), TubeState::Closed);
    /// ```
    pub fn state(&self) -> TubeState {
        match self.len() {
            0 => TubeState::Empty,
            CAPACITY if self.cells.iter().all(|c| *c == self.cells[0]) => TubeState::Closed,
            CAPACITY => TubeState::Filled,
            _ => TubeState::Regular,
        }
    }

    /// Whether a unit of `color` may be poured on top of this tube.
    pub fn can_accept(&self, color: ColorID) -> bool {
        if color == 0 {
            return false;
        }

        match self.state() {
            TubeState::Empty => true,
            TubeState::Regular => self.top_color() == Some(color),
            TubeState::Filled | TubeState::Closed => false,
        }
    }

    /// Put one unit of `color` on top, ignoring whether it matches the current top.
    ///
    /// Does nothing and returns `false` if the tube is full or `color` is the background.
    pub fn push(&mut self, color: ColorID) -> bool {
        if color == 0 || self.len() == CAPACITY {
            return false;
        }

        self.cells[self.len()] = color;
        self.count += 1;
        true
    }

    /// Take the top unit off, returning its color, or `None` if the tube is empty.
    pub fn pop(&mut self) -> Option<ColorID> {
        if self.is_empty() {
            return None;
        }

        self.count -= 1;
        let color = self.cells[self.len()];
        self.cells[self.len()] = 0;
        Some(color)
    }

    /// Length of the contiguous run of the top color, i.e. the most units one pour can take from this tube.
    /// Zero for an empty tube.
    pub fn top_run_length(&self) -> usize {
        match self.top_color() {
            None => 0,
            Some(top) => self.colors().iter().rev().take_while(|c| **c == top).count(),
        }
    }

    /// Whether the whole content is one run of a single color.
    #[inline]
    pub fn is_uniform(&self) -> bool {
        !self.is_empty() && self.top_run_length() == self.len()
    }

    /// Empty the tube.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// All four cells in one word, cell 0 in the lowest byte.
    #[inline]
    pub fn packed(&self) -> u32 {
        u32::from_le_bytes(self.cells)
    }
}
