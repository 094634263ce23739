use crate::board::Board;
use crate::tube::{ColorID, Tube, CAPACITY};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BuilderInvalidReason {
    /// A tube was given more units than a tube can hold.
    #[error("tube {tube} holds {len} units, more than fit")]
    TubeOverCapacity {
        /// Index the offending tube would have had.
        tube: usize,
        /// Units it was given.
        len: usize,
    },
    /// A tube was given color 0, which marks an empty slot and cannot be poured.
    #[error("tube {tube} has the background color at slot {slot}")]
    BackgroundColor {
        /// Index the offending tube would have had.
        tube: usize,
        /// Slot of the first background unit, counted from the bottom.
        slot: usize,
    },
}

/// Assembles a [`Board`] one tube at a time.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug, Default)]
pub struct BoardBuilder {
    tubes: Vec<Tube>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl BoardBuilder {
    /// A builder with no tubes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for [`Self::new`] followed by [`Self::add_tube`] for every item of `tubes`.
    pub fn with_tubes<'a>(tubes: impl IntoIterator<Item=&'a [ColorID]>) -> Self {
        let mut builder = Self::new();
        for colors in tubes {
            builder.add_tube(colors);
        }
        builder
    }

    /// Add a tube holding `colors`, bottom unit first.
    ///
    /// May cause the builder to enter a [`TubeOverCapacity`](BuilderInvalidReason::TubeOverCapacity) invalid state if `colors` does not fit in a tube,
    /// or a [`BackgroundColor`](BuilderInvalidReason::BackgroundColor) invalid state if any of `colors` is 0.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_tube(&mut self, colors: &[ColorID]) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let tube = self.tubes.len();
        if colors.len() > CAPACITY {
            self.invalid_reasons.push(BuilderInvalidReason::TubeOverCapacity { tube, len: colors.len() });
            return self;
        }

        if let Some(slot) = colors.iter().position(|color| *color == 0) {
            self.invalid_reasons.push(BuilderInvalidReason::BackgroundColor { tube, slot });
            return self;
        }

        let mut filled = Tube::new();
        colors.iter().for_each(|color| { filled.push(*color); });
        self.tubes.push(filled);

        self
    }

    /// Add `count` empty tubes.
    ///
    /// If the builder is in an invalid state, this function does nothing.
    pub fn add_empty_tubes(&mut self, count: usize) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.tubes.extend(std::iter::repeat(Tube::new()).take(count));
        self
    }

    /// Remove the most recently added tube.
    ///
    /// If the builder is in an invalid state or no tubes are present, this function does nothing.
    pub fn pop_tube(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.tubes.pop();
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Board, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        Ok(Board::from_tubes(self.tubes.clone()))
    }
}
