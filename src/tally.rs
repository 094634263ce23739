use std::ops::Index;

use crate::tube::{ColorID, Tube, TubeState};

/// How many units of each color sit exposed at the top of some tube, counting whole top runs.
///
/// Built fresh for every round of move generation and only used for ranking.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColorTally {
    counts: Vec<usize>,
}

impl ColorTally {
    /// Tally the top runs of every [`Regular`](TubeState::Regular) or [`Filled`](TubeState::Filled) tube.
    pub fn from_tubes(tubes: &[Tube]) -> Self {
        let palette = tubes.iter()
            .flat_map(|tube| tube.colors())
            .max()
            .map_or(0, |max| *max as usize + 1);

        let mut counts = vec![0; palette];
        for tube in tubes.iter().filter(|tube| matches!(tube.state(), TubeState::Regular | TubeState::Filled)) {
            if let Some(top) = tube.top_color() {
                counts[top as usize] += tube.top_run_length();
            }
        }

        Self { counts }
    }

    /// Exposed units of `color`; zero for colors outside the palette.
    pub fn get(&self, color: ColorID) -> usize {
        self.counts.get(color as usize).copied().unwrap_or(0)
    }

    /// Number of color slots, background included.
    pub fn palette_size(&self) -> usize {
        self.counts.len()
    }
}

impl Index<ColorID> for ColorTally {
    type Output = usize;

    fn index(&self, color: ColorID) -> &Self::Output {
        &self.counts[color as usize]
    }
}
