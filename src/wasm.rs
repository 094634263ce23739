use std::num::NonZero;

use itertools::Itertools;
use wasm_bindgen::prelude::*;

use crate::board::Board;
use crate::builder::BoardBuilder;
use crate::config::{ConfigError, SolverConfig};
use crate::moves::Pour;
use crate::solver::Solver;
use crate::tube::{ColorID, CAPACITY};

/// Read a board from `CAPACITY` cells per tube, bottom first, 0 for an empty slot.
pub(crate) fn board_from_cells(cells: &[ColorID]) -> Result<Board, ConfigError> {
    if cells.len() % CAPACITY != 0 {
        return Err(ConfigError::RaggedCells(cells.len()));
    }

    let tubes = cells.chunks(CAPACITY)
        .map(|tube| {
            let len = tube.iter().rposition(|color| *color != 0).map_or(0, |top| top + 1);
            &tube[..len]
        })
        .collect_vec();

    BoardBuilder::with_tubes(tubes)
        .build()
        .map_err(|reasons| ConfigError::InvalidBoard(reasons.clone()))
}

/// `from, to, count, color` for every pour.
pub(crate) fn flatten_pours(pours: &[Pour]) -> Vec<u32> {
    pours.iter()
        .flat_map(|pour| [pour.from as u32, pour.to as u32, pour.count as u32, pour.color as u32])
        .collect()
}

/// Solve a board given as a flat array of 4 cells per tube, bottom first, 0 for an empty slot.
///
/// Returns 4 numbers per pour: donor index, recipient index, units moved, color.
/// Throws if the cells do not make a board or no solution was found.
#[wasm_bindgen(js_name = solveCells)]
pub fn solve_cells(cells: &[u8], break_limit: Option<u32>) -> Result<Vec<u32>, JsValue> {
    let board = board_from_cells(cells).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let mut solver = Solver::new(SolverConfig { break_limit: break_limit.and_then(NonZero::new) });

    solver.solve(board)
        .map(|solution| flatten_pours(&solution.pours))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
