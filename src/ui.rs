#![cfg(feature = "std")]

//! Plain-text rendering and coordinate parsing for the CLI driver. Purely a
//! consumer of engine queries; nothing here influences engine state.

use crate::board::Board;
use crate::config::BOARD_SIZE;
use crate::grid::{CellState, TargetCell, TargetView};

fn header() -> String {
    let mut line = String::from("   ");
    for c in 0..BOARD_SIZE {
        line.push(' ');
        line.push((b'A' + c as u8) as char);
    }
    line
}

/// Render the player's own board, ships visible.
pub fn render_own_board(board: &Board) -> String {
    let mut out = header();
    out.push('\n');
    for r in 0..BOARD_SIZE {
        out.push_str(&format!("{:2} ", r + 1));
        for c in 0..BOARD_SIZE {
            let ch = match board.grid().get(r, c).unwrap_or(CellState::Empty) {
                CellState::Empty => '.',
                CellState::Occupied => 'O',
                CellState::Hit => 'X',
                CellState::Miss => 'o',
                CellState::Sunk => '#',
            };
            out.push(' ');
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Render the fog-of-war tracking grid of the opponent's board.
pub fn render_tracking_board(view: &TargetView<BOARD_SIZE>) -> String {
    let mut out = header();
    out.push('\n');
    for r in 0..BOARD_SIZE {
        out.push_str(&format!("{:2} ", r + 1));
        for c in 0..BOARD_SIZE {
            let ch = match view.get(r, c) {
                Ok(TargetCell::Unknown) => '.',
                Ok(TargetCell::Hit) => 'X',
                Ok(TargetCell::Miss) => 'o',
                Ok(TargetCell::Sunk) => '#',
                Err(_) => '?',
            };
            out.push(' ');
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

pub fn coord_to_string(r: usize, c: usize) -> String {
    let col = (b'A' + c as u8) as char;
    format!("{}{}", col, r + 1)
}

/// Parse a coordinate like `B4` into 0-based (row, col).
pub fn parse_coord(input: &str) -> Result<(usize, usize), String> {
    let input = input.trim();
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8).wrapping_sub(b'A') as usize;
    if col >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok((row - 1, col))
}
