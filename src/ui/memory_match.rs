use super::{center, paint, GREEN, GREY, YELLOW};
use crate::games::memory_match::{MemoryMatch, Tile};
use crossterm::event::KeyCode;

pub const COLUMNS: usize = 4;
pub const CARD_WIDTH: usize = 16;
pub const CARD_HEIGHT: usize = 3;
const GAP: usize = 1;

/// Tile index under a click relative to the grid's top-left corner.
pub fn tile_at(column: usize, row: usize, tile_count: usize) -> Option<usize>
{
    let stride = CARD_WIDTH + GAP;
    if column % stride >= CARD_WIDTH {
        return None;
    }
    let grid_col = column / stride;
    let grid_row = row / CARD_HEIGHT;
    if grid_col >= COLUMNS {
        return None;
    }
    let index = grid_row * COLUMNS + grid_col;
    (index < tile_count).then_some(index)
}

pub fn move_cursor(cursor: usize, key: KeyCode, tile_count: usize) -> usize
{
    let next = match key {
        KeyCode::Left => cursor.checked_sub(1),
        KeyCode::Right => Some(cursor + 1),
        KeyCode::Up => cursor.checked_sub(COLUMNS),
        KeyCode::Down => Some(cursor + COLUMNS),
        _ => None,
    };
    next.filter(|&index| index < tile_count).unwrap_or(cursor)
}

fn card_face(tile: &Tile) -> String
{
    if tile.is_face_up() {
        center(&tile.text, CARD_WIDTH - 2)
    } else {
        center("?", CARD_WIDTH - 2)
    }
}

pub fn render_grid(game: &MemoryMatch, cursor: usize) -> Vec<String>
{
    let mut lines = Vec::new();
    for (row_index, row) in game.tiles().chunks(COLUMNS).enumerate() {
        let mut top = String::new();
        let mut middle = String::new();
        let mut bottom = String::new();
        for (offset, tile) in row.iter().enumerate() {
            let index = row_index * COLUMNS + offset;
            let edge = "-".repeat(CARD_WIDTH - 2);
            let face = card_face(tile);
            let (border, body) = if index == cursor {
                (paint(&format!("+{edge}+"), YELLOW), paint(&format!("|{face}|"), YELLOW))
            } else if tile.matched {
                (paint(&format!("+{edge}+"), GREEN), paint(&format!("|{face}|"), GREEN))
            } else if tile.flipped {
                (format!("+{edge}+"), format!("|{face}|"))
            } else {
                (paint(&format!("+{edge}+"), GREY), paint(&format!("|{face}|"), GREY))
            };
            top.push_str(&border);
            middle.push_str(&body);
            bottom.push_str(&border);
            top.push_str(&" ".repeat(GAP));
            middle.push_str(&" ".repeat(GAP));
            bottom.push_str(&" ".repeat(GAP));
        }
        lines.push(top);
        lines.push(middle);
        lines.push(bottom);
    }
    lines
}
