use super::{paint, Rgb, GREEN, PINK, RED, YELLOW};
use crate::games::word_jump::{Token, WordJump};

pub fn token_cell(game: &WordJump, token: &Token, width: usize, height: usize) -> (usize, usize)
{
    let floor = game.play_area().floor().max(1.0);
    let column = (token.x / 100.0 * width.saturating_sub(1) as f32).round() as usize;
    let row = (token.y / floor * height.saturating_sub(1) as f32).round() as usize;
    (column.min(width.saturating_sub(1)), row.min(height.saturating_sub(1)))
}

/// The token under a click, allowing one cell of slack around each letter.
pub fn token_at(game: &WordJump, width: usize, height: usize, column: usize, row: usize) -> Option<u32>
{
    game.tokens()
        .iter()
        .filter_map(|token| {
            let (col, r) = token_cell(game, token, width, height);
            let distance = col.abs_diff(column) + r.abs_diff(row);
            (col.abs_diff(column) <= 1 && r.abs_diff(row) <= 1).then_some((distance, token.id))
        })
        .min()
        .map(|(_, id)| id)
}

/// Typing a letter picks the lowest falling token that carries it.
pub fn token_for_key(game: &WordJump, ch: char) -> Option<u32>
{
    let wanted = ch.to_lowercase().next()?;
    game.tokens()
        .iter()
        .filter(|token| token.glyph.to_lowercase().next() == Some(wanted))
        .max_by(|a, b| a.y.total_cmp(&b.y))
        .map(|token| token.id)
}

pub fn spelled_line(game: &WordJump) -> String
{
    let mut line = String::new();
    for (index, ch) in game.target_word().chars().enumerate() {
        let text = ch.to_string();
        if index < game.progress() {
            line.push_str(&paint(&text, GREEN));
        } else if index == game.progress() && game.is_running() {
            line.push_str(&paint(&text, YELLOW));
        } else {
            line.push_str(&text);
        }
        line.push(' ');
    }
    line
}

pub fn render_field(game: &WordJump, width: usize, height: usize) -> Vec<String>
{
    let mut grid: Vec<Vec<Option<(char, Rgb)>>> = vec![vec![None; width]; height];
    let danger_row = height.saturating_sub(height / 5).max(1);
    for token in game.tokens() {
        let (column, row) = token_cell(game, token, width, height);
        let color = if row >= danger_row { RED } else { PINK };
        grid[row][column] = Some((token.glyph, color));
    }

    grid.into_iter()
        .map(|cells| {
            let mut line = String::from("|");
            for cell in cells {
                match cell {
                    Some((glyph, color)) => line.push_str(&paint(&glyph.to_string(), color)),
                    None => line.push(' '),
                }
            }
            line.push('|');
            line
        })
        .collect()
}
