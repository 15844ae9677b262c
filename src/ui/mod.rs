pub mod hunt;
pub mod memory_match;
pub mod word_jump;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;

pub const TICK_MS: u64 = 33;

pub struct TerminalGuard
{
    stdout: Stdout,
}

impl TerminalGuard
{
    pub fn enter() -> io::Result<Self>
    {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(Self { stdout })
    }

    pub fn stdout(&mut self) -> &mut Stdout
    {
        &mut self.stdout
    }
}

impl Drop for TerminalGuard
{
    fn drop(&mut self)
    {
        let _ = execute!(self.stdout, Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Input
{
    Key(KeyCode),
    Click
    {
        column: u16,
        row: u16,
    },
    Interrupt,
}

pub fn poll_inputs() -> io::Result<Vec<Input>>
{
    let mut inputs = Vec::new();
    while event::poll(Duration::from_millis(0))? {
        match event::read()? {
            Event::Key(KeyEvent {
                code, modifiers, kind, ..
            }) => {
                if kind == KeyEventKind::Release {
                    continue;
                }
                if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                    inputs.push(Input::Interrupt);
                } else {
                    inputs.push(Input::Key(code));
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => inputs.push(Input::Click { column, row }),
            _ => {}
        }
    }
    Ok(inputs)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb
{
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const GREEN: Rgb = Rgb { r: 0, g: 200, b: 0 };
pub const YELLOW: Rgb = Rgb { r: 255, g: 215, b: 0 };
pub const RED: Rgb = Rgb { r: 230, g: 40, b: 40 };
pub const PINK: Rgb = Rgb { r: 255, g: 150, b: 190 };
pub const GREY: Rgb = Rgb { r: 120, g: 120, b: 120 };

pub fn paint(text: &str, color: Rgb) -> String
{
    format!("\x1b[38;2;{};{};{}m{}\x1b[0m", color.r, color.g, color.b, text)
}

/// Terminal columns taken by `text`; CJK and full-width forms take two.
pub fn display_width(text: &str) -> usize
{
    text.chars().map(char_width).sum()
}

fn char_width(ch: char) -> usize
{
    match ch as u32 {
        0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60 => 2,
        _ => 1,
    }
}

/// Centers `text` in `width` columns, truncating what does not fit.
pub fn center(text: &str, width: usize) -> String
{
    let fitted: String = text
        .chars()
        .scan(0, |used, ch| {
            *used += char_width(ch);
            (*used <= width).then_some(ch)
        })
        .collect();
    let used = display_width(&fitted);
    let left = (width - used) / 2;
    let right = width - used - left;
    format!("{}{}{}", " ".repeat(left), fitted, " ".repeat(right))
}

pub fn layout_metrics(header_lines: usize, footer_lines: usize) -> (usize, usize)
{
    let (cols, rows) = terminal::size().unwrap_or((80, 24));
    let extra = header_lines + footer_lines;
    let height = (rows as usize).saturating_sub(extra).clamp(8, 22);
    let width = (cols as usize).saturating_sub(2).clamp(20, 100);
    (width, height)
}

pub fn present(stdout: &mut Stdout, lines: &[String]) -> io::Result<()>
{
    let output = format!("{}\r\n", lines.join("\r\n"));
    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
    stdout.write_all(output.as_bytes())?;
    stdout.flush()
}
