use super::memory_match as memory_view;
use super::word_jump as jump_view;
use super::{
    layout_metrics, paint, poll_inputs, present, Input, TerminalGuard, GREEN, GREY, PINK, TICK_MS,
    YELLOW,
};
use crate::badges::KNOWN_BADGES;
use crate::error::AppResult;
use crate::games::word_jump::SpawnPolicy;
use crate::games::{create_game, GameData, GameEvent, GameKind, MiniGame};
use crate::progress::ProgressStore;
use crate::scene::SCENES;
use crate::session::Session;
use crate::speech::Speaker;
use crate::words::{Grade, Word};
use crossterm::event::KeyCode;
use std::time::{Duration, Instant};

const HEADER_LINES: usize = 3;
const BODY_LINES: usize = 2;
const FOOTER_LINES: usize = 3;
const BAR_WIDTH: usize = 20;

pub enum Launch
{
    Hunt(Option<Grade>),
    WordJump(String),
    MemoryMatch(Grade),
}

struct Playing
{
    game: MiniGame,
    cursor: usize,
    status: String,
}

enum Screen
{
    Grades,
    Scenes,
    Hunt,
    Popup(Word),
    Playing(Playing),
}

#[derive(PartialEq, Eq)]
enum Flow
{
    Continue,
    Quit,
}

/// Rows and columns of the last drawn play field, for click hit tests.
#[derive(Default, Clone, Copy)]
struct FieldLayout
{
    top: usize,
    left: usize,
    width: usize,
    height: usize,
}

impl FieldLayout
{
    fn locate(&self, column: u16, row: u16) -> Option<(usize, usize)>
    {
        let column = (column as usize).checked_sub(self.left)?;
        let row = (row as usize).checked_sub(self.top)?;
        (column < self.width && row < self.height).then_some((column, row))
    }
}

pub struct App
{
    session: Session,
    store: ProgressStore,
    speaker: Box<dyn Speaker>,
    spawn: SpawnPolicy,
    screen: Screen,
    standalone: bool,
    notice: Option<String>,
    field: FieldLayout,
}

impl App
{
    pub fn new(
        session: Session,
        store: ProgressStore,
        speaker: Box<dyn Speaker>,
        spawn: SpawnPolicy,
    ) -> Self
    {
        Self {
            session,
            store,
            speaker,
            spawn,
            screen: Screen::Grades,
            standalone: false,
            notice: None,
            field: FieldLayout::default(),
        }
    }

    fn launch(&mut self, launch: Launch) -> AppResult<()>
    {
        match launch {
            Launch::Hunt(Some(grade)) => {
                self.session.select_grade(grade);
                self.screen = Screen::Scenes;
            }
            Launch::Hunt(None) => self.screen = Screen::Grades,
            Launch::WordJump(word) => {
                self.standalone = true;
                self.open_game(GameKind::WordJump, GameData::Word(word))?;
            }
            Launch::MemoryMatch(grade) => {
                self.standalone = true;
                self.session.select_grade(grade);
                self.open_game(GameKind::MemoryMatch, GameData::Pairs(grade.words()))?;
            }
        }
        Ok(())
    }

    fn open_game(&mut self, kind: GameKind, data: GameData) -> AppResult<()>
    {
        let game = match create_game(kind.tag(), data, Box::new(self.session.badges()))? {
            MiniGame::WordJump(jump) => MiniGame::WordJump(jump.with_spawn_policy(self.spawn)),
            other => other,
        };
        self.screen = Screen::Playing(Playing {
            game,
            cursor: 0,
            status: "Press Enter to start".to_string(),
        });
        Ok(())
    }

    fn save(&mut self)
    {
        if let Err(err) = self.store.save(&self.session.to_progress()) {
            log::error!("saving progress to {} failed: {err}", self.store.path().display());
            self.notice = Some(format!("Could not save progress: {err}"));
        }
    }

    fn handle(&mut self, input: Input) -> Flow
    {
        if input == Input::Interrupt {
            return Flow::Quit;
        }
        self.notice = None;
        match std::mem::replace(&mut self.screen, Screen::Grades) {
            Screen::Grades => self.on_grades(input),
            Screen::Scenes => self.on_scenes(input),
            Screen::Hunt => self.on_hunt(input),
            Screen::Popup(word) => self.on_popup(word, input),
            Screen::Playing(playing) => self.on_playing(playing, input),
        }
    }

    fn on_grades(&mut self, input: Input) -> Flow
    {
        match input {
            Input::Key(KeyCode::Esc) => return Flow::Quit,
            Input::Key(KeyCode::Char(ch)) => {
                if let Some(grade) = digit(ch).and_then(|n| Grade::ALL.get(n)) {
                    self.session.select_grade(*grade);
                    self.screen = Screen::Scenes;
                    return Flow::Continue;
                }
            }
            _ => {}
        }
        self.screen = Screen::Grades;
        Flow::Continue
    }

    fn on_scenes(&mut self, input: Input) -> Flow
    {
        self.screen = Screen::Scenes;
        match input {
            Input::Key(KeyCode::Esc) => self.screen = Screen::Grades,
            Input::Key(KeyCode::Char(ch)) => {
                if let Some(scene) = digit(ch).and_then(|n| SCENES.get(n)) {
                    self.session.select_scene(scene.id);
                    self.screen = Screen::Hunt;
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn on_hunt(&mut self, input: Input) -> Flow
    {
        self.screen = Screen::Hunt;
        let egg = match input {
            Input::Key(KeyCode::Esc) => {
                self.session.leave_scene();
                self.screen = Screen::Scenes;
                return Flow::Continue;
            }
            Input::Key(KeyCode::Char(ch)) => digit(ch),
            Input::Click { column, row } => self.egg_at(column, row),
            _ => None,
        };
        if let Some(index) = egg {
            self.open_egg(index);
        }
        Flow::Continue
    }

    fn open_egg(&mut self, index: usize)
    {
        match self.session.reveal_egg(index) {
            Some(word) => {
                self.notice = Some(format!("+{} points!", crate::session::EGG_POINTS));
                self.save();
                self.screen = Screen::Popup(word);
            }
            None if self.session.is_found(index) => {
                self.notice = Some("You already opened that egg.".to_string());
            }
            None => {}
        }
    }

    fn egg_at(&self, column: u16, row: u16) -> Option<usize>
    {
        let (column, row) = self.field.locate(column, row)?;
        let scene = self.session.scene()?;
        scene.eggs.iter().position(|spot| {
            let (egg_col, egg_row) = egg_cell(spot.x, spot.y, self.field.width, self.field.height);
            egg_row == row && egg_col.abs_diff(column) <= 1
        })
    }

    fn on_popup(&mut self, word: Word, input: Input) -> Flow
    {
        match input {
            Input::Key(KeyCode::Esc) | Input::Key(KeyCode::Enter) => self.screen = Screen::Hunt,
            Input::Key(KeyCode::Char('s')) => {
                self.speaker.speak(&word.english);
                self.screen = Screen::Popup(word);
            }
            Input::Key(KeyCode::Char('j')) => {
                if let Err(err) = self.open_game(GameKind::WordJump, GameData::Word(word.english)) {
                    self.notice = Some(err.to_string());
                    self.screen = Screen::Hunt;
                }
            }
            Input::Key(KeyCode::Char('m')) => {
                let pairs = self.session.current_words();
                if let Err(err) = self.open_game(GameKind::MemoryMatch, GameData::Pairs(pairs)) {
                    self.notice = Some(err.to_string());
                    self.screen = Screen::Hunt;
                }
            }
            _ => self.screen = Screen::Popup(word),
        }
        Flow::Continue
    }

    fn on_playing(&mut self, mut playing: Playing, input: Input) -> Flow
    {
        if input == Input::Key(KeyCode::Esc) {
            if let MiniGame::MemoryMatch(game) = &mut playing.game {
                game.cancel_pending();
            }
            if self.standalone {
                return Flow::Quit;
            }
            self.screen = Screen::Hunt;
            return Flow::Continue;
        }

        let start_key = matches!(input, Input::Key(KeyCode::Enter) | Input::Key(KeyCode::Char(' ')));
        if start_key && playing.game.start_enabled() {
            playing.game.start();
            playing.status = String::new();
            self.screen = Screen::Playing(playing);
            return Flow::Continue;
        }

        let field = self.field;
        match &mut playing.game {
            MiniGame::WordJump(game) => {
                let token = match input {
                    Input::Key(KeyCode::Char(ch)) if ch.is_alphabetic() => jump_view::token_for_key(game, ch),
                    Input::Click { column, row } => field
                        .locate(column, row)
                        .and_then(|(c, r)| jump_view::token_at(game, field.width, field.height, c, r)),
                    _ => None,
                };
                if let Some(id) = token {
                    game.on_token_clicked(id);
                }
            }
            MiniGame::MemoryMatch(game) => {
                let count = game.tiles().len();
                match input {
                    Input::Key(code @ (KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down)) => {
                        playing.cursor = memory_view::move_cursor(playing.cursor, code, count);
                    }
                    Input::Key(KeyCode::Enter) | Input::Key(KeyCode::Char(' ')) => {
                        game.on_tile_clicked(playing.cursor);
                    }
                    Input::Click { column, row } => {
                        let tile = field
                            .locate(column, row)
                            .and_then(|(c, r)| memory_view::tile_at(c, r, count));
                        if let Some(index) = tile {
                            playing.cursor = index;
                            game.on_tile_clicked(index);
                        }
                    }
                    _ => {}
                }
            }
        }
        self.screen = Screen::Playing(playing);
        Flow::Continue
    }

    fn advance(&mut self, elapsed: Duration)
    {
        let Screen::Playing(playing) = &mut self.screen else {
            return;
        };
        playing.game.advance(elapsed);
        let mut finished = false;
        for event in playing.game.drain_events() {
            log::trace!("{} event: {event:?}", playing.game.kind());
            if let GameEvent::Finished { message, .. } = event {
                playing.status = format!("{message}  Press Enter to play again.");
                finished = true;
            }
        }
        if finished {
            self.save();
        }
    }

    fn draw(&mut self) -> Vec<String>
    {
        let (width, height) = layout_metrics(HEADER_LINES + BODY_LINES, FOOTER_LINES);
        let mut lines = self.header();
        let controls = match &self.screen {
            Screen::Grades => {
                lines.push("Choose your grade:".to_string());
                lines.push(String::new());
                for (n, grade) in Grade::ALL.iter().enumerate() {
                    lines.push(format!("  {}) Grade {}", n + 1, grade.label()));
                }
                "1-3 choose, Esc quit"
            }
            Screen::Scenes => {
                let grade = self.session.grade().map(Grade::label).unwrap_or("?");
                lines.push(format!("Grade {grade} - choose a scene:"));
                lines.push(String::new());
                for (n, scene) in SCENES.iter().enumerate() {
                    lines.push(format!("  {}) {}", n + 1, scene.title));
                }
                "1-3 choose, Esc back"
            }
            Screen::Hunt => {
                let title = self.session.scene().map_or("", |scene| scene.title);
                lines.push(title.to_string());
                lines.push("Find the hidden eggs!".to_string());
                self.field = FieldLayout {
                    top: lines.len(),
                    left: 1,
                    width,
                    height,
                };
                lines.extend(self.render_eggs(width, height));
                "click an egg or press 1-4, Esc back"
            }
            Screen::Popup(word) => {
                lines.push("You found a word!".to_string());
                lines.push(String::new());
                lines.push(format!("    {}", paint(&word.english, YELLOW)));
                lines.push(format!("    {}", word.chinese));
                lines.push(String::new());
                lines.push("  [s] say it   [j] Word Jump   [m] Memory Match".to_string());
                "s speak, j/m mini-game, Enter/Esc close"
            }
            Screen::Playing(playing) => {
                match &playing.game {
                    MiniGame::WordJump(game) => {
                        lines.push(format!("Word Jump   spell: {}", jump_view::spelled_line(game)));
                        lines.push(format!("Score: {}   {}", game.score(), playing.status));
                        self.field = FieldLayout {
                            top: lines.len(),
                            left: 1,
                            width,
                            height,
                        };
                        lines.extend(jump_view::render_field(game, width, height));
                        lines.push(format!("+{}+", "=".repeat(width)));
                    }
                    MiniGame::MemoryMatch(game) => {
                        lines.push("Memory Match".to_string());
                        lines.push(format!(
                            "Pairs: {}/{}   {}",
                            game.matched_count(),
                            game.pairs().len(),
                            playing.status
                        ));
                        self.field = FieldLayout {
                            top: lines.len(),
                            left: 0,
                            width: memory_view::COLUMNS * (memory_view::CARD_WIDTH + 1),
                            height: game.tiles().len().div_ceil(memory_view::COLUMNS)
                                * memory_view::CARD_HEIGHT,
                        };
                        lines.extend(memory_view::render_grid(game, playing.cursor));
                    }
                }
                match playing.game.kind() {
                    GameKind::WordJump => "Enter start, click or type the next letter, Esc leave",
                    GameKind::MemoryMatch => "Enter start/flip, arrows move, click a card, Esc leave",
                }
            }
        };
        lines.push(String::new());
        lines.push(format!("Controls: {controls}, Ctrl-C quit"));
        if let Some(notice) = &self.notice {
            lines.push(paint(notice, PINK));
        }
        lines
    }

    fn header(&self) -> Vec<String>
    {
        let percent = self.session.progress_percent();
        let filled = (percent as usize * BAR_WIDTH / 100).min(BAR_WIDTH);
        let bar = format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled));
        let badges: Vec<String> = KNOWN_BADGES
            .iter()
            .map(|(id, label)| {
                if self.session.badges().contains(id) {
                    paint(&format!("* {label}"), YELLOW)
                } else {
                    paint(&format!("- {label}"), GREY)
                }
            })
            .collect();
        vec![
            "Egg Hunt Words".to_string(),
            format!(
                "Score: {}   Progress: [{bar}] {percent}%   Badges: {}",
                self.session.score(),
                badges.join("  ")
            ),
            String::new(),
        ]
    }

    fn render_eggs(&self, width: usize, height: usize) -> Vec<String>
    {
        let mut rows = vec![vec![" ".to_string(); width]; height];
        if let Some(scene) = self.session.scene() {
            for (index, spot) in scene.eggs.iter().enumerate() {
                let (column, row) = egg_cell(spot.x, spot.y, width, height);
                let (label, color) = if self.session.is_found(index) {
                    ("(.)".to_string(), GREY)
                } else {
                    (format!("({})", index + 1), GREEN)
                };
                let start = column.saturating_sub(1).min(width.saturating_sub(3));
                for (offset, ch) in label.chars().enumerate() {
                    rows[row][start + offset] = paint(&ch.to_string(), color);
                }
            }
        }
        rows.into_iter()
            .map(|cells| format!("|{}|", cells.concat()))
            .chain(std::iter::once(format!("+{}+", "-".repeat(width))))
            .collect()
    }
}

fn digit(ch: char) -> Option<usize>
{
    ch.to_digit(10)
        .and_then(|n| (n as usize).checked_sub(1))
}

fn egg_cell(x: u8, y: u8, width: usize, height: usize) -> (usize, usize)
{
    let column = x as usize * width.saturating_sub(1) / 100;
    let row = y as usize * height.saturating_sub(1) / 100;
    (column, row)
}

pub fn run(mut app: App, launch: Launch) -> AppResult<()>
{
    app.launch(launch)?;
    let mut term = TerminalGuard::enter()?;
    let mut last_frame = Instant::now();
    let mut last_draw: Option<Instant> = None;

    'frames: loop {
        for input in poll_inputs()? {
            if app.handle(input) == Flow::Quit {
                break 'frames;
            }
        }

        let now = Instant::now();
        app.advance(now.saturating_duration_since(last_frame));
        last_frame = now;

        if last_draw.is_none_or(|at| at.elapsed() >= Duration::from_millis(TICK_MS)) {
            let lines = app.draw();
            present(term.stdout(), &lines)?;
            last_draw = Some(Instant::now());
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    app.save();
    Ok(())
}
