//! Terminal output and keyboard input.
//!
//! Drawing goes through crossterm commands queued on any `Write`, so a frame can be
//! rendered into a buffer as easily as onto stdout. Keys are read one at a time with
//! the terminal in raw mode; raw mode is switched off again before `next_command`
//! returns, whatever the outcome.
use crate::error::GameError;
use crate::moves::MoveDirection;
use crate::presenter::{CliRenderData, TilePalette};
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use std::io::{self, Write};

/// What the player asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    Move(MoveDirection),
    /// Ctrl+C, Esc or `q`: leave the game.
    Quit,
}

/// Shows frames to the player and collects their commands.
pub trait View {
    type Data;

    fn display(&mut self, data: &Self::Data) -> Result<(), GameError>;

    /// Blocks until the player gives a valid command. Other keys are ignored.
    fn next_command(&mut self) -> Result<PlayerCommand, GameError>;
}

/// Maps a key press to a command, or `None` for keys the game does not use.
pub fn command_for_key(key: &KeyEvent) -> Option<PlayerCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(PlayerCommand::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') => Some(PlayerCommand::Move(MoveDirection::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(PlayerCommand::Move(MoveDirection::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(PlayerCommand::Move(MoveDirection::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(PlayerCommand::Move(MoveDirection::Right)),
        KeyCode::Esc | KeyCode::Char('q') => Some(PlayerCommand::Quit),
        _ => None,
    }
}

/// Keeps the terminal in raw mode for as long as it lives.
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// The three text rows that make up one tile box.
#[derive(Clone, Copy, Debug)]
enum TilePart {
    Top,
    Middle,
    Bottom,
}

impl TilePart {
    const ALL: [TilePart; 3] = [TilePart::Top, TilePart::Middle, TilePart::Bottom];

    fn render(self, text: &str, width: usize) -> String {
        match self {
            TilePart::Top => format!("┌{}┐", "─".repeat(width)),
            TilePart::Middle => format!("│{:^width$}│", text, width = width),
            TilePart::Bottom => format!("└{}┘", "─".repeat(width)),
        }
    }
}

/// Draws the board as coloured boxes inside a border.
pub struct CliView<W: Write> {
    out: W,
    border_color: Color,
}

impl CliView<io::Stdout> {
    pub fn stdout() -> Self {
        CliView::new(io::stdout())
    }
}

impl<W: Write> CliView<W> {
    pub fn new(out: W) -> Self {
        CliView {
            out,
            border_color: Color::Grey,
        }
    }

    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    /// Gives back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_border(&mut self, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(self.border_color),
            Print(text),
            ResetColor
        )
    }

    fn print_tile(&mut self, text: &str, palette: TilePalette, part: TilePart, width: usize) -> io::Result<()> {
        if text.is_empty() {
            return queue!(self.out, Print(" ".repeat(width + 2)));
        }
        queue!(self.out, SetAttribute(Attribute::Bold))?;
        if let Some(bg) = palette.background {
            queue!(self.out, SetBackgroundColor(Color::AnsiValue(bg)))?;
        }
        if let Some(fg) = palette.foreground {
            queue!(self.out, SetForegroundColor(Color::AnsiValue(fg)))?;
        }
        queue!(
            self.out,
            Print(part.render(text, width)),
            SetAttribute(Attribute::Reset),
            ResetColor
        )
    }
}

impl<W: Write> View for CliView<W> {
    type Data = CliRenderData;

    /// Clears the screen and draws message, score and board.
    fn display(&mut self, data: &CliRenderData) -> Result<(), GameError> {
        let width = data.tile_width;
        let inner = data.tiles.len() * (width + 2);

        queue!(
            self.out,
            Clear(ClearType::All),
            MoveTo(0, 0),
            Print(&data.message),
            Print("\r\n"),
            Print(&data.score),
            Print("\r\n")
        )?;
        self.print_border(&format!("┌{}┐", "─".repeat(inner)))?;
        queue!(self.out, Print("\r\n"))?;

        for (row, colors) in data.tiles.iter().zip(&data.tile_colors) {
            for part in TilePart::ALL {
                self.print_border("│")?;
                for (text, palette) in row.iter().zip(colors) {
                    self.print_tile(text, *palette, part, width)?;
                }
                self.print_border("│")?;
                queue!(self.out, Print("\r\n"))?;
            }
        }

        self.print_border(&format!("└{}┘", "─".repeat(inner)))?;
        queue!(self.out, Print("\r\n"))?;
        self.out.flush()?;
        Ok(())
    }

    fn next_command(&mut self) -> Result<PlayerCommand, GameError> {
        let _raw = RawModeGuard::enter()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(command) = command_for_key(&key) {
                    return Ok(command);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;
    use crate::presenter::{CliPresenter, Presenter};
    use crate::utils::board_from_str_array;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render(rows: &[&str], width: usize) -> String {
        let board = board_from_str_array(rows).unwrap();
        let state = GameState::new(board.snapshot(), 36, None);
        let data = CliPresenter::new(width).unwrap().present(&state);
        let mut view = CliView::new(Vec::new());
        view.display(&data).unwrap();
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn test_arrow_keys_map_to_moves() {
        assert_eq!(command_for_key(&key(KeyCode::Up)), Some(PlayerCommand::Move(MoveDirection::Up)));
        assert_eq!(command_for_key(&key(KeyCode::Down)), Some(PlayerCommand::Move(MoveDirection::Down)));
        assert_eq!(command_for_key(&key(KeyCode::Left)), Some(PlayerCommand::Move(MoveDirection::Left)));
        assert_eq!(command_for_key(&key(KeyCode::Right)), Some(PlayerCommand::Move(MoveDirection::Right)));
        assert_eq!(command_for_key(&key(KeyCode::Char('a'))), Some(PlayerCommand::Move(MoveDirection::Left)));
    }

    #[test]
    fn test_quit_keys() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for_key(&ctrl_c), Some(PlayerCommand::Quit));
        assert_eq!(command_for_key(&key(KeyCode::Esc)), Some(PlayerCommand::Quit));
        assert_eq!(command_for_key(&key(KeyCode::Char('q'))), Some(PlayerCommand::Quit));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(command_for_key(&key(KeyCode::Enter)), None);
        assert_eq!(command_for_key(&key(KeyCode::Char('x'))), None);
        // Plain 'c' is not an interrupt.
        assert_eq!(command_for_key(&key(KeyCode::Char('c'))), None);

        let mut release = key(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(command_for_key(&release), None);
    }

    #[test]
    fn test_display_draws_message_score_and_tiles() {
        let out = render(&["2 . . .", ". 2048 . .", ". . . .", ". . . ."], 6);

        assert!(out.contains("Merge the tiles and reach 2048!"));
        assert!(out.contains("Score: 36"));
        assert!(out.contains("│  2   │"));
        assert!(out.contains("│ 2048 │"));
        assert!(out.contains("┌──────┐"));
        assert!(out.contains(&format!("┌{}┐", "─".repeat(4 * 8))));
        assert!(out.contains(&format!("└{}┘", "─".repeat(4 * 8))));
    }

    #[test]
    fn test_display_draws_three_lines_per_row() {
        let out = render(&[". . . .", ". . . .", ". . . .", ". . . ."], 4);
        // Header, footer, message, score and 4 rows of 3 lines each.
        assert_eq!(out.matches("\r\n").count(), 2 + 2 + 4 * 3);
        // Empty cells are blank, so no tile boxes are drawn.
        assert!(!out.contains("┌────┐"));
    }
}
