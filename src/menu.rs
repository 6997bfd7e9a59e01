use crate::app::{Globals, Screen};
use crate::command::Command;
use crate::consts;
use crate::game::Game;
use crate::help::HelpScreen;
use crate::save::{LoadError, SaveState};
use crate::util::get_display_area;
use crossterm::event::{read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::Widget,
    Frame,
};
use std::io;

/// The title screen: start a run, continue a saved one, read the
/// instructions, or quit.
#[derive(Clone, Debug)]
pub(crate) struct MainMenu {
    globals: Globals,
    selection: Selection,
    /// Shown under the buttons when continuing a saved game failed
    warning: Option<String>,
}

impl MainMenu {
    pub(crate) fn new(globals: Globals) -> MainMenu {
        MainMenu {
            globals,
            selection: Selection::default(),
            warning: None,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        match cmd {
            Command::Quit | Command::Q | Command::Esc => return Some(Screen::Quit),
            Command::NewGame => {
                return Some(Screen::Game(Game::new(self.globals.clone())));
            }
            Command::Help => {
                return Some(Screen::Help(HelpScreen::new(self.globals.clone())));
            }
            Command::Up => self.selection = self.selection.prev(),
            Command::Down => self.selection = self.selection.next(),
            Command::Enter => return self.activate(),
            _ => (),
        }
        None
    }

    fn activate(&mut self) -> Option<Screen> {
        match self.selection {
            Selection::NewGame => Some(Screen::Game(Game::new(self.globals.clone()))),
            Selection::Continue => self.continue_game(),
            Selection::Help => Some(Screen::Help(HelpScreen::new(self.globals.clone()))),
            Selection::Quit => Some(Screen::Quit),
        }
    }

    /// Restore the saved game.  On failure the menu stays up and shows what
    /// went wrong.
    fn continue_game(&mut self) -> Option<Screen> {
        let restored = self
            .globals
            .config
            .save_file()
            .ok_or(LoadError::NoPath)
            .and_then(|path| SaveState::read(&path))
            .and_then(|state| Game::from_save(self.globals.clone(), &state));
        match restored {
            Ok(game) => Some(Screen::Game(game)),
            Err(e) => {
                self.warning = Some(format!("Cannot continue: {e}"));
                None
            }
        }
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, newgame_area, continue_area, help_area, quit_area, warning_area] =
            Layout::vertical([Logo::HEIGHT, 1, 1, 1, 1, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        button("New Game", Some("n"), self.selection == Selection::NewGame)
            .render(newgame_area, buf);
        button("Continue", None, self.selection == Selection::Continue)
            .render(continue_area, buf);
        button("How to Play", Some("?"), self.selection == Selection::Help)
            .render(help_area, buf);
        button("Quit", Some("q"), self.selection == Selection::Quit).render(quit_area, buf);

        if let Some(ref warning) = self.warning {
            Line::styled(warning.clone(), consts::NOTICE_STYLE)
                .centered()
                .render(warning_area, buf);
        }
    }
}

fn button(label: &str, key: Option<&str>, selected: bool) -> Line<'static> {
    let style = if selected {
        consts::MENU_SELECTION_STYLE
    } else {
        Style::new()
    };
    let line = match key {
        Some(key) => Line::from_iter([
            Span::styled(format!("[{label} ("), style),
            Span::styled(key.to_owned(), consts::KEY_STYLE.patch(style)),
            Span::styled(")]", style),
        ]),
        None => Line::styled(format!("[{label}]"), style),
    };
    line.centered()
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Selection {
    #[default]
    NewGame,
    Continue,
    Help,
    Quit,
}

impl Selection {
    fn next(self) -> Selection {
        match self {
            Selection::NewGame => Selection::Continue,
            Selection::Continue => Selection::Help,
            Selection::Help => Selection::Quit,
            Selection::Quit => Selection::NewGame,
        }
    }

    fn prev(self) -> Selection {
        match self {
            Selection::NewGame => Selection::Quit,
            Selection::Continue => Selection::NewGame,
            Selection::Help => Selection::Continue,
            Selection::Quit => Selection::Help,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Logo;

impl Logo {
    const BOOM_WIDTH: u16 = 32;
    const SLANG_WIDTH: u16 = 29;
    const HEIGHT: u16 = 6;
    const WIDTH: u16 = Self::BOOM_WIDTH + Self::SLANG_WIDTH;

    #[rustfmt::skip]
    const BOOM: [&'static str; Self::HEIGHT as usize] = [
         " ____                           ",
         "| __ )   ___    ___   _ __ ___  ",
        r"|  _ \  / _ \  / _ \ | '_ ` _ \ ",
         "| |_) || (_) || (_) || | | | | |",
        r"|____/  \___/  \___/ |_| |_| |_|",
         "                                ",
    ];

    #[rustfmt::skip]
    const SLANG: [&'static str; Self::HEIGHT as usize] = [
         "      _                      ",
         " ___ | |  __ _  _ __    __ _ ",
        r"/ __|| | / _` || '_ \  / _` |",
        r"\__ \| || (_| || | | || (_| |",
        r"|___/|_| \__,_||_| |_| \__, |",
         "                       |___/ ",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [boom_area, slang_area] = Layout::horizontal([Self::BOOM_WIDTH, Self::SLANG_WIDTH])
            .flex(Flex::Start)
            .areas(area);
        Text::from_iter(Self::BOOM)
            .style(consts::BOOM_STYLE)
            .render(boom_area, buf);
        Text::from_iter(Self::SLANG)
            .style(consts::SNAKE_STYLE)
            .render(slang_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::KeyCode;
    use std::io::Write;

    fn key(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut menu = MainMenu::new(Globals::default());
        assert_eq!(menu.selection, Selection::NewGame);
        menu.handle_event(key(KeyCode::Up));
        assert_eq!(menu.selection, Selection::Quit);
        menu.handle_event(key(KeyCode::Down));
        assert_eq!(menu.selection, Selection::NewGame);
        menu.handle_event(key(KeyCode::Down));
        assert_eq!(menu.selection, Selection::Continue);
    }

    #[test]
    fn new_game_hotkey() {
        let mut menu = MainMenu::new(Globals::default());
        assert!(matches!(
            menu.handle_event(key(KeyCode::Char('n'))),
            Some(Screen::Game(_))
        ));
    }

    #[test]
    fn quit_from_anywhere() {
        let mut menu = MainMenu::new(Globals::default());
        assert!(matches!(
            menu.handle_event(key(KeyCode::Char('q'))),
            Some(Screen::Quit)
        ));
        assert!(matches!(
            menu.handle_event(key(KeyCode::Esc)),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn continue_without_save_warns() {
        let dir = tempfile::tempdir().unwrap();
        let save = dir.path().join("savegame.json");
        let mut cfgfile = tempfile::NamedTempFile::new().unwrap();
        writeln!(cfgfile, "[files]\nsave-file = {:?}", save).unwrap();
        let config = Config::load(cfgfile.path()).unwrap();
        let mut menu = MainMenu::new(Globals {
            config,
            ..Globals::default()
        });
        menu.selection = Selection::Continue;
        assert!(menu.handle_event(key(KeyCode::Enter)).is_none());
        assert!(menu.warning.as_ref().is_some_and(|w| w.starts_with("Cannot continue")));
    }

    #[test]
    fn continue_with_save_restores_game() {
        let dir = tempfile::tempdir().unwrap();
        let save = dir.path().join("savegame.json");
        SaveState {
            snake_body: vec![[5, 10], [4, 10], [3, 10]],
            snake_direction: [1, 0],
            fruit_position: [6, 10],
            big_fruit_position: None,
            boom_position: None,
            power_position: None,
            score: 7,
        }
        .write(&save)
        .unwrap();
        let mut cfgfile = tempfile::NamedTempFile::new().unwrap();
        writeln!(cfgfile, "[files]\nsave-file = {:?}", save).unwrap();
        let config = Config::load(cfgfile.path()).unwrap();
        let mut menu = MainMenu::new(Globals {
            config,
            ..Globals::default()
        });
        menu.selection = Selection::Continue;
        assert!(matches!(
            menu.handle_event(key(KeyCode::Enter)),
            Some(Screen::Game(_))
        ));
        assert_eq!(menu.warning, None);
    }

    #[test]
    fn boom_width() {
        assert!(Logo::BOOM
            .iter()
            .all(|ln| ln.len() == usize::from(Logo::BOOM_WIDTH)));
    }

    #[test]
    fn slang_width() {
        assert!(Logo::SLANG
            .iter()
            .all(|ln| ln.len() == usize::from(Logo::SLANG_WIDTH)));
    }

    #[test]
    fn render_smoke() {
        let menu = MainMenu::new(Globals::default());
        let area = Rect::new(0, 0, 80, 26);
        let mut buffer = Buffer::empty(area);
        (&menu).render(area, &mut buffer);
        let content = buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect::<String>();
        assert!(content.contains("[New Game ("));
        assert!(content.contains("[Continue]"));
        assert!(content.contains("[Quit ("));
    }
}
