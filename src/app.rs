use crate::config::Config;
use crate::game::Game;
use crate::help::HelpScreen;
use crate::menu::MainMenu;
use crate::save::HighScores;
use ratatui::{backend::Backend, Terminal};
use std::io;

/// State shared by every screen: the loaded configuration and the persisted
/// top-5 score list
#[derive(Clone, Debug, Default)]
pub(crate) struct Globals {
    pub(crate) config: Config,
    pub(crate) high_scores: HighScores,
}

#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: Screen,
}

impl App {
    pub(crate) fn new(globals: Globals) -> App {
        let screen = Screen::Menu(MainMenu::new(globals));
        App { screen }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Menu(ref menu) => {
                terminal.draw(|frame| menu.draw(frame))?;
            }
            Screen::Help(ref help) => {
                terminal.draw(|frame| help.draw(frame))?;
            }
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        match self.screen {
            Screen::Menu(ref mut menu) => {
                if let Some(screen) = menu.process_input()? {
                    self.screen = screen;
                }
            }
            Screen::Help(ref mut help) => {
                if let Some(screen) = help.process_input()? {
                    self.screen = screen;
                }
            }
            Screen::Game(ref mut game) => {
                if let Some(screen) = game.process_input()? {
                    self.screen = screen;
                }
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Menu(MainMenu),
    Help(HelpScreen),
    Game(Game),
    Quit,
}
