use crate::app::{Globals, Screen};
use crate::command::Command;
use crate::consts;
use crate::menu::MainMenu;
use crate::util::{center_rect, get_display_area};
use crossterm::event::{read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    text::{Line, Span, Text},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};
use std::io;

/// Instructions screen, reached from the main menu
#[derive(Clone, Debug)]
pub(crate) struct HelpScreen {
    globals: Globals,
}

impl HelpScreen {
    const WIDTH: u16 = 54;
    const HEIGHT: u16 = 20;

    pub(crate) fn new(globals: Globals) -> HelpScreen {
        HelpScreen { globals }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit => Some(Screen::Quit),
            Command::Esc | Command::Enter | Command::Q => {
                Some(Screen::Menu(MainMenu::new(self.globals.clone())))
            }
            _ => None,
        }
    }
}

fn keys_line(prefix: &str, keys: &[&'static str], suffix: &str) -> Line<'static> {
    let mut spans = vec![Span::raw(prefix.to_owned())];
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(*key, consts::KEY_STYLE));
    }
    spans.push(Span::raw(suffix.to_owned()));
    Line::from(spans)
}

fn glyph_line(symbol: char, style: ratatui::style::Style, text: &str) -> Line<'static> {
    Line::from_iter([
        Span::raw("  "),
        Span::styled(symbol.to_string(), style),
        Span::raw("  "),
        Span::raw(text.to_owned()),
    ])
}

impl Widget for &HelpScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let popup = center_rect(
            display,
            Size {
                width: HelpScreen::WIDTH,
                height: HelpScreen::HEIGHT,
            },
        );
        let block = Block::bordered()
            .title(" How to Play ")
            .padding(Padding::horizontal(1));
        let inner = block.inner(popup);
        block.render(popup, buf);
        let text = Text::from_iter([
            keys_line("Steer with ", &["↑", "↓", "←", "→"], ","),
            keys_line("   ", &["w", "a", "s", "d"], ", or"),
            keys_line("   ", &["h", "j", "k", "l"], "."),
            Line::raw(""),
            glyph_line(consts::FRUIT_SYMBOL, consts::FRUIT_STYLE, "fruit: 1 point"),
            glyph_line(
                consts::BIG_FRUIT_SYMBOL,
                consts::BIG_FRUIT_STYLE,
                "big fruit: 3 points, gone in 5 seconds",
            ),
            glyph_line(
                consts::OBSTACLE_SYMBOL,
                consts::OBSTACLE_STYLE,
                "obstacle: deadly, and they multiply",
            ),
            glyph_line(
                consts::BOOM_SYMBOL,
                consts::BOOM_STYLE,
                "boom: deadly while it sizzles",
            ),
            glyph_line(
                consts::POWER_UP_SYMBOL,
                consts::POWER_UP_STYLE,
                "power-up: 10 seconds of invincibility",
            ),
            Line::raw(""),
            Line::raw("Running into a wall, an obstacle, a live boom,"),
            Line::raw("or yourself ends the run."),
            Line::raw(""),
            keys_line("Pause with ", &["p"], ","),
            keys_line("save and quit mid-run with ", &["q"], ","),
            keys_line("start over with ", &["c"], "."),
            Line::raw(""),
            keys_line("Press ", &["Esc"], " to return to the menu."),
        ]);
        text.render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn esc_returns_to_menu() {
        let mut help = HelpScreen::new(Globals::default());
        assert!(matches!(
            help.handle_event(Event::Key(KeyCode::Esc.into())),
            Some(Screen::Menu(_))
        ));
    }

    #[test]
    fn unmapped_keys_do_nothing() {
        let mut help = HelpScreen::new(Globals::default());
        assert!(help
            .handle_event(Event::Key(KeyCode::Char('x').into()))
            .is_none());
    }

    #[test]
    fn render_smoke() {
        let help = HelpScreen::new(Globals::default());
        let area = Rect::new(0, 0, 80, 26);
        let mut buffer = Buffer::empty(area);
        (&help).render(area, &mut buffer);
        let content = buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect::<String>();
        assert!(content.contains("How to Play"));
        assert!(content.contains("big fruit: 3 points"));
    }
}
