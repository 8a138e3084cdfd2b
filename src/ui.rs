use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const MIN_GUESS_BOX_WIDTH: u16 = 16;

impl<R: Rng> Widget for &App<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state();
        let game = self.game();

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let title_style = Style::default().patch(bold_style).fg(Color::Cyan);
        let word_style = Style::default().patch(bold_style).fg(Color::Magenta);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(1), // title
                    Constraint::Min(1),    // top padding
                    Constraint::Length(1), // word counter
                    Constraint::Length(1), // scrambled word
                    Constraint::Length(1), // instructions
                    Constraint::Length(1), // padding
                    Constraint::Length(3), // guess box
                    Constraint::Length(1), // feedback
                    Constraint::Length(1), // score
                    Constraint::Min(1),    // bottom padding
                    Constraint::Length(1), // legend
                ]
                .as_ref(),
            )
            .split(area);

        Paragraph::new(Span::styled("Unscramble", title_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let total = game.word_list().len();
        let counter = if state.is_game_over {
            format!("{total} of {total} words played")
        } else {
            format!("word {} of {total}", game.used_words().len())
        };
        Paragraph::new(Span::styled(counter, dim_style))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        let word = if state.is_game_over {
            Span::styled("game over", word_style)
        } else {
            Span::styled(spaced(&state.current_scrambled_word), word_style)
        };
        Paragraph::new(word)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(
            "Unscramble the word using all the letters.",
            italic_style,
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[4], buf);

        let guess = self.guess();
        let box_width = (guess.width().max(state.current_scrambled_word.width()) as u16 + 4)
            .max(MIN_GUESS_BOX_WIDTH)
            .min(chunks[6].width);
        let guess_area = Rect {
            x: chunks[6].x + (chunks[6].width - box_width) / 2,
            width: box_width,
            ..chunks[6]
        };
        let (guess_title, border_style) = if state.is_guess_word_wrong {
            ("Wrong guess!", red_bold_style)
        } else {
            ("Enter your word", dim_style)
        };
        Paragraph::new(Line::from(vec![
            Span::styled(guess.to_string(), bold_style),
            Span::styled("_", dim_style.add_modifier(Modifier::SLOW_BLINK)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(guess_title),
        )
        .render(guess_area, buf);

        if let Some(status) = self.status() {
            let style = if state.is_game_over {
                title_style
            } else {
                green_bold_style
            };
            Paragraph::new(Span::styled(status.to_string(), style))
                .alignment(Alignment::Center)
                .render(chunks[7], buf);
        }

        Paragraph::new(Span::styled(format!("score: {}", state.score), bold_style))
            .alignment(Alignment::Center)
            .render(chunks[8], buf);

        let legend = Paragraph::new(Span::styled(
            "(enter) submit / (tab) skip / (ctrl-r) new game / (esc) quit",
            italic_style,
        ))
        .alignment(Alignment::Center);
        legend.render(chunks[10], buf);
    }
}

/// "tca" -> "t c a", easier to read as separate tiles
fn spaced(word: &str) -> String {
    word.chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
