use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::graphics::PixelCanvas;
use crate::game_loop::LoopStatus;

/// Terminal layout around the game surface: header, framed canvas, controls,
/// and a game-over banner once the loop has ended.
pub struct Screen;

impl Screen {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, canvas: &PixelCanvas, status: LoopStatus) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(canvas, status), chunks[0]);

        let board = centered(chunks[1], canvas.terminal_size());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ");
        let inner = block.inner(board);
        frame.render_widget(block, board);
        frame.render_widget(canvas, inner);

        if status == LoopStatus::Ended {
            let banner = centered(chunks[1], (34, 7));
            frame.render_widget(Clear, banner);
            frame.render_widget(self.render_game_over(), banner);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_header(&self, canvas: &PixelCanvas, status: LoopStatus) -> Paragraph<'_> {
        let (label, color) = match status {
            LoopStatus::Running => ("Running", Color::Green),
            LoopStatus::Ended => ("Ended", Color::Red),
        };

        let text = vec![Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Surface: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}x{}", canvas.width(), canvas.height()),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// A rect of `(width, height)` plus a one-cell border, centred in `area` and
/// clipped to it
fn centered(area: Rect, (width, height): (u16, u16)) -> Rect {
    let width = width.saturating_add(2).min(area.width);
    let height = height.saturating_add(2).min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
