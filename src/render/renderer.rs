use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{BoardEngine, CellState, Direction, Position};
use crate::metrics::GameMetrics;
use crate::modes::lifecycle::{Lifecycle, Phase};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, lifecycle: &Lifecycle, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(lifecycle.engine(), metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let grid = self.render_grid(lifecycle.engine(), lifecycle.dead_segments());
        frame.render_widget(grid, game_area);

        if let Some(text) = overlay_text(lifecycle.phase()) {
            let area = centered(game_area, 30, 5);
            frame.render_widget(Clear, area);
            frame.render_widget(self.render_overlay(text), area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, engine: &BoardEngine, dead_segments: usize) -> Paragraph<'_> {
        let head = engine.head();
        let tail = engine.tail();
        let tail_direction = tail_orientation(engine);
        let dead: HashSet<Position> = engine.snake().take(dead_segments).collect();

        let mut lines = Vec::with_capacity(engine.rows());
        let mut spans = Vec::with_capacity(engine.columns());

        for (pos, cell) in engine.grid().iter() {
            let span = if dead.contains(&pos) {
                let glyph = if pos == head {
                    "✖ "
                } else if pos == tail {
                    "x "
                } else {
                    "▪ "
                };
                Span::styled(glyph, Style::default().fg(Color::DarkGray))
            } else if pos == head {
                Span::styled(
                    head_glyph(engine.direction()),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else if pos == tail {
                Span::styled(tail_glyph(tail_direction), Style::default().fg(Color::Green))
            } else {
                match cell {
                    CellState::Snake => Span::styled("■ ", Style::default().fg(Color::Green)),
                    CellState::Food => Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    CellState::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                }
            };
            spans.push(span);

            if pos.column as usize == engine.columns() - 1 {
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
        }

        let border = if engine.is_game_over() {
            Color::Red
        } else {
            Color::White
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, engine: &BoardEngine, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("SCORE ", label),
            Span::styled(
                engine.score().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_overlay(&self, text: String) -> Paragraph<'static> {
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                text,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn overlay_text(phase: Phase) -> Option<String> {
    match phase {
        Phase::Waiting => Some("PRESS ANY KEY TO START".to_string()),
        Phase::Countdown { remaining } => Some(remaining.to_string()),
        _ => None,
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

pub fn tail_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "╿ ",
        Direction::Down => "╽ ",
        Direction::Left => "╾ ",
        Direction::Right => "╼ ",
    }
}

/// Which way the tail points: towards the segment just before it, Up when
/// that segment is not a neighbour.
pub fn tail_orientation(engine: &BoardEngine) -> Direction {
    let len = engine.snake_len();
    if len < 2 {
        return Direction::Up;
    }
    engine
        .snake()
        .nth(len - 2)
        .and_then(|before_tail| Direction::between(engine.tail(), before_tail))
        .unwrap_or(Direction::Up)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::game::GameConfig;
    use crate::input::KeyAction;

    fn screen_text(lifecycle: &Lifecycle) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, lifecycle, &GameMetrics::new()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_tail_points_at_body() {
        let engine = BoardEngine::with_seed(25, 25, 0).unwrap();
        // Tail at (12, 1), next segment to its right
        assert_eq!(tail_orientation(&engine), Direction::Right);
    }

    #[test]
    fn test_head_glyph_follows_direction() {
        let glyphs: Vec<&str> = Direction::ALL.into_iter().map(head_glyph).collect();
        assert_eq!(glyphs, vec!["▲ ", "▼ ", "◀ ", "▶ "]);
    }

    #[test]
    fn test_waiting_screen() {
        let lifecycle = Lifecycle::new(GameConfig::small(), Instant::now()).unwrap();
        let text = screen_text(&lifecycle);

        assert!(text.contains("PRESS ANY KEY TO START"));
        assert!(text.contains("SCORE 0"));
        assert!(text.contains("▶"));
    }

    #[test]
    fn test_countdown_screen() {
        let now = Instant::now();
        let mut lifecycle = Lifecycle::new(GameConfig::small(), now).unwrap();
        lifecycle.handle_key(KeyAction::Other, now);

        let text = screen_text(&lifecycle);
        assert!(!text.contains("PRESS ANY KEY"));
        assert!(text.contains('3'));
    }

    #[test]
    fn test_dead_snake_screen() {
        let t0 = Instant::now();
        let config = GameConfig {
            rows: 5,
            columns: 6,
            seed: Some(3),
            ..GameConfig::default()
        };
        let mut lifecycle = Lifecycle::new(config, t0).unwrap();
        lifecycle.handle_key(KeyAction::Other, t0);
        // Countdown ends at 2000ms, the third tick leaves the board at 2300ms
        for frame in 1..=23 {
            lifecycle.advance(t0 + Duration::from_millis(100 * frame)).unwrap();
        }
        assert_eq!(lifecycle.phase(), Phase::Dying { revealed: 1 });

        let text = screen_text(&lifecycle);
        assert!(text.contains('✖'));
        assert!(!text.contains('▶'));
        assert!(text.contains('╼'));
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        let inner = centered(area, 30, 5);
        assert_eq!(inner, Rect::new(0, 0, 10, 4));

        let big = Rect::new(2, 2, 40, 20);
        assert_eq!(centered(big, 30, 5), Rect::new(7, 9, 30, 5));
    }
}
