use crate::entities::{Enemy, GameState, Player, Projectile, Rect as WorldRect, Wave};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Beetle sprites, one per death-animation frame: intact, cracking, bursting
const BEETLE_FRAMES: [[&str; 3]; 3] = [
    [" /\\_/\\ ", "(o|||o)", " /| |\\ "],
    [" /\\ /\\ ", "(x|:|x)", " /  |\\ "],
    [" .  ' .", "' *  .'", " . ' , "],
];

/// One color per sprite row
const BEETLE_COLORS: [Color; 4] = [Color::Red, Color::Magenta, Color::Yellow, Color::Cyan];

/// Maps the fixed world onto the largest aspect-correct terminal region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    /// Columns per world pixel
    pub scale_x: f32,
    /// Rows per world pixel
    pub scale_y: f32,
}

impl Viewport {
    pub fn fit(area: Rect, world_width: f32, world_height: f32) -> Self {
        let rows_per_px = (area.height as f32 / world_height)
            .min(area.width as f32 / (world_width * CELL_ASPECT));
        let cols_per_px = rows_per_px * CELL_ASPECT;

        let width = ((world_width * cols_per_px).floor() as u16).min(area.width);
        let height = ((world_height * rows_per_px).floor() as u16).min(area.height);
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;

        Self {
            area: Rect {
                x,
                y,
                width,
                height,
            },
            scale_x: cols_per_px,
            scale_y: rows_per_px,
        }
    }

    /// Terminal cells covered by a world rectangle, clipped to the viewport.
    /// `None` when nothing of it is visible.
    pub fn project(&self, rect: &WorldRect) -> Option<Rect> {
        let left = (rect.x * self.scale_x).floor().max(0.0);
        let top = (rect.y * self.scale_y).floor().max(0.0);
        let right = (rect.right() * self.scale_x)
            .ceil()
            .min(self.area.width as f32);
        let bottom = (rect.bottom() * self.scale_y)
            .ceil()
            .min(self.area.height as f32);

        if right <= left || bottom <= top {
            return None;
        }

        Some(Rect {
            x: self.area.x + left as u16,
            y: self.area.y + top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        })
    }
}

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub player: &'a Player,
    pub projectiles: &'a [Projectile],
    pub waves: &'a [Wave],
    pub score: u32,
    pub wave_count: u32,
    pub world_width: f32,
    pub world_height: f32,
    pub area: Rect,
    pub fps: u32,
}

/// Handles all rendering responsibilities for the game
#[derive(Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);
        match view.game_state {
            GameState::Playing => {}
            GameState::Paused => self.render_paused(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let viewport = Viewport::fit(view.area, view.world_width, view.world_height);

        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray));
        let border_area = Rect {
            x: viewport.area.x.saturating_sub(1),
            width: (viewport.area.width + 2).min(view.area.width),
            ..viewport.area
        };
        frame.render_widget(block, border_area);

        for wave in view.waves {
            for enemy in &wave.enemies {
                self.render_enemy(frame, &viewport, enemy);
            }
        }

        // Projectiles and the player are solid blocks, written straight to the buffer
        let buffer = frame.buffer_mut();
        for projectile in view.projectiles.iter().filter(|p| p.is_active()) {
            if let Some(cells) = viewport.project(&projectile.bounds()) {
                for y in cells.top()..cells.bottom() {
                    for x in cells.left()..cells.right() {
                        buffer.set_string(x, y, "┃", Style::default().fg(Color::Yellow));
                    }
                }
            }
        }

        if let Some(cells) = viewport.project(&view.player.bounds()) {
            // Flash white when hit, otherwise green
            let color = if view.player.is_flashing() {
                Color::White
            } else {
                Color::Green
            };
            for y in cells.top()..cells.bottom() {
                for x in cells.left()..cells.right() {
                    buffer.set_string(x, y, "█", Style::default().fg(color));
                }
            }
        }

        self.render_hud(frame, view);
    }

    fn render_enemy(&self, frame: &mut Frame, viewport: &Viewport, enemy: &Enemy) {
        let Some(cells) = viewport.project(&enemy.bounds()) else {
            return;
        };

        let sprite = BEETLE_FRAMES[(enemy.frame_x as usize).min(BEETLE_FRAMES.len() - 1)];
        let color = BEETLE_COLORS[enemy.frame_y as usize % BEETLE_COLORS.len()];

        // Center the glyph rows vertically inside the enemy's cells
        let pad = cells.height.saturating_sub(sprite.len() as u16) / 2;
        let text: Vec<Line> = (0..pad)
            .map(|_| Line::from(""))
            .chain(sprite.iter().map(|line| {
                Line::from(*line).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            }))
            .collect();

        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), cells);
    }

    /// Score, wave and one bar per life along the top row
    fn render_hud(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        let lives = "▮".repeat(view.player.lives as usize);
        let stats = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Wave: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.wave_count),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                lives,
                if view.player.lives > 3 {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Red)
                },
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1.min(area.height),
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        if area.height < 2 {
            return;
        }
        let controls = Line::from(vec![Span::styled(
            "[←/→ A/D: Move] [Space: Fire] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height - 1,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the pause box over the frozen game
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            centered_box(view.area, 30, 6),
        );
    }

    /// Game over message drawn over the still-running world
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let game_over_text = vec![
            Line::from(""),
            Line::from("GAME OVER!").centered().red().bold(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Waves Reached: {}", view.wave_count))
                .centered()
                .cyan()
                .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .alignment(Alignment::Center),
            centered_box(view.area, 34, 10),
        );
    }
}

/// A `width` x `height` box in the middle of `area`, shrunk to fit
fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_limited_by_height() {
        // 800 world px into 40 rows -> 0.05 rows/px, 0.1 cols/px -> 60 columns
        let viewport = Viewport::fit(Rect::new(0, 0, 200, 40), 600.0, 800.0);
        assert_eq!(viewport.area, Rect::new(70, 0, 60, 40));
        assert_eq!(viewport.scale_y, 0.05);
        assert_eq!(viewport.scale_x, 0.1);
    }

    #[test]
    fn test_viewport_limited_by_width() {
        // 60 columns / (600 * 2) = 0.05 rows/px
        let viewport = Viewport::fit(Rect::new(0, 0, 60, 100), 600.0, 800.0);
        assert_eq!(viewport.area, Rect::new(0, 30, 60, 40));
    }

    #[test]
    fn test_project_enemy_into_cells() {
        let viewport = Viewport::fit(Rect::new(0, 0, 200, 40), 600.0, 800.0);
        let cells = viewport
            .project(&WorldRect::new(80.0, 160.0, 80.0, 80.0))
            .unwrap();
        assert_eq!(cells, Rect::new(78, 8, 8, 4));
    }

    #[test]
    fn test_project_clips_offscreen() {
        let viewport = Viewport::fit(Rect::new(0, 0, 200, 40), 600.0, 800.0);
        // Wave parked above the world
        assert!(
            viewport
                .project(&WorldRect::new(220.0, -160.0, 80.0, 80.0))
                .is_none()
        );
        // Player hanging half off the left edge
        let cells = viewport
            .project(&WorldRect::new(-50.0, 700.0, 100.0, 100.0))
            .unwrap();
        assert_eq!(cells.x, 70);
        assert_eq!(cells.width, 5);
    }

    #[test]
    fn test_centered_box_shrinks_to_fit() {
        let boxed = centered_box(Rect::new(0, 0, 20, 5), 30, 6);
        assert_eq!(boxed, Rect::new(0, 0, 20, 5));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_projection_stays_inside_viewport(
                width in 10u16..300,
                height in 10u16..120,
                x in -200.0f32..800.0,
                y in -200.0f32..1000.0,
                w in 1.0f32..200.0,
                h in 1.0f32..200.0
            ) {
                let area = Rect::new(0, 0, width, height);
                let viewport = Viewport::fit(area, 600.0, 800.0);
                prop_assert!(viewport.area.right() <= area.right());
                prop_assert!(viewport.area.bottom() <= area.bottom());

                if let Some(cells) = viewport.project(&WorldRect::new(x, y, w, h)) {
                    prop_assert!(cells.x >= viewport.area.x);
                    prop_assert!(cells.y >= viewport.area.y);
                    prop_assert!(cells.right() <= viewport.area.right());
                    prop_assert!(cells.bottom() <= viewport.area.bottom());
                }
            }
        }
    }
}
