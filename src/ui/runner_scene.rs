//! Runner game scene.
//!
//! The play field is drawn into a cell buffer (world coordinates scaled to
//! the field's size) and then stamped row-by-row as Paragraph widgets, which
//! gives per-character foreground and background control.

use crate::assets::SpriteSource;
use crate::runner::RunState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::ops::Range;

const SKY_BG: Color = Color::Rgb(199, 249, 204);
const GROUND_BG: Color = Color::Rgb(106, 168, 79);
const GROUND_FG: Color = Color::Rgb(80, 130, 60);
const OBSTACLE_FG: Color = Color::Rgb(47, 111, 47);
const OBSTACLE_BASE_FG: Color = Color::Rgb(30, 77, 30);
const PLAYER_FG: Color = Color::Rgb(255, 138, 0);
const HUD_LABEL_FG: Color = Color::Rgb(70, 90, 70);
const HUD_VALUE_FG: Color = Color::Black;

const FULL_BLOCK: char = '\u{2588}'; // █
const GROUND_CHAR: char = '\u{2591}'; // ░

/// Columns reserved for the info panel on the right.
const PANEL_COLS: u16 = 22;
/// Rows under the field for the status line and control hints.
const HUD_ROWS: u16 = 2;
const BANNER_ROWS: u16 = 4;

/// What the scene needs to know beyond the run itself.
pub struct SceneView<'a> {
    pub run: &'a RunState,
    pub best: u32,
    pub last_score: Option<u32>,
    /// The finished run raised the best score.
    pub new_best: bool,
    pub muted: bool,
}

/// Where each part of the scene goes inside the outer border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SceneAreas {
    field: Rect,
    hud: Rect,
    panel: Rect,
}

/// Field top-left, HUD under it, panel down the right edge. Shrinks the
/// fixed parts first when the area is too narrow or short.
fn split_scene(inner: Rect) -> SceneAreas {
    let panel_cols = PANEL_COLS.min(inner.width);
    let left_cols = inner.width - panel_cols;
    let hud_rows = HUD_ROWS.min(inner.height);
    let field_rows = inner.height - hud_rows;

    SceneAreas {
        field: Rect::new(inner.x, inner.y, left_cols, field_rows),
        hud: Rect::new(inner.x, inner.y + field_rows, left_cols, hud_rows),
        panel: Rect::new(inner.x + left_cols, inner.y, panel_cols, inner.height),
    }
}

/// Render the whole scene. Returns the play field area for click mapping.
pub fn render_runner_scene(
    frame: &mut Frame,
    area: Rect,
    view: &SceneView,
    sprite: &dyn SpriteSource,
) -> Rect {
    frame.render_widget(Clear, area);
    let border = if view.run.is_game_over() {
        Color::Red
    } else {
        Color::LightGreen
    };
    let outer = Block::default()
        .title(" Dino Sura ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let areas = split_scene(outer.inner(area));
    frame.render_widget(outer, area);

    render_play_field(frame, areas.field, view, sprite);
    render_hud(frame, areas.hud, view);
    render_info_panel(frame, areas.panel, view);

    if view.run.is_game_over() {
        render_run_over(frame, areas.field, view);
    }

    areas.field
}

/// Cell in the render buffer with foreground and background colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: SKY_BG,
        }
    }
}

/// Cells covered by the world interval `start .. start + len` at `scale`
/// cells per unit, clipped to `0..limit`. Anything visible covers at least
/// one cell.
fn cell_span(start: f64, len: f64, scale: f64, limit: usize) -> Option<Range<usize>> {
    let lo = (start * scale).floor();
    let hi = ((start + len) * scale).ceil().max(lo + 1.0);
    let lo = lo.max(0.0);
    let hi = hi.min(limit as f64);
    if lo >= hi {
        return None;
    }
    Some(lo as usize..hi as usize)
}

/// Build the play field buffer for a `width` x `height` cell area.
pub fn build_field_buffer(
    width: usize,
    height: usize,
    view: &SceneView,
    sprite: &dyn SpriteSource,
) -> Vec<Vec<Cell>> {
    let mut buffer = vec![vec![Cell::default(); width]; height];
    if width == 0 || height == 0 {
        return buffer;
    }

    let run = view.run;
    let world = &run.config.world;
    let x_scale = width as f64 / world.width;
    let y_scale = height as f64 / world.height;

    // ── Ground band (always at least the bottom row) ─────────────────
    let ground_row = ((world.ground_y() * y_scale).floor() as usize).min(height - 1);
    for (row_idx, row) in buffer.iter_mut().enumerate().skip(ground_row) {
        for (col, cell) in row.iter_mut().enumerate() {
            let textured = row_idx == ground_row && (col + run.frame_count as usize / 4) % 6 == 0;
            *cell = Cell {
                ch: if textured { GROUND_CHAR } else { ' ' },
                fg: GROUND_FG,
                bg: GROUND_BG,
            };
        }
    }

    // ── Obstacles ────────────────────────────────────────────────────
    for obstacle in &run.obstacles {
        let Some(cols) = cell_span(obstacle.x, obstacle.width, x_scale, width) else {
            continue;
        };
        let Some(rows) = cell_span(obstacle.y, obstacle.height, y_scale, ground_row) else {
            continue;
        };
        let base = rows.end - 1;
        for row in rows {
            let fg = if row == base && base > 0 {
                OBSTACLE_BASE_FG
            } else {
                OBSTACLE_FG
            };
            for col in cols.clone() {
                buffer[row][col] = Cell {
                    ch: FULL_BLOCK,
                    fg,
                    bg: SKY_BG,
                };
            }
        }
    }

    // ── Player: sprite when ready, filled rectangle otherwise ───────
    let player = &run.player;
    if let (Some(cols), Some(rows)) = (
        cell_span(player.x, player.width, x_scale, width),
        cell_span(player.y, player.height, y_scale, ground_row.max(1)),
    ) {
        let (box_w, box_h) = (cols.len(), rows.len());
        let sprite = sprite.ready_sprite();
        for (dy, row) in rows.enumerate() {
            for (dx, col) in cols.clone().enumerate() {
                let ch = match sprite {
                    Some(sprite) => sprite.sample(dx, dy, box_w, box_h),
                    None => Some(FULL_BLOCK),
                };
                if let Some(ch) = ch {
                    buffer[row][col] = Cell {
                        ch,
                        fg: PLAYER_FG,
                        bg: SKY_BG,
                    };
                }
            }
        }
    }

    // ── Score overlay (top-right) ────────────────────────────────────
    let score_text = run.score.to_string();
    let best_text = view.best.to_string();
    let segments = [
        ("Score ", HUD_LABEL_FG),
        (score_text.as_str(), HUD_VALUE_FG),
        ("  Best ", HUD_LABEL_FG),
        (best_text.as_str(), HUD_VALUE_FG),
    ];
    let total_len: usize = segments.iter().map(|(text, _)| text.chars().count()).sum();
    let mut col = width.saturating_sub(total_len + 1);
    for (text, fg) in segments {
        for ch in text.chars() {
            if col < width {
                buffer[0][col] = Cell { ch, fg, bg: SKY_BG };
            }
            col += 1;
        }
    }

    buffer
}

fn render_play_field(frame: &mut Frame, area: Rect, view: &SceneView, sprite: &dyn SpriteSource) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    let buffer = build_field_buffer(area.width as usize, area.height as usize, view, sprite);

    for (row_idx, row_data) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let line = Paragraph::new(Line::from(spans));
        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(line, row_area);
    }
}

/// Control hints for the current phase, as (key, action) pairs.
fn controls(view: &SceneView) -> Vec<(&'static str, &'static str)> {
    let mute = if view.muted { "Unmute" } else { "Mute" };
    if view.run.is_game_over() {
        vec![("[Space/Click]", "Run again"), ("[M]", mute), ("[Q]", "Quit")]
    } else {
        vec![
            ("[Space/Up/Click]", "Jump"),
            ("[R]", "Restart"),
            ("[M]", mute),
            ("[Q]", "Quit"),
        ]
    }
}

fn render_hud(frame: &mut Frame, area: Rect, view: &SceneView) {
    if area.height == 0 {
        return;
    }
    let status = if view.run.is_game_over() {
        Span::styled("Game over", Style::default().fg(Color::Red))
    } else {
        Span::styled("Run!", Style::default().fg(Color::LightGreen))
    };

    let mut hints: Vec<Span> = Vec::new();
    for (key, action) in controls(view) {
        if !hints.is_empty() {
            hints.push(Span::raw("  "));
        }
        hints.push(Span::styled(key, Style::default().fg(Color::White)));
        hints.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let hud = Paragraph::new(vec![Line::from(status), Line::from(hints)])
        .alignment(Alignment::Center);
    frame.render_widget(hud, area);
}

fn render_info_panel(frame: &mut Frame, area: Rect, view: &SceneView) {
    let block = Block::default()
        .title(" Run ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let run = view.run;
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                run.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best: ", label),
            Span::styled(view.best.to_string(), Style::default().fg(Color::Yellow)),
        ]),
    ];
    if let Some(last) = view.last_score {
        lines.push(Line::from(vec![
            Span::styled("Last run: ", label),
            Span::styled(last.to_string(), value),
        ]));
    }
    lines.extend([
        Line::from(""),
        Line::from(vec![
            Span::styled("Speed: ", label),
            Span::styled(format!("{:.1}", run.speed), value),
        ]),
        Line::from(vec![
            Span::styled("Frame: ", label),
            Span::styled(run.frame_count.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Obstacles: ", label),
            Span::styled(run.obstacles.len().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Sound: ", label),
            Span::styled(if view.muted { "Muted" } else { "On" }, value),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" \u{2588} ", Style::default().fg(PLAYER_FG)),
            Span::styled("Runner", label),
        ]),
        Line::from(vec![
            Span::styled(" \u{2588} ", Style::default().fg(OBSTACLE_FG)),
            Span::styled("Obstacle", label),
        ]),
        Line::from(vec![
            Span::styled("   ", Style::default().bg(GROUND_BG)),
            Span::styled(" Ground", label),
        ]),
    ]);

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Banner title and colour for a finished run.
fn run_over_title(view: &SceneView) -> (&'static str, Color) {
    if view.new_best {
        ("NEW BEST!", Color::Green)
    } else {
        ("GAME OVER", Color::Red)
    }
}

/// Bottom strip of the field the banner covers, if the field is tall enough.
fn banner_area(field: Rect) -> Option<Rect> {
    if field.height < BANNER_ROWS {
        return None;
    }
    Some(Rect::new(
        field.x,
        field.y + field.height - BANNER_ROWS,
        field.width,
        BANNER_ROWS,
    ))
}

/// The banner only covers the bottom of the field so the crash stays visible.
fn render_run_over(frame: &mut Frame, field: Rect, view: &SceneView) {
    let Some(area) = banner_area(field) else {
        return;
    };
    let (title, color) = run_over_title(view);

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled(
                format!("Score {}  |  Best {}", view.run.score, view.best),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(Span::styled(
            "[Space/Click] Run again   [Q] Quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
