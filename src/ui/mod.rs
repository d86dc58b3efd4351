pub mod runner_scene;

use crate::assets::SpriteSource;
use crate::session::Session;
use crate::store::ScoreStore;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use runner_scene::{render_runner_scene, SceneView};

/// Smallest terminal the scene is laid out for.
pub const MIN_COLS: u16 = 50;
pub const MIN_ROWS: u16 = 14;

/// Draw one frame. Returns the play field area (empty when the terminal is
/// too small) so clicks can be mapped to it.
pub fn draw_ui<S: ScoreStore>(
    frame: &mut Frame,
    session: &Session<S>,
    sprite: &dyn SpriteSource,
) -> Rect {
    let area = frame.size();
    if area.width < MIN_COLS || area.height < MIN_ROWS {
        render_too_small(frame, area);
        return Rect::default();
    }

    let view = SceneView {
        run: session.run(),
        best: session.best(),
        last_score: session.last_score(),
        new_best: session.last_run_new_best(),
        muted: session.is_muted(),
    };
    render_runner_scene(frame, area, &view, sprite)
}

fn render_too_small(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Need: {}x{}   Have: {}x{}",
                MIN_COLS, MIN_ROWS, area.width, area.height
            ),
            Style::default().fg(Color::White),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
