//! Animated balance chart for a batch of bettors.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::playback::Playback;

/// Curve colors, cycled when a batch has more runs than entries here.
const RUN_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::LightBlue,
    Color::LightRed,
    Color::LightGreen,
    Color::LightMagenta,
];

/// Legends get noisy past this many runs; the side panel still lists all.
const MAX_LEGEND_RUNS: usize = 8;

/// Render the replay: balance curves on the left, per-run panel on the
/// right, parameters and controls along the bottom.
pub fn render_chart_scene(f: &mut Frame, area: Rect, playback: &Playback) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Chart + side panel
            Constraint::Length(2), // Parameters + controls
        ])
        .split(area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Chart
            Constraint::Length(30), // Side panel
        ])
        .split(v_chunks[0]);

    draw_chart(f, h_chunks[0], playback);
    draw_run_panel(f, h_chunks[1], playback);
    draw_footer(f, v_chunks[1], playback);
}

fn draw_chart(f: &mut Frame, area: Rect, playback: &Playback) {
    // Flat reference line at the starting bankroll.
    let reference = [
        (0.0, playback.initial_balance),
        (playback.x_max, playback.initial_balance),
    ];

    let mut datasets: Vec<Dataset> = Vec::with_capacity(playback.run_count() + 1);
    let label_runs = playback.run_count() <= MAX_LEGEND_RUNS;

    for run in 0..playback.run_count() {
        let color = RUN_COLORS[run % RUN_COLORS.len()];
        let mut dataset = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(playback.visible(run));
        if label_runs {
            dataset = dataset.name(format!("Run {}", run + 1));
        }
        datasets.push(dataset);
    }

    datasets.push(
        Dataset::default()
            .name("Start balance")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&reference),
    );

    let x_labels = vec![
        Span::from("0"),
        Span::from(format!("{:.0}", playback.x_max / 2.0)),
        Span::from(format!("{:.0}", playback.x_max)),
    ];
    let y_labels = vec![
        Span::from(format!("{:.0}", playback.y_min)),
        Span::from(format!("{:.0}", (playback.y_min + playback.y_max) / 2.0)),
        Span::from(format!("{:.0}", playback.y_max)),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Balance History ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .title("Rounds")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, playback.x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Balance")
                .style(Style::default().fg(Color::Gray))
                .bounds([playback.y_min, playback.y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn draw_run_panel(f: &mut Frame, area: Rect, playback: &Playback) {
    let block = Block::default()
        .title(" Bettors ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = Vec::new();

    let state = if playback.finished() {
        Span::styled("replay done", Style::default().fg(Color::Gray))
    } else if playback.playing {
        Span::styled("playing", Style::default().fg(Color::Green))
    } else {
        Span::styled("paused", Style::default().fg(Color::Yellow))
    };
    lines.push(Line::from(vec![
        Span::from(format!("Round {:>4}/{}  ", playback.frame - 1, playback.max_frame - 1)),
        state,
    ]));
    lines.push(Line::from(""));

    // One row per run as long as the panel has room, keeping a row free
    // for the overflow count when the batch does not fit.
    let visible_rows = inner.height.saturating_sub(2) as usize;
    let shown = if playback.run_count() > visible_rows {
        visible_rows.saturating_sub(1)
    } else {
        playback.run_count()
    };
    for run in 0..shown {
        let balance = playback.current_balance(run);
        let color = if balance > playback.initial_balance {
            Color::Green
        } else if balance < playback.initial_balance {
            Color::Red
        } else {
            Color::White
        };
        let tag = if playback.run_finished(run) {
            format!(" ({})", playback.stop_reasons[run].label())
        } else {
            String::new()
        };
        lines.push(Line::from(Span::styled(
            format!("Run {:<3} {:>10.2}{}", run + 1, balance, tag),
            Style::default().fg(color),
        )));
    }
    if shown < playback.run_count() {
        lines.push(Line::from(Span::styled(
            format!("… and {} more", playback.run_count() - shown),
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_footer(f: &mut Frame, area: Rect, playback: &Playback) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let params = Paragraph::new(Line::from(vec![
        Span::styled("Start ", Style::default().fg(Color::DarkGray)),
        Span::from(format!("{:.0}   ", playback.initial_balance)),
        Span::styled("Bet ", Style::default().fg(Color::DarkGray)),
        Span::from(format!("{:.0}   ", playback.initial_bet)),
        Span::styled("Limit ", Style::default().fg(Color::DarkGray)),
        Span::from(format!("{:.0}   ", playback.table_limit)),
        Span::styled("Win prob ", Style::default().fg(Color::DarkGray)),
        Span::from(format!("{:.4}", playback.win_prob)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(params, chunks[0]);

    let controls = Paragraph::new("[Space] Pause  [R] Replay  [N] New Batch  [E] Edit  [Q] Quit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(controls, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(RUN_COLORS[0], RUN_COLORS[8 % RUN_COLORS.len()]);
        assert_eq!(RUN_COLORS[3], RUN_COLORS[11 % RUN_COLORS.len()]);
    }
}
