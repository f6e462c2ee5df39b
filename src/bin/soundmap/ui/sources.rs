//! Per-source readout - spatial cues and live channel state

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Row, Table},
    Frame,
};

use soundmap::{Ear, EngineSnapshot, Source};

fn ear_label(ear: Ear) -> &'static str {
    match ear {
        Ear::Left => "L",
        Ear::Right => "R",
    }
}

fn row(source: Source, snapshot: Option<&EngineSnapshot>) -> Row<'static> {
    let Some(state) = snapshot.map(|s| s.source(source)) else {
        return Row::new(vec![source.name().to_string()]);
    };

    let [left, right] = state.ears;
    let mut cells = vec![source.name().to_string()];
    match state.spatial {
        Some(spatial) => cells.extend([
            format!("{:5.1}°", spatial.angle.to_degrees()),
            format!("{:.2}", spatial.amplitude_ratio),
            format!("{}", spatial.delay_ticks),
            ear_label(spatial.near).to_string(),
            format!("{:.1}/{:.1}", spatial.near_target, spatial.far_target),
        ]),
        None => cells.extend(vec!["-".to_string(); 5]),
    }
    cells.extend([
        format!("{:6.1}/{:6.1}", left.level, right.level),
        format!("{:6.0}", left.frequency),
        match state.pending_far_ear {
            Some((ear, remaining)) => format!("{} in {remaining}", ear_label(ear)),
            None => "-".to_string(),
        },
        format!("{}", state.far_expiries),
    ]);
    Row::new(cells)
}

pub fn render_sources(frame: &mut Frame, area: Rect, snapshot: Option<&EngineSnapshot>) {
    let block = Block::default().title(" Sources ").borders(Borders::ALL);

    let header = Row::new(vec![
        "source", "angle", "ratio", "delay", "near", "near/far", "level L/R", "Hz", "far ear",
        "fired",
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows = Source::ALL.map(|source| row(source, snapshot));
    let widths = [
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Length(13),
        Constraint::Length(13),
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
