//! Map widget - the walkable strip, the parked car, the three sources and
//! the listener, drawn in display coordinates.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{
        canvas::{Canvas, Points, Rectangle},
        Block, Borders,
    },
    Frame,
};

use soundmap::{
    config::{DISPLAY_HEIGHT, DISPLAY_WIDTH, MOVABLE_REGION, OBSTACLE},
    spatial::{self, Point},
    Source,
};

/// Display y grows downward, canvas y grows upward.
fn flip(point: Point) -> (f64, f64) {
    (f64::from(point.x), f64::from(DISPLAY_HEIGHT - point.y))
}

fn rectangle(rect: spatial::Rect, color: Color) -> Rectangle {
    Rectangle {
        x: f64::from(rect.x_min),
        y: f64::from(DISPLAY_HEIGHT - rect.y_max),
        width: f64::from(rect.x_max - rect.x_min),
        height: f64::from(rect.y_max - rect.y_min),
        color,
    }
}

fn source_color(source: Source) -> Color {
    match source {
        Source::Bird => Color::Yellow,
        Source::Car => Color::Red,
        Source::Bell => Color::Blue,
    }
}

pub fn render_map(frame: &mut Frame, area: Rect, listener: Point) {
    let block = Block::default().title(" Map ").borders(Borders::ALL);

    let canvas = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .x_bounds([0.0, f64::from(DISPLAY_WIDTH)])
        .y_bounds([0.0, f64::from(DISPLAY_HEIGHT)])
        .paint(move |ctx| {
            ctx.draw(&rectangle(MOVABLE_REGION, Color::DarkGray));
            ctx.draw(&rectangle(OBSTACLE, Color::Gray));
            ctx.layer();

            for source in Source::ALL {
                let (x, y) = flip(source.profile().position);
                let color = source_color(source);
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color,
                });
                ctx.print(x + 4.0, y, Span::styled(source.name(), Style::default().fg(color)));
            }

            let (x, y) = flip(listener);
            ctx.print(x, y, Span::styled("@", Style::default().fg(Color::Green)));
        });

    frame.render_widget(canvas, area);
}
