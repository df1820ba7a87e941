//! Rendering: search bar, notice line, and the result panel.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use weather_core::{DisplayState, Icon};

use crate::app::App;

const TEMPERATURE_SUFFIX: &str = "° f";
// The stat row has always labeled wind this way, even though imperial
// requests make the provider answer in mph.
const WIND_SPEED_SUFFIX: &str = "km/h";

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(Color::Yellow)))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded)
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(f.area());

    draw_search_bar(f, app, rows[0]);
    draw_notice(f, app.notice.as_deref(), rows[1]);
    draw_result(f, &app.display, rows[2]);
}

fn draw_search_bar(f: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(5)])
        .split(area);

    let field = Paragraph::new(app.input.as_str()).block(bordered(" Search "));
    f.render_widget(field, columns[0]);

    // Keep the terminal cursor at the end of the field contents.
    f.set_cursor_position(Position::new(
        columns[0].x + 1 + app.input.chars().count() as u16,
        columns[0].y + 1,
    ));

    let button = Paragraph::new(Icon::Search.glyph())
        .alignment(Alignment::Center)
        .block(bordered(""));
    f.render_widget(button, columns[1]);

    // Remembered for the mouse hit test.
    app.search_button = columns[1];
}

fn draw_notice(f: &mut Frame, notice: Option<&str>, area: Rect) {
    let Some(message) = notice else {
        return;
    };

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            message,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// The two-state projection: an empty display renders nothing beyond
/// the structural container, a loaded one renders icon, temperature,
/// location, and the two stat columns.
fn draw_result(f: &mut Frame, display: &DisplayState, area: Rect) {
    let DisplayState::Loaded(reading) = display else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(area);

    let icon = Paragraph::new(reading.icon.glyph()).alignment(Alignment::Center);
    f.render_widget(icon, rows[1]);

    let temperature = Paragraph::new(Span::styled(
        format!("{}{}", reading.temperature, TEMPERATURE_SUFFIX),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(temperature, rows[2]);

    let location = Paragraph::new(Span::styled(
        reading.location.as_str(),
        Style::default().fg(Color::Yellow),
    ))
    .alignment(Alignment::Center);
    f.render_widget(location, rows[3]);

    let stats = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[5]);

    f.render_widget(
        stat_cell(Icon::Humidity, format!("{} %", reading.humidity), "Humidity"),
        stats[0],
    );
    f.render_widget(
        stat_cell(
            Icon::Wind,
            format!("{} {}", reading.wind_speed, WIND_SPEED_SUFFIX),
            "Wind Speed",
        ),
        stats[1],
    );
}

fn stat_cell(icon: Icon, value: String, label: &str) -> Paragraph<'_> {
    Paragraph::new(vec![
        Line::from(vec![
            Span::raw(format!("{} ", icon.glyph())),
            Span::styled(value, Style::default().fg(Color::Green)),
        ]),
        Line::from(Span::raw(label)),
    ])
    .alignment(Alignment::Center)
}
