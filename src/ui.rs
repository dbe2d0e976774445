use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle},
        Block, Borders, Paragraph, Widget, Wrap,
    },
};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

/// Circle size while the lungs are full, relative to the resting size
const EXPANDED_SCALE: f64 = 1.2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.engine.current_view();
        let profile = self.selected_profile();

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let accent_style = Style::default().patch(bold_style).fg(Color::Cyan);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(1), // padding
                Constraint::Length(1), // exercise picker
                Constraint::Length(1), // duration picker / cycles left
                Constraint::Min(6),    // breathing circle
                Constraint::Length(1), // status
                Constraint::Length(9), // description
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("Breathing Exercises", bold_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let exercise_line = if view.running {
            Line::from(vec![
                Span::raw("Exercise: "),
                Span::styled(profile.id, accent_style),
            ])
        } else {
            Line::from(vec![
                Span::raw("Choose Exercise: "),
                Span::styled("‹ ", dim_style),
                Span::styled(profile.id, accent_style),
                Span::styled(" ›", dim_style),
            ])
        };
        Paragraph::new(exercise_line)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        // the duration can only be picked between sessions
        let second_line = if view.running {
            Line::from(Span::styled(
                format!("Cycles Left: {}", view.cycles_remaining),
                bold_style,
            ))
        } else {
            Line::from(format!(
                "Session Duration: {} Minutes",
                self.duration_minutes
            ))
        };
        Paragraph::new(second_line)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        render_circle(self, chunks[4], buf);

        if let Some(status) = &self.status {
            Paragraph::new(Span::styled(
                status.as_str(),
                Style::default().fg(Color::Red),
            ))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
        }

        let mut description = vec![
            Line::from(profile.description),
            Line::from(""),
        ];
        description.extend(
            profile
                .slots()
                .map(|(phase, secs)| Line::from(format!("{}: {} seconds", phase, secs))),
        );
        Paragraph::new(description)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(profile.id, bold_style)),
            )
            .wrap(Wrap { trim: true })
            .render(chunks[6], buf);

        let legend = if view.running {
            "(space) stop / (esc)ape"
        } else {
            "(space) start / (↑↓) exercise / (d)uration / (esc)ape"
        };
        Paragraph::new(Span::styled(legend, italic_style)).render(chunks[7], buf);
    }
}

/// Draw the breathing circle with the phase countdown in its center.
///
/// Terminal rows are roughly twice as tall as columns are wide, so the y axis
/// spans twice the rows to keep the circle round.
fn render_circle(app: &App, area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let view = app.engine.current_view();
    let scale = match app.engine.phase() {
        Some(phase) if phase.is_expanded() => EXPANDED_SCALE,
        _ => 1.0,
    };

    let half_width = f64::from(area.width) / 2.0;
    let half_height = f64::from(area.height);
    let radius = half_width.min(half_height) * 0.9 / EXPANDED_SCALE * scale;

    let label = if view.running {
        format!("{} - {}s", view.phase_label, view.seconds_remaining)
    } else {
        view.phase_label.to_string()
    };
    let label_x = -(label.chars().count() as f64) / 2.0;

    Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-half_width, half_width])
        .y_bounds([-half_height, half_height])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius,
                color: Color::LightBlue,
            });
            ctx.layer();
            ctx.print(
                label_x,
                0.0,
                Span::styled(
                    label.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            );
        })
        .render(area, buf);
}
