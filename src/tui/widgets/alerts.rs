//! Alert banners above the content area.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::alert::{AlertPhase, AlertStack};
use crate::tui::style::Styles;

/// Rows needed to show every banner still on screen.
pub fn alerts_height(alerts: &AlertStack) -> u16 {
    alerts.shown().count() as u16
}

pub fn render_alerts(frame: &mut Frame, area: Rect, alerts: &AlertStack) {
    let lines: Vec<Line> = alerts
        .shown()
        .map(|alert| {
            let fading = matches!(alert.phase(), AlertPhase::Fading { .. });
            let style = Styles::alert(alert.kind, fading);
            let mut spans = vec![Span::styled(
                format!(" {} ", alert.kind.as_str().to_uppercase()),
                style.add_modifier(Modifier::REVERSED),
            )];
            if let Some(title) = &alert.title {
                spans.push(Span::styled(
                    format!(" {}:", title),
                    style.add_modifier(Modifier::BOLD),
                ));
            }
            spans.push(Span::styled(format!(" {}", alert.message), style));
            if alert.dismissible {
                spans.push(Span::styled("  [X: close]", Styles::dim()));
            }
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}
