//! Shields-style SVG status badge.

use uppe_service::{BadgeState, EndpointStatus};

const LABEL: &str = "status";
const LABEL_WIDTH: usize = 45;
const LABEL_COLOR: &str = "#555";
const CHAR_WIDTH: usize = 7;
const PADDING: usize = 60;

pub fn badge_color(status: EndpointStatus) -> &'static str {
    match status {
        EndpointStatus::Up => "#22c55e",
        EndpointStatus::Down => "#ef4444",
        EndpointStatus::Unknown => "#94a3b8",
    }
}

pub fn badge_text(state: BadgeState) -> String {
    match state.status {
        EndpointStatus::Up => format!("{:.1}% uptime", state.uptime),
        EndpointStatus::Down => "down".to_string(),
        EndpointStatus::Unknown => "unknown".to_string(),
    }
}

/// Render the badge for one endpoint
pub fn render_badge(state: BadgeState) -> String {
    let color = badge_color(state.status);
    let text = badge_text(state);

    let total_width = PADDING + text.chars().count() * CHAR_WIDTH;
    let value_width = total_width - LABEL_WIDTH;
    let label_x = LABEL_WIDTH as f64 / 2.0;
    let value_x = LABEL_WIDTH as f64 + value_width as f64 / 2.0;

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{total_width}" height="20" role="img" aria-label="{LABEL}: {text}">
  <linearGradient id="grad" x2="0" y2="100%">
    <stop offset="0" stop-color="#555" stop-opacity=".1"/>
    <stop offset="1" stop-opacity=".1"/>
  </linearGradient>
  <clipPath id="r">
    <rect width="{total_width}" height="20" rx="3" fill="#fff"/>
  </clipPath>
  <g clip-path="url(#r)">
    <rect width="{LABEL_WIDTH}" height="20" fill="{LABEL_COLOR}"/>
    <rect x="{LABEL_WIDTH}" width="{value_width}" height="20" fill="{color}"/>
    <rect width="{total_width}" height="20" fill="url(#grad)"/>
  </g>
  <g fill="#fff" text-anchor="middle" font-family="Verdana,Geneva,DejaVu Sans,sans-serif" font-size="11">
    <text x="{label_x}" y="15" fill="#010101" fill-opacity=".3">{LABEL}</text>
    <text x="{label_x}" y="14">{LABEL}</text>
    <text x="{value_x}" y="15" fill="#010101" fill-opacity=".3">{text}</text>
    <text x="{value_x}" y="14">{text}</text>
  </g>
</svg>"##
    )
}
