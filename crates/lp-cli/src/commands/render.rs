//! Terminal rendering helpers

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};

use super::context::AppContext;
use lp_core::comment::Comment;
use lp_core::place::{is_recently_updated, RankedPlace};

/// Parse `#RRGGBB` into components
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Category label in its configured color
pub fn category_label(category: &str, hex: &str) -> ColoredString {
    match parse_hex_color(hex) {
        Some((r, g, b)) => category.truecolor(r, g, b),
        None => category.normal(),
    }
}

/// One line of the nearby list
pub fn place_line(index: usize, ranked: &RankedPlace, ctx: &AppContext, now: DateTime<Utc>) -> String {
    let ranking = &ctx.config.ranking;
    let mut line = format!(
        "{:>2}. {}  {}  {}m · walk {} min",
        index + 1,
        ranked.name.bold(),
        category_label(&ranked.category, ctx.color_for(&ranked.category)),
        ranked.distance_meters,
        ranked.walk_minutes(ranking.walk_speed_m_per_min),
    );
    if is_recently_updated(ranked.updated_at.as_deref(), now, ranking.new_days) {
        line.push_str(&format!("  {}", "NEW".green().bold()));
    }
    line
}

/// Detail block for a single place
pub fn place_detail(ranked: &RankedPlace, ctx: &AppContext) -> String {
    let mut out = format!(
        "{}\n  {} · walk about {} min ({}m)",
        ranked.name.bold().underline(),
        category_label(&ranked.category, ctx.color_for(&ranked.category)),
        ranked.walk_minutes(ctx.config.ranking.walk_speed_m_per_min),
        ranked.distance_meters,
    );
    if !ranked.group.is_empty() {
        out.push_str(&format!("\n  {}", ranked.group.dimmed()));
    }
    if !ranked.map_url.is_empty() {
        out.push_str(&format!("\n  Map: {}", ranked.map_url.cyan()));
    }
    out
}

/// One comment, nickname and age first
pub fn comment_line(comment: &Comment, now: DateTime<Utc>) -> String {
    format!(
        "{} {}\n  {}",
        comment.nickname.yellow(),
        format_age(now.signed_duration_since(comment.created_at)).dimmed(),
        comment.content
    )
}

fn format_age(age: chrono::Duration) -> String {
    if age.num_days() > 0 {
        format!("{}d ago", age.num_days())
    } else if age.num_hours() > 0 {
        format!("{}h ago", age.num_hours())
    } else if age.num_minutes() > 0 {
        format!("{}m ago", age.num_minutes())
    } else {
        "just now".to_string()
    }
}
