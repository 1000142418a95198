use chrono::{DateTime, Utc};

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(FORMAT).to_string()
}

/// `#a #b` with a trailing space, or empty
pub fn format_tags_hash(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let mut out = tags
        .iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ");
    out.push(' ');
    out
}

pub fn format_tags_comma(tags: &[String]) -> String {
    tags.join(", ")
}

/// Truncate to `max` characters, marking the cut with `...`. Newlines are
/// flattened so the result fits on one line.
pub fn truncate_string(s: &str, max: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max {
        return flat;
    }
    let keep = max.saturating_sub(3);
    let mut out: String = flat.chars().take(keep).collect();
    out.push_str("...");
    out
}
