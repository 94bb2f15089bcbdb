use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

pub fn format_gb(gb: f64) -> String {
    format!("{gb:.2} GB")
}

/// `<d> days <hh>:<mm>:<ss> (<total hours>:<mm>:<ss>)`
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = secs % 86_400 / 3_600;
    let minutes = secs % 3_600 / 60;
    let seconds = secs % 60;
    let total_hours = days * 24 + hours;
    let clock = format!("{minutes:02}:{seconds:02}");
    format!("{days} days {hours:02}:{clock} ({total_hours}:{clock})")
}
