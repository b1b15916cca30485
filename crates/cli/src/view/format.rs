use chrono::{DateTime, SecondsFormat, Utc};

pub fn colorize(text: &str, code: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

pub fn color_online(online: bool, colors: bool) -> String {
    if online {
        colorize("online", "32", colors)
    } else {
        colorize("offline", "90", colors)
    }
}

pub fn color_enabled(enabled: bool, colors: bool) -> String {
    if enabled {
        colorize("enabled", "32", colors)
    } else {
        colorize("disabled", "33", colors)
    }
}

pub fn format_optional_str(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "-".to_string())
}

/// Coarse handshake age for table cells, e.g. `42s`, `5m`, `3h`, `2d`.
pub fn format_age(ts: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ts) = ts else {
        return "-".to_string();
    };
    let secs = now.signed_duration_since(ts).num_seconds();
    if secs < 0 {
        return "0s".to_string();
    }
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86_400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86_400)
    }
}

/// Traffic counters scale to one decimal place; exact multiples and raw
/// byte counts stay integral.
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    const GIB: u64 = 1024 * MIB;

    if bytes >= GIB {
        format_scaled(bytes, GIB, "GiB")
    } else if bytes >= MIB {
        format_scaled(bytes, MIB, "MiB")
    } else if bytes >= KIB {
        format_scaled(bytes, KIB, "KiB")
    } else {
        format!("{bytes} B")
    }
}

fn format_scaled(bytes: u64, unit: u64, label: &str) -> String {
    if bytes.is_multiple_of(unit) {
        format!("{} {label}", bytes / unit)
    } else {
        format!("{:.1} {label}", bytes as f64 / unit as f64)
    }
}
