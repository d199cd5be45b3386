/// Formats seconds as M:SS or H:MM:SS.
///
/// Non-finite or negative input (an engine that cannot tell yet) renders as
/// `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total_secs = seconds.floor() as u64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// "0:34 / 3:10", or "0:34 / --:--" while the duration is unknown
pub fn format_progress_label(elapsed: f64, duration: Option<f64>) -> String {
    let total = duration
        .filter(|d| d.is_finite() && *d > 0.0)
        .map(format_time)
        .unwrap_or_else(|| "--:--".to_string());
    format!("{} / {}", format_time(elapsed), total)
}

/// 0.0 - 1.0 rendered as a whole percentage ("70%")
pub fn format_percent(fraction: f64) -> String {
    format!("{}%", (fraction.clamp(0.0, 1.0) * 100.0).round() as u32)
}
