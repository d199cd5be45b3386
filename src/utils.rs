pub const APP_NAME: &str = "streamflow";

/// Key of the persisted settings record.
pub const SETTINGS_KEY: &str = "streamflow_settings";

/// Key of the persisted recent-files list.
pub const RECENT_FILES_KEY: &str = "streamflow_recent";

const VIDEO_URL_PREFIXES: &[&str] = &["youtube.com/watch?v=", "youtu.be/", "youtube.com/embed/"];

const VIDEO_ID_TERMINATORS: &[char] = &['&', '\n', '?', '#'];

const BARE_VIDEO_ID_LEN: usize = 11;

/// Extract a YouTube video identifier from user input.
///
/// Accepted shapes:
/// - `…youtube.com/watch?v=<id>`
/// - `…youtu.be/<id>`
/// - `…youtube.com/embed/<id>`
/// - a bare 11-character token of `[A-Za-z0-9_-]`
///
/// For the URL shapes the identifier runs until the first `&`, newline, `?`
/// or `#`. The leftmost URL match in the input wins.
///
/// # Returns
/// * `Some(id)` - the extracted identifier
/// * `None` - input matches none of the shapes
pub fn extract_video_id(input: &str) -> Option<String> {
    for (start, _) in input.char_indices() {
        let rest = &input[start..];
        for prefix in VIDEO_URL_PREFIXES {
            if let Some(tail) = rest.strip_prefix(prefix) {
                let id: String = tail
                    .chars()
                    .take_while(|c| !VIDEO_ID_TERMINATORS.contains(c))
                    .collect();
                if !id.is_empty() {
                    return Some(id);
                }
            }
        }
    }

    if is_bare_video_id(input) {
        return Some(input.to_string());
    }

    None
}

fn is_bare_video_id(input: &str) -> bool {
    input.len() == BARE_VIDEO_ID_LEN
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Public watch page for a video, offered when the embed refuses to play it.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Lowercased extension of a file name (`"Clip.MP4"` → `"mp4"`).
pub fn file_extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Round `value` to the nearest multiple of `step`, then clamp into `[min, max]`.
pub fn snap_to_step(value: f32, step: f32, min: f32, max: f32) -> f32 {
    let snapped = if step > 0.0 {
        (value / step).round() * step
    } else {
        value
    };
    snapped.clamp(min, max)
}
