pub fn sanitize_code_content(code: &str) -> String {
    code.chars()
        .filter(|&c| c == '\n' || c == '\r' || c == '\t' || c >= ' ')
        .collect()
}

/// Renders remaining milliseconds the way the workspace header shows them,
/// e.g. 7000 -> "0:07".
pub fn format_remaining(remaining_ms: u64) -> String {
    let minutes = remaining_ms / 60_000;
    let seconds = (remaining_ms % 60_000) / 1_000;
    format!("{}:{:02}", minutes, seconds)
}
