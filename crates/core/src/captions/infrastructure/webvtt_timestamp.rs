use crate::captions::domain::caption_parser::CueError;

/// Parse a WebVTT timestamp (`HH:MM:SS.mmm` or `MM:SS.mmm`) into seconds.
///
/// Hour and minute fields must be plain digits. The seconds field may carry a
/// fractional part of any length.
pub fn parse_timestamp(raw: &str) -> Result<f64, CueError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(CueError::EmptyTimestamp);
    }

    let invalid = || CueError::InvalidTimestamp(text.to_string());
    let parts: Vec<&str> = text.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (
            parse_whole(h).ok_or_else(invalid)?,
            parse_whole(m).ok_or_else(invalid)?,
            *s,
        ),
        [m, s] => (0, parse_whole(m).ok_or_else(invalid)?, *s),
        _ => return Err(invalid()),
    };
    let seconds = parse_seconds(seconds).ok_or_else(invalid)?;

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
}

fn parse_whole(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_seconds(field: &str) -> Option<f64> {
    let mut halves = field.splitn(2, '.');
    let whole = halves.next()?;
    let fraction = halves.next().unwrap_or("0");
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || !digits(fraction) {
        return None;
    }
    field.parse().ok()
}

/// Strip a leading inline timestamp (`<00:01.500>word`) from a payload word.
///
/// Returns the timestamp (if one was present and valid) and the remaining text.
/// A malformed tag is left in place and treated as part of the word.
pub fn split_inline_timestamp(word: &str) -> (Option<f64>, &str) {
    let Some(rest) = word.strip_prefix('<') else {
        return (None, word);
    };
    let Some(close) = rest.find('>') else {
        return (None, word);
    };
    match parse_timestamp(&rest[..close]) {
        Ok(seconds) => (Some(seconds), &rest[close + 1..]),
        Err(_) => (None, word),
    }
}
