//! LRC lyric parsing.
//!
//! Fetching the lyric resource is the host's job; this module turns the
//! fetched text into timed lines the consumer can align against the engine's
//! reported playback position.

use std::cmp::Ordering;

/// One timed lyric line.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    /// Offset from the start of the track, seconds.
    pub time: f64,
    /// Display text.
    pub text: String,
}

/// Parse an LRC document into timed lines sorted ascending by timestamp.
///
/// Recognized lines have the form `[mm:ss.xx]text`; anything without a
/// parsable `mm:ss` timestamp (metadata tags like `[ti:...]`, malformed
/// lines) is discarded.
pub fn parse_lrc(source: &str) -> Vec<LyricLine> {
    let mut lines: Vec<LyricLine> = source
        .lines()
        .filter_map(|raw| {
            let rest = raw.trim().strip_prefix('[')?;
            let (stamp, text) = rest.split_once(']')?;
            let time = parse_timestamp(stamp)?;
            Some(LyricLine {
                time,
                text: text.trim().to_string(),
            })
        })
        .collect();

    lines.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal));
    lines
}

fn parse_timestamp(stamp: &str) -> Option<f64> {
    let (minutes, seconds) = stamp.split_once(':')?;
    let minutes: f64 = minutes.trim().parse().ok()?;
    let seconds: f64 = seconds.trim().parse().ok()?;
    if !minutes.is_finite() || !seconds.is_finite() || minutes < 0.0 || seconds < 0.0 {
        return None;
    }
    Some(minutes * 60.0 + seconds)
}
