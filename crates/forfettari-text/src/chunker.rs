//! Overlapping fixed-size character windows.
//!
//! Offsets are counted in `char`s, never bytes, so multi-byte text is never
//! cut inside a code point. A window that does not reach the end of the text
//! is pulled back to its last whitespace when that whitespace lies past 60%
//! of the window, so words are not split. The next window starts `overlap`
//! characters before the previous end.

use std::ops::Range;

use forfettari_core::config::ChunkingConfig;
use forfettari_core::Result;

/// Fraction of `chunk_size` a whitespace must lie beyond to be used as a cut point.
const WHITESPACE_BACKOFF: f64 = 0.6;

/// Character ranges of each window over `text.trim()`, before per-chunk trimming.
pub fn chunk_spans(text: &str, config: &ChunkingConfig) -> Result<Vec<Range<usize>>> {
    config.validate()?;
    let chars: Vec<char> = text.trim().chars().collect();
    Ok(spans_over(&chars, config))
}

/// Split `text` into trimmed, non-empty overlapping chunks.
pub fn chunk(text: &str, config: &ChunkingConfig) -> Result<Vec<String>> {
    config.validate()?;
    let chars: Vec<char> = text.trim().chars().collect();
    Ok(spans_over(&chars, config)
        .into_iter()
        .map(|span| chars[span].iter().collect::<String>().trim().to_string())
        .filter(|c| !c.is_empty())
        .collect())
}

fn spans_over(chars: &[char], config: &ChunkingConfig) -> Vec<Range<usize>> {
    let len = chars.len();
    let min_cut = config.chunk_size as f64 * WHITESPACE_BACKOFF;
    let mut spans = Vec::new();
    let mut start = 0;
    while start < len {
        let mut end = (start + config.chunk_size).min(len);
        if end < len {
            if let Some(offset) = chars[start..end].iter().rposition(|c| c.is_whitespace()) {
                if offset as f64 > min_cut {
                    end = start + offset;
                }
            }
        }
        spans.push(start..end);
        if end >= len {
            break;
        }
        // Large overlaps combined with a whitespace cut could step backwards.
        start = end.saturating_sub(config.overlap).max(start + 1);
    }
    spans
}
