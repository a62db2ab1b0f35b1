//! Splice generated documentation between marker comments in a document.

use thiserror::Error;

pub const START_MARKER: &str = "<!-- TFDOCS_EXTRAS_START -->";
pub const END_MARKER: &str = "<!-- TFDOCS_EXTRAS_END -->";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkerError {
    #[error("start marker `{0}` not found")]
    MissingStart(String),
    #[error("end marker `{0}` not found after start marker")]
    MissingEnd(String),
}

/// Replace everything between the `start` and `end` marker lines with
/// `new_content`. Marker lines must stand on their own (surrounding
/// whitespace allowed) and are kept.
pub fn replace_between_markers(
    content: &str,
    start: &str,
    end: &str,
    new_content: &str,
) -> Result<String, MarkerError> {
    let mut result: Vec<&str> = Vec::new();
    let mut inside = false;
    let mut found_start = false;

    for line in content.split('\n') {
        let trimmed = line.trim();

        if trimmed == start && !inside {
            result.push(line);
            result.push(new_content.trim_end_matches('\n'));
            inside = true;
            found_start = true;
            continue;
        }

        if trimmed == end && inside {
            result.push(line);
            inside = false;
            continue;
        }

        if !inside {
            result.push(line);
        }
    }

    if !found_start {
        return Err(MarkerError::MissingStart(start.to_string()));
    }
    if inside {
        return Err(MarkerError::MissingEnd(end.to_string()));
    }

    Ok(result.join("\n"))
}
