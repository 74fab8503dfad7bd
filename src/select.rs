//! Parsing of the user's volume selection.
//!
//! [`select`] is pure: it maps the raw input line to the chosen volumes
//! without touching the terminal. The interactive re-prompt loop lives in
//! [`crate::prompt`].

use crate::data::Volume;
use crate::error::SelectionError;

/// Input that selects every volume.
pub const SELECT_ALL: &str = "0";

/// Resolves `raw_input` against the enumerated `volumes`.
///
/// - empty input or `"0"` selects all volumes in enumeration order
/// - otherwise a comma-separated list of 1-based indices is expected;
///   the output follows the order of the indices and keeps duplicates
///
/// # Errors
/// * [`SelectionError::InvalidToken`] if a token is not an integer
/// * [`SelectionError::OutOfRange`] if an index is below 1 or above `volumes.len()`
/// * [`SelectionError::NoVolumes`] if there is nothing to select from
pub fn select(volumes: &[Volume], raw_input: &str) -> Result<Vec<Volume>, SelectionError> {
    if volumes.is_empty() {
        return Err(SelectionError::NoVolumes);
    }

    let input = raw_input.trim();
    if input.is_empty() || input == SELECT_ALL {
        return Ok(volumes.to_vec());
    }

    let indices = input
        .split(',')
        .map(|token| parse_index(token, volumes.len()))
        .collect::<Result<Vec<usize>, _>>()?;

    Ok(indices.into_iter().map(|i| volumes[i - 1].clone()).collect())
}

fn parse_index(token: &str, max: usize) -> Result<usize, SelectionError> {
    let token = token.trim();
    let index: i64 = token
        .parse()
        .map_err(|_| SelectionError::InvalidToken(token.to_string()))?;

    if index < 1 || index as u64 > max as u64 {
        return Err(SelectionError::OutOfRange { index, max });
    }
    Ok(index as usize)
}
