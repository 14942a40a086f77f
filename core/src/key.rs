//! The `"y-x"` string form of a coordinate, used where cells are identified by text.

use alloc::format;
use alloc::string::String;

use crate::*;

/// Encodes `(y, x)` as `"y-x"`.
pub fn coord_key((y, x): Coord2) -> String {
    format!("{}-{}", y, x)
}

/// Decodes a `"y-x"` key back into `(y, x)`.
///
/// Both fields must be plain decimal digits that fit a [`Coord`]; signs, whitespace and extra separators are
/// rejected.
pub fn parse_coord_key(key: &str) -> Result<Coord2> {
    let (y, x) = key.split_once('-').ok_or(GameError::InvalidCoordKey)?;
    Ok((parse_axis(y)?, parse_axis(x)?))
}

fn parse_axis(field: &str) -> Result<Coord> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GameError::InvalidCoordKey);
    }
    field.parse().map_err(|_| GameError::InvalidCoordKey)
}
