use super::error::ExtractError;

/// Placeholder the site shows instead of a number.
const NO_VALUE: &str = "N/A";

/// Trimmed badge text, or `None` when the badge carries no value.
fn present(input: &str) -> Option<&str> {
    let input = input.trim();
    if input.is_empty() || input == NO_VALUE {
        None
    } else {
        Some(input)
    }
}

/// Non-negative integer badge. Blank and "N/A" are `None`; anything else
/// must parse.
pub fn count(stat: &'static str, input: &str) -> Result<Option<u32>, ExtractError> {
    let Some(value) = present(input) else {
        return Ok(None);
    };
    value
        .parse::<u32>()
        .map(Some)
        .map_err(|source| ExtractError::InvalidCount {
            stat,
            value: value.to_string(),
            source,
        })
}

pub fn rate(stat: &'static str, input: &str) -> Result<Option<f64>, ExtractError> {
    let Some(value) = present(input) else {
        return Ok(None);
    };
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|source| ExtractError::InvalidRate {
            stat,
            value: value.to_string(),
            source,
        })
}

/// Percentage badge such as `54.2%`. A missing win rate reads as zero.
pub fn win_rate(input: &str) -> Result<f64, ExtractError> {
    let Some(value) = present(input) else {
        return Ok(0.0);
    };
    let value = value.trim_matches('%').trim();
    value
        .parse::<f64>()
        .map_err(|source| ExtractError::InvalidWinRate {
            value: value.to_string(),
            source,
        })
}

/// Scales a displayed rating (`6.7`) to the integer stored per mode (`67`).
/// Floors `(raw + 0.05) * 10`; this is not rounding.
pub fn battle_rating(raw: f64) -> u32 {
    ((raw + 0.05) * 10.0).floor() as u32
}
