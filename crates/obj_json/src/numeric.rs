//! Float token parsing shared by the OBJ and MTL parsers

use crate::config::NumericMode;
use crate::error::{ParseError, Result};

/// Parse a single float component
///
/// A missing token is treated like a malformed one: NaN in lenient mode,
/// `MalformedNumber` in strict mode.
pub(crate) fn parse_float(token: Option<&str>, line: usize, mode: NumericMode) -> Result<f64> {
    let raw = token.unwrap_or("");
    match raw.parse::<f64>() {
        Ok(value) => Ok(value),
        Err(_) => match mode {
            NumericMode::Lenient => {
                log::warn!("Line {}: malformed number '{}', using NaN", line, raw);
                Ok(f64::NAN)
            }
            NumericMode::Strict => Err(ParseError::MalformedNumber {
                line,
                token: raw.to_string(),
            }),
        },
    }
}

/// Parse the first `N` tokens as floats; extra tokens are ignored
pub(crate) fn parse_components<const N: usize>(
    tokens: &[&str],
    line: usize,
    mode: NumericMode,
) -> Result<[f64; N]> {
    let mut out = [0.0; N];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = parse_float(tokens.get(i).copied(), line, mode)?;
    }
    Ok(out)
}
