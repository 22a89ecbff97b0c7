//! PackBits run-length coding of packed rows.
//!
//! Control byte `n`:
//! - `0..=127`: `n + 1` literal bytes follow
//! - `129..=255`: the next byte repeats `257 - n` times
//! - `128`: never emitted, skipped when decoding
//!
//! Rows are coded independently so a decoder can expand any row once it
//! knows the row stride.

use thiserror::Error;

const MAX_RUN: usize = 128;
const MAX_LITERAL: usize = 128;
/// Shortest repeat worth breaking a literal for.
const MIN_RUN: usize = 3;

/// Errors while expanding a run-length row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RleError {
    #[error("Run-length stream ended before row was complete")]
    Truncated,

    #[error("Run-length row expands past {stride} bytes")]
    Overrun { stride: usize },
}

fn run_length(row: &[u8], start: usize) -> usize {
    let value = row[start];
    row[start..]
        .iter()
        .take(MAX_RUN)
        .take_while(|&&b| b == value)
        .count()
}

/// Append the PackBits coding of `row` to `out`.
pub fn encode_row(row: &[u8], out: &mut Vec<u8>) {
    let mut i = 0;
    while i < row.len() {
        let run = run_length(row, i);
        if run >= MIN_RUN {
            out.push((257 - run) as u8);
            out.push(row[i]);
            i += run;
            continue;
        }

        // Literal stretch until the next worthwhile run or the literal limit
        let start = i;
        while i < row.len() && i - start < MAX_LITERAL && run_length(row, i) < MIN_RUN {
            i += 1;
        }
        out.push((i - start - 1) as u8);
        out.extend_from_slice(&row[start..i]);
    }
}

/// Expand one row of `stride` bytes from the front of `input` into `out`.
///
/// Returns the number of input bytes consumed.
pub fn decode_row(input: &[u8], stride: usize, out: &mut Vec<u8>) -> Result<usize, RleError> {
    let mut pos = 0;
    let mut produced = 0;

    while produced < stride {
        let control = *input.get(pos).ok_or(RleError::Truncated)?;
        pos += 1;

        match control {
            0..=127 => {
                let count = control as usize + 1;
                let literal = input.get(pos..pos + count).ok_or(RleError::Truncated)?;
                if produced + count > stride {
                    return Err(RleError::Overrun { stride });
                }
                out.extend_from_slice(literal);
                pos += count;
                produced += count;
            }
            128 => {}
            _ => {
                let count = 257 - control as usize;
                let value = *input.get(pos).ok_or(RleError::Truncated)?;
                if produced + count > stride {
                    return Err(RleError::Overrun { stride });
                }
                out.extend(std::iter::repeat(value).take(count));
                pos += 1;
                produced += count;
            }
        }
    }

    Ok(pos)
}
