//! Row packing.
//!
//! Pixels are packed left to right, most significant bit first. Each row
//! starts on a fresh byte and the last byte of a row is zero-padded. For a
//! 2bpp row `[1, 2, 3]` the packed byte is `0b01_10_11_00`.

/// Append one packed row of `bpp`-bit values to `out`.
///
/// Values are masked to `bpp` bits. Writes exactly `ceil(len * bpp / 8)` bytes.
pub fn pack_row(values: &[u8], bpp: u8, out: &mut Vec<u8>) {
    debug_assert!(matches!(bpp, 1 | 2 | 4 | 8));

    if bpp == 8 {
        out.extend_from_slice(values);
        return;
    }

    let mask = (1u8 << bpp) - 1;
    let mut current_byte: u8 = 0;
    let mut bits_in_byte: u8 = 0;

    for &value in values {
        // Pack from MSB to LSB
        let shift = 8 - bits_in_byte - bpp;
        current_byte |= (value & mask) << shift;
        bits_in_byte += bpp;

        if bits_in_byte == 8 {
            out.push(current_byte);
            current_byte = 0;
            bits_in_byte = 0;
        }
    }

    // Flush remaining bits at end of row, low bits stay zero
    if bits_in_byte > 0 {
        out.push(current_byte);
    }
}

/// Unpack `width` values of `bpp` bits from one packed row.
///
/// `row` must hold at least `ceil(width * bpp / 8)` bytes.
pub fn unpack_row(row: &[u8], bpp: u8, width: usize) -> Vec<u8> {
    debug_assert!(matches!(bpp, 1 | 2 | 4 | 8));

    if bpp == 8 {
        return row[..width].to_vec();
    }

    let per_byte = (8 / bpp) as usize;
    let mask = (1u8 << bpp) - 1;
    (0..width)
        .map(|x| {
            let byte = row[x / per_byte];
            let shift = 8 - bpp * (1 + (x % per_byte) as u8);
            (byte >> shift) & mask
        })
        .collect()
}
