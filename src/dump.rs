//! Hardware-interop twiddle table dump. Grounded in `NTT.cpp`'s
//! `save_twiddle_table`, which hex-dumps `omega^i mod q` one entry per line
//! for FPGA test-vector consumers.

use crate::bigint::{bit_length, BigInt};
use std::io::Write;
use std::path::Path;

/// Writes `n/2` entries `omega^i mod q`, one per line, as lowercase hex
/// zero-padded to `ceil(bitlength(q)/4)` nibbles.
pub fn save_twiddle_table(path: &Path, n: usize, omega: &BigInt, q: &BigInt) -> std::io::Result<()> {
    let nibbles = bit_length(q).div_ceil(4).max(1) as usize;
    let mut file = std::fs::File::create(path)?;

    let mut power = BigInt::from(1u32);
    for _ in 0..(n / 2) {
        writeln!(file, "{power:0width$x}", width = nibbles)?;
        power = (&power * omega) % q;
    }

    Ok(())
}
