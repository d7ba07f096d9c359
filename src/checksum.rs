//! Short filename checksums.
//!
//! When NTFS runs out of `BASE~1`..`BASE~4` style names it switches to names built
//! from the first two characters of the base and a 16-bit checksum of the long
//! name, e.g. `IN2EF5~1.HTM`. Windows 7 changed the checksum algorithm, so servers
//! in the wild produce either form.

use serde::Serialize;

/// Which checksum algorithm produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Windows 7 and later.
    Modern,
    /// Windows NT through Vista.
    Original,
}

impl Algorithm {
    /// Returns the lowercase name of the algorithm.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Modern => "modern",
            Algorithm::Original => "original",
        }
    }

    /// Compute the checksum of `name` with this algorithm.
    #[must_use]
    pub fn checksum(self, name: &str) -> u16 {
        match self {
            Algorithm::Modern => checksum(name),
            Algorithm::Original => checksum_original(name),
        }
    }
}

/// Windows 7+ checksum of a long filename.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub fn checksum(name: &str) -> u16 {
    let mut checksum: u16 = 0;
    for unit in name.encode_utf16() {
        checksum = checksum.wrapping_mul(0x25).wrapping_add(unit);
    }

    let mut temp = i32::from(checksum).wrapping_mul(314_159_269);
    if temp < 0 {
        temp = temp.wrapping_neg();
    }
    let quotient = (i64::from(temp).wrapping_mul(1_152_921_497) as u64) >> 60;
    temp = temp.wrapping_sub(quotient.wrapping_mul(1_000_000_007) as i32);

    reverse_nibbles(temp as u16)
}

/// Pre-Windows 7 checksum of a long filename.
#[must_use]
pub fn checksum_original(name: &str) -> u16 {
    let units: Vec<u16> = name.encode_utf16().collect();

    match units.as_slice() {
        [] => 0,
        [only] => *only,
        [first, second] => (first << 8).wrapping_add(*second),
        [first, second, ..] => {
            let mut hash = (first << 8).wrapping_add(*second);
            let mut saved = hash;

            for pair in units[2..].chunks(2) {
                hash = (hash << 7).wrapping_add(pair[0]);
                hash = (saved >> 1).wrapping_add(hash << 8);
                if let Some(next) = pair.get(1) {
                    hash = hash.wrapping_add(*next);
                }
                saved = hash;
            }

            hash
        }
    }
}

/// Both checksums of `name`, modern first. The original is omitted when it is identical.
#[must_use]
pub fn checksums(name: &str) -> Vec<u16> {
    let modern = checksum(name);
    let original = checksum_original(name);
    if modern == original {
        vec![modern]
    } else {
        vec![modern, original]
    }
}

/// Render a checksum the way it appears in a short name.
#[must_use]
pub fn format_checksum(checksum: u16) -> String {
    format!("{checksum:04X}")
}

fn reverse_nibbles(value: u16) -> u16 {
    ((value & 0xf000) >> 12)
        | ((value & 0x0f00) >> 4)
        | ((value & 0x00f0) << 4)
        | ((value & 0x000f) << 12)
}
