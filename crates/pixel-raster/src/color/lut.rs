//! Bit-depth lookup tables.
//!
//! For every channel width N in 2..=6 there is an `EXPAND_N` table mapping an
//! N-bit value to 8 bits and a `REDUCE_N` table mapping 8 bits back to N bits:
//!
//! - `EXPAND_N[v] = round(v * 255 / (2^N - 1))`
//! - `REDUCE_N[v] = round(v * (2^N - 1) / 255)`
//!
//! Both round half up and are evaluated at compile time. `REDUCE_N[EXPAND_N[v]] == v`
//! holds for every N-bit `v`.

const fn build_expand<const LEN: usize>() -> [u8; LEN] {
    let max = LEN as u32 - 1;
    let mut lut = [0u8; LEN];
    let mut v = 0;
    while v < LEN {
        // floor(x + 1/2) with x = v * 255 / max, kept in integers
        lut[v] = ((2 * v as u32 * 255 + max) / (2 * max)) as u8;
        v += 1;
    }
    lut
}

const fn build_reduce(bits: u32) -> [u8; 256] {
    let max = (1u32 << bits) - 1;
    let mut lut = [0u8; 256];
    let mut v = 0;
    while v < 256 {
        lut[v] = ((2 * v as u32 * max + 255) / 510) as u8;
        v += 1;
    }
    lut
}

pub static EXPAND_2: [u8; 4] = build_expand::<4>();
pub static EXPAND_3: [u8; 8] = build_expand::<8>();
pub static EXPAND_4: [u8; 16] = build_expand::<16>();
pub static EXPAND_5: [u8; 32] = build_expand::<32>();
pub static EXPAND_6: [u8; 64] = build_expand::<64>();

pub static REDUCE_2: [u8; 256] = build_reduce(2);
pub static REDUCE_3: [u8; 256] = build_reduce(3);
pub static REDUCE_4: [u8; 256] = build_reduce(4);
pub static REDUCE_5: [u8; 256] = build_reduce(5);
pub static REDUCE_6: [u8; 256] = build_reduce(6);

static EXPAND: [&[u8]; 5] = [&EXPAND_2, &EXPAND_3, &EXPAND_4, &EXPAND_5, &EXPAND_6];
static REDUCE: [&[u8; 256]; 5] = [&REDUCE_2, &REDUCE_3, &REDUCE_4, &REDUCE_5, &REDUCE_6];

/// Expands an N-bit channel value to 8 bits. Bits above N are ignored.
///
/// # Panics
///
/// Panics if `bits` is outside 2..=6; other widths have no table.
#[inline]
pub fn expand(bits: u32, v: u8) -> u8 {
    let table = EXPAND[bits as usize - 2];
    table[v as usize & (table.len() - 1)]
}

/// Reduces an 8-bit channel value to N bits.
///
/// # Panics
///
/// Panics if `bits` is outside 2..=6.
#[inline]
pub fn reduce(bits: u32, v: u8) -> u8 {
    REDUCE[bits as usize - 2][v as usize]
}
