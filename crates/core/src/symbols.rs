//! Symbol generation.
//!
//! Labels follow spreadsheet-column order: `A..=Z`, then `AA..=ZZ`, then
//! `AAA...`. This is bijective base-26, so there is no zero digit and every
//! index maps to exactly one label.

use crate::rng::SimpleRng;
use crate::types::ALPHABET_LEN;

/// Label for the `index`-th symbol group.
pub fn symbol_for_index(index: usize) -> String {
    let mut letters = Vec::new();
    // `n` is one past the remaining value so the `i / 26 - 1` step never underflows.
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % ALPHABET_LEN;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / ALPHABET_LEN;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

/// Every label `0..different_tiles`, each repeated `group_size` times, in label order.
pub fn symbol_pool(different_tiles: u32, group_size: u32) -> Vec<String> {
    let mut pool = Vec::with_capacity((different_tiles as usize) * (group_size as usize));
    for i in 0..different_tiles as usize {
        let symbol = symbol_for_index(i);
        for _ in 0..group_size {
            pool.push(symbol.clone());
        }
    }
    pool
}

/// The symbol pool after a uniform shuffle.
pub fn shuffled_pool(different_tiles: u32, group_size: u32, rng: &mut SimpleRng) -> Vec<String> {
    let mut pool = symbol_pool(different_tiles, group_size);
    rng.shuffle(&mut pool);
    pool
}
