//! Separator bookkeeping for annotated pattern text.
//!
//! Separators are cosmetic: they never affect compilation or matching.
//! Internally a pattern of `L` bits carries `L + 1` separator strings,
//! LSB-aligned: `seps[i]` is the text displayed immediately to the right
//! of bit `i`, and `seps[L]` is the text to the left of the top bit.

/// Characters treated as separators in pattern text.
pub const SEPARATORS: [char; 3] = [' ', '_', '|'];

/// Whether a character is a separator.
pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// Remove all separator characters from pattern text.
pub fn strip(s: &str) -> String {
    s.chars().filter(|&c| !is_separator(c)).collect()
}

/// Split annotated text into bare symbol characters (LSB-first) and the
/// aligned separator list. The separator list always has one more entry
/// than there are symbols.
pub fn unzip(s: &str) -> (Vec<char>, Vec<String>) {
    let mut bits = Vec::new();
    let mut seps = Vec::new();
    let mut pending = Vec::new();
    for c in s.chars().rev() {
        if is_separator(c) {
            pending.push(c);
        } else {
            bits.push(c);
            seps.push(pending.iter().rev().collect());
            pending.clear();
        }
    }
    seps.push(pending.iter().rev().collect());
    (bits, seps)
}

/// Reassemble annotated text from LSB-first symbol characters and an
/// aligned separator list. Inverse of [`unzip`].
pub fn zip(bits: &[char], seps: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&seps[bits.len()]);
    for i in (0..bits.len()).rev() {
        out.push(bits[i]);
        out.push_str(&seps[i]);
    }
    out
}

/// Strip existing separators and regroup into nibbles, inserting `'_'`
/// every four symbols counted from bit 0.
pub fn nibble_grouped(s: &str) -> String {
    let bare = strip(s);
    let mut out: Vec<char> = Vec::new();
    for (n, c) in bare.chars().rev().enumerate() {
        if n > 0 && n % 4 == 0 {
            out.push('_');
        }
        out.push(c);
    }
    out.iter().rev().collect()
}
