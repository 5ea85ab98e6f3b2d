//! Compression RLE des données hexadécimales d'un Graphic Field.
//!
//! Un code de répétition précède le caractère répété : une lettre minuscule
//! `g..z` compte 20 à 400, une lettre majuscule `G..Y` compte 1 à 19. Les
//! deux se cumulent, donc un code couvre au plus 419 répétitions.

/// Longueur maximale couverte par un seul code de répétition.
pub const MAX_RUN: usize = 419;

/// Rangée entière à `0` (blanc).
pub const ROW_ZEROS: char = ',';

/// Rangée entière à `F` (noir).
pub const ROW_ONES: char = '!';

/// Rangée identique à la précédente.
pub const REPEAT_ROW: char = ':';

/// Index 1..=19 → `G..Y`. Index 0 inutilisé.
const LOW_CODES: &[u8; 20] = b" GHIJKLMNOPQRSTUVWXY";

/// Index 1..=20 → `g..z` (multiples de 20). Index 0 inutilisé.
const HIGH_CODES: &[u8; 21] = b" ghijklmnopqrstuvwxyz";

/// Short runs are cheaper written out literally.
const LITERAL_MAX: usize = 4;

#[inline]
fn push_code(dst: &mut String, count: usize, ch: char) {
    let high = count / 20;
    let low = count % 20;
    if high > 0 {
        dst.push(char::from(HIGH_CODES[high]));
    }
    if low > 0 {
        dst.push(char::from(LOW_CODES[low]));
    }
    dst.push(ch);
}

/// Écrit le code de répétition de `count` fois `ch`.
///
/// Au-delà de 419, des codes de 419 sont émis jusqu'à ce que le reste tienne
/// dans un seul code.
///
/// # Example
/// ```
/// use zgf_encode::rle::write_repeat_code;
/// let mut out = String::new();
/// write_repeat_code(&mut out, 8, 'F');
/// assert_eq!(out, "NF");
/// out.clear();
/// write_repeat_code(&mut out, 419, '0');
/// assert_eq!(out, "zY0");
/// out.clear();
/// write_repeat_code(&mut out, 420, '0');
/// assert_eq!(out, "zY0G0");
/// ```
pub fn write_repeat_code(dst: &mut String, count: usize, ch: char) {
    let mut remaining = count;
    while remaining > MAX_RUN {
        push_code(dst, MAX_RUN, ch);
        remaining -= MAX_RUN;
    }
    push_code(dst, remaining, ch);
}

#[inline]
fn flush_run(dst: &mut String, ch: char, len: usize) {
    if len > LITERAL_MAX {
        write_repeat_code(dst, len, ch);
    } else {
        for _ in 0..len {
            dst.push(ch);
        }
    }
}

/// Compresse une rangée hexadécimale et l'ajoute à `dst`.
///
/// Une rangée faite d'un seul caractère répété devient `,` pour `0` et `!`
/// pour `F`. Les sous-séquences ne bénéficient jamais de ces raccourcis.
///
/// # Example
/// ```
/// use zgf_encode::rle::compress_ascii;
/// let mut out = String::new();
/// compress_ascii(&mut out, "FFFFFFFF000000");
/// assert_eq!(out, "NFL0");
/// ```
pub fn compress_ascii(dst: &mut String, input: &str) {
    let start = dst.len();
    let mut chars = input.chars();
    let Some(first) = chars.next() else {
        return;
    };

    let mut current = first;
    let mut run = 1usize;
    let mut total = 1usize;
    let mut single_run = true;

    for ch in chars {
        total += 1;
        if ch == current {
            run += 1;
            continue;
        }
        flush_run(dst, current, run);
        single_run = false;
        current = ch;
        run = 1;
    }

    if single_run {
        match current {
            '0' => {
                dst.push(ROW_ZEROS);
                return;
            }
            'F' => {
                dst.push(ROW_ONES);
                return;
            }
            _ => {}
        }
    }
    flush_run(dst, current, run);

    if dst.len() == start {
        write_repeat_code(dst, total, current);
    }
}

/// Convenience returning the compressed row as a new `String`.
///
/// # Example
/// ```
/// use zgf_encode::rle::compress_row;
/// assert_eq!(compress_row("0000"), ",");
/// assert_eq!(compress_row("FFFFFF"), "!");
/// assert_eq!(compress_row("F00000000"), "FN0");
/// ```
#[must_use]
pub fn compress_row(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    compress_ascii(&mut out, input);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Décodeur de référence, pour vérifier la réversibilité.
    fn expand(compressed: &str, row_len: usize) -> String {
        let mut out = String::with_capacity(row_len);
        let mut count = 0usize;
        for ch in compressed.chars() {
            match ch {
                'g'..='z' => count += (ch as usize - 'g' as usize + 1) * 20,
                'G'..='Y' => count += ch as usize - 'G' as usize + 1,
                ROW_ZEROS | ROW_ONES => {
                    let fill = if ch == ROW_ZEROS { '0' } else { 'F' };
                    while out.len() < row_len {
                        out.push(fill);
                    }
                }
                _ => {
                    for _ in 0..count.max(1) {
                        out.push(ch);
                    }
                    count = 0;
                }
            }
        }
        out
    }

    /// Rangée hexadécimale déterministe faite de longues séquences.
    fn runs_row(seed: u32, len: usize) -> String {
        let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
        let mut out = String::with_capacity(len);
        while out.len() < len {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let digit = b"0123456789ABCDEF"[(state >> 16) as usize % 16];
            let run = (state >> 8) as usize % 600 + 1;
            for _ in 0..run.min(len - out.len()) {
                out.push(char::from(digit));
            }
        }
        out
    }

    #[test]
    fn reference_example() {
        assert_eq!(compress_row("FFFFFFFF000000"), "NFL0");
    }

    #[test]
    fn short_runs_are_literal() {
        assert_eq!(compress_row("AAAA"), "AAAA");
        assert_eq!(compress_row("0F"), "0F");
        assert_eq!(compress_row("00FF0"), "00FF0");
        assert_eq!(compress_row("AAAAA"), "KA");
    }

    #[test]
    fn whole_row_shortcuts() {
        assert_eq!(compress_row("0"), ",");
        assert_eq!(compress_row("F"), "!");
        assert_eq!(compress_row(&"0".repeat(900)), ",");
        assert_eq!(compress_row(&"F".repeat(162)), "!");
        // Pas de raccourci pour un autre caractère.
        assert_eq!(compress_row(&"A".repeat(40)), "hA");
    }

    #[test]
    fn shortcuts_never_apply_to_sub_runs() {
        assert_eq!(compress_row("00000F"), "K0F");
        assert_eq!(compress_row("AFFFFFF"), "ALF");
    }

    #[test]
    fn high_and_low_codes_combine() {
        assert_eq!(compress_row(&format!("{}B", "A".repeat(20))), "gAB");
        assert_eq!(compress_row(&format!("{}B", "A".repeat(21))), "gGAB");
        assert_eq!(compress_row(&format!("{}B", "A".repeat(419))), "zYAB");
    }

    #[test]
    fn long_runs_are_chunked_by_419() {
        assert_eq!(compress_row(&format!("{}B", "A".repeat(420))), "zYAGAB");
        assert_eq!(compress_row(&format!("{}F", "0".repeat(900))), "zY0zY0iH0F");
    }

    #[test]
    fn empty_input_writes_nothing() {
        let mut out = String::from("x");
        compress_ascii(&mut out, "");
        assert_eq!(out, "x");
    }

    #[test]
    fn appends_to_existing_buffer() {
        let mut out = String::from("prev");
        compress_ascii(&mut out, "FFFFFFFF000000");
        assert_eq!(out, "prevNFL0");
    }

    #[test]
    fn expansion_reproduces_input() {
        for seed in 0..64 {
            let row = runs_row(seed, 1 + (seed as usize * 37) % 2000);
            let packed = compress_row(&row);
            assert_eq!(expand(&packed, row.len()), row, "seed {seed}");
            assert!(packed.len() <= row.len() + row.len() / 2);
        }
    }
}
