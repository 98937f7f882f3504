//! Accent and confusable folding.
//!
//! Extended-Latin and Cyrillic letters are transliterated to their nearest ASCII
//! letter or a short Latin digraph, so the later ASCII-oriented stages see a
//! keyword spelled with look-alike letters (`ѕеlесt`) the same way they see
//! `select`. The hyphen always folds to an underscore.
//!
//! The Latin-1 Supplement block (U+0080..=U+00FF) is deliberately absent: those
//! code points are what raw bytes decode to when binary payloads are reinterpreted
//! as text, and the extended-ASCII stage strips them instead.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Replacement for `-`.
pub const HYPHEN_REPLACEMENT: char = '_';

/// Character-to-ASCII transliterations applied by the folding stage.
pub const FOLD_TABLE: &[(char, &str)] = &[
    // Latin Extended-A
    ('Ā', "A"), ('ā', "a"), ('Ă', "A"), ('ă', "a"), ('Ą', "A"), ('ą', "a"),
    ('Ć', "C"), ('ć', "c"), ('Ĉ', "C"), ('ĉ', "c"), ('Ċ', "C"), ('ċ', "c"), ('Č', "C"), ('č', "c"),
    ('Ď', "D"), ('ď', "d"), ('Đ', "D"), ('đ', "d"),
    ('Ē', "E"), ('ē', "e"), ('Ĕ', "E"), ('ĕ', "e"), ('Ė', "E"), ('ė', "e"), ('Ę', "E"), ('ę', "e"),
    ('Ě', "E"), ('ě', "e"),
    ('Ĝ', "G"), ('ĝ', "g"), ('Ğ', "G"), ('ğ', "g"), ('Ġ', "G"), ('ġ', "g"), ('Ģ', "G"), ('ģ', "g"),
    ('Ĥ', "H"), ('ĥ', "h"), ('Ħ', "H"), ('ħ', "h"),
    ('Ĩ', "I"), ('ĩ', "i"), ('Ī', "I"), ('ī', "i"), ('Ĭ', "I"), ('ĭ', "i"), ('Į', "I"), ('į', "i"),
    ('İ', "I"), ('ı', "i"), ('Ĳ', "IJ"), ('ĳ', "ij"),
    ('Ĵ', "J"), ('ĵ', "j"),
    ('Ķ', "K"), ('ķ', "k"), ('ĸ', "k"),
    ('Ĺ', "L"), ('ĺ', "l"), ('Ļ', "L"), ('ļ', "l"), ('Ľ', "L"), ('ľ', "l"), ('Ŀ', "L"), ('ŀ', "l"),
    ('Ł', "L"), ('ł', "l"),
    ('Ń', "N"), ('ń', "n"), ('Ņ', "N"), ('ņ', "n"), ('Ň', "N"), ('ň', "n"), ('ŉ', "n"),
    ('Ŋ', "N"), ('ŋ', "n"),
    ('Ō', "O"), ('ō', "o"), ('Ŏ', "O"), ('ŏ', "o"), ('Ő', "O"), ('ő', "o"), ('Œ', "OE"), ('œ', "oe"),
    ('Ŕ', "R"), ('ŕ', "r"), ('Ŗ', "R"), ('ŗ', "r"), ('Ř', "R"), ('ř', "r"),
    ('Ś', "S"), ('ś', "s"), ('Ŝ', "S"), ('ŝ', "s"), ('Ş', "S"), ('ş', "s"), ('Š', "S"), ('š', "s"),
    ('Ţ', "T"), ('ţ', "t"), ('Ť', "T"), ('ť', "t"), ('Ŧ', "T"), ('ŧ', "t"),
    ('Ũ', "U"), ('ũ', "u"), ('Ū', "U"), ('ū', "u"), ('Ŭ', "U"), ('ŭ', "u"), ('Ů', "U"), ('ů', "u"),
    ('Ű', "U"), ('ű', "u"), ('Ų', "U"), ('ų', "u"),
    ('Ŵ', "W"), ('ŵ', "w"),
    ('Ŷ', "Y"), ('ŷ', "y"), ('Ÿ', "Y"),
    ('Ź', "Z"), ('ź', "z"), ('Ż', "Z"), ('ż', "z"), ('Ž', "Z"), ('ž', "z"),
    ('ſ', "s"),
    // Latin Extended-B
    ('ƒ', "f"), ('Ǎ', "A"), ('ǎ', "a"), ('Ǐ', "I"), ('ǐ', "i"), ('Ǒ', "O"), ('ǒ', "o"),
    ('Ǔ', "U"), ('ǔ', "u"), ('Ș', "S"), ('ș', "s"), ('Ț', "T"), ('ț', "t"),
    // Cyrillic
    ('А', "A"), ('а', "a"), ('Б', "B"), ('б', "b"), ('В', "V"), ('в', "v"), ('Г', "G"), ('г', "g"),
    ('Д', "D"), ('д', "d"), ('Е', "E"), ('е', "e"), ('Ё', "Yo"), ('ё', "yo"), ('Ж', "Zh"), ('ж', "zh"),
    ('З', "Z"), ('з', "z"), ('И', "I"), ('и', "i"), ('Й', "Y"), ('й', "y"), ('К', "K"), ('к', "k"),
    ('Л', "L"), ('л', "l"), ('М', "M"), ('м', "m"), ('Н', "N"), ('н', "n"), ('О', "O"), ('о', "o"),
    ('П', "P"), ('п', "p"), ('Р', "R"), ('р', "r"), ('С', "S"), ('с', "s"), ('Т', "T"), ('т', "t"),
    ('У', "U"), ('у', "u"), ('Ф', "F"), ('ф', "f"), ('Х', "H"), ('х', "h"), ('Ц', "Ts"), ('ц', "ts"),
    ('Ч', "Ch"), ('ч', "ch"), ('Ш', "Sh"), ('ш', "sh"), ('Щ', "Sch"), ('щ', "sch"),
    ('Ы', "Y"), ('ы', "y"), ('Э', "E"), ('э', "e"), ('Ю', "Yu"), ('ю', "yu"), ('Я', "Ya"), ('я', "ya"),
    ('Є', "Ye"), ('є', "ye"), ('І', "I"), ('і', "i"), ('Ї', "Yi"), ('ї', "yi"), ('Ґ', "G"), ('ґ', "g"),
    ('Ѕ', "S"), ('ѕ', "s"), ('Ј', "J"), ('ј', "j"),
];

static FOLD_MAP: Lazy<HashMap<char, &'static str>> =
    Lazy::new(|| FOLD_TABLE.iter().copied().collect());

/// The fold table as a lookup map.
pub fn fold_table() -> &'static HashMap<char, &'static str> {
    &FOLD_MAP
}

/// Folds every character of `input` through the table; `-` becomes `_`.
pub fn fold_characters(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c == '-' {
            out.push(HYPHEN_REPLACEMENT);
            continue;
        }
        match FOLD_MAP.get(&c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}
