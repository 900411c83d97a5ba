use once_cell::sync::Lazy;
use regex::Regex;

/// Separator Scryfall puts between the face names of a multi-faced card.
pub const FACE_SEPARATOR: &str = " // ";

static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a raw display name into its canonical browser form: Latin
/// diacritics folded to ASCII, typographic punctuation folded, whitespace
/// collapsed and trimmed. Casing is preserved; grouping case-folds separately.
pub fn normalize_card_name(name: &str) -> String {
    let mut folded = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => folded.push('a'),
            'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => folded.push('A'),
            'é' | 'è' | 'ê' | 'ë' => folded.push('e'),
            'É' | 'È' | 'Ê' | 'Ë' => folded.push('E'),
            'í' | 'ì' | 'î' | 'ï' => folded.push('i'),
            'Í' | 'Ì' | 'Î' | 'Ï' => folded.push('I'),
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => folded.push('o'),
            'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => folded.push('O'),
            'ú' | 'ù' | 'û' | 'ü' => folded.push('u'),
            'Ú' | 'Ù' | 'Û' | 'Ü' => folded.push('U'),
            'ý' | 'ÿ' => folded.push('y'),
            'ñ' => folded.push('n'),
            'Ñ' => folded.push('N'),
            'ç' => folded.push('c'),
            'Ç' => folded.push('C'),
            'æ' => folded.push_str("ae"),
            'Æ' => folded.push_str("Ae"),
            'œ' => folded.push_str("oe"),
            'Œ' => folded.push_str("Oe"),
            '\u{2018}' | '\u{2019}' | '\u{02BC}' => folded.push('\''),
            '\u{201C}' | '\u{201D}' => folded.push('"'),
            '\u{2013}' | '\u{2014}' => folded.push('-'),
            _ => folded.push(c),
        }
    }
    WHITESPACE_RUNS
        .replace_all(folded.trim(), " ")
        .into_owned()
}

/// Numeric part of a collector number: every digit of the number in order,
/// parsed as one integer. `"218a"` yields 218; a number with no digits at
/// all (promo stars and the like) has no numeric part.
pub fn collector_number_numeric(number: &str) -> Option<u64> {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}
