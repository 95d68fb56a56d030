//! Text folding shared by search, label parsing and relationship matching.

/// Lowercase, trim and strip the Spanish diacritics (á é í ó ú ü ñ).
///
/// Search boxes compare folded values so `"Pérez"` matches `"perez"`.
pub fn fold(s: &str) -> String {
    s.trim().chars().flat_map(char::to_lowercase).map(strip_diacritic).collect()
}

fn strip_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// True when the trimmed string is empty.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_strips_accents_and_case() {
        assert_eq!(fold("  Pérez "), "perez");
        assert_eq!(fold("MIÉRCOLES"), "miercoles");
        assert_eq!(fold("Muñoz"), "munoz");
        assert_eq!(fold("Cónyuge"), "conyuge");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank(" x "));
    }
}
