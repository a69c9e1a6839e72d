/// Canonical form of a person's name: no whitespace anywhere, lowercase.
pub fn normalize_name(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Canonical form of a company name used for duplicate detection.
///
/// Keeps only word characters and Hangul syllables. Company codes are exact keys and never
/// pass through here.
pub fn normalize_company_name(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || is_hangul_syllable(*c))
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_hangul_syllable(c: char) -> bool {
    ('\u{ac00}'..='\u{d7a3}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_ignore_spacing_and_case() {
        assert_eq!(normalize_name(" Kim Chul  Soo "), normalize_name("kimchulsoo"));
        assert_eq!(normalize_name("\t홍 길동\n"), "홍길동");
    }

    #[test]
    fn company_names_drop_punctuation() {
        assert_eq!(normalize_company_name("ACME "), "acme");
        assert_eq!(normalize_company_name("(주) 한빛-전자"), "주한빛전자");
        assert_eq!(normalize_company_name("Acme & Co."), "acmeco");
        assert_eq!(normalize_company_name("team_one"), "team_one");
    }

    #[test]
    fn normalization_is_idempotent() {
        for sample in [" Kim Chul  Soo ", "İstanbul Ltd.", "(주) 한빛 전자", "", "   "] {
            let once = normalize_name(sample);
            assert_eq!(normalize_name(&once), once);
            let once = normalize_company_name(sample);
            assert_eq!(normalize_company_name(&once), once);
        }
    }
}
