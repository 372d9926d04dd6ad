//! URL-safe slug derivation.

/// Derive a URL-friendly slug from free text.
///
/// Lowercases, folds common Latin diacritics to ASCII, replaces every run of
/// other characters with a single hyphen and trims hyphens at both ends.
/// Empty or whitespace-only input yields an empty string. Idempotent.
pub fn slugify(input: &str) -> String {
    let mut mapped = String::with_capacity(input.len());
    for c in input.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            mapped.push(c);
        } else if let Some(folded) = fold_diacritic(c) {
            mapped.push_str(folded);
        } else {
            mapped.push('-');
        }
    }

    mapped
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// ASCII fold for the Latin letters that commonly show up in titles.
/// Anything not covered becomes a separator in [`slugify`].
fn fold_diacritic(c: char) -> Option<&'static str> {
    Some(match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ç' | 'ć' | 'č' => "c",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => "i",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => "o",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' => "u",
        'ý' | 'ÿ' => "y",
        'š' | 'ś' => "s",
        'ž' | 'ź' | 'ż' => "z",
        'ď' | 'đ' => "d",
        'ľ' | 'ł' => "l",
        'ř' => "r",
        'ť' => "t",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("My Post"), "my-post");
        assert_eq!(slugify("my post!!"), "my-post");
        assert_eq!(slugify("Hello, World"), "hello-world");
    }

    #[test]
    fn folds_diacritics() {
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
        assert_eq!(slugify("Straße über Łódź"), "strasse-uber-lodz");
    }

    #[test]
    fn collapses_and_trims_hyphens() {
        assert_eq!(slugify("  --a---b--  "), "a-b");
        assert_eq!(slugify("a - b _ c"), "a-b-c");
    }

    #[test]
    fn blank_input_yields_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn is_idempotent() {
        for input in ["My Post!!", "Crème Brûlée", "  a -- b  ", "already-a-slug"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
        }
    }
}
