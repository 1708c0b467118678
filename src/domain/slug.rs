//! URL slugs derived from titles and names.
//!
//! A slug is lowercase ASCII made of letters, digits, `_` and single
//! hyphens. Whitespace and punctuation collapse into one hyphen, accented
//! Latin letters fold to their base letter, and anything else that is not
//! ASCII is dropped.

/// Turn arbitrary text into a slug.
///
/// ```
/// use airwaves::domain::slugify;
///
/// assert_eq!(slugify("Morning Show!"), "morning-show");
/// assert_eq!(slugify("  Café   Latino -- Live "), "cafe-latino-live");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars() {
        if is_apostrophe(ch) {
            continue;
        }

        if ch.is_ascii() {
            push_ascii(&mut slug, &mut pending_hyphen, ch);
        } else if let Some(folded) = fold_latin(ch) {
            for c in folded.chars() {
                push_ascii(&mut slug, &mut pending_hyphen, c);
            }
        } else if ch.is_whitespace() || !ch.is_alphanumeric() {
            pending_hyphen = true;
        }
    }

    slug
}

/// Resolve the slug to store for a record.
///
/// An explicit slug always wins. Otherwise the slug is `slugify(source)`;
/// an empty derivation stays unset.
pub fn derive_slug(explicit: Option<&str>, source: Option<&str>) -> Option<String> {
    if let Some(slug) = explicit.filter(|s| !s.is_empty()) {
        return Some(slug.to_string());
    }

    let slug = slugify(source?);
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

/// Case- and accent-insensitive sort key for titles.
///
/// Accented Latin letters fold to their base letters; other characters are
/// only lowercased, so "Éclat" sorts between "apple" and "Zebra".
pub fn collation_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for ch in text.chars() {
        match fold_latin(ch) {
            Some(folded) => key.push_str(folded),
            None => key.extend(ch.to_lowercase()),
        }
    }
    key
}

/// Check that an explicit slug only uses URL-safe characters
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Records reachable at a canonical URL built from their slug.
///
/// The route template belongs to the presentation layer; `{slug}` is
/// replaced with the record's slug.
pub trait Permalink {
    /// The record's slug, if one has been assigned
    fn slug(&self) -> Option<&str>;

    /// Build the canonical URL for this record
    fn permalink(&self, template: &str) -> Option<String> {
        self.slug().map(|slug| template.replace("{slug}", slug))
    }
}

fn push_ascii(slug: &mut String, pending_hyphen: &mut bool, ch: char) {
    if ch.is_ascii_alphanumeric() || ch == '_' {
        if *pending_hyphen && !slug.is_empty() {
            slug.push('-');
        }
        *pending_hyphen = false;
        slug.push(ch.to_ascii_lowercase());
    } else {
        *pending_hyphen = true;
    }
}

fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2018}' | '\u{2019}')
}

fn fold_latin(ch: char) -> Option<&'static str> {
    let folded = match ch {
        'À'..='Å' | 'à'..='å' | 'Ā' | 'ā' | 'Ą' | 'ą' => "a",
        'Æ' | 'æ' => "ae",
        'Ç' | 'ç' | 'Ć' | 'ć' | 'Č' | 'č' => "c",
        'Ð' | 'ð' | 'Đ' | 'đ' | 'Ď' | 'ď' => "d",
        'È'..='Ë' | 'è'..='ë' | 'Ē' | 'ē' | 'Ę' | 'ę' | 'Ě' | 'ě' => "e",
        'Ì'..='Ï' | 'ì'..='ï' | 'Ī' | 'ī' => "i",
        'Ł' | 'ł' => "l",
        'Ñ' | 'ñ' | 'Ń' | 'ń' | 'Ň' | 'ň' => "n",
        'Ò'..='Ö' | 'Ø' | 'ò'..='ö' | 'ø' | 'Ō' | 'ō' | 'Ő' | 'ő' => "o",
        'Œ' | 'œ' => "oe",
        'Ř' | 'ř' => "r",
        'Ś' | 'ś' | 'Š' | 'š' => "s",
        'ß' => "ss",
        'Ť' | 'ť' => "t",
        'Þ' | 'þ' => "th",
        'Ù'..='Ü' | 'ù'..='ü' | 'Ū' | 'ū' | 'Ů' | 'ů' | 'Ű' | 'ű' => "u",
        'Ý' | 'ý' | 'ÿ' | 'Ÿ' => "y",
        'Ź' | 'ź' | 'Ż' | 'ż' | 'Ž' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Morning Show!"), "morning-show");
        assert_eq!(slugify("J. Doe"), "j-doe");
        assert_eq!(slugify("Rock&Roll Hour"), "rock-roll-hour");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn test_slugify_collapses_and_trims_separators() {
        assert_eq!(slugify("--Hello,   World--"), "hello-world");
        assert_eq!(slugify("a - b"), "a-b");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_folds_accents_and_drops_other_scripts() {
        assert_eq!(slugify("Señor Café"), "senor-cafe");
        assert_eq!(slugify("Straße"), "strasse");
        assert_eq!(slugify("Radio 東京"), "radio");
    }

    #[test]
    fn test_slugify_drops_apostrophes() {
        assert_eq!(slugify("Pete's Jazz Corner"), "petes-jazz-corner");
        assert_eq!(slugify("Pete’s"), "petes");
    }

    #[test]
    fn test_derive_slug_prefers_explicit() {
        assert_eq!(
            derive_slug(Some("custom-slug"), Some("Morning Show")),
            Some("custom-slug".to_string())
        );
        assert_eq!(
            derive_slug(None, Some("Morning Show")),
            Some("morning-show".to_string())
        );
        assert_eq!(
            derive_slug(Some(""), Some("Morning Show")),
            Some("morning-show".to_string())
        );
    }

    #[test]
    fn test_derive_slug_unset_when_nothing_to_derive() {
        assert_eq!(derive_slug(None, None), None);
        assert_eq!(derive_slug(None, Some("???")), None);
    }

    #[test]
    fn test_derived_slug_keeps_whole_title() {
        let title = "word ".repeat(40);
        let slug = derive_slug(None, Some(&title)).unwrap();
        assert_eq!(slug, slugify(&title));
        assert_eq!(slug.len(), 40 * 5 - 1);
    }

    #[test]
    fn test_collation_key_folds_case_and_accents() {
        assert_eq!(collation_key("Éclat"), "eclat");
        assert_eq!(collation_key("Zebra Talk"), "zebra talk");
        assert_eq!(collation_key("Radio 東京"), "radio 東京");

        let mut titles = vec!["Zebra", "Éclat", "apple"];
        titles.sort_by_key(|t| collation_key(t));
        assert_eq!(titles, vec!["apple", "Éclat", "Zebra"]);
    }

    #[test]
    fn test_valid_slug() {
        assert!(is_valid_slug("morning-show_2"));
        assert!(!is_valid_slug("morning show"));
        assert!(!is_valid_slug("café"));
        assert!(!is_valid_slug(""));
    }

    struct Page(Option<String>);

    impl Permalink for Page {
        fn slug(&self) -> Option<&str> {
            self.0.as_deref()
        }
    }

    #[test]
    fn test_permalink_template() {
        let page = Page(Some("morning-show".to_string()));
        assert_eq!(
            page.permalink("/programs/{slug}/"),
            Some("/programs/morning-show/".to_string())
        );
        assert_eq!(Page(None).permalink("/programs/{slug}/"), None);
    }
}
