// Locale negotiation for the bilingual site content

pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "fr"];
pub const DEFAULT_LOCALE: &str = "en";

// Pick the best supported locale from an Accept-Language header value.
// Matches on the primary subtag ("fr-CA" counts as "fr"); highest q wins,
// first listed breaks ties; anything unparseable falls back to the default.
pub fn detect_locale(accept_language: Option<&str>) -> &'static str {
    let Some(header) = accept_language else {
        return DEFAULT_LOCALE;
    };

    let mut best: Option<(&'static str, f32)> = None;

    for part in header.split(',') {
        let mut pieces = part.trim().split(';');

        let tag = match pieces.next().map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => continue,
        };

        // ";q=0.8" weight, 1.0 when absent or malformed
        let q = pieces
            .find_map(|p| {
                let p = p.trim();
                p.strip_prefix("q=").or_else(|| p.strip_prefix("Q="))
            })
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(1.0);
        if q <= 0.0 {
            continue;
        }

        let primary = match tag.split('-').next() {
            Some(p) => p.to_ascii_lowercase(),
            None => continue,
        };
        let Some(supported) = SUPPORTED_LOCALES.iter().find(|l| **l == primary) else {
            continue;
        };

        // strictly greater, so the first occurrence wins ties
        if best.is_none_or(|(_, best_q)| q > best_q) {
            best = Some((supported, q));
        }
    }

    best.map_or(DEFAULT_LOCALE, |(locale, _)| locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_region_tags_match() {
        assert_eq!(detect_locale(Some("fr")), "fr");
        assert_eq!(detect_locale(Some("fr-FR,fr;q=0.9,en;q=0.8")), "fr");
        assert_eq!(detect_locale(Some("en-US,en;q=0.9")), "en");
        assert_eq!(detect_locale(Some("fr-CA")), "fr");
    }

    #[test]
    fn highest_q_value_wins() {
        assert_eq!(detect_locale(Some("en;q=0.5,fr")), "fr");
        assert_eq!(detect_locale(Some("en;q=0.9,fr;q=0.3")), "en");
        // q=0 rules a language out entirely
        assert_eq!(detect_locale(Some("fr;q=0,en;q=0.8")), "en");
    }

    #[test]
    fn first_occurrence_breaks_ties() {
        assert_eq!(detect_locale(Some("fr,en")), "fr");
        assert_eq!(detect_locale(Some("en;q=0.8,fr;q=0.8")), "en");
    }

    #[test]
    fn unsupported_or_missing_falls_back_to_default() {
        assert_eq!(detect_locale(None), DEFAULT_LOCALE);
        assert_eq!(detect_locale(Some("")), DEFAULT_LOCALE);
        assert_eq!(detect_locale(Some("de-DE,es;q=0.9")), DEFAULT_LOCALE);
        assert_eq!(detect_locale(Some("*")), DEFAULT_LOCALE);
    }

    #[test]
    fn tolerates_sloppy_input() {
        assert_eq!(detect_locale(Some("FR")), "fr");
        assert_eq!(detect_locale(Some(" fr ; q=0.7 , en ; q=0.2 ")), "fr");
        // malformed weight is treated as the default 1.0
        assert_eq!(detect_locale(Some("fr;q=abc,en;q=0.9")), "fr");
        assert_eq!(detect_locale(Some(",,fr")), "fr");
    }
}
