//! Administrative locality token extraction.
//!
//! Korean addresses name a district (구/군) and a neighborhood
//! (동/읍/면/가) as separate words, in both native and romanized forms
//! ("강남구 역삼동", "Gangnam-gu Yeoksam-dong"). Extraction is a suffix
//! scan over whitespace-separated words; anything that doesn't look like
//! an address simply produces empty tokens, which disables the locality
//! discount.

/// District word suffixes, native and romanized.
const DISTRICT_SUFFIXES: &[&str] = &["구", "군", "-gu", "-gun"];

/// Neighborhood word suffixes, native and romanized.
const NEIGHBORHOOD_SUFFIXES: &[&str] = &["동", "읍", "면", "가", "-dong", "-eup", "-myeon", "-ga"];

/// Locality tokens extracted from a free-text address.
///
/// Tokens are stored normalized (trimmed of surrounding punctuation,
/// lowercased) so that comparison between two parsed addresses is a plain
/// equality check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LocalityTokens {
    /// Coarse administrative district, e.g. "강남구" / "gangnam-gu".
    pub district: Option<String>,

    /// Finer neighborhood, e.g. "역삼동" / "yeoksam-dong".
    pub neighborhood: Option<String>,
}

impl LocalityTokens {
    /// Extract locality tokens from a free-text address.
    ///
    /// The first word matching each suffix class wins. Never fails; an
    /// unrecognizable address yields empty tokens.
    pub fn parse(address: &str) -> Self {
        let mut tokens = Self::default();

        for word in address.split_whitespace() {
            let word = normalize(word);
            if word.is_empty() {
                continue;
            }

            if tokens.district.is_none() && has_suffix(&word, DISTRICT_SUFFIXES) {
                tokens.district = Some(word);
            } else if tokens.neighborhood.is_none() && has_suffix(&word, NEIGHBORHOOD_SUFFIXES) {
                tokens.neighborhood = Some(word);
            }

            if tokens.district.is_some() && tokens.neighborhood.is_some() {
                break;
            }
        }

        tokens
    }

    /// True when no token was extracted.
    pub fn is_empty(&self) -> bool {
        self.district.is_none() && self.neighborhood.is_none()
    }

    /// True when both addresses name the same neighborhood.
    pub fn same_neighborhood(&self, other: &Self) -> bool {
        matches!((&self.neighborhood, &other.neighborhood), (Some(a), Some(b)) if a == b)
    }

    /// True when both addresses name the same district.
    pub fn same_district(&self, other: &Self) -> bool {
        matches!((&self.district, &other.district), (Some(a), Some(b)) if a == b)
    }
}

fn has_suffix(word: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| word.ends_with(s))
}

fn normalize(word: &str) -> String {
    word.trim_matches(|c: char| c.is_ascii_punctuation() && c != '-')
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_lot_address() {
        let t = LocalityTokens::parse("서울특별시 강남구 역삼동 823-20");
        assert_eq!(t.district.as_deref(), Some("강남구"));
        assert_eq!(t.neighborhood.as_deref(), Some("역삼동"));
    }

    #[test]
    fn romanized_address() {
        let t = LocalityTokens::parse("Gangnam-gu Yeoksam-dong 123");
        assert_eq!(t.district.as_deref(), Some("gangnam-gu"));
        assert_eq!(t.neighborhood.as_deref(), Some("yeoksam-dong"));
    }

    #[test]
    fn case_and_punctuation_are_normalized() {
        let t = LocalityTokens::parse("Seoul, GANGNAM-GU, Yeoksam-Dong.");
        assert_eq!(t.district.as_deref(), Some("gangnam-gu"));
        assert_eq!(t.neighborhood.as_deref(), Some("yeoksam-dong"));
    }

    #[test]
    fn road_address_without_neighborhood() {
        let t = LocalityTokens::parse("서울특별시 중구 세종대로 110");
        assert_eq!(t.district.as_deref(), Some("중구"));
        assert_eq!(t.neighborhood, None);
    }

    #[test]
    fn numbered_ga_neighborhood() {
        let t = LocalityTokens::parse("서울특별시 중구 남대문로5가 73-6");
        assert_eq!(t.district.as_deref(), Some("중구"));
        assert_eq!(t.neighborhood.as_deref(), Some("남대문로5가"));
    }

    #[test]
    fn unrecognizable_address_is_empty() {
        assert!(LocalityTokens::parse("").is_empty());
        assert!(LocalityTokens::parse("   ").is_empty());
        assert!(LocalityTokens::parse("1600 Pennsylvania Avenue").is_empty());
    }

    #[test]
    fn first_match_wins() {
        let t = LocalityTokens::parse("강남구 서초구 역삼동 방배동");
        assert_eq!(t.district.as_deref(), Some("강남구"));
        assert_eq!(t.neighborhood.as_deref(), Some("역삼동"));
    }

    #[test]
    fn comparisons_require_both_sides() {
        let a = LocalityTokens::parse("강남구 역삼동");
        let empty = LocalityTokens::default();
        assert!(!a.same_neighborhood(&empty));
        assert!(!a.same_district(&empty));
        assert!(!empty.same_neighborhood(&empty));
    }

    #[test]
    fn matching_is_exact_after_normalization() {
        let a = LocalityTokens::parse("Gangnam-gu Yeoksam-dong 123");
        let b = LocalityTokens::parse("GANGNAM-GU yeoksam-dong 5");
        assert!(a.same_district(&b));
        assert!(a.same_neighborhood(&b));

        let c = LocalityTokens::parse("Seocho-gu Banpo-dong");
        assert!(!a.same_district(&c));
        assert!(!a.same_neighborhood(&c));
    }
}
