const POSTAL_CODE_MARK: char = '〒';

fn is_postal_code(fragment: &str) -> bool {
    fragment.contains(POSTAL_CODE_MARK)
}

// Building names and annotations like "（駐車場有）".
fn is_annotation(fragment: &str) -> bool {
    fragment.starts_with(['(', '（'])
}

/// Extracts the part of a noisy address field that is most likely geocodable.
///
/// The field is split on whitespace (including the full-width space).
/// Postal code fragments and fragments starting with a parenthesis are
/// skipped and the first remaining fragment is returned. If nothing remains
/// the first fragment is returned as is.
pub fn clean_address(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let fragments: Vec<_> = raw.split_whitespace().collect();
    fragments
        .iter()
        .find(|f| !is_postal_code(f) && !is_annotation(f))
        .or_else(|| fragments.first())
        .map(|f| (*f).to_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_address() {
        assert_eq!("", clean_address(None));
    }

    #[test]
    fn empty_or_blank_address() {
        assert_eq!("", clean_address(Some("")));
        assert_eq!("", clean_address(Some("  \u{3000} ")));
    }

    #[test]
    fn address_without_whitespace() {
        assert_eq!(
            "東京都渋谷区神南1-1-1",
            clean_address(Some("東京都渋谷区神南1-1-1"))
        );
    }

    #[test]
    fn skip_postal_code() {
        assert_eq!(
            "千葉県千葉市若葉区若松町1-2-3",
            clean_address(Some("千葉県〒264-0007 千葉県千葉市若葉区若松町1-2-3"))
        );
        assert_eq!(
            "大阪府大阪市北区梅田1-1",
            clean_address(Some("〒530-0001\u{3000}大阪府大阪市北区梅田1-1"))
        );
    }

    #[test]
    fn skip_annotations() {
        assert_eq!(
            "東京都渋谷区1-1-1",
            clean_address(Some("（駐車場有） 東京都渋谷区1-1-1"))
        );
        assert_eq!(
            "東京都渋谷区1-1-1",
            clean_address(Some("(2F) 東京都渋谷区1-1-1 （ビル名）"))
        );
    }

    #[test]
    fn take_first_candidate() {
        assert_eq!(
            "愛知県名古屋市中区栄3-4-5",
            clean_address(Some(
                "〒460-0008 愛知県名古屋市中区栄3-4-5 栄ビル2F (受付は1F)"
            ))
        );
    }

    #[test]
    fn fall_back_to_first_fragment() {
        assert_eq!(
            "〒150-0041",
            clean_address(Some("〒150-0041 （駐車場有）"))
        );
        assert_eq!(
            "（駐車場有）東京都渋谷区1-1-1",
            clean_address(Some("（駐車場有）東京都渋谷区1-1-1"))
        );
    }

    #[test]
    fn trim_surrounding_whitespace() {
        assert_eq!(
            "北海道札幌市中央区北1条西2丁目",
            clean_address(Some(" \u{3000}北海道札幌市中央区北1条西2丁目\n"))
        );
    }
}
