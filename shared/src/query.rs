use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::catalog::FilterCategory;

/// Filter parameters recognized in a query string, one value per category.
/// `+` decodes to a space, later duplicates win and unknown keys are dropped.
pub fn parse_filter_params(search: &str) -> BTreeMap<FilterCategory, String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(query.as_bytes())
        .filter_map(|(key, value)| {
            let category = FilterCategory::from_tag(&key)?;
            Some((category, value.into_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_percent_and_plus() {
        let params = parse_filter_params("?raids=Vow%20of%20the%20Disciple&type=World's+First");
        assert_eq!(
            params.get(&FilterCategory::Raids).map(String::as_str),
            Some("Vow of the Disciple")
        );
        assert_eq!(
            params.get(&FilterCategory::Type).map(String::as_str),
            Some("World's First")
        );
    }

    #[test]
    fn ignores_unknown_keys() {
        let params = parse_filter_params("utm_source=mail&platform=Steam");
        assert_eq!(params.len(), 1);
        assert_eq!(
            params.get(&FilterCategory::Platform).map(String::as_str),
            Some("Steam")
        );
    }

    #[test]
    fn last_duplicate_wins() {
        let params = parse_filter_params("?mode=Master&mode=Contest");
        assert_eq!(
            params.get(&FilterCategory::Mode).map(String::as_str),
            Some("Contest")
        );
    }

    #[test]
    fn empty_query_has_no_filters() {
        assert!(parse_filter_params("").is_empty());
        assert!(parse_filter_params("?").is_empty());
    }

    #[test]
    fn hyphenated_tags_are_recognized() {
        let params = parse_filter_params("fireteam-size=3&time-period=Past+Week");
        assert_eq!(
            params.get(&FilterCategory::FireteamSize).map(String::as_str),
            Some("3")
        );
        assert_eq!(
            params.get(&FilterCategory::TimePeriod).map(String::as_str),
            Some("Past Week")
        );
    }
}
