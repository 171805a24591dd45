// Input normalization - canonical ordered url lists and keywords

use super::errors::ValidationError;
use super::models::RawInputs;

/// Coerce the raw `urls` argument into an ordered list of trimmed,
/// non-empty entries. Blank elements are silently dropped; order is
/// preserved because it drives result ordering downstream.
pub fn normalize_urls(raw: &RawInputs) -> Result<Vec<String>, ValidationError> {
    let urls: Vec<String> = match raw {
        RawInputs::None => Vec::new(),
        RawInputs::Single(url) => {
            let trimmed = url.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            }
        }
        RawInputs::Many(list) => list
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .map(|u| u.to_string())
            .collect(),
    };

    if urls.is_empty() {
        Err(ValidationError::EmptyInput)
    } else {
        Ok(urls)
    }
}

/// Trim a search keyword; blank after trim is an error.
pub fn normalize_keyword(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyKeyword)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_url_is_trimmed() {
        let raw = RawInputs::Single("  https://x  ".to_string());
        assert_eq!(normalize_urls(&raw).unwrap(), vec!["https://x".to_string()]);
    }

    #[test]
    fn test_empty_string_fails() {
        assert_eq!(
            normalize_urls(&RawInputs::Single("".to_string())),
            Err(ValidationError::EmptyInput)
        );
    }

    #[test]
    fn test_absent_input_fails() {
        assert_eq!(normalize_urls(&RawInputs::None), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn test_all_blank_list_fails() {
        let raw = RawInputs::Many(vec!["".to_string(), " ".to_string()]);
        assert_eq!(normalize_urls(&raw), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn test_blank_elements_dropped_order_kept() {
        let raw = RawInputs::Many(vec![
            " a ".to_string(),
            "".to_string(),
            "b".to_string(),
            "  ".to_string(),
            "c".to_string(),
        ]);
        assert_eq!(
            normalize_urls(&raw).unwrap(),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_keyword_trimmed() {
        assert_eq!(normalize_keyword(" 美食 ").unwrap(), "美食");
    }

    #[test]
    fn test_blank_keyword_fails() {
        assert_eq!(normalize_keyword("   "), Err(ValidationError::EmptyKeyword));
    }
}
