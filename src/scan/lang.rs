use crate::error::ApiError;

/// Recognized Tesseract language/script codes: English, Nepali, Hindi and
/// the Devanagari script tag.
pub const SUPPORTED_LANGUAGES: [&str; 4] = ["eng", "nep", "hin", "dev"];

/// Code used when the caller supplies no usable hint.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Normalize a raw language hint into a `+`-joined spec for the extractor.
///
/// `+` takes precedence over `,` as the separator; parts are trimmed and
/// empty parts dropped. Any unrecognized code fails the whole request,
/// naming every offender. If nothing usable remains and nothing was invalid
/// (e.g. `""` or `"++"`), the default code is used. Input order is kept and
/// repeated codes are not collapsed.
pub fn normalize_languages(raw: &str) -> Result<String, ApiError> {
    let parts: Vec<&str> = if raw.contains('+') {
        raw.split('+').collect()
    } else if raw.contains(',') {
        raw.split(',').collect()
    } else {
        vec![raw]
    };

    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    for part in parts {
        let code = part.trim();
        if code.is_empty() {
            continue;
        }
        if SUPPORTED_LANGUAGES.contains(&code) {
            valid.push(code);
        } else {
            invalid.push(code.to_owned());
        }
    }

    if !invalid.is_empty() {
        return Err(ApiError::UnsupportedLanguage { invalid });
    }
    if valid.is_empty() {
        return Ok(DEFAULT_LANGUAGE.to_owned());
    }
    Ok(valid.join("+"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_separated_codes_pass_through() {
        assert_eq!(normalize_languages("eng+hin").unwrap(), "eng+hin");
    }

    #[test]
    fn comma_separator_is_rewritten_to_plus() {
        assert_eq!(normalize_languages("eng,nep").unwrap(), "eng+nep");
    }

    #[test]
    fn single_code_and_surrounding_whitespace() {
        assert_eq!(normalize_languages("nep").unwrap(), "nep");
        assert_eq!(normalize_languages(" eng , hin ").unwrap(), "eng+hin");
    }

    #[test]
    fn empty_and_pure_separator_inputs_fall_back_to_default() {
        assert_eq!(normalize_languages("").unwrap(), "eng");
        assert_eq!(normalize_languages("   ").unwrap(), "eng");
        assert_eq!(normalize_languages("++").unwrap(), "eng");
        assert_eq!(normalize_languages(",,").unwrap(), "eng");
    }

    #[test]
    fn repeated_codes_are_kept() {
        assert_eq!(normalize_languages("eng+eng").unwrap(), "eng+eng");
    }

    #[test]
    fn unknown_codes_fail_listing_all_of_them() {
        let err = normalize_languages("xx").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("xx"));
        assert!(msg.contains("dev, eng, hin, nep"));

        let err = normalize_languages("eng+xx+yy").unwrap_err();
        match err {
            ApiError::UnsupportedLanguage { invalid } => {
                assert_eq!(invalid, vec!["xx".to_string(), "yy".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn plus_wins_when_both_separators_appear() {
        // "eng+hin,nep" splits on '+', leaving "hin,nep" as one invalid code.
        let err = normalize_languages("eng+hin,nep").unwrap_err();
        match err {
            ApiError::UnsupportedLanguage { invalid } => {
                assert_eq!(invalid, vec!["hin,nep".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
