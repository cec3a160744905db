use crate::provider::ProviderError;

/// Splits a two- or three-line element set into `(name, line1, line2)`.
pub fn parse_tle_lines(tle: &str) -> Result<(Option<String>, String, String), ProviderError> {
    let lines: Vec<&str> = tle
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    match lines.as_slice() {
        [line1, line2] => Ok((None, line1.to_string(), line2.to_string())),
        [name, line1, line2] => Ok((
            Some(name.to_string()),
            line1.to_string(),
            line2.to_string(),
        )),
        _ => Err(ProviderError::InvalidTleFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_named_and_anonymous_sets() {
        let (name, l1, l2) = parse_tle_lines("ISS\n1 abc\n2 def\n").unwrap();
        assert_eq!(name.as_deref(), Some("ISS"));
        assert_eq!(l1, "1 abc");
        assert_eq!(l2, "2 def");

        let (name, _, _) = parse_tle_lines("\n  1 abc  \n\n2 def").unwrap();
        assert!(name.is_none());
    }

    #[test]
    fn rejects_wrong_line_count() {
        assert!(matches!(
            parse_tle_lines("1 abc"),
            Err(ProviderError::InvalidTleFormat)
        ));
        assert!(matches!(
            parse_tle_lines("a\nb\nc\nd"),
            Err(ProviderError::InvalidTleFormat)
        ));
    }
}
