/// Normalise an asset identifier as typed by an operator or pulled from a URL.
///
/// Tabs become spaces, other control characters are dropped, runs of whitespace
/// collapse to a single space and the result is trimmed.
pub fn sanitize_asset_id(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_ascii_control())
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_collapses_whitespace_and_controls() {
        assert_eq!(sanitize_asset_id("  Plaza\tNorte \u{7}  01 "), "Plaza Norte 01");
        assert_eq!(sanitize_asset_id("SCR-001"), "SCR-001");
        assert_eq!(sanitize_asset_id("\n\r"), "");
    }
}
