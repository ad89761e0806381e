//! # Identifier Preview
//!
//! Client-side preview of the next catalog identifier. Advisory only: the
//! server assigns the authoritative identifier at creation time and the
//! engine tolerates the server returning a different value.

/// Prefix shared by every catalog identifier.
const ID_PREFIX: &str = "GAME";

/// Width of the zero-padded sequence suffix.
const SEQ_WIDTH: usize = 4;

/// Preview the next identifier for a category.
///
/// `last_id` is the newest identifier already in the category, or `None`
/// when the category is empty. The sequence starts at `0001` and only the
/// trailing numeric suffix is incremented; a `last_id` from a different
/// category does not carry its sequence over.
///
/// ```
/// use gamedex_core::ident::preview_next_identifier;
///
/// assert_eq!(preview_next_identifier("A", None), "GAMEA0001");
/// assert_eq!(preview_next_identifier("A", Some("GAMEA0007")), "GAMEA0008");
/// ```
pub fn preview_next_identifier(category_code: &str, last_id: Option<&str>) -> String {
    let next = last_id
        .and_then(|id| trailing_sequence(id, category_code))
        .map(|seq| seq + 1)
        .unwrap_or(1);
    format!(
        "{}{}{:0width$}",
        ID_PREFIX,
        category_code,
        next,
        width = SEQ_WIDTH
    )
}

/// Extract the 4-digit sequence from an identifier of the same category.
fn trailing_sequence(id: &str, category_code: &str) -> Option<u32> {
    let rest = id
        .strip_prefix(ID_PREFIX)?
        .strip_prefix(category_code)?;
    if rest.len() != SEQ_WIDTH || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_identifier_in_category() {
        assert_eq!(preview_next_identifier("A", None), "GAMEA0001");
    }

    #[test]
    fn test_increments_sequence() {
        assert_eq!(
            preview_next_identifier("A", Some("GAMEA0007")),
            "GAMEA0008"
        );
    }

    #[test]
    fn test_other_category_does_not_carry_sequence() {
        assert_eq!(
            preview_next_identifier("B", Some("GAMEA0009")),
            "GAMEB0001"
        );
    }

    #[test]
    fn test_zero_padding_survives_rollover() {
        assert_eq!(
            preview_next_identifier("A", Some("GAMEA0099")),
            "GAMEA0100"
        );
    }

    #[test]
    fn test_malformed_last_id_starts_fresh() {
        assert_eq!(preview_next_identifier("A", Some("GAMEA12")), "GAMEA0001");
        assert_eq!(preview_next_identifier("A", Some("bogus")), "GAMEA0001");
    }
}
