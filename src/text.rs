//! Small text formatting helpers for member display

/// Mask the local part of an email address for display.
///
/// Splits at the first `@` only; anything after it (including further `@`
/// characters) is passed through untouched. Strings without an `@`, and the
/// empty string, are returned unchanged. The output is not guaranteed to be a
/// well-formed address.
pub fn mask_email(input: &str) -> String {
    if input.is_empty() {
        return input.to_string();
    }

    let Some((local, domain)) = input.split_once('@') else {
        return input.to_string();
    };

    let mut chars = local.chars();
    let first = chars.next();

    match first {
        None => format!("***@{}", domain),
        Some(first) if local.chars().count() <= 2 => {
            format!("{}***@{}", first, domain)
        }
        Some(first) => {
            let last = local.chars().last().unwrap_or(first);
            format!("{}***{}@{}", first, last, domain)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_typical_address() {
        assert_eq!(mask_email("john.doe@example.com"), "j***e@example.com");
    }

    #[test]
    fn test_mask_short_local_parts() {
        // Length 2: no trailing char repeated
        assert_eq!(mask_email("ab@example.com"), "a***@example.com");
        // Length 1: sole char still followed by ***
        assert_eq!(mask_email("a@example.com"), "a***@example.com");
    }

    #[test]
    fn test_mask_passthrough() {
        assert_eq!(mask_email("noatsign"), "noatsign");
        assert_eq!(mask_email(""), "");
    }

    #[test]
    fn test_mask_splits_at_first_at() {
        // Extra @ in the tail stays where it is
        assert_eq!(mask_email("weird@host@other"), "w***d@host@other");
    }

    #[test]
    fn test_mask_empty_local_part() {
        assert_eq!(mask_email("@example.com"), "***@example.com");
    }

    #[test]
    fn test_mask_multibyte_local_part() {
        assert_eq!(mask_email("åke@example.se"), "å***e@example.se");
    }
}
