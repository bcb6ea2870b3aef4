//! Content-policy heuristics applied server-side before any user text is
//! inserted. Rejections are validation errors: the user gets a specific
//! reason and may edit and resubmit.

const SPAM_MARKERS: &[&str] = &[
    "http://",
    "https://",
    "free money",
    "crypto",
    "casino",
    "viagra",
    "click here",
];

/// Screens review and reply bodies. Returns the reason a submission is
/// blocked, or `None` when it passes.
pub fn spam_reason(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();

    if lowered.trim().len() < 10 {
        return Some("Review is too short");
    }
    if lowered.len() > 4000 {
        return Some("Review is too long");
    }
    if SPAM_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        return Some("Links and promotional content are not allowed");
    }

    // Long runs of one character are the most common junk submission.
    let mut run = 1;
    let mut prev = None;
    for c in lowered.chars() {
        if Some(c) == prev {
            run += 1;
            if run >= 12 {
                return Some("Review looks like repeated filler");
            }
        } else {
            run = 1;
            prev = Some(c);
        }
    }

    None
}

/// 0..=4. Anything below 2 is rejected at sign-up.
pub fn password_strength(password: &str) -> u8 {
    let mut score = 0u8;
    if password.len() >= 8 {
        score += 1;
    }
    if password.len() >= 12 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_alphabetic())
    {
        score += 1;
    }
    if password.chars().any(|c| !c.is_alphanumeric()) {
        score += 1;
    }
    score
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinary_review_passes() {
        assert_eq!(
            spam_reason("Lovely staff, felt completely welcome on a busy Friday night."),
            None
        );
    }

    #[test]
    fn links_are_blocked() {
        assert!(spam_reason("great place https://spam.example buy now").is_some());
    }

    #[test]
    fn too_short_is_blocked() {
        assert!(spam_reason("ok").is_some());
    }

    #[test]
    fn repeated_filler_is_blocked() {
        assert!(spam_reason("aaaaaaaaaaaaaaaaaaaaaaaa").is_some());
    }

    #[test]
    fn password_scoring() {
        assert_eq!(password_strength("abc"), 0);
        assert!(password_strength("password1") >= 2);
        assert_eq!(password_strength("C0rrect-horse-battery!"), 4);
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("sam@example.org"));
        assert!(!is_valid_email("sam@example"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@example.org"));
        assert!(!is_valid_email("sam@.org"));
    }
}
