/// Lowercases, keeps alphanumerics, and collapses everything else into
/// single hyphens. Used for venue slugs generated at publish time.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true;
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("venue");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn basic_names() {
        assert_eq!(slugify("The Anchor"), "the-anchor");
        assert_eq!(slugify("Rainbow Cafe & Bar"), "rainbow-cafe-bar");
    }

    #[test]
    fn punctuation_collapses() {
        assert_eq!(slugify("  Bob's -- Place!  "), "bob-s-place");
    }

    #[test]
    fn empty_input_gets_a_fallback() {
        assert_eq!(slugify("!!!"), "venue");
    }
}
