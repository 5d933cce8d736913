pub mod resolution;
pub mod social;

/// A single named heuristic locating one field in raw text. Rules are pure:
/// same text in, same value out. `None` means the field was not confidently
/// located, which downstream turns into an empty string.
pub struct FieldRule {
    pub name: &'static str,
    matcher: fn(&str) -> Option<String>,
}

impl FieldRule {
    pub const fn new(name: &'static str, matcher: fn(&str) -> Option<String>) -> Self {
        Self { name, matcher }
    }

    pub fn apply(&self, text: &str) -> Option<String> {
        (self.matcher)(text)
    }
}

/// First letter uppercased, the rest lowercased, per word, single spaces.
pub(crate) fn capitalize_words(raw: &str) -> String {
    raw.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(capitalize_words("JUAN PEREZ LOPEZ"), "Juan Perez Lopez");
    }

    #[test]
    fn handles_accented_uppercase() {
        assert_eq!(capitalize_words("MARÍA ÁNGELES ÑAUPA"), "María Ángeles Ñaupa");
    }

    #[test]
    fn collapses_internal_whitespace() {
        assert_eq!(capitalize_words("  ana \n sofia  "), "Ana Sofia");
    }
}
