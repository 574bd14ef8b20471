use crate::utils::constants::{
    CANONICAL_DEGREE, CANONICAL_MINUTE, CANONICAL_SECOND, DEGREE_GLYPHS, MINUTE_GLYPHS,
    SECOND_GLYPHS,
};

/// Separator classes recognised in DMS text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Degree,
    Minute,
    Second,
}

impl Separator {
    pub fn classify(c: char) -> Option<Self> {
        if DEGREE_GLYPHS.contains(&c) {
            Some(Separator::Degree)
        } else if MINUTE_GLYPHS.contains(&c) {
            Some(Separator::Minute)
        } else if SECOND_GLYPHS.contains(&c) {
            Some(Separator::Second)
        } else {
            None
        }
    }

    pub fn canonical(self) -> char {
        match self {
            Separator::Degree => CANONICAL_DEGREE,
            Separator::Minute => CANONICAL_MINUTE,
            Separator::Second => CANONICAL_SECOND,
        }
    }
}

/// Rewrite every accepted separator glyph to its canonical token.
///
/// Everything else, whitespace included, is copied through untouched so the
/// matcher sees the same layout as the input.
///
/// ```
/// use release_points::utils::normalize_glyphs;
///
/// assert_eq!(normalize_glyphs("52º14′30”N"), "52°14'30\"N");
/// ```
pub fn normalize_glyphs(text: &str) -> String {
    text.chars()
        .map(|c| Separator::classify(c).map_or(c, Separator::canonical))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Separator::classify('°'), Some(Separator::Degree));
        assert_eq!(Separator::classify('º'), Some(Separator::Degree));
        assert_eq!(Separator::classify('′'), Some(Separator::Minute));
        assert_eq!(Separator::classify('\''), Some(Separator::Minute));
        assert_eq!(Separator::classify('’'), Some(Separator::Minute));
        assert_eq!(Separator::classify('″'), Some(Separator::Second));
        assert_eq!(Separator::classify('"'), Some(Separator::Second));
        assert_eq!(Separator::classify('”'), Some(Separator::Second));
        assert_eq!(Separator::classify('N'), None);
        assert_eq!(Separator::classify(' '), None);
    }

    #[test]
    fn test_normalize_variants_agree() {
        let typographic = normalize_glyphs("52°14′30″N");
        let ascii = normalize_glyphs("52°14'30\"N");
        let word = normalize_glyphs("52º14’30”N");

        assert_eq!(typographic, ascii);
        assert_eq!(word, ascii);
    }

    #[test]
    fn test_normalize_keeps_whitespace_and_letters() {
        assert_eq!(normalize_glyphs(" 21° 0′ 30″ e "), " 21° 0' 30\" e ");
    }
}
