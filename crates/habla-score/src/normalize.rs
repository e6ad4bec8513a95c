//! Sentence normalization for translation scoring.
//!
//! Both the learner's answer and the reference translation go through
//! [`normalize`] before they are compared, so that casing, accents,
//! punctuation and spacing never cost the learner any points.

use unicode_general_category::{GeneralCategory, get_general_category};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Normalize a sentence for similarity scoring.
///
/// Applies the following transformations in order:
/// 1. Lowercase
/// 2. Unicode NFD decomposition, then strip combining marks (accents, diacritics)
/// 3. Fold `ñ` to `n`
/// 4. Drop everything that is not a word character (letter, number, `_`) or whitespace
/// 5. Collapse and trim whitespace, splitting on the ASCII information
///    separators as well
///
/// This means `"¿Cómo estás?"` and `"como estas"` normalize to the same
/// string, and so do `"El niño."` and `"el nino"`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|&c| !is_combining_mark(c))
        // NFD already splits `ñ` into `n` + U+0303; this folds any precomposed survivor
        .map(|c| if c == 'ñ' { 'n' } else { c })
        .filter(|&c| is_word_char(c) || is_space(c))
        .collect::<String>()
        .split(is_space)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Letters, numbers and `_`, by general category.
///
/// `char::is_alphanumeric` is wider: it also accepts symbols carrying the
/// `Alphabetic` property, such as circled letters.
fn is_word_char(c: char) -> bool {
    use GeneralCategory::{
        DecimalNumber, LetterNumber, LowercaseLetter, ModifierLetter, OtherLetter, OtherNumber,
        TitlecaseLetter, UppercaseLetter,
    };

    c == '_'
        || matches!(
            get_general_category(c),
            UppercaseLetter
                | LowercaseLetter
                | TitlecaseLetter
                | ModifierLetter
                | OtherLetter
                | DecimalNumber
                | LetterNumber
                | OtherNumber
        )
}

/// Unicode whitespace plus the information separators U+001C..=U+001F
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
