//! Title keyword filter compilation.

use regex::{Regex, RegexBuilder};

use super::QueryError;

/// Delimiter between keywords in a raw query phrase.
const KEYWORD_SEPARATOR: &str = "% ";

/// The vowels `е` and `ё` are used interchangeably in catalog titles, so
/// one of them is widened into a class matching both.
const FOLDED_VOWELS: [char; 4] = ['е', 'ё', 'Е', 'Ё'];
const VOWEL_CLASS: &str = "(е|ё)";

/// A compiled "contains all keywords" title filter.
///
/// The pattern source keeps the lookahead form `(?=.*word.*)` per keyword;
/// matching is done with one compiled regex per keyword since the regex
/// engine has no lookaheads. A text matches when every keyword matches,
/// in any order, case-insensitively.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    source: String,
    words: Vec<Regex>,
}

impl KeywordFilter {
    /// Compile a raw phrase into a keyword filter.
    ///
    /// The phrase is split on the literal `"% "` token. Keywords are taken
    /// as regex source, so a malformed keyword fails compilation. Only the
    /// first `е`/`ё` occurrence across the whole composed pattern is widened
    /// to `(е|ё)`; later occurrences stay as written.
    pub fn compile(phrase: &str) -> Result<Self, QueryError> {
        let mut fragments: Vec<String> = phrase
            .split(KEYWORD_SEPARATOR)
            .map(str::to_owned)
            .collect();

        fold_first_vowel(&mut fragments);

        let source = fragments
            .iter()
            .map(|word| format!("(?=.*{word}.*)"))
            .collect::<String>();

        let mut words = Vec::with_capacity(fragments.len());
        for fragment in &fragments {
            let word = RegexBuilder::new(fragment)
                .case_insensitive(true)
                .build()
                .map_err(|e| QueryError::KeywordPattern(e.to_string()))?;
            words.push(word);
        }

        Ok(Self { source, words })
    }

    /// The composed lookahead-style pattern source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True when `text` contains every keyword, in any order.
    pub fn matches(&self, text: &str) -> bool {
        self.words.iter().all(|word| word.is_match(text))
    }
}

/// Replace the first `е`/`ё` occurrence (either case) across the fragment
/// list with the two-vowel class. Fragments are scanned in order, so the
/// result is the same as substituting once on the composed pattern string.
fn fold_first_vowel(fragments: &mut [String]) {
    for fragment in fragments.iter_mut() {
        if let Some((pos, ch)) = fragment
            .char_indices()
            .find(|(_, c)| FOLDED_VOWELS.contains(c))
        {
            fragment.replace_range(pos..pos + ch.len_utf8(), VOWEL_CLASS);
            return;
        }
    }
}
