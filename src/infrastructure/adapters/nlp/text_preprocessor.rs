use regex::Regex;

use crate::application::ports::input::nlp_port::TextPreprocessor;
use crate::core::platform::container::review::NormalizedText;
use crate::infrastructure::adapters::nlp::lexicon::Lexicon;

const HTML_TAG_PATTERN: &str = r"<.*?>";
const NON_LETTER_PATTERN: &str = r"[^a-zA-Z\s]";

/// Review normalizer.
///
/// Lowercases, strips HTML tags, drops everything but ASCII letters and whitespace, removes
/// stop words and lemmatizes what is left. Must stay in step with the normalization the
/// vectorizer was fitted on.
pub struct ReviewPreprocessor {
    lexicon: Lexicon,
    html_tag: Regex,
    non_letter: Regex,
}

impl ReviewPreprocessor {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            // both patterns are constants
            html_tag: Regex::new(HTML_TAG_PATTERN).expect("valid HTML tag pattern"),
            non_letter: Regex::new(NON_LETTER_PATTERN).expect("valid letter filter pattern"),
        }
    }
}

impl TextPreprocessor for ReviewPreprocessor {
    fn normalize(&self, text: &str) -> NormalizedText {
        let lowered = text.to_lowercase();
        let without_tags = self.html_tag.replace_all(&lowered, "");
        let letters_only = self.non_letter.replace_all(&without_tags, "");

        let tokens = letters_only
            .split_whitespace()
            .filter(|token| !self.lexicon.stop_words.contains(token))
            .map(|token| self.lexicon.lemmatizer.lemmatize(token));

        NormalizedText::from_tokens(tokens)
    }
}
