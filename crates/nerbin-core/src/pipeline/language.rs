//! # Language Defaults for Blank Pipelines
//!
//! Each supported language contributes a table of special cases (tokens the
//! affix rules must not split, or must split in a fixed way) and, for some
//! Romance languages, elision prefixes such as `l'` or `dell'`.
//! Punctuation rules are shared and live in [`super::punctuation`].

use std::fmt;
use std::str::FromStr;

use crate::error::{NerbinError, Result};

/// A special case: the exact chunk text and the pieces it tokenizes into.
/// The pieces always concatenate back to the chunk.
pub type SpecialCase = (&'static str, &'static [&'static str]);

/// Languages with a blank pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    German,
    Spanish,
    French,
    Portuguese,
    Italian,
    Dutch,
    /// Multi-language pipeline: shared punctuation rules only.
    Multi,
}

/// Emoticons and similar tokens kept whole in every language.
const BASE_SPECIAL_CASES: &[SpecialCase] = &[
    (":)", &[":)"]),
    (":-)", &[":-)"]),
    (":(", &[":("]),
    (":-(", &[":-("]),
    (";)", &[";)"]),
    (";-)", &[";-)"]),
    (":D", &[":D"]),
    (":P", &[":P"]),
    (":p", &[":p"]),
    (":/", &[":/"]),
    ("<3", &["<3"]),
    ("^_^", &["^_^"]),
    ("o.O", &["o.O"]),
    ("(:", &["(:"]),
    ("):", &["):"]),
];

const ENGLISH_SPECIAL_CASES: &[SpecialCase] = &[
    // Negations
    ("don't", &["do", "n't"]),
    ("doesn't", &["does", "n't"]),
    ("didn't", &["did", "n't"]),
    ("can't", &["ca", "n't"]),
    ("cannot", &["can", "not"]),
    ("won't", &["wo", "n't"]),
    ("isn't", &["is", "n't"]),
    ("aren't", &["are", "n't"]),
    ("wasn't", &["was", "n't"]),
    ("weren't", &["were", "n't"]),
    ("haven't", &["have", "n't"]),
    ("hasn't", &["has", "n't"]),
    ("hadn't", &["had", "n't"]),
    ("shouldn't", &["should", "n't"]),
    ("wouldn't", &["would", "n't"]),
    ("couldn't", &["could", "n't"]),
    ("mustn't", &["must", "n't"]),
    ("needn't", &["need", "n't"]),
    // Pronoun contractions
    ("i'm", &["i", "'m"]),
    ("i've", &["i", "'ve"]),
    ("i'll", &["i", "'ll"]),
    ("i'd", &["i", "'d"]),
    ("you're", &["you", "'re"]),
    ("you've", &["you", "'ve"]),
    ("you'll", &["you", "'ll"]),
    ("you'd", &["you", "'d"]),
    ("we're", &["we", "'re"]),
    ("we've", &["we", "'ve"]),
    ("we'll", &["we", "'ll"]),
    ("we'd", &["we", "'d"]),
    ("they're", &["they", "'re"]),
    ("they've", &["they", "'ve"]),
    ("they'll", &["they", "'ll"]),
    ("they'd", &["they", "'d"]),
    ("he's", &["he", "'s"]),
    ("he'll", &["he", "'ll"]),
    ("he'd", &["he", "'d"]),
    ("she's", &["she", "'s"]),
    ("she'll", &["she", "'ll"]),
    ("she'd", &["she", "'d"]),
    ("it's", &["it", "'s"]),
    ("it'll", &["it", "'ll"]),
    ("that's", &["that", "'s"]),
    ("there's", &["there", "'s"]),
    ("what's", &["what", "'s"]),
    ("who's", &["who", "'s"]),
    ("let's", &["let", "'s"]),
    // Informal forms
    ("gonna", &["gon", "na"]),
    ("gotta", &["got", "ta"]),
    ("wanna", &["wan", "na"]),
    ("y'all", &["y'", "all"]),
    // Abbreviations ending in a period
    ("mr.", &["mr."]),
    ("mrs.", &["mrs."]),
    ("ms.", &["ms."]),
    ("dr.", &["dr."]),
    ("st.", &["st."]),
    ("jr.", &["jr."]),
    ("sr.", &["sr."]),
    ("vs.", &["vs."]),
    ("etc.", &["etc."]),
    ("e.g.", &["e.g."]),
    ("i.e.", &["i.e."]),
    ("a.m.", &["a.m."]),
    ("p.m.", &["p.m."]),
    ("inc.", &["inc."]),
    ("ltd.", &["ltd."]),
    ("co.", &["co."]),
    ("jan.", &["jan."]),
    ("feb.", &["feb."]),
    ("mar.", &["mar."]),
    ("apr.", &["apr."]),
    ("jun.", &["jun."]),
    ("jul.", &["jul."]),
    ("aug.", &["aug."]),
    ("sep.", &["sep."]),
    ("sept.", &["sept."]),
    ("oct.", &["oct."]),
    ("nov.", &["nov."]),
    ("dec.", &["dec."]),
];

const GERMAN_SPECIAL_CASES: &[SpecialCase] = &[
    ("z.B.", &["z.B."]),
    ("d.h.", &["d.h."]),
    ("u.a.", &["u.a."]),
    ("usw.", &["usw."]),
    ("bzw.", &["bzw."]),
    ("ca.", &["ca."]),
    ("nr.", &["nr."]),
    ("str.", &["str."]),
    ("vgl.", &["vgl."]),
    ("evtl.", &["evtl."]),
    ("ggf.", &["ggf."]),
    ("hrsg.", &["hrsg."]),
    ("geb.", &["geb."]),
];

const SPANISH_SPECIAL_CASES: &[SpecialCase] = &[
    ("sr.", &["sr."]),
    ("sra.", &["sra."]),
    ("srta.", &["srta."]),
    ("dr.", &["dr."]),
    ("dra.", &["dra."]),
    ("ud.", &["ud."]),
    ("uds.", &["uds."]),
    ("etc.", &["etc."]),
    ("p.ej.", &["p.ej."]),
    ("aprox.", &["aprox."]),
];

const FRENCH_SPECIAL_CASES: &[SpecialCase] = &[
    ("m.", &["m."]),
    ("mme.", &["mme."]),
    ("mlle.", &["mlle."]),
    ("dr.", &["dr."]),
    ("etc.", &["etc."]),
    ("cf.", &["cf."]),
    ("av.", &["av."]),
    ("aujourd'hui", &["aujourd'hui"]),
    ("c.-à-d.", &["c.-à-d."]),
];

const PORTUGUESE_SPECIAL_CASES: &[SpecialCase] = &[
    ("sr.", &["sr."]),
    ("sra.", &["sra."]),
    ("dr.", &["dr."]),
    ("dra.", &["dra."]),
    ("etc.", &["etc."]),
    ("av.", &["av."]),
    ("pág.", &["pág."]),
    ("v.", &["v."]),
];

const ITALIAN_SPECIAL_CASES: &[SpecialCase] = &[
    ("sig.", &["sig."]),
    ("sig.ra", &["sig.ra"]),
    ("dott.", &["dott."]),
    ("prof.", &["prof."]),
    ("ecc.", &["ecc."]),
    ("pag.", &["pag."]),
];

const DUTCH_SPECIAL_CASES: &[SpecialCase] = &[
    ("bijv.", &["bijv."]),
    ("o.a.", &["o.a."]),
    ("m.b.t.", &["m.b.t."]),
    ("d.w.z.", &["d.w.z."]),
    ("enz.", &["enz."]),
    ("dhr.", &["dhr."]),
    ("mevr.", &["mevr."]),
    ("'s", &["'s"]),
];

const FRENCH_ELISIONS: &[&str] = &[
    "l'", "d'", "j'", "m'", "n'", "s'", "t'", "c'", "qu'", "jusqu'", "lorsqu'", "puisqu'",
];

const ITALIAN_ELISIONS: &[&str] = &[
    "l'", "un'", "dell'", "all'", "nell'", "sull'", "dall'", "quell'", "c'", "d'",
];

impl Language {
    /// Every supported language, in code order.
    pub fn all() -> &'static [Language] {
        &[
            Language::German,
            Language::English,
            Language::Spanish,
            Language::French,
            Language::Italian,
            Language::Dutch,
            Language::Portuguese,
            Language::Multi,
        ]
    }

    /// Resolve an ISO 639-1 code (`"en"`, `"de"`, ...) or `"xx"`.
    ///
    /// # Errors
    ///
    /// Returns `NerbinError::UnsupportedLanguage` for any other code.
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::English),
            "de" => Ok(Language::German),
            "es" => Ok(Language::Spanish),
            "fr" => Ok(Language::French),
            "pt" => Ok(Language::Portuguese),
            "it" => Ok(Language::Italian),
            "nl" => Ok(Language::Dutch),
            "xx" => Ok(Language::Multi),
            _ => Err(NerbinError::UnsupportedLanguage(code.to_string())),
        }
    }

    /// The language code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::Portuguese => "pt",
            Language::Italian => "it",
            Language::Dutch => "nl",
            Language::Multi => "xx",
        }
    }

    /// Special cases shared by all languages.
    pub fn base_special_cases() -> &'static [SpecialCase] {
        BASE_SPECIAL_CASES
    }

    /// Special cases specific to this language. Entries are lowercase where
    /// casing varies; the tokenizer adds capitalized and uppercase variants.
    pub fn special_cases(&self) -> &'static [SpecialCase] {
        match self {
            Language::English => ENGLISH_SPECIAL_CASES,
            Language::German => GERMAN_SPECIAL_CASES,
            Language::Spanish => SPANISH_SPECIAL_CASES,
            Language::French => FRENCH_SPECIAL_CASES,
            Language::Portuguese => PORTUGUESE_SPECIAL_CASES,
            Language::Italian => ITALIAN_SPECIAL_CASES,
            Language::Dutch => DUTCH_SPECIAL_CASES,
            Language::Multi => &[],
        }
    }

    /// Article and pronoun elisions split off as prefixes (`l'homme` → `l'` `homme`).
    pub fn elisions(&self) -> &'static [&'static str] {
        match self {
            Language::French => FRENCH_ELISIONS,
            Language::Italian => ITALIAN_ELISIONS,
            _ => &[],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = NerbinError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}
