//! Bundled lexicon-based polarity scorer.
//!
//! Word valences are on a -4..4 scale. A text's raw score is the sum of its
//! word valences after boosters, negation, capitalisation and punctuation
//! emphasis are applied, then squashed into [-1.0, 1.0] with
//! `s / sqrt(s² + ALPHA)`.

use std::collections::HashMap;

use crate::analysis::scorer::PolarityScorer;
use crate::error::ScoreError;

/// Normalisation constant for the compound score.
const ALPHA: f64 = 15.0;

/// Increment contributed by a booster word.
const B_INCR: f64 = 0.293;
/// Decrement contributed by a dampener word.
const B_DECR: f64 = -0.293;
/// Extra weight for an ALL-CAPS sentiment word in mixed-case text.
const C_INCR: f64 = 0.733;
/// Multiplier applied to a negated word's valence.
const N_SCALAR: f64 = -0.74;

const EXCLAMATION_INCR: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCR: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

/// Booster influence by distance (1, 2, 3 tokens before the word).
const BOOSTER_DECAY: [f64; 3] = [1.0, 0.95, 0.9];

pub const DEFAULT_MAX_CHARS: usize = 100_000;

static LEXICON: &[(&str, f64)] = &[
    // positive
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("excellent", 2.7),
    ("outstanding", 3.0),
    ("fantastic", 2.6),
    ("wonderful", 2.7),
    ("brilliant", 2.8),
    ("superb", 3.1),
    ("perfect", 2.7),
    ("great", 3.1),
    ("good", 1.9),
    ("nice", 1.8),
    ("fine", 0.8),
    ("ok", 0.9),
    ("okay", 0.9),
    ("love", 3.2),
    ("loved", 2.9),
    ("like", 1.5),
    ("liked", 1.8),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("happy", 2.7),
    ("glad", 2.0),
    ("pleased", 1.9),
    ("delighted", 2.9),
    ("grateful", 2.0),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("helpful", 1.8),
    ("useful", 1.9),
    ("friendly", 2.2),
    ("kind", 2.4),
    ("polite", 1.3),
    ("efficient", 1.8),
    ("quick", 1.0),
    ("easy", 1.9),
    ("clear", 1.6),
    ("fair", 1.3),
    ("safe", 1.9),
    ("secure", 1.4),
    ("clean", 1.7),
    ("reliable", 1.8),
    ("improve", 1.9),
    ("improved", 2.1),
    ("improvement", 2.0),
    ("better", 1.9),
    ("best", 3.2),
    ("benefit", 2.0),
    ("benefits", 1.6),
    ("support", 1.7),
    ("supported", 1.3),
    ("protect", 1.6),
    ("protection", 1.2),
    ("help", 1.7),
    ("helped", 1.7),
    ("care", 2.2),
    ("caring", 2.2),
    ("hope", 1.9),
    ("hopeful", 2.3),
    ("success", 2.7),
    ("successful", 2.8),
    ("win", 2.8),
    ("recommend", 1.5),
    ("welcome", 2.0),
    ("positive", 2.6),
    ("free", 2.3),
    ("freedom", 3.2),
    ("justice", 2.4),
    ("equal", 1.4),
    ("respect", 2.1),
    ("trust", 2.3),
    ("honest", 2.3),
    ("impressive", 2.3),
    ("impressed", 2.1),
    ("satisfied", 1.8),
    ("comfortable", 1.5),
    ("convenient", 1.6),
    ("responsive", 1.5),
    ("accessible", 1.4),
    ("affordable", 1.5),
    ("smooth", 1.4),
    ("save", 2.2),
    ("saved", 1.9),
    ("healthy", 1.7),
    ("strong", 2.3),
    ("valuable", 2.1),
    ("important", 0.8),
    ("encourage", 2.3),
    ("celebrate", 2.7),
    ("proud", 2.1),
    ("peace", 2.5),
    ("warm", 0.9),
    // negative
    ("terrible", -2.5),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("dreadful", -2.7),
    ("appalling", -2.9),
    ("disgraceful", -2.6),
    ("disgusting", -2.4),
    ("shocking", -1.7),
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("poor", -2.1),
    ("poorly", -1.7),
    ("unhelpful", -1.9),
    ("useless", -1.8),
    ("rude", -2.0),
    ("slow", -0.7),
    ("hate", -2.7),
    ("hated", -3.2),
    ("dislike", -1.6),
    ("angry", -2.3),
    ("anger", -2.7),
    ("annoyed", -1.6),
    ("annoying", -1.7),
    ("frustrated", -1.5),
    ("frustrating", -1.9),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("sad", -2.1),
    ("unhappy", -1.8),
    ("upset", -1.6),
    ("worried", -1.2),
    ("worry", -1.9),
    ("fear", -2.2),
    ("afraid", -2.2),
    ("scared", -2.2),
    ("danger", -2.4),
    ("dangerous", -2.1),
    ("unsafe", -2.3),
    ("harm", -2.5),
    ("harmful", -2.5),
    ("damage", -2.2),
    ("damaged", -1.9),
    ("crisis", -3.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("issue", -0.7),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("failing", -2.3),
    ("broken", -2.1),
    ("wrong", -2.1),
    ("unfair", -2.1),
    ("unjust", -2.3),
    ("injustice", -2.7),
    ("corrupt", -3.0),
    ("corruption", -2.8),
    ("abuse", -3.2),
    ("cruel", -2.8),
    ("cruelty", -2.9),
    ("suffer", -2.1),
    ("suffering", -2.1),
    ("pain", -2.3),
    ("death", -2.9),
    ("deaths", -2.9),
    ("kill", -3.7),
    ("killed", -3.5),
    ("victim", -2.9),
    ("victims", -2.6),
    ("poverty", -2.3),
    ("waste", -1.8),
    ("wasted", -2.2),
    ("confusing", -0.9),
    ("confused", -1.3),
    ("difficult", -1.5),
    ("expensive", -1.3),
    ("delay", -1.3),
    ("delayed", -0.9),
    ("ignored", -1.3),
    ("neglect", -2.0),
    ("lost", -1.3),
    ("loss", -1.3),
    ("ban", -2.6),
    ("banned", -2.0),
    ("cut", -1.1),
    ("cuts", -1.2),
    ("threat", -2.4),
    ("stop", -1.2),
    ("against", -1.0),
    ("complaint", -1.5),
    ("complain", -1.5),
    ("unacceptable", -2.0),
    ("ridiculous", -1.5),
    ("stupid", -2.4),
    ("nightmare", -2.6),
    ("mess", -1.5),
    ("sick", -2.3),
    ("dirty", -1.9),
    ("lies", -1.8),
    ("lie", -1.6),
    ("dishonest", -2.7),
    ("scandal", -1.9),
    ("crime", -2.5),
    ("violence", -3.1),
];

static BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", B_INCR),
    ("amazingly", B_INCR),
    ("completely", B_INCR),
    ("deeply", B_INCR),
    ("enormously", B_INCR),
    ("entirely", B_INCR),
    ("especially", B_INCR),
    ("exceptionally", B_INCR),
    ("extremely", B_INCR),
    ("greatly", B_INCR),
    ("highly", B_INCR),
    ("hugely", B_INCR),
    ("incredibly", B_INCR),
    ("most", B_INCR),
    ("particularly", B_INCR),
    ("really", B_INCR),
    ("so", B_INCR),
    ("totally", B_INCR),
    ("truly", B_INCR),
    ("utterly", B_INCR),
    ("very", B_INCR),
    ("almost", B_DECR),
    ("barely", B_DECR),
    ("hardly", B_DECR),
    ("kinda", B_DECR),
    ("less", B_DECR),
    ("marginally", B_DECR),
    ("occasionally", B_DECR),
    ("partly", B_DECR),
    ("scarcely", B_DECR),
    ("slightly", B_DECR),
    ("somewhat", B_DECR),
];

static NEGATIONS: &[&str] = &[
    "aint", "ain't", "arent", "aren't", "cannot", "cant", "can't", "couldnt", "couldn't",
    "didnt", "didn't", "doesnt", "doesn't", "dont", "don't", "hasnt", "hasn't", "havent",
    "haven't", "isnt", "isn't", "neither", "never", "no", "nobody", "none", "nor", "not",
    "nothing", "nowhere", "shouldnt", "shouldn't", "wasnt", "wasn't", "werent", "weren't",
    "without", "wont", "won't", "wouldnt", "wouldn't",
];

struct Token<'a> {
    raw: &'a str,
    lower: String,
}

/// Lexicon scorer with boosters, negation and emphasis handling.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    valences: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
    max_chars: usize,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            valences: LEXICON.iter().map(|(w, v)| (w.to_string(), *v)).collect(),
            boosters: BOOSTERS.iter().map(|(w, v)| (w.to_string(), *v)).collect(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// Adds or overrides a word valence (-4..4 scale).
    pub fn with_word(mut self, word: &str, valence: f64) -> Self {
        self.valences.insert(word.to_lowercase(), valence);
        self
    }

    /// Texts longer than `max_chars` characters are rejected.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(&word.to_lowercase()).copied()
    }

    /// Raw summed valence before normalisation.
    fn raw_score(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let caps_differential = caps_differential(&tokens);

        let mut sentiments = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.valences.get(&token.lower) else {
                sentiments.push(0.0);
                continue;
            };

            let sign = base.signum();
            let mut valence = base;
            if caps_differential && is_all_caps(token.raw) {
                valence += sign * C_INCR;
            }

            let mut negated = false;
            for (dist, decay) in BOOSTER_DECAY.iter().enumerate() {
                let Some(prev) = i.checked_sub(dist + 1).map(|j| &tokens[j]) else {
                    break;
                };
                if let Some(&boost) = self.boosters.get(&prev.lower) {
                    let mut delta = boost * sign;
                    if caps_differential && is_all_caps(prev.raw) {
                        delta += sign * C_INCR;
                    }
                    valence += delta * decay;
                }
                if is_negation(&prev.lower) {
                    negated = true;
                }
            }
            if negated {
                valence *= N_SCALAR;
            }

            sentiments.push(valence);
        }

        if let Some(but) = tokens.iter().position(|t| t.lower == "but") {
            for (i, s) in sentiments.iter_mut().enumerate() {
                if i < but {
                    *s *= 0.5;
                } else if i > but {
                    *s *= 1.5;
                }
            }
        }

        let sum: f64 = sentiments.iter().sum();
        let emphasis = punctuation_emphasis(text);
        if sum > 0.0 {
            sum + emphasis
        } else if sum < 0.0 {
            sum - emphasis
        } else {
            sum
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconScorer {
    fn compound(&self, text: &str) -> Result<f64, ScoreError> {
        let len = text.chars().count();
        if len > self.max_chars {
            return Err(ScoreError::TooLong {
                len,
                max: self.max_chars,
            });
        }
        Ok(normalize(self.raw_score(text)))
    }
}

/// Squashes a raw valence sum into [-1.0, 1.0].
pub fn normalize(score: f64) -> f64 {
    if score == 0.0 {
        return 0.0;
    }
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .map(|raw| Token {
            raw,
            lower: raw.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'"),
        })
        .collect()
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic)
        && word
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

/// True when some, but not all, tokens are ALL CAPS.
fn caps_differential(tokens: &[Token<'_>]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t.raw)).count();
    caps > 0 && caps < tokens.len()
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCR,
        _ => QUESTION_CAP,
    };
    exclamations as f64 * EXCLAMATION_INCR + question_amp
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> f64 {
        LexiconScorer::new().compound(text).unwrap()
    }

    #[test]
    fn test_positive_and_negative_feedback() {
        assert!(score("This service is amazing!!") > 0.05);
        assert!(score("This is terrible and unhelpful.") < -0.05);
    }

    #[test]
    fn test_text_without_lexicon_words_is_zero() {
        assert_eq!(score("The council meets on Tuesday."), 0.0);
    }

    #[test]
    fn test_exclamations_amplify() {
        assert!(score("good!!!") > score("good"));
        assert_eq!(score("good!!!!!!!"), score("good!!!!"));
    }

    #[test]
    fn test_booster_amplifies_and_dampener_reduces() {
        assert!(score("very good") > score("good"));
        assert!(score("slightly good") < score("good"));
        assert!(score("very bad") < score("bad"));
    }

    #[test]
    fn test_negation_flips_polarity() {
        assert!(score("not good") < 0.0);
        assert!(score("this is not bad") > 0.0);
        assert!(score("it doesn't help") < 0.0);
    }

    #[test]
    fn test_curly_apostrophe_negates() {
        assert!(score("it doesn\u{2019}t help") < 0.0);
        assert_eq!(score("it doesn\u{2019}t help"), score("it doesn't help"));
        assert_eq!(score("staff weren\u{2019}t rude"), score("staff weren't rude"));
    }

    #[test]
    fn test_caps_emphasis_only_in_mixed_case() {
        assert!(score("the staff were GREAT") > score("the staff were great"));
        assert_eq!(score("GREAT"), score("great"));
    }

    #[test]
    fn test_but_shifts_weight_to_second_clause() {
        assert!(score("The staff were good but the wait was terrible") < 0.0);
    }

    #[test]
    fn test_compound_stays_in_range() {
        let long = "amazing ".repeat(500);
        let s = score(&long);
        assert!(s <= 1.0 && s > 0.99);
    }

    #[test]
    fn test_too_long_text_is_rejected() {
        let scorer = LexiconScorer::new().with_max_chars(10);
        assert_eq!(
            scorer.compound("this text is too long"),
            Err(ScoreError::TooLong { len: 21, max: 10 })
        );
    }

    #[test]
    fn test_custom_word() {
        let scorer = LexiconScorer::new().with_word("Pothole", -2.0);
        assert_eq!(scorer.valence("pothole"), Some(-2.0));
        assert!(scorer.compound("another pothole").unwrap() < 0.0);
    }

    #[test]
    fn test_deterministic() {
        let scorer = LexiconScorer::new();
        let text = "Really helpful staff, but the forms were confusing!";
        assert_eq!(scorer.compound(text), scorer.compound(text));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(0.0), 0.0);
        assert!((normalize(1.0) - 0.25).abs() < 1e-12);
        assert!((normalize(-1.0) + 0.25).abs() < 1e-12);
    }
}
