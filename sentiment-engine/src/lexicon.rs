//! Keyword tables used by the aggregator and the analyzer.
//!
//! A [`Lexicon`] is immutable once built and is shared behind an `Arc`. The
//! built-in tables cover US political discussion; a different taxonomy can be
//! loaded from TOML:
//!
//! ```toml
//! positive_words = ["good", "great"]
//! negative_words = ["bad", "poor"]
//!
//! [[topics]]
//! name = "Economy"
//! keywords = ["economy", "jobs"]
//!
//! [[aspects]]
//! name = "Economy"
//! keywords = ["economy", "jobs"]
//! positive_words = ["growth"]
//! negative_words = ["recession"]
//! ```

use pulse_core::{read_config_file, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A dashboard topic: a name and the substrings that place a post in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDefinition {
    pub name: String,
    pub keywords: Vec<String>,
}

/// An analyzer aspect with its own sentiment vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub name: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub positive_words: Vec<String>,
    #[serde(default)]
    pub negative_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    pub topics: Vec<TopicDefinition>,
    pub aspects: Vec<AspectDefinition>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            positive_words: words(&[
                "good", "great", "excellent", "positive", "progress", "success", "benefit",
                "support", "improve", "advantage",
            ]),
            negative_words: words(&[
                "bad", "poor", "negative", "fail", "crisis", "problem", "threat", "oppose",
                "worse", "disaster",
            ]),
            topics: vec![
                TopicDefinition {
                    name: "Economy".to_string(),
                    keywords: words(&[
                        "economy", "economic", "jobs", "unemployment", "tax", "taxes",
                        "business", "market", "inflation",
                    ]),
                },
                TopicDefinition {
                    name: "Healthcare".to_string(),
                    keywords: words(&[
                        "health", "healthcare", "medical", "insurance", "hospital", "medicare",
                        "medicaid", "doctors",
                    ]),
                },
                TopicDefinition {
                    name: "Climate Policy".to_string(),
                    keywords: words(&[
                        "climate", "environment", "environmental", "green", "renewable",
                        "carbon", "emissions",
                    ]),
                },
                TopicDefinition {
                    name: "Education".to_string(),
                    keywords: words(&[
                        "education", "school", "student", "college", "university", "teacher",
                        "learning",
                    ]),
                },
                TopicDefinition {
                    name: "Immigration".to_string(),
                    keywords: words(&[
                        "immigration", "immigrant", "border", "migrant", "visa", "asylum",
                    ]),
                },
                TopicDefinition {
                    name: "Foreign Policy".to_string(),
                    keywords: words(&[
                        "foreign", "international", "diplomatic", "trade", "military", "war",
                        "treaty",
                    ]),
                },
            ],
            aspects: vec![
                AspectDefinition {
                    name: "Economy".to_string(),
                    keywords: words(&[
                        "economy", "economic", "jobs", "unemployment", "tax", "taxes",
                        "business", "market", "inflation", "wage", "debt",
                    ]),
                    positive_words: words(&[
                        "growth", "recovery", "boost", "gain", "profit", "increase", "improve",
                    ]),
                    negative_words: words(&[
                        "recession", "crisis", "decline", "loss", "deficit", "crash", "inflation",
                    ]),
                },
                AspectDefinition {
                    name: "Healthcare".to_string(),
                    keywords: words(&[
                        "health", "healthcare", "medical", "insurance", "hospital", "medicare",
                        "medicaid", "doctors", "patient",
                    ]),
                    positive_words: words(&[
                        "improve", "access", "affordable", "coverage", "care", "benefit",
                        "support",
                    ]),
                    negative_words: words(&[
                        "cost", "expensive", "crisis", "problem", "issue", "lack", "deny",
                    ]),
                },
                AspectDefinition {
                    name: "Foreign Policy".to_string(),
                    keywords: words(&[
                        "foreign", "international", "diplomatic", "trade", "military", "war",
                        "treaty", "alliance", "global",
                    ]),
                    positive_words: words(&[
                        "peace", "cooperation", "agreement", "ally", "support", "partnership",
                        "diplomacy",
                    ]),
                    negative_words: words(&[
                        "war", "conflict", "tension", "threat", "crisis", "dispute", "hostile",
                    ]),
                },
            ],
        }
    }
}

impl Lexicon {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let lexicon: Lexicon = toml::from_str(contents)?;
        let lexicon = lexicon.normalized();
        lexicon.validate()?;
        Ok(lexicon)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = read_config_file(path)?;
        Self::from_toml_str(&contents)
    }

    /// Lowercase and trim every word; matching is case-insensitive.
    fn normalized(mut self) -> Self {
        fn norm(list: &mut [String]) {
            for word in list.iter_mut() {
                *word = word.trim().to_lowercase();
            }
        }

        norm(&mut self.positive_words);
        norm(&mut self.negative_words);
        for topic in &mut self.topics {
            topic.name = topic.name.trim().to_string();
            norm(&mut topic.keywords);
        }
        for aspect in &mut self.aspects {
            aspect.name = aspect.name.trim().to_string();
            norm(&mut aspect.keywords);
            norm(&mut aspect.positive_words);
            norm(&mut aspect.negative_words);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = self
            .topics
            .iter()
            .map(|t| (t.name.as_str(), &t.keywords))
            .chain(self.aspects.iter().map(|a| (a.name.as_str(), &a.keywords)));

        for (name, keywords) in named {
            if name.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    reason: "lexicon topic with an empty name".to_string(),
                });
            }
            if keywords.is_empty() || keywords.iter().any(|k| k.is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    reason: format!("lexicon topic '{}' needs non-empty keywords", name),
                });
            }
        }

        let all_words = self.positive_words.iter().chain(&self.negative_words).chain(
            self.aspects
                .iter()
                .flat_map(|a| a.positive_words.iter().chain(&a.negative_words)),
        );
        for word in all_words {
            if word.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    reason: "lexicon word lists must not contain empty words".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables() {
        let lexicon = Lexicon::default();
        assert!(lexicon.validate().is_ok());

        let topics: Vec<&str> = lexicon.topics.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            topics,
            vec![
                "Economy",
                "Healthcare",
                "Climate Policy",
                "Education",
                "Immigration",
                "Foreign Policy"
            ]
        );

        let aspects: Vec<&str> = lexicon.aspects.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(aspects, vec!["Economy", "Healthcare", "Foreign Policy"]);
    }

    #[test]
    fn test_load_from_toml_normalizes_case() {
        let lexicon = Lexicon::from_toml_str(
            r#"
            positive_words = ["Good"]
            negative_words = ["BAD "]

            [[topics]]
            name = "Energy"
            keywords = ["Oil", "solar"]

            [[aspects]]
            name = "Energy"
            keywords = ["oil"]
            "#,
        )
        .unwrap();

        assert_eq!(lexicon.positive_words, vec!["good"]);
        assert_eq!(lexicon.negative_words, vec!["bad"]);
        assert_eq!(lexicon.topics[0].keywords, vec!["oil", "solar"]);
        assert!(lexicon.aspects[0].positive_words.is_empty());
    }

    #[test]
    fn test_rejects_topic_without_keywords() {
        let err = Lexicon::from_toml_str(
            r#"
            positive_words = []
            negative_words = []
            aspects = []

            [[topics]]
            name = "Empty"
            keywords = []
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }

    #[test]
    fn test_rejects_blank_keyword() {
        let err = Lexicon::from_toml_str(
            r#"
            positive_words = []
            negative_words = []
            aspects = []

            [[topics]]
            name = "Blank"
            keywords = ["  "]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }

    #[test]
    fn test_from_path() {
        let err = Lexicon::from_path("/definitely/not/here/lexicon.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));

        let path = std::env::temp_dir().join(format!("pulse-lexicon-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "positive_words = [\"Up\"]\nnegative_words = []\naspects = []\n\n[[topics]]\nname = \"Energy\"\nkeywords = [\"oil\"]\n",
        )
        .unwrap();
        let lexicon = Lexicon::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(lexicon.positive_words, vec!["up"]);
        assert_eq!(lexicon.topics[0].name, "Energy");
    }
}
