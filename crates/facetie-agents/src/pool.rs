//! Decision pools: the candidate behaviors for one decision.
//!
//! A [`DecisionPool`] is validated when it is built: options are non-empty
//! and distinct, and base weights are finite and non-negative. That makes
//! [`MindStore::decide`](crate::MindStore::decide) infallible.
//!
//! The free-text `selection_logic` hint of pool definitions (for example
//! `"weighted by fear and curiosity"`) is parsed once into
//! [`SelectionLogic`] flags at construction.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use facetie_types::{Emotion, EmotionVector};

use crate::error::AgentError;

// ---------------------------------------------------------------------------
// SelectionLogic
// ---------------------------------------------------------------------------

/// Which emotions scale every option's weight in a pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct SelectionLogic {
    /// Multiply by `1 + fear / 50`.
    pub uses_fear: bool,
    /// Multiply by `1 + curiosity / 50`.
    pub uses_curiosity: bool,
    /// Multiply by `1 + anger / 60`.
    pub uses_anger: bool,
    /// Multiply by `1 + trust / 100`.
    pub uses_trust: bool,
}

impl SelectionLogic {
    /// Flags for every recognized token contained in `hint`.
    ///
    /// Tokens are matched as case-sensitive substrings; anything else in
    /// the hint (such as `health`) is ignored.
    pub fn parse(hint: &str) -> Self {
        Self {
            uses_fear: hint.contains("fear"),
            uses_curiosity: hint.contains("curiosity"),
            uses_anger: hint.contains("anger"),
            uses_trust: hint.contains("trust"),
        }
    }

    /// Whether no emotion term applies.
    pub const fn is_empty(&self) -> bool {
        !(self.uses_fear || self.uses_curiosity || self.uses_anger || self.uses_trust)
    }

    /// The emotions that apply, in declaration order.
    pub fn emotions(&self) -> Vec<Emotion> {
        let mut out = Vec::with_capacity(4);
        if self.uses_fear {
            out.push(Emotion::Fear);
        }
        if self.uses_curiosity {
            out.push(Emotion::Curiosity);
        }
        if self.uses_anger {
            out.push(Emotion::Anger);
        }
        if self.uses_trust {
            out.push(Emotion::Trust);
        }
        out
    }

    /// Compound multiplier of every enabled emotion term.
    pub fn multiplier(&self, emotions: &EmotionVector) -> f64 {
        self.emotions()
            .into_iter()
            .map(|emotion| {
                let level = f64::from(emotions.get(emotion));
                match emotion {
                    Emotion::Fear | Emotion::Curiosity => 1.0 + level / 50.0,
                    Emotion::Anger => 1.0 + level / 60.0,
                    Emotion::Trust => 1.0 + level / 100.0,
                    // No hint token enables these.
                    Emotion::Sadness | Emotion::Joy | Emotion::Surprise => 1.0,
                }
            })
            .product()
    }

    /// A hint string that parses back to these flags.
    pub fn to_hint(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.emotions().into_iter().map(Emotion::as_str).collect();
        Some(format!("weighted by {}", names.join(" and ")))
    }
}

// ---------------------------------------------------------------------------
// DecisionPool
// ---------------------------------------------------------------------------

/// Wire form of a pool, as written in config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PoolDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    options: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    weights: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selection_logic: Option<String>,
}

/// An ordered set of distinct options with optional base weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PoolDefinition", into = "PoolDefinition")]
pub struct DecisionPool {
    name: Option<String>,
    options: Vec<String>,
    weights: BTreeMap<String, f64>,
    logic: SelectionLogic,
}

impl DecisionPool {
    /// Build a pool from its options, in selection order.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::EmptyPool`] for no options and
    /// [`AgentError::DuplicateOption`] if a name repeats.
    pub fn new<I, S>(options: I) -> Result<Self, AgentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.is_empty() {
            return Err(AgentError::EmptyPool);
        }
        let mut seen = BTreeSet::new();
        for option in &options {
            if !seen.insert(option.as_str()) {
                return Err(AgentError::DuplicateOption(option.clone()));
            }
        }
        Ok(Self {
            name: None,
            options,
            weights: BTreeMap::new(),
            logic: SelectionLogic::default(),
        })
    }

    /// Attach a name, used in logs and decision memories.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the emotion terms.
    #[must_use]
    pub fn with_logic(mut self, logic: SelectionLogic) -> Self {
        self.logic = logic;
        self
    }

    /// Set the emotion terms from a free-text hint.
    #[must_use]
    pub fn with_selection_hint(self, hint: &str) -> Self {
        self.with_logic(SelectionLogic::parse(hint))
    }

    /// Set the base weight of one option (options without one weigh 1).
    ///
    /// Weights for names that are not options are kept but never used.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidWeight`] for negative or non-finite weights.
    pub fn with_weight(mut self, option: impl Into<String>, weight: f64) -> Result<Self, AgentError> {
        let option = option.into();
        if !weight.is_finite() || weight < 0.0 {
            return Err(AgentError::InvalidWeight { option, weight });
        }
        self.weights.insert(option, weight);
        Ok(self)
    }

    /// A copy with `extra` options appended; names already present are skipped.
    #[must_use]
    pub fn expanded<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pool = self.clone();
        for option in extra {
            let option = option.into();
            if !pool.options.contains(&option) {
                pool.options.push(option);
            }
        }
        pool
    }

    /// The pool's name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Options in selection order. Never empty.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Base weight of `option`.
    pub fn base_weight(&self, option: &str) -> f64 {
        self.weights.get(option).copied().unwrap_or(1.0)
    }

    /// The emotion terms.
    pub const fn logic(&self) -> SelectionLogic {
        self.logic
    }

    /// Whether `option` belongs to the pool.
    pub fn contains(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

impl TryFrom<PoolDefinition> for DecisionPool {
    type Error = AgentError;

    fn try_from(def: PoolDefinition) -> Result<Self, Self::Error> {
        let mut pool = Self::new(def.options)?;
        if let Some(hint) = def.selection_logic.as_deref() {
            pool = pool.with_selection_hint(hint);
        }
        for (option, weight) in def.weights {
            pool = pool.with_weight(option, weight)?;
        }
        pool.name = def.name;
        Ok(pool)
    }
}

impl From<DecisionPool> for PoolDefinition {
    fn from(pool: DecisionPool) -> Self {
        Self {
            selection_logic: pool.logic.to_hint(),
            name: pool.name,
            options: pool.options,
            weights: pool.weights,
        }
    }
}
