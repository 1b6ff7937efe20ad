//! Fold trigger configuration.
//!
//! A [`TriggerRegistry`] is an insertion-ordered map from start symbol to end symbol. Iteration
//! order is match priority: when a single line is scanned for a region start (on-demand
//! toggling), the first registered pair whose start symbol occurs *anywhere* on the line is
//! tried first, regardless of column. [`StartPolicy::EarliestColumn`] switches to column order.

use fold_core_lang::FoldConfig;
pub use fold_core_lang::StartPolicy;
use indexmap::IndexMap;

/// One `(start, end)` delimiter pair. Both symbols are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriggerPair {
    start: String,
    end: String,
}

impl TriggerPair {
    /// Create a pair, or `None` if either symbol is empty.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Option<Self> {
        let start = start.into();
        let end = end.into();
        if start.is_empty() || end.is_empty() {
            return None;
        }
        Some(Self { start, end })
    }

    /// Opening symbol.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Closing symbol.
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Both symbols as characters, if each is exactly one character long.
    pub fn single_chars(&self) -> Option<(char, char)> {
        Some((single_char(&self.start)?, single_char(&self.end)?))
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let ch = chars.next()?;
    chars.next().is_none().then_some(ch)
}

/// A start symbol found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartCandidate {
    /// Byte column of the first occurrence of the start symbol within the line.
    pub column: usize,
    /// Pair whose start symbol occurs there.
    pub pair: TriggerPair,
}

/// Ordered trigger configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerRegistry {
    pairs: IndexMap<String, String>,
    policy: StartPolicy,
}

impl TriggerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a config, dropping pairs with empty symbols.
    pub fn from_config(config: &FoldConfig) -> Self {
        let mut registry = Self {
            pairs: IndexMap::new(),
            policy: config.start_policy,
        };
        registry.set(
            config
                .triggers
                .iter()
                .map(|t| (t.start.as_str(), t.end.as_str())),
        );
        registry
    }

    /// Replace every pair. Pairs with an empty symbol are skipped.
    pub fn set<I, S, E>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (S, E)>,
        S: Into<String>,
        E: Into<String>,
    {
        self.pairs.clear();
        for (start, end) in pairs {
            self.put(start, end);
        }
    }

    /// Register a pair. An existing start symbol keeps its priority slot and gets the new end
    /// symbol. Returns `false` (and changes nothing) if either symbol is empty.
    pub fn put(&mut self, start: impl Into<String>, end: impl Into<String>) -> bool {
        let start = start.into();
        let end = end.into();
        if start.is_empty() || end.is_empty() {
            tracing::debug!(start = %start, end = %end, "ignoring fold trigger with empty symbol");
            return false;
        }
        self.pairs.insert(start, end);
        true
    }

    /// Remove the pair with this start symbol, keeping the order of the rest.
    pub fn remove(&mut self, start: &str) -> bool {
        self.pairs.shift_remove(start).is_some()
    }

    /// Read-only view of the ordered map.
    pub fn get(&self) -> &IndexMap<String, String> {
        &self.pairs
    }

    /// Pairs in priority order.
    pub fn pairs(&self) -> impl Iterator<Item = TriggerPair> + '_ {
        self.pairs.iter().map(|(start, end)| TriggerPair {
            start: start.clone(),
            end: end.clone(),
        })
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pairs are registered.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Active start policy.
    pub fn policy(&self) -> StartPolicy {
        self.policy
    }

    /// Change the start policy.
    pub fn set_policy(&mut self, policy: StartPolicy) {
        self.policy = policy;
    }

    /// Start symbols occurring on `line_text`, in the order they should be tried.
    pub fn candidates_on_line(&self, line_text: &str) -> Vec<StartCandidate> {
        let mut candidates: Vec<StartCandidate> = self
            .pairs
            .iter()
            .filter_map(|(start, end)| {
                line_text.find(start.as_str()).map(|column| StartCandidate {
                    column,
                    pair: TriggerPair {
                        start: start.clone(),
                        end: end.clone(),
                    },
                })
            })
            .collect();

        if self.policy == StartPolicy::EarliestColumn {
            // Stable sort: equal columns keep registration order.
            candidates.sort_by_key(|c| c.column);
        }
        candidates
    }
}
