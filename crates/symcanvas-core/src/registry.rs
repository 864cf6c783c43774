use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::symbol::Symbol;

/// Insertion rank assigned by the registry. Strictly increasing, never reused.
pub type Rank = u64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate symbol name: '{0}'")]
    DuplicateName(String),

    #[error("Symbol name '{0}' is reserved for a canvas layer")]
    ReservedName(String),
}

/// A symbol together with the rank it was given when it was added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSymbol {
    rank: Rank,
    #[serde(flatten)]
    symbol: Symbol,
}

impl RankedSymbol {
    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        self.symbol.name()
    }
}

/// Named symbols in draw order.
///
/// Names are unique: adding a name that is already present is always an
/// error, never a merge or overwrite. Entries are append-only, so the
/// backing vector is already sorted by rank and enumeration needs no sort.
#[derive(Debug, Default)]
pub struct SymbolRegistry {
    entries: Vec<RankedSymbol>,
    /// Name -> position in `entries`.
    index: HashMap<String, usize>,
    next_rank: Rank,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `symbol` under its name with the next rank.
    ///
    /// A rejected add leaves the registry untouched, including the rank
    /// counter.
    pub fn add(&mut self, symbol: Symbol) -> Result<Rank, RegistryError> {
        if self.index.contains_key(symbol.name()) {
            log::debug!("Rejected duplicate symbol '{}'", symbol.name());
            return Err(RegistryError::DuplicateName(symbol.name().to_string()));
        }

        let rank = self.next_rank;
        self.next_rank += 1;

        log::debug!(
            "Added {} '{}' at rank {}",
            symbol.shape().kind(),
            symbol.name(),
            rank
        );
        self.index.insert(symbol.name().to_string(), self.entries.len());
        self.entries.push(RankedSymbol { rank, symbol });
        Ok(rank)
    }

    /// All symbols, ascending by rank. Each call starts a fresh pass.
    pub fn all_in_order(&self) -> impl Iterator<Item = &RankedSymbol> {
        debug_assert!(self.entries.windows(2).all(|w| w[0].rank < w[1].rank));
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&RankedSymbol> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The rank the next successful `add` will receive.
    pub fn next_rank(&self) -> Rank {
        self.next_rank
    }

    /// Snapshot of the registry contents in draw order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }
}

impl<'a> IntoIterator for &'a SymbolRegistry {
    type Item = &'a RankedSymbol;
    type IntoIter = std::slice::Iter<'a, RankedSymbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
