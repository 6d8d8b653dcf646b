// src/lineage.rs

//! Rank-prefixed lineage strings such as `k__Bacteria|p__Firmicutes|g__Bacillus`.

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// Placeholder name for a taxon the source marks as unclassified.
pub const UNKNOWN: &str = "Unknown";

/// Separator between rank tokens in an encoded lineage.
pub const RANK_SEPARATOR: char = '|';

/// The seven recognised taxonomic ranks, kingdom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Kingdom,
    Phylum,
    Class,
    Order,
    Family,
    Genus,
    Species,
}

impl Rank {
    /// All ranks in hierarchical order.
    pub const ALL: [Rank; 7] = [
        Rank::Kingdom,
        Rank::Phylum,
        Rank::Class,
        Rank::Order,
        Rank::Family,
        Rank::Genus,
        Rank::Species,
    ];

    /// Single-letter code used as the token prefix (`g` in `g__Bacillus`).
    pub fn code(self) -> char {
        match self {
            Rank::Kingdom => 'k',
            Rank::Phylum => 'p',
            Rank::Class => 'c',
            Rank::Order => 'o',
            Rank::Family => 'f',
            Rank::Genus => 'g',
            Rank::Species => 's',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::Kingdom => "kingdom",
            Rank::Phylum => "phylum",
            Rank::Class => "class",
            Rank::Order => "order",
            Rank::Family => "family",
            Rank::Genus => "genus",
            Rank::Species => "species",
        }
    }

    pub fn from_code(code: char) -> Option<Rank> {
        Rank::ALL.into_iter().find(|r| r.code() == code)
    }

    /// Token prefix for this rank, e.g. `"s__"`.
    pub fn prefix(self) -> String {
        format!("{}__", self.code())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rank {
    type Err = FormatError;

    /// Accepts either the rank code (`"g"`) or its name (`"genus"`, any case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(rank) = Rank::from_code(c) {
                return Ok(rank);
            }
        }
        Rank::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FormatError::new(s, "a rank code (k, p, c, o, f, g, s) or rank name"))
    }
}

/// Ordered mapping from rank to taxon name, in the order ranks were encountered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lineage {
    entries: Vec<(Rank, String)>,
}

impl Lineage {
    pub fn new() -> Self {
        Lineage::default()
    }

    /// Every recognised rank set to [`UNKNOWN`].
    pub fn unknown() -> Self {
        Lineage {
            entries: Rank::ALL
                .into_iter()
                .map(|r| (r, UNKNOWN.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, rank: Rank) -> Option<&str> {
        self.entries
            .iter()
            .find(|(r, _)| *r == rank)
            .map(|(_, name)| name.as_str())
    }

    /// Sets the name at `rank`, keeping its position if already present.
    pub fn set(&mut self, rank: Rank, name: impl Into<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(r, _)| *r == rank) {
            Some(entry) => entry.1 = name,
            None => self.entries.push((rank, name)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rank, &str)> {
        self.entries.iter().map(|(r, name)| (*r, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Lineage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (rank, name)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, "{RANK_SEPARATOR}")?;
            }
            write!(f, "{}__{}", rank.code(), name)?;
        }
        Ok(())
    }
}

impl FromStr for Lineage {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

/// Splits one `<code>__<name>` token into its rank and name.
///
/// The name may be empty; the code must be one of the seven rank codes.
pub fn parse_lineage_entry(token: &str) -> Result<(Rank, &str), FormatError> {
    let mut chars = token.chars();
    let code = chars
        .next()
        .filter(|c| c.is_ascii_alphabetic())
        .ok_or_else(|| FormatError::new(token, "a '<rank>__<name>' lineage token"))?;
    let name = chars
        .as_str()
        .strip_prefix("__")
        .ok_or_else(|| FormatError::new(token, "a '<rank>__<name>' lineage token"))?;
    let rank = Rank::from_code(code)
        .ok_or_else(|| FormatError::new(token, "a rank code among k, p, c, o, f, g, s"))?;
    Ok((rank, name))
}

/// Decodes a `|`-separated lineage. The literal `"Unknown"` yields all seven
/// ranks set to `"Unknown"`.
pub fn decode(lineage: &str) -> Result<Lineage, FormatError> {
    if lineage == UNKNOWN {
        return Ok(Lineage::unknown());
    }

    let mut decoded = Lineage::new();
    for token in lineage.split(RANK_SEPARATOR) {
        let (rank, name) = parse_lineage_entry(token)?;
        if decoded.get(rank).is_some() {
            return Err(FormatError::new(
                lineage,
                format!("at most one '{}' token", rank.prefix()),
            ));
        }
        decoded.entries.push((rank, name.to_string()));
    }
    Ok(decoded)
}

pub fn encode(lineage: &Lineage) -> String {
    lineage.to_string()
}

/// Rewrites the `child` name as `"<parent> <child>"`, e.g. a binomial species label.
///
/// The lineage comes back unchanged when the child is absent, empty or
/// `"Unknown"`, or when there is no parent name to prepend.
pub fn merge_adjacent_ranks(lineage: &str, parent: Rank, child: Rank) -> Result<String, FormatError> {
    let mut decoded = decode(lineage)?;

    let merged = match (decoded.get(parent), decoded.get(child)) {
        (Some(p), Some(c)) if !c.is_empty() && c != UNKNOWN => Some(format!("{p} {c}")),
        _ => None,
    };
    if let Some(name) = merged {
        decoded.set(child, name);
    }
    Ok(encode(&decoded))
}
