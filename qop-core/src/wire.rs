//! Wire addressing and identification

use crate::{OperatorError, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Identifier for one finite-dimensional subsystem
///
/// Wires are either integer indices or string labels. The two kinds never
/// compare equal, so `Wire::from(0)` and `Wire::from("0")` are distinct.
///
/// # Example
/// ```
/// use qop_core::Wire;
///
/// let w0 = Wire::from(0);
/// let anc = Wire::from("ancilla");
/// assert_ne!(w0, anc);
/// assert_eq!(anc.to_string(), "ancilla");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Wire {
    /// Integer wire index
    Index(usize),
    /// Named wire
    Label(String),
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wire::Index(i) => write!(f, "{}", i),
            Wire::Label(label) => write!(f, "{}", label),
        }
    }
}

impl From<usize> for Wire {
    #[inline]
    fn from(index: usize) -> Self {
        Wire::Index(index)
    }
}

impl From<&str> for Wire {
    fn from(label: &str) -> Self {
        Wire::Label(label.to_string())
    }
}

impl From<String> for Wire {
    fn from(label: String) -> Self {
        Wire::Label(label)
    }
}

/// Mapping used to relabel wires; wires missing from the map are kept
pub type WireMap = AHashMap<Wire, Wire>;

/// Ordered list of distinct wires
///
/// Most operators touch one to four wires, so the list is stored inline.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wires(SmallVec<[Wire; 4]>);

impl Wires {
    /// Create a wire list, rejecting duplicates
    pub fn new<I, W>(wires: I) -> Result<Self>
    where
        I: IntoIterator<Item = W>,
        W: Into<Wire>,
    {
        let wires = Self::unchecked(wires);
        wires.check_unique()?;
        Ok(wires)
    }

    /// Create a wire list of integer wires, rejecting duplicates
    ///
    /// # Example
    /// ```
    /// use qop_core::Wires;
    ///
    /// let wires = Wires::indices([0, 1, 2]).unwrap();
    /// assert_eq!(wires.len(), 3);
    /// assert!(Wires::indices([0, 0]).is_err());
    /// ```
    pub fn indices(indices: impl IntoIterator<Item = usize>) -> Result<Self> {
        Self::new(indices.into_iter().map(Wire::Index))
    }

    /// Create a wire list without checking for duplicates
    ///
    /// Used for wire unions where duplicates are removed by the caller.
    pub fn unchecked<I, W>(wires: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<Wire>,
    {
        Self(wires.into_iter().map(Into::into).collect())
    }

    /// Empty wire list
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of wires
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the wires in order
    pub fn iter(&self) -> std::slice::Iter<'_, Wire> {
        self.0.iter()
    }

    /// Wires as a slice
    #[inline]
    pub fn as_slice(&self) -> &[Wire] {
        &self.0
    }

    /// Whether `wire` is in this list
    pub fn contains(&self, wire: &Wire) -> bool {
        self.0.contains(wire)
    }

    /// Position of `wire` in this list
    pub fn position(&self, wire: &Wire) -> Option<usize> {
        self.0.iter().position(|w| w == wire)
    }

    /// First wire of `other` that also appears in `self`
    pub fn first_shared<'a>(&self, other: &'a Wires) -> Option<&'a Wire> {
        other.iter().find(|w| self.contains(w))
    }

    /// Whether the two lists share no wire
    pub fn is_disjoint(&self, other: &Wires) -> bool {
        self.first_shared(other).is_none()
    }

    /// Sub-list by index range
    pub fn slice(&self, range: std::ops::Range<usize>) -> Wires {
        Self(self.0[range].iter().cloned().collect())
    }

    /// Concatenation; fails if the lists share a wire
    pub fn concat(&self, other: &Wires) -> Result<Wires> {
        let mut joined = self.0.clone();
        joined.extend(other.iter().cloned());
        let joined = Self(joined);
        joined.check_unique()?;
        Ok(joined)
    }

    /// Ordered union of several wire lists, keeping first occurrences
    pub fn union<'a>(lists: impl IntoIterator<Item = &'a Wires>) -> Wires {
        let mut out = Wires::empty();
        for wire in lists.into_iter().flat_map(|l| l.iter()) {
            if !out.contains(wire) {
                out.0.push(wire.clone());
            }
        }
        out
    }

    /// Relabel through `map`; fails if the result contains duplicates
    pub fn map(&self, map: &WireMap) -> Result<Wires> {
        let mapped = Self(
            self.0
                .iter()
                .map(|w| map.get(w).cloned().unwrap_or_else(|| w.clone()))
                .collect(),
        );
        mapped.check_unique()?;
        Ok(mapped)
    }

    /// Require exactly `expected` wires for `operator`
    pub fn expect_len(&self, operator: &str, expected: usize) -> Result<()> {
        if self.len() != expected {
            return Err(OperatorError::invalid_wire_count(
                operator,
                expected,
                self.len(),
            ));
        }
        Ok(())
    }

    fn check_unique(&self) -> Result<()> {
        for i in 0..self.0.len() {
            for j in (i + 1)..self.0.len() {
                if self.0[i] == self.0[j] {
                    return Err(OperatorError::DuplicateWire(self.0[i].clone()));
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Wires {
    type Item = &'a Wire;
    type IntoIter = std::slice::Iter<'a, Wire>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for Wires {
    type Output = Wire;

    fn index(&self, index: usize) -> &Wire {
        &self.0[index]
    }
}

impl fmt::Display for Wires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, w) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", w)?;
        }
        write!(f, "]")
    }
}

/// Build a [`WireMap`] from `(old, new)` pairs
pub fn wire_map<I, A, B>(pairs: I) -> WireMap
where
    I: IntoIterator<Item = (A, B)>,
    A: Into<Wire>,
    B: Into<Wire>,
{
    pairs
        .into_iter()
        .map(|(a, b)| (a.into(), b.into()))
        .collect()
}
