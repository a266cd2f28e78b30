//! Object Identifier (OID) type and row-index arithmetic.
//!
//! OIDs are stored as `SmallVec<[u32; 16]>` to avoid heap allocation for common OIDs.
//!
//! Two layers are provided. [`compose`] and [`decompose`] work on dotted
//! strings exactly as callers pass indexes around (`".0"`, `"1000073"`,
//! `"3.1"`). [`Oid::with_index`] and [`Oid::index_after`] are their typed
//! counterparts, used internally once identifiers are parsed.

use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;

/// Arc separator in dotted notation.
pub const SEPARATOR: char = '.';

/// Index of a scalar (non-columnar) object instance.
pub const SCALAR_INDEX: &str = ".0";

/// Object Identifier.
///
/// Stored as a sequence of arc values (u32). Uses SmallVec to avoid
/// heap allocation for OIDs with 16 or fewer arcs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an empty OID.
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    /// Create an OID from arc values.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_query::oid::Oid;
    ///
    /// let oid = Oid::new(vec![1, 3, 6, 1, 2, 1]);
    /// assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1]);
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Create an OID from a slice of arcs.
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse an OID from dotted string notation (e.g., "1.3.6.1.2.1.1.1.0").
    ///
    /// A single leading separator is accepted, so row indexes such as `".0"`
    /// parse the same as `"0"`. Empty arcs in the middle (`"1..3"`) are
    /// rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_query::oid::Oid;
    ///
    /// let oid = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
    /// assert_eq!(oid.len(), 9);
    ///
    /// let index = Oid::parse(".0").unwrap();
    /// assert_eq!(index.arcs(), &[0]);
    ///
    /// assert!(Oid::parse("1.3.x").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let body = s.strip_prefix(SEPARATOR).unwrap_or(s);
        if body.is_empty() {
            return Ok(Self::empty());
        }

        let mut arcs = SmallVec::new();
        for part in body.split(SEPARATOR) {
            let arc: u32 = part
                .parse()
                .map_err(|_| Error::InvalidOid(format!("'{}'", s).into()).boxed())?;
            arcs.push(arc);
        }

        Ok(Self { arcs })
    }

    /// Whether `s` looks like a dotted numeric identifier rather than a name.
    ///
    /// ```
    /// use snmp_query::oid::Oid;
    ///
    /// assert!(Oid::is_numeric(".1.3.6.1"));
    /// assert!(Oid::is_numeric("1.3.6.1"));
    /// assert!(!Oid::is_numeric("sysDescr"));
    /// assert!(!Oid::is_numeric(""));
    /// ```
    pub fn is_numeric(s: &str) -> bool {
        let body = s.strip_prefix(SEPARATOR).unwrap_or(s);
        !body.is_empty()
            && body
                .split(SEPARATOR)
                .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Get the number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Check if this OID starts with another OID.
    ///
    /// An OID always starts with itself, and any OID starts with an empty OID.
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.len() >= other.arcs.len() && self.arcs[..other.arcs.len()] == other.arcs[..]
    }

    /// Get the parent OID (all arcs except the last).
    ///
    /// Returns `None` if the OID is empty.
    pub fn parent(&self) -> Option<Oid> {
        if self.arcs.is_empty() {
            None
        } else {
            Some(Oid {
                arcs: SmallVec::from_slice(&self.arcs[..self.arcs.len() - 1]),
            })
        }
    }

    /// Create a child OID by appending an arc.
    ///
    /// ```
    /// use snmp_query::oid::Oid;
    ///
    /// let system = Oid::parse("1.3.6.1.2.1.1").unwrap();
    /// assert_eq!(system.child(1).to_string(), "1.3.6.1.2.1.1.1");
    /// ```
    pub fn child(&self, arc: u32) -> Oid {
        let mut arcs = self.arcs.clone();
        arcs.push(arc);
        Oid { arcs }
    }

    /// Append a (possibly multi-arc) row index.
    ///
    /// ```
    /// use snmp_query::oid::Oid;
    ///
    /// let if_descr = Oid::parse("1.3.6.1.2.1.2.2.1.2").unwrap();
    /// let index = Oid::parse("7").unwrap();
    /// assert_eq!(if_descr.with_index(&index).to_string(), "1.3.6.1.2.1.2.2.1.2.7");
    /// ```
    pub fn with_index(&self, index: &Oid) -> Oid {
        let mut arcs = self.arcs.clone();
        arcs.extend_from_slice(&index.arcs);
        Oid { arcs }
    }

    /// The arcs following `base`, if `self` lies strictly below it.
    ///
    /// ```
    /// use snmp_query::oid::Oid;
    ///
    /// let column = Oid::parse("1.3.6.1.2.1.2.2.1.1").unwrap();
    /// let leaf = Oid::parse("1.3.6.1.2.1.2.2.1.1.12").unwrap();
    /// assert_eq!(leaf.index_after(&column).unwrap().to_string(), "12");
    ///
    /// // A sibling column sharing a textual prefix is not a descendant.
    /// let other = Oid::parse("1.3.6.1.2.1.2.2.1.10.12").unwrap();
    /// assert!(other.index_after(&column).is_none());
    ///
    /// assert!(column.index_after(&column).is_none());
    /// ```
    pub fn index_after(&self, base: &Oid) -> Option<Oid> {
        if self.arcs.len() > base.arcs.len() && self.starts_with(base) {
            Some(Oid::from_slice(&self.arcs[base.arcs.len()..]))
        } else {
            None
        }
    }
}

/// Append a row index to a dotted identifier.
///
/// An empty index leaves `base` unchanged, an index that already starts
/// with the separator is appended as-is, and anything else is joined with
/// a separator.
///
/// ```
/// use snmp_query::oid::compose;
///
/// assert_eq!(compose("1.3.6.1.2.1.1.5", ""), "1.3.6.1.2.1.1.5");
/// assert_eq!(compose("1.3.6.1.2.1.1.5", ".0"), "1.3.6.1.2.1.1.5.0");
/// assert_eq!(compose("1.3.6.1.2.1.2.2.1.2", "3"), "1.3.6.1.2.1.2.2.1.2.3");
/// ```
pub fn compose(base: &str, index: &str) -> String {
    if index.is_empty() {
        return base.to_string();
    }
    let mut out = String::with_capacity(base.len() + index.len() + 1);
    out.push_str(base);
    if !index.starts_with(SEPARATOR) {
        out.push(SEPARATOR);
    }
    out.push_str(index);
    out
}

/// Recover the row index of `full` relative to `base`.
///
/// Returns the text after `base` and its separator, or an empty string when
/// `full` does not continue `base` with a separator.
///
/// ```
/// use snmp_query::oid::decompose;
///
/// assert_eq!(decompose("1.3.6.1.2.1.1.5", "1.3.6.1.2.1.1.5.0"), "0");
/// assert_eq!(decompose("1.3.6.1.2.1.2.2.1.1", "1.3.6.1.2.1.2.2.1.10.4"), "");
/// assert_eq!(decompose("1.3.6.1", "1.3.6.1"), "");
/// ```
pub fn decompose<'a>(base: &str, full: &'a str) -> &'a str {
    full.strip_prefix(base)
        .and_then(|rest| rest.strip_prefix(SEPARATOR))
        .unwrap_or("")
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.arcs.cmp(&other.arcs)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Oid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Oid {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Oid::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Macro to create an OID at compile time.
///
/// # Examples
///
/// ```
/// use snmp_query::oid;
///
/// let sys_descr = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
/// assert_eq!(sys_descr.to_string(), "1.3.6.1.2.1.1.1.0");
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let oid = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1, 1, 1, 0]);
    }

    #[test]
    fn test_parse_leading_separator() {
        let oid = Oid::parse(".1.3.6.1").unwrap();
        assert_eq!(oid, oid!(1, 3, 6, 1));
        assert!(Oid::parse(".").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_empty_inner_arc() {
        assert!(Oid::parse("1..3").is_err());
        assert!(Oid::parse("1.3.").is_err());
    }

    #[test]
    fn test_display() {
        let oid = Oid::from_slice(&[1, 3, 6, 1, 2, 1, 1, 1, 0]);
        assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.1.0");
    }

    #[test]
    fn test_starts_with() {
        let oid = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
        let prefix = Oid::parse("1.3.6.1").unwrap();
        assert!(oid.starts_with(&prefix));
        assert!(!prefix.starts_with(&oid));
    }

    #[test]
    fn test_macro() {
        let oid = oid!(1, 3, 6, 1);
        assert_eq!(oid.arcs(), &[1, 3, 6, 1]);
    }

    #[test]
    fn test_ordering_is_numeric_per_arc() {
        assert!(oid!(1, 3, 9) < oid!(1, 3, 10));
        assert!(oid!(1, 3) < oid!(1, 3, 0));
    }

    #[test]
    fn compose_empty_index_is_identity() {
        assert_eq!(compose("1.3.6.1", ""), "1.3.6.1");
        assert_eq!(compose("", ""), "");
    }

    #[test]
    fn compose_inserts_separator_once() {
        assert_eq!(compose("1.3.6.1", "5"), "1.3.6.1.5");
        assert_eq!(compose("1.3.6.1", ".5"), "1.3.6.1.5");
        assert_eq!(compose("1.3.6.1", "5.6.7"), "1.3.6.1.5.6.7");
    }

    #[test]
    fn decompose_recovers_suffix() {
        assert_eq!(decompose("1.3.6.1", "1.3.6.1.5"), "5");
        assert_eq!(decompose("1.3.6.1", "1.3.6.1.5.6.7"), "5.6.7");
    }

    #[test]
    fn decompose_requires_separator_after_base() {
        assert_eq!(decompose("1.3.6.1", "1.3.6.10.5"), "");
        assert_eq!(decompose("1.3.6.1", "1.3.6.15"), "");
        assert_eq!(decompose("1.3.6.1", "2.3.6.1.5"), "");
    }

    #[test]
    fn with_index_and_index_after_agree() {
        let base = oid!(1, 3, 6, 1, 4, 1, 20858, 10, 22, 2, 1, 1);
        let index = oid!(1000073);
        let full = base.with_index(&index);
        assert_eq!(full.index_after(&base), Some(index));
    }
}
