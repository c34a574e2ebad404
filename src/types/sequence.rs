//! Sequence-set-related types.
//!
//! An IMAP `sequence-set` denotes a set of message sequence numbers or UIDs, written as
//! comma-separated numbers and `lo:hi` ranges, where `*` denotes the largest number in
//! use.
//!
//! [`SequenceSet`] stores the set as sorted, disjoint, non-adjacent closed intervals and
//! implements the full set algebra on top of that representation. The textual form given
//! by the caller is kept verbatim (including redundant or unordered entries) until the
//! set is mutated; from then on the canonical form is rendered.

use std::{
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
    num::NonZeroU32,
    ops::{BitAnd, BitOr, BitXor, Not, RangeFull, RangeInclusive, Sub},
    str::FromStr,
};

use crate::{
    error::{ValidationError, ValidationErrorKind},
    types::core::Vec1,
};

/// The `*` sentinel, one past the largest possible sequence number or UID.
///
/// Using a distinguished integer (rather than a sum type) keeps the interval arithmetic
/// to plain min/max comparisons; only parsing and rendering need a sentinel check.
pub(crate) const STAR: u64 = 1 << 32;

/// A message sequence number or UID, or the `*` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqOrUid {
    Value(NonZeroU32),
    Asterisk,
}

impl SeqOrUid {
    fn to_u64(self) -> u64 {
        match self {
            Self::Value(value) => u64::from(value.get()),
            Self::Asterisk => STAR,
        }
    }

    fn from_u64(value: u64) -> Self {
        debug_assert!((1..=STAR).contains(&value));

        if value == STAR {
            Self::Asterisk
        } else {
            // Safety: `unwrap` can't panic: `value` is in `1..=u32::MAX`.
            Self::Value(NonZeroU32::new(value as u32).unwrap())
        }
    }

    /// Replace `*` by the given largest number.
    pub fn expand(&self, largest: NonZeroU32) -> NonZeroU32 {
        match self {
            Self::Value(value) => *value,
            Self::Asterisk => largest,
        }
    }
}

impl From<NonZeroU32> for SeqOrUid {
    fn from(value: NonZeroU32) -> Self {
        Self::Value(value)
    }
}

impl TryFrom<u32> for SeqOrUid {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        NonZeroU32::new(value)
            .map(Self::Value)
            .ok_or_else(|| ValidationError::new(ValidationErrorKind::Invalid))
    }
}

impl FromStr for SeqOrUid {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "*" {
            Ok(SeqOrUid::Asterisk)
        } else {
            // This is to align parsing here with the IMAP grammar:
            // Rust's `parse::<NonZeroU32>` function accepts numbers that start with 0.
            // For example, 00001, is interpreted as 1. But this is not allowed in IMAP.
            if value.starts_with('0') {
                Err(ValidationError::new(ValidationErrorKind::Invalid))
            } else {
                Ok(SeqOrUid::Value(NonZeroU32::from_str(value).map_err(
                    |_| ValidationError::new(ValidationErrorKind::Invalid),
                )?))
            }
        }
    }
}

impl Display for SeqOrUid {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{}", value),
            Self::Asterisk => f.write_str("*"),
        }
    }
}

/// A single entry of a `sequence-set`: a number or a `lo:hi` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sequence {
    Single(SeqOrUid),
    Range(SeqOrUid, SeqOrUid),
}

impl Sequence {
    /// The entry as a `(lo, hi)` interval with `lo <= hi`.
    ///
    /// The two endpoints of a range are reordered; `2:4` and `4:2` are equivalent.
    fn to_interval(self) -> (u64, u64) {
        match self {
            Self::Single(value) => {
                let value = value.to_u64();
                (value, value)
            }
            Self::Range(a, b) => {
                let (a, b) = (a.to_u64(), b.to_u64());
                (a.min(b), a.max(b))
            }
        }
    }
}

impl From<SeqOrUid> for Sequence {
    fn from(value: SeqOrUid) -> Self {
        Self::Single(value)
    }
}

impl From<NonZeroU32> for Sequence {
    fn from(value: NonZeroU32) -> Self {
        Self::Single(SeqOrUid::from(value))
    }
}

impl FromStr for Sequence {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.split(':').count() {
            1 => Ok(Sequence::Single(SeqOrUid::from_str(value)?)),
            2 => {
                let mut split = value.split(':');

                // Safety: `unwrap` can't panic: the split has exactly two items.
                let start = split.next().unwrap();
                let end = split.next().unwrap();

                Ok(Sequence::Range(
                    SeqOrUid::from_str(start)?,
                    SeqOrUid::from_str(end)?,
                ))
            }
            _ => Err(ValidationError::new(ValidationErrorKind::Invalid)),
        }
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Single(value) => write!(f, "{}", value),
            Self::Range(from, to) => write!(f, "{}:{}", from, to),
        }
    }
}

/// A set of message sequence numbers or UIDs.
///
/// The set is kept as sorted, pairwise disjoint and non-adjacent intervals over
/// `1..=2^32` where `2^32` stands in for `*`. All mutators re-establish this shape, so
/// membership and the set operations stay logarithmic/linear regardless of how the set
/// was written on the wire.
///
/// Equality compares set content; `SequenceSet::try_from("1:2")` equals
/// `SequenceSet::try_from("2,1")`.
#[derive(Debug, Clone, Default)]
pub struct SequenceSet {
    /// Invariants: `1 <= lo <= hi <= STAR` and `intervals[i].1 + 1 < intervals[i + 1].0`.
    intervals: Vec<(u64, u64)>,
    /// The textual form exactly as given by the caller. Cleared on mutation; the
    /// canonical form is then rendered from `intervals`.
    string: Option<String>,
}

impl PartialEq for SequenceSet {
    fn eq(&self, other: &Self) -> bool {
        self.intervals == other.intervals
    }
}

impl Eq for SequenceSet {}

impl Hash for SequenceSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.intervals.hash(state);
    }
}

impl SequenceSet {
    /// The empty set.
    ///
    /// Note that the empty set has no valid wire form: [`SequenceSet::atom`] fails on it
    /// and `to_string` renders it as `""`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full set, `1:*`.
    pub fn full() -> Self {
        Self {
            intervals: vec![(1, STAR)],
            string: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The `sequence-set` wire form.
    ///
    /// This is the exact string the set was created from when it has not been mutated
    /// since; otherwise the canonical sorted form. Fails for the empty set, which cannot
    /// be represented on the wire.
    pub fn atom(&self) -> Result<String, ValidationError> {
        if self.intervals.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::Empty));
        }

        match &self.string {
            Some(string) => Ok(string.clone()),
            None => Ok(self.render()),
        }
    }

    /// A copy whose textual form is the canonical one: sorted, deduplicated, with
    /// adjacent and overlapping entries coalesced.
    pub fn normalize(&self) -> Self {
        Self {
            intervals: self.intervals.clone(),
            string: None,
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();

        for (i, (lo, hi)) in self.intervals.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }

            if lo == hi {
                out.push_str(&SeqOrUid::from_u64(*lo).to_string());
            } else {
                out.push_str(&format!(
                    "{}:{}",
                    SeqOrUid::from_u64(*lo),
                    SeqOrUid::from_u64(*hi)
                ));
            }
        }

        out
    }

    // ----- membership -----

    /// Whether the given number (or `*`) is in the set.
    pub fn contains<V: Into<SeqOrUid>>(&self, value: V) -> bool {
        self.contains_u64(value.into().to_u64())
    }

    fn contains_u64(&self, value: u64) -> bool {
        let idx = self.intervals.partition_point(|iv| iv.1 < value);

        match self.intervals.get(idx) {
            Some((lo, _)) => *lo <= value,
            None => false,
        }
    }

    /// Whether every element of `other` is in the set.
    pub fn covers_set(&self, other: &SequenceSet) -> bool {
        other.intervals.iter().all(|(lo, hi)| {
            let idx = self.intervals.partition_point(|iv| iv.1 < *lo);

            match self.intervals.get(idx) {
                Some((self_lo, self_hi)) => self_lo <= lo && hi <= self_hi,
                None => false,
            }
        })
    }

    /// Whether everything the argument denotes is in the set.
    ///
    /// Returns `None` when the argument cannot be converted to a sequence set. Use
    /// [`SequenceSet::covers_set`] when the conversion error matters.
    pub fn covers<T: TryInto<SequenceSet>>(&self, other: T) -> Option<bool> {
        match other.try_into() {
            Ok(other) => Some(self.covers_set(&other)),
            Err(_) => None,
        }
    }

    /// The smallest entry; `*` counts as larger than any number.
    pub fn min(&self) -> Option<SeqOrUid> {
        self.intervals.first().map(|(lo, _)| SeqOrUid::from_u64(*lo))
    }

    /// The largest entry; `*` counts as larger than any number.
    pub fn max(&self) -> Option<SeqOrUid> {
        self.intervals.last().map(|(_, hi)| SeqOrUid::from_u64(*hi))
    }

    pub fn minmax(&self) -> Option<(SeqOrUid, SeqOrUid)> {
        Some((self.min()?, self.max()?))
    }

    /// The number of elements in the set.
    ///
    /// Ranges ending in `*` count through `2^32 - 1`. When both `*` and `2^32 - 1` are
    /// present they may denote the same message, so one is subtracted.
    pub fn count(&self) -> u64 {
        let total: u64 = self.intervals.iter().map(|(lo, hi)| hi - lo + 1).sum();

        if self.contains_u64(STAR) && self.contains_u64(STAR - 1) {
            total - 1
        } else {
            total
        }
    }

    // ----- views -----

    /// The entries of the (normalized) set.
    pub fn elements(&self) -> Vec<Sequence> {
        self.intervals
            .iter()
            .map(|(lo, hi)| {
                if lo == hi {
                    Sequence::Single(SeqOrUid::from_u64(*lo))
                } else {
                    Sequence::Range(SeqOrUid::from_u64(*lo), SeqOrUid::from_u64(*hi))
                }
            })
            .collect()
    }

    /// The entries of the (normalized) set, each as a `(lo, hi)` pair.
    pub fn ranges(&self) -> Vec<(SeqOrUid, SeqOrUid)> {
        self.intervals
            .iter()
            .map(|(lo, hi)| (SeqOrUid::from_u64(*lo), SeqOrUid::from_u64(*hi)))
            .collect()
    }

    /// All numbers of the set, in order.
    ///
    /// Fails when the set touches `*`: the expansion would not denote concrete
    /// messages (and a range up to `*` covers the whole u32 space).
    pub fn numbers(&self) -> Result<Vec<u32>, ValidationError> {
        if self.contains_u64(STAR) {
            return Err(ValidationError::new(ValidationErrorKind::OutOfRange));
        }

        let mut out = Vec::new();

        for (lo, hi) in &self.intervals {
            for value in *lo..=*hi {
                out.push(value as u32);
            }
        }

        Ok(out)
    }

    // ----- mutation -----

    /// Add a single entry to the set. Returns `false` if the set already covered it.
    pub fn insert<S: Into<Sequence>>(&mut self, value: S) -> bool {
        let (a, b) = value.into().to_interval();

        let idx = self.intervals.partition_point(|iv| iv.1 < a);
        let covered = match self.intervals.get(idx) {
            Some((lo, hi)) => *lo <= a && b <= *hi,
            None => false,
        };

        if covered {
            return false;
        }

        self.insert_interval((a, b));
        true
    }

    /// Add every element of `other` to the set.
    pub fn extend_from(&mut self, other: &SequenceSet) {
        for interval in other.intervals.clone() {
            self.insert_interval(interval);
        }
    }

    /// Add everything the argument denotes to the set.
    pub fn merge<T: TryInto<SequenceSet>>(&mut self, other: T) -> Result<(), T::Error> {
        let other = other.try_into()?;
        self.extend_from(&other);

        Ok(())
    }

    /// Remove every element of `other` from the set.
    pub fn subtract(&mut self, other: &SequenceSet) {
        for interval in other.intervals.clone() {
            self.subtract_interval(interval);
        }
    }

    pub fn union(&self, other: &SequenceSet) -> SequenceSet {
        let mut result = self.normalize();
        result.extend_from(other);

        result
    }

    pub fn difference(&self, other: &SequenceSet) -> SequenceSet {
        let mut result = self.normalize();
        result.subtract(other);

        result
    }

    /// The intersection, computed as `self - !other`.
    pub fn intersection(&self, other: &SequenceSet) -> SequenceSet {
        self.difference(&other.complement())
    }

    pub fn symmetric_difference(&self, other: &SequenceSet) -> SequenceSet {
        self.union(other).difference(&self.intersection(other))
    }

    /// The set-theoretic complement within `1:*`.
    pub fn complement(&self) -> SequenceSet {
        if self.intervals.is_empty() {
            return Self::full();
        }

        let mut intervals = Vec::with_capacity(self.intervals.len() + 1);

        // Flip the stored endpoints: each gap between intervals (plus the space below the
        // first and above the last) becomes an interval.
        if self.intervals[0].0 > 1 {
            intervals.push((1, self.intervals[0].0 - 1));
        }

        for window in self.intervals.windows(2) {
            intervals.push((window[0].1 + 1, window[1].0 - 1));
        }

        if let Some((_, hi)) = self.intervals.last() {
            if *hi < STAR {
                intervals.push((hi + 1, STAR));
            }
        }

        Self {
            intervals,
            string: None,
        }
    }

    /// The set with `*` replaced by `max`, entries above `max` dropped, and ranges
    /// straddling `max` truncated to it. Returns `None` when nothing remains.
    pub fn limit(&self, max: NonZeroU32) -> Option<SequenceSet> {
        let max = u64::from(max.get());
        let mut result = SequenceSet::new();

        for (lo, hi) in &self.intervals {
            let lo = if *lo == STAR { max } else { *lo };

            if lo > max {
                continue;
            }

            result.insert_interval((lo, (*hi).min(max)));
        }

        if result.is_empty() {
            None
        } else {
            Some(result)
        }
    }

    /// Insert a closed interval, merging with overlapping or adjacent neighbors.
    fn insert_interval(&mut self, (a, b): (u64, u64)) {
        debug_assert!(1 <= a && a <= b && b <= STAR);

        self.string = None;

        // First stored interval that ends at (or after) `a - 1`, i.e. that `[a, b]`
        // can touch.
        let lower_idx = self.intervals.partition_point(|iv| iv.1 + 1 < a);

        let Some(&(lower_lo, lower_hi)) = self.intervals.get(lower_idx) else {
            self.intervals.push((a, b));
            return;
        };

        if b + 1 < lower_lo {
            self.intervals.insert(lower_idx, (a, b));
            return;
        }

        self.intervals[lower_idx].0 = lower_lo.min(a);

        if lower_hi >= b {
            return;
        }

        // `[a, b]` extends past `lower`: swallow everything up to the first interval
        // that ends at (or after) `b + 1`.
        let upper_idx = self.intervals.partition_point(|iv| iv.1 < b + 1);

        match self.intervals.get(upper_idx).copied() {
            None => {
                self.intervals[lower_idx].1 = b;
                self.intervals.truncate(lower_idx + 1);
            }
            Some((upper_lo, _)) if b + 1 < upper_lo => {
                self.intervals[lower_idx].1 = b;
                self.intervals.drain(lower_idx + 1..upper_idx);
            }
            Some((_, upper_hi)) => {
                self.intervals[lower_idx].1 = upper_hi;
                self.intervals.drain(lower_idx + 1..=upper_idx);
            }
        }
    }

    /// Remove a closed interval, splitting or trimming neighbors as needed.
    fn subtract_interval(&mut self, (a, b): (u64, u64)) {
        debug_assert!(1 <= a && a <= b && b <= STAR);

        self.string = None;

        // First stored interval that ends at (or after) `a`.
        let mut lower_idx = self.intervals.partition_point(|iv| iv.1 < a);

        let Some(&(lower_lo, lower_hi)) = self.intervals.get(lower_idx) else {
            return;
        };

        if b < lower_lo {
            return;
        }

        if b < lower_hi {
            // `[a, b]` ends inside `lower`: keep the part above it, and (if any) the
            // part below it.
            self.intervals[lower_idx].0 = b + 1;

            if lower_lo < a {
                self.intervals.insert(lower_idx, (lower_lo, a - 1));
            }

            return;
        }

        if lower_lo < a {
            self.intervals[lower_idx].1 = a - 1;
            lower_idx += 1;
        }

        // Everything from `lower_idx` up to the first interval ending past `b` is
        // swallowed; that interval itself may need its low end trimmed.
        let upper_idx = self.intervals.partition_point(|iv| iv.1 < b + 1);

        if let Some(upper) = self.intervals.get_mut(upper_idx) {
            if upper.0 <= b {
                upper.0 = b + 1;
            }
        }

        self.intervals.drain(lower_idx..upper_idx);
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        for (lo, hi) in &self.intervals {
            assert!(1 <= *lo && lo <= hi && *hi <= STAR);
        }

        for window in self.intervals.windows(2) {
            assert!(window[0].1 + 1 < window[1].0);
        }
    }
}

impl Display for SequenceSet {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match &self.string {
            Some(string) => f.write_str(string),
            None => f.write_str(&self.render()),
        }
    }
}

impl FromStr for SequenceSet {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::Empty));
        }

        let mut set = SequenceSet::new();

        for entry in value.split(',') {
            set.insert_interval(Sequence::from_str(entry)?.to_interval());
        }

        set.string = Some(value.to_owned());

        Ok(set)
    }
}

impl TryFrom<&str> for SequenceSet {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for SequenceSet {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Sequence> for SequenceSet {
    fn from(value: Sequence) -> Self {
        let mut set = Self::new();
        set.insert_interval(value.to_interval());

        set
    }
}

impl From<SeqOrUid> for SequenceSet {
    fn from(value: SeqOrUid) -> Self {
        Self::from(Sequence::Single(value))
    }
}

impl From<NonZeroU32> for SequenceSet {
    fn from(value: NonZeroU32) -> Self {
        Self::from(SeqOrUid::Value(value))
    }
}

impl TryFrom<u32> for SequenceSet {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(Self::from(SeqOrUid::try_from(value)?))
    }
}

impl From<RangeFull> for SequenceSet {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

impl From<RangeInclusive<NonZeroU32>> for SequenceSet {
    fn from(range: RangeInclusive<NonZeroU32>) -> Self {
        Self::from(Sequence::Range(
            SeqOrUid::Value(*range.start()),
            SeqOrUid::Value(*range.end()),
        ))
    }
}

impl TryFrom<RangeInclusive<u32>> for SequenceSet {
    type Error = ValidationError;

    fn try_from(range: RangeInclusive<u32>) -> Result<Self, Self::Error> {
        Ok(Self::from(Sequence::Range(
            SeqOrUid::try_from(*range.start())?,
            SeqOrUid::try_from(*range.end())?,
        )))
    }
}

impl TryFrom<&[u32]> for SequenceSet {
    type Error = ValidationError;

    fn try_from(values: &[u32]) -> Result<Self, Self::Error> {
        if values.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::Empty));
        }

        let mut set = Self::new();

        for value in values {
            set.insert(SeqOrUid::try_from(*value)?);
        }

        Ok(set)
    }
}

impl FromIterator<NonZeroU32> for SequenceSet {
    fn from_iter<I: IntoIterator<Item = NonZeroU32>>(iter: I) -> Self {
        let mut set = Self::new();

        for value in iter {
            set.insert(SeqOrUid::Value(value));
        }

        set
    }
}

impl BitOr for &SequenceSet {
    type Output = SequenceSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl Sub for &SequenceSet {
    type Output = SequenceSet;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

impl BitAnd for &SequenceSet {
    type Output = SequenceSet;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl BitXor for &SequenceSet {
    type Output = SequenceSet;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.symmetric_difference(rhs)
    }
}

impl Not for &SequenceSet {
    type Output = SequenceSet;

    fn not(self) -> Self::Output {
        self.complement()
    }
}

// -------------------------------------------------------------------------------------------------

/// A `uid-set` as used by `APPENDUID`/`COPYUID` (RFC 4315).
///
/// Unlike [`SequenceSet`], a `uid-set` never contains `*` and keeps the entries the
/// server sent (only reordering each range to `min:max`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UidSet(pub Vec1<UidElement>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UidElement {
    Single(NonZeroU32),
    Range(NonZeroU32, NonZeroU32),
}

impl UidElement {
    /// A range with its endpoints in `min:max` order.
    pub fn range(a: NonZeroU32, b: NonZeroU32) -> Self {
        Self::Range(a.min(b), a.max(b))
    }
}

impl From<NonZeroU32> for UidSet {
    fn from(value: NonZeroU32) -> Self {
        Self(Vec1::from(UidElement::Single(value)))
    }
}

impl Display for UidElement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Single(uid) => write!(f, "{}", uid),
            Self::Range(start, end) => write!(f, "{}:{}", start, end),
        }
    }
}

impl Display for UidSet {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for (i, element) in self.0.as_ref().iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }

            write!(f, "{}", element)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(s: &str) -> SequenceSet {
        SequenceSet::try_from(s).unwrap()
    }

    #[test]
    fn test_creation_of_sequence_set_from_str_positive() {
        let tests = [
            ("1", vec![(1, 1)]),
            ("1,2,3", vec![(1, 1), (2, 2), (3, 3)]),
            ("*", vec![(STAR, STAR)]),
            ("1:2", vec![(1, 2)]),
            ("1:2,4", vec![(1, 2), (4, 4)]),
            ("10:3", vec![(3, 10)]),
            ("1:2,3,*", vec![(1, 3), (STAR, STAR)]),
            ("4294967295", vec![(u64::from(u32::MAX), u64::from(u32::MAX))]),
        ];

        for (test, expected) in tests {
            let got = set(test);
            got.check_invariants();
            assert_eq!(expected, got.intervals, "{test}");
        }
    }

    #[test]
    fn test_creation_of_sequence_set_from_str_negative() {
        let tests = [
            "", "0", "0:2", "* ", " *", " * ", "1 ", " 1", " 1 ", "01", " 01", "01 ", "*1", ":",
            ":*", "*:", "*: ", "1:2:3", "1,,2", "4294967296", "-1", "a",
        ];

        for test in tests {
            let got = SequenceSet::try_from(test);
            assert!(got.is_err(), "{test:?} parsed to {got:?}");
        }
    }

    #[test]
    fn test_atom_keeps_the_original_string_until_mutation() {
        let mut set = set("10:3,10,7");
        assert_eq!(set.atom().unwrap(), "10:3,10,7");
        assert_eq!(set.to_string(), "10:3,10,7");

        // An insert that changes nothing keeps the original form.
        assert!(!set.insert(SeqOrUid::try_from(5).unwrap()));
        assert_eq!(set.atom().unwrap(), "10:3,10,7");

        assert!(set.insert(SeqOrUid::try_from(1).unwrap()));
        assert_eq!(set.atom().unwrap(), "1,3:10");
    }

    #[test]
    fn test_atom_fails_on_the_empty_set() {
        assert!(SequenceSet::new().atom().is_err());
        assert_eq!(SequenceSet::new().to_string(), "");
    }

    #[test]
    fn test_normalize() {
        let set = set("3:1,5:9,9,2");
        assert_eq!(set.normalize().to_string(), "1:3,5:9");
        assert_eq!(set.normalize().normalize(), set.normalize());
        assert_eq!(set.normalize().to_string(), set.normalize().normalize().to_string());
    }

    #[test]
    fn test_round_trip() {
        for canonical in ["1", "1:3", "1:3,5,7:9", "2,4:7,9,12:*", "*"] {
            assert_eq!(set(canonical).atom().unwrap(), canonical);
            assert_eq!(set(&set(canonical).atom().unwrap()), set(canonical));
        }
    }

    #[test]
    fn test_insert() {
        let tests = [
            ("1,3,5,7:8", "2", "1:3,5,7:8"),
            ("1,3,5,7:8", "9", "1,3,5,7:9"),
            ("1,3,5,7:8", "100", "1,3,5,7:8,100"),
            ("5:10", "1:4", "1:10"),
            ("5:10", "1:5", "1:10"),
            ("5:10", "12:20", "5:10,12:20"),
            ("1,3,5,7,9,11", "2:10", "1:11"),
            ("1,3,5,7,9,11", "4:8", "1,3:9,11"),
        ];

        for (init, add, expected) in tests {
            let mut got = set(init);
            got.merge(add).unwrap();
            got.check_invariants();
            assert_eq!(got, set(expected), "{init} + {add}");
        }
    }

    #[test]
    fn test_subtract() {
        let tests = [
            ("1,5:9,11:99", "6:999", "1,5"),
            ("1:10", "5", "1:4,6:10"),
            ("1:10", "1", "2:10"),
            ("1:10", "10", "1:9"),
            ("1:10", "1:10", ""),
            ("1:10", "11:20", "1:10"),
            ("1,3,5,7", "2:6", "1,7"),
            ("1:5,8:10,13:20", "4:14", "1:3,15:20"),
        ];

        for (init, remove, expected) in tests {
            let mut got = set(init);
            got.subtract(&set(remove));
            got.check_invariants();

            if expected.is_empty() {
                assert!(got.is_empty(), "{init} - {remove}");
            } else {
                assert_eq!(got, set(expected), "{init} - {remove}");
            }
        }
    }

    #[test]
    fn test_union_example() {
        assert_eq!(&set("1,3,5,7:8") | &set("2,8:9"), set("1:3,5,7:9"));
    }

    #[test]
    fn test_limit() {
        let max = NonZeroU32::new(15).unwrap();
        assert_eq!(
            set("2,4:7,9,12:*").limit(max).unwrap(),
            set("2,4,5,6,7,9,12,13,14,15")
        );

        assert_eq!(set("500:999").limit(NonZeroU32::new(37).unwrap()), None);

        // Replacing `*` can make intervals adjacent; they must coalesce.
        let got = set("15,*").limit(NonZeroU32::new(16).unwrap()).unwrap();
        got.check_invariants();
        assert_eq!(got, set("15:16"));
    }

    #[test]
    fn test_complement() {
        assert_eq!(SequenceSet::new().complement(), SequenceSet::full());
        assert_eq!(SequenceSet::full().complement(), SequenceSet::new());

        let x = set("5:10,20:30");
        let complement = x.complement();
        complement.check_invariants();
        assert_eq!(complement.to_string(), "1:4,11:19,31:*");

        // Involution.
        for raw in ["1", "1:10", "5:10,20:30", "1:*", "*"] {
            let x = set(raw);
            assert_eq!(x.complement().complement(), x, "{raw}");
        }
    }

    #[test]
    fn test_union_complement_identity() {
        for raw in ["1", "2:9", "5:10,20:30", "*"] {
            let x = set(raw);
            assert_eq!(x.union(&x.complement()), SequenceSet::full(), "{raw}");
        }
    }

    #[test]
    fn test_algebra_laws() {
        let x = set("1:10,30:40");
        let y = set("5:35");
        let z = set("2,36:50");

        // Commutativity.
        assert_eq!(&x | &y, &y | &x);
        assert_eq!(&x & &y, &y & &x);

        // Associativity.
        assert_eq!(&(&x | &y) | &z, &x | &(&y | &z));
        assert_eq!(&(&x & &y) & &z, &x & &(&y & &z));

        // De Morgan.
        assert_eq!(!&(&x | &y), &!&x & &!&y);
        assert_eq!(!&(&x & &y), &!&x | &!&y);

        // Xor via union and intersection.
        assert_eq!(&x ^ &y, &(&x | &y) - &(&x & &y));
    }

    #[test]
    fn test_intersection() {
        assert_eq!(&set("1:10") & &set("5:15"), set("5:10"));
        assert_eq!(&set("1:10") & &set("11:15"), SequenceSet::new());
        assert_eq!(&set("1:*") & &set("7"), set("7"));
    }

    #[test]
    fn test_contains_and_covers_are_consistent() {
        let x = set("2,4:7,9,12:*");

        for n in 1u32..20 {
            let n = NonZeroU32::new(n).unwrap();
            assert_eq!(x.contains(n), x.covers(n.get()).unwrap(), "{n}");
        }

        assert!(x.contains(SeqOrUid::Asterisk));
        assert_eq!(x.covers("4:6"), Some(true));
        assert_eq!(x.covers("4:8"), Some(false));
        assert_eq!(x.covers("not a set"), None);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(SequenceSet::new().minmax(), None);

        let x = set("12:*,2,9,4:7");
        assert_eq!(x.min(), Some(SeqOrUid::try_from(2).unwrap()));
        assert_eq!(x.max(), Some(SeqOrUid::Asterisk));
    }

    #[test]
    fn test_count() {
        assert_eq!(SequenceSet::new().count(), 0);
        assert_eq!(set("1").count(), 1);
        assert_eq!(set("1:10").count(), 10);
        assert_eq!(set("1:10,21:30").count(), 20);

        // `*` alone is one element.
        assert_eq!(set("*").count(), 1);

        // `*` may be the same message as 2^32-1; count only one of them.
        assert_eq!(set("4294967295,*").count(), 1);
        assert_eq!(set("4294967290:*").count(), 6);
        assert_eq!(set("1:3,4294967295:*").count(), 4);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(set("1,3:5").numbers().unwrap(), vec![1, 3, 4, 5]);
        assert!(set("1,3:*").numbers().is_err());
        assert!(set("*").numbers().is_err());
    }

    #[test]
    fn test_views() {
        let x = set("9:7,1");
        assert_eq!(
            x.elements(),
            vec![
                Sequence::Single(SeqOrUid::try_from(1).unwrap()),
                Sequence::Range(
                    SeqOrUid::try_from(7).unwrap(),
                    SeqOrUid::try_from(9).unwrap()
                ),
            ]
        );
        assert_eq!(
            x.ranges(),
            vec![
                (SeqOrUid::try_from(1).unwrap(), SeqOrUid::try_from(1).unwrap()),
                (SeqOrUid::try_from(7).unwrap(), SeqOrUid::try_from(9).unwrap()),
            ]
        );
    }

    #[test]
    fn test_equality_ignores_the_textual_form() {
        assert_eq!(set("1:2"), set("2,1"));
        assert_eq!(set("10:3,10"), set("3:10"));
        assert_ne!(set("1:2"), set("1:3"));
    }

    #[test]
    fn test_creation_from_numbers() {
        assert_eq!(SequenceSet::try_from(1u32).unwrap(), set("1"));
        assert!(SequenceSet::try_from(0u32).is_err());

        assert_eq!(
            SequenceSet::try_from([4u32, 2, 3, 1].as_ref()).unwrap(),
            set("1:4")
        );
        assert!(SequenceSet::try_from(&[] as &[u32]).is_err());
        assert!(SequenceSet::try_from([1u32, 0].as_ref()).is_err());

        assert_eq!(SequenceSet::try_from(2u32..=4).unwrap(), set("2:4"));
        assert_eq!(SequenceSet::from(..), SequenceSet::full());
    }

    #[test]
    fn test_uid_set_display() {
        use crate::types::core::Vec1;

        let set = UidSet(
            Vec1::try_from(vec![
                UidElement::range(
                    NonZeroU32::new(1005).unwrap(),
                    NonZeroU32::new(1001).unwrap(),
                ),
                UidElement::Single(NonZeroU32::new(1).unwrap()),
            ])
            .unwrap(),
        );

        assert_eq!(set.to_string(), "1001:1005,1");
    }
}
