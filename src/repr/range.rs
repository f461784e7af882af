//! Integer ranges and index selections.
//!
//! A [`Range`] is an immutable, re-iterable set of integers. A [`Selection`] is a union of ranges
//! parsed from operator input such as `"1 3-5"`.

prelude! {
    regex::Regex,
}

use std::sync::OnceLock;

/// A contiguous set of integers.
///
/// Use [`Range::of`] rather than the variants directly, it picks the right variant.
///
/// # Invariants
///
/// - `Forward { start, end }`: `start ≤ end`, contains `[start, end)` in ascending order;
/// - `Backward { start, end }`: `end ≤ start`, contains `(end, start]` in descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Range {
    Empty,
    Singleton(i32),
    Forward { start: i32, end: i32 },
    Backward { start: i32, end: i32 },
}

impl Display for Range {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Empty => "()".fmt(fmt),
            Self::Singleton(v) => write!(fmt, "[{v},{v}]"),
            Self::Forward { start, end } => write!(fmt, "[{start},{end})"),
            Self::Backward { start, end } => write!(fmt, "({end},{start}]"),
        }
    }
}

impl Range {
    /// Range going from `start` to `end`, `end` excluded.
    ///
    /// ```rust
    /// # udms::prelude! {}
    /// assert_eq!(Range::of(3, 3), Range::Empty);
    /// assert_eq!(Range::of(3, 4), Range::Singleton(3));
    /// assert_eq!(Range::of(4, 3), Range::Singleton(4));
    /// assert_eq!(Range::of(5, 7).iter().collect::<Vec<_>>(), vec![5, 6]);
    /// assert_eq!(Range::of(7, 5).iter().collect::<Vec<_>>(), vec![7, 6]);
    /// ```
    pub fn of(start: i32, end: i32) -> Self {
        if start == end {
            Self::Empty
        } else if start.abs_diff(end) == 1 {
            Self::Singleton(start)
        } else if start < end {
            Self::Forward { start, end }
        } else {
            Self::Backward { start, end }
        }
    }
    pub fn of_value(value: i32) -> Self {
        Self::Singleton(value)
    }
    pub fn empty() -> Self {
        Self::Empty
    }

    /// Ascending range, fails if `start > end`.
    pub fn forward(start: i32, end: i32) -> Res<Self> {
        if start > end {
            bail!(@invalid("forward range bounds") format!("{start}, {end}"))
        }
        Ok(Self::Forward { start, end })
    }
    /// Descending range, fails if `start < end`.
    pub fn backward(start: i32, end: i32) -> Res<Self> {
        if start < end {
            bail!(@invalid("backward range bounds") format!("{start}, {end}"))
        }
        Ok(Self::Backward { start, end })
    }

    pub fn contains(&self, x: i32) -> bool {
        match *self {
            Self::Empty => false,
            Self::Singleton(v) => x == v,
            Self::Forward { start, end } => start <= x && x < end,
            Self::Backward { start, end } => end < x && x <= start,
        }
    }

    pub fn len(&self) -> usize {
        match *self {
            Self::Empty => 0,
            Self::Singleton(_) => 1,
            Self::Forward { start, end } | Self::Backward { start, end } => {
                start.abs_diff(end) as usize
            }
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the range in its natural order.
    pub fn iter(&self) -> Iter {
        let (next, last, step) = match *self {
            Self::Empty => (0, 0, 0),
            Self::Singleton(v) => (v as i64, v as i64 + 1, 1),
            Self::Forward { start, end } => (start as i64, end as i64, 1),
            Self::Backward { start, end } => (start as i64, end as i64, -1),
        };
        Iter { next, last, step }
    }
}

/// Iterator over the values of a [`Range`].
///
/// Bounds are widened to `i64` so that ranges touching `i32::MAX` or `i32::MIN` terminate.
#[derive(Debug, Clone)]
pub struct Iter {
    next: i64,
    last: i64,
    step: i64,
}
impl Iterator for Iter {
    type Item = i32;
    fn next(&mut self) -> Option<i32> {
        if self.next == self.last {
            return None;
        }
        let res = self.next as i32;
        self.next += self.step;
        Some(res)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.next.abs_diff(self.last) as usize;
        (len, Some(len))
    }
}
impl ExactSizeIterator for Iter {}
impl std::iter::FusedIterator for Iter {}

impl IntoIterator for Range {
    type Item = i32;
    type IntoIter = Iter;
    fn into_iter(self) -> Iter {
        self.iter()
    }
}
impl<'a> IntoIterator for &'a Range {
    type Item = i32;
    type IntoIter = Iter;
    fn into_iter(self) -> Iter {
        self.iter()
    }
}

/// A union of ranges.
///
/// Parsed from whitespace-separated tokens of the form `N` or `A-B` where `N`, `A` and `B` are
/// unsigned integers. Tokens denote **inclusive** bounds, `A-B` and `B-A` select the same
/// indices, only the iteration order differs.
///
/// ```rust
/// # udms::prelude! {}
/// let sel = Selection::parse("1 4-6").expect("legal selection");
/// let picked: Vec<i32> = (1..=7).filter(|i| sel.contains(*i)).collect();
/// assert_eq!(picked, vec![1, 4, 5, 6]);
/// assert!(Selection::parse("4-").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ranges: SmallVec<[Range; 4]>,
}

impl Selection {
    fn token_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r#"^(\d+)(?:-(\d+))?$"#).expect("[fatal] illegal selection token regex")
        })
    }

    /// Parses a single selection token.
    pub fn parse_token(token: &str) -> Res<Range> {
        let illegal = || error!("invalid range '{}'", token);
        let caps = Self::token_regex().captures(token).ok_or_else(illegal)?;
        let bound = |idx: usize| -> Res<Option<i32>> {
            caps.get(idx)
                .map(|m| m.as_str().parse::<i32>().map_err(|_| illegal()))
                .transpose()
        };
        let start = bound(1)?.ok_or_else(illegal)?;
        let range = match bound(2)? {
            None => Range::of_value(start),
            Some(end) if start <= end => Range::of(start, end.checked_add(1).ok_or_else(illegal)?),
            Some(end) => Range::of(start, end - 1),
        };
        Ok(range)
    }

    pub fn parse(text: impl AsRef<str>) -> Res<Self> {
        let mut ranges = smallvec![];
        for token in text.as_ref().split_whitespace() {
            ranges.push(Self::parse_token(token)?);
        }
        if ranges.is_empty() {
            bail!("expected at least one index or index range")
        }
        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn contains(&self, x: i32) -> bool {
        self.ranges.iter().any(|range| range.contains(x))
    }
}

impl Display for Selection {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        self.ranges.iter().show_iter(|r| r.to_string(), " ").fmt(fmt)
    }
}
