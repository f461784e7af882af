//! A value holding exactly one of two alternatives.
//!
//! Unlike [`Result`], neither alternative is an error. Addresses use `Either<u32, String>` so that
//! "Apartment 12" and "Apartment 4B" can coexist, see [`repr::Label`].

prelude!();

/// Either a *first* value of type `F` or a *second* value of type `S`.
///
/// Equality and hashing are structural: two values are equal iff they hold the same alternative
/// and equal values.
///
/// ```rust
/// # udms::prelude! {}
/// let five: Either<i32, i32> = Either::new_first(5);
/// assert_eq!(five, Either::First(5));
/// assert_ne!(five, Either::Second(5));
/// assert_eq!(*five.first().expect("holds a first value"), 5);
/// assert!(five.second().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Either<F, S> {
    First(F),
    Second(S),
}

/// ## Constructors and queries
impl<F, S> Either<F, S> {
    pub fn new_first(first: F) -> Self {
        Self::First(first)
    }
    pub fn new_second(second: S) -> Self {
        Self::Second(second)
    }

    pub fn is_first(&self) -> bool {
        matches!(self, Self::First(_))
    }
    pub fn is_second(&self) -> bool {
        matches!(self, Self::Second(_))
    }

    pub fn as_ref(&self) -> Either<&F, &S> {
        match self {
            Self::First(f) => Either::First(f),
            Self::Second(s) => Either::Second(s),
        }
    }
}

/// ## Accessors
///
/// Strict accessors fail with an absent-alternative error when the other alternative is held.
impl<F, S> Either<F, S> {
    pub fn first(&self) -> Res<&F> {
        match self {
            Self::First(f) => Ok(f),
            Self::Second(_) => bail!(@absent("first value")),
        }
    }
    pub fn second(&self) -> Res<&S> {
        match self {
            Self::First(_) => bail!(@absent("second value")),
            Self::Second(s) => Ok(s),
        }
    }
    pub fn into_first(self) -> Res<F> {
        match self {
            Self::First(f) => Ok(f),
            Self::Second(_) => bail!(@absent("first value")),
        }
    }
    pub fn into_second(self) -> Res<S> {
        match self {
            Self::First(_) => bail!(@absent("second value")),
            Self::Second(s) => Ok(s),
        }
    }

    pub fn first_or(self, other: F) -> F {
        match self {
            Self::First(f) => f,
            Self::Second(_) => other,
        }
    }
    pub fn first_or_else(self, other: impl FnOnce() -> F) -> F {
        match self {
            Self::First(f) => f,
            Self::Second(_) => other(),
        }
    }
    pub fn second_or(self, other: S) -> S {
        match self {
            Self::First(_) => other,
            Self::Second(s) => s,
        }
    }
    pub fn second_or_else(self, other: impl FnOnce() -> S) -> S {
        match self {
            Self::First(_) => other(),
            Self::Second(s) => s,
        }
    }
}

/// ## Conditional actions
impl<F, S> Either<F, S> {
    pub fn if_first(&self, action: impl FnOnce(&F)) {
        if let Self::First(f) = self {
            action(f)
        }
    }
    pub fn if_second(&self, action: impl FnOnce(&S)) {
        if let Self::Second(s) = self {
            action(s)
        }
    }
    pub fn if_first_or_else(&self, action: impl FnOnce(&F), other_action: impl FnOnce(&S)) {
        match self {
            Self::First(f) => action(f),
            Self::Second(s) => other_action(s),
        }
    }
    pub fn if_second_or_else(&self, action: impl FnOnce(&S), other_action: impl FnOnce(&F)) {
        match self {
            Self::First(f) => other_action(f),
            Self::Second(s) => action(s),
        }
    }
}

/// ## Mapping
impl<F, S> Either<F, S> {
    /// Maps each alternative to a new `Either`, which may switch alternatives.
    pub fn flat_map<F2, S2>(
        self,
        first_mapper: impl FnOnce(F) -> Either<F2, S2>,
        second_mapper: impl FnOnce(S) -> Either<F2, S2>,
    ) -> Either<F2, S2> {
        match self {
            Self::First(f) => first_mapper(f),
            Self::Second(s) => second_mapper(s),
        }
    }

    /// Maps each alternative, keeping the tag.
    pub fn map<F2, S2>(
        self,
        first_mapper: impl FnOnce(F) -> F2,
        second_mapper: impl FnOnce(S) -> S2,
    ) -> Either<F2, S2> {
        match self {
            Self::First(f) => Either::First(first_mapper(f)),
            Self::Second(s) => Either::Second(second_mapper(s)),
        }
    }

    pub fn map_first<F2>(self, mapper: impl FnOnce(F) -> F2) -> Either<F2, S> {
        self.map(mapper, |s| s)
    }
    pub fn map_second<S2>(self, mapper: impl FnOnce(S) -> S2) -> Either<F, S2> {
        self.map(|f| f, mapper)
    }

    pub fn fold<T>(self, on_first: impl FnOnce(F) -> T, on_second: impl FnOnce(S) -> T) -> T {
        match self {
            Self::First(f) => on_first(f),
            Self::Second(s) => on_second(s),
        }
    }
}

/// Shows the value held, regardless of the alternative.
impl<F: Display, S: Display> Display for Either<F, S> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::First(f) => f.fmt(fmt),
            Self::Second(s) => s.fmt(fmt),
        }
    }
}

#[cfg(test)]
mod tests {
    prelude! {}
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(e: &Either<i32, i32>) -> u64 {
        let mut hasher = DefaultHasher::new();
        e.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn structural_equality() {
        let (a, b): (Either<i32, i32>, _) = (Either::new_first(5), Either::new_first(5));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, Either::new_second(5));
    }

    #[test]
    fn strict_accessors() {
        let e: Either<u32, String> = Either::Second("4B".into());
        assert!(e.is_second());
        assert!(!e.is_first());
        assert!(e.first().unwrap_err().src().is_absent());
        assert_eq!(e.second().unwrap(), "4B");
        assert_eq!(e.clone().into_second().unwrap(), "4B");
        assert!(e.into_first().is_err());
    }

    #[test]
    fn defaulting_accessors() {
        let e: Either<u32, &str> = Either::Second("x");
        assert_eq!(e.first_or(7), 7);
        assert_eq!(e.first_or_else(|| 8), 8);
        assert_eq!(e.second_or("y"), "x");
        let e: Either<u32, &str> = Either::First(3);
        assert_eq!(e.first_or(7), 3);
        assert_eq!(e.second_or_else(|| "z"), "z");
    }

    #[test]
    fn conditional_actions() {
        let e: Either<u32, &str> = Either::First(3);
        let seen = std::cell::RefCell::new(vec![]);
        e.if_first(|f| seen.borrow_mut().push(format!("first {f}")));
        e.if_second(|s| seen.borrow_mut().push(format!("second {s}")));
        e.if_second_or_else(
            |s| seen.borrow_mut().push(format!("second {s}")),
            |f| seen.borrow_mut().push(format!("else {f}")),
        );
        assert_eq!(seen.into_inner(), vec!["first 3", "else 3"]);

        let seen = std::cell::Cell::new(0);
        Either::<u32, &str>::Second("b").if_first_or_else(|_| seen.set(1), |_| seen.set(2));
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn mapping() {
        let e: Either<u32, String> = Either::First(12);
        assert_eq!(e.clone().map(|n| n * 2, |s| s.len()), Either::First(24));
        let swapped: Either<String, u32> = e.flat_map(
            |n| Either::Second(n + 1),
            |s| Either::First(s),
        );
        assert_eq!(swapped, Either::Second(13));

        let label: Either<u32, String> = Either::Second("4B".into());
        assert_eq!(label.clone().map_second(|s| s.to_lowercase()).to_string(), "4b");
        assert_eq!(label.fold(|n| n as usize, |s| s.len()), 2);
    }

    #[test]
    fn display_shows_held_value() {
        assert_eq!(Either::<u32, &str>::First(12).to_string(), "12");
        assert_eq!(Either::<u32, &str>::Second("4B").to_string(), "4B");
    }
}
