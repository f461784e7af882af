//! Immutable postal addresses.
//!
//! Addresses are built with a [`Builder`] and never mutated afterwards: the `with_*` methods
//! produce a modified copy.
//!
//! ```rust
//! # udms::prelude! {}
//! let addr = Address::builder()
//!     .house(12)
//!     .road("Main St")
//!     .city("Springfield")
//!     .build();
//! assert_eq!(addr.to_string(), "12 Main St, Springfield");
//!
//! let moved = addr.with_apartment("4B");
//! assert_eq!(moved.to_string(), "12 Main St, Springfield\nApartment 4B");
//! assert_eq!(addr.apartment(), None);
//! ```

prelude!();

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A house/floor/apartment/suite/room designation: a number, or a free-text label.
pub type Label = Either<u32, String>;

/// Conversion to an optional [`Label`].
///
/// Negative integers and blank strings yield `None`, strings are trimmed.
pub trait IntoLabel {
    fn into_label(self) -> Option<Label>;
}
impl IntoLabel for i64 {
    fn into_label(self) -> Option<Label> {
        u32::try_from(self).ok().map(Either::First)
    }
}
impl IntoLabel for i32 {
    fn into_label(self) -> Option<Label> {
        i64::from(self).into_label()
    }
}
impl IntoLabel for u32 {
    fn into_label(self) -> Option<Label> {
        Some(Either::First(self))
    }
}
impl IntoLabel for &'_ str {
    fn into_label(self) -> Option<Label> {
        non_blank(self).map(Either::Second)
    }
}
impl IntoLabel for String {
    fn into_label(self) -> Option<Label> {
        self.as_str().into_label()
    }
}
impl IntoLabel for &'_ String {
    fn into_label(self) -> Option<Label> {
        self.as_str().into_label()
    }
}
impl IntoLabel for Label {
    fn into_label(self) -> Option<Label> {
        match self {
            Either::First(n) => Some(Either::First(n)),
            Either::Second(s) => s.into_label(),
        }
    }
}
impl<T: IntoLabel> IntoLabel for Option<T> {
    fn into_label(self) -> Option<Label> {
        self.and_then(IntoLabel::into_label)
    }
}

/// Non-negative integer fitting in a `u32`, `None` otherwise.
fn count(n: impl Into<i64>) -> Option<u32> {
    u32::try_from(n.into()).ok()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
struct Fields {
    country: Option<String>,
    state: Option<String>,
    city: Option<String>,
    road: Option<String>,
    zip_code: Option<u32>,
    po_box: Option<u32>,
    house: Option<Label>,
    floor: Option<Label>,
    apartment: Option<Label>,
    suite: Option<Label>,
    room: Option<Label>,
}

/// An immutable address.
///
/// # Invariants
///
/// - no string field is blank or has surrounding whitespace;
/// - `hash` is the hash of `fields`.
#[derive(Debug, Clone)]
pub struct Address {
    fields: Fields,
    hash: u64,
}

/// Accumulates address fields, see [`Address::builder`].
#[derive(Debug, Clone, Default)]
pub struct Builder {
    fields: Fields,
}

impl Address {
    fn new(fields: Fields) -> Self {
        let mut hasher = DefaultHasher::new();
        fields.hash(&mut hasher);
        Self {
            hash: hasher.finish(),
            fields,
        }
    }

    pub fn builder() -> Builder {
        Builder::default()
    }
    pub fn to_builder(&self) -> Builder {
        Builder {
            fields: self.fields.clone(),
        }
    }

    /// True if no field is set.
    pub fn is_empty(&self) -> bool {
        self.fields == Fields::default()
    }

    /// Same as the [`Display`] rendering, but on a single line.
    pub fn one_line(&self) -> String {
        self.to_string().replace('\n', " / ")
    }
}

impl Builder {
    pub fn build(&self) -> Address {
        Address::new(self.fields.clone())
    }
}

macro_rules! text_fields {
    ( $( $field:ident / $with:ident ),* $(,)? ) => {
        impl Builder {
            $(
                pub fn $field(mut self, $field: impl AsRef<str>) -> Self {
                    self.fields.$field = non_blank($field);
                    self
                }
            )*
        }
        impl Address {
            $(
                pub fn $field(&self) -> Option<&str> {
                    self.fields.$field.as_deref()
                }
                pub fn $with(&self, $field: impl AsRef<str>) -> Self {
                    self.to_builder().$field($field).build()
                }
            )*
        }
    };
}
macro_rules! count_fields {
    ( $( $field:ident / $with:ident ),* $(,)? ) => {
        impl Builder {
            $(
                pub fn $field(mut self, $field: impl Into<i64>) -> Self {
                    self.fields.$field = count($field);
                    self
                }
            )*
        }
        impl Address {
            $(
                pub fn $field(&self) -> Option<u32> {
                    self.fields.$field
                }
                pub fn $with(&self, $field: impl Into<i64>) -> Self {
                    self.to_builder().$field($field).build()
                }
            )*
        }
    };
}
macro_rules! label_fields {
    ( $( $field:ident / $with:ident ),* $(,)? ) => {
        impl Builder {
            $(
                pub fn $field(mut self, $field: impl IntoLabel) -> Self {
                    self.fields.$field = $field.into_label();
                    self
                }
            )*
        }
        impl Address {
            $(
                pub fn $field(&self) -> Option<&Label> {
                    self.fields.$field.as_ref()
                }
                pub fn $with(&self, $field: impl IntoLabel) -> Self {
                    self.to_builder().$field($field).build()
                }
            )*
        }
    };
}

text_fields! {
    country / with_country,
    state / with_state,
    city / with_city,
    road / with_road,
}
count_fields! {
    zip_code / with_zip_code,
    po_box / with_po_box,
}
label_fields! {
    house / with_house,
    floor / with_floor,
    apartment / with_apartment,
    suite / with_suite,
    room / with_room,
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.fields == other.fields
    }
}
impl Eq for Address {}
impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash)
    }
}

/// Pushes `sep` unless `s` is empty or at the start of a line.
fn sep(s: &mut String, sep: &str) {
    if !s.is_empty() && !s.ends_with('\n') {
        s.push_str(sep)
    }
}

impl Display for Address {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let f = &self.fields;
        let mut s = String::with_capacity(64);

        match (&f.house, &f.road) {
            (Some(house), Some(road)) => s.push_str(&format!("{house} {road}")),
            (None, Some(road)) => s.push_str(road),
            (Some(house), None) => s.push_str(&house.to_string()),
            (None, None) => (),
        }
        for part in [&f.city, &f.state, &f.country].into_iter().flatten() {
            sep(&mut s, ", ");
            s.push_str(part);
        }
        if let Some(zip) = f.zip_code {
            sep(&mut s, " ");
            s.push_str(&format!("{zip:05}"));
        }

        let details = [
            ("floor", &f.floor),
            ("apartment", &f.apartment),
            ("suite", &f.suite),
            ("room", &f.room),
        ];
        if details.iter().any(|(_, val)| val.is_some()) {
            sep(&mut s, "\n");
            for (word, val) in details {
                if let Some(val) = val {
                    sep(&mut s, ", ");
                    if s.is_empty() || s.ends_with('\n') {
                        s.push_str(&capitalize(word))
                    } else {
                        s.push_str(word)
                    }
                    s.push(' ');
                    s.push_str(&val.to_string());
                }
            }
        }

        s.fmt(fmt)
    }
}

#[cfg(test)]
mod tests {
    prelude! {}

    #[test]
    fn main_street() {
        let addr = Address::builder()
            .house(12)
            .road("Main St")
            .city("Springfield")
            .build();
        assert_eq!(addr.to_string(), "12 Main St, Springfield");
        assert_eq!(addr.house(), Some(&Either::First(12)));
        assert_eq!(addr.road(), Some("Main St"));
    }

    #[test]
    fn blank_and_negative_are_absent() {
        let addr = Address::builder()
            .house(-1)
            .road("   ")
            .city("")
            .state("  Illinois ")
            .country("\t")
            .zip_code(-5)
            .po_box(-1)
            .apartment("  ")
            .floor(-3)
            .build();
        assert_eq!(addr.house(), None);
        assert_eq!(addr.road(), None);
        assert_eq!(addr.city(), None);
        assert_eq!(addr.state(), Some("Illinois"));
        assert_eq!(addr.zip_code(), None);
        assert_eq!(addr.po_box(), None);
        assert_eq!(addr.apartment(), None);
        assert_eq!(addr.floor(), None);
        assert_eq!(addr.to_string(), "Illinois");
        assert!(Address::builder().road(" ").zip_code(-1).build().is_empty());
    }

    #[test]
    fn full_rendering() {
        let addr = Address::builder()
            .house("12bis")
            .road("Main St")
            .city("Springfield")
            .state("IL")
            .country("USA")
            .zip_code(627)
            .floor(3)
            .apartment("4B")
            .room(2)
            .build();
        assert_eq!(
            addr.to_string(),
            "12bis Main St, Springfield, IL, USA 00627\nFloor 3, apartment 4B, room 2"
        );
        assert_eq!(
            addr.one_line(),
            "12bis Main St, Springfield, IL, USA 00627 / Floor 3, apartment 4B, room 2"
        );
    }

    #[test]
    fn separators_only_after_content() {
        let addr = Address::builder().zip_code(12345).suite(9).build();
        assert_eq!(addr.to_string(), "12345\nSuite 9");
        let addr = Address::builder().room("B").build();
        assert_eq!(addr.to_string(), "Room B");
        let addr = Address::builder().house(7).country("France").build();
        assert_eq!(addr.to_string(), "7, France");
        assert_eq!(Address::builder().build().to_string(), "");
    }

    #[test]
    fn po_box_is_not_rendered() {
        let addr = Address::builder().city("Paris").po_box(42).build();
        assert_eq!(addr.to_string(), "Paris");
        assert_eq!(addr.po_box(), Some(42));
        assert_ne!(addr, Address::builder().city("Paris").build());
    }

    #[test]
    fn withers_copy() {
        let original = Address::builder().city("Paris").build();
        let copy = original
            .with_city("Lyon")
            .with_road("Rue Neuve")
            .with_house(3)
            .with_zip_code(69001);
        assert_eq!(original.city(), Some("Paris"));
        assert_eq!(original.to_string(), "Paris");
        assert_eq!(copy.to_string(), "3 Rue Neuve, Lyon 69001");
        assert_eq!(copy.with_house(-1).house(), None);
        assert_eq!(original.with_state("IDF").with_state("").state(), None);
        assert_eq!(
            copy.with_country("France")
                .with_po_box(1)
                .with_floor("ground")
                .with_suite(2)
                .with_room(Some("12"))
                .with_apartment(None as Option<u32>)
                .to_string(),
            "3 Rue Neuve, Lyon, France 69001\nFloor ground, suite 2, room 12"
        );
    }

    #[test]
    fn structural_equality_and_hash() {
        use std::collections::HashSet;
        let a = Address::builder().city("Paris").house(3).build();
        let b = Address::builder().house(3).city(" Paris ").build();
        let c = a.with_house("3");
        assert_eq!(a, b);
        assert_ne!(a, c);
        let set: HashSet<Address> = [a.clone(), b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(a.to_builder().build(), a);
    }

    #[test]
    fn labels() {
        assert_eq!(12i32.into_label(), Some(Either::First(12)));
        assert_eq!((-1i64).into_label(), None);
        assert_eq!(" 4B ".into_label(), Some(Either::Second("4B".into())));
        assert_eq!(String::from(" ").into_label(), None);
        let blank: Label = Either::Second(" ".into());
        assert_eq!(blank.into_label(), None);
        assert_eq!(Some(5u32).into_label(), Some(Either::First(5)));
    }
}
