/// Imports this crate's prelude.
#[macro_export]
macro_rules! prelude {
    ($($imports:tt)*) => (
        use $crate::prelude::{*, $($imports)*};
    )
}

pub use std::{
    borrow::{Borrow, Cow},
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Display},
    io::{BufRead, Write},
    mem,
};

pub use log;
pub use regex;
pub use smallvec::{smallvec, SmallVec};

#[macro_use]
pub mod res;

pub use crate::{
    bail,
    ctx::{self, Ctx},
    error,
    prelude::res::{Res, WithCtx},
    repr::{
        self, idx, Address, Either, IntoLabel, Label, Person, Pet, Range, Selection, Species,
    },
    traits::*,
};

pub trait CollPrintExt: Sized {
    type Elm;
    fn show_iter<S>(self, show_elm: impl Fn(Self::Elm) -> S, sep: impl AsRef<str>) -> String
    where
        S: AsRef<str>;

    fn show_iter_cs<S>(self, show_elm: impl Fn(Self::Elm) -> S) -> String
    where
        S: AsRef<str>,
    {
        self.show_iter(show_elm, ", ")
    }
}
impl<T, E> CollPrintExt for T
where
    T: IntoIterator<Item = E>,
{
    type Elm = E;
    fn show_iter<S>(self, show_elm: impl Fn(Self::Elm) -> S, sep: impl AsRef<str>) -> String
    where
        S: AsRef<str>,
    {
        let sep = sep.as_ref();
        let mut s = String::new();
        for elm in self {
            if !s.is_empty() {
                s.push_str(sep);
            }
            s.push_str(show_elm(elm).as_ref())
        }
        s
    }
}

/// Trims `s`, yields `None` if the result is empty.
pub fn non_blank(s: impl AsRef<str>) -> Option<String> {
    let s = s.as_ref().trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Capitalizes the first character of `s`.
pub fn capitalize(s: impl AsRef<str>) -> String {
    let mut chars = s.as_ref().chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
