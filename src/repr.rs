//! Value types and entities of the user database.

pub mod address;
pub mod animal;
pub mod either;
pub mod idx;
pub mod person;
pub mod range;

pub use address::{Address, IntoLabel, Label};
pub use animal::{Pet, Registry, Species};
pub use either::Either;
pub use person::Person;
pub use range::{Range, Selection};
