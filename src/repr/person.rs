//! Users of the database.

prelude!();

/// A person, the only kind of [`User`] there is.
///
/// # Invariants
///
/// - `name` is trimmed and not empty;
/// - `age ≥ -1`, `-1` meaning unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    name: String,
    age: i32,
    address: Option<Address>,
    pets: BTreeSet<idx::Pet>,
}

impl Person {
    /// Age of a person whose age is not known.
    pub const UNKNOWN_AGE: i32 = -1;

    /// Constructor, fails on blank names.
    ///
    /// ```rust
    /// # udms::prelude! {}
    /// let mut alice = Person::new("  Alice ").expect("legal name");
    /// assert_eq!(alice.name(), "Alice");
    /// assert!(!alice.has_age());
    /// assert!(alice.is_homeless());
    /// assert!(alice.set_age(-2).is_err());
    /// alice.set_age(30).expect("legal age");
    /// assert!(alice.has_age());
    /// assert_eq!(alice.age(), 30);
    /// assert!(Person::new(" \t").is_err());
    /// ```
    pub fn new(name: impl AsRef<str>) -> Res<Self> {
        let mut slf = Self {
            name: String::new(),
            age: Self::UNKNOWN_AGE,
            address: None,
            pets: BTreeSet::new(),
        };
        slf.set_name(name)?;
        Ok(slf)
    }

    /// Renders the person on one line, `pets` resolves pet identities.
    pub fn display(&self, pets: &idx::PetMap<Pet>) -> String {
        let mut res = self.name.clone();
        if self.has_age() {
            res.push_str(&format!(", age {}", self.age));
        }
        res.push_str(" - ");
        match &self.address {
            Some(addr) => res.push_str(&addr.one_line()),
            None => res.push_str("homeless"),
        }
        let pets = self
            .pets
            .iter()
            .show_iter_cs(|p_idx| format!("{} #{}", pets[*p_idx], p_idx));
        res.push_str(&format!("; pets: [{}]", pets));
        res
    }
}

impl Named for Person {
    fn name(&self) -> &str {
        &self.name
    }
}

impl User for Person {
    fn set_name(&mut self, new_name: impl AsRef<str>) -> Res<()> {
        let new_name = new_name.as_ref();
        match non_blank(new_name) {
            Some(name) => {
                self.name = name;
                Ok(())
            }
            None => bail!(@invalid("user name (blank)") new_name),
        }
    }

    fn age(&self) -> i32 {
        self.age
    }
    fn set_age(&mut self, new_age: i32) -> Res<()> {
        if new_age < Self::UNKNOWN_AGE {
            bail!(@invalid("age") new_age.to_string())
        }
        self.age = new_age;
        Ok(())
    }

    fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }
    fn set_address(&mut self, address: Address) {
        self.address = Some(address)
    }
    fn set_homeless(&mut self) {
        self.address = None
    }

    fn pets(&self) -> &BTreeSet<idx::Pet> {
        &self.pets
    }
    fn pets_mut(&mut self) -> &mut BTreeSet<idx::Pet> {
        &mut self.pets
    }
}

#[cfg(test)]
mod tests {
    prelude! {}

    fn pet_arena() -> (idx::PetMap<Pet>, idx::Pet, idx::Pet) {
        let mut pets = idx::PetMap::with_capacity(2);
        let rex = pets.push_idx(|_| Pet::new(Species::Dog, "Rex"));
        let other_rex = pets.push_idx(|_| Pet::new(Species::Dog, "Rex"));
        (pets, rex, other_rex)
    }

    #[test]
    fn names() {
        let mut bob = Person::new("Bob").unwrap();
        bob.set_name("  Robert  ").unwrap();
        assert_eq!(bob.name(), "Robert");
        let err = bob.set_name("   ").unwrap_err();
        assert!(err.src().is_invalid_arg());
        assert_eq!(bob.name(), "Robert");
    }

    #[test]
    fn ages() {
        let mut alice = Person::new("Alice").unwrap();
        assert_eq!(alice.age(), Person::UNKNOWN_AGE);
        assert!(alice.set_age(-2).unwrap_err().src().is_invalid_arg());
        alice.set_age(0).unwrap();
        assert!(alice.has_age());
        alice.set_age(-1).unwrap();
        assert!(!alice.has_age());
    }

    #[test]
    fn addresses() {
        let mut alice = Person::new("Alice").unwrap();
        let home = Address::builder().city("Springfield").build();
        alice.set_address(home.clone());
        assert!(!alice.is_homeless());
        assert_eq!(alice.address(), Some(&home));
        alice.set_homeless();
        assert!(alice.is_homeless());
    }

    #[test]
    fn pets_by_identity() {
        let (pets, rex, other_rex) = pet_arena();
        assert_eq!(pets[rex], pets[other_rex]);

        let mut alice = Person::new("Alice").unwrap();
        assert!(alice.pets_mut().insert(rex));
        assert!(alice.pets_mut().insert(other_rex));
        assert_eq!(alice.pets().len(), 2);
        assert!(!alice.pets_mut().insert(rex));
        assert_eq!(alice.pets().len(), 2);
        assert!(alice.pets_mut().remove(&rex));
        assert_eq!(alice.pets().len(), 1);
    }

    #[test]
    fn equality() {
        let (_, rex, other_rex) = pet_arena();
        let mut a = Person::new("Alice").unwrap();
        let mut b = Person::new("Alice").unwrap();
        assert_eq!(a, b);
        a.pets_mut().insert(rex);
        b.pets_mut().insert(other_rex);
        assert_ne!(a, b);
        b.pets_mut().clear();
        b.pets_mut().insert(rex);
        assert_eq!(a, b);
        b.set_age(3).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn display() {
        let (pets, rex, _) = pet_arena();
        let mut alice = Person::new("Alice").unwrap();
        assert_eq!(alice.display(&pets), "Alice - homeless; pets: []");
        alice.set_age(30).unwrap();
        alice.set_address(
            Address::builder()
                .house(12)
                .road("Main St")
                .city("Springfield")
                .apartment("4B")
                .build(),
        );
        alice.pets_mut().insert(rex);
        assert_eq!(
            alice.display(&pets),
            format!(
                "Alice, age 30 - 12 Main St, Springfield / Apartment 4B; pets: [Pet Dog \"Rex\" #{}]",
                rex
            )
        );
    }
}
