//! User database context.
//!
//! [`Ctx`] owns everything the database knows: the species [`Registry`], the pet arena and the
//! users. There is no global state, a context is created explicitly and passed around.
//!
//! Users and pets are referred to by index ([`idx::User`], [`idx::Pet`]). Indices are never
//! reused: removing a user only removes it from the set of live users.

prelude! {
    repr::Registry,
}

/// The user database.
pub struct Ctx {
    species: Registry,
    pets: idx::PetMap<Pet>,
    users: idx::UserMap<Person>,
    /// Live users, in insertion order.
    live: BTreeSet<idx::User>,
}

impl std::ops::Index<idx::Pet> for Ctx {
    type Output = Pet;
    fn index(&self, idx: idx::Pet) -> &Self::Output {
        &self.pets[idx]
    }
}

impl Default for Ctx {
    fn default() -> Self {
        Self::new()
    }
}

impl Ctx {
    /// Constructor, uses the [standard species](Registry::standard).
    pub fn with_capacity(user_capa: usize, pet_capa: usize) -> Self {
        Self {
            species: Registry::standard(),
            pets: idx::PetMap::with_capacity(pet_capa),
            users: idx::UserMap::with_capacity(user_capa),
            live: BTreeSet::new(),
        }
    }
    pub fn new() -> Self {
        Self::with_capacity(7, 7)
    }

    pub fn species(&self) -> &Registry {
        &self.species
    }
    pub fn species_mut(&mut self) -> &mut Registry {
        &mut self.species
    }

    pub fn pets(&self) -> &idx::PetMap<Pet> {
        &self.pets
    }
}

/// # Users
impl Ctx {
    /// Registers a new user.
    ///
    /// Fails if a live user has the same name, ignoring case, or if the person owns a pet this
    /// context did not allocate.
    ///
    /// ```rust
    /// # udms::prelude! {}
    /// let mut ctx = Ctx::new();
    /// let alice = ctx.add_user(Person::new("Alice")?)?;
    /// assert_eq!(ctx.user(alice)?.name(), "Alice");
    /// assert!(ctx.add_user(Person::new("ALICE")?).is_err());
    ///
    /// assert!(ctx.remove_user(alice));
    /// assert!(ctx.user(alice).is_err());
    /// let alice_again = ctx.add_user(Person::new("alice")?)?;
    /// assert_ne!(alice, alice_again);
    /// # Res::Ok(())
    /// ```
    pub fn add_user(&mut self, person: Person) -> Res<idx::User> {
        if let Some(existing) = self.user_named(person.name()) {
            let existing = self.users[existing].name();
            return Err(error!(@redef("user") person.name())
                .with_context(format!("a user named `{}` already exists", existing)));
        }
        for p_idx in person.pets() {
            self.check_pet(*p_idx)
                .with_context(format!("while adding user `{}`", person.name()))?;
        }
        let u_idx = self.users.push_idx(|_| person);
        let _is_new = self.live.insert(u_idx);
        debug_assert!(_is_new);
        log::debug!("added user `{}` #{}", self.users[u_idx].name(), u_idx);
        Ok(u_idx)
    }

    /// Removes a user, returns `false` if it was not live.
    pub fn remove_user(&mut self, u_idx: idx::User) -> bool {
        let was_live = self.live.remove(&u_idx);
        if was_live {
            log::debug!("removed user `{}` #{}", self.users[u_idx].name(), u_idx);
        }
        was_live
    }

    pub fn is_live(&self, u_idx: idx::User) -> bool {
        self.live.contains(&u_idx)
    }

    pub fn user(&self, u_idx: idx::User) -> Res<&Person> {
        if !self.is_live(u_idx) {
            bail!(@no_such("user") format!("#{}", u_idx))
        }
        Ok(&self.users[u_idx])
    }
    pub fn user_mut(&mut self, u_idx: idx::User) -> Res<&mut Person> {
        if !self.is_live(u_idx) {
            bail!(@no_such("user") format!("#{}", u_idx))
        }
        Ok(&mut self.users[u_idx])
    }

    /// Live users in insertion order.
    pub fn users(&self) -> impl Iterator<Item = (idx::User, &Person)> + '_ {
        self.live.iter().map(|u_idx| (*u_idx, &self.users[*u_idx]))
    }
    pub fn user_count(&self) -> usize {
        self.live.len()
    }

    /// Live users whose name contains `query`, ignoring case.
    pub fn find_users(&self, query: impl AsRef<str>) -> SmallVec<[idx::User; 8]> {
        let query = query.as_ref().trim().to_lowercase();
        self.users()
            .filter(|(_, person)| person.name().to_lowercase().contains(&query))
            .map(|(u_idx, _)| u_idx)
            .collect()
    }

    /// Live user with name `name`, ignoring case.
    pub fn user_named(&self, name: impl AsRef<str>) -> Option<idx::User> {
        let name = name.as_ref().trim().to_lowercase();
        self.users()
            .find(|(_, person)| person.name().to_lowercase() == name)
            .map(|(u_idx, _)| u_idx)
    }

    /// Renders a user and its pets on one line.
    pub fn display_user(&self, u_idx: idx::User) -> Res<String> {
        Ok(self.user(u_idx)?.display(&self.pets))
    }
}

/// # Pets
impl Ctx {
    /// Stores a pet, the index is the pet's identity.
    pub fn add_pet(&mut self, pet: Pet) -> idx::Pet {
        let p_idx = self.pets.push_idx(|_| pet);
        log::debug!("added pet `{}` #{}", self.pets[p_idx].name(), p_idx);
        p_idx
    }

    /// Builds a pet of the species registered under `keyword`.
    pub fn new_pet(&mut self, keyword: impl AsRef<str>, name: impl Into<String>) -> Res<idx::Pet> {
        let species = self.species.get(keyword)?;
        Ok(self.add_pet(Pet::new(species, name)))
    }

    fn check_pet(&self, p_idx: idx::Pet) -> Res<()> {
        if p_idx >= self.pets.next_index() {
            bail!(@no_such("pet") format!("#{}", p_idx))
        }
        Ok(())
    }

    /// Gives a pet to a user, returns `false` if the user already had this very pet.
    pub fn adopt(&mut self, u_idx: idx::User, p_idx: idx::Pet) -> Res<bool> {
        self.check_pet(p_idx)?;
        Ok(self.user_mut(u_idx)?.pets_mut().insert(p_idx))
    }

    /// Pets of a user, oldest pet first.
    pub fn pets_of(&self, u_idx: idx::User) -> Res<SmallVec<[(idx::Pet, &Pet); 4]>> {
        let pets = self
            .user(u_idx)?
            .pets()
            .iter()
            .map(|p_idx| (*p_idx, &self.pets[*p_idx]))
            .collect();
        Ok(pets)
    }
}

#[cfg(test)]
mod tests {
    prelude! {}

    fn ctx_with(names: &[&str]) -> (Ctx, Vec<idx::User>) {
        let mut ctx = Ctx::with_capacity(names.len(), 0);
        let users = names
            .iter()
            .map(|name| ctx.add_user(Person::new(name).unwrap()).unwrap())
            .collect();
        (ctx, users)
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let (mut ctx, _) = ctx_with(&["Alice"]);
        let err = ctx.add_user(Person::new(" alice ").unwrap()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "illegal redefinition of user `alice`\na user named `Alice` already exists"
        );
        assert_eq!(ctx.user_count(), 1);
    }

    #[test]
    fn removal() {
        let (mut ctx, users) = ctx_with(&["Alice", "Bob"]);
        assert!(ctx.remove_user(users[0]));
        assert!(!ctx.remove_user(users[0]));
        assert!(ctx.user(users[0]).unwrap_err().src().is_no_such_element());
        assert!(ctx.user_mut(users[0]).is_err());
        assert_eq!(ctx.user_count(), 1);
        let names: Vec<&str> = ctx.users().map(|(_, p)| p.name()).collect();
        assert_eq!(names, vec!["Bob"]);
    }

    #[test]
    fn queries() {
        let (ctx, users) = ctx_with(&["Alice", "Malik", "Bob"]);
        assert_eq!(ctx.find_users("LI").as_slice(), &[users[0], users[1]]);
        assert_eq!(ctx.find_users("").len(), 3);
        assert!(ctx.find_users("zed").is_empty());
        assert_eq!(ctx.user_named("bob"), Some(users[2]));
        assert_eq!(ctx.user_named("bo"), None);
    }

    #[test]
    fn independent_contexts() {
        let (ctx, _) = ctx_with(&["Alice"]);
        let other = Ctx::new();
        assert_eq!(ctx.user_count(), 1);
        assert_eq!(other.user_count(), 0);
    }

    #[test]
    fn pets_are_identities() {
        let (mut ctx, users) = ctx_with(&["Alice"]);
        let alice = users[0];
        let rex = ctx.new_pet("dog", "Rex").unwrap();
        let other_rex = ctx.new_pet("Dog", "Rex").unwrap();
        assert_eq!(ctx[rex], ctx[other_rex]);

        assert!(ctx.adopt(alice, rex).unwrap());
        assert!(ctx.adopt(alice, other_rex).unwrap());
        assert!(!ctx.adopt(alice, rex).unwrap());
        assert_eq!(ctx.user(alice).unwrap().pets().len(), 2);

        {
            let pets = ctx.pets_of(alice).unwrap();
            assert_eq!(pets.len(), 2);
            assert_eq!(pets[0].0, rex);
            assert_eq!(pets[1].1.noise(), "Woof!");
        }

        assert!(ctx.new_pet("hamster", "Ham").is_err());
        assert_eq!(ctx.pets().len(), 2);
    }

    #[test]
    fn foreign_pets_are_rejected() {
        let mut other = Ctx::new();
        let rex = other.new_pet("dog", "Rex").unwrap();

        let mut ctx = Ctx::new();
        let mut alice = Person::new("Alice").unwrap();
        alice.pets_mut().insert(rex);
        let err = ctx.add_user(alice).unwrap_err();
        assert!(err.src().is_no_such_element());
        assert_eq!(
            err.to_string(),
            format!("no such pet `#{}`\nwhile adding user `Alice`", rex)
        );
        assert_eq!(ctx.user_count(), 0);

        let alice = ctx.add_user(Person::new("Alice").unwrap()).unwrap();
        assert!(ctx.adopt(alice, rex).is_err());
        assert_eq!(ctx.display_user(alice).unwrap(), "Alice - homeless; pets: []");
    }

    #[test]
    fn display() {
        let (mut ctx, users) = ctx_with(&["Alice"]);
        let tom = ctx.new_pet("cat", "Tom").unwrap();
        ctx.adopt(users[0], tom).unwrap();
        assert_eq!(
            ctx.display_user(users[0]).unwrap(),
            format!("Alice - homeless; pets: [Pet Cat \"Tom\" #{}]", tom)
        );
    }
}
