//! Species, pets, and the species registry.

prelude!();

/// Species builder, see [`Registry`].
pub type Factory = fn() -> Species;

/// A kind of pet.
///
/// Two animals are the same kind of animal iff they have the same noise and species name, which
/// for a closed enumeration is just variant equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Cat,
    Dog,
}

impl Species {
    pub fn noise(self) -> &'static str {
        match self {
            Self::Cat => "Meow",
            Self::Dog => "Woof!",
        }
    }
    pub fn name(self) -> &'static str {
        match self {
            Self::Cat => "Cat",
            Self::Dog => "Dog",
        }
    }
}

impl Display for Species {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        self.name().fmt(fmt)
    }
}

impl Animal for Species {
    fn noise(&self) -> &str {
        Species::noise(*self)
    }
    fn animal_name(&self) -> &str {
        Species::name(*self)
    }
}

/// A named animal owned by a user.
///
/// Equality and hashing combine the species (noise and name) and the pet's name. Pet
/// *collections* however compare pets by identity, see [`idx::Pet`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pet {
    species: Species,
    name: String,
}

impl Pet {
    pub fn new(species: Species, name: impl Into<String>) -> Self {
        Self {
            species,
            name: name.into(),
        }
    }

    pub fn species(&self) -> Species {
        self.species
    }
}

impl Named for Pet {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Animal for Pet {
    fn noise(&self) -> &str {
        self.species.noise()
    }
    fn animal_name(&self) -> &str {
        self.species.name()
    }
}

impl Display for Pet {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Pet {} \"{}\"", self.species, self.name)
    }
}

/// Maps lowercase species keywords to species factories.
///
/// ```rust
/// # udms::prelude! {}
/// let registry = repr::animal::Registry::standard();
/// assert_eq!(registry.get("DOG").expect("dogs are standard"), Species::Dog);
/// let err = registry.get("hamster").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "unknown animal type `hamster`\nvalid animal types are: Cat, Dog",
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    factories: BTreeMap<String, Factory>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry with the `cat` and `dog` species.
    pub fn standard() -> Self {
        let mut slf = Self::new();
        slf.register("cat", || Species::Cat);
        slf.register("dog", || Species::Dog);
        slf
    }

    /// Registers a factory, returns the factory it replaces if any.
    pub fn register(&mut self, keyword: impl AsRef<str>, factory: Factory) -> Option<Factory> {
        let keyword = keyword.as_ref().trim().to_lowercase();
        log::debug!("registering species keyword `{}`", keyword);
        let prev = self.factories.insert(keyword.clone(), factory);
        if prev.is_some() {
            log::warn!("species keyword `{}` redefined", keyword);
        }
        prev
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> + '_ {
        self.factories.keys().map(String::as_str)
    }

    /// Capitalized keywords, comma-separated.
    pub fn show_choices(&self) -> String {
        self.keywords().show_iter_cs(|kw| capitalize(kw))
    }

    /// Builds the species registered under `keyword`, case-insensitive.
    pub fn get(&self, keyword: impl AsRef<str>) -> Res<Species> {
        let keyword = keyword.as_ref().trim();
        match self.factories.get(&keyword.to_lowercase()) {
            Some(factory) => Ok(factory()),
            None => Err(error!(@unknown("animal type") keyword)
                .with_context(format!("valid animal types are: {}", self.show_choices()))),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    prelude! {
        repr::animal::Registry,
    }

    #[test]
    fn species_data() {
        assert_eq!(Species::Cat.noise(), "Meow");
        assert_eq!(Species::Dog.noise(), "Woof!");
        assert_eq!(Animal::animal_name(&Species::Dog), "Dog");
        assert_eq!(Species::Cat.to_string(), "Cat");
    }

    #[test]
    fn pets_delegate_to_species() {
        let rex = Pet::new(Species::Dog, "Rex");
        assert_eq!(rex.name(), "Rex");
        assert_eq!(rex.noise(), "Woof!");
        assert_eq!(rex.animal_name(), "Dog");
        assert_eq!(rex.to_string(), "Pet Dog \"Rex\"");

        let mut out = vec![];
        rex.speak_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Woof!\n");
    }

    #[test]
    fn pet_equality_is_structural() {
        assert_eq!(Pet::new(Species::Dog, "Rex"), Pet::new(Species::Dog, "Rex"));
        assert_ne!(Pet::new(Species::Dog, "Rex"), Pet::new(Species::Cat, "Rex"));
        assert_ne!(Pet::new(Species::Dog, "Rex"), Pet::new(Species::Dog, "Max"));
    }

    #[test]
    fn registry_lookup() {
        let mut registry = Registry::standard();
        assert_eq!(registry.keywords().collect::<Vec<_>>(), vec!["cat", "dog"]);
        assert_eq!(registry.get(" Cat ").unwrap(), Species::Cat);
        assert_eq!(registry.show_choices(), "Cat, Dog");
        assert!(registry.get("parrot").is_err());

        assert!(registry.register("Kitty", || Species::Cat).is_none());
        assert_eq!(registry.get("kitty").unwrap(), Species::Cat);
        assert!(registry.register("dog", || Species::Cat).is_some());
        assert_eq!(registry.get("dog").unwrap(), Species::Cat);
    }

    #[test]
    fn empty_registry() {
        let registry = Registry::new();
        assert_eq!(registry.show_choices(), "");
        assert!(registry.get("cat").is_err());
    }
}
