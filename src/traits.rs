prelude! {}

pub trait Named {
    fn name(&self) -> &str;
}

/// Noise and species name of an animal.
pub trait Animal {
    fn noise(&self) -> &str;
    fn animal_name(&self) -> &str;

    /// Writes the animal's noise on its own line.
    fn speak_to(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "{}", self.noise())
    }
    fn speak(&self) -> std::io::Result<()> {
        self.speak_to(&mut std::io::stdout())
    }
}

pub trait User: Named {
    /// Fails on blank names, stores the trimmed name otherwise.
    fn set_name(&mut self, new_name: impl AsRef<str>) -> Res<()>;

    fn age(&self) -> i32;
    /// Fails on ages below `-1`, `-1` means the age is unknown.
    fn set_age(&mut self, new_age: i32) -> Res<()>;
    fn has_age(&self) -> bool {
        self.age() != -1
    }

    fn address(&self) -> Option<&Address>;
    fn set_address(&mut self, address: Address);
    fn set_homeless(&mut self);
    fn is_homeless(&self) -> bool {
        self.address().is_none()
    }

    /// Pet identities, see [`idx::Pet`].
    fn pets(&self) -> &BTreeSet<idx::Pet>;
    fn pets_mut(&mut self) -> &mut BTreeSet<idx::Pet>;
}
