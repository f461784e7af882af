safe_index::new! {
    /// User index, identifies a user for the lifetime of a [`Ctx`](crate::ctx::Ctx).
    User,
    /// Maps a [`User`] to something.
    map: UserMap,
}

safe_index::new! {
    /// Pet index, the identity of a pet.
    ///
    /// Pet collections compare pets by index, so two pets with the same name and species are
    /// still distinct.
    Pet,
    /// Maps a [`Pet`] to something.
    map: PetMap,
}
