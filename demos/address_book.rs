//! This example drives the user database directly, without the interactive shell.
//!
//! It registers an extra species, creates a few users with addresses and pets, then removes the
//! users picked by a selection.

udms::prelude! {
    repr::animal::Factory,
}

/// Registers `keyword` as an alias for an existing species.
pub fn alias(ctx: &mut Ctx, keyword: &str, factory: Factory) {
    let _prev = ctx.species_mut().register(keyword, factory);
    debug_assert!(_prev.is_none());
}

pub fn populate(ctx: &mut Ctx) -> Res<Vec<idx::User>> {
    let home = Address::builder()
        .house(12)
        .road("Main St")
        .city("Springfield")
        .zip_code(627)
        .build();

    let mut alice = Person::new("Alice")?;
    alice.set_age(30)?;
    alice.set_address(home.clone());
    let alice = ctx.add_user(alice)?;
    let rex = ctx.new_pet("dog", "Rex")?;
    ctx.adopt(alice, rex)?;

    let mut bob = Person::new("Bob")?;
    bob.set_address(home.with_apartment("4B"));
    let bob = ctx.add_user(bob)?;
    let tom = ctx.new_pet("kitty", "Tom")?;
    ctx.adopt(bob, tom)?;
    // shared pet
    ctx.adopt(bob, rex)?;

    let carol = ctx.add_user(Person::new("Carol")?)?;

    Ok(vec![alice, bob, carol])
}

pub fn run(ctx: &mut Ctx) -> Res<()> {
    alias(ctx, "kitty", || Species::Cat);
    let users = populate(ctx)?;

    for (i, u_idx) in users.iter().enumerate() {
        println!("{}. {}", i + 1, ctx.display_user(*u_idx)?);
        for (_, pet) in ctx.pets_of(*u_idx)? {
            print!("   {}: ", pet.name());
            pet.speak()?;
        }
    }

    let selection = Selection::parse("1 3")?;
    println!("\nremoving {}", selection);
    for (i, u_idx) in users.iter().enumerate() {
        if selection.contains(i as i32 + 1) {
            ctx.remove_user(*u_idx);
        }
    }
    Ok(())
}

fn main() {
    println!("running...");
    let mut ctx = Ctx::with_capacity(3, 2);

    run(&mut ctx).expect("run failed :/");

    println!("done\n\nremaining users:");
    for (u_idx, _) in ctx.users() {
        println!("- {}", ctx.display_user(u_idx).expect("live user"));
    }
}
