//! Interactive shell around a [`Ctx`].
//!
//! The shell reads commands line by line. Commands that need more information prompt for it, and
//! malformed answers are re-prompted. Errors raised by a command are reported and the shell moves
//! on to the next command. Reaching the end of the input ends the session.
//!
//! ```rust
//! # udms::prelude! {}
//! use udms::repl::Repl;
//! let script = "add Alice\n30\nno\nno\nlist\nquit\n";
//! let mut repl = Repl::new(script.as_bytes(), Vec::new());
//! repl.run()?;
//! let out = String::from_utf8(repl.into_output()).expect("utf8 output");
//! assert!(out.contains("Added Alice."));
//! assert!(out.contains("Alice, age 30 - homeless; pets: []"));
//! # Res::Ok(())
//! ```

prelude! {}

use crate::prelude::res::Error;

/// Shell configuration.
#[derive(Debug, Clone)]
pub struct Conf {
    /// Print the banner when starting.
    pub banner: bool,
    /// Top-level prompt.
    pub prompt: String,
}
impl Default for Conf {
    fn default() -> Self {
        Self {
            banner: true,
            prompt: "USERS> ".into(),
        }
    }
}

const HELP: &str = "\
commands:
- add [NAME]       adds a user
- remove [QUERY]   removes the user(s) whose name contains QUERY
- list             lists all users
- modify [NAME]    modifies a user
- help             shows this message
- quit             exits";

const MODIFY_HELP: &str = "\
commands:
- name [NAME]               renames the user
- age [AGE|unknown]         sets the user's age
- address                   sets the user's address
- homeless                  removes the user's address
- pets                      lists the user's pets
- pet add                   gives the user a new pet
- pet remove [INDICES]      removes some of the user's pets
- speak                     makes the user's pets speak
- show                      shows the user
- help                      shows this message
- done                      stops modifying the user";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Splits a command line into its command and the rest of the line.
fn split_command(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let end = line.find(char::is_whitespace).unwrap_or(line.len());
    Some((&line[..end], line[end..].trim()))
}

/// 1-based position of the `i`-th item of a listing.
fn position(i: usize) -> i32 {
    i32::try_from(i + 1).unwrap_or(i32::MAX)
}

pub fn check_argc(cmd: &str, args: &str, expected: usize) -> Res<()> {
    let got = args.split_whitespace().count();
    if got < expected {
        bail!(
            "not enough arguments given to command '{}': expected {}, got {}",
            cmd,
            expected,
            got,
        )
    }
    if got > expected {
        bail!(
            "too many arguments given to command '{}': expected {}, got {}",
            cmd,
            expected,
            got,
        )
    }
    Ok(())
}

pub fn check_argc_range(cmd: &str, args: &str, min: usize, max: usize) -> Res<()> {
    let got = args.split_whitespace().count();
    if got < min {
        bail!(
            "not enough arguments given to command '{}': expected a minimum of {}, got {}",
            cmd,
            min,
            got,
        )
    }
    if got > max {
        bail!(
            "too many arguments given to command '{}': expected a maximum of {}, got {}",
            cmd,
            max,
            got,
        )
    }
    Ok(())
}

/// The shell, reads from `R` and writes to `W`.
pub struct Repl<R, W> {
    ctx: Ctx,
    input: R,
    out: W,
    conf: Conf,
    /// True once the input is exhausted.
    eoi: bool,
}

/// ## Constructors
impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self::with_ctx(Ctx::new(), input, out, Conf::default())
    }
    pub fn with_ctx(ctx: Ctx, input: R, out: W, conf: Conf) -> Self {
        Self {
            ctx,
            input,
            out,
            conf,
            eoi: false,
        }
    }

    pub fn ctx(&self) -> &Ctx {
        &self.ctx
    }
    pub fn into_output(self) -> W {
        self.out
    }
}

/// ## Prompting
impl<R: BufRead, W: Write> Repl<R, W> {
    fn prompt(&mut self, prompt: &str) -> Res<()> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        Ok(())
    }

    /// Reads a trimmed line, `None` at the end of the input.
    fn read_line(&mut self) -> Res<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.eoi = true;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn reject(&mut self, line: &str, expected: &str) -> Res<()> {
        log::debug!("rejecting input `{}`, expected {}", line, expected);
        writeln!(self.out, "Error: \"{}\" is not a valid {}.", line, expected)?;
        Ok(())
    }

    /// Prompts until the answer is not blank.
    fn input(&mut self, prompt: &str) -> Res<String> {
        self.prompt(prompt)?;
        loop {
            match self.read_line()? {
                None => bail!("reached end of input"),
                Some(line) if line.is_empty() => self.prompt(prompt)?,
                Some(line) => return Ok(line),
            }
        }
    }

    /// Prompts once, the answer may be empty.
    fn input_opt(&mut self, prompt: &str) -> Res<String> {
        self.prompt(prompt)?;
        match self.read_line()? {
            None => bail!("reached end of input"),
            Some(line) => Ok(line),
        }
    }

    fn input_unsigned(&mut self, prompt: &str) -> Res<u32> {
        let mut line = self.input(prompt)?;
        loop {
            match line.parse::<u32>() {
                Ok(n) => return Ok(n),
                Err(_) => {
                    self.reject(&line, "unsigned integer")?;
                    line = self.input("Try again: ")?;
                }
            }
        }
    }

    /// Unsigned integer, `default` on empty answers.
    fn input_unsigned_or(&mut self, prompt: &str, default: i32) -> Res<i32> {
        let mut line = self.input_opt(prompt)?;
        loop {
            if line.is_empty() {
                return Ok(default);
            }
            match line.parse::<u32>().ok().and_then(|n| i32::try_from(n).ok()) {
                Some(n) => return Ok(n),
                None => {
                    self.reject(&line, "unsigned integer")?;
                    line = self.input_opt("Try again: ")?;
                }
            }
        }
    }

    /// Unsigned integer or text label, `None` on empty answers.
    fn input_label(&mut self, prompt: &str) -> Res<Option<Label>> {
        let line = self.input_opt(prompt)?;
        let label = match line.parse::<u32>() {
            Ok(n) => n.into_label(),
            Err(_) => line.into_label(),
        };
        Ok(label)
    }

    fn ask_yes_no(&mut self, question: &str) -> Res<bool> {
        let mut line = self.input(question)?;
        loop {
            match line.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => line = self.input("You must enter either 'Yes' or 'No': ")?,
            }
        }
    }

    fn report(&mut self, err: &Error) -> Res<()> {
        writeln!(self.out, "Error: {}", err)?;
        Ok(())
    }
}

/// ## Composite inputs
impl<R: BufRead, W: Write> Repl<R, W> {
    fn input_address(&mut self) -> Res<Address> {
        writeln!(
            self.out,
            "Address input: for any of the following prompts, enter nothing to skip that field."
        )?;
        let mut builder = Address::builder()
            .house(self.input_label("Enter the house number: ")?)
            .road(self.input_opt("Enter the road: ")?)
            .city(self.input_opt("Enter the city: ")?)
            .state(self.input_opt("Enter the state: ")?)
            .country(self.input_opt("Enter the country: ")?)
            .zip_code(self.input_unsigned_or("Enter the zip code: ", -1)?);
        if self.ask_yes_no("Do you want to input additional information? ")? {
            builder = builder
                .po_box(self.input_unsigned_or("Enter the PO Box number: ", -1)?)
                .apartment(self.input_label("Enter the apartment number: ")?)
                .floor(self.input_label("Enter the floor number: ")?)
                .suite(self.input_label("Enter the suite number: ")?)
                .room(self.input_label("Enter the room number: ")?);
        }
        Ok(builder.build())
    }

    /// Prompts for a species and a name, re-prompting on unknown species.
    ///
    /// The pet is not stored, see [`Ctx::add_pet`].
    fn input_pet(&mut self) -> Res<Pet> {
        let mut keyword = self.input("What type of pet do you want? ")?;
        let species = loop {
            match self.ctx.species().get(&keyword) {
                Ok(species) => break species,
                Err(err) => {
                    log::debug!("{}", err);
                    writeln!(
                        self.out,
                        "Error: unknown animal type \"{}\". Valid animal types are: {}",
                        keyword,
                        self.ctx.species().show_choices(),
                    )?;
                    keyword = self.input("Try again: ")?;
                }
            }
        };
        let prompt = format!("What shall be your {}'s name? ", keyword.to_lowercase());
        let name = self.input(&prompt)?;
        Ok(Pet::new(species, name))
    }

    /// Fills in `person`, returns the pets it should adopt once registered.
    fn setup_user(&mut self, person: &mut Person) -> Res<SmallVec<[Pet; 4]>> {
        let age = self.input_unsigned_or(
            "Enter the user's age (leave empty if unknown): ",
            Person::UNKNOWN_AGE,
        )?;
        person.set_age(age)?;
        if self.ask_yes_no("Does the user have a home? ")? {
            person.set_address(self.input_address()?);
        }
        let mut pets = smallvec![];
        if self.ask_yes_no("Do you want any pets? ")? {
            let count = self.input_unsigned("How many pets do you want? ")?;
            for _ in 0..count {
                pets.push(self.input_pet()?);
            }
        }
        writeln!(self.out, "User setup complete.")?;
        Ok(pets)
    }
}

/// ## Top-level commands
impl<R: BufRead, W: Write> Repl<R, W> {
    /// Runs the shell until `quit` or the end of the input.
    pub fn run(&mut self) -> Res<()> {
        if self.conf.banner {
            let banner = format!(
                "User Database Management System (UDMS) v{}",
                env!("CARGO_PKG_VERSION")
            );
            writeln!(self.out, "{}", banner)?;
            writeln!(self.out, "{:=<1$}", "", banner.len())?;
        }
        loop {
            let prompt = self.conf.prompt.clone();
            self.prompt(&prompt)?;
            let line = match self.read_line()? {
                Some(line) => line,
                None => break,
            };
            match self.command(&line) {
                Ok(Flow::Continue) => (),
                Ok(Flow::Quit) => break,
                Err(err) if self.eoi => {
                    log::warn!("input ended while running `{}`: {}", line, err);
                    break;
                }
                Err(err) => self.report(&err)?,
            }
            if self.eoi {
                break;
            }
        }
        writeln!(self.out, "Goodbye")?;
        Ok(())
    }

    fn command(&mut self, line: &str) -> Res<Flow> {
        let (cmd, args) = match split_command(line) {
            Some(split) => split,
            None => return Ok(Flow::Continue),
        };
        let cmd = cmd.to_lowercase();
        match cmd.as_str() {
            "add" => self.add(args)?,
            "remove" => self.remove(args)?,
            "list" => {
                check_argc(&cmd, args, 0)?;
                self.list()?
            }
            "modify" => self.modify(args)?,
            "help" => writeln!(self.out, "{}", HELP)?,
            "quit" | "exit" => {
                check_argc(&cmd, args, 0)?;
                return Ok(Flow::Quit);
            }
            _ => bail!("unknown command '{}'", cmd),
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self, name: &str) -> Res<()> {
        let name = if name.is_empty() {
            self.input("Enter a name for the new user: ")?
        } else {
            name.to_string()
        };
        if self.ctx.user_named(&name).is_some() {
            bail!("a user by that name already exists")
        }
        let mut person = Person::new(&name)?;
        let pets = self.setup_user(&mut person)?;
        let u_idx = self.ctx.add_user(person)?;
        for pet in pets {
            let p_idx = self.ctx.add_pet(pet);
            self.ctx.adopt(u_idx, p_idx)?;
        }
        writeln!(self.out, "Added {}.", self.ctx.user(u_idx)?.name())?;
        Ok(())
    }

    fn remove(&mut self, query: &str) -> Res<()> {
        let query = if query.is_empty() {
            self.input("Enter the user name to remove: ")?
        } else {
            query.to_string()
        };
        let matches = self.ctx.find_users(&query);
        match matches.len() {
            0 => writeln!(self.out, "There were no users matching your query.")?,
            1 => {
                let u_idx = matches[0];
                let name = self.ctx.user(u_idx)?.name().to_string();
                self.ctx.remove_user(u_idx);
                writeln!(self.out, "Removed {}.", name)?;
            }
            count => {
                writeln!(self.out, "There were {} users matching your query.", count)?;
                writeln!(self.out, "Which one(s) do you want to remove?")?;
                for (i, u_idx) in matches.iter().enumerate() {
                    let user = self.ctx.display_user(*u_idx)?;
                    writeln!(self.out, " {}. {}", i + 1, user)?;
                }
                let text = self.input("Enter some indices: ")?;
                let selection = Selection::parse(&text)?;
                let mut removed = 0;
                for (i, u_idx) in matches.iter().enumerate() {
                    if selection.contains(position(i)) {
                        let name = self.ctx.user(*u_idx)?.name().to_string();
                        self.ctx.remove_user(*u_idx);
                        removed += 1;
                        writeln!(self.out, "Removed {}.", name)?;
                    }
                }
                writeln!(self.out, "Removed {} user(s).", removed)?;
            }
        }
        Ok(())
    }

    fn list(&mut self) -> Res<()> {
        writeln!(self.out, "ALL USERS:")?;
        let pets = self.ctx.pets();
        for (_, person) in self.ctx.users() {
            writeln!(self.out, "{}", person.display(pets))?;
        }
        Ok(())
    }
}

/// ## User modification
impl<R: BufRead, W: Write> Repl<R, W> {
    fn modify(&mut self, name: &str) -> Res<()> {
        let name = if name.is_empty() {
            self.input("Enter the user name to modify: ")?
        } else {
            name.to_string()
        };
        let u_idx = self
            .ctx
            .user_named(&name)
            .ok_or_else(|| error!(@unknown("user") name))?;
        writeln!(
            self.out,
            "Now modifying user \"{}\". Enter 'done' to finish.",
            self.ctx.display_user(u_idx)?
        )?;
        loop {
            let prompt = format!("USER \"{}\"> ", self.ctx.user(u_idx)?.name());
            self.prompt(&prompt)?;
            let line = match self.read_line()? {
                Some(line) => line,
                None => break,
            };
            if line.eq_ignore_ascii_case("done") {
                break;
            }
            if let Err(err) = self.modify_command(u_idx, &line) {
                if self.eoi {
                    return Err(err);
                }
                self.report(&err)?
            }
        }
        writeln!(self.out, "Done modifying {}.", self.ctx.user(u_idx)?.name())?;
        Ok(())
    }

    fn modify_command(&mut self, u_idx: idx::User, line: &str) -> Res<()> {
        let (cmd, args) = match split_command(line) {
            Some(split) => split,
            None => return Ok(()),
        };
        let cmd = cmd.to_lowercase();
        match cmd.as_str() {
            "name" => self.rename(u_idx, args),
            "age" => {
                check_argc_range(&cmd, args, 0, 1)?;
                let age = match args {
                    "" => self.input_unsigned_or(
                        "Enter the user's age (leave empty if unknown): ",
                        Person::UNKNOWN_AGE,
                    )?,
                    age if age.eq_ignore_ascii_case("unknown") => Person::UNKNOWN_AGE,
                    age => age
                        .parse::<i32>()
                        .map_err(|_| error!(@unexpected("age (integer or `unknown`)") age))?,
                };
                self.ctx.user_mut(u_idx)?.set_age(age)?;
                writeln!(self.out, "{}", self.ctx.display_user(u_idx)?)?;
                Ok(())
            }
            "address" => {
                check_argc(&cmd, args, 0)?;
                let address = self.input_address()?;
                self.ctx.user_mut(u_idx)?.set_address(address);
                writeln!(self.out, "{}", self.ctx.display_user(u_idx)?)?;
                Ok(())
            }
            "homeless" => {
                check_argc(&cmd, args, 0)?;
                self.ctx.user_mut(u_idx)?.set_homeless();
                writeln!(self.out, "{}", self.ctx.display_user(u_idx)?)?;
                Ok(())
            }
            "pets" => {
                check_argc(&cmd, args, 0)?;
                self.list_pets(u_idx)
            }
            "pet" => {
                check_argc_range(&cmd, args, 1, usize::MAX)?;
                let (sub, sub_args) = split_command(args).unwrap_or(("", ""));
                match sub.to_lowercase().as_str() {
                    "add" => {
                        check_argc(&format!("{} {}", cmd, sub), sub_args, 0)?;
                        let pet = self.input_pet()?;
                        let p_idx = self.ctx.add_pet(pet);
                        self.ctx.adopt(u_idx, p_idx)?;
                        writeln!(self.out, "Adopted {}.", self.ctx[p_idx])?;
                        Ok(())
                    }
                    "remove" => self.remove_pets(u_idx, sub_args),
                    _ => bail!(@unknown("pet command") sub),
                }
            }
            "speak" => {
                check_argc(&cmd, args, 0)?;
                for (_, pet) in self.ctx.pets_of(u_idx)? {
                    write!(self.out, "{}: ", pet.name())?;
                    pet.speak_to(&mut self.out)?;
                }
                Ok(())
            }
            "show" => {
                check_argc(&cmd, args, 0)?;
                writeln!(self.out, "{}", self.ctx.display_user(u_idx)?)?;
                Ok(())
            }
            "help" => {
                writeln!(self.out, "{}", MODIFY_HELP)?;
                Ok(())
            }
            _ => bail!("unknown command '{}'", cmd),
        }
    }

    fn rename(&mut self, u_idx: idx::User, new_name: &str) -> Res<()> {
        let new_name = if new_name.is_empty() {
            self.input("Enter the new name: ")?
        } else {
            new_name.to_string()
        };
        match self.ctx.user_named(&new_name) {
            Some(other) if other != u_idx => bail!("a user by that name already exists"),
            _ => (),
        }
        self.ctx.user_mut(u_idx)?.set_name(&new_name)?;
        writeln!(self.out, "Renamed to {}.", self.ctx.user(u_idx)?.name())?;
        Ok(())
    }

    fn list_pets(&mut self, u_idx: idx::User) -> Res<()> {
        let pets = self.ctx.pets_of(u_idx)?;
        if pets.is_empty() {
            writeln!(self.out, "No pets.")?;
        }
        for (i, (_, pet)) in pets.iter().enumerate() {
            writeln!(self.out, " {}. {}", i + 1, pet)?;
        }
        Ok(())
    }

    fn remove_pets(&mut self, u_idx: idx::User, indices: &str) -> Res<()> {
        let pets: SmallVec<[idx::Pet; 4]> = self
            .ctx
            .pets_of(u_idx)?
            .iter()
            .map(|(p_idx, _)| *p_idx)
            .collect();
        if pets.is_empty() {
            bail!("user `{}` has no pets", self.ctx.user(u_idx)?.name())
        }
        let indices = if indices.is_empty() {
            self.list_pets(u_idx)?;
            self.input("Enter some indices: ")?
        } else {
            indices.to_string()
        };
        let selection = Selection::parse(&indices)?;
        let owned = self.ctx.user_mut(u_idx)?.pets_mut();
        let mut removed = 0;
        for (i, p_idx) in pets.iter().enumerate() {
            if selection.contains(position(i)) && owned.remove(p_idx) {
                removed += 1;
            }
        }
        writeln!(self.out, "Removed {} pet(s).", removed)?;
        Ok(())
    }
}
