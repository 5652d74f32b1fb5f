//! Add person command implementation.

use crate::error::CliError;
use crate::utils::{GlobalOptions, Session};
use amity::{Accommodation, Person, Role};
use clap::Args;

/// Add a person and allocate them rooms.
#[derive(Args)]
pub struct AddPersonCommand {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Role: fellow or staff
    #[arg(value_name = "ROLE")]
    pub role: Role,

    /// Whether a fellow wants a living space (Y or N)
    #[arg(value_name = "WANTS_ACCOMMODATION")]
    pub accommodation: Option<Accommodation>,
}

impl AddPersonCommand {
    /// Execute the add-person command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut session = Session::open(global)?;

        let name = format!("{} {}", self.first_name, self.last_name);
        let person = session
            .amity_mut()
            .add_person(&name, self.role, self.accommodation)?
            .clone();
        session.commit()?;

        if !global.quiet {
            print_outcome(&person);
        }
        Ok(())
    }
}

/// Report where a newly added person ended up.
fn print_outcome(person: &Person) {
    println!(
        "{} {} created successfully with id {}",
        person.role(),
        person.name(),
        person.id()
    );
    match person.office() {
        Some(office) => println!("Allocated office {office}"),
        None => println!("No vacant office to allocate"),
    }
    if person.wants_living_space() {
        match person.living_space() {
            Some(living_space) => println!("Allocated living space {living_space}"),
            None => println!("No vacant living space to allocate"),
        }
    }
}
