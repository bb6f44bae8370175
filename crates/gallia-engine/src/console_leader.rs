//! Leader source reading menu choices from a console.
//!
//! The chief of each place is shown a numbered menu and answers with a
//! number. Recruit and transfer ask a follow-up question. An unreadable
//! answer is asked again; end of input means the chief passes.

use std::io::{BufRead, Write};

use gallia_core::leader::{DecisionError, LeaderAction, LeaderActionSource, LeaderPrompt};
use gallia_types::Role;

/// Roles offered by the recruit menu.
const RECRUITABLE: [Role; 11] = [
    Role::Warrior,
    Role::Druid,
    Role::Blacksmith,
    Role::Innkeeper,
    Role::Merchant,
    Role::Legionary,
    Role::Prefect,
    Role::General,
    Role::Lycanthrope,
    Role::Centaur,
    Role::Unicorn,
];

const MENU: &str = "\
  1) heal team
  2) feed team
  3) inspect place
  4) distribute potion
  5) recruit
  6) transfer a resident
  0) pass
";

/// A leader answering from `input` and writing its menus to `output`.
pub struct ConsoleLeader<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleLeader<R, W> {
    /// Create a console leader over the given streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one trimmed line. `None` at end of input.
    fn ask(&mut self, question: &str) -> Result<Option<String>, DecisionError> {
        write!(self.output, "{question}> ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    /// Ask until the answer is a number below `limit`.
    fn ask_index(&mut self, question: &str, limit: usize) -> Result<Option<usize>, DecisionError> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(index) if index < limit => return Ok(Some(index)),
                _ => writeln!(self.output, "Invalid choice '{answer}'")?,
            }
        }
    }

    /// Pick one entry from a listed menu. `None` if the list is empty or
    /// the input ends.
    fn pick(&mut self, title: &str, entries: &[String]) -> Result<Option<usize>, DecisionError> {
        if entries.is_empty() {
            writeln!(self.output, "Nothing to choose from")?;
            return Ok(None);
        }
        writeln!(self.output, "{title}")?;
        for (index, entry) in entries.iter().enumerate() {
            writeln!(self.output, "  {index}) {entry}")?;
        }
        self.ask_index("", entries.len())
    }

    fn recruit(&mut self) -> Result<Option<LeaderAction>, DecisionError> {
        let entries: Vec<String> = RECRUITABLE.iter().map(|role| format!("{role:?}")).collect();
        let picked = self.pick("Recruit which role?", &entries)?;
        Ok(picked
            .and_then(|index| RECRUITABLE.get(index).copied())
            .map(LeaderAction::Recruit))
    }

    fn transfer(
        &mut self,
        prompt: &LeaderPrompt<'_>,
    ) -> Result<Option<LeaderAction>, DecisionError> {
        let residents: Vec<_> = prompt.place.living_characters().collect();
        let entries: Vec<String> = residents
            .iter()
            .map(|c| format!("{} ({:?}, health {})", c.name, c.role, c.health))
            .collect();
        let Some(character) = self
            .pick("Transfer whom?", &entries)?
            .and_then(|index| residents.get(index))
            .map(|c| c.id)
        else {
            return Ok(None);
        };

        let entries: Vec<String> = prompt
            .destinations
            .iter()
            .map(|d| format!("{} ({:?})", d.name, d.kind))
            .collect();
        let destination = self
            .pick("Where to?", &entries)?
            .and_then(|index| prompt.destinations.get(index))
            .map(|d| d.id);
        Ok(destination.map(|destination| LeaderAction::Transfer {
            character,
            destination,
        }))
    }
}

impl<R: BufRead, W: Write> LeaderActionSource for ConsoleLeader<R, W> {
    fn choose(&mut self, prompt: &LeaderPrompt<'_>) -> Result<LeaderAction, DecisionError> {
        let chief = prompt.place.chief().map_or("the chief", |c| c.name.as_str());
        writeln!(
            self.output,
            "\nRound {} -- {} speaking for {} ({} action(s) left)",
            prompt.round, chief, prompt.place.name, prompt.actions_left
        )?;
        write!(self.output, "{MENU}")?;

        let action = match self.ask_index("", 7)? {
            None | Some(0) => Some(LeaderAction::Pass),
            Some(1) => Some(LeaderAction::HealTeam),
            Some(2) => Some(LeaderAction::FeedTeam),
            Some(3) => Some(LeaderAction::InspectPlace),
            Some(4) => Some(LeaderAction::DistributePotion),
            Some(5) => self.recruit()?,
            Some(_) => self.transfer(prompt)?,
        };
        Ok(action.unwrap_or(LeaderAction::Pass))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use gallia_core::leader::Destination;
    use gallia_types::{Character, CharacterId, CharacterStats, Gender, PlaceId, PlaceKind};
    use gallia_world::Place;

    use super::*;

    fn village() -> Place {
        let mut place = Place::new(PlaceId(1), "Armorica", PlaceKind::GaulishVillage, 100);
        place
            .add_character(Character::new(
                CharacterId(7),
                "Asterix",
                Gender::Male,
                Role::Warrior,
                CharacterStats {
                    height_cm: 115,
                    age: 35,
                    strength: 55,
                    endurance: 45,
                    health: 100,
                    belligerence: 80,
                },
            ))
            .unwrap();
        place
    }

    fn answer(input: &str, place: &Place, destinations: &[Destination]) -> LeaderAction {
        let mut leader = ConsoleLeader::new(Cursor::new(input.to_owned()), Vec::new());
        let prompt = LeaderPrompt {
            round: 1,
            place,
            actions_taken: 0,
            actions_left: 3,
            destinations,
        };
        leader.choose(&prompt).unwrap()
    }

    #[test]
    fn simple_choices() {
        let place = village();
        assert_eq!(answer("1\n", &place, &[]), LeaderAction::HealTeam);
        assert_eq!(answer("4\n", &place, &[]), LeaderAction::DistributePotion);
        assert_eq!(answer("0\n", &place, &[]), LeaderAction::Pass);
    }

    #[test]
    fn invalid_answers_are_asked_again() {
        let place = village();
        assert_eq!(answer("nine\n42\n2\n", &place, &[]), LeaderAction::FeedTeam);
    }

    #[test]
    fn end_of_input_passes() {
        let place = village();
        assert_eq!(answer("", &place, &[]), LeaderAction::Pass);
        assert_eq!(answer("5\n", &place, &[]), LeaderAction::Pass);
    }

    #[test]
    fn recruit_asks_for_a_role() {
        let place = village();
        assert_eq!(answer("5\n1\n", &place, &[]), LeaderAction::Recruit(Role::Druid));
    }

    #[test]
    fn transfer_asks_whom_and_where() {
        let place = village();
        let destinations = [Destination {
            id: PlaceId(5),
            name: "Gergovia plain".into(),
            kind: PlaceKind::Battlefield,
        }];
        assert_eq!(
            answer("6\n0\n0\n", &place, &destinations),
            LeaderAction::Transfer {
                character: CharacterId(7),
                destination: PlaceId(5),
            }
        );
        assert_eq!(answer("6\n0\n", &place, &[]), LeaderAction::Pass);
    }
}
