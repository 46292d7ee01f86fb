//! Text command parsing.
//!
//! A command is a verb optionally followed by one argument, separated by
//! whitespace. Verbs are case-insensitive. Extra tokens after a non-indexed
//! verb are ignored; an indexed verb needs exactly one numeric argument.

use std::str::FromStr;

use strum::EnumString;

use game_core::CardinalDirection;
use runtime::{HeroView, Intent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Act(Intent),
    View(HeroView),
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command")]
    Unknown,

    #[error("Invalid argument")]
    InvalidArgument,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Verb {
    Up,
    Down,
    Left,
    Right,
    Backpack,
    Stats,
    Use,
    Remove,
    Swap,
    Fight,
    Quit,
}

fn index(argument: Option<&str>) -> Result<usize, CommandError> {
    argument
        .and_then(|value| value.parse().ok())
        .ok_or(CommandError::InvalidArgument)
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let verb: Verb = tokens
            .first()
            .and_then(|word| word.parse().ok())
            .ok_or(CommandError::Unknown)?;
        let argument = match tokens.as_slice() {
            [_, argument] => Some(*argument),
            _ => None,
        };

        let command = match verb {
            Verb::Up => Command::Act(Intent::Move(CardinalDirection::Up)),
            Verb::Down => Command::Act(Intent::Move(CardinalDirection::Down)),
            Verb::Left => Command::Act(Intent::Move(CardinalDirection::Left)),
            Verb::Right => Command::Act(Intent::Move(CardinalDirection::Right)),
            Verb::Backpack => Command::View(HeroView::Backpack),
            Verb::Stats => Command::View(HeroView::Stats),
            Verb::Use => Command::Act(Intent::Use {
                index: index(argument)?,
            }),
            Verb::Remove => Command::Act(Intent::Remove {
                index: index(argument)?,
            }),
            Verb::Swap => Command::Act(Intent::Swap {
                index: index(argument)?,
            }),
            Verb::Fight => Command::Act(Intent::Fight),
            Verb::Quit => Command::Quit,
        };
        Ok(command)
    }
}
