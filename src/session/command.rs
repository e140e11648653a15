//! Session commands
//!
//! The interactive loop drives the session with [`Command`] values. The
//! parser accepts the terminal command language (single letters and long
//! forms); rendering prompts and reading lines is the application's job.

use serde::{Deserialize, Serialize};

use crate::error::CommandParseError;
use crate::roster::team::TeamNumber;
use crate::student::record::StudentId;

/// A command issued against an open session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// List every team with members and cached score
    List,
    /// Move one student between teams
    Move {
        /// The student to move
        student: StudentId,
        /// Team the student currently belongs to
        from: TeamNumber,
        /// Destination team
        to: TeamNumber,
    },
    /// Re-score every team and show the score table
    ShowScores,
    /// Show teams under the warning threshold
    Warnings,
    /// Freeze the roster and export the report
    Finalize,
    /// Abandon the session without exporting
    Quit,
}

impl Command {
    /// Parse a command line
    ///
    /// Accepted forms (case-insensitive command word):
    /// `l`/`list`, `m`/`move <student> <from> <to>`, `s`/`scores`,
    /// `w`/`warnings`, `d`/`done`/`finalize`, `q`/`quit`. Student names may
    /// contain spaces; the last two tokens of a move are the team numbers.
    pub fn parse(line: &str) -> Result<Self, CommandParseError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((word, args)) = tokens.split_first() else {
            return Err(CommandParseError::Unknown(String::new()));
        };

        match word.to_ascii_lowercase().as_str() {
            "l" | "list" => Ok(Self::List),
            "s" | "scores" => Ok(Self::ShowScores),
            "w" | "warnings" => Ok(Self::Warnings),
            "d" | "done" | "finalize" => Ok(Self::Finalize),
            "q" | "quit" => Ok(Self::Quit),
            "m" | "move" => parse_move(args),
            other => Err(CommandParseError::Unknown(other.to_string())),
        }
    }
}

fn parse_move(args: &[&str]) -> Result<Command, CommandParseError> {
    const USAGE: &str = "move <student> <from-team> <to-team>";
    if args.len() < 3 {
        return Err(CommandParseError::MissingArguments {
            command: "move",
            usage: USAGE,
        });
    }

    // The last two tokens are from/to; everything before them is the name.
    let name_tokens = &args[..args.len() - 2];
    let student = StudentId::from(name_tokens.join(" "));
    let from = parse_team(args[args.len() - 2])?;
    let to = parse_team(args[args.len() - 1])?;

    Ok(Command::Move { student, from, to })
}

fn parse_team(token: &str) -> Result<TeamNumber, CommandParseError> {
    match token.parse::<usize>() {
        Ok(number) if number >= 1 => Ok(TeamNumber(number)),
        _ => Err(CommandParseError::InvalidTeamNumber(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_forms() {
        assert_eq!(Command::parse("l").unwrap(), Command::List);
        assert_eq!(Command::parse("s").unwrap(), Command::ShowScores);
        assert_eq!(Command::parse("w").unwrap(), Command::Warnings);
        assert_eq!(Command::parse("d").unwrap(), Command::Finalize);
        assert_eq!(Command::parse("q").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_long_forms() {
        assert_eq!(Command::parse("LIST").unwrap(), Command::List);
        assert_eq!(Command::parse("finalize").unwrap(), Command::Finalize);
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(
            Command::parse("m Ann 1 2").unwrap(),
            Command::Move {
                student: StudentId::from("Ann"),
                from: TeamNumber(1),
                to: TeamNumber(2),
            }
        );
    }

    #[test]
    fn test_parse_move_with_spaced_name() {
        assert_eq!(
            Command::parse("move Ann Lee 1 2").unwrap(),
            Command::Move {
                student: StudentId::from("Ann Lee"),
                from: TeamNumber(1),
                to: TeamNumber(2),
            }
        );
    }

    #[test]
    fn test_parse_move_missing_arguments() {
        let err = Command::parse("m Ann 1").unwrap_err();
        assert!(matches!(err, CommandParseError::MissingArguments { .. }));
    }

    #[test]
    fn test_parse_move_bad_team_number() {
        let err = Command::parse("m Ann one 2").unwrap_err();
        assert_eq!(err, CommandParseError::InvalidTeamNumber("one".to_string()));

        let err = Command::parse("m Ann 0 2").unwrap_err();
        assert_eq!(err, CommandParseError::InvalidTeamNumber("0".to_string()));
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = Command::parse("fly").unwrap_err();
        assert_eq!(err, CommandParseError::Unknown("fly".to_string()));
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(Command::parse("   ").is_err());
    }
}
