//! Roster container and the move operation
//!
//! The roster owns the immutable student records plus the mutable set of
//! teams produced by formation. It is exclusively owned by the interactive
//! session: there is no concurrent writer, and every mutation re-scores the
//! affected teams before returning.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RosterError;
use crate::roster::team::{Team, TeamNumber};
use crate::scoring::scorer::TeamScorer;
use crate::student::record::{StudentId, StudentRecord};

/// Result of a successful move
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The student that moved
    pub student: StudentId,
    /// Source team
    pub from: TeamNumber,
    /// Destination team
    pub to: TeamNumber,
    /// Fresh score of the source team
    pub from_score: f64,
    /// Fresh score of the destination team
    pub to_score: f64,
    /// True when source and destination were the same team
    pub no_op: bool,
}

/// A team flagged for review because its score fell under the threshold
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamWarning {
    /// The flagged team
    pub team: TeamNumber,
    /// Its current cached score
    pub score: f64,
    /// The threshold it fell under
    pub threshold: f64,
}

impl fmt::Display for TeamWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} compatibility score {:.3} is below {:.2}",
            self.team, self.score, self.threshold
        )
    }
}

/// The full set of teams for the current session
///
/// Teams are created by formation, mutated only through
/// [`move_student`](Roster::move_student), and frozen once the session
/// finalizes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    students: BTreeMap<StudentId, StudentRecord>,
    teams: Vec<Team>,
}

impl Roster {
    /// Assemble a roster from already-formed parts
    pub(crate) fn from_parts(
        students: BTreeMap<StudentId, StudentRecord>,
        teams: Vec<Team>,
    ) -> Self {
        Self { students, teams }
    }

    /// All teams, ascending team number
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Look up a team by number
    pub fn team(&self, number: TeamNumber) -> Option<&Team> {
        self.teams.iter().find(|team| team.number == number)
    }

    /// Look up a student record
    pub fn student(&self, id: &StudentId) -> Option<&StudentRecord> {
        self.students.get(id)
    }

    /// Number of teams
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Number of loaded student records
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Records for a team's members, in member order
    ///
    /// Ids without a record are skipped; formation never produces them.
    pub fn members_of(&self, team: &Team) -> Vec<&StudentRecord> {
        team.members
            .iter()
            .filter_map(|id| self.students.get(id))
            .collect()
    }

    fn team_index(&self, number: TeamNumber) -> Result<usize, RosterError> {
        self.teams
            .iter()
            .position(|team| team.number == number)
            .ok_or(RosterError::TeamNotFound(number))
    }

    fn compute_score(&self, index: usize, scorer: &dyn TeamScorer) -> f64 {
        let members = self.members_of(&self.teams[index]);
        scorer.score(&members)
    }

    /// Move a student between teams, re-scoring both sides
    ///
    /// Validation happens before any mutation: an invalid team number or a
    /// student missing from the source team leaves every team untouched.
    /// Moving a student onto their own team is a successful no-op. Project
    /// assignments never change here.
    pub fn move_student(
        &mut self,
        id: &StudentId,
        from: TeamNumber,
        to: TeamNumber,
        scorer: &dyn TeamScorer,
    ) -> Result<MoveOutcome, RosterError> {
        let from_index = self.team_index(from)?;
        let to_index = self.team_index(to)?;

        if !self.teams[from_index].contains(id) {
            return Err(RosterError::StudentNotFound {
                student: id.clone(),
                team: from,
            });
        }

        if from == to {
            return Ok(MoveOutcome {
                student: id.clone(),
                from,
                to,
                from_score: self.teams[from_index].cached_score,
                to_score: self.teams[to_index].cached_score,
                no_op: true,
            });
        }

        self.teams[from_index].remove_member(id);
        self.teams[to_index].add_member(id.clone());

        let from_score = self.compute_score(from_index, scorer);
        let to_score = self.compute_score(to_index, scorer);
        self.teams[from_index].cached_score = from_score;
        self.teams[to_index].cached_score = to_score;

        debug!(student = %id, %from, %to, from_score, to_score, "moved student");

        Ok(MoveOutcome {
            student: id.clone(),
            from,
            to,
            from_score,
            to_score,
            no_op: false,
        })
    }

    /// Recompute every team's cached score
    pub fn rescore_all(&mut self, scorer: &dyn TeamScorer) {
        for index in 0..self.teams.len() {
            let score = self.compute_score(index, scorer);
            self.teams[index].cached_score = score;
        }
        debug!(teams = self.teams.len(), "re-scored all teams");
    }

    /// Teams whose cached score falls under `threshold`
    pub fn warnings(&self, threshold: f64) -> Vec<TeamWarning> {
        self.teams
            .iter()
            .filter(|team| team.cached_score < threshold)
            .map(|team| TeamWarning {
                team: team.number,
                score: team.cached_score,
                threshold,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::scorer::WeightedScorer;
    use crate::scoring::weights::ScoringWeights;

    fn record(id: &str, teammates: &[&str]) -> StudentRecord {
        StudentRecord::new(id).with_teammates(teammates.iter().copied())
    }

    fn roster_of(teams: &[&[&str]]) -> Roster {
        let mut students = BTreeMap::new();
        let mut built = Vec::new();
        for (i, members) in teams.iter().enumerate() {
            let mut team = Team::new(TeamNumber(i + 1));
            for id in *members {
                students.insert(StudentId::from(*id), record(id, &[]));
                team.add_member(StudentId::from(*id));
            }
            built.push(team);
        }
        Roster::from_parts(students, built)
    }

    fn scorer() -> WeightedScorer {
        WeightedScorer::new(ScoringWeights::default(), 3)
    }

    #[test]
    fn test_move_between_teams() {
        let mut roster = roster_of(&[&["Ann", "Bob"], &["Cal", "Dee"], &["Eve"]]);
        let before_third = roster.team(TeamNumber(3)).unwrap().clone();

        let outcome = roster
            .move_student(&StudentId::from("Ann"), TeamNumber(1), TeamNumber(2), &scorer())
            .unwrap();

        assert!(!outcome.no_op);
        assert!(!roster.team(TeamNumber(1)).unwrap().contains(&StudentId::from("Ann")));
        assert!(roster.team(TeamNumber(2)).unwrap().contains(&StudentId::from("Ann")));
        assert_eq!(roster.team(TeamNumber(3)).unwrap(), &before_third);
    }

    #[test]
    fn test_move_rescores_both_teams() {
        // Mutual preferences make scores move when the pair is separated.
        let mut students = BTreeMap::new();
        students.insert(StudentId::from("Ann"), record("Ann", &["Bob"]));
        students.insert(StudentId::from("Bob"), record("Bob", &["Ann"]));
        students.insert(StudentId::from("Cal"), record("Cal", &[]));

        let mut team1 = Team::new(TeamNumber(1));
        team1.add_member(StudentId::from("Ann"));
        team1.add_member(StudentId::from("Bob"));
        let mut team2 = Team::new(TeamNumber(2));
        team2.add_member(StudentId::from("Cal"));

        let mut roster = Roster::from_parts(students, vec![team1, team2]);
        let scorer = scorer();
        roster.rescore_all(&scorer);
        let before_1 = roster.team(TeamNumber(1)).unwrap().cached_score;

        let outcome = roster
            .move_student(&StudentId::from("Bob"), TeamNumber(1), TeamNumber(2), &scorer)
            .unwrap();

        // Team 1 lost its mutual pair; team 2 gained a one-sided pairing.
        assert!(outcome.from_score < before_1);
        assert_eq!(
            roster.team(TeamNumber(1)).unwrap().cached_score,
            outcome.from_score
        );
        assert_eq!(
            roster.team(TeamNumber(2)).unwrap().cached_score,
            outcome.to_score
        );
    }

    #[test]
    fn test_move_unknown_student() {
        let mut roster = roster_of(&[&["Ann"], &["Bob"]]);
        let before = roster.clone();

        let err = roster
            .move_student(&StudentId::from("Zed"), TeamNumber(1), TeamNumber(2), &scorer())
            .unwrap_err();

        assert_eq!(
            err,
            RosterError::StudentNotFound {
                student: StudentId::from("Zed"),
                team: TeamNumber(1),
            }
        );
        assert_eq!(roster, before);
    }

    #[test]
    fn test_move_unknown_team() {
        let mut roster = roster_of(&[&["Ann"], &["Bob"]]);
        let before = roster.clone();

        let err = roster
            .move_student(&StudentId::from("Ann"), TeamNumber(1), TeamNumber(9), &scorer())
            .unwrap_err();

        assert_eq!(err, RosterError::TeamNotFound(TeamNumber(9)));
        assert_eq!(roster, before);
    }

    #[test]
    fn test_move_same_team_is_noop() {
        let mut roster = roster_of(&[&["Ann", "Bob"], &["Cal"]]);
        let before = roster.clone();

        let outcome = roster
            .move_student(&StudentId::from("Ann"), TeamNumber(1), TeamNumber(1), &scorer())
            .unwrap();

        assert!(outcome.no_op);
        assert_eq!(roster, before);
    }

    #[test]
    fn test_warnings_threshold() {
        let mut roster = roster_of(&[&["Ann"], &["Bob"]]);
        roster.teams[0].cached_score = 0.2;
        roster.teams[1].cached_score = 0.8;

        let warnings = roster.warnings(0.45);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].team, TeamNumber(1));
        assert_eq!(
            warnings[0].to_string(),
            "Team 1 compatibility score 0.200 is below 0.45"
        );
    }
}
