//! Interactive session state machine
//!
//! Wraps the roster with the command loop's state: `Proposed` after
//! formation, `Editing` once the first command lands, and the terminal
//! `Finalized` (report exported) or `Aborted` (nothing exported). Commands
//! run synchronously (each one completes, including re-scoring, before
//! the next is accepted) and the session is the roster's only owner.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::MatcherConfig;
use crate::error::SessionError;
use crate::roster::project::ProjectId;
use crate::roster::roster::{MoveOutcome, Roster, TeamWarning};
use crate::roster::team::TeamNumber;
use crate::scoring::scorer::WeightedScorer;
use crate::session::command::Command;
use crate::session::export::{ReportSink, TeamReport};
use crate::student::record::StudentId;

/// Lifecycle phase of a session
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Post-formation, no command executed yet
    Proposed,
    /// At least one command executed
    Editing,
    /// Terminal: roster frozen, report exported
    Finalized,
    /// Terminal: session abandoned, nothing exported
    Aborted,
}

impl SessionPhase {
    /// Terminal phases accept no further commands
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finalized | Self::Aborted)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            Self::Proposed => "proposed",
            Self::Editing => "editing",
            Self::Finalized => "finalized",
            Self::Aborted => "aborted",
        };
        write!(f, "{phase}")
    }
}

/// One row of the `list` output
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamListing {
    /// Team number
    pub team: TeamNumber,
    /// Assigned project
    pub project: Option<ProjectId>,
    /// Member ids, in member order
    pub members: Vec<StudentId>,
    /// Cached compatibility score
    pub score: f64,
}

/// One row of the score table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamScoreRow {
    /// Team number
    pub team: TeamNumber,
    /// Freshly computed score
    pub score: f64,
}

/// What a command produced
#[derive(Clone, Debug, PartialEq)]
pub enum CommandOutput {
    /// `list`: every team with members and cached score
    Listing(Vec<TeamListing>),
    /// `move`: the mutation result plus post-move warnings for the two
    /// affected teams
    Moved {
        /// Updated team pair and fresh scores
        outcome: MoveOutcome,
        /// Warnings the move created on either affected team
        warnings: Vec<TeamWarning>,
    },
    /// `scores`: the full table after a forced re-score
    ScoreTable(Vec<TeamScoreRow>),
    /// `warnings`: teams under the configured threshold
    Warnings(Vec<TeamWarning>),
    /// `finalize`: the exported report
    Finalized(TeamReport),
    /// `quit`: acknowledged, nothing exported
    Aborted,
}

/// The interactive session
///
/// Owns the roster, the scorer, the configuration, and the report sink.
pub struct MatchSession<S: ReportSink> {
    roster: Roster,
    scorer: WeightedScorer,
    config: MatcherConfig,
    sink: S,
    phase: SessionPhase,
}

impl<S: ReportSink> MatchSession<S> {
    /// Start a session over a freshly formed roster
    pub fn new(roster: Roster, config: MatcherConfig, sink: S) -> Self {
        let scorer = WeightedScorer::new(config.weights, config.top_choices);
        Self {
            roster,
            scorer,
            config,
            sink,
            phase: SessionPhase::Proposed,
        }
    }

    /// Current phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Read access to the roster
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Read access to the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the session, returning the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Execute one command
    ///
    /// Terminal phases reject everything with [`SessionError::Closed`]. A
    /// failed command (bad move, failed export) leaves the phase and the
    /// roster unchanged; a failed export may simply be retried.
    pub fn execute(&mut self, command: Command) -> Result<CommandOutput, SessionError> {
        if self.phase.is_terminal() {
            return Err(SessionError::Closed(self.phase));
        }

        let output = self.dispatch(command)?;
        if self.phase == SessionPhase::Proposed {
            self.phase = SessionPhase::Editing;
        }
        Ok(output)
    }

    fn dispatch(&mut self, command: Command) -> Result<CommandOutput, SessionError> {
        match command {
            Command::List => Ok(CommandOutput::Listing(self.listing())),
            Command::ShowScores => {
                self.roster.rescore_all(&self.scorer);
                Ok(CommandOutput::ScoreTable(
                    self.roster
                        .teams()
                        .iter()
                        .map(|team| TeamScoreRow {
                            team: team.number,
                            score: team.cached_score,
                        })
                        .collect(),
                ))
            }
            Command::Warnings => Ok(CommandOutput::Warnings(
                self.roster.warnings(self.config.warning_threshold),
            )),
            Command::Move { student, from, to } => {
                let outcome = self
                    .roster
                    .move_student(&student, from, to, &self.scorer)?;
                let warnings = self.affected_warnings(&outcome);
                for warning in &warnings {
                    warn!(%warning, "low score after move");
                }
                Ok(CommandOutput::Moved { outcome, warnings })
            }
            Command::Finalize => {
                // The report must never carry a stale score.
                self.roster.rescore_all(&self.scorer);
                let report = TeamReport::from_roster(&self.roster, Utc::now());
                if let Err(error) = self.sink.export(&report) {
                    warn!(%error, "export failed; session stays open");
                    return Err(error.into());
                }
                self.phase = SessionPhase::Finalized;
                info!(teams = report.teams.len(), "session finalized");
                Ok(CommandOutput::Finalized(report))
            }
            Command::Quit => {
                self.phase = SessionPhase::Aborted;
                info!("session aborted; nothing exported");
                Ok(CommandOutput::Aborted)
            }
        }
    }

    fn listing(&self) -> Vec<TeamListing> {
        self.roster
            .teams()
            .iter()
            .map(|team| TeamListing {
                team: team.number,
                project: team.project.clone(),
                members: team.members.clone(),
                score: team.cached_score,
            })
            .collect()
    }

    fn affected_warnings(&self, outcome: &MoveOutcome) -> Vec<TeamWarning> {
        let threshold = self.config.warning_threshold;
        [
            (outcome.from, outcome.from_score),
            (outcome.to, outcome.to_score),
        ]
        .into_iter()
        .filter(|(_, score)| *score < threshold)
        .map(|(team, score)| TeamWarning {
            team,
            score,
            threshold,
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExportError, RosterError};
    use crate::formation::form_teams;
    use crate::roster::project::Project;
    use crate::session::export::JsonReportSink;
    use crate::student::record::StudentRecord;

    /// Sink that counts exports and can be told to fail
    #[derive(Default)]
    struct RecordingSink {
        exports: usize,
        fail_next: bool,
    }

    impl ReportSink for RecordingSink {
        fn export(&mut self, _report: &TeamReport) -> Result<(), ExportError> {
            if self.fail_next {
                self.fail_next = false;
                return Err(ExportError::Sink("unreachable".to_string()));
            }
            self.exports += 1;
            Ok(())
        }
    }

    fn sample_session<S: ReportSink>(sink: S) -> MatchSession<S> {
        let students: Vec<StudentRecord> = (0..6)
            .map(|i| StudentRecord::new(format!("S{i}")))
            .collect();
        let projects: Vec<Project> = (0..3)
            .map(|i| Project::new(format!("p{i}"), format!("Project {i}")))
            .collect();
        let config = MatcherConfig::default();
        let scorer = WeightedScorer::new(config.weights, config.top_choices);
        let roster = form_teams(&students, &projects, 3, &scorer).unwrap();
        MatchSession::new(roster, config, sink)
    }

    #[test]
    fn test_first_command_moves_to_editing() {
        let mut session = sample_session(RecordingSink::default());
        assert_eq!(session.phase(), SessionPhase::Proposed);

        session.execute(Command::List).unwrap();
        assert_eq!(session.phase(), SessionPhase::Editing);
    }

    #[test]
    fn test_list_reports_every_team() {
        let mut session = sample_session(RecordingSink::default());
        let output = session.execute(Command::List).unwrap();

        let CommandOutput::Listing(rows) = output else {
            panic!("expected listing");
        };
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.project.is_some()));
    }

    #[test]
    fn test_move_command_updates_roster() {
        let mut session = sample_session(RecordingSink::default());
        let student = session.roster().teams()[0].members[0].clone();

        let output = session
            .execute(Command::Move {
                student: student.clone(),
                from: TeamNumber(1),
                to: TeamNumber(2),
            })
            .unwrap();

        let CommandOutput::Moved { outcome, .. } = output else {
            panic!("expected move outcome");
        };
        assert_eq!(outcome.student, student);
        assert!(session.roster().team(TeamNumber(2)).unwrap().contains(&student));
    }

    #[test]
    fn test_failed_move_is_recoverable() {
        let mut session = sample_session(RecordingSink::default());

        let err = session
            .execute(Command::Move {
                student: StudentId::from("Zed"),
                from: TeamNumber(1),
                to: TeamNumber(2),
            })
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::Roster(RosterError::StudentNotFound { .. })
        ));
        // The session stays open and usable.
        assert!(session.execute(Command::List).is_ok());
    }

    #[test]
    fn test_finalize_exports_exactly_once() {
        let mut session = sample_session(RecordingSink::default());
        session.execute(Command::List).unwrap();

        let output = session.execute(Command::Finalize).unwrap();
        assert!(matches!(output, CommandOutput::Finalized(_)));
        assert_eq!(session.phase(), SessionPhase::Finalized);

        let err = session.execute(Command::List).unwrap_err();
        assert_eq!(err, SessionError::Closed(SessionPhase::Finalized));

        assert_eq!(session.into_sink().exports, 1);
    }

    #[test]
    fn test_quit_exports_nothing() {
        let mut session = sample_session(RecordingSink::default());
        let output = session.execute(Command::Quit).unwrap();

        assert_eq!(output, CommandOutput::Aborted);
        assert_eq!(session.phase(), SessionPhase::Aborted);

        let err = session.execute(Command::Finalize).unwrap_err();
        assert_eq!(err, SessionError::Closed(SessionPhase::Aborted));

        assert_eq!(session.into_sink().exports, 0);
    }

    #[test]
    fn test_failed_export_keeps_session_open() {
        let sink = RecordingSink {
            exports: 0,
            fail_next: true,
        };
        let mut session = sample_session(sink);

        let err = session.execute(Command::Finalize).unwrap_err();
        assert!(matches!(err, SessionError::Export(_)));
        assert!(!session.phase().is_terminal());

        // Retry succeeds and closes the session.
        session.execute(Command::Finalize).unwrap();
        assert_eq!(session.phase(), SessionPhase::Finalized);
        assert_eq!(session.into_sink().exports, 1);
    }

    #[test]
    fn test_show_scores_rescores_all_teams() {
        let mut session = sample_session(RecordingSink::default());
        let output = session.execute(Command::ShowScores).unwrap();

        let CommandOutput::ScoreTable(rows) = output else {
            panic!("expected score table");
        };
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| (0.0..=1.0).contains(&row.score)));
    }

    #[test]
    fn test_json_sink_session_renders_report() {
        let mut session = sample_session(JsonReportSink::new());
        session.execute(Command::Finalize).unwrap();
        let sink = session.into_sink();
        assert!(sink.rendered().is_some());
    }
}
