//! Team formation
//!
//! One-time partitioning of the loaded students into K teams, each with a
//! distinct project. The algorithm is a heuristic: it optimizes locally
//! (reciprocal pairs together, level sizes, best aggregated project fit)
//! and makes no claim of global optimality. It is fully deterministic:
//! identical input ordering and identical weights reproduce the identical
//! roster.

mod projects;
mod seeding;

use std::collections::BTreeMap;

use tracing::info;

use crate::error::FormationError;
use crate::roster::project::Project;
use crate::roster::roster::Roster;
use crate::roster::team::{Team, TeamNumber};
use crate::scoring::scorer::TeamScorer;
use crate::student::record::StudentRecord;

/// Partition students into `team_count` teams, each with a distinct project
///
/// Preconditions are checked before any team exists: `team_count >= 1`,
/// `projects.len() >= team_count`, and a non-empty student list. With fewer
/// students than requested teams, fewer (non-empty) teams are formed, a
/// degraded but defined case.
pub fn form_teams(
    students: &[StudentRecord],
    projects: &[Project],
    team_count: usize,
    scorer: &dyn TeamScorer,
) -> Result<Roster, FormationError> {
    if team_count == 0 {
        return Err(FormationError::InvalidTeamCount(team_count));
    }
    if projects.len() < team_count {
        return Err(FormationError::InsufficientProjects {
            projects: projects.len(),
            teams: team_count,
        });
    }
    if students.is_empty() {
        return Err(FormationError::NoStudents);
    }

    let effective = team_count.min(students.len());
    let records: BTreeMap<_, _> = students
        .iter()
        .map(|record| (record.id.clone(), record.clone()))
        .collect();

    let member_lists = seeding::partition(students, effective);
    let assigned = projects::assign(&member_lists, &records, projects);

    let teams: Vec<Team> = member_lists
        .into_iter()
        .zip(assigned)
        .enumerate()
        .map(|(index, (members, project))| {
            let mut team = Team::new(TeamNumber(index + 1));
            for id in members {
                team.add_member(id);
            }
            team.project = Some(project);
            team
        })
        .collect();

    let mut roster = Roster::from_parts(records, teams);
    roster.rescore_all(scorer);

    info!(
        students = students.len(),
        teams = effective,
        requested = team_count,
        "formed initial roster"
    );
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::project::ProjectId;
    use crate::scoring::scorer::WeightedScorer;
    use crate::scoring::weights::ScoringWeights;

    fn scorer() -> WeightedScorer {
        WeightedScorer::new(ScoringWeights::default(), 3)
    }

    fn students(count: usize) -> Vec<StudentRecord> {
        (0..count)
            .map(|i| StudentRecord::new(format!("S{i}")))
            .collect()
    }

    fn projects(count: usize) -> Vec<Project> {
        (0..count)
            .map(|i| Project::new(format!("p{i}"), format!("Project {i}")))
            .collect()
    }

    #[test]
    fn test_thirty_students_five_teams() {
        let roster = form_teams(&students(30), &projects(5), 5, &scorer()).unwrap();

        assert_eq!(roster.team_count(), 5);
        let sizes: Vec<usize> = roster.teams().iter().map(Team::len).collect();
        assert!(sizes.iter().all(|&size| size == 6));
        assert!(roster.teams().iter().all(|team| !team.is_empty()));

        let mut ids: Vec<&ProjectId> = roster
            .teams()
            .iter()
            .map(|team| team.project.as_ref().unwrap())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_insufficient_projects_fails_before_partition() {
        let err = form_teams(&students(30), &projects(5), 6, &scorer()).unwrap_err();
        assert_eq!(
            err,
            FormationError::InsufficientProjects {
                projects: 5,
                teams: 6,
            }
        );
    }

    #[test]
    fn test_zero_team_count_rejected() {
        let err = form_teams(&students(4), &projects(4), 0, &scorer()).unwrap_err();
        assert_eq!(err, FormationError::InvalidTeamCount(0));
    }

    #[test]
    fn test_no_students_rejected() {
        let err = form_teams(&[], &projects(3), 2, &scorer()).unwrap_err();
        assert_eq!(err, FormationError::NoStudents);
    }

    #[test]
    fn test_fewer_students_than_teams_forms_singletons() {
        let roster = form_teams(&students(3), &projects(5), 5, &scorer()).unwrap();

        assert_eq!(roster.team_count(), 3);
        assert!(roster.teams().iter().all(|team| team.len() == 1));
    }

    #[test]
    fn test_formation_is_deterministic() {
        let students: Vec<StudentRecord> = (0..24)
            .map(|i| {
                StudentRecord::new(format!("S{i}"))
                    .with_teammates([format!("S{}", i ^ 1)])
                    .with_projects([format!("p{}", i % 6)])
                    .with_skills([format!("skill{}", i % 4)])
            })
            .collect();
        let projects = projects(6);

        let first = form_teams(&students, &projects, 6, &scorer()).unwrap();
        let second = form_teams(&students, &projects, 6, &scorer()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_team_gets_a_score() {
        let students: Vec<StudentRecord> = (0..8)
            .map(|i| StudentRecord::new(format!("S{i}")).with_skills([format!("sk{i}"), "rust".to_string()]))
            .collect();
        let roster = form_teams(&students, &projects(2), 2, &scorer()).unwrap();

        for team in roster.teams() {
            assert!((0.0..=1.0).contains(&team.cached_score));
        }
    }
}
