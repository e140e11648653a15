//! Project assignment by aggregated preference rank
//!
//! Each team's appetite for a project is the Borda aggregate of its
//! members' ballots. Candidate pairs are considered in descending
//! aggregate order, ties broken by ascending team number and then project
//! input order, so the assignment is deterministic and every project is
//! assigned to at most one team.

use std::collections::BTreeMap;

use crate::roster::project::{Project, ProjectId};
use crate::student::record::{StudentId, StudentRecord};

/// Borda aggregate of a team's ballots over the given projects
///
/// A member whose ballot has length `len` contributes `len - position` for
/// the project at `position`. Ballot entries naming unknown projects are
/// ignored.
fn aggregate_ranks(
    members: &[StudentId],
    students: &BTreeMap<StudentId, StudentRecord>,
    projects: &[Project],
) -> Vec<u64> {
    let mut totals = vec![0u64; projects.len()];
    for id in members {
        let Some(record) = students.get(id) else {
            continue;
        };
        let ballot_len = record.project_preferences.len() as u64;
        for (position, wanted) in record.project_preferences.iter().enumerate() {
            if let Some(p) = projects.iter().position(|project| &project.id == wanted) {
                totals[p] += ballot_len - position as u64;
            }
        }
    }
    totals
}

/// Assign one distinct project to each team
///
/// `teams` are member lists in team-number order. The result is aligned
/// with `teams`; the caller guarantees `projects.len() >= teams.len()`.
pub(crate) fn assign(
    teams: &[Vec<StudentId>],
    students: &BTreeMap<StudentId, StudentRecord>,
    projects: &[Project],
) -> Vec<ProjectId> {
    // (aggregate, team index, project index), one entry per pair.
    let mut entries: Vec<(u64, usize, usize)> = Vec::new();
    for (team, members) in teams.iter().enumerate() {
        let totals = aggregate_ranks(members, students, projects);
        for (project, &total) in totals.iter().enumerate() {
            entries.push((total, team, project));
        }
    }
    entries.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    let mut assigned: Vec<Option<usize>> = vec![None; teams.len()];
    let mut taken = vec![false; projects.len()];
    for (total, team, project) in entries {
        // Zero-aggregate entries fall through to the input-order fallback.
        if total == 0 || assigned[team].is_some() || taken[project] {
            continue;
        }
        assigned[team] = Some(project);
        taken[project] = true;
    }

    // Teams with no preference signal take the first free project.
    for slot in assigned.iter_mut() {
        if slot.is_none() {
            let free = taken
                .iter()
                .position(|used| !used)
                .expect("more projects than teams");
            *slot = Some(free);
            taken[free] = true;
        }
    }

    assigned
        .into_iter()
        .map(|slot| projects[slot.expect("every team assigned")].id.clone())
        .collect()
}
