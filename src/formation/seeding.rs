//! Initial partition: mutual-preference seeding and balanced fill
//!
//! The partition is deterministic in the input ordering: no randomness, no
//! unordered-map iteration. Capacities are fixed up front so team sizes
//! never differ by more than one.

use std::collections::BTreeMap;

use crate::student::record::{StudentId, StudentRecord};

/// Per-team capacities: `n / k` each, first `n % k` teams get one extra
pub(crate) fn capacities(student_count: usize, team_count: usize) -> Vec<usize> {
    let base = student_count / team_count;
    let extra = student_count % team_count;
    (0..team_count)
        .map(|i| if i < extra { base + 1 } else { base })
        .collect()
}

/// Index of the team with the most free capacity of at least `needed`
///
/// Ties break toward the lowest team index.
fn most_free(teams: &[Vec<usize>], capacities: &[usize], needed: usize) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (index, members) in teams.iter().enumerate() {
        let free = capacities[index] - members.len();
        if free >= needed {
            let better = match best {
                Some((_, best_free)) => free > best_free,
                None => true,
            };
            if better {
                best = Some((index, free));
            }
        }
    }
    best.map(|(index, _)| index)
}

/// Partition students into `team_count` member lists
///
/// Pass one scans students in input order and places each unplaced student
/// together with the first of their requested teammates that reciprocates
/// and is still unplaced, into the emptiest team that can hold the pair.
/// Pass two fills everyone remaining into the emptiest team with a free
/// slot, ascending team index on ties.
pub(crate) fn partition(students: &[StudentRecord], team_count: usize) -> Vec<Vec<StudentId>> {
    let capacities = capacities(students.len(), team_count);
    let index_of: BTreeMap<&StudentId, usize> = students
        .iter()
        .enumerate()
        .map(|(i, s)| (&s.id, i))
        .collect();

    let mut teams: Vec<Vec<usize>> = vec![Vec::new(); team_count];
    let mut placed = vec![false; students.len()];

    // Pass one: seed reciprocal pairs together.
    for i in 0..students.len() {
        if placed[i] {
            continue;
        }
        for wanted in &students[i].teammate_preferences {
            let Some(&j) = index_of.get(wanted) else {
                continue; // unknown reference, ignored
            };
            if placed[j] || j == i || !students[j].prefers(&students[i].id) {
                continue;
            }
            if let Some(team) = most_free(&teams, &capacities, 2) {
                teams[team].push(i);
                teams[team].push(j);
                placed[i] = true;
                placed[j] = true;
            }
            break;
        }
    }

    // Pass two: fill the remainder, keeping sizes level.
    for i in 0..students.len() {
        if placed[i] {
            continue;
        }
        let team = most_free(&teams, &capacities, 1)
            .expect("capacities sum to the student count, so a free slot exists");
        teams[team].push(i);
        placed[i] = true;
    }

    teams
        .into_iter()
        .map(|members| {
            members
                .into_iter()
                .map(|i| students[i].id.clone())
                .collect()
        })
        .collect()
}
