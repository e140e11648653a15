//! Compatibility scoring
//!
//! The scorer maps a set of student records to a scalar in [0,1]. It is a
//! pure function: deterministic, no side effects, defined for any member
//! set including a singleton (which scores the neutral midpoint). Four
//! sub-scores are combined by a weighted average normalized over the weight
//! sum, so the total is monotonic in each sub-score.
//!
//! Sub-score inputs that are empty or ambiguous (a member without skills, a
//! pair where neither lists any teammate) resolve to the documented neutral
//! value, never an error and never a silent zero.

use crate::scoring::weights::ScoringWeights;
use crate::student::record::StudentRecord;

/// Neutral sub-score used when an input carries no signal
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Scoring seam between the engine and a concrete compatibility model
///
/// Implementations must be pure and deterministic, return values in [0,1],
/// and be invariant to member ordering.
pub trait TeamScorer {
    /// Score a team by its member records
    fn score(&self, members: &[&StudentRecord]) -> f64;
}

/// Per-signal breakdown of a team's compatibility
///
/// Useful for explaining a score to faculty: each field is the raw [0,1]
/// sub-score before weighting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubScores {
    /// Pairwise project-preference similarity
    pub project_preference: f64,
    /// Mutual teammate preference
    pub mutual_preference: f64,
    /// Skills balance
    pub skills: f64,
    /// Availability overlap
    pub availability: f64,
}

/// The deterministic weighted-formula scorer
///
/// `top_choices` bounds how deep into two ballots the project-preference
/// comparison looks.
#[derive(Clone, Debug)]
pub struct WeightedScorer {
    weights: ScoringWeights,
    top_choices: usize,
}

impl WeightedScorer {
    /// Create a scorer from weights and a top-N ballot depth
    pub fn new(weights: ScoringWeights, top_choices: usize) -> Self {
        Self {
            weights,
            top_choices: top_choices.max(1),
        }
    }

    /// The weights in effect
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Compute the unweighted sub-scores for a team
    pub fn sub_scores(&self, members: &[&StudentRecord]) -> SubScores {
        SubScores {
            project_preference: self.project_preference_score(members),
            mutual_preference: mutual_preference_score(members),
            skills: skills_score(members),
            availability: availability_score(members),
        }
    }

    /// Pairwise ballot agreement over the top-N project choices
    fn project_preference_score(&self, members: &[&StudentRecord]) -> f64 {
        average_over_pairs(members, |a, b| self.pair_project_score(a, b))
    }

    fn pair_project_score(&self, a: &StudentRecord, b: &StudentRecord) -> f64 {
        let n = self.top_choices;
        let top_a = &a.project_preferences[..a.project_preferences.len().min(n)];
        let top_b = &b.project_preferences[..b.project_preferences.len().min(n)];
        if top_a.is_empty() || top_b.is_empty() {
            return NEUTRAL_SCORE;
        }

        let mut credit = 0.0;
        for (rank_a, project) in top_a.iter().enumerate() {
            if let Some(rank_b) = top_b.iter().position(|p| p == project) {
                credit += 1.0 - (rank_a as f64 - rank_b as f64).abs() / n as f64;
            }
        }
        (credit / n as f64).clamp(0.0, 1.0)
    }
}

impl TeamScorer for WeightedScorer {
    fn score(&self, members: &[&StudentRecord]) -> f64 {
        if members.is_empty() {
            return NEUTRAL_SCORE;
        }
        let weight_sum = self.weights.sum();
        if weight_sum <= 0.0 {
            return NEUTRAL_SCORE;
        }

        let sub = self.sub_scores(members);
        let combined = self.weights.project_preference * sub.project_preference
            + self.weights.mutual_preference * sub.mutual_preference
            + self.weights.skills * sub.skills
            + self.weights.availability * sub.availability;
        (combined / weight_sum).clamp(0.0, 1.0)
    }
}

/// Average a symmetric pair function over all member pairs
///
/// Teams with fewer than two members have no pairs and score neutral.
fn average_over_pairs<F>(members: &[&StudentRecord], pair_score: F) -> f64
where
    F: Fn(&StudentRecord, &StudentRecord) -> f64,
{
    if members.len() < 2 {
        return NEUTRAL_SCORE;
    }
    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..members.len() {
        for j in (i + 1)..members.len() {
            total += pair_score(members[i], members[j]);
            pairs += 1;
        }
    }
    total / pairs as f64
}

/// Mutual teammate preference: 1.0 reciprocal, 0.5 one-directional,
/// 0.0 neither; a pair where neither member lists anyone is neutral
fn mutual_preference_score(members: &[&StudentRecord]) -> f64 {
    average_over_pairs(members, |a, b| {
        if a.teammate_preferences.is_empty() && b.teammate_preferences.is_empty() {
            return NEUTRAL_SCORE;
        }
        match (a.prefers(&b.id), b.prefers(&a.id)) {
            (true, true) => 1.0,
            (true, false) | (false, true) => 0.5,
            (false, false) => 0.0,
        }
    })
}

/// Skills balance: distinct coverage against redundant mass
///
/// With `u` = 0 at pure duplication and 1 at pure disjointness, the score
/// is `4u(1-u)`: zero at both extremes, peaked at a balanced mix. Members
/// without skills carry no signal and are excluded.
fn skills_score(members: &[&StudentRecord]) -> f64 {
    let sets: Vec<_> = members
        .iter()
        .map(|m| &m.skills)
        .filter(|s| !s.is_empty())
        .collect();
    if sets.len() < 2 {
        return NEUTRAL_SCORE;
    }

    let n = sets.len() as f64;
    let total: usize = sets.iter().map(|s| s.len()).sum();
    let distinct = sets
        .iter()
        .flat_map(|s| s.iter())
        .collect::<std::collections::BTreeSet<_>>()
        .len();

    let coverage = distinct as f64 / total as f64;
    let floor = 1.0 / n;
    let u = (coverage - floor) / (1.0 - floor);
    (4.0 * u * (1.0 - u)).clamp(0.0, 1.0)
}

/// Availability overlap: slots common to all members over the union, or
/// the average pairwise Jaccard overlap when no slot is shared by everyone
fn availability_score(members: &[&StudentRecord]) -> f64 {
    let sets: Vec<_> = members
        .iter()
        .map(|m| &m.availability)
        .filter(|s| !s.is_empty())
        .collect();
    if sets.len() < 2 {
        return NEUTRAL_SCORE;
    }

    let mut intersection: std::collections::BTreeSet<&String> = sets[0].iter().collect();
    let mut union: std::collections::BTreeSet<&String> = sets[0].iter().collect();
    for set in &sets[1..] {
        intersection.retain(|slot| set.contains(*slot));
        union.extend(set.iter());
    }
    if !intersection.is_empty() {
        return intersection.len() as f64 / union.len() as f64;
    }

    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..sets.len() {
        for j in (i + 1)..sets.len() {
            let shared = sets[i].intersection(sets[j]).count();
            let combined = sets[i].union(sets[j]).count();
            total += shared as f64 / combined as f64;
            pairs += 1;
        }
    }
    total / pairs as f64
}
