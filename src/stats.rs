use crate::club::{ClubRecord, GroundRole, Sport};
use crate::filter::FilterState;
use std::collections::HashSet;

/// Distinct-club counts over the currently visible records
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSummary {
    pub total: usize,
    pub football: usize,
    pub rugby: usize,
}

/// Count distinct clubs among the visible records.
///
/// Only primary-ground records contribute, so a club whose secondary venue
/// also passes the filters is still counted once. Records are grouped by
/// identity key (club, else team name); keyless records are skipped.
/// A key that appears under both sports (disagreeing venue data) counts
/// under both sport tallies; that is a data-quality problem upstream.
pub fn compute_stats<F>(records: &[ClubRecord], visible: F, state: &FilterState) -> StatsSummary
where
    F: Fn(&ClubRecord, &FilterState) -> bool,
{
    let mut all: HashSet<&str> = HashSet::new();
    let mut football: HashSet<&str> = HashSet::new();
    let mut rugby: HashSet<&str> = HashSet::new();

    for record in records {
        if !visible(record, state) {
            continue;
        }
        if record.ground_role != GroundRole::Primary {
            continue;
        }
        let Some(key) = record.identity_key() else {
            continue;
        };

        all.insert(key);
        match record.sport {
            Some(Sport::Football) => {
                football.insert(key);
            }
            Some(Sport::Rugby) => {
                rugby.insert(key);
            }
            None => {}
        }
    }

    StatsSummary {
        total: all.len(),
        football: football.len(),
        rugby: rugby.len(),
    }
}
