use crate::club::{ClubRecord, GroundRole, RugbyCode, Sport};

/// The currently selected filter dimensions. `None` / `false` / empty
/// means "all" for that dimension. Owned by the app controller; the
/// evaluator and aggregator only ever borrow it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    pub sport: Option<Sport>,
    pub code: Option<RugbyCode>,
    pub tier: Option<String>,
    /// Matches either a record's region code or its region name
    pub region: Option<String>,
    pub primary_only: bool,
    pub search: String,
}

impl FilterState {
    /// Back to the all-permissive default
    pub fn reset(&mut self) {
        *self = FilterState::default();
    }

    /// True when every dimension is at its permissive default
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}

/// Pure visibility verdict for one record under the current filters.
/// Every dimension must match (logical AND); absent optional fields on the
/// record count as non-matching, never as an error.
pub fn is_visible(record: &ClubRecord, state: &FilterState) -> bool {
    sport_matches(record, state)
        && code_matches(record, state)
        && tier_matches(record, state)
        && region_matches(record, state)
        && ground_matches(record, state)
        && search_matches(record, state)
}

fn sport_matches(record: &ClubRecord, state: &FilterState) -> bool {
    match state.sport {
        None => true,
        Some(want) => record.sport == Some(want),
    }
}

/// The code filter only applies to rugby; football records pass regardless
fn code_matches(record: &ClubRecord, state: &FilterState) -> bool {
    match state.code {
        None => true,
        Some(want) => {
            if record.sport != Some(Sport::Rugby) {
                true
            } else {
                record.code == Some(want)
            }
        }
    }
}

fn tier_matches(record: &ClubRecord, state: &FilterState) -> bool {
    match &state.tier {
        None => true,
        Some(want) => record.tier.as_deref() == Some(want.as_str()),
    }
}

/// Either key form is accepted: region code ("NE") or region name ("North East")
fn region_matches(record: &ClubRecord, state: &FilterState) -> bool {
    match &state.region {
        None => true,
        Some(want) => {
            record.region_code.as_deref() == Some(want.as_str())
                || record.region_name.as_deref() == Some(want.as_str())
        }
    }
}

fn ground_matches(record: &ClubRecord, state: &FilterState) -> bool {
    !state.primary_only || record.ground_role == GroundRole::Primary
}

/// Case-insensitive substring match over the record's searchable text fields
fn search_matches(record: &ClubRecord, state: &FilterState) -> bool {
    let needle = state.search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [
        record.team_name.as_deref(),
        record.club.as_deref(),
        record.ground_name.as_deref(),
        record.region_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}
