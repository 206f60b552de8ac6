/// Which sport a club record belongs to
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Sport {
    Football,
    Rugby,
}

impl Sport {
    /// Parse from the data file's lowercase string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "football" => Some(Sport::Football),
            "rugby" => Some(Sport::Rugby),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sport::Football => "football",
            Sport::Rugby => "rugby",
        }
    }
}

/// Rugby sub-discipline; not applicable to football records
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RugbyCode {
    Union,
    League,
}

impl RugbyCode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "union" => Some(RugbyCode::Union),
            "league" => Some(RugbyCode::League),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RugbyCode::Union => "union",
            RugbyCode::League => "league",
        }
    }
}

/// Whether a venue is a club's primary or secondary home ground.
/// Absent in the data means primary.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum GroundRole {
    #[default]
    Primary,
    Secondary,
}

impl GroundRole {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "primary" => Some(GroundRole::Primary),
            "secondary" => Some(GroundRole::Secondary),
            _ => None,
        }
    }
}

/// One row of input data: a team's presence at one venue.
/// A club with multiple venues appears as multiple records sharing `club`.
/// Only the coordinates are required; everything else may be missing and
/// rendering falls back to placeholder text.
#[derive(Clone, Debug, Default)]
pub struct ClubRecord {
    pub team_name: Option<String>,
    /// Grouping key for multi-venue clubs
    pub club: Option<String>,
    pub sport: Option<Sport>,
    pub code: Option<RugbyCode>,
    /// Coarse competitive-division label ("tier1", "tier2", ...)
    pub tier: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub ground_name: Option<String>,
    pub ground_role: GroundRole,
    pub country: Option<String>,
    pub region_name: Option<String>,
    pub region_code: Option<String>,
    pub division: Option<String>,
    pub notes: Option<String>,
    pub founded: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub streaming: Option<String>,
    pub other_socials: Option<String>,
}

impl ClubRecord {
    /// Key under which multi-venue records of the same club are grouped.
    /// Records with neither a club key nor a team name have no identity
    /// and are excluded from aggregation.
    pub fn identity_key(&self) -> Option<&str> {
        self.club
            .as_deref()
            .or(self.team_name.as_deref())
            .filter(|k| !k.is_empty())
    }

    /// Name shown on the map and in the detail panel
    pub fn display_name(&self) -> &str {
        self.team_name
            .as_deref()
            .or(self.club.as_deref())
            .unwrap_or("Unknown club")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_prefers_club_key() {
        let rec = ClubRecord {
            team_name: Some("Arsenal Women".into()),
            club: Some("Arsenal".into()),
            ..Default::default()
        };
        assert_eq!(rec.identity_key(), Some("Arsenal"));
    }

    #[test]
    fn test_identity_falls_back_to_team_name() {
        let rec = ClubRecord {
            team_name: Some("Durham Women".into()),
            ..Default::default()
        };
        assert_eq!(rec.identity_key(), Some("Durham Women"));
    }

    #[test]
    fn test_no_identity_without_names() {
        let rec = ClubRecord::default();
        assert_eq!(rec.identity_key(), None);
        assert_eq!(rec.display_name(), "Unknown club");
    }

    #[test]
    fn test_ground_role_defaults_to_primary() {
        assert_eq!(GroundRole::default(), GroundRole::Primary);
        assert_eq!(GroundRole::parse("secondary"), Some(GroundRole::Secondary));
        assert_eq!(GroundRole::parse("away"), None);
    }
}
