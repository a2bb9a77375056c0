use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{UnknownDateRange, UnknownRole};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(OrderKey);
id_newtype!(ProductKey);
id_newtype!(NotificationId);

/// Access level granted by the token endpoint. The wire uses the remote
/// API's historical short names as well as the canonical ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[serde(alias = "admin")]
    Administrator,
    #[serde(alias = "cliente")]
    Customer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Customer => "customer",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "administrator" | "admin" => Ok(Role::Administrator),
            "customer" | "cliente" => Ok(Role::Customer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Date-range filter applied uniformly to every dashboard dataset request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    Last7Days,
    Last30Days,
    YearToDate,
    #[default]
    AllTime,
}

impl DateRange {
    /// Value of the `dias` query parameter the remote API expects.
    pub fn query_value(self) -> &'static str {
        match self {
            DateRange::Last7Days => "7d",
            DateRange::Last30Days => "30d",
            DateRange::YearToDate => "YTD",
            DateRange::AllTime => "ALL",
        }
    }
}

impl FromStr for DateRange {
    type Err = UnknownDateRange;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "7d" => Ok(DateRange::Last7Days),
            "30d" => Ok(DateRange::Last30Days),
            "ytd" => Ok(DateRange::YearToDate),
            "all" => Ok(DateRange::AllTime),
            other => Err(UnknownDateRange(other.to_string())),
        }
    }
}

/// An authenticated user. The token is non-empty exactly while the
/// session counts as logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub display_name: String,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_canonical_and_legacy_names() {
        assert_eq!("administrator".parse::<Role>().unwrap(), Role::Administrator);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Administrator);
        assert_eq!("cliente".parse::<Role>().unwrap(), Role::Customer);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn role_round_trips_through_as_str() {
        for role in [Role::Administrator, Role::Customer] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn date_range_query_values_match_remote_contract() {
        assert_eq!(DateRange::Last7Days.query_value(), "7d");
        assert_eq!(DateRange::Last30Days.query_value(), "30d");
        assert_eq!(DateRange::YearToDate.query_value(), "YTD");
        assert_eq!(DateRange::AllTime.query_value(), "ALL");
    }

    #[test]
    fn date_range_parses_cli_spellings() {
        assert_eq!("7d".parse::<DateRange>().unwrap(), DateRange::Last7Days);
        assert_eq!("YTD".parse::<DateRange>().unwrap(), DateRange::YearToDate);
        assert_eq!("all".parse::<DateRange>().unwrap(), DateRange::AllTime);
        assert!("14d".parse::<DateRange>().is_err());
    }
}
