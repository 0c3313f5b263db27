//! Clearance Register Models
//!
//! One register per (resignation, department) pair. The four registers
//! share one table and one upsert path; the department-specific field
//! sets live in a tagged `ClearanceDetails` union stored as JSON.

use serde::{Deserialize, Serialize};

/// Departments that must each sign off before a case can settle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ClearanceDepartment {
    Hr,
    Department,
    It,
    Account,
}

impl ClearanceDepartment {
    /// All departments whose registers gate completion
    pub const ALL: [ClearanceDepartment; 4] = [
        ClearanceDepartment::Hr,
        ClearanceDepartment::Department,
        ClearanceDepartment::It,
        ClearanceDepartment::Account,
    ];
}

impl std::fmt::Display for ClearanceDepartment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Hr => "hr",
            Self::Department => "department",
            Self::It => "it",
            Self::Account => "account",
        };
        write!(f, "{s}")
    }
}

/// Condition of a returned company asset (IT register)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCondition {
    Good,
    Damaged,
    Lost,
}

/// Department-specific sign-off fields, tagged by department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClearanceDetails {
    Hr {
        exit_interview_held: bool,
        id_card_returned: bool,
    },
    Department {
        handover_done: bool,
        /// Employee the responsibilities were handed over to, if any
        handover_to: Option<i64>,
    },
    It {
        access_revoked: bool,
        asset_returned: bool,
        asset_condition: AssetCondition,
    },
    Account {
        final_settlement_done: bool,
        settlement_amount: Option<f64>,
        no_due_certificate: bool,
    },
}

impl ClearanceDetails {
    /// The department this payload belongs to
    pub fn department(&self) -> ClearanceDepartment {
        match self {
            Self::Hr { .. } => ClearanceDepartment::Hr,
            Self::Department { .. } => ClearanceDepartment::Department,
            Self::It { .. } => ClearanceDepartment::It,
            Self::Account { .. } => ClearanceDepartment::Account,
        }
    }
}

/// Clearance register row
///
/// Row presence is authoritative: a register is complete iff a row
/// exists for its (resignation, department) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Clearance {
    pub id: i64,
    pub resignation_id: i64,
    pub department: ClearanceDepartment,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub details: ClearanceDetails,
    pub note: Option<String>,
    pub attachment: Option<String>,
    pub created_by: String,
    pub created_at: i64,
    pub modified_by: Option<String>,
    pub modified_at: Option<i64>,
}

/// Upsert payload for a department's register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearanceUpsert {
    pub details: ClearanceDetails,
    pub note: Option<String>,
    pub attachment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_tag_matches_department() {
        let it = ClearanceDetails::It {
            access_revoked: true,
            asset_returned: true,
            asset_condition: AssetCondition::Good,
        };
        assert_eq!(it.department(), ClearanceDepartment::It);

        let json = serde_json::to_value(&it).unwrap();
        assert_eq!(json["kind"], "it");
    }

    #[test]
    fn department_round_trips_from_path_segment() {
        let d: ClearanceDepartment = serde_json::from_str("\"account\"").unwrap();
        assert_eq!(d, ClearanceDepartment::Account);
        assert_eq!(d.to_string(), "account");
    }
}
