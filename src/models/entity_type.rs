//! Entity type model
//!
//! Identifies which kind of platform entity an audit log record describes.
//! The backend may send either the enum name (`"FEATURE"`) or its numeric
//! code (`0`); both deserialize to the same variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of entity an audit log record refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawEntityType", into = "String")]
pub enum EntityType {
    #[default]
    Feature,
    Goal,
    Experiment,
    Account,
    ApiKey,
    Segment,
    Environment,
    AdminAccount,
    AutoOpsRule,
    Push,
    Subscription,
    AdminSubscription,
    Project,
    ProgressiveRollout,
    Organization,
    FlagTrigger,
    Tag,
    /// Any name or code this build doesn't know about
    Unknown,
}

impl EntityType {
    /// Every known entity type, in code order
    pub const ALL: [EntityType; 17] = [
        Self::Feature,
        Self::Goal,
        Self::Experiment,
        Self::Account,
        Self::ApiKey,
        Self::Segment,
        Self::Environment,
        Self::AdminAccount,
        Self::AutoOpsRule,
        Self::Push,
        Self::Subscription,
        Self::AdminSubscription,
        Self::Project,
        Self::ProgressiveRollout,
        Self::Organization,
        Self::FlagTrigger,
        Self::Tag,
    ];

    /// Wire code used by the backend (`None` for `Unknown`)
    pub fn code(&self) -> Option<i64> {
        let code = match self {
            Self::Feature => 0,
            Self::Goal => 1,
            Self::Experiment => 2,
            Self::Account => 3,
            Self::ApiKey => 4,
            Self::Segment => 5,
            Self::Environment => 6,
            Self::AdminAccount => 7,
            Self::AutoOpsRule => 8,
            Self::Push => 9,
            Self::Subscription => 10,
            Self::AdminSubscription => 11,
            Self::Project => 12,
            // 13 is unassigned
            Self::ProgressiveRollout => 14,
            Self::Organization => 15,
            Self::FlagTrigger => 16,
            Self::Tag => 17,
            Self::Unknown => return None,
        };
        Some(code)
    }

    pub fn from_code(code: i64) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == Some(code))
            .unwrap_or(Self::Unknown)
    }

    /// Wire name used by the backend
    pub fn name(&self) -> &'static str {
        match self {
            Self::Feature => "FEATURE",
            Self::Goal => "GOAL",
            Self::Experiment => "EXPERIMENT",
            Self::Account => "ACCOUNT",
            Self::ApiKey => "APIKEY",
            Self::Segment => "SEGMENT",
            Self::Environment => "ENVIRONMENT",
            Self::AdminAccount => "ADMIN_ACCOUNT",
            Self::AutoOpsRule => "AUTOOPS_RULE",
            Self::Push => "PUSH",
            Self::Subscription => "SUBSCRIPTION",
            Self::AdminSubscription => "ADMIN_SUBSCRIPTION",
            Self::Project => "PROJECT",
            Self::ProgressiveRollout => "PROGRESSIVE_ROLLOUT",
            Self::Organization => "ORGANIZATION",
            Self::FlagTrigger => "FLAG_TRIGGER",
            Self::Tag => "TAG",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Parse an entity type from user input
    ///
    /// Accepts the wire name in any case, with `-` or `_` separators, a few
    /// friendly aliases, or the numeric code.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        if let Ok(code) = normalized.parse::<i64>() {
            return match Self::from_code(code) {
                Self::Unknown => None,
                known => Some(known),
            };
        }
        match normalized.as_str() {
            "FLAG" | "FEATURE_FLAG" => return Some(Self::Feature),
            "API_KEY" => return Some(Self::ApiKey),
            "USER_SEGMENT" => return Some(Self::Segment),
            _ => {}
        }
        Self::ALL.into_iter().find(|t| t.name() == normalized)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feature => write!(f, "Feature Flag"),
            Self::Goal => write!(f, "Goal"),
            Self::Experiment => write!(f, "Experiment"),
            Self::Account => write!(f, "Account"),
            Self::ApiKey => write!(f, "API Key"),
            Self::Segment => write!(f, "User Segment"),
            Self::Environment => write!(f, "Environment"),
            Self::AdminAccount => write!(f, "Admin Account"),
            Self::AutoOpsRule => write!(f, "Auto Operation"),
            Self::Push => write!(f, "Push"),
            Self::Subscription => write!(f, "Notification"),
            Self::AdminSubscription => write!(f, "Admin Notification"),
            Self::Project => write!(f, "Project"),
            Self::ProgressiveRollout => write!(f, "Progressive Rollout"),
            Self::Organization => write!(f, "Organization"),
            Self::FlagTrigger => write!(f, "Flag Trigger"),
            Self::Tag => write!(f, "Tag"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

impl From<EntityType> for String {
    fn from(value: EntityType) -> Self {
        value.name().to_string()
    }
}

/// Wire representation accepted during deserialization
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntityType {
    Code(i64),
    Name(String),
}

impl From<RawEntityType> for EntityType {
    fn from(raw: RawEntityType) -> Self {
        match raw {
            RawEntityType::Code(code) => EntityType::from_code(code),
            RawEntityType::Name(name) => EntityType::ALL
                .into_iter()
                .find(|t| t.name() == name)
                .unwrap_or(EntityType::Unknown),
        }
    }
}
