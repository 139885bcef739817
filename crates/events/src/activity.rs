use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use weide_core::{ActivityId, Entity};

/// What kind of user action an activity entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    Input,
    Dispatch,
    Edit,
    Delete,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Input => "Input",
            ActivityKind::Dispatch => "Dispatch",
            ActivityKind::Edit => "Edit",
            ActivityKind::Delete => "Delete",
        }
    }
}

impl core::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the human-readable audit feed. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub id: ActivityId,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub date: DateTime<Utc>,
    pub user: String,
}

impl RecentActivity {
    pub fn new(
        kind: ActivityKind,
        description: impl Into<String>,
        date: DateTime<Utc>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            kind,
            description: description.into(),
            date,
            user: user.into(),
        }
    }
}

impl Entity for RecentActivity {
    type Id = ActivityId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_kind_as_type() {
        let activity = RecentActivity::new(ActivityKind::Input, "Added 5 units", Utc::now(), "System");
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "Input");
        assert_eq!(json["user"], "System");
    }
}
