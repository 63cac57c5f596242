//! Actions and knowledge exposed to the AI assistant.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::PoiError;
use crate::point::PointOfInterest;

/// Confirmation returned by every successful action
pub const MOVED_CONFIRMATION: &str = "Moved user to point of interest";

/// Named actions the assistant may call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum PointAction {
    GoToPoint,
    GoToRandomPoint,
    GoToClosestPoint,
    GoToClosestPointByCategory,
    GoToRandomPointByCategory,
}

/// Argument of an action call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionInput {
    #[serde(default)]
    pub value: Option<String>,
}

impl ActionInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The value, when present and non-empty
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

impl PointAction {
    /// Error message for a call missing its required value, or `None` when
    /// the action takes no value
    pub fn missing_value_message(&self) -> Option<&'static str> {
        match self {
            PointAction::GoToPoint => Some("Cannot go to empty name."),
            PointAction::GoToClosestPointByCategory | PointAction::GoToRandomPointByCategory => {
                Some("Cannot go to empty category.")
            }
            PointAction::GoToRandomPoint | PointAction::GoToClosestPoint => None,
        }
    }

    /// Value of `input`, validated against this action's requirements
    pub fn required_value<'a>(&self, input: &'a ActionInput) -> Result<Option<&'a str>, PoiError> {
        match self.missing_value_message() {
            Some(message) => input.value().map(Some).ok_or(PoiError::MissingValue(message)),
            None => Ok(None),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PointAction::GoToPoint => "Point of Interest - Go to point",
            PointAction::GoToRandomPoint => "Point of Interest - Go to random point",
            PointAction::GoToClosestPoint => "Point of Interest - Go to closest point",
            PointAction::GoToClosestPointByCategory => {
                "Point of Interest - Go to closest point by category"
            }
            PointAction::GoToRandomPointByCategory => {
                "Point of Interest - Go to random point by category"
            }
        }
    }

    pub fn tags(&self) -> &'static str {
        match self {
            PointAction::GoToPoint => {
                "go to point go to activity, go to place, move to point, move to activity, move to place"
            }
            PointAction::GoToRandomPoint => {
                "go to random point, go to random activity, go to random place, move to random point, move to random activity, move to random place"
            }
            PointAction::GoToClosestPoint => {
                "go to closest point, go to closest activity, go to closest place, move to closest point, move to closest activity, move to closest place"
            }
            PointAction::GoToClosestPointByCategory => {
                "go to closest point in category, go to closest activity in category, go to closest place in category, move to closest point in category, move to closest activity in category, move to closest place in category"
            }
            PointAction::GoToRandomPointByCategory => {
                "go to random point in category, go to random activity in category, go to random place in category, move to random point in category, move to random activity in category, move to random place in category"
            }
        }
    }

    /// Instruction text for the assistant
    pub fn instruction(&self, points: &[PointOfInterest]) -> String {
        match self {
            PointAction::GoToPoint => {
                let names: Vec<&str> = points.iter().map(|p| p.display_name()).collect();
                format!(
                    "Assistant instruction: Use this action to go to a point of interest that matches the name. The value is the name to go to.\nThe possible locations are: {}.",
                    names.join(", ")
                )
            }
            PointAction::GoToRandomPoint => "Assistant instruction: Run this action when the user asks to go to a random point of interest or place.".to_string(),
            PointAction::GoToClosestPoint => "Assistant instruction: Run this action when the user asks to go to the closest point of interest or place.".to_string(),
            PointAction::GoToClosestPointByCategory => "Assistant instruction: Run this action with value 'general' or 'media' or 'content' or 'activity' and when the user asks to go to the closest point of interest or place with a specific category.".to_string(),
            PointAction::GoToRandomPointByCategory => "Assistant instruction: Run this action with value 'general' or 'media' or 'content' or 'activity' and when the user asks to go to a random point of interest or place with a specific category.".to_string(),
        }
    }

    /// Resolve an action id, bare (`goToPoint`) or plugin-scoped
    /// (`pointofinterest:goToPoint`)
    pub fn from_id(id: &str, plugin_id: &str) -> Result<Self, PoiError> {
        let bare = id
            .strip_prefix(plugin_id)
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(id);
        bare.parse()
            .map_err(|_| PoiError::UnknownAction(id.to_string()))
    }
}

/// Kind of knowledge base entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Info,
    Action,
}

/// One entry of the assistant's knowledge base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
    pub tags: String,
    pub content: String,
}

/// Build the info entry plus one entry per action
pub fn knowledge_base(plugin_id: &str, points: &[PointOfInterest], can_edit: bool) -> Vec<KnowledgeBaseEntry> {
    let listing: Vec<String> = points
        .iter()
        .map(|p| {
            format!(
                "name={} description={}",
                p.display_name(),
                p.description.as_deref().unwrap_or("none")
            )
        })
        .collect();

    let mut content = format!(
        "The point of interest can be used to travel to predefined points of interest or places in the world. For example, take user to the closest point of action or take user to a random point of action with this name or category or show the user what activities or interesting things there are available in the space, etc.\nTo use it, add the \"Point of Interest\" object from the Editor and configure the point of interest details. Current points of interest are {}",
        listing.join(", ")
    );
    if can_edit {
        content.push_str("\nYou can also add more points of interest by clicking the \"Add Point of Interest\" button in the Editor. Add descriptions in a way that you think people would enjoy it.");
    } else {
        content.push_str(" speak about them in natural language.");
    }

    let mut entries = vec![KnowledgeBaseEntry {
        id: format!("{plugin_id}:info"),
        kind: EntryKind::Info,
        name: "Point of Interest".to_string(),
        tags: "point of interest, place, activity, scripts, logic, travel, teleport, user movement".to_string(),
        content,
    }];

    entries.extend(PointAction::iter().map(|action| KnowledgeBaseEntry {
        id: format!("{plugin_id}:{action}"),
        kind: EntryKind::Action,
        name: action.display_name().to_string(),
        tags: action.tags().to_string(),
        content: action.instruction(points),
    }));

    entries
}
