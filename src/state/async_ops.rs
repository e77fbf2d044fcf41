use serde_json::Value;
use uuid::Uuid;

use crate::api::ApiResponse;
use crate::models::{ForumPost, Record};

#[derive(Debug, Clone)]
pub struct AsyncOperation {
    pub id: Uuid,
    pub operation_type: OperationType,
    pub status: AsyncStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperationType {
    FetchScripts,
    ToggleScript(i64),
    FetchSoftware,
    FetchPerks,
    BuyPerk(i64),
    FetchMember,
    FetchConfiguration,
    SaveConfiguration,
    ResetConfiguration,
    FetchForumPosts,
    ConsoleCall(String),
}

impl OperationType {
    pub fn label(&self) -> String {
        match self {
            OperationType::FetchScripts => "Loading scripts".to_string(),
            OperationType::ToggleScript(id) => format!("Toggling script #{}", id),
            OperationType::FetchSoftware => "Loading software".to_string(),
            OperationType::FetchPerks => "Loading perks".to_string(),
            OperationType::BuyPerk(id) => format!("Buying perk #{}", id),
            OperationType::FetchMember => "Loading member".to_string(),
            OperationType::FetchConfiguration => "Loading configuration".to_string(),
            OperationType::SaveConfiguration => "Saving configuration".to_string(),
            OperationType::ResetConfiguration => "Resetting configuration".to_string(),
            OperationType::FetchForumPosts => "Loading forum posts".to_string(),
            OperationType::ConsoleCall(cmd) => format!("Calling {}", cmd),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AsyncStatus {
    InProgress,
    Completed,
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum AsyncOperationResult {
    Scripts(Vec<Record>),
    ScriptToggled(i64, ApiResponse),
    Software(Vec<Record>),
    Perks(Vec<Record>),
    PerkBought(i64, ApiResponse),
    Member(Value),
    Configuration(String),
    ConfigurationSaved,
    ConfigurationReset,
    ForumPosts(Vec<ForumPost>),
    ConsoleResponse(ApiResponse),
}

impl AsyncOperation {
    pub fn new(operation_type: OperationType) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation_type,
            status: AsyncStatus::InProgress,
        }
    }

    pub fn complete(&mut self) {
        self.status = AsyncStatus::Completed;
    }

    pub fn fail(&mut self, error: String) {
        self.status = AsyncStatus::Failed(error);
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self.status, AsyncStatus::InProgress)
    }
}
