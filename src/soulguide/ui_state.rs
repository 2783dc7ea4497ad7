use serde::{Deserialize, Serialize};
use soulguide_model::ChatMessage;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub transcript: Vec<ChatMessage>,
    pub draft: String,
    pub send_enabled: bool,
    pub typing: bool,
}
