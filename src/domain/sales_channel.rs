use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SalesChannel {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_disabled: bool,
}
