use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;

/// Customer group, optionally expanded with its members.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CustomerGroup {
    pub id: String,
    pub name: String,
    pub customers: Vec<Customer>,
    pub created_at: Option<DateTime<Utc>>,
}
