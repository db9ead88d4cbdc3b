use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer as listed by `/admin/customers` and group membership endpoints.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Customer {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub has_account: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Display name, falling back to the email when no name is set.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if name.is_empty() {
            self.email.clone()
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_email() {
        let mut customer = Customer {
            email: "a@example.com".to_string(),
            ..Customer::default()
        };
        assert_eq!(customer.display_name(), "a@example.com");

        customer.first_name = Some("Ada".to_string());
        customer.last_name = Some("Lovelace".to_string());
        assert_eq!(customer.display_name(), "Ada Lovelace");
    }
}
