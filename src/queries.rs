//! Queries
//!
//! Documents issued by this client. Field semantics belong to the API.

use crate::operation::Operation;
use serde::{Deserialize, Serialize};

/// Operation name of [`GET_USER_QUERY`]
pub const GET_USER_OPERATION: &str = "GetUserQuery";

/// Fetches the authenticated user
pub const GET_USER_QUERY: &str = r#"
  query GetUserQuery {
    getUserQuery {
      _id
      name
      email_id
      apiKey
      role
      phone_number
      trustee_id
      brand_name
      gstIn
      residence_state
      school_name
    }
  }
"#;

/// Build the `GetUserQuery` operation
pub fn get_user() -> Operation {
    Operation::new(GET_USER_QUERY).named(GET_USER_OPERATION)
}

/// Authenticated user as returned by `getUserQuery`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default, rename = "apiKey")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub trustee_id: Option<String>,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default, rename = "gstIn")]
    pub gst_in: Option<String>,
    #[serde(default)]
    pub residence_state: Option<String>,
    #[serde(default)]
    pub school_name: Option<String>,
}

impl User {
    /// Field name/value pairs in query order, for display
    pub fn fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("_id", Some(self.id.as_str())),
            ("name", self.name.as_deref()),
            ("email_id", self.email_id.as_deref()),
            ("apiKey", self.api_key.as_deref()),
            ("role", self.role.as_deref()),
            ("phone_number", self.phone_number.as_deref()),
            ("trustee_id", self.trustee_id.as_deref()),
            ("brand_name", self.brand_name.as_deref()),
            ("gstIn", self.gst_in.as_deref()),
            ("residence_state", self.residence_state.as_deref()),
            ("school_name", self.school_name.as_deref()),
        ]
    }
}

/// `data` payload of `GetUserQuery`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetUserQueryData {
    #[serde(rename = "getUserQuery")]
    pub get_user_query: User,
}
