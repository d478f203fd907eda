use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SIGNUP_CREDITS;

/// Subscription plan. Plans this client does not know are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Plan {
    #[default]
    Free,
    Pro,
    Enterprise,
    Other(String),
}

impl Plan {
    pub fn as_str(&self) -> &str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
            Plan::Enterprise => "enterprise",
            Plan::Other(name) => name,
        }
    }
}

impl From<String> for Plan {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" | "free" => Plan::Free,
            "pro" => Plan::Pro,
            "enterprise" => Plan::Enterprise,
            _ => Plan::Other(value),
        }
    }
}

impl From<Plan> for String {
    fn from(plan: Plan) -> Self {
        match plan {
            Plan::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// User fields returned by `/auth/login`, `/auth/register` and `/auth/user-details`.
/// Login and register only carry the identity; the profile adds plan and usage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub credits: Option<i64>,
    #[serde(default)]
    pub total_analyses: Option<i64>,
}

/// Envelope of the auth endpoints: `{ success, message?, data? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<UserDetails>,
}

/// Authenticated user as held by the session context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub plan: Plan,
    pub credits: i64,
    pub total_analyses: i64,
}

impl User {
    /// Build the session user from a profile, applying the account defaults.
    pub fn from_details(details: UserDetails) -> Self {
        Self {
            id: details.user_id,
            name: details.name,
            email: details.email,
            plan: details.plan.unwrap_or_default(),
            credits: details.credits.unwrap_or(DEFAULT_SIGNUP_CREDITS),
            total_analyses: details.total_analyses.unwrap_or(0),
        }
    }

    /// Free-plan accounts with no credits left cannot start an analysis.
    pub fn is_out_of_credits(&self) -> bool {
        self.plan == Plan::Free && self.credits <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_defaults_apply() {
        let response: AuthResponse = serde_json::from_str(
            r#"{"success":true,"data":{"userId":"u1","name":"Ada","email":"ada@example.com"}}"#,
        )
        .unwrap();
        let user = User::from_details(response.data.unwrap());
        assert_eq!(user.plan, Plan::Free);
        assert_eq!(user.credits, 3);
        assert_eq!(user.total_analyses, 0);
    }

    #[test]
    fn out_of_credits_only_for_free_plan() {
        let mut user = User::from_details(UserDetails {
            user_id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            plan: Some(Plan::Pro),
            credits: Some(0),
            total_analyses: Some(12),
        });
        assert!(!user.is_out_of_credits());
        user.plan = Plan::Free;
        assert!(user.is_out_of_credits());
    }

    #[test]
    fn unknown_plan_is_kept_and_not_gated() {
        let response: AuthResponse = serde_json::from_str(
            r#"{"success":true,"data":{"userId":"u1","name":"Ada","email":"ada@example.com","plan":"premium","credits":0}}"#,
        )
        .unwrap();
        let user = User::from_details(response.data.unwrap());
        assert_eq!(user.plan, Plan::Other("premium".into()));
        assert!(!user.is_out_of_credits());
        assert_eq!(serde_json::to_value(&user).unwrap()["plan"], "premium");
    }

    #[test]
    fn empty_plan_means_free() {
        let details: UserDetails = serde_json::from_str(
            r#"{"userId":"u1","name":"Ada","email":"ada@example.com","plan":"","credits":0}"#,
        )
        .unwrap();
        let user = User::from_details(details);
        assert_eq!(user.plan, Plan::Free);
        assert!(user.is_out_of_credits());
    }
}
