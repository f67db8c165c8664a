use serde::{Deserialize, Serialize};

/// Claims describing the authenticated caller of a mutating operation.
///
/// Identity is threaded explicitly into service functions as a parameter;
/// the catalog service never consults ambient security state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub exp: usize,
}

/// Returns true when `roles` contains `role`.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_role_matches_exactly() {
        let roles = vec!["manager".to_string(), "viewer".to_string()];
        assert!(check_role("manager", &roles));
        assert!(!check_role("admin", &roles));
    }
}
