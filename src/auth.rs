//! Login against the static credential map in config.
//!
//! Usernames are matched case-insensitively with surrounding whitespace
//! trimmed; passwords are trimmed but case-sensitive. There is no account
//! creation and no hashing — the map is operator-managed config, same as
//! the original deployment.

use std::collections::HashMap;

/// Lowercase the credential map's usernames for case-insensitive matching.
fn normalized_users(users: &HashMap<String, String>) -> HashMap<String, String> {
    users
        .iter()
        .map(|(name, password)| (name.trim().to_lowercase(), password.clone()))
        .collect()
}

/// Check a login attempt. Success returns the normalized (trimmed,
/// lowercased) username, which is the key all trips are stored under.
pub fn authenticate(
    users: &HashMap<String, String>,
    username: &str,
    password: &str,
) -> Result<String, String> {
    if users.is_empty() {
        return Err(
            "No users configured. Add a \"users\" map to ~/.roadtrip/config.json.".to_string(),
        );
    }

    let uname = username.trim().to_lowercase();
    let pwd = password.trim();

    match normalized_users(users).get(&uname) {
        Some(expected) if expected == pwd => Ok(uname),
        _ => Err("Invalid username or password.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> HashMap<String, String> {
        [
            ("Tim".to_string(), "s3cret".to_string()),
            ("buddy".to_string(), "pass word".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_username_case_insensitive_and_trimmed() {
        assert_eq!(authenticate(&users(), " TIM ", "s3cret").unwrap(), "tim");
        assert_eq!(authenticate(&users(), "tim", "s3cret").unwrap(), "tim");
    }

    #[test]
    fn test_password_case_sensitive() {
        assert!(authenticate(&users(), "tim", "S3CRET").is_err());
    }

    #[test]
    fn test_password_trimmed() {
        assert_eq!(authenticate(&users(), "tim", " s3cret ").unwrap(), "tim");
    }

    #[test]
    fn test_wrong_password_and_unknown_user() {
        assert!(authenticate(&users(), "tim", "nope").is_err());
        assert!(authenticate(&users(), "stranger", "s3cret").is_err());
    }

    #[test]
    fn test_empty_user_map_is_a_config_error() {
        let err = authenticate(&HashMap::new(), "tim", "s3cret").unwrap_err();
        assert!(err.contains("No users configured"));
    }
}
