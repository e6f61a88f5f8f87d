use log::warn;

use crate::config::settings::SessionConfig;
use crate::models::Role;

/// Who is using the client. Built once at startup and handed to whatever
/// needs the user's identity or token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub username: Option<String>,
    pub role: Role,
    pub token: Option<String>,
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Session {
    /// Config values, overridden by whatever was given on the command line.
    pub fn resolve(config: &SessionConfig, user: Option<&str>, role: Option<&str>) -> Self {
        let username = user.and_then(non_empty).or_else(|| non_empty(&config.username));
        let role_str = role.unwrap_or(config.role.as_str());
        let role = role_str.parse::<Role>().unwrap_or_else(|e| {
            warn!("{}; falling back to read-only", e);
            Role::Readonly
        });
        Session {
            username,
            role,
            token: non_empty(&config.token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_overrides_config() {
        let config = SessionConfig {
            username: "asha".to_string(),
            role: "admin".to_string(),
            token: String::new(),
        };
        let session = Session::resolve(&config, Some("ravi"), Some("user"));
        assert_eq!(session.username.as_deref(), Some("ravi"));
        assert_eq!(session.role, Role::User);
        assert_eq!(session.token, None);
    }

    #[test]
    fn unknown_role_is_read_only() {
        let config = SessionConfig {
            username: " ".to_string(),
            role: "superuser".to_string(),
            token: "abc".to_string(),
        };
        let session = Session::resolve(&config, None, None);
        assert_eq!(session.username, None);
        assert_eq!(session.role, Role::Readonly);
        assert_eq!(session.token.as_deref(), Some("abc"));
    }
}
