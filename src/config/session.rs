use serde::{Deserialize, Serialize};

/// The logged-in user, saved to `session.toml` after a successful login.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Session {
    pub user: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
}

impl Session {
    /// Initials of the display name, e.g. "Anna Puig" -> "AP".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        let session = Session {
            user: "apuig".into(),
            name: "anna  puig i sala".into(),
            company: "Acme SL".into(),
        };
        assert_eq!(session.initials(), "APIS");
    }

    #[test]
    fn test_initials_empty_name() {
        let session = Session {
            user: "apuig".into(),
            name: String::new(),
            company: String::new(),
        };
        assert_eq!(session.initials(), "");
    }
}
