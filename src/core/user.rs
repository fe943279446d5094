use serde::{Deserialize, Serialize};

/// The logged-in identity, as returned by the login endpoint.
///
/// Extra fields in the response (tokens, email) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub image: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }
}

/// Body of the login request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_login_response_and_drops_tokens() {
        let body = r#"{
            "id": 1,
            "username": "emilys",
            "email": "emily.johnson@x.dummyjson.com",
            "firstName": "Emily",
            "lastName": "Johnson",
            "gender": "female",
            "image": "https://dummyjson.com/icon/emilys/128",
            "accessToken": "abc",
            "refreshToken": "def"
        }"#;
        let user: User = serde_json::from_str(body).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.first_name, "Emily");
        assert_eq!(user.full_name(), "Emily Johnson");
        assert_eq!(user.handle(), "@emilys");

        let out = serde_json::to_value(&user).unwrap();
        assert!(out.get("accessToken").is_none());
        assert_eq!(out["lastName"], "Johnson");
    }

    #[test]
    fn full_name_trims_missing_parts() {
        let user = User {
            id: 2,
            username: "solo".into(),
            first_name: "Cher".into(),
            last_name: String::new(),
            gender: String::new(),
            image: String::new(),
        };
        assert_eq!(user.full_name(), "Cher");
    }
}
