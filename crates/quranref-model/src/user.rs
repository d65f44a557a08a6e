use serde::{Deserialize, Serialize};

/// The signed-in user as reported by `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub picture_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_info_round_trips() {
        let user = UserInfo {
            id: 7,
            email: "reader@example.com".to_string(),
            name: "Reader".to_string(),
            picture_url: "https://example.com/p.png".to_string(),
        };
        let json = serde_json::to_string(&user).expect("serialize user");
        let round: UserInfo = serde_json::from_str(&json).expect("deserialize user");
        assert_eq!(round, user);
    }
}
