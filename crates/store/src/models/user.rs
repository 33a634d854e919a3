use forgewiki_core::types::DbId;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: DbId,
    pub login: String,
    pub full_name: String,
    pub email: String,
    /// PHC-formatted Argon2id hash.
    pub password_hash: String,
    pub is_admin: bool,
}

impl User {
    /// Name recorded on commits made by this user.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.login
        } else {
            &self.full_name
        }
    }
}

/// DTO for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub login: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}
