use serde::{Deserialize, Serialize};

/// Privilege level of a user account.
///
/// `Admin` replaces the "account with id 1" convention of older single-tenant
/// blogs: privilege lives on the row, not in the insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Reader,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Reader => "reader",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "reader" => Some(Role::Reader),
            _ => None,
        }
    }
}

/// User entity - an account able to log in and comment.
///
/// The password hash is an opaque string produced by the password service;
/// the plaintext never reaches this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Assigned by the store on insert; 0 until then.
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
}

impl User {
    /// Create a user pending insertion. The store assigns the id.
    pub fn new(email: String, password_hash: String, name: String, role: Role) -> Self {
        Self {
            id: 0,
            email,
            password_hash,
            name,
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
