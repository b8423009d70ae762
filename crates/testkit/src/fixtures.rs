//! Loggable fixtures.

use fieldlog_ports::{Field, Loggable};

/// Flat loggable contributing a user id and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Numeric id.
    pub id: u64,
    /// Display name.
    pub name: String,
}

impl Loggable for User {
    fn to_log(&self) -> Vec<Field> {
        vec![
            Field::u64("user_id", self.id),
            Field::string("user_name", self.name.clone()),
        ]
    }
}

/// Nested loggable: a request carrying a [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Request path.
    pub path: String,
    /// Authenticated user.
    pub user: User,
}

impl Loggable for Request {
    fn to_log(&self) -> Vec<Field> {
        vec![
            Field::string("path", self.path.clone()),
            Field::object(self.user.clone()),
        ]
    }
}

/// A request for `/health` by user 7.
pub fn sample_request() -> Request {
    Request {
        path: "/health".into(),
        user: User {
            id: 7,
            name: "ada".into(),
        },
    }
}
