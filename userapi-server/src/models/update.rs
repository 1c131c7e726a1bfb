//! Partial UPDATE assembly for the users table
//!
//! A [`UserPatch`] records which columns the caller supplied; [`build_update`]
//! compiles it into SQL text plus ordered bind parameters. Values never reach
//! the statement text.

/// Columns supplied by a partial update. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    name: Option<String>,
    email: Option<String>,
}

impl UserPatch {
    pub fn new(name: Option<String>, email: Option<String>) -> Self {
        Self {
            name: name.filter(|v| !v.is_empty()),
            email: email.filter(|v| !v.is_empty()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// True when there is nothing to set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    Integer(i64),
}

/// Parameterized statement ready for [`crate::db::UserRepo::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatement {
    sql: String,
    params: Vec<SqlParam>,
}

impl UpdateStatement {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<SqlParam>) {
        (self.sql, self.params)
    }
}

/// Build `UPDATE users SET ... WHERE id = ?` for the supplied columns.
///
/// `name` always precedes `email`; the id is the last parameter. An empty
/// patch yields a statement with no assignments, so callers must reject it
/// first (see [`UserPatch::is_empty`]).
pub fn build_update(id: i64, patch: &UserPatch) -> UpdateStatement {
    let mut assignments = Vec::with_capacity(2);
    let mut params = Vec::with_capacity(3);

    if let Some(name) = &patch.name {
        assignments.push("name = ?");
        params.push(SqlParam::Text(name.clone()));
    }
    if let Some(email) = &patch.email {
        assignments.push("email = ?");
        params.push(SqlParam::Text(email.clone()));
    }
    params.push(SqlParam::Integer(id));

    UpdateStatement {
        sql: format!("UPDATE users SET {} WHERE id = ?", assignments.join(", ")),
        params,
    }
}
