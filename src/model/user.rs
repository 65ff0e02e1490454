/// Row of the `Users` table. Never serialized: it carries the password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub user_id: i32,
    pub username: String,
    pub password: String,
    pub employee_id: Option<i32>,
    pub role: String,
}
