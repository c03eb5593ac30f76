//! Repository for the `roles` table.
//!
//! Role rows are fixed by migration; callers only ever see them as
//! [`Role`] values.

use orderdesk_core::access::Role;
use orderdesk_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

/// Maps between stored role rows and access roles.
pub struct RoleRepo;

impl RoleRepo {
    /// The access role held by a user, or `None` if the user does not exist.
    pub async fn role_of_user(pool: &PgPool, user_id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let name = sqlx::query_scalar::<_, String>(
            "SELECT r.name FROM users u
             JOIN roles r ON r.id = u.role_id
             WHERE u.id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(name.as_deref().map(Role::from_name))
    }

    /// The `roles.id` backing an access role, for user inserts.
    pub async fn id_of<'e, E>(executor: E, role: Role) -> Result<DbId, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM roles WHERE name = $1")
            .bind(role.as_str())
            .fetch_one(executor)
            .await
    }
}
