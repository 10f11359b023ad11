//! Repository for the `operators` table.

use parkcheck_core::types::DbId;
use sqlx::PgPool;

use crate::models::operator::{CreateOperator, Operator};

const COLUMNS: &str = "id, user_id, name, created_at, updated_at";

pub struct OperatorRepo;

impl OperatorRepo {
    pub async fn create(pool: &PgPool, input: &CreateOperator) -> Result<Operator, sqlx::Error> {
        let query = format!(
            "INSERT INTO operators (user_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Operator>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find the operator a user authenticates as, if any.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Operator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM operators WHERE user_id = $1");
        sqlx::query_as::<_, Operator>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
