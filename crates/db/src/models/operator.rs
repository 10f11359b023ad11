//! Parking operator model.

use parkcheck_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A parking operator, linked one-to-one to the user it authenticates as.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Operator {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateOperator {
    pub user_id: DbId,
    pub name: String,
}
