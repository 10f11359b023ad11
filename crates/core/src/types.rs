/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Payment zone numbers are small integers (1 is the city centre).
pub type ZoneNumber = i16;
