/// Primary key of a catalog listing (`products.id`, a PostgreSQL BIGSERIAL).
pub type DbId = i64;
