use diesel::{
    RunQueryDsl, SqliteConnection,
    r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError},
};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// SQLite ships with foreign key enforcement switched off; it has to be
/// enabled once per connection, so this runs on every pool checkout.
#[derive(Debug)]
struct ForeignKeysOn;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error>
    for ForeignKeysOn
{
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<(), diesel::r2d2::Error> {
        diesel::sql_query("PRAGMA foreign_keys = ON;")
            .execute(conn)
            .map(|_| ())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn build_pool(database_url: &str) -> Result<DbPool, PoolError> {
    Pool::builder()
        .max_size(if database_url == ":memory:" { 1 } else { 10 })
        .connection_customizer(Box::new(ForeignKeysOn))
        .build(ConnectionManager::<SqliteConnection>::new(database_url))
}

#[cfg(test)]
pub(crate) fn test_conn() -> SqliteConnection {
    use diesel::Connection;
    use diesel_migrations::MigrationHarness;

    let mut conn = SqliteConnection::establish(":memory:").unwrap();
    diesel::sql_query("PRAGMA foreign_keys = ON;")
        .execute(&mut conn)
        .unwrap();
    conn.run_pending_migrations(crate::MIGRATIONS).unwrap();
    conn
}

#[cfg(test)]
mod tests {
    use diesel::RunQueryDsl;
    use diesel_migrations::MigrationHarness;

    #[test]
    fn pool_connections_enforce_foreign_keys() {
        let pool = super::build_pool(":memory:").unwrap();
        let mut conn = pool.get().unwrap();

        conn.run_pending_migrations(crate::MIGRATIONS).unwrap();

        let res = diesel::sql_query(
            "INSERT INTO faq_keywords (id, faq_id, word) \
             VALUES ('k1', 'missing', 'office');",
        )
        .execute(&mut conn);

        assert!(res.is_err());
    }
}
