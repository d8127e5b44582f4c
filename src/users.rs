use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::StorageError, schema::users, validation};

#[derive(
    Queryable,
    Selectable,
    Identifiable,
    Insertable,
    Debug,
    Clone,
    Serialize,
    Deserialize,
)]
#[diesel(table_name = users)]
pub struct User {
    pub id: String,
    pub tg_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub pin_code: String,
    pub is_admin: bool,
}

impl User {
    fn validate(&self) -> Result<(), StorageError> {
        validation::required("first_name", &self.first_name)
            .map_err(StorageError::Validation)?;
        validation::required("last_name", &self.last_name)
            .map_err(StorageError::Validation)?;
        validation::required("middle_name", &self.middle_name)
            .map_err(StorageError::Validation)?;
        validation::is_valid_pin(&self.pin_code)
            .map_err(StorageError::Validation)?;
        Ok(())
    }

    #[tracing::instrument(skip(pin_code, conn))]
    pub fn create(
        tg_id: i64,
        first_name: &str,
        last_name: &str,
        middle_name: &str,
        pin_code: &str,
        is_admin: bool,
        conn: &mut SqliteConnection,
    ) -> Result<User, StorageError> {
        let user = User {
            id: Uuid::now_v7().to_string(),
            tg_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            middle_name: middle_name.to_string(),
            pin_code: pin_code.to_string(),
            is_admin,
        };
        user.validate()?;

        diesel::insert_into(users::table)
            .values(&user)
            .execute(conn)?;

        Ok(user)
    }

    #[tracing::instrument(skip(conn))]
    pub fn fetch(
        user_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<User, StorageError> {
        users::table
            .find(user_id)
            .first::<User>(conn)
            .optional()?
            .ok_or(StorageError::NotFound)
    }

    #[tracing::instrument(skip(conn))]
    pub fn fetch_by_tg_id(
        tg_id: i64,
        conn: &mut SqliteConnection,
    ) -> Result<User, StorageError> {
        users::table
            .filter(users::tg_id.eq(tg_id))
            .first::<User>(conn)
            .optional()?
            .ok_or(StorageError::NotFound)
    }

    /// Looks a user up by the PIN they were issued during registration.
    #[tracing::instrument(skip(pin_code, conn))]
    pub fn fetch_by_pin(
        pin_code: &str,
        conn: &mut SqliteConnection,
    ) -> Result<User, StorageError> {
        users::table
            .filter(users::pin_code.eq(pin_code))
            .first::<User>(conn)
            .optional()?
            .ok_or(StorageError::NotFound)
    }

    pub fn all(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<User>, StorageError> {
        Ok(users::table.load(conn)?)
    }

    pub fn admins(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<User>, StorageError> {
        Ok(users::table
            .filter(users::is_admin.eq(true))
            .load(conn)?)
    }

    #[tracing::instrument(skip(self, conn))]
    pub fn update(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        self.validate()?;

        let n = diesel::update(users::table.find(&self.id))
            .set((
                users::tg_id.eq(self.tg_id),
                users::first_name.eq(&self.first_name),
                users::last_name.eq(&self.last_name),
                users::middle_name.eq(&self.middle_name),
                users::pin_code.eq(&self.pin_code),
                users::is_admin.eq(self.is_admin),
            ))
            .execute(conn)?;

        match n {
            0 => Err(StorageError::NotFound),
            _ => Ok(()),
        }
    }

    /// Feedback rows keep a reference to their author, so deleting a user
    /// who has submitted feedback fails with a foreign key violation.
    #[tracing::instrument(skip(conn))]
    pub fn delete(
        user_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        let n = diesel::delete(users::table.find(user_id)).execute(conn)?;

        match n {
            0 => Err(StorageError::NotFound),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_conn;

    #[test]
    fn duplicate_tg_id_is_rejected() {
        let mut conn = test_conn();

        User::create(100, "Anna", "Petrova", "Ivanovna", "4821", false, &mut conn)
            .unwrap();
        let err =
            User::create(100, "Boris", "Orlov", "Petrovich", "9317", false, &mut conn)
                .unwrap_err();

        assert!(matches!(err, StorageError::ConstraintViolation(_)));
    }

    #[test]
    fn duplicate_pin_code_is_rejected() {
        let mut conn = test_conn();

        User::create(100, "Anna", "Petrova", "Ivanovna", "4821", false, &mut conn)
            .unwrap();
        let err =
            User::create(101, "Boris", "Orlov", "Petrovich", "4821", false, &mut conn)
                .unwrap_err();

        assert!(matches!(err, StorageError::ConstraintViolation(_)));
    }

    #[test]
    fn lookup_by_unique_fields() {
        let mut conn = test_conn();

        let created =
            User::create(42, "Anna", "Petrova", "Ivanovna", "4821", true, &mut conn)
                .unwrap();

        let by_tg = User::fetch_by_tg_id(42, &mut conn).unwrap();
        assert_eq!(by_tg.id, created.id);

        let by_pin = User::fetch_by_pin("4821", &mut conn).unwrap();
        assert_eq!(by_pin.id, created.id);

        assert!(matches!(
            User::fetch_by_tg_id(43, &mut conn).unwrap_err(),
            StorageError::NotFound
        ));
    }

    #[test]
    fn missing_name_fails_validation() {
        let mut conn = test_conn();

        let err =
            User::create(7, "", "Orlov", "Petrovich", "4821", false, &mut conn)
                .unwrap_err();

        assert!(matches!(err, StorageError::Validation(_)));
    }

    #[test]
    fn malformed_pin_fails_validation() {
        let mut conn = test_conn();

        let err =
            User::create(7, "Boris", "Orlov", "Petrovich", "12", false, &mut conn)
                .unwrap_err();

        assert!(matches!(err, StorageError::Validation(_)));
    }

    #[test]
    fn update_revalidates_and_persists() {
        let mut conn = test_conn();

        let mut user =
            User::create(42, "Anna", "Petrova", "Ivanovna", "4821", false, &mut conn)
                .unwrap();

        user.first_name = "Antonina".to_string();
        user.is_admin = true;
        user.update(&mut conn).unwrap();

        let reloaded = User::fetch(&user.id, &mut conn).unwrap();
        assert_eq!(reloaded.first_name, "Antonina");
        assert!(reloaded.is_admin);

        user.first_name = String::new();
        assert!(matches!(
            user.update(&mut conn).unwrap_err(),
            StorageError::Validation(_)
        ));
    }

    #[test]
    fn admins_filter() {
        let mut conn = test_conn();

        User::create(1, "Anna", "Petrova", "Ivanovna", "4821", true, &mut conn)
            .unwrap();
        User::create(2, "Boris", "Orlov", "Petrovich", "9317", false, &mut conn)
            .unwrap();

        let admins = User::admins(&mut conn).unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].tg_id, 1);
    }

    #[test]
    fn delete_missing_user_is_not_found() {
        let mut conn = test_conn();

        assert!(matches!(
            User::delete("nope", &mut conn).unwrap_err(),
            StorageError::NotFound
        ));
    }
}
