//! Virtual office tours and the materials (files, text blocks) attached to
//! each of them.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::StorageError,
    schema::{excursion_materials, virtual_excursions},
    validation,
};

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
#[diesel(table_name = virtual_excursions)]
pub struct VirtualExcursion {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
}

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
#[diesel(table_name = excursion_materials)]
pub struct ExcursionMaterial {
    pub id: String,
    pub excursion_id: String,
    pub file_id: Option<String>,
    pub name: String,
    pub text: Option<String>,
}

impl VirtualExcursion {
    #[tracing::instrument(skip(conn))]
    pub fn create(
        title: &str,
        description: Option<&str>,
        conn: &mut SqliteConnection,
    ) -> Result<VirtualExcursion, StorageError> {
        validation::required("title", title)
            .map_err(StorageError::Validation)?;

        let excursion = VirtualExcursion {
            id: Uuid::now_v7().to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
        };

        diesel::insert_into(virtual_excursions::table)
            .values(&excursion)
            .execute(conn)?;

        Ok(excursion)
    }

    #[tracing::instrument(skip(conn))]
    pub fn fetch(
        excursion_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<VirtualExcursion, StorageError> {
        virtual_excursions::table
            .find(excursion_id)
            .first::<VirtualExcursion>(conn)
            .optional()?
            .ok_or(StorageError::NotFound)
    }

    pub fn all(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<VirtualExcursion>, StorageError> {
        Ok(virtual_excursions::table.load(conn)?)
    }

    #[tracing::instrument(skip(self, conn))]
    pub fn update(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        validation::required("title", &self.title)
            .map_err(StorageError::Validation)?;

        let n = diesel::update(virtual_excursions::table.find(&self.id))
            .set((
                virtual_excursions::title.eq(&self.title),
                virtual_excursions::description.eq(&self.description),
            ))
            .execute(conn)?;

        match n {
            0 => Err(StorageError::NotFound),
            _ => Ok(()),
        }
    }

    /// Drops the excursion and every material belonging to it atomically.
    #[tracing::instrument(skip(conn))]
    pub fn delete(
        excursion_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        conn.transaction::<_, StorageError, _>(|conn| {
            diesel::delete(excursion_materials::table.filter(
                excursion_materials::excursion_id.eq(excursion_id),
            ))
            .execute(conn)?;

            let n =
                diesel::delete(virtual_excursions::table.find(excursion_id))
                    .execute(conn)?;

            match n {
                0 => Err(StorageError::NotFound),
                _ => Ok(()),
            }
        })
    }

    pub fn materials(
        excursion_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<ExcursionMaterial>, StorageError> {
        Ok(excursion_materials::table
            .filter(excursion_materials::excursion_id.eq(excursion_id))
            .load(conn)?)
    }
}

impl ExcursionMaterial {
    #[tracing::instrument(skip(conn))]
    pub fn create(
        excursion_id: &str,
        name: &str,
        file_id: Option<&str>,
        text: Option<&str>,
        conn: &mut SqliteConnection,
    ) -> Result<ExcursionMaterial, StorageError> {
        validation::required("name", name)
            .map_err(StorageError::Validation)?;

        let material = ExcursionMaterial {
            id: Uuid::now_v7().to_string(),
            excursion_id: excursion_id.to_string(),
            file_id: file_id.map(str::to_string),
            name: name.to_string(),
            text: text.map(str::to_string),
        };

        diesel::insert_into(excursion_materials::table)
            .values(&material)
            .execute(conn)?;

        Ok(material)
    }

    #[tracing::instrument(skip(conn))]
    pub fn delete(
        material_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        let n = diesel::delete(excursion_materials::table.find(material_id))
            .execute(conn)?;

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
    fn deleting_an_excursion_removes_its_materials() {
        let mut conn = test_conn();

        let tour =
            VirtualExcursion::create("Office tour", None, &mut conn).unwrap();
        ExcursionMaterial::create(
            &tour.id,
            "Lobby",
            Some("video-1"),
            None,
            &mut conn,
        )
        .unwrap();
        ExcursionMaterial::create(
            &tour.id,
            "Open space",
            None,
            Some("Second floor"),
            &mut conn,
        )
        .unwrap();

        VirtualExcursion::delete(&tour.id, &mut conn).unwrap();

        assert!(VirtualExcursion::materials(&tour.id, &mut conn)
            .unwrap()
            .is_empty());
        assert!(matches!(
            VirtualExcursion::fetch(&tour.id, &mut conn).unwrap_err(),
            StorageError::NotFound
        ));
    }

    #[test]
    fn material_requires_existing_excursion() {
        let mut conn = test_conn();

        let err = ExcursionMaterial::create(
            "no-such-tour",
            "Lobby",
            None,
            None,
            &mut conn,
        )
        .unwrap_err();

        assert!(matches!(err, StorageError::ForeignKeyViolation(_)));
    }

    #[test]
    fn material_name_is_required() {
        let mut conn = test_conn();

        let tour =
            VirtualExcursion::create("Office tour", None, &mut conn).unwrap();
        let err =
            ExcursionMaterial::create(&tour.id, "", None, None, &mut conn)
                .unwrap_err();

        assert!(matches!(err, StorageError::Validation(_)));
    }
}
