use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::StorageError, schema::guides, validation};

/// A how-to for preparing a particular document (vacation request, expense
/// report and so on).
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
#[diesel(table_name = guides)]
pub struct Guide {
    pub id: String,
    pub document: String,
    pub title: String,
    pub text: Option<String>,
    pub file_id: Option<String>,
}

impl Guide {
    #[tracing::instrument(skip(conn))]
    pub fn create(
        document: &str,
        title: &str,
        text: Option<&str>,
        file_id: Option<&str>,
        conn: &mut SqliteConnection,
    ) -> Result<Guide, StorageError> {
        validation::required("document", document)
            .map_err(StorageError::Validation)?;
        validation::required("title", title)
            .map_err(StorageError::Validation)?;

        let guide = Guide {
            id: Uuid::now_v7().to_string(),
            document: document.to_string(),
            title: title.to_string(),
            text: text.map(str::to_string),
            file_id: file_id.map(str::to_string),
        };

        diesel::insert_into(guides::table)
            .values(&guide)
            .execute(conn)?;

        Ok(guide)
    }

    #[tracing::instrument(skip(conn))]
    pub fn fetch(
        guide_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Guide, StorageError> {
        guides::table
            .find(guide_id)
            .first::<Guide>(conn)
            .optional()?
            .ok_or(StorageError::NotFound)
    }

    pub fn all(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Guide>, StorageError> {
        Ok(guides::table.load(conn)?)
    }

    #[tracing::instrument(skip(self, conn))]
    pub fn update(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        validation::required("document", &self.document)
            .map_err(StorageError::Validation)?;
        validation::required("title", &self.title)
            .map_err(StorageError::Validation)?;

        let n = diesel::update(guides::table.find(&self.id))
            .set((
                guides::document.eq(&self.document),
                guides::title.eq(&self.title),
                guides::text.eq(&self.text),
                guides::file_id.eq(&self.file_id),
            ))
            .execute(conn)?;

        match n {
            0 => Err(StorageError::NotFound),
            _ => Ok(()),
        }
    }

    #[tracing::instrument(skip(conn))]
    pub fn delete(
        guide_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        let n = diesel::delete(guides::table.find(guide_id)).execute(conn)?;

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
    fn guide_crud() {
        let mut conn = test_conn();

        let guide = Guide::create(
            "vacation_request",
            "How to request vacation",
            Some("Fill in the form and send it to HR"),
            None,
            &mut conn,
        )
        .unwrap();

        let reloaded = Guide::fetch(&guide.id, &mut conn).unwrap();
        assert_eq!(reloaded.document, "vacation_request");

        Guide::delete(&guide.id, &mut conn).unwrap();
        assert!(matches!(
            Guide::fetch(&guide.id, &mut conn).unwrap_err(),
            StorageError::NotFound
        ));
    }

    #[test]
    fn document_label_is_required() {
        let mut conn = test_conn();

        let err =
            Guide::create("", "Title", None, None, &mut conn).unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)));
    }
}
