//! Flat reference content shown by the bot: general company information and
//! the organizational structure.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::StorageError,
    schema::{company_info, organizational_structure},
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
#[diesel(table_name = company_info)]
pub struct CompanyInfo {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub file_path: Option<String>,
    pub image_path: Option<String>,
}

impl CompanyInfo {
    #[tracing::instrument(skip(conn))]
    pub fn create(
        title: &str,
        content: Option<&str>,
        file_path: Option<&str>,
        image_path: Option<&str>,
        conn: &mut SqliteConnection,
    ) -> Result<CompanyInfo, StorageError> {
        validation::required("title", title)
            .map_err(StorageError::Validation)?;

        let info = CompanyInfo {
            id: Uuid::now_v7().to_string(),
            title: title.to_string(),
            content: content.map(str::to_string),
            file_path: file_path.map(str::to_string),
            image_path: image_path.map(str::to_string),
        };

        diesel::insert_into(company_info::table)
            .values(&info)
            .execute(conn)?;

        Ok(info)
    }

    #[tracing::instrument(skip(conn))]
    pub fn fetch(
        info_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<CompanyInfo, StorageError> {
        company_info::table
            .find(info_id)
            .first::<CompanyInfo>(conn)
            .optional()?
            .ok_or(StorageError::NotFound)
    }

    pub fn all(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<CompanyInfo>, StorageError> {
        Ok(company_info::table.load(conn)?)
    }

    #[tracing::instrument(skip(self, conn))]
    pub fn update(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        validation::required("title", &self.title)
            .map_err(StorageError::Validation)?;

        let n = diesel::update(company_info::table.find(&self.id))
            .set((
                company_info::title.eq(&self.title),
                company_info::content.eq(&self.content),
                company_info::file_path.eq(&self.file_path),
                company_info::image_path.eq(&self.image_path),
            ))
            .execute(conn)?;

        match n {
            0 => Err(StorageError::NotFound),
            _ => Ok(()),
        }
    }

    #[tracing::instrument(skip(conn))]
    pub fn delete(
        info_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        let n = diesel::delete(company_info::table.find(info_id))
            .execute(conn)?;

        match n {
            0 => Err(StorageError::NotFound),
            _ => Ok(()),
        }
    }
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
#[diesel(table_name = organizational_structure)]
pub struct OrganizationalStructure {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub file_id: Option<String>,
}

impl OrganizationalStructure {
    #[tracing::instrument(skip(conn))]
    pub fn create(
        title: &str,
        content: Option<&str>,
        file_id: Option<&str>,
        conn: &mut SqliteConnection,
    ) -> Result<OrganizationalStructure, StorageError> {
        validation::required("title", title)
            .map_err(StorageError::Validation)?;

        let entry = OrganizationalStructure {
            id: Uuid::now_v7().to_string(),
            title: title.to_string(),
            content: content.map(str::to_string),
            file_id: file_id.map(str::to_string),
        };

        diesel::insert_into(organizational_structure::table)
            .values(&entry)
            .execute(conn)?;

        Ok(entry)
    }

    #[tracing::instrument(skip(conn))]
    pub fn fetch(
        entry_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<OrganizationalStructure, StorageError> {
        organizational_structure::table
            .find(entry_id)
            .first::<OrganizationalStructure>(conn)
            .optional()?
            .ok_or(StorageError::NotFound)
    }

    pub fn all(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<OrganizationalStructure>, StorageError> {
        Ok(organizational_structure::table.load(conn)?)
    }

    #[tracing::instrument(skip(self, conn))]
    pub fn update(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        validation::required("title", &self.title)
            .map_err(StorageError::Validation)?;

        let n =
            diesel::update(organizational_structure::table.find(&self.id))
                .set((
                    organizational_structure::title.eq(&self.title),
                    organizational_structure::content.eq(&self.content),
                    organizational_structure::file_id.eq(&self.file_id),
                ))
                .execute(conn)?;

        match n {
            0 => Err(StorageError::NotFound),
            _ => Ok(()),
        }
    }

    #[tracing::instrument(skip(conn))]
    pub fn delete(
        entry_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        let n =
            diesel::delete(organizational_structure::table.find(entry_id))
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
    fn company_info_crud() {
        let mut conn = test_conn();

        let mut info = CompanyInfo::create(
            "About us",
            Some("Founded in 1998"),
            None,
            Some("images/hq.jpg"),
            &mut conn,
        )
        .unwrap();

        info.content = Some("Founded in 1998, 1200 employees".to_string());
        info.update(&mut conn).unwrap();

        let reloaded = CompanyInfo::fetch(&info.id, &mut conn).unwrap();
        assert_eq!(
            reloaded.content.as_deref(),
            Some("Founded in 1998, 1200 employees")
        );

        CompanyInfo::delete(&info.id, &mut conn).unwrap();
        assert!(matches!(
            CompanyInfo::fetch(&info.id, &mut conn).unwrap_err(),
            StorageError::NotFound
        ));
    }

    #[test]
    fn structure_requires_title() {
        let mut conn = test_conn();

        let err = OrganizationalStructure::create("", None, None, &mut conn)
            .unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)));
    }
}
