//! Canteen opening hours and the menu published for each day. A menu can
//! carry its content as a photo, an attached file, or plain text.

use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::StorageError,
    schema::{canteen, canteen_menu},
};

/// How a menu's `file_id` should be interpreted by the messaging layer.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MenuFileType {
    #[serde(rename = "PHOTO")]
    Photo,
    #[serde(rename = "FILE")]
    File,
}

impl MenuFileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuFileType::Photo => "PHOTO",
            MenuFileType::File => "FILE",
        }
    }
}

impl std::fmt::Display for MenuFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MenuFileType {
    type Err = StorageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "PHOTO" => Ok(MenuFileType::Photo),
            "FILE" => Ok(MenuFileType::File),
            other => Err(StorageError::Validation(format!(
                "unknown menu file type `{other}`"
            ))),
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
#[diesel(table_name = canteen)]
pub struct Canteen {
    pub id: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: Option<String>,
}

impl Canteen {
    #[tracing::instrument(skip(conn))]
    pub fn create(
        start_time: NaiveTime,
        end_time: NaiveTime,
        description: Option<&str>,
        conn: &mut SqliteConnection,
    ) -> Result<Canteen, StorageError> {
        let entry = Canteen {
            id: Uuid::now_v7().to_string(),
            start_time,
            end_time,
            description: description.map(str::to_string),
        };

        diesel::insert_into(canteen::table)
            .values(&entry)
            .execute(conn)?;

        Ok(entry)
    }

    #[tracing::instrument(skip(conn))]
    pub fn fetch(
        canteen_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Canteen, StorageError> {
        canteen::table
            .find(canteen_id)
            .first::<Canteen>(conn)
            .optional()?
            .ok_or(StorageError::NotFound)
    }

    pub fn all(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Canteen>, StorageError> {
        Ok(canteen::table.load(conn)?)
    }

    #[tracing::instrument(skip(self, conn))]
    pub fn update(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        let n = diesel::update(canteen::table.find(&self.id))
            .set((
                canteen::start_time.eq(self.start_time),
                canteen::end_time.eq(self.end_time),
                canteen::description.eq(&self.description),
            ))
            .execute(conn)?;

        match n {
            0 => Err(StorageError::NotFound),
            _ => Ok(()),
        }
    }

    #[tracing::instrument(skip(conn))]
    pub fn delete(
        canteen_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        let n =
            diesel::delete(canteen::table.find(canteen_id)).execute(conn)?;

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
#[diesel(table_name = canteen_menu)]
pub struct CanteenMenu {
    pub id: String,
    pub date: NaiveDate,
    pub file_id: Option<String>,
    pub file_type: Option<String>,
    pub menu: Option<String>,
}

impl CanteenMenu {
    /// The declared file type, parsed back out of storage.
    pub fn file_type(&self) -> Result<Option<MenuFileType>, StorageError> {
        self.file_type.as_deref().map(str::parse).transpose()
    }

    #[tracing::instrument(skip(conn))]
    pub fn create(
        date: NaiveDate,
        file_id: Option<&str>,
        file_type: Option<MenuFileType>,
        menu: Option<&str>,
        conn: &mut SqliteConnection,
    ) -> Result<CanteenMenu, StorageError> {
        let entry = CanteenMenu {
            id: Uuid::now_v7().to_string(),
            date,
            file_id: file_id.map(str::to_string),
            file_type: file_type.map(|t| t.as_str().to_string()),
            menu: menu.map(str::to_string),
        };

        diesel::insert_into(canteen_menu::table)
            .values(&entry)
            .execute(conn)?;

        Ok(entry)
    }

    #[tracing::instrument(skip(conn))]
    pub fn fetch(
        menu_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<CanteenMenu, StorageError> {
        canteen_menu::table
            .find(menu_id)
            .first::<CanteenMenu>(conn)
            .optional()?
            .ok_or(StorageError::NotFound)
    }

    /// The menu published for a given day.
    #[tracing::instrument(skip(conn))]
    pub fn menu_on(
        date: NaiveDate,
        conn: &mut SqliteConnection,
    ) -> Result<CanteenMenu, StorageError> {
        canteen_menu::table
            .filter(canteen_menu::date.eq(date))
            .first::<CanteenMenu>(conn)
            .optional()?
            .ok_or(StorageError::NotFound)
    }

    #[tracing::instrument(skip(self, conn))]
    pub fn update(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        // refuse to write back a file type outside the declared set
        self.file_type()?;

        let n = diesel::update(canteen_menu::table.find(&self.id))
            .set((
                canteen_menu::date.eq(self.date),
                canteen_menu::file_id.eq(&self.file_id),
                canteen_menu::file_type.eq(&self.file_type),
                canteen_menu::menu.eq(&self.menu),
            ))
            .execute(conn)?;

        match n {
            0 => Err(StorageError::NotFound),
            _ => Ok(()),
        }
    }

    #[tracing::instrument(skip(conn))]
    pub fn delete(
        menu_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        let n = diesel::delete(canteen_menu::table.find(menu_id))
            .execute(conn)?;

        match n {
            0 => Err(StorageError::NotFound),
            _ => Ok(()),
        }
    }
}
