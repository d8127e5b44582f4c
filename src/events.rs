use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::StorageError, schema::events, validation};

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
#[diesel(table_name = events)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
}

impl Event {
    #[tracing::instrument(skip(conn))]
    pub fn create(
        title: &str,
        description: Option<&str>,
        conn: &mut SqliteConnection,
    ) -> Result<Event, StorageError> {
        validation::required("title", title)
            .map_err(StorageError::Validation)?;

        let event = Event {
            id: Uuid::now_v7().to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
        };

        diesel::insert_into(events::table)
            .values(&event)
            .execute(conn)?;

        Ok(event)
    }

    #[tracing::instrument(skip(conn))]
    pub fn fetch(
        event_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Event, StorageError> {
        events::table
            .find(event_id)
            .first::<Event>(conn)
            .optional()?
            .ok_or(StorageError::NotFound)
    }

    pub fn all(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Event>, StorageError> {
        Ok(events::table.load(conn)?)
    }

    #[tracing::instrument(skip(self, conn))]
    pub fn update(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        validation::required("title", &self.title)
            .map_err(StorageError::Validation)?;

        let n = diesel::update(events::table.find(&self.id))
            .set((
                events::title.eq(&self.title),
                events::description.eq(&self.description),
            ))
            .execute(conn)?;

        match n {
            0 => Err(StorageError::NotFound),
            _ => Ok(()),
        }
    }

    #[tracing::instrument(skip(conn))]
    pub fn delete(
        event_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        let n = diesel::delete(events::table.find(event_id)).execute(conn)?;

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
    fn event_crud() {
        let mut conn = test_conn();

        let mut event =
            Event::create("Summer picnic", Some("Central park, 2pm"), &mut conn)
                .unwrap();
        assert_eq!(Event::all(&mut conn).unwrap().len(), 1);

        event.description = None;
        event.update(&mut conn).unwrap();
        assert!(Event::fetch(&event.id, &mut conn)
            .unwrap()
            .description
            .is_none());

        Event::delete(&event.id, &mut conn).unwrap();
        assert!(matches!(
            Event::fetch(&event.id, &mut conn).unwrap_err(),
            StorageError::NotFound
        ));
    }
}
