use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::StorageError,
    schema::{feedback, feedback_attachments},
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
#[diesel(table_name = feedback)]
pub struct Feedback {
    pub id: String,
    pub user_id: Option<String>,
    pub text: String,
    pub is_read: bool,
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
#[diesel(table_name = feedback_attachments)]
pub struct FeedbackAttachment {
    pub id: String,
    pub feedback_id: String,
    pub file_id: Option<String>,
}

impl Feedback {
    #[tracing::instrument(skip(conn))]
    pub fn create(
        user_id: Option<&str>,
        text: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Feedback, StorageError> {
        validation::required("text", text)
            .map_err(StorageError::Validation)?;

        let entry = Feedback {
            id: Uuid::now_v7().to_string(),
            user_id: user_id.map(str::to_string),
            text: text.to_string(),
            is_read: false,
        };

        diesel::insert_into(feedback::table)
            .values(&entry)
            .execute(conn)?;

        Ok(entry)
    }

    #[tracing::instrument(skip(conn))]
    pub fn fetch(
        feedback_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Feedback, StorageError> {
        feedback::table
            .find(feedback_id)
            .first::<Feedback>(conn)
            .optional()?
            .ok_or(StorageError::NotFound)
    }

    pub fn all(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Feedback>, StorageError> {
        Ok(feedback::table.load(conn)?)
    }

    pub fn unread(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Feedback>, StorageError> {
        Ok(feedback::table
            .filter(feedback::is_read.eq(false))
            .load(conn)?)
    }

    #[tracing::instrument(skip(conn))]
    pub fn mark_read(
        feedback_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        let n = diesel::update(feedback::table.find(feedback_id))
            .set(feedback::is_read.eq(true))
            .execute(conn)?;

        match n {
            0 => Err(StorageError::NotFound),
            _ => Ok(()),
        }
    }

    /// Removes the feedback row and every attachment hanging off it in a
    /// single transaction, so no orphaned attachment rows can remain.
    #[tracing::instrument(skip(conn))]
    pub fn delete(
        feedback_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        conn.transaction::<_, StorageError, _>(|conn| {
            diesel::delete(feedback_attachments::table.filter(
                feedback_attachments::feedback_id.eq(feedback_id),
            ))
            .execute(conn)?;

            let n = diesel::delete(feedback::table.find(feedback_id))
                .execute(conn)?;

            match n {
                0 => Err(StorageError::NotFound),
                _ => Ok(()),
            }
        })
    }

    pub fn attachments(
        feedback_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<FeedbackAttachment>, StorageError> {
        Ok(feedback_attachments::table
            .filter(feedback_attachments::feedback_id.eq(feedback_id))
            .load(conn)?)
    }
}

impl FeedbackAttachment {
    #[tracing::instrument(skip(conn))]
    pub fn create(
        feedback_id: &str,
        file_id: Option<&str>,
        conn: &mut SqliteConnection,
    ) -> Result<FeedbackAttachment, StorageError> {
        let attachment = FeedbackAttachment {
            id: Uuid::now_v7().to_string(),
            feedback_id: feedback_id.to_string(),
            file_id: file_id.map(str::to_string),
        };

        diesel::insert_into(feedback_attachments::table)
            .values(&attachment)
            .execute(conn)?;

        Ok(attachment)
    }

    #[tracing::instrument(skip(conn))]
    pub fn delete(
        attachment_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        let n = diesel::delete(feedback_attachments::table.find(attachment_id))
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
    use crate::{state::test_conn, users::User};

    #[test]
    fn cascade_delete_leaves_no_orphaned_attachments() {
        let mut conn = test_conn();

        let entry =
            Feedback::create(None, "The canteen menu is outdated", &mut conn)
                .unwrap();
        FeedbackAttachment::create(&entry.id, Some("photo-1"), &mut conn)
            .unwrap();
        FeedbackAttachment::create(&entry.id, Some("photo-2"), &mut conn)
            .unwrap();

        Feedback::delete(&entry.id, &mut conn).unwrap();

        assert!(Feedback::attachments(&entry.id, &mut conn)
            .unwrap()
            .is_empty());
        assert!(matches!(
            Feedback::fetch(&entry.id, &mut conn).unwrap_err(),
            StorageError::NotFound
        ));
    }

    #[test]
    fn attachment_requires_existing_feedback() {
        let mut conn = test_conn();

        let err =
            FeedbackAttachment::create("no-such-feedback", None, &mut conn)
                .unwrap_err();

        assert!(matches!(err, StorageError::ForeignKeyViolation(_)));
    }

    #[test]
    fn unread_then_mark_read() {
        let mut conn = test_conn();

        let entry =
            Feedback::create(None, "Please add vegetarian options", &mut conn)
                .unwrap();
        assert_eq!(Feedback::unread(&mut conn).unwrap().len(), 1);

        Feedback::mark_read(&entry.id, &mut conn).unwrap();
        assert!(Feedback::unread(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn author_cannot_be_deleted_while_feedback_exists() {
        let mut conn = test_conn();

        let user = User::create(
            42, "Anna", "Petrova", "Ivanovna", "4821", false, &mut conn,
        )
        .unwrap();
        Feedback::create(Some(&user.id), "Great bot!", &mut conn).unwrap();

        let err = User::delete(&user.id, &mut conn).unwrap_err();
        assert!(matches!(err, StorageError::ForeignKeyViolation(_)));
    }

    #[test]
    fn empty_text_fails_validation() {
        let mut conn = test_conn();

        let err = Feedback::create(None, "  ", &mut conn).unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)));
    }
}
