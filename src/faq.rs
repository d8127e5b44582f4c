use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::StorageError,
    schema::{faq, faq_keywords},
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
#[diesel(table_name = faq)]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
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
#[diesel(table_name = faq_keywords)]
pub struct FaqKeyword {
    pub id: String,
    pub faq_id: String,
    pub word: String,
}

impl Faq {
    #[tracing::instrument(skip(conn))]
    pub fn create(
        question: &str,
        answer: &str,
        category: Option<&str>,
        conn: &mut SqliteConnection,
    ) -> Result<Faq, StorageError> {
        validation::required("question", question)
            .map_err(StorageError::Validation)?;
        validation::required("answer", answer)
            .map_err(StorageError::Validation)?;

        let entry = Faq {
            id: Uuid::now_v7().to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            category: category.map(str::to_string),
        };

        diesel::insert_into(faq::table)
            .values(&entry)
            .execute(conn)?;

        Ok(entry)
    }

    #[tracing::instrument(skip(conn))]
    pub fn fetch(
        faq_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Faq, StorageError> {
        faq::table
            .find(faq_id)
            .first::<Faq>(conn)
            .optional()?
            .ok_or(StorageError::NotFound)
    }

    pub fn all(conn: &mut SqliteConnection) -> Result<Vec<Faq>, StorageError> {
        Ok(faq::table.load(conn)?)
    }

    /// FAQ entries whose keyword set contains `term`.
    #[tracing::instrument(skip(conn))]
    pub fn search(
        term: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Faq>, StorageError> {
        Ok(faq::table
            .inner_join(faq_keywords::table)
            .filter(faq_keywords::word.eq(term))
            .select(Faq::as_select())
            .distinct()
            .load(conn)?)
    }

    #[tracing::instrument(skip(self, conn))]
    pub fn update(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        validation::required("question", &self.question)
            .map_err(StorageError::Validation)?;
        validation::required("answer", &self.answer)
            .map_err(StorageError::Validation)?;

        let n = diesel::update(faq::table.find(&self.id))
            .set((
                faq::question.eq(&self.question),
                faq::answer.eq(&self.answer),
                faq::category.eq(&self.category),
            ))
            .execute(conn)?;

        match n {
            0 => Err(StorageError::NotFound),
            _ => Ok(()),
        }
    }

    /// Removes the entry together with all of its keywords. Both deletes
    /// commit or roll back as one unit.
    #[tracing::instrument(skip(conn))]
    pub fn delete(
        faq_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        conn.transaction::<_, StorageError, _>(|conn| {
            diesel::delete(
                faq_keywords::table.filter(faq_keywords::faq_id.eq(faq_id)),
            )
            .execute(conn)?;

            let n = diesel::delete(faq::table.find(faq_id)).execute(conn)?;

            match n {
                0 => Err(StorageError::NotFound),
                _ => Ok(()),
            }
        })
    }

    pub fn keywords(
        faq_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<FaqKeyword>, StorageError> {
        Ok(faq_keywords::table
            .filter(faq_keywords::faq_id.eq(faq_id))
            .load(conn)?)
    }
}

impl FaqKeyword {
    #[tracing::instrument(skip(conn))]
    pub fn create(
        faq_id: &str,
        word: &str,
        conn: &mut SqliteConnection,
    ) -> Result<FaqKeyword, StorageError> {
        validation::required("word", word)
            .map_err(StorageError::Validation)?;

        let keyword = FaqKeyword {
            id: Uuid::now_v7().to_string(),
            faq_id: faq_id.to_string(),
            word: word.to_string(),
        };

        diesel::insert_into(faq_keywords::table)
            .values(&keyword)
            .execute(conn)?;

        Ok(keyword)
    }

    #[tracing::instrument(skip(conn))]
    pub fn delete(
        keyword_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<(), StorageError> {
        let n = diesel::delete(faq_keywords::table.find(keyword_id))
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
    fn deleting_a_faq_removes_its_keywords() {
        let mut conn = test_conn();

        let entry = Faq::create(
            "Where is the office?",
            "Main street 1",
            Some("general"),
            &mut conn,
        )
        .unwrap();
        for word in ["office", "address", "location"] {
            FaqKeyword::create(&entry.id, word, &mut conn).unwrap();
        }
        assert_eq!(Faq::keywords(&entry.id, &mut conn).unwrap().len(), 3);

        Faq::delete(&entry.id, &mut conn).unwrap();

        assert!(Faq::keywords(&entry.id, &mut conn).unwrap().is_empty());
        assert!(matches!(
            Faq::fetch(&entry.id, &mut conn).unwrap_err(),
            StorageError::NotFound
        ));
    }

    #[test]
    fn keyword_requires_existing_faq() {
        let mut conn = test_conn();

        let err =
            FaqKeyword::create("no-such-faq", "office", &mut conn).unwrap_err();

        assert!(matches!(err, StorageError::ForeignKeyViolation(_)));
    }

    #[test]
    fn search_matches_on_keyword() {
        let mut conn = test_conn();

        let first = Faq::create(
            "Where is the office?",
            "Main street 1",
            None,
            &mut conn,
        )
        .unwrap();
        let second = Faq::create(
            "How do I book a meeting room?",
            "Through the intranet",
            None,
            &mut conn,
        )
        .unwrap();
        FaqKeyword::create(&first.id, "office", &mut conn).unwrap();
        FaqKeyword::create(&first.id, "address", &mut conn).unwrap();
        FaqKeyword::create(&second.id, "booking", &mut conn).unwrap();

        let hits = Faq::search("office", &mut conn).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, first.id);

        assert!(Faq::search("payroll", &mut conn).unwrap().is_empty());
    }

    #[test]
    fn empty_question_fails_validation() {
        let mut conn = test_conn();

        let err = Faq::create("", "answer", None, &mut conn).unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)));
    }
}
