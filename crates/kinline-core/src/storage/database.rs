//! SQLite-backed genealogical store.
//!
//! Each record kind has its own table holding the record as a JSON document
//! (`json_data`) alongside a few indexed scalar columns. Reads decode the JSON
//! with serde; undecodable rows surface as [`StoreError::Corrupt`].

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::path::Path;

use super::{migrations, GenealogyStore, StoreSnapshot};
use crate::error::{ObjectKind, StoreError};
use crate::model::{Citation, Event, Family, Handle, Person};

/// SQLite database holding people, families, events and citations.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open (or create) the database at `path` and apply migrations.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        migrations::migrate(&store.conn)?;
        Ok(store)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        migrations::migrate(&store.conn)?;
        Ok(store)
    }

    /// Insert or replace every record of `snapshot` in one transaction.
    ///
    /// # Errors
    /// Returns an error if any insert fails; nothing is written in that case.
    pub fn import(&self, snapshot: &StoreSnapshot) -> Result<ImportSummary, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        for person in &snapshot.people {
            tx.execute(
                "INSERT OR REPLACE INTO person (handle, gramps_id, json_data) VALUES (?1, ?2, ?3)",
                params![person.handle.as_str(), person.gramps_id, encode(person)?],
            )?;
        }
        for family in &snapshot.families {
            tx.execute(
                "INSERT OR REPLACE INTO family (handle, gramps_id, json_data) VALUES (?1, ?2, ?3)",
                params![family.handle.as_str(), family.gramps_id, encode(family)?],
            )?;
        }
        for event in &snapshot.events {
            tx.execute(
                "INSERT OR REPLACE INTO event (handle, gramps_id, json_data, event_type, sortval)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    event.handle.as_str(),
                    event.gramps_id,
                    encode(event)?,
                    event.event_type.xml_str(),
                    event.date.sortval(),
                ],
            )?;
        }
        for citation in &snapshot.citations {
            tx.execute(
                "INSERT OR REPLACE INTO citation (handle, gramps_id, json_data) VALUES (?1, ?2, ?3)",
                params![citation.handle.as_str(), citation.gramps_id, encode(citation)?],
            )?;
        }
        tx.commit()?;

        let summary = ImportSummary {
            people: snapshot.people.len(),
            families: snapshot.families.len(),
            events: snapshot.events.len(),
            citations: snapshot.citations.len(),
        };
        tracing::info!(
            people = summary.people,
            families = summary.families,
            events = summary.events,
            citations = summary.citations,
            "imported snapshot"
        );
        Ok(summary)
    }

    fn fetch<T: DeserializeOwned>(&self, kind: ObjectKind, handle: &Handle) -> Result<T, StoreError> {
        let sql = format!("SELECT json_data FROM {} WHERE handle = ?1", kind.as_str());
        let json: Option<String> = self
            .conn
            .query_row(&sql, params![handle.as_str()], |row| row.get(0))
            .optional()?;
        let json = json.ok_or_else(|| StoreError::not_found(kind, handle))?;
        serde_json::from_str(&json).map_err(|e| StoreError::Corrupt {
            kind,
            handle: handle.clone(),
            message: e.to_string(),
        })
    }
}

/// Record counts written by [`SqliteStore::import`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ImportSummary {
    pub people: usize,
    pub families: usize,
    pub events: usize,
    pub citations: usize,
}

fn encode<T: serde::Serialize>(record: &T) -> Result<String, StoreError> {
    serde_json::to_string(record).map_err(|e| StoreError::QueryFailed(e.to_string()))
}

impl GenealogyStore for SqliteStore {
    fn person(&self, handle: &Handle) -> Result<Person, StoreError> {
        self.fetch(ObjectKind::Person, handle)
    }

    fn family(&self, handle: &Handle) -> Result<Family, StoreError> {
        self.fetch(ObjectKind::Family, handle)
    }

    fn event(&self, handle: &Handle) -> Result<Event, StoreError> {
        self.fetch(ObjectKind::Event, handle)
    }

    fn citation(&self, handle: &Handle) -> Result<Citation, StoreError> {
        self.fetch(ObjectKind::Citation, handle)
    }

    fn custom_event_types(&self) -> Result<BTreeSet<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT event_type FROM event WHERE event_type != ''")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut custom = BTreeSet::new();
        for row in rows {
            let name = row?;
            if crate::event_type::EventType::from_standard(&name).is_none() {
                custom.insert(name);
            }
        }
        Ok(custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;
    use crate::event_type::EventType;
    use crate::model::Gender;

    fn snapshot() -> StoreSnapshot {
        StoreSnapshot {
            people: vec![Person::new("I1", Gender::Male).with_name("Tom", "Ward")],
            families: vec![Family::new("F1")],
            events: vec![
                Event::new("E1", EventType::Birth, Date::new(1901, 2, 3)),
                Event::new("E2", EventType::from("Shipwreck"), Date::empty()),
            ],
            citations: vec![Citation::new("C1", 4)],
        }
    }

    #[test]
    fn import_and_read_back() {
        let store = SqliteStore::open_memory().unwrap();
        let summary = store.import(&snapshot()).unwrap();
        assert_eq!(summary.events, 2);

        let person = store.person(&Handle::from("I1")).unwrap();
        assert_eq!(person.primary_name.first_name, "Tom");
        let event = store.event(&Handle::from("E1")).unwrap();
        assert_eq!(event.date, Date::new(1901, 2, 3));
        assert_eq!(store.citation(&Handle::from("C1")).unwrap().confidence, 4);
    }

    #[test]
    fn missing_handle_is_not_found() {
        let store = SqliteStore::open_memory().unwrap();
        let err = store.family(&Handle::from("nope")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound { kind: ObjectKind::Family, .. }
        ));
    }

    #[test]
    fn corrupt_row_is_reported() {
        let store = SqliteStore::open_memory().unwrap();
        store
            .conn()
            .execute(
                "INSERT INTO person (handle, json_data) VALUES ('I9', '{not json')",
                [],
            )
            .unwrap();
        let err = store.person(&Handle::from("I9")).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn custom_event_types_excludes_standard() {
        let store = SqliteStore::open_memory().unwrap();
        store.import(&snapshot()).unwrap();
        let custom = store.custom_event_types().unwrap();
        assert_eq!(custom.into_iter().collect::<Vec<_>>(), vec!["Shipwreck"]);
    }
}
