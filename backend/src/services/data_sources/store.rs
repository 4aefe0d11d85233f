//! Queries over the `data_sources` table.

use common::model::datasource::{DataSource, NewDataSource, SourceKind, SourceLocator};
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_COLUMNS: &str =
    "SELECT id, title, kind, source_type, resource_id, gid, is_default FROM data_sources";

fn row_to_source(row: &Row) -> rusqlite::Result<DataSource> {
    let source_type: String = row.get(3)?;
    let resource_id: String = row.get(4)?;
    let locator = match source_type.as_str() {
        "document" => SourceLocator::Document {
            document_id: resource_id,
        },
        _ => SourceLocator::Spreadsheet {
            spreadsheet_id: resource_id,
            gid: row
                .get::<_, Option<String>>(5)?
                .unwrap_or_else(|| "0".to_string()),
        },
    };

    Ok(DataSource {
        id: row.get(0)?,
        title: row.get(1)?,
        kind: SourceKind::parse(&row.get::<_, String>(2)?),
        locator,
        is_default: row.get::<_, i64>(6)? != 0,
    })
}

fn gid_of(locator: &SourceLocator) -> Option<&str> {
    match locator {
        SourceLocator::Spreadsheet { gid, .. } => Some(gid.as_str()),
        SourceLocator::Document { .. } => None,
    }
}

/// All sources in insertion order.
pub fn list(conn: &Connection) -> rusqlite::Result<Vec<DataSource>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY seq", SELECT_COLUMNS))?;
    let sources = stmt
        .query_map([], row_to_source)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(sources)
}

pub fn get(conn: &Connection, id: &str) -> rusqlite::Result<Option<DataSource>> {
    conn.query_row(
        &format!("{} WHERE id = ?1", SELECT_COLUMNS),
        params![id],
        row_to_source,
    )
        .optional()
}

/// The source flagged as default, or the oldest one when none is flagged.
pub fn default_source(conn: &Connection) -> rusqlite::Result<Option<DataSource>> {
    conn.query_row(
        &format!("{} ORDER BY is_default DESC, seq LIMIT 1", SELECT_COLUMNS),
        [],
        row_to_source,
    )
        .optional()
}

/// Adds a source. Moving the default flag happens in the same transaction.
pub fn insert(conn: &Connection, id: &str, new: &NewDataSource) -> rusqlite::Result<DataSource> {
    let tx = conn.unchecked_transaction()?;
    if new.is_default {
        clear_default(&tx)?;
    }
    tx.execute(
        "INSERT INTO data_sources (id, title, kind, source_type, resource_id, gid, is_default)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            id,
            new.title,
            new.kind.as_str(),
            new.locator.source_type(),
            new.locator.resource_id(),
            gid_of(&new.locator),
            new.is_default,
        ],
    )?;
    tx.commit()?;
    Ok(DataSource::from_new(id.to_string(), new.clone()))
}

/// Overwrites the source `id`. Returns `None` when no such source exists.
pub fn update(
    conn: &Connection,
    id: &str,
    new: &NewDataSource,
) -> rusqlite::Result<Option<DataSource>> {
    let tx = conn.unchecked_transaction()?;
    if get(&tx, id)?.is_none() {
        return Ok(None);
    }
    if new.is_default {
        clear_default(&tx)?;
    }
    tx.execute(
        "UPDATE data_sources
         SET title = ?2, kind = ?3, source_type = ?4, resource_id = ?5, gid = ?6, is_default = ?7
         WHERE id = ?1",
        params![
            id,
            new.title,
            new.kind.as_str(),
            new.locator.source_type(),
            new.locator.resource_id(),
            gid_of(&new.locator),
            new.is_default,
        ],
    )?;
    let updated = get(&tx, id)?;
    tx.commit()?;
    Ok(updated)
}

fn clear_default(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute("UPDATE data_sources SET is_default = 0 WHERE is_default != 0", [])?;
    Ok(())
}

/// Registers `locator` as the default source when the registry is empty.
pub fn seed_default(conn: &Connection, locator: &SourceLocator) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM data_sources", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(false);
    }
    let new = NewDataSource {
        title: "기본 시트".to_string(),
        kind: SourceKind::Survey,
        locator: locator.clone(),
        is_default: true,
    };
    insert(conn, &uuid::Uuid::new_v4().to_string(), &new)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{self, tests::temp_database};
    use pretty_assertions::assert_eq;

    fn sheet(title: &str, gid: &str, is_default: bool) -> NewDataSource {
        NewDataSource {
            title: title.to_string(),
            kind: SourceKind::Survey,
            locator: SourceLocator::Spreadsheet {
                spreadsheet_id: "sheet-id".to_string(),
                gid: gid.to_string(),
            },
            is_default,
        }
    }

    fn document(title: &str) -> NewDataSource {
        NewDataSource {
            title: title.to_string(),
            kind: SourceKind::Interview,
            locator: SourceLocator::Document {
                document_id: "doc-id".to_string(),
            },
            is_default: false,
        }
    }

    #[test]
    fn insert_and_list_keep_order() {
        let (_dir, path) = temp_database();
        let conn = db::open(&path).unwrap();

        insert(&conn, "a", &sheet("Sheet1", "187909252", false)).unwrap();
        insert(&conn, "b", &document("인터뷰")).unwrap();

        let sources = list(&conn).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].id, "a");
        assert_eq!(sources[1].locator, document("인터뷰").locator);
        assert_eq!(sources[1].kind, SourceKind::Interview);
    }

    #[test]
    fn only_one_default() {
        let (_dir, path) = temp_database();
        let conn = db::open(&path).unwrap();

        insert(&conn, "a", &sheet("Sheet1", "1", true)).unwrap();
        insert(&conn, "b", &sheet("Sheet2", "2", true)).unwrap();

        let defaults: Vec<String> = list(&conn)
            .unwrap()
            .into_iter()
            .filter(|s| s.is_default)
            .map(|s| s.id)
            .collect();
        assert_eq!(defaults, vec!["b".to_string()]);
        assert_eq!(default_source(&conn).unwrap().unwrap().id, "b");
    }

    #[test]
    fn default_falls_back_to_oldest() {
        let (_dir, path) = temp_database();
        let conn = db::open(&path).unwrap();
        assert_eq!(default_source(&conn).unwrap(), None);

        insert(&conn, "a", &sheet("Sheet1", "1", false)).unwrap();
        insert(&conn, "b", &sheet("Sheet2", "2", false)).unwrap();
        assert_eq!(default_source(&conn).unwrap().unwrap().id, "a");
    }

    #[test]
    fn update_existing_and_missing() {
        let (_dir, path) = temp_database();
        let conn = db::open(&path).unwrap();
        insert(&conn, "a", &sheet("Sheet1", "1", false)).unwrap();

        let updated = update(&conn, "a", &document("이름 변경")).unwrap().unwrap();
        assert_eq!(updated.title, "이름 변경");
        assert_eq!(updated.locator.source_type(), "document");

        assert_eq!(update(&conn, "missing", &document("x")).unwrap(), None);
    }

    #[test]
    fn seed_only_into_empty_registry() {
        let (_dir, path) = temp_database();
        let conn = db::open(&path).unwrap();
        let locator = SourceLocator::Spreadsheet {
            spreadsheet_id: "seed".to_string(),
            gid: "0".to_string(),
        };

        assert!(seed_default(&conn, &locator).unwrap());
        assert!(!seed_default(&conn, &locator).unwrap());

        let sources = list(&conn).unwrap();
        assert_eq!(sources.len(), 1);
        assert!(sources[0].is_default);
        assert_eq!(sources[0].locator, locator);
    }

    fn reject_title(conn: &Connection, title: &str) {
        conn.execute_batch(&format!(
            "CREATE TRIGGER reject_insert BEFORE INSERT ON data_sources WHEN NEW.title = '{t}'
             BEGIN SELECT RAISE(ABORT, 'rejected'); END;
             CREATE TRIGGER reject_update BEFORE UPDATE OF title ON data_sources WHEN NEW.title = '{t}'
             BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            t = title
        ))
        .unwrap();
    }

    #[test]
    fn failed_insert_keeps_previous_default() {
        let (_dir, path) = temp_database();
        let conn = db::open(&path).unwrap();
        insert(&conn, "a", &sheet("Sheet1", "1", true)).unwrap();
        reject_title(&conn, "거부");

        assert!(insert(&conn, "b", &sheet("거부", "2", true)).is_err());

        let sources = list(&conn).unwrap();
        assert_eq!(sources.len(), 1);
        assert!(sources[0].is_default);
        assert_eq!(default_source(&conn).unwrap().unwrap().id, "a");
    }

    #[test]
    fn failed_update_keeps_previous_default() {
        let (_dir, path) = temp_database();
        let conn = db::open(&path).unwrap();
        insert(&conn, "a", &sheet("Sheet1", "1", true)).unwrap();
        insert(&conn, "b", &sheet("Sheet2", "2", false)).unwrap();
        reject_title(&conn, "거부");

        assert!(update(&conn, "b", &sheet("거부", "2", true)).is_err());

        let defaults: Vec<String> = list(&conn)
            .unwrap()
            .into_iter()
            .filter(|s| s.is_default)
            .map(|s| s.id)
            .collect();
        assert_eq!(defaults, vec!["a".to_string()]);
    }
}
