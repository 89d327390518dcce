use chrono::offset::Utc;
use chrono::DateTime;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::internal_error::{InternalError, InternalResult};

use super::data::*;

fn note_from_row(row: &Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        note_date: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub fn get_notes_from_db(user_id: &str, db_connection: &Connection) -> InternalResult<Vec<Note>> {
    let mut notes_statement = db_connection.prepare(
        "SELECT id, user_id, title, content, note_date, created_at FROM notes WHERE user_id = (?1) ORDER BY note_date DESC, created_at DESC",
    )?;

    let note_rows = notes_statement.query_map(params![user_id], note_from_row)?;

    let mut notes = vec![];
    for row_result in note_rows {
        notes.push(row_result?);
    }

    Ok(notes)
}

pub fn get_note_from_db(note_id: &str, db_connection: &Connection) -> InternalResult<Note> {
    let note = db_connection.query_row(
        "SELECT id, user_id, title, content, note_date, created_at FROM notes WHERE id = (?1)",
        params![note_id],
        note_from_row,
    )?;

    Ok(note)
}

pub fn add_note_to_db(
    request: AddNoteRequest,
    db_connection: &Connection,
) -> InternalResult<AddNoteResult> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(InternalError::from("Note title cannot be empty"));
    }

    let note_id = Uuid::new_v4().to_string();
    db_connection.execute(
        "INSERT INTO notes VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            note_id,
            request.user_id,
            title,
            request.content,
            request.note_date,
            Utc::now().to_rfc3339(),
        ],
    )?;

    Ok(AddNoteResult { note_id })
}

pub fn set_note_in_db(request: SetNoteRequest, db_connection: &Connection) -> InternalResult<()> {
    let updated = db_connection.execute(
        "UPDATE notes SET title = (?1), content = (?2), note_date = (?3) WHERE id = (?4)",
        params![
            request.title,
            request.content,
            request.note_date,
            request.note_id
        ],
    )?;

    if updated == 0 {
        return Err(InternalError::from("No such note"));
    }

    Ok(())
}

pub fn delete_note_from_db(note_id: &str, db_connection: &Connection) -> InternalResult<()> {
    db_connection.execute("DELETE FROM notes WHERE id = (?1)", params![note_id])?;

    Ok(())
}

pub fn export_note_document(note: &Note, file_format: NoteExportFormat) -> NoteExport {
    let date_formatted = note.note_date.format("%B %-d, %Y").to_string();
    let created_formatted = match DateTime::parse_from_rfc3339(&note.created_at) {
        Ok(created_at) => created_at.format("%B %-d, %Y %-I:%M %p").to_string(),
        Err(_) => note.created_at.clone(),
    };

    let content = format!(
        "{}\n\nDate: {}\nCreated: {}\n\n{}",
        note.title, date_formatted, created_formatted, note.content
    );

    NoteExport {
        file_name: format!(
            "{}.{}",
            file_name_slug(&note.title),
            file_format.extension()
        ),
        content,
    }
}

fn file_name_slug(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        crate::create_tables(&connection).unwrap();
        connection
    }

    fn add_test_note(db_connection: &Connection, title: &str, date: NaiveDate) -> NoteId {
        add_note_to_db(
            AddNoteRequest {
                user_id: "user-1".to_string(),
                title: title.to_string(),
                content: "Some progress today.".to_string(),
                note_date: date,
            },
            db_connection,
        )
        .unwrap()
        .note_id
    }

    fn date(text: &str) -> NaiveDate {
        text.parse().unwrap()
    }

    #[test]
    fn notes_come_back_newest_date_first() {
        let db_connection = test_connection();
        add_test_note(&db_connection, "Older", date("2026-08-01"));
        add_test_note(&db_connection, "Newer", date("2026-08-06"));

        let notes = get_notes_from_db("user-1", &db_connection).unwrap();

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "Newer");
        assert_eq!(notes[1].title, "Older");
    }

    #[test]
    fn blank_note_title_is_rejected() {
        let db_connection = test_connection();

        let result = add_note_to_db(
            AddNoteRequest {
                user_id: "user-1".to_string(),
                title: " ".to_string(),
                content: String::new(),
                note_date: date("2026-08-06"),
            },
            &db_connection,
        );

        assert!(result.is_err());
    }

    #[test]
    fn set_note_rewrites_all_editable_fields() {
        let db_connection = test_connection();
        let note_id = add_test_note(&db_connection, "Draft", date("2026-08-01"));

        set_note_in_db(
            SetNoteRequest {
                note_id: note_id.clone(),
                title: "Final".to_string(),
                content: "Rewritten.".to_string(),
                note_date: date("2026-08-02"),
            },
            &db_connection,
        )
        .unwrap();

        let note = get_note_from_db(&note_id, &db_connection).unwrap();
        assert_eq!(note.title, "Final");
        assert_eq!(note.content, "Rewritten.");
        assert_eq!(note.note_date, date("2026-08-02"));
    }

    #[test]
    fn updating_a_missing_note_fails() {
        let db_connection = test_connection();

        let result = set_note_in_db(
            SetNoteRequest {
                note_id: "no-such-note".to_string(),
                title: "Final".to_string(),
                content: String::new(),
                note_date: date("2026-08-02"),
            },
            &db_connection,
        );

        assert!(result.is_err());
    }

    #[test]
    fn deleted_notes_are_gone() {
        let db_connection = test_connection();
        let note_id = add_test_note(&db_connection, "Ephemeral", date("2026-08-01"));

        delete_note_from_db(&note_id, &db_connection).unwrap();

        assert!(get_notes_from_db("user-1", &db_connection).unwrap().is_empty());
    }

    #[test]
    fn export_document_carries_title_dates_and_content() {
        let note = Note {
            id: "note-1".to_string(),
            user_id: "user-1".to_string(),
            title: "Weekly Review".to_string(),
            content: "Shipped the parser.".to_string(),
            note_date: date("2026-08-03"),
            created_at: "2026-08-03T09:30:00+00:00".to_string(),
        };

        let export = export_note_document(&note, NoteExportFormat::Md);

        assert_eq!(export.file_name, "weekly_review.md");
        assert!(export.content.starts_with("Weekly Review\n\n"));
        assert!(export.content.contains("Date: August 3, 2026"));
        assert!(export.content.contains("Created: August 3, 2026 9:30 AM"));
        assert!(export.content.ends_with("Shipped the parser."));
    }

    #[test]
    fn export_file_name_is_sanitized() {
        let note = Note {
            id: "note-1".to_string(),
            user_id: "user-1".to_string(),
            title: "Q3 Plan: Goals & Risks!".to_string(),
            content: String::new(),
            note_date: date("2026-08-03"),
            created_at: "2026-08-03T09:30:00+00:00".to_string(),
        };

        let export = export_note_document(&note, NoteExportFormat::Txt);

        assert_eq!(export.file_name, "q3_plan__goals___risks_.txt");
    }
}
