use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::data::DBConnection;
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/get_notes?<user_id>")]
pub fn get_notes(
    user_id: String,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<Note>>> {
    let db_connection = db_connection.lock()?;

    let notes = get_notes_from_db(&user_id, &db_connection)?;

    Ok(Json(notes))
}

#[post("/add_note", format = "json", data = "<add_note_request>")]
pub fn add_note(
    add_note_request: Json<AddNoteRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<AddNoteResult>> {
    let db_connection = db_connection.lock()?;
    add_note_to_db(add_note_request.into_inner(), &db_connection).map(|r| Json(r))
}

#[post("/set_note", format = "json", data = "<set_note_request>")]
pub fn set_note(
    set_note_request: Json<SetNoteRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    set_note_in_db(set_note_request.into_inner(), &db_connection)?;

    Ok(())
}

#[post("/delete_note", format = "json", data = "<delete_note_request>")]
pub fn delete_note(
    delete_note_request: Json<DeleteNoteRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    delete_note_from_db(&delete_note_request.note_id, &db_connection)?;

    Ok(())
}

#[get("/export_note?<note_id>&<file_format>")]
pub fn export_note(
    note_id: String,
    file_format: NoteExportFormat,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<NoteExport>> {
    let db_connection = db_connection.lock()?;

    let note = get_note_from_db(&note_id, &db_connection)?;

    Ok(Json(export_note_document(&note, file_format)))
}
