use chrono::NaiveDate;
use rocket::FromFormField;
use serde::{Deserialize, Serialize};

pub type NoteId = String;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Note {
    pub id: NoteId,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub note_date: NaiveDate,
    pub created_at: String,
}

#[derive(Deserialize, Debug)]
pub struct AddNoteRequest {
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub note_date: NaiveDate,
}

#[derive(Serialize, Debug)]
pub struct AddNoteResult {
    pub note_id: NoteId,
}

#[derive(Deserialize, Debug)]
pub struct SetNoteRequest {
    pub note_id: NoteId,
    pub title: String,
    pub content: String,
    pub note_date: NaiveDate,
}

#[derive(Deserialize, Debug)]
pub struct DeleteNoteRequest {
    pub note_id: NoteId,
}

#[derive(Serialize, Debug)]
pub struct NoteExport {
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromFormField)]
pub enum NoteExportFormat {
    #[field(value = "txt")]
    Txt,
    #[field(value = "md")]
    Md,
}

impl NoteExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            NoteExportFormat::Txt => "txt",
            NoteExportFormat::Md => "md",
        }
    }
}
