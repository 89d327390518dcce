use rocket::routes;
use rocket::{Build, Rocket};
use rusqlite::Connection;
use tracing_subscriber::EnvFilter;

use std::error::Error;
use std::sync::{Arc, Mutex};

mod data;
mod goals;
mod internal_error;
mod notes;

use data::DBConnection;

pub fn create_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS goals (id TEXT PRIMARY KEY, user_id TEXT, title TEXT, description TEXT, deadline TEXT, status TEXT, progress_percentage REAL, is_main_goal INTEGER, reminder_options TEXT, created_at TEXT)",
        [],
    )?;
    connection.execute(
        "CREATE TABLE IF NOT EXISTS sub_goals (id TEXT PRIMARY KEY, main_goal_id TEXT, user_id TEXT, title TEXT, description TEXT, status TEXT, order_index INTEGER, created_at TEXT)",
        [],
    )?;
    connection.execute(
        "CREATE TABLE IF NOT EXISTS sub_goal_dependencies (id TEXT PRIMARY KEY, sub_goal_id TEXT, depends_on_sub_goal_id TEXT, user_id TEXT)",
        [],
    )?;
    connection.execute(
        "CREATE TABLE IF NOT EXISTS notes (id TEXT PRIMARY KEY, user_id TEXT, title TEXT, content TEXT, note_date TEXT, created_at TEXT)",
        [],
    )?;

    Ok(())
}

pub fn build_rocket(connection: DBConnection) -> Rocket<Build> {
    rocket::build().manage(connection).mount(
        "/api",
        routes![
            goals::endpoints::get_goals,
            goals::endpoints::add_goal,
            goals::endpoints::set_goal_reminders,
            goals::endpoints::delete_goal,
            goals::endpoints::get_dashboard_stats,
            goals::endpoints::get_sub_goals,
            goals::endpoints::add_sub_goal,
            goals::endpoints::set_sub_goal_status,
            goals::endpoints::get_sub_goal_order,
            notes::endpoints::get_notes,
            notes::endpoints::add_note,
            notes::endpoints::set_note,
            notes::endpoints::delete_note,
            notes::endpoints::export_note,
        ],
    )
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let connection = Connection::open("goaltrack.db")?;
    create_tables(&connection)?;
    tracing::info!("database ready");

    let connection = Arc::new(Mutex::new(connection));

    build_rocket(connection).launch().await?;

    Ok(())
}
