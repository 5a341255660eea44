//! Command-line entry points.
//!
//! ```text
//! timetable show <classroom-id>
//! timetable lessons
//! timetable add <classroom-id> <lesson-id> <day> <hour> <start> <end>
//! timetable remove <classroom-id> <slot-id>
//! ```
//!
//! Credentials come from `TIMETABLE_TOKEN` and `TIMETABLE_ROLE`, or from
//! `TIMETABLE_USERNAME` and `TIMETABLE_PASSWORD` for a fresh login.

use std::env;

use chrono::NaiveTime;
use eyre::{eyre, Report, Result, WrapErr};
use timetable_client::{
    config::ClientConfig, ApiClient, ClassroomTimetable, Operation, Session,
};
use timetable_core::{
    errors::TimetableError,
    models::{
        auth::{AuthRequest, Role},
        schedule::{CreateScheduleRequest, DayOfWeek},
    },
};
use tracing::{debug, error, info};

use crate::table;

const USAGE: &str = "\
Usage:
  timetable show <classroom-id>
  timetable lessons
  timetable add <classroom-id> <lesson-id> <day> <hour> <start HH:MM> <end HH:MM>
  timetable remove <classroom-id> <slot-id>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show {
        classroom_id: String,
    },
    Lessons,
    Add {
        classroom_id: String,
        request: CreateScheduleRequest,
    },
    Remove {
        classroom_id: String,
        slot_id: String,
    },
    Help,
}

impl Command {
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let words: Vec<&str> = args.iter().map(String::as_str).collect();

        match words.as_slice() {
            [] | ["help"] | ["--help"] | ["-h"] => Ok(Command::Help),
            ["show", classroom_id] => Ok(Command::Show {
                classroom_id: classroom_id.to_string(),
            }),
            ["lessons"] => Ok(Command::Lessons),
            ["add", classroom_id, lesson_id, day, hour, start, end] => {
                let request = CreateScheduleRequest {
                    lesson_id: lesson_id.to_string(),
                    day_of_week: day.parse::<DayOfWeek>()?,
                    lesson_order: hour
                        .parse::<u8>()
                        .wrap_err_with(|| format!("Invalid lesson hour: {}", hour))?,
                    start_time: parse_wall_time(start)?,
                    end_time: parse_wall_time(end)?,
                };
                Ok(Command::Add {
                    classroom_id: classroom_id.to_string(),
                    request,
                })
            }
            ["remove", classroom_id, slot_id] => Ok(Command::Remove {
                classroom_id: classroom_id.to_string(),
                slot_id: slot_id.to_string(),
            }),
            _ => Err(eyre!("Unrecognized arguments\n\n{}", USAGE)),
        }
    }
}

/// Accepts `HH:MM` (seconds default to `:00`) or `HH:MM:SS`.
pub fn parse_wall_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .wrap_err_with(|| format!("Invalid time: {}", value))
}

pub async fn run(command: Command, config: &ClientConfig) -> Result<()> {
    if command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let client = ApiClient::new(config)?;
    debug!("Using backend at {}", client.base_url());
    let session = open_session(&client).await?;

    match command {
        Command::Help => Ok(()),
        Command::Lessons => {
            let lessons = client
                .list_lessons(&session)
                .await
                .map_err(|err| report(Operation::Load, err))?;

            for lesson in lessons {
                let teacher = lesson
                    .teacher
                    .as_ref()
                    .map(|t| t.full_name())
                    .unwrap_or_else(|| "no teacher".to_string());
                println!("{}\t{}\t{}", lesson.id, lesson.picker_label(), teacher);
            }
            Ok(())
        }
        Command::Show { classroom_id } => {
            let timetable = load_timetable(client, classroom_id, config, &session).await?;
            print_grid(&timetable)
        }
        Command::Add {
            classroom_id,
            request,
        } => {
            let mut timetable = load_timetable(client, classroom_id, config, &session).await?;
            let created = timetable
                .add(&session, request)
                .await
                .map_err(|err| report(Operation::Add, err))?;
            info!("Added schedule entry {}", created.id);
            print_grid(&timetable)
        }
        Command::Remove {
            classroom_id,
            slot_id,
        } => {
            let mut timetable = load_timetable(client, classroom_id, config, &session).await?;
            let removed = timetable
                .remove(&session, &slot_id)
                .await
                .map_err(|err| report(Operation::Delete, err))?;
            info!("Removed {} from {}", removed.display_name(), removed.coordinate());
            print_grid(&timetable)
        }
    }
}

async fn open_session(client: &ApiClient) -> Result<Session> {
    if let Ok(token) = env::var("TIMETABLE_TOKEN") {
        let role = env::var("TIMETABLE_ROLE")
            .map_err(|_| eyre!("TIMETABLE_ROLE must be set together with TIMETABLE_TOKEN"))?
            .parse::<Role>()?;
        return Ok(Session::with_token(token, role));
    }

    let username = env::var("TIMETABLE_USERNAME")
        .map_err(|_| eyre!("Set TIMETABLE_TOKEN or TIMETABLE_USERNAME and TIMETABLE_PASSWORD"))?;
    let password = env::var("TIMETABLE_PASSWORD")
        .map_err(|_| eyre!("TIMETABLE_PASSWORD environment variable not set"))?;

    let response = client
        .login(&AuthRequest { username, password })
        .await
        .map_err(|err| report(Operation::Login, err))?;
    info!("Signed in, dashboard at {}", response.role.dashboard_path());

    let mut session = Session::new();
    session.login(response);
    Ok(session)
}

async fn load_timetable(
    client: ApiClient,
    classroom_id: String,
    config: &ClientConfig,
    session: &Session,
) -> Result<ClassroomTimetable<ApiClient>> {
    let mut timetable = ClassroomTimetable::new(
        client,
        classroom_id,
        config.grid_bounds()?,
        config.conflict_policy,
    );
    timetable
        .refresh(session)
        .await
        .map_err(|err| report(Operation::Load, err))?;
    Ok(timetable)
}

fn print_grid(timetable: &ClassroomTimetable<ApiClient>) -> Result<()> {
    let grid = timetable.grid()?;
    println!("Classroom {}", timetable.classroom_id());
    print!("{}", table::render(&grid));
    Ok(())
}

/// Local input problems are shown as-is; anything the backend or network
/// produced is logged and replaced by the operation's generic message.
fn report(operation: Operation, err: TimetableError) -> Report {
    match err {
        TimetableError::Validation(_)
        | TimetableError::InvalidCoordinate { .. }
        | TimetableError::Conflict { .. }
        | TimetableError::Authorization(_) => Report::new(err),
        other => {
            error!("{}: {}", operation.failure_message(), other);
            eyre!(operation.failure_message())
        }
    }
}
