// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use clinic_api::{
    Actor, ApiError, PasswordPolicy, RegistrationRequest, book_appointment, cancel_appointment,
    import_medical_tests, list_medical_tests, provision_account, register_student,
    resolve_actor, respond_to_appointment, staff_dashboard, student_dashboard,
};
use clinic_domain::{AllocationPlan, Role, StaffResponse};
use clinic_persistence::{AppointmentData, DATE_TIME_FORMAT, Persistence, ScheduleData};
use tracing::info;

/// Campus clinic medical test allocator and appointment desk.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file (omit for an in-memory database)
    #[arg(short, long)]
    database: Option<String>,

    /// Username of the account performing the command
    #[arg(long = "as", value_name = "USERNAME", global = true)]
    as_user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a student CSV and allocate medical tests (admin only)
    Import {
        /// The CSV upload to import
        csv_file: PathBuf,
    },
    /// Create a staff account, or an admin account with `--admin`.
    /// The first admin needs no `--as`; later accounts need an admin.
    AddStaff {
        #[arg(long)]
        username: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        admin: bool,
    },
    /// Register a student account
    Register(RegisterArgs),
    /// List medical test schedules (staff or admin)
    Schedules {
        /// Only tests assigned to this staff member
        #[arg(long)]
        staff: Option<String>,
        /// Only the test for this matric number
        #[arg(long)]
        matric_no: Option<String>,
        /// Only students in this department
        #[arg(long)]
        department: Option<String>,
    },
    /// Request an appointment with a staff member (student only)
    Book {
        #[arg(long)]
        staff: String,
        /// Appointment time as YYYY-MM-DDTHH:MM
        #[arg(long, value_parser = parse_date_time)]
        at: NaiveDateTime,
        #[arg(long, default_value = "")]
        reason: String,
    },
    /// Cancel one of your appointments
    Cancel { id: i64 },
    /// Confirm or reject a pending appointment (staff only)
    Respond { id: i64, response: StaffResponse },
    /// Show your appointments and medical tests
    Appointments,
}

#[derive(clap::Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    matric_no: String,
    #[arg(long)]
    department: String,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    password: String,
    #[arg(long)]
    confirm: String,
}

impl From<RegisterArgs> for RegistrationRequest {
    fn from(args: RegisterArgs) -> Self {
        Self {
            full_name: args.name,
            matric_no: args.matric_no,
            department: args.department,
            phone_number: args.phone,
            password: args.password,
            confirmation: args.confirm,
        }
    }
}

fn parse_date_time(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM: {e}"))
}

/// Resolves the `--as` account, which every guarded command needs.
fn acting(persistence: &mut Persistence, as_user: Option<&str>) -> Result<Actor, ApiError> {
    let username: &str = as_user.ok_or_else(|| ApiError::AuthenticationFailed {
        reason: String::from("This command needs --as <USERNAME>"),
    })?;
    resolve_actor(persistence, username)
}

fn run(
    persistence: &mut Persistence,
    as_user: Option<&str>,
    command: Command,
    today: NaiveDate,
    now: NaiveDateTime,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let policy = PasswordPolicy::default();

    match command {
        Command::Import { csv_file } => {
            let actor: Actor = acting(persistence, as_user)?;
            import_csv(persistence, &actor, &csv_file, today, out)?;
        }
        Command::AddStaff {
            username,
            name,
            password,
            admin,
        } => {
            let actor: Option<Actor> = as_user
                .map(|user| resolve_actor(persistence, user))
                .transpose()?;
            let role: Role = if admin { Role::Admin } else { Role::Staff };
            let account = provision_account(
                persistence,
                actor.as_ref(),
                &username,
                &name,
                &password,
                role,
                &policy,
            )?;
            writeln!(out, "Created {} account '{}'", account.role, account.username)?;
        }
        Command::Register(args) => {
            let registered = register_student(persistence, &args.into(), &policy)?;
            writeln!(
                out,
                "Registered '{}'. Sign in with this username.",
                registered.account.username
            )?;
        }
        Command::Schedules {
            staff,
            matric_no,
            department,
        } => {
            let actor: Actor = acting(persistence, as_user)?;
            let schedules = list_medical_tests(
                persistence,
                &actor,
                staff.as_deref(),
                matric_no.as_deref(),
                department.as_deref(),
            )?;
            write_schedules(out, &schedules)?;
        }
        Command::Book { staff, at, reason } => {
            let actor: Actor = acting(persistence, as_user)?;
            let appointment = book_appointment(persistence, &actor, &staff, at, &reason, now)?;
            writeln!(
                out,
                "Requested appointment {} with {staff} at {}",
                appointment.appointment_id,
                appointment.date_time.format(DATE_TIME_FORMAT)
            )?;
        }
        Command::Cancel { id } => {
            let actor: Actor = acting(persistence, as_user)?;
            let appointment = cancel_appointment(persistence, &actor, id, now)?;
            writeln!(out, "Appointment {} cancelled", appointment.appointment_id)?;
        }
        Command::Respond { id, response } => {
            let actor: Actor = acting(persistence, as_user)?;
            let appointment = respond_to_appointment(persistence, &actor, id, response)?;
            writeln!(
                out,
                "Appointment {} is now {}",
                appointment.appointment_id, appointment.status
            )?;
        }
        Command::Appointments => {
            let actor: Actor = acting(persistence, as_user)?;
            write_dashboard(persistence, &actor, now, out)?;
        }
    }

    Ok(())
}

fn import_csv(
    persistence: &mut Persistence,
    actor: &Actor,
    csv_file: &Path,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw: Vec<u8> = std::fs::read(csv_file)?;
    let summary = import_medical_tests(persistence, actor, &raw, &AllocationPlan::default(), today)?;
    for schedule in &summary.outcome.schedules {
        writeln!(
            out,
            "{} ({}) {} {} {} with {}",
            schedule.username,
            schedule.matric_no,
            schedule.date,
            schedule.time.format("%H:%M"),
            schedule.ward,
            schedule.staff_username
        )?;
    }
    writeln!(out, "{}", summary.message)?;
    Ok(())
}

fn write_dashboard(
    persistence: &mut Persistence,
    actor: &Actor,
    now: NaiveDateTime,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    if actor.role == Role::Staff {
        let dashboard = staff_dashboard(persistence, actor, now)?;
        writeln!(out, "Pending requests:")?;
        write_appointments(out, &dashboard.pending)?;
        writeln!(out, "Upcoming confirmed:")?;
        write_appointments(out, &dashboard.upcoming_confirmed)?;
        writeln!(out, "Medical tests:")?;
        write_schedules(out, &dashboard.medical_tests)?;
    } else {
        let dashboard = student_dashboard(persistence, actor)?;
        writeln!(out, "Appointments:")?;
        write_appointments(out, &dashboard.appointments)?;
        writeln!(out, "Medical tests:")?;
        write_schedules(out, &dashboard.medical_tests)?;
    }
    Ok(())
}

fn write_schedules(out: &mut impl Write, schedules: &[ScheduleData]) -> std::io::Result<()> {
    if schedules.is_empty() {
        return writeln!(out, "  (none)");
    }
    for schedule in schedules {
        writeln!(
            out,
            "  {} {} {} {} ({}) with {}",
            schedule.scheduled_date,
            schedule.scheduled_time.format("%H:%M"),
            schedule.ward_number,
            schedule.student_name,
            schedule.matric_no.as_deref().unwrap_or("-"),
            schedule.staff_username
        )?;
    }
    Ok(())
}

fn write_appointments(
    out: &mut impl Write,
    appointments: &[AppointmentData],
) -> std::io::Result<()> {
    if appointments.is_empty() {
        return writeln!(out, "  (none)");
    }
    for appointment in appointments {
        writeln!(
            out,
            "  #{} {} {} {}",
            appointment.appointment_id,
            appointment.date_time.format(DATE_TIME_FORMAT),
            appointment.status,
            appointment.reason_for_visit
        )?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using database file: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let now: NaiveDateTime = Local::now().naive_local();
    let mut stdout = std::io::stdout().lock();
    run(
        &mut persistence,
        args.as_user.as_deref(),
        args.command,
        now.date(),
        now,
        &mut stdout,
    )
}
