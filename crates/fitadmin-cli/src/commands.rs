//! Command handlers. Each one is a thin call into `fitadmin-core` plus
//! printing.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use fitadmin_core::api::{LoginCredentials, PasswordChange, PasswordReset};
use fitadmin_core::models::{
    AccountStatus, Consultation, ConsultationStatus, DashboardStats, Gym, Instructor, ListQuery,
    Match, Page, Ref, StatBlock, Trend, User, Workout,
};
use fitadmin_core::storage::SharedStorage;
use fitadmin_core::theme::ThemePreference;
use fitadmin_core::{ApiClient, SessionStore};
use tracing::debug;

use crate::cli::{
    Command, ConsultationsCommand, ListArgs, MatchesCommand, PasswordCommand, ProviderCommand,
    UsersCommand, WorkoutsCommand,
};
use crate::format::{format_date, format_money, format_optional, truncate_string, yes_no};

/// Column width for names in list output
const NAME_WIDTH: usize = 28;

pub async fn run(
    command: Command,
    session: &mut SessionStore,
    storage: SharedStorage,
) -> Result<()> {
    match command {
        Command::Login { email } => login(session, email).await,
        Command::Logout => {
            session.logout();
            println!("Signed out.");
            Ok(())
        }
        Command::Theme { toggle } => theme(storage, toggle),
        Command::Password(PasswordCommand::Forgot { email }) => {
            session.forgot_password(&email).await?;
            println!("If an account exists for {}, a reset email is on its way.", email);
            Ok(())
        }
        Command::Password(PasswordCommand::Reset { token }) => {
            let password = rpassword::prompt_password("New password: ")?;
            session
                .reset_password(&PasswordReset { token, password })
                .await?;
            println!("Password reset. You can sign in now.");
            Ok(())
        }
        command => {
            if !session.is_authenticated() {
                let reason = session.error().unwrap_or("Not signed in");
                bail!("{}. Run `fitadmin login` first.", reason.trim_end_matches('.'));
            }
            run_authenticated(command, session).await
        }
    }
}

async fn run_authenticated(command: Command, session: &SessionStore) -> Result<()> {
    let api = session.api().clone();
    match command {
        Command::Whoami => {
            if let Some(user) = session.user() {
                print_user(user);
            }
            Ok(())
        }
        Command::Dashboard => {
            print_dashboard(&api.fetch_dashboard().await?);
            Ok(())
        }
        Command::Overview => overview(&api).await,
        Command::Users(cmd) => users(&api, cmd).await,
        Command::Instructors(cmd) => instructors(&api, cmd).await,
        Command::Gyms(cmd) => gyms(&api, cmd).await,
        Command::Consultations(cmd) => consultations(&api, cmd).await,
        Command::Matches(cmd) => matches(&api, cmd).await,
        Command::Workouts(cmd) => workouts(&api, cmd).await,
        Command::Password(PasswordCommand::Change) => {
            let current_password = rpassword::prompt_password("Current password: ")?;
            let new_password = rpassword::prompt_password("New password: ")?;
            session
                .change_password(&PasswordChange {
                    current_password,
                    new_password,
                })
                .await?;
            println!("Password changed.");
            Ok(())
        }
        other => {
            debug!(?other, "Command does not need a session");
            Ok(())
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

async fn login(session: &mut SessionStore, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    let password = rpassword::prompt_password("Password: ")?;
    if email.is_empty() || password.is_empty() {
        bail!("Email and password required");
    }

    session
        .login(&LoginCredentials::new(email, password))
        .await?;

    if let Some(user) = session.user() {
        println!("Signed in as {}.", user.display_name());
    }
    Ok(())
}

fn theme(storage: SharedStorage, toggle: bool) -> Result<()> {
    let preference = ThemePreference::new(storage);
    let mode = if toggle {
        preference.toggle()?
    } else {
        preference.mode()
    };
    println!("Theme: {}", mode);
    Ok(())
}

fn list_query(args: &ListArgs) -> ListQuery {
    let mut query = ListQuery::page(args.page, args.limit);
    query.status = args.status.clone();
    query.search = args.search.clone();
    query
}

fn print_page_footer<T>(page: &Page<T>) {
    println!(
        "Page {} of {} ({} total)",
        page.page,
        page.total_pages().max(1),
        page.total
    );
}

fn ref_name(user: Option<&Ref<User>>) -> String {
    match user {
        Some(Ref::Populated(user)) => user.display_name().to_string(),
        Some(Ref::Id(id)) => id.clone(),
        None => "-".to_string(),
    }
}

fn instructor_name(instructor: Option<&Ref<Instructor>>) -> String {
    match instructor {
        Some(Ref::Populated(instructor)) => instructor.name().to_string(),
        Some(Ref::Id(id)) => id.clone(),
        None => "-".to_string(),
    }
}

// ===== Dashboard =====

fn trend_marker(block: &StatBlock) -> &'static str {
    match block.trend() {
        Trend::Up => "+",
        Trend::Down => "-",
        Trend::Neutral => " ",
    }
}

fn print_dashboard(stats: &DashboardStats) {
    let rows = [
        ("Users", &stats.users),
        ("Instructors", &stats.instructors),
        ("Gyms", &stats.gyms),
        ("Consultations", &stats.consultations),
        ("Matches", &stats.matches),
    ];
    for (label, block) in rows {
        println!(
            "{:<14} {:>8} {}{:.1}%",
            label,
            block.total,
            trend_marker(block),
            block.growth.abs()
        );
    }
    println!(
        "{:<14} {:>8} {}{:.1}%",
        "Revenue",
        format_money(stats.revenue.total),
        trend_marker(&stats.revenue),
        stats.revenue.growth.abs()
    );
}

async fn overview(api: &ApiClient) -> Result<()> {
    let (stats, instructors, gyms) = futures::try_join!(
        api.fetch_dashboard(),
        api.fetch_pending_instructors(),
        api.fetch_pending_gyms(),
    )?;

    print_dashboard(&stats);
    println!();
    println!("Instructors awaiting verification: {}", instructors.total);
    for instructor in &instructors.items {
        println!("  {}  {}", instructor.id, instructor.name());
    }
    println!("Gyms awaiting verification: {}", gyms.total);
    for gym in &gyms.items {
        println!(
            "  {}  {}",
            gym.id,
            format_optional(gym.name.as_deref(), "Unnamed gym")
        );
    }
    Ok(())
}

// ===== Users =====

fn print_user(user: &User) {
    println!("ID:       {}", user.id);
    println!("Name:     {}", user.display_name());
    println!("Email:    {}", format_optional(user.email.as_deref(), "-"));
    println!("Phone:    {}", format_optional(user.phone.as_deref(), "-"));
    println!("Type:     {}", format_optional(user.user_type.as_deref(), "-"));
    println!(
        "Status:   {}",
        user.account_status
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("Admin:    {}", yes_no(user.is_admin));
    println!("Level:    {}", format_optional(user.fitness_level.as_deref(), "-"));
    if !user.fitness_goals.is_empty() {
        println!("Goals:    {}", user.fitness_goals.join(", "));
    }
    if let Some(ref created) = user.created_at {
        println!("Joined:   {}", format_date(created));
    }
}

async fn users(api: &ApiClient, cmd: UsersCommand) -> Result<()> {
    match cmd {
        UsersCommand::List(args) => {
            let page = api.fetch_users(&list_query(&args)).await?;
            for user in &page.items {
                println!(
                    "{:<26} {:<w$} {:<10} {}",
                    user.id,
                    truncate_string(user.display_name(), NAME_WIDTH),
                    user.account_status
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_default(),
                    format_optional(user.email.as_deref(), ""),
                    w = NAME_WIDTH
                );
            }
            print_page_footer(&page);
        }
        UsersCommand::Show { id } => print_user(&api.fetch_user(&id).await?),
        UsersCommand::Suspend { id } => {
            api.update_user_status(&id, &AccountStatus::Suspended).await?;
            println!("User {} suspended.", id);
        }
        UsersCommand::Activate { id } => {
            api.update_user_status(&id, &AccountStatus::Active).await?;
            println!("User {} activated.", id);
        }
    }
    Ok(())
}

// ===== Instructors and gyms =====

fn print_instructor(instructor: &Instructor) {
    println!("ID:        {}", instructor.id);
    println!("Name:      {}", instructor.name());
    println!("Verified:  {}", yes_no(instructor.is_verified));
    if !instructor.specializations.is_empty() {
        println!("Focus:     {}", instructor.specializations.join(", "));
    }
    if let Some(years) = instructor.experience {
        println!("Experience: {} years", years);
    }
    if let Some(rate) = instructor.hourly_rate {
        println!("Rate:      {}/h", format_money(rate));
    }
    if let Some(rating) = instructor.average_rating {
        println!(
            "Rating:    {:.1} ({} reviews)",
            rating,
            instructor.total_reviews.unwrap_or(0)
        );
    }
}

async fn instructors(api: &ApiClient, cmd: ProviderCommand) -> Result<()> {
    match cmd {
        ProviderCommand::List { list, pending } => {
            let mut query = list_query(&list);
            if pending {
                query = query.verified(false);
            }
            let page = api.fetch_instructors(&query).await?;
            for instructor in &page.items {
                println!(
                    "{:<26} {:<w$} verified={}",
                    instructor.id,
                    truncate_string(instructor.name(), NAME_WIDTH),
                    yes_no(instructor.is_verified),
                    w = NAME_WIDTH
                );
            }
            print_page_footer(&page);
        }
        ProviderCommand::Show { id } => print_instructor(&api.fetch_instructor(&id).await?),
        ProviderCommand::Verify { id } => {
            api.verify_instructor(&id).await?;
            println!("Instructor {} verified.", id);
        }
    }
    Ok(())
}

fn print_gym(gym: &Gym) {
    println!("ID:       {}", gym.id);
    println!("Name:     {}", format_optional(gym.name.as_deref(), "Unnamed gym"));
    println!(
        "Address:  {}",
        gym.formatted_address().unwrap_or_else(|| "-".to_string())
    );
    println!("Phone:    {}", format_optional(gym.phone.as_deref(), "-"));
    println!("Website:  {}", format_optional(gym.website.as_deref(), "-"));
    println!("Verified: {}", yes_no(gym.is_verified));
}

async fn gyms(api: &ApiClient, cmd: ProviderCommand) -> Result<()> {
    match cmd {
        ProviderCommand::List { list, pending } => {
            let mut query = list_query(&list);
            if pending {
                query = query.verified(false);
            }
            let page = api.fetch_gyms(&query).await?;
            for gym in &page.items {
                println!(
                    "{:<26} {:<w$} verified={}",
                    gym.id,
                    truncate_string(
                        &format_optional(gym.name.as_deref(), "Unnamed gym"),
                        NAME_WIDTH
                    ),
                    yes_no(gym.is_verified),
                    w = NAME_WIDTH
                );
            }
            print_page_footer(&page);
        }
        ProviderCommand::Show { id } => print_gym(&api.fetch_gym(&id).await?),
        ProviderCommand::Verify { id } => {
            api.verify_gym(&id).await?;
            println!("Gym {} verified.", id);
        }
    }
    Ok(())
}

// ===== Activity =====

fn print_consultation(consultation: &Consultation) {
    println!("ID:         {}", consultation.id);
    println!("Client:     {}", ref_name(consultation.user.as_ref()));
    println!("Instructor: {}", instructor_name(consultation.instructor.as_ref()));
    println!(
        "Status:     {}",
        consultation
            .status
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "Type:       {}",
        format_optional(consultation.consultation_type.as_deref(), "-")
    );
    if let Some(ref start) = consultation.start_time {
        println!("Starts:     {}", format_date(start));
    }
    if let Some(minutes) = consultation.duration {
        println!("Duration:   {} min", minutes);
    }
    if let Some(price) = consultation.price {
        println!("Price:      {}", format_money(price));
    }
}

async fn consultations(api: &ApiClient, cmd: ConsultationsCommand) -> Result<()> {
    match cmd {
        ConsultationsCommand::List(args) => {
            let page = api.fetch_consultations(&list_query(&args)).await?;
            for consultation in &page.items {
                println!(
                    "{:<26} {:<20} {:<20} {}",
                    consultation.id,
                    truncate_string(&ref_name(consultation.user.as_ref()), 20),
                    truncate_string(&instructor_name(consultation.instructor.as_ref()), 20),
                    consultation
                        .status
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_default()
                );
            }
            print_page_footer(&page);
        }
        ConsultationsCommand::Show { id } => {
            print_consultation(&api.fetch_consultation(&id).await?)
        }
        ConsultationsCommand::SetStatus { id, status } => {
            let status = ConsultationStatus::from(status);
            if let ConsultationStatus::Other(ref s) = status {
                bail!("Unknown consultation status `{}`", s);
            }
            api.update_consultation_status(&id, &status).await?;
            println!("Consultation {} is now {}.", id, status);
        }
    }
    Ok(())
}

fn print_match(m: &Match) {
    println!("ID:        {}", m.id);
    println!("Type:      {}", m.kind_display());
    println!("User:      {}", ref_name(m.user.as_ref()));
    println!("Instructor: {}", instructor_name(m.instructor.as_ref()));
    println!(
        "Status:    {}",
        m.status
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    if let Some(ref when) = m.scheduled_time {
        println!("Scheduled: {}", format_date(when));
    }
    println!("Messages:  {}", m.messages.len());
}

async fn matches(api: &ApiClient, cmd: MatchesCommand) -> Result<()> {
    match cmd {
        MatchesCommand::List(args) => {
            let page = api.fetch_matches(&list_query(&args)).await?;
            for m in &page.items {
                println!(
                    "{:<26} {:<12} {:<20} {}",
                    m.id,
                    m.kind_display(),
                    truncate_string(&ref_name(m.user.as_ref()), 20),
                    m.status.as_ref().map(|s| s.to_string()).unwrap_or_default()
                );
            }
            print_page_footer(&page);
        }
        MatchesCommand::Show { id } => print_match(&api.fetch_match(&id).await?),
    }
    Ok(())
}

fn print_workout(workout: &Workout) {
    println!("ID:       {}", workout.id);
    println!("Name:     {}", format_optional(workout.name.as_deref(), "-"));
    println!("Type:     {}", format_optional(workout.kind.as_deref(), "-"));
    println!("User:     {}", ref_name(workout.user.as_ref()));
    if let Some(ref date) = workout.date {
        println!("Date:     {}", format_date(date));
    }
    if let Some(minutes) = workout.duration {
        println!("Duration: {} min", minutes);
    }
    if let Some(calories) = workout.calories {
        println!("Calories: {:.0}", calories);
    }
    if let Some(avg) = workout.heart_rate.as_ref().and_then(|hr| hr.avg) {
        println!("Avg HR:   {:.0} bpm", avg);
    }
    if let Some(distance) = workout.cardio.as_ref().and_then(|c| c.distance_display()) {
        println!("Distance: {}", distance);
    }
    println!("Exercises: {}", workout.exercises.len());
}

async fn workouts(api: &ApiClient, cmd: WorkoutsCommand) -> Result<()> {
    match cmd {
        WorkoutsCommand::List { list, kind } => {
            let mut query = list_query(&list);
            query.kind = kind;
            let page = api.fetch_workouts(&query).await?;
            for workout in &page.items {
                println!(
                    "{:<26} {:<w$} {:<10} {}",
                    workout.id,
                    truncate_string(&format_optional(workout.name.as_deref(), "-"), NAME_WIDTH),
                    format_optional(workout.kind.as_deref(), "-"),
                    workout.date.as_deref().map(format_date).unwrap_or_default(),
                    w = NAME_WIDTH
                );
            }
            print_page_footer(&page);
        }
        WorkoutsCommand::Show { id } => print_workout(&api.fetch_workout(&id).await?),
    }
    Ok(())
}
