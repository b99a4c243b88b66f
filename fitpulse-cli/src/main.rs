//! fitpulse - Fitness companion on the command line
//!
//! Each invocation rehydrates the persisted state, runs one command through
//! the store, waits for its requests to finish and writes the snapshot back.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use libfitpulse::error::{AuthError, StorageError};
use libfitpulse::service::calories;
use libfitpulse::service::exercises::{DIFFICULTY_LEVELS, EXERCISE_TYPES, MUSCLE_GROUPS};
use libfitpulse::store::selectors;
use libfitpulse::store::slices::Palette;
use libfitpulse::types::{CaloriesBurned, PopularActivity};
use libfitpulse::{
    gate_from_config, Action, App, AppState, CaloriesRequest, Config, Credentials, ExerciseItem,
    FeedSource, FilterPatch, FitpulseError, FitpulseService, Registration, RemoteRequestState,
    RequestStatus, Result, Store,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "fitpulse")]
#[command(version, about = "Track exercises, water, calories and wellness tips")]
#[command(long_about = r#"Track exercises, water, calories and wellness tips.

Your sign-in, favourites, water count, saved tips and theme are kept in the
data directory between runs. Exercise and calorie lookups go to the
configured services every time.

EXAMPLES:
    # Log a glass of water and see progress
    fitpulse water add

    # Search exercises and favourite one from the results
    fitpulse exercises search --muscle chest --difficulty beginner
    fitpulse exercises search --muscle chest --favourite "Push-up-0"

    # Calories burned for 45 minutes of skiing at 160 lbs
    fitpulse calories skiing --weight 160 --duration 45

    # JSON output for scripting
    fitpulse --format json dashboard | jq '.water_percentage'

EXIT CODES:
    0 - Success
    1 - Service, storage or configuration error
    2 - Authentication failed
    3 - Invalid input
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(short, long, global = true, default_value = "text")]
    #[arg(value_parser = ["text", "json"])]
    format: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the persisted state (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an account and sign in
    ///
    /// Accounts are kept in the data directory as password digests.
    Register {
        username: String,

        #[arg(long, env = "FITPULSE_PASSWORD", hide_env_values = true)]
        password: String,

        /// Repeat the password; checked when given
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Sign in
    Login {
        username: String,

        #[arg(long, env = "FITPULSE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out, keeping the profile
    Logout,

    /// Show or edit the profile
    Profile {
        #[arg(long)]
        username: Option<String>,

        /// Profile picture URI
        #[arg(long, conflicts_with = "clear_picture")]
        picture: Option<String>,

        /// Remove the profile picture
        #[arg(long)]
        clear_picture: bool,
    },

    /// Daily water intake
    #[command(subcommand)]
    Water(WaterCommand),

    /// Favourite exercises
    #[command(subcommand)]
    Favourites(FavouritesCommand),

    /// Search the exercise service
    #[command(subcommand)]
    Exercises(ExercisesCommand),

    /// List the product catalog
    Catalog {
        /// Toggle the catalog item with this id as a favourite
        #[arg(long, value_name = "ID")]
        favourite: Option<String>,
    },

    /// Calories burned for an activity
    Calories {
        activity: String,

        /// Body weight in lbs (50-500)
        #[arg(long)]
        weight: u32,

        /// Duration in minutes
        #[arg(long)]
        duration: u32,
    },

    /// Calories for running, cycling, swimming and weight training
    Popular,

    /// Wellness tips
    #[command(subcommand)]
    Tips(TipsCommand),

    /// Colour theme
    #[command(subcommand)]
    Theme(ThemeCommand),

    /// Catalog size, favourites, water progress and difficulty mix
    Dashboard,
}

#[derive(Subcommand, Debug)]
enum WaterCommand {
    /// Drink one cup
    Add,
    /// Take one cup back
    Remove,
    /// Set the daily goal in cups
    Goal { cups: u32 },
    /// Set today's count directly
    Set { cups: u32 },
    /// Start the day over
    Reset,
    /// Show progress
    Status,
}

#[derive(Subcommand, Debug)]
enum FavouritesCommand {
    List,
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
enum ExercisesCommand {
    /// Search with filters; unset filters are not sent
    Search {
        #[arg(long)]
        name: Option<String>,

        #[arg(long = "type", value_name = "TYPE")]
        exercise_type: Option<String>,

        #[arg(long)]
        muscle: Option<String>,

        #[arg(long)]
        difficulty: Option<String>,

        /// Toggle the result with this id as a favourite
        #[arg(long, value_name = "ID")]
        favourite: Option<String>,
    },

    /// Exercises for one muscle group (configured default when omitted)
    Muscle {
        muscle: Option<String>,

        #[arg(long, value_name = "ID")]
        favourite: Option<String>,
    },

    /// Clear filters and show the default muscle group
    Reset,

    /// Known exercise types, muscle groups and difficulty levels
    Options,
}

#[derive(Subcommand, Debug)]
enum TipsCommand {
    /// Tips in the selected category
    List {
        /// Only saved tips
        #[arg(long)]
        saved: bool,
    },
    Save { id: String },
    Remove { id: String },
    /// Select a category ("all" shows every tip)
    Category { name: String },
}

#[derive(Subcommand, Debug)]
enum ThemeCommand {
    Toggle,
    Dark,
    Light,
    Show,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    libfitpulse::logging::init_with_verbosity(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default()?;
    if let Some(dir) = cli.data_dir {
        config.storage.path = dir;
    }

    let store = Store::with_persistence(AppState::default(), gate_from_config(&config)?);
    let service = Arc::new(FitpulseService::from_config(&config)?);
    let mut app = App::new(store, service);

    let out = Output {
        json: cli.format == "json",
    };
    let result = execute(&mut app, cli.command, &out).await;

    // the snapshot is written even when the command failed
    drop(app.into_store());
    result
}

async fn execute(app: &mut App, command: Commands, out: &Output) -> Result<()> {
    match command {
        Commands::Register {
            username,
            password,
            confirm,
        } => {
            let mut registration = Registration::new(username, password);
            if let Some(confirm) = confirm {
                registration = registration.with_confirmation(confirm);
            }
            app.register(registration);
            app.settle().await;
            signed_in(app.state())?;
            print_profile(app.state(), out)
        }

        Commands::Login { username, password } => {
            app.login(Credentials::new(username, password));
            app.settle().await;
            signed_in(app.state())?;
            print_profile(app.state(), out)
        }

        Commands::Logout => {
            app.logout();
            print_profile(app.state(), out)
        }

        Commands::Profile {
            username,
            picture,
            clear_picture,
        } => {
            let profile_pic = if clear_picture {
                Some(None)
            } else {
                picture.map(Some)
            };
            if username.is_some() || profile_pic.is_some() {
                app.dispatch(Action::UpdateProfile {
                    username,
                    profile_pic,
                });
            }
            print_profile(app.state(), out)
        }

        Commands::Water(command) => {
            match command {
                WaterCommand::Add => app.dispatch(Action::AddWater),
                WaterCommand::Remove => app.dispatch(Action::RemoveWater),
                WaterCommand::Goal { cups } => app.dispatch(Action::SetDailyGoal(cups)),
                WaterCommand::Set { cups } => app.dispatch(Action::SetWaterIntake(cups)),
                WaterCommand::Reset => app.dispatch(Action::ResetDaily),
                WaterCommand::Status => {}
            }
            print_water(app.state(), out)
        }

        Commands::Favourites(FavouritesCommand::List) => {
            out.items(&app.state().favourites.items)
        }

        Commands::Favourites(FavouritesCommand::Remove { id }) => {
            if !selectors::is_favourite(app.state(), &id) {
                return Err(FitpulseError::InvalidInput(format!("'{}' is not a favourite", id)));
            }
            app.dispatch(Action::RemoveFavourite(id));
            out.items(&app.state().favourites.items)
        }

        Commands::Exercises(command) => exercises(app, command, out).await,

        Commands::Catalog { favourite } => {
            app.load_catalog();
            app.settle().await;
            let items = finished(&app.state().exercises.items)?.clone();
            if let Some(id) = favourite {
                toggle_favourite(app, &items, &id)?;
            }
            out.items(&items)
        }

        Commands::Calories {
            activity,
            weight,
            duration,
        } => {
            let request = CaloriesRequest::new(activity, weight, duration);
            calories::validate(&request)?;
            app.calculate_calories(request);
            app.settle().await;
            print_calories(finished(&app.state().calories.results)?, out)
        }

        Commands::Popular => {
            app.load_popular_activities();
            app.settle().await;
            print_popular(finished(&app.state().calories.popular)?, out)
        }

        Commands::Tips(command) => tips(app, command, out),

        Commands::Theme(command) => {
            match command {
                ThemeCommand::Toggle => app.dispatch(Action::ToggleTheme),
                ThemeCommand::Dark => app.dispatch(Action::SetDark(true)),
                ThemeCommand::Light => app.dispatch(Action::SetDark(false)),
                ThemeCommand::Show => {}
            }
            let theme = &app.state().theme;
            out.emit(
                &ThemeView {
                    dark_mode: theme.dark_mode,
                    palette: theme.palette(),
                },
                || theme.name().to_string(),
            )
        }

        Commands::Dashboard => {
            app.load_catalog();
            app.settle().await;
            if let Some(error) = app.state().exercises.items.error() {
                tracing::warn!(%error, "Catalog unavailable, dashboard shows local data only");
            }
            let stats = selectors::dashboard_stats(app.state());
            out.emit(&stats, || {
                format!(
                    "Exercises:  {} (easy {}, intermediate {}, advanced {})\n\
                     Favourites: {}\n\
                     Water:      {}/{} cups ({}%)",
                    stats.total_exercises,
                    stats.difficulty.easy,
                    stats.difficulty.intermediate,
                    stats.difficulty.advanced,
                    stats.favourites,
                    stats.water_cups,
                    stats.water_goal,
                    stats.water_percentage,
                )
            })
        }
    }
}

async fn exercises(app: &mut App, command: ExercisesCommand, out: &Output) -> Result<()> {
    let favourite = match command {
        ExercisesCommand::Search {
            name,
            exercise_type,
            muscle,
            difficulty,
            favourite,
        } => {
            app.apply_filters(FilterPatch {
                name,
                exercise_type,
                muscle,
                difficulty,
            });
            favourite
        }
        ExercisesCommand::Muscle { muscle, favourite } => {
            app.exercises_by_muscle(muscle);
            favourite
        }
        ExercisesCommand::Reset => {
            app.clear_filters_and_reload();
            None
        }
        ExercisesCommand::Options => {
            let options = ExerciseOptions {
                types: &EXERCISE_TYPES,
                muscles: &MUSCLE_GROUPS,
                difficulties: &DIFFICULTY_LEVELS,
            };
            return out.emit(&options, || {
                format!(
                    "Types:        {}\nMuscles:      {}\nDifficulties: {}",
                    EXERCISE_TYPES.join(", "),
                    MUSCLE_GROUPS.join(", "),
                    DIFFICULTY_LEVELS.join(", "),
                )
            });
        }
    };

    app.settle().await;
    let slice = &app.state().fitness_exercises;
    let items = finished(&slice.items)?.clone();
    let source = slice.source.clone();
    if let Some(id) = favourite {
        toggle_favourite(app, &items, &id)?;
    }

    if out.json {
        return out.emit(
            &FeedView {
                source: &source,
                items: &items,
            },
            String::new,
        );
    }
    match &source {
        FeedSource::Live => {}
        FeedSource::FallbackEmpty => println!("No exercises returned, showing built-in list"),
        FeedSource::FallbackUnavailable { reason } => {
            println!("Exercise service unavailable ({}), showing built-in list", reason)
        }
    }
    out.items(&items)
}

fn tips(app: &mut App, command: TipsCommand, out: &Output) -> Result<()> {
    let saved_only = match command {
        TipsCommand::List { saved } => saved,
        TipsCommand::Save { id } => {
            known_tip(app.state(), &id)?;
            app.dispatch(Action::SaveTip(id));
            true
        }
        TipsCommand::Remove { id } => {
            app.dispatch(Action::RemoveTip(id));
            true
        }
        TipsCommand::Category { name } => {
            if !app.state().wellness.categories().contains(&name.as_str()) {
                return Err(FitpulseError::InvalidInput(format!(
                    "Unknown category '{}'. Valid categories: {}",
                    name,
                    app.state().wellness.categories().join(", ")
                )));
            }
            app.dispatch(Action::SelectTipCategory(name));
            false
        }
    };

    let state = app.state();
    let tips = if saved_only {
        selectors::saved_tips(state)
    } else {
        selectors::visible_tips(state)
    };
    out.emit(&tips, || {
        tips.iter()
            .map(|tip| {
                let marker = if state.wellness.is_saved(&tip.id) { "*" } else { " " };
                format!("{} {:<3} [{}] {}", marker, tip.id, tip.category, tip.title)
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn known_tip(state: &AppState, id: &str) -> Result<()> {
    if state.wellness.tips.iter().any(|tip| tip.id == id) {
        Ok(())
    } else {
        Err(FitpulseError::InvalidInput(format!("Unknown tip '{}'", id)))
    }
}

fn toggle_favourite(app: &mut App, items: &[ExerciseItem], id: &str) -> Result<()> {
    let item = items
        .iter()
        .find(|item| item.id == id)
        .ok_or_else(|| FitpulseError::InvalidInput(format!("No exercise with id '{}' in these results", id)))?;
    app.dispatch(Action::ToggleFavourite(item.clone()));
    Ok(())
}

/// Payload of a settled request, or its failure message as an error
fn finished<T>(request: &RemoteRequestState<T>) -> Result<&T> {
    match request.status() {
        RequestStatus::Failed => Err(FitpulseError::Request(
            request.error().unwrap_or("Request failed").to_string(),
        )),
        _ => Ok(request.data()),
    }
}

fn signed_in(state: &AppState) -> Result<()> {
    let session = &state.auth.session;
    if session.status() == RequestStatus::Failed {
        let message = session.error().unwrap_or("Sign-in failed").to_string();
        return Err(AuthError::Validation(message).into());
    }
    Ok(())
}

fn print_profile(state: &AppState, out: &Output) -> Result<()> {
    let session = state.auth.session.data();
    let view = ProfileView {
        authenticated: state.auth.is_authenticated(),
        username: session.username.as_deref(),
        profile_pic: session.profile_pic.as_deref(),
    };
    out.emit(&view, || {
        let name = view.username.unwrap_or("(no profile)");
        let mut text = if view.authenticated {
            format!("Signed in as {}", name)
        } else {
            format!("Signed out ({})", name)
        };
        if let Some(pic) = view.profile_pic {
            text.push_str(&format!("\nPicture: {}", pic));
        }
        text
    })
}

fn print_water(state: &AppState, out: &Output) -> Result<()> {
    let view = WaterView {
        cups: state.water.cups,
        daily_goal: state.water.daily_goal,
        percentage: selectors::water_percentage(state),
        goal_met: selectors::water_goal_met(state),
    };
    out.emit(&view, || {
        let mut text = format!("{}/{} cups ({}%)", view.cups, view.daily_goal, view.percentage);
        if view.goal_met {
            text.push_str(" - daily goal reached");
        }
        text
    })
}

fn print_calories(rows: &[CaloriesBurned], out: &Output) -> Result<()> {
    out.emit(&rows, || {
        if rows.is_empty() {
            return "No matching activities".to_string();
        }
        rows.iter()
            .map(|row| {
                format!(
                    "{}: {} kcal ({} kcal/h)",
                    row.name, row.total_calories, row.calories_per_hour
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn print_popular(activities: &[PopularActivity], out: &Output) -> Result<()> {
    out.emit(&activities, || {
        activities
            .iter()
            .map(|a| format!("{:<16} {} kcal/h", a.activity_type, a.result.calories_per_hour))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

struct Output {
    json: bool,
}

impl Output {
    /// Print `value` as JSON, or the text rendering
    fn emit<T: Serialize + ?Sized>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            let rendered = serde_json::to_string_pretty(value).map_err(StorageError::Encoding)?;
            println!("{}", rendered);
        } else {
            let rendered = text();
            if !rendered.is_empty() {
                println!("{}", rendered);
            }
        }
        Ok(())
    }

    fn items(&self, items: &[ExerciseItem]) -> Result<()> {
        self.emit(items, || {
            if items.is_empty() {
                return "No exercises".to_string();
            }
            items
                .iter()
                .map(|item| format!("{:<28} {:<12} {}", item.id, item.status.as_str(), item.title))
                .collect::<Vec<_>>()
                .join("\n")
        })
    }
}

#[derive(Serialize)]
struct ProfileView<'a> {
    authenticated: bool,
    username: Option<&'a str>,
    profile_pic: Option<&'a str>,
}

#[derive(Serialize)]
struct WaterView {
    cups: u32,
    daily_goal: u32,
    percentage: u32,
    goal_met: bool,
}

#[derive(Serialize)]
struct ThemeView {
    dark_mode: bool,
    palette: &'static Palette,
}

#[derive(Serialize)]
struct FeedView<'a> {
    source: &'a FeedSource,
    items: &'a [ExerciseItem],
}

#[derive(Serialize)]
struct ExerciseOptions {
    types: &'static [&'static str],
    muscles: &'static [&'static str],
    difficulties: &'static [&'static str],
}
