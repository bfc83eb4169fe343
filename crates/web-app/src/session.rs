//! State of a generator session and the commands that change it.
//!
//! Every user action is a [`Msg`]. [`Session::update`] applies it to the [`Model`] and returns an
//! [`Outcome`] that tells the renderer which status to show and which regions to redraw.

use chrono::Local;
use log::{debug, warn};
use rand::Rng;
use workout_generator_domain::{self as domain, CatalogService, SavedWorkoutService};

use crate::{
    Settings, SettingsService, export,
    platform::{ExportError, Platform},
    view,
};

const NO_WORKOUT: &str = "Generate a workout first.";

pub struct Model {
    pub muscles: Muscles,
    /// Exercise catalog, fetched on first use and kept for the whole session.
    pub catalog: Option<Vec<domain::CatalogExercise>>,
    pub pool: Vec<domain::Exercise>,
    pub workout: Vec<domain::Exercise>,
    pub settings: Settings,
    pub meta: String,
}

impl Model {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            muscles: Muscles::Loading,
            catalog: None,
            pool: vec![],
            workout: vec![],
            settings,
            meta: String::new(),
        }
    }

    #[must_use]
    pub fn muscles(&self) -> &[domain::MuscleRef] {
        match &self.muscles {
            Muscles::Loaded(muscles) => muscles,
            Muscles::Loading | Muscles::Failed => &[],
        }
    }

    /// Name of the selected muscle, or an empty string if no muscle is selected.
    fn selected_muscle_name(&self) -> String {
        self.settings
            .muscle_id()
            .map(|id| domain::muscle_name(self.muscles(), id))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Muscles {
    Loading,
    Loaded(Vec<domain::MuscleRef>),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Init,

    MuscleSelected(String),
    WorkoutSizeChanged(f64),
    BodyweightOnlyToggled(bool),

    Generate,
    Clear,
    Swap(domain::ExerciseID),

    Copy,
    Save,
    Download,
    Share,
    ShareMessage,

    LoadSaved(domain::SavedWorkoutID),
    CopySaved(domain::SavedWorkoutID),
    DeleteSaved(domain::SavedWorkoutID),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    MuscleOptions,
    Workout,
    ScrollToWorkout,
    SavedWorkouts,
}

/// Rendering instruction of a handled message. A status of `None` keeps the current status.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub status: Option<String>,
    pub render: Vec<Region>,
}

impl Outcome {
    fn status(status: &str) -> Self {
        Self {
            status: Some(status.to_string()),
            render: vec![],
        }
    }

    fn render(mut self, region: Region) -> Self {
        self.render.push(region);
        self
    }
}

pub struct Session<C, W, S, P, R> {
    pub model: Model,
    catalog: C,
    saved_workouts: W,
    settings: S,
    platform: P,
    rng: R,
}

impl<C, W, S, P, R> Session<C, W, S, P, R>
where
    C: CatalogService,
    W: SavedWorkoutService,
    S: SettingsService,
    P: Platform,
    R: Rng,
{
    pub fn new(catalog: C, saved_workouts: W, settings: S, platform: P, rng: R) -> Self {
        Self {
            model: Model::new(settings.get_settings()),
            catalog,
            saved_workouts,
            settings,
            platform,
            rng,
        }
    }

    pub fn muscle_options(&self) -> Vec<view::MuscleOption> {
        view::muscle_options(&self.model)
    }

    pub fn workout_items(&mut self) -> Vec<view::WorkoutItem> {
        view::workout_items(&self.model.workout, &mut self.rng)
    }

    pub fn saved_entries(&self) -> Vec<view::SavedEntry> {
        view::saved_entries(&self.saved_workouts.get_saved_workouts(), &Local)
    }

    pub async fn update(&mut self, msg: Msg) -> Outcome {
        match msg {
            Msg::Init => self.init().await,

            Msg::MuscleSelected(value) => {
                self.model.settings.muscle = match domain::MuscleID::try_from(value.as_str()) {
                    Ok(id) => Some(*id),
                    Err(domain::MuscleIDError::Empty) => None,
                    Err(err) => {
                        warn!("{err}");
                        None
                    }
                };
                self.settings.set_settings(&self.model.settings);
                Outcome::default()
            }
            Msg::WorkoutSizeChanged(value) => {
                self.model.settings.workout_size = *domain::WorkoutSize::new(value);
                self.settings.set_settings(&self.model.settings);
                Outcome::default()
            }
            Msg::BodyweightOnlyToggled(bodyweight_only) => {
                self.model.settings.bodyweight_only = bodyweight_only;
                self.settings.set_settings(&self.model.settings);
                Outcome::default()
            }

            Msg::Generate => self.generate().await,
            Msg::Clear => {
                self.model.workout.clear();
                self.model.meta.clear();
                Outcome::status("").render(Region::Workout)
            }
            Msg::Swap(id) => self.swap(id),

            Msg::Copy => self.copy().await,
            Msg::Save => self.save(),
            Msg::Download => self.download(),
            Msg::Share => self.share().await,
            Msg::ShareMessage => self.share_message(),

            Msg::LoadSaved(id) => self.load_saved(&id),
            Msg::CopySaved(id) => self.copy_saved(&id).await,
            Msg::DeleteSaved(id) => self.delete_saved(&id),
        }
    }

    async fn init(&mut self) -> Outcome {
        self.platform.progress("Loading muscles…");
        let outcome = match self.catalog.get_muscles().await {
            Ok(muscles) => {
                self.model.muscles = Muscles::Loaded(muscles);
                Outcome::status("")
            }
            Err(_) => {
                self.model.muscles = Muscles::Failed;
                Outcome::status("Could not load muscles. Check internet and refresh.")
            }
        };
        outcome
            .render(Region::MuscleOptions)
            .render(Region::SavedWorkouts)
    }

    async fn generate(&mut self) -> Outcome {
        let Some(muscle_id) = self.model.settings.muscle_id() else {
            return Outcome::status("Pick a muscle group first.");
        };
        let bodyweight_only = self.model.settings.bodyweight_only;

        self.model.workout.clear();
        self.model.meta.clear();
        self.platform.progress("Generating workout...");

        if self.model.catalog.is_none() {
            self.platform
                .progress("Loading exercise library (first time)...");
            match self.catalog.get_exercises(domain::LANGUAGE_ENGLISH).await {
                Ok(catalog) => self.model.catalog = Some(catalog),
                Err(_) => {
                    return Outcome::status("Failed to load exercises. Try again.")
                        .render(Region::Workout);
                }
            }
        }

        self.model.pool = domain::build_pool(
            self.model.catalog.as_deref().unwrap_or_default(),
            &domain::PoolQuery {
                muscle_id,
                bodyweight_only,
                language: domain::LANGUAGE_ENGLISH,
            },
        );

        if self.model.pool.is_empty() {
            return Outcome::status(if bodyweight_only {
                "No bodyweight exercises found for this muscle. Turn off 'Bodyweight only' and try again."
            } else {
                "No exercises found for this selection."
            })
            .render(Region::Workout);
        }

        self.model.workout = domain::pick(
            &self.model.pool,
            self.model.settings.workout_size(),
            &mut self.rng,
        );
        self.model.meta = format!(
            "{} exercises • {}{}",
            self.model.workout.len(),
            domain::muscle_name(self.model.muscles(), muscle_id),
            if bodyweight_only { " • bodyweight" } else { "" }
        );

        Outcome::status("")
            .render(Region::Workout)
            .render(Region::ScrollToWorkout)
    }

    fn swap(&mut self, id: domain::ExerciseID) -> Outcome {
        if self.model.pool.is_empty() {
            return Outcome::status(NO_WORKOUT);
        }

        match domain::swap(&self.model.workout, id, &self.model.pool, &mut self.rng) {
            Ok(workout) => {
                self.model.workout = workout;
                Outcome::status("Swapped ✅").render(Region::Workout)
            }
            Err(domain::SwapError::NoCandidates) => {
                Outcome::status("No more unique exercises to swap in.")
            }
        }
    }

    async fn copy(&self) -> Outcome {
        if self.model.workout.is_empty() {
            return Outcome::status(NO_WORKOUT);
        }

        let text = export::copy_text(&self.model.workout);
        if let Err(err) = self.platform.write_clipboard(&text).await {
            warn!("clipboard not available, using fallback: {err}");
            if let Err(err) = self.platform.copy_fallback(&text) {
                warn!("fallback copy failed: {err}");
                return Outcome::status("Copy failed (browser blocked it).");
            }
        }
        Outcome::status("Copied to clipboard ✅")
    }

    fn save(&self) -> Outcome {
        if self.model.workout.is_empty() {
            return Outcome::status(NO_WORKOUT);
        }

        let muscle_name = match self.model.settings.muscle_id() {
            Some(id) => domain::muscle_name(self.model.muscles(), id),
            None => String::from("muscle"),
        };
        let title = format!(
            "{muscle_name} • {} • {}",
            self.model.settings.workout_size(),
            if self.model.settings.bodyweight_only {
                "BW"
            } else {
                "Any"
            }
        );

        match self
            .saved_workouts
            .save_workout(title, &self.model.workout)
        {
            Ok(_) => Outcome::status("Workout saved ✅").render(Region::SavedWorkouts),
            Err(_) => Outcome::status("Could not save workout."),
        }
    }

    fn export_text(&mut self) -> String {
        let title = export::export_title(&self.model.selected_muscle_name());
        export::workout_to_text(&self.model.workout, &title, &mut self.rng)
    }

    fn download(&mut self) -> Outcome {
        if self.model.workout.is_empty() {
            return Outcome::status(NO_WORKOUT);
        }

        let text = self.export_text();
        let file_name = export::download_file_name(&self.model.selected_muscle_name());
        match self.platform.download(&file_name, &text) {
            Ok(()) => Outcome::status("Downloaded ✅"),
            Err(err) => {
                warn!("download failed: {err}");
                Outcome::status("Download failed.")
            }
        }
    }

    async fn share(&mut self) -> Outcome {
        if self.model.workout.is_empty() {
            return Outcome::status(NO_WORKOUT);
        }

        let text = self.export_text();
        match self
            .platform
            .share(export::SHARE_TITLE, export::share_text(&text))
            .await
        {
            Ok(()) => Outcome::status("Shared ✅"),
            Err(ExportError::Unsupported) => Outcome::status(
                "Share not supported on this device (try WhatsApp or Download).",
            ),
            Err(ExportError::Cancelled) => {
                debug!("share cancelled");
                Outcome::default()
            }
            Err(err) => {
                warn!("share failed: {err}");
                Outcome::default()
            }
        }
    }

    fn share_message(&mut self) -> Outcome {
        if self.model.workout.is_empty() {
            return Outcome::status(NO_WORKOUT);
        }

        let link = export::message_link(&self.export_text());
        if let Err(err) = self.platform.open_url(&link) {
            warn!("failed to open message link: {err}");
        }
        Outcome::default()
    }

    fn load_saved(&mut self, id: &domain::SavedWorkoutID) -> Outcome {
        let Some(saved_workout) = self.saved_workouts.get_saved_workout(id) else {
            return Outcome::default();
        };

        self.model.workout = saved_workout.items;
        self.model.meta = format!("{} exercises • (saved)", self.model.workout.len());
        Outcome::status("Loaded saved workout ✅").render(Region::Workout)
    }

    async fn copy_saved(&self, id: &domain::SavedWorkoutID) -> Outcome {
        let Some(saved_workout) = self.saved_workouts.get_saved_workout(id) else {
            return Outcome::default();
        };

        let text = export::copy_text(&saved_workout.items);
        match self.platform.write_clipboard(&text).await {
            Ok(()) => Outcome::status("Copied saved workout ✅"),
            Err(err) => {
                warn!("clipboard not available: {err}");
                Outcome::status("Clipboard blocked by browser.")
            }
        }
    }

    fn delete_saved(&self, id: &domain::SavedWorkoutID) -> Outcome {
        if self.saved_workouts.get_saved_workout(id).is_none()
            || !self.platform.confirm("Delete this saved workout?")
        {
            return Outcome::default();
        }

        match self.saved_workouts.delete_saved_workout(id) {
            Ok(()) => Outcome::status("Deleted ✅").render(Region::SavedWorkouts),
            Err(_) => Outcome::status("Could not delete saved workout."),
        }
    }
}
