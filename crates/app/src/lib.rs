#![warn(clippy::pedantic)]

//! Wiring of the browser adapters into a generator session.
//!
//! The renderer calls [`start`] once, sends [`Msg::Init`] and afterwards forwards every user
//! action to [`Session::update`]. The returned [`Outcome`] names the regions to redraw from the
//! view accessors.

use std::sync::{Arc, Mutex};

use log::{LevelFilter, warn};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use workout_generator_domain as domain;
use workout_generator_storage::{
    local_storage::{GlooStorage, LocalStorage, RawStorage},
    rest::{GlooNetSendRequest, REST, SendRequest},
};
use workout_generator_web_app::{self as web_app, platform::Platform};

pub use web_app::{
    platform::Browser,
    session::{Msg, Muscles, Outcome, Region, Session},
    view::{MuscleOption, SavedEntry, WorkoutItem},
};

pub type AppSession<S, R, P, G> = Session<
    domain::Service<REST<S>>,
    domain::Service<LocalStorage<R>>,
    web_app::service::Service<LocalStorage<R>>,
    P,
    G,
>;

pub type BrowserSession = AppSession<GlooNetSendRequest, GlooStorage, Browser, SmallRng>;

/// Installs the logger and creates a session backed by the remote catalog and local storage.
///
/// `on_progress` receives intermediate status texts of long running commands.
#[must_use]
pub fn start(on_progress: impl Fn(&str) + 'static) -> BrowserSession {
    init_logging();
    assemble(
        REST::new(),
        LocalStorage::new(),
        Browser::new(on_progress),
        SmallRng::from_entropy(),
    )
}

fn init_logging() {
    if let Err(err) = web_app::log::init(
        Arc::new(Mutex::new(LocalStorage::new())),
        LevelFilter::Debug,
    ) {
        warn!("logger already installed: {err}");
    }
}

/// Saved workouts and settings share the same storage.
#[must_use]
pub fn assemble<S, R, P, G>(
    rest: REST<S>,
    local_storage: LocalStorage<R>,
    platform: P,
    rng: G,
) -> AppSession<S, R, P, G>
where
    S: SendRequest,
    R: RawStorage + Clone,
    P: Platform,
    G: Rng,
{
    Session::new(
        domain::Service::new(rest),
        domain::Service::new(local_storage.clone()),
        web_app::service::Service::new(local_storage),
        platform,
        rng,
    )
}
