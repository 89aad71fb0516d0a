//! Mutex-guarded Bevy `App` shared between rspec examples.

use bevy::prelude::App;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An `App` that may sit inside an rspec environment.
#[derive(Debug)]
pub struct GuardedApp(pub App);

impl Deref for GuardedApp {
    type Target = App;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for GuardedApp {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// SAFETY: rspec environments must be `Send + Sync`. Suites using this wrapper
// run through `run_serial`, and every access goes through the mutex, so the
// app is never touched from two threads at once.
unsafe impl Send for GuardedApp {}
unsafe impl Sync for GuardedApp {}

/// Shared handle cloned into each rspec example.
pub type SharedApp = Arc<Mutex<GuardedApp>>;

/// Wraps `app` for sharing.
pub fn share(app: App) -> SharedApp {
    Arc::new(Mutex::new(GuardedApp(app)))
}

/// Locks the app, recovering from a poisoned mutex left by a failed example.
pub fn lock_app(app: &SharedApp) -> MutexGuard<'_, GuardedApp> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}
