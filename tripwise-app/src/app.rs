use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use tripwise_booking::{BookingWizard, WizardError};
use tripwise_core::{DraftUpdate, TripStore};
use tripwise_session::SessionGuard;

use crate::console::{Command, HELP};
use crate::routes::{resolve, Route};
use crate::views;

/// What the driver loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

/// Composition root: owns the wizard and shares the session guard and trip store
pub struct App {
    session: Arc<SessionGuard>,
    trips: Arc<dyn TripStore>,
    wizard: BookingWizard,
    route: Route,
    login_error: Option<String>,
}

impl App {
    pub fn new(session: Arc<SessionGuard>, trips: Arc<dyn TripStore>) -> Self {
        let route = resolve(Route::Home, session.is_authorized());
        Self {
            session,
            trips,
            wizard: BookingWizard::new(),
            route,
            login_error: None,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn wizard(&self) -> &BookingWizard {
        &self.wizard
    }

    pub async fn handle(&mut self, command: Command) -> anyhow::Result<Flow> {
        // A session can end underneath an open protected view
        if self.route.is_protected() && !self.session.is_authorized() {
            self.navigate(Route::Login);
        }

        let notice = match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => return Ok(Flow::Continue(HELP.to_string())),
            Command::Login { username, password } => {
                self.login(&username, &password).await;
                None
            }
            Command::Logout => {
                self.session.logout().await;
                self.wizard = BookingWizard::new();
                self.navigate(Route::Login);
                None
            }
            Command::Go(path) => {
                self.navigate(Route::from_path(&path));
                None
            }
            Command::Trips => {
                self.navigate(Route::MyTrips);
                None
            }
            Command::CancelTrip(id) => {
                if self.route != Route::MyTrips {
                    Some("Open /my-trips to cancel a trip".to_string())
                } else if self.trips.delete_trip(id).await.map_err(|e| anyhow::anyhow!(e)).context("Failed to cancel trip")? {
                    None
                } else {
                    Some(format!("No trip with id {}", id))
                }
            }
            other => self.handle_booking(other).await,
        };

        let mut screen = self.render().await?;
        if let Some(notice) = notice {
            screen.push_str(&format!("! {}\n", notice));
        }
        Ok(Flow::Continue(screen))
    }

    async fn handle_booking(&mut self, command: Command) -> Option<String> {
        if self.route != Route::BookTrip {
            return Some("Open /book-a-new-trip to edit a booking".to_string());
        }

        let result = match command {
            Command::Set { field, value } => match DraftUpdate::parse(field, &value) {
                Ok(update) => self.wizard.set_field(update),
                Err(e) => return Some(e.to_string()),
            },
            Command::Increment(kind) => self.wizard.increment_guest_count(kind).map(|_| ()),
            Command::Decrement(kind) => self.wizard.decrement_guest_count(kind, kind.floor()).map(|_| ()),
            Command::Next => self.wizard.advance().map(|_| ()),
            Command::Previous => self.wizard.retreat().map(|_| ()),
            Command::Confirm => self.wizard.confirm(self.trips.as_ref()).await.map(|_| ()),
            Command::Cancel => self.wizard.cancel(),
            Command::BookNew => self.wizard.restart_for_new_booking(),
            _ => Ok(()),
        };

        match result {
            Ok(()) => None,
            // Field messages are already rendered inline
            Err(WizardError::Validation(_)) => None,
            Err(e) => Some(e.to_string()),
        }
    }

    async fn login(&mut self, username: &str, password: &str) {
        match self.session.login(username, password).await {
            Ok(()) => {
                self.login_error = None;
                self.navigate(Route::Home);
            }
            Err(e) => {
                let message = e.to_string();
                self.login_error = Some(if message.is_empty() {
                    "Invalid credentials!".to_string()
                } else {
                    message
                });
                self.navigate(Route::Login);
            }
        }
    }

    fn navigate(&mut self, requested: Route) {
        let next = resolve(requested, self.session.is_authorized());
        if next == Route::BookTrip && self.route != Route::BookTrip {
            self.wizard = BookingWizard::new();
        }
        if next != Route::Login {
            self.login_error = None;
        }
        if next != requested {
            info!("Redirecting {} to {}", requested.path(), next.path());
        }
        self.route = next;
    }

    pub async fn render(&self) -> anyhow::Result<String> {
        let screen = match self.route {
            Route::Login => views::login(self.login_error.as_deref()),
            Route::Home => views::home(),
            Route::BookTrip => views::wizard(&self.wizard),
            Route::MyTrips => {
                let trips = self.trips.list_trips().await.map_err(|e| {
                    warn!("Failed to load trips: {}", e);
                    anyhow::anyhow!(e)
                })?;
                views::trips(&trips)
            }
            Route::NotFound => views::not_found(),
        };
        Ok(screen)
    }
}
