//! Console Commands
//!
//! Parses one line of user input into a [`Command`] and executes it against
//! the form, session and catalog.

use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::view;
use crate::logic::catalog::{self, SharedCatalog};
use crate::logic::features::FeatureFormModel;
use crate::logic::prediction::SessionHandle;
use crate::logic::service::RentApi;

pub const HELP: &str = "\
Commands:
  show                     current property details
  set <field> <value>      edit a field (use `safety` for the safety rating)
  predict                  submit the current details
  result                   show the last prediction or error
  neighborhoods            list sample neighborhoods
  refresh                  re-fetch sample neighborhoods
  reset                    restore default details
  health                   check the prediction service
  help                     this text
  quit                     exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Set { field: String, value: String },
    Predict,
    Result,
    Neighborhoods,
    Refresh,
    Reset,
    Health,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command `{0}`, type `help`")]
    Unknown(String),

    #[error("Usage: set <field> <value>")]
    MissingArgument,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();

        let command = match verb.as_str() {
            "show" | "form" => Command::Show,
            "set" => {
                let field = parts.next().ok_or(CommandError::MissingArgument)?.to_string();
                let value = parts.collect::<Vec<_>>().join(" ");
                if value.is_empty() {
                    return Err(CommandError::MissingArgument);
                }
                Command::Set { field, value }
            }
            "predict" | "submit" => Command::Predict,
            "result" => Command::Result,
            "neighborhoods" | "samples" => Command::Neighborhoods,
            "refresh" => Command::Refresh,
            "reset" => Command::Reset,
            "health" => Command::Health,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// What the shell should do after a command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Print(String),
    Quit,
}

/// Interactive front end state
pub struct Console<A> {
    api: Arc<A>,
    form: FeatureFormModel,
    session: SessionHandle,
    catalog: SharedCatalog,
    sample_limit: usize,
}

impl<A: RentApi + Send + Sync + 'static> Console<A> {
    pub fn new(api: Arc<A>, sample_limit: usize) -> Self {
        Self {
            api,
            form: FeatureFormModel::new(),
            session: SessionHandle::new(),
            catalog: SharedCatalog::default(),
            sample_limit,
        }
    }

    pub fn form(&self) -> &FeatureFormModel {
        &self.form
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    /// Kick off the catalog fetch in the background
    pub fn start(&self) -> tokio::task::JoinHandle<bool> {
        let api = Arc::clone(&self.api);
        let shared = Arc::clone(&self.catalog);
        tokio::spawn(async move { catalog::refresh_shared(&shared, api.as_ref()).await })
    }

    fn render_samples(&self) -> String {
        let held = self.catalog.read();
        view::render_samples(held.preview(self.sample_limit))
    }

    pub async fn execute(&mut self, command: Command) -> Outcome {
        let text = match command {
            Command::Show => view::render_form(&self.form),
            Command::Set { field, value } => match self.form.set_by_name(&field, value.as_str()) {
                Ok(()) => view::render_form(&self.form),
                Err(e) => format!("Error: {}", e),
            },
            Command::Predict => {
                self.session.submit(self.api.as_ref(), self.form.snapshot()).await;
                self.session.read(view::render_session)
            }
            Command::Result => self.session.read(view::render_session),
            Command::Neighborhoods => self.render_samples(),
            Command::Refresh => {
                catalog::refresh_shared(&self.catalog, self.api.as_ref()).await;
                self.render_samples()
            }
            Command::Reset => {
                self.form.reset();
                view::render_form(&self.form)
            }
            Command::Health => match self.api.health().await {
                Ok(health) => format!(
                    "Service {} (model loaded: {})",
                    health.status,
                    if health.model_loaded { "yes" } else { "no" }
                ),
                Err(e) => format!("Service unreachable: {}", e),
            },
            Command::Help => HELP.to_string(),
            Command::Quit => return Outcome::Quit,
        };
        Outcome::Print(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::Field;
    use crate::testing::{client_for, serve};
    use axum::{routing::{get, post}, Json, Router};
    use serde_json::json;

    #[test]
    fn test_parse_commands() {
        assert_eq!("show".parse(), Ok(Command::Show));
        assert_eq!(" PREDICT ".parse(), Ok(Command::Predict));
        assert_eq!(
            "set family_type Bachelors".parse(),
            Ok(Command::Set {
                field: "family_type".to_string(),
                value: "Bachelors".to_string()
            })
        );
        assert_eq!("set distance".parse::<Command>(), Err(CommandError::MissingArgument));
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "fly".parse::<Command>(),
            Err(CommandError::Unknown("fly".to_string()))
        );
    }

    fn stub_service() -> Router {
        Router::new()
            .route(
                "/predict",
                post(|| async {
                    Json(json!({
                        "predicted_rent": 32000,
                        "confidence_interval": { "lower": 28000, "upper": 36000 }
                    }))
                }),
            )
            .route(
                "/neighborhoods",
                get(|| async {
                    Json(json!({ "neighborhoods": [
                        { "name": "Baner", "distance_to_downtown": 11, "transit_score": 50, "average_rent": 24000 }
                    ]}))
                }),
            )
            .route(
                "/health",
                get(|| async { Json(json!({ "status": "healthy", "model_loaded": true })) }),
            )
    }

    #[tokio::test]
    async fn test_console_session() {
        let client = Arc::new(client_for(&serve(stub_service()).await));
        let mut console = Console::new(client, 5);

        assert!(console.start().await.unwrap());
        assert_eq!(console.catalog().read().len(), 1);

        let out = console
            .execute("set safety 8".parse().unwrap())
            .await;
        assert!(matches!(out, Outcome::Print(text) if text.contains("8.0/10")));
        assert_eq!(console.form().snapshot().crime_rate, 3.0);
        assert_eq!(console.form().get(Field::CrimeRate).as_f64(), Some(8.0));

        let out = console.execute(Command::Predict).await;
        assert!(matches!(&out, Outcome::Print(text) if text.contains("₹32,000")));
        assert!(console.session().read(|s| s.prediction().is_some()));

        let out = console.execute(Command::Neighborhoods).await;
        assert!(matches!(&out, Outcome::Print(text) if text.contains("Baner")));

        let out = console.execute(Command::Health).await;
        assert_eq!(out, Outcome::Print("Service healthy (model loaded: yes)".to_string()));

        assert_eq!(console.execute(Command::Quit).await, Outcome::Quit);
    }

    #[tokio::test]
    async fn test_console_reports_bad_input() {
        let client = Arc::new(client_for(&serve(stub_service()).await));
        let mut console = Console::new(client, 5);

        let out = console
            .execute(Command::Set {
                field: "family_type".to_string(),
                value: "Executive".to_string(),
            })
            .await;
        assert_eq!(
            out,
            Outcome::Print("Error: Unknown family_type value: Executive".to_string())
        );
    }
}
