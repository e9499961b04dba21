// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use url::Url;

use crate::ProjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    History,
    CreateProject,
    ProjectDetail(ProjectId),
}

impl Route {
    pub fn path(self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::History => "/projetos/historico".to_owned(),
            Self::CreateProject => "/criar_projeto".to_owned(),
            Self::ProjectDetail(id) => format!("/projetos/{id}"),
        }
    }

    pub fn url(self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(&self.path())
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "início",
            Self::History => "histórico",
            Self::CreateProject => "novo projeto",
            Self::ProjectDetail(_) => "projeto",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub route: Route,
    pub previous_route: Option<Route>,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            route: Route::Home,
            previous_route: None,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Navigate(Route),
    Back,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    RouteChanged(Route),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::Navigate(route) => {
                if route == self.route {
                    return Vec::new();
                }
                self.previous_route = Some(self.route);
                self.route = route;
                vec![AppEvent::RouteChanged(route)]
            }
            AppCommand::Back => {
                let target = match self.previous_route.take() {
                    Some(previous) if previous != self.route => previous,
                    _ => Route::Home,
                };
                if target == self.route {
                    return Vec::new();
                }
                self.route = target;
                vec![AppEvent::RouteChanged(target)]
            }
            AppCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![AppEvent::StatusUpdated(message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState, Route};
    use crate::ProjectId;
    use url::Url;

    #[test]
    fn detail_route_url_ends_with_project_id() {
        let base = Url::parse("http://localhost:8000/").expect("valid base");
        let url = Route::ProjectDetail(ProjectId::new(42))
            .url(&base)
            .expect("join detail path");
        assert_eq!(url.as_str(), "http://localhost:8000/projetos/42");
        assert!(url.path().ends_with("/projetos/42"));
    }

    #[test]
    fn navigate_records_previous_route_and_back_returns() {
        let mut state = AppState::default();

        let events = state.dispatch(AppCommand::Navigate(Route::History));
        assert_eq!(events, vec![AppEvent::RouteChanged(Route::History)]);

        state.dispatch(AppCommand::Navigate(Route::ProjectDetail(ProjectId::new(3))));
        assert_eq!(state.previous_route, Some(Route::History));

        let back = state.dispatch(AppCommand::Back);
        assert_eq!(back, vec![AppEvent::RouteChanged(Route::History)]);
        assert_eq!(state.route, Route::History);
    }

    #[test]
    fn back_without_history_goes_home() {
        let mut state = AppState {
            route: Route::CreateProject,
            ..AppState::default()
        };
        state.dispatch(AppCommand::Back);
        assert_eq!(state.route, Route::Home);
    }

    #[test]
    fn navigating_to_current_route_is_a_no_op() {
        let mut state = AppState::default();
        assert!(state.dispatch(AppCommand::Navigate(Route::Home)).is_empty());
        assert_eq!(state.previous_route, None);
    }

    #[test]
    fn status_set_and_clear() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetStatus("salvo".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("salvo"));

        let events = state.dispatch(AppCommand::ClearStatus);
        assert_eq!(events, vec![AppEvent::StatusCleared]);
        assert_eq!(state.status_line, None);
    }
}
