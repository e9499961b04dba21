// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::forms::edit_text;
use crate::{
    ApiError, FormField, Project, ProjectId, ProjectType, ProjectUpdate, SUBMIT_LABEL,
    SubmitBlocked, SubmitControl, format_field_errors,
};

pub const UPDATE_SUCCESS_MESSAGE: &str = "Projeto atualizado com sucesso!";
pub const UPDATE_FAILURE_MESSAGE: &str =
    "Ocorreu uma falha na comunicação com o servidor. Tente novamente.";
pub const VALIDATION_HEADER: &str = "Erro de validação:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Backdrop,
    Content,
}

/// Field values of the edit form. They survive closing until the next open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditForm {
    pub id: Option<ProjectId>,
    pub nome: String,
    pub descricao: String,
    pub tipo: Option<ProjectType>,
    pub field: FormField,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalCommand {
    Open(Project),
    Close,
    PointerDown(PointerTarget),
    SelectType(ProjectType),
    NextField,
    PrevField,
    Input(char),
    Backspace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    Opened(ProjectId),
    Closed,
    Saved(Project),
    Notice(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub id: ProjectId,
    pub body: ProjectUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditModal {
    state: ModalState,
    form: EditForm,
    submit: SubmitControl,
}

impl Default for EditModal {
    fn default() -> Self {
        Self {
            state: ModalState::Closed,
            form: EditForm::default(),
            submit: SubmitControl::new(SUBMIT_LABEL),
        }
    }
}

impl EditModal {
    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    pub fn form(&self) -> &EditForm {
        &self.form
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    pub fn dispatch(&mut self, command: ModalCommand) -> Vec<ModalEvent> {
        match command {
            ModalCommand::Open(project) => self.open(&project),
            ModalCommand::Close | ModalCommand::PointerDown(PointerTarget::Backdrop) => {
                self.close()
            }
            ModalCommand::PointerDown(PointerTarget::Content) => Vec::new(),
            ModalCommand::SelectType(kind) => {
                if self.is_open() {
                    self.form.tipo = Some(kind);
                    self.form.notice = None;
                }
                Vec::new()
            }
            ModalCommand::NextField => {
                self.form.field = self.form.field.next();
                Vec::new()
            }
            ModalCommand::PrevField => {
                self.form.field = self.form.field.prev();
                Vec::new()
            }
            ModalCommand::Input(ch) => {
                if self.is_open() {
                    let form = &mut self.form;
                    edit_text(form.field, &mut form.nome, &mut form.descricao, Some(ch));
                }
                Vec::new()
            }
            ModalCommand::Backspace => {
                if self.is_open() {
                    let form = &mut self.form;
                    edit_text(form.field, &mut form.nome, &mut form.descricao, None);
                }
                Vec::new()
            }
        }
    }

    fn open(&mut self, project: &Project) -> Vec<ModalEvent> {
        let tipo = project.project_type();
        let notice = match tipo {
            Some(_) => None,
            None => Some(format!(
                "Tipo \"{}\" não reconhecido. Selecione um tipo antes de salvar.",
                project.tipo.trim()
            )),
        };
        self.form = EditForm {
            id: Some(project.id),
            nome: project.nome.clone(),
            descricao: project.descricao.clone(),
            tipo,
            field: FormField::Nome,
            notice: notice.clone(),
        };
        self.submit.restore();
        self.state = ModalState::Open;

        let mut events = vec![ModalEvent::Opened(project.id)];
        events.extend(notice.map(ModalEvent::Notice));
        events
    }

    fn close(&mut self) -> Vec<ModalEvent> {
        if !self.is_open() {
            return Vec::new();
        }
        self.state = ModalState::Closed;
        vec![ModalEvent::Closed]
    }

    /// Radio choices as `(category, checked)`. At most one is checked.
    pub fn radios(&self) -> Vec<(ProjectType, bool)> {
        ProjectType::ALL
            .into_iter()
            .map(|kind| (kind, self.form.tipo == Some(kind)))
            .collect()
    }

    pub fn begin_submit(&mut self) -> Result<UpdateRequest, SubmitBlocked> {
        let Some(id) = self.form.id.filter(|_| self.is_open()) else {
            return Err(SubmitBlocked::NotOpen);
        };
        if !self.submit.enabled {
            return Err(SubmitBlocked::InFlight);
        }
        let Some(kind) = self.form.tipo else {
            self.form.notice = SubmitBlocked::MissingType.message().map(str::to_owned);
            return Err(SubmitBlocked::MissingType);
        };

        self.submit.busy();
        Ok(UpdateRequest {
            id,
            body: ProjectUpdate {
                nome: self.form.nome.clone(),
                descricao: self.form.descricao.clone(),
                tipo: kind.label().to_uppercase(),
            },
        })
    }

    /// Applies the update response. The submit control is restored on every path.
    pub fn finish_submit(&mut self, result: Result<Project, ApiError>) -> Vec<ModalEvent> {
        self.submit.restore();
        match result {
            Ok(project) => {
                self.form.notice = None;
                let mut events = vec![ModalEvent::Saved(project)];
                events.extend(self.close());
                events
            }
            Err(ApiError::Validation(errors)) => {
                let message = format!("{VALIDATION_HEADER}\n{}", format_field_errors(&errors));
                self.form.notice = Some(message.clone());
                vec![ModalEvent::Notice(message)]
            }
            Err(_) => {
                self.form.notice = Some(UPDATE_FAILURE_MESSAGE.to_owned());
                vec![ModalEvent::Notice(UPDATE_FAILURE_MESSAGE.to_owned())]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        EditModal, ModalCommand, ModalEvent, ModalState, PointerTarget, UPDATE_FAILURE_MESSAGE,
    };
    use crate::{
        ApiError, FieldError, FormField, Project, ProjectId, ProjectType, SAVING_LABEL,
        SUBMIT_LABEL, SubmitBlocked,
    };

    fn project(tipo: &str) -> Project {
        Project {
            id: ProjectId::new(5),
            nome: "Reforma".to_owned(),
            descricao: "Sala 2".to_owned(),
            tipo: tipo.to_owned(),
            dt_created: "2025-02-01".to_owned(),
            user_created: "user.test".to_owned(),
        }
    }

    fn open_modal(tipo: &str) -> EditModal {
        let mut modal = EditModal::default();
        modal.dispatch(ModalCommand::Open(project(tipo)));
        modal
    }

    #[test]
    fn open_checks_exactly_the_matching_category() {
        let modal = open_modal("serviços");
        let checked = modal
            .radios()
            .into_iter()
            .filter(|(_, checked)| *checked)
            .map(|(kind, _)| kind)
            .collect::<Vec<_>>();
        assert_eq!(checked, vec![ProjectType::Servicos]);
        assert_eq!(modal.form().nome, "Reforma");
        assert_eq!(modal.form().id, Some(ProjectId::new(5)));
        assert_eq!(modal.form().notice, None);
    }

    #[test]
    fn lowercase_ti_checks_only_the_ti_category() {
        let modal = open_modal("ti");
        let checked = modal
            .radios()
            .into_iter()
            .filter(|(_, checked)| *checked)
            .map(|(kind, _)| kind)
            .collect::<Vec<_>>();
        assert_eq!(checked, vec![ProjectType::Ti]);
        assert_eq!(modal.form().tipo, Some(ProjectType::Ti));
    }

    #[test]
    fn reopening_replaces_previous_selection() {
        let mut modal = open_modal("TI");
        modal.dispatch(ModalCommand::Open(project("Obras")));
        assert_eq!(modal.form().tipo, Some(ProjectType::Obras));
        assert_eq!(
            modal.radios().iter().filter(|(_, checked)| *checked).count(),
            1
        );
    }

    #[test]
    fn unknown_category_leaves_nothing_checked_and_blocks_submit() {
        let mut modal = EditModal::default();
        let events = modal.dispatch(ModalCommand::Open(project("Software")));
        assert!(matches!(events.as_slice(), [ModalEvent::Opened(_), ModalEvent::Notice(_)]));
        assert!(modal.radios().iter().all(|(_, checked)| !checked));
        assert_eq!(modal.begin_submit(), Err(SubmitBlocked::MissingType));
        assert!(modal.submit_control().enabled);

        modal.dispatch(ModalCommand::SelectType(ProjectType::Outros));
        assert!(modal.begin_submit().is_ok());
    }

    #[test]
    fn submit_uppercases_selected_category_and_disables_control() {
        let mut modal = open_modal("Locações");
        let request = modal.begin_submit().expect("request");
        assert_eq!(request.id, ProjectId::new(5));
        assert_eq!(request.body.tipo, "LOCAÇÕES");
        assert_eq!(request.body.nome, "Reforma");
        assert!(!modal.submit_control().enabled);
        assert_eq!(modal.submit_control().label, SAVING_LABEL);
        assert_eq!(modal.begin_submit(), Err(SubmitBlocked::InFlight));
    }

    #[test]
    fn success_emits_saved_and_closes() {
        let mut modal = open_modal("TI");
        modal.begin_submit().expect("request");
        let saved = Project {
            nome: "Reforma geral".to_owned(),
            ..project("TI")
        };
        let events = modal.finish_submit(Ok(saved.clone()));
        assert_eq!(events, vec![ModalEvent::Saved(saved), ModalEvent::Closed]);
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(modal.submit_control().enabled);
        assert_eq!(modal.submit_control().label, SUBMIT_LABEL);
    }

    #[test]
    fn validation_errors_are_listed_and_modal_stays_open() {
        let mut modal = open_modal("TI");
        modal.begin_submit().expect("request");
        let events = modal.finish_submit(Err(ApiError::Validation(vec![
            FieldError::new(&["body", "nome"], "field required"),
            FieldError::new(&["tipo"], "invalid"),
        ])));
        let expected = "Erro de validação:\nCampo 'nome': field required\nCampo 'tipo': invalid";
        assert_eq!(events, vec![ModalEvent::Notice(expected.to_owned())]);
        assert!(modal.is_open());
        assert_eq!(modal.submit_control().label, SUBMIT_LABEL);
        assert!(modal.submit_control().enabled);
    }

    #[test]
    fn other_failures_show_generic_message() {
        let mut modal = open_modal("TI");
        modal.begin_submit().expect("request");
        let events = modal.finish_submit(Err(ApiError::Network {
            message: "timeout".to_owned(),
        }));
        assert_eq!(
            events,
            vec![ModalEvent::Notice(UPDATE_FAILURE_MESSAGE.to_owned())]
        );
        assert!(modal.is_open());
        assert!(modal.submit_control().enabled);
    }

    #[test]
    fn backdrop_closes_content_does_not() {
        let mut modal = open_modal("TI");
        assert!(
            modal
                .dispatch(ModalCommand::PointerDown(PointerTarget::Content))
                .is_empty()
        );
        assert!(modal.is_open());
        assert_eq!(
            modal.dispatch(ModalCommand::PointerDown(PointerTarget::Backdrop)),
            vec![ModalEvent::Closed]
        );
        assert!(modal.dispatch(ModalCommand::Close).is_empty());
    }

    #[test]
    fn closing_keeps_field_values() {
        let mut modal = open_modal("TI");
        modal.dispatch(ModalCommand::Input('!'));
        modal.dispatch(ModalCommand::Close);
        assert_eq!(modal.form().nome, "Reforma!");
        assert_eq!(modal.begin_submit(), Err(SubmitBlocked::NotOpen));
    }

    #[test]
    fn field_navigation_routes_input() {
        let mut modal = open_modal("TI");
        modal.dispatch(ModalCommand::NextField);
        assert_eq!(modal.form().field, FormField::Descricao);
        modal.dispatch(ModalCommand::Backspace);
        assert_eq!(modal.form().descricao, "Sala ");
        modal.dispatch(ModalCommand::PrevField);
        modal.dispatch(ModalCommand::PrevField);
        assert_eq!(modal.form().field, FormField::Tipo);
    }
}
