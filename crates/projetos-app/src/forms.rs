// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{ApiError, NewProject, Project, ProjectType, Route};

pub const CREATE_LABEL: &str = "Criar projeto";
pub const SUBMIT_LABEL: &str = "Salvar alterações";
pub const SAVING_LABEL: &str = "Salvando...";
pub const MISSING_TYPE_MESSAGE: &str = "Selecione um tipo de projeto.";
pub const CREATE_SUCCESS_MESSAGE: &str = "Projeto criado com sucesso!";
pub const CREATE_FAILURE_MESSAGE: &str = "Um erro ocorreu, tente novamente mais tarde.";

/// Enabled flag and label of a form's submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
    idle_label: &'static str,
}

impl SubmitControl {
    pub const fn new(idle_label: &'static str) -> Self {
        Self {
            enabled: true,
            label: idle_label,
            idle_label,
        }
    }

    pub fn busy(&mut self) {
        self.enabled = false;
        self.label = SAVING_LABEL;
    }

    pub fn restore(&mut self) {
        self.enabled = true;
        self.label = self.idle_label;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    NotOpen,
    InFlight,
    MissingType,
}

impl SubmitBlocked {
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::MissingType => Some(MISSING_TYPE_MESSAGE),
            Self::NotOpen | Self::InFlight => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Nome,
    Descricao,
    Tipo,
}

impl FormField {
    pub const fn next(self) -> Self {
        match self {
            Self::Nome => Self::Descricao,
            Self::Descricao => Self::Tipo,
            Self::Tipo => Self::Nome,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Nome => Self::Tipo,
            Self::Descricao => Self::Nome,
            Self::Tipo => Self::Descricao,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Nome => "Nome",
            Self::Descricao => "Descrição",
            Self::Tipo => "Tipo",
        }
    }
}

/// Text-field editing shared by the create form and the edit modal.
pub(crate) fn edit_text(
    field: FormField,
    nome: &mut String,
    descricao: &mut String,
    input: Option<char>,
) {
    let target = match field {
        FormField::Nome => nome,
        FormField::Descricao => descricao,
        FormField::Tipo => return,
    };
    match input {
        Some(ch) => target.push(ch),
        None => {
            target.pop();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created { route: Route, message: &'static str },
    Failed(&'static str),
}

impl CreateOutcome {
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Created { message, .. } | Self::Failed(message) => *message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectForm {
    pub nome: String,
    pub descricao: String,
    pub tipo: Option<ProjectType>,
    pub field: FormField,
    pub submit: SubmitControl,
}

impl Default for CreateProjectForm {
    fn default() -> Self {
        Self {
            nome: String::new(),
            descricao: String::new(),
            tipo: None,
            field: FormField::default(),
            submit: SubmitControl::new(CREATE_LABEL),
        }
    }
}

impl CreateProjectForm {
    pub fn input(&mut self, ch: char) {
        edit_text(self.field, &mut self.nome, &mut self.descricao, Some(ch));
    }

    pub fn backspace(&mut self) {
        edit_text(self.field, &mut self.nome, &mut self.descricao, None);
    }

    pub fn select_type(&mut self, kind: ProjectType) {
        self.tipo = Some(kind);
    }

    /// Radio choices as `(wire value, label, checked)`.
    pub fn radios(&self) -> Vec<(&'static str, &'static str, bool)> {
        ProjectType::ALL
            .into_iter()
            .map(|kind| (kind.as_wire(), kind.label(), self.tipo == Some(kind)))
            .collect()
    }

    /// The radio values already carry the wire spelling, so `tipo` is sent verbatim.
    pub fn begin_submit(&mut self) -> Result<NewProject, SubmitBlocked> {
        if !self.submit.enabled {
            return Err(SubmitBlocked::InFlight);
        }
        let Some(kind) = self.tipo else {
            return Err(SubmitBlocked::MissingType);
        };
        self.submit.busy();
        Ok(NewProject {
            nome: self.nome.clone(),
            descricao: self.descricao.clone(),
            tipo: kind.as_wire().to_owned(),
        })
    }

    /// Resets the form whatever the result.
    pub fn finish_submit(&mut self, result: Result<Project, ApiError>) -> CreateOutcome {
        self.reset();
        match result {
            Ok(project) => CreateOutcome::Created {
                route: Route::ProjectDetail(project.id),
                message: CREATE_SUCCESS_MESSAGE,
            },
            Err(_) => CreateOutcome::Failed(CREATE_FAILURE_MESSAGE),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CREATE_FAILURE_MESSAGE, CreateOutcome, CreateProjectForm, FormField, SubmitBlocked,
        SAVING_LABEL,
    };
    use crate::{ApiError, Project, ProjectId, ProjectType, Route};

    fn filled_form() -> CreateProjectForm {
        let mut form = CreateProjectForm::default();
        for ch in "Rede nova".chars() {
            form.input(ch);
        }
        form.field = FormField::Descricao;
        for ch in "cabeamento".chars() {
            form.input(ch);
        }
        form
    }

    #[test]
    fn missing_category_blocks_submit_without_request() {
        let mut form = filled_form();
        assert_eq!(form.begin_submit(), Err(SubmitBlocked::MissingType));
        assert!(form.submit.enabled);
        assert_eq!(form.nome, "Rede nova");
    }

    #[test]
    fn submit_sends_wire_value_verbatim() {
        let mut form = filled_form();
        form.select_type(ProjectType::Servicos);
        let body = form.begin_submit().expect("body");
        assert_eq!(body.nome, "Rede nova");
        assert_eq!(body.descricao, "cabeamento");
        assert_eq!(body.tipo, "SERVIÇOS");
        assert!(!form.submit.enabled);
        assert_eq!(form.submit.label, SAVING_LABEL);
        assert_eq!(form.begin_submit(), Err(SubmitBlocked::InFlight));
    }

    #[test]
    fn empty_name_is_not_validated_locally() {
        let mut form = CreateProjectForm::default();
        form.select_type(ProjectType::Bens);
        assert_eq!(form.begin_submit().expect("body").nome, "");
    }

    #[test]
    fn success_navigates_to_detail_and_resets() {
        let mut form = filled_form();
        form.select_type(ProjectType::Obras);
        form.begin_submit().expect("body");

        let created = Project {
            id: ProjectId::new(77),
            nome: "Rede nova".to_owned(),
            descricao: "cabeamento".to_owned(),
            tipo: "OBRAS".to_owned(),
            dt_created: String::new(),
            user_created: String::new(),
        };
        let outcome = form.finish_submit(Ok(created));
        assert_eq!(
            outcome,
            CreateOutcome::Created {
                route: Route::ProjectDetail(ProjectId::new(77)),
                message: "Projeto criado com sucesso!",
            }
        );
        assert_eq!(form, CreateProjectForm::default());
    }

    #[test]
    fn failure_reports_generic_message_and_resets() {
        let mut form = filled_form();
        form.select_type(ProjectType::Ti);
        form.begin_submit().expect("body");

        let outcome = form.finish_submit(Err(ApiError::Server {
            status: 500,
            detail: None,
        }));
        assert_eq!(outcome.message(), CREATE_FAILURE_MESSAGE);
        assert!(form.nome.is_empty());
        assert_eq!(form.tipo, None);
        assert!(form.submit.enabled);
    }

    #[test]
    fn backspace_edits_focused_field_only() {
        let mut form = filled_form();
        form.backspace();
        assert_eq!(form.descricao, "cabeament");
        form.field = FormField::Tipo;
        form.input('x');
        assert_eq!(form.nome, "Rede nova");
        assert_eq!(form.descricao, "cabeament");
    }

    #[test]
    fn radios_report_single_checked_value() {
        let mut form = CreateProjectForm::default();
        form.select_type(ProjectType::Capacitacao);
        let checked = form
            .radios()
            .into_iter()
            .filter(|(_, _, checked)| *checked)
            .map(|(value, _, _)| value)
            .collect::<Vec<_>>();
        assert_eq!(checked, vec!["CAPACITAÇÃO"]);
    }
}
