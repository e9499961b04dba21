// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{ApiError, Project, ProjectId, ProjectTable};

pub const DELETING_LABEL: &str = "Excluindo...";
pub const DELETE_LABEL: &str = "Excluir";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub id: ProjectId,
    pub nome: String,
    pub in_flight: bool,
}

impl DeleteConfirmation {
    pub fn for_project(project: &Project) -> Self {
        Self {
            id: project.id,
            nome: project.nome.clone(),
            in_flight: false,
        }
    }

    pub fn prompt(&self) -> String {
        format!(
            "Tem certeza que deseja excluir o projeto \"{}\"? Esta ação não pode ser desfeita.",
            self.nome
        )
    }

    pub const fn action_label(&self) -> &'static str {
        if self.in_flight {
            DELETING_LABEL
        } else {
            DELETE_LABEL
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    Forbidden,
    NotFound,
    Failed,
}

impl DeleteOutcome {
    pub fn classify(result: &Result<(), ApiError>) -> Self {
        match result {
            Ok(()) => Self::Removed,
            Err(error) => match error.status() {
                Some(403) => Self::Forbidden,
                Some(404) => Self::NotFound,
                _ => Self::Failed,
            },
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Removed => "Projeto excluído com sucesso.",
            Self::Forbidden => {
                "Você não tem permissão para excluir este projeto. Apenas o criador do projeto pode excluí-lo."
            }
            Self::NotFound => "Projeto não encontrado.",
            Self::Failed => "Erro ao excluir o projeto. Tente novamente mais tarde.",
        }
    }
}

impl ProjectTable {
    /// Removes the record only when the server confirmed the delete.
    pub fn apply_delete(&mut self, id: ProjectId, result: &Result<(), ApiError>) -> DeleteOutcome {
        let outcome = DeleteOutcome::classify(result);
        if outcome == DeleteOutcome::Removed {
            self.remove(id);
        }
        outcome
    }
}
