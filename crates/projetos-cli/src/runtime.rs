// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use projetos_api::{Client, Identity};
use projetos_app::{
    ApiError, FieldError, NewProject, Project, ProjectId, ProjectType, ProjectUpdate,
};
use projetos_testkit::{demo_projects, format_timestamp};
use time::OffsetDateTime;

pub struct ApiRuntime {
    client: Client,
}

impl ApiRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl projetos_tui::AppRuntime for ApiRuntime {
    fn list_projects(&mut self, limit: Option<u32>) -> Result<Vec<Project>, ApiError> {
        self.client.list_projects(limit)
    }

    fn create_project(&mut self, project: &NewProject) -> Result<Project, ApiError> {
        self.client.create_project(project)
    }

    fn update_project(
        &mut self,
        id: ProjectId,
        update: &ProjectUpdate,
    ) -> Result<Project, ApiError> {
        self.client.update_project(id, update)
    }

    fn delete_project(&mut self, id: ProjectId) -> Result<(), ApiError> {
        self.client.delete_project(id)
    }
}

/// In-memory stand-in for the server used by `--demo`. Applies the same
/// validation and creator-only rules the API enforces.
#[derive(Debug, Clone)]
pub struct DemoRuntime {
    projects: Vec<Project>,
    identity: Identity,
    next_id: i64,
}

impl DemoRuntime {
    pub fn new(projects: Vec<Project>, identity: Identity) -> Self {
        let next_id = projects
            .iter()
            .map(|project| project.id.get())
            .max()
            .unwrap_or_default()
            + 1;
        Self {
            projects,
            identity,
            next_id,
        }
    }

    pub fn seeded(seed: u64, count: usize, identity: Identity) -> Self {
        Self::new(demo_projects(seed, count), identity)
    }

    fn find_mut(&mut self, id: ProjectId) -> Result<&mut Project, ApiError> {
        self.projects
            .iter_mut()
            .find(|project| project.id == id)
            .ok_or_else(not_found)
    }

    fn check_owner(&self, project: &Project, action: &str) -> Result<(), ApiError> {
        if project.user_created == self.identity.remote_user {
            return Ok(());
        }
        Err(ApiError::Server {
            status: 403,
            detail: Some(format!("Você não tem permissão para {action} este projeto")),
        })
    }
}

impl projetos_tui::AppRuntime for DemoRuntime {
    fn list_projects(&mut self, limit: Option<u32>) -> Result<Vec<Project>, ApiError> {
        let take = limit.map_or(usize::MAX, |limit| limit as usize);
        Ok(self.projects.iter().take(take).cloned().collect())
    }

    fn create_project(&mut self, project: &NewProject) -> Result<Project, ApiError> {
        validate(&project.nome, &project.tipo)?;
        let created = Project {
            id: ProjectId::new(self.next_id),
            nome: project.nome.clone(),
            descricao: project.descricao.clone(),
            tipo: project.tipo.clone(),
            dt_created: format_timestamp(OffsetDateTime::now_utc()),
            user_created: self.identity.remote_user.clone(),
        };
        self.next_id += 1;
        self.projects.push(created.clone());
        Ok(created)
    }

    fn update_project(
        &mut self,
        id: ProjectId,
        update: &ProjectUpdate,
    ) -> Result<Project, ApiError> {
        let current = self.find_mut(id)?.clone();
        self.check_owner(&current, "atualizar")?;
        validate(&update.nome, &update.tipo)?;

        let project = self.find_mut(id)?;
        project.nome.clone_from(&update.nome);
        project.descricao.clone_from(&update.descricao);
        project.tipo.clone_from(&update.tipo);
        Ok(project.clone())
    }

    fn delete_project(&mut self, id: ProjectId) -> Result<(), ApiError> {
        let current = self.find_mut(id)?.clone();
        self.check_owner(&current, "deletar")?;
        self.projects.retain(|project| project.id != id);
        Ok(())
    }
}

fn not_found() -> ApiError {
    ApiError::Server {
        status: 404,
        detail: Some("Projeto não encontrado".to_owned()),
    }
}

fn validate(nome: &str, tipo: &str) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if nome.trim().is_empty() {
        errors.push(FieldError::new(&["body", "nome"], "Field required"));
    }
    if ProjectType::parse(tipo).is_none() {
        errors.push(FieldError::new(
            &["body", "tipo"],
            "Input should be a valid project category",
        ));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}
