// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::dates::{DateStyle, format_created, parse_created};
use crate::{ApiError, Project, ProjectId, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Empty,
    LoadFailed,
}

impl Placeholder {
    pub const fn table_message(self) -> &'static str {
        match self {
            Self::Empty => "Nenhum projeto encontrado.",
            Self::LoadFailed => "Falha ao carregar os projetos. Tente novamente mais tarde.",
        }
    }

    pub const fn list_message(self) -> &'static str {
        match self {
            Self::Empty => "Nenhum projeto encontrado.",
            Self::LoadFailed => "Não foi possível carregar os projetos.",
        }
    }
}

pub const TABLE_COLUMNS: [&str; 5] = ["Data", "Nome", "Tipo", "Descrição", "Criado por"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCells {
    pub date: String,
    pub nome: String,
    pub tipo: String,
    pub descricao: String,
    pub user_created: String,
}

impl RowCells {
    pub fn as_array(&self) -> [&str; 5] {
        [
            &self.date,
            &self.nome,
            &self.tipo,
            &self.descricao,
            &self.user_created,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Data { id: ProjectId, cells: RowCells },
    Placeholder(Placeholder),
}

impl TableRow {
    pub fn for_project(project: &Project) -> Self {
        Self::Data {
            id: project.id,
            cells: RowCells {
                date: format_created(&project.dt_created, DateStyle::DayMonthYear),
                nome: project.nome.clone(),
                tipo: project.tipo.clone(),
                descricao: project.descricao.clone(),
                user_created: project.user_created.clone(),
            },
        }
    }

    pub const fn id(&self) -> Option<ProjectId> {
        match self {
            Self::Data { id, .. } => Some(*id),
            Self::Placeholder(_) => None,
        }
    }
}

/// Records behind the history table. Rendered rows are always derived from these.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectTable {
    records: Vec<Project>,
    placeholder: Option<Placeholder>,
}

impl ProjectTable {
    pub fn load(&mut self, result: Result<Vec<Project>, ApiError>) {
        match result {
            Ok(projects) => self.replace(projects),
            Err(_) => self.show_failure(),
        }
    }

    pub fn replace(&mut self, projects: Vec<Project>) {
        self.placeholder = projects.is_empty().then_some(Placeholder::Empty);
        self.records = projects;
    }

    pub fn show_failure(&mut self) {
        self.records.clear();
        self.placeholder = Some(Placeholder::LoadFailed);
    }

    pub fn records(&self) -> &[Project] {
        &self.records
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        self.placeholder
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.records.iter().find(|project| project.id == id)
    }

    pub fn rows(&self) -> Vec<TableRow> {
        if let Some(placeholder) = self.placeholder {
            return vec![TableRow::Placeholder(placeholder)];
        }
        self.records.iter().map(TableRow::for_project).collect()
    }

    /// Copies name, type and description from `updated` into the record `id`.
    /// The id carried by `updated` is ignored.
    pub fn patch(&mut self, id: ProjectId, updated: &Project) -> bool {
        let Some(record) = self.records.iter_mut().find(|project| project.id == id) else {
            return false;
        };
        record.nome.clone_from(&updated.nome);
        record.tipo.clone_from(&updated.tipo);
        record.descricao.clone_from(&updated.descricao);
        true
    }

    pub fn remove(&mut self, id: ProjectId) -> Option<Project> {
        let index = self.records.iter().position(|project| project.id == id)?;
        let removed = self.records.remove(index);
        if self.records.is_empty() {
            self.placeholder = Some(Placeholder::Empty);
        }
        Some(removed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeItem {
    pub id: ProjectId,
    pub date: String,
    pub nome: String,
    pub route: Route,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeEntry {
    Item(HomeItem),
    Placeholder(Placeholder),
}

/// Most-recent-first summary list shown on the home view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HomeList {
    entries: Vec<HomeEntry>,
}

impl HomeList {
    pub fn load(result: Result<Vec<Project>, ApiError>) -> Self {
        match result {
            Ok(projects) => Self::from_projects(&projects),
            Err(_) => Self {
                entries: vec![HomeEntry::Placeholder(Placeholder::LoadFailed)],
            },
        }
    }

    pub fn from_projects(projects: &[Project]) -> Self {
        if projects.is_empty() {
            return Self {
                entries: vec![HomeEntry::Placeholder(Placeholder::Empty)],
            };
        }

        let entries = sort_recent_first(projects)
            .into_iter()
            .map(|project| {
                HomeEntry::Item(HomeItem {
                    id: project.id,
                    date: format_created(&project.dt_created, DateStyle::DayMonth),
                    nome: project.nome.clone(),
                    route: Route::ProjectDetail(project.id),
                })
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[HomeEntry] {
        &self.entries
    }

    pub fn items(&self) -> impl Iterator<Item = &HomeItem> {
        self.entries.iter().filter_map(|entry| match entry {
            HomeEntry::Item(item) => Some(item),
            HomeEntry::Placeholder(_) => None,
        })
    }
}

/// Orders by creation instant, newest first. Undated projects keep their relative order at the end.
pub fn sort_recent_first(projects: &[Project]) -> Vec<&Project> {
    let mut sorted = projects.iter().collect::<Vec<_>>();
    sorted.sort_by_cached_key(|project| std::cmp::Reverse(parse_created(&project.dt_created)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::{HomeEntry, HomeList, Placeholder, ProjectTable, TableRow, sort_recent_first};
    use crate::{ApiError, Project, ProjectId, Route};

    fn project(id: i64, nome: &str, tipo: &str, dt_created: &str) -> Project {
        Project {
            id: ProjectId::new(id),
            nome: nome.to_owned(),
            descricao: format!("descrição {id}"),
            tipo: tipo.to_owned(),
            dt_created: dt_created.to_owned(),
            user_created: "user.test".to_owned(),
        }
    }

    #[test]
    fn empty_result_renders_single_placeholder_row() {
        let mut table = ProjectTable::default();
        table.load(Ok(Vec::new()));
        assert_eq!(table.rows(), vec![TableRow::Placeholder(Placeholder::Empty)]);
        assert!(table.records().is_empty());
    }

    #[test]
    fn failed_load_replaces_previous_rows_with_error_placeholder() {
        let mut table = ProjectTable::default();
        table.replace(vec![project(1, "Alpha", "TI", "2025-01-01")]);
        table.load(Err(ApiError::Network {
            message: "connection refused".to_owned(),
        }));
        assert_eq!(
            table.rows(),
            vec![TableRow::Placeholder(Placeholder::LoadFailed)]
        );
    }

    #[test]
    fn rows_render_history_date_format() {
        let mut table = ProjectTable::default();
        table.replace(vec![project(1, "Alpha", "TI", "2025-07-01T10:00:00Z")]);
        let rows = table.rows();
        let TableRow::Data { id, cells } = &rows[0] else {
            panic!("expected data row");
        };
        assert_eq!(*id, ProjectId::new(1));
        assert_eq!(cells.date, "01/07/25");
        assert_eq!(cells.nome, "Alpha");
    }

    #[test]
    fn patch_updates_only_matching_record_display_fields() {
        let mut table = ProjectTable::default();
        table.replace(vec![
            project(1, "Alpha", "TI", "2025-01-01"),
            project(2, "Beta", "OBRAS", "2025-01-02"),
        ]);
        let before_other = table.get(ProjectId::new(1)).cloned();

        let updated = Project {
            nome: "Beta revisado".to_owned(),
            tipo: "BENS".to_owned(),
            descricao: "nova".to_owned(),
            dt_created: "2030-01-01".to_owned(),
            user_created: "outra.pessoa".to_owned(),
            ..project(2, "", "", "")
        };
        assert!(table.patch(ProjectId::new(2), &updated));

        let patched = table.get(ProjectId::new(2)).expect("patched row");
        assert_eq!(patched.nome, "Beta revisado");
        assert_eq!(patched.tipo, "BENS");
        assert_eq!(patched.descricao, "nova");
        assert_eq!(patched.dt_created, "2025-01-02");
        assert_eq!(patched.user_created, "user.test");
        assert_eq!(table.get(ProjectId::new(1)).cloned(), before_other);
    }

    #[test]
    fn patch_for_unknown_id_changes_nothing() {
        let mut table = ProjectTable::default();
        table.replace(vec![project(1, "Alpha", "TI", "")]);
        let snapshot = table.clone();
        assert!(!table.patch(ProjectId::new(9), &project(9, "Ghost", "TI", "")));
        assert_eq!(table, snapshot);
    }

    #[test]
    fn patch_targets_submitted_id_not_response_id() {
        let mut table = ProjectTable::default();
        table.replace(vec![
            project(1, "Alpha", "TI", "2025-01-01"),
            project(2, "Beta", "OBRAS", "2025-01-02"),
        ]);
        let before_other = table.get(ProjectId::new(1)).cloned();

        assert!(table.patch(ProjectId::new(2), &project(1, "Beta novo", "BENS", "")));
        assert_eq!(
            table.get(ProjectId::new(2)).map(|row| row.nome.as_str()),
            Some("Beta novo")
        );
        assert_eq!(table.get(ProjectId::new(1)).cloned(), before_other);
    }

    #[test]
    fn removing_last_record_shows_empty_placeholder() {
        let mut table = ProjectTable::default();
        table.replace(vec![project(1, "Alpha", "TI", ""), project(2, "Beta", "TI", "")]);

        assert!(table.remove(ProjectId::new(1)).is_some());
        assert_eq!(table.placeholder(), None);
        assert!(table.remove(ProjectId::new(1)).is_none());

        table.remove(ProjectId::new(2));
        assert_eq!(table.rows(), vec![TableRow::Placeholder(Placeholder::Empty)]);
    }

    #[test]
    fn home_list_sorts_newest_first_without_touching_fields() {
        let projects = vec![
            project(1, "Antigo", "TI", "2024-01-05T10:00:00Z"),
            project(2, "Sem data", "TI", ""),
            project(3, "Novo", "TI", "2025-03-10T10:00:00Z"),
            project(4, "Meio", "TI", "2024-11-20"),
        ];
        let original = projects.clone();

        let list = HomeList::from_projects(&projects);
        let names = list.items().map(|item| item.nome.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Novo", "Meio", "Antigo", "Sem data"]);
        assert_eq!(projects, original);

        let first = list.items().next().expect("first item");
        assert_eq!(first.date, "10/03");
        assert_eq!(first.route, Route::ProjectDetail(ProjectId::new(3)));
    }

    #[test]
    fn home_list_placeholders() {
        assert_eq!(
            HomeList::load(Ok(Vec::new())).entries(),
            &[HomeEntry::Placeholder(Placeholder::Empty)]
        );
        let failed = HomeList::load(Err(ApiError::Server {
            status: 500,
            detail: None,
        }));
        assert_eq!(
            failed.entries(),
            &[HomeEntry::Placeholder(Placeholder::LoadFailed)]
        );
        assert_eq!(
            Placeholder::LoadFailed.list_message(),
            "Não foi possível carregar os projetos."
        );
    }

    #[test]
    fn sort_is_stable_for_equal_dates() {
        let projects = vec![
            project(1, "A", "TI", "2025-01-01"),
            project(2, "B", "TI", "2025-01-01"),
        ];
        let ids = sort_recent_first(&projects)
            .into_iter()
            .map(|project| project.id.get())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2]);
    }
}
