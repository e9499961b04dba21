// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Project, ProjectTable, ProjectType, TableRow};

pub const ALL_TYPES_KEY: &str = "todos";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(ProjectType),
}

impl TypeFilter {
    /// Accepts `todos` or any category label, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case(ALL_TYPES_KEY) {
            return Some(Self::All);
        }
        ProjectType::parse(value).map(Self::Only)
    }

    pub const fn button_label(self) -> &'static str {
        match self {
            Self::All => "Todos",
            Self::Only(kind) => kind.label(),
        }
    }

    /// `Todos`, then each category in declaration order, wrapping.
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Only(ProjectType::ALL[0]),
            Self::Only(kind) => ProjectType::ALL
                .get(kind.position() + 1)
                .copied()
                .map_or(Self::All, Self::Only),
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::All => Self::Only(ProjectType::ALL[ProjectType::ALL.len() - 1]),
            Self::Only(kind) => match kind.position() {
                0 => Self::All,
                index => Self::Only(ProjectType::ALL[index - 1]),
            },
        }
    }

    /// Digit shortcut: `0` is every type, `1`..`7` pick a category.
    pub fn from_digit(digit: u32) -> Option<Self> {
        match digit {
            0 => Some(Self::All),
            n => ProjectType::ALL
                .get(usize::try_from(n).ok()? - 1)
                .copied()
                .map(Self::Only),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search: String,
    pub kind: TypeFilter,
}

impl FilterState {
    pub fn matches(&self, project: &Project) -> bool {
        let needle = self.search.trim().to_lowercase();
        let name_ok = project.nome.to_lowercase().contains(&needle);
        let type_ok = match self.kind {
            TypeFilter::All => true,
            TypeFilter::Only(kind) => kind.matches(&project.tipo),
        };
        name_ok && type_ok
    }

    /// Data rows that pass the filter, in table order. Placeholders never pass.
    pub fn visible_rows(&self, table: &ProjectTable) -> Vec<TableRow> {
        if table.placeholder().is_some() {
            return Vec::new();
        }
        table
            .records()
            .iter()
            .filter(|project| self.matches(project))
            .map(TableRow::for_project)
            .collect()
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.kind != TypeFilter::All
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterState, TypeFilter};
    use crate::{Project, ProjectId, ProjectTable, ProjectType, TableRow};

    fn project(id: i64, nome: &str, tipo: &str) -> Project {
        Project {
            id: ProjectId::new(id),
            nome: nome.to_owned(),
            descricao: String::new(),
            tipo: tipo.to_owned(),
            dt_created: "2025-01-01".to_owned(),
            user_created: "user.test".to_owned(),
        }
    }

    fn table() -> ProjectTable {
        let mut table = ProjectTable::default();
        table.replace(vec![
            project(1, "Alpha Rede", "TI"),
            project(2, "beta", "OBRAS"),
            project(3, "Gamma", " ti "),
        ]);
        table
    }

    fn visible_ids(filter: &FilterState, table: &ProjectTable) -> Vec<i64> {
        filter
            .visible_rows(table)
            .iter()
            .filter_map(TableRow::id)
            .map(ProjectId::get)
            .collect()
    }

    #[test]
    fn empty_search_and_all_types_shows_every_row() {
        let table = table();
        assert_eq!(visible_ids(&FilterState::default(), &table), vec![1, 2, 3]);
    }

    #[test]
    fn search_is_trimmed_and_case_insensitive() {
        let table = table();
        let filter = FilterState {
            search: "  REDE ".to_owned(),
            kind: TypeFilter::All,
        };
        assert_eq!(visible_ids(&filter, &table), vec![1]);
    }

    #[test]
    fn type_filter_compares_trimmed_lowercase() {
        let table = table();
        let filter = FilterState {
            search: String::new(),
            kind: TypeFilter::Only(ProjectType::Ti),
        };
        assert_eq!(visible_ids(&filter, &table), vec![1, 3]);
    }

    #[test]
    fn both_predicates_must_hold() {
        let table = table();
        let filter = FilterState {
            search: "gam".to_owned(),
            kind: TypeFilter::Only(ProjectType::Obras),
        };
        assert!(filter.visible_rows(&table).is_empty());
        assert_eq!(table.records().len(), 3);
    }

    #[test]
    fn placeholder_rows_are_never_visible() {
        let mut table = ProjectTable::default();
        table.replace(Vec::new());
        assert!(FilterState::default().visible_rows(&table).is_empty());
    }

    #[test]
    fn visibility_is_recomputed_from_scratch() {
        let table = table();
        let mut filter = FilterState {
            search: "zzz".to_owned(),
            kind: TypeFilter::All,
        };
        assert!(filter.visible_rows(&table).is_empty());
        filter.search.clear();
        assert_eq!(visible_ids(&filter, &table), vec![1, 2, 3]);
    }

    #[test]
    fn parse_accepts_todos_and_categories() {
        assert_eq!(TypeFilter::parse("TODOS"), Some(TypeFilter::All));
        assert_eq!(
            TypeFilter::parse("locações"),
            Some(TypeFilter::Only(ProjectType::Locacoes))
        );
        assert_eq!(TypeFilter::parse("nada"), None);
        assert_eq!(TypeFilter::All.button_label(), "Todos");
        assert_eq!(
            TypeFilter::Only(ProjectType::Servicos).button_label(),
            "Serviços"
        );
    }

    #[test]
    fn cycling_wraps_through_every_category() {
        let mut filter = TypeFilter::All;
        for _ in 0..=ProjectType::ALL.len() {
            filter = filter.next();
        }
        assert_eq!(filter, TypeFilter::All);
        assert_eq!(TypeFilter::All.prev(), TypeFilter::Only(ProjectType::Outros));
        assert_eq!(TypeFilter::Only(ProjectType::Bens).prev(), TypeFilter::All);
        assert_eq!(TypeFilter::from_digit(0), Some(TypeFilter::All));
        assert_eq!(
            TypeFilter::from_digit(4),
            Some(TypeFilter::Only(ProjectType::Ti))
        );
        assert_eq!(TypeFilter::from_digit(8), None);
    }
}
