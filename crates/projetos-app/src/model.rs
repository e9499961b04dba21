// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::ProjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    Bens,
    Servicos,
    Obras,
    Ti,
    Locacoes,
    Capacitacao,
    Outros,
}

impl ProjectType {
    pub const ALL: [Self; 7] = [
        Self::Bens,
        Self::Servicos,
        Self::Obras,
        Self::Ti,
        Self::Locacoes,
        Self::Capacitacao,
        Self::Outros,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bens => "Bens",
            Self::Servicos => "Serviços",
            Self::Obras => "Obras",
            Self::Ti => "TI",
            Self::Locacoes => "Locações",
            Self::Capacitacao => "Capacitação",
            Self::Outros => "Outros",
        }
    }

    /// Uppercase form the API stores and returns.
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Bens => "BENS",
            Self::Servicos => "SERVIÇOS",
            Self::Obras => "OBRAS",
            Self::Ti => "TI",
            Self::Locacoes => "LOCAÇÕES",
            Self::Capacitacao => "CAPACITAÇÃO",
            Self::Outros => "OUTROS",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.matches(value))
    }

    /// Case-insensitive exact comparison against a `tipo` value.
    pub fn matches(self, tipo: &str) -> bool {
        tipo.trim().to_lowercase() == self.label().to_lowercase()
    }

    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "id_projeto")]
    pub id: ProjectId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nome: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub descricao: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tipo: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dt_created: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_created: String,
}

impl Project {
    pub fn project_type(&self) -> Option<ProjectType> {
        ProjectType::parse(&self.tipo)
    }
}

/// Body of `POST /projetos/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProject {
    pub nome: String,
    pub descricao: String,
    pub tipo: String,
}

/// Body of `PATCH /projetos/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectUpdate {
    pub nome: String,
    pub descricao: String,
    pub tipo: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::{Project, ProjectType};
    use crate::ProjectId;

    #[test]
    fn parse_is_case_insensitive_for_every_category() {
        for kind in ProjectType::ALL {
            assert_eq!(ProjectType::parse(kind.label()), Some(kind));
            assert_eq!(ProjectType::parse(kind.as_wire()), Some(kind));
            assert_eq!(ProjectType::parse(&kind.label().to_lowercase()), Some(kind));
        }
        assert_eq!(ProjectType::parse(" ti "), Some(ProjectType::Ti));
        assert_eq!(ProjectType::parse("serviços"), Some(ProjectType::Servicos));
    }

    #[test]
    fn parse_rejects_unknown_and_accentless_values() {
        assert_eq!(ProjectType::parse("Software"), None);
        assert_eq!(ProjectType::parse("servicos"), None);
        assert_eq!(ProjectType::parse(""), None);
    }

    #[test]
    fn project_decodes_wire_shape_and_null_fields() {
        let project: Project = serde_json::from_str(
            r#"{"id_projeto":42,"nome":"Rede","descricao":null,"tipo":"TI","user_created":"user.test","dt_created":"2025-07-01T10:20:30-05:00"}"#,
        )
        .expect("decode project");
        assert_eq!(project.id, ProjectId::new(42));
        assert_eq!(project.descricao, "");
        assert_eq!(project.project_type(), Some(ProjectType::Ti));
    }

    #[test]
    fn project_decodes_when_optional_fields_are_missing() {
        let project: Project =
            serde_json::from_str(r#"{"id_projeto":7,"nome":"Obra","tipo":"OBRAS"}"#)
                .expect("decode sparse project");
        assert_eq!(project.dt_created, "");
        assert_eq!(project.user_created, "");
    }
}
