// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use projetos_app::{Project, ProjectId, ProjectType};
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime, UtcOffset};

const REFERENCE_YEAR: i32 = 2026;

const USERS: [&str; 8] = [
    "user.test",
    "ana.souza",
    "bruno.lima",
    "carla.mendes",
    "diego.rocha",
    "elisa.campos",
    "fabio.nunes",
    "gabriela.reis",
];

const SECTORS: [&str; 10] = [
    "Almoxarifado",
    "Protocolo",
    "Financeiro",
    "Recursos Humanos",
    "Ouvidoria",
    "Biblioteca",
    "Arquivo Central",
    "Gabinete",
    "Auditoria",
    "Jurídico",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for plausible procurement projects.
#[derive(Debug, Clone)]
pub struct ProjectFaker {
    rng: DeterministicRng,
    next_id: i64,
}

impl ProjectFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_id: 1,
        }
    }

    pub fn project_type(&mut self) -> ProjectType {
        ProjectType::ALL[self.rng.int_n(ProjectType::ALL.len())]
    }

    pub fn project(&mut self, kind: ProjectType) -> Project {
        let id = ProjectId::new(self.next_id);
        self.next_id += 1;

        let title = self.pick(project_titles(kind));
        let sector = self.pick(&SECTORS);
        let reference = reference_now();
        let created = self.random_datetime_between(reference - Duration::days(540), reference);

        Project {
            id,
            nome: format!("{title} - {sector}"),
            descricao: self.description(kind, sector),
            tipo: kind.as_wire().to_owned(),
            dt_created: format_timestamp(created),
            user_created: self.pick(&USERS).to_owned(),
        }
    }

    pub fn projects(&mut self, count: usize) -> Vec<Project> {
        (0..count)
            .map(|_| {
                let kind = self.project_type();
                self.project(kind)
            })
            .collect()
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn random_datetime_between(
        &mut self,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> OffsetDateTime {
        let start_ts = start.unix_timestamp();
        let end_ts = end.unix_timestamp();
        if end_ts <= start_ts {
            return start;
        }
        let span = (end_ts - start_ts) as u64;
        let offset = self.rng.next_u64() % (span + 1);
        OffsetDateTime::from_unix_timestamp(start_ts + offset as i64).unwrap_or(start)
    }

    fn description(&mut self, kind: ProjectType, sector: &str) -> String {
        const PURPOSES: [&str; 6] = [
            "atender a demanda anual",
            "substituir contrato vencido",
            "regularizar pendência apontada em auditoria",
            "ampliar a capacidade de atendimento",
            "reduzir custos operacionais",
            "cumprir exigência normativa",
        ];
        format!(
            "Contratação de {} para {} do setor {}.",
            kind.label().to_lowercase(),
            self.pick(&PURPOSES),
            sector
        )
    }
}

/// In-memory data set used by `--demo`.
pub fn demo_projects(seed: u64, count: usize) -> Vec<Project> {
    ProjectFaker::new(seed).projects(count)
}

pub fn sample_project(id: i64, nome: &str, tipo: &str) -> Project {
    Project {
        id: ProjectId::new(id),
        nome: nome.to_owned(),
        descricao: format!("Descrição de {nome}"),
        tipo: tipo.to_owned(),
        dt_created: fixture_datetime().to_owned(),
        user_created: "user.test".to_owned(),
    }
}

pub fn fixture_datetime() -> &'static str {
    "2026-02-19T12:34:56Z"
}

/// Formats as the API's UTC timestamps, whole seconds with a `Z` suffix.
pub fn format_timestamp(value: OffsetDateTime) -> String {
    value
        .to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
        ))
        .unwrap_or_else(|_| fixture_datetime().to_owned())
}

pub fn reference_now() -> OffsetDateTime {
    Date::from_calendar_date(REFERENCE_YEAR, Month::January, 1)
        .map(|date| date.midnight().assume_utc())
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

fn project_titles(kind: ProjectType) -> &'static [&'static str] {
    match kind {
        ProjectType::Bens => &[
            "Aquisição de mobiliário",
            "Compra de material de expediente",
            "Aquisição de veículos",
        ],
        ProjectType::Servicos => &[
            "Serviço de limpeza",
            "Vigilância patrimonial",
            "Manutenção predial",
        ],
        ProjectType::Obras => &[
            "Reforma do telhado",
            "Ampliação do anexo",
            "Adequação de acessibilidade",
        ],
        ProjectType::Ti => &[
            "Renovação de licenças",
            "Modernização da rede",
            "Sistema de protocolo eletrônico",
        ],
        ProjectType::Locacoes => &[
            "Locação de imóvel",
            "Locação de impressoras",
            "Locação de veículos",
        ],
        ProjectType::Capacitacao => &[
            "Curso de gestão de contratos",
            "Treinamento em licitações",
            "Capacitação em segurança da informação",
        ],
        ProjectType::Outros => &[
            "Publicação em diário oficial",
            "Seguro patrimonial",
            "Assinatura de periódicos",
        ],
    }
}
