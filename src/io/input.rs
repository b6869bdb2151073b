use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::models::{Field, ResponseTable, SurveyResponse};

/// Errors while loading the survey export.
///
/// All of these are fatal: normalization is all-or-nothing per run and no
/// report is produced on failure.
#[derive(Debug, Error)]
pub enum InputError {
    /// Failed to open or read the file.
    #[error("failed to read survey file: {0}")]
    Io(#[from] std::io::Error),

    /// The file could not be parsed as tabular data.
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),

    /// The header row is empty or absent.
    #[error("survey file has no header row")]
    NoHeaders,

    /// An expected survey question is missing from the header row.
    #[error("missing expected column: {0:?}")]
    MissingColumn(&'static str),
}

/// Load and normalize a survey export from a file.
pub fn load_survey_file(path: &Path) -> Result<ResponseTable, InputError> {
    debug!("Reading survey export from {:?}", path);
    let file = File::open(path)?;
    load_survey_reader(file)
}

/// Load and normalize a survey export from any reader.
///
/// The first row must be the header, and every expected survey question must
/// appear in it verbatim. Columns outside the canonical set are dropped;
/// canonical values are carried through unchanged.
pub fn load_survey_reader(reader: impl Read) -> Result<ResponseTable, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err(InputError::NoHeaders);
    }

    let columns = resolve_columns(&headers)?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(extract_row(&record, &columns));
    }

    Ok(ResponseTable { rows })
}

/// Map each canonical field to its position in the header row.
///
/// The rename mapping itself is [`Field::header`]; this only binds it to the
/// concrete file and fails on the first expected column that is absent.
fn resolve_columns(headers: &csv::StringRecord) -> Result<Vec<(Field, usize)>, InputError> {
    let mut columns = Vec::with_capacity(Field::SOURCE_FIELDS.len());
    for field in Field::SOURCE_FIELDS {
        let Some(header) = field.header() else {
            continue;
        };
        let index = headers
            .iter()
            .position(|h| h == header)
            .ok_or(InputError::MissingColumn(header))?;
        columns.push((field, index));
    }
    Ok(columns)
}

fn extract_row(record: &csv::StringRecord, columns: &[(Field, usize)]) -> SurveyResponse {
    let get = |field: Field| -> String {
        columns
            .iter()
            .find(|(f, _)| *f == field)
            .and_then(|(_, idx)| record.get(*idx))
            .unwrap_or_default()
            .to_string()
    };

    SurveyResponse {
        timestamp: get(Field::Timestamp),
        faixa_etaria: get(Field::FaixaEtaria),
        inserido_mercado_trabalho: get(Field::InseridoMercadoTrabalho),
        raca: get(Field::Raca),
        experiencia_discriminacao_trabalho: get(Field::ExperienciaDiscriminacaoTrabalho),
        possui_competencias_atualizadas: get(Field::PossuiCompetenciasAtualizadas),
        sabe_buscar_oportunidades: get(Field::SabeBuscarOportunidades),
        conhecimento_racismo_estrutural: get(Field::ConhecimentoRacismoEstrutural),
        nivel_entendimento_racismo_estrutural: get(Field::NivelEntendimentoRacismoEstrutural),
        sentiu_conhece_discriminacao_racial: get(Field::SentiuConheceDiscriminacaoRacial),
        exemplos_racismo_estrutural: get(Field::ExemplosRacismoEstrutural),
        opiniao_influencia_estrutura_social: get(Field::OpiniaoInfluenciaEstruturaSocial),
    }
}
