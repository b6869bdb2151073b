use tracing::info;

use crate::models::{Field, RacialGroup, ResponseTable, SurveyResponse};

/// A survey response annotated with its derived racial group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRow {
    pub group: RacialGroup,
    pub response: SurveyResponse,
}

/// The classified table every aggregation reads from.
///
/// Read-only after this stage: nothing downstream mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedTable {
    pub rows: Vec<ClassifiedRow>,
}

impl ClassifiedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ClassifiedRow {
    /// Value of a canonical field on this row.
    ///
    /// The derived `grupo_racial` field reads from the classification; every
    /// other field reads from the response verbatim.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Timestamp => &self.response.timestamp,
            Field::FaixaEtaria => &self.response.faixa_etaria,
            Field::InseridoMercadoTrabalho => &self.response.inserido_mercado_trabalho,
            Field::Raca => &self.response.raca,
            Field::ExperienciaDiscriminacaoTrabalho => {
                &self.response.experiencia_discriminacao_trabalho
            }
            Field::PossuiCompetenciasAtualizadas => {
                &self.response.possui_competencias_atualizadas
            }
            Field::SabeBuscarOportunidades => &self.response.sabe_buscar_oportunidades,
            Field::ConhecimentoRacismoEstrutural => {
                &self.response.conhecimento_racismo_estrutural
            }
            Field::NivelEntendimentoRacismoEstrutural => {
                &self.response.nivel_entendimento_racismo_estrutural
            }
            Field::SentiuConheceDiscriminacaoRacial => {
                &self.response.sentiu_conhece_discriminacao_racial
            }
            Field::ExemplosRacismoEstrutural => &self.response.exemplos_racismo_estrutural,
            Field::OpiniaoInfluenciaEstruturaSocial => {
                &self.response.opiniao_influencia_estrutura_social
            }
            Field::GrupoRacial => self.group.label(),
        }
    }
}

/// Execute Stage 1: Derive the racial group for every response.
///
/// Pure and total: classification cannot fail, and unrecognized race values
/// land in "Brancos e Outros" rather than erroring.
pub fn classify(table: ResponseTable) -> ClassifiedTable {
    let rows: Vec<ClassifiedRow> = table
        .rows
        .into_iter()
        .map(|response| ClassifiedRow {
            group: RacialGroup::from_race(&response.raca),
            response,
        })
        .collect();

    let pretos_e_pardos = rows
        .iter()
        .filter(|r| r.group == RacialGroup::PretosEPardos)
        .count();
    info!(
        "Classified {} responses: {} Pretos e Pardos, {} Brancos e Outros",
        rows.len(),
        pretos_e_pardos,
        rows.len() - pretos_e_pardos
    );

    ClassifiedTable { rows }
}
