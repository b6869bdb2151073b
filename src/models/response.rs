/// A single normalized survey response.
///
/// Field names are the canonical identifiers the rest of the pipeline works
/// with; the verbatim survey questions they replace live in [`Field::header`].
/// Every field is present on every row, so a constructed table is fully
/// normalized by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyResponse {
    /// Submission timestamp, carried verbatim from the export
    pub timestamp: String,
    /// Age bracket
    pub faixa_etaria: String,
    /// Currently in the labor market (Sim/Não)
    pub inserido_mercado_trabalho: String,
    /// Self-identified race
    pub raca: String,
    /// Lost opportunities or suffered direct discrimination at work
    pub experiencia_discriminacao_trabalho: String,
    /// Considers own competencies up to date
    pub possui_competencias_atualizadas: String,
    /// Knows how to search for openings and write a resume
    pub sabe_buscar_oportunidades: String,
    /// Has heard of structural racism
    pub conhecimento_racismo_estrutural: String,
    /// Self-rated level of understanding of structural racism
    pub nivel_entendimento_racismo_estrutural: String,
    /// Felt, or knows someone who felt, racially discriminated
    pub sentiu_conhece_discriminacao_racial: String,
    /// Perceived examples of structural racism (multi-select, free text)
    pub exemplos_racismo_estrutural: String,
    /// Opinion on social-structure influence on hiring outcomes
    pub opiniao_influencia_estrutura_social: String,
}

/// The normalized response table produced by stage 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseTable {
    /// Rows in file order
    pub rows: Vec<SurveyResponse>,
}

impl ResponseTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A canonical field of the survey.
///
/// `Field` is a closed enum, so referencing a column the table does not have
/// is unrepresentable. The variant names match the canonical identifiers
/// returned by [`Field::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Timestamp,
    FaixaEtaria,
    InseridoMercadoTrabalho,
    Raca,
    ExperienciaDiscriminacaoTrabalho,
    PossuiCompetenciasAtualizadas,
    SabeBuscarOportunidades,
    ConhecimentoRacismoEstrutural,
    NivelEntendimentoRacismoEstrutural,
    SentiuConheceDiscriminacaoRacial,
    ExemplosRacismoEstrutural,
    OpiniaoInfluenciaEstruturaSocial,
    /// Derived by stage 1; has no source column
    GrupoRacial,
}

impl Field {
    /// The fields read from the survey export, in column order.
    pub const SOURCE_FIELDS: [Field; 12] = [
        Field::Timestamp,
        Field::FaixaEtaria,
        Field::InseridoMercadoTrabalho,
        Field::Raca,
        Field::ExperienciaDiscriminacaoTrabalho,
        Field::PossuiCompetenciasAtualizadas,
        Field::SabeBuscarOportunidades,
        Field::ConhecimentoRacismoEstrutural,
        Field::NivelEntendimentoRacismoEstrutural,
        Field::SentiuConheceDiscriminacaoRacial,
        Field::ExemplosRacismoEstrutural,
        Field::OpiniaoInfluenciaEstruturaSocial,
    ];

    /// Canonical identifier used in logs and as chart axis label.
    pub fn name(self) -> &'static str {
        match self {
            Field::Timestamp => "timestamp",
            Field::FaixaEtaria => "faixa_etaria",
            Field::InseridoMercadoTrabalho => "inserido_mercado_trabalho",
            Field::Raca => "raca",
            Field::ExperienciaDiscriminacaoTrabalho => "experiencia_discriminacao_trabalho",
            Field::PossuiCompetenciasAtualizadas => "possui_competencias_atualizadas",
            Field::SabeBuscarOportunidades => "sabe_buscar_oportunidades",
            Field::ConhecimentoRacismoEstrutural => "conhecimento_racismo_estrutural",
            Field::NivelEntendimentoRacismoEstrutural => "nivel_entendimento_racismo_estrutural",
            Field::SentiuConheceDiscriminacaoRacial => "sentiu_conhece_discriminacao_racial",
            Field::ExemplosRacismoEstrutural => "exemplos_racismo_estrutural",
            Field::OpiniaoInfluenciaEstruturaSocial => "opiniao_influencia_estrutura_social",
            Field::GrupoRacial => "grupo_racial",
        }
    }

    /// The verbatim header text of the source column, in the survey's
    /// original wording. This is the single mapping from export headers to
    /// canonical identifiers; `None` for derived fields.
    pub fn header(self) -> Option<&'static str> {
        match self {
            Field::Timestamp => Some("Carimbo de data/hora"),
            Field::FaixaEtaria => Some("Qual é a sua faixa etária?"),
            Field::InseridoMercadoTrabalho => {
                Some("Você está inserido no mercado de trabalho atualmente?")
            }
            Field::Raca => Some("Como você se identifica racialmente?"),
            Field::ExperienciaDiscriminacaoTrabalho => Some(
                "Você já sentiu que perdeu oportunidades de emprego ou sofreu discriminação \
                 direta no mercado de trabalho devido à sua etnia?",
            ),
            Field::PossuiCompetenciasAtualizadas => Some(
                "Você se considera bem informado e atualizado sobre as competências e \
                 habilidades exigidas no mercado de trabalho atualmente?",
            ),
            Field::SabeBuscarOportunidades => Some(
                "Você sabe como buscar oportunidades de emprego e elaborar um currículo eficaz?",
            ),
            Field::ConhecimentoRacismoEstrutural => {
                Some("Você já ouviu falar sobre racismo estrutural?")
            }
            Field::NivelEntendimentoRacismoEstrutural => {
                Some("Qual é o seu nível de entendimento sobre racismo estrutural?")
            }
            Field::SentiuConheceDiscriminacaoRacial => Some(
                "Você já se sentiu ou conhece alguém que tenha se sentido discriminado(a) \
                 racialmente?",
            ),
            Field::ExemplosRacismoEstrutural => Some(
                "Na sua opinião, quais são os principais exemplos de racismo estrutural que \
                 você observa no seu dia a dia? (Você pode escolher mais de uma opção)",
            ),
            Field::OpiniaoInfluenciaEstruturaSocial => Some(
                "Você acredita que o ambiente e a estrutura social em que uma pessoa cresce e \
                 a sociedade está inserida podem influenciar as oportunidades de emprego e a \
                 escolha de candidatos negros e pardos para cargos no mercado de trabalho?",
            ),
            Field::GrupoRacial => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_fields_have_headers() {
        for field in Field::SOURCE_FIELDS {
            assert!(field.header().is_some(), "{} has no header", field.name());
        }
        assert_eq!(Field::GrupoRacial.header(), None);
    }

    #[test]
    fn test_headers_are_distinct() {
        let headers: std::collections::HashSet<&str> = Field::SOURCE_FIELDS
            .iter()
            .filter_map(|f| f.header())
            .collect();
        assert_eq!(headers.len(), Field::SOURCE_FIELDS.len());
    }
}
