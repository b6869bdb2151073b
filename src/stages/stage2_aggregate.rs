//! Stage 2: descriptive statistics over the classified table.
//!
//! All operations are pure and read-only. An empty cell is a missing answer
//! and never counts; a field with no answers yields empty results, not an
//! error.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Field, RacialGroup};
use crate::stages::stage1_classify::{ClassifiedRow, ClassifiedTable};

/// Count occurrences of each distinct answer, ordered by answer ascending.
pub fn value_counts(table: &ClassifiedTable, field: Field) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in &table.rows {
        let value = row.value(field);
        if value.is_empty() {
            continue;
        }
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

/// Percentage share of each distinct answer among the rows matching
/// `predicate`, ordered by answer ascending.
///
/// Shares are percentages of the matching non-empty answers, so they sum to
/// 100 (within floating-point rounding) whenever any answer is present.
pub fn percentage_distribution<P>(
    table: &ClassifiedTable,
    field: Field,
    predicate: P,
) -> Vec<(String, f64)>
where
    P: Fn(&ClassifiedRow) -> bool,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut total = 0usize;
    for row in table.rows.iter().filter(|row| predicate(row)) {
        let value = row.value(field);
        if value.is_empty() {
            continue;
        }
        *counts.entry(value).or_insert(0) += 1;
        total += 1;
    }
    counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count as f64 / total as f64 * 100.0))
        .collect()
}

/// Cross-tabulate a field by racial group.
///
/// Both groups are always enumerated, ascending by label. Within a group,
/// every distinct answer seen anywhere in the table appears, missing ones
/// counted as zero, ordered by count descending with ties kept in answer
/// order.
pub fn grouped_counts(
    table: &ClassifiedTable,
    field: Field,
) -> Vec<(RacialGroup, Vec<(String, usize)>)> {
    let values: BTreeSet<&str> = table
        .rows
        .iter()
        .map(|row| row.value(field))
        .filter(|value| !value.is_empty())
        .collect();

    RacialGroup::ALL
        .iter()
        .map(|&group| {
            let mut entries: Vec<(String, usize)> = values
                .iter()
                .map(|&value| {
                    let count = table
                        .rows
                        .iter()
                        .filter(|row| row.group == group && row.value(field) == value)
                        .count();
                    (value.to_string(), count)
                })
                .collect();
            // Stable sort keeps the answer-ascending order on ties.
            entries.sort_by(|a, b| b.1.cmp(&a.1));
            (group, entries)
        })
        .collect()
}

/// Render a frequency table as "answer: count" lines.
pub fn format_counts(counts: &[(String, usize)]) -> String {
    let mut out = String::new();
    for (value, count) in counts {
        out.push_str(&format!("{}: {}\n", value, count));
    }
    out
}

/// Render a percentage table as "answer: share%" lines.
pub fn format_percentages(percentages: &[(String, f64)]) -> String {
    let mut out = String::new();
    for (value, share) in percentages {
        out.push_str(&format!("{}: {:.1}%\n", value, share));
    }
    out
}

/// Render the grouped cross-tabulation as the nested text block used in the
/// report's narrative sections.
pub fn format_grouped_counts(table: &ClassifiedTable, field: Field) -> String {
    let mut out = String::new();
    for (group, entries) in grouped_counts(table, field) {
        out.push_str(&format!("- {}\n", group));
        for (value, count) in entries {
            out.push_str(&format!("  * {}: {}\n", value, count));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::stage1_classify::fixtures::classified_table;

    #[test]
    fn test_group_counts_for_mixed_races() {
        let table = classified_table(&[
            ("Negro(a)", "Sim"),
            ("Pardo(a)", "Sim"),
            ("Branco(a)", "Sim"),
            ("Amarelo(a)", "Sim"),
        ]);

        let counts = value_counts(&table, Field::GrupoRacial);
        assert_eq!(
            counts,
            vec![
                ("Brancos e Outros".to_string(), 2),
                ("Pretos e Pardos".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_percentage_of_employed_pretos_e_pardos() {
        let table = classified_table(&[
            ("Negro(a)", "Sim"),
            ("Pardo(a)", "Sim"),
            ("Branco(a)", "Sim"),
            ("Amarelo(a)", "Sim"),
        ]);

        let shares = percentage_distribution(&table, Field::InseridoMercadoTrabalho, |row| {
            row.group == RacialGroup::PretosEPardos
        });
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].0, "Sim");
        assert!((shares[0].1 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let table = classified_table(&[
            ("Negro(a)", "Sim"),
            ("Negro(a)", "Não"),
            ("Pardo(a)", "Às vezes"),
            ("Branco(a)", "Sim"),
        ]);

        let shares = percentage_distribution(&table, Field::InseridoMercadoTrabalho, |row| {
            row.group == RacialGroup::PretosEPardos
        });
        assert_eq!(shares.len(), 3);
        let sum: f64 = shares.iter().map(|(_, share)| share).sum();
        assert!((sum - 100.0).abs() < 0.01, "sum was {}", sum);
    }

    #[test]
    fn test_percentage_of_empty_subset_is_empty() {
        let table = classified_table(&[("Branco(a)", "Sim")]);
        let shares = percentage_distribution(&table, Field::InseridoMercadoTrabalho, |row| {
            row.group == RacialGroup::PretosEPardos
        });
        assert!(shares.is_empty());
    }

    #[test]
    fn test_value_counts_skips_missing_answers() {
        let mut table = classified_table(&[("Negro(a)", "Sim"), ("Branco(a)", "")]);
        table.rows[0].response.faixa_etaria = String::new();

        assert!(value_counts(&table, Field::InseridoMercadoTrabalho).len() == 1);
        let ages = value_counts(&table, Field::FaixaEtaria);
        assert_eq!(ages, vec![("25 a 34 anos".to_string(), 1)]);
    }

    #[test]
    fn test_value_counts_of_field_with_no_answers_is_empty() {
        let mut table = classified_table(&[("Negro(a)", ""), ("Branco(a)", "")]);
        for row in &mut table.rows {
            row.response.inserido_mercado_trabalho.clear();
        }
        assert!(value_counts(&table, Field::InseridoMercadoTrabalho).is_empty());
    }

    #[test]
    fn test_grouped_counts_zero_fill_and_order() {
        // "Sim" appears only among Pretos e Pardos, "Não" only among
        // Brancos e Outros; both answers must appear in both groups.
        let table = classified_table(&[
            ("Negro(a)", "Sim"),
            ("Pardo(a)", "Sim"),
            ("Branco(a)", "Não"),
        ]);

        let grouped = grouped_counts(&table, Field::InseridoMercadoTrabalho);
        assert_eq!(grouped.len(), 2);

        let (group, entries) = &grouped[0];
        assert_eq!(*group, RacialGroup::BrancosEOutros);
        assert_eq!(
            entries,
            &vec![("Não".to_string(), 1), ("Sim".to_string(), 0)]
        );

        let (group, entries) = &grouped[1];
        assert_eq!(*group, RacialGroup::PretosEPardos);
        assert_eq!(
            entries,
            &vec![("Sim".to_string(), 2), ("Não".to_string(), 0)]
        );
    }

    #[test]
    fn test_grouped_counts_ties_keep_answer_order() {
        let table = classified_table(&[("Negro(a)", "Sim"), ("Pardo(a)", "Não")]);
        let grouped = grouped_counts(&table, Field::InseridoMercadoTrabalho);

        let (_, entries) = &grouped[1];
        assert_eq!(
            entries,
            &vec![("Não".to_string(), 1), ("Sim".to_string(), 1)]
        );
    }

    #[test]
    fn test_grouped_counts_conservation() {
        let table = classified_table(&[
            ("Negro(a)", "Sim"),
            ("Pardo(a)", "Não"),
            ("Branco(a)", "Sim"),
            ("Amarelo(a)", ""),
        ]);

        let grouped = grouped_counts(&table, Field::InseridoMercadoTrabalho);
        let cell_sum: usize = grouped
            .iter()
            .flat_map(|(_, entries)| entries.iter().map(|(_, count)| count))
            .sum();
        let non_null = table
            .rows
            .iter()
            .filter(|row| !row.value(Field::InseridoMercadoTrabalho).is_empty())
            .count();
        assert_eq!(cell_sum, non_null);
    }

    #[test]
    fn test_grouped_counts_empty_group_still_enumerated() {
        let table = classified_table(&[("Negro(a)", "Sim")]);
        let grouped = grouped_counts(&table, Field::InseridoMercadoTrabalho);

        assert_eq!(grouped[0].0, RacialGroup::BrancosEOutros);
        assert_eq!(grouped[0].1, vec![("Sim".to_string(), 0)]);
    }

    #[test]
    fn test_format_grouped_counts_layout() {
        let table = classified_table(&[
            ("Negro(a)", "Sim"),
            ("Pardo(a)", "Sim"),
            ("Branco(a)", "Não"),
        ]);

        let block = format_grouped_counts(&table, Field::InseridoMercadoTrabalho);
        let expected = "- Brancos e Outros\n  * Não: 1\n  * Sim: 0\n\
                        - Pretos e Pardos\n  * Sim: 2\n  * Não: 0\n";
        assert_eq!(block, expected);
    }

    #[test]
    fn test_format_counts_and_percentages() {
        let counts = vec![("Não".to_string(), 2), ("Sim".to_string(), 5)];
        assert_eq!(format_counts(&counts), "Não: 2\nSim: 5\n");

        let shares = vec![("Sim".to_string(), 100.0)];
        assert_eq!(format_percentages(&shares), "Sim: 100.0%\n");
    }

    #[test]
    fn test_empty_table_aggregations() {
        let table = ClassifiedTable::default();
        assert!(value_counts(&table, Field::FaixaEtaria).is_empty());
        assert!(
            percentage_distribution(&table, Field::FaixaEtaria, |_| true).is_empty()
        );
        let grouped = grouped_counts(&table, Field::FaixaEtaria);
        assert_eq!(grouped.len(), 2);
        assert!(grouped.iter().all(|(_, entries)| entries.is_empty()));
    }
}
