use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::index::ItemIndexer;
use crate::pipeline::{Algorithm, MiningReport};
use crate::rules::Association;
use crate::types::{ItemName, Pair};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledPair<'a> {
    pub items: (ItemName<'a>, ItemName<'a>),
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledAssociation<'a> {
    pub antecedent: ItemName<'a>,
    pub consequent: ItemName<'a>,
    pub confidence: f64,
    pub interest: f64,
}

impl<'a> LabelledAssociation<'a> {
    pub fn new(association: &Association, indexer: &'a ItemIndexer) -> Result<Self> {
        Ok(LabelledAssociation {
            antecedent: indexer.label_of(association.antecedent)?,
            consequent: indexer.label_of(association.consequent)?,
            confidence: association.confidence,
            interest: association.interest,
        })
    }
}

/// Report with every id replaced by its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledReport<'a> {
    pub algorithm: Algorithm,
    pub basket_count: usize,
    pub distinct_items: usize,
    pub frequent_items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequent_buckets: Option<usize>,
    pub candidate_pairs: usize,
    pub frequent_pairs: Vec<LabelledPair<'a>>,
    pub associations: Vec<LabelledAssociation<'a>>,
}

impl<'a> LabelledReport<'a> {
    pub fn new(report: &MiningReport, indexer: &'a ItemIndexer) -> Result<Self> {
        let mut pairs: Vec<(&Pair, &u32)> = report.frequent_pairs.iter().collect();
        pairs.sort();

        let frequent_pairs = pairs
            .into_iter()
            .map(|(pair, &count)| -> Result<LabelledPair<'a>> {
                Ok(LabelledPair {
                    items: (indexer.label_of(pair.low())?, indexer.label_of(pair.high())?),
                    count,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let associations = report
            .associations
            .iter()
            .map(|association| LabelledAssociation::new(association, indexer))
            .collect::<Result<Vec<_>>>()?;

        Ok(LabelledReport {
            algorithm: report.algorithm,
            basket_count: report.basket_count,
            distinct_items: report.distinct_items,
            frequent_items: report.frequent_items,
            frequent_buckets: report.frequent_buckets,
            candidate_pairs: report.candidate_pairs,
            frequent_pairs,
            associations,
        })
    }
}

pub fn write_text<W: Write>(
    report: &MiningReport,
    indexer: &ItemIndexer,
    out: &mut W,
) -> Result<()> {
    let report = LabelledReport::new(report, indexer)?;

    writeln!(out, "******* {} *******", report.algorithm)?;
    writeln!(out, "Total Transactions: {}", report.basket_count)?;
    writeln!(out, "Total distinct items: {}", report.distinct_items)?;
    writeln!(
        out,
        "Total filtered Singletons honouring support threshold: {}",
        report.frequent_items
    )?;
    if let Some(buckets) = report.frequent_buckets {
        writeln!(out, "Total frequent buckets: {}", buckets)?;
    }
    writeln!(out, "Total Candidate Pairs: {}", report.candidate_pairs)?;
    writeln!(
        out,
        "Total Frequent Pairs honouring support threshold: {}",
        report.frequent_pairs.len()
    )?;
    for pair in &report.frequent_pairs {
        writeln!(out, "  ({}, {}): {}", pair.items.0, pair.items.1, pair.count)?;
    }

    writeln!(out)?;
    writeln!(out, "Interesting Associations:")?;
    writeln!(out)?;
    for association in &report.associations {
        let (from, to) = (association.antecedent, association.consequent);
        writeln!(
            out,
            "Confidence of association: {}->{} = {}",
            from, to, association.confidence
        )?;
        writeln!(
            out,
            "Interest of association: {}->{} = {}",
            from, to, association.interest
        )?;
        writeln!(out)?;
    }
    writeln!(
        out,
        "Total Interesting associations: {}",
        report.associations.len()
    )?;

    Ok(())
}

pub fn write_json<W: Write>(
    reports: &[MiningReport],
    indexer: &ItemIndexer,
    out: &mut W,
) -> Result<()> {
    let reports = reports
        .iter()
        .map(|report| LabelledReport::new(report, indexer))
        .collect::<Result<Vec<_>>>()?;

    serde_json::to_writer_pretty(&mut *out, &reports)?;
    writeln!(out)?;

    Ok(())
}
