// src/output.rs

use crate::aggregate::{GroupSummary, SummaryRecord};
use crate::sweep::ResultsTable;
use std::io::Write;

/// Writes one CSV record per replication, with a header row.
pub fn write_results_csv<W: Write>(table: &ResultsTable, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in table {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes one CSV record per group summary, with a header row.
pub fn write_summary_csv<W: Write>(summaries: &[GroupSummary], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for summary in summaries {
        csv_writer.serialize(SummaryRecord::from(summary))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::summarize;
    use crate::trial::ReplicationResult;

    fn table() -> ResultsTable {
        ResultsTable::new(vec![
            ReplicationResult {
                sample_size: 300,
                num_latents: 3,
                num_scores: 22,
                sparsity: 0.95,
                replication_index: 1,
                dims_joliffe: 3,
                dims_kaiser: 2,
            },
            ReplicationResult {
                sample_size: 300,
                num_latents: 3,
                num_scores: 22,
                sparsity: 0.95,
                replication_index: 2,
                dims_joliffe: 5,
                dims_kaiser: 2,
            },
        ])
    }

    #[test]
    fn results_csv_has_schema_header() {
        let mut buffer = Vec::new();
        write_results_csv(&table(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("sample_size,num_latents,num_scores,sparsity,replication_index,dims_joliffe,dims_kaiser")
        );
        assert_eq!(lines.next(), Some("300,3,22,0.95,1,3,2"));
        assert_eq!(lines.next(), Some("300,3,22,0.95,2,5,2"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn summary_csv_flattens_groups() {
        let mut buffer = Vec::new();
        write_summary_csv(&summarize(&table()), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("num_latents,num_scores,sparsity_band,num_rows,joliffe_mean,joliffe_std,kaiser_mean,kaiser_std")
        );
        let record = lines.next().unwrap();
        assert!(record.starts_with("3,22,Sparse,2,4.0,"));
        assert!(record.ends_with(",2.0,0.0"));
    }
}
