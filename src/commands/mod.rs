pub mod add;
pub mod count;
pub mod cp;
pub mod delete;
pub mod dfam;
pub mod export;
pub mod histogram;
pub mod ls;
pub mod refseq;
pub mod url;

use crate::pipeline::IngestReport;

/// Prints a run summary the same way for every ingesting command.
pub(crate) fn print_report(report: &IngestReport) {
    println!("{}", report.summary());
    for item in &report.failed {
        eprintln!("failed: {}: {}", item.label, item.error);
    }
}
