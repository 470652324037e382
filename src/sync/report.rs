//! End-of-run summary

use crate::sync::{TargetError, TargetReport};

/// Prints one line per target plus totals to stdout
pub fn print_report(reports: &[TargetReport]) {
    println!("=== Mirror Summary ===\n");

    for report in reports {
        match &report.outcome {
            Ok(success) => println!(
                "  ✓ {}: {} pages, {} words, {} item(s) written",
                report.name, success.blocks, success.words, success.chunks
            ),
            Err(TargetError::NoContent) => {
                println!("  - {}: no content produced, destination untouched", report.name)
            }
            Err(TargetError::Sink(e)) => println!("  ✗ {}: {}", report.name, e),
        }
    }

    let (succeeded, skipped, failed) = tally(reports);
    println!();
    println!(
        "Targets: {} mirrored, {} without content, {} failed",
        succeeded, skipped, failed
    );
}

/// Counts (mirrored, no content, sink failure)
fn tally(reports: &[TargetReport]) -> (usize, usize, usize) {
    reports
        .iter()
        .fold((0, 0, 0), |(ok, empty, failed), report| match report.outcome {
            Ok(_) => (ok + 1, empty, failed),
            Err(TargetError::NoContent) => (ok, empty + 1, failed),
            Err(TargetError::Sink(_)) => (ok, empty, failed + 1),
        })
}
