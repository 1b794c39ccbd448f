//! Output formatting module

use serde::Serialize;
use shelfsim_app::app::{AccuracyStats, SessionSummary};
use shelfsim_domain::model::{Detection, ForeignObject, Shelf};
use shelfsim_domain::service::ScanReport;
use shelfsim_types::{OutputFormat, Result};

#[derive(Debug, Serialize)]
struct ItemSnapshot<'a> {
    product_id: &'a str,
    name: &'a str,
    actual_quantity: u32,
    accuracy: Option<f64>,
    detection: Option<&'a Detection>,
}

/// Shelf state right after one scan
#[derive(Debug, Serialize)]
pub struct ScanSnapshot<'a> {
    scan: u32,
    report: &'a ScanReport,
    total_items: u64,
    items: Vec<ItemSnapshot<'a>>,
    foreign_objects: &'a [ForeignObject],
}

impl<'a> ScanSnapshot<'a> {
    pub fn new(scan: u32, report: &'a ScanReport, shelf: &'a Shelf) -> Self {
        let items = shelf
            .items()
            .map(|item| ItemSnapshot {
                product_id: item.product().product_id(),
                name: item.product().name(),
                actual_quantity: item.actual_quantity(),
                accuracy: item.get_detection_accuracy(),
                detection: item.detection(),
            })
            .collect();
        Self {
            scan,
            report,
            total_items: shelf.get_total_items(),
            items,
            foreign_objects: shelf.foreign_objects(),
        }
    }
}

/// Print a scan as a table; JSON scans are collected and printed by the caller
pub fn print_scan_table(scan: u32, report: &ScanReport, shelf: &Shelf) {
    println!("\nScan {} - Shelf {}", scan, report.shelf_id);
    println!("{}", "=".repeat(40));
    println!("Total items on shelf: {}", shelf.get_total_items());

    for item in shelf.items() {
        println!("\n{}", item);
    }

    println!();
    if shelf.foreign_objects().is_empty() {
        println!("Foreign objects: None");
    } else {
        println!("Foreign objects:");
        for object in shelf.foreign_objects() {
            println!("  - {}", object);
        }
    }

    if report.has_anomalies() {
        println!("Anomalies:");
        for anomaly in &report.anomalies {
            println!("  - {}", anomaly);
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

pub fn output_summary(output_format: OutputFormat, summary: &SessionSummary) -> Result<()> {
    if output_format == OutputFormat::Json {
        #[derive(Serialize)]
        struct SummaryJson<'a> {
            #[serde(flatten)]
            summary: &'a SessionSummary,
            by_product: std::collections::BTreeMap<String, AccuracyStats>,
        }
        return print_json(&SummaryJson {
            summary,
            by_product: summary.by_product(),
        });
    }

    println!("\nDetection Accuracy - Shelf {}", summary.shelf_id);
    println!("{}", "=".repeat(40));
    println!("Scans:            {}", summary.scans);
    println!("Anomalies:        {}", summary.anomalies);
    println!("Foreign objects:  {}", summary.foreign_objects);
    print_stats("All products", &summary.overall);

    println!();
    println!(
        "{:<20} {:>6} {:>9} {:>9} {:>9} {:>6} {:>6} {:>6} {:>6}",
        "Product", "N", "Mean", "Min", "Conf", "Sig", "Minor", "Obsc", "Misid"
    );
    println!("{}", "-".repeat(86));
    for (product_id, stats) in summary.by_product() {
        println!(
            "{:<20} {:>6} {:>8.1}% {:>8.1}% {:>9.2} {:>6} {:>6} {:>6} {:>6}",
            truncate_str(&product_id, 20),
            stats.sample_count,
            stats.mean_accuracy * 100.0,
            stats.min_accuracy * 100.0,
            stats.mean_confidence,
            stats.significant_miscounts,
            stats.minor_miscounts,
            stats.obscured,
            stats.misidentified
        );
    }

    Ok(())
}

fn print_stats(label: &str, stats: &AccuracyStats) {
    println!("\n{}", label);
    if stats.sample_count == 0 {
        println!("  No detections recorded");
        return;
    }
    println!("  Samples:          {}", stats.sample_count);
    println!("  Mean accuracy:    {:.1}%", stats.mean_accuracy * 100.0);
    println!(
        "  Range:            {:.1}% .. {:.1}%",
        stats.min_accuracy * 100.0,
        stats.max_accuracy * 100.0
    );
    println!("  Mean abs error:   {:.2}", stats.mean_abs_error);
    println!("  Mean confidence:  {:.2}", stats.mean_confidence);
    println!(
        "  Outcomes:         {} accurate, {} minor, {} significant, {} obscured, {} misidentified, {} out of stock",
        stats.accurate,
        stats.minor_miscounts,
        stats.significant_miscounts,
        stats.obscured,
        stats.misidentified,
        stats.out_of_stock
    );
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
