//! Pipeline statistics and metrics.

use std::time::Duration;

use loader::PipelineReport;
use observability::StepTimings;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Players fetched from the upstream API
    pub records_fetched: usize,

    /// Normalized records written to the lake
    pub records_written: usize,

    /// Size of the written object
    pub bytes_written: u64,

    /// Whether the bucket was created this run
    pub bucket_created: bool,

    /// Whether the database was created this run
    pub database_created: bool,

    /// Object key the records landed at
    pub object_key: String,

    /// Storage location the catalog table points at
    pub data_location: String,

    /// Total duration of the run
    pub duration: Duration,

    /// Per-step timings
    pub timings: StepTimings,
}

impl PipelineStats {
    /// Build stats from a loader report
    pub fn from_report(report: PipelineReport, duration: Duration) -> Self {
        Self {
            records_fetched: report.records_fetched,
            records_written: report.records_written,
            bytes_written: report.bytes_written,
            bucket_created: report.provision.bucket_created,
            database_created: report.provision.database_created,
            object_key: report.object_key,
            data_location: report.data_location,
            duration,
            timings: report.timings,
        }
    }

    /// Records written per second of wall time
    pub fn records_per_sec(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.records_written as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     Pipeline Statistics                      ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Players fetched: {}", self.records_fetched);
        println!("   ├─ Records written: {}", self.records_written);
        println!("   ├─ Object size: {} bytes", self.bytes_written);
        println!("   ├─ Object key: {}", self.object_key);
        println!("   └─ Table location: {}", self.data_location);

        println!("\n🏗️  Provisioning");
        println!(
            "   ├─ Bucket: {}",
            if self.bucket_created {
                "created"
            } else {
                "already existed"
            }
        );
        println!(
            "   └─ Database: {}",
            if self.database_created {
                "created"
            } else {
                "already existed"
            }
        );

        if !self.timings.is_empty() {
            println!("\n⏱️  Step Timings");
            let entries: Vec<_> = self.timings.iter().collect();
            for (i, (step, duration)) in entries.iter().enumerate() {
                let prefix = if i == entries.len() - 1 {
                    "└─"
                } else {
                    "├─"
                };
                println!("   {} {}: {:.3}s", prefix, step, duration.as_secs_f64());
            }
        }

        println!();
    }
}
