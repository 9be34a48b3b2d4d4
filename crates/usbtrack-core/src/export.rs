/// History export — tab-separated text reports.
///
/// A report is named `usb_history_<YYYYMMDD_HHMMSS>.txt` after the moment
/// the export was triggered and looks like:
///
/// ```text
/// Time	Event	Device	Mount Point
/// 2026-10-19 14:03:11	Connected	/dev/sdb1	/mnt/usb
/// 2026-10-19 14:05:42	Disconnected	/dev/sdb1	/mnt/usb
/// ```
///
/// Fields are written verbatim, never quoted or escaped.
///
/// Rows are first written to a `.partial` file that is renamed into place
/// only after a successful flush, so a failed export never leaves a report
/// behind.
use crate::error::ExportError;
use crate::model::HistoryEvent;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Column headers of an exported report.
pub const HEADER: [&str; 4] = ["Time", "Event", "Device", "Mount Point"];

/// File name for a report triggered at `at`.
pub fn report_file_name(at: DateTime<Local>) -> String {
    format!("usb_history_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// Write `events` to a new report in `dir`, creating `dir` if needed.
///
/// Returns the path of the finished report. An existing report with the same
/// name (two exports within one second) is replaced.
pub fn export_history(
    dir: &Path,
    events: &[HistoryEvent],
    at: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(report_file_name(at));
    let partial = path.with_extension("txt.partial");

    if let Err(e) = write_report(&partial, events) {
        if let Err(cleanup) = fs::remove_file(&partial) {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                warn!("Could not remove {}: {}", partial.display(), cleanup);
            }
        }
        return Err(e);
    }

    fs::rename(&partial, &path).map_err(|source| {
        let _ = fs::remove_file(&partial);
        ExportError::Io {
            path: path.clone(),
            source,
        }
    })?;

    info!("Exported {} events to {}", events.len(), path.display());
    Ok(path)
}

fn write_report(path: &Path, events: &[HistoryEvent]) -> Result<(), ExportError> {
    let csv_err = |source: csv::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Never)
        .from_path(path)
        .map_err(csv_err)?;

    writer.write_record(HEADER).map_err(csv_err)?;
    for event in events {
        writer
            .write_record([
                event.time_display().as_str(),
                event.kind.label(),
                event.identifier.as_str(),
                event.mount_point.as_str(),
            ])
            .map_err(csv_err)?;
    }

    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
