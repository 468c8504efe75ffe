//! Event-trace CSV: header + rows `pktNr,receiveTime,sendTime` (seconds).
//! Rows with any empty field are skipped.

use log::warn;
use std::error::Error;
use std::path::Path;

/// One fully-populated trace row: one packet's SEND and RECEIVE times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRow {
    pub pkt_nr: u64,
    pub receive_time: f64,
    pub send_time: f64,
}

/// Reads the trace CSV, skipping any row with an empty field. Returns rows
/// in file order; the caller (`EventQueue::load_trace`) is responsible for
/// turning each row into a SEND and a RECEIVE event.
pub fn read_trace<P: AsRef<Path>>(path: P) -> Result<Vec<TraceRow>, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut rows = Vec::new();

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() < 3 {
            warn!("trace row {line}: expected 3 fields, got {}, skipping", record.len());
            continue;
        }

        let pkt_str = record.get(0).unwrap_or("");
        let recv_str = record.get(1).unwrap_or("");
        let send_str = record.get(2).unwrap_or("");

        if pkt_str.trim().is_empty() || recv_str.trim().is_empty() || send_str.trim().is_empty() {
            continue;
        }

        let pkt_nr: u64 = match pkt_str.trim().parse() {
            Ok(v) => v,
            Err(e) => {
                warn!("trace row {line}: bad pktNr {pkt_str:?}: {e}, skipping");
                continue;
            }
        };
        let receive_time: f64 = match recv_str.trim().parse() {
            Ok(v) => v,
            Err(e) => {
                warn!("trace row {line}: bad receiveTime {recv_str:?}: {e}, skipping");
                continue;
            }
        };
        let send_time: f64 = match send_str.trim().parse() {
            Ok(v) => v,
            Err(e) => {
                warn!("trace row {line}: bad sendTime {send_str:?}: {e}, skipping");
                continue;
            }
        };

        rows.push(TraceRow { pkt_nr, receive_time, send_time });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn skips_rows_with_empty_fields() {
        let path = std::env::temp_dir().join(format!("ncs_lab_trace_test_{:?}.csv", std::thread::current().id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "pktNr,receiveTime,sendTime").unwrap();
            writeln!(file, "1,0.02,0.01").unwrap();
            writeln!(file, "2,,0.03").unwrap();
            writeln!(file, "3,0.06,0.05").unwrap();
        }

        let rows = read_trace(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pkt_nr, 1);
        assert_eq!(rows[1].pkt_nr, 3);
    }
}
