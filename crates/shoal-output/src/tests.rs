//! Integration tests for shoal-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{AgentSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            tick,
            kind:    0,
            school:  1,
            x:       agent_id as f32 * 0.5,
            y:       -1.0,
            vx:      1.0,
            vy:      0.0,
            heading: 0.0,
        }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            sim_time_secs: tick as f64 * 0.25,
            agents:        12,
            mean_speed:    1.5,
            max_speed:     2.0,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("agent_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("agent_snapshots.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["agent_id", "tick", "kind", "school", "x", "y", "vx", "vy", "heading"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["tick", "sim_time_secs", "agents", "mean_speed", "max_speed"]);
    }

    #[test]
    fn csv_snapshot_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = vec![snap_row(0, 5), snap_row(1, 5), snap_row(2, 5)];
        w.write_snapshots(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 3);
        assert_eq!(&read_rows[0][0], "0"); // agent_id
        assert_eq!(&read_rows[0][1], "5"); // tick
        assert_eq!(&read_rows[1][4], "0.5"); // x
        assert_eq!(&read_rows[2][0], "2");
        assert_eq!(&read_rows[2][5], "-1"); // y
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 1);
        assert_eq!(&read_rows[0][0], "3");
        assert_eq!(&read_rows[0][1], "0.75");
        assert_eq!(&read_rows[0][2], "12");
        assert_eq!(&read_rows[0][3], "1.5");
        assert_eq!(&read_rows[0][4], "2");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }
}

// ── Row collection and observer ───────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use std::io;

    use shoal_agent::{AgentInit, AgentStoreBuilder};
    use shoal_core::{ArenaBounds, KindId, SchoolId, SimConfig, Tick, Vec2};
    use shoal_sim::{SimBuilder, SimObserver, TickStats};
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::row::{AgentSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn fish(kind: u16, school: u16, x: f32) -> AgentInit {
        AgentInit {
            position:  Vec2::new(x, 0.0),
            velocity:  Vec2::new(0.0, 1.0),
            kind:      KindId(kind),
            schooling: kind == 0,
            school:    SchoolId(school),
            max_speed: 2.0,
        }
    }

    /// Writer that fails every call with a distinct message.
    #[derive(Default)]
    struct FailingWriter {
        calls: usize,
    }

    impl FailingWriter {
        fn fail(&mut self) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(io::Error::other(format!("failure {}", self.calls))))
        }
    }

    impl OutputWriter for FailingWriter {
        fn write_snapshots(&mut self, _rows: &[AgentSnapshotRow]) -> OutputResult<()> {
            self.fail()
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.fail()
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.fail()
        }
    }

    #[test]
    fn rows_follow_store_order() {
        let (store, _) = AgentStoreBuilder::new(2, 1)
            .agent(fish(0, 3, -1.0))
            .agent(fish(0, 3, 0.0))
            .agent(fish(1, 0, 1.0))
            .build()
            .unwrap();

        let rows = AgentSnapshotRow::collect(Tick(9), &store);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.tick == 9));
        assert_eq!(rows[1].agent_id, 1);
        assert_eq!(rows[1].school, 3);
        assert_eq!(rows[2].kind, 1);
        assert_eq!(rows[2].x, 1.0);
        assert!((rows[0].heading - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = SimOutputObserver::new(FailingWriter::default());
        obs.on_tick_end(Tick(0), &TickStats::default());
        obs.on_tick_end(Tick(1), &TickStats::default());
        obs.on_sim_end(Tick(2));

        let err = obs.take_error().expect("error stored");
        assert!(err.to_string().contains("failure 1"), "got {err}");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 3);
    }

    #[test]
    fn integration_csv() {
        let config = SimConfig {
            dt_secs:               0.05,
            total_ticks:           6,
            seed:                  1,
            num_threads:           Some(1),
            output_interval_ticks: 2,
        };

        let (store, rngs) = AgentStoreBuilder::new(2, 1)
            .agent(fish(0, 0, -1.0))
            .agent(fish(0, 0, -0.5))
            .agent(fish(1, 0, 2.0))
            .build()
            .unwrap();
        let mut sim = SimBuilder::new(config, store, rngs)
            .bounds(ArenaBounds::default())
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // output_interval = 2 → snapshots at ticks 0, 2, 4 (3 ticks × 3 agents)
        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 9, "expected 9 snapshot rows, got {}", rows.len());

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 6);
        assert_eq!(&summaries[5][0], "5");
        assert_eq!(&summaries[5][2], "3");
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::row::{AgentSnapshotRow, TickSummaryRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row(agent_id: u32, school: u16) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            tick: 1,
            kind: 2,
            school,
            x: 0.25,
            y: -3.5,
            vx: 1.0,
            vy: 0.0,
            heading: 0.0,
        }
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_snapshot_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[row(0, 0), row(1, 0), row(2, 1)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM agent_snapshots", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_position_stored() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[row(4, 7)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (x, y, school): (f64, f64, i64) = conn
            .query_row(
                "SELECT x, y, school FROM agent_snapshots WHERE agent_id = 4",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(x, 0.25);
        assert_eq!(y, -3.5);
        assert_eq!(school, 7);
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick:          7,
            sim_time_secs: 0.5,
            agents:        42,
            mean_speed:    1.25,
            max_speed:     2.0,
        })
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (time, agents, mean): (f64, i64, f64) = conn
            .query_row(
                "SELECT sim_time_secs, agents, mean_speed FROM tick_summaries WHERE tick = 7",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(time, 0.5);
        assert_eq!(agents, 42);
        assert_eq!(mean, 1.25);
    }

    #[test]
    fn sqlite_duplicate_tick_summary_errors() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let summary = TickSummaryRow {
            tick: 1, sim_time_secs: 0.1, agents: 1, mean_speed: 1.0, max_speed: 1.0,
        };
        w.write_tick_summary(&summary).unwrap();
        assert!(w.write_tick_summary(&summary).is_err());
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use crate::parquet::ParquetWriter;
    use crate::row::AgentSnapshotRow;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row(agent_id: u32) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            tick: 2,
            kind: 0,
            school: 0,
            x: 1.0,
            y: 2.0,
            vx: 0.0,
            vy: 1.0,
            heading: std::f32::consts::FRAC_PI_2,
        }
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("agent_snapshots.parquet").exists());
        assert!(dir.path().join("tick_summaries.parquet").exists());
    }

    #[test]
    fn parquet_snapshot_schema_and_rows() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[row(0), row(1)]).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("agent_snapshots.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let reader = builder.build().unwrap();

        let total_rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total_rows, 2);

        let field_names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(field_names, ["agent_id", "tick", "kind", "school", "x", "y", "vx", "vy", "heading"]);
        assert_eq!(*schema.field_with_name("x").unwrap().data_type(), DataType::Float32);
        assert_eq!(*schema.field_with_name("school").unwrap().data_type(), DataType::UInt16);
    }

    #[test]
    fn parquet_finish_required() {
        // Dropping the writer without finish() leaves the footer unwritten.
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_snapshots(&[row(0)]).unwrap();
        }

        let file = std::fs::File::open(dir.path().join("agent_snapshots.parquet")).unwrap();
        let result = ParquetRecordBatchReaderBuilder::try_new(file);
        assert!(result.is_err(), "file without Parquet footer should fail to open");
    }
}
