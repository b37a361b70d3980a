//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `agent_snapshots.parquet`
//! - `tick_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float32Builder, Float64Builder, UInt16Builder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("agent_id", DataType::UInt32,  false),
        Field::new("tick",     DataType::UInt64,  false),
        Field::new("kind",     DataType::UInt16,  false),
        Field::new("school",   DataType::UInt16,  false),
        Field::new("x",        DataType::Float32, false),
        Field::new("y",        DataType::Float32, false),
        Field::new("vx",       DataType::Float32, false),
        Field::new("vy",       DataType::Float32, false),
        Field::new("heading",  DataType::Float32, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",          DataType::UInt64,  false),
        Field::new("sim_time_secs", DataType::Float64, false),
        Field::new("agents",        DataType::UInt64,  false),
        Field::new("mean_speed",    DataType::Float32, false),
        Field::new("max_speed",     DataType::Float32, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes simulation output to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    snapshots:   Option<ArrowWriter<File>>,
    summaries:   Option<ArrowWriter<File>>,
    snap_schema: Arc<Schema>,
    summ_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let snap_schema = snapshot_schema();
        let summ_schema = summary_schema();

        let snap_file = File::create(dir.join("agent_snapshots.parquet"))?;
        let snapshots = ArrowWriter::try_new(
            snap_file,
            Arc::clone(&snap_schema),
            Some(snappy_props()),
        )?;

        let summ_file = File::create(dir.join("tick_summaries.parquet"))?;
        let summaries = ArrowWriter::try_new(
            summ_file,
            Arc::clone(&summ_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            snapshots: Some(snapshots),
            summaries: Some(summaries),
            snap_schema,
            summ_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Ok(());
        };

        let n = rows.len();
        let mut agent_ids = UInt32Builder::with_capacity(n);
        let mut ticks     = UInt64Builder::with_capacity(n);
        let mut kinds     = UInt16Builder::with_capacity(n);
        let mut schools   = UInt16Builder::with_capacity(n);
        let mut xs        = Float32Builder::with_capacity(n);
        let mut ys        = Float32Builder::with_capacity(n);
        let mut vxs       = Float32Builder::with_capacity(n);
        let mut vys       = Float32Builder::with_capacity(n);
        let mut headings  = Float32Builder::with_capacity(n);

        for row in rows {
            agent_ids.append_value(row.agent_id);
            ticks.append_value(row.tick);
            kinds.append_value(row.kind);
            schools.append_value(row.school);
            xs.append_value(row.x);
            ys.append_value(row.y);
            vxs.append_value(row.vx);
            vys.append_value(row.vy);
            headings.append_value(row.heading);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                Arc::new(agent_ids.finish()),
                Arc::new(ticks.finish()),
                Arc::new(kinds.finish()),
                Arc::new(schools.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(vxs.finish()),
                Arc::new(vys.finish()),
                Arc::new(headings.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut ticks  = UInt64Builder::new();
        let mut times  = Float64Builder::new();
        let mut agents = UInt64Builder::new();
        let mut means  = Float32Builder::new();
        let mut maxes  = Float32Builder::new();

        ticks.append_value(row.tick);
        times.append_value(row.sim_time_secs);
        agents.append_value(row.agents);
        means.append_value(row.mean_speed);
        maxes.append_value(row.max_speed);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(times.finish()),
                Arc::new(agents.finish()),
                Arc::new(means.finish()),
                Arc::new(maxes.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.snapshots.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
