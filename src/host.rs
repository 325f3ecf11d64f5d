//! Host that owns the editor and forwards saved snapshots to a sink.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

use crate::editor::{Editor, Model, Param};
use crate::export::{ExportFormat, render};

/// Receiver of saved snapshots.
pub trait SnapshotSink {
    fn accept(&mut self, snapshot: &Model) -> Result<()>;
}

/// Emits each snapshot as a `tracing` event.
#[derive(Debug, Default)]
pub struct LogSink;

impl SnapshotSink for LogSink {
    fn accept(&mut self, snapshot: &Model) -> Result<()> {
        let json = serde_json::to_string(snapshot).wrap_err("Failed to serialize snapshot")?;
        tracing::info!(snapshot = %json, "snapshot saved");
        Ok(())
    }
}

/// Writes each snapshot to a writer in a fixed format.
pub struct WriterSink<W: Write> {
    writer: W,
    format: ExportFormat,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: ExportFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SnapshotSink for WriterSink<W> {
    fn accept(&mut self, snapshot: &Model) -> Result<()> {
        let text = render(snapshot, self.format)?;
        self.writer
            .write_all(text.as_bytes())
            .wrap_err("Failed to write snapshot")?;
        self.writer.flush().wrap_err("Failed to flush snapshot")?;
        Ok(())
    }
}

/// Sink for the `-o` destination: the file at `path`, or stdout.
pub fn output_sink(
    path: Option<&Path>,
    format: ExportFormat,
) -> Result<WriterSink<Box<dyn Write>>> {
    let writer: Box<dyn Write> = match path {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout()),
    };
    Ok(WriterSink::new(writer, format))
}

/// Keeps every snapshot it receives.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub snapshots: Vec<Model>,
}

impl MemorySink {
    pub fn last(&self) -> Option<&Model> {
        self.snapshots.last()
    }
}

impl SnapshotSink for MemorySink {
    fn accept(&mut self, snapshot: &Model) -> Result<()> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }
}

/// Forwards to two sinks in order.
pub struct TeeSink<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: SnapshotSink, B: SnapshotSink> SnapshotSink for TeeSink<A, B> {
    fn accept(&mut self, snapshot: &Model) -> Result<()> {
        self.first.accept(snapshot)?;
        self.second.accept(snapshot)
    }
}

/// Owner of the editor state.
///
/// The host is the single owner of the [`Editor`]; screens and scripted
/// edits mutate it through [`Host::editor_mut`] and never hold their own
/// copy.
pub struct Host<S> {
    editor: Option<Editor>,
    sink: S,
}

impl<S: SnapshotSink> Host<S> {
    /// Create a host with no editor mounted.
    pub fn new(sink: S) -> Self {
        Self { editor: None, sink }
    }

    pub fn with_editor(params: Vec<Param>, model: Model, sink: S) -> Self {
        let mut host = Self::new(sink);
        host.mount(params, model);
        host
    }

    /// Replace any mounted editor with a fresh one.
    pub fn mount(&mut self, params: Vec<Param>, model: Model) {
        self.editor = Some(Editor::new(params, model));
    }

    /// Drop the mounted editor and all of its state.
    pub fn unmount(&mut self) -> Option<Editor> {
        self.editor.take()
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut Editor> {
        self.editor.as_mut()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Forward the editor's current snapshot to the sink.
    ///
    /// Returns `Ok(None)` without touching the sink when no editor is
    /// mounted.
    pub fn save(&mut self) -> Result<Option<Model>> {
        let Some(editor) = self.editor.as_ref() else {
            tracing::debug!("save requested with no editor mounted");
            return Ok(None);
        };

        let snapshot = editor.snapshot();
        self.sink.accept(&snapshot)?;
        tracing::info!(
            params = snapshot.param_values.len(),
            colors = snapshot.colors.len(),
            "saved"
        );
        Ok(Some(snapshot))
    }
}
