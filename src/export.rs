//! Export pipeline
//!
//! A [`Studio`] is an async handle to one form. A dedicated worker thread
//! owns the form state, the rendered display and the rasterizer; async
//! callers send it commands and await the reply on a oneshot channel.
//! An export is one worker command: every face is captured, the page is
//! composed and the record is copied without any edit in between. Only the
//! file write happens on the async side.

use crate::compose::{self, ComposedDocument, Orientation, PageSpec, Placement};
use crate::records::{FormState, OnboardingRecord, PhotoAsset, StaffRecord, StudentRecord};
use crate::rendering::{Bitmap, Display, Rasterizer, TextSnapshot};
use crate::templates::{RenderContext, Template};
use crate::{DocumentKind, Error, GeneratorConfig, Result};
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use tokio::sync::oneshot;

enum Command<R: Template> {
    Set(R::Field, String, oneshot::Sender<Result<()>>),
    SetNamed(String, String, oneshot::Sender<Result<()>>),
    SetPhoto(Option<PhotoAsset>, oneshot::Sender<Result<()>>),
    Replace(R, oneshot::Sender<Result<()>>),
    Snapshot(String, oneshot::Sender<Result<TextSnapshot>>),
    Capture(String, oneshot::Sender<Result<Bitmap>>),
    Unmount(String, oneshot::Sender<Result<()>>),
    Record(oneshot::Sender<Result<R>>),
    Export(oneshot::Sender<Result<Exported<R>>>),
    Close(oneshot::Sender<Result<()>>),
}

/// A composed document and the record revision it was composed from
struct Exported<R> {
    record: R,
    doc: ComposedDocument,
}

/// State owned by the worker thread
struct Worker<R: Template> {
    form: FormState<R>,
    ctx: RenderContext,
    rasterizer: Rasterizer,
    display: Display,
}

impl<R: Template> Worker<R> {
    fn new(config: &GeneratorConfig, record: R) -> Self {
        let ctx = RenderContext::from_config(config);
        let display = record.render(&ctx);
        Self {
            form: FormState::from_record(record),
            ctx,
            rasterizer: Rasterizer::from_config(config),
            display,
        }
    }

    fn refresh(&mut self) {
        self.display = self.form.record().render(&self.ctx);
        debug!(
            "re-rendered {} at revision {}",
            R::KIND.label(),
            self.form.revision()
        );
    }

    fn export(&self) -> Result<Exported<R>> {
        // every face must be captured before anything is composed
        let mut bitmaps = Vec::with_capacity(R::REGIONS.len());
        for region in R::REGIONS {
            let bitmap = self.rasterizer.capture(&self.display, region)?;
            debug!("captured {} at {}x{}", region, bitmap.width, bitmap.height);
            bitmaps.push(bitmap);
        }
        let doc = compose::compose(&bitmaps, &R::KIND.layout())?;
        debug!(
            "composed {} at revision {} ({} bytes)",
            R::KIND.label(),
            self.form.revision(),
            doc.bytes.len()
        );
        Ok(Exported {
            record: self.form.record().clone(),
            doc,
        })
    }

    fn run(mut self, cmd_rx: mpsc::Receiver<Command<R>>) {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                Command::Set(field, value, resp) => {
                    self.form.set(field, value);
                    self.refresh();
                    let _ = resp.send(Ok(()));
                }
                Command::SetNamed(name, value, resp) => {
                    let res = self.form.set_named(&name, value);
                    if res.is_ok() {
                        self.refresh();
                    }
                    let _ = resp.send(res);
                }
                Command::SetPhoto(photo, resp) => {
                    let changed = photo.is_some();
                    self.form.set_photo(photo);
                    if changed {
                        self.refresh();
                    }
                    let _ = resp.send(Ok(()));
                }
                Command::Replace(record, resp) => {
                    self.form.replace(record);
                    self.refresh();
                    let _ = resp.send(Ok(()));
                }
                Command::Snapshot(region, resp) => {
                    let _ = resp.send(self.display.text_snapshot(&region));
                }
                Command::Capture(region, resp) => {
                    let _ = resp.send(self.rasterizer.capture(&self.display, &region));
                }
                Command::Unmount(region, resp) => {
                    let res = self
                        .display
                        .remove(&region)
                        .map(|_| ())
                        .ok_or(Error::MissingRenderTarget(region));
                    let _ = resp.send(res);
                }
                Command::Record(resp) => {
                    let _ = resp.send(Ok(self.form.record().clone()));
                }
                Command::Export(resp) => {
                    let _ = resp.send(self.export());
                }
                Command::Close(resp) => {
                    let _ = resp.send(Ok(()));
                    break;
                }
            }
        }
    }
}

/// What an export produced
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: DocumentKind,
    pub pages: usize,
    pub page: PageSpec,
    pub orientation: Orientation,
    pub placements: Vec<Placement>,
    pub sha256: String,
    pub bytes: usize,
}

/// Clears the in-flight flag when the export finishes, however it ends
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// An async handle to one form and its rendered document.
///
/// Clones share the same worker thread and the same in-flight flag.
#[derive(Clone)]
pub struct Studio<R: Template> {
    cmd_tx: Sender<Command<R>>,
    in_flight: Arc<AtomicBool>,
}

impl<R: Template> Studio<R> {
    /// Start a studio with an empty record
    pub async fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_record(config, R::default()).await
    }

    /// Start a studio seeded with `record`
    pub async fn with_record(config: GeneratorConfig, record: R) -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command<R>>();
        let (init_tx, init_rx) = oneshot::channel::<Result<()>>();

        thread::spawn(move || {
            if let Err(err) = config.validate() {
                let _ = init_tx.send(Err(err));
                return;
            }
            let worker = Worker::new(&config, record);
            let _ = init_tx.send(Ok(()));
            worker.run(cmd_rx);
        });

        init_rx
            .await
            .map_err(|e| Error::Other(format!("worker init canceled: {}", e)))??;

        Ok(Self {
            cmd_tx,
            in_flight: Arc::new(AtomicBool::new(false)),
        })
    }

    async fn request<T>(
        &self,
        what: &str,
        make: impl FnOnce(oneshot::Sender<Result<T>>) -> Command<R>,
    ) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .map_err(|_| Error::Other(format!("{}: studio is closed", what)))?;
        rx.await
            .map_err(|e| Error::Other(format!("{} canceled: {}", what, e)))?
    }

    /// Replace one field value
    pub async fn set(&self, field: R::Field, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        self.request("set", |tx| Command::Set(field, value, tx)).await
    }

    /// Replace a field addressed by name, e.g. from `--set name=value`
    pub async fn set_named(&self, name: &str, value: impl Into<String>) -> Result<()> {
        let (name, value) = (name.to_string(), value.into());
        self.request("set", |tx| Command::SetNamed(name, value, tx))
            .await
    }

    /// Attach a photo. `None` keeps the current one.
    pub async fn set_photo(&self, photo: Option<PhotoAsset>) -> Result<()> {
        self.request("set photo", |tx| Command::SetPhoto(photo, tx))
            .await
    }

    /// Read an image file and attach it. `None` is a no-op, as when a file
    /// picker is dismissed.
    pub async fn load_photo(&self, path: Option<&Path>) -> Result<()> {
        let Some(path) = path else {
            return Ok(());
        };
        let photo = PhotoAsset::load(path).await?;
        debug!("loaded {} photo from {}", photo.mime(), path.display());
        self.set_photo(Some(photo)).await
    }

    /// Swap in a whole record
    pub async fn replace(&self, record: R) -> Result<()> {
        self.request("replace", |tx| Command::Replace(record, tx))
            .await
    }

    /// The text currently displayed by a face
    pub async fn text_snapshot(&self, region_id: &str) -> Result<TextSnapshot> {
        let region = region_id.to_string();
        self.request("snapshot", |tx| Command::Snapshot(region, tx))
            .await
    }

    /// Text snapshots of every face in placement order
    pub async fn text_snapshots(&self) -> Result<Vec<TextSnapshot>> {
        let mut out = Vec::with_capacity(R::REGIONS.len());
        for region in R::REGIONS {
            out.push(self.text_snapshot(region).await?);
        }
        Ok(out)
    }

    /// Rasterize one face
    pub async fn capture(&self, region_id: &str) -> Result<Bitmap> {
        let region = region_id.to_string();
        self.request("capture", |tx| Command::Capture(region, tx))
            .await
    }

    /// Take a face off the display until the next edit re-renders it
    pub async fn unmount(&self, region_id: &str) -> Result<()> {
        let region = region_id.to_string();
        self.request("unmount", |tx| Command::Unmount(region, tx))
            .await
    }

    /// Copy of the current record
    pub async fn record(&self) -> Result<R> {
        self.request("record", Command::Record).await
    }

    fn begin_export(&self) -> Result<InFlight> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::ExportInFlight(R::KIND.label().to_string()))?;
        Ok(InFlight(self.in_flight.clone()))
    }

    /// Compose the document without writing it
    pub async fn export_bytes(&self) -> Result<ComposedDocument> {
        let _guard = self.begin_export()?;
        let exported = self.request("export", Command::Export).await?;
        Ok(exported.doc)
    }

    /// Compose the document and write it into `out_dir` under the record's
    /// file name, replacing any previous file of that name. The name comes
    /// from the same record revision the pages were captured from.
    pub async fn export(&self, out_dir: &Path) -> Result<ExportReport> {
        let _guard = self.begin_export()?;
        let Exported { record, doc } = self.request("export", Command::Export).await?;

        let file_name = record.file_name();
        let path = out_dir.join(&file_name);
        tokio::fs::create_dir_all(out_dir).await?;
        tokio::fs::write(&path, &doc.bytes).await?;
        info!("wrote {} ({} bytes)", path.display(), doc.bytes.len());

        Ok(ExportReport {
            path,
            file_name,
            kind: R::KIND,
            pages: 1,
            page: doc.page,
            orientation: doc.page.orientation(),
            placements: doc.placements.clone(),
            sha256: doc.sha256(),
            bytes: doc.bytes.len(),
        })
    }

    /// Stop the worker thread
    pub async fn close(self) -> Result<()> {
        self.request("close", Command::Close).await
    }
}

/// One record of a batch file with an optional photo path
#[derive(Debug, Clone, Deserialize)]
pub struct BatchEntry<R> {
    #[serde(flatten)]
    pub record: R,
    #[serde(default)]
    pub photo: Option<PathBuf>,
}

/// Records to export together, read from `[[staff]]`, `[[student]]` and
/// `[[welcome]]` tables
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BatchFile {
    pub staff: Vec<BatchEntry<StaffRecord>>,
    pub student: Vec<BatchEntry<StudentRecord>>,
    pub welcome: Vec<BatchEntry<OnboardingRecord>>,
}

impl BatchFile {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::ConfigError(format!("batch file: {}", e)))
    }

    /// Read a batch file. Relative photo paths are taken relative to the
    /// directory holding the file.
    pub async fn from_toml_file(path: &Path) -> Result<Self> {
        let s = tokio::fs::read_to_string(path).await?;
        let mut batch = Self::from_toml_str(&s)?;
        if let Some(base) = path.parent() {
            batch.resolve_photos(base);
        }
        Ok(batch)
    }

    /// Join every relative photo path onto `base`; absolute paths are kept
    pub fn resolve_photos(&mut self, base: &Path) {
        let photos = self
            .staff
            .iter_mut()
            .map(|e| &mut e.photo)
            .chain(self.student.iter_mut().map(|e| &mut e.photo))
            .chain(self.welcome.iter_mut().map(|e| &mut e.photo));
        for photo in photos.flatten() {
            if photo.is_relative() {
                *photo = base.join(&*photo);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.staff.len() + self.student.len() + self.welcome.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

async fn export_one<R: Template>(
    config: GeneratorConfig,
    entry: BatchEntry<R>,
    out_dir: PathBuf,
) -> Result<ExportReport> {
    let studio = Studio::with_record(config, entry.record).await?;
    studio.load_photo(entry.photo.as_deref()).await?;
    let report = studio.export(&out_dir).await;
    studio.close().await?;
    report
}

/// Export every record of `batch` into `out_dir`, one studio per record,
/// running up to one export per CPU at a time. Reports come back in file
/// order: staff, then students, then letters.
pub async fn export_batch(
    batch: BatchFile,
    config: &GeneratorConfig,
    out_dir: &Path,
) -> Result<Vec<ExportReport>> {
    let mut jobs = Vec::with_capacity(batch.len());
    for entry in batch.staff {
        jobs.push(export_one(config.clone(), entry, out_dir.to_path_buf()).boxed());
    }
    for entry in batch.student {
        jobs.push(export_one(config.clone(), entry, out_dir.to_path_buf()).boxed());
    }
    for entry in batch.welcome {
        jobs.push(export_one(config.clone(), entry, out_dir.to_path_buf()).boxed());
    }

    let limit = num_cpus::get().max(1);
    debug!("exporting {} document(s), {} at a time", jobs.len(), limit);
    stream::iter(jobs)
        .buffered(limit)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect()
}
