//! Per-request inputs and parallel batch rendering.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::foundation::error::{VinylError, VinylResult};
use crate::render::compositor::Compositor;

/// Everything one render needs: the video it is for, its title and raw thumbnail bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestContext {
    pub video_id: String,
    pub title: String,
    pub thumbnail: Vec<u8>,
}

impl RequestContext {
    pub fn new(
        video_id: impl Into<String>,
        title: impl Into<String>,
        thumbnail: Vec<u8>,
    ) -> VinylResult<Self> {
        let video_id = video_id.into();
        validate_video_id(&video_id)?;
        Ok(Self {
            video_id,
            title: title.into(),
            thumbnail,
        })
    }
}

/// Video ids double as output file stems, so only `[A-Za-z0-9_-]` is accepted.
pub fn validate_video_id(id: &str) -> VinylResult<()> {
    if id.is_empty() {
        return Err(VinylError::validation("missing video_id"));
    }
    if let Some(c) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(VinylError::validation(format!(
            "video_id '{id}' contains invalid character {c:?}"
        )));
    }
    Ok(())
}

impl Compositor {
    /// Render one request; the log span carries its video id.
    #[tracing::instrument(level = "info", skip_all, fields(video_id = %req.video_id))]
    pub fn render_request(&self, req: &RequestContext) -> VinylResult<Vec<u8>> {
        validate_video_id(&req.video_id)?;
        match self.render(&req.title, &req.thumbnail) {
            Ok(png) => {
                tracing::info!(bytes = png.len(), "rendered");
                Ok(png)
            }
            Err(e) => {
                tracing::warn!(error = %e, "render failed");
                Err(e)
            }
        }
    }
}

/// Render every request on a dedicated rayon pool.
///
/// Results come back in input order, one per request. A failing request never affects the
/// others; only a pool that cannot be built fails the whole call.
#[tracing::instrument(level = "info", skip_all, fields(requests = requests.len(), threads = ?threads))]
pub fn render_batch(
    compositor: &Compositor,
    requests: &[RequestContext],
    threads: Option<usize>,
) -> VinylResult<Vec<VinylResult<Vec<u8>>>> {
    let pool = build_thread_pool(threads)?;
    Ok(pool.install(|| {
        requests
            .par_iter()
            .map(|req| compositor.render_request(req))
            .collect()
    }))
}

fn build_thread_pool(threads: Option<usize>) -> VinylResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(VinylError::validation("batch 'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| VinylError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

/// One job of a batch manifest. `thumbnail` is a path, relative to the manifest.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub video_id: String,
    pub title: String,
    pub thumbnail: PathBuf,
}

impl ManifestEntry {
    /// Read the thumbnail and build the request.
    pub fn load(&self, base_dir: &Path) -> VinylResult<RequestContext> {
        let path = if self.thumbnail.is_absolute() {
            self.thumbnail.clone()
        } else {
            base_dir.join(&self.thumbnail)
        };
        let bytes = std::fs::read(&path).map_err(|e| {
            VinylError::decode(format!("read thumbnail '{}': {e}", path.display()))
        })?;
        RequestContext::new(self.video_id.clone(), self.title.clone(), bytes)
    }
}

pub fn parse_manifest(json: &str) -> VinylResult<Vec<ManifestEntry>> {
    serde_json::from_str(json)
        .map_err(|e| VinylError::validation(format!("invalid manifest: {e}")))
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BatchSummary {
    pub rendered: Vec<RenderedEntry>,
    pub failed: Vec<FailedEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RenderedEntry {
    pub video_id: String,
    pub path: PathBuf,
    pub bytes: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FailedEntry {
    pub video_id: String,
    pub error: String,
}

/// Run a manifest: load every job, render the loadable ones in parallel and write
/// `<out_dir>/<video_id>.png` for each success.
///
/// The first job with a given `video_id` wins; later repeats are reported as failed
/// without rendering.
pub fn run_manifest(
    compositor: &Compositor,
    entries: &[ManifestEntry],
    base_dir: &Path,
    out_dir: &Path,
    threads: Option<usize>,
) -> VinylResult<BatchSummary> {
    std::fs::create_dir_all(out_dir).map_err(|e| {
        VinylError::Other(anyhow::anyhow!(
            "create output dir '{}': {e}",
            out_dir.display()
        ))
    })?;

    let mut summary = BatchSummary::default();
    let mut requests = Vec::with_capacity(entries.len());
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        // Ids name the output files; a repeat would overwrite the first render.
        if !seen.insert(entry.video_id.as_str()) {
            summary.failed.push(FailedEntry {
                video_id: entry.video_id.clone(),
                error: VinylError::validation(format!(
                    "duplicate video_id '{}' in manifest",
                    entry.video_id
                ))
                .to_string(),
            });
            continue;
        }
        match entry.load(base_dir) {
            Ok(req) => requests.push(req),
            Err(e) => summary.failed.push(FailedEntry {
                video_id: entry.video_id.clone(),
                error: e.to_string(),
            }),
        }
    }

    let results = render_batch(compositor, &requests, threads)?;
    for (req, result) in requests.iter().zip(results) {
        let written = result.and_then(|png| {
            let path = out_dir.join(format!("{}.png", req.video_id));
            std::fs::write(&path, &png).map_err(|e| {
                VinylError::encode(format!("write '{}': {e}", path.display()))
            })?;
            Ok((path, png.len()))
        });
        match written {
            Ok((path, bytes)) => summary.rendered.push(RenderedEntry {
                video_id: req.video_id.clone(),
                path,
                bytes,
            }),
            Err(e) => summary.failed.push(FailedEntry {
                video_id: req.video_id.clone(),
                error: e.to_string(),
            }),
        }
    }
    tracing::info!(
        rendered = summary.rendered.len(),
        failed = summary.failed.len(),
        "batch finished"
    );
    Ok(summary)
}

#[cfg(test)]
#[path = "../tests/unit/request.rs"]
mod tests;
