//! Shared fixtures for integration tests

#![allow(dead_code)]

use image::{Rgb, RgbImage};
use integrity_scanner_rs::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Stand-in for `pdfinfo`: a PDF passes when it is non-empty
#[derive(Clone, Default)]
pub struct SizeProbe {
    pub probed: Arc<Mutex<Vec<PathBuf>>>,
}

impl PdfProbe for SizeProbe {
    fn name(&self) -> &str {
        "size-probe"
    }

    fn probe(&self, path: &Path) -> io::Result<ProbeStatus> {
        self.probed.lock().unwrap().push(path.to_path_buf());
        let len = fs::metadata(path)?.len();
        Ok(if len > 0 {
            ProbeStatus::Passed
        } else {
            ProbeStatus::Failed("non-zero probe exit (1)".into())
        })
    }
}

/// Probe whose tool vanishes after `available_calls` launches
pub struct VanishingProbe {
    pub calls: AtomicUsize,
    pub available_calls: usize,
}

impl PdfProbe for VanishingProbe {
    fn name(&self) -> &str {
        "vanishing-probe"
    }

    fn probe(&self, _path: &Path) -> io::Result<ProbeStatus> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.available_calls {
            return Err(io::Error::new(io::ErrorKind::NotFound, "probe binary removed"));
        }
        Ok(ProbeStatus::Passed)
    }
}

/// Owned copy of a scan event
#[derive(Debug, Clone)]
pub enum Recorded {
    Validated(PathBuf),
    Deleted(PathBuf),
    Inconclusive(PathBuf),
    Retained(PathBuf),
    DeleteFailed(PathBuf),
    Skipped(PathBuf),
    Progress(ScanCounters),
    Finished(ScanSummary),
}

#[derive(Clone, Default)]
pub struct Recorder {
    pub events: Arc<Mutex<Vec<Recorded>>>,
    pub flushed: Arc<AtomicUsize>,
}

impl Recorder {
    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    pub fn skipped(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Recorded::Skipped(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn progress(&self) -> Vec<ScanCounters> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Recorded::Progress(counters) => Some(counters),
                _ => None,
            })
            .collect()
    }
}

impl ScanReporter for Recorder {
    fn report(&mut self, event: &ScanEvent<'_>) {
        let recorded = match event {
            ScanEvent::Started { .. } => return,
            ScanEvent::Validated { path, .. } => Recorded::Validated(path.to_path_buf()),
            ScanEvent::Deleted { path, .. } => Recorded::Deleted(path.to_path_buf()),
            ScanEvent::Inconclusive { path, .. } => Recorded::Inconclusive(path.to_path_buf()),
            ScanEvent::Retained { path, .. } => Recorded::Retained(path.to_path_buf()),
            ScanEvent::DeleteFailed { path, .. } => Recorded::DeleteFailed(path.to_path_buf()),
            ScanEvent::SubtreeSkipped { error } => Recorded::Skipped(error.path().to_path_buf()),
            ScanEvent::Progress { counters } => Recorded::Progress(*counters),
            ScanEvent::Finished { summary } => Recorded::Finished((*summary).clone()),
        };
        self.events.lock().unwrap().push(recorded);
    }

    fn flush(&mut self) {
        self.flushed.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn write_jpeg(path: &Path) {
    let img = RgbImage::from_pixel(12, 12, Rgb([10, 120, 200]));
    img.save_with_format(path, image::ImageFormat::Jpeg).unwrap();
}

pub fn scanner_with_probe(root: &Path, probe: impl PdfProbe + 'static) -> Scanner {
    Scanner::new(
        ScanConfig::new(root),
        ValidatorRegistry::standard(PdfValidator::new(Box::new(probe))),
    )
}

/// Sorted file names directly under `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
