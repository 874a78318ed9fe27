//! Visualisation sink that writes one JSON annotation per analysis.

use camino::{Utf8Path, Utf8PathBuf};
use gsplit_core::{VisualizationError, VisualizationFrame, VisualizationSink};

/// Writes `{dir}/{label}_{tier}.json` for every recorded frame.
#[derive(Debug, Clone)]
pub struct FileVisualizationSink {
    dir: Utf8PathBuf,
}

impl FileVisualizationSink {
    /// Sink writing into `dir`, created on first use.
    #[must_use]
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Destination file for `frame`.
    #[must_use]
    pub fn target_for(&self, frame: &VisualizationFrame) -> Utf8PathBuf {
        let sanitised: String = frame
            .label
            .chars()
            .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' { ch } else { '_' })
            .collect();
        let stem = if sanitised.is_empty() {
            "frame".to_owned()
        } else {
            sanitised
        };
        self.dir
            .join(format!("{stem}_{}.json", frame.tier.as_str()))
    }
}

impl VisualizationSink for FileVisualizationSink {
    fn record(&self, frame: &VisualizationFrame) -> Result<(), VisualizationError> {
        let target = self.target_for(frame);
        let body = serde_json::to_vec_pretty(frame).map_err(|err| VisualizationError::Encode {
            message: err.to_string(),
        })?;
        gsplit_fs::write_file(&target, &body).map_err(|source| VisualizationError::Io {
            target: target.to_string(),
            source,
        })?;
        log::debug!("wrote visualisation frame to {target}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsplit_core::{AnchorLine, AnchorRole, CropWindow, ImageSize, ScoreTier};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn frame() -> VisualizationFrame {
        VisualizationFrame {
            label: "pint 01.jpg".to_owned(),
            tier: ScoreTier::Matched,
            window: CropWindow::full(ImageSize::new(600.0, 1000.0)).expect("window"),
            lines: vec![AnchorLine::detected(AnchorRole::BeerLine, 0.4)],
            distance_mm: 12.5,
            score: 77.1,
        }
    }

    #[rstest]
    fn frame_is_written_as_json(frame: VisualizationFrame) {
        let temp = TempDir::new().expect("temp dir");
        let dir = Utf8PathBuf::from_path_buf(temp.path().join("debug")).expect("utf-8");
        let sink = FileVisualizationSink::new(dir.clone());
        sink.record(&frame).expect("write");

        let target = dir.join("pint_01_jpg_matched.json");
        let text = gsplit_fs::read_text(&target).expect("read back");
        let value: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["score"], 77.1);
        assert_eq!(value["lines"][0]["role"], "beer_line");
    }

    #[rstest]
    #[case("pint 01.jpg", "pint_01_jpg_matched.json")]
    #[case("", "frame_matched.json")]
    fn target_names_are_sanitised(
        mut frame: VisualizationFrame,
        #[case] label: &str,
        #[case] expected: &str,
    ) {
        frame.label = label.to_owned();
        let sink = FileVisualizationSink::new("debug");
        assert_eq!(sink.target_for(&frame), Utf8PathBuf::from("debug").join(expected));
    }

    #[rstest]
    fn unwritable_target_is_an_io_error(frame: VisualizationFrame) {
        let temp = TempDir::new().expect("temp dir");
        let blocker = Utf8PathBuf::from_path_buf(temp.path().join("file")).expect("utf-8");
        gsplit_fs::write_file(&blocker, b"x").expect("write blocker");
        let sink = FileVisualizationSink::new(blocker.join("nested"));
        let err = sink.record(&frame).expect_err("parent is a file");
        assert!(matches!(err, VisualizationError::Io { .. }));
    }
}
