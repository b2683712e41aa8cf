use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use vialivre_io::{write_png, GeneratorConfig, IconError};
use vialivre_renderer::{render_maskable, Canvas, LogoRasterizer, Rasterizer, BADGE_BLUE};

/// Generate the VIA LIVRE web app icons and favicon.
#[derive(Debug, Parser)]
#[command(name = "icongen", version, about)]
pub struct Cli {
    /// JSON generator config. Without it, `icons/` and `favicon.png` are
    /// written under the working directory.
    pub config: Option<PathBuf>,
}

/// One file written by a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    /// Path relative to the output root, as printed.
    pub name: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Set when the favicon is the solid-color fallback.
    pub fallback: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub icons: Vec<GeneratedIcon>,
}

impl GenerationReport {
    pub fn names(&self) -> Vec<&str> {
        self.icons.iter().map(|i| i.name.as_str()).collect()
    }
}

/// Writes the icon set described by a [`GeneratorConfig`].
pub struct IconGenerator<R = LogoRasterizer> {
    config: GeneratorConfig,
    rasterizer: R,
}

impl IconGenerator<LogoRasterizer> {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_rasterizer(config, LogoRasterizer)
    }
}

impl<R: Rasterizer> IconGenerator<R> {
    pub fn with_rasterizer(config: GeneratorConfig, rasterizer: R) -> Self {
        Self { config, rasterizer }
    }

    /// Generate every icon, printing one `Generated ...` line per file to
    /// `out` followed by a summary.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<GenerationReport, IconError> {
        self.config.validate()?;

        let icons_path = self.config.icons_path();
        fs::create_dir_all(&icons_path).map_err(|e| IconError::io(&icons_path, e))?;

        let mut report = GenerationReport::default();

        for &size in &self.config.icon_sizes {
            let logo = self.rasterizer.rasterize(size)?;
            let name = self.config.icon_name(size);
            self.save(&name, &logo, false, &mut report, out)?;
        }

        for &size in &self.config.maskable_sizes {
            let maskable = render_maskable(&self.rasterizer, size, self.config.maskable_padding)?;
            let name = self.config.maskable_name(size);
            self.save(&name, &maskable, false, &mut report, out)?;
        }

        self.write_favicon(&mut report, out)?;

        writeln!(out, "\nAll logos generated successfully!").map_err(IconError::Output)?;
        Ok(report)
    }

    fn save<W: Write>(
        &self,
        name: &str,
        canvas: &Canvas,
        fallback: bool,
        report: &mut GenerationReport,
        out: &mut W,
    ) -> Result<(), IconError> {
        let path = self.config.output_dir.join(name);
        write_png(&path, canvas)?;
        writeln!(
            out,
            "Generated {}{}",
            if fallback { "simple " } else { "" },
            name
        )
        .map_err(IconError::Output)?;
        report.icons.push(GeneratedIcon {
            name: name.to_string(),
            path,
            width: canvas.width(),
            height: canvas.height(),
            fallback,
        });
        Ok(())
    }

    /// Render the favicon, degrading to a solid badge-blue square. A failed
    /// fallback is logged and otherwise ignored.
    fn write_favicon<W: Write>(
        &self,
        report: &mut GenerationReport,
        out: &mut W,
    ) -> Result<(), IconError> {
        let size = self.config.favicon_size;
        let name = self.config.favicon_name.as_str();

        let rendered = self
            .rasterizer
            .rasterize(size)
            .map_err(IconError::from)
            .and_then(|favicon| self.save(name, &favicon, false, report, out));

        let Err(e) = rendered else {
            return Ok(());
        };
        if let IconError::Output(_) = e {
            return Err(e);
        }

        log::warn!("Favicon render failed, writing solid fallback: {}", e);
        writeln!(out, "Warning: Could not generate favicon: {}", e).map_err(IconError::Output)?;

        let simple = Canvas::filled(size, size, BADGE_BLUE);
        match self.save(name, &simple, true, report, out) {
            Err(IconError::Output(e)) => Err(IconError::Output(e)),
            Err(e) => {
                log::debug!("Fallback favicon also failed: {}", e);
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }
}

/// Entry point for the `icongen` binary.
pub fn run(cli: &Cli) -> Result<GenerationReport, IconError> {
    let config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    IconGenerator::new(config).run(&mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::path::Path;
    use vialivre_core::Color;
    use vialivre_io::read_png;
    use vialivre_renderer::{render_logo, RenderError};

    /// Delegates to the real logo but fails for one size.
    struct FailingAt(u32);

    impl Rasterizer for FailingAt {
        fn rasterize(&self, size: u32) -> Result<Canvas, RenderError> {
            if size == self.0 {
                Err(RenderError::InvalidSize(size))
            } else {
                LogoRasterizer.rasterize(size)
            }
        }
    }

    fn config_in(dir: &Path) -> GeneratorConfig {
        GeneratorConfig {
            output_dir: dir.to_path_buf(),
            ..GeneratorConfig::default()
        }
    }

    fn run_to_string<R: Rasterizer>(
        generator: &IconGenerator<R>,
    ) -> (Result<GenerationReport, IconError>, String) {
        let mut out = Vec::new();
        let result = generator.run(&mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_default_run_writes_five_files() {
        let dir = tempfile::tempdir().unwrap();
        let (report, output) = run_to_string(&IconGenerator::new(config_in(dir.path())));
        let report = report.unwrap();

        assert_eq!(
            report.names(),
            vec![
                "icons/Icon-192.png",
                "icons/Icon-512.png",
                "icons/Icon-maskable-192.png",
                "icons/Icon-maskable-512.png",
                "favicon.png",
            ]
        );
        let expected = [(192, 192), (512, 512), (240, 240), (640, 640), (64, 64)];
        for (icon, &(w, h)) in report.icons.iter().zip(&expected) {
            let png = read_png(&icon.path).unwrap();
            assert_eq!((png.width(), png.height()), (w, h));
            assert_eq!((icon.width, icon.height), (w, h));
            assert!(!icon.fallback);
        }

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Generated icons/Icon-192.png");
        assert_eq!(lines[4], "Generated favicon.png");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "All logos generated successfully!");

        let written = fs::read_dir(dir.path().join("icons")).unwrap().count();
        assert_eq!(written, 4);
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let generator = IconGenerator::new(config_in(dir.path()));

        let first = generator.run(&mut io::sink()).unwrap();
        let before: Vec<Vec<u8>> = first.icons.iter().map(|i| fs::read(&i.path).unwrap()).collect();

        // Existing output directory is not an error.
        let second = generator.run(&mut io::sink()).unwrap();
        let after: Vec<Vec<u8>> = second.icons.iter().map(|i| fs::read(&i.path).unwrap()).collect();

        assert_eq!(first, second);
        assert_eq!(before, after);
    }

    #[test]
    fn test_creates_nested_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("web").join("public");
        IconGenerator::new(config_in(&root))
            .run(&mut io::sink())
            .unwrap();
        assert!(root.join("icons").join("Icon-512.png").is_file());
        assert!(root.join("favicon.png").is_file());
    }

    #[test]
    fn test_maskable_file_embeds_logo() {
        let dir = tempfile::tempdir().unwrap();
        IconGenerator::new(config_in(dir.path()))
            .run(&mut io::sink())
            .unwrap();

        let logo = render_logo(192).unwrap();
        let maskable = read_png(&dir.path().join("icons/Icon-maskable-192.png")).unwrap();
        let offset = (maskable.width() - 192) / 2;
        assert_eq!(offset, 24);
        for y in 0..192 {
            for x in 0..192 {
                assert_eq!(maskable.pixel(x + offset, y + offset), logo.pixel(x, y));
            }
        }
        assert_eq!(maskable.pixel(0, 0), Color::TRANSPARENT);
        assert_eq!(maskable.pixel(239, 239), Color::TRANSPARENT);
    }

    #[test]
    fn test_favicon_falls_back_to_solid_blue() {
        let dir = tempfile::tempdir().unwrap();
        let generator = IconGenerator::with_rasterizer(config_in(dir.path()), FailingAt(64));
        let (report, output) = run_to_string(&generator);
        let report = report.unwrap();

        let favicon = report.icons.last().unwrap();
        assert_eq!(favicon.name, "favicon.png");
        assert!(favicon.fallback);

        let png = read_png(&dir.path().join("favicon.png")).unwrap();
        assert_eq!((png.width(), png.height()), (64, 64));
        assert!(png
            .image()
            .pixels()
            .all(|p| Color::from_array(p.0) == Color::rgb(0x01, 0x75, 0xC2)));

        assert!(output.contains("Warning: Could not generate favicon: "));
        assert!(output.contains("Generated simple favicon.png"));
        assert!(output.ends_with("All logos generated successfully!\n"));
    }

    #[test]
    fn test_failed_fallback_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the favicon should go makes both writes fail.
        fs::create_dir_all(dir.path().join("favicon.png")).unwrap();

        let (report, output) = run_to_string(&IconGenerator::new(config_in(dir.path())));
        let report = report.unwrap();

        assert_eq!(report.icons.len(), 4);
        assert!(output.contains("Warning: Could not generate favicon: "));
        assert!(!output.contains("Generated simple"));
        assert!(output.ends_with("All logos generated successfully!\n"));
    }

    #[test]
    fn test_icon_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let generator = IconGenerator::with_rasterizer(config_in(dir.path()), FailingAt(512));
        let (result, output) = run_to_string(&generator);
        assert!(matches!(
            result,
            Err(IconError::Render(RenderError::InvalidSize(512)))
        ));
        assert_eq!(output, "Generated icons/Icon-192.png\n");
    }

    #[test]
    fn test_unwritable_output_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file, not a directory").unwrap();

        let result = IconGenerator::new(config_in(&blocker)).run(&mut io::sink());
        assert!(matches!(result, Err(IconError::Io { .. })));
    }

    #[test]
    fn test_oversized_padding_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            maskable_padding: 1e9,
            ..config_in(dir.path())
        };
        let (result, output) = run_to_string(&IconGenerator::new(config));
        assert!(matches!(result, Err(IconError::InvalidConfig(_))));
        assert!(output.is_empty());
        assert!(!dir.path().join("icons").exists());
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from(["icongen"]).unwrap();
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["icongen", "web.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("web.json")));

        let help = Cli::try_parse_from(["icongen", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
        let version = Cli::try_parse_from(["icongen", "--version"]).unwrap_err();
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);

        assert!(Cli::try_parse_from(["icongen", "a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_run_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("public");
        let config_path = dir.path().join("icons.json");
        let json = serde_json::json!({
            "output_dir": root,
            "icons_dir": "img",
            "icon_sizes": [48],
            "maskable_sizes": [96],
            "favicon_size": 32,
            "favicon_name": "favicon-32.png",
        });
        fs::write(&config_path, json.to_string()).unwrap();

        let report = run(&Cli {
            config: Some(config_path),
        })
        .unwrap();

        assert_eq!(
            report.names(),
            vec!["img/Icon-48.png", "img/Icon-maskable-96.png", "favicon-32.png"]
        );
        let expected = [
            (root.join("img/Icon-48.png"), 48),
            (root.join("img/Icon-maskable-96.png"), 120),
            (root.join("favicon-32.png"), 32),
        ];
        for (path, side) in &expected {
            let png = read_png(path).unwrap();
            assert_eq!((png.width(), png.height()), (*side, *side));
        }
        assert_eq!(fs::read_dir(root.join("img")).unwrap().count(), 2);
    }

    #[test]
    fn test_run_reports_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            config: Some(dir.path().join("missing.json")),
        };
        assert!(matches!(run(&cli), Err(IconError::Io { .. })));
    }
}
