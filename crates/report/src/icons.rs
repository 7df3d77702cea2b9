//! Pictogram loading for chemical products.
//!
//! Symbol codes are resolved through the lookup tables in
//! [`hmsnova_core::symbols`], read from the icon directory concurrently, and
//! returned as PNG bytes in the tables' iteration order. Hazard icons are
//! stored as WebP and transcoded on every load.

use std::io::Cursor;
use std::path::PathBuf;

use futures::future::join_all;
use image::ImageFormat;

use hmsnova_core::symbols::{HazardSymbol, IconFormat, PpeSymbol};

use crate::error::ReportResult;

/// A pictogram ready for embedding.
#[derive(Debug, Clone)]
pub struct LoadedIcon {
    /// GHS or ISO 7010 code, used in logs.
    pub code: &'static str,
    pub png: Vec<u8>,
}

struct IconRequest {
    code: &'static str,
    path: &'static str,
    format: IconFormat,
}

/// Reads pictograms from a directory laid out as `faremerker/*.webp` and
/// `ppe/*.png`.
#[derive(Debug, Clone)]
pub struct IconLoader {
    root: PathBuf,
}

impl IconLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load the hazard pictograms for `codes`. Unknown codes and unreadable
    /// files are logged and skipped.
    pub async fn load_hazard_icons(&self, codes: &[String]) -> Vec<LoadedIcon> {
        let requested: Vec<HazardSymbol> = codes
            .iter()
            .filter_map(|code| {
                let symbol = HazardSymbol::from_code(code);
                if symbol.is_none() {
                    tracing::warn!(symbol = %code, "Unknown hazard symbol, skipping icon");
                }
                symbol
            })
            .collect();

        let requests = HazardSymbol::ALL
            .into_iter()
            .filter(|s| requested.contains(s))
            .map(|s| IconRequest {
                code: s.ghs_code(),
                path: s.icon_path(),
                format: s.icon_format(),
            })
            .collect();
        self.load_all(requests).await
    }

    /// Load the PPE pictograms for `codes`.
    pub async fn load_ppe_icons(&self, codes: &[String]) -> Vec<LoadedIcon> {
        let requested: Vec<PpeSymbol> = codes
            .iter()
            .filter_map(|code| {
                let symbol = PpeSymbol::from_code(code);
                if symbol.is_none() {
                    tracing::warn!(symbol = %code, "Unknown PPE symbol, skipping icon");
                }
                symbol
            })
            .collect();

        let requests = PpeSymbol::ALL
            .into_iter()
            .filter(|s| requested.contains(s))
            .map(|s| IconRequest {
                code: s.iso_code(),
                path: s.icon_path(),
                format: s.icon_format(),
            })
            .collect();
        self.load_all(requests).await
    }

    async fn load_all(&self, requests: Vec<IconRequest>) -> Vec<LoadedIcon> {
        let reads = requests.iter().map(|req| {
            let path = self.root.join(req.path);
            async move {
                let result = tokio::fs::read(&path).await;
                (path, result)
            }
        });
        let results = join_all(reads).await;

        requests
            .into_iter()
            .zip(results)
            .filter_map(|(req, (path, result))| {
                let bytes = match result {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::warn!(
                            symbol = req.code,
                            path = %path.display(),
                            error = %e,
                            "Icon file unreadable, skipping"
                        );
                        return None;
                    }
                };
                let png = match req.format {
                    IconFormat::Png => bytes,
                    IconFormat::Webp => match transcode_webp_to_png(&bytes) {
                        Ok(png) => png,
                        Err(e) => {
                            tracing::warn!(
                                symbol = req.code,
                                path = %path.display(),
                                error = %e,
                                "Icon transcode failed, skipping"
                            );
                            return None;
                        }
                    },
                };
                Some(LoadedIcon {
                    code: req.code,
                    png,
                })
            })
            .collect()
    }
}

/// Decode a WebP image and re-encode it as PNG.
pub fn transcode_webp_to_png(webp: &[u8]) -> ReportResult<Vec<u8>> {
    let decoded = image::load_from_memory_with_format(webp, ImageFormat::WebP)?;
    let mut out = Cursor::new(Vec::new());
    decoded.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    fn encode(format: ImageFormat) -> Vec<u8> {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(8, 8, Rgba([200, 30, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    fn icon_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("faremerker")).unwrap();
        std::fs::create_dir_all(dir.path().join("ppe")).unwrap();
        dir
    }

    #[test]
    fn webp_transcodes_to_png() {
        let png = transcode_webp_to_png(&encode(ImageFormat::WebP)).unwrap();
        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);
    }

    #[tokio::test]
    async fn hazard_icons_come_back_in_table_order() {
        let dir = icon_dir();
        for symbol in [HazardSymbol::Flammable, HazardSymbol::Corrosive] {
            std::fs::write(dir.path().join(symbol.icon_path()), encode(ImageFormat::WebP)).unwrap();
        }

        let loader = IconLoader::new(dir.path());
        let icons = loader
            .load_hazard_icons(&["CORROSIVE".into(), "GHS02".into()])
            .await;

        let codes: Vec<_> = icons.iter().map(|i| i.code).collect();
        assert_eq!(codes, vec!["GHS02", "GHS05"]);
        for icon in &icons {
            assert_eq!(image::guess_format(&icon.png).unwrap(), ImageFormat::Png);
        }
    }

    #[tokio::test]
    async fn unknown_and_missing_icons_are_skipped() {
        let dir = icon_dir();
        std::fs::write(
            dir.path().join(PpeSymbol::EyeProtection.icon_path()),
            encode(ImageFormat::Png),
        )
        .unwrap();

        let loader = IconLoader::new(dir.path());
        let icons = loader
            .load_ppe_icons(&[
                "M004".into(),
                "JETPACK".into(),
                "SAFETY_HELMET".into(),
            ])
            .await;

        assert_eq!(icons.len(), 1);
        assert_eq!(icons[0].code, "M004");
    }

    #[tokio::test]
    async fn missing_directory_yields_no_icons() {
        let loader = IconLoader::new("/nonexistent/icon/root");
        let icons = loader.load_hazard_icons(&["GHS01".into()]).await;
        assert!(icons.is_empty());
    }
}
