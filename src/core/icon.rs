use crate::domain::model::ConversionReport;
use crate::domain::ports::Tool;
use crate::utils::error::Result;
use image::{ImageFormat, ImageReader};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const DEFAULT_ICON_INPUT: &str = "public/yeah.ico";
pub const DEFAULT_ICON_OUTPUT: &str = "assets/logo.png";

/// 將圖示檔 (ICO 或任何可解碼的格式) 轉成 PNG
#[derive(Debug, Clone)]
pub struct IconConverter {
    input: PathBuf,
    output: PathBuf,
}

impl IconConverter {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// 解碼輸入並寫出 PNG。
    ///
    /// PNG 先完整編碼在記憶體中，寫入同目錄的暫存檔後再改名為輸出檔；
    /// 任何一步失敗時輸出檔都不會被建立或修改。輸出目錄不存在視為失敗。
    pub fn convert(&self) -> Result<ConversionReport> {
        tracing::debug!("Decoding {}", self.input.display());

        // 以內容判斷格式，ICO 解碼器會選擇最大的那張圖
        let img = ImageReader::open(&self.input)?
            .with_guessed_format()?
            .decode()?;

        let (width, height) = (img.width(), img.height());
        tracing::debug!("Decoded {}x{} image", width, height);

        let mut png_data = Vec::new();
        img.write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)?;

        self.write_output(&png_data)?;
        tracing::debug!(
            "Wrote {} bytes to {}",
            png_data.len(),
            self.output.display()
        );

        Ok(ConversionReport {
            input: self.input.clone(),
            output: self.output.clone(),
            width,
            height,
        })
    }

    fn write_output(&self, data: &[u8]) -> Result<()> {
        let dir = match self.output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // 暫存檔在 persist 之前被 drop 會自動刪除
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(data)?;
        temp.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = match fs::metadata(&self.output) {
                Ok(existing) => existing.permissions(),
                Err(_) => fs::Permissions::from_mode(0o644),
            };
            temp.as_file().set_permissions(permissions)?;
        }

        temp.persist(&self.output).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Default for IconConverter {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_INPUT, DEFAULT_ICON_OUTPUT)
    }
}

impl Tool for IconConverter {
    type Output = ConversionReport;

    fn name(&self) -> &'static str {
        "convert-icon"
    }

    fn run(&self) -> Result<ConversionReport> {
        self.convert()
    }
}
