use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Route,
    Function,
}

impl MatchKind {
    pub fn label(&self) -> &'static str {
        match self {
            MatchKind::Route => "route",
            MatchKind::Function => "function",
        }
    }
}

/// 掃描到的一行，行號從 1 開始，內容已去除前後空白
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineMatch {
    pub kind: MatchKind,
    pub line_number: usize,
    pub content: String,
}

impl fmt::Display for LineMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found {} at line {}: {}",
            self.kind.label(),
            self.line_number,
            self.content
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for ConversionReport {
    /// 輸入端只顯示檔名，輸出端顯示完整路徑
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = self
            .input
            .file_name()
            .map(Path::new)
            .unwrap_or(self.input.as_path());
        write!(
            f,
            "Successfully converted {} to {}",
            input.display(),
            self.output.display()
        )
    }
}
