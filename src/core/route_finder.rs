use crate::domain::model::{LineMatch, MatchKind};
use crate::domain::ports::Tool;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const DEFAULT_ROUTE_SOURCE: &str = "C:/krewv1/krew_backend/app.py";
pub const DEFAULT_ROUTE_MARKER: &str = "@app.route";
pub const DEFAULT_PATH_FRAGMENT: &str = "/songs";
pub const DEFAULT_FUNCTION_MARKER: &str = "def get_songs";

/// 三個子字串條件：路由標記 + 路徑片段為一組，函式標記獨立判斷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePatterns {
    pub route_marker: String,
    pub path_fragment: String,
    pub function_marker: String,
}

impl RoutePatterns {
    pub fn is_route(&self, line: &str) -> bool {
        line.contains(&self.path_fragment) && line.contains(&self.route_marker)
    }

    pub fn is_function(&self, line: &str) -> bool {
        line.contains(&self.function_marker)
    }
}

impl Default for RoutePatterns {
    fn default() -> Self {
        Self {
            route_marker: DEFAULT_ROUTE_MARKER.to_string(),
            path_fragment: DEFAULT_PATH_FRAGMENT.to_string(),
            function_marker: DEFAULT_FUNCTION_MARKER.to_string(),
        }
    }
}

impl Validate for RoutePatterns {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("routes.route_marker", &self.route_marker)?;
        validate_non_empty_string("routes.path_fragment", &self.path_fragment)?;
        validate_non_empty_string("routes.function_marker", &self.function_marker)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RouteFinder {
    source: PathBuf,
    patterns: RoutePatterns,
}

impl RouteFinder {
    pub fn new(source: impl Into<PathBuf>, patterns: RoutePatterns) -> Self {
        Self {
            source: source.into(),
            patterns,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn patterns(&self) -> &RoutePatterns {
        &self.patterns
    }

    /// 逐行掃描，每行先判斷路由再判斷函式，兩者可同時命中。
    ///
    /// 行尾可為 `\n`、`\r\n` 或單獨的 `\r`。
    pub fn scan<R: BufRead>(&self, mut reader: R) -> Result<Vec<LineMatch>> {
        let mut matches = Vec::new();
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let chunk = std::str::from_utf8(&buf)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

            for line in split_line_endings(chunk) {
                line_number += 1;
                self.match_line(line, line_number, &mut matches);
            }
        }

        Ok(matches)
    }

    fn match_line(&self, line: &str, line_number: usize, matches: &mut Vec<LineMatch>) {
        if self.patterns.is_route(line) {
            matches.push(LineMatch {
                kind: MatchKind::Route,
                line_number,
                content: line.trim().to_string(),
            });
        }
        if self.patterns.is_function(line) {
            matches.push(LineMatch {
                kind: MatchKind::Function,
                line_number,
                content: line.trim().to_string(),
            });
        }
    }

    pub fn scan_file(&self) -> Result<Vec<LineMatch>> {
        tracing::debug!("Scanning {}", self.source.display());
        let file = File::open(&self.source)?;
        let matches = self.scan(BufReader::new(file))?;
        tracing::debug!("Found {} matching lines", matches.len());
        Ok(matches)
    }
}

/// 將 `read_until(b'\n')` 讀到的一段切成行，`\r\n` 視為單一行尾
fn split_line_endings(chunk: &str) -> Vec<&str> {
    let (body, terminated) = match chunk.strip_suffix('\n') {
        Some(rest) => (rest.strip_suffix('\r').unwrap_or(rest), true),
        None => (chunk, false),
    };

    let mut lines: Vec<&str> = body.split('\r').collect();
    // 檔尾以單獨的 \r 結束時，最後的空字串不是一行
    if !terminated && body.ends_with('\r') {
        lines.pop();
    }
    lines
}

/// 以 JSON 陣列輸出掃描結果
pub fn render_json(matches: &[LineMatch]) -> Result<String> {
    Ok(serde_json::to_string_pretty(matches)?)
}

impl Default for RouteFinder {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE_SOURCE, RoutePatterns::default())
    }
}

impl Tool for RouteFinder {
    type Output = Vec<LineMatch>;

    fn name(&self) -> &'static str {
        "find-route"
    }

    fn run(&self) -> Result<Vec<LineMatch>> {
        self.scan_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ToolError;
    use std::io::Cursor;

    const APP_PY: &str = r#"from flask import Flask
app = Flask(__name__)

@app.route("/songs")
def get_songs():
    return []

@app.route("/artists")
def get_artists():
    return []
"#;

    fn finder() -> RouteFinder {
        RouteFinder::new("app.py", RoutePatterns::default())
    }

    #[test]
    fn test_finds_route_and_function_with_line_numbers() {
        let matches = finder().scan(Cursor::new(APP_PY)).unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(
            matches[0].to_string(),
            r#"Found route at line 4: @app.route("/songs")"#
        );
        assert_eq!(
            matches[1].to_string(),
            "Found function at line 5: def get_songs():"
        );
    }

    #[test]
    fn test_no_matches() {
        let source = "import os\n@app.route(\"/artists\")\ndef get_artists():\n";
        let matches = finder().scan(Cursor::new(source)).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_route_requires_both_marker_and_fragment() {
        let source = "# see /songs\n@app.route(\"/albums\")\n";
        let matches = finder().scan(Cursor::new(source)).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_line_matching_both_predicates_yields_route_then_function() {
        let source = "@app.route('/songs') ; def get_songs(): pass\n";
        let matches = finder().scan(Cursor::new(source)).unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].kind, MatchKind::Route);
        assert_eq!(matches[1].kind, MatchKind::Function);
        assert!(matches.iter().all(|m| m.line_number == 1));
    }

    #[test]
    fn test_content_is_trimmed() {
        let source = "class Api:\r\n    def get_songs(self):   \r\n";
        let matches = finder().scan(Cursor::new(source)).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_number, 2);
        assert_eq!(matches[0].content, "def get_songs(self):");
    }

    #[test]
    fn test_route_fragment_prefix_also_matches() {
        // 子字串比對：/songs/<id> 也算命中
        let source = "@app.route(\"/songs/<int:id>\")\n";
        let matches = finder().scan(Cursor::new(source)).unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_custom_patterns() {
        let patterns = RoutePatterns {
            route_marker: "@router.get".to_string(),
            path_fragment: "/users".to_string(),
            function_marker: "async def list_users".to_string(),
        };
        let source = "@router.get(\"/users\")\nasync def list_users():\n";
        let matches = RouteFinder::new("api.py", patterns)
            .scan(Cursor::new(source))
            .unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].line_number, 2);
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let bytes: &[u8] = b"ok line\n\xff\xfe bad\n";
        let result = finder().scan(Cursor::new(bytes));
        assert!(matches!(result, Err(ToolError::IoError(_))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let finder = RouteFinder::new("/definitely/not/here/app.py", RoutePatterns::default());
        let result = finder.scan_file();
        assert!(matches!(result, Err(ToolError::IoError(_))));
    }

    #[test]
    fn test_empty_patterns_fail_validation() {
        let patterns = RoutePatterns {
            route_marker: "".to_string(),
            ..RoutePatterns::default()
        };
        assert!(patterns.validate().is_err());
        assert!(RoutePatterns::default().validate().is_ok());
    }

    #[test]
    fn test_lone_carriage_return_ends_a_line() {
        let source = "@app.route('/songs')\rdef get_songs():\r";
        let matches = finder().scan(Cursor::new(source)).unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(
            matches[0].to_string(),
            "Found route at line 1: @app.route('/songs')"
        );
        assert_eq!(
            matches[1].to_string(),
            "Found function at line 2: def get_songs():"
        );
    }

    #[test]
    fn test_mixed_line_endings_count_lines_like_text_mode() {
        let source = "import os\r\n\r\rx = 1\n@app.route('/songs')\r\ndef get_songs():";
        let matches = finder().scan(Cursor::new(source)).unwrap();

        let numbers: Vec<usize> = matches.iter().map(|m| m.line_number).collect();
        assert_eq!(numbers, vec![5, 6]);
        assert_eq!(matches[1].content, "def get_songs():");
    }

    #[test]
    fn test_split_line_endings() {
        assert_eq!(split_line_endings("a\r\n"), vec!["a"]);
        assert_eq!(split_line_endings("a\rb\n"), vec!["a", "b"]);
        assert_eq!(split_line_endings("a\r\r\n"), vec!["a", ""]);
        assert_eq!(split_line_endings("a\rb\r"), vec!["a", "b"]);
        assert_eq!(split_line_endings("tail"), vec!["tail"]);
    }

    #[test]
    fn test_render_json() {
        let matches = finder().scan(Cursor::new("def get_songs():\n")).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&matches).unwrap()).unwrap();

        assert_eq!(json[0]["kind"], "function");
        assert_eq!(json[0]["line_number"], 1);
        assert_eq!(render_json(&[]).unwrap(), "[]");
    }
}
