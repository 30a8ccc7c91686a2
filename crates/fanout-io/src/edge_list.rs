//! Delimited edge-list reader
//!
//! Each non-empty line holds exactly two integer node ids separated by a
//! single delimiter byte: `followed_id follower_id`. Blank lines are
//! skipped; anything else that does not fit is a hard error.

use crate::reader::{EdgeSource, IoError, IoResult};
use crate::schema::Edge;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Default field delimiter
pub const DEFAULT_DELIMITER: u8 = b' ';

/// Streaming reader over a delimited edge list
pub struct EdgeListReader<R: BufRead = BufReader<File>> {
    source: String,
    reader: R,
    delimiter: u8,
    buf: Vec<u8>,
    line: u64,
}

impl EdgeListReader<BufReader<File>> {
    /// Open an edge list with the default space delimiter
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        Self::open_with_delimiter(path, DEFAULT_DELIMITER)
    }

    /// Open an edge list with a custom delimiter
    pub fn open_with_delimiter(path: impl AsRef<Path>, delimiter: u8) -> IoResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if !path.exists() {
            return Err(IoError::FileNotFound(display));
        }

        let file =
            File::open(path).map_err(|e| IoError::OpenFailed(format!("{}: {}", display, e)))?;
        Ok(Self::with_source(display, BufReader::new(file), delimiter))
    }
}

impl<R: BufRead> EdgeListReader<R> {
    /// Read edges from any buffered byte stream
    pub fn from_reader(reader: R, delimiter: u8) -> Self {
        Self::with_source("<stream>".to_string(), reader, delimiter)
    }

    fn with_source(source: String, reader: R, delimiter: u8) -> Self {
        Self {
            source,
            reader,
            delimiter,
            buf: Vec::new(),
            line: 0,
        }
    }

    /// Number of physical lines consumed so far
    pub fn lines_read(&self) -> u64 {
        self.line
    }

    /// Collect every remaining edge
    pub fn read_all(mut self) -> IoResult<Vec<Edge>> {
        let mut edges = Vec::new();
        while let Some(edge) = self.next_edge()? {
            edges.push(edge);
        }
        Ok(edges)
    }
}

impl<R: BufRead> EdgeSource for EdgeListReader<R> {
    fn next_edge(&mut self) -> IoResult<Option<Edge>> {
        loop {
            self.buf.clear();
            let n = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .map_err(|e| IoError::InvalidFormat(format!("{}: {}", self.source, e)))?;
            if n == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = strip_line_ending(&self.buf);
            if text.is_empty() {
                continue;
            }
            return parse_edge(text, self.delimiter, self.line).map(Some);
        }
    }

    fn describe(&self) -> String {
        self.source.clone()
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Parse a two-field line into an edge
fn parse_edge(text: &[u8], delimiter: u8, line: u64) -> IoResult<Edge> {
    let mut fields = text.split(|&b| b == delimiter);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(followed), Some(follower), None) => {
            let followed_id = parse_id(followed, line)?;
            let follower_id = parse_id(follower, line)?;
            Ok(Edge::new(followed_id, follower_id))
        }
        _ => Err(IoError::MalformedLine {
            line,
            reason: format!(
                "expected 2 fields, found {}",
                text.split(|&b| b == delimiter).count()
            ),
        }),
    }
}

fn parse_id(field: &[u8], line: u64) -> IoResult<i64> {
    std::str::from_utf8(field)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| IoError::MalformedLine {
            line,
            reason: format!("not an integer node id: {:?}", String::from_utf8_lossy(field)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn read(text: &str) -> IoResult<Vec<Edge>> {
        EdgeListReader::from_reader(text.as_bytes(), DEFAULT_DELIMITER).read_all()
    }

    #[test]
    fn test_reads_space_delimited_pairs() {
        let edges = read("2 1\n3 1\n3 2\n").unwrap();
        assert_eq!(
            edges,
            vec![Edge::new(2, 1), Edge::new(3, 1), Edge::new(3, 2)]
        );
    }

    #[test]
    fn test_missing_trailing_newline_and_crlf() {
        let edges = read("10 20\r\n30 40").unwrap();
        assert_eq!(edges, vec![Edge::new(10, 20), Edge::new(30, 40)]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let edges = read("1 2\n\n3 4\n").unwrap();
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_blank_lines_do_not_shift_line_numbers() {
        let err = read("1 2\n\n\n3\n").unwrap_err();
        match err {
            IoError::MalformedLine { line, reason } => {
                assert_eq!(line, 4);
                assert!(reason.contains("found 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_crlf_blank_lines_are_counted() {
        let text = "1 2\r\n\r\n3 4\r\nx 5\r\n";
        let mut reader = EdgeListReader::from_reader(text.as_bytes(), DEFAULT_DELIMITER);
        assert_eq!(reader.next_edge().unwrap(), Some(Edge::new(1, 2)));
        assert_eq!(reader.next_edge().unwrap(), Some(Edge::new(3, 4)));
        assert_eq!(reader.lines_read(), 3);
        assert!(matches!(
            reader.next_edge(),
            Err(IoError::MalformedLine { line: 4, .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(read("").unwrap().is_empty());
    }

    #[test]
    fn test_wrong_field_count_reports_line() {
        let err = read("1 2\n3 4 5\n").unwrap_err();
        match err {
            IoError::MalformedLine { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_double_delimiter_is_malformed() {
        assert!(matches!(
            read("1  2\n"),
            Err(IoError::MalformedLine { line: 1, .. })
        ));
    }

    #[test]
    fn test_non_integer_id_reports_line() {
        let err = read("1 2\n3 4\nfoo 5\n").unwrap_err();
        match err {
            IoError::MalformedLine { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("foo"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_custom_delimiter() {
        let edges = EdgeListReader::from_reader("5\t6\n".as_bytes(), b'\t')
            .read_all()
            .unwrap();
        assert_eq!(edges, vec![Edge::new(5, 6)]);
    }

    #[test]
    fn test_open_missing_file() {
        let result = EdgeListReader::open("/definitely/not/here/edges.txt");
        assert!(matches!(result, Err(IoError::FileNotFound(_))));
    }

    #[test]
    fn test_open_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "7 8").unwrap();
        writeln!(file, "8 7").unwrap();

        let edges = EdgeListReader::open(file.path()).unwrap().read_all().unwrap();
        assert_eq!(edges, vec![Edge::new(7, 8), Edge::new(8, 7)]);
    }
}
