//! Plain-text matrix export
//!
//! One row per line, values separated by a single space, each formatted
//! with exactly eight digits after the decimal point.

use crate::reader::{IoError, IoResult};
use ndarray::Array2;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Digits after the decimal point
pub const PRECISION: usize = 8;

/// Write a matrix to `path`, replacing any existing file
pub fn write_matrix(path: impl AsRef<Path>, matrix: &Array2<f64>) -> IoResult<()> {
    let path = path.as_ref();
    let write_failed = |e: std::io::Error| IoError::WriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let file = File::create(path).map_err(write_failed)?;
    let mut out = BufWriter::new(file);
    write_matrix_to(&mut out, matrix).map_err(write_failed)?;
    out.flush().map_err(write_failed)?;
    Ok(())
}

/// Write a matrix to any writer
pub fn write_matrix_to<W: Write>(out: &mut W, matrix: &Array2<f64>) -> std::io::Result<()> {
    for row in matrix.rows() {
        let mut first = true;
        for &value in row.iter() {
            if !first {
                out.write_all(b" ")?;
            }
            first = false;
            out.write_all(format_value(value).as_bytes())?;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Format a single value, `printf("%.8f")` style
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{:.*}", PRECISION, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn render(matrix: &Array2<f64>) -> String {
        let mut buf = Vec::new();
        write_matrix_to(&mut buf, matrix).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_fixed_precision_rows() {
        let matrix = array![[1.5, -0.25, 0.0], [2.0, 1.0 / 3.0, -1.0]];
        assert_eq!(
            render(&matrix),
            "1.50000000 -0.25000000 0.00000000\n2.00000000 0.33333333 -1.00000000\n"
        );
    }

    #[test]
    fn test_empty_matrix_writes_nothing() {
        let matrix = Array2::<f64>::zeros((0, 3));
        assert_eq!(render(&matrix), "");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(format_value(f64::NAN), "nan");
        assert_eq!(format_value(f64::INFINITY), "inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(format_value(1.224744871391589), "1.22474487");
        assert_eq!(format_value(-0.9805806756909202), "-0.98058068");
    }

    #[test]
    fn test_write_matrix_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.txt");
        write_matrix(&path, &array![[1.0, 2.0, 3.0]]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "1.00000000 2.00000000 3.00000000\n");
    }

    #[test]
    fn test_unwritable_path() {
        let result = write_matrix("/definitely/not/here/out.txt", &array![[1.0, 2.0, 3.0]]);
        assert!(matches!(result, Err(IoError::WriteFailed { .. })));
    }
}
