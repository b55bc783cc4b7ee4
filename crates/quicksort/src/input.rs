use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::InputError;

/// Reads whitespace-separated signed integers until the input ends or a
/// token fails to parse as an `i32`.
///
/// Values read before a bad token are kept. A bad token that starts with an
/// integer (`12abc`) contributes that integer, then reading stops, as
/// `scanf("%d")` does. A prefix that overflows `i32` contributes nothing.
pub fn read_integers<R: BufRead>(mut reader: R) -> Result<Vec<i32>, InputError> {
    let mut values = Vec::new();
    let mut line = String::new();
    let mut line_no = 0usize;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        line_no += 1;

        for token in line.split_whitespace() {
            match token.parse::<i32>() {
                Ok(value) => push_value(&mut values, value)?,
                Err(err) => {
                    if let Some(value) = leading_integer(token) {
                        push_value(&mut values, value)?;
                    }
                    warn!(line = line_no, token, %err, "stopped reading at non-integer token");
                    return Ok(values);
                }
            }
        }
    }

    Ok(values)
}

fn push_value(values: &mut Vec<i32>, value: i32) -> Result<(), InputError> {
    if values.len() == values.capacity() {
        values.try_reserve(values.capacity().max(10))?;
    }
    values.push(value);
    Ok(())
}

/// Optional sign followed by at least one digit, from the start of `token`.
fn leading_integer(token: &str) -> Option<i32> {
    let sign = usize::from(token.starts_with(['+', '-']));
    let digits = token[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    token[..sign + digits].parse().ok()
}

pub fn read_integers_from_path(path: impl AsRef<Path>) -> Result<Vec<i32>, InputError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let values = read_integers(BufReader::new(file))?;
    debug!(path = %path.display(), count = values.len(), "read input");
    Ok(values)
}
