//! DIMACS CNF reader (spec §6). This is an external collaborator, not part
//! of the CORE: it yields `(num_vars, clauses)` which the core accepts
//! verbatim, with no further validation of its own.

use std::io::BufRead;

use crate::error::DimacsError;

pub struct Cnf {
    pub num_vars: usize,
    pub num_clauses_declared: usize,
    pub clauses: Vec<Vec<i64>>,
}

/// Parses DIMACS CNF text. `c` lines are comments; `p cnf N M` declares the
/// problem size; clauses are whitespace-separated signed integers terminated
/// by `0` and may span multiple lines.
pub fn parse<R: BufRead>(reader: R, strict: bool) -> Result<Cnf, DimacsError> {
    let mut num_vars = None;
    let mut num_clauses_declared = None;
    let mut clauses = Vec::new();
    let mut current: Vec<i64> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("p cnf") {
            let mut parts = rest.split_whitespace();
            let n: usize = parts
                .next()
                .ok_or_else(|| DimacsError::MalformedHeader(trimmed.to_string()))?
                .parse()
                .map_err(|_| DimacsError::MalformedHeader(trimmed.to_string()))?;
            let m: usize = parts
                .next()
                .ok_or_else(|| DimacsError::MalformedHeader(trimmed.to_string()))?
                .parse()
                .map_err(|_| DimacsError::MalformedHeader(trimmed.to_string()))?;
            num_vars = Some(n);
            num_clauses_declared = Some(m);
            continue;
        }

        for token in trimmed.split_whitespace() {
            let x: i64 = token.parse().map_err(|_| DimacsError::BadToken {
                line: line_no + 1,
                token: token.to_string(),
            })?;
            if x == 0 {
                clauses.push(std::mem::take(&mut current));
            } else {
                current.push(x);
            }
        }
    }

    if !current.is_empty() {
        return Err(DimacsError::MissingTerminator {
            line: clauses.len() + 1,
        });
    }

    let num_vars = num_vars.ok_or_else(|| DimacsError::MalformedHeader("missing p cnf header".into()))?;
    let num_clauses_declared =
        num_clauses_declared.ok_or_else(|| DimacsError::MalformedHeader("missing p cnf header".into()))?;

    if strict && clauses.len() != num_clauses_declared {
        return Err(DimacsError::MalformedHeader(format!(
            "header declared {} clauses, found {}",
            num_clauses_declared,
            clauses.len()
        )));
    }

    Ok(Cnf {
        num_vars,
        num_clauses_declared,
        clauses,
    })
}

/// Checks that `model` (indexed by 0-based variable) satisfies every clause
/// of `cnf`. Used as a cheap self-check after a SAT result, mirroring the
/// teacher's `validate_model_file` idiom.
pub fn validate_model(cnf: &Cnf, model: &[bool]) -> bool {
    cnf.clauses.iter().all(|clause| {
        clause.iter().any(|&lit| {
            let idx = (lit.unsigned_abs() as usize) - 1;
            let value = model.get(idx).copied().unwrap_or(false);
            if lit < 0 {
                !value
            } else {
                value
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_simple_instance() {
        let text = "c a comment\np cnf 3 2\n1 -2 0\n-1 2 3\n0\n";
        let cnf = parse(Cursor::new(text), true).unwrap();
        assert_eq!(cnf.num_vars, 3);
        assert_eq!(cnf.clauses, vec![vec![1, -2], vec![-1, 2, 3]]);
    }

    #[test]
    fn rejects_missing_terminator() {
        let text = "p cnf 1 1\n1";
        assert!(matches!(
            parse(Cursor::new(text), true),
            Err(DimacsError::MissingTerminator { .. })
        ));
    }

    #[test]
    fn validate_model_checks_every_clause() {
        let cnf = Cnf {
            num_vars: 2,
            num_clauses_declared: 1,
            clauses: vec![vec![1, -2]],
        };
        assert!(validate_model(&cnf, &[true, true]));
        assert!(!validate_model(&cnf, &[false, true]));
    }
}
