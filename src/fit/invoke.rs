/// Running `plfit` against a record and committing its parameters.
use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, trace};

use super::errors::FitError;
use super::kv::parse_key_value;
use super::record::{FitValues, Record};
use super::runner::ProcessRunner;

/// Default fitting program, looked up on `PATH`.
pub const PLFIT_PROGRAM: &str = "plfit";

const ALPHA_KEY: &str = "alpha";
const XMIN_KEY: &str = "xmin";
const LIKELIHOOD_KEY: &str = "L";

/// `plfit` reports the exponent one above the convention stored here.
const ALPHA_OFFSET: f64 = 1.0;

/// Runs the fitting program through a [`ProcessRunner`].
#[derive(Debug)]
pub struct FitInvoker<'r, R> {
    runner: &'r R,
    program: &'r str,
}

impl<'r, R: ProcessRunner> FitInvoker<'r, R> {
    /// Invoker for [`PLFIT_PROGRAM`].
    #[must_use]
    pub fn new(runner: &'r R) -> Self {
        Self::with_program(runner, PLFIT_PROGRAM)
    }

    #[must_use]
    pub fn with_program(runner: &'r R, program: &'r str) -> Self {
        Self { runner, program }
    }

    /// Fit one record, storing `alpha`, `xmin` and `L` on success.
    ///
    /// All three values are validated before any is stored; on error the
    /// record is left untouched. A record that is already fitted keeps its
    /// values and the program is not run again.
    ///
    /// # Errors
    ///
    /// - `FitError::ExternalTool` — the program could not run or exited non-zero
    /// - `FitError::OutputParse` — a required key was missing or not a number
    pub fn run_fit(&self, record: &mut Record) -> Result<FitValues, FitError> {
        if record.is_fitted() {
            debug!(path = %record.path().display(), "already fitted");
            return Ok(record.fit());
        }

        let meta = record.meta();
        debug!(
            path = %record.path().display(),
            frame = meta.frame,
            kind = %meta.kind,
            period = meta.period,
            struct_no = meta.struct_no,
            "running {}",
            self.program
        );

        let stdout = self
            .runner
            .run(self.program, &[record.path().as_os_str()])
            .map_err(|failure| FitError::ExternalTool {
                program: self.program.to_owned(),
                path: record.path().to_path_buf(),
                reason: failure.kind.to_string(),
                stdout: failure.stdout,
                stderr: failure.stderr,
            })?;
        trace!(path = %record.path().display(), output = %stdout, "fit output");

        let values = parse_fit_output(&stdout, record.path())?;
        if !record.set_fit(values) {
            return Ok(record.fit());
        }
        Ok(values)
    }
}

/// Extract the fitted parameters from raw program output.
///
/// # Errors
///
/// Returns `FitError::OutputParse` naming the first missing or malformed key.
pub fn parse_fit_output(text: &str, path: &Path) -> Result<FitValues, FitError> {
    let map = parse_key_value(text);
    let alpha = required_f64(&map, ALPHA_KEY, path)?;
    let xmin = required_f64(&map, XMIN_KEY, path)?;
    let likelihood = required_f64(&map, LIKELIHOOD_KEY, path)?;

    Ok(FitValues {
        alpha: alpha - ALPHA_OFFSET,
        xmin,
        likelihood,
    })
}

fn required_f64(map: &HashMap<String, String>, key: &str, path: &Path) -> Result<f64, FitError> {
    let parse_error = |reason: String| FitError::OutputParse {
        path: path.to_path_buf(),
        key: key.to_owned(),
        reason,
    };

    let raw = map
        .get(key)
        .ok_or_else(|| parse_error("key not present".to_owned()))?;
    raw.parse::<f64>()
        .map_err(|e| parse_error(format!("'{raw}' is not a number ({e})")))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::ffi::OsStr;
    use std::path::PathBuf;

    use super::*;
    use crate::fit::record::FileMeta;
    use crate::fit::runner::{FailureKind, ProcessFailure};

    /// Replays a canned result and remembers what it was asked to run.
    struct FakeRunner {
        result: Result<String, ProcessFailure>,
        calls: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl FakeRunner {
        fn ok(stdout: &str) -> Self {
            Self {
                result: Ok(stdout.to_owned()),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing(failure: ProcessFailure) -> Self {
            Self {
                result: Err(failure),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ProcessRunner for FakeRunner {
        fn run(&self, program: &str, args: &[&OsStr]) -> Result<String, ProcessFailure> {
            self.calls.borrow_mut().push((
                program.to_owned(),
                args.iter().map(|a| a.to_string_lossy().into_owned()).collect(),
            ));
            self.result.clone()
        }
    }

    fn record() -> Record {
        Record::new(
            PathBuf::from("data/batch_1_H2_2_x_3.dat"),
            FileMeta {
                frame: 1,
                kind: "H2".to_owned(),
                period: 2,
                struct_no: 3,
            },
        )
    }

    #[test]
    fn test_stores_values_and_shifts_alpha() {
        let runner = FakeRunner::ok("alpha = 3.5\nxmin = 4\nL = -120.25\n");
        let mut rec = record();
        let values = FitInvoker::new(&runner).run_fit(&mut rec).unwrap();

        assert_eq!(values.alpha, 2.5);
        assert_eq!(rec.fit().alpha, 2.5);
        assert_eq!(rec.fit().xmin, 4.0);
        assert_eq!(rec.fit().likelihood, -120.25);
        assert!(rec.is_fitted());
    }

    #[test]
    fn test_fitted_record_is_not_refitted() {
        let runner = FakeRunner::ok("alpha = 3.5\nxmin = 4\nL = -120.25\n");
        let mut rec = record();
        let invoker = FitInvoker::new(&runner);
        let first = invoker.run_fit(&mut rec).unwrap();

        let again = FakeRunner::ok("alpha = 9\nxmin = 9\nL = 9\n");
        let second = FitInvoker::new(&again).run_fit(&mut rec).unwrap();

        assert_eq!(second, first);
        assert_eq!(rec.fit().alpha, 2.5);
        assert!(again.calls.borrow().is_empty());
    }

    #[test]
    fn test_invokes_program_with_path() {
        let runner = FakeRunner::ok("alpha = 2\nxmin = 1\nL = 0\n");
        let mut rec = record();
        FitInvoker::with_program(&runner, "fake-plfit")
            .run_fit(&mut rec)
            .unwrap();

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "fake-plfit");
        assert_eq!(calls[0].1, vec!["data/batch_1_H2_2_x_3.dat".to_owned()]);
    }

    #[test]
    fn test_runner_failure_leaves_record_unset() {
        let runner = FakeRunner::failing(ProcessFailure {
            kind: FailureKind::Exit("exit status: 1".to_owned()),
            stdout: "partial".to_owned(),
            stderr: "cannot open file".to_owned(),
        });
        let mut rec = record();
        let err = FitInvoker::new(&runner).run_fit(&mut rec).unwrap_err();

        match err {
            FitError::ExternalTool {
                program,
                stdout,
                stderr,
                ..
            } => {
                assert_eq!(program, PLFIT_PROGRAM);
                assert_eq!(stdout, "partial");
                assert_eq!(stderr, "cannot open file");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!rec.is_fitted());
        assert_eq!(rec.fit(), FitValues::default());
    }

    #[test]
    fn test_missing_key_leaves_record_unset() {
        let runner = FakeRunner::ok("alpha = 3.5\nxmin = 4\n");
        let mut rec = record();
        let err = FitInvoker::new(&runner).run_fit(&mut rec).unwrap_err();

        assert!(matches!(err, FitError::OutputParse { ref key, .. } if key == "L"));
        assert!(!rec.is_fitted());
        assert_eq!(rec.fit().alpha, 0.0);
    }

    #[test]
    fn test_unparsable_value_is_rejected() {
        let err = parse_fit_output(
            "alpha = 2\nxmin = n/a\nL = 1\n",
            Path::new("a.dat"),
        )
        .unwrap_err();
        assert!(matches!(err, FitError::OutputParse { ref key, .. } if key == "xmin"));
    }

    #[test]
    fn test_key_match_is_exact() {
        let err = parse_fit_output("Alpha = 2\nxmin = 1\nl = 1\n", Path::new("a.dat")).unwrap_err();
        assert!(matches!(err, FitError::OutputParse { ref key, .. } if key == "alpha"));
    }
}
