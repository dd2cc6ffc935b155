use crate::error::Stage;
use console::{style, Term};
use std::fmt::Display;
use std::time::Instant;

/// Reports the stages of a run as `[n/6] description` lines on stdout.
pub struct Progress {
    term: Term,
    overwrite: bool,
}

enum Outcome {
    Running,
    Finished(u128),
    Failed,
}

impl Progress {
    /// With `verbose` set, finished stages never overwrite the line of the
    /// started stage, so that log output in between stays readable.
    pub fn new(verbose: bool) -> Self {
        let term = Term::stdout();
        let overwrite = !verbose && term.is_term();
        Self { term, overwrite }
    }

    /// Runs `f` as `stage`, reporting the elapsed time or the failure.
    pub fn stage<T, E>(
        &mut self,
        stage: Stage,
        descr: impl Display,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let descr = descr.to_string();
        self.print(&line(stage, &descr, Outcome::Running));
        let now = Instant::now();
        let res = f();
        let outcome = match res {
            Ok(_) => Outcome::Finished(now.elapsed().as_millis()),
            Err(_) => Outcome::Failed,
        };
        if self.overwrite {
            self.term.clear_last_lines(1).ok();
        }
        self.print(&line(stage, &descr, outcome));
        res
    }

    fn print(&self, line: &str) {
        self.term.write_line(line).ok();
    }
}

fn line(stage: Stage, descr: &str, outcome: Outcome) -> String {
    let id = style(format!("[{}/{}]", stage.number(), Stage::ALL.len())).force_styling(true);
    match outcome {
        Outcome::Running => format!("{id} {descr}"),
        Outcome::Finished(ms) => format!("{id} {descr} [{ms}ms]"),
        Outcome::Failed => {
            let failed = style("[FAILED]").red().force_styling(true);
            format!("{id} {descr} {failed}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;

    #[test]
    fn numbered_lines() {
        let plain = |stage, descr: &'static str, outcome| {
            strip_ansi_codes(&line(stage, descr, outcome)).into_owned()
        };
        assert_eq!(
            plain(Stage::FindFolder, "Finding folder app", Outcome::Running),
            "[2/6] Finding folder app"
        );
        assert_eq!(
            plain(Stage::FindFolder, "Finding folder app", Outcome::Finished(12)),
            "[2/6] Finding folder app [12ms]"
        );
        assert_eq!(
            plain(Stage::Extract, "Unzipping artifact", Outcome::Failed),
            "[6/6] Unzipping artifact [FAILED]"
        );
    }

    #[test]
    fn passes_results_through() {
        let mut progress = Progress::new(true);
        let ok: Result<u32, &str> = progress.stage(Stage::Authenticate, "auth", || Ok(7));
        assert_eq!(ok, Ok(7));
        let err: Result<u32, &str> = progress.stage(Stage::Download, "download", || Err("boom"));
        assert_eq!(err, Err("boom"));
    }
}
