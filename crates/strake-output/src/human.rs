use crate::OutputFormatter;
use strake_lint::paths::LintRun;

pub struct HumanFormatter {
    pub verbose: bool,
}

impl OutputFormatter for HumanFormatter {
    fn format_run(&self, run: &LintRun) -> String {
        if run.is_clean() {
            if self.verbose {
                return "No contract errors detected.\n".to_string();
            }
            return String::new(); // Clean run = empty stdout
        }

        let mut out = String::new();
        for (path, findings) in &run.files {
            for finding in findings {
                match finding.line {
                    Some(line) => out.push_str(&format!(
                        "{}:{}: {} ({})\n",
                        path, line, finding.message, finding.id,
                    )),
                    None => out.push_str(&format!(
                        "{}: {} ({})\n",
                        path, finding.message, finding.id,
                    )),
                }
            }
        }

        out.push_str(&format!(
            "\n{} contract error(s) in {} file(s)\n",
            run.total(),
            run.files.len(),
        ));

        out
    }
}
