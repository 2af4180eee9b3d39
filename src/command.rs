use serde::Serialize;
use std::path::PathBuf;
use std::process::Command;

/// Runner error enum.
#[derive(thiserror::Error, Debug)]
pub enum RunnerError {
    /// A path required before launching the framework is missing.
    #[error("{what} not found: {}", .path.display())]
    MissingPath {
        /// Human readable name of the missing item.
        what: &'static str,
        /// The path that was checked.
        path: PathBuf,
    },

    /// The process could not be started.
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying io error.
        #[source]
        source: std::io::Error,
    },

    /// The process exited with a failure status.
    #[error("{program} exited with status {}", describe_code(.code))]
    NonZeroExit {
        /// Program that failed.
        program: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
    },

    /// Failed to render a plan as json.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "<signal>".to_string(), |c| c.to_string())
}

/// How a command is handed to the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// Render to a single string and run it through the platform shell.
    Shell,
    /// Execute the program directly with its argument vector.
    Direct,
}

/// Exit outcome of a finished process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl RunOutcome {
    /// Whether the process exited with code zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// A program plus its ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameworkCommand {
    /// The program to execute, usually the python interpreter.
    pub program: String,
    /// Arguments passed to the program, in order.
    pub args: Vec<String>,
}

impl FrameworkCommand {
    /// Create a command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a `--flag value` pair.
    pub fn flag(self, name: &str, value: impl ToString) -> Self {
        self.arg(format!("--{name}")).arg(value.to_string())
    }

    /// Render the command as a single line for the platform shell.
    pub fn to_shell_string(&self) -> String {
        self.render(ShellStyle::native())
    }

    /// Render the command as a single line for the given shell.
    pub fn render(&self, style: ShellStyle) -> String {
        let quote = match style {
            ShellStyle::Posix => posix_quote,
            ShellStyle::Cmd => cmd_quote,
        };
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|s| quote(s))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for FrameworkCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_shell_string())
    }
}

/// Quoting rules of the shell a line is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStyle {
    /// `sh -c`, single quotes.
    Posix,
    /// `cmd /C`, double quotes.
    Cmd,
}

impl ShellStyle {
    /// The style of the shell used on this platform.
    pub fn native() -> Self {
        if cfg!(windows) {
            ShellStyle::Cmd
        } else {
            ShellStyle::Posix
        }
    }
}

/// Quote a word for a POSIX shell, leaving plain words untouched.
fn posix_quote(word: &str) -> String {
    if is_plain(word, "-_./:=@+,%") {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Quote a word for `cmd.exe`, leaving plain words and paths untouched.
fn cmd_quote(word: &str) -> String {
    if is_plain(word, "-_./:=@+,\\") {
        word.to_string()
    } else {
        format!("\"{}\"", word.replace('"', "\\\""))
    }
}

fn is_plain(word: &str, extra: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || extra.contains(c))
}

/// A configuration and the command it expands to, printed by `--dry-run`.
#[derive(Debug, Serialize)]
pub struct Plan<'a, C: Serialize> {
    /// The effective configuration.
    pub config: &'a C,
    /// The command that would be launched.
    pub command: &'a FrameworkCommand,
    /// The same command as a shell line.
    pub shell: String,
}

impl<'a, C: Serialize> Plan<'a, C> {
    /// Pair a configuration with its command.
    pub fn new(config: &'a C, command: &'a FrameworkCommand) -> Self {
        Self {
            config,
            command,
            shell: command.to_shell_string(),
        }
    }

    /// Render the plan as pretty printed json.
    pub fn to_json(&self) -> Result<String, RunnerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Something that can run a [`FrameworkCommand`] to completion.
pub trait CommandRunner {
    /// Run the command, blocking until it exits.
    fn run(
        &mut self,
        command: &FrameworkCommand,
        invocation: Invocation,
    ) -> Result<RunOutcome, RunnerError>;
}

/// Runs commands as real child processes with inherited stdio.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &mut self,
        command: &FrameworkCommand,
        invocation: Invocation,
    ) -> Result<RunOutcome, RunnerError> {
        let mut process = match invocation {
            Invocation::Shell => shell_command(&command.to_shell_string()),
            Invocation::Direct => {
                let mut c = Command::new(&command.program);
                c.args(&command.args);
                c
            }
        };

        tracing::debug!(command = %command, ?invocation, "launching");
        let status = process.status().map_err(|source| RunnerError::Spawn {
            program: command.program.clone(),
            source,
        })?;
        Ok(RunOutcome {
            code: status.code(),
        })
    }
}

/// `cmd /C` with the line passed through unescaped.
#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    use std::os::windows::process::CommandExt;

    let mut c = Command::new("cmd");
    c.arg("/C").raw_arg(line);
    c
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut c = Command::new("sh");
    c.arg("-c").arg(line);
    c
}

/// Run a command and ignore its outcome apart from logging it.
pub fn run_unchecked(runner: &mut dyn CommandRunner, command: &FrameworkCommand) {
    match runner.run(command, Invocation::Shell) {
        Ok(outcome) if outcome.success() => tracing::info!("{} finished", command.program),
        Ok(outcome) => tracing::warn!(code = ?outcome.code, "{} exited with failure", command.program),
        Err(e) => tracing::warn!("{e}"),
    }
}

/// Run a command directly and turn a failing exit into an error.
pub fn run_checked(
    runner: &mut dyn CommandRunner,
    command: &FrameworkCommand,
) -> Result<(), RunnerError> {
    let outcome = runner.run(command, Invocation::Direct)?;
    if !outcome.success() {
        return Err(RunnerError::NonZeroExit {
            program: command.program.clone(),
            code: outcome.code,
        });
    }
    tracing::info!("{} finished", command.program);
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingRunner;
    use super::*;

    #[test]
    fn test_shell_string_plain() {
        let cmd = FrameworkCommand::new("python3")
            .arg("yolov5/val.py")
            .flag("img", 640);
        assert_eq!(
            cmd.render(ShellStyle::Posix),
            "python3 yolov5/val.py --img 640"
        );
    }

    #[test]
    fn test_shell_string_quotes() {
        let cmd = FrameworkCommand::new("/opt/my python/bin/python")
            .arg("it's")
            .arg("");
        assert_eq!(
            cmd.render(ShellStyle::Posix),
            r"'/opt/my python/bin/python' 'it'\''s' ''"
        );
    }

    #[test]
    fn test_cmd_line_uses_double_quotes() {
        let cmd = FrameworkCommand::new(r"C:\Program Files\Python311\python.exe")
            .arg(r"yolov5\detect.py")
            .flag("conf", 0.25)
            .arg(r#"say "hi""#)
            .arg("");
        assert_eq!(
            cmd.render(ShellStyle::Cmd),
            r#""C:\Program Files\Python311\python.exe" yolov5\detect.py --conf 0.25 "say \"hi\"" """#
        );
    }

    #[test]
    fn test_run_checked_propagates_failure() {
        let mut runner = RecordingRunner::exiting_with(2);
        let cmd = FrameworkCommand::new("python3").arg("train.py");
        let err = run_checked(&mut runner, &cmd).unwrap_err();
        assert!(matches!(err, RunnerError::NonZeroExit { code: Some(2), .. }));
        assert_eq!(runner.calls[0].1, Invocation::Direct);
    }

    #[test]
    fn test_run_unchecked_swallows_failures() {
        let cmd = FrameworkCommand::new("python3").arg("detect.py");

        let mut runner = RecordingRunner::exiting_with(1);
        run_unchecked(&mut runner, &cmd);
        assert_eq!(runner.calls.len(), 1);
        assert_eq!(runner.calls[0].1, Invocation::Shell);

        let mut runner = RecordingRunner::failing_to_spawn();
        run_unchecked(&mut runner, &cmd);
        assert_eq!(runner.calls.len(), 1);
    }

    #[test]
    fn test_plan_json() -> Result<(), Box<dyn std::error::Error>> {
        let cmd = FrameworkCommand::new("python3").flag("img", 640);
        let json = Plan::new(&serde_json::json!({ "img_size": 640 }), &cmd).to_json()?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["command"]["args"][1], "640");
        assert_eq!(value["shell"], "python3 --img 640");
        assert_eq!(value["config"]["img_size"], 640);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_exit_code() -> Result<(), Box<dyn std::error::Error>> {
        let mut runner = SystemRunner;
        let ok = runner.run(&FrameworkCommand::new("true"), Invocation::Direct)?;
        assert!(ok.success());
        let failed = runner.run(
            &FrameworkCommand::new("exit").arg("3"),
            Invocation::Shell,
        )?;
        assert_eq!(failed.code, Some(3));
        Ok(())
    }
}
