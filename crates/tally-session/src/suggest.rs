use crate::config::DEFAULT_SUGGEST_TIMEOUT_MS;
use std::io::{self, Read, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use tally_core::TallyError;

/// An advisory source that may name the best candidate for a query.
///
/// Suggestions are presentation hints only. They never reorder candidates
/// and never decide a match on their own.
pub trait Suggester {
    /// Pick one of `candidates` for `query`, or `None` if nothing fits.
    fn suggest(&self, query: &str, candidates: &[&str]) -> Result<Option<String>, TallyError>;
}

/// An advisory answer and the candidate it refers to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    pub index: Option<usize>,
}

impl Suggestion {
    pub fn new(text: String, candidates: &[&str]) -> Self {
        let index = match_suggestion(&text, candidates);
        Self { text, index }
    }
}

/// Index of the candidate equal to `text`, ignoring case and whitespace runs.
pub fn match_suggestion(text: &str, candidates: &[&str]) -> Option<usize> {
    let wanted = normalize(text);
    if wanted.is_empty() {
        return None;
    }
    candidates.iter().position(|c| normalize(c) == wanted)
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Build the prompt handed to an external suggester.
pub fn build_prompt(query: &str, candidates: &[&str]) -> String {
    let mut prompt = String::new();
    prompt.push_str("Pick the store product that matches the benchmark product.\n\n");
    prompt.push_str("Benchmark product:\n");
    prompt.push_str(query);
    prompt.push_str("\n\nStore products:\n");
    for (i, name) in candidates.iter().enumerate() {
        prompt.push_str(&format!("{}. {name}\n", i + 1));
    }
    prompt.push_str(
        "\nPackaging, size, and purpose must be identical or very close; \
         sharing a word or two is not enough.\n\
         Answer with exactly one product name from the list, or `none`.\n",
    );
    prompt
}

/// Runs an external program, feeding the prompt on stdin and reading the
/// answer from the first non-empty line of stdout.
///
/// The program gets `timeout` to finish; after that it is killed and the
/// call fails.
#[derive(Debug, Clone)]
pub struct CommandSuggester {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

const POLL_INTERVAL: Duration = Duration::from_millis(20);

impl CommandSuggester {
    pub fn new(argv: &[String]) -> Result<Self, TallyError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| TallyError::Config("suggest_command is empty".to_string()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout: Duration::from_millis(DEFAULT_SUGGEST_TIMEOUT_MS),
        })
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn timed_out(&self) -> TallyError {
        TallyError::Suggest(format!(
            "{} timed out after {}ms",
            self.program,
            self.timeout.as_millis()
        ))
    }

    fn prompt_failed(&self, err: io::Error) -> TallyError {
        TallyError::Suggest(format!("{}: writing prompt: {err}", self.program))
    }
}

impl Suggester for CommandSuggester {
    fn suggest(&self, query: &str, candidates: &[&str]) -> Result<Option<String>, TallyError> {
        let deadline = Instant::now() + self.timeout;
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TallyError::Suggest(format!("cannot start {}: {e}", self.program)))?;

        let writer = feed(child.stdin.take(), build_prompt(query, candidates));
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = loop {
            if let Ok(Err(e)) = writer.try_recv() {
                reap(&mut child);
                return Err(self.prompt_failed(e));
            }
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    reap(&mut child);
                    return Err(self.timed_out());
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    reap(&mut child);
                    return Err(TallyError::Suggest(format!("{}: {e}", self.program)));
                }
            }
        };

        let remaining = deadline.saturating_duration_since(Instant::now());
        if let Ok(Err(e)) = writer.recv_timeout(remaining) {
            return Err(self.prompt_failed(e));
        }

        // Pipes stay open while any grandchild holds them.
        let remaining = deadline.saturating_duration_since(Instant::now());
        let stdout = stdout.recv_timeout(remaining).map_err(|_| self.timed_out())?;

        if !status.success() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let stderr = stderr.recv_timeout(remaining).unwrap_or_default();
            return Err(TallyError::Suggest(format!(
                "{} exited with {}: {}",
                self.program,
                status,
                String::from_utf8_lossy(&stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&stdout);
        let answer = stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .filter(|line| !line.eq_ignore_ascii_case("none"))
            .map(str::to_string);
        Ok(answer)
    }
}

/// Write the prompt on a background thread; stdin closes when it is done.
fn feed(stdin: Option<ChildStdin>, prompt: String) -> Receiver<io::Result<()>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = match stdin {
            Some(mut stdin) => stdin.write_all(prompt.as_bytes()),
            None => Ok(()),
        };
        let _ = tx.send(result);
    });
    rx
}

/// Read a pipe to the end on a background thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = tx.send(buf);
    });
    rx
}

/// Kill `child` if it is still running and collect its exit status.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
