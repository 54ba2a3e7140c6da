mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::any::Any;
use std::io::{self, IsTerminal, Read};
use std::panic::{self, AssertUnwindSafe};
use std::process;

use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::{EnhanceCommand, EnhanceMode, EnhanceOutcome, HookInput, InputSource, PassthroughReason};
use ports::inbound::{EnhancePrompt, UseCaseRunner};
use wiring::{wire_enhance, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl Runner {
    /// フック本体: stdin の内容から出力する文字列をちょうど 1 つ決める
    ///
    /// 解釈の失敗や panic があっても元の入力を返す。
    fn handle_hook_input(&self, raw: &str) -> String {
        let input = HookInput::parse(raw);
        if let InputSource::Malformed(reason) = input.source() {
            self.log(
                LogRecord::new(LogLevel::Warn, "input is not a valid hook payload, using raw text")
                    .kind("input")
                    .field("reason", reason.as_str()),
            );
        }
        let prompt = input.into_prompt();
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.app.enhance.enhance(&prompt)));
        match result {
            Ok(outcome) => outcome.into_text(),
            Err(payload) => {
                let reason = PassthroughReason::Unexpected(panic_message(payload.as_ref()));
                self.log(
                    LogRecord::new(LogLevel::Error, "enhancement aborted, using original prompt")
                        .kind(reason.kind())
                        .field("detail", format!("{:?}", reason)),
                );
                EnhanceOutcome::Passthrough {
                    text: prompt,
                    reason,
                }
                .into_text()
            }
        }
    }

    fn log(&self, record: LogRecord) {
        let _ = self.app.log.log(&record.layer("cli"));
    }
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(&config);
        self.log(
            LogRecord::new(LogLevel::Debug, "command started")
                .kind("lifecycle")
                .field("command", cmd_name_for_log(cmd))
                .field("mode", self.app.enhance.config().mode.as_str())
                .field("strategies", self.app.enhance.strategy_names().join(",")),
        );

        match cmd {
            EnhanceCommand::Help => {
                print_help();
                Ok(0)
            }
            EnhanceCommand::ListPersonas => {
                for persona in self.app.catalog.iter() {
                    println!("{}\t{}: {}", persona.command, persona.title, persona.summary);
                }
                Ok(0)
            }
            EnhanceCommand::Suggest => {
                let raw = read_stdin()?;
                let input = HookInput::parse(&raw);
                print!("{}", self.app.enhance.suggest(input.prompt()));
                Ok(0)
            }
            EnhanceCommand::Enhance => {
                let raw = read_stdin().unwrap_or_else(|e| {
                    self.log(
                        LogRecord::new(LogLevel::Error, format!("failed to read stdin: {}", e))
                            .kind("input"),
                    );
                    String::new()
                });
                println!("{}", self.handle_hook_input(&raw));
                Ok(0)
            }
        }
    }
}

fn cmd_name_for_log(cmd: EnhanceCommand) -> &'static str {
    match cmd {
        EnhanceCommand::Help => "help",
        EnhanceCommand::ListPersonas => "list-personas",
        EnhanceCommand::Suggest => "suggest",
        EnhanceCommand::Enhance => "enhance",
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        return s.to_string();
    }
    if let Some(s) = payload.downcast_ref::<String>() {
        return s.clone();
    }
    "panic".to_string()
}

/// 入力を最後まで読む。UTF-8 として不正なバイトは置換文字にして残す
fn read_input<R: Read>(mut reader: R) -> Result<String, Error> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

fn read_stdin() -> Result<String, Error> {
    read_input(io::stdin().lock())
}

/// 起動に失敗してもフックとして呼ばれていれば入力をそのまま返す
fn echo_piped_stdin() -> bool {
    if io::stdin().is_terminal() {
        return false;
    }
    let raw = read_stdin().unwrap_or_default();
    println!("{}", HookInput::parse(&raw).prompt());
    true
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("prompt-enhance: {}", e);
            if echo_piped_stdin() {
                0
            } else {
                e.exit_code()
            }
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    if config_to_command(&config) == EnhanceCommand::Help {
        print_help();
        return Ok(0);
    }
    let app = wire_enhance(&config)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: prompt-enhance [options] < prompt");
}

fn print_help() {
    println!("Usage: prompt-enhance [options] < prompt");
    println!("Options:");
    println!("  -h, --help                 Show this help message");
    println!("  --list-personas            List available personas");
    println!("  --suggest                  Show which persona stdin would get and why, without rewriting it");
    println!("  --mode <mode>              {} (default: {})", EnhanceMode::NAMES.join(", "), EnhanceMode::default());
    println!("  --persona <id>             Use this persona instead of classifying");
    println!("  --model <model>            Model for the remote classifier (default: gemini-2.5-pro)");
    println!("  --timeout <secs>           Maximum wait for the remote classifier (default: 15, hybrid: 30)");
    println!("  --gemini-bin <path>        gemini CLI executable (default: gemini on PATH)");
    println!("  --env-file <path>          key=value file read once at start (default: ./.env)");
    println!("  -v, --verbose              Emit debug logs to stderr");
    println!("  --generate <shell>         Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Input:");
    println!("  Plain text, or a JSON object with a \"prompt\" field.");
    println!();
    println!("Modes:");
    println!("  heuristic  Pick a persona by keyword scoring (no network).");
    println!("  remote     Ask the gemini CLI to rewrite the prompt; on failure print it unchanged.");
    println!("  hybrid     Ask the gemini CLI first, fall back to keyword scoring.");
    println!();
    println!("Environment:");
    println!("  PROMPT_ENHANCE_MODE         Default for --mode");
    println!("  PROMPT_ENHANCE_MODEL        Default for --model");
    println!("  PROMPT_ENHANCE_TIMEOUT      Default for --timeout");
    println!("  PROMPT_ENHANCE_GEMINI_BIN   Default for --gemini-bin");
    println!("  PROMPT_ENHANCE_LOG          Append JSONL logs to this file");
    println!("  GEMINI_API_KEY              Credential for the remote classifier");
    println!("  Values in the environment take precedence over the env file.");
    println!();
    println!("Examples:");
    println!("  echo 'Deploy the api to kubernetes' | prompt-enhance");
    println!("  echo '{{\"prompt\": \"Review this PR\"}}' | prompt-enhance --mode hybrid");
    println!("  echo 'Fix the login bug' | prompt-enhance --suggest");
}
