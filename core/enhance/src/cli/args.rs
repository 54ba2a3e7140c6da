use std::path::PathBuf;

use crate::domain::{EnhanceCommand, EnhanceMode, PersonaId};
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;

pub const BIN_NAME: &str = "prompt-enhance";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// --list-personas: ペルソナ一覧を表示
    pub list_personas: bool,
    /// --suggest: 入力を書き換えず、選ばれるペルソナと根拠を表示
    pub suggest: bool,
    /// -v / --verbose: 判定の詳細を stderr に出す
    pub verbose: bool,
    pub mode: Option<EnhanceMode>,
    /// --persona: 分類せずこのペルソナを使う
    pub persona: Option<PersonaId>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub gemini_bin: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new(BIN_NAME)
        .about("Rewrite a prompt read from stdin with the best-matching expert persona")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("list-personas")
                .long("list-personas")
                .help("List available personas")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("suggest")
                .long("suggest")
                .help("Show the persona that would be chosen for stdin, without rewriting it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit debug logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("mode")
                .long("mode")
                .value_name("mode")
                .help("Enhancement mode (heuristic, remote, hybrid)")
                .value_parser(|s: &str| s.parse::<EnhanceMode>())
                .num_args(1),
        )
        .arg(
            clap::Arg::new("persona")
                .long("persona")
                .value_name("id")
                .help("Use this persona instead of classifying (see --list-personas)")
                .value_parser(|s: &str| s.parse::<PersonaId>())
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .long("model")
                .value_name("model")
                .help("Model name passed to the remote classifier")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("timeout")
                .long("timeout")
                .value_name("secs")
                .help("Maximum wait for the remote classifier in seconds")
                .value_parser(value_parser!(u64))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("gemini-bin")
                .long("gemini-bin")
                .value_name("path")
                .help("gemini CLI executable")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("env-file")
                .long("env-file")
                .value_name("path")
                .help("key=value file read once at start (default: ./.env)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        list_personas: matches.get_flag("list-personas"),
        suggest: matches.get_flag("suggest"),
        verbose: matches.get_flag("verbose"),
        mode: matches.get_one::<EnhanceMode>("mode").copied(),
        persona: matches.get_one::<PersonaId>("persona").copied(),
        model: matches.get_one::<String>("model").cloned(),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
        gemini_bin: matches.get_one::<PathBuf>("gemini-bin").cloned(),
        env_file: matches.get_one::<PathBuf>("env-file").cloned(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }
    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut std::io::stdout());
}

/// Config を EnhanceCommand に変換する
pub fn config_to_command(config: &Config) -> EnhanceCommand {
    if config.help {
        return EnhanceCommand::Help;
    }
    if config.list_personas {
        return EnhanceCommand::ListPersonas;
    }
    if config.suggest {
        return EnhanceCommand::Suggest;
    }
    EnhanceCommand::Enhance
}
